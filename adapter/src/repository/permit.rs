use crate::database::{model::permit::PermitRow, ConnectionPool};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    id::{PermitId, ReservationId},
    permit::{event::CreatePermit, Permit, PermitStatus},
};
use kernel::repository::permit::PermitRepository;
use shared::error::{AppError, AppResult};

const SELECT_PERMIT: &str = r#"
    SELECT
        permit_id,
        reservation_id,
        qr_payload,
        valid_from,
        valid_to,
        status,
        issued_at
    FROM permits
"#;

#[derive(new)]
pub struct PermitRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl PermitRepository for PermitRepositoryImpl {
    async fn create(&self, event: CreatePermit) -> AppResult<()> {
        let res = sqlx::query(
            r#"
                INSERT INTO permits
                (permit_id, reservation_id, qr_payload,
                valid_from, valid_to, status, issued_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(event.permit_id)
        .bind(event.reservation_id)
        .bind(event.qr_payload)
        .bind(event.valid_from)
        .bind(event.valid_to)
        .bind(PermitStatus::Valid.as_str())
        .bind(event.issued_at)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No permit record has been created".into(),
            ));
        }

        Ok(())
    }

    async fn find_by_id(&self, permit_id: PermitId) -> AppResult<Option<Permit>> {
        let row: Option<PermitRow> =
            sqlx::query_as(&format!("{SELECT_PERMIT} WHERE permit_id = $1"))
                .bind(permit_id)
                .fetch_optional(self.db.inner_ref())
                .await
                .map_err(AppError::SpecificOperationError)?;

        row.map(Permit::try_from).transpose()
    }

    async fn find_by_reservation_id(
        &self,
        reservation_id: ReservationId,
    ) -> AppResult<Option<Permit>> {
        let row: Option<PermitRow> =
            sqlx::query_as(&format!("{SELECT_PERMIT} WHERE reservation_id = $1"))
                .bind(reservation_id)
                .fetch_optional(self.db.inner_ref())
                .await
                .map_err(AppError::SpecificOperationError)?;

        row.map(Permit::try_from).transpose()
    }

    async fn revoke(&self, permit_id: PermitId) -> AppResult<()> {
        let res = sqlx::query(
            r#"
                UPDATE permits
                SET status = $1
                WHERE permit_id = $2
            "#,
        )
        .bind(PermitStatus::Revoked.as_str())
        .bind(permit_id)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::PermitNotFound);
        }

        Ok(())
    }
}
