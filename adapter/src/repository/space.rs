use crate::database::{model::space::SpaceRow, ConnectionPool};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    id::SpaceId,
    space::{event::CreateSpace, Space},
};
use kernel::repository::space::SpaceRepository;
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct SpaceRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl SpaceRepository for SpaceRepositoryImpl {
    async fn create(&self, event: CreateSpace) -> AppResult<SpaceId> {
        let space_id = SpaceId::new();
        let res = sqlx::query(
            r#"
                INSERT INTO spaces
                (space_id, space_name, address, center_lat, center_lng,
                allowed_radius, is_active)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(space_id)
        .bind(event.space_name)
        .bind(event.address)
        .bind(event.center.latitude)
        .bind(event.center.longitude)
        .bind(event.allowed_radius_m)
        .bind(event.is_active)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No space record has been created".into(),
            ));
        }

        Ok(space_id)
    }

    async fn find_all(&self) -> AppResult<Vec<Space>> {
        let rows: Vec<SpaceRow> = sqlx::query_as(
            r#"
                SELECT
                    space_id,
                    space_name,
                    address,
                    center_lat,
                    center_lng,
                    allowed_radius,
                    is_active
                FROM spaces
                ORDER BY created_at DESC
            "#,
        )
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(Space::from).collect())
    }

    async fn find_by_id(&self, space_id: SpaceId) -> AppResult<Option<Space>> {
        let row: Option<SpaceRow> = sqlx::query_as(
            r#"
                SELECT
                    space_id,
                    space_name,
                    address,
                    center_lat,
                    center_lng,
                    allowed_radius,
                    is_active
                FROM spaces
                WHERE space_id = $1
            "#,
        )
        .bind(space_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(row.map(Space::from))
    }
}
