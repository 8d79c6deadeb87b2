use crate::model::reservation::{
    CreateReservationRequest, ReservationResponse, ReservationsResponse,
    UpdateReservationStatusRequest,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use garde::Validate;
use kernel::model::{
    footprint::Footprint,
    geo::GeoPoint,
    id::{PermitId, ReservationId, SpaceId},
    permit::{event::CreatePermit, Permit, PermitStatus},
    reservation::{
        event::{CreateReservation, UpdateReservationStatus},
        Reservation, ReservationStatus,
    },
    window::TimeWindow,
};
use kernel::repository::permit::PermitRepository;
use kernel::verifier::PermitSigner;
use registry::AppRegistry;
use shared::error::{AppError, AppResult};
use std::sync::Arc;

// 出店申請を受け付ける。
// 境界チェックと衝突検出はリポジトリ内の直列化トランザクションで行われ、
// 衝突時は 409 で衝突予約の全件が返る
pub async fn submit_reservation(
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateReservationRequest>,
) -> AppResult<impl IntoResponse> {
    req.validate(&())?;

    // 寸法・時間帯の不正はいずれの幾何計算よりも先に弾く
    let footprint = Footprint::new(GeoPoint::new(req.lat, req.lng), req.width, req.length)?;
    let window = TimeWindow::new(req.start_time, req.end_time)?;

    let event = CreateReservation::new(req.space_id, footprint, window, Utc::now());
    let reservation_id = registry.reservation_repository().create(event).await?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "reservationId": reservation_id })),
    ))
}

pub async fn show_reservation(
    Path(reservation_id): Path<ReservationId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ReservationResponse>> {
    registry
        .reservation_repository()
        .find_by_id(reservation_id)
        .await
        .and_then(|reservation| match reservation {
            Some(r) => Ok(Json(r.into())),
            None => Err(AppError::EntityNotFound(format!(
                "予約（{reservation_id}）が見つかりませんでした。"
            ))),
        })
}

pub async fn show_reservations_by_space(
    Path(space_id): Path<SpaceId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ReservationsResponse>> {
    registry
        .reservation_repository()
        .find_by_space_id(space_id)
        .await
        .map(ReservationsResponse::from)
        .map(Json)
}

// 承認ワークフローからのステータス更新。
// APPROVED に遷移したタイミングで、予約の時間帯をそのまま有効期間とする
// 署名付き許可証を発行する（発行済みであれば既存の許可証を返す）
pub async fn update_reservation_status(
    Path(reservation_id): Path<ReservationId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<UpdateReservationStatusRequest>,
) -> AppResult<impl IntoResponse> {
    req.validate(&())?;

    registry
        .reservation_repository()
        .update_status(UpdateReservationStatus::new(reservation_id, req.status))
        .await?;

    if req.status != ReservationStatus::Approved {
        return Ok((StatusCode::OK, Json(serde_json::json!({}))));
    }

    let reservation = registry
        .reservation_repository()
        .find_by_id(reservation_id)
        .await?
        .ok_or_else(|| {
            AppError::EntityNotFound(format!(
                "予約（{reservation_id}）が見つかりませんでした。"
            ))
        })?;

    let permit = issue_permit(
        registry.permit_repository(),
        registry.permit_signer(),
        &reservation,
    )
    .await?;

    Ok((
        StatusCode::OK,
        Json(serde_json::json!({
            "permitId": permit.id,
            "qrPayload": permit.qr_payload,
        })),
    ))
}

// 許可証は 1 予約につき 1 枚。同じ予約への再度の APPROVED 更新では
// 新規に採番せず、発行済みの許可証（失効済みを含む）をそのまま返す
async fn issue_permit(
    permit_repository: Arc<dyn PermitRepository>,
    permit_signer: Arc<dyn PermitSigner>,
    reservation: &Reservation,
) -> AppResult<Permit> {
    if let Some(existing) = permit_repository
        .find_by_reservation_id(reservation.id)
        .await?
    {
        return Ok(existing);
    }

    // 署名対象になるため許可証 ID は先に採番する
    let permit_id = PermitId::new();
    let qr_payload = permit_signer.sign(permit_id);
    let issued_at = Utc::now();
    let event = CreatePermit::new(
        permit_id,
        reservation.id,
        qr_payload.clone(),
        reservation.window.start(),
        reservation.window.end(),
        issued_at,
    );
    permit_repository.create(event).await?;

    Ok(Permit {
        id: permit_id,
        reservation_id: reservation.id,
        qr_payload,
        valid_from: reservation.window.start(),
        valid_to: reservation.window.end(),
        status: PermitStatus::Valid,
        issued_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::TimeZone;
    use std::sync::Mutex;

    struct InMemoryPermitRepository {
        permits: Mutex<Vec<Permit>>,
    }

    impl InMemoryPermitRepository {
        fn new() -> Self {
            Self {
                permits: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl PermitRepository for InMemoryPermitRepository {
        async fn create(&self, event: CreatePermit) -> AppResult<()> {
            self.permits.lock().unwrap().push(Permit {
                id: event.permit_id,
                reservation_id: event.reservation_id,
                qr_payload: event.qr_payload,
                valid_from: event.valid_from,
                valid_to: event.valid_to,
                status: PermitStatus::Valid,
                issued_at: event.issued_at,
            });
            Ok(())
        }

        async fn find_by_id(&self, permit_id: PermitId) -> AppResult<Option<Permit>> {
            Ok(self
                .permits
                .lock()
                .unwrap()
                .iter()
                .find(|p| p.id == permit_id)
                .cloned())
        }

        async fn find_by_reservation_id(
            &self,
            reservation_id: ReservationId,
        ) -> AppResult<Option<Permit>> {
            Ok(self
                .permits
                .lock()
                .unwrap()
                .iter()
                .find(|p| p.reservation_id == reservation_id)
                .cloned())
        }

        async fn revoke(&self, permit_id: PermitId) -> AppResult<()> {
            let mut permits = self.permits.lock().unwrap();
            match permits.iter_mut().find(|p| p.id == permit_id) {
                Some(p) => {
                    p.status = PermitStatus::Revoked;
                    Ok(())
                }
                None => Err(AppError::PermitNotFound),
            }
        }
    }

    struct StaticSigner;

    impl PermitSigner for StaticSigner {
        fn sign(&self, permit_id: PermitId) -> String {
            format!("{permit_id}.signed")
        }
    }

    fn approved_reservation() -> Reservation {
        let start = Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        Reservation {
            id: ReservationId::new(),
            space_id: Some(SpaceId::new()),
            center: GeoPoint::new(35.6812, 139.7671),
            width_m: 3.0,
            length_m: 4.0,
            window: TimeWindow::new(start, end).unwrap(),
            status: ReservationStatus::Approved,
            requested_at: start,
        }
    }

    #[tokio::test]
    async fn approving_twice_reuses_the_issued_permit() -> anyhow::Result<()> {
        let repo = Arc::new(InMemoryPermitRepository::new());
        let signer = Arc::new(StaticSigner);
        let reservation = approved_reservation();

        let first = issue_permit(repo.clone(), signer.clone(), &reservation).await?;
        let second = issue_permit(repo.clone(), signer.clone(), &reservation).await?;

        assert_eq!(second.id, first.id);
        assert_eq!(second.qr_payload, first.qr_payload);
        assert_eq!(repo.permits.lock().unwrap().len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn reapproval_after_revocation_does_not_mint_a_new_permit() -> anyhow::Result<()> {
        // 失効後に再度 APPROVED にしても新しい許可証は発行されない
        let repo = Arc::new(InMemoryPermitRepository::new());
        let signer = Arc::new(StaticSigner);
        let reservation = approved_reservation();

        let first = issue_permit(repo.clone(), signer.clone(), &reservation).await?;
        repo.revoke(first.id).await?;

        let second = issue_permit(repo.clone(), signer.clone(), &reservation).await?;
        assert_eq!(second.id, first.id);
        assert_eq!(second.status, PermitStatus::Revoked);
        assert_eq!(repo.permits.lock().unwrap().len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn distinct_reservations_get_distinct_permits() -> anyhow::Result<()> {
        let repo = Arc::new(InMemoryPermitRepository::new());
        let signer = Arc::new(StaticSigner);

        let a = issue_permit(repo.clone(), signer.clone(), &approved_reservation()).await?;
        let b = issue_permit(repo.clone(), signer.clone(), &approved_reservation()).await?;

        assert_ne!(a.id, b.id);
        assert_eq!(repo.permits.lock().unwrap().len(), 2);
        Ok(())
    }
}
