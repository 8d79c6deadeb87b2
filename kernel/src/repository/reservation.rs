use crate::model::{
    id::{ReservationId, SpaceId},
    reservation::{
        event::{CreateReservation, UpdateReservationStatus},
        Reservation,
    },
};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait ReservationRepository: Send + Sync {
    // 出店申請を行う。境界チェックと衝突検出を通過した場合のみ
    // PENDING で永続化される。衝突時は衝突した予約の全件を
    // SpatialTemporalConflict に載せて返す
    async fn create(&self, event: CreateReservation) -> AppResult<ReservationId>;
    // reservation_id から予約を取得する
    async fn find_by_id(&self, reservation_id: ReservationId) -> AppResult<Option<Reservation>>;
    // スペース ID に紐づく予約一覧を取得する
    async fn find_by_space_id(&self, space_id: SpaceId) -> AppResult<Vec<Reservation>>;
    // 承認ワークフローからのステータス更新
    async fn update_status(&self, event: UpdateReservationStatus) -> AppResult<()>;
}
