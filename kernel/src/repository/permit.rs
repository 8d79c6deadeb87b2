use crate::model::{
    id::{PermitId, ReservationId},
    permit::{event::CreatePermit, Permit},
};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait PermitRepository: Send + Sync {
    async fn create(&self, event: CreatePermit) -> AppResult<()>;
    async fn find_by_id(&self, permit_id: PermitId) -> AppResult<Option<Permit>>;
    async fn find_by_reservation_id(
        &self,
        reservation_id: ReservationId,
    ) -> AppResult<Option<Permit>>;
    // 許可証を失効させる
    async fn revoke(&self, permit_id: PermitId) -> AppResult<()>;
}
