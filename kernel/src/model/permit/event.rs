use crate::model::id::{PermitId, ReservationId};
use chrono::{DateTime, Utc};
use derive_new::new;

#[derive(new, Debug)]
pub struct CreatePermit {
    // 署名対象になるため ID は発行前に採番しておく
    pub permit_id: PermitId,
    pub reservation_id: ReservationId,
    pub qr_payload: String,
    pub valid_from: DateTime<Utc>,
    pub valid_to: DateTime<Utc>,
    pub issued_at: DateTime<Utc>,
}
