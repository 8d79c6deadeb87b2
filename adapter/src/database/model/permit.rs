use kernel::model::{
    id::{PermitId, ReservationId},
    permit::{Permit, PermitStatus},
};
use shared::error::AppError;
use sqlx::types::chrono::{DateTime, Utc};

#[derive(sqlx::FromRow)]
pub struct PermitRow {
    pub permit_id: PermitId,
    pub reservation_id: ReservationId,
    pub qr_payload: String,
    pub valid_from: DateTime<Utc>,
    pub valid_to: DateTime<Utc>,
    pub status: String,
    pub issued_at: DateTime<Utc>,
}

impl TryFrom<PermitRow> for Permit {
    type Error = AppError;

    fn try_from(value: PermitRow) -> Result<Self, Self::Error> {
        let PermitRow {
            permit_id,
            reservation_id,
            qr_payload,
            valid_from,
            valid_to,
            status,
            issued_at,
        } = value;
        Ok(Permit {
            id: permit_id,
            reservation_id,
            qr_payload,
            valid_from,
            valid_to,
            status: PermitStatus::try_from(status.as_str())?,
            issued_at,
        })
    }
}
