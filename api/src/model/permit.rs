use chrono::{DateTime, Utc};
use garde::Validate;
use kernel::model::{
    id::{PermitId, ReservationId},
    permit::{Permit, PermitStatus, PermitValidity},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VerifyPermitRequest {
    #[garde(length(min = 1))]
    pub token: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PermitResponse {
    pub permit_id: PermitId,
    pub reservation_id: ReservationId,
    pub qr_payload: String,
    pub valid_from: DateTime<Utc>,
    pub valid_to: DateTime<Utc>,
    pub status: PermitStatus,
    pub issued_at: DateTime<Utc>,
}

impl From<Permit> for PermitResponse {
    fn from(value: Permit) -> Self {
        let Permit {
            id,
            reservation_id,
            qr_payload,
            valid_from,
            valid_to,
            status,
            issued_at,
        } = value;
        Self {
            permit_id: id,
            reservation_id,
            qr_payload,
            valid_from,
            valid_to,
            status,
            issued_at,
        }
    }
}

// 検証結果。4 つのチェックそれぞれの真偽値と、その論理積を返す
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PermitValidityResponse {
    pub permit_id: PermitId,
    pub permit_active: bool,
    pub within_window: bool,
    pub reservation_approved: bool,
    pub signature_valid: bool,
    pub valid: bool,
}

impl PermitValidityResponse {
    pub fn new(permit_id: PermitId, validity: PermitValidity) -> Self {
        Self {
            permit_id,
            permit_active: validity.permit_active,
            within_window: validity.within_window,
            reservation_approved: validity.reservation_approved,
            signature_valid: validity.signature_valid,
            valid: validity.is_valid(),
        }
    }
}
