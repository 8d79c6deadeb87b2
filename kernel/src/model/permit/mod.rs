use crate::model::{
    id::{PermitId, ReservationId},
    reservation::ReservationStatus,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::error::AppError;

pub mod event;

// 承認済み予約に対して発行される、提示用の許可証
#[derive(Debug, Clone)]
pub struct Permit {
    pub id: PermitId,
    pub reservation_id: ReservationId,
    // 署名済み QR トークン（生成・検証は verifier 側の責務）
    pub qr_payload: String,
    pub valid_from: DateTime<Utc>,
    pub valid_to: DateTime<Utc>,
    pub status: PermitStatus,
    pub issued_at: DateTime<Utc>,
}

impl Permit {
    // 提示された許可証が現時点で有効かを評価する。
    // 4 つの独立したチェックすべてが成立して初めて有効。
    // 「無効」は想定内の結果でありエラーではない
    pub fn evaluate(
        &self,
        reservation_status: ReservationStatus,
        signature_valid: bool,
        now: DateTime<Utc>,
    ) -> PermitValidity {
        PermitValidity {
            permit_active: self.status == PermitStatus::Valid,
            // 有効期間は両端を含む閉区間で判定する
            within_window: self.valid_from <= now && now <= self.valid_to,
            reservation_approved: reservation_status == ReservationStatus::Approved,
            signature_valid,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PermitStatus {
    Valid,
    Revoked,
}

impl PermitStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PermitStatus::Valid => "VALID",
            PermitStatus::Revoked => "REVOKED",
        }
    }
}

impl TryFrom<&str> for PermitStatus {
    type Error = AppError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "VALID" => Ok(PermitStatus::Valid),
            "REVOKED" => Ok(PermitStatus::Revoked),
            other => Err(AppError::ConversionEntityError(format!(
                "不明な許可証ステータスです: {other}"
            ))),
        }
    }
}

impl std::fmt::Display for PermitStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// 検証リクエストごとのチェック結果。個別の真偽値を診断表示用に公開し、
// 全体の有効性はその論理積とする
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PermitValidity {
    pub permit_active: bool,
    pub within_window: bool,
    pub reservation_approved: bool,
    pub signature_valid: bool,
}

impl PermitValidity {
    pub fn is_valid(&self) -> bool {
        self.permit_active
            && self.within_window
            && self.reservation_approved
            && self.signature_valid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, hour, 0, 0).unwrap()
    }

    fn permit(status: PermitStatus) -> Permit {
        Permit {
            id: PermitId::new(),
            reservation_id: ReservationId::new(),
            qr_payload: "payload.signature".into(),
            valid_from: at(9),
            valid_to: at(12),
            status,
            issued_at: at(8),
        }
    }

    #[test]
    fn all_checks_pass() {
        let validity =
            permit(PermitStatus::Valid).evaluate(ReservationStatus::Approved, true, at(10));
        assert!(validity.permit_active);
        assert!(validity.within_window);
        assert!(validity.reservation_approved);
        assert!(validity.signature_valid);
        assert!(validity.is_valid());
    }

    #[test]
    fn rejected_reservation_alone_invalidates() {
        // 予約側だけが取り消されても全体は無効。他の 3 チェックは true のまま
        let validity =
            permit(PermitStatus::Valid).evaluate(ReservationStatus::Rejected, true, at(10));
        assert!(validity.permit_active);
        assert!(validity.within_window);
        assert!(!validity.reservation_approved);
        assert!(validity.signature_valid);
        assert!(!validity.is_valid());
    }

    #[test]
    fn revoked_permit_is_invalid() {
        let validity =
            permit(PermitStatus::Revoked).evaluate(ReservationStatus::Approved, true, at(10));
        assert!(!validity.permit_active);
        assert!(!validity.is_valid());
    }

    #[test]
    fn window_bounds_are_inclusive() {
        let p = permit(PermitStatus::Valid);
        assert!(p.evaluate(ReservationStatus::Approved, true, at(9)).is_valid());
        assert!(p.evaluate(ReservationStatus::Approved, true, at(12)).is_valid());
        assert!(!p.evaluate(ReservationStatus::Approved, true, at(13)).is_valid());
    }

    #[test]
    fn bad_signature_is_invalid() {
        let validity =
            permit(PermitStatus::Valid).evaluate(ReservationStatus::Approved, false, at(10));
        assert!(!validity.signature_valid);
        assert!(!validity.is_valid());
    }
}
