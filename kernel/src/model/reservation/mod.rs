use crate::model::{
    footprint::Footprint,
    geo::GeoPoint,
    id::{ReservationId, SpaceId},
    window::TimeWindow,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult};

pub mod event;

// 出店申請（設置範囲 + 時間帯 + 承認状態）
#[derive(Debug, Clone)]
pub struct Reservation {
    pub id: ReservationId,
    // None の場合はスペースに属さない単独申請（新規場所のリクエスト）
    pub space_id: Option<SpaceId>,
    pub center: GeoPoint,
    pub width_m: f64,
    pub length_m: f64,
    pub window: TimeWindow,
    pub status: ReservationStatus,
    pub requested_at: DateTime<Utc>,
}

impl Reservation {
    // 保存済みの寸法から設置範囲を組み立て直す
    // 半径は保存せず、都度この導出を通す
    pub fn footprint(&self) -> AppResult<Footprint> {
        Footprint::new(self.center, self.width_m, self.length_m)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationStatus {
    Pending,
    OwnerPending,
    OwnerRejected,
    Approved,
    Rejected,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "PENDING",
            ReservationStatus::OwnerPending => "OWNER_PENDING",
            ReservationStatus::OwnerRejected => "OWNER_REJECTED",
            ReservationStatus::Approved => "APPROVED",
            ReservationStatus::Rejected => "REJECTED",
        }
    }
}

impl TryFrom<&str> for ReservationStatus {
    type Error = AppError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "PENDING" => Ok(ReservationStatus::Pending),
            "OWNER_PENDING" => Ok(ReservationStatus::OwnerPending),
            "OWNER_REJECTED" => Ok(ReservationStatus::OwnerRejected),
            "APPROVED" => Ok(ReservationStatus::Approved),
            "REJECTED" => Ok(ReservationStatus::Rejected),
            other => Err(AppError::ConversionEntityError(format!(
                "不明な予約ステータスです: {other}"
            ))),
        }
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
