use chrono::{DateTime, Utc};
use garde::Validate;
use kernel::model::{
    id::{ReservationId, SpaceId},
    reservation::{Reservation, ReservationStatus},
};
use serde::{Deserialize, Serialize};

// 出店申請のリクエスト
// 寸法と時間帯の妥当性は kernel のコンストラクタ側で検証する
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationRequest {
    // 省略時はスペースに属さない単独申請（新規場所のリクエスト）
    #[garde(skip)]
    pub space_id: Option<SpaceId>,
    #[garde(range(min = -90.0, max = 90.0))]
    pub lat: f64,
    #[garde(range(min = -180.0, max = 180.0))]
    pub lng: f64,
    #[garde(skip)]
    pub width: f64,
    #[garde(skip)]
    pub length: f64,
    #[garde(skip)]
    pub start_time: DateTime<Utc>,
    #[garde(skip)]
    pub end_time: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReservationStatusRequest {
    #[garde(skip)]
    pub status: ReservationStatus,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationResponse {
    pub reservation_id: ReservationId,
    pub space_id: Option<SpaceId>,
    pub lat: f64,
    pub lng: f64,
    pub width: f64,
    pub length: f64,
    // 衝突判定に使われる導出半径（メートル）。診断表示用
    pub derived_radius: Option<f64>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: ReservationStatus,
    pub requested_at: DateTime<Utc>,
}

impl From<Reservation> for ReservationResponse {
    fn from(value: Reservation) -> Self {
        let derived_radius = value.footprint().ok().map(|fp| fp.derived_radius_m());
        let Reservation {
            id,
            space_id,
            center,
            width_m,
            length_m,
            window,
            status,
            requested_at,
        } = value;
        Self {
            reservation_id: id,
            space_id,
            lat: center.latitude,
            lng: center.longitude,
            width: width_m,
            length: length_m,
            derived_radius,
            start_time: window.start(),
            end_time: window.end(),
            status,
            requested_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationsResponse {
    pub items: Vec<ReservationResponse>,
}

impl From<Vec<Reservation>> for ReservationsResponse {
    fn from(value: Vec<Reservation>) -> Self {
        Self {
            items: value.into_iter().map(ReservationResponse::from).collect(),
        }
    }
}
