use kernel::model::{
    geo::GeoPoint,
    id::{ReservationId, SpaceId},
    reservation::{Reservation, ReservationStatus},
    window::TimeWindow,
};
use shared::error::AppError;
use sqlx::types::chrono::{DateTime, Utc};

// 予約一覧・衝突候補の取得に使う型
// 導出半径は保存しないため、行には寸法だけを持つ
#[derive(sqlx::FromRow)]
pub struct ReservationRow {
    pub reservation_id: ReservationId,
    pub space_id: Option<SpaceId>,
    pub center_lat: f64,
    pub center_lng: f64,
    pub max_width: f64,
    pub max_length: f64,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: String,
    pub requested_at: DateTime<Utc>,
}

impl TryFrom<ReservationRow> for Reservation {
    type Error = AppError;

    fn try_from(value: ReservationRow) -> Result<Self, Self::Error> {
        let ReservationRow {
            reservation_id,
            space_id,
            center_lat,
            center_lng,
            max_width,
            max_length,
            start_time,
            end_time,
            status,
            requested_at,
        } = value;
        Ok(Reservation {
            id: reservation_id,
            space_id,
            center: GeoPoint::new(center_lat, center_lng),
            width_m: max_width,
            length_m: max_length,
            window: TimeWindow::new(start_time, end_time)?,
            status: ReservationStatus::try_from(status.as_str())?,
            requested_at,
        })
    }
}
