use crate::model::{
    footprint::Footprint,
    id::{ReservationId, SpaceId},
    reservation::ReservationStatus,
    window::TimeWindow,
};
use chrono::{DateTime, Utc};
use derive_new::new;

#[derive(new, Debug)]
pub struct CreateReservation {
    pub space_id: Option<SpaceId>,
    pub footprint: Footprint,
    pub window: TimeWindow,
    pub requested_at: DateTime<Utc>,
}

#[derive(new, Debug)]
pub struct UpdateReservationStatus {
    pub reservation_id: ReservationId,
    pub status: ReservationStatus,
}
