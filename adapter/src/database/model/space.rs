use kernel::model::{geo::GeoPoint, id::SpaceId, space::Space};

#[derive(sqlx::FromRow)]
pub struct SpaceRow {
    pub space_id: SpaceId,
    pub space_name: String,
    pub address: String,
    pub center_lat: f64,
    pub center_lng: f64,
    pub allowed_radius: f64,
    pub is_active: bool,
}

impl From<SpaceRow> for Space {
    fn from(value: SpaceRow) -> Self {
        let SpaceRow {
            space_id,
            space_name,
            address,
            center_lat,
            center_lng,
            allowed_radius,
            is_active,
        } = value;
        Space {
            id: space_id,
            space_name,
            address,
            center: GeoPoint::new(center_lat, center_lng),
            allowed_radius_m: allowed_radius,
            is_active,
        }
    }
}
