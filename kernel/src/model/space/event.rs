use crate::model::geo::GeoPoint;
use derive_new::new;

#[derive(new, Debug)]
pub struct CreateSpace {
    pub space_name: String,
    pub address: String,
    pub center: GeoPoint,
    pub allowed_radius_m: f64,
    pub is_active: bool,
}
