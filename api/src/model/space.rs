use garde::Validate;
use kernel::model::{
    geo::GeoPoint,
    id::SpaceId,
    space::{event::CreateSpace, Space},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateSpaceRequest {
    #[garde(length(min = 1))]
    pub space_name: String,
    #[garde(length(min = 1))]
    pub address: String,
    #[garde(range(min = -90.0, max = 90.0))]
    pub lat: f64,
    #[garde(range(min = -180.0, max = 180.0))]
    pub lng: f64,
    // 出店の設置を許可する、中心からの半径（メートル）
    #[garde(range(min = 1.0))]
    pub allowed_radius: f64,
    #[garde(skip)]
    pub is_active: bool,
}

impl From<CreateSpaceRequest> for CreateSpace {
    fn from(value: CreateSpaceRequest) -> Self {
        let CreateSpaceRequest {
            space_name,
            address,
            lat,
            lng,
            allowed_radius,
            is_active,
        } = value;
        CreateSpace {
            space_name,
            address,
            center: GeoPoint::new(lat, lng),
            allowed_radius_m: allowed_radius,
            is_active,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpaceResponse {
    pub id: SpaceId,
    pub space_name: String,
    pub address: String,
    pub lat: f64,
    pub lng: f64,
    pub allowed_radius: f64,
    pub is_active: bool,
}

impl From<Space> for SpaceResponse {
    fn from(value: Space) -> Self {
        let Space {
            id,
            space_name,
            address,
            center,
            allowed_radius_m,
            is_active,
        } = value;
        Self {
            id,
            space_name,
            address,
            lat: center.latitude,
            lng: center.longitude,
            allowed_radius: allowed_radius_m,
            is_active,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpacesResponse {
    pub items: Vec<SpaceResponse>,
}

impl From<Vec<Space>> for SpacesResponse {
    fn from(value: Vec<Space>) -> Self {
        Self {
            items: value.into_iter().map(SpaceResponse::from).collect(),
        }
    }
}
