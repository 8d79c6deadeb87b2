use derive_new::new;
use serde::{Deserialize, Serialize};

// 地球の平均半径（メートル）
const EARTH_RADIUS_M: f64 = 6_371_000.0;

// WGS84 の地理座標（度）
#[derive(new, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    // 2 点間の大圏距離（メートル）をハーバサイン公式で求める
    // 街区スケールではバックエンドの空間エンジンの距離関数と
    // サブメートル精度で一致する
    pub fn distance_m(&self, other: &GeoPoint) -> f64 {
        let phi1 = self.latitude.to_radians();
        let phi2 = other.latitude.to_radians();
        let d_phi = (other.latitude - self.latitude).to_radians();
        let d_lambda = (other.longitude - self.longitude).to_radians();

        let a = (d_phi / 2.0).sin().powi(2)
            + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_M * a.sqrt().asin()
    }

    pub fn within_radius(&self, other: &GeoPoint, radius_m: f64) -> bool {
        self.distance_m(other) <= radius_m
    }
}

// テスト用: 原点から真北に meters だけ離れた点を返す
// 同一経度上なのでハーバサイン距離は弧長とちょうど一致する
#[cfg(test)]
pub(crate) fn point_north_of(origin: &GeoPoint, meters: f64) -> GeoPoint {
    let d_lat = (meters / EARTH_RADIUS_M).to_degrees();
    GeoPoint::new(origin.latitude + d_lat, origin.longitude)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_to_self_is_zero() {
        let p = GeoPoint::new(35.6812, 139.7671);
        assert_eq!(p.distance_m(&p), 0.0);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = GeoPoint::new(35.6812, 139.7671);
        let b = GeoPoint::new(35.6896, 139.7006);
        assert!((a.distance_m(&b) - b.distance_m(&a)).abs() < 1e-9);
    }

    #[test]
    fn one_degree_of_latitude() {
        // 緯度 1 度 ≒ 111.19 km
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(1.0, 0.0);
        let d = a.distance_m(&b);
        assert!((d - 111_194.9).abs() < 1.0, "d = {d}");
    }

    #[test]
    fn city_block_scale() {
        // 真北 10 m の点はちょうど 10 m と測定される
        let a = GeoPoint::new(35.6812, 139.7671);
        let b = point_north_of(&a, 10.0);
        let d = a.distance_m(&b);
        assert!((d - 10.0).abs() < 1e-6, "d = {d}");
    }

    #[test]
    fn within_radius_is_inclusive() {
        let a = GeoPoint::new(35.6812, 139.7671);
        let b = point_north_of(&a, 25.0);
        let d = a.distance_m(&b);
        assert!(a.within_radius(&b, d));
        assert!(!a.within_radius(&b, d - 0.001));
    }
}
