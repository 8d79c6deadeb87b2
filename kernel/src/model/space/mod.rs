use crate::model::{footprint::Footprint, geo::GeoPoint, id::SpaceId};
use shared::error::{AppError, AppResult};

pub mod event;

// オーナーが出店を許可する区域（中心 + 許可半径）
// 作成後の中心・半径は本スコープでは不変
#[derive(Debug, Clone)]
pub struct Space {
    pub id: SpaceId,
    pub space_name: String,
    pub address: String,
    pub center: GeoPoint,
    pub allowed_radius_m: f64,
    pub is_active: bool,
}

impl Space {
    // 設置範囲が許可区域に収まるかの判定。
    //     distance(footprint.center, space.center) <= allowed_radius - derived_radius
    // 等号を含む（ちょうど境界に接する設置は受け入れる）。
    // 設置半径が許可半径以上の場合はどこに置いても収まらないため、
    // 位置の問題とは区別したエラーで返す
    pub fn check_contains(&self, footprint: &Footprint) -> AppResult<()> {
        let derived_radius_m = footprint.derived_radius_m();
        if derived_radius_m >= self.allowed_radius_m {
            return Err(AppError::FootprintExceedsCapacity {
                derived_radius_m,
                allowed_radius_m: self.allowed_radius_m,
            });
        }

        let distance_m = footprint.center().distance_m(&self.center);
        let max_distance_m = self.allowed_radius_m - derived_radius_m;
        if distance_m > max_distance_m {
            return Err(AppError::OutOfBounds {
                distance_m,
                derived_radius_m,
                allowed_radius_m: self.allowed_radius_m,
                max_distance_m,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::geo::point_north_of;

    fn space_at(center: GeoPoint, allowed_radius_m: f64) -> Space {
        Space {
            id: SpaceId::new(),
            space_name: "テストスペース".into(),
            address: "テスト住所".into(),
            center,
            allowed_radius_m,
            is_active: true,
        }
    }

    #[test]
    fn footprint_inside_the_boundary_is_accepted() -> anyhow::Result<()> {
        // 許可半径 100 m、導出半径 2.5 m（width 4 × length 3）の設置を
        // 中心から 90 m の位置に置く
        let center = GeoPoint::new(35.6812, 139.7671);
        let space = space_at(center, 100.0);
        let fp = Footprint::new(point_north_of(&center, 90.0), 4.0, 3.0)?;
        assert_eq!(fp.derived_radius_m(), 2.5);
        space.check_contains(&fp)?;
        Ok(())
    }

    #[test]
    fn boundary_is_inclusive() -> anyhow::Result<()> {
        // ちょうど distance == allowed_radius - derived_radius の位置は受け入れる
        // （加減算の丸めで落ちないよう 1 マイクロメートルの余裕を持たせる）
        let center = GeoPoint::new(35.6812, 139.7671);
        let fp = Footprint::new(point_north_of(&center, 40.0), 3.0, 4.0)?;
        let d = fp.center().distance_m(&center);
        let space = space_at(center, d + fp.derived_radius_m() + 1e-6);
        space.check_contains(&fp)?;
        Ok(())
    }

    #[test]
    fn one_meter_beyond_the_boundary_is_rejected() -> anyhow::Result<()> {
        let center = GeoPoint::new(35.6812, 139.7671);
        let fp = Footprint::new(point_north_of(&center, 40.0), 3.0, 4.0)?;
        let d = fp.center().distance_m(&center);
        let space = space_at(center, d + fp.derived_radius_m() - 1.0);
        assert!(matches!(
            space.check_contains(&fp),
            Err(AppError::OutOfBounds { .. })
        ));
        Ok(())
    }

    #[test]
    fn out_of_bounds_scenario() -> anyhow::Result<()> {
        // 許可半径 20 m、導出半径 5 m、中心から 17 m
        // 17 <= 20 - 5 = 15 は偽なので拒否
        let center = GeoPoint::new(35.6812, 139.7671);
        let space = space_at(center, 20.0);
        let fp = Footprint::new(point_north_of(&center, 17.0), 6.0, 8.0)?;
        assert_eq!(fp.derived_radius_m(), 5.0);
        assert!(matches!(
            space.check_contains(&fp),
            Err(AppError::OutOfBounds { .. })
        ));
        Ok(())
    }

    #[test]
    fn oversized_footprint_gets_a_distinct_error() -> anyhow::Result<()> {
        // 設置半径が許可半径以上なら位置によらず容量超過エラー
        let center = GeoPoint::new(35.6812, 139.7671);
        let space = space_at(center, 2.0);
        let fp = Footprint::new(center, 3.0, 4.0)?;
        assert!(matches!(
            space.check_contains(&fp),
            Err(AppError::FootprintExceedsCapacity { .. })
        ));
        Ok(())
    }
}
