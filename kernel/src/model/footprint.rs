use crate::model::geo::GeoPoint;
use shared::error::{AppError, AppResult};

// 矩形の設置面積（幅 × 奥行き）を円の半径ひとつに変換する。
// 矩形の対角線を直径とする外接円なので、回転方向が不明でも
// 矩形のどの部分も円テストから漏れない（安全側の過大近似）。
pub fn radius_from_dimensions(width_m: f64, length_m: f64) -> AppResult<f64> {
    // NaN も弾くため否定形で比較する
    if !(width_m > 0.0) || !(length_m > 0.0) {
        return Err(AppError::InvalidDimensions {
            width: width_m,
            length: length_m,
        });
    }
    Ok((width_m * width_m + length_m * length_m).sqrt() / 2.0)
}

// 出店者が申請する物理的な占有範囲
// 導出半径は生成時に一度だけ計算し、以降の幾何テストすべてで使い回す
#[derive(Debug, Clone, Copy)]
pub struct Footprint {
    center: GeoPoint,
    width_m: f64,
    length_m: f64,
    derived_radius_m: f64,
}

impl Footprint {
    pub fn new(center: GeoPoint, width_m: f64, length_m: f64) -> AppResult<Self> {
        let derived_radius_m = radius_from_dimensions(width_m, length_m)?;
        Ok(Self {
            center,
            width_m,
            length_m,
            derived_radius_m,
        })
    }

    pub fn center(&self) -> GeoPoint {
        self.center
    }

    pub fn width_m(&self) -> f64 {
        self.width_m
    }

    pub fn length_m(&self) -> f64 {
        self.length_m
    }

    pub fn derived_radius_m(&self) -> f64 {
        self.derived_radius_m
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn radius_of_3_by_4_is_2_5() -> anyhow::Result<()> {
        assert_eq!(radius_from_dimensions(3.0, 4.0)?, 2.5);
        Ok(())
    }

    #[test]
    fn radius_is_monotonic_in_both_inputs() -> anyhow::Result<()> {
        let base = radius_from_dimensions(3.0, 4.0)?;
        assert!(radius_from_dimensions(3.5, 4.0)? > base);
        assert!(radius_from_dimensions(3.0, 4.5)? > base);
        Ok(())
    }

    #[test]
    fn non_positive_dimensions_are_rejected() {
        assert!(matches!(
            radius_from_dimensions(0.0, 4.0),
            Err(AppError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            radius_from_dimensions(3.0, -1.0),
            Err(AppError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            radius_from_dimensions(f64::NAN, 4.0),
            Err(AppError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn footprint_caches_derived_radius() -> anyhow::Result<()> {
        let fp = Footprint::new(GeoPoint::new(35.0, 139.0), 3.0, 4.0)?;
        assert_eq!(fp.derived_radius_m(), 2.5);
        assert_eq!(fp.width_m(), 3.0);
        assert_eq!(fp.length_m(), 4.0);
        Ok(())
    }
}
