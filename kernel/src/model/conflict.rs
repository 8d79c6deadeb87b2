use crate::model::{footprint::Footprint, reservation::Reservation, window::TimeWindow};
use shared::error::{AppError, AppResult, ConflictDetail};

// 提案とぶつかった既存予約と、その判定に使った数値
#[derive(Debug, Clone)]
pub struct SpatialConflict {
    pub reservation: Reservation,
    pub distance_m: f64,
    pub required_separation_m: f64,
}

impl SpatialConflict {
    pub fn detail(&self) -> ConflictDetail {
        ConflictDetail {
            reservation_id: self.reservation.id.raw(),
            start_time: self.reservation.window.start(),
            end_time: self.reservation.window.end(),
            distance_m: self.distance_m,
            required_separation_m: self.required_separation_m,
        }
    }
}

// 提案された設置範囲・時間帯を既存の承認済み予約群と突き合わせる。
// 時間帯が重なり、かつ中心間距離が双方の導出半径の和以下（接触を含む）の
// 予約をすべて返す。先頭 1 件ではなく全件を返すのは、申請者に
// どの予約が妨げになっているかを列挙して見せるため。
// 候補の半径は保存済みの寸法から都度導出し直す
pub fn detect_conflicts(
    proposed: &Footprint,
    window: &TimeWindow,
    candidates: &[Reservation],
) -> AppResult<Vec<SpatialConflict>> {
    let mut conflicts = Vec::new();

    for candidate in candidates {
        // 検索側で時間帯は絞られている想定だが、ここでも必ず確認する
        if !window.overlaps(&candidate.window) {
            continue;
        }

        let candidate_footprint = candidate.footprint()?;
        let distance_m = proposed.center().distance_m(&candidate_footprint.center());
        let required_separation_m =
            proposed.derived_radius_m() + candidate_footprint.derived_radius_m();

        if distance_m <= required_separation_m {
            conflicts.push(SpatialConflict {
                reservation: candidate.clone(),
                distance_m,
                required_separation_m,
            });
        }
    }

    Ok(conflicts)
}

// 検出結果を API へ返すエラーに変換する
pub fn conflict_error(conflicts: Vec<SpatialConflict>) -> AppError {
    AppError::SpatialTemporalConflict {
        conflicts: conflicts.iter().map(SpatialConflict::detail).collect(),
    }
}
