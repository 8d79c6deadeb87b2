use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult};

// 予約の時間帯。半開区間 [start, end) として扱う
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> AppResult<Self> {
        if start >= end {
            return Err(AppError::InvalidTimeWindow { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    // 2 つの時間帯が重なるかどうか。
    // 重複条件：
    //     existing.start < new.end AND new.start < existing.end
    // （場合分けによる三分岐の判定と同値であることは下のテストで確認している）
    pub fn overlaps(&self, other: &TimeWindow) -> bool {
        // 長さ 0 の区間はコンストラクタで弾かれるが、防御的に false を返す
        if self.start == self.end || other.start == other.end {
            return false;
        }
        self.start < other.end && other.start < self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, hour, min, 0).unwrap()
    }

    fn window(start_h: u32, start_m: u32, end_h: u32, end_m: u32) -> TimeWindow {
        TimeWindow::new(at(start_h, start_m), at(end_h, end_m)).unwrap()
    }

    #[test]
    fn start_must_precede_end() {
        assert!(matches!(
            TimeWindow::new(at(12, 0), at(12, 0)),
            Err(AppError::InvalidTimeWindow { .. })
        ));
        assert!(matches!(
            TimeWindow::new(at(13, 0), at(12, 0)),
            Err(AppError::InvalidTimeWindow { .. })
        ));
    }

    #[test]
    fn touching_windows_do_not_overlap() {
        // [10:00, 11:00) と [11:00, 12:00) は接しているだけで重ならない
        let a = window(10, 0, 11, 0);
        let b = window(11, 0, 12, 0);
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn one_minute_overlap_counts() {
        let a = window(10, 0, 11, 0);
        let b = window(10, 59, 11, 30);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn containment_overlaps() {
        let outer = window(9, 0, 17, 0);
        let inner = window(12, 0, 13, 0);
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    // 重複判定を場合分けで書くと三分岐になる：
    //   1. A.start <= B.start < A.end
    //   2. B.start <= A.start < B.end
    //   3. A が B に完全に含まれる
    // 簡約形（A.start < B.end AND B.start < A.end）と同値であることを
    // 端点が一致するケースを含めて総当たりで確認する
    #[test]
    fn simplified_form_matches_three_case_form() {
        fn three_case(a: &TimeWindow, b: &TimeWindow) -> bool {
            (a.start() <= b.start() && b.start() < a.end())
                || (b.start() <= a.start() && a.start() < b.end())
                || (a.start() >= b.start() && a.end() <= b.end())
        }

        let hours = 0..6u32;
        for a_start in hours.clone() {
            for a_end in (a_start + 1)..6 {
                for b_start in hours.clone() {
                    for b_end in (b_start + 1)..6 {
                        let a = window(a_start, 0, a_end, 0);
                        let b = window(b_start, 0, b_end, 0);
                        assert_eq!(
                            a.overlaps(&b),
                            three_case(&a, &b),
                            "a = [{a_start}, {a_end}), b = [{b_start}, {b_end})"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn overlap_is_symmetric() {
        for (a, b) in [
            (window(9, 0, 12, 0), window(11, 0, 13, 0)),
            (window(9, 0, 12, 0), window(12, 0, 13, 0)),
            (window(9, 0, 12, 0), window(9, 0, 12, 0)),
            (window(9, 0, 17, 0), window(10, 0, 11, 0)),
        ] {
            assert_eq!(a.overlaps(&b), b.overlaps(&a));
        }
    }
}
