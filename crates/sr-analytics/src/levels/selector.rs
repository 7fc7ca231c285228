//! 최적 레벨 선택.
//!
//! 가격순으로 정렬된 후보 레벨에서 서로 겹치지 않는 부분집합 중 점수 합이
//! 가장 큰 것을 고릅니다. 개수 상한이 있는 가중 구간 스케줄링 문제입니다.
//!
//! # 상태와 전이
//!
//! 상태는 `(index, remaining)` 입니다. `index >= L` 이거나 남은 상한이 0이면
//! 점수는 0입니다.
//!
//! - **건너뛰기**: `(index + 1, remaining)`
//! - **선택**: `levels[index]`의 점수 + `(next, remaining - 1)`.
//!   `next`는 `value >= levels[index].value + levels[index].tolerance`를
//!   만족하는 첫 인덱스이며 이진 탐색으로 찾습니다.
//!
//! 선택 쪽 점수가 건너뛰기보다 **엄격하게** 클 때만 선택합니다. 동점이면
//! 건너뛰기를 택합니다.
//!
//! 테이블은 `index = L - 1`부터 `0`까지 아래에서 위로 채우므로 레벨 수와
//! 무관하게 스택 깊이가 일정합니다. 시간 복잡도는 `O(L × K × log L)`,
//! 메모리는 `O(L × K)` 입니다 (`K`는 상한, 제한이 없으면 1).

use sr_core::{Level, LevelCap, Selection};
use tracing::{debug, warn};

/// 레벨 점수 전략.
///
/// 점수는 다른 레벨의 선택 여부와 무관해야 하며, 유한한 0 이상의 값이어야
/// 합니다. 음수나 유한하지 않은 값은 0으로 처리됩니다.
pub trait LevelScorer {
    fn score(&self, level: &Level) -> f64;
}

/// 기본 점수: 레벨에 기여한 극값 개수.
#[derive(Debug, Clone, Copy, Default)]
pub struct PointCount;

impl LevelScorer for PointCount {
    fn score(&self, level: &Level) -> f64 {
        level.points() as f64
    }
}

impl<F> LevelScorer for F
where
    F: Fn(&Level) -> f64,
{
    fn score(&self, level: &Level) -> f64 {
        self(level)
    }
}

/// 겹치지 않는 레벨 중 점수 합이 최대인 부분집합을 선택합니다.
///
/// # 인자
///
/// * `levels` - 대표 가격 오름차순으로 정렬된 후보 레벨
/// * `cap` - 선택할 최대 레벨 수
/// * `scorer` - 레벨 점수 전략
///
/// # 반환
///
/// 총점과 선택된 레벨 (가격 오름차순). 후보가 없으면 빈 결과.
pub fn select_levels<S>(levels: &[Level], cap: LevelCap, scorer: &S) -> Selection
where
    S: LevelScorer + ?Sized,
{
    if levels.is_empty() || cap.is_exhausted() {
        return Selection::empty();
    }

    let scores: Vec<f64> = levels
        .iter()
        .enumerate()
        .map(|(index, level)| sanitize_score(index, scorer.score(level)))
        .collect();
    let next = next_indexes(levels);

    let table = SelectionTable::fill(&scores, &next, cap);
    let chosen = table.chosen(&next);

    let selection = Selection {
        total_score: table.best_score(),
        levels: chosen.iter().map(|&i| levels[i].clone()).collect(),
    };

    debug!(
        candidates = levels.len(),
        cap = %cap,
        selected = selection.len(),
        total_score = selection.total_score,
        "Level selection finished"
    );

    selection
}

fn sanitize_score(index: usize, score: f64) -> f64 {
    if score.is_finite() && score >= 0.0 {
        score
    } else {
        warn!(index, score, "Level score must be finite and non-negative, using 0");
        0.0
    }
}

/// 각 레벨을 선택했을 때 다음으로 선택 가능한 첫 인덱스.
///
/// 선택한 레벨 자신은 항상 제외되므로 결과는 `index + 1` 이상입니다.
fn next_indexes(levels: &[Level]) -> Vec<usize> {
    let values: Vec<f64> = levels.iter().map(|l| l.value).collect();

    levels
        .iter()
        .enumerate()
        .map(|(index, level)| {
            // 이후 레벨은 모두 level.value 이상이므로 배제 구간은 앞쪽에 몰려 있다
            let rest = &values[index + 1..];
            index + 1 + rest.partition_point(|&v| level.excludes(v))
        })
        .collect()
}

/// `(index, remaining)` 상태별 최적 점수와 선택 여부.
///
/// 열은 남은 상한을 나타냅니다. 제한 없음은 1열, 상한 k는 `Bounded(0..=k)`의
/// k+1열입니다.
struct SelectionTable {
    /// 시작 상태의 상한 (레벨 수로 잘린 값)
    start: LevelCap,
    columns: usize,
    /// `(L + 1) × columns` 행 우선 배열. 마지막 행은 종료 상태.
    best: Vec<f64>,
    take: Vec<bool>,
}

impl SelectionTable {
    fn fill(scores: &[f64], next: &[usize], cap: LevelCap) -> Self {
        let len = scores.len();
        // 남은 레벨 수보다 큰 상한은 제약이 되지 않는다
        let start = match cap {
            LevelCap::Bounded(k) => LevelCap::Bounded(k.min(len)),
            LevelCap::Unbounded => LevelCap::Unbounded,
        };
        let columns = start.limit().map_or(1, |k| k + 1);

        let mut table = Self {
            start,
            columns,
            best: vec![0.0; (len + 1) * columns],
            take: vec![false; (len + 1) * columns],
        };
        let live = table.live_caps();

        for index in (0..len).rev() {
            for &remaining in &live {
                let skip = table.best[table.cell(index + 1, remaining)];
                let with = scores[index] + table.best[table.cell(next[index], remaining.decrement())];

                let cell = table.cell(index, remaining);
                if with > skip {
                    table.best[cell] = with;
                    table.take[cell] = true;
                } else {
                    table.best[cell] = skip;
                }
            }
        }

        table
    }

    /// 소진되지 않은 상한 (값을 채워야 하는 열).
    fn live_caps(&self) -> Vec<LevelCap> {
        match self.start {
            LevelCap::Unbounded => vec![LevelCap::Unbounded],
            LevelCap::Bounded(k) => (1..=k).map(LevelCap::Bounded).collect(),
        }
    }

    fn cell(&self, index: usize, remaining: LevelCap) -> usize {
        index * self.columns + remaining.limit().unwrap_or(0)
    }

    fn best_score(&self) -> f64 {
        self.best[self.cell(0, self.start)]
    }

    /// 시작 상태부터 선택 여부를 따라가며 선택된 인덱스를 오름차순으로 복원합니다.
    fn chosen(&self, next: &[usize]) -> Vec<usize> {
        let len = next.len();
        let mut chosen = Vec::new();
        let mut index = 0;
        let mut remaining = self.start;

        while index < len && !remaining.is_exhausted() {
            if self.take[self.cell(index, remaining)] {
                chosen.push(index);
                index = next[index];
                remaining = remaining.decrement();
            } else {
                index += 1;
            }
        }

        chosen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(value: f64, tolerance: f64, points: usize) -> Level {
        Level {
            value,
            min_indexes: (0..points).collect(),
            max_indexes: Vec::new(),
            tolerance,
            tolerance_percentage: 1.0,
        }
    }

    #[test]
    fn test_empty_levels() {
        let selection = select_levels(&[], LevelCap::Unbounded, &PointCount);
        assert_eq!(selection.total_score, 0.0);
        assert!(selection.is_empty());
    }

    #[test]
    fn test_zero_cap_selects_nothing() {
        let levels = vec![level(1.0, 0.5, 3)];
        let selection = select_levels(&levels, LevelCap::Bounded(0), &PointCount);
        assert!(selection.is_empty());
        assert_eq!(selection.total_score, 0.0);
    }

    #[test]
    fn test_non_overlapping_levels_all_taken() {
        let levels = vec![level(1.0, 0.5, 1), level(2.0, 0.5, 2), level(3.0, 0.5, 3)];
        let selection = select_levels(&levels, LevelCap::Unbounded, &PointCount);

        assert_eq!(selection.total_score, 6.0);
        assert_eq!(selection.values(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_overlap_prefers_heavier_combination() {
        // 1.0을 고르면 1.5는 제외된다 (1.5 < 1.0 + 1.0)
        let levels = vec![level(1.0, 1.0, 2), level(1.5, 1.0, 5), level(3.0, 1.0, 2)];
        let selection = select_levels(&levels, LevelCap::Unbounded, &PointCount);

        assert_eq!(selection.total_score, 7.0);
        assert_eq!(selection.values(), vec![1.5, 3.0]);
    }

    #[test]
    fn test_boundary_value_is_not_excluded() {
        // value == 이전 레벨의 value + tolerance 이면 함께 선택 가능
        let levels = vec![level(1.0, 1.0, 1), level(2.0, 1.0, 1)];
        let selection = select_levels(&levels, LevelCap::Unbounded, &PointCount);

        assert_eq!(selection.values(), vec![1.0, 2.0]);
    }

    #[test]
    fn test_cap_limits_selection() {
        let levels = vec![level(1.0, 0.5, 1), level(2.0, 0.5, 4), level(3.0, 0.5, 3)];

        let one = select_levels(&levels, LevelCap::Bounded(1), &PointCount);
        assert_eq!(one.values(), vec![2.0]);
        assert_eq!(one.total_score, 4.0);

        let two = select_levels(&levels, LevelCap::Bounded(2), &PointCount);
        assert_eq!(two.values(), vec![2.0, 3.0]);
        assert_eq!(two.total_score, 7.0);

        let many = select_levels(&levels, LevelCap::Bounded(100), &PointCount);
        assert_eq!(many.values(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_tie_favours_skipping() {
        // 어느 쪽이든 점수 3: 동점이면 건너뛰기가 우선이므로 뒤의 레벨이 남는다
        let levels = vec![level(1.0, 1.0, 3), level(1.5, 1.0, 3)];
        let selection = select_levels(&levels, LevelCap::Unbounded, &PointCount);

        assert_eq!(selection.total_score, 3.0);
        assert_eq!(selection.values(), vec![1.5]);
    }

    #[test]
    fn test_duplicate_ranges_counted_once() {
        let levels = vec![level(5.0, 1.0, 4), level(5.0, 1.0, 4), level(5.5, 1.0, 4)];
        let selection = select_levels(&levels, LevelCap::Unbounded, &PointCount);

        assert_eq!(selection.total_score, 4.0);
        assert_eq!(selection.len(), 1);
    }

    #[test]
    fn test_zero_tolerance_excludes_only_itself() {
        let levels = vec![level(5.0, 0.0, 1), level(5.0, 0.0, 2), level(6.0, 0.0, 1)];
        let selection = select_levels(&levels, LevelCap::Unbounded, &PointCount);

        assert_eq!(selection.total_score, 4.0);
        assert_eq!(selection.len(), 3);
    }

    #[test]
    fn test_custom_scorer_closure() {
        let levels = vec![level(1.0, 0.5, 5), level(2.0, 0.5, 1), level(10.0, 0.5, 1)];
        let by_value = |l: &Level| l.value;
        let selection = select_levels(&levels, LevelCap::Bounded(1), &by_value);

        assert_eq!(selection.values(), vec![10.0]);
        assert_eq!(selection.total_score, 10.0);
    }

    #[test]
    fn test_invalid_scores_count_as_zero() {
        let levels = vec![level(1.0, 0.5, 1), level(2.0, 0.5, 1), level(3.0, 0.5, 1)];
        let scorer = |l: &Level| if l.value == 2.0 { f64::NAN } else if l.value == 3.0 { -4.0 } else { 1.0 };
        let selection = select_levels(&levels, LevelCap::Unbounded, &scorer);

        assert_eq!(selection.total_score, 1.0);
        assert_eq!(selection.values(), vec![1.0]);
    }

    #[test]
    fn test_large_input_does_not_recurse() {
        let levels: Vec<Level> = (0..50_000).map(|i| level(i as f64, 0.5, 1)).collect();
        let selection = select_levels(&levels, LevelCap::Unbounded, &PointCount);

        assert_eq!(selection.len(), 50_000);
        assert_eq!(selection.total_score, 50_000.0);
    }

    #[test]
    fn test_next_indexes() {
        let levels = vec![level(1.0, 1.0, 1), level(1.5, 1.0, 1), level(2.0, 1.0, 1), level(4.0, 1.0, 1)];
        assert_eq!(next_indexes(&levels), vec![2, 3, 3, 4]);

        // 허용 오차 0: 자기 자신만 배제
        let flat = vec![level(1.0, 0.0, 1), level(1.0, 0.0, 1), level(2.0, 0.0, 1)];
        assert_eq!(next_indexes(&flat), vec![1, 2, 3]);
    }

    #[test]
    fn test_table_cap_clamped_and_counted_down() {
        let scores = [2.0, 3.0];
        let next = [1, 2];

        let table = SelectionTable::fill(&scores, &next, LevelCap::Bounded(5));
        assert_eq!(table.start, LevelCap::Bounded(2));
        assert_eq!(table.columns, 3);
        assert_eq!(table.live_caps(), vec![LevelCap::Bounded(1), LevelCap::Bounded(2)]);
        assert_eq!(table.best_score(), 5.0);
        assert_eq!(table.chosen(&next), vec![0, 1]);

        let single = SelectionTable::fill(&scores, &next, LevelCap::Bounded(1));
        assert_eq!(single.best_score(), 3.0);
        assert_eq!(single.chosen(&next), vec![1]);

        let unbounded = SelectionTable::fill(&scores, &next, LevelCap::Unbounded);
        assert_eq!(unbounded.columns, 1);
        assert_eq!(unbounded.chosen(&next), vec![0, 1]);
    }
}
