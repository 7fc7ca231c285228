//! 가격 레벨과 레벨 선택 결과.

use serde::{Deserialize, Serialize};
use std::fmt;

/// 인접한 극값을 허용 오차 안에서 묶은 가격대.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    /// 대표 가격 (가격대에 속한 극값 중 하나)
    pub value: f64,
    /// 가격대에 포함된 최솟값들의 캔들 인덱스
    pub min_indexes: Vec<usize>,
    /// 가격대에 포함된 최댓값들의 캔들 인덱스
    pub max_indexes: Vec<usize>,
    /// 절대 허용 오차 (전체 최고가 × 비율 / 100)
    pub tolerance: f64,
    /// 허용 오차를 만든 비율 (%)
    pub tolerance_percentage: f64,
}

impl Level {
    /// 레벨에 기여한 극값 개수 (기본 점수).
    pub fn points(&self) -> usize {
        self.min_indexes.len() + self.max_indexes.len()
    }

    /// 배타 구간의 상한 (`value + tolerance`).
    ///
    /// 이 레벨을 선택하면 값이 이보다 작은 이후 레벨은 선택할 수 없습니다.
    pub fn upper_bound(&self) -> f64 {
        self.value + self.tolerance
    }

    /// 주어진 가격의 레벨이 이 레벨과 같은 가격대로 취급되는지 확인합니다.
    pub fn excludes(&self, value: f64) -> bool {
        value >= self.value && value < self.upper_bound()
    }
}

/// 선택할 레벨 수 상한.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LevelCap {
    /// 제한 없음
    #[default]
    Unbounded,
    /// 최대 n개
    Bounded(usize),
}

impl LevelCap {
    /// `Option`으로부터 생성합니다 (`None`은 제한 없음).
    pub fn from_limit(limit: Option<usize>) -> Self {
        limit.map_or(LevelCap::Unbounded, LevelCap::Bounded)
    }

    /// 상한 값. 제한이 없으면 `None`.
    pub fn limit(&self) -> Option<usize> {
        match self {
            LevelCap::Unbounded => None,
            LevelCap::Bounded(n) => Some(*n),
        }
    }

    /// 더 이상 레벨을 선택할 수 없는지 확인합니다.
    pub fn is_exhausted(&self) -> bool {
        matches!(self, LevelCap::Bounded(0))
    }

    /// 레벨 하나를 선택한 뒤의 남은 상한.
    pub fn decrement(self) -> Self {
        match self {
            LevelCap::Unbounded => LevelCap::Unbounded,
            LevelCap::Bounded(n) => LevelCap::Bounded(n.saturating_sub(1)),
        }
    }
}

impl fmt::Display for LevelCap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelCap::Unbounded => write!(f, "unbounded"),
            LevelCap::Bounded(n) => write!(f, "{}", n),
        }
    }
}

/// 최적 레벨 선택 결과.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Selection {
    /// 선택된 레벨들의 점수 합
    pub total_score: f64,
    /// 선택된 레벨 (가격 오름차순)
    pub levels: Vec<Level>,
}

impl Selection {
    /// 빈 선택 결과.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// 선택된 레벨의 대표 가격 목록.
    pub fn values(&self) -> Vec<f64> {
        self.levels.iter().map(|l| l.value).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(value: f64, tolerance: f64) -> Level {
        Level {
            value,
            min_indexes: vec![1, 4],
            max_indexes: vec![7],
            tolerance,
            tolerance_percentage: 5.0,
        }
    }

    #[test]
    fn test_level_points_and_band() {
        let l = level(100.0, 5.0);
        assert_eq!(l.points(), 3);
        assert_eq!(l.upper_bound(), 105.0);
        assert!(l.excludes(100.0));
        assert!(l.excludes(104.9));
        assert!(!l.excludes(105.0));
    }

    #[test]
    fn test_level_cap_countdown() {
        let cap = LevelCap::Bounded(2);
        assert!(!cap.is_exhausted());
        assert!(cap.decrement().decrement().is_exhausted());
        assert_eq!(LevelCap::Bounded(0).decrement(), LevelCap::Bounded(0));

        assert_eq!(LevelCap::Unbounded.decrement(), LevelCap::Unbounded);
        assert!(!LevelCap::Unbounded.is_exhausted());
    }

    #[test]
    fn test_level_cap_from_limit() {
        assert_eq!(LevelCap::from_limit(None), LevelCap::Unbounded);
        assert_eq!(LevelCap::from_limit(Some(3)), LevelCap::Bounded(3));
        assert_eq!(LevelCap::Bounded(3).limit(), Some(3));
        assert_eq!(LevelCap::Unbounded.to_string(), "unbounded");
    }

    #[test]
    fn test_selection_serializes() {
        let selection = Selection {
            total_score: 3.0,
            levels: vec![level(100.0, 5.0)],
        };
        let json = serde_json::to_string(&selection).unwrap();
        let back: Selection = serde_json::from_str(&json).unwrap();
        assert_eq!(back.values(), vec![100.0]);
        assert!(Selection::empty().is_empty());
    }
}
