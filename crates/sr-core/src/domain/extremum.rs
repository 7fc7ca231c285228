//! 국소 극값.

use serde::{Deserialize, Serialize};

/// 극값 종류.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtremumKind {
    /// 몸통 하단 시리즈의 국소 최솟값
    Minimum,
    /// 몸통 상단 시리즈의 국소 최댓값
    Maximum,
}

/// 가격 시리즈의 국소 극값 한 점.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extremum {
    /// 시리즈 내 캔들 인덱스
    pub index: usize,
    /// 극값 가격
    pub value: f64,
    /// 종류
    pub kind: ExtremumKind,
}

impl Extremum {
    pub fn minimum(index: usize, value: f64) -> Self {
        Self {
            index,
            value,
            kind: ExtremumKind::Minimum,
        }
    }

    pub fn maximum(index: usize, value: f64) -> Self {
        Self {
            index,
            value,
            kind: ExtremumKind::Maximum,
        }
    }
}
