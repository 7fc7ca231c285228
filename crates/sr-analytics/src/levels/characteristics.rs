//! 레벨 특성 생성.
//!
//! 최솟값과 최댓값을 하나로 모아 가격순으로 정렬한 뒤, 각 위치의 허용 오차
//! 범위 안에 들어오는 극값들의 캔들 인덱스를 모아 후보 레벨을 만듭니다.
//! 범위가 같은 후보가 여러 개 생길 수 있으며, 중복 제거는 하지 않습니다
//! (선택 단계의 배타 규칙이 중복 선택을 막습니다).

use sr_core::{Extremum, ExtremumKind, Level};

use super::extrema::ExtremaSet;
use super::grouping::group_ranges;

/// 전체 최고가와 비율로 절대 허용 오차를 계산합니다.
pub fn absolute_tolerance(max_price: f64, tolerance_percentage: f64) -> f64 {
    max_price * tolerance_percentage / 100.0
}

/// 극값 집합에서 후보 레벨을 생성합니다.
///
/// # 인자
///
/// * `extrema` - 극값 탐지 결과
/// * `max_price` - 시리즈 전체의 최고가 (시가/고가/저가/종가 중 최댓값)
/// * `tolerance_percentage` - 병합 허용 오차 비율 (%)
///
/// # 반환
///
/// 극값 하나당 하나씩, 대표 가격 오름차순으로 정렬된 레벨
pub fn build_levels(extrema: &ExtremaSet, max_price: f64, tolerance_percentage: f64) -> Vec<Level> {
    let mut pooled: Vec<Extremum> = extrema.iter().collect();
    pooled.sort_by(|a, b| a.value.total_cmp(&b.value));

    let tolerance = absolute_tolerance(max_price, tolerance_percentage);
    let sorted: Vec<f64> = pooled.iter().map(|e| e.value).collect();

    group_ranges(&sorted, tolerance)
        .into_iter()
        .zip(&sorted)
        .map(|((left, right), &value)| {
            let members = &pooled[left..=right];
            Level {
                value,
                min_indexes: indexes_of(members, ExtremumKind::Minimum),
                max_indexes: indexes_of(members, ExtremumKind::Maximum),
                tolerance,
                tolerance_percentage,
            }
        })
        .collect()
}

fn indexes_of(members: &[Extremum], kind: ExtremumKind) -> Vec<usize> {
    members
        .iter()
        .filter(|e| e.kind == kind)
        .map(|e| e.index)
        .collect()
}
