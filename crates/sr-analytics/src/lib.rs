//! 지지/저항 레벨 분석.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - 국소 극값 탐지
//! - 허용 오차 기반 극값 그룹화와 후보 레벨 생성
//! - 개수 상한이 있는 최적 레벨 선택 (가중 구간 스케줄링)
//! - 가격 프레임 스키마 및 파라미터 검증
//!
//! # Re-exports
//!
//! - [`levels`]: 레벨 탐지 파이프라인 (`compute_levels`, `LevelFinder` 등)
//! - [`validation`]: 입력 검증 (`validate_price_frame`, `LevelParams` 등)

pub mod levels;
pub mod validation;

// Levels 모듈 re-exports
pub use levels::{
    absolute_tolerance, build_levels, candidate_levels, compute_levels, find_extrema,
    find_support_resistance, group_ranges, select_levels, ExtremaSet, LevelFinder, LevelScorer,
    PointCount,
};

// Validation 모듈 re-exports
pub use validation::{validate_price_frame, LevelParams, ValidatedParams};
