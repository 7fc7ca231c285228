//! # SR Core
//!
//! 지지/저항 레벨 탐지의 핵심 도메인 모델 및 타입을 제공합니다.
//!
//! 이 크레이트는 레벨 탐지 파이프라인 전반에서 사용되는 기본 타입을 제공합니다:
//! - OHLCV 캔들 및 컬럼형 가격 프레임
//! - 극값(Extremum), 레벨(Level), 선택 결과(Selection)
//! - 에러 타입
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod types;

pub use config::*;
pub use domain::*;
pub use error::*;
pub use logging::*;
pub use types::*;
