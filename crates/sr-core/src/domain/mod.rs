//! 레벨 탐지 도메인 모델.
//!
//! - `Extremum` - 국소 최솟값/최댓값
//! - `Level` - 극값을 묶은 가격대
//! - `LevelCap` - 선택 개수 상한
//! - `Selection` - 최적 레벨 선택 결과

mod extremum;
mod level;

pub use extremum::*;
pub use level::*;
