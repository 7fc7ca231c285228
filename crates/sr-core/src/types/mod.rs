//! 레벨 탐지 전반에서 사용되는 공통 타입.

mod candle;
mod frame;

pub use candle::*;
pub use frame::*;
