//! OHLCV 캔들.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 레벨 탐지용 가격 타입.
pub type Price = f64;

/// OHLCV 캔들스틱 데이터.
///
/// 레벨 탐지는 시가/고가/저가/종가만 사용합니다. 거래량은 검증 단계에서만
/// 확인됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// 시가
    pub open: Price,
    /// 고가
    pub high: Price,
    /// 저가
    pub low: Price,
    /// 종가
    pub close: Price,
    /// 거래량
    pub volume: i64,
}

impl Candle {
    /// 새 캔들을 생성합니다.
    pub fn new(open: Price, high: Price, low: Price, close: Price, volume: i64) -> Self {
        Self {
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// `Decimal` 가격으로부터 캔들을 생성합니다.
    ///
    /// `f64`로 표현할 수 없는 가격이 있으면 `None`을 반환합니다.
    pub fn from_decimal(
        open: Decimal,
        high: Decimal,
        low: Decimal,
        close: Decimal,
        volume: i64,
    ) -> Option<Self> {
        Some(Self {
            open: open.to_f64()?,
            high: high.to_f64()?,
            low: low.to_f64()?,
            close: close.to_f64()?,
            volume,
        })
    }

    /// 시가와 종가 중 작은 값 (몸통 하단).
    pub fn body_low(&self) -> Price {
        self.open.min(self.close)
    }

    /// 시가와 종가 중 큰 값 (몸통 상단).
    pub fn body_high(&self) -> Price {
        self.open.max(self.close)
    }

    /// 네 가격(시가, 고가, 저가, 종가) 중 최댓값.
    pub fn max_price(&self) -> Price {
        self.open.max(self.high).max(self.low).max(self.close)
    }
}

/// 캔들 시리즈 전체의 최고 가격을 반환합니다. 빈 시리즈는 `None`.
pub fn series_max_price(candles: &[Candle]) -> Option<Price> {
    candles.iter().map(Candle::max_price).reduce(f64::max)
}
