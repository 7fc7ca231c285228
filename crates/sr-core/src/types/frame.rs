//! 이름 있는 컬럼으로 구성된 가격 프레임.
//!
//! 외부에서 들어오는 표 형식 가격 데이터를 그대로 담는 타입입니다.
//! 컬럼 존재 여부와 타입 검증은 분석 크레이트의 검증 단계가 담당합니다.
//!
//! JSON 형식:
//!
//! ```json
//! {
//!   "columns": {
//!     "close":  { "dtype": "float64", "values": [237.5, 238.8] },
//!     "volume": { "dtype": "int64",   "values": [28330, 72827] }
//!   }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::candle::Candle;
use crate::error::LevelResult;

/// 컬럼 데이터 타입.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DType {
    Float64,
    Float32,
    Int8,
    Int16,
    Int32,
    Int64,
    Utf8,
    Bool,
}

impl DType {
    /// 부동소수점 타입인지 확인합니다.
    pub fn is_float(&self) -> bool {
        matches!(self, DType::Float64 | DType::Float32)
    }

    /// 정수 타입인지 확인합니다.
    pub fn is_integer(&self) -> bool {
        matches!(self, DType::Int8 | DType::Int16 | DType::Int32 | DType::Int64)
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DType::Float64 => "float64",
            DType::Float32 => "float32",
            DType::Int8 => "int8",
            DType::Int16 => "int16",
            DType::Int32 => "int32",
            DType::Int64 => "int64",
            DType::Utf8 => "utf8",
            DType::Bool => "bool",
        };
        write!(f, "{}", name)
    }
}

/// 타입이 지정된 컬럼 값.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "dtype", content = "values", rename_all = "lowercase")]
pub enum Column {
    Float64(Vec<f64>),
    Float32(Vec<f32>),
    Int8(Vec<i8>),
    Int16(Vec<i16>),
    Int32(Vec<i32>),
    Int64(Vec<i64>),
    Utf8(Vec<String>),
    Bool(Vec<bool>),
}

impl Column {
    /// 컬럼 데이터 타입.
    pub fn dtype(&self) -> DType {
        match self {
            Column::Float64(_) => DType::Float64,
            Column::Float32(_) => DType::Float32,
            Column::Int8(_) => DType::Int8,
            Column::Int16(_) => DType::Int16,
            Column::Int32(_) => DType::Int32,
            Column::Int64(_) => DType::Int64,
            Column::Utf8(_) => DType::Utf8,
            Column::Bool(_) => DType::Bool,
        }
    }

    /// 행 수.
    pub fn len(&self) -> usize {
        match self {
            Column::Float64(v) => v.len(),
            Column::Float32(v) => v.len(),
            Column::Int8(v) => v.len(),
            Column::Int16(v) => v.len(),
            Column::Int32(v) => v.len(),
            Column::Int64(v) => v.len(),
            Column::Utf8(v) => v.len(),
            Column::Bool(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 부동소수점 컬럼을 `f64` 값으로 변환합니다. 다른 타입은 `None`.
    pub fn to_f64_values(&self) -> Option<Vec<f64>> {
        match self {
            Column::Float64(v) => Some(v.clone()),
            Column::Float32(v) => Some(v.iter().map(|&x| f64::from(x)).collect()),
            _ => None,
        }
    }

    /// 정수 컬럼을 `i64` 값으로 변환합니다. 다른 타입은 `None`.
    pub fn to_i64_values(&self) -> Option<Vec<i64>> {
        match self {
            Column::Int8(v) => Some(v.iter().map(|&x| i64::from(x)).collect()),
            Column::Int16(v) => Some(v.iter().map(|&x| i64::from(x)).collect()),
            Column::Int32(v) => Some(v.iter().map(|&x| i64::from(x)).collect()),
            Column::Int64(v) => Some(v.clone()),
            _ => None,
        }
    }
}

/// 이름 있는 컬럼들의 집합.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceFrame {
    /// 컬럼 이름 → 컬럼 값
    #[serde(default)]
    pub columns: BTreeMap<String, Column>,
}

impl PriceFrame {
    /// 빈 프레임을 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 컬럼을 추가한 프레임을 반환합니다.
    pub fn with_column(mut self, name: impl Into<String>, column: Column) -> Self {
        self.columns.insert(name.into(), column);
        self
    }

    /// 이름으로 컬럼을 조회합니다.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.get(name)
    }

    /// 캔들 목록으로 표준 OHLCV 프레임을 생성합니다 (float64 가격, int64 거래량).
    pub fn from_candles(candles: &[Candle]) -> Self {
        let prices = |f: fn(&Candle) -> f64| Column::Float64(candles.iter().map(f).collect());

        Self::new()
            .with_column("open", prices(|c| c.open))
            .with_column("high", prices(|c| c.high))
            .with_column("low", prices(|c| c.low))
            .with_column("close", prices(|c| c.close))
            .with_column(
                "volume",
                Column::Int64(candles.iter().map(|c| c.volume).collect()),
            )
    }

    /// JSON 문자열에서 프레임을 파싱합니다.
    pub fn from_json(json: &str) -> LevelResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
