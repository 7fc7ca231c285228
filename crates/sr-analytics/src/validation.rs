//! 입력 검증.
//!
//! 레벨 탐지 알고리즘은 입력이 올바르다고 가정하고 다시 검증하지 않습니다.
//! 이 모듈은 알고리즘 진입 전에 가격 프레임 스키마와 파라미터 범위를
//! 확인합니다.

use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};
use sr_core::{
    Candle, Column, LevelCap, LevelError, LevelResult, LevelSettings, PriceFrame, SchemaError,
};
use validator::{Validate, ValidationError};

/// 부동소수점이어야 하는 가격 컬럼.
pub const PRICE_COLUMNS: [&str; 4] = ["close", "high", "low", "open"];

/// 정수여야 하는 거래량 컬럼.
pub const VOLUME_COLUMN: &str = "volume";

// ==================== 가격 프레임 ====================

/// 가격 프레임의 스키마를 검증하고 캔들 목록으로 변환합니다.
///
/// # 에러
///
/// - 필수 컬럼 누락 → [`SchemaError::MissingColumns`]
/// - 가격 컬럼이 float32/float64가 아니거나 거래량 컬럼이 정수가 아님
///   → [`SchemaError::TypeMismatch`]
/// - 컬럼 길이가 서로 다름 → [`SchemaError::LengthMismatch`]
/// - 행이 없음 → [`SchemaError::Empty`]
/// - NaN/무한대 가격 → [`SchemaError::NonFinitePrice`]
pub fn validate_price_frame(frame: &PriceFrame) -> LevelResult<Vec<Candle>> {
    let required = PRICE_COLUMNS.iter().copied().chain([VOLUME_COLUMN]);

    let mut missing: Vec<String> = required
        .clone()
        .filter(|name| frame.column(name).is_none())
        .map(String::from)
        .collect();
    if !missing.is_empty() {
        missing.sort();
        return Err(SchemaError::MissingColumns(missing).into());
    }

    let mut mismatched: Vec<String> = required
        .filter(|name| {
            let dtype = frame.column(name).map(Column::dtype);
            let expected_float = *name != VOLUME_COLUMN;
            !dtype.is_some_and(|d| if expected_float { d.is_float() } else { d.is_integer() })
        })
        .map(String::from)
        .collect();
    if !mismatched.is_empty() {
        mismatched.sort();
        return Err(SchemaError::TypeMismatch(mismatched).into());
    }

    let price = |name: &str| -> LevelResult<Vec<f64>> {
        frame
            .column(name)
            .and_then(Column::to_f64_values)
            .ok_or_else(|| SchemaError::TypeMismatch(vec![name.to_string()]).into())
    };
    let open = price("open")?;
    let high = price("high")?;
    let low = price("low")?;
    let close = price("close")?;
    let volume = frame
        .column(VOLUME_COLUMN)
        .and_then(Column::to_i64_values)
        .ok_or_else(|| SchemaError::TypeMismatch(vec![VOLUME_COLUMN.to_string()]))?;

    let rows = close.len();
    for (name, len) in [
        ("high", high.len()),
        ("low", low.len()),
        ("open", open.len()),
        (VOLUME_COLUMN, volume.len()),
    ] {
        if len != rows {
            return Err(SchemaError::LengthMismatch {
                column: name.to_string(),
                expected: rows,
                found: len,
            }
            .into());
        }
    }
    if rows == 0 {
        return Err(SchemaError::Empty.into());
    }

    for (name, values) in [("close", &close), ("high", &high), ("low", &low), ("open", &open)] {
        if let Some(row) = values.iter().position(|v| !v.is_finite()) {
            return Err(SchemaError::NonFinitePrice {
                column: name.to_string(),
                row,
            }
            .into());
        }
    }

    Ok((0..rows)
        .map(|i| Candle::new(open[i], high[i], low[i], close[i], volume[i]))
        .collect())
}

// ==================== 파라미터 ====================

fn validate_order(value: i64) -> Result<(), ValidationError> {
    if value <= 0 {
        return Err(ValidationError::new("order_not_positive")
            .with_message("order는 1 이상의 정수여야 합니다".into()));
    }
    Ok(())
}

fn validate_tolerance_percentage(value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ValidationError::new("tolerance_percentage_not_positive")
            .with_message("tolerance_percentage는 0보다 큰 유한한 값이어야 합니다".into()));
    }
    Ok(())
}

/// Option 필드: 값이 있을 때만 내부 값으로 호출됨
fn validate_max_level_count(value: i64) -> Result<(), ValidationError> {
    if value <= 0 {
        return Err(ValidationError::new("max_level_count_not_positive")
            .with_message("max_level_count는 생략하거나 1 이상의 정수여야 합니다".into()));
    }
    Ok(())
}

/// 검증 전 레벨 탐지 파라미터.
///
/// JSON이나 설정 파일에서 그대로 역직렬화됩니다. 정수가 아닌 `order`
/// (예: `"-2"`, `2.5`)는 역직렬화 단계에서 거부됩니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct LevelParams {
    /// 극값 탐지 윈도우 반경
    #[validate(custom(function = "validate_order"))]
    pub order: i64,

    /// 전체 최고가 대비 병합 허용 오차 비율 (%)
    #[validate(custom(function = "validate_tolerance_percentage"))]
    pub tolerance_percentage: f64,

    /// 선택할 최대 레벨 수 (없으면 제한 없음)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_max_level_count"))]
    pub max_level_count: Option<i64>,
}

/// 검증을 통과한 파라미터.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidatedParams {
    /// 극값 탐지 윈도우 반경 (1 이상)
    pub order: NonZeroUsize,
    /// 병합 허용 오차 비율 (%), 양의 유한값
    pub tolerance_percentage: f64,
    /// 선택 개수 상한
    pub cap: LevelCap,
}

impl LevelParams {
    /// 상한 없는 파라미터를 생성합니다.
    pub fn new(order: i64, tolerance_percentage: f64) -> Self {
        Self {
            order,
            tolerance_percentage,
            max_level_count: None,
        }
    }

    /// 최대 레벨 수를 설정합니다.
    pub fn with_max_level_count(mut self, count: i64) -> Self {
        self.max_level_count = Some(count);
        self
    }

    /// JSON 문자열에서 파라미터를 파싱합니다.
    ///
    /// 타입이 맞지 않는 값은 [`LevelError::ParameterRange`]로 보고됩니다.
    pub fn from_json(json: &str) -> LevelResult<Self> {
        serde_json::from_str(json).map_err(|e| LevelError::ParameterRange(e.to_string()))
    }

    /// 범위를 검증하고 알고리즘용 파라미터로 변환합니다.
    pub fn validated(&self) -> LevelResult<ValidatedParams> {
        self.validate()
            .map_err(|errors| LevelError::ParameterRange(errors.to_string()))?;

        let order = usize::try_from(self.order)
            .ok()
            .and_then(NonZeroUsize::new)
            .ok_or_else(|| LevelError::ParameterRange(format!("order 범위 초과: {}", self.order)))?;

        let limit = self
            .max_level_count
            .map(|count| {
                usize::try_from(count).map_err(|_| {
                    LevelError::ParameterRange(format!("max_level_count 범위 초과: {}", count))
                })
            })
            .transpose()?;

        Ok(ValidatedParams {
            order,
            tolerance_percentage: self.tolerance_percentage,
            cap: LevelCap::from_limit(limit),
        })
    }
}

impl From<&LevelSettings> for LevelParams {
    fn from(settings: &LevelSettings) -> Self {
        Self {
            order: settings.order,
            tolerance_percentage: settings.tolerance_percentage,
            max_level_count: settings.max_level_count,
        }
    }
}
