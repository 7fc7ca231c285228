//! 레벨 탐지 시스템의 에러 타입.
//!
//! 핵심 알고리즘 자체는 실패하지 않습니다. 여기 정의된 에러는 입력 검증,
//! 설정 로드, 직렬화 경계에서만 발생합니다.

use thiserror::Error;

/// 가격 프레임 스키마 에러.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    /// 필수 컬럼 누락
    #[error("누락된 컬럼: {0:?}")]
    MissingColumns(Vec<String>),

    /// 컬럼 타입 불일치
    #[error("타입이 맞지 않는 컬럼: {0:?}")]
    TypeMismatch(Vec<String>),

    /// 컬럼 길이 불일치
    #[error("컬럼 길이 불일치: {column} 컬럼은 {found}행, 기대값 {expected}행")]
    LengthMismatch {
        column: String,
        expected: usize,
        found: usize,
    },

    /// 빈 프레임
    #[error("가격 데이터가 비어 있습니다")]
    Empty,

    /// 유한하지 않은 가격 값 (NaN, 무한대)
    #[error("유한하지 않은 가격: {column}[{row}]")]
    NonFinitePrice { column: String, row: usize },
}

/// 레벨 탐지 에러.
#[derive(Debug, Error)]
pub enum LevelError {
    /// 입력 스키마 에러
    #[error("스키마 에러: {0}")]
    Schema(#[from] SchemaError),

    /// 파라미터 범위 에러
    #[error("파라미터 범위 에러: {0}")]
    ParameterRange(String),

    /// 설정 에러
    #[error("설정 에러: {0}")]
    Config(String),

    /// 직렬화 에러
    #[error("직렬화 에러: {0}")]
    Serialization(String),
}

/// 레벨 탐지 작업을 위한 Result 타입.
pub type LevelResult<T> = Result<T, LevelError>;

impl LevelError {
    /// 호출자 입력이 잘못되어 발생한 에러인지 확인합니다.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            LevelError::Schema(_) | LevelError::ParameterRange(_)
        )
    }
}

impl From<serde_json::Error> for LevelError {
    fn from(err: serde_json::Error) -> Self {
        LevelError::Serialization(err.to_string())
    }
}

impl From<config::ConfigError> for LevelError {
    fn from(err: config::ConfigError) -> Self {
        LevelError::Config(err.to_string())
    }
}
