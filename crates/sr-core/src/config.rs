//! 설정 관리.
//!
//! 파일(TOML)과 `SR__` 접두사 환경 변수에서 애플리케이션 설정을 로드합니다.
//!
//! ```toml
//! [logging]
//! level = "debug"
//! format = "json"
//!
//! [levels]
//! order = 3
//! tolerance_percentage = 2.5
//! max_level_count = 4
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::logging::LogConfig;

/// 애플리케이션 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// 로깅 설정
    #[serde(default)]
    pub logging: LoggingConfig,
    /// 레벨 탐지 파라미터
    #[serde(default)]
    pub levels: LevelSettings,
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// 로그 레벨
    #[serde(default = "default_log_level")]
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl LoggingConfig {
    /// 로깅 초기화용 [`LogConfig`]로 변환합니다.
    ///
    /// 알 수 없는 형식 문자열은 기본 형식(pretty)으로 대체됩니다.
    pub fn to_log_config(&self) -> LogConfig {
        LogConfig::new(self.level.clone()).with_format(self.format.parse().unwrap_or_default())
    }
}

/// 레벨 탐지 파라미터 설정.
///
/// 값은 검증되지 않은 원시 값입니다. 실제 계산 전에 분석 크레이트의
/// 검증 단계를 거쳐야 합니다.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LevelSettings {
    /// 극값 탐지 윈도우 반경 (기본값: 2)
    #[serde(default = "default_order")]
    pub order: i64,
    /// 전체 최고가 대비 병합 허용 오차 비율 (기본값: 5%)
    #[serde(default = "default_tolerance_percentage")]
    pub tolerance_percentage: f64,
    /// 선택할 최대 레벨 수 (기본값: 제한 없음)
    #[serde(default)]
    pub max_level_count: Option<i64>,
}

fn default_order() -> i64 {
    2
}
fn default_tolerance_percentage() -> f64 {
    5.0
}

impl Default for LevelSettings {
    fn default() -> Self {
        Self {
            order: default_order(),
            tolerance_percentage: default_tolerance_percentage(),
            max_level_count: None,
        }
    }
}

impl AppConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .add_source(Self::env_source());

        builder.build()?.try_deserialize()
    }

    /// 기본 경로에서 설정을 로드합니다. 파일이 없으면 기본값과 환경 변수만 사용합니다.
    pub fn load_default() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(Self::env_source());

        builder.build()?.try_deserialize()
    }

    /// TOML 문자열에서 설정을 로드합니다.
    pub fn from_toml_str(contents: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from_str(contents, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    fn env_source() -> config::Environment {
        config::Environment::with_prefix("SR")
            .separator("__")
            .try_parsing(true)
    }
}
