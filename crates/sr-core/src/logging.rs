//! tracing을 사용한 로깅 인프라.
//!
//! 레벨 탐지 파이프라인 자체는 `tracing` 이벤트만 기록하며, 구독자 설치는
//! 라이브러리를 사용하는 쪽에서 이 모듈로 수행합니다.
//!
//! 파이프라인이 남기는 이벤트:
//! - `compute_levels` span (`order`, `tolerance_pct`, `cap` 필드, `level_span!` 매크로)
//! - 후보 생성 요약 (`debug`): 캔들 수, 극값 수, 후보 수, 절대 허용 오차
//! - 선택 요약 (`debug`): 후보 수, 선택 수, 총점
//! - 잘못된 점수 보정 (`warn`): 음수 또는 유한하지 않은 레벨 점수
//!
//! 출력 형식:
//! - **pretty**: 여러 줄 형식. span 필드를 눈으로 따라가며 파라미터별 결과를 비교할 때
//! - **json**: 이벤트마다 한 줄의 JSON. `candidates`, `selected`, `total_score` 같은
//!   필드를 그대로 집계할 때
//! - **compact**: 한 줄 형식. 여러 파라미터 조합을 연속으로 돌리는 벤치마크/배치 실행용

use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

/// 로그 출력 형식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// 색상이 포함된 사람이 읽기 쉬운 형식 (개발용)
    #[default]
    Pretty,
    /// 로그 집계용 JSON 형식
    Json,
    /// 간결한 한 줄 형식
    Compact,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            "compact" => Ok(Self::Compact),
            _ => Err(format!("Unknown log format: {}", s)),
        }
    }
}

/// 로깅 설정.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// 로그 레벨 필터 (예: "info", "sr_analytics=debug")
    pub level: String,
    /// 출력 형식
    pub format: LogFormat,
    /// span 이벤트 포함 여부 (진입/종료)
    pub with_span_events: bool,
    /// 파일명과 줄 번호 포함 여부
    pub with_file: bool,
    /// 대상(모듈 경로) 포함 여부
    pub with_target: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            with_span_events: false,
            with_file: false,
            with_target: true,
        }
    }
}

impl LogConfig {
    /// 새 로그 설정을 생성합니다.
    pub fn new(level: impl Into<String>) -> Self {
        Self {
            level: level.into(),
            ..Default::default()
        }
    }

    /// 로그 형식을 설정합니다.
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// span 이벤트를 활성화합니다.
    pub fn with_span_events(mut self, enabled: bool) -> Self {
        self.with_span_events = enabled;
        self
    }

    /// 환경 변수에서 설정을 생성합니다.
    pub fn from_env() -> Self {
        let level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let format = std::env::var("LOG_FORMAT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default();

        Self {
            level,
            format,
            ..Default::default()
        }
    }

    fn span_events(&self) -> FmtSpan {
        if self.with_span_events {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        }
    }

    fn fmt_layer(&self) -> Box<dyn Layer<Registry> + Send + Sync> {
        let base = fmt::layer()
            .with_file(self.with_file)
            .with_line_number(self.with_file)
            .with_target(self.with_target)
            .with_span_events(self.span_events());

        match self.format {
            LogFormat::Pretty => base.pretty().boxed(),
            LogFormat::Json => base.json().boxed(),
            LogFormat::Compact => base.compact().boxed(),
        }
    }
}

/// 주어진 설정으로 로깅 시스템을 초기화합니다.
///
/// # 예제
///
/// ```no_run
/// use sr_core::logging::{init_logging, LogConfig, LogFormat};
///
/// let config = LogConfig::new("sr_analytics=debug").with_format(LogFormat::Json);
/// init_logging(config).unwrap();
/// ```
pub fn init_logging(config: LogConfig) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&config.level))?;

    tracing_subscriber::registry()
        .with(config.fmt_layer())
        .with(env_filter)
        .try_init()?;

    tracing::info!(
        format = ?config.format,
        level = %config.level,
        "Logging initialized"
    );

    Ok(())
}

/// 환경 변수에서 로깅을 초기화합니다.
///
/// 레벨에는 `RUST_LOG`를, 형식에는 `LOG_FORMAT`을 사용합니다.
pub fn init_logging_from_env() -> Result<(), Box<dyn std::error::Error>> {
    init_logging(LogConfig::from_env())
}

/// 레벨 탐지 파라미터 필드가 포함된 span을 생성하는 매크로.
#[macro_export]
macro_rules! level_span {
    ($name:expr, $order:expr, $tolerance_pct:expr) => {
        tracing::debug_span!($name, order = %$order, tolerance_pct = %$tolerance_pct)
    };
    ($name:expr, $order:expr, $tolerance_pct:expr, $cap:expr) => {
        tracing::debug_span!(
            $name,
            order = %$order,
            tolerance_pct = %$tolerance_pct,
            cap = %$cap
        )
    };
}
