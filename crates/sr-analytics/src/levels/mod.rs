//! 지지/저항 레벨 탐지.
//!
//! 가격 시리즈에서 다음 순서로 레벨을 계산합니다:
//!
//! 1. [`extrema`]: 몸통 하단/상단 시리즈의 국소 극값 탐지
//! 2. [`grouping`]: 정렬된 극값마다 허용 오차 안의 인덱스 범위 계산
//! 3. [`characteristics`]: 범위별로 극값 인덱스를 모아 후보 레벨 생성
//! 4. [`selector`]: 겹치지 않는 후보 중 점수 합이 최대인 부분집합 선택
//!
//! # 사용 예시
//!
//! ```ignore
//! use sr_analytics::{LevelFinder, LevelParams};
//!
//! let finder = LevelFinder::new(&LevelParams::new(2, 5.0))?;
//! let selection = finder.select(&candles);
//!
//! for level in &selection.levels {
//!     println!("{} ({}점)", level.value, level.points());
//! }
//! ```

pub mod characteristics;
pub mod extrema;
pub mod grouping;
pub mod selector;

use sr_core::{series_max_price, AppConfig, Candle, Level, LevelResult, PriceFrame, Selection};
use tracing::debug;

use crate::validation::{validate_price_frame, LevelParams, ValidatedParams};

pub use characteristics::{absolute_tolerance, build_levels};
pub use extrema::{find_extrema, ExtremaSet};
pub use grouping::group_ranges;
pub use selector::{select_levels, LevelScorer, PointCount};

/// 후보 레벨을 생성합니다 (선택 전 단계).
///
/// 캔들이 없으면 빈 목록을 반환합니다.
pub fn candidate_levels(candles: &[Candle], params: &ValidatedParams) -> Vec<Level> {
    let Some(max_price) = series_max_price(candles) else {
        return Vec::new();
    };

    let extrema = find_extrema(candles, params.order);
    let levels = build_levels(&extrema, max_price, params.tolerance_percentage);

    debug!(
        bars = candles.len(),
        minima = extrema.min_indexes.len(),
        maxima = extrema.max_indexes.len(),
        candidates = levels.len(),
        tolerance = levels.first().map(|l| l.tolerance),
        "Candidate levels built"
    );

    levels
}

/// 캔들 시리즈에서 최적의 지지/저항 레벨을 계산합니다.
///
/// 입력은 이미 검증되었다고 가정합니다.
///
/// # 인자
///
/// * `candles` - OHLCV 캔들 데이터
/// * `params` - 검증된 파라미터
/// * `scorer` - 레벨 점수 전략 (기본: [`PointCount`])
///
/// # 반환
///
/// 총점과 가격 오름차순의 선택된 레벨
pub fn compute_levels<S>(candles: &[Candle], params: &ValidatedParams, scorer: &S) -> Selection
where
    S: LevelScorer + ?Sized,
{
    let span = sr_core::level_span!(
        "compute_levels",
        params.order,
        params.tolerance_percentage,
        params.cap
    );
    let _enter = span.enter();

    let levels = candidate_levels(candles, params);
    select_levels(&levels, params.cap, scorer)
}

/// 검증된 파라미터와 점수 전략을 보관하는 레벨 계산기.
#[derive(Debug, Clone)]
pub struct LevelFinder<S = PointCount> {
    params: ValidatedParams,
    scorer: S,
}

impl LevelFinder<PointCount> {
    /// 파라미터를 검증하고 기본 점수 전략으로 계산기를 생성합니다.
    pub fn new(params: &LevelParams) -> LevelResult<Self> {
        Ok(Self {
            params: params.validated()?,
            scorer: PointCount,
        })
    }

    /// 애플리케이션 설정의 레벨 파라미터로 계산기를 생성합니다.
    pub fn from_config(config: &AppConfig) -> LevelResult<Self> {
        Self::new(&LevelParams::from(&config.levels))
    }
}

impl<S: LevelScorer> LevelFinder<S> {
    /// 점수 전략을 교체합니다.
    pub fn with_scorer<T: LevelScorer>(self, scorer: T) -> LevelFinder<T> {
        LevelFinder {
            params: self.params,
            scorer,
        }
    }

    /// 검증된 파라미터.
    pub fn params(&self) -> &ValidatedParams {
        &self.params
    }

    /// 선택 전 후보 레벨.
    pub fn candidates(&self, candles: &[Candle]) -> Vec<Level> {
        candidate_levels(candles, &self.params)
    }

    /// 최적 레벨 선택.
    pub fn select(&self, candles: &[Candle]) -> Selection {
        compute_levels(candles, &self.params, &self.scorer)
    }

    /// 가격 프레임을 검증한 뒤 최적 레벨을 선택합니다.
    pub fn select_frame(&self, frame: &PriceFrame) -> LevelResult<Selection> {
        let candles = validate_price_frame(frame)?;
        Ok(self.select(&candles))
    }
}

/// 가격 프레임과 원시 파라미터로 지지/저항 레벨을 계산합니다.
///
/// 스키마와 파라미터를 먼저 검증하며, 검증에 실패하면 알고리즘을 실행하지
/// 않습니다.
pub fn find_support_resistance(frame: &PriceFrame, params: &LevelParams) -> LevelResult<Selection> {
    let candles = validate_price_frame(frame)?;
    let params = params.validated()?;
    Ok(compute_levels(&candles, &params, &PointCount))
}
