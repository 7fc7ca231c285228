//! 국소 극값 탐지.
//!
//! 캔들마다 몸통 하단(`min(open, close)`)과 몸통 상단(`max(open, close)`)
//! 시리즈를 만들고, 반경 `order`의 대칭 윈도우 안에서 극값이 되는 인덱스를
//! 찾습니다.
//!
//! - 최솟값: 윈도우 안의 모든 값보다 작거나 같음 (`<=`)
//! - 최댓값: 윈도우 안의 모든 값보다 크거나 같음 (`>=`)
//!
//! 비교가 등호를 포함하므로 평탄 구간은 인접한 여러 극값으로 잡힙니다.
//! 시리즈 경계를 넘는 윈도우 위치는 경계 값으로 잘라서 비교합니다.

use std::num::NonZeroUsize;

use sr_core::{Candle, Extremum};

/// 극값 탐지 결과 (인덱스 오름차순의 병렬 시퀀스).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtremaSet {
    /// 최솟값 캔들 인덱스
    pub min_indexes: Vec<usize>,
    /// 최댓값 캔들 인덱스
    pub max_indexes: Vec<usize>,
    /// `min_indexes`에 대응하는 몸통 하단 가격
    pub min_values: Vec<f64>,
    /// `max_indexes`에 대응하는 몸통 상단 가격
    pub max_values: Vec<f64>,
}

impl ExtremaSet {
    /// 최솟값과 최댓값의 총 개수.
    pub fn len(&self) -> usize {
        self.min_indexes.len() + self.max_indexes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 최솟값 전체, 이어서 최댓값 전체를 순회합니다.
    pub fn iter(&self) -> impl Iterator<Item = Extremum> + '_ {
        let minima = self
            .min_indexes
            .iter()
            .zip(&self.min_values)
            .map(|(&index, &value)| Extremum::minimum(index, value));
        let maxima = self
            .max_indexes
            .iter()
            .zip(&self.max_values)
            .map(|(&index, &value)| Extremum::maximum(index, value));

        minima.chain(maxima)
    }
}

/// 캔들 시리즈에서 국소 극값을 찾습니다.
///
/// # 인자
///
/// * `candles` - OHLCV 캔들 데이터
/// * `order` - 윈도우 반경 (1 이상)
pub fn find_extrema(candles: &[Candle], order: NonZeroUsize) -> ExtremaSet {
    let body_lows: Vec<f64> = candles.iter().map(Candle::body_low).collect();
    let body_highs: Vec<f64> = candles.iter().map(Candle::body_high).collect();

    let min_indexes = local_extrema(&body_lows, order.get(), |center, other| center <= other);
    let max_indexes = local_extrema(&body_highs, order.get(), |center, other| center >= other);

    ExtremaSet {
        min_values: min_indexes.iter().map(|&i| body_lows[i]).collect(),
        max_values: max_indexes.iter().map(|&i| body_highs[i]).collect(),
        min_indexes,
        max_indexes,
    }
}

/// `keep(center, neighbour)`가 윈도우 안의 모든 이웃에 대해 참인 인덱스.
fn local_extrema<F>(series: &[f64], order: usize, keep: F) -> Vec<usize>
where
    F: Fn(f64, f64) -> bool,
{
    let Some(last) = series.len().checked_sub(1) else {
        return Vec::new();
    };
    // 시리즈 길이를 넘는 반경은 모두 경계로 잘리므로 더 볼 필요가 없다
    let reach = order.min(series.len());

    (0..series.len())
        .filter(|&i| {
            (1..=reach).all(|shift| {
                let ahead = (i + shift).min(last);
                let behind = i.saturating_sub(shift);
                keep(series[i], series[ahead]) && keep(series[i], series[behind])
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    /// 시가 = 종가 인 캔들로 단일 시리즈를 만든다.
    fn flat_candles(prices: &[f64]) -> Vec<Candle> {
        prices
            .iter()
            .map(|&p| Candle::new(p, p + 1.0, p - 1.0, p, 100))
            .collect()
    }

    #[test]
    fn test_simple_valley_and_peak() {
        let candles = flat_candles(&[5.0, 4.0, 3.0, 4.0, 5.0, 6.0, 7.0, 6.0, 5.0]);
        let extrema = find_extrema(&candles, order(2));

        assert_eq!(extrema.min_indexes, vec![2, 8]);
        assert_eq!(extrema.min_values, vec![3.0, 5.0]);
        assert_eq!(extrema.max_indexes, vec![0, 6]);
        assert_eq!(extrema.max_values, vec![5.0, 7.0]);
    }

    #[test]
    fn test_plateau_yields_adjacent_extrema() {
        let candles = flat_candles(&[5.0, 3.0, 3.0, 3.0, 5.0]);
        let extrema = find_extrema(&candles, order(1));

        assert_eq!(extrema.min_indexes, vec![1, 2, 3]);
        assert!(extrema.min_values.iter().all(|&v| v == 3.0));
    }

    #[test]
    fn test_body_series_are_used() {
        // 고가/저가 꼬리는 무시하고 시가/종가만 본다
        let candles = vec![
            Candle::new(10.0, 50.0, 1.0, 12.0, 1),
            Candle::new(9.0, 9.5, 8.0, 8.5, 1),
            Candle::new(11.0, 13.0, 10.0, 12.5, 1),
        ];
        let extrema = find_extrema(&candles, order(1));

        assert_eq!(extrema.min_indexes, vec![1]);
        assert_eq!(extrema.min_values, vec![8.5]);
        // 첫 캔들은 오른쪽 이웃하고만 비교된다
        assert_eq!(extrema.max_indexes, vec![0, 2]);
        assert_eq!(extrema.max_values, vec![12.0, 12.5]);
    }

    #[test]
    fn test_order_longer_than_series() {
        let candles = flat_candles(&[2.0, 1.0, 3.0]);
        let extrema = find_extrema(&candles, order(10));

        assert_eq!(extrema.min_indexes, vec![1]);
        assert_eq!(extrema.max_indexes, vec![2]);
    }

    #[test]
    fn test_empty_series() {
        let extrema = find_extrema(&[], order(2));
        assert!(extrema.is_empty());
        assert_eq!(extrema.iter().count(), 0);
    }

    #[test]
    fn test_iter_lists_minima_first() {
        let candles = flat_candles(&[5.0, 4.0, 3.0, 4.0, 5.0, 6.0, 7.0, 6.0, 5.0]);
        let extrema = find_extrema(&candles, order(2));
        let kinds: Vec<_> = extrema.iter().map(|e| (e.kind, e.index)).collect();

        assert_eq!(
            kinds,
            vec![
                (sr_core::ExtremumKind::Minimum, 2),
                (sr_core::ExtremumKind::Minimum, 8),
                (sr_core::ExtremumKind::Maximum, 0),
                (sr_core::ExtremumKind::Maximum, 6),
            ]
        );
        assert_eq!(extrema.len(), 4);
    }
}
