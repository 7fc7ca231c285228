//! 허용 오차 안의 극값 범위 계산.

/// 정렬된 값마다 `delta` 안에 들어오는 가장 넓은 인덱스 범위를 계산합니다.
///
/// 위치 `i`에 대해:
/// - `left`는 `sorted[j] >= sorted[i] - delta`를 만족하는 가장 작은 `j`
/// - `right`는 `sorted[k] <= sorted[i] + delta`를 만족하는 가장 큰 `k`
///
/// `sorted[i]`가 감소하지 않으므로 두 포인터는 앞으로만 이동하며,
/// 전체 계산은 선형 시간입니다.
///
/// # 인자
///
/// * `sorted` - 오름차순으로 정렬된 극값 가격
/// * `delta` - 절대 허용 오차 (0 이상)
///
/// # 반환
///
/// 입력 위치마다 하나씩의 `(left, right)` 쌍
pub fn group_ranges(sorted: &[f64], delta: f64) -> Vec<(usize, usize)> {
    let mut ranges = Vec::with_capacity(sorted.len());
    let mut left = 0;
    let mut right = 0;

    for (i, &value) in sorted.iter().enumerate() {
        let lower = value - delta;
        let upper = value + delta;

        while left < i && sorted[left] < lower {
            left += 1;
        }

        right = right.max(i);
        while right + 1 < sorted.len() && sorted[right + 1] <= upper {
            right += 1;
        }

        ranges.push((left, right));
    }

    ranges
}
