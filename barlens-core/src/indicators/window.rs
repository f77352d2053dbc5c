//! Rolling-window primitives: sum, mean, sample variance/std, extrema.
//!
//! All primitives run in O(n): sums are maintained add-newest/subtract-oldest,
//! extrema use a monotonic deque. Outputs always have the input's length.
//!
//! Fill policy for the leading `window - 1` bars:
//! - `rolling_sum` / `rolling_mean`: 0.0
//! - `rolling_variance` / `rolling_std` / `rolling_max` / `rolling_min`: NaN
//!
//! `window == 0` or `len < window` yields an all-fill output.
//!
//! A NaN input makes the sum, mean and variance of every window holding it
//! NaN. Windows after it has left are re-summed from scratch, so the NaN
//! never leaks into them.

use std::collections::VecDeque;

/// Below this share of the squared mass pushed through the running sums, a
/// sliding second moment is dominated by rounding and the window is re-summed.
const CANCELLATION_TOLERANCE: f64 = 1e-9;

/// Trailing sum over `window` values.
pub fn rolling_sum(series: &[f64], window: usize) -> Vec<f64> {
    let n = series.len();
    let mut result = vec![0.0; n];
    if window == 0 || n < window {
        return result;
    }

    let mut nans = NanCount::default();
    let mut sum = 0.0;
    let mut stale = true;
    for i in 0..n {
        let leaving = i.checked_sub(window).map(|j| series[j]);
        nans.slide(series[i], leaving);
        if i + 1 < window {
            continue;
        }
        if nans.any() {
            stale = true;
            result[i] = f64::NAN;
            continue;
        }
        match leaving {
            Some(old) if !stale => sum += series[i] - old,
            _ => {
                sum = series[i + 1 - window..=i].iter().sum();
                stale = false;
            }
        }
        result[i] = sum;
    }
    result
}

/// Trailing arithmetic mean over `window` values.
pub fn rolling_mean(series: &[f64], window: usize) -> Vec<f64> {
    let mut result = rolling_sum(series, window);
    if window == 0 || series.len() < window {
        return result;
    }
    let w = window as f64;
    for v in result.iter_mut().skip(window - 1) {
        *v /= w;
    }
    result
}

/// Trailing sample variance (denominator `window - 1`), clamped to >= 0.
///
/// A flat window yields exactly zero at any price level. A window of 1 has
/// zero variance.
pub fn rolling_variance(series: &[f64], window: usize) -> Vec<f64> {
    let n = series.len();
    let mut result = vec![f64::NAN; n];
    if window == 0 || n < window {
        return result;
    }
    if window == 1 {
        for (r, x) in result.iter_mut().zip(series) {
            *r = if x.is_nan() { f64::NAN } else { 0.0 };
        }
        return result;
    }

    let w = window as f64;
    let mut nans = NanCount::default();
    let mut moments = WindowMoments::default();
    for i in 0..n {
        let leaving = i.checked_sub(window).map(|j| series[j]);
        nans.slide(series[i], leaving);
        if i + 1 < window {
            continue;
        }
        if nans.any() {
            moments.stale = true;
            continue;
        }

        let current = &series[i + 1 - window..=i];
        match leaving {
            Some(old) if !moments.stale => moments.slide(series[i], old),
            _ => moments.reseed(current),
        }
        if moments.m2(w) < CANCELLATION_TOLERANCE * moments.mass {
            moments.reseed(current);
        }
        result[i] = (moments.m2(w) / (w - 1.0)).max(0.0);
    }
    result
}

/// Number of NaN values inside the current window.
#[derive(Debug, Default)]
struct NanCount(usize);

impl NanCount {
    fn slide(&mut self, entering: f64, leaving: Option<f64>) {
        if entering.is_nan() {
            self.0 += 1;
        }
        if leaving.is_some_and(f64::is_nan) {
            self.0 -= 1;
        }
    }

    fn any(&self) -> bool {
        self.0 > 0
    }
}

/// First and second moments of a window, taken relative to `reference`.
///
/// `mass` accumulates every squared deviation added to or removed from
/// `sum_sq` since the last reseed; it bounds the rounding error carried by
/// the running sums.
#[derive(Debug)]
struct WindowMoments {
    reference: f64,
    sum: f64,
    sum_sq: f64,
    mass: f64,
    stale: bool,
}

impl Default for WindowMoments {
    fn default() -> Self {
        Self {
            reference: 0.0,
            sum: 0.0,
            sum_sq: 0.0,
            mass: 0.0,
            stale: true,
        }
    }
}

impl WindowMoments {
    /// Re-sum from scratch around the window's first value.
    fn reseed(&mut self, window: &[f64]) {
        self.reference = window.first().copied().unwrap_or(0.0);
        self.sum = 0.0;
        self.sum_sq = 0.0;
        for &x in window {
            let d = x - self.reference;
            self.sum += d;
            self.sum_sq += d * d;
        }
        self.mass = self.sum_sq;
        self.stale = false;
    }

    fn slide(&mut self, entering: f64, leaving: f64) {
        let a = entering - self.reference;
        let b = leaving - self.reference;
        self.sum += a - b;
        self.sum_sq += a * a - b * b;
        self.mass += a * a + b * b;
    }

    /// Sum of squared deviations from the window mean.
    fn m2(&self, w: f64) -> f64 {
        self.sum_sq - self.sum * self.sum / w
    }
}

/// Trailing sample standard deviation: `sqrt(rolling_variance)`.
pub fn rolling_std(series: &[f64], window: usize) -> Vec<f64> {
    rolling_variance(series, window)
        .into_iter()
        .map(f64::sqrt)
        .collect()
}

/// Trailing maximum over `window` values. NaN inputs are skipped; a window
/// holding no numbers yields NaN.
pub fn rolling_max(series: &[f64], window: usize) -> Vec<f64> {
    rolling_extreme(series, window, |candidate, kept| candidate >= kept)
}

/// Trailing minimum over `window` values. NaN inputs are skipped.
pub fn rolling_min(series: &[f64], window: usize) -> Vec<f64> {
    rolling_extreme(series, window, |candidate, kept| candidate <= kept)
}

/// Monotonic-deque extreme. `dominates(a, b)` is true when `a` makes `b`
/// irrelevant for every later window.
fn rolling_extreme(series: &[f64], window: usize, dominates: fn(f64, f64) -> bool) -> Vec<f64> {
    let n = series.len();
    let mut result = vec![f64::NAN; n];
    if window == 0 || n < window {
        return result;
    }

    let mut deque: VecDeque<usize> = VecDeque::with_capacity(window);
    for (i, &x) in series.iter().enumerate() {
        if !x.is_nan() {
            while let Some(&back) = deque.back() {
                if dominates(x, series[back]) {
                    deque.pop_back();
                } else {
                    break;
                }
            }
            deque.push_back(i);
        }
        while let Some(&front) = deque.front() {
            if front + window <= i {
                deque.pop_front();
            } else {
                break;
            }
        }
        if i + 1 >= window {
            if let Some(&front) = deque.front() {
                result[i] = series[front];
            }
        }
    }
    result
}
