//! Descriptive statistics for chart construction
//!
//! Small, allocation-light routines: an ordinary-least-squares line fit,
//! box-plot summaries and equal-width histogram binning.

use serde::{Deserialize, Serialize};

/// Result of an ordinary-least-squares fit `y = slope * x + intercept`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    /// Coefficient of determination; 1.0 when every y is identical
    pub r_squared: f64,
    pub n: usize,
}

impl LinearFit {
    /// Evaluate the fitted line at `x`
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Fit a least-squares line through `(x, y)` pairs
///
/// Returns `None` for fewer than two points or when all x values coincide.
pub fn ols_fit(points: &[(f64, f64)]) -> Option<LinearFit> {
    let n = points.len();
    if n < 2 {
        return None;
    }

    let nf = n as f64;
    let mean_x = points.iter().map(|p| p.0).sum::<f64>() / nf;
    let mean_y = points.iter().map(|p| p.1).sum::<f64>() / nf;

    let (mut sxx, mut sxy, mut syy) = (0.0, 0.0, 0.0);
    for &(x, y) in points {
        let dx = x - mean_x;
        let dy = y - mean_y;
        sxx += dx * dx;
        sxy += dx * dy;
        syy += dy * dy;
    }

    if sxx == 0.0 {
        return None;
    }

    let slope = sxy / sxx;
    let intercept = mean_y - slope * mean_x;
    let r_squared = if syy == 0.0 {
        1.0
    } else {
        (sxy * sxy) / (sxx * syy)
    };

    Some(LinearFit {
        slope,
        intercept,
        r_squared,
        n,
    })
}

/// Five-number summary plus fences and mean for one box
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BoxSummary {
    pub count: usize,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    /// Smallest value within `q1 - 1.5 * IQR`
    pub lower_fence: f64,
    /// Largest value within `q3 + 1.5 * IQR`
    pub upper_fence: f64,
    pub mean: f64,
}

impl BoxSummary {
    /// Summarize a set of values; `None` if empty
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));

        let q1 = quantile_sorted(&sorted, 0.25);
        let median = quantile_sorted(&sorted, 0.5);
        let q3 = quantile_sorted(&sorted, 0.75);
        let iqr = q3 - q1;
        let low_limit = q1 - 1.5 * iqr;
        let high_limit = q3 + 1.5 * iqr;

        let min = sorted[0];
        let max = sorted[sorted.len() - 1];

        let lower_fence = sorted
            .iter()
            .copied()
            .find(|v| *v >= low_limit)
            .unwrap_or(min);
        let upper_fence = sorted
            .iter()
            .rev()
            .copied()
            .find(|v| *v <= high_limit)
            .unwrap_or(max);

        Some(Self {
            count: sorted.len(),
            min,
            q1,
            median,
            q3,
            max,
            lower_fence,
            upper_fence,
            mean: sorted.iter().sum::<f64>() / sorted.len() as f64,
        })
    }

    /// True for a value drawn as an individual point beyond the whiskers
    pub fn is_outlier(&self, value: f64) -> bool {
        value < self.lower_fence || value > self.upper_fence
    }
}

/// Linearly interpolated quantile of pre-sorted, non-empty data
fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

/// A single histogram bin `[start, end)`; the last bin also includes `end`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

impl HistogramBin {
    /// Bin midpoint, used as the bar position
    pub fn center(&self) -> f64 {
        (self.start + self.end) / 2.0
    }
}

/// Split values into exactly `bin_count` equal-width bins
///
/// Empty input spans `[0, 1]`; constant input spans `[v - 0.5, v + 0.5]`.
/// Non-finite values are ignored.
pub fn histogram(values: &[f64], bin_count: usize) -> Vec<HistogramBin> {
    let bin_count = bin_count.max(1);
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();

    let (lo, hi) = match finite.iter().copied().fold(None, |acc: Option<(f64, f64)>, v| {
        Some(match acc {
            Some((lo, hi)) => (lo.min(v), hi.max(v)),
            None => (v, v),
        })
    }) {
        None => (0.0, 1.0),
        Some((lo, hi)) if lo == hi => (lo - 0.5, hi + 0.5),
        Some(range) => range,
    };

    let width = (hi - lo) / bin_count as f64;
    let mut bins: Vec<HistogramBin> = (0..bin_count)
        .map(|i| HistogramBin {
            start: lo + width * i as f64,
            end: if i + 1 == bin_count {
                hi
            } else {
                lo + width * (i + 1) as f64
            },
            count: 0,
        })
        .collect();

    for v in finite {
        let idx = (((v - lo) / width).floor() as usize).min(bin_count - 1);
        bins[idx].count += 1;
    }

    bins
}
