use crate::frame::float_values;
use polars::frame::DataFrame;

/// Distribution of one box in a box plot.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxStats {
    pub count: usize,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    /// The smallest sample that is not below `q1 - 1.5 * IQR`.
    pub lower_whisker: f64,
    /// The largest sample that is not above `q3 + 1.5 * IQR`.
    pub upper_whisker: f64,
    /// Samples outside the whiskers, drawn individually.
    pub suspected_outliers: Vec<f64>,
    lower_extreme_fence: f64,
    upper_extreme_fence: f64,
}

impl BoxStats {
    /// Whether a suspected outlier is also beyond `3 * IQR` from the box.
    pub fn is_extreme(&self, value: f64) -> bool {
        value < self.lower_extreme_fence || value > self.upper_extreme_fence
    }
}

pub(crate) fn box_stats(frame: &DataFrame, column: &str) -> anyhow::Result<Option<BoxStats>> {
    let values = float_values(frame, column)?;
    Ok(box_stats_of(&values))
}

pub(crate) fn box_stats_of(values: &[f64]) -> Option<BoxStats> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let q1 = percentile(&sorted, 0.25);
    let median = percentile(&sorted, 0.5);
    let q3 = percentile(&sorted, 0.75);
    let iqr = q3 - q1;
    let lower_fence = q1 - 1.5 * iqr;
    let upper_fence = q3 + 1.5 * iqr;

    let (inside, suspected_outliers): (Vec<f64>, Vec<f64>) = sorted
        .iter()
        .copied()
        .partition(|v| *v >= lower_fence && *v <= upper_fence);

    Some(BoxStats {
        count: sorted.len(),
        q1,
        median,
        q3,
        lower_whisker: inside.first().copied().unwrap_or(q1),
        upper_whisker: inside.last().copied().unwrap_or(q3),
        suspected_outliers,
        lower_extreme_fence: q1 - 3.0 * iqr,
        upper_extreme_fence: q3 + 3.0 * iqr,
    })
}

/// Linearly interpolated percentile of sorted, non-empty values, `fraction` in `[0, 1]`.
fn percentile(sorted: &[f64], fraction: f64) -> f64 {
    let position = (sorted.len() - 1) as f64 * fraction;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    sorted[lower] + (sorted[upper] - sorted[lower]) * (position - lower as f64)
}
