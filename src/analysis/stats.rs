//! Elementary descriptive statistics over `f64` slices.

/// Arithmetic mean, `None` for an empty slice
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population standard deviation (denominator N), `None` for an empty slice
pub fn population_std(values: &[f64]) -> Option<f64> {
    let mean = mean(values)?;
    Some((sum_squared_deviations(values, mean) / values.len() as f64).sqrt())
}

/// Sample standard deviation (denominator N - 1).
///
/// `None` for an empty slice, `NaN` for a single value.
pub fn sample_std(values: &[f64]) -> Option<f64> {
    let mean = mean(values)?;
    if values.len() < 2 {
        return Some(f64::NAN);
    }
    Some((sum_squared_deviations(values, mean) / (values.len() - 1) as f64).sqrt())
}

/// Minimum and maximum, `None` for an empty slice
pub fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    let first = *values.first()?;
    Some(
        values
            .iter()
            .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v))),
    )
}

/// Quantile of an ascending slice with linear interpolation between closest ranks
pub fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() || !(0.0..=1.0).contains(&q) {
        return None;
    }

    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;

    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
}

fn sum_squared_deviations(values: &[f64], mean: f64) -> f64 {
    values.iter().map(|v| (v - mean).powi(2)).sum()
}
