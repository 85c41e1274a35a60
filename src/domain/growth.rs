//! Annualized revenue growth over the trailing ~5 reporting periods.

/// Compound annual growth rate over a most-recent-first revenue series.
///
/// NaN and non-positive entries are dropped before anything else; with
/// fewer than two usable points the growth is `0.0`. The exponent
/// denominator is the number of periods between the retained endpoints.
/// Returns a decimal ratio (0.12 = 12%).
pub fn revenue_growth(series: &[f64]) -> f64 {
    let usable: Vec<f64> = series
        .iter()
        .copied()
        .filter(|v| v.is_finite() && *v > 0.0)
        .collect();

    if usable.len() < 2 {
        return 0.0;
    }

    let latest = usable[0];
    let oldest = usable[usable.len() - 1];
    let periods = (usable.len() - 1) as f64;

    if latest <= 0.0 || oldest <= 0.0 {
        return 0.0;
    }

    (latest / oldest).powf(1.0 / periods) - 1.0
}
