//! Numeric coercion and the small statistical kernel the repair stages
//! share. Quantiles use linear interpolation (`pos = (n - 1) * q`) so
//! independent implementations agree bit-for-bit on boundary cases.

/// Parses a cell as a float. Blank and non-numeric text both count as
/// missing; infinities and NaN are rejected rather than propagated.
pub fn coerce_numeric(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|value| value.is_finite())
}

pub fn median(values: &[f64]) -> Option<f64> {
    quantile(values, 0.5)
}

/// Linearly interpolated quantile, `q` in `[0, 1]`.
pub fn quantile(values: &[f64], q: f64) -> Option<f64> {
    if values.is_empty() || !(0.0..=1.0).contains(&q) {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let pos = (sorted.len() - 1) as f64 * q;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    if lower == upper {
        return Some(sorted[lower]);
    }
    let weight = pos - lower as f64;
    Some(sorted[lower] * (1.0 - weight) + sorted[upper] * weight)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coerce_numeric_handles_blanks_and_garbage() {
        assert_eq!(coerce_numeric(" 42.5 "), Some(42.5));
        assert_eq!(coerce_numeric("-100"), Some(-100.0));
        assert_eq!(coerce_numeric(""), None);
        assert_eq!(coerce_numeric("   "), None);
        assert_eq!(coerce_numeric("abc"), None);
        assert_eq!(coerce_numeric("NaN"), None);
    }

    #[test]
    fn median_of_odd_and_even_counts() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), Some(2.0));
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Some(2.5));
        assert_eq!(median(&[]), None);
    }

    #[test]
    fn quantile_interpolates_linearly() {
        let values = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile(&values, 0.25), Some(1.75));
        assert_eq!(quantile(&values, 0.75), Some(3.25));
        assert_eq!(quantile(&values, 0.0), Some(1.0));
        assert_eq!(quantile(&values, 1.0), Some(4.0));
    }

    #[test]
    fn quantile_of_single_value_is_that_value() {
        assert_eq!(quantile(&[7.0], 0.25), Some(7.0));
        assert_eq!(quantile(&[7.0], 0.75), Some(7.0));
    }
}
