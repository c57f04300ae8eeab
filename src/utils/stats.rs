/// Numeric helpers for the daily rollups. All of them skip nothing: callers
/// filter absent metrics first, so a slice is exactly the defined values.

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (n - 1 denominator). Undefined for fewer than
/// two values, which downstream maps to the UNKNOWN stability band.
pub fn sample_std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let variance =
        values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    Some(variance.sqrt())
}

pub fn min(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::min)
}

pub fn max(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[15.0]), Some(15.0));
        assert_eq!(mean(&[10.0, 20.0]), Some(15.0));
    }

    #[test]
    fn test_sample_std_dev() {
        assert_eq!(sample_std_dev(&[]), None);
        // One reading has no variance estimate
        assert_eq!(sample_std_dev(&[12.0]), None);

        // ddof=1: std([10, 20]) = sqrt(50)
        let std = sample_std_dev(&[10.0, 20.0]).unwrap();
        assert!((std - 50.0_f64.sqrt()).abs() < 1e-12);

        let std = sample_std_dev(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert!((std - 2.138089935299395).abs() < 1e-12);
    }

    #[test]
    fn test_min_max() {
        assert_eq!(min(&[]), None);
        assert_eq!(min(&[3.0, -1.0, 2.0]), Some(-1.0));
        assert_eq!(max(&[3.0, -1.0, 2.0]), Some(3.0));
    }
}
