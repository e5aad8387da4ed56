//! ROI computation for monthly performance rows.

/// `(revenue - spend) / spend * 100`, rounded to 2 decimals (0.0 when spend
/// is zero). Recomputed on every write; client-supplied ROI is never trusted.
pub fn compute_roi(spend: f64, revenue: f64) -> f64 {
    if spend > 0.0 {
        round2((revenue - spend) / spend * 100.0)
    } else {
        0.0
    }
}

/// Round to 2 decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_roi() {
        assert!((compute_roi(100.0, 150.0) - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_negative_roi() {
        // Revenue < spend -> negative ROI
        assert!((compute_roi(200.0, 100.0) - (-50.0)).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zero_spend_is_zero_roi() {
        assert!(compute_roi(0.0, 50.0).abs() < f64::EPSILON);
        assert!(compute_roi(0.0, 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_rounds_to_two_decimals() {
        // (100 - 30) / 30 * 100 = 233.333...
        assert!((compute_roi(30.0, 100.0) - 233.33).abs() < f64::EPSILON);
        // (101 - 300) / 300 * 100 = -66.333...
        assert!((compute_roi(300.0, 101.0) - (-66.33)).abs() < f64::EPSILON);
    }

    #[test]
    fn test_round2() {
        assert!((round2(66.666666) - 66.67).abs() < f64::EPSILON);
        assert!((round2(-66.666666) - (-66.67)).abs() < f64::EPSILON);
        assert!((round2(50.0) - 50.0).abs() < f64::EPSILON);
    }
}
