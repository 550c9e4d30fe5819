use super::{EXCLUDED_FROM_TOTAL, IGNORED_STAGE, PERCENT_DECIMALS, StageTotals};
use crate::error::BreakdownError;

#[derive(Debug, Clone, PartialEq)]
pub struct StageShare {
    pub label: String,
    pub percentage: f64,
}

/// Percentage of measured time per stage for one configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Breakdown {
    /// In first-seen order, without the banner and the excluded stage.
    pub shares: Vec<StageShare>,
    /// Raw accumulated value of [`EXCLUDED_FROM_TOTAL`], if the logs had it.
    pub excluded_absolute: Option<f64>,
    /// Denominator used for every share.
    pub total: f64,
}

impl Breakdown {
    pub fn labels(&self) -> Vec<&str> {
        self.shares.iter().map(|s| s.label.as_str()).collect()
    }

    pub fn percentages(&self) -> Vec<f64> {
        self.shares.iter().map(|s| s.percentage).collect()
    }

    #[cfg(test)]
    pub fn percentage(&self, label: &str) -> Option<f64> {
        self.shares
            .iter()
            .find(|s| s.label == label)
            .map(|s| s.percentage)
    }

    /// Sum of all shares. Truncation makes this drift slightly below 100.
    pub fn percentage_sum(&self) -> f64 {
        self.shares.iter().map(|s| s.percentage).sum()
    }
}

/// Floor `fraction` to `decimals` places. Truncation, not rounding, so
/// output is reproducible against reference numbers.
pub fn truncate_fraction(fraction: f64, decimals: i32) -> f64 {
    let multiplier = 10f64.powi(decimals);
    (fraction * multiplier).floor() / multiplier
}

/// Turn one configuration's stage totals into a percentage breakdown.
///
/// Fails if the banner label is absent or if the non-excluded stages sum
/// to zero or overflow. Stages whose every line failed to parse count as zero.
pub fn normalize(mut totals: StageTotals) -> Result<Breakdown, BreakdownError> {
    if totals.remove(IGNORED_STAGE).is_none() {
        return Err(BreakdownError::MissingIgnoredStage {
            label: IGNORED_STAGE,
        });
    }

    let total: f64 = totals
        .iter()
        .filter(|e| e.label != EXCLUDED_FROM_TOTAL)
        .map(|e| e.total)
        .sum();

    if total == 0.0 {
        return Err(BreakdownError::ZeroTotal);
    }
    if !total.is_finite() {
        return Err(BreakdownError::NonFiniteTotal);
    }

    let shares: Vec<StageShare> = totals
        .iter()
        .filter(|e| e.label != EXCLUDED_FROM_TOTAL)
        .map(|e| StageShare {
            label: e.label.clone(),
            percentage: truncate_fraction(e.total / total, PERCENT_DECIMALS) * 100.0,
        })
        .collect();

    let breakdown = Breakdown {
        shares,
        excluded_absolute: totals.get(EXCLUDED_FROM_TOTAL),
        total,
    };

    tracing::info!(
        stages = breakdown.shares.len(),
        total = breakdown.total,
        sum = breakdown.percentage_sum(),
        "normalized breakdown"
    );

    Ok(breakdown)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn totals(pairs: &[(&str, f64)]) -> StageTotals {
        let mut t: StageTotals = pairs.iter().map(|(l, v)| (*l, *v)).collect();
        t.record(IGNORED_STAGE, None);
        t
    }

    #[test]
    fn truncates_instead_of_rounding() {
        let b = normalize(totals(&[("a", 1.0), ("b", 3.0)])).unwrap();
        assert_eq!(b.percentage("a"), Some(25.0));
        assert_eq!(b.percentage("b"), Some(75.0));

        // 2/3 = 0.666666.. rounds up to 0.66667 but truncates to 0.66666.
        assert_eq!(truncate_fraction(2.0 / 3.0, 5), 0.66666);
        assert_eq!(truncate_fraction(1.0 / 3.0, 5), 0.33333);
    }

    #[test]
    fn excluded_stage_is_not_in_denominator() {
        let b = normalize(totals(&[("scan_file", 50.0), ("a", 1.0), ("b", 1.0)])).unwrap();
        assert_eq!(b.total, 2.0);
        assert_eq!(b.percentage("a"), Some(50.0));
        assert_eq!(b.percentage("b"), Some(50.0));
        assert_eq!(b.percentage(EXCLUDED_FROM_TOTAL), None);
        assert_eq!(b.excluded_absolute, Some(50.0));
    }

    #[test]
    fn banner_is_dropped_from_output() {
        let b = normalize(totals(&[("a", 2.0)])).unwrap();
        assert_eq!(b.labels(), vec!["a"]);
        assert_eq!(b.percentages(), vec![100.0]);
        assert_eq!(b.excluded_absolute, None);
    }

    #[test]
    fn missing_banner_is_an_error() {
        let t: StageTotals = [("a", 1.0), ("b", 1.0)].into_iter().collect();
        let err = normalize(t).unwrap_err();
        assert!(matches!(
            err,
            BreakdownError::MissingIgnoredStage {
                label: IGNORED_STAGE
            }
        ));
    }

    #[test]
    fn zero_total_is_an_error() {
        let err = normalize(totals(&[("scan_file", 10.0)])).unwrap_err();
        assert!(matches!(err, BreakdownError::ZeroTotal));

        // A label with no numeric samples still counts as zero.
        let mut t = totals(&[("scan_file", 10.0)]);
        t.record("stage_x", None);
        assert!(matches!(normalize(t), Err(BreakdownError::ZeroTotal)));
    }

    #[test]
    fn overflowing_total_is_an_error() {
        let err = normalize(totals(&[("a", f64::MAX), ("b", f64::MAX)])).unwrap_err();
        assert!(matches!(err, BreakdownError::NonFiniteTotal));
    }

    #[test]
    fn empty_bucket_label_gets_zero_percent() {
        let mut t = totals(&[("a", 4.0)]);
        t.record("stage_x", None);
        let b = normalize(t).unwrap();
        assert_eq!(b.percentage("stage_x"), Some(0.0));
        assert_eq!(b.percentage("a"), Some(100.0));
    }

    #[test]
    fn drift_is_bounded_by_truncation_error() {
        let b = normalize(totals(&[("a", 1.0), ("b", 1.0), ("c", 1.0), ("d", 7.0), ("e", 13.0)]))
            .unwrap();
        let sum = b.percentage_sum();
        let epsilon = 0.001;
        assert!(sum <= 100.0 + 1e-9, "sum {sum}");
        assert!(100.0 - sum < epsilon * b.shares.len() as f64, "sum {sum}");
    }

    #[test]
    fn percentages_stay_in_range_and_order() {
        let b = normalize(totals(&[("z", 3.0), ("a", 1.0), ("m", 0.0)])).unwrap();
        assert_eq!(b.labels(), vec!["z", "a", "m"]);
        for p in b.percentages() {
            assert!((0.0..=100.0).contains(&p));
        }
    }

    #[test]
    fn normalize_is_deterministic() {
        let input = totals(&[("a", 1.25), ("b", 3.5), ("scan_file", 9.0)]);
        assert_eq!(normalize(input.clone()).unwrap(), normalize(input).unwrap());
    }
}
