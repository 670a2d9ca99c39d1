//! Linear vs logarithmic scale selection.
//!
//! A single linear scale cannot keep a value two orders of magnitude below the
//! tallest bar distinguishable from zero. The spread is checked across the
//! group totals and inside each environment's breakdown, since either axis can
//! be dominated by one outlier. The outcome applies to the whole chart.

use crate::core::ChartConfig;
use crate::data::{Dataset, EnvironmentBreakdown};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scale {
    Linear,
    Logarithmic,
}

impl Scale {
    pub fn is_logarithmic(self) -> bool {
        matches!(self, Scale::Logarithmic)
    }
}

/// Larger over smaller positive value; `None` when either side is not positive.
pub fn spread(a: f64, b: f64) -> Option<f64> {
    let (low, high) = if a <= b { (a, b) } else { (b, a) };
    (low > 0.0).then(|| high / low)
}

fn exceeds(a: f64, b: f64, ratio: f64) -> bool {
    spread(a, b).is_some_and(|spread| spread > ratio)
}

fn max_and_min_positive(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .into_iter()
        .filter(|value| *value > 0.0)
        .fold(None, |acc, value| match acc {
            None => Some((value, value)),
            Some((max, min)) => Some((max.max(value), min.min(value))),
        })
}

fn breakdown_is_lopsided(breakdown: &EnvironmentBreakdown, ratio: f64) -> bool {
    max_and_min_positive(breakdown.parts().map(|(_, value)| value))
        .is_some_and(|(max, min)| exceeds(max, min, ratio))
}

/// Picks the scale for `dataset`, or `None` when every total is zero.
pub fn select_scale(dataset: &Dataset, config: &ChartConfig) -> Option<Scale> {
    let ratio = config.log_trigger_ratio;
    let (max_total, min_positive_total) = max_and_min_positive(dataset.totals())?;

    let across_groups = exceeds(max_total, min_positive_total, ratio);
    let within_group = dataset
        .environments()
        .iter()
        .any(|breakdown| breakdown_is_lopsided(breakdown, ratio));
    let against_norm = dataset.norm > 0.0 && exceeds(max_total, dataset.norm, ratio);

    let scale = if across_groups || within_group || against_norm {
        Scale::Logarithmic
    } else {
        Scale::Linear
    };
    tracing::debug!(
        ?scale,
        across_groups,
        within_group,
        against_norm,
        "scale selected"
    );
    Some(scale)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::EnvironmentBreakdown as B;

    fn dataset(dev: B, test: B, prod: B, norm: f64) -> Dataset {
        Dataset {
            title: "t".into(),
            dev,
            test,
            prod,
            norm,
        }
    }

    fn select(data: &Dataset) -> Option<Scale> {
        select_scale(data, &ChartConfig::default())
    }

    #[test]
    fn all_zero_is_no_data() {
        let zero = B::default();
        assert_eq!(select(&dataset(zero, zero, zero, 0.0)), None);
    }

    #[test]
    fn comparable_totals_stay_linear() {
        let data = dataset(
            B::new(66.0, 100.0, 31.0),
            B::new(60.0, 80.0, 85.0),
            B::new(66.0, 83.0, 31.0),
            150.0,
        );
        assert_eq!(select(&data), Some(Scale::Linear));
    }

    #[test]
    fn single_outlier_triggers_log() {
        let data = dataset(
            B::new(1.0, 0.0, 0.0),
            B::new(400.0, 300.0, 300.0),
            B::new(1.0, 1.0, 0.0),
            5.0,
        );
        assert_eq!(select(&data), Some(Scale::Logarithmic));
    }

    #[test]
    fn lopsided_breakdown_triggers_log() {
        // Totals are close but dev's own parts differ by 500x.
        let data = dataset(
            B::new(500.0, 1.0, 0.0),
            B::new(200.0, 200.0, 100.0),
            B::new(300.0, 100.0, 100.0),
            450.0,
        );
        assert_eq!(select(&data), Some(Scale::Logarithmic));
    }

    #[test]
    fn ratio_of_exactly_trigger_stays_linear() {
        let data = dataset(B::new(1.0, 0.0, 0.0), B::new(100.0, 0.0, 0.0), B::default(), 0.0);
        assert_eq!(select(&data), Some(Scale::Linear));
    }

    #[test]
    fn zeros_are_ignored_when_measuring_spread() {
        let data = dataset(B::new(10.0, 0.0, 0.0), B::default(), B::default(), 20.0);
        assert_eq!(select(&data), Some(Scale::Linear));
    }

    #[test]
    fn spread_is_symmetric() {
        for (a, b) in [(1.0, 1000.0), (3.0, 7.0), (0.5, 99.0), (250.0, 2.0)] {
            assert_eq!(spread(a, b), spread(b, a));
            assert_eq!(exceeds(a, b, 100.0), exceeds(b, a, 100.0));
        }
        assert_eq!(spread(0.0, 5.0), None);
    }

    #[test]
    fn swapping_environments_keeps_decision() {
        let a = B::new(1.0, 1.0, 1.0);
        let b = B::new(300.0, 300.0, 300.0);
        assert_eq!(
            select(&dataset(a, b, a, 0.0)),
            select(&dataset(b, a, b, 0.0))
        );
    }
}
