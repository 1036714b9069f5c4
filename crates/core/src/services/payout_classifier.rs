use chrono::{Duration, NaiveDate};

use crate::models::dividend::DividendEvent;
use crate::models::payout::PayoutFrequency;

/// Trailing window of dividend history considered for classification.
const WINDOW_DAYS: i64 = 3 * 365;

/// Minimum qualifying events before a cadence can be inferred.
const MIN_EVENTS: usize = 3;

/// Derives a payout-frequency label from a ticker's dividend history.
///
/// Total function: thin history, empty input, or anything else that
/// prevents a cadence from being inferred yields `Irregular` — it
/// never errors.
pub struct PayoutClassifier;

impl PayoutClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Classify by the median day-gap between consecutive dividend
    /// dates within the trailing three years.
    ///
    /// Thresholds are inclusive upper bounds: ≤9 Weekly, ≤45 Monthly,
    /// ≤115 Quarterly, ≤220 Semiannual, ≤400 Annual, else Irregular.
    #[must_use]
    pub fn classify(&self, history: &[DividendEvent], today: NaiveDate) -> PayoutFrequency {
        let cutoff = today - Duration::days(WINDOW_DAYS);
        let mut dates: Vec<NaiveDate> = history
            .iter()
            .map(|e| e.date)
            .filter(|d| *d >= cutoff)
            .collect();

        if dates.len() < MIN_EVENTS {
            return PayoutFrequency::Irregular;
        }
        dates.sort_unstable();

        let gaps: Vec<f64> = dates
            .windows(2)
            .map(|w| (w[1] - w[0]).num_days() as f64)
            .collect();
        if gaps.is_empty() {
            return PayoutFrequency::Irregular;
        }

        match median(gaps) {
            m if m <= 9.0 => PayoutFrequency::Weekly,
            m if m <= 45.0 => PayoutFrequency::Monthly,
            m if m <= 115.0 => PayoutFrequency::Quarterly,
            m if m <= 220.0 => PayoutFrequency::Semiannual,
            m if m <= 400.0 => PayoutFrequency::Annual,
            _ => PayoutFrequency::Irregular,
        }
    }
}

impl Default for PayoutClassifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Median of a non-empty list; mean of the middle two for even counts.
fn median(mut xs: Vec<f64>) -> f64 {
    xs.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let n = xs.len();
    if n % 2 == 1 {
        xs[n / 2]
    } else {
        (xs[n / 2 - 1] + xs[n / 2]) / 2.0
    }
}
