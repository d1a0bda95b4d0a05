//! Batch-level counts and timings for a finished resolution run.

use std::time::Duration;

use serde::Serialize;

use crate::offer::{ClassificationStatus, ClassifiedRecord};

/// Per-status tallies of a batch. `no_offer` never includes records that
/// need reprocessing; those are counted in `needs_reprocess` only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub operator_fulfilled: usize,
    pub third_party: usize,
    pub no_offer: usize,
    pub needs_reprocess: usize,
    pub elapsed_secs: f64,
}

impl BatchSummary {
    pub fn from_records<'a, I>(records: I, elapsed: Duration) -> Self
    where
        I: IntoIterator<Item = &'a ClassifiedRecord>,
    {
        let mut summary = Self {
            total: 0,
            operator_fulfilled: 0,
            third_party: 0,
            no_offer: 0,
            needs_reprocess: 0,
            elapsed_secs: elapsed.as_secs_f64(),
        };
        for record in records {
            summary.total += 1;
            match record.status() {
                ClassificationStatus::OperatorFulfilled => summary.operator_fulfilled += 1,
                ClassificationStatus::ThirdPartyOffer => summary.third_party += 1,
                ClassificationStatus::NoOffer => summary.no_offer += 1,
                ClassificationStatus::NeedsReprocess => summary.needs_reprocess += 1,
            }
        }
        summary
    }

    /// Share of third-party offers in the batch, as a percentage.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn third_party_pct(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.third_party as f64 / self.total as f64 * 100.0
    }

    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn secs_per_identifier(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.elapsed_secs / self.total as f64
    }

    #[must_use]
    pub fn read_time(&self) -> String {
        format_read_time(Duration::from_secs_f64(self.elapsed_secs.max(0.0)))
    }
}

/// Formats a duration rounded to whole seconds: `"42s"` or `"3m 5s"`.
#[must_use]
pub fn format_read_time(elapsed: Duration) -> String {
    let secs = (elapsed.as_millis() + 500) / 1000;
    if secs < 60 {
        return format!("{secs}s");
    }
    format!("{}m {}s", secs / 60, secs % 60)
}
