//! Final career report written to stdout as JSON.

use courtside_core::operator::CareerEndReason;
use courtside_core::runner::CareerResult;
use courtside_types::{CareerRecord, CareerSummary};
use serde::Serialize;

/// Everything a consumer needs to render the finished career.
#[derive(Debug, Serialize)]
pub struct CareerReport<'a> {
    /// Why auto-play ended.
    pub end_reason: CareerEndReason,
    /// Games played in this run.
    pub total_ticks: u64,
    /// Wall-clock seconds the run took.
    pub elapsed_seconds: u64,
    /// Season-by-season record.
    pub record: &'a CareerRecord,
    /// Derived summary, absent if no season finished.
    pub summary: Option<&'a CareerSummary>,
}

impl<'a> CareerReport<'a> {
    /// Build a report borrowing from a finished run.
    pub const fn new(result: &'a CareerResult, elapsed_seconds: u64) -> Self {
        Self {
            end_reason: result.end_reason,
            total_ticks: result.total_ticks,
            elapsed_seconds,
            record: &result.record,
            summary: result.summary.as_ref(),
        }
    }

    /// Render as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns a [`serde_json::Error`] if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
