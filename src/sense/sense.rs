use crate::result::Result;
use crate::sense::Reading;
use std::time::Duration;

/// A source of distance readings that produces samples at
/// its own pace and flags when a new one is ready.
///
/// Any error returned is assumed non-recoverable.
pub trait Sense {
    /// Sets the minimum interval between physical measurements.
    fn set_sample_period(&mut self, period: Duration) -> Result<()>;

    /// Checks whether a sample has been taken since the last one
    /// was flagged.
    fn new_sample_available(&mut self) -> Result<bool>;

    /// Gets the most recent distance measurement.
    fn distance(&mut self) -> Result<Reading>;
}
