//! The `OutputWriter` trait implemented by backend writers.

use crate::{GroupCountRow, OutputResult, PedestrianGroupRow};

/// Sink for SIR output rows.
///
/// All methods are infallible from the observer's perspective: errors are
/// stored internally and retrieved with
/// [`SimOutputObserver::take_error`][crate::SimOutputObserver::take_error].
pub trait OutputWriter {
    /// Write a batch of per-pedestrian group rows.
    fn write_groups(&mut self, rows: &[PedestrianGroupRow]) -> OutputResult<()>;

    /// Write one compartment count row.
    fn write_counts(&mut self, row: &GroupCountRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
