//! Simulation observer trait for progress reporting and data collection.

use sir_agent::Topography;
use sir_core::Tick;

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// Generic over the group model `M` so snapshot consumers can query it.
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl<M> SimObserver<M> for ProgressPrinter {
///     fn on_tick_end(&mut self, tick: Tick, pedestrians: usize) {
///         if tick.0 % self.interval == 0 {
///             println!("tick {tick}: {pedestrians} pedestrians");
///         }
///     }
/// }
/// ```
pub trait SimObserver<M> {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called at the end of each tick with the number of pedestrians present.
    fn on_tick_end(&mut self, _tick: Tick, _pedestrians: usize) {}

    /// Called at snapshot intervals (every `config.output_interval_ticks`
    /// ticks), after the group model has updated.
    fn on_snapshot(
        &mut self,
        _tick:          Tick,
        _sim_time_secs: f64,
        _topography:    &Topography,
        _model:         &M,
    ) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl<M> SimObserver<M> for NoopObserver {}
