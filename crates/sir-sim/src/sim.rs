//! The `Sim` struct and its tick loop.

use sir_agent::Topography;
use sir_core::{SimClock, SimConfig, SimRng, Tick};
use sir_model::GroupModel;
use tracing::{info, trace};

use crate::{PedestrianMover, SimObserver, SimResult};

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The host simulation runner.
///
/// `Sim<M, V>` owns the topography and drives one tick as:
///
/// 1. **Locomotion**: the mover repositions, spawns and removes pedestrians.
/// 2. **Events**: queued added/removed events are handed to the group model,
///    oldest first.
/// 3. **Update**: `M::update` runs at the tick's simulated time.
///
/// The model's `pre_loop` runs before the first tick and its `post_loop`
/// after the last one in [`run`](Self::run).
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<M: GroupModel, V: PedestrianMover> {
    /// Global configuration (total ticks, seed, step length, …).
    pub config: SimConfig,

    /// Maps the current tick to simulated seconds.
    pub clock: SimClock,

    /// Scenario bounds and the live pedestrian set.
    pub topography: Topography,

    /// The group model.
    pub model: M,

    /// Locomotion.
    pub mover: V,

    /// Host-side randomness, independent of the model's stream.
    pub(crate) rng: SimRng,

    pub(crate) started:  bool,
    pub(crate) finished: bool,
}

impl<M: GroupModel, V: PedestrianMover> Sim<M, V> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run the simulation from the current tick to `config.end_tick()`, then
    /// close the model's lifecycle.
    ///
    /// Calls observer hooks at every tick boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    ///
    /// # Errors
    ///
    /// Any model error aborts the run, including a pedestrian found without a
    /// group.
    pub fn run<O: SimObserver<M>>(&mut self, observer: &mut O) -> SimResult<()> {
        self.start()?;
        info!(
            from  = %self.clock.current_tick,
            until = %self.config.end_tick(),
            pedestrians = self.topography.len(),
            "simulation started"
        );
        loop {
            let now = self.clock.current_tick;
            if now >= self.config.end_tick() {
                break;
            }
            self.tick(now, observer)?;
        }
        self.finish()?;
        observer.on_sim_end(self.clock.current_tick);
        info!(at = %self.clock, pedestrians = self.topography.len(), "simulation finished");
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    ///
    /// Runs `pre_loop` first if it has not happened yet but leaves the
    /// lifecycle open; call [`finish`](Self::finish) when done.
    pub fn run_ticks<O: SimObserver<M>>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        self.start()?;
        for _ in 0..n {
            let now = self.clock.current_tick;
            self.tick(now, observer)?;
        }
        Ok(())
    }

    /// Run the model's `post_loop`.  Idempotent.
    pub fn finish(&mut self) -> SimResult<()> {
        if self.started && !self.finished {
            let t = self.clock.sim_time_secs();
            self.model.post_loop(t, &mut self.topography)?;
            self.finished = true;
        }
        Ok(())
    }

    /// `true` between the first tick and [`finish`](Self::finish).
    pub fn is_running(&self) -> bool {
        self.started && !self.finished
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn start(&mut self) -> SimResult<()> {
        if !self.started {
            let t = self.clock.sim_time_secs();
            self.model.pre_loop(t, &mut self.topography)?;
            self.started = true;
        }
        Ok(())
    }

    fn tick<O: SimObserver<M>>(&mut self, now: Tick, observer: &mut O) -> SimResult<()> {
        observer.on_tick_start(now);
        let t = self.clock.time_at(now);

        self.mover
            .step(now, self.clock.step_secs, &mut self.topography, &mut self.rng)?;

        let events = self.topography.drain_events();
        trace!(tick = %now, events = events.len(), "dispatching element events");
        for event in &events {
            self.model.handle_event(event)?;
        }

        self.model.update(t, &mut self.topography)?;

        observer.on_tick_end(now, self.topography.len());
        if self.config.output_interval_ticks > 0
            && now.0.is_multiple_of(self.config.output_interval_ticks)
        {
            observer.on_snapshot(now, t, &self.topography, &self.model);
        }
        self.clock.advance();
        Ok(())
    }
}
