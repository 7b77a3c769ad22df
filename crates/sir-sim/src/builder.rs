//! Fluent builder for constructing a [`Sim`].

use sir_agent::Topography;
use sir_core::{SimConfig, SimRng};
use sir_model::GroupModel;

use crate::{PedestrianMover, Sim, SimError, SimResult, Stationary};

/// Seed offsets for the two streams derived from `config.seed`.
const MODEL_STREAM: u64 = 1;
const HOST_STREAM: u64 = 2;

/// Fluent builder for [`Sim<M, V>`].
///
/// # Required inputs
///
/// - [`SimConfig`]: step length, total ticks, seed, output interval
/// - [`Topography`] from [`sir_agent::TopographyBuilder`]
/// - `M: GroupModel` and its attributes
///
/// # Optional inputs (have defaults)
///
/// | Method        | Default                   |
/// |---------------|---------------------------|
/// | `.mover(v)`   | [`Stationary`]            |
///
/// # Example
///
/// ```rust,ignore
/// let topography = TopographyBuilder::new(bounds).pedestrians(points).build()?;
/// let mut sim = SimBuilder::new(config, topography, SirGroupModel::new(), params)
///     .mover(RandomWalk::new(1.2))
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<M: GroupModel, V: PedestrianMover> {
    config:     SimConfig,
    topography: Topography,
    model:      M,
    attributes: M::Attributes,
    mover:      V,
}

impl<M: GroupModel> SimBuilder<M, Stationary> {
    /// Create a builder with all required inputs.
    pub fn new(config: SimConfig, topography: Topography, model: M, attributes: M::Attributes) -> Self {
        Self {
            config,
            topography,
            model,
            attributes,
            mover: Stationary,
        }
    }
}

impl<M: GroupModel, V: PedestrianMover> SimBuilder<M, V> {
    /// Replace the locomotion.
    pub fn mover<W: PedestrianMover>(self, mover: W) -> SimBuilder<M, W> {
        SimBuilder {
            config:     self.config,
            topography: self.topography,
            model:      self.model,
            attributes: self.attributes,
            mover,
        }
    }

    /// Validate the configuration, initialise the model and return a
    /// ready-to-run [`Sim`].
    ///
    /// The model and the host each get their own stream derived from
    /// `config.seed`, so locomotion never shifts the model's draws.
    pub fn build(mut self) -> SimResult<Sim<M, V>> {
        self.config.validate()?;
        if self.topography.has_pending_events() {
            return Err(SimError::Config(
                "topography has undelivered events before the model was initialised".into(),
            ));
        }

        let mut master = SimRng::new(self.config.seed);
        let model_rng = master.child(MODEL_STREAM);
        let host_rng = master.child(HOST_STREAM);

        self.model
            .initialize(self.attributes, &self.topography, model_rng)?;

        Ok(Sim {
            clock:      self.config.make_clock(),
            config:     self.config,
            topography: self.topography,
            model:      self.model,
            mover:      self.mover,
            rng:        host_rng,
            started:    false,
            finished:   false,
        })
    }
}
