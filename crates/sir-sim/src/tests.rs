//! Integration tests for sir-sim.

use sir_agent::{Topography, TopographyBuilder};
use sir_core::{Point, Rect, SimConfig, Tick};
use sir_model::{SirCounts, SirGroupModel, SirParams};

use crate::{SimBuilder, SimObserver};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn test_config(total_ticks: u64) -> SimConfig {
    SimConfig {
        step_secs:             0.4,
        total_ticks,
        seed:                  42,
        output_interval_ticks: 1,
    }
}

fn params(infections_at_start: u32, infection_rate: f64, recovery_rate: f64) -> SirParams {
    SirParams {
        infections_at_start,
        infection_rate,
        infection_max_distance: 1.0,
        recovery_rate,
    }
}

fn topography(points: &[Point]) -> Topography {
    TopographyBuilder::new(Rect::new(0.0, 0.0, 10.0, 10.0))
        .pedestrians(points.iter().copied())
        .build()
        .unwrap()
}

fn grid_points(n: usize) -> Vec<Point> {
    (0..n)
        .map(|i| Point::new((i % 8) as f64 * 0.8 + 1.0, (i / 8) as f64 * 0.8 + 1.0))
        .collect()
}

/// Records every hook invocation.
#[derive(Default)]
struct Recorder {
    starts:    Vec<Tick>,
    ends:      Vec<(Tick, usize)>,
    snapshots: Vec<(Tick, f64, SirCounts)>,
    finished:  Option<Tick>,
}

impl SimObserver<SirGroupModel> for Recorder {
    fn on_tick_start(&mut self, tick: Tick) {
        self.starts.push(tick);
    }

    fn on_tick_end(&mut self, tick: Tick, pedestrians: usize) {
        self.ends.push((tick, pedestrians));
    }

    fn on_snapshot(&mut self, tick: Tick, t: f64, _: &Topography, model: &SirGroupModel) {
        self.snapshots.push((tick, t, model.counts()));
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.finished = Some(final_tick);
    }
}

// ── SimBuilder validation ─────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use sir_agent::ListenerKind;
    use sir_model::{GroupModel, ModelError};

    use super::*;
    use crate::SimError;

    #[test]
    fn builds_and_initialises_model() {
        let sim = SimBuilder::new(test_config(5), topography(&grid_points(4)), SirGroupModel::new(), params(0, 0.0, 0.0))
            .build()
            .unwrap();
        assert_eq!(sim.topography.len(), 4);
        assert_eq!(sim.clock.current_tick, Tick::ZERO);
        // Initial pedestrians are assigned at pre_loop, not at build.
        assert_eq!(sim.model.counts().total(), 0);
        assert!(!sim.is_running());
    }

    #[test]
    fn bad_step_rejected() {
        let config = SimConfig { step_secs: 0.0, ..test_config(5) };
        let result = SimBuilder::new(config, topography(&[]), SirGroupModel::new(), SirParams::default()).build();
        assert!(matches!(result, Err(SimError::Core(_))));
    }

    #[test]
    fn bad_params_rejected() {
        let result = SimBuilder::new(test_config(5), topography(&[]), SirGroupModel::new(), params(0, 0.0, 3.0)).build();
        assert!(matches!(result, Err(SimError::Model(ModelError::Config(_)))));
    }

    #[test]
    fn pending_events_rejected() {
        let mut topo = topography(&[]);
        topo.register_listener(ListenerKind::Added);
        topo.add_pedestrian(Point::new(1.0, 1.0));
        let result = SimBuilder::new(test_config(5), topo, SirGroupModel::new(), SirParams::default()).build();
        assert!(matches!(result, Err(SimError::Config(_))));
    }

    #[test]
    fn groups_visible_through_model_trait() {
        let mut sim = SimBuilder::new(test_config(1), topography(&grid_points(3)), SirGroupModel::new(), params(3, 0.0, 0.0))
            .build()
            .unwrap();
        sim.run(&mut crate::NoopObserver).unwrap();
        assert_eq!(sim.model.groups_by_id().len(), 1);
    }
}

// ── Tick loop ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod loop_tests {
    use sir_agent::ListenerKind;
    use sir_core::AgentId;
    use sir_model::SirType;

    use super::*;
    use crate::NoopObserver;

    #[test]
    fn run_calls_every_hook() {
        let mut sim = SimBuilder::new(test_config(10), topography(&grid_points(5)), SirGroupModel::new(), params(1, 0.0, 0.0))
            .build()
            .unwrap();
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();

        assert_eq!(rec.starts, (0..10).map(Tick).collect::<Vec<_>>());
        assert_eq!(rec.ends.len(), 10);
        assert!(rec.ends.iter().all(|&(_, n)| n == 5));
        assert_eq!(rec.snapshots.len(), 10);
        assert_eq!(rec.finished, Some(Tick(10)));
        assert_eq!(sim.clock.current_tick, Tick(10));
    }

    #[test]
    fn snapshot_interval_respected() {
        let config = SimConfig { output_interval_ticks: 3, ..test_config(10) };
        let mut sim = SimBuilder::new(config, topography(&grid_points(2)), SirGroupModel::new(), params(0, 0.0, 0.0))
            .build()
            .unwrap();
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();
        let ticks: Vec<Tick> = rec.snapshots.iter().map(|s| s.0).collect();
        assert_eq!(ticks, vec![Tick(0), Tick(3), Tick(6), Tick(9)]);
        let (_, t, _) = rec.snapshots[2];
        assert!((t - 2.4).abs() < 1e-12);
    }

    #[test]
    fn zero_interval_disables_snapshots() {
        let config = SimConfig { output_interval_ticks: 0, ..test_config(4) };
        let mut sim = SimBuilder::new(config, topography(&grid_points(2)), SirGroupModel::new(), params(0, 0.0, 0.0))
            .build()
            .unwrap();
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();
        assert!(rec.snapshots.is_empty());
        assert_eq!(rec.ends.len(), 4);
    }

    #[test]
    fn run_closes_listener_lifecycle() {
        let mut sim = SimBuilder::new(test_config(3), topography(&[]), SirGroupModel::new(), SirParams::default())
            .build()
            .unwrap();
        sim.run(&mut NoopObserver).unwrap();
        assert!(!sim.topography.has_listener(ListenerKind::Added));
        assert!(!sim.topography.has_listener(ListenerKind::Removed));
        assert!(!sim.is_running());
    }

    #[test]
    fn run_ticks_leaves_lifecycle_open() {
        let mut sim = SimBuilder::new(test_config(100), topography(&grid_points(3)), SirGroupModel::new(), params(0, 0.0, 0.0))
            .build()
            .unwrap();
        sim.run_ticks(4, &mut NoopObserver).unwrap();
        assert_eq!(sim.clock.current_tick, Tick(4));
        assert!(sim.is_running());
        assert!(sim.topography.has_listener(ListenerKind::Added));

        sim.finish().unwrap();
        sim.finish().unwrap();
        assert!(!sim.topography.has_listener(ListenerKind::Added));
    }

    #[test]
    fn close_contact_spreads_infection() {
        let topo = topography(&[Point::new(5.0, 5.0), Point::new(5.5, 5.0)]);
        let mut sim = SimBuilder::new(test_config(5), topo, SirGroupModel::new(), params(1, 0.0, 0.0))
            .build()
            .unwrap();
        sim.run_ticks(1, &mut NoopObserver).unwrap();
        assert_eq!(sim.model.sir_type_of(AgentId(1)).unwrap(), SirType::Susceptible);

        sim.model.set_params(params(1, 1.0, 0.0)).unwrap();
        sim.run(&mut NoopObserver).unwrap();
        // Ticks at 0.0, 0.4, 0.8 accumulate; 1.2 closes the interval.
        assert_eq!(sim.model.sir_type_of(AgentId(1)).unwrap(), SirType::Infected);
        assert_eq!(sim.model.counts().infected, 2);
        assert_eq!(sim.model.counts().susceptible, 0);
    }

    #[test]
    fn late_arrivals_reach_the_model() {
        let mut sim = SimBuilder::new(test_config(10), topography(&[]), SirGroupModel::new(), params(0, 1.0, 0.0))
            .build()
            .unwrap();
        sim.run_ticks(1, &mut NoopObserver).unwrap();
        sim.topography.add_pedestrian(Point::new(2.0, 2.0));
        sim.run_ticks(1, &mut NoopObserver).unwrap();
        assert_eq!(sim.model.counts().infected, 1);
    }
}

// ── Movers ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod mover_tests {
    use sir_agent::ListenerKind;
    use sir_core::{SimRng, SourceId};
    use sir_model::{GroupModel, ModelError};

    use super::*;
    use crate::{CorridorFlow, NoopObserver, PedestrianMover, RandomWalk, SimError, SimResult};

    #[test]
    fn random_walk_stays_in_bounds() {
        let mut sim = SimBuilder::new(test_config(200), topography(&grid_points(16)), SirGroupModel::new(), SirParams::default())
            .mover(RandomWalk::new(3.0))
            .build()
            .unwrap();
        sim.run(&mut NoopObserver).unwrap();
        let bounds = sim.topography.bounds();
        assert!(sim.topography.pedestrians().all(|p| bounds.contains(p.position)));
    }

    fn walk_counts(seed: u64) -> SirCounts {
        let config = SimConfig { seed, ..test_config(60) };
        let mut sim = SimBuilder::new(config, topography(&grid_points(24)), SirGroupModel::new(), params(2, 0.2, 0.1))
            .mover(RandomWalk::new(1.0))
            .build()
            .unwrap();
        sim.run(&mut NoopObserver).unwrap();
        sim.model.counts()
    }

    #[test]
    fn same_seed_same_outcome() {
        assert_eq!(walk_counts(7), walk_counts(7));
        assert_eq!(walk_counts(7).total(), 24);
    }

    #[test]
    fn corridor_spawns_and_removes() {
        let topo = TopographyBuilder::new(Rect::new(0.0, 0.0, 10.0, 2.0)).build().unwrap();
        let config = SimConfig { step_secs: 0.4, ..test_config(20) };
        let mut sim = SimBuilder::new(config, topo, SirGroupModel::new(), SirParams::default())
            .mover(CorridorFlow::new(SourceId(0), 1, 5.0))
            .build()
            .unwrap();
        sim.run_ticks(20, &mut NoopObserver).unwrap();

        // 2 m per tick over 10 m: each pedestrian lives five ticks.
        assert_eq!(sim.topography.len(), 5);
        assert!(sim.topography.pedestrians().all(|p| p.source == Some(SourceId(0))));
        assert_eq!(sim.model.registry().tracked_agents(), 5);
        assert_eq!(sim.model.counts().total(), 5);
        for p in sim.topography.pedestrians() {
            assert!(sim.model.get_group(p.id).is_ok());
        }
    }

    /// Adds a pedestrian behind the model's back.
    struct Smuggler;

    impl PedestrianMover for Smuggler {
        fn step(&mut self, tick: Tick, _: f64, topography: &mut Topography, _: &mut SimRng) -> SimResult<()> {
            if tick == Tick(2) {
                topography.deregister_listener(ListenerKind::Added);
                topography.add_pedestrian(Point::new(1.0, 1.0));
            }
            Ok(())
        }
    }

    #[test]
    fn unassigned_pedestrian_aborts_run() {
        let mut sim = SimBuilder::new(test_config(10), topography(&grid_points(2)), SirGroupModel::new(), SirParams::default())
            .mover(Smuggler)
            .build()
            .unwrap();
        let mut rec = Recorder::default();
        let result = sim.run(&mut rec);
        assert!(matches!(result, Err(SimError::Model(ModelError::UnassignedAgent(_)))));
        assert_eq!(rec.ends.len(), 2);
        assert_eq!(rec.finished, None);
    }
}
