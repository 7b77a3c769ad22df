//! Unit tests for sir-agent.

use sir_core::{Point, Rect};

use crate::{Topography, TopographyBuilder};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn empty_topography() -> Topography {
    TopographyBuilder::new(Rect::new(0.0, 0.0, 10.0, 10.0))
        .build()
        .unwrap()
}

// ── Builder ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use sir_core::AgentId;

    use super::*;
    use crate::TopographyAttributes;

    #[test]
    fn initial_pedestrians_get_sequential_ids() {
        let topo = TopographyBuilder::new(Rect::new(0.0, 0.0, 5.0, 5.0))
            .pedestrians([Point::new(1.0, 1.0), Point::new(2.0, 2.0)])
            .pedestrian(Point::new(3.0, 3.0))
            .build()
            .unwrap();
        let ids: Vec<AgentId> = topo.agent_ids().collect();
        assert_eq!(ids, vec![AgentId(0), AgentId(1), AgentId(2)]);
        assert_eq!(topo.pedestrian(AgentId(2)).unwrap().position, Point::new(3.0, 3.0));
        assert!(topo.pedestrian(AgentId(0)).unwrap().source.is_none());
    }

    #[test]
    fn default_attributes() {
        let topo = empty_topography();
        assert_eq!(topo.attributes(), &TopographyAttributes::default());
        assert_eq!(topo.attributes().bounding_box_width, 0.5);
    }

    #[test]
    fn rejects_bad_cell_width() {
        let result = TopographyBuilder::new(Rect::new(0.0, 0.0, 5.0, 5.0))
            .bounding_box_width(0.0)
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn rejects_negative_bounds() {
        let result = TopographyBuilder::new(Rect::new(0.0, 0.0, -5.0, 5.0)).build();
        assert!(result.is_err());
    }

    #[test]
    fn initial_pedestrians_queue_no_events() {
        let mut topo = TopographyBuilder::new(Rect::new(0.0, 0.0, 5.0, 5.0))
            .pedestrian(Point::new(1.0, 1.0))
            .build()
            .unwrap();
        assert!(!topo.has_pending_events());
        assert!(topo.drain_events().is_empty());
    }
}

// ── Pedestrian set ────────────────────────────────────────────────────────────

#[cfg(test)]
mod pedestrian_tests {
    use sir_core::{AgentId, CoreError, SourceId};

    use super::*;

    #[test]
    fn add_move_remove() {
        let mut topo = empty_topography();
        let a = topo.add_pedestrian(Point::new(1.0, 1.0));
        topo.move_pedestrian(a, Point::new(2.0, 3.0)).unwrap();
        assert_eq!(topo.pedestrian(a).unwrap().position, Point::new(2.0, 3.0));

        let removed = topo.remove_pedestrian(a).unwrap();
        assert_eq!(removed.id, a);
        assert!(topo.is_empty());
    }

    #[test]
    fn ids_are_never_reused() {
        let mut topo = empty_topography();
        let a = topo.add_pedestrian(Point::new(1.0, 1.0));
        topo.remove_pedestrian(a).unwrap();
        let b = topo.add_pedestrian(Point::new(1.0, 1.0));
        assert_ne!(a, b);
        assert_eq!(b, AgentId(1));
    }

    #[test]
    fn spawned_pedestrians_remember_source() {
        let mut topo = empty_topography();
        let id = topo.spawn_pedestrian(SourceId(4), Point::new(0.0, 0.0));
        assert_eq!(topo.pedestrian(id).unwrap().source, Some(SourceId(4)));
        assert_eq!(topo.pedestrian(id).unwrap().exposure, 0);
    }

    #[test]
    fn unknown_pedestrian_errors() {
        let mut topo = empty_topography();
        assert!(matches!(
            topo.remove_pedestrian(AgentId(9)),
            Err(CoreError::AgentNotFound(AgentId(9)))
        ));
        assert!(topo.move_pedestrian(AgentId(9), Point::new(0.0, 0.0)).is_err());
    }

    #[test]
    fn iteration_is_ascending() {
        let mut topo = empty_topography();
        for i in 0..5 {
            topo.add_pedestrian(Point::new(i as f64, 0.0));
        }
        topo.remove_pedestrian(AgentId(2)).unwrap();
        let ids: Vec<u32> = topo.pedestrians().map(|p| p.id.0).collect();
        assert_eq!(ids, vec![0, 1, 3, 4]);

        for p in topo.pedestrians_mut() {
            p.exposure = p.id.0;
        }
        assert_eq!(topo.pedestrian(AgentId(4)).unwrap().exposure, 4);
    }
}

// ── Listeners ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod listener_tests {
    use crate::{ElementEvent, ListenerKind};

    use super::*;

    #[test]
    fn events_only_when_registered() {
        let mut topo = empty_topography();
        let a = topo.add_pedestrian(Point::new(1.0, 1.0));
        assert!(!topo.has_pending_events());

        assert!(topo.register_listener(ListenerKind::Added));
        let b = topo.add_pedestrian(Point::new(2.0, 2.0));
        topo.remove_pedestrian(a).unwrap(); // no Removed listener yet
        let events = topo.drain_events();
        assert_eq!(events.len(), 1);
        assert!(matches!(&events[0], ElementEvent::Added(p) if p.id == b));
    }

    #[test]
    fn removed_event_carries_final_state() {
        let mut topo = empty_topography();
        topo.register_listener(ListenerKind::Removed);
        let a = topo.add_pedestrian(Point::new(1.0, 1.0));
        topo.pedestrian_mut(a).unwrap().exposure = 3;
        topo.remove_pedestrian(a).unwrap();

        let events = topo.drain_events();
        assert_eq!(events.len(), 1);
        match &events[0] {
            ElementEvent::Removed(p) => {
                assert_eq!(p.id, a);
                assert_eq!(p.exposure, 3);
            }
            other => panic!("unexpected event {other:?}"),
        }
        assert_eq!(events[0].agent(), a);
        assert_eq!(events[0].kind(), ListenerKind::Removed);
    }

    #[test]
    fn registration_is_exactly_once() {
        let mut topo = empty_topography();
        assert!(topo.register_listener(ListenerKind::Added));
        assert!(!topo.register_listener(ListenerKind::Added));
        assert!(topo.has_listener(ListenerKind::Added));
        assert!(topo.deregister_listener(ListenerKind::Added));
        assert!(!topo.deregister_listener(ListenerKind::Added));
        assert!(!topo.has_listener(ListenerKind::Added));
    }

    #[test]
    fn deregister_drops_pending_events_of_that_kind() {
        let mut topo = empty_topography();
        topo.register_listener(ListenerKind::Added);
        topo.register_listener(ListenerKind::Removed);
        let a = topo.add_pedestrian(Point::new(1.0, 1.0));
        topo.remove_pedestrian(a).unwrap();

        topo.deregister_listener(ListenerKind::Added);
        let events = topo.drain_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind(), ListenerKind::Removed);
    }
}
