//! Unit tests for vc-hierarchy.

use vc_core::{Level, MoveParams, PositionId, SimRng};
use vc_entity::{EntityKind, EntityStore};

use crate::Hierarchy;

fn store() -> EntityStore {
    EntityStore::new(MoveParams::Scalar(0.0), MoveParams::Scalar(1.0))
}

fn pos(level: u16, index: u32) -> PositionId {
    PositionId::new(Level(level), index)
}

#[cfg(test)]
mod populate {
    use super::*;

    #[test]
    fn open_share_is_rounded_down_per_level() {
        let mut s = store();
        let mut rng = SimRng::new(1);
        let h = Hierarchy::populate(&[4, 5, 3], 0.5, &mut s, &mut rng);
        assert_eq!(h.level_count(), 3);
        assert_eq!(h.len(), 12);
        assert_eq!(h.count_kind(Level(0), EntityKind::OpenSlot), 2);
        assert_eq!(h.count_kind(Level(1), EntityKind::OpenSlot), 2);
        assert_eq!(h.count_kind(Level(2), EntityKind::OpenSlot), 1);
        assert_eq!(s.count(EntityKind::OpenSlot), 5);
        assert_eq!(s.count(EntityKind::Occupant), 7);
    }

    #[test]
    fn extremes() {
        let mut s = store();
        let mut rng = SimRng::new(1);
        let full = Hierarchy::populate(&[3], 0.0, &mut s, &mut rng);
        assert_eq!(full.open_fraction(Level(0)), 0.0);

        let mut s = store();
        let empty = Hierarchy::populate(&[3], 1.0, &mut s, &mut rng);
        assert_eq!(empty.open_fraction(Level(0)), 1.0);
    }

    #[test]
    fn populated_grid_is_consistent() {
        let mut s = store();
        let mut rng = SimRng::new(9);
        let h = Hierarchy::populate(&[2, 3, 4], 0.3, &mut s, &mut rng);
        assert_eq!(h.check_occupancy(&s), Ok(()));
        for p in h.iter() {
            assert_eq!(p.log(), &[p.occupant()]);
            let e = s.get(p.occupant()).unwrap();
            assert_eq!(e.log(), &[Some(p.id())]);
        }
    }

    #[test]
    fn layout_is_seeded() {
        let kinds = |seed| {
            let mut s = store();
            let mut rng = SimRng::new(seed);
            let h = Hierarchy::populate(&[10, 10], 0.4, &mut s, &mut rng);
            h.iter().map(|p| p.occupant_kind()).collect::<Vec<_>>()
        };
        assert_eq!(kinds(3), kinds(3));
    }
}

#[cfg(test)]
mod mutation {
    use super::*;
    use crate::{HierarchyError, Occupancy};

    #[test]
    fn swap_exchanges_occupancy_only() {
        let mut s = store();
        let mut rng = SimRng::new(0);
        let mut h = Hierarchy::populate(&[1, 1], 0.0, &mut s, &mut rng);
        let top = h.position(pos(0, 0)).occupancy();
        let bottom = h.position(pos(1, 0)).occupancy();
        h.swap(pos(0, 0), pos(1, 0));
        assert_eq!(h.position(pos(0, 0)).occupancy(), bottom);
        assert_eq!(h.position(pos(1, 0)).occupancy(), top);
        assert_eq!(h.position(pos(0, 0)).log().len(), 1);
    }

    #[test]
    fn record_all_appends_current_occupant() {
        let mut s = store();
        let mut rng = SimRng::new(0);
        let mut h = Hierarchy::populate(&[2], 0.0, &mut s, &mut rng);
        let first = h.position(pos(0, 0)).occupant();
        h.swap(pos(0, 0), pos(0, 1));
        h.record_all();
        let log = h.position(pos(0, 0)).log();
        assert_eq!(log.len(), 2);
        assert_eq!(log[0], first);
        assert_ne!(log[1], first);
    }

    #[test]
    fn swap_without_entity_update_breaks_back_references() {
        let mut s = store();
        let mut rng = SimRng::new(0);
        let mut h = Hierarchy::populate(&[2], 0.0, &mut s, &mut rng);
        h.swap(pos(0, 0), pos(0, 1));
        assert!(matches!(h.check_occupancy(&s), Err(HierarchyError::BackReference { .. })));
    }

    #[test]
    fn missing_occupant_is_reported() {
        let mut s = store();
        let mut rng = SimRng::new(0);
        let mut h = Hierarchy::populate(&[2], 0.0, &mut s, &mut rng);
        let gone = h.position(pos(0, 0)).occupant();
        s.remove(gone);
        assert!(matches!(
            h.check_occupancy(&s),
            Err(HierarchyError::PopulationMismatch { positions: 2, live: 1 })
        ));

        let newcomer = s.spawn(EntityKind::OpenSlot, pos(0, 0), vc_core::Step::ZERO);
        h.set_occupancy(pos(0, 0), Occupancy::new(newcomer, EntityKind::Occupant));
        assert!(matches!(h.check_occupancy(&s), Err(HierarchyError::KindMismatch { .. })));
    }

    #[test]
    fn unknown_level_queries_are_empty() {
        let mut s = store();
        let mut rng = SimRng::new(0);
        let h = Hierarchy::populate(&[2], 0.0, &mut s, &mut rng);
        assert!(h.level(Level(5)).is_empty());
        assert_eq!(h.open_fraction(Level(5)), 0.0);
        assert!(h.get(pos(0, 2)).is_none());
    }
}
