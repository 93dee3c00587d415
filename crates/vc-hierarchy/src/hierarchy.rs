//! `Hierarchy`: positions grouped by level.

use vc_core::{Level, PositionId, SimRng, Step};
use vc_entity::{EntityKind, EntityStore};

use crate::{HierarchyError, HierarchyResult, Occupancy, Position};

/// The level → positions grid.
///
/// `levels[l][i]` is `PositionId { level: Level(l), index: i }`.  The grid
/// shape is fixed at construction; only occupancy and logs change.
pub struct Hierarchy {
    levels: Vec<Vec<Position>>,
}

impl Hierarchy {
    /// Build the grid and fill it with fresh entities.
    ///
    /// For each level independently, `floor(n * open_fraction)` positions get
    /// an open slot and the rest an occupant; which positions get which is
    /// shuffled per level.  Entities are spawned level by level in index
    /// order, so ids follow the grid.
    pub fn populate(
        positions_per_level: &[u32],
        open_fraction:       f64,
        store:               &mut EntityStore,
        rng:                 &mut SimRng,
    ) -> Self {
        let levels = positions_per_level
            .iter()
            .enumerate()
            .map(|(l, &n)| {
                let level = Level(l as u16);
                let open = (n as f64 * open_fraction).floor() as u32;
                let mut is_open: Vec<bool> = (0..n).map(|i| i < open).collect();
                rng.shuffle(&mut is_open);

                is_open
                    .into_iter()
                    .enumerate()
                    .map(|(i, open)| {
                        let id = PositionId::new(level, i as u32);
                        let kind = if open { EntityKind::OpenSlot } else { EntityKind::Occupant };
                        let entity = store.spawn(kind, id, Step::ZERO);
                        Position::new(id, Occupancy::new(entity, kind))
                    })
                    .collect()
            })
            .collect();
        Self { levels }
    }

    // ── Shape ─────────────────────────────────────────────────────────────

    #[inline]
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// Total number of positions.
    pub fn len(&self) -> usize {
        self.levels.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Positions at `level`, in index order.  Empty for an unknown level.
    #[inline]
    pub fn level(&self, level: Level) -> &[Position] {
        self.levels.get(level.index()).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn levels(&self) -> impl Iterator<Item = (Level, &[Position])> + '_ {
        self.levels
            .iter()
            .enumerate()
            .map(|(l, v)| (Level(l as u16), v.as_slice()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Position> + '_ {
        self.levels.iter().flatten()
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    #[inline]
    pub fn get(&self, id: PositionId) -> Option<&Position> {
        self.levels.get(id.level.index())?.get(id.index as usize)
    }

    /// The position `id`.
    ///
    /// # Panics
    ///
    /// If `id` is outside the grid.  Position ids are only ever produced by
    /// the grid itself, so this is a programming error.
    #[inline]
    pub fn position(&self, id: PositionId) -> &Position {
        match self.get(id) {
            Some(p) => p,
            None => panic!("position {id} is outside the hierarchy"),
        }
    }

    fn position_mut(&mut self, id: PositionId) -> &mut Position {
        match self.levels.get_mut(id.level.index()).and_then(|l| l.get_mut(id.index as usize)) {
            Some(p) => p,
            None => panic!("position {id} is outside the hierarchy"),
        }
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    /// Hand `id` to a new occupant.
    pub fn set_occupancy(&mut self, id: PositionId, occupancy: Occupancy) {
        self.position_mut(id).set_occupancy(occupancy);
    }

    /// Exchange the occupants of `a` and `b`.
    pub fn swap(&mut self, a: PositionId, b: PositionId) {
        let occ_a = self.position(a).occupancy();
        let occ_b = self.position(b).occupancy();
        self.position_mut(a).set_occupancy(occ_b);
        self.position_mut(b).set_occupancy(occ_a);
    }

    /// Append every position's current occupant to its log.
    pub fn record_all(&mut self) {
        self.levels.iter_mut().flatten().for_each(Position::record);
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// Number of positions at `level` held by an entity of `kind`.
    pub fn count_kind(&self, level: Level, kind: EntityKind) -> usize {
        self.level(level).iter().filter(|p| p.occupant_kind() == kind).count()
    }

    /// Share of `level`'s positions held by open slots.  0 for an unknown
    /// level.
    pub fn open_fraction(&self, level: Level) -> f64 {
        let positions = self.level(level);
        if positions.is_empty() {
            return 0.0;
        }
        self.count_kind(level, EntityKind::OpenSlot) as f64 / positions.len() as f64
    }

    /// Verify that every position's recorded occupant is live, has the
    /// recorded kind, and points back at that position, and that there are
    /// exactly as many live entities as positions.
    ///
    /// Together these make the position → entity map a bijection.
    pub fn check_occupancy(&self, store: &EntityStore) -> HierarchyResult<()> {
        if store.len() != self.len() {
            return Err(HierarchyError::PopulationMismatch {
                positions: self.len(),
                live:      store.len(),
            });
        }
        for position in self.iter() {
            let Occupancy { entity, kind } = position.occupancy();
            let Some(e) = store.get(entity) else {
                return Err(HierarchyError::OccupantNotLive {
                    position: position.id(),
                    recorded: entity,
                });
            };
            if e.position() != Some(position.id()) {
                return Err(HierarchyError::BackReference {
                    position: position.id(),
                    recorded: entity,
                    actual:   e.position(),
                });
            }
            if e.kind() != kind {
                return Err(HierarchyError::KindMismatch { position: position.id(), entity });
            }
        }
        Ok(())
    }
}
