//! The `Entity` type: one occupant or one open slot.

use std::fmt;

use vc_core::{EntityId, MoveParams, PositionId, Step};

// ── EntityKind ────────────────────────────────────────────────────────────────

/// The two mutually exclusive entity kinds.  Fixed for an entity's lifetime;
/// a retiring entity is replaced by a new entity of the other kind.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKind {
    /// A person holding a position.
    Occupant,
    /// An unfilled position that migrates through the hierarchy.
    OpenSlot,
}

impl EntityKind {
    pub const ALL: [EntityKind; 2] = [EntityKind::Occupant, EntityKind::OpenSlot];

    /// The complementary kind.
    #[inline]
    pub fn opposite(self) -> EntityKind {
        match self {
            EntityKind::Occupant => EntityKind::OpenSlot,
            EntityKind::OpenSlot => EntityKind::Occupant,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EntityKind::Occupant => "occupant",
            EntityKind::OpenSlot => "open_slot",
        };
        f.write_str(s)
    }
}

// ── Proposal ──────────────────────────────────────────────────────────────────

/// What an entity asked for in the current step's propose phase.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Proposal {
    /// No move requested.
    #[default]
    Stay,
    /// Leave the hierarchy, handing the position to a new entity of the
    /// other kind.
    Retire,
    /// Swap with whatever entity occupies this position.
    Target(PositionId),
}

// ── Entity ────────────────────────────────────────────────────────────────────

/// A mobile unit.
///
/// The log holds one entry per step the entity is live plus its initial
/// placement.  `None` in the log marks the step it left the hierarchy.
#[derive(Clone, Debug)]
pub struct Entity {
    id:       EntityId,
    kind:     EntityKind,
    position: Option<PositionId>,
    log:      Vec<Option<PositionId>>,
    params:   MoveParams,

    /// First step in which this entity takes part in the protocol.
    first_step: Step,

    proposal: Proposal,

    /// Set by a firing order; consumed by the next propose phase.
    pending_retirement: bool,

    /// Whether the log already holds an entry for the step in progress.
    step_recorded: bool,
}

impl Entity {
    /// Create an entity placed at `position`, with that placement as its
    /// first log entry.
    pub fn new(
        id:         EntityId,
        kind:       EntityKind,
        position:   PositionId,
        params:     MoveParams,
        first_step: Step,
    ) -> Self {
        Self {
            id,
            kind,
            position: Some(position),
            log: vec![Some(position)],
            params,
            first_step,
            proposal: Proposal::Stay,
            pending_retirement: false,
            step_recorded: true,
        }
    }

    #[inline]
    pub fn id(&self) -> EntityId {
        self.id
    }

    #[inline]
    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Current position.  `None` only once the entity has retired.
    #[inline]
    pub fn position(&self) -> Option<PositionId> {
        self.position
    }

    #[inline]
    pub fn log(&self) -> &[Option<PositionId>] {
        &self.log
    }

    #[inline]
    pub fn params(&self) -> &MoveParams {
        &self.params
    }

    #[inline]
    pub fn first_step(&self) -> Step {
        self.first_step
    }

    #[inline]
    pub fn proposal(&self) -> Proposal {
        self.proposal
    }

    #[inline]
    pub fn is_retired(&self) -> bool {
        self.position.is_none()
    }

    // ── Protocol hooks ────────────────────────────────────────────────────

    /// Reset per-step state at the top of the propose phase.
    pub fn begin_step(&mut self) {
        self.proposal = Proposal::Stay;
        self.step_recorded = false;
    }

    pub fn set_proposal(&mut self, proposal: Proposal) {
        self.proposal = proposal;
    }

    /// Flag the entity for a forced retirement in the coming propose phase.
    pub fn mark_for_retirement(&mut self) {
        self.pending_retirement = true;
    }

    /// Consume the forced-retirement flag.
    pub fn take_pending_retirement(&mut self) -> bool {
        std::mem::take(&mut self.pending_retirement)
    }

    #[inline]
    pub fn is_pending_retirement(&self) -> bool {
        self.pending_retirement
    }

    /// Commit "did not move": log the current position again.
    pub fn stay(&mut self) {
        self.record(self.position);
    }

    /// Move to `position` and log it.
    pub fn relocate(&mut self, position: PositionId) {
        self.position = Some(position);
        self.record(Some(position));
    }

    /// Leave the hierarchy and log the exit.
    pub fn exit(&mut self) {
        self.position = None;
        self.record(None);
    }

    /// Append this step's log entry, or overwrite it if one was already
    /// written this step.  A passive swap partner may have committed "stay"
    /// earlier in the commit order; the swap then replaces that entry.
    fn record(&mut self, entry: Option<PositionId>) {
        if self.step_recorded {
            if let Some(last) = self.log.last_mut() {
                *last = entry;
                return;
            }
        }
        self.log.push(entry);
        self.step_recorded = true;
    }
}
