//! Builder for constructing a [`MobilityModel`].

use tracing::info;
use vc_behavior::{MoveRule, VacancyChainRule};
use vc_core::{MobilityConfig, SimRng, Step};
use vc_entity::{Archive, EntityKind, EntityStore};
use vc_hierarchy::Hierarchy;

use crate::{Coordinator, MobilityModel, SimResult};

/// Builder for [`MobilityModel`].
///
/// | Method             | Default                         |
/// |--------------------|---------------------------------|
/// | `.seed(s)`         | `config.seed`                   |
/// | `.build()`         | rule = `VacancyChainRule` from the config |
/// | `.build_with(r)`   | any `MoveRule`                  |
///
/// Both build methods validate the configuration first; nothing is
/// allocated for an invalid one.
///
/// # Example
///
/// ```rust,ignore
/// let model = MobilityModelBuilder::new(config).seed(7).build()?;
/// ```
pub struct MobilityModelBuilder {
    config: MobilityConfig,
}

impl MobilityModelBuilder {
    pub fn new(config: MobilityConfig) -> Self {
        Self { config }
    }

    /// Override the configuration's seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Build with the vacancy-chain move rule described by the config.
    pub fn build(self) -> SimResult<MobilityModel<VacancyChainRule>> {
        self.config.validate()?;
        let rule = VacancyChainRule::from_config(&self.config);
        self.build_with(rule)
    }

    /// Build with a custom move rule.
    pub fn build_with<R: MoveRule>(self, rule: R) -> SimResult<MobilityModel<R>> {
        let config = self.config;
        config.validate()?;

        let mut rng = SimRng::new(config.seed);
        let mut entities = EntityStore::new(
            config.occupant_retirement.clone(),
            config.open_slot_move.clone(),
        );
        let hierarchy = Hierarchy::populate(
            &config.positions_per_level,
            config.initial_open_fraction,
            &mut entities,
            &mut rng,
        );
        hierarchy.check_occupancy(&entities)?;

        info!(
            levels = hierarchy.level_count(),
            positions = hierarchy.len(),
            occupants = entities.count(EntityKind::Occupant),
            open_slots = entities.count(EntityKind::OpenSlot),
            seed = config.seed,
            "mobility model built"
        );

        Ok(MobilityModel {
            config,
            step: Step::ZERO,
            rng,
            hierarchy,
            entities,
            archive: Archive::new(),
            coordinator: Coordinator::new(),
            rule,
        })
    }
}
