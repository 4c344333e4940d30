use bevy_ecs::prelude::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::simulation::{
    ActiveWars, AllianceRegistry, CountryRegistry, SimulationConfig, WorldCalendar,
    WorldEventLog, WorldTime, run_geoeconomic_turn, scan_for_wars, update_country_demographics,
};

/// Each country in registry order: demographics, a chance at a geoeconomic
/// move, then the war-trigger scan. Later countries see earlier updates.
pub fn country_turn_system(
    time: Res<WorldTime>,
    calendar: Res<WorldCalendar>,
    config: Res<SimulationConfig>,
    alliances: Res<AllianceRegistry>,
    mut registry: ResMut<CountryRegistry>,
    mut wars: ResMut<ActiveWars>,
    mut events: ResMut<WorldEventLog>,
) {
    let mut rng = SmallRng::seed_from_u64(config.seed ^ time.tick.wrapping_mul(257));
    let decision_chance = config.geoeconomic_decision_chance.clamp(0.0, 1.0);
    let date = calendar.date;

    for id in registry.ids() {
        update_country_demographics(&mut registry, id, &mut rng);

        if rng.gen_bool(decision_chance) {
            run_geoeconomic_turn(
                &mut registry,
                id,
                &config,
                time.tick,
                date,
                &mut events,
                &mut rng,
            );
        }

        scan_for_wars(
            &registry,
            &alliances,
            &mut wars,
            &config,
            id,
            time.tick,
            date,
            &mut events,
            &mut rng,
        );
    }
}
