use bevy_ecs::prelude::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use crate::simulation::{
    ActiveWars, AllianceRegistry, CalendarDate, Country, CountryId, CountryRegistry,
    SimulationConfig, WorldCalendar, WorldEvent, WorldEventKind, WorldEventLog, WorldTime,
    declare_war,
};

/// Per-tick chance that `country` attacks `other`. Only meaningful for
/// hostile countries; callers check the democracy threshold first.
pub fn war_probability(
    country: &Country,
    other: &Country,
    alliances: &AllianceRegistry,
    config: &SimulationConfig,
) -> f64 {
    let terms = &config.war_triggers;
    let threshold = config.hostile_democracy_threshold;
    let mut probability = 0.0;

    if other.stats.democracy_index < threshold {
        probability += terms.autocratic_target;
    }
    if other.stats.democracy_index > threshold {
        probability += terms.democratic_target;
    }
    if other.stats.nuclear_weapons > 0 && country.stats.nuclear_weapons < 1 {
        probability += terms.nuclear_deterrence;
    }
    if country.stats.gdp > other.stats.gdp {
        probability += terms.richer_aggressor;
    }
    if alliances.is_member(&other.code) {
        probability += terms.allied_target;
    } else {
        probability += terms.unaligned_target;
    }

    probability
}

/// Rolls a war declaration against every other country. One draw per pair.
#[allow(clippy::too_many_arguments)]
pub fn scan_for_wars<R: Rng + ?Sized>(
    registry: &CountryRegistry,
    alliances: &AllianceRegistry,
    wars: &mut ActiveWars,
    config: &SimulationConfig,
    aggressor: CountryId,
    tick: u64,
    date: CalendarDate,
    events: &mut WorldEventLog,
    rng: &mut R,
) {
    let Some(country) = registry.get(aggressor) else {
        return;
    };
    if country.stats.democracy_index >= config.hostile_democracy_threshold {
        return;
    }

    for other in registry.iter() {
        if other.id == aggressor {
            continue;
        }

        let probability = war_probability(country, other, alliances, config);
        let draw: f64 = rng.gen_range(0.0..1.0);
        if probability <= 0.0 || draw > probability {
            continue;
        }

        if config.suppress_duplicate_wars && wars.involves_pair(aggressor, other.id) {
            debug!(aggressor = %country.name, target = %other.name, "already at war; declaration skipped");
            continue;
        }

        match declare_war(registry, alliances, aggressor, other.id) {
            Ok(war) => {
                info!(
                    target: "geosandbox::war",
                    attackers = war.attackers.len(),
                    defenders = war.defenders.len(),
                    "{} declared war on {}",
                    country.name,
                    other.name
                );
                events.push(WorldEvent::new(
                    tick,
                    date,
                    WorldEventKind::WarDeclared {
                        initiator: country.name.clone(),
                        target: other.name.clone(),
                        attackers: war.attackers.len(),
                        defenders: war.defenders.len(),
                    },
                ));
                wars.push(war.dated(date));
            }
            Err(error) => warn!(%error, "war declaration failed"),
        }
    }
}

/// Advances every running war once, then drops the ones that ended.
pub fn war_resolution_system(
    time: Res<WorldTime>,
    calendar: Res<WorldCalendar>,
    config: Res<SimulationConfig>,
    mut registry: ResMut<CountryRegistry>,
    mut wars: ResMut<ActiveWars>,
    mut events: ResMut<WorldEventLog>,
) {
    let mut rng = SmallRng::seed_from_u64(config.seed ^ time.tick.wrapping_mul(389));

    for war in wars.iter_mut() {
        if war.past_war {
            continue;
        }
        let report = war.update(&mut registry, &config.war_rules, &mut rng);

        let Some(outcome) = report.outcome else {
            continue;
        };
        let attackers_leader = registry.name_of(war.attackers_leader).to_string();
        let defenders_leader = registry.name_of(war.defenders_leader).to_string();
        info!(
            target: "geosandbox::war",
            duration = war.duration_ticks,
            "war between {} and {} ended in {}",
            attackers_leader,
            defenders_leader,
            outcome.label()
        );
        events.push(WorldEvent::new(
            time.tick,
            calendar.date,
            WorldEventKind::WarEnded {
                attackers_leader,
                defenders_leader,
                outcome,
                duration_ticks: war.duration_ticks,
            },
        ));
    }

    let ended = wars.prune();
    if !ended.is_empty() {
        debug!(ended = ended.len(), remaining = wars.len(), "pruned finished wars");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::{Alliance, Demographics, GeoeconomicProfile};

    fn insert(registry: &mut CountryRegistry, code: &str, democracy: f64, gdp: f64, nukes: u64) -> CountryId {
        let stats = Demographics {
            population: 1_000,
            active_military: 100,
            democracy_index: democracy,
            gdp,
            nuclear_weapons: nukes,
            ..Demographics::default()
        };
        registry.insert(code, code, stats, GeoeconomicProfile::baseline(gdp), 1)
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-15
    }

    #[test]
    fn test_war_probability_terms() {
        let mut registry = CountryRegistry::new();
        let hostile = insert(&mut registry, "HOS", 2.0, 100.0, 0);
        let autocrat = insert(&mut registry, "AUT", 3.0, 200.0, 0);
        let democrat = insert(&mut registry, "DEM", 8.0, 50.0, 5);
        let alliances = AllianceRegistry::new(vec![Alliance {
            name: "Shield".to_string(),
            members: vec!["DEM".to_string()],
        }]);
        let config = SimulationConfig::default();
        let get = |id| registry.get(id).unwrap();

        // autocratic target, poorer aggressor, unaligned target
        let p = war_probability(get(hostile), get(autocrat), &alliances, &config);
        assert!(close(p, 2.0e-7));

        // democratic target, nuclear deterrence, richer aggressor, allied target
        let p = war_probability(get(hostile), get(democrat), &alliances, &config);
        assert!(close(p, 5.0e-8 - 2.0e-7 + 1.0e-7 - 5.0e-8));
        assert!(p < 0.0);
    }

    #[test]
    fn test_threshold_democracy_adds_nothing() {
        let mut registry = CountryRegistry::new();
        let hostile = insert(&mut registry, "HOS", 2.0, 10.0, 0);
        let border = insert(&mut registry, "BRD", 4.0, 10.0, 0);
        let alliances = AllianceRegistry::default();
        let config = SimulationConfig::default();
        let p = war_probability(
            registry.get(hostile).unwrap(),
            registry.get(border).unwrap(),
            &alliances,
            &config,
        );
        assert!(close(p, 1.0e-7));
    }

    #[test]
    fn test_scan_declares_with_certain_probability() {
        let mut registry = CountryRegistry::new();
        let hostile = insert(&mut registry, "HOS", 2.0, 10.0, 0);
        insert(&mut registry, "TGT", 6.0, 10.0, 0);
        let alliances = AllianceRegistry::default();
        let mut config = SimulationConfig::default();
        config.war_triggers.unaligned_target = 1.0;
        let mut wars = ActiveWars::default();
        let mut events = WorldEventLog::default();
        let mut rng = SmallRng::seed_from_u64(3);

        scan_for_wars(&registry, &alliances, &mut wars, &config, hostile, 1, CalendarDate::default(), &mut events, &mut rng);
        scan_for_wars(&registry, &alliances, &mut wars, &config, hostile, 2, CalendarDate::default(), &mut events, &mut rng);
        assert_eq!(wars.len(), 2);
        assert_eq!(events.news()[0], "HOS declared war on TGT");

        config.suppress_duplicate_wars = true;
        scan_for_wars(&registry, &alliances, &mut wars, &config, hostile, 3, CalendarDate::default(), &mut events, &mut rng);
        assert_eq!(wars.len(), 2);
    }

    #[test]
    fn test_democracies_never_scan() {
        let mut registry = CountryRegistry::new();
        let calm = insert(&mut registry, "CLM", 7.0, 10.0, 0);
        insert(&mut registry, "TGT", 2.0, 1.0, 0);
        let mut config = SimulationConfig::default();
        config.war_triggers.autocratic_target = 1.0;
        let mut wars = ActiveWars::default();
        let mut events = WorldEventLog::default();
        let mut rng = SmallRng::seed_from_u64(3);

        scan_for_wars(&registry, &AllianceRegistry::default(), &mut wars, &config, calm, 1, CalendarDate::default(), &mut events, &mut rng);
        assert!(wars.is_empty());
    }
}
