//! End-to-end tests driving `SimulationWorld` through whole ticks.

use geosandbox::simulation::{
    Alliance, AllianceRegistry, CalendarDate, CountryRegistry, Demographics, GeoeconomicProfile,
    Sector, SimulationConfig, SimulationWorld, WarOutcome, WarRules, WarTriggerTable,
    WorldEventKind, WorldSeed,
};

const SEED: &str = r#"{
    "countries": [
        {"id": "AAA", "name": "Alpha", "population": 5000000, "activeMilitary": 20000,
         "reserveMilitary": 8000, "fertilityRate": 2.1, "mortalityMaleAdults": 140,
         "mortalityFemaleAdults": 80, "lifespan": 74, "democracyIndex": 2.5,
         "gdp": 4e11, "nuclearWeapons": 0, "area": 2.0},
        {"id": "BBB", "name": "Bravo", "population": 3000000, "activeMilitary": 12000,
         "reserveMilitary": 4000, "fertilityRate": 1.6, "mortalityMaleAdults": 100,
         "mortalityFemaleAdults": 55, "lifespan": 81, "democracyIndex": 8.2,
         "gdp": 9e11, "nuclearWeapons": 30, "area": 1.0},
        {"id": "CCC", "name": "Charlie", "population": 800000, "activeMilitary": 3000,
         "reserveMilitary": 1000, "fertilityRate": 2.8, "mortalityMaleAdults": 220,
         "mortalityFemaleAdults": 150, "lifespan": 66, "democracyIndex": 3.9,
         "gdp": 2e10, "nuclearWeapons": 0, "area": 1.0}
    ],
    "alliances": [{"name": "Accord", "members": ["BBB", "CCC", "ZZZ"]}]
}"#;

fn small_config(seed: u64) -> SimulationConfig {
    SimulationConfig {
        seed,
        total_node_budget: 40,
        ..SimulationConfig::default()
    }
}

fn quiet_config() -> SimulationConfig {
    SimulationConfig {
        geoeconomic_decision_chance: 0.0,
        war_triggers: WarTriggerTable {
            autocratic_target: 0.0,
            democratic_target: 0.0,
            nuclear_deterrence: 0.0,
            richer_aggressor: 0.0,
            allied_target: 0.0,
            unaligned_target: 0.0,
        },
        ..small_config(7)
    }
}

fn member(code: &str, gdp: f64) -> (String, Demographics) {
    let stats = Demographics {
        population: 100_000,
        active_military: 10_000,
        reserve_military: 1_000,
        fertility_rate: 2.0,
        mortality_male_adults: 100.0,
        mortality_female_adults: 60.0,
        lifespan: 75.0,
        democracy_index: 6.0,
        gdp,
        nuclear_weapons: 0,
    };
    (code.to_string(), stats)
}

fn bloc_world() -> SimulationWorld {
    bloc_world_with(quiet_config())
}

fn bloc_world_with(config: SimulationConfig) -> SimulationWorld {
    let mut registry = CountryRegistry::new();
    for (code, stats) in [
        member("NA1", 1.0e11),
        member("NA2", 5.0e11),
        member("NA3", 2.0e11),
        member("SB1", 3.0e11),
        member("SB2", 1.0e11),
        member("SB3", 8.0e11),
    ] {
        let mut geo = GeoeconomicProfile::baseline(stats.gdp);
        geo.coalition.alliance_cohesion = 0.8;
        registry.insert(&code, &code, stats, geo, 10);
    }
    let alliances = AllianceRegistry::new(vec![
        Alliance {
            name: "North".to_string(),
            members: vec!["NA1".to_string(), "NA2".to_string(), "NA3".to_string()],
        },
        Alliance {
            name: "South".to_string(),
            members: vec!["SB1".to_string(), "SB2".to_string(), "SB3".to_string()],
        },
    ]);
    SimulationWorld::from_registries(
        config,
        registry,
        alliances,
        Default::default(),
    )
}

#[test]
fn test_initialization_reports_country_count() {
    let seed = WorldSeed::from_json_str(SEED).unwrap();
    let simulation = SimulationWorld::new(small_config(1), &seed);

    assert_eq!(simulation.tick_count(), 0);
    assert_eq!(simulation.countries().len(), 3);
    assert_eq!(
        simulation.events().news(),
        vec!["Simulation initialized with 3 countries".to_string()]
    );

    let observer = simulation.observer();
    let snapshot = observer.read().unwrap();
    assert_eq!(snapshot.countries.len(), 3);
    assert_eq!(snapshot.ticker, "Simulation initialized with 3 countries");
    assert!(snapshot.log[0].starts_with("1 January 2021: "));
}

#[test]
fn test_aggregates_match_nodes_after_every_tick() {
    let seed = WorldSeed::from_json_str(SEED).unwrap();
    let mut simulation = SimulationWorld::new(small_config(11), &seed);

    for _ in 0..60 {
        simulation.tick();
        let registry = simulation.countries();
        for country in registry.iter() {
            let node_sum: u64 = registry
                .nodes()
                .iter()
                .filter(|node| node.country == country.id)
                .map(|node| node.stats.population)
                .sum();
            assert_eq!(country.stats.population, node_sum, "{}", country.name);
            assert_eq!(country.stats.reserve_military, registry.reserve_military(country.id));
        }
    }
}

#[test]
fn test_clock_advances_one_day_per_tick() {
    let seed = WorldSeed::sample();
    let mut simulation = SimulationWorld::new(small_config(3), &seed);

    for _ in 0..31 {
        simulation.tick();
    }
    assert_eq!(simulation.tick_count(), 31);
    assert_eq!(simulation.date(), CalendarDate::new(1, 2, 2021));

    for _ in 0..334 {
        simulation.tick();
    }
    assert_eq!(simulation.date(), CalendarDate::new(1, 1, 2022));
    assert_eq!(simulation.observer().read().unwrap().date, simulation.date());
}

#[test]
fn test_same_seed_gives_same_history() {
    let seed = WorldSeed::from_json_str(SEED).unwrap();
    let mut first = SimulationWorld::new(small_config(99), &seed);
    let mut second = SimulationWorld::new(small_config(99), &seed);

    for _ in 0..120 {
        first.tick();
        second.tick();
    }

    let left = serde_json::to_string(&*first.observer().read().unwrap()).unwrap();
    let right = serde_json::to_string(&*second.observer().read().unwrap()).unwrap();
    assert_eq!(left, right);
}

#[test]
fn test_declared_war_drafts_both_alliances() {
    let mut simulation = bloc_world();
    simulation.declare_war("NA1", "SB2").unwrap();

    let wars = simulation.active_wars();
    assert_eq!(wars.len(), 1);
    let war = wars.iter().next().unwrap();
    assert_eq!(war.attackers.len(), 3);
    assert_eq!(war.defenders.len(), 3);

    let registry = simulation.countries();
    assert_eq!(registry.name_of(war.attackers[0]), "NA1");
    assert_eq!(registry.name_of(war.defenders[0]), "SB2");
    assert_eq!(registry.name_of(war.attackers_leader), "NA2");
    assert_eq!(registry.name_of(war.defenders_leader), "SB3");

    assert_eq!(
        simulation.events().news().last().map(String::as_str),
        Some("NA1 declared war on SB2")
    );
    let observer = simulation.observer();
    let snapshot = observer.read().unwrap();
    assert_eq!(snapshot.wars.len(), 1);
    assert_eq!(snapshot.wars[0].attackers_leader, "NA2");
}

#[test]
fn test_war_runs_across_ticks() {
    let mut simulation = bloc_world();
    simulation.declare_war("SB1", "NA3").unwrap();

    for _ in 0..5 {
        simulation.tick();
    }

    let wars = simulation.active_wars();
    assert_eq!(wars.len(), 1);
    let war = wars.iter().next().unwrap();
    assert_eq!(war.duration_ticks, 5);
    assert!(!war.past_war);

    // One battle per tick over 30 enemy nodes cannot reach the victory line yet.
    let snapshot = simulation.observer().read().unwrap().clone();
    let held = snapshot.wars[0].attackers_percentage + snapshot.wars[0].defenders_percentage;
    assert!(held <= 5.0 / 30.0 * 100.0 + 0.01);
}

#[test]
fn test_declare_war_rejects_unknown_codes() {
    let mut simulation = bloc_world();
    assert!(simulation.declare_war("NA1", "XXX").is_err());
    assert!(simulation.active_wars().is_empty());
}

#[test]
fn test_finished_war_is_pruned_and_reported() {
    let config = SimulationConfig {
        war_rules: WarRules {
            max_duration_ticks: 2,
            ..WarRules::default()
        },
        ..quiet_config()
    };
    let mut simulation = bloc_world_with(config);
    simulation.declare_war("NA1", "SB2").unwrap();

    simulation.tick();
    assert_eq!(simulation.active_wars().len(), 1);

    simulation.tick();
    assert!(simulation.active_wars().is_empty());

    let ended: Vec<_> = simulation
        .events()
        .snapshot()
        .into_iter()
        .filter(|event| matches!(event.kind, WorldEventKind::WarEnded { .. }))
        .collect();
    assert_eq!(ended.len(), 1);
    assert_eq!(ended[0].tick, 2);
    match &ended[0].kind {
        WorldEventKind::WarEnded {
            attackers_leader,
            defenders_leader,
            outcome,
            duration_ticks,
        } => {
            assert_eq!(attackers_leader, "NA2");
            assert_eq!(defenders_leader, "SB3");
            assert_eq!(*outcome, WarOutcome::WhitePeace);
            assert_eq!(*duration_ticks, 2);
        }
        other => panic!("unexpected event {:?}", other),
    }
    assert_eq!(
        simulation.events().news().last().map(String::as_str),
        Some("War between NA2 and SB3 ended in white peace")
    );
    assert!(simulation.observer().read().unwrap().wars.is_empty());
}

#[test]
fn test_country_without_nodes_does_not_stop_the_tick() {
    let (_, stats) = member("EMP", 3.0e11);
    let mut registry = CountryRegistry::new();
    let (_, lively) = member("LIV", 1.0e11);
    let lively_id = registry.insert("LIV", "Lively", lively, GeoeconomicProfile::baseline(1.0e11), 4);
    let empty_id = registry.insert("EMP", "Empty", stats, GeoeconomicProfile::baseline(3.0e11), 0);
    let mut simulation = SimulationWorld::from_registries(
        quiet_config(),
        registry,
        AllianceRegistry::default(),
        Default::default(),
    );

    for _ in 0..10 {
        simulation.tick();
    }

    assert_eq!(simulation.tick_count(), 10);
    let registry = simulation.countries();
    assert_eq!(registry.get(empty_id).unwrap().stats, stats);
    let lively = registry.get(lively_id).unwrap();
    assert_eq!(lively.stats.population, registry.population(lively_id));

    let observer = simulation.observer();
    let snapshot = observer.read().unwrap();
    assert_eq!(snapshot.country("EMP").unwrap().nodes, 0);
    assert_eq!(snapshot.country("EMP").unwrap().fertility_rate, stats.fertility_rate);
}

#[test]
fn test_geoeconomic_moves_reach_the_feed() {
    let config = SimulationConfig {
        geoeconomic_decision_chance: 1.0,
        ..quiet_config()
    };
    let mut simulation = bloc_world_with(config);
    simulation.tick();

    let news = simulation.events().news();
    // Initial headline plus one move per country.
    assert_eq!(news.len(), 7);
    assert!(news[1].starts_with("NA1 applied tariff against "));
    assert!(news[1].contains(": NA1 faces a "));
    assert!(news[1].ends_with("Selected signaling in trade domain using tariff tool."));

    let actions = simulation
        .events()
        .snapshot()
        .into_iter()
        .filter(|event| matches!(event.kind, WorldEventKind::GeoeconomicAction { .. }))
        .count();
    assert_eq!(actions, 6);
    for country in simulation.countries().iter() {
        let tariffs = country.geoeconomics.trade.tariffs.get(&Sector::Manufacturing);
        assert_eq!(tariffs.map(|targets| targets.len()), Some(1), "{}", country.name);
    }
}

#[test]
fn test_event_history_capacity_comes_from_config() {
    let config = SimulationConfig {
        event_capacity: 1,
        ..quiet_config()
    };
    let mut simulation = bloc_world_with(config);
    simulation.declare_war("NA1", "SB1").unwrap();

    let events = simulation.events();
    assert_eq!(events.recorded(), 2);
    assert_eq!(events.snapshot().len(), 1);
    assert!(matches!(events.snapshot()[0].kind, WorldEventKind::WarDeclared { .. }));
}
