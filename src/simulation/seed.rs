//! World seed data: country and alliance records loaded from JSON.

use std::fs;
use std::path::Path;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};

use crate::simulation::{
    Alliance, AllianceRegistry, CountryRegistry, Demographics, GeoeconomicProfile, Result,
    SimulationConfig,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryRecord {
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub stats: Demographics,
    /// Relative land area, used to share out the node budget.
    #[serde(default)]
    pub area: Option<f64>,
    /// Explicit node count; overrides the area share.
    #[serde(default)]
    pub nodes: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldSeed {
    pub countries: Vec<CountryRecord>,
    #[serde(default)]
    pub alliances: Vec<Alliance>,
}

impl WorldSeed {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Single stand-in country used when no seed file is available.
    pub fn sample() -> Self {
        Self {
            countries: vec![CountryRecord {
                id: "SMP".to_string(),
                name: "Sample Country".to_string(),
                stats: Demographics {
                    population: 1_000_000,
                    active_military: 10_000,
                    reserve_military: 5_000,
                    fertility_rate: 2.1,
                    mortality_male_adults: 100.0,
                    mortality_female_adults: 50.0,
                    lifespan: 75.0,
                    democracy_index: 7.5,
                    gdp: 1.0e10,
                    nuclear_weapons: 0,
                },
                area: None,
                nodes: Some(100),
            }],
            alliances: Vec::new(),
        }
    }
}

/// Node count per record. Explicit counts win; otherwise the budget is
/// shared by area, or evenly when no areas are known. Every country gets at
/// least one node.
pub fn allocate_nodes(records: &[CountryRecord], budget: usize) -> Vec<usize> {
    let total_area: f64 = records
        .iter()
        .filter_map(|record| record.area)
        .filter(|area| *area > 0.0)
        .sum();
    let even_share = if records.is_empty() {
        0
    } else {
        budget.div_ceil(records.len())
    };

    records
        .iter()
        .map(|record| match (record.nodes, record.area) {
            (Some(nodes), _) => nodes.max(1),
            (None, Some(area)) if area > 0.0 && total_area > 0.0 => {
                ((budget as f64 * area / total_area).ceil() as usize).max(1)
            }
            _ => even_share.max(1),
        })
        .collect()
}

/// Builds the registries for a seed. Profiles are drawn from the configured seed.
pub fn build_world(seed: &WorldSeed, config: &SimulationConfig) -> (CountryRegistry, AllianceRegistry) {
    let mut rng = SmallRng::seed_from_u64(config.seed);
    let mut registry = CountryRegistry::new();
    let counts = allocate_nodes(&seed.countries, config.total_node_budget);

    for (record, node_count) in seed.countries.iter().zip(counts) {
        let geoeconomics = GeoeconomicProfile::generate(record.stats.gdp, &mut rng);
        registry.insert(&record.id, &record.name, record.stats, geoeconomics, node_count);
    }

    let alliances = AllianceRegistry::new(seed.alliances.clone());
    for id in registry.ids() {
        let Some(code) = registry.get(id).map(|country| country.code.clone()) else {
            continue;
        };
        let partners: Vec<_> = alliances
            .containing(&code)
            .flat_map(|alliance| alliance.members.iter())
            .filter_map(|member| registry.lookup(member))
            .filter(|partner| *partner != id)
            .collect();
        if let Some(country) = registry.get_mut(id) {
            country.geoeconomics.coalition.members.extend(partners);
        }
    }

    (registry, alliances)
}
