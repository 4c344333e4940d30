//! Arena storage for countries, their nodes and the alliance list.

use std::collections::HashMap;

use bevy_ecs::prelude::Resource;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::simulation::{
    Country, CountryId, Demographics, GeoeconomicProfile, Node, NodeId, Result, SimError,
    round_up_hundredths,
};

/// Node-average rates rounded up to two decimals for display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DisplayAverages {
    pub fertility_rate: f64,
    pub mortality_male_adults: f64,
    pub mortality_female_adults: f64,
    pub lifespan: f64,
}

#[derive(Debug, Default, Resource)]
pub struct CountryRegistry {
    countries: Vec<Country>,
    nodes: Vec<Node>,
    by_code: HashMap<String, CountryId>,
}

impl CountryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a country whose totals are split evenly over `node_count` nodes.
    pub fn insert(
        &mut self,
        code: &str,
        name: &str,
        stats: Demographics,
        geoeconomics: GeoeconomicProfile,
        node_count: usize,
    ) -> CountryId {
        self.insert_with_nodes(code, name, stats, geoeconomics, stats.split(node_count))
    }

    /// Adds a country with explicit node values. `stats` seeds the aggregates
    /// until the first update. A repeated code shadows the earlier country in
    /// code lookups.
    pub fn insert_with_nodes(
        &mut self,
        code: &str,
        name: &str,
        stats: Demographics,
        geoeconomics: GeoeconomicProfile,
        node_stats: Vec<Demographics>,
    ) -> CountryId {
        let id = CountryId(self.countries.len() as u32);
        let mut node_ids = Vec::with_capacity(node_stats.len());

        for node_stat in node_stats {
            let node_id = NodeId(self.nodes.len() as u32);
            self.nodes.push(Node::new(node_id, id, node_stat));
            node_ids.push(node_id);
        }

        self.countries.push(Country {
            id,
            code: code.to_string(),
            name: name.to_string(),
            nodes: node_ids,
            captured_nodes: Vec::new(),
            stats,
            geoeconomics,
        });
        self.by_code.insert(code.to_string(), id);
        id
    }

    pub fn len(&self) -> usize {
        self.countries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }

    pub fn get(&self, id: CountryId) -> Option<&Country> {
        self.countries.get(id.index())
    }

    pub fn get_mut(&mut self, id: CountryId) -> Option<&mut Country> {
        self.countries.get_mut(id.index())
    }

    pub fn lookup(&self, code: &str) -> Option<CountryId> {
        self.by_code.get(code).copied()
    }

    pub fn resolve(&self, code: &str) -> Result<CountryId> {
        self.lookup(code)
            .ok_or_else(|| SimError::UnknownCountry(code.to_string()))
    }

    pub fn name_of(&self, id: CountryId) -> &str {
        self.get(id).map(|country| country.name.as_str()).unwrap_or("unknown")
    }

    pub fn iter(&self) -> impl Iterator<Item = &Country> {
        self.countries.iter()
    }

    pub fn ids(&self) -> Vec<CountryId> {
        self.countries.iter().map(|country| country.id).collect()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Runs the demographic pass for one country.
    pub fn update_country<R: Rng + ?Sized>(&mut self, id: CountryId, rng: &mut R) -> Result<()> {
        let Self {
            countries, nodes, ..
        } = self;
        let country = countries
            .get_mut(id.index())
            .ok_or_else(|| SimError::UnknownCountry(format!("#{}", id.0)))?;
        country.update(nodes, rng)
    }

    fn owned_nodes(&self, id: CountryId) -> impl Iterator<Item = &Node> {
        self.get(id)
            .into_iter()
            .flat_map(|country| country.nodes.iter())
            .filter_map(move |node_id| self.nodes.get(node_id.index()))
    }

    /// Sum of current node populations.
    pub fn population(&self, id: CountryId) -> u64 {
        self.owned_nodes(id).map(|node| node.stats.population).sum()
    }

    /// Active military on owned nodes still held plus nodes captured elsewhere.
    pub fn held_active_military(&self, id: CountryId) -> u64 {
        let home: u64 = self
            .owned_nodes(id)
            .filter(|node| node.capturer == id)
            .map(|node| node.stats.active_military)
            .sum();
        let captured: u64 = self
            .get(id)
            .into_iter()
            .flat_map(|country| country.captured_nodes.iter())
            .filter_map(|node_id| self.nodes.get(node_id.index()))
            .map(|node| node.stats.active_military)
            .sum();
        home + captured
    }

    pub fn reserve_military(&self, id: CountryId) -> u64 {
        self.owned_nodes(id).map(|node| node.stats.reserve_military).sum()
    }

    pub fn display_averages(&self, id: CountryId) -> Option<DisplayAverages> {
        let count = self.get(id)?.node_amount();
        if count == 0 {
            return None;
        }

        let mut totals = Demographics::default();
        for node in self.owned_nodes(id) {
            totals.accumulate(&node.stats);
        }
        let avg = totals.averaged(count);

        Some(DisplayAverages {
            fertility_rate: round_up_hundredths(avg.fertility_rate),
            mortality_male_adults: round_up_hundredths(avg.mortality_male_adults),
            mortality_female_adults: round_up_hundredths(avg.mortality_female_adults),
            lifespan: round_up_hundredths(avg.lifespan),
        })
    }

    /// Hands a node to a new holder and keeps every `captured_nodes` list in step.
    pub fn transfer_node(&mut self, node_id: NodeId, to: CountryId) -> Option<CountryId> {
        let node = self.nodes.get_mut(node_id.index())?;
        let from = node.capturer;
        if from == to {
            return Some(from);
        }
        let owner = node.country;
        node.capturer = to;

        if from != owner {
            if let Some(previous) = self.countries.get_mut(from.index()) {
                previous.captured_nodes.retain(|captured| *captured != node_id);
            }
        }
        if to != owner {
            if let Some(holder) = self.countries.get_mut(to.index()) {
                holder.captured_nodes.push(node_id);
            }
        }
        Some(from)
    }

    /// Removes `rate` of the active military on every node held by one of
    /// `holders`, at least one soldier per non-empty node.
    pub fn apply_attrition(&mut self, holders: &[CountryId], rate: f64) -> u64 {
        let mut losses = 0;
        for node in self.nodes.iter_mut().filter(|node| holders.contains(&node.capturer)) {
            let active = node.stats.active_military;
            if active == 0 {
                continue;
            }
            let loss = ((active as f64 * rate).ceil() as u64).min(active);
            node.stats.active_military = active - loss;
            losses += loss;
        }
        losses
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alliance {
    pub name: String,
    /// Member country codes; unknown codes are tolerated and skipped.
    pub members: Vec<String>,
}

impl Alliance {
    pub fn contains(&self, code: &str) -> bool {
        self.members.iter().any(|member| member == code)
    }
}

#[derive(Debug, Clone, Default, Resource)]
pub struct AllianceRegistry {
    alliances: Vec<Alliance>,
}

impl AllianceRegistry {
    pub fn new(alliances: Vec<Alliance>) -> Self {
        Self { alliances }
    }

    pub fn push(&mut self, alliance: Alliance) {
        self.alliances.push(alliance);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Alliance> {
        self.alliances.iter()
    }

    pub fn len(&self) -> usize {
        self.alliances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alliances.is_empty()
    }

    pub fn containing<'a>(&'a self, code: &'a str) -> impl Iterator<Item = &'a Alliance> + 'a {
        self.alliances.iter().filter(move |alliance| alliance.contains(code))
    }

    pub fn is_member(&self, code: &str) -> bool {
        self.containing(code).next().is_some()
    }

    /// Every member code that does not resolve to a registered country.
    pub fn reference_gaps(&self, registry: &CountryRegistry) -> Vec<SimError> {
        self.alliances
            .iter()
            .flat_map(|alliance| {
                alliance
                    .members
                    .iter()
                    .filter(|member| registry.lookup(member).is_none())
                    .map(|member| SimError::ReferenceGap {
                        alliance: alliance.name.clone(),
                        member: member.clone(),
                    })
            })
            .collect()
    }
}
