//! War declaration with alliance propagation, and per-tick resolution.

use bevy_ecs::prelude::Resource;
use rand::Rng;
use serde::Serialize;
use tracing::debug;

use crate::simulation::{
    AllianceRegistry, CalendarDate, CountryId, CountryRegistry, NodeId, Result, SimError, WarRules,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WarSide {
    Attackers,
    Defenders,
}

impl WarSide {
    pub fn opposite(self) -> Self {
        match self {
            WarSide::Attackers => WarSide::Defenders,
            WarSide::Defenders => WarSide::Attackers,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WarOutcome {
    AttackersVictory,
    DefendersVictory,
    WhitePeace,
}

impl WarOutcome {
    pub fn label(self) -> &'static str {
        match self {
            WarOutcome::AttackersVictory => "attackers victory",
            WarOutcome::DefendersVictory => "defenders victory",
            WarOutcome::WhitePeace => "white peace",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NodeCapture {
    pub node: NodeId,
    pub from: CountryId,
    pub to: CountryId,
}

/// What one resolution pass changed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WarReport {
    pub captures: Vec<NodeCapture>,
    pub outcome: Option<WarOutcome>,
}

#[derive(Debug, Clone, Serialize)]
pub struct War {
    pub attackers: Vec<CountryId>,
    pub defenders: Vec<CountryId>,
    pub attackers_leader: CountryId,
    pub defenders_leader: CountryId,
    pub declared_on: CalendarDate,
    pub duration_ticks: u64,
    pub past_war: bool,
    pub outcome: Option<WarOutcome>,
}

/// Collects one side: the seed country plus every resolvable member of each
/// alliance it belongs to. Leader is the first country with the highest GDP.
fn rally(
    registry: &CountryRegistry,
    alliances: &AllianceRegistry,
    seed: CountryId,
) -> Result<(Vec<CountryId>, CountryId)> {
    let seed_country = registry
        .get(seed)
        .ok_or_else(|| SimError::UnknownCountry(format!("#{}", seed.0)))?;

    let mut side = vec![seed];
    let mut leader = seed;
    let mut leader_gdp = seed_country.stats.gdp;

    for alliance in alliances.containing(&seed_country.code) {
        for member in &alliance.members {
            let Some(id) = registry.lookup(member) else {
                debug!(alliance = %alliance.name, member = %member, "skipping unresolved alliance member");
                continue;
            };
            if !side.contains(&id) {
                side.push(id);
            }
            if let Some(country) = registry.get(id) {
                if country.stats.gdp > leader_gdp {
                    leader = id;
                    leader_gdp = country.stats.gdp;
                }
            }
        }
    }

    Ok((side, leader))
}

pub fn declare_war(
    registry: &CountryRegistry,
    alliances: &AllianceRegistry,
    initiator: CountryId,
    target: CountryId,
) -> Result<War> {
    let (attackers, attackers_leader) = rally(registry, alliances, initiator)?;
    let (defenders, defenders_leader) = rally(registry, alliances, target)?;

    Ok(War {
        attackers,
        defenders,
        attackers_leader,
        defenders_leader,
        declared_on: CalendarDate::default(),
        duration_ticks: 0,
        past_war: false,
        outcome: None,
    })
}

impl War {
    pub fn dated(mut self, date: CalendarDate) -> Self {
        self.declared_on = date;
        self
    }

    pub fn side(&self, side: WarSide) -> &[CountryId] {
        match side {
            WarSide::Attackers => &self.attackers,
            WarSide::Defenders => &self.defenders,
        }
    }

    pub fn leader(&self, side: WarSide) -> CountryId {
        match side {
            WarSide::Attackers => self.attackers_leader,
            WarSide::Defenders => self.defenders_leader,
        }
    }

    /// True when `a` and `b` already fight on opposite sides.
    pub fn opposes(&self, a: CountryId, b: CountryId) -> bool {
        (self.attackers.contains(&a) && self.defenders.contains(&b))
            || (self.attackers.contains(&b) && self.defenders.contains(&a))
    }

    /// Share (in percent, two decimals) of the opposing side's own nodes
    /// currently held by `side`. Countries listed on both sides are not
    /// counted as opponents.
    pub fn calculate_percentage(&self, side: WarSide, registry: &CountryRegistry) -> f64 {
        let ours = self.side(side);
        let theirs = self.side(side.opposite());

        let mut total = 0usize;
        let mut held = 0usize;
        for country in theirs.iter().filter(|id| !ours.contains(id)) {
            let Some(country) = registry.get(*country) else {
                continue;
            };
            for node_id in &country.nodes {
                total += 1;
                if registry
                    .node(*node_id)
                    .is_some_and(|node| ours.contains(&node.capturer))
                {
                    held += 1;
                }
            }
        }

        if total == 0 {
            return 0.0;
        }
        let percentage = held as f64 / total as f64 * 100.0;
        (percentage * 100.0).round() / 100.0
    }

    fn strength(&self, side: WarSide, registry: &CountryRegistry) -> u64 {
        self.side(side)
            .iter()
            .map(|id| registry.held_active_military(*id))
            .sum()
    }

    /// Picks a node held by the losing side that the winners do not already hold.
    fn capture_target<R: Rng + ?Sized>(
        &self,
        winner: WarSide,
        registry: &CountryRegistry,
        rng: &mut R,
    ) -> Option<NodeId> {
        let winners = self.side(winner);
        let losers = self.side(winner.opposite());
        let candidates: Vec<NodeId> = registry
            .nodes()
            .iter()
            .filter(|node| losers.contains(&node.capturer) && !winners.contains(&node.capturer))
            .map(|node| node.id)
            .collect();
        if candidates.is_empty() {
            return None;
        }
        Some(candidates[rng.gen_range(0..candidates.len())])
    }

    /// One resolution pass: battles, attrition, then the end conditions.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        registry: &mut CountryRegistry,
        rules: &WarRules,
        rng: &mut R,
    ) -> WarReport {
        let mut report = WarReport::default();
        if self.past_war {
            return report;
        }
        self.duration_ticks += 1;

        for _ in 0..rules.battles_per_tick {
            let attack = self.strength(WarSide::Attackers, registry);
            let defence = self.strength(WarSide::Defenders, registry);
            if attack == 0 || defence == 0 {
                break;
            }

            let odds = attack as f64 / (attack + defence) as f64;
            let winner = if rng.gen_bool(odds.clamp(0.0, 1.0)) {
                WarSide::Attackers
            } else {
                WarSide::Defenders
            };

            let Some(node_id) = self.capture_target(winner, registry, rng) else {
                continue;
            };
            // Nodes whose owner fights with the winners are liberated, not annexed.
            let to = match registry.node(node_id) {
                Some(node) if self.side(winner).contains(&node.country) => node.country,
                _ => self.leader(winner),
            };
            if let Some(from) = registry.transfer_node(node_id, to) {
                debug!(node = node_id.0, from = from.0, to = to.0, "node captured");
                report.captures.push(NodeCapture {
                    node: node_id,
                    from,
                    to,
                });
            }
        }

        let mut belligerents = self.attackers.clone();
        belligerents.extend(self.defenders.iter().copied());
        registry.apply_attrition(&belligerents, rules.attrition_rate);

        let attack = self.strength(WarSide::Attackers, registry);
        let defence = self.strength(WarSide::Defenders, registry);
        let outcome = if self.calculate_percentage(WarSide::Attackers, registry)
            >= rules.victory_percentage
        {
            Some(WarOutcome::AttackersVictory)
        } else if self.calculate_percentage(WarSide::Defenders, registry)
            >= rules.victory_percentage
        {
            Some(WarOutcome::DefendersVictory)
        } else if attack == 0 && defence == 0 {
            Some(WarOutcome::WhitePeace)
        } else if defence == 0 {
            Some(WarOutcome::AttackersVictory)
        } else if attack == 0 {
            Some(WarOutcome::DefendersVictory)
        } else if self.duration_ticks >= rules.max_duration_ticks {
            Some(WarOutcome::WhitePeace)
        } else {
            None
        };

        if let Some(outcome) = outcome {
            self.past_war = true;
            self.outcome = Some(outcome);
            report.outcome = Some(outcome);
        }
        report
    }
}

#[derive(Debug, Default, Resource)]
pub struct ActiveWars {
    wars: Vec<War>,
}

impl ActiveWars {
    pub fn push(&mut self, war: War) {
        self.wars.push(war);
    }

    pub fn len(&self) -> usize {
        self.wars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wars.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &War> {
        self.wars.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut War> {
        self.wars.iter_mut()
    }

    pub fn involves_pair(&self, a: CountryId, b: CountryId) -> bool {
        self.wars.iter().any(|war| !war.past_war && war.opposes(a, b))
    }

    /// Removes and returns every war that has ended.
    pub fn prune(&mut self) -> Vec<War> {
        let (ended, ongoing): (Vec<War>, Vec<War>) =
            std::mem::take(&mut self.wars).into_iter().partition(|war| war.past_war);
        self.wars = ongoing;
        ended
    }
}
