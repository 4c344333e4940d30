//! Shared resources and world-level tuning tables.

use std::time::Duration;

use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};

use crate::simulation::CalendarDate;

/// Average hours in a year; births and deaths are sampled at hourly resolution.
pub const HOURS_PER_YEAR: f64 = 8766.0;

/// Additive terms of the per-pair war probability.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WarTriggerTable {
    /// Target democracy index below the hostility threshold.
    pub autocratic_target: f64,
    /// Target democracy index above the hostility threshold.
    pub democratic_target: f64,
    /// Target is nuclear-armed while the aggressor is not.
    pub nuclear_deterrence: f64,
    /// Aggressor GDP exceeds target GDP.
    pub richer_aggressor: f64,
    /// Target belongs to at least one alliance.
    pub allied_target: f64,
    /// Target belongs to no alliance.
    pub unaligned_target: f64,
}

impl Default for WarTriggerTable {
    fn default() -> Self {
        Self {
            autocratic_target: 0.000_000_1,
            democratic_target: 0.000_000_05,
            nuclear_deterrence: -0.000_000_2,
            richer_aggressor: 0.000_000_1,
            allied_target: -0.000_000_05,
            unaligned_target: 0.000_000_1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WarRules {
    /// Node-capture rolls per war per tick.
    pub battles_per_tick: u32,
    /// Share of active military lost per tick on every node held by a belligerent.
    pub attrition_rate: f64,
    /// Percentage of the opposing side's nodes that must be held to win.
    pub victory_percentage: f64,
    /// Wars still running after this many ticks end in a white peace.
    pub max_duration_ticks: u64,
}

impl Default for WarRules {
    fn default() -> Self {
        Self {
            battles_per_tick: 1,
            attrition_rate: 0.0005,
            victory_percentage: 60.0,
            max_duration_ticks: 3_650,
        }
    }
}

#[derive(Debug, Clone, Resource)]
pub struct SimulationConfig {
    pub tick_duration: Duration,
    pub seed: u64,
    pub start_date: CalendarDate,
    /// Chance per country per tick of running the geoeconomic AI.
    pub geoeconomic_decision_chance: f64,
    /// Countries with a democracy index below this value scan for wars.
    pub hostile_democracy_threshold: f64,
    pub war_triggers: WarTriggerTable,
    pub war_rules: WarRules,
    /// Skip declarations between countries already at war with each other.
    pub suppress_duplicate_wars: bool,
    /// Refuse geoeconomic actions the escalation ladder does not allow.
    pub enforce_escalation_gate: bool,
    /// Structured events kept for observers.
    pub event_capacity: usize,
    pub news_capacity: usize,
    pub log_capacity: usize,
    /// Nodes shared out across all countries when the seed gives no explicit counts.
    pub total_node_budget: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_duration: Duration::from_millis(200),
            seed: 2021,
            start_date: CalendarDate::default(),
            geoeconomic_decision_chance: 0.05,
            hostile_democracy_threshold: 4.0,
            war_triggers: WarTriggerTable::default(),
            war_rules: WarRules::default(),
            suppress_duplicate_wars: false,
            enforce_escalation_gate: true,
            event_capacity: 256,
            news_capacity: 10,
            log_capacity: 100,
            total_node_budget: 10_000,
        }
    }
}

#[derive(Debug, Clone, Resource, Serialize, Deserialize, Default)]
pub struct WorldTime {
    pub tick: u64,
}
