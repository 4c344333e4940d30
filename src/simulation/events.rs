//! Structured world events plus the bounded news ticker and dated log.

use std::collections::VecDeque;

use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};

use crate::simulation::{CalendarDate, WarOutcome};

pub const TICKER_SEPARATOR: &str = "    \u{2022}    ";

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WorldEventKind {
    WorldInitialized {
        countries: usize,
    },
    WarDeclared {
        initiator: String,
        target: String,
        attackers: usize,
        defenders: usize,
    },
    WarEnded {
        attackers_leader: String,
        defenders_leader: String,
        outcome: WarOutcome,
        duration_ticks: u64,
    },
    GeoeconomicAction {
        actor: String,
        target: String,
        tool: String,
        message: String,
    },
    EscalationRefused {
        actor: String,
        target: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

#[derive(Debug, Clone, Serialize)]
pub struct WorldEvent {
    pub tick: u64,
    pub date: CalendarDate,
    pub kind: WorldEventKind,
}

impl WorldEvent {
    pub fn new(tick: u64, date: CalendarDate, kind: WorldEventKind) -> Self {
        Self { tick, date, kind }
    }

    pub fn category(&self) -> &'static str {
        match &self.kind {
            WorldEventKind::WorldInitialized { .. } => "World",
            WorldEventKind::WarDeclared { .. } => "War",
            WorldEventKind::WarEnded { .. } => "Peace",
            WorldEventKind::GeoeconomicAction { .. } => "Geoeconomics",
            WorldEventKind::EscalationRefused { .. } => "Policy",
        }
    }

    pub fn sentiment(&self) -> Sentiment {
        match &self.kind {
            WorldEventKind::WorldInitialized { .. } => Sentiment::Neutral,
            WorldEventKind::WarDeclared { .. } => Sentiment::Negative,
            WorldEventKind::WarEnded { .. } => Sentiment::Positive,
            WorldEventKind::GeoeconomicAction { .. } => Sentiment::Negative,
            WorldEventKind::EscalationRefused { .. } => Sentiment::Neutral,
        }
    }

    pub fn headline(&self) -> String {
        match &self.kind {
            WorldEventKind::WorldInitialized { countries } => {
                format!("Simulation initialized with {} countries", countries)
            }
            WorldEventKind::WarDeclared {
                initiator, target, ..
            } => format!("{} declared war on {}", initiator, target),
            WorldEventKind::WarEnded {
                attackers_leader,
                defenders_leader,
                outcome,
                ..
            } => format!(
                "War between {} and {} ended in {}",
                attackers_leader,
                defenders_leader,
                outcome.label()
            ),
            WorldEventKind::GeoeconomicAction { message, .. } => message.clone(),
            WorldEventKind::EscalationRefused {
                actor,
                target,
                reason,
            } => format!("{} held back against {}: {}", actor, target, reason),
        }
    }
}

/// Full event history for observers, plus the two bounded text feeds.
#[derive(Debug, Resource)]
pub struct WorldEventLog {
    events: VecDeque<WorldEvent>,
    capacity: usize,
    news: VecDeque<String>,
    news_capacity: usize,
    log: VecDeque<String>,
    log_capacity: usize,
    recorded: u64,
}

impl WorldEventLog {
    pub fn new(capacity: usize, news_capacity: usize, log_capacity: usize) -> Self {
        Self {
            events: VecDeque::with_capacity(capacity),
            capacity,
            news: VecDeque::with_capacity(news_capacity),
            news_capacity,
            log: VecDeque::with_capacity(log_capacity),
            log_capacity,
            recorded: 0,
        }
    }

    fn push_bounded<T>(queue: &mut VecDeque<T>, capacity: usize, item: T) {
        if capacity == 0 {
            return;
        }
        if queue.len() == capacity {
            queue.pop_front();
        }
        queue.push_back(item);
    }

    /// Records an event: the headline goes to the ticker and, dated, to the log.
    pub fn push(&mut self, event: WorldEvent) {
        let headline = event.headline();
        Self::push_bounded(&mut self.news, self.news_capacity, headline.clone());
        Self::push_bounded(
            &mut self.log,
            self.log_capacity,
            format!("{}: {}", event.date, headline),
        );
        Self::push_bounded(&mut self.events, self.capacity, event);
        self.recorded += 1;
    }

    pub fn snapshot(&self) -> Vec<WorldEvent> {
        self.events.iter().cloned().collect()
    }

    /// Events pushed after the `recorded` count was `seen`, oldest first.
    /// Events already rotated out are skipped.
    pub fn since(&self, seen: u64) -> impl Iterator<Item = &WorldEvent> {
        let fresh = self.recorded.saturating_sub(seen).min(self.events.len() as u64) as usize;
        self.events.iter().skip(self.events.len() - fresh)
    }

    pub fn news(&self) -> Vec<String> {
        self.news.iter().cloned().collect()
    }

    pub fn log_lines(&self) -> Vec<String> {
        self.log.iter().cloned().collect()
    }

    pub fn ticker_text(&self) -> String {
        self.news.iter().map(String::as_str).collect::<Vec<_>>().join(TICKER_SEPARATOR)
    }

    /// Total events ever pushed, including those rotated out.
    pub fn recorded(&self) -> u64 {
        self.recorded
    }
}

impl Default for WorldEventLog {
    fn default() -> Self {
        Self::new(256, 10, 100)
    }
}
