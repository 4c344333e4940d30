//! Colorized world pulse logging for quick CLI scanning.

use bevy_ecs::prelude::*;
use colored::{Color, Colorize};
use tracing::info;

use crate::simulation::{
    ActiveWars, CalendarDate, CountryRegistry, WorldCalendar, WorldEvent, WorldEventKind, WorldEventLog,
    WorldTime, category_color, format_number_commas, outcome_color, sentiment_color,
    sentiment_label,
};

fn badge(label: &str, color: Color) -> String {
    format!("[{}]", label).color(color).to_string()
}

fn format_event_line(event: &WorldEvent) -> String {
    let category_badge = badge(event.category(), category_color(event.category()));
    let sentiment = event.sentiment();
    let sentiment_badge = badge(sentiment_label(sentiment), sentiment_color(sentiment));
    let tick_badge = badge(&format!("Tick {}", event.tick), Color::BrightBlack);
    let date_badge = badge(&event.date.to_string(), Color::BrightBlue);
    let prefix = format!(
        "{} {} {} {}",
        category_badge, sentiment_badge, tick_badge, date_badge
    );

    match &event.kind {
        WorldEventKind::WorldInitialized { countries } => format!(
            "{} {} countries on the map",
            prefix,
            countries.to_string().bold()
        ),
        WorldEventKind::WarDeclared {
            initiator,
            target,
            attackers,
            defenders,
        } => format!(
            "{} {} declares war on {} | {} vs {} countries",
            prefix,
            initiator.color(Color::BrightRed).bold(),
            target.color(Color::BrightYellow).bold(),
            attackers,
            defenders
        ),
        WorldEventKind::WarEnded {
            attackers_leader,
            defenders_leader,
            outcome,
            duration_ticks,
        } => format!(
            "{} {} vs {} ends {} after {} days",
            prefix,
            attackers_leader.bold(),
            defenders_leader.bold(),
            badge(outcome.label(), outcome_color(*outcome)),
            format_number_commas(*duration_ticks)
        ),
        WorldEventKind::GeoeconomicAction {
            actor,
            target,
            tool,
            ..
        } => format!(
            "{} {} uses {} against {}",
            prefix,
            actor.color(Color::BrightCyan).bold(),
            badge(tool, Color::Cyan),
            target.bold()
        ),
        WorldEventKind::EscalationRefused {
            actor,
            target,
            reason,
        } => format!(
            "{} {} held back against {} | {}",
            prefix,
            actor.bold(),
            target.bold(),
            reason.color(Color::Yellow)
        ),
    }
}

/// Header plus one line per event pushed since `seen`; empty when nothing new.
fn pulse_lines(
    seen: u64,
    tick: u64,
    date: CalendarDate,
    registry: &CountryRegistry,
    wars: &ActiveWars,
    events: &WorldEventLog,
) -> Vec<String> {
    let mut lines: Vec<String> = events.since(seen).map(format_event_line).collect();
    if lines.is_empty() {
        return lines;
    }

    let population: u64 = registry.iter().map(|country| registry.population(country.id)).sum();
    let header = format!(
        "{} {} {} {} {}",
        badge("World", Color::BrightWhite),
        badge(&format!("Tick {}", tick), Color::BrightBlack),
        badge(&date.to_string(), Color::BrightBlue),
        badge(&format!("Population {}", format_number_commas(population)), Color::BrightGreen),
        badge(&format!("Wars {}", wars.len()), Color::Red),
    );
    lines.insert(0, header);
    lines
}

/// Prints the events recorded since the previous pass. Events pushed between
/// ticks, such as the initial headline or a manual declaration, come out on
/// the next pass.
pub fn logging_system(
    mut seen: Local<u64>,
    time: Res<WorldTime>,
    calendar: Res<WorldCalendar>,
    registry: Res<CountryRegistry>,
    wars: Res<ActiveWars>,
    events: Res<WorldEventLog>,
) {
    let lines = pulse_lines(*seen, time.tick, calendar.date, &registry, &wars, &events);
    *seen = events.recorded();
    if !lines.is_empty() {
        info!("\n{}", lines.join("\n"));
    }
}
