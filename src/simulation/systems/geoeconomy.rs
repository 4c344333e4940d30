use rand::Rng;
use tracing::{info, warn};

use crate::simulation::{
    ActionOutcome, CalendarDate, CountryId, CountryRegistry, SimulationConfig, WorldEvent,
    WorldEventKind, WorldEventLog, ai_make_geoeconomic_decision,
};

/// Lets one country's AI pick a rival and act, recording the result in the feed.
pub fn run_geoeconomic_turn<R: Rng + ?Sized>(
    registry: &mut CountryRegistry,
    actor: CountryId,
    config: &SimulationConfig,
    tick: u64,
    date: CalendarDate,
    events: &mut WorldEventLog,
    rng: &mut R,
) {
    let Some(report) =
        ai_make_geoeconomic_decision(registry, actor, config.enforce_escalation_gate, rng)
    else {
        return;
    };

    let actor_name = registry.name_of(report.actor).to_string();
    let target_name = registry.name_of(report.target).to_string();

    let kind = match report.outcome {
        ActionOutcome::Applied(message) => {
            info!(target: "geosandbox::geoeconomics", "{}", message);
            WorldEventKind::GeoeconomicAction {
                actor: actor_name,
                target: target_name,
                tool: report.decision.tool.action.label().to_string(),
                message,
            }
        }
        ActionOutcome::Refused(error) => {
            warn!(target: "geosandbox::geoeconomics", actor = %actor_name, target_country = %target_name, %error, "escalation refused");
            WorldEventKind::EscalationRefused {
                actor: actor_name,
                target: target_name,
                reason: error.to_string(),
            }
        }
    };

    events.push(WorldEvent::new(tick, date, kind));
}
