use std::cmp::Ordering;

use rand::Rng;

use crate::simulation::{ConflictType, CountryId, CountryRegistry, Decision, SimError};

#[derive(Debug)]
pub enum ActionOutcome {
    /// The action took effect; carries the feed message.
    Applied(String),
    /// The escalation gate refused the action.
    Refused(SimError),
}

#[derive(Debug)]
pub struct GeoeconomicReport {
    pub actor: CountryId,
    pub target: CountryId,
    pub decision: Decision,
    pub outcome: ActionOutcome,
}

/// Ranks every other country by how exposed it is to `actor`, most
/// vulnerable first. Ties keep registry order.
pub fn rank_targets(registry: &CountryRegistry, actor: CountryId) -> Vec<(CountryId, f64)> {
    let Some(actor_country) = registry.get(actor) else {
        return Vec::new();
    };
    let mut ranked: Vec<(CountryId, f64)> = registry
        .iter()
        .filter(|country| country.id != actor)
        .map(|country| (country.id, actor_country.assess_dependency(country).vulnerability))
        .collect();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    ranked
}

/// Picks the most vulnerable rival, runs the decision tree under a random
/// conflict type and applies the chosen tool. Returns `None` when there is
/// nobody to act against.
pub fn ai_make_geoeconomic_decision<R: Rng + ?Sized>(
    registry: &mut CountryRegistry,
    actor: CountryId,
    enforce_gate: bool,
    rng: &mut R,
) -> Option<GeoeconomicReport> {
    let (target, _) = rank_targets(registry, actor).into_iter().next()?;
    let conflict_type = ConflictType::random(rng);

    let (decision, gate, actor_name, target_name) = {
        let actor_country = registry.get(actor)?;
        let target_country = registry.get(target)?;
        let decision = actor_country.geoeconomic_decision_tree(target_country, conflict_type, rng);
        let gate = if enforce_gate {
            let current = actor_country.escalation_level(target);
            actor_country.check_escalation(current, decision.tool.tier.level())
        } else {
            Ok(())
        };
        (
            decision,
            gate,
            actor_country.name.clone(),
            target_country.name.clone(),
        )
    };

    if let Err(error) = gate {
        return Some(GeoeconomicReport {
            actor,
            target,
            decision,
            outcome: ActionOutcome::Refused(error),
        });
    }

    let applied = registry
        .get_mut(actor)?
        .apply_action(target, &decision.tool.action);
    if !applied {
        return None;
    }

    let message = format!(
        "{} applied {} against {}: {}",
        actor_name,
        decision.tool.action.label(),
        target_name,
        decision.rationale
    );
    Some(GeoeconomicReport {
        actor,
        target,
        decision,
        outcome: ActionOutcome::Applied(message),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::{Demographics, GeoeconomicProfile, Sector};
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn registry() -> CountryRegistry {
        let mut registry = CountryRegistry::new();
        for (code, gdp, cohesion) in [("AAA", 100.0, 0.9), ("BBB", 50.0, 0.1), ("CCC", 500.0, 0.9)] {
            let mut geoeconomics = GeoeconomicProfile::baseline(gdp);
            geoeconomics.coalition.alliance_cohesion = cohesion;
            let stats = Demographics {
                population: 100,
                gdp,
                ..Demographics::default()
            };
            registry.insert(code, code, stats, geoeconomics, 1);
        }
        registry
    }

    #[test]
    fn test_rank_targets_most_vulnerable_first() {
        let registry = registry();
        let ranked = rank_targets(&registry, CountryId(0));
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].0, CountryId(1));
        assert!(ranked[0].1 >= ranked[1].1);
    }

    #[test]
    fn test_decision_applies_tariff_and_reports() {
        let mut registry = registry();
        let mut rng = SmallRng::seed_from_u64(17);

        let report = ai_make_geoeconomic_decision(&mut registry, CountryId(0), true, &mut rng)
            .expect("a target exists");

        assert_eq!(report.target, CountryId(1));
        let ActionOutcome::Applied(message) = &report.outcome else {
            panic!("signaling tariff should always pass the gate");
        };
        assert!(message.starts_with("AAA applied tariff against BBB: AAA faces a "));
        assert!(message.ends_with("Selected signaling in trade domain using tariff tool."));

        let actor = registry.get(CountryId(0)).unwrap();
        assert_eq!(
            actor.geoeconomics.trade.tariffs[&Sector::Manufacturing][&CountryId(1)],
            0.1
        );
    }

    #[test]
    fn test_lonely_country_does_nothing() {
        let mut registry = CountryRegistry::new();
        let solo = registry.insert(
            "SOL",
            "Solo",
            Demographics::default(),
            GeoeconomicProfile::baseline(0.0),
            1,
        );
        let mut rng = SmallRng::seed_from_u64(1);
        assert!(ai_make_geoeconomic_decision(&mut registry, solo, true, &mut rng).is_none());
    }
}
