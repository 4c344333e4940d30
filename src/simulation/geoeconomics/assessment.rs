//! Threat classification, dependency assessment, the decision tree and the
//! aggregate power score.

use std::fmt;

use rand::Rng;
use serde::Serialize;

use crate::simulation::{Country, EscalationTier, GeoeconomicAction, Sector};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DependencyAssessment {
    /// Trade dependency already recorded against the target.
    pub existing: f64,
    /// Dependency that could be engineered through resources and technology.
    pub manufacturable: f64,
    pub immunity: f64,
    pub vulnerability: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictType {
    Economic,
    Technological,
    Political,
    Hybrid,
}

impl ConflictType {
    pub const ALL: [ConflictType; 4] = [
        ConflictType::Economic,
        ConflictType::Technological,
        ConflictType::Political,
        ConflictType::Hybrid,
    ];

    /// Unrecognized labels are treated as hybrid conflicts.
    pub fn from_label(label: &str) -> Self {
        match label {
            "economic" => ConflictType::Economic,
            "technological" => ConflictType::Technological,
            "political" => ConflictType::Political,
            _ => ConflictType::Hybrid,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ConflictType::Economic => "economic",
            ConflictType::Technological => "technological",
            ConflictType::Political => "political",
            ConflictType::Hybrid => "hybrid",
        }
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Low,
    Medium,
    High,
}

impl Urgency {
    pub fn from_severity(severity: f64) -> Self {
        if severity > 0.7 {
            Urgency::High
        } else if severity > 0.5 {
            Urgency::Medium
        } else {
            Urgency::Low
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Urgency::Low => "low",
            Urgency::Medium => "medium",
            Urgency::High => "high",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ThreatAssessment {
    pub conflict_type: ConflictType,
    pub severity: f64,
    pub urgency: Urgency,
}

impl ThreatAssessment {
    pub fn new(conflict_type: ConflictType, severity: f64) -> Self {
        Self {
            conflict_type,
            severity,
            urgency: Urgency::from_severity(severity),
        }
    }
}

/// Severity is drawn uniformly from `[0.3, 1.0)`.
pub fn classify_threat<R: Rng + ?Sized>(conflict_type: ConflictType, rng: &mut R) -> ThreatAssessment {
    let severity = rng.gen_range(0.0..1.0) * 0.7 + 0.3;
    ThreatAssessment::new(conflict_type, severity)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyDomain {
    Trade,
    Finance,
    Technology,
    Resources,
    Legal,
    Narrative,
    Coalition,
}

impl PolicyDomain {
    pub fn label(self) -> &'static str {
        match self {
            PolicyDomain::Trade => "trade",
            PolicyDomain::Finance => "finance",
            PolicyDomain::Technology => "tech",
            PolicyDomain::Resources => "resources",
            PolicyDomain::Legal => "legal",
            PolicyDomain::Narrative => "narrative",
            PolicyDomain::Coalition => "coalition",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Deniable,
    Overt,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolSelection {
    pub domain: PolicyDomain,
    pub tier: EscalationTier,
    pub scope: Scope,
    pub visibility: Visibility,
    pub action: GeoeconomicAction,
}

impl Default for ToolSelection {
    /// Low-key manufacturing tariff at 10%.
    fn default() -> Self {
        Self {
            domain: PolicyDomain::Trade,
            tier: EscalationTier::Signaling,
            scope: Scope::Low,
            visibility: Visibility::Deniable,
            action: GeoeconomicAction::Tariff {
                sector: Sector::Manufacturing,
                rate: 0.1,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Decision {
    pub threat: ThreatAssessment,
    pub dependency: DependencyAssessment,
    pub tool: ToolSelection,
    pub rationale: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SuccessGrade {
    #[serde(rename = "A+")]
    APlus,
    A,
    B,
    C,
    D,
    F,
}

impl SuccessGrade {
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s >= 90.0 => SuccessGrade::APlus,
            s if s >= 80.0 => SuccessGrade::A,
            s if s >= 70.0 => SuccessGrade::B,
            s if s >= 60.0 => SuccessGrade::C,
            s if s >= 50.0 => SuccessGrade::D,
            _ => SuccessGrade::F,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SuccessGrade::APlus => "A+",
            SuccessGrade::A => "A",
            SuccessGrade::B => "B",
            SuccessGrade::C => "C",
            SuccessGrade::D => "D",
            SuccessGrade::F => "F",
        }
    }
}

impl fmt::Display for SuccessGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn tier_phrase(tier: EscalationTier) -> String {
    tier.name().to_lowercase()
}

impl Country {
    pub fn assess_dependency(&self, target: &Country) -> DependencyAssessment {
        let existing = self
            .geoeconomics
            .trade
            .dependency_scores
            .get(&target.id)
            .copied()
            .unwrap_or(0.0);

        let resource_dependence = target.geoeconomics.resources.seasonal_vulnerability;
        let chokepoints = &target.geoeconomics.technology.chokepoint_dependence;
        let tech_dependence = if chokepoints.is_empty() {
            0.0
        } else {
            chokepoints.values().sum::<f64>() / chokepoints.len() as f64
        };
        let manufacturable = (resource_dependence + tech_dependence) / 2.0;

        let target_gdp = if target.stats.gdp == 0.0 || target.stats.gdp.is_nan() {
            1.0
        } else {
            target.stats.gdp
        };
        let economic_diversity = 1.0 - self.stats.gdp / (target_gdp * 1.5);
        let coalition_strength = target.geoeconomics.coalition.alliance_cohesion;
        let raw = (economic_diversity + coalition_strength) / 2.0;
        let immunity = if raw.is_nan() { 0.0 } else { raw.clamp(0.0, 1.0) };

        DependencyAssessment {
            existing,
            manufacturable,
            immunity,
            vulnerability: (1.0 - immunity).max(0.0),
        }
    }

    /// Classifies the threat, measures the target and settles on a tool.
    /// The tool is currently always the default signaling tariff.
    pub fn geoeconomic_decision_tree<R: Rng + ?Sized>(
        &self,
        target: &Country,
        conflict_type: ConflictType,
        rng: &mut R,
    ) -> Decision {
        let threat = classify_threat(conflict_type, rng);
        let dependency = self.assess_dependency(target);
        let tool = ToolSelection::default();

        let rationale = format!(
            "{} faces a {} {} threat from {}. Target vulnerability: {:.0}%. Selected {} in {} domain using {} tool.",
            self.name,
            threat.urgency.label(),
            threat.conflict_type.label(),
            target.name,
            dependency.vulnerability * 100.0,
            tier_phrase(tool.tier),
            tool.domain.label(),
            tool.action.label(),
        );

        Decision {
            threat,
            dependency,
            tool,
            rationale,
        }
    }

    /// Weighted 0-100 score across the profile's domains.
    pub fn calculate_geoeconomic_power(&self) -> f64 {
        let geo = &self.geoeconomics;
        let gdp = if self.stats.gdp == 0.0 { 1.0 } else { self.stats.gdp };

        let trade = geo.trade.dependency_scores.values().sum::<f64>() * 10.0;
        let finance = geo.finance.confidence_index * 50.0 + (geo.finance.fx_reserves / gdp) * 50.0;
        let technology = geo.technology.innovation_index;
        let resources = (1.0 - geo.resources.seasonal_vulnerability) * 100.0;
        let coalition = geo.coalition.alliance_cohesion * 100.0;
        let energy = geo.energy.energy_independence;
        let digital = geo.digital_infrastructure.cyber_security;
        let supply_chain = geo.supply_chain.diversification;

        let score = trade * 0.2
            + finance * 0.2
            + technology * 0.15
            + resources * 0.1
            + coalition * 0.1
            + energy * 0.1
            + digital * 0.1
            + supply_chain * 0.05;

        if score.is_nan() { 0.0 } else { score.clamp(0.0, 100.0) }
    }

    pub fn success_grade(&self) -> SuccessGrade {
        SuccessGrade::from_score(self.calculate_geoeconomic_power())
    }
}
