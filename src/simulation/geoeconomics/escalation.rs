use std::fmt;

use serde::Serialize;

use crate::simulation::{Country, CountryId, Result, SimError};

/// Cohesion a country needs before climbing above sectoral pressure.
pub const HIGH_ESCALATION_COHESION: f64 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EscalationTier {
    Signaling,
    TargetedFriction,
    SectoralPressure,
    SystemicExclusion,
    StructuralLockout,
    FreezeAndContainment,
}

pub const ESCALATION_LADDER: [EscalationTier; 6] = [
    EscalationTier::Signaling,
    EscalationTier::TargetedFriction,
    EscalationTier::SectoralPressure,
    EscalationTier::SystemicExclusion,
    EscalationTier::StructuralLockout,
    EscalationTier::FreezeAndContainment,
];

impl EscalationTier {
    pub fn level(self) -> u8 {
        self as u8
    }

    pub fn from_level(level: u8) -> Option<Self> {
        ESCALATION_LADDER.get(level as usize).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            EscalationTier::Signaling => "Signaling",
            EscalationTier::TargetedFriction => "Targeted Friction",
            EscalationTier::SectoralPressure => "Sectoral Pressure",
            EscalationTier::SystemicExclusion => "Systemic Exclusion",
            EscalationTier::StructuralLockout => "Structural Lock-out",
            EscalationTier::FreezeAndContainment => "Freeze & Containment",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            EscalationTier::Signaling => "Verbal warnings, diplomatic notes, market signals",
            EscalationTier::TargetedFriction => {
                "Minor trade barriers, selective regulatory delays"
            }
            EscalationTier::SectoralPressure => "Sector-specific tariffs, export controls",
            EscalationTier::SystemicExclusion => {
                "Financial sanctions, payment system restrictions"
            }
            EscalationTier::StructuralLockout => {
                "Technology decoupling, supply chain redirection"
            }
            EscalationTier::FreezeAndContainment => "Total embargo, comprehensive sanctions",
        }
    }
}

impl fmt::Display for EscalationTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Country {
    /// Current rung against `target`: each tariffed sector counts one, a
    /// coordinated sanction counts two, halved and capped at the top rung.
    pub fn escalation_level(&self, target: CountryId) -> u8 {
        let tariffs = self.geoeconomics.tariff_sectors_against(target);
        let sanctions = usize::from(self.geoeconomics.has_coordinated_sanction(target));
        ((tariffs + sanctions * 2) / 2).min(5) as u8
    }

    pub fn is_escalation_allowed(&self, current: u8, requested: u8) -> bool {
        if u16::from(requested) > u16::from(current) + 1 {
            return false;
        }
        if requested > EscalationTier::SectoralPressure.level()
            && self.geoeconomics.coalition.alliance_cohesion < HIGH_ESCALATION_COHESION
        {
            return false;
        }
        true
    }

    pub fn check_escalation(&self, current: u8, requested: u8) -> Result<()> {
        if self.is_escalation_allowed(current, requested) {
            Ok(())
        } else {
            Err(SimError::PolicyViolation {
                current,
                requested,
                cohesion: self.geoeconomics.coalition.alliance_cohesion,
            })
        }
    }
}
