use serde::Serialize;

use crate::simulation::{Commodity, Country, CountryId, SanctionKind, Sector, TechTier};

/// Every instrument a country can use, with its parameters.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "tool", rename_all = "snake_case")]
pub enum GeoeconomicAction {
    Tariff { sector: Sector, rate: f64 },
    ExportControl { resource: Commodity, restriction: f64 },
    CapitalControl,
    InvestmentScreening,
    CoordinatedSanction,
    ExportRestriction { resource: Commodity, restriction: f64 },
    ExportLicenseRestriction,
    Subsidy { sector: Sector, amount: f64 },
}

impl GeoeconomicAction {
    pub fn label(&self) -> &'static str {
        match self {
            GeoeconomicAction::Tariff { .. } => "tariff",
            GeoeconomicAction::ExportControl { .. } => "export_control",
            GeoeconomicAction::CapitalControl => "capital_control",
            GeoeconomicAction::InvestmentScreening => "investment_screening",
            GeoeconomicAction::CoordinatedSanction => "coordinated_sanction",
            GeoeconomicAction::ExportRestriction { .. } => "export_restriction",
            GeoeconomicAction::ExportLicenseRestriction => "export_license_restriction",
            GeoeconomicAction::Subsidy { .. } => "subsidy",
        }
    }

    pub fn tariff() -> Self {
        GeoeconomicAction::Tariff {
            sector: Sector::Manufacturing,
            rate: 0.15,
        }
    }

    pub fn export_control() -> Self {
        GeoeconomicAction::ExportControl {
            resource: Commodity::RareEarths,
            restriction: 0.5,
        }
    }

    pub fn export_restriction() -> Self {
        GeoeconomicAction::ExportRestriction {
            resource: Commodity::Oil,
            restriction: 0.6,
        }
    }

    pub fn subsidy() -> Self {
        GeoeconomicAction::Subsidy {
            sector: Sector::Technology,
            amount: 0.05,
        }
    }
}

impl Country {
    /// Routes an action to the matching instrument. Returns whether it took effect.
    pub fn apply_action(&mut self, target: CountryId, action: &GeoeconomicAction) -> bool {
        match *action {
            GeoeconomicAction::Tariff { sector, rate } => self.impose_tariff(target, sector, rate),
            GeoeconomicAction::ExportControl {
                resource,
                restriction,
            }
            | GeoeconomicAction::ExportRestriction {
                resource,
                restriction,
            } => self.restrict_resource_exports(target, resource, restriction),
            GeoeconomicAction::CapitalControl => {
                self.apply_financial_sanction(target, SanctionKind::Capital)
            }
            GeoeconomicAction::InvestmentScreening => {
                self.apply_financial_sanction(target, SanctionKind::Bond)
            }
            GeoeconomicAction::CoordinatedSanction => {
                self.apply_financial_sanction(target, SanctionKind::Coordinated)
            }
            GeoeconomicAction::ExportLicenseRestriction => {
                self.restrict_technology_exports(target, TechTier::Advanced)
            }
            GeoeconomicAction::Subsidy { sector, amount } => self.subsidize_sector(sector, amount),
        }
    }

    pub fn impose_tariff(&mut self, target: CountryId, sector: Sector, rate: f64) -> bool {
        self.geoeconomics
            .trade
            .tariffs
            .entry(sector)
            .or_default()
            .insert(target, rate.clamp(0.0, 1.0));
        true
    }

    pub fn restrict_resource_exports(
        &mut self,
        target: CountryId,
        resource: Commodity,
        restriction: f64,
    ) -> bool {
        self.geoeconomics
            .resources
            .export_restrictions
            .entry(resource)
            .or_default()
            .insert(target, restriction.clamp(0.0, 1.0));
        true
    }

    /// Coordinated sanctions also join the coalition's sanction list, which
    /// feeds the escalation level.
    pub fn apply_financial_sanction(&mut self, target: CountryId, kind: SanctionKind) -> bool {
        self.geoeconomics
            .finance
            .sanctions
            .entry(target)
            .or_default()
            .insert(kind);
        if kind == SanctionKind::Coordinated {
            self.geoeconomics.coalition.coordinated_sanctions.insert(target);
        }
        true
    }

    pub fn restrict_technology_exports(&mut self, target: CountryId, tier: TechTier) -> bool {
        self.geoeconomics
            .technology
            .export_restrictions
            .insert(target, tier);
        true
    }

    pub fn subsidize_sector(&mut self, sector: Sector, amount: f64) -> bool {
        self.geoeconomics.trade.subsidies.insert(sector, amount.max(0.0));
        true
    }
}
