//! Per-country geoeconomic posture. Every section is populated when the
//! country is built, so readers never deal with missing data.

use std::collections::{BTreeMap, BTreeSet};

use rand::Rng;
use serde::Serialize;

use crate::simulation::CountryId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Sector {
    Manufacturing,
    Technology,
    Agriculture,
    Energy,
    Services,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Commodity {
    RareEarths,
    Oil,
    Lithium,
    Cobalt,
    Nickel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CurrencyRegime {
    Floating,
    Managed,
    Pegged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TechTier {
    Basic,
    DualUse,
    Advanced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SanctionKind {
    Capital,
    Bond,
    Coordinated,
}

#[derive(Debug, Clone, Serialize)]
pub struct TradeProfile {
    /// Sector -> target -> tariff rate in `[0, 1]`.
    pub tariffs: BTreeMap<Sector, BTreeMap<CountryId, f64>>,
    pub elasticity: f64,
    pub dependency_scores: BTreeMap<CountryId, f64>,
    pub trade_volume: f64,
    /// Sector -> subsidy as a share of GDP.
    pub subsidies: BTreeMap<Sector, f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FinanceProfile {
    pub currency_regime: CurrencyRegime,
    pub fx_reserves: f64,
    pub confidence_index: f64,
    pub debt_level: f64,
    pub sanctions: BTreeMap<CountryId, BTreeSet<SanctionKind>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResourceProfile {
    pub critical_minerals: BTreeSet<Commodity>,
    pub seasonal_vulnerability: f64,
    pub production: f64,
    /// Commodity -> target -> restriction level in `[0, 1]`.
    pub export_restrictions: BTreeMap<Commodity, BTreeMap<CountryId, f64>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TechnologyProfile {
    pub chokepoint_dependence: BTreeMap<String, f64>,
    pub tech_exports: f64,
    pub innovation_index: f64,
    pub export_restrictions: BTreeMap<CountryId, TechTier>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NarrativeProfile {
    pub media_influence: f64,
    pub soft_power: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct LegalProfile {
    pub regulatory_capacity: f64,
    pub dispute_settlement: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CoalitionProfile {
    pub alliance_cohesion: f64,
    pub coordinated_sanctions: BTreeSet<CountryId>,
    pub members: BTreeSet<CountryId>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MarketAccessProfile {
    pub tariff_barriers: f64,
    pub non_tariff_barriers: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SupplyChainProfile {
    pub critical_nodes: f64,
    pub diversification: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct EnergyProfile {
    pub energy_independence: f64,
    pub renewable_share: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DigitalInfrastructureProfile {
    pub cyber_security: f64,
    pub internet_penetration: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct GeoeconomicProfile {
    pub trade: TradeProfile,
    pub finance: FinanceProfile,
    pub resources: ResourceProfile,
    pub technology: TechnologyProfile,
    pub narrative: NarrativeProfile,
    pub legal: LegalProfile,
    pub coalition: CoalitionProfile,
    pub market_access: MarketAccessProfile,
    pub supply_chain: SupplyChainProfile,
    pub energy: EnergyProfile,
    pub digital_infrastructure: DigitalInfrastructureProfile,
}

fn default_minerals() -> BTreeSet<Commodity> {
    [Commodity::Lithium, Commodity::Cobalt, Commodity::Nickel]
        .into_iter()
        .collect()
}

impl GeoeconomicProfile {
    /// Draws a randomized posture. FX reserves start at a tenth of GDP.
    pub fn generate<R: Rng + ?Sized>(gdp: f64, rng: &mut R) -> Self {
        let mut unit = || rng.gen_range(0.0..1.0);

        Self {
            trade: TradeProfile {
                tariffs: BTreeMap::new(),
                elasticity: unit() * 2.0 + 0.5,
                dependency_scores: BTreeMap::new(),
                trade_volume: unit() * 1_000.0 + 100.0,
                subsidies: BTreeMap::new(),
            },
            finance: FinanceProfile {
                currency_regime: CurrencyRegime::Managed,
                fx_reserves: gdp * 0.1,
                confidence_index: unit() * 100.0,
                debt_level: unit() * 200.0,
                sanctions: BTreeMap::new(),
            },
            resources: ResourceProfile {
                critical_minerals: default_minerals(),
                seasonal_vulnerability: unit(),
                production: unit() * 100.0,
                export_restrictions: BTreeMap::new(),
            },
            technology: TechnologyProfile {
                chokepoint_dependence: BTreeMap::new(),
                tech_exports: unit() * 500.0,
                innovation_index: unit() * 100.0,
                export_restrictions: BTreeMap::new(),
            },
            narrative: NarrativeProfile {
                media_influence: unit() * 100.0,
                soft_power: unit() * 100.0,
            },
            legal: LegalProfile {
                regulatory_capacity: unit() * 100.0,
                dispute_settlement: unit() * 100.0,
            },
            coalition: CoalitionProfile {
                alliance_cohesion: unit(),
                coordinated_sanctions: BTreeSet::new(),
                members: BTreeSet::new(),
            },
            market_access: MarketAccessProfile {
                tariff_barriers: unit() * 50.0,
                non_tariff_barriers: unit() * 50.0,
            },
            supply_chain: SupplyChainProfile {
                critical_nodes: unit() * 20.0,
                diversification: unit() * 100.0,
            },
            energy: EnergyProfile {
                energy_independence: unit() * 100.0,
                renewable_share: unit() * 100.0,
            },
            digital_infrastructure: DigitalInfrastructureProfile {
                cyber_security: unit() * 100.0,
                internet_penetration: unit() * 100.0,
            },
        }
    }

    /// A neutral posture with every score at zero, used for hand-built worlds.
    pub fn baseline(gdp: f64) -> Self {
        Self {
            trade: TradeProfile {
                tariffs: BTreeMap::new(),
                elasticity: 1.0,
                dependency_scores: BTreeMap::new(),
                trade_volume: 0.0,
                subsidies: BTreeMap::new(),
            },
            finance: FinanceProfile {
                currency_regime: CurrencyRegime::Managed,
                fx_reserves: gdp * 0.1,
                confidence_index: 0.0,
                debt_level: 0.0,
                sanctions: BTreeMap::new(),
            },
            resources: ResourceProfile {
                critical_minerals: default_minerals(),
                seasonal_vulnerability: 0.0,
                production: 0.0,
                export_restrictions: BTreeMap::new(),
            },
            technology: TechnologyProfile {
                chokepoint_dependence: BTreeMap::new(),
                tech_exports: 0.0,
                innovation_index: 0.0,
                export_restrictions: BTreeMap::new(),
            },
            narrative: NarrativeProfile {
                media_influence: 0.0,
                soft_power: 0.0,
            },
            legal: LegalProfile {
                regulatory_capacity: 0.0,
                dispute_settlement: 0.0,
            },
            coalition: CoalitionProfile {
                alliance_cohesion: 0.0,
                coordinated_sanctions: BTreeSet::new(),
                members: BTreeSet::new(),
            },
            market_access: MarketAccessProfile {
                tariff_barriers: 0.0,
                non_tariff_barriers: 0.0,
            },
            supply_chain: SupplyChainProfile {
                critical_nodes: 0.0,
                diversification: 0.0,
            },
            energy: EnergyProfile {
                energy_independence: 0.0,
                renewable_share: 0.0,
            },
            digital_infrastructure: DigitalInfrastructureProfile {
                cyber_security: 0.0,
                internet_penetration: 0.0,
            },
        }
    }

    /// Number of sectors carrying a tariff against `target`.
    pub fn tariff_sectors_against(&self, target: CountryId) -> usize {
        self.trade
            .tariffs
            .values()
            .filter(|targets| targets.contains_key(&target))
            .count()
    }

    pub fn has_coordinated_sanction(&self, target: CountryId) -> bool {
        self.coalition.coordinated_sanctions.contains(&target)
    }
}
