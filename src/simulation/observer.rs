//! Shared observer snapshot structures exported via the API.

use serde::Serialize;

use crate::simulation::{
    ActiveWars, CalendarDate, CountryId, CountryRegistry, SuccessGrade, WarOutcome, WarSide,
    WorldEvent, WorldEventLog, round_up_hundredths,
};

#[derive(Debug, Clone, Serialize)]
pub struct CountrySnapshot {
    pub id: CountryId,
    pub code: String,
    pub name: String,
    pub population: u64,
    pub active_military: u64,
    pub reserve_military: u64,
    pub fertility_rate: f64,
    pub mortality_male_adults: f64,
    pub mortality_female_adults: f64,
    pub lifespan: f64,
    pub democracy_index: f64,
    pub gdp: f64,
    pub nuclear_weapons: u64,
    pub nodes: usize,
    pub captured_nodes: usize,
    pub geoeconomic_power: f64,
    pub grade: SuccessGrade,
}

#[derive(Debug, Clone, Serialize)]
pub struct WarSnapshot {
    pub attackers: Vec<String>,
    pub defenders: Vec<String>,
    pub attackers_leader: String,
    pub defenders_leader: String,
    pub declared_on: CalendarDate,
    pub duration_ticks: u64,
    pub attackers_percentage: f64,
    pub defenders_percentage: f64,
    pub outcome: Option<WarOutcome>,
}

#[derive(Debug, Clone, Serialize, Default)]
pub struct ObserverSnapshot {
    pub tick: u64,
    pub date: CalendarDate,
    pub countries: Vec<CountrySnapshot>,
    pub wars: Vec<WarSnapshot>,
    pub events: Vec<WorldEvent>,
    pub news: Vec<String>,
    pub log: Vec<String>,
    pub ticker: String,
}

fn names(registry: &CountryRegistry, ids: &[CountryId]) -> Vec<String> {
    ids.iter().map(|id| registry.name_of(*id).to_string()).collect()
}

impl ObserverSnapshot {
    pub fn capture(
        tick: u64,
        date: CalendarDate,
        registry: &CountryRegistry,
        wars: &ActiveWars,
        events: &WorldEventLog,
    ) -> Self {
        let countries = registry
            .iter()
            .map(|country| {
                let averages = registry.display_averages(country.id);
                let power = country.calculate_geoeconomic_power();
                CountrySnapshot {
                    id: country.id,
                    code: country.code.clone(),
                    name: country.name.clone(),
                    population: registry.population(country.id),
                    active_military: registry.held_active_military(country.id),
                    reserve_military: registry.reserve_military(country.id),
                    fertility_rate: averages
                        .map(|a| a.fertility_rate)
                        .unwrap_or(country.stats.fertility_rate),
                    mortality_male_adults: averages
                        .map(|a| a.mortality_male_adults)
                        .unwrap_or(country.stats.mortality_male_adults),
                    mortality_female_adults: averages
                        .map(|a| a.mortality_female_adults)
                        .unwrap_or(country.stats.mortality_female_adults),
                    lifespan: averages.map(|a| a.lifespan).unwrap_or(country.stats.lifespan),
                    democracy_index: country.stats.democracy_index,
                    gdp: country.stats.gdp,
                    nuclear_weapons: country.stats.nuclear_weapons,
                    nodes: country.node_amount(),
                    captured_nodes: country.captured_nodes.len(),
                    geoeconomic_power: round_up_hundredths(power),
                    grade: SuccessGrade::from_score(power),
                }
            })
            .collect();

        let wars = wars
            .iter()
            .map(|war| WarSnapshot {
                attackers: names(registry, &war.attackers),
                defenders: names(registry, &war.defenders),
                attackers_leader: registry.name_of(war.attackers_leader).to_string(),
                defenders_leader: registry.name_of(war.defenders_leader).to_string(),
                declared_on: war.declared_on,
                duration_ticks: war.duration_ticks,
                attackers_percentage: war.calculate_percentage(WarSide::Attackers, registry),
                defenders_percentage: war.calculate_percentage(WarSide::Defenders, registry),
                outcome: war.outcome,
            })
            .collect();

        Self {
            tick,
            date,
            countries,
            wars,
            events: events.snapshot(),
            news: events.news(),
            log: events.log_lines(),
            ticker: events.ticker_text(),
        }
    }

    pub fn country(&self, code: &str) -> Option<&CountrySnapshot> {
        self.countries.iter().find(|country| country.code == code)
    }
}
