//! Demographic and economic attributes shared by countries and their nodes.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::simulation::HOURS_PER_YEAR;

/// Mortality rates are quoted per 1000 adults per year; halving twice more
/// turns them into a per-tick event probability.
const MORTALITY_DIVISOR: f64 = 2000.0;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Demographics {
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
}

/// Changes applied to a node by one demographic step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NodeStep {
    pub births: u64,
    pub male_deaths: u64,
    pub female_deaths: u64,
}

impl Demographics {
    /// Expected births this tick, used both as the trigger probability and
    /// the rounded birth count.
    pub fn growth_chance(&self) -> f64 {
        if self.lifespan <= 0.0 {
            return 0.0;
        }
        let women = (self.population as f64 * 0.5).floor();
        (self.fertility_rate / (HOURS_PER_YEAR * self.lifespan)) * women
    }

    pub fn male_death_rate(&self) -> f64 {
        self.mortality_male_adults / MORTALITY_DIVISOR
    }

    pub fn female_death_rate(&self) -> f64 {
        self.mortality_female_adults / MORTALITY_DIVISOR
    }

    fn expected_deaths(&self, rate: f64) -> u64 {
        let deaths = (rate * (self.population as f64 * 0.5) / HOURS_PER_YEAR).round();
        if deaths.is_finite() && deaths > 0.0 {
            deaths as u64
        } else {
            0
        }
    }

    /// Applies one tick of stochastic growth and decay in place.
    pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) -> NodeStep {
        let mut step = NodeStep::default();

        let growth_chance = self.growth_chance();
        if rng.gen_range(0.0..1.0) < growth_chance {
            // Fractional chances still register one birth when they fire.
            if growth_chance < 1.0 {
                step.births += 1;
            }
            step.births += growth_chance.round() as u64;
            self.population = self.population.saturating_add(step.births);
        }

        // Both estimates use the post-birth population.
        let male_rate = self.male_death_rate();
        let female_rate = self.female_death_rate();
        let male_deaths = self.expected_deaths(male_rate);
        let female_deaths = self.expected_deaths(female_rate);

        if rng.gen_range(0.0..1.0) < male_rate {
            step.male_deaths = male_deaths;
            self.population = self.population.saturating_sub(male_deaths);
        }

        if rng.gen_range(0.0..1.0) < female_rate {
            step.female_deaths = female_deaths;
            self.population = self.population.saturating_sub(female_deaths);
        }

        step
    }

    /// Adds every field of `other` into `self`; rates are summed too and
    /// averaged later by [`Demographics::averaged`].
    pub fn accumulate(&mut self, other: &Demographics) {
        self.population += other.population;
        self.active_military += other.active_military;
        self.reserve_military += other.reserve_military;
        self.fertility_rate += other.fertility_rate;
        self.mortality_male_adults += other.mortality_male_adults;
        self.mortality_female_adults += other.mortality_female_adults;
        self.lifespan += other.lifespan;
        self.democracy_index += other.democracy_index;
        self.gdp += other.gdp;
        self.nuclear_weapons += other.nuclear_weapons;
    }

    /// Turns accumulated rate sums into means. Callers guarantee `count > 0`.
    pub fn averaged(mut self, count: usize) -> Self {
        let count = count as f64;
        self.fertility_rate /= count;
        self.mortality_male_adults /= count;
        self.mortality_female_adults /= count;
        self.lifespan /= count;
        self.democracy_index /= count;
        self
    }

    /// Splits country totals evenly over `parts` nodes. Integer remainders go
    /// to the first nodes; rates are copied unchanged.
    pub fn split(&self, parts: usize) -> Vec<Demographics> {
        if parts == 0 {
            return Vec::new();
        }

        let share = |total: u64, index: usize| {
            let n = parts as u64;
            total / n + u64::from((index as u64) < total % n)
        };

        (0..parts)
            .map(|index| Demographics {
                population: share(self.population, index),
                active_military: share(self.active_military, index),
                reserve_military: share(self.reserve_military, index),
                nuclear_weapons: share(self.nuclear_weapons, index),
                gdp: self.gdp / parts as f64,
                ..*self
            })
            .collect()
    }
}

/// Rounds up to two decimals for display.
pub fn round_up_hundredths(value: f64) -> f64 {
    (value * 100.0).ceil() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use rand::rngs::mock::StepRng;

    fn node(population: u64) -> Demographics {
        Demographics {
            population,
            active_military: 100,
            reserve_military: 50,
            fertility_rate: 2.1,
            mortality_male_adults: 0.0,
            mortality_female_adults: 0.0,
            lifespan: 75.0,
            democracy_index: 6.0,
            gdp: 1_000.0,
            nuclear_weapons: 0,
        }
    }

    #[test]
    fn test_growth_chance_for_large_node() {
        let stats = node(1_000_000);
        let chance = stats.growth_chance();
        assert!((chance - 1.5971).abs() < 0.001, "chance was {chance}");
    }

    #[test]
    fn test_large_chance_adds_rounded_births_only() {
        let mut stats = node(1_000_000);
        let mut rng = SmallRng::seed_from_u64(7);
        let step = stats.step(&mut rng);
        // Any draw in [0, 1) is below 1.597, so the birth branch always fires.
        assert_eq!(step.births, 2);
        assert_eq!(stats.population, 1_000_002);
    }

    #[test]
    fn test_fractional_chance_registers_one_birth() {
        let mut stats = node(1_000);
        stats.mortality_male_adults = 100.0;
        stats.mortality_female_adults = 80.0;
        // Every draw is 0.0, so every event fires.
        let mut rng = StepRng::new(0, 0);
        let step = stats.step(&mut rng);
        assert_eq!(step.births, 1);
        assert_eq!(step.male_deaths, 0);
        assert_eq!(stats.population, 1_001);
    }

    #[test]
    fn test_deaths_applied_when_triggered() {
        let mut stats = node(100_000_000);
        stats.fertility_rate = 0.0;
        stats.mortality_male_adults = 200.0;
        stats.mortality_female_adults = 100.0;
        let mut rng = StepRng::new(0, 0);
        let step = stats.step(&mut rng);
        // 0.1 * 50,000,000 / 8766 and 0.05 * 50,000,000 / 8766
        assert_eq!(step.male_deaths, 570);
        assert_eq!(step.female_deaths, 285);
        assert_eq!(stats.population, 100_000_000 - 570 - 285);
    }

    #[test]
    fn test_zero_lifespan_never_grows() {
        let mut stats = node(10_000);
        stats.lifespan = 0.0;
        assert_eq!(stats.growth_chance(), 0.0);
        let mut rng = StepRng::new(0, 0);
        stats.step(&mut rng);
        assert_eq!(stats.population, 10_000);
    }

    #[test]
    fn test_split_preserves_totals() {
        let mut stats = node(1_003);
        stats.nuclear_weapons = 5;
        let parts = stats.split(4);
        assert_eq!(parts.len(), 4);
        assert_eq!(parts.iter().map(|p| p.population).sum::<u64>(), 1_003);
        assert_eq!(parts.iter().map(|p| p.nuclear_weapons).sum::<u64>(), 5);
        assert_eq!(parts[0].population, 251);
        assert_eq!(parts[3].population, 250);
        assert!(parts.iter().all(|p| p.fertility_rate == 2.1));
        assert!((parts.iter().map(|p| p.gdp).sum::<f64>() - 1_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_accumulate_then_average() {
        let mut total = Demographics::default();
        let mut a = node(10);
        a.lifespan = 70.0;
        let mut b = node(20);
        b.lifespan = 80.0;
        total.accumulate(&a);
        total.accumulate(&b);
        let avg = total.averaged(2);
        assert_eq!(avg.population, 30);
        assert_eq!(avg.lifespan, 75.0);
    }

    #[test]
    fn test_round_up_hundredths() {
        assert_eq!(round_up_hundredths(2.101), 2.11);
        assert_eq!(round_up_hundredths(2.1), 2.1);
    }
}
