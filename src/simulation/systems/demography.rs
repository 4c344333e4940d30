use rand::Rng;
use tracing::warn;

use crate::simulation::{CountryId, CountryRegistry};

/// Births and deaths on every node of one country, then fresh aggregates.
/// Returns false when the country had to be skipped.
pub fn update_country_demographics<R: Rng + ?Sized>(
    registry: &mut CountryRegistry,
    country: CountryId,
    rng: &mut R,
) -> bool {
    match registry.update_country(country, rng) {
        Ok(()) => true,
        Err(error) => {
            warn!(%error, "demographic update skipped");
            false
        }
    }
}
