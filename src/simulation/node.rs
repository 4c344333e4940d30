//! Spatial subdivisions of a country.

use serde::{Deserialize, Serialize};

use crate::simulation::{CountryId, Demographics};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A node is owned by one country for its whole life; `capturer` tracks who
/// currently holds it and equals `country` until a war changes it.
#[derive(Debug, Clone, Serialize)]
pub struct Node {
    pub id: NodeId,
    pub country: CountryId,
    pub capturer: CountryId,
    pub stats: Demographics,
}

impl Node {
    pub fn new(id: NodeId, country: CountryId, stats: Demographics) -> Self {
        Self {
            id,
            country,
            capturer: country,
            stats,
        }
    }

    pub fn is_captured(&self) -> bool {
        self.capturer != self.country
    }
}
