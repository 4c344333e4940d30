use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::simulation::{Demographics, GeoeconomicProfile, Node, NodeId, Result, SimError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CountryId(pub u32);

impl CountryId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Country {
    pub id: CountryId,
    /// Short external code such as `USA`; alliances reference countries by it.
    pub code: String,
    pub name: String,
    pub nodes: Vec<NodeId>,
    /// Nodes of other countries this country currently holds.
    pub captured_nodes: Vec<NodeId>,
    /// Aggregates over `nodes`, rewritten only by [`Country::update`].
    pub stats: Demographics,
    pub geoeconomics: GeoeconomicProfile,
}

impl Country {
    pub fn node_amount(&self) -> usize {
        self.nodes.len()
    }

    /// Steps every owned node, then rebuilds the country aggregates from them.
    ///
    /// A country without nodes is left untouched and reported as a data
    /// integrity problem.
    pub fn update<R: Rng + ?Sized>(&mut self, nodes: &mut [Node], rng: &mut R) -> Result<()> {
        let node_amount = self.node_amount();
        if node_amount == 0 || self.nodes.iter().any(|id| id.index() >= nodes.len()) {
            return Err(SimError::DataIntegrity {
                country: self.code.clone(),
            });
        }

        let mut totals = Demographics::default();
        for id in &self.nodes {
            let node = &mut nodes[id.index()];
            node.stats.step(rng);
            totals.accumulate(&node.stats);
        }

        self.stats = totals.averaged(node_amount);
        Ok(())
    }
}
