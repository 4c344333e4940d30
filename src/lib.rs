//! Geopolitical sandbox: countries split into demographic nodes, alliances,
//! wars and a geoeconomic escalation model, advanced one simulated day per tick.

pub mod api;
pub mod runner;
pub mod simulation;
