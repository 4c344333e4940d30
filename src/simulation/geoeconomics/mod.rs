//! Geoeconomic statecraft: dependency assessment, the escalation ladder and
//! the actions countries take against each other.

pub mod actions;
pub mod ai;
pub mod assessment;
pub mod escalation;
pub mod profile;

pub use actions::*;
pub use ai::*;
pub use assessment::*;
pub use escalation::*;
pub use profile::*;
