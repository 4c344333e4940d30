pub mod clock;
pub mod demography;
pub mod geoeconomy;
pub mod logging;
pub mod turn;
pub mod warfare;

pub use clock::*;
pub use demography::*;
pub use geoeconomy::*;
pub use logging::*;
pub use turn::*;
pub use warfare::*;
