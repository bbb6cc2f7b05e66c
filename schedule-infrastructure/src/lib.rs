pub mod config;
pub mod repositories;
pub mod sources;
pub mod utils;

pub use config::*;
pub use repositories::*;
pub use sources::*;
pub use utils::*;
