// Domain value objects
pub mod event_time;
pub mod home_or_away;
pub mod identifiers;

pub use event_time::*;
pub use home_or_away::*;
pub use identifiers::*;
