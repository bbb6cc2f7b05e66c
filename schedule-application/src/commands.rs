// Application commands
pub mod collect_commands;
pub mod publish_commands;

pub use collect_commands::*;
pub use publish_commands::*;
