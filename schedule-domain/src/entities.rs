// Domain entities
pub mod event;
pub mod feed_entry;
pub mod runtime_config;
pub mod schedule_node;
pub mod team;

pub use event::*;
pub use feed_entry::*;
pub use runtime_config::*;
pub use schedule_node::*;
pub use team::*;
