// Application queries
pub mod schedule_queries;

pub use schedule_queries::*;
