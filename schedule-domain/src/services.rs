pub mod api_adapter;
pub mod calendar_emitter;
pub mod datetime_resolver;
pub mod ics_adapter;
pub mod pipeline;
pub mod text_classifier;

pub use api_adapter::*;
pub use calendar_emitter::*;
pub use datetime_resolver::*;
pub use ics_adapter::*;
pub use text_classifier::*;
