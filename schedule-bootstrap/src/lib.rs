pub mod context;
pub mod lifecycle;
pub mod telemetry;

pub use lifecycle::run_once;
pub use telemetry::{init_startup_tracing, init_tracing};
