pub mod http_source;
pub mod ics_feed;

pub use http_source::*;
pub use ics_feed::*;
