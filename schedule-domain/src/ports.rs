// Source and Store Port Traits (Interfaces)
// Define what the domain needs from infrastructure

pub mod sources;
pub mod stores;

pub use sources::*;
pub use stores::*;
