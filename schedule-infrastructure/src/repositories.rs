pub mod output_files;
pub mod team_catalog;

pub use output_files::*;
pub use team_catalog::*;
