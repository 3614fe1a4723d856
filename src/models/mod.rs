pub mod config;
pub mod data;

pub use config::ExtractorConfig;
pub use data::*;
