pub mod models;
pub mod pipeline;
pub mod processing;
pub mod utils;
pub mod validation;

pub use pipeline::{DocumentExtractor, ExtractionSession, Generation};
