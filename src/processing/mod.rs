pub mod address;
pub mod context;
pub mod document_parser;
pub mod extractors;
pub mod image;
pub mod ingest;
pub mod merger;
pub mod name;
pub mod normalizer;
pub mod ocr;
pub mod patterns;
pub mod strategy;

pub use context::ExtractionContext;
pub use document_parser::{parse_text, DocumentParser};
pub use image::ImageProcessor;
pub use ingest::{load_document, load_transcript};
pub use merger::{merge, merge_fields};
pub use ocr::{OcrEngine, PassthroughOcr};
#[cfg(feature = "tesseract")]
pub use ocr::TesseractOcr;
pub use strategy::StrategyFamily;
