use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Unsupported document format: {0}")]
    UnsupportedFormat(String),
    #[error("OCR error: {0}")]
    Ocr(String),
    #[error("Image processing error: {0}")]
    ImageProcessing(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Invalid document type: {0}")]
    InvalidDocumentType(String),
    #[error("File too large: {name} is {size} bytes (limit {limit})")]
    FileTooLarge { name: String, size: u64, limit: u64 },
}
