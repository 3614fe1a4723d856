use log::debug;

use crate::models::DocumentSource;
use crate::utils::ExtractError;

/// Turns a document source into raw text.
pub trait OcrEngine: Send + Sync {
    fn recognize(&self, source: &DocumentSource) -> Result<String, ExtractError>;

    fn name(&self) -> &'static str;
}

/// PDFs must be rasterized by the caller before OCR.
fn unrasterized_pdf() -> ExtractError {
    ExtractError::UnsupportedFormat(
        "PDF documents must be rasterized to an image before OCR".to_string(),
    )
}

/// Engine for text that has already been recognized elsewhere.
#[derive(Debug, Default, Clone, Copy)]
pub struct PassthroughOcr;

impl OcrEngine for PassthroughOcr {
    fn recognize(&self, source: &DocumentSource) -> Result<String, ExtractError> {
        match source {
            DocumentSource::Text(text) => Ok(text.clone()),
            DocumentSource::Pdf(_) => Err(unrasterized_pdf()),
            DocumentSource::Image(_) => Err(ExtractError::Ocr(
                "no OCR engine available for images; build with the `tesseract` feature"
                    .to_string(),
            )),
        }
    }

    fn name(&self) -> &'static str {
        "passthrough"
    }
}

#[cfg(feature = "tesseract")]
pub use self::tesseract_engine::TesseractOcr;

#[cfg(feature = "tesseract")]
mod tesseract_engine {
    use std::io::Write;

    use log::debug;
    use tesseract::{PageSegMode, Tesseract};

    use super::{unrasterized_pdf, OcrEngine};
    use crate::models::DocumentSource;
    use crate::processing::image::ImageProcessor;
    use crate::utils::ExtractError;

    const CHAR_WHITELIST: &str =
        "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789 /-.,";

    /// Tesseract-backed engine.
    pub struct TesseractOcr {
        language: String,
    }

    impl TesseractOcr {
        pub fn new(language: impl Into<String>) -> Self {
            TesseractOcr { language: language.into() }
        }

        fn recognize_image(&self, image_bytes: &[u8]) -> Result<String, ExtractError> {
            if !ImageProcessor::is_raster(image_bytes) {
                return Err(ExtractError::UnsupportedFormat("unrecognized image data".to_string()));
            }
            let processed = ImageProcessor::preprocess(image_bytes)?;

            let mut temp_file = tempfile::Builder::new()
                .suffix(".png")
                .tempfile()
                .map_err(|e| ExtractError::Ocr(format!("Failed to create temporary file: {}", e)))?;
            temp_file
                .write_all(&processed)
                .map_err(|e| ExtractError::Ocr(format!("Failed to write temporary file: {}", e)))?;
            let path_str = temp_file
                .path()
                .to_str()
                .ok_or_else(|| ExtractError::Ocr("Could not convert path to string".to_string()))?;

            let mut tess = Tesseract::new(None, Some(self.language.as_str()))
                .map_err(|e| ExtractError::Ocr(format!("Failed to initialize Tesseract: {}", e)))?
                .set_variable("tessedit_char_whitelist", CHAR_WHITELIST)
                .map_err(|e| {
                    ExtractError::Ocr(format!("Failed to set Tesseract variable: {}", e))
                })?;

            // uniform block of text
            tess.set_page_seg_mode(PageSegMode::PsmSingleBlock);

            tess = tess
                .set_image(path_str)
                .map_err(|e| ExtractError::Ocr(format!("Failed to set image: {}", e)))?;

            let text = tess
                .get_text()
                .map_err(|e| ExtractError::Ocr(format!("Failed to extract text: {}", e)))?;
            debug!("Tesseract returned {} characters", text.len());
            Ok(text)
        }
    }

    impl OcrEngine for TesseractOcr {
        fn recognize(&self, source: &DocumentSource) -> Result<String, ExtractError> {
            match source {
                DocumentSource::Text(text) => Ok(text.clone()),
                DocumentSource::Image(bytes) => self.recognize_image(bytes),
                DocumentSource::Pdf(_) => Err(unrasterized_pdf()),
            }
        }

        fn name(&self) -> &'static str {
            "tesseract"
        }
    }
}

/// Log-friendly summary of what an engine was handed.
pub fn describe_source(source: &DocumentSource) -> String {
    let summary = format!("{} ({} bytes)", source.kind(), source.len());
    debug!("OCR input: {}", summary);
    summary
}
