// Loading documents from disk.

use std::fs;
use std::path::Path;

use log::debug;

use crate::models::{DocumentSource, DocumentType, ExtractorConfig, RawDocument};
use crate::processing::image::ImageProcessor;
use crate::utils::ExtractError;

pub const ALLOWED_EXTENSIONS: &[&str] = &["pdf", "jpg", "jpeg", "png", "txt"];

/// Read `path` into a [`RawDocument`]. The document type is detected from the
/// file name when not given.
pub fn load_document(
    path: &Path,
    id: impl Into<String>,
    document_type: Option<DocumentType>,
    config: &ExtractorConfig,
) -> Result<RawDocument, ExtractError> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(ExtractError::UnsupportedFormat(format!(
            "{} is not a supported format. Please use PDF, JPG, PNG or TXT.",
            name
        )));
    }

    let size = fs::metadata(path)?.len();
    if size > config.max_file_size_bytes {
        return Err(ExtractError::FileTooLarge {
            name,
            size,
            limit: config.max_file_size_bytes,
        });
    }

    let document_type = document_type.unwrap_or_else(|| DocumentType::detect_from_name(&name));
    let source = match extension.as_str() {
        "txt" => DocumentSource::Text(fs::read_to_string(path)?),
        "pdf" => DocumentSource::Pdf(fs::read(path)?),
        _ => {
            let bytes = fs::read(path)?;
            if !ImageProcessor::is_raster(&bytes) {
                return Err(ExtractError::UnsupportedFormat(format!(
                    "{} is not a readable image",
                    name
                )));
            }
            DocumentSource::Image(bytes)
        }
    };

    debug!("Loaded {} as {} ({} bytes)", name, document_type, size);
    Ok(RawDocument::new(id, name, document_type, source))
}

/// Read any file as already-recognized text, regardless of extension.
pub fn load_transcript(
    path: &Path,
    id: impl Into<String>,
    document_type: Option<DocumentType>,
    config: &ExtractorConfig,
) -> Result<RawDocument, ExtractError> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string();
    let size = fs::metadata(path)?.len();
    if size > config.max_file_size_bytes {
        return Err(ExtractError::FileTooLarge {
            name,
            size,
            limit: config.max_file_size_bytes,
        });
    }
    let text = fs::read_to_string(path)?;
    let document_type = document_type.unwrap_or_else(|| DocumentType::detect_from_name(&name));
    Ok(RawDocument::new(id, name, document_type, DocumentSource::Text(text)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    fn write(dir: &Path, name: &str, bytes: &[u8]) -> std::path::PathBuf {
        let path = dir.join(name);
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(bytes).unwrap();
        path
    }

    #[test]
    fn test_text_file_with_detected_type() {
        let dir = tempdir().unwrap();
        let path = write(dir.path(), "my_aadhaar_front.txt", b"DOB: 01/01/1990");
        let doc = load_document(&path, "1", None, &ExtractorConfig::default()).unwrap();
        assert_eq!(doc.document_type, DocumentType::Aadhaar);
        assert_eq!(doc.name, "my_aadhaar_front.txt");
        assert!(matches!(doc.source, DocumentSource::Text(ref t) if t == "DOB: 01/01/1990"));
    }

    #[test]
    fn test_explicit_type_wins() {
        let dir = tempdir().unwrap();
        let path = write(dir.path(), "aadhaar.txt", b"x");
        let config = ExtractorConfig::default();
        let doc = load_document(&path, "1", Some(DocumentType::Passport), &config).unwrap();
        assert_eq!(doc.document_type, DocumentType::Passport);
    }

    #[test]
    fn test_rejects_unknown_extension() {
        let dir = tempdir().unwrap();
        let path = write(dir.path(), "scan.gif", b"GIF89a");
        let err = load_document(&path, "1", None, &ExtractorConfig::default()).unwrap_err();
        assert!(matches!(err, ExtractError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_rejects_oversized_file() {
        let dir = tempdir().unwrap();
        let path = write(dir.path(), "pan.txt", b"ABCDE1234F");
        let config = ExtractorConfig {
            max_file_size_bytes: 4,
            ..ExtractorConfig::default()
        };
        let err = load_document(&path, "1", None, &config).unwrap_err();
        assert!(matches!(err, ExtractError::FileTooLarge { size: 10, limit: 4, .. }));
    }

    #[test]
    fn test_rejects_corrupt_image() {
        let dir = tempdir().unwrap();
        let path = write(dir.path(), "photo.png", b"definitely not a png");
        assert!(load_document(&path, "1", None, &ExtractorConfig::default()).is_err());
    }

    #[test]
    fn test_transcript_ignores_extension() {
        let dir = tempdir().unwrap();
        let path = write(dir.path(), "pan_ocr.out", b"ABCDE1234F");
        let doc = load_transcript(&path, "7", None, &ExtractorConfig::default()).unwrap();
        assert_eq!(doc.document_type, DocumentType::Pan);
        assert!(matches!(doc.source, DocumentSource::Text(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let path = Path::new("/nonexistent/pan.txt");
        let err = load_document(path, "1", None, &ExtractorConfig::default()).unwrap_err();
        assert!(matches!(err, ExtractError::Io(_)));
    }
}
