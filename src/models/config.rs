use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::utils::ExtractError;

/// Tunable knobs for the extraction heuristics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Lines before the date-of-birth line searched for a gender marker.
    pub gender_window_before: usize,
    /// Lines after the date-of-birth line searched for a gender marker.
    pub gender_window_after: usize,
    /// Upper bound on lines joined into an Aadhaar address.
    pub max_address_lines: usize,
    pub max_file_size_bytes: u64,
    pub tesseract_language: String,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        ExtractorConfig {
            gender_window_before: 2,
            gender_window_after: 5,
            max_address_lines: 5,
            max_file_size_bytes: 10 * 1024 * 1024,
            tesseract_language: "eng".to_string(),
        }
    }
}

impl ExtractorConfig {
    /// Load a JSON config file. Missing keys fall back to defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ExtractError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| {
                ExtractError::Config(format!("Failed to read {}: {}", path.display(), e))
            })?;
        Self::from_json(&contents)
    }

    pub fn from_json(json: &str) -> Result<Self, ExtractError> {
        let config: ExtractorConfig = serde_json::from_str(json)
            .map_err(|e| ExtractError::Config(format!("Invalid config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ExtractError> {
        if self.max_address_lines == 0 {
            return Err(ExtractError::Config("max_address_lines must be at least 1".to_string()));
        }
        if self.max_file_size_bytes == 0 {
            return Err(ExtractError::Config("max_file_size_bytes must be positive".to_string()));
        }
        if self.tesseract_language.trim().is_empty() {
            return Err(ExtractError::Config("tesseract_language must not be empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = ExtractorConfig::from_json(r#"{ "gender_window_after": 8 }"#).unwrap();
        assert_eq!(config.gender_window_after, 8);
        assert_eq!(config.gender_window_before, 2);
        assert_eq!(config.max_address_lines, 5);
    }

    #[test]
    fn test_rejects_zero_address_lines() {
        let err = ExtractorConfig::from_json(r#"{ "max_address_lines": 0 }"#).unwrap_err();
        assert!(matches!(err, ExtractError::Config(_)));
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "gender_window_before": 1, "tesseract_language": "eng+hin" }}"#
        )
        .unwrap();
        let config = ExtractorConfig::from_file(file.path()).unwrap();
        assert_eq!(config.gender_window_before, 1);
        assert_eq!(config.tesseract_language, "eng+hin");
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = ExtractorConfig::from_file("/nonexistent/idfill.json").unwrap_err();
        assert!(matches!(err, ExtractError::Config(_)));
    }
}
