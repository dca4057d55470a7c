//! Every knob of the extraction pipeline lives here as plain data.
//!
//! The defaults reproduce the historical behavior of the tool: scan the working directory
//! for `test-output-debug-*.log`, pick the greatest name, collect regions between
//! `PROMPT COMPLET pour <id>` and `FIN PROMPT`, and write `prompts-nuextract-test.md`.
//! A `prompt-extract.json` file in the working directory may override any subset of fields.

use crate::error::{ExtractError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const CONFIG_FILENAME: &str = "prompt-extract.json";

const DEFAULT_PREFIX: &str = "test-output-debug-";
const DEFAULT_SUFFIX: &str = ".log";
const DEFAULT_START_LABEL: &str = "PROMPT COMPLET pour";
const DEFAULT_END_MARKER: &str = "FIN PROMPT";
const DEFAULT_OUTPUT_FILE: &str = "prompts-nuextract-test.md";
const DEFAULT_TITLE: &str = "Prompts NuExtract pour test manuel sur la plateforme SaaS";
const DEFAULT_PLATFORM: &str = "NuExtract.ai";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ExtractConfig {
    pub input: InputConfig,
    pub markers: MarkerConfig,
    pub trailing: TrailingRegion,
    pub document: DocumentConfig,
}

/// Which files count as candidate logs and how one is picked.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct InputConfig {
    pub prefix: String,
    pub suffix: String,
    pub selection: Selection,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            suffix: DEFAULT_SUFFIX.to_string(),
            selection: Selection::default(),
        }
    }
}

impl InputConfig {
    /// Glob-style rendering of the candidate pattern, for messages.
    pub fn pattern(&self) -> String {
        format!("{}*{}", self.prefix, self.suffix)
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Selection {
    /// Greatest file name wins. Relies on a sortable timestamp embedded in the name.
    #[default]
    Name,
    /// Newest modification time wins, ties broken by name.
    Modified,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct MarkerConfig {
    /// Label preceding the region identifier on a start line.
    pub start_label: String,
    pub end_marker: String,
    /// Lines containing any of these are test-runner chatter, never content.
    pub noise: Vec<String>,
    /// Cleaned lines starting with this character are dropped (source locations).
    pub skip_prefix: Option<char>,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            start_label: DEFAULT_START_LABEL.to_string(),
            end_marker: DEFAULT_END_MARKER.to_string(),
            noise: vec![
                "console.log".to_string(),
                "at log".to_string(),
                "at Object".to_string(),
            ],
            skip_prefix: Some('('),
        }
    }
}

/// What happens to a region still open when the input ends.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TrailingRegion {
    #[default]
    Drop,
    Flush,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DocumentConfig {
    pub output_file: String,
    pub title: String,
    pub extraction_date: NaiveDate,
    pub platform: String,
    pub steps: Vec<String>,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            output_file: DEFAULT_OUTPUT_FILE.to_string(),
            title: DEFAULT_TITLE.to_string(),
            extraction_date: NaiveDate::from_ymd_opt(2025, 11, 14).unwrap_or_default(),
            platform: DEFAULT_PLATFORM.to_string(),
            steps: vec![
                "Aller sur https://nuextract.ai".to_string(),
                "Créer un nouveau projet ou utiliser le projet existant".to_string(),
                "Utiliser l'API `/api/projects/{projectId}/infer-text` ou l'interface web"
                    .to_string(),
                "Coller le prompt complet ci-dessous".to_string(),
            ],
        }
    }
}

impl ExtractConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let config_path = dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        Self::from_file(config_path)
    }

    /// Load config from an explicit file. A missing file is an error here.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: ExtractConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Markers that are empty would match every line of the log.
    pub fn validate(&self) -> Result<()> {
        if self.markers.start_label.trim().is_empty() {
            return Err(ExtractError::Config("start_label cannot be empty".into()));
        }
        if self.markers.end_marker.trim().is_empty() {
            return Err(ExtractError::Config("end_marker cannot be empty".into()));
        }
        if self.input.prefix.is_empty() && self.input.suffix.is_empty() {
            return Err(ExtractError::Config(
                "input prefix and suffix cannot both be empty".into(),
            ));
        }
        if self.document.output_file.trim().is_empty() {
            return Err(ExtractError::Config("output_file cannot be empty".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = ExtractConfig::default();
        assert_eq!(config.input.pattern(), "test-output-debug-*.log");
        assert_eq!(config.markers.start_label, "PROMPT COMPLET pour");
        assert_eq!(config.markers.end_marker, "FIN PROMPT");
        assert_eq!(config.trailing, TrailingRegion::Drop);
        assert_eq!(config.input.selection, Selection::Name);
        assert_eq!(config.document.output_file, "prompts-nuextract-test.md");
        assert_eq!(
            config.document.extraction_date.format("%Y-%m-%d").to_string(),
            "2025-11-14"
        );
        assert_eq!(config.document.steps.len(), 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_missing_config() {
        let temp = TempDir::new().unwrap();
        let config = ExtractConfig::load(temp.path()).unwrap();
        assert_eq!(config, ExtractConfig::default());
    }

    #[test]
    fn test_load_partial_config_keeps_defaults() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(CONFIG_FILENAME),
            r#"{
                "trailing": "flush",
                "input": { "selection": "modified" },
                "document": { "extraction_date": "2026-01-02", "output_file": "out.md" }
            }"#,
        )
        .unwrap();

        let config = ExtractConfig::load(temp.path()).unwrap();
        assert_eq!(config.trailing, TrailingRegion::Flush);
        assert_eq!(config.input.selection, Selection::Modified);
        assert_eq!(config.input.prefix, "test-output-debug-");
        assert_eq!(config.document.output_file, "out.md");
        assert_eq!(
            config.document.extraction_date,
            NaiveDate::from_ymd_opt(2026, 1, 2).unwrap()
        );
        assert_eq!(config.document.title, DocumentConfig::default().title);
        assert_eq!(config.markers, MarkerConfig::default());
    }

    #[test]
    fn test_invalid_json_is_serialization_error() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILENAME), "{ not json").unwrap();

        let err = ExtractConfig::load(temp.path()).unwrap_err();
        assert!(matches!(err, ExtractError::Serialization(_)));
    }

    #[test]
    fn test_from_file_missing_is_io_error() {
        let temp = TempDir::new().unwrap();
        let err = ExtractConfig::from_file(temp.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, ExtractError::Io(_)));
    }

    #[test]
    fn test_empty_markers_rejected() {
        let mut config = ExtractConfig::default();
        config.markers.end_marker = "  ".into();
        assert!(matches!(config.validate(), Err(ExtractError::Config(_))));

        let mut config = ExtractConfig::default();
        config.markers.start_label.clear();
        assert!(matches!(config.validate(), Err(ExtractError::Config(_))));

        let mut config = ExtractConfig::default();
        config.input.prefix.clear();
        config.input.suffix.clear();
        assert!(matches!(config.validate(), Err(ExtractError::Config(_))));
    }
}
