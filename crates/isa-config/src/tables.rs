//! ISA-Tab table discovery and cell interpretation.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

fn default_investigation_glob() -> String {
    String::from("i_*.txt")
}

fn default_study_glob() -> String {
    String::from("s_*")
}

fn default_assay_glob() -> String {
    String::from("a_*")
}

fn default_missing_value_markers() -> Vec<String> {
    ["nan", "NaN", "NA", "N/A"]
        .into_iter()
        .map(String::from)
        .collect()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TablesConfig {
    /// File-name pattern of the investigation file.
    #[serde(default = "default_investigation_glob")]
    pub investigation_glob: String,

    /// File-name pattern of study (sample) tables.
    #[serde(default = "default_study_glob")]
    pub study_glob: String,

    /// File-name pattern of assay tables.
    #[serde(default = "default_assay_glob")]
    pub assay_glob: String,

    /// Cell contents treated as missing, in addition to the empty cell.
    #[serde(default = "default_missing_value_markers")]
    pub missing_value_markers: Vec<String>,
}

impl Default for TablesConfig {
    fn default() -> Self {
        Self {
            investigation_glob: default_investigation_glob(),
            study_glob: default_study_glob(),
            assay_glob: default_assay_glob(),
            missing_value_markers: default_missing_value_markers(),
        }
    }
}

impl TablesConfig {
    /// Whether a trimmed cell holds no value.
    #[must_use]
    pub fn is_missing(&self, cell: &str) -> bool {
        let cell = cell.trim();
        cell.is_empty() || self.missing_value_markers.iter().any(|marker| marker == cell)
    }

    /// Reject patterns that could never select a file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for a blank glob or one that
    /// does not compile.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("tables.investigation_glob", &self.investigation_glob),
            ("tables.study_glob", &self.study_glob),
            ("tables.assay_glob", &self.assay_glob),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    reason: "pattern must not be empty".to_string(),
                });
            }
            if let Err(error) = globset::Glob::new(value) {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    reason: error.to_string(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = TablesConfig::default();
        assert_eq!(config.investigation_glob, "i_*.txt");
        assert_eq!(config.study_glob, "s_*");
        assert_eq!(config.assay_glob, "a_*");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_and_marker_cells_are_missing() {
        let config = TablesConfig::default();
        assert!(config.is_missing(""));
        assert!(config.is_missing("   "));
        assert!(config.is_missing("nan"));
        assert!(config.is_missing(" NA "));
        assert!(!config.is_missing("file1.mzml"));
        assert!(!config.is_missing("none"));
    }

    #[test]
    fn blank_glob_is_rejected() {
        let config = TablesConfig {
            assay_glob: " ".into(),
            ..TablesConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field, .. }) if field == "tables.assay_glob"
        ));
    }

    #[test]
    fn malformed_glob_is_rejected() {
        let config = TablesConfig {
            study_glob: "s_[".into(),
            ..TablesConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field, .. }) if field == "tables.study_glob"
        ));
    }
}
