use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::bulk::EmptyCandidates;
use crate::data::sort::SortOrder;
use crate::data::stats::GpaAveraging;

/// Env var naming an explicit config file.
pub const CONFIG_ENV: &str = "GPA_DASHBOARD_CONFIG";
/// Config file picked up from the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "gpa-dashboard.json";

// ---------------------------------------------------------------------------
// DashboardConfig
// ---------------------------------------------------------------------------

/// Start-up settings. Every field may be omitted from the JSON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Roster loaded at start-up.
    pub source: PathBuf,
    /// Initial dashboard sort.
    pub default_sort: SortOrder,
    /// Empty name list on the dashboard.
    pub dashboard_empty_names: EmptyCandidates,
    /// Empty name list on the bulk search page.
    pub bulk_empty_names: EmptyCandidates,
    pub gpa_average: GpaAveraging,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            source: PathBuf::from("sample_data/master.csv"),
            default_sort: SortOrder::GpaDesc,
            dashboard_empty_names: EmptyCandidates::ReturnAll,
            bulk_empty_names: EmptyCandidates::ReturnEmpty,
            gpa_average: GpaAveraging::ZeroSubstitute,
        }
    }
}

impl DashboardConfig {
    /// Parse a config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Resolve the config: `$GPA_DASHBOARD_CONFIG`, then `gpa-dashboard.json`
    /// in the working directory, then defaults. A broken file is logged and
    /// replaced by defaults.
    pub fn discover() -> Self {
        let path = match std::env::var_os(CONFIG_ENV) {
            Some(p) => PathBuf::from(p),
            None => {
                let local = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !local.exists() {
                    log::debug!("No {DEFAULT_CONFIG_FILE} found, using defaults");
                    return Self::default();
                }
                local
            }
        };

        match Self::from_file(&path) {
            Ok(config) => {
                log::info!("Using config {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("Ignoring config: {e:#}");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "source": "rosters/2024.csv", "gpa_average": "exclude_unknown", "default_sort": "name-asc" }}"#
        )
        .unwrap();

        let config = DashboardConfig::from_file(file.path()).unwrap();
        assert_eq!(config.source, PathBuf::from("rosters/2024.csv"));
        assert_eq!(config.gpa_average, GpaAveraging::ExcludeUnknown);
        assert_eq!(config.default_sort, SortOrder::NameAsc);
        assert_eq!(config.dashboard_empty_names, EmptyCandidates::ReturnAll);
        assert_eq!(config.bulk_empty_names, EmptyCandidates::ReturnEmpty);
    }

    #[test]
    fn test_invalid_file_is_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "bulk_empty_names": "sometimes" }}"#).unwrap();
        assert!(DashboardConfig::from_file(file.path()).is_err());
    }

    #[test]
    fn test_round_trip_labels() {
        let json = serde_json::to_value(DashboardConfig::default()).unwrap();
        assert_eq!(json["default_sort"], "cgpa-desc");
        assert_eq!(json["dashboard_empty_names"], "return_all");
        assert_eq!(json["gpa_average"], "zero_substitute");
    }
}
