//! BuildSettings - TOML で書くビルド設定
//!
//! ```toml
//! project_name = "app"
//! build_dir = "build"
//! deprecation = "summary"
//!
//! [[tasks]]
//! name = "test"
//!
//! [tasks.reports.html]
//! enabled = true
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::DEFAULT_REPORTS_DIR_NAME;
use crate::impls::DeprecationPolicy;

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Deserialization(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildSettings {
    pub project_name: String,
    pub build_dir: PathBuf,
    pub reports_dir_name: String,
    pub deprecation: DeprecationPolicy,
    pub tasks: Vec<TaskSettings>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSettings {
    pub name: String,
    #[serde(default)]
    pub reports: BTreeMap<String, ReportSettings>,
}

/// Per-report overrides; a report listed here is created for the task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSettings {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<PathBuf>,
}

fn default_enabled() -> bool {
    true
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            project_name: "root".to_string(),
            build_dir: PathBuf::from("build"),
            reports_dir_name: DEFAULT_REPORTS_DIR_NAME.to_string(),
            deprecation: DeprecationPolicy::default(),
            tasks: Vec::new(),
        }
    }
}

impl BuildSettings {
    pub fn from_file(path: &Path) -> Result<Self, SettingsError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(value: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(value)?)
    }
}
