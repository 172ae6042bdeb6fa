use crate::{error::EscalationResult, types::DepartmentName};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Where the runner looks for its config when no path is given.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/phonetree.json";

/// Connection details for the staffing directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryConfig {
    pub base_url: String,
    pub token: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

/// One rung of a department's escalation ladder. Every list is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EscalationStep {
    /// Literal numbers, any formatting.
    #[serde(default)]
    pub phones: Vec<String>,
    /// Job-name patterns, matched as case-insensitive substrings.
    #[serde(default)]
    pub shifts: Vec<String>,
    /// Full names to look up in the directory.
    #[serde(default)]
    pub people: Vec<String>,
}

impl EscalationStep {
    pub fn is_empty(&self) -> bool {
        self.phones.is_empty() && self.shifts.is_empty() && self.people.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DepartmentConfig {
    #[serde(default)]
    pub escalation: Vec<EscalationStep>,
}

/// The whole config file.
///
/// Departments keep their declaration order; full escalation output
/// follows the same order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhonetreeConfig {
    #[serde(rename = "uber", alias = "directory")]
    pub directory: DirectoryConfig,
    #[serde(default)]
    pub depts: IndexMap<DepartmentName, DepartmentConfig>,
}

impl PhonetreeConfig {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config = Self::from_json(&content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {path}: {e}"))?;

        let empty_steps = config
            .depts
            .iter()
            .flat_map(|(name, dept)| dept.escalation.iter().map(move |step| (name, step)))
            .filter(|(_, step)| step.is_empty())
            .count();
        if empty_steps > 0 {
            log::warn!("config {path}: {empty_steps} escalation step(s) name no phones, shifts or people");
        }
        log::debug!("config {path}: {} department(s)", config.depts.len());
        Ok(config)
    }

    pub fn from_json(content: &str) -> EscalationResult<Self> {
        Ok(serde_json::from_str(content)?)
    }
}
