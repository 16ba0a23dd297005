use serde::{Deserialize, Serialize};

use super::DEFAULT_BRANCH;

pub const DEFAULT_CURRENCY: &str = "USD";

/// Agency-wide settings, owned outside the dashboard and only read here
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgencySettings {
    #[serde(default = "default_agency_name")]
    pub agency_name: String,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default = "default_branches")]
    pub branches: Vec<String>,
}

impl AgencySettings {
    /// Currency code for display, falling back when the stored value is blank
    pub fn display_currency(&self) -> &str {
        let trimmed = self.currency.trim();
        if trimmed.is_empty() {
            DEFAULT_CURRENCY
        } else {
            trimmed
        }
    }
}

impl Default for AgencySettings {
    fn default() -> Self {
        Self {
            agency_name: default_agency_name(),
            currency: default_currency(),
            branches: default_branches(),
        }
    }
}

fn default_agency_name() -> String {
    "Agency".to_string()
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

fn default_branches() -> Vec<String> {
    vec![DEFAULT_BRANCH.to_string()]
}
