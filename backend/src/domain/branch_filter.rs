use serde::{Deserialize, Serialize};
use std::fmt;

use super::models::{Branched, DEFAULT_BRANCH};

const ALL_BRANCHES: &str = "All";

/// Branch selector applied to every collection before metrics are computed
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BranchFilter {
    #[default]
    All,
    Branch(String),
}

impl BranchFilter {
    /// Parse a selector. Absent, blank, or `All` (any case) selects everything.
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("") => BranchFilter::All,
            Some(v) if v.eq_ignore_ascii_case(ALL_BRANCHES) => BranchFilter::All,
            Some(v) => BranchFilter::Branch(v.to_string()),
        }
    }

    pub fn matches<T: Branched>(&self, record: &T) -> bool {
        match self {
            BranchFilter::All => true,
            BranchFilter::Branch(id) => record.branch() == id,
        }
    }

    /// Branch new records are attributed to; `All` records against `main`
    pub fn recording_branch(&self) -> &str {
        match self {
            BranchFilter::All => DEFAULT_BRANCH,
            BranchFilter::Branch(id) => id,
        }
    }

    /// Records matching this filter, inputs left untouched
    pub fn apply<T: Branched + Clone>(&self, records: &[T]) -> Vec<T> {
        records.iter().filter(|r| self.matches(*r)).cloned().collect()
    }
}

impl fmt::Display for BranchFilter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BranchFilter::All => write!(f, "{}", ALL_BRANCHES),
            BranchFilter::Branch(id) => write!(f, "{}", id),
        }
    }
}
