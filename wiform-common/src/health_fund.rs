//! Israeli health funds (kupot holim)
//!
//! The four funds are a fixed enumeration of the form contract. `ALL` order is
//! the search order used when recovering a fund name from free text.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Health fund a claimant belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HealthFund {
    /// כללית
    #[serde(rename = "כללית")]
    Clalit,
    /// מכבי
    #[serde(rename = "מכבי")]
    Maccabi,
    /// מאוחדת
    #[serde(rename = "מאוחדת")]
    Meuhedet,
    /// לאומית
    #[serde(rename = "לאומית")]
    Leumit,
}

impl HealthFund {
    /// All funds, in recovery search order
    pub const ALL: [HealthFund; 4] = [
        HealthFund::Clalit,
        HealthFund::Maccabi,
        HealthFund::Meuhedet,
        HealthFund::Leumit,
    ];

    /// Name as printed on the form
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthFund::Clalit => "כללית",
            HealthFund::Maccabi => "מכבי",
            HealthFund::Meuhedet => "מאוחדת",
            HealthFund::Leumit => "לאומית",
        }
    }

    /// Exact (trimmed) name lookup
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL.into_iter().find(|fund| fund.as_str() == name)
    }

    /// First fund, in `ALL` order, whose name occurs anywhere in `text`
    pub fn find_in(text: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|fund| text.contains(fund.as_str()))
    }
}

impl fmt::Display for HealthFund {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
