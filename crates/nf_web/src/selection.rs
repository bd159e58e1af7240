use nf_core::{FilterCriteria, SortKey, SourceFilter, Week};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Layout of the article container. Purely presentational.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    List,
    Card,
}

impl ViewMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Card => "card",
        }
    }
}

impl FromStr for ViewMode {
    type Err = nf_core::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "list" => Ok(Self::List),
            "card" | "cards" => Ok(Self::Card),
            other => Err(nf_core::Error::InvalidArgument(format!("unknown view mode: {}", other))),
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the user currently has selected. Lives for one session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub source: SourceFilter,
    pub sort: SortKey,
    pub query: String,
    pub view: ViewMode,
    pub week: Option<Week>,
}

impl Selection {
    pub fn new(week: Option<Week>) -> Self {
        Self {
            week,
            ..Default::default()
        }
    }

    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria {
            source: self.source.clone(),
            query: self.query.clone(),
            week: self.week,
        }
    }
}
