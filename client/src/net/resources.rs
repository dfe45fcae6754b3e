//! Dashboard endpoints the client can load.

#[cfg(test)]
#[path = "resources_test.rs"]
mod resources_test;

use std::fmt;

/// One dashboard data source. The request path doubles as its cache key.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Resource {
    Portfolio,
    Pl,
    Performance,
    Dividends,
    Taxation,
    Positions { date: Option<String> },
    Timeline { start_date: String },
}

impl Resource {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Portfolio => "portfolio",
            Self::Pl => "pl",
            Self::Performance => "performance",
            Self::Dividends => "dividends",
            Self::Taxation => "taxation",
            Self::Positions { .. } => "positions",
            Self::Timeline { .. } => "timeline",
        }
    }

    #[must_use]
    pub fn path(&self) -> String {
        let base = format!("/api/{}", self.name());
        match self {
            Self::Positions { date: Some(date) } => format!("{base}?date={}", urlencoding::encode(date)),
            Self::Timeline { start_date } => format!("{base}?start_date={}", urlencoding::encode(start_date)),
            _ => base,
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
