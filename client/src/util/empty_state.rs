//! What to show when a dashboard resource has no data yet.
//!
//! A missing report usually means a CLI step has not run. The server attaches
//! `events_present` and `in_docker` to the error so the page can name the
//! exact command.

#[cfg(test)]
#[path = "empty_state_test.rs"]
mod empty_state_test;

use session::ApiError;

use crate::net::resources::Resource;

const DOCKER_PREFIX: &str = "docker container exec -it container_name";
const IMPORT_COMMAND: &str = "./doughbox import folder-with-your-brokerage-statements";
const PERFORMANCE_COMMAND: &str = "./doughbox performance";
const TAXATION_COMMAND: &str = "./doughbox taxation";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EmptyState {
    #[default]
    Default,
    ImportEvents,
    ImportTrades,
    RunPerformance,
    RunTaxation,
}

impl EmptyState {
    /// Pick the empty state for a failed load of `resource`.
    #[must_use]
    pub fn for_failure(resource: &Resource, err: &ApiError) -> Self {
        let events_present = err.error_details().and_then(|d| d.events_present).unwrap_or(false);
        match resource {
            Resource::Portfolio if !events_present => Self::ImportTrades,
            Resource::Performance | Resource::Pl if !events_present => Self::ImportTrades,
            Resource::Performance | Resource::Pl => Self::RunPerformance,
            Resource::Taxation | Resource::Dividends if !events_present => Self::ImportEvents,
            Resource::Taxation => Self::RunTaxation,
            Resource::Dividends => Self::RunPerformance,
            Resource::Portfolio | Resource::Positions { .. } | Resource::Timeline { .. } => Self::Default,
        }
    }

    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::Default => "No events found. Try changing your filter or import events.",
            Self::ImportEvents => "You haven't imported any events (e.g. trades, dividends) yet. Please run:",
            Self::ImportTrades => "You haven't imported any trades yet. Please run:",
            Self::RunPerformance => "You haven't run a performance calculation yet. Please run:",
            Self::RunTaxation => "You haven't run a taxation calculation yet. Please run:",
        }
    }

    /// CLI command that fills the gap, prefixed for `docker exec` when the
    /// server runs in a container.
    #[must_use]
    pub fn instruction(self, docker: bool) -> Option<String> {
        let command = match self {
            Self::Default => return None,
            Self::ImportEvents | Self::ImportTrades => IMPORT_COMMAND,
            Self::RunPerformance => PERFORMANCE_COMMAND,
            Self::RunTaxation => TAXATION_COMMAND,
        };
        Some(if docker { format!("{DOCKER_PREFIX} {command}") } else { command.to_owned() })
    }
}

/// Whether the failing server reported running inside Docker.
#[must_use]
pub fn in_docker(err: &ApiError) -> bool {
    err.error_details().and_then(|d| d.in_docker).unwrap_or(false)
}
