use std::path::PathBuf;

use thiserror::Error;

/// Rejected filter criteria built from free-form input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CriteriaError {
    #[error("unknown status '{0}' (expected draft, in_progress, completed or cancelled)")]
    UnknownStatus(String),
    #[error("unknown priority '{0}' (expected low, medium or high)")]
    UnknownPriority(String),
    #[error("invalid assignee filter '{0}' (expected \"\", \"unassigned\" or a user id)")]
    InvalidAssignee(String),
}

/// Malformed records or form input, caught at the ingestion boundary.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("title is required")]
    TitleRequired,
    #[error("name is required")]
    NameRequired,
    #[error("email is required")]
    EmailRequired,
    #[error("email '{0}' is not valid")]
    InvalidEmail(String),
    #[error("budget must not be negative (got {0})")]
    NegativeBudget(f64),
    #[error("invalid budget '{0}'")]
    InvalidBudget(String),
    #[error("invalid date '{0}'. Use YYYY-MM-DD.")]
    InvalidDate(String),
    #[error("unknown role '{0}' (expected admin, manager or user)")]
    UnknownRole(String),
    #[error("project {id}: {source}")]
    Project {
        id: u64,
        #[source]
        source: Box<ValidationError>,
    },
    #[error("user {id}: {source}")]
    User {
        id: u64,
        #[source]
        source: Box<ValidationError>,
    },
}

/// Failures talking to the backend.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid API URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("{detail} (HTTP {status})")]
    Status { status: u16, detail: String },
    #[error("failed to decode {what}: {source}")]
    Decode {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid data from server: {0}")]
    Invalid(#[from] ValidationError),
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Status { status: 404, .. })
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot determine config directory")]
    NoConfigDir,
    #[error("failed to read config at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed to write config at {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}
