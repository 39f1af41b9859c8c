use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{CriteriaError, ValidationError};

/// Lifecycle state of a project.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    #[default]
    Draft,
    InProgress,
    Completed,
    Cancelled,
}

impl Status {
    pub const ALL: [Status; 4] = [Status::Draft, Status::InProgress, Status::Completed, Status::Cancelled];

    /// Wire name used by the backend.
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Draft => "draft",
            Status::InProgress => "in_progress",
            Status::Completed => "completed",
            Status::Cancelled => "cancelled",
        }
    }

    /// Human readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Status::Draft => "Draft",
            Status::InProgress => "In Progress",
            Status::Completed => "Completed",
            Status::Cancelled => "Cancelled",
        }
    }

    /// Completed and cancelled projects can no longer become overdue.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Status::Completed | Status::Cancelled)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = CriteriaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "draft" => Ok(Status::Draft),
            "in_progress" => Ok(Status::InProgress),
            "completed" => Ok(Status::Completed),
            "cancelled" => Ok(Status::Cancelled),
            _ => Err(CriteriaError::UnknownStatus(s.to_string())),
        }
    }
}

/// Project priority.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = CriteriaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            _ => Err(CriteriaError::UnknownPriority(s.to_string())),
        }
    }
}

/// Account role of a user.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Manager,
    #[default]
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Manager => "manager",
            Role::User => "user",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "Administrator",
            Role::Manager => "Manager",
            Role::User => "User",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "manager" => Ok(Role::Manager),
            "user" => Ok(Role::User),
            _ => Err(ValidationError::UnknownRole(s.to_string())),
        }
    }
}

/// A project as returned by the backend.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Project {
    /// Server-assigned identifier.
    pub id: u64,
    /// Title, never empty for records created through this client.
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default, with = "iso_datetime::option")]
    pub start_date: Option<NaiveDateTime>,
    #[serde(default, with = "iso_datetime::option")]
    pub end_date: Option<NaiveDateTime>,
    #[serde(default, with = "iso_datetime::option")]
    pub due_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub budget: Option<f64>,
    /// Assignee user id. May point at a user that no longer exists.
    #[serde(default)]
    pub assigned_to_id: Option<u64>,
    #[serde(with = "iso_datetime")]
    pub created_at: NaiveDateTime,
    #[serde(default, with = "iso_datetime::option")]
    pub updated_at: Option<NaiveDateTime>,
}

impl Project {
    /// Resolves the assignee against a user list.
    ///
    /// Returns `None` both for unassigned projects and for dangling references.
    pub fn assignee<'a>(&self, users: &'a [User]) -> Option<&'a User> {
        self.assigned_to_id.and_then(|id| find_user(users, id))
    }
}

/// A user account as returned by the backend.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default, with = "iso_datetime::option")]
    pub created_at: Option<NaiveDateTime>,
}

fn default_active() -> bool {
    true
}

pub fn find_user(users: &[User], id: u64) -> Option<&User> {
    users.iter().find(|u| u.id == id)
}

/// Body sent to create or update a project.
///
/// Optional fields are always serialized, so `null` clears them on update.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ProjectDraft {
    pub title: String,
    pub description: Option<String>,
    pub status: Status,
    pub priority: Priority,
    #[serde(with = "iso_datetime::option")]
    pub start_date: Option<NaiveDateTime>,
    #[serde(with = "iso_datetime::option")]
    pub end_date: Option<NaiveDateTime>,
    #[serde(with = "iso_datetime::option")]
    pub due_date: Option<NaiveDateTime>,
    pub budget: Option<f64>,
    pub assigned_to_id: Option<u64>,
}

impl ProjectDraft {
    pub fn new(title: impl Into<String>) -> Self {
        ProjectDraft {
            title: title.into(),
            description: None,
            status: Status::default(),
            priority: Priority::default(),
            start_date: None,
            end_date: None,
            due_date: None,
            budget: None,
            assigned_to_id: None,
        }
    }
}

impl From<&Project> for ProjectDraft {
    fn from(p: &Project) -> Self {
        ProjectDraft {
            title: p.title.clone(),
            description: p.description.clone(),
            status: p.status,
            priority: p.priority,
            start_date: p.start_date,
            end_date: p.end_date,
            due_date: p.due_date,
            budget: p.budget,
            assigned_to_id: p.assigned_to_id,
        }
    }
}

/// Body sent to create or update a user.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct UserDraft {
    pub name: String,
    pub email: String,
    pub role: Role,
    pub is_active: bool,
}

impl UserDraft {
    /// Trims the name and email and lower-cases the email.
    pub fn normalized(self) -> Self {
        UserDraft {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_lowercase(),
            ..self
        }
    }
}

impl From<&User> for UserDraft {
    fn from(u: &User) -> Self {
        UserDraft {
            name: u.name.clone(),
            email: u.email.clone(),
            role: u.role,
            is_active: u.is_active,
        }
    }
}

/// Serde adapter for the backend's ISO 8601 timestamps.
///
/// Accepts plain dates (`2024-03-01`), naive date-times with optional
/// fractional seconds, and RFC 3339 values with an offset, which are
/// converted to local time. Always writes `YYYY-MM-DDTHH:MM:SS`.
pub mod iso_datetime {
    use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

    pub fn parse(raw: &str) -> Option<NaiveDateTime> {
        let s = raw.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(dt.with_timezone(&Local).naive_local());
        }
        for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
                return Some(dt);
            }
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
    }

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| de::Error::custom(format!("invalid ISO 8601 date '{}'", raw)))
    }

    pub mod option {
        use chrono::NaiveDateTime;
        use serde::{de, Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(value: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error> {
            match value {
                Some(dt) => super::serialize(dt, serializer),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error> {
            match Option::<String>::deserialize(deserializer)? {
                None => Ok(None),
                Some(raw) if raw.trim().is_empty() => Ok(None),
                Some(raw) => super::parse(&raw)
                    .map(Some)
                    .ok_or_else(|| de::Error::custom(format!("invalid ISO 8601 date '{}'", raw))),
            }
        }
    }
}
