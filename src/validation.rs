//! Checks applied where data enters the client: records decoded from the
//! backend and values typed into forms or command-line flags.

use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ValidationError;
use crate::models::{Project, ProjectDraft, User, UserDraft};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

fn check_budget(budget: Option<f64>) -> Result<(), ValidationError> {
    match budget {
        Some(b) if !b.is_finite() => Err(ValidationError::InvalidBudget(b.to_string())),
        Some(b) if b < 0.0 => Err(ValidationError::NegativeBudget(b)),
        _ => Ok(()),
    }
}

fn check_name_and_email(name: &str, email: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::NameRequired);
    }
    let email = email.trim();
    if email.is_empty() {
        return Err(ValidationError::EmailRequired);
    }
    if !is_valid_email(email) {
        return Err(ValidationError::InvalidEmail(email.to_string()));
    }
    Ok(())
}

pub fn validate_project(project: &Project) -> Result<(), ValidationError> {
    let check = || {
        if project.title.trim().is_empty() {
            return Err(ValidationError::TitleRequired);
        }
        check_budget(project.budget)
    };
    check().map_err(|e| ValidationError::Project { id: project.id, source: Box::new(e) })
}

pub fn validate_user(user: &User) -> Result<(), ValidationError> {
    check_name_and_email(&user.name, &user.email)
        .map_err(|e| ValidationError::User { id: user.id, source: Box::new(e) })
}

pub fn validate_project_draft(draft: &ProjectDraft) -> Result<(), ValidationError> {
    if draft.title.trim().is_empty() {
        return Err(ValidationError::TitleRequired);
    }
    check_budget(draft.budget)
}

pub fn validate_user_draft(draft: &UserDraft) -> Result<(), ValidationError> {
    check_name_and_email(&draft.name, &draft.email)
}

/// Empty input or `none` (any case) clears an optional field.
pub fn is_clear_marker(input: &str) -> bool {
    let s = input.trim();
    s.is_empty() || s.eq_ignore_ascii_case("none")
}

/// Parses a form date. Empty input or `none` clears the field.
pub fn parse_date_input(input: &str) -> Result<Option<NaiveDateTime>, ValidationError> {
    if is_clear_marker(input) {
        return Ok(None);
    }
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(Some)
        .ok_or_else(|| ValidationError::InvalidDate(input.to_string()))
}

/// Parses a form budget. Empty input or `none` clears the field.
pub fn parse_budget_input(input: &str) -> Result<Option<f64>, ValidationError> {
    if is_clear_marker(input) {
        return Ok(None);
    }
    let value: f64 = input
        .trim()
        .parse()
        .map_err(|_| ValidationError::InvalidBudget(input.to_string()))?;
    check_budget(Some(value))?;
    Ok(Some(value))
}
