use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::error::CriteriaError;
use crate::models::{find_user, Priority, Project, Status, User};

/// Assignee selector of the project filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AssigneeFilter {
    /// No filtering on assignee.
    #[default]
    Any,
    /// Only projects without an assignee.
    Unassigned,
    /// Only projects assigned to this user id.
    User(u64),
}

impl AssigneeFilter {
    pub fn matches(&self, project: &Project) -> bool {
        match self {
            AssigneeFilter::Any => true,
            AssigneeFilter::Unassigned => project.assigned_to_id.is_none(),
            AssigneeFilter::User(id) => project.assigned_to_id == Some(*id),
        }
    }
}

impl FromStr for AssigneeFilter {
    type Err = CriteriaError;

    /// Parses the selector values `""`, `"unassigned"` and a numeric user id.
    ///
    /// Input is matched exactly: no trimming, no case folding, and ids must be
    /// plain digits without sign or leading zeros.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CriteriaError::InvalidAssignee(s.to_string());
        match s {
            "" => Ok(AssigneeFilter::Any),
            "unassigned" => Ok(AssigneeFilter::Unassigned),
            _ if !s.bytes().all(|b| b.is_ascii_digit()) => Err(invalid()),
            _ if s.len() > 1 && s.starts_with('0') => Err(invalid()),
            _ => s.parse::<u64>().map(AssigneeFilter::User).map_err(|_| invalid()),
        }
    }
}

impl fmt::Display for AssigneeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssigneeFilter::Any => Ok(()),
            AssigneeFilter::Unassigned => f.write_str("unassigned"),
            AssigneeFilter::User(id) => write!(f, "{}", id),
        }
    }
}

/// Combination of search text, status set, priority set and assignee selector.
///
/// Empty sets and empty search text mean "no filter" for that criterion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub search_text: String,
    pub statuses: BTreeSet<Status>,
    pub priorities: BTreeSet<Priority>,
    pub assignee: AssigneeFilter,
}

impl FilterCriteria {
    pub fn matches(&self, project: &Project) -> bool {
        self.matches_search(project)
            && (self.statuses.is_empty() || self.statuses.contains(&project.status))
            && (self.priorities.is_empty() || self.priorities.contains(&project.priority))
            && self.assignee.matches(project)
    }

    fn matches_search(&self, project: &Project) -> bool {
        if self.search_text.is_empty() {
            return true;
        }
        let needle = self.search_text.to_lowercase();
        project.title.to_lowercase().contains(&needle)
            || project
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&needle))
    }

    pub fn has_active_filters(&self) -> bool {
        !self.search_text.is_empty()
            || !self.statuses.is_empty()
            || !self.priorities.is_empty()
            || self.assignee != AssigneeFilter::Any
    }

    pub fn clear(&mut self) {
        *self = FilterCriteria::default();
    }

    /// Adds the status to the selection, or removes it if already selected.
    pub fn toggle_status(&mut self, status: Status) {
        if !self.statuses.remove(&status) {
            self.statuses.insert(status);
        }
    }

    pub fn toggle_priority(&mut self, priority: Priority) {
        if !self.priorities.remove(&priority) {
            self.priorities.insert(priority);
        }
    }

    /// Describes each active criterion, e.g. `Status: Draft`.
    ///
    /// A user id that no longer resolves is shown as `#id`.
    pub fn active_labels(&self, users: &[User]) -> Vec<String> {
        let mut labels = Vec::new();
        if !self.search_text.is_empty() {
            labels.push(format!("Search: \"{}\"", self.search_text));
        }
        labels.extend(self.statuses.iter().map(|s| format!("Status: {}", s.label())));
        labels.extend(self.priorities.iter().map(|p| format!("Priority: {}", p.label())));
        match self.assignee {
            AssigneeFilter::Any => {}
            AssigneeFilter::Unassigned => labels.push("Assignee: Unassigned".to_string()),
            AssigneeFilter::User(id) => {
                let name = find_user(users, id)
                    .map(|u| u.name.clone())
                    .unwrap_or_else(|| format!("#{}", id));
                labels.push(format!("Assignee: {}", name));
            }
        }
        labels
    }
}

/// Returns the projects matching every criterion, in their original order.
pub fn filter_projects<'a>(projects: &'a [Project], criteria: &FilterCriteria) -> Vec<&'a Project> {
    projects.iter().filter(|p| criteria.matches(p)).collect()
}

/// "Showing N of M projects" counter line.
pub fn result_summary(shown: usize, total: usize) -> String {
    format!("Showing {} of {} projects", shown, total)
}
