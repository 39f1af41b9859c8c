use chrono::{Local, NaiveDateTime};
use crate::models::{Project, Status};

/// Dashboard summary of a project collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProjectStats {
    pub total: usize,
    pub draft: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub overdue: usize,
}

/// Whether a project is overdue at `now`.
///
/// A project is overdue when:
/// - its status is neither completed nor cancelled, and
/// - its due date or its end date is set and lies before `now`.
pub fn is_overdue(project: &Project, now: NaiveDateTime) -> bool {
    if project.status.is_terminal() {
        return false;
    }
    let past = |date: Option<NaiveDateTime>| date.is_some_and(|d| d < now);
    past(project.due_date) || past(project.end_date)
}

/// Computes the dashboard summary in a single pass.
///
/// Cancelled projects count toward `total` only.
pub fn compute_stats(projects: &[Project], now: NaiveDateTime) -> ProjectStats {
    projects.iter().fold(ProjectStats::default(), |mut stats, p| {
        stats.total += 1;
        match p.status {
            Status::Draft => stats.draft += 1,
            Status::InProgress => stats.in_progress += 1,
            Status::Completed => stats.completed += 1,
            Status::Cancelled => {}
        }
        if is_overdue(p, now) {
            stats.overdue += 1;
        }
        stats
    })
}

/// [`compute_stats`] against the local wall clock.
pub fn compute_stats_now(projects: &[Project]) -> ProjectStats {
    compute_stats(projects, Local::now().naive_local())
}
