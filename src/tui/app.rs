use chrono::{Local, NaiveDateTime};
use ratatui::widgets::TableState;
use tracing::{info, warn};

use crate::api::ApiClient;
use crate::config::{Config, Theme};
use crate::filter::{filter_projects, AssigneeFilter, FilterCriteria};
use crate::models::{Priority, Project, Status, User};
use crate::stats::{compute_stats, ProjectStats};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
    ConfirmDelete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Dashboard,
    Projects,
    Users,
}

/// Interactive state. Owns the fetched snapshot and the filter criteria;
/// the filtered list and the stats are derived from them on every change.
pub struct App {
    pub projects: Vec<Project>,
    pub users: Vec<User>,
    pub criteria: FilterCriteria,
    pub filtered: Vec<Project>,
    pub stats: ProjectStats,
    pub project_state: TableState,
    pub user_state: TableState,
    pub view_mode: ViewMode,
    pub input_mode: InputMode,
    pub theme: Theme,
    pub status_message: Option<String>,
    pub now: NaiveDateTime,
}

impl App {
    pub fn new(config: &Config) -> App {
        App {
            projects: Vec::new(),
            users: Vec::new(),
            criteria: FilterCriteria::default(),
            filtered: Vec::new(),
            stats: ProjectStats::default(),
            project_state: TableState::default(),
            user_state: TableState::default(),
            view_mode: ViewMode::Dashboard,
            input_mode: InputMode::Normal,
            theme: config.theme,
            status_message: None,
            now: Local::now().naive_local(),
        }
    }

    /// Fetches projects and users. A failed user fetch keeps the projects usable
    /// and is reported in the status line.
    pub fn load(&mut self, client: &ApiClient) {
        match client.get_projects() {
            Ok(projects) => {
                let users = match client.get_users() {
                    Ok(users) => {
                        self.status_message = None;
                        users
                    }
                    Err(e) => {
                        warn!(error = %e, "could not load users");
                        self.status_message = Some(format!("Error loading users: {}", e));
                        Vec::new()
                    }
                };
                self.set_data(projects, users);
            }
            Err(e) => {
                warn!(error = %e, "could not load projects");
                self.status_message = Some(format!("Error loading projects: {}", e));
            }
        }
    }

    /// Replaces the snapshot and recomputes the derived views.
    pub fn set_data(&mut self, projects: Vec<Project>, users: Vec<User>) {
        self.projects = projects;
        self.users = users;
        self.now = Local::now().naive_local();
        self.refresh();
    }

    /// Recomputes the filtered list and the stats, clamping the selections.
    pub fn refresh(&mut self) {
        self.filtered = filter_projects(&self.projects, &self.criteria)
            .into_iter()
            .cloned()
            .collect();
        self.stats = compute_stats(&self.projects, self.now);
        clamp_selection(&mut self.project_state, self.filtered.len());
        clamp_selection(&mut self.user_state, self.users.len());
    }

    fn current_len(&self) -> usize {
        match self.view_mode {
            ViewMode::Projects => self.filtered.len(),
            ViewMode::Users => self.users.len(),
            ViewMode::Dashboard => 0,
        }
    }

    fn current_state(&mut self) -> &mut TableState {
        match self.view_mode {
            ViewMode::Users => &mut self.user_state,
            _ => &mut self.project_state,
        }
    }

    /// Selects the next item in the current list.
    pub fn next(&mut self) {
        let len = self.current_len();
        if len == 0 { return; }
        let state = self.current_state();
        let i = match state.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        state.select(Some(i));
    }

    /// Selects the previous item in the current list.
    pub fn previous(&mut self) {
        let len = self.current_len();
        if len == 0 { return; }
        let state = self.current_state();
        let i = match state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        state.select(Some(i));
    }

    /// Cycles Dashboard -> Projects -> Users.
    pub fn toggle_view(&mut self) {
        self.view_mode = match self.view_mode {
            ViewMode::Dashboard => ViewMode::Projects,
            ViewMode::Projects => ViewMode::Users,
            ViewMode::Users => ViewMode::Dashboard,
        };
    }

    pub fn selected_project(&self) -> Option<&Project> {
        self.project_state.selected().and_then(|i| self.filtered.get(i))
    }

    pub fn selected_user(&self) -> Option<&User> {
        self.user_state.selected().and_then(|i| self.users.get(i))
    }

    pub fn start_search(&mut self) {
        if self.view_mode == ViewMode::Projects {
            self.input_mode = InputMode::Search;
        }
    }

    /// Search edits filter live on every keystroke.
    pub fn push_search_char(&mut self, c: char) {
        self.criteria.search_text.push(c);
        self.refresh();
    }

    pub fn pop_search_char(&mut self) {
        self.criteria.search_text.pop();
        self.refresh();
    }

    pub fn finish_search(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn cancel_search(&mut self) {
        self.criteria.search_text.clear();
        self.input_mode = InputMode::Normal;
        self.refresh();
    }

    pub fn toggle_status(&mut self, status: Status) {
        self.criteria.toggle_status(status);
        self.refresh();
    }

    pub fn toggle_priority(&mut self, priority: Priority) {
        self.criteria.toggle_priority(priority);
        self.refresh();
    }

    /// Cycles the assignee filter: any, unassigned, then each user in list order.
    pub fn cycle_assignee(&mut self) {
        let user_at = |i: usize| self.users.get(i).map(|u| AssigneeFilter::User(u.id));
        self.criteria.assignee = match self.criteria.assignee {
            AssigneeFilter::Any => AssigneeFilter::Unassigned,
            AssigneeFilter::Unassigned => user_at(0).unwrap_or(AssigneeFilter::Any),
            AssigneeFilter::User(id) => self
                .users
                .iter()
                .position(|u| u.id == id)
                .and_then(|i| user_at(i + 1))
                .unwrap_or(AssigneeFilter::Any),
        };
        self.refresh();
    }

    pub fn clear_filters(&mut self) {
        self.criteria.clear();
        self.refresh();
    }

    /// Opens the delete confirmation for the selected project or user.
    pub fn request_delete(&mut self) {
        let has_target = match self.view_mode {
            ViewMode::Projects => self.selected_project().is_some(),
            ViewMode::Users => self.selected_user().is_some(),
            ViewMode::Dashboard => false,
        };
        if has_target {
            self.input_mode = InputMode::ConfirmDelete;
        }
    }

    pub fn cancel_delete(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    /// Deletes the confirmed target and drops it from the local snapshot.
    pub fn confirm_delete(&mut self, client: &ApiClient) {
        self.input_mode = InputMode::Normal;
        match self.view_mode {
            ViewMode::Projects => {
                let Some((id, title)) = self.selected_project().map(|p| (p.id, p.title.clone())) else { return };
                match client.delete_project(id) {
                    Ok(()) => {
                        info!(id, "project deleted");
                        self.projects.retain(|p| p.id != id);
                        self.status_message = Some(format!("Project \"{}\" deleted.", title));
                        self.refresh();
                    }
                    Err(e) => self.status_message = Some(format!("Error deleting project: {}", e)),
                }
            }
            ViewMode::Users => {
                let Some((id, name)) = self.selected_user().map(|u| (u.id, u.name.clone())) else { return };
                match client.delete_user(id) {
                    Ok(()) => {
                        info!(id, "user deleted");
                        self.users.retain(|u| u.id != id);
                        if self.criteria.assignee == AssigneeFilter::User(id) {
                            self.criteria.assignee = AssigneeFilter::Any;
                        }
                        self.status_message = Some(format!("User \"{}\" deleted.", name));
                        self.refresh();
                    }
                    Err(e) => self.status_message = Some(format!("Error deleting user: {}", e)),
                }
            }
            ViewMode::Dashboard => {}
        }
    }

    /// Name shown in the confirmation dialog.
    pub fn delete_target_label(&self) -> Option<String> {
        match self.view_mode {
            ViewMode::Projects => self.selected_project().map(|p| format!("project \"{}\"", p.title)),
            ViewMode::Users => self.selected_user().map(|u| format!("user \"{}\"", u.name)),
            ViewMode::Dashboard => None,
        }
    }

    /// Switches between light and dark and stores the choice.
    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggle();
        if let Err(e) = Config::persist_theme(self.theme) {
            warn!(error = %e, "could not save theme");
            self.status_message = Some(format!("Theme not saved: {}", e));
        }
    }
}

fn clamp_selection(state: &mut TableState, len: usize) {
    if len == 0 {
        state.select(None);
    } else if let Some(i) = state.selected() {
        if i >= len {
            state.select(Some(len - 1));
        }
    } else {
        state.select(Some(0));
    }
}
