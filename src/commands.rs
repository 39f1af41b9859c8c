use std::io::{self, Write};

use anyhow::{bail, Context, Result};
use chrono::Local;
use clap::Args;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};
use tracing::{info, warn};

use crate::api::ApiClient;
use crate::config::{Config, Theme};
use crate::display::{assignee_label, format_budget, format_date, user_label};
use crate::filter::{filter_projects, result_summary, FilterCriteria};
use crate::models::{find_user, Priority, ProjectDraft, Role, Status, User, UserDraft};
use crate::stats::{compute_stats_now, is_overdue};
use crate::validation::{
    is_clear_marker, parse_budget_input, parse_date_input, validate_project_draft, validate_user_draft,
};

/// Optional project fields shared by `project add` and `project edit`.
#[derive(Args, Debug, Default, Clone)]
pub struct ProjectChanges {
    /// Description ("none" clears it)
    #[arg(long)]
    pub description: Option<String>,
    /// Status (draft, in_progress, completed, cancelled)
    #[arg(short, long)]
    pub status: Option<Status>,
    /// Priority (low, medium, high)
    #[arg(short, long)]
    pub priority: Option<Priority>,
    /// Start date in YYYY-MM-DD ("none" clears it)
    #[arg(long)]
    pub start: Option<String>,
    /// End date in YYYY-MM-DD ("none" clears it)
    #[arg(long)]
    pub end: Option<String>,
    /// Due date in YYYY-MM-DD ("none" clears it)
    #[arg(short, long)]
    pub due: Option<String>,
    /// Budget, a non-negative number ("none" clears it)
    #[arg(short, long)]
    pub budget: Option<String>,
    /// Id of an active user ("none" unassigns)
    #[arg(short, long)]
    pub assignee: Option<String>,
}

/// Optional user fields for `user edit`.
#[derive(Args, Debug, Default, Clone)]
pub struct UserChanges {
    /// New name
    #[arg(short, long)]
    pub name: Option<String>,
    /// New email
    #[arg(short, long)]
    pub email: Option<String>,
    /// New role (admin, manager, user)
    #[arg(short, long)]
    pub role: Option<Role>,
    /// Mark the user as active
    #[arg(long, conflicts_with = "deactivate")]
    pub activate: bool,
    /// Mark the user as inactive
    #[arg(long)]
    pub deactivate: bool,
}

/// Resolves an assignee given on the command line.
///
/// Only active users can be assigned; "none" or an empty value unassigns.
pub fn resolve_assignee_input(input: &str, users: &[User]) -> Result<Option<u64>> {
    if is_clear_marker(input) {
        return Ok(None);
    }
    let id: u64 = input
        .trim()
        .parse()
        .with_context(|| format!("Invalid assignee '{}': expected a user id", input))?;
    match find_user(users, id) {
        Some(u) if u.is_active => Ok(Some(id)),
        Some(u) => bail!("User {} ({}) is inactive and cannot be assigned.", id, u.name),
        None => bail!("User {} not found.", id),
    }
}

/// Applies command-line changes to a project draft and validates the result.
pub fn apply_project_changes(draft: &mut ProjectDraft, changes: &ProjectChanges, users: &[User]) -> Result<()> {
    if let Some(d) = &changes.description {
        draft.description = if is_clear_marker(d) { None } else { Some(d.clone()) };
    }
    if let Some(s) = changes.status { draft.status = s; }
    if let Some(p) = changes.priority { draft.priority = p; }
    if let Some(d) = &changes.start { draft.start_date = parse_date_input(d)?; }
    if let Some(d) = &changes.end { draft.end_date = parse_date_input(d)?; }
    if let Some(d) = &changes.due { draft.due_date = parse_date_input(d)?; }
    if let Some(b) = &changes.budget { draft.budget = parse_budget_input(b)?; }
    if let Some(a) = &changes.assignee {
        draft.assigned_to_id = resolve_assignee_input(a, users)?;
    }
    validate_project_draft(draft)?;
    Ok(())
}

/// Applies command-line changes to a user draft, then normalizes and validates it.
pub fn apply_user_changes(draft: UserDraft, changes: &UserChanges) -> Result<UserDraft> {
    let mut draft = draft;
    if let Some(n) = &changes.name { draft.name = n.clone(); }
    if let Some(e) = &changes.email { draft.email = e.clone(); }
    if let Some(r) = changes.role { draft.role = r; }
    if changes.activate { draft.is_active = true; }
    if changes.deactivate { draft.is_active = false; }
    let draft = draft.normalized();
    validate_user_draft(&draft)?;
    Ok(draft)
}

fn status_color(status: Status) -> Color {
    match status {
        Status::Draft => Color::Grey,
        Status::InProgress => Color::Cyan,
        Status::Completed => Color::Green,
        Status::Cancelled => Color::Red,
    }
}

fn priority_color(priority: Priority) -> Color {
    match priority {
        Priority::Low => Color::Green,
        Priority::Medium => Color::Yellow,
        Priority::High => Color::Red,
    }
}

fn role_color(role: Role) -> Color {
    match role {
        Role::Admin => Color::Red,
        Role::Manager => Color::Yellow,
        Role::User => Color::Blue,
    }
}

fn header(names: &[&str]) -> Vec<Cell> {
    names.iter().map(|n| Cell::new(n).add_attribute(Attribute::Bold)).collect()
}

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().eq_ignore_ascii_case("y"))
}

/// Users are only needed for display; a failure degrades to ids.
fn load_users_lenient(client: &ApiClient) -> Vec<User> {
    match client.get_users() {
        Ok(users) => users,
        Err(e) => {
            warn!(error = %e, "could not load users");
            eprintln!("Warning: could not load users: {}", e);
            Vec::new()
        }
    }
}

/// Checks that the backend answers.
pub fn cmd_status(client: &ApiClient) -> Result<()> {
    let status = client
        .status()
        .with_context(|| format!("Backend at {} is not reachable", client.base_url()))?;
    println!("Backend at {}: {}", client.base_url(), status.message);
    Ok(())
}

/// Prints the project summary cards.
pub fn cmd_dashboard(client: &ApiClient) -> Result<()> {
    let projects = client.get_projects().context("Failed to load projects")?;
    let stats = compute_stats_now(&projects);

    let mut table = new_table();
    table.set_header(header(&["Total", "Drafts", "In Progress", "Overdue", "Completed"]));
    table.add_row(vec![
        Cell::new(stats.total).fg(Color::Blue),
        Cell::new(stats.draft),
        Cell::new(stats.in_progress).fg(Color::Cyan),
        Cell::new(stats.overdue).fg(if stats.overdue > 0 { Color::Yellow } else { Color::Reset }),
        Cell::new(stats.completed).fg(Color::Green),
    ]);
    println!("{table}");
    Ok(())
}

/// Lists projects matching `criteria` in backend order.
pub fn cmd_project_list(client: &ApiClient, criteria: &FilterCriteria) -> Result<()> {
    let projects = client.get_projects().context("Failed to load projects")?;
    if projects.is_empty() {
        println!("No projects found. Create one with `projectust project add`.");
        return Ok(());
    }
    let users = load_users_lenient(client);
    let filtered = filter_projects(&projects, criteria);

    let labels = criteria.active_labels(&users);
    if !labels.is_empty() {
        println!("Active filters: {}", labels.join(", "));
    }
    println!("{}", result_summary(filtered.len(), projects.len()));
    if filtered.is_empty() {
        println!("No projects match the selected filters.");
        return Ok(());
    }

    let now = Local::now().naive_local();
    let mut table = new_table();
    table.set_header(header(&["ID", "Title", "Status", "Priority", "Assignee", "Due", "Budget", "Overdue"]));
    for p in filtered {
        let overdue = is_overdue(p, now);
        table.add_row(vec![
            Cell::new(p.id),
            Cell::new(&p.title),
            Cell::new(p.status.label()).fg(status_color(p.status)),
            Cell::new(p.priority.label()).fg(priority_color(p.priority)),
            Cell::new(assignee_label(p, &users)),
            Cell::new(format_date(p.due_date)),
            Cell::new(p.budget.map(format_budget).unwrap_or_default()),
            Cell::new(if overdue { "Yes" } else { "" }).fg(if overdue { Color::Red } else { Color::Reset }),
        ]);
    }
    println!("{table}");
    Ok(())
}

/// Prints every field of one project.
pub fn cmd_project_show(client: &ApiClient, id: u64) -> Result<()> {
    let p = client
        .get_project(id)
        .with_context(|| format!("Failed to load project {}", id))?;
    let users = if p.assigned_to_id.is_some() { load_users_lenient(client) } else { Vec::new() };
    let overdue = is_overdue(&p, Local::now().naive_local());

    let mut table = new_table();
    let rows: Vec<(&str, Cell)> = vec![
        ("ID", Cell::new(p.id)),
        ("Title", Cell::new(&p.title)),
        ("Description", Cell::new(p.description.as_deref().unwrap_or("No description"))),
        ("Status", Cell::new(p.status.label()).fg(status_color(p.status))),
        ("Priority", Cell::new(p.priority.label()).fg(priority_color(p.priority))),
        ("Assigned to", Cell::new(assignee_label(&p, &users))),
        ("Start", Cell::new(format_date(p.start_date))),
        ("End", Cell::new(format_date(p.end_date))),
        ("Due", Cell::new(format_date(p.due_date))),
        ("Budget", Cell::new(p.budget.map(format_budget).unwrap_or_else(|| "N/A".into()))),
        ("Overdue", Cell::new(if overdue { "Yes" } else { "No" }).fg(if overdue { Color::Red } else { Color::Reset })),
        ("Created", Cell::new(format_date(Some(p.created_at)))),
        ("Updated", Cell::new(format_date(p.updated_at))),
    ];
    for (name, value) in rows {
        table.add_row(vec![Cell::new(name).add_attribute(Attribute::Bold), value]);
    }
    println!("{table}");
    Ok(())
}

/// Creates a project. Defaults: draft status, medium priority.
pub fn cmd_project_add(client: &ApiClient, title: String, changes: ProjectChanges) -> Result<()> {
    let users = if changes.assignee.is_some() {
        client.get_users().context("Failed to load users")?
    } else {
        Vec::new()
    };
    let mut draft = ProjectDraft::new(title);
    apply_project_changes(&mut draft, &changes, &users)?;
    let created = client.create_project(&draft).context("Failed to create project")?;
    info!(id = created.id, "project created");
    println!("Project added (id = {})", created.id);
    Ok(())
}

/// Edits a project: fetches it, applies the changes and sends the full record back.
pub fn cmd_project_edit(client: &ApiClient, id: u64, title: Option<String>, changes: ProjectChanges) -> Result<()> {
    let existing = client
        .get_project(id)
        .with_context(|| format!("Failed to load project {}", id))?;
    let users = if changes.assignee.is_some() {
        client.get_users().context("Failed to load users")?
    } else {
        Vec::new()
    };
    let mut draft = ProjectDraft::from(&existing);
    if let Some(t) = title { draft.title = t; }
    apply_project_changes(&mut draft, &changes, &users)?;
    client
        .update_project(id, &draft)
        .with_context(|| format!("Failed to update project {}", id))?;
    info!(id, "project updated");
    println!("Project {} updated.", id);
    Ok(())
}

/// Deletes a project after confirmation.
pub fn cmd_project_remove(client: &ApiClient, id: u64, force: bool) -> Result<()> {
    let project = client
        .get_project(id)
        .with_context(|| format!("Failed to load project {}", id))?;
    if !force && !confirm(&format!("Are you sure you want to delete project \"{}\"? This cannot be undone.", project.title))? {
        println!("Aborted.");
        return Ok(());
    }
    client
        .delete_project(id)
        .with_context(|| format!("Failed to delete project {}", id))?;
    info!(id, "project deleted");
    println!("Project {} removed.", id);
    Ok(())
}

/// Lists all users.
pub fn cmd_user_list(client: &ApiClient) -> Result<()> {
    let users = client.get_users().context("Failed to load users")?;
    if users.is_empty() {
        println!("No users found. Create one with `projectust user add`.");
        return Ok(());
    }
    let mut table = new_table();
    table.set_header(header(&["ID", "Name", "Email", "Role", "Status", "Created"]));
    for u in &users {
        table.add_row(vec![
            Cell::new(u.id),
            Cell::new(&u.name),
            Cell::new(&u.email),
            Cell::new(u.role.label()).fg(role_color(u.role)),
            if u.is_active { Cell::new("Active").fg(Color::Green) } else { Cell::new("Inactive").fg(Color::Grey) },
            Cell::new(format_date(u.created_at)),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn cmd_user_show(client: &ApiClient, id: u64) -> Result<()> {
    let u = client
        .get_user(id)
        .with_context(|| format!("Failed to load user {}", id))?;
    let mut table = new_table();
    let rows: Vec<(&str, Cell)> = vec![
        ("ID", Cell::new(u.id)),
        ("Name", Cell::new(user_label(&u))),
        ("Email", Cell::new(&u.email)),
        ("Role", Cell::new(u.role.label()).fg(role_color(u.role))),
        ("Active", Cell::new(if u.is_active { "Yes" } else { "No" })),
        ("Created", Cell::new(format_date(u.created_at))),
    ];
    for (name, value) in rows {
        table.add_row(vec![Cell::new(name).add_attribute(Attribute::Bold), value]);
    }
    println!("{table}");
    Ok(())
}

pub fn cmd_user_add(client: &ApiClient, name: String, email: String, role: Role, inactive: bool) -> Result<()> {
    let draft = UserDraft { name, email, role, is_active: !inactive }.normalized();
    validate_user_draft(&draft)?;
    let created = client.create_user(&draft).context("Failed to create user")?;
    info!(id = created.id, "user created");
    println!("User added (id = {})", created.id);
    Ok(())
}

pub fn cmd_user_edit(client: &ApiClient, id: u64, changes: UserChanges) -> Result<()> {
    let existing = client
        .get_user(id)
        .with_context(|| format!("Failed to load user {}", id))?;
    let draft = apply_user_changes(UserDraft::from(&existing), &changes)?;
    client
        .update_user(id, &draft)
        .with_context(|| format!("Failed to update user {}", id))?;
    info!(id, "user updated");
    println!("User {} updated.", id);
    Ok(())
}

/// Deletes a user after confirmation. The backend refuses users that still own projects.
pub fn cmd_user_remove(client: &ApiClient, id: u64, force: bool) -> Result<()> {
    let user = client
        .get_user(id)
        .with_context(|| format!("Failed to load user {}", id))?;
    if !force && !confirm(&format!("Are you sure you want to delete user \"{}\"? This cannot be undone.", user.name))? {
        println!("Aborted.");
        return Ok(());
    }
    client
        .delete_user(id)
        .with_context(|| format!("Failed to delete user {}", id))?;
    info!(id, "user deleted");
    println!("User {} removed.", id);
    Ok(())
}

/// Prints the config path, creating a default file if missing.
pub fn cmd_config_path() -> Result<()> {
    let path = Config::config_path()?;
    if !path.exists() {
        Config::default().save_to(&path)?;
    }
    println!("{}", path.display());
    Ok(())
}

pub fn cmd_config_theme(theme: Theme) -> Result<()> {
    let path = Config::persist_theme(theme)?;
    println!("Theme set to {:?} in {}", theme, path.display());
    Ok(())
}
