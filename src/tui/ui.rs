use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap},
    Frame,
};
use crate::config::Theme;
use crate::display::{assignee_label, format_budget, format_date, user_label};
use crate::filter::result_summary;
use crate::models::{Priority, Role, Status};
use crate::stats::is_overdue;
use super::app::{App, InputMode, ViewMode};

struct Palette {
    bg: Color,
    fg: Color,
    accent: Color,
    muted: Color,
    highlight: Color,
}

impl Palette {
    fn for_theme(theme: Theme) -> Palette {
        match theme {
            Theme::Light => Palette {
                bg: Color::White,
                fg: Color::Black,
                accent: Color::Blue,
                muted: Color::DarkGray,
                highlight: Color::Gray,
            },
            Theme::Dark => Palette {
                bg: Color::Black,
                fg: Color::White,
                accent: Color::Cyan,
                muted: Color::Gray,
                highlight: Color::DarkGray,
            },
        }
    }

    fn base(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    fn header(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    fn selected(&self) -> Style {
        Style::default().add_modifier(Modifier::BOLD).bg(self.highlight)
    }
}

fn status_color(status: Status) -> Color {
    match status {
        Status::Draft => Color::Gray,
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

pub fn ui(f: &mut Frame, app: &mut App) {
    let palette = Palette::for_theme(app.theme);
    f.render_widget(Block::default().style(palette.base()), f.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // View
            Constraint::Length(3)  // Status + help
        ].as_ref())
        .split(f.area());

    match app.view_mode {
        ViewMode::Dashboard => render_dashboard(f, app, &palette, chunks[0]),
        ViewMode::Projects => render_projects(f, app, &palette, chunks[0]),
        ViewMode::Users => render_users(f, app, &palette, chunks[0]),
    }

    let help_text = match app.input_mode {
        InputMode::Normal => match app.view_mode {
            ViewMode::Dashboard => "q: Quit | v: Next View | r: Reload | T: Theme",
            ViewMode::Projects => "q: Quit | /: Search | 1-4: Status | 7-9: Priority | u: Assignee | x: Clear | d: Del | r: Reload | v: Next View | T: Theme",
            ViewMode::Users => "q: Quit | d: Del | r: Reload | v: Next View | T: Theme",
        },
        InputMode::Search => "Type to filter | Enter: Done | Esc: Clear search",
        InputMode::ConfirmDelete => "y: Delete | n/Esc: Cancel",
    };
    let line = match &app.status_message {
        Some(msg) => format!("{}  |  {}", msg, help_text),
        None => help_text.to_string(),
    };
    let help = Paragraph::new(line)
        .style(Style::default().fg(palette.muted))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[1]);

    if app.input_mode == InputMode::ConfirmDelete {
        if let Some(target) = app.delete_target_label() {
            let area = centered_rect(60, 5, f.area());
            f.render_widget(Clear, area);
            let dialog = Paragraph::new(format!("Delete {}?\nThis cannot be undone.", target))
                .style(Style::default().fg(Color::Red).bg(palette.bg))
                .wrap(Wrap { trim: true })
                .block(Block::default().borders(Borders::ALL).title("Confirm deletion"));
            f.render_widget(dialog, area);
        }
    }
}

fn render_dashboard(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(0)].as_ref())
        .split(area);
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 5); 5].as_ref())
        .split(rows[0]);

    let s = app.stats;
    let entries = [
        ("Total Projects", s.total, palette.accent),
        ("Drafts", s.draft, palette.muted),
        ("In Progress", s.in_progress, Color::Cyan),
        ("Overdue", s.overdue, Color::Yellow),
        ("Completed", s.completed, Color::Green),
    ];
    for ((title, value, color), slot) in entries.into_iter().zip(cards.iter()) {
        let card = Paragraph::new(value.to_string())
            .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
            .block(Block::default().borders(Borders::ALL).title(title));
        f.render_widget(card, *slot);
    }

    let overdue: Vec<Row> = app
        .projects
        .iter()
        .filter(|p| is_overdue(p, app.now))
        .map(|p| {
            Row::new(vec![
                Cell::from(p.id.to_string()),
                Cell::from(p.title.clone()),
                Cell::from(format_date(p.due_date)),
                Cell::from(format_date(p.end_date)),
            ])
            .style(Style::default().fg(Color::Red))
        })
        .collect();
    let widths = [
        Constraint::Length(6),
        Constraint::Min(20),
        Constraint::Length(12),
        Constraint::Length(12),
    ];
    let table = Table::new(overdue, widths)
        .header(Row::new(vec!["ID", "Title", "Due", "End"]).style(palette.header()).bottom_margin(1))
        .block(Block::default().borders(Borders::ALL).title("Projectust - Overdue projects"));
    f.render_widget(table, rows[1]);
}

fn render_projects(f: &mut Frame, app: &mut App, palette: &Palette, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)].as_ref())
        .split(area);

    let labels = app.criteria.active_labels(&app.users);
    let search_title = if labels.is_empty() {
        "Search by title or description".to_string()
    } else {
        format!("Filters: {}", labels.join(" | "))
    };
    let search_style = if app.input_mode == InputMode::Search {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(palette.fg)
    };
    let search = Paragraph::new(app.criteria.search_text.as_str())
        .style(search_style)
        .block(Block::default().borders(Borders::ALL).title(search_title));
    f.render_widget(search, chunks[0]);

    let rows: Vec<Row> = app
        .filtered
        .iter()
        .map(|p| {
            let overdue = is_overdue(p, app.now);
            Row::new(vec![
                Cell::from(p.id.to_string()),
                Cell::from(p.title.clone()),
                Cell::from(p.status.label()).style(Style::default().fg(status_color(p.status))),
                Cell::from(p.priority.label()).style(Style::default().fg(priority_color(p.priority))),
                Cell::from(assignee_label(p, &app.users)),
                Cell::from(format_date(p.due_date))
                    .style(if overdue { Style::default().fg(Color::Red) } else { Style::default() }),
                Cell::from(p.budget.map(format_budget).unwrap_or_default()),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(5),
        Constraint::Min(20),
        Constraint::Length(12),
        Constraint::Length(8),
        Constraint::Length(18),
        Constraint::Length(12),
        Constraint::Length(14),
    ];

    let title = if app.projects.is_empty() {
        "Projectust - Projects (none yet)".to_string()
    } else if app.filtered.is_empty() {
        "Projectust - Projects (no matches, x: Clear filters)".to_string()
    } else {
        format!("Projectust - Projects ({})", result_summary(app.filtered.len(), app.projects.len()))
    };

    let table = Table::new(rows, widths)
        .header(Row::new(vec!["ID", "Title", "Status", "Priority", "Assignee", "Due", "Budget"])
            .style(palette.header())
            .bottom_margin(1))
        .block(Block::default().borders(Borders::ALL).title(title))
        .row_highlight_style(palette.selected())
        .highlight_symbol(">> ");

    f.render_stateful_widget(table, chunks[1], &mut app.project_state);
}

fn render_users(f: &mut Frame, app: &mut App, palette: &Palette, area: Rect) {
    let rows: Vec<Row> = app
        .users
        .iter()
        .map(|u| {
            let style = if u.is_active { Style::default() } else { Style::default().fg(palette.muted) };
            Row::new(vec![
                Cell::from(u.id.to_string()),
                Cell::from(user_label(u)),
                Cell::from(u.email.clone()),
                Cell::from(u.role.label()).style(Style::default().fg(role_color(u.role))),
                Cell::from(format_date(u.created_at)),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(5),
        Constraint::Min(20),
        Constraint::Length(28),
        Constraint::Length(14),
        Constraint::Length(12),
    ];

    let table = Table::new(rows, widths)
        .header(Row::new(vec!["ID", "Name", "Email", "Role", "Created"])
            .style(palette.header())
            .bottom_margin(1))
        .block(Block::default().borders(Borders::ALL).title("Projectust - Users"))
        .row_highlight_style(palette.selected())
        .highlight_symbol(">> ");

    f.render_stateful_widget(table, area, &mut app.user_state);
}

fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let margin = r.height.saturating_sub(height) / 2;
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(margin),
            Constraint::Length(height),
            Constraint::Length(margin),
        ].as_ref())
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ].as_ref())
        .split(popup_layout[1])[1]
}
