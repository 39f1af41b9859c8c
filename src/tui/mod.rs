pub mod app;
pub mod ui;

use std::io;
use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tracing::{error, info};
use crate::api::ApiClient;
use crate::config::Config;
use crate::models::{Priority, Status};
use app::{App, InputMode, ViewMode};
use ui::ui;

pub fn run_tui(client: &ApiClient, config: &Config) -> Result<()> {
    // Fetch before taking over the terminal
    let mut app = App::new(config);
    app.load(client);
    info!(projects = app.projects.len(), users = app.users.len(), "starting TUI");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app, client);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = %err, "TUI terminated");
    }
    res.map_err(Into::into)
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App, client: &ApiClient) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        let Event::Key(key) = event::read()? else { continue };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        match app.input_mode {
            InputMode::Normal => match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Down | KeyCode::Char('j') => app.next(),
                KeyCode::Up | KeyCode::Char('k') => app.previous(),
                KeyCode::Char('v') | KeyCode::Tab => app.toggle_view(),
                KeyCode::Char('r') => app.load(client),
                KeyCode::Char('T') => app.toggle_theme(),
                KeyCode::Char('d') | KeyCode::Delete => app.request_delete(),
                KeyCode::Char('/') => app.start_search(),
                code if app.view_mode == ViewMode::Projects => match code {
                    KeyCode::Char('1') => app.toggle_status(Status::Draft),
                    KeyCode::Char('2') => app.toggle_status(Status::InProgress),
                    KeyCode::Char('3') => app.toggle_status(Status::Completed),
                    KeyCode::Char('4') => app.toggle_status(Status::Cancelled),
                    KeyCode::Char('7') => app.toggle_priority(Priority::Low),
                    KeyCode::Char('8') => app.toggle_priority(Priority::Medium),
                    KeyCode::Char('9') => app.toggle_priority(Priority::High),
                    KeyCode::Char('u') => app.cycle_assignee(),
                    KeyCode::Char('x') => app.clear_filters(),
                    _ => {}
                },
                _ => {}
            },
            InputMode::Search => match key.code {
                KeyCode::Enter => app.finish_search(),
                KeyCode::Esc => app.cancel_search(),
                KeyCode::Char(c) => app.push_search_char(c),
                KeyCode::Backspace => app.pop_search_char(),
                _ => {}
            },
            InputMode::ConfirmDelete => match key.code {
                KeyCode::Char('y') | KeyCode::Enter => app.confirm_delete(client),
                KeyCode::Char('n') | KeyCode::Esc => app.cancel_delete(),
                _ => {}
            },
        }
    }
}
