use anyhow::{bail, Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use tracing::debug;

use projectust::api::ApiClient;
use projectust::commands::*;
use projectust::config::{Config, Theme};
use projectust::filter::{AssigneeFilter, FilterCriteria};
use projectust::logging::init_logging;
use projectust::models::{Priority, Role, Status};
use projectust::tui::run_tui;

#[derive(Parser)]
#[command(name = "projectust")]
#[command(about = "Terminal admin client for projects and users", long_about = None)]
struct Cli {
    /// Backend URL, overrides the config file
    #[arg(long, global = true)]
    api_url: Option<String>,
    /// Mirror log output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show project totals and overdue count
    Dashboard,
    /// Check that the backend is reachable
    Status,
    /// Manage projects
    Project {
        #[command(subcommand)]
        command: ProjectCommands,
    },
    /// Manage users
    User {
        #[command(subcommand)]
        command: UserCommands,
    },
    /// Inspect or change local settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell, elvish)
        shell: String,
    },
    /// Open interactive TUI
    Ui,
}

#[derive(Subcommand)]
enum ProjectCommands {
    /// List projects, optionally filtered
    List {
        /// Case-insensitive text to find in title or description
        #[arg(long)]
        search: Option<String>,
        /// Only these statuses (repeatable)
        #[arg(short, long = "status")]
        statuses: Vec<Status>,
        /// Only these priorities (repeatable)
        #[arg(short, long = "priority")]
        priorities: Vec<Priority>,
        /// "unassigned" or a user id
        #[arg(short, long)]
        assignee: Option<AssigneeFilter>,
    },
    /// Show one project
    Show {
        id: u64,
    },
    /// Add a new project
    Add {
        /// Project title (quoted if it has spaces)
        title: String,
        #[command(flatten)]
        changes: ProjectChanges,
    },
    /// Edit a project
    Edit {
        id: u64,
        /// New title
        #[arg(short, long)]
        title: Option<String>,
        #[command(flatten)]
        changes: ProjectChanges,
    },
    /// Remove a project
    Remove {
        id: u64,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Subcommand)]
enum UserCommands {
    /// List users
    List,
    /// Show one user
    Show {
        id: u64,
    },
    /// Add a new user
    Add {
        /// Full name
        name: String,
        /// Email address (unique)
        email: String,
        /// Role (admin, manager, user)
        #[arg(short, long, default_value = "user")]
        role: Role,
        /// Create the user as inactive
        #[arg(long)]
        inactive: bool,
    },
    /// Edit a user
    Edit {
        id: u64,
        #[command(flatten)]
        changes: UserChanges,
    },
    /// Remove a user
    Remove {
        id: u64,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Print config path and create default file if missing
    Path,
    /// Set the TUI theme (light, dark)
    Theme {
        #[arg(value_enum)]
        theme: Theme,
    },
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    if let Err(e) = init_logging(cli.verbose) {
        eprintln!("Warning: logging disabled: {:#}", e);
    }

    // Commands that never talk to the backend
    match &cli.command {
        Some(Commands::Completions { shell }) => {
            let shell_enum = match shell.as_str() {
                "bash" => Shell::Bash,
                "zsh" => Shell::Zsh,
                "fish" => Shell::Fish,
                "powershell" => Shell::PowerShell,
                "elvish" => Shell::Elvish,
                _ => bail!("Unsupported shell: {}", shell),
            };
            let mut cmd = Cli::command();
            generate(shell_enum, &mut cmd, "projectust", &mut io::stdout());
            return Ok(());
        }
        Some(Commands::Config { command }) => {
            return match command {
                ConfigCommands::Path => cmd_config_path(),
                ConfigCommands::Theme { theme } => cmd_config_theme(*theme),
            };
        }
        _ => {}
    }

    let mut config = Config::load().context("Failed to load configuration")?;
    if let Some(url) = cli.api_url {
        config.api_url = url;
    }
    debug!(api_url = %config.api_url, "using backend");
    let client = ApiClient::new(&config.api_url)?;

    match cli.command {
        Some(Commands::Dashboard) => cmd_dashboard(&client),
        Some(Commands::Status) => cmd_status(&client),
        Some(Commands::Project { command }) => match command {
            ProjectCommands::List { search, statuses, priorities, assignee } => {
                let criteria = FilterCriteria {
                    search_text: search.unwrap_or_default(),
                    statuses: statuses.into_iter().collect(),
                    priorities: priorities.into_iter().collect(),
                    assignee: assignee.unwrap_or_default(),
                };
                cmd_project_list(&client, &criteria)
            }
            ProjectCommands::Show { id } => cmd_project_show(&client, id),
            ProjectCommands::Add { title, changes } => cmd_project_add(&client, title, changes),
            ProjectCommands::Edit { id, title, changes } => cmd_project_edit(&client, id, title, changes),
            ProjectCommands::Remove { id, force } => cmd_project_remove(&client, id, force),
        },
        Some(Commands::User { command }) => match command {
            UserCommands::List => cmd_user_list(&client),
            UserCommands::Show { id } => cmd_user_show(&client, id),
            UserCommands::Add { name, email, role, inactive } => cmd_user_add(&client, name, email, role, inactive),
            UserCommands::Edit { id, changes } => cmd_user_edit(&client, id, changes),
            UserCommands::Remove { id, force } => cmd_user_remove(&client, id, force),
        },
        Some(Commands::Ui) | None => run_tui(&client, &config),
        Some(Commands::Completions { .. }) | Some(Commands::Config { .. }) => Ok(()),
    }
}
