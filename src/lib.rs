//! # Projectust
//!
//! A terminal administration client for a projects/users REST backend.
//! A scriptable CLI covers every create/read/update/delete operation, and an
//! interactive TUI offers a dashboard, live project filtering and a
//! light/dark theme.
//!
//! ## Features
//!
//! *   **Dashboard**: Totals per status and the number of overdue projects.
//! *   **Filtering**: Free-text search over title and description, multi-select
//!     status and priority, and an assignee selector (anyone, unassigned, or a user).
//! *   **Projects and users**: List, show, add, edit and remove, with input
//!     validated before anything is sent.
//!
//! ## Usage
//!
//! ```bash
//! # Interactive mode
//! projectust
//!
//! # Dashboard
//! projectust dashboard
//!
//! # Filtered list
//! projectust project list --search report --status draft --status in_progress --assignee unassigned
//!
//! # Create and edit
//! projectust project add "Q3 Budget" --priority high --due 2025-09-30 --budget 12000 --assignee 3
//! projectust project edit 7 --status completed --due none
//!
//! # Users
//! projectust user add "Ana Pérez" ana@example.com --role manager
//! ```
//!
//! #### TUI Key Bindings
//!
//! *   `q`: Quit
//! *   `v` / `Tab`: Next view (Dashboard, Projects, Users)
//! *   `/`: Search projects (filters as you type)
//! *   `1`-`4`: Toggle status filter (draft, in progress, completed, cancelled)
//! *   `7`-`9`: Toggle priority filter (low, medium, high)
//! *   `u`: Cycle assignee filter
//! *   `x`: Clear filters
//! *   `d`: Delete selected project or user
//! *   `r`: Reload from the backend
//! *   `T`: Toggle light/dark theme
//!
//! ## Configuration
//!
//! Settings live in `<config dir>/projectust/config.toml`:
//!
//! ```toml
//! api_url = "http://localhost:8000"
//! theme = "dark"
//! ```
//!
//! `PROJECTUST_API_URL` overrides the backend URL and `PROJECTUST_CONFIG` the
//! file location. Logs are written to `<data dir>/projectust/projectust.log`;
//! set `PROJECTUST_LOG` (e.g. `debug`) to change the level.

pub mod api;
pub mod commands;
pub mod config;
pub mod display;
pub mod error;
pub mod filter;
pub mod logging;
pub mod models;
pub mod stats;
pub mod tui;
pub mod validation;
