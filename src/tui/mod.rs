//! Terminal user interface for mdblog.
//!
//! The left half holds the draft (title and Markdown content), the right
//! half the rendered feed of published posts, newest first.
//!
//! ## Usage
//!
//! ```bash
//! mdblog tui
//! ```
//!
//! ## Keybindings
//!
//! - `t`: Edit title
//! - `e`: Edit content
//! - `Esc`: Stop editing
//! - `p`: Publish the draft
//! - `d`: Delete the selected post (asks first)
//! - `x`: Export the draft as `<title>.md`
//! - `i`: Import a `.md` file into the draft content
//! - `r`: Reload the feed
//! - `j/k`, `↓/↑`: Select post
//! - `J/K`: Scroll the feed
//! - `?`: Help
//! - `q`: Quit

pub mod app;
mod markup_view;
pub mod theme;
mod ui;

pub use app::{App, InputMode, run_tui};
