//! # mdblog - A minimal Markdown blog authoring tool
//!
//! mdblog lets an author write a post (title plus Markdown content), publish
//! it to a document store, browse every post rendered newest first, delete
//! posts, and move draft content to and from `.md` files.
//!
//! ## Features
//!
//! - **Document stores**: Posts live in Google Cloud Firestore (REST) or in a
//!   local `.mdblog/` directory of Markdown files with TOML frontmatter
//! - **Rendering**: CommonMark plus strikethrough and task lists
//! - **TUI**: Side-by-side draft editor and rendered feed
//! - **Export/Import**: Draft content as plain `.md` files
//!
//! ## Quick Start
//!
//! ```bash
//! # Initialize a blog backed by local files
//! mdblog init
//!
//! # Publish a post
//! mdblog publish "Hello" -c "# Hi"
//!
//! # List all posts, newest first
//! mdblog list
//!
//! # Delete a post
//! mdblog delete <id>
//! ```
//!
//! ## Modules
//!
//! - [`cli`]: Command-line interface definitions and handlers
//! - [`config`]: Configuration loading and management
//! - [`controller`]: Draft and feed state with the publish/delete/reload flow
//! - [`error`]: Error types and result aliases
//! - [`markup`]: Markdown to display elements
//! - [`model`]: Post records and the draft
//! - [`storage`]: Post store backends and the repository over them
//! - [`transfer`]: Export and import of `.md` files
//! - [`tui`]: Terminal user interface
//! - [`validation`]: Input validation utilities

/// Command-line interface definitions using clap.
pub mod cli;

/// Configuration loading and management.
///
/// Handles `.mdblog.toml` configuration files and project discovery.
pub mod config;

/// Draft and feed state shared by the CLI and the TUI.
pub mod controller;

/// Error types and result aliases.
///
/// Defines the `BlogError` enum and `Result<T>` type alias.
pub mod error;

/// Tracing subscriber setup for stderr and rotating log files.
pub mod logging;

/// Markdown rendering into display elements.
pub mod markup;

/// Data models: `Post`, `RawPost`, `NewPost`, and `Draft`.
pub mod model;

/// Post storage layer.
///
/// The `PostStore` trait, its Firestore, file and in-memory backends, and
/// the `PostRepository` that validates and stamps new posts.
pub mod storage;

/// Export of the draft to `.md` files and import back from them.
pub mod transfer;

/// Terminal user interface.
///
/// Interactive TUI built with ratatui for writing and browsing posts.
pub mod tui;

/// Input validation utilities.
pub mod validation;
