mod delete;
mod export;
mod init;
mod list;
mod publish;
mod tui;
mod utils;

pub use delete::handle_delete;
pub use export::handle_export;
pub use init::{InitParams, handle_init};
pub use list::handle_list;
pub use publish::handle_publish;
pub use tui::handle_tui;
pub use utils::format_created;

use crate::config::BlogConfig;
use crate::controller::BlogController;
use crate::storage::{self, PostRepository};
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Common context passed to all command handlers
pub struct CommandContext {
    pub config: BlogConfig,
    pub root: PathBuf,
    pub controller: BlogController,
}

impl CommandContext {
    pub fn new(config: BlogConfig, root: PathBuf) -> Result<Self> {
        let store = storage::open(&config, &root).context("Failed to open the post store")?;
        let controller = BlogController::new(
            PostRepository::from_boxed(store),
            config.blog.fallback_name.clone(),
        );
        Ok(Self {
            config,
            root,
            controller,
        })
    }
}
