use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use mdblog::cli::handlers::{
    CommandContext, InitParams, handle_delete, handle_export, handle_init, handle_list,
    handle_publish, handle_tui,
};
use mdblog::cli::{Cli, Commands};
use mdblog::config::BlogConfig;
use mdblog::logging::{self, LogTarget};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // The TUI owns the terminal, so its logs only go to a file.
    let target = match cli.command {
        Commands::Tui => LogTarget {
            stderr: false,
            file: cli
                .log_file
                .as_ref()
                .map(PathBuf::from)
                .or_else(logging::default_log_file),
        },
        _ => LogTarget {
            stderr: true,
            file: cli.log_file.as_ref().map(PathBuf::from),
        },
    };
    logging::init(cli.verbose, target);

    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Init {
            backend,
            project_id,
            collection,
            base_url,
        } => handle_init(InitParams {
            backend,
            project_id,
            collection,
            base_url,
        }),
        Commands::List { raw, json } => handle_list(&mut context(config_path)?, raw, json),
        Commands::Publish {
            title,
            content,
            content_file,
            json,
        } => handle_publish(&mut context(config_path)?, title, content, content_file, json),
        Commands::Delete { id, force, json } => {
            handle_delete(&mut context(config_path)?, id, force, json)
        }
        Commands::Export {
            title,
            content_file,
            out_dir,
            json,
        } => handle_export(&mut context(config_path)?, title, content_file, out_dir, json),
        Commands::Tui => handle_tui(context(config_path)?),
    }
}

fn context(config_path: Option<&str>) -> Result<CommandContext> {
    let (config, root) = load_config(config_path)?;
    tracing::debug!(root = %root.display(), backend = %config.blog.backend, "Loaded configuration");
    CommandContext::new(config, root)
}

fn load_config(explicit: Option<&str>) -> Result<(BlogConfig, PathBuf)> {
    match explicit {
        Some(path) => BlogConfig::load_from(Path::new(path)),
        None => {
            let cwd = std::env::current_dir()?;
            BlogConfig::load(&cwd)
        }
    }
    .context("Failed to load mdblog configuration")
}
