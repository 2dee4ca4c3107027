use crate::transfer::MARKDOWN_MIME;
use anyhow::{Context, Result};
use colored::Colorize;
use std::path::{Path, PathBuf};

use super::CommandContext;

pub fn handle_export(
    ctx: &mut CommandContext,
    title: String,
    content_file: String,
    out_dir: Option<String>,
    json: bool,
) -> Result<()> {
    ctx.controller.set_title(title);
    ctx.controller
        .import(Some(Path::new(&content_file)))
        .with_context(|| format!("Failed to read {}", content_file))?;

    let dir = match out_dir {
        Some(dir) => PathBuf::from(dir),
        None => std::env::current_dir()?,
    };
    let path = ctx
        .controller
        .export(&dir)
        .with_context(|| format!("Failed to export into {}", dir.display()))?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "path": path,
                "mime": MARKDOWN_MIME,
                "bytes": ctx.controller.draft().content.len(),
            }))?
        );
    } else {
        println!("{} {}", "Exported".green(), path.display());
    }
    Ok(())
}
