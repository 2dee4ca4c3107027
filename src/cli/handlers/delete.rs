use anyhow::{Context, Result};
use colored::Colorize;
use std::io::{self, Write};

use super::CommandContext;

pub fn handle_delete(ctx: &mut CommandContext, id: String, force: bool, json: bool) -> Result<()> {
    if !force && !json {
        print!("Delete {} permanently? [y/N] ", id.cyan());
        io::stdout().flush()?;
        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Cancelled.");
            return Ok(());
        }
    }

    ctx.controller
        .delete(&id)
        .with_context(|| format!("Failed to delete post {}", id))?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "action": "deleted",
                "id": id,
                "remaining": ctx.controller.posts().len(),
            }))?
        );
    } else {
        println!("{} {}", "Deleted".red(), id.cyan());
    }
    Ok(())
}
