use anyhow::{Context, Result};
use colored::Colorize;

use super::CommandContext;
use super::utils::{print_post, resolve_content};

pub fn handle_publish(
    ctx: &mut CommandContext,
    title: String,
    content: Option<String>,
    content_file: Option<String>,
    json: bool,
) -> Result<()> {
    let content = resolve_content(content, content_file)?.unwrap_or_default();

    ctx.controller.set_title(title);
    ctx.controller.set_content(content);
    let id = ctx.controller.publish().context("Failed to publish post")?;

    let post = ctx.controller.posts().iter().find(|p| p.id == id);

    if json {
        match post {
            Some(post) => println!("{}", serde_json::to_string_pretty(post)?),
            None => println!("{}", serde_json::json!({ "id": id })),
        }
    } else {
        println!("{} {}", "Published".green(), id.cyan());
        if let Some(post) = post {
            println!();
            print_post(post);
        }
    }
    Ok(())
}
