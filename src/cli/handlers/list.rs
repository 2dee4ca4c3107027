use anyhow::{Context, Result};

use super::CommandContext;
use super::utils::{print_post_list, print_raw_post_list};

pub fn handle_list(ctx: &mut CommandContext, raw: bool, json: bool) -> Result<()> {
    ctx.controller.mount().context("Failed to load posts")?;

    if json {
        println!("{}", serde_json::to_string_pretty(ctx.controller.posts())?);
    } else if raw {
        print_raw_post_list(ctx.controller.posts());
    } else {
        print_post_list(&ctx.controller);
    }
    Ok(())
}
