use crate::controller::BlogController;
use crate::markup::{self, Element, Span};
use crate::model::Post;
use anyhow::{Context, Result};
use chrono::{DateTime, Local, Utc};
use colored::{ColoredString, Colorize};
use std::io::{self, Read};

/// Resolve post content from CLI arg, file, or stdin.
///
/// Content is taken verbatim; nothing is trimmed.
pub fn resolve_content(
    content: Option<String>,
    content_file: Option<String>,
) -> Result<Option<String>> {
    if let Some(c) = content {
        if c == "-" {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            return Ok(Some(buffer));
        }
        return Ok(Some(c));
    }
    if let Some(path) = content_file {
        let text = crate::transfer::import_from_file(Some(std::path::Path::new(&path)))
            .with_context(|| format!("Failed to read content from {}", path))?;
        return Ok(text);
    }
    Ok(None)
}

/// Creation time in the local timezone.
pub fn format_created(created_at: &DateTime<Utc>) -> String {
    created_at
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

fn style_span(span: &Span) -> ColoredString {
    let mut s = span.text.normal();
    if span.style.strong {
        s = s.bold();
    }
    if span.style.emphasis {
        s = s.italic();
    }
    if span.style.strikethrough {
        s = s.strikethrough();
    }
    if span.style.code {
        s = s.yellow();
    }
    if span.style.link {
        s = s.blue().underline();
    }
    s
}

fn styled_line(spans: &[Span]) -> String {
    spans.iter().map(|s| style_span(s).to_string()).collect()
}

/// Render display elements as terminal lines.
pub fn render_elements(elements: &[Element]) -> Vec<String> {
    let mut lines = Vec::new();

    for (i, element) in elements.iter().enumerate() {
        if i > 0 {
            lines.push(String::new());
        }
        match element {
            Element::Heading { level, spans } => {
                let text = markup::plain_text(spans);
                let heading = match level {
                    1 => text.bold().underline(),
                    2 => text.bold(),
                    _ => text.bold().dimmed(),
                };
                lines.push(heading.to_string());
            }
            Element::Paragraph { spans } => {
                lines.extend(styled_line(spans).lines().map(str::to_string));
            }
            Element::List {
                ordered,
                start,
                items,
            } => {
                for (n, item) in items.iter().enumerate() {
                    let marker = if *ordered {
                        format!("{}.", *start + n as u64)
                    } else {
                        "•".to_string()
                    };
                    let checkbox = match item.checked {
                        Some(true) => "[x] ",
                        Some(false) => "[ ] ",
                        None => "",
                    };
                    let text = styled_line(&item.spans);
                    let mut item_lines = text.lines();
                    let first = item_lines.next().unwrap_or_default();
                    lines.push(format!("  {} {}{}", marker, checkbox, first));
                    for rest in item_lines {
                        lines.push(format!("    {}", rest));
                    }
                }
            }
            Element::CodeBlock { code, .. } => {
                for line in code.lines() {
                    lines.push(format!("    {}", line.yellow()));
                }
            }
            Element::BlockQuote { spans } => {
                for line in styled_line(spans).lines() {
                    lines.push(format!("{} {}", "│".dimmed(), line.italic()));
                }
            }
            Element::Rule => lines.push("─".repeat(40).dimmed().to_string()),
        }
    }

    lines
}

/// Print a single post with its content rendered.
pub fn print_post(post: &Post) {
    println!("{} {}", post.id.cyan(), post.title.bold());
    println!();
    for line in render_elements(&markup::render(&post.content)) {
        println!("{}", line);
    }
    println!();
    println!("{}", format_created(&post.created_at).italic().dimmed());
}

/// Print every loaded post, newest first.
pub fn print_post_list(controller: &BlogController) {
    if controller.posts().is_empty() {
        println!("No posts found.");
        return;
    }

    for (i, (post, elements)) in controller.rendered_posts().enumerate() {
        if i > 0 {
            println!("{}", "─".repeat(60).dimmed());
        }
        println!("{} {}", post.id.cyan(), post.title.bold());
        println!();
        for line in render_elements(&elements) {
            println!("{}", line);
        }
        println!();
        println!("{}", format_created(&post.created_at).italic().dimmed());
    }
}

/// Print posts with their Markdown as stored.
pub fn print_raw_post_list(posts: &[Post]) {
    if posts.is_empty() {
        println!("No posts found.");
        return;
    }

    for post in posts {
        println!(
            "{} {} {}",
            post.id.cyan(),
            post.title.bold(),
            format_created(&post.created_at).dimmed()
        );
        println!("{}", post.content);
        println!();
    }
}
