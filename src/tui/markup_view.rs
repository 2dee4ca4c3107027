//! Rendered Markdown as ratatui lines.

use super::theme::theme;
use crate::cli::handlers::format_created;
use crate::controller::BlogController;
use crate::markup::{self, Element, Span as MarkupSpan};
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};

fn span_style(span: &MarkupSpan) -> Style {
    let t = theme();
    let mut style = Style::default().fg(t.text);
    if span.style.strong {
        style = style.add_modifier(Modifier::BOLD);
    }
    if span.style.emphasis {
        style = style.add_modifier(Modifier::ITALIC);
    }
    if span.style.strikethrough {
        style = style.add_modifier(Modifier::CROSSED_OUT);
    }
    if span.style.code {
        style = style.fg(t.code);
    }
    if span.style.link {
        style = style.fg(t.link).add_modifier(Modifier::UNDERLINED);
    }
    style
}

/// Split styled spans into lines on embedded newlines.
fn styled_lines(spans: &[MarkupSpan], base: Style) -> Vec<Vec<Span<'static>>> {
    let mut lines = vec![Vec::new()];
    for span in spans {
        let style = base.patch(span_style(span));
        for (i, part) in span.text.split('\n').enumerate() {
            if i > 0 {
                lines.push(Vec::new());
            }
            if !part.is_empty() {
                if let Some(current) = lines.last_mut() {
                    current.push(Span::styled(part.to_string(), style));
                }
            }
        }
    }
    lines
}

/// Lines for one element, without surrounding blank lines.
pub fn element_lines(element: &Element) -> Vec<Line<'static>> {
    let t = theme();
    match element {
        Element::Heading { level, spans } => {
            let marker = "#".repeat(*level as usize);
            vec![Line::from(vec![
                Span::styled(format!("{} ", marker), Style::default().fg(t.text_muted)),
                Span::styled(markup::plain_text(spans), t.heading_style(*level)),
            ])]
        }
        Element::Paragraph { spans } => styled_lines(spans, Style::default())
            .into_iter()
            .map(Line::from)
            .collect(),
        Element::List {
            ordered,
            start,
            items,
        } => {
            let mut lines = Vec::new();
            for (n, item) in items.iter().enumerate() {
                let marker = if *ordered {
                    format!("  {}. ", *start + n as u64)
                } else {
                    "  • ".to_string()
                };
                let checkbox = match item.checked {
                    Some(true) => "[x] ",
                    Some(false) => "[ ] ",
                    None => "",
                };
                for (i, mut spans) in styled_lines(&item.spans, Style::default())
                    .into_iter()
                    .enumerate()
                {
                    if i == 0 {
                        spans.insert(0, Span::raw(checkbox));
                        let marker_style = Style::default().fg(t.list_marker);
                        spans.insert(0, Span::styled(marker.clone(), marker_style));
                    } else {
                        spans.insert(0, Span::raw("    "));
                    }
                    lines.push(Line::from(spans));
                }
            }
            lines
        }
        Element::CodeBlock { code, .. } => code
            .lines()
            .map(|l| {
                Line::from(Span::styled(
                    format!("    {}", l),
                    Style::default().fg(t.code),
                ))
            })
            .collect(),
        Element::BlockQuote { spans } => {
            let base = Style::default().fg(t.quote).add_modifier(Modifier::ITALIC);
            styled_lines(spans, base)
                .into_iter()
                .map(|mut spans| {
                    spans.insert(0, Span::styled("│ ", Style::default().fg(t.text_muted)));
                    Line::from(spans)
                })
                .collect()
        }
        Element::Rule => vec![Line::from(Span::styled(
            "─".repeat(40),
            Style::default().fg(t.separator),
        ))],
    }
}

/// Lines for a rendered document, a blank line between elements.
pub fn document_lines(elements: &[Element]) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for (i, element) in elements.iter().enumerate() {
        if i > 0 {
            lines.push(Line::default());
        }
        lines.extend(element_lines(element));
    }
    lines
}

/// The whole feed, plus the line offset where each post starts.
pub fn feed_lines(
    controller: &BlogController,
    selected: usize,
) -> (Vec<Line<'static>>, Vec<usize>) {
    let t = theme();
    let mut lines = Vec::new();
    let mut offsets = Vec::new();

    for (i, (post, elements)) in controller.rendered_posts().enumerate() {
        if i > 0 {
            lines.push(Line::from(Span::styled(
                "─".repeat(60),
                Style::default().fg(t.separator),
            )));
        }
        offsets.push(lines.len());

        let is_selected = i == selected;
        let marker = if is_selected {
            Span::styled(
                format!("{} ", t.row_marker),
                Style::default().fg(t.selection_indicator),
            )
        } else {
            Span::raw("  ")
        };
        lines.push(Line::from(vec![
            marker,
            Span::styled(post.title.clone(), t.post_title_style(is_selected)),
            Span::styled(format!("  {}", post.id), Style::default().fg(t.id)),
        ]));
        lines.push(Line::default());
        lines.extend(document_lines(&elements));
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            format_created(&post.created_at),
            Style::default()
                .fg(t.timestamp)
                .add_modifier(Modifier::ITALIC),
        )));
    }

    (lines, offsets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStore, PostRepository};

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_heading_then_paragraph() {
        let lines = document_lines(&markup::render("# Hi\n\nWorld"));
        let texts: Vec<_> = lines.iter().map(line_text).collect();
        assert_eq!(texts, vec!["# Hi", "", "World"]);
    }

    #[test]
    fn test_list_and_quote() {
        let lines = document_lines(&markup::render("- [x] done\n\n> said"));
        let texts: Vec<_> = lines.iter().map(line_text).collect();
        assert_eq!(texts, vec!["  • [x] done", "", "│ said"]);
    }

    #[test]
    fn test_feed_offsets() {
        let store = MemoryStore::new();
        let mut controller = BlogController::new(PostRepository::new(store), "blogpost");
        controller.set_title("First");
        controller.set_content("one");
        controller.publish().unwrap();
        controller.set_title("Second");
        controller.set_content("two");
        controller.publish().unwrap();

        let (lines, offsets) = feed_lines(&controller, 0);
        assert_eq!(offsets.len(), 2);
        assert_eq!(offsets[0], 0);
        // title, blank, body, blank, date, separator
        assert_eq!(offsets[1], 6);
        assert!(line_text(&lines[offsets[1]]).contains(&controller.posts()[1].title));
    }
}
