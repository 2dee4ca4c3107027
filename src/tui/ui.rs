use super::app::{App, InputMode};
use super::markup_view;
use super::theme::theme;
use rat_text::HasScreenCursor;
use rat_text::text_area::TextArea;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, StatefulWidget, Wrap},
};

pub fn draw(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Editor and feed
            Constraint::Length(1), // Footer
        ])
        .split(f.area());

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[0]);

    draw_draft(f, app, columns[0]);
    draw_feed(f, app, columns[1]);
    draw_footer(f, app, chunks[1]);

    match app.input_mode {
        InputMode::Alert => draw_alert(f, app),
        InputMode::DeleteConfirm => draw_delete_confirm(f, app),
        InputMode::ImportPicker => draw_import_picker(f, app),
        InputMode::Help => draw_help_popup(f),
        _ => {}
    }
}

fn pane(title: &str, focused: bool) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_set(border::ROUNDED)
        .border_style(theme().border_style(focused))
}

fn draw_draft(f: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let editing_title = app.input_mode == InputMode::EditTitle;
    let editing_content = app.input_mode == InputMode::EditContent;

    // Title, scrolled horizontally to keep its end in view
    let title_block = pane(" Title ", editing_title);
    let title_inner = title_block.inner(chunks[0]);
    let title_width = Line::from(app.title.as_str()).width().min(u16::MAX as usize) as u16;
    let title_x_scroll = title_width.saturating_sub(title_inner.width.saturating_sub(1));
    let title = Paragraph::new(app.title.as_str())
        .style(Style::default().fg(theme().text))
        .scroll((0, title_x_scroll))
        .block(title_block);
    f.render_widget(title, chunks[0]);

    if editing_title {
        f.set_cursor_position((
            title_inner.x + (title_width - title_x_scroll),
            title_inner.y,
        ));
    }

    // Content: the text area scrolls itself around its cursor
    let t = theme();
    let content_block = pane(" Content (Markdown) ", editing_content);
    let content_inner = content_block.inner(chunks[1]);
    f.render_widget(content_block, chunks[1]);

    app.content_area.focus.set(editing_content);
    let widget = TextArea::new()
        .style(Style::default().fg(t.text).bg(Color::Reset))
        .select_style(Style::default().fg(Color::Black).bg(t.text_highlight));
    widget.render(content_inner, f.buffer_mut(), &mut app.content_area);

    if editing_content {
        if let Some((cx, cy)) = app.content_area.screen_cursor() {
            f.set_cursor_position((cx, cy));
        }
    }
}

/// Rows these lines take once word-wrapped to `width`, as the feed wraps them.
fn wrapped_rows(lines: &[Line<'static>], width: u16) -> usize {
    Paragraph::new(lines.to_vec())
        .wrap(Wrap { trim: false })
        .line_count(width)
}

fn draw_feed(f: &mut Frame, app: &mut App, area: Rect) {
    let t = theme();
    let count = app.controller.posts().len();
    let block = Block::default()
        .title(Line::from(vec![
            Span::raw(" Posts "),
            Span::styled(format!("({}) ", count), Style::default().fg(t.text_muted)),
        ]))
        .borders(Borders::ALL)
        .border_set(border::ROUNDED)
        .border_style(t.border_style(false));
    let inner = block.inner(area);

    if count == 0 {
        let empty = Paragraph::new(Span::styled(
            "No posts yet. Write a draft and press p to publish.",
            Style::default().fg(t.text_muted),
        ))
        .wrap(Wrap { trim: false })
        .block(block);
        f.render_widget(empty, area);
        return;
    }

    let (lines, offsets) = markup_view::feed_lines(&app.controller, app.selected_index);
    let total_rows = wrapped_rows(&lines, inner.width);

    if app.follow_selection {
        let start = offsets.get(app.selected_index).copied().unwrap_or(0);
        app.feed_scroll = wrapped_rows(&lines[..start], inner.width);
        app.follow_selection = false;
    }
    app.feed_scroll = app
        .feed_scroll
        .min(total_rows.saturating_sub(inner.height as usize));

    let feed = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((app.feed_scroll.min(u16::MAX as usize) as u16, 0))
        .block(block);
    f.render_widget(feed, area);
}

fn draw_footer(f: &mut Frame, app: &App, area: Rect) {
    let t = theme();
    let (label, colors) = match app.input_mode {
        InputMode::Normal | InputMode::Help => (" NORMAL ", t.mode_normal),
        InputMode::EditTitle => (" TITLE ", t.mode_edit),
        InputMode::EditContent => (" CONTENT ", t.mode_edit),
        InputMode::DeleteConfirm => (" DELETE ", t.mode_delete),
        InputMode::ImportPicker => (" IMPORT ", t.mode_import),
        InputMode::Alert => (" ALERT ", t.mode_alert),
    };
    let mode_indicator = Span::styled(label, Style::default().bg(colors.0).fg(colors.1));

    let help_text = match app.input_mode {
        InputMode::Normal | InputMode::Help => concat!(
            " t:title  e:content  p:publish  d:delete  x:export  i:import  r:reload",
            "  j/k:select  J/K:scroll  ?:help  q:quit "
        ),
        InputMode::EditTitle => " Enter:content  Esc:done ",
        InputMode::EditContent => " Esc:done ",
        InputMode::DeleteConfirm => " y/Enter:confirm  n/Esc:cancel ",
        InputMode::ImportPicker => " ↓/↑:navigate  Enter:import  Esc:cancel ",
        InputMode::Alert => " Enter/Esc:dismiss ",
    };

    let mut footer_spans = vec![mode_indicator];

    if let Some(ref msg) = app.message {
        footer_spans.push(Span::raw(" "));
        footer_spans.push(Span::styled(
            msg,
            Style::default().fg(t.message).add_modifier(Modifier::BOLD),
        ));
    }

    footer_spans.push(Span::styled(help_text, Style::default().fg(t.text_muted)));

    f.render_widget(Paragraph::new(Line::from(footer_spans)), area);
}

/// Rect centered in `r`, sized in percent of it.
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

fn popup_block(title: &str, color: Color) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_set(border::ROUNDED)
        .border_style(Style::default().fg(color))
}

fn draw_alert(f: &mut Frame, app: &App) {
    let area = centered_rect(40, 20, f.area());
    let t = theme();
    let text = app.alert.as_deref().unwrap_or_default();

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            text,
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled("Enter to dismiss", Style::default().fg(t.text_muted))),
    ];

    let popup = Paragraph::new(content)
        .alignment(Alignment::Center)
        .block(popup_block(" Cannot publish ", t.modal_border_alert));

    f.render_widget(Clear, area);
    f.render_widget(popup, area);
}

fn draw_delete_confirm(f: &mut Frame, app: &App) {
    let area = centered_rect(50, 20, f.area());
    let t = theme();

    let post_info = match app.selected_post() {
        Some(post) => format!("{} - {}", post.id, post.title),
        None => "No post selected".to_string(),
    };

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Are you sure you want to delete this post?",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(post_info, Style::default().fg(t.text_highlight))),
        Line::from(""),
        Line::from(vec![
            Span::styled("y", Style::default().fg(t.help_key).add_modifier(Modifier::BOLD)),
            Span::raw("/Enter = Yes    "),
            Span::styled(
                "n",
                Style::default()
                    .fg(t.modal_border_delete)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("/Esc = No"),
        ]),
    ];

    let popup = Paragraph::new(content)
        .alignment(Alignment::Center)
        .block(popup_block(" Delete Post ", t.modal_border_delete));

    f.render_widget(Clear, area);
    f.render_widget(popup, area);
}

fn draw_import_picker(f: &mut Frame, app: &mut App) {
    let area = centered_rect(50, 50, f.area());
    let t = theme();

    let items: Vec<ListItem> = app
        .picker_files
        .iter()
        .map(|path| {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| path.display().to_string());
            ListItem::new(Line::from(name))
        })
        .collect();

    let list = List::new(items)
        .block(popup_block(" Import Markdown ", t.modal_border))
        .highlight_style(
            Style::default()
                .fg(t.modal_cursor)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol(t.row_marker);

    f.render_widget(Clear, area);
    f.render_stateful_widget(list, area, &mut app.picker_state);
}

fn draw_help_popup(f: &mut Frame) {
    let area = centered_rect(60, 70, f.area());
    let t = theme();
    let key_style = Style::default().fg(t.help_key);

    let entry = |key: &'static str, text: &'static str| {
        Line::from(vec![Span::styled(key, key_style), Span::raw(text)])
    };

    let help_text = vec![
        Line::from(Span::styled(
            "Keyboard Shortcuts",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Draft",
            Style::default().add_modifier(Modifier::UNDERLINED),
        )),
        entry("t       ", "Edit title"),
        entry("e       ", "Edit content"),
        entry("Esc     ", "Stop editing"),
        entry("p       ", "Publish draft"),
        entry("x       ", "Export draft as <title>.md"),
        entry("i       ", "Import a .md file into the content"),
        Line::from(""),
        Line::from(Span::styled(
            "Posts",
            Style::default().add_modifier(Modifier::UNDERLINED),
        )),
        entry("j/k ↓/↑ ", "Select post"),
        entry("J/K     ", "Scroll feed"),
        entry("d       ", "Delete selected post"),
        entry("r       ", "Reload"),
        Line::from(""),
        entry("?       ", "Toggle help"),
        entry("q       ", "Quit"),
    ];

    let popup = Paragraph::new(help_text).block(popup_block(" Help ", t.modal_border));

    f.render_widget(Clear, area);
    f.render_widget(popup, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrapped_rows_follows_word_wrap() {
        // 20 columns of text, but whole words only fit one per 10-column row
        let lines = vec![Line::from("aaaaaa bbbbbb cccccc")];
        assert_eq!(wrapped_rows(&lines, 10), 3);
    }

    #[test]
    fn test_wrapped_rows_counts_blank_lines() {
        let lines = vec![Line::from("title"), Line::default(), Line::from("body")];
        assert_eq!(wrapped_rows(&lines, 40), 3);
        assert_eq!(wrapped_rows(&lines[..0], 40), 0);
    }
}
