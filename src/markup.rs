//! Markdown to display elements.
//!
//! [`render`] is pure: the same source always yields the same elements. The
//! TUI and the CLI each turn elements into their own styled output.

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};

/// Inline styling carried by a run of text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpanStyle {
    pub strong: bool,
    pub emphasis: bool,
    pub strikethrough: bool,
    pub code: bool,
    pub link: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub style: SpanStyle,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    pub spans: Vec<Span>,
    pub checked: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    Heading { level: u8, spans: Vec<Span> },
    Paragraph { spans: Vec<Span> },
    List {
        ordered: bool,
        start: u64,
        items: Vec<ListItem>,
    },
    CodeBlock { lang: Option<String>, code: String },
    BlockQuote { spans: Vec<Span> },
    Rule,
}

/// Concatenate the text of a run of spans.
pub fn plain_text(spans: &[Span]) -> String {
    spans.iter().map(|s| s.text.as_str()).collect()
}

impl Element {
    /// The element's text without styling.
    pub fn plain(&self) -> String {
        match self {
            Element::Heading { spans, .. }
            | Element::Paragraph { spans }
            | Element::BlockQuote { spans } => plain_text(spans),
            Element::List { items, .. } => items
                .iter()
                .map(|i| plain_text(&i.spans))
                .collect::<Vec<_>>()
                .join("\n"),
            Element::CodeBlock { code, .. } => code.clone(),
            Element::Rule => String::new(),
        }
    }
}

#[derive(Default)]
struct Builder {
    elements: Vec<Element>,
    spans: Vec<Span>,
    style: SpanStyle,
    heading: Option<u8>,
    quote_depth: usize,
    quote_continues: bool,
    // (ordered, start, items) for the outermost open list
    list: Option<(bool, u64, Vec<ListItem>)>,
    list_depth: usize,
    item_checked: Option<bool>,
    code: Option<(Option<String>, String)>,
}

impl Builder {
    fn push_text(&mut self, text: &str) {
        if let Some((_, ref mut code)) = self.code {
            code.push_str(text);
            return;
        }
        if let Some(last) = self.spans.last_mut() {
            if last.style == self.style {
                last.text.push_str(text);
                return;
            }
        }
        self.spans.push(Span {
            text: text.to_string(),
            style: self.style,
        });
    }

    /// Start a new line inside a list item unless one is already open.
    fn break_item_line(&mut self) {
        if self.spans.last().is_some_and(|s| !s.text.ends_with('\n')) {
            self.push_text("\n");
        }
    }

    fn take_spans(&mut self) -> Vec<Span> {
        let mut spans = std::mem::take(&mut self.spans);
        if let Some(last) = spans.last_mut() {
            let trimmed = last.text.trim_end_matches('\n').len();
            last.text.truncate(trimmed);
        }
        spans.retain(|s| !s.text.is_empty());
        spans
    }

    fn finish_block(&mut self) {
        let spans = self.take_spans();
        if spans.is_empty() {
            return;
        }
        if let Some(level) = self.heading.take() {
            self.elements.push(Element::Heading { level, spans });
        } else if self.quote_depth > 0 {
            // consecutive paragraphs in one quote merge into one element
            if self.quote_continues {
                if let Some(Element::BlockQuote { spans: existing }) = self.elements.last_mut() {
                    existing.push(Span {
                        text: "\n".to_string(),
                        style: SpanStyle::default(),
                    });
                    existing.extend(spans);
                    return;
                }
            }
            self.elements.push(Element::BlockQuote { spans });
        } else {
            self.elements.push(Element::Paragraph { spans });
        }
    }
}

/// Render Markdown source to display elements.
pub fn render(source: &str) -> Vec<Element> {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let mut b = Builder::default();

    for event in Parser::new_ext(source, options) {
        match event {
            Event::Start(tag) => match tag {
                Tag::Heading { level, .. } => {
                    if b.list_depth == 0 {
                        b.heading = Some(heading_level(level));
                    } else {
                        // a heading inside a list item stays in the item, in bold
                        b.break_item_line();
                        b.style.strong = true;
                    }
                }
                Tag::BlockQuote(_) => {
                    b.quote_depth += 1;
                    b.quote_continues = false;
                }
                Tag::CodeBlock(kind) => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(lang) if !lang.is_empty() => Some(lang.to_string()),
                        _ => None,
                    };
                    b.code = Some((lang, String::new()));
                }
                Tag::List(start) => {
                    b.list_depth += 1;
                    if b.list_depth == 1 {
                        b.list = Some((start.is_some(), start.unwrap_or(1), Vec::new()));
                    } else {
                        // nested list items continue the parent item's text
                        b.push_text("\n");
                    }
                }
                Tag::Item => {
                    if b.list_depth == 1 {
                        b.spans.clear();
                        b.item_checked = None;
                    }
                }
                Tag::Emphasis => b.style.emphasis = true,
                Tag::Strong => b.style.strong = true,
                Tag::Strikethrough => b.style.strikethrough = true,
                Tag::Link { .. } => b.style.link = true,
                _ => {}
            },
            Event::End(tag) => match tag {
                TagEnd::Heading(_) if b.list_depth > 0 => {
                    b.style.strong = false;
                    b.push_text("\n");
                }
                TagEnd::HtmlBlock if b.list_depth > 0 => b.break_item_line(),
                TagEnd::Heading(_) | TagEnd::HtmlBlock => b.finish_block(),
                TagEnd::Paragraph => {
                    if b.list_depth == 0 {
                        b.finish_block();
                        if b.quote_depth > 0 {
                            b.quote_continues = true;
                        }
                    } else {
                        b.push_text("\n");
                    }
                }
                TagEnd::BlockQuote(_) => {
                    b.quote_depth = b.quote_depth.saturating_sub(1);
                    b.quote_continues = false;
                }
                TagEnd::CodeBlock => {
                    if let Some((lang, mut code)) = b.code.take() {
                        if code.ends_with('\n') {
                            code.pop();
                        }
                        if b.list_depth > 0 {
                            // code inside a list item becomes code-styled lines of the item
                            b.break_item_line();
                            let saved = b.style;
                            b.style = SpanStyle {
                                code: true,
                                ..SpanStyle::default()
                            };
                            b.push_text(&code);
                            b.style = saved;
                            b.push_text("\n");
                        } else {
                            b.elements.push(Element::CodeBlock { lang, code });
                        }
                    }
                }
                TagEnd::Item => {
                    if b.list_depth == 1 {
                        let spans = b.take_spans();
                        let checked = b.item_checked.take();
                        if let Some((_, _, ref mut items)) = b.list {
                            items.push(ListItem { spans, checked });
                        }
                    } else {
                        b.push_text("\n");
                    }
                }
                TagEnd::List(_) => {
                    b.list_depth = b.list_depth.saturating_sub(1);
                    if b.list_depth == 0 {
                        if let Some((ordered, start, items)) = b.list.take() {
                            b.elements.push(Element::List {
                                ordered,
                                start,
                                items,
                            });
                        }
                    }
                }
                TagEnd::Emphasis => b.style.emphasis = false,
                TagEnd::Strong => b.style.strong = false,
                TagEnd::Strikethrough => b.style.strikethrough = false,
                TagEnd::Link => b.style.link = false,
                _ => {}
            },
            Event::Text(text) => b.push_text(&text),
            Event::Code(code) => {
                let saved = b.style;
                b.style.code = true;
                b.push_text(&code);
                b.style = saved;
            }
            Event::SoftBreak | Event::HardBreak => b.push_text("\n"),
            Event::Html(html) | Event::InlineHtml(html) => b.push_text(&html),
            Event::Rule if b.list_depth > 0 => b.break_item_line(),
            Event::Rule => b.elements.push(Element::Rule),
            Event::TaskListMarker(checked) => b.item_checked = Some(checked),
            _ => {}
        }
    }

    b.finish_block();
    b.elements
}

fn heading_level(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}
