use super::ui;
use crate::{
    controller::BlogController,
    error::{BlogError, MissingField, Result},
    model::Post,
    transfer,
};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use rat_text::text_area::{self, TextAreaState};
use ratatui::{Terminal, backend::CrosstermBackend, widgets::ListState};
use std::{io, path::PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    EditTitle,
    EditContent,
    DeleteConfirm,
    ImportPicker,
    Alert,
    Help,
}

pub struct App {
    pub controller: BlogController,
    /// Title field, edited by appending and removing at the end
    pub title: String,
    pub content_area: TextAreaState,
    pub input_mode: InputMode,
    pub selected_index: usize,
    /// First visible feed row
    pub feed_scroll: usize,
    /// Scroll the feed to the selected post on the next draw
    pub follow_selection: bool,
    pub alert: Option<String>,
    pub message: Option<String>,
    pub picker_files: Vec<PathBuf>,
    pub picker_state: ListState,
    /// Directory for exports and the import picker
    pub work_dir: PathBuf,
    pub should_quit: bool,
}

impl App {
    pub fn new(controller: BlogController, work_dir: PathBuf) -> Self {
        let title = controller.draft().title.clone();
        let content_area = create_content_area(&controller.draft().content);

        Self {
            controller,
            title,
            content_area,
            input_mode: InputMode::Normal,
            selected_index: 0,
            feed_scroll: 0,
            follow_selection: true,
            alert: None,
            message: None,
            picker_files: Vec::new(),
            picker_state: ListState::default(),
            work_dir,
            should_quit: false,
        }
    }

    /// Initial load of the feed.
    pub fn mount(&mut self) {
        if let Err(e) = self.controller.mount() {
            self.report_failure("Load", &e);
        }
    }

    pub fn selected_post(&self) -> Option<&Post> {
        self.controller.post(self.selected_index)
    }

    pub fn next(&mut self) {
        let len = self.controller.posts().len();
        if len > 0 && self.selected_index + 1 < len {
            self.selected_index += 1;
            self.follow_selection = true;
        }
    }

    pub fn previous(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
            self.follow_selection = true;
        }
    }

    pub fn scroll_down(&mut self) {
        self.feed_scroll = self.feed_scroll.saturating_add(1);
        self.follow_selection = false;
    }

    pub fn scroll_up(&mut self) {
        self.feed_scroll = self.feed_scroll.saturating_sub(1);
        self.follow_selection = false;
    }

    fn clamp_selection(&mut self) {
        let len = self.controller.posts().len();
        if self.selected_index >= len {
            self.selected_index = len.saturating_sub(1);
        }
        self.follow_selection = true;
    }

    /// Log a store or filesystem failure and show it on the status line.
    fn report_failure(&mut self, action: &str, err: &BlogError) {
        tracing::error!(error = %err, "{} failed", action);
        self.message = Some(format!("{} failed: {}", action, err));
    }

    fn sync_fields_from_draft(&mut self) {
        self.title = self.controller.draft().title.clone();
        self.content_area.set_text(&self.controller.draft().content);
    }

    pub fn reload(&mut self) {
        match self.controller.reload() {
            Ok(()) => {
                self.clamp_selection();
                self.message = Some("Refreshed".to_string());
            }
            Err(e) => self.report_failure("Reload", &e),
        }
    }

    pub fn publish(&mut self) {
        match self.controller.publish() {
            Ok(id) => {
                self.sync_fields_from_draft();
                self.selected_index = 0;
                self.follow_selection = true;
                self.message = Some(format!("Published {}", id));
            }
            Err(BlogError::Validation(field)) => {
                let text = match field {
                    MissingField::Title => "Title is required.",
                    MissingField::Content => "Content is required.",
                };
                self.alert = Some(text.to_string());
                self.input_mode = InputMode::Alert;
            }
            Err(e) => self.report_failure("Publish", &e),
        }
    }

    pub fn delete_selected(&mut self) {
        let Some(id) = self.selected_post().map(|p| p.id.clone()) else {
            return;
        };
        match self.controller.delete(&id) {
            Ok(()) => {
                self.clamp_selection();
                self.message = Some(format!("Deleted {}", id));
            }
            Err(e) => self.report_failure("Delete", &e),
        }
    }

    pub fn export_draft(&mut self) {
        match self.controller.export(&self.work_dir) {
            Ok(path) => self.message = Some(format!("Exported {}", path.display())),
            Err(e) => self.report_failure("Export", &e),
        }
    }

    pub fn open_import_picker(&mut self) {
        match transfer::list_markdown_files(&self.work_dir) {
            Ok(files) if files.is_empty() => {
                self.message = Some(format!("No .md files in {}", self.work_dir.display()));
            }
            Ok(files) => {
                self.picker_files = files;
                self.picker_state.select(Some(0));
                self.input_mode = InputMode::ImportPicker;
            }
            Err(e) => self.report_failure("Import", &e),
        }
    }

    /// Import the highlighted file, or nothing when the picker was cancelled.
    pub fn finish_import(&mut self, confirmed: bool) {
        let path = if confirmed {
            self.picker_state
                .selected()
                .and_then(|i| self.picker_files.get(i))
                .cloned()
        } else {
            None
        };
        self.input_mode = InputMode::Normal;
        self.picker_files.clear();
        self.picker_state.select(None);

        match self.controller.import(path.as_deref()) {
            Ok(true) => {
                self.content_area.set_text(&self.controller.draft().content);
                if let Some(path) = path {
                    self.message = Some(format!("Imported {}", path.display()));
                }
            }
            Ok(false) => {}
            Err(e) => self.report_failure("Import", &e),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        match self.input_mode {
            InputMode::Normal => self.handle_normal_key(key),
            InputMode::EditTitle => match key.code {
                KeyCode::Esc => self.input_mode = InputMode::Normal,
                KeyCode::Enter => self.input_mode = InputMode::EditContent,
                KeyCode::Char(c) => {
                    self.title.push(c);
                    self.controller.set_title(self.title.clone());
                }
                KeyCode::Backspace => {
                    if self.title.pop().is_some() {
                        self.controller.set_title(self.title.clone());
                    }
                }
                _ => {}
            },
            InputMode::EditContent => match key.code {
                KeyCode::Esc => self.input_mode = InputMode::Normal,
                _ => {
                    // everything else goes to the text area
                    let event = Event::Key(key);
                    let _ = text_area::handle_events(&mut self.content_area, true, &event);
                    let content = self.content_area.text();
                    if content != self.controller.draft().content {
                        self.controller.set_content(content);
                    }
                }
            },
            InputMode::DeleteConfirm => match key.code {
                KeyCode::Char('y') | KeyCode::Enter => {
                    self.input_mode = InputMode::Normal;
                    self.delete_selected();
                }
                KeyCode::Char('n') | KeyCode::Esc => self.input_mode = InputMode::Normal,
                _ => {}
            },
            InputMode::ImportPicker => match key.code {
                KeyCode::Down | KeyCode::Char('j') => {
                    let i = self.picker_state.selected().unwrap_or(0);
                    if i + 1 < self.picker_files.len() {
                        self.picker_state.select(Some(i + 1));
                    }
                }
                KeyCode::Up | KeyCode::Char('k') => {
                    let i = self.picker_state.selected().unwrap_or(0);
                    self.picker_state.select(Some(i.saturating_sub(1)));
                }
                KeyCode::Enter => self.finish_import(true),
                KeyCode::Esc | KeyCode::Char('q') => self.finish_import(false),
                _ => {}
            },
            InputMode::Alert => {
                if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                    self.alert = None;
                    self.input_mode = InputMode::Normal;
                }
            }
            InputMode::Help => {
                if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
                    self.input_mode = InputMode::Normal;
                }
            }
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) {
        self.message = None;
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.input_mode = InputMode::Help,
            KeyCode::Char('t') => self.input_mode = InputMode::EditTitle,
            KeyCode::Char('e') => self.input_mode = InputMode::EditContent,
            KeyCode::Char('p') => self.publish(),
            KeyCode::Char('d') => {
                if self.selected_post().is_some() {
                    self.input_mode = InputMode::DeleteConfirm;
                }
            }
            KeyCode::Char('x') => self.export_draft(),
            KeyCode::Char('i') => self.open_import_picker(),
            KeyCode::Char('r') => self.reload(),
            KeyCode::Down | KeyCode::Char('j') => self.next(),
            KeyCode::Up | KeyCode::Char('k') => self.previous(),
            KeyCode::Char('J') | KeyCode::PageDown => self.scroll_down(),
            KeyCode::Char('K') | KeyCode::PageUp => self.scroll_up(),
            _ => {}
        }
    }
}

/// Text area for the draft content, holding `content`.
fn create_content_area(content: &str) -> TextAreaState {
    let mut area = TextAreaState::new();
    // Markdown indentation is the author's to type
    area.set_auto_indent(false);
    area.set_auto_quote(false);
    area.set_tab_width(2);
    area.set_text(content);
    area
}

pub fn run_tui(controller: BlogController) -> Result<()> {
    let work_dir = std::env::current_dir()?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(controller, work_dir);
    app.mount();
    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = %err, "TUI terminated");
        eprintln!("Error: {}", err);
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            app.handle_key(key);
            if app.should_quit {
                return Ok(());
            }
        }
    }
}
