use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, poll, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{debug, error, info, warn};

use crate::clipboard::Clipboard;
use crate::command::Command;
use crate::config::Config;
use crate::counter::Stats;
use crate::debounce::Debouncer;
use crate::export::export_table;
use crate::fileio::FileIO;
use crate::form::Form;
use crate::input::{action_for, global_action, Action, KeyResult, LineInput};
use crate::modal::{Modal, Modals};
use crate::mode::Mode;
use crate::notify::Notifications;
use crate::style::{Style, Theme};
use crate::table::{CategoryFilter, Table, TableQuery};
use crate::tableview::TableView;
use crate::ui;

const TICK: Duration = Duration::from_millis(16);

pub struct App {
    pub table: Table,
    pub query: TableQuery,
    /// Table indices of the rows passing search and category filters, in table order
    pub visible: Vec<usize>,
    pub col_widths: Vec<usize>,
    pub view: TableView,
    pub style: Style,
    pub mode: Mode,
    pub config: Config,
    pub file_io: FileIO,
    pub notifications: Notifications,
    pub modals: Modals,
    pub form: Form,
    pub clipboard: Clipboard,
    pub stats: Stats,
    pub should_quit: bool,
    search_input: LineInput,
    command_input: LineInput,
    resize: Debouncer<(u16, u16)>,
}

impl App {
    pub fn new(table: Table, file_io: FileIO, config: Config, now: Instant) -> Self {
        let style = match Theme::by_name(&config.theme) {
            Some(theme) => Style::with_theme(theme),
            None => {
                warn!(theme = %config.theme, "unknown theme, using light");
                Style::default()
            }
        };
        let form = if config.form.fields.is_empty() {
            Form::for_headers(table.headers())
        } else {
            Form::new(config.form.fields.clone())
        };

        let mut app = Self {
            query: TableQuery::new(config.search_debounce()),
            visible: Vec::new(),
            col_widths: Vec::new(),
            view: TableView::new(),
            style,
            mode: Mode::Normal,
            notifications: Notifications::new(config.notification_ttl()),
            modals: Modals::new(),
            form,
            clipboard: Clipboard::new(),
            stats: Stats::new(config.counter_duration(), now),
            should_quit: false,
            search_input: LineInput::new(),
            command_input: LineInput::new(),
            resize: Debouncer::new(config.resize_debounce()),
            table,
            file_io,
            config,
        };
        app.refresh_widths();
        app.refresh_visible(now);
        app
    }

    // Accessor methods for UI
    pub fn search_buffer(&self) -> &str {
        &self.search_input.buffer
    }

    pub fn command_buffer(&self) -> &str {
        &self.command_input.buffer
    }

    /// Table index of the row under the cursor
    pub fn current_row(&self) -> Option<usize> {
        self.view.current_row(&self.visible)
    }

    pub fn run(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
        while !self.should_quit {
            terminal.draw(|f| ui::render(f, self))?;

            if poll(TICK)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        self.handle_key(key, Instant::now());
                    }
                    Event::Resize(width, height) => {
                        self.resize.trigger((width, height), Instant::now());
                    }
                    _ => {}
                }
            }
            self.tick(Instant::now());
        }
        Ok(())
    }

    /// Advance timers: debounced search, notification expiry, resize settling
    pub fn tick(&mut self, now: Instant) {
        if self.query.tick(now) {
            self.refresh_visible(now);
        }
        self.notifications.expire(now);
        if let Some((width, height)) = self.resize.poll(now) {
            debug!(width, height, "terminal resized");
            self.refresh_widths();
        }
    }

    /// Recompute the visible set, keeping the cursor on the same row if it survived
    pub fn refresh_visible(&mut self, now: Instant) {
        let anchor = self.current_row();
        self.reselect(anchor, now);
    }

    /// Recompute the visible set and put the cursor on table row `anchor` if visible
    fn reselect(&mut self, anchor: Option<usize>, now: Instant) {
        self.visible = self.query.visible_rows(&self.table);
        self.view.follow_row(anchor, &self.visible);
        self.view.clamp_cursor(self.visible.len(), self.table.col_count());
        self.stats.update(
            self.table.row_count(),
            self.visible.len(),
            self.table.distinct_tags().len(),
            now,
        );
    }

    fn refresh_widths(&mut self) {
        self.col_widths = self.table.col_widths(self.config.max_col_width);
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        match self.mode {
            Mode::Normal => self.handle_normal_mode(key, now),
            Mode::Search => self.handle_search_mode(key, now),
            Mode::Command => self.handle_command_mode(key, now),
            Mode::Form => self.handle_form_mode(key, now),
        }
    }

    fn handle_normal_mode(&mut self, key: KeyEvent, now: Instant) {
        let action = action_for(key);

        // Any key dismisses an open dialog; the global shortcuts then proceed
        if self.modals.any_open() {
            self.modals.hide_all();
            if !matches!(action, Some(Action::FocusSearch | Action::AddRecord)) {
                return;
            }
        }
        if let Some(action) = action {
            self.perform(action, now);
        }
    }

    pub fn perform(&mut self, action: Action, now: Instant) {
        let rows = self.visible.len();
        let cols = self.table.col_count();
        match action {
            Action::MoveDown => self.view.move_down(rows),
            Action::MoveUp => self.view.move_up(),
            Action::MoveLeft => self.view.move_left(),
            Action::MoveRight => self.view.move_right(cols),
            Action::MoveToTop => self.view.move_to_top(),
            Action::MoveToBottom => self.view.move_to_bottom(rows),
            Action::PageDown => self.view.page_down(rows),
            Action::PageUp => self.view.page_up(),
            Action::SortColumn => self.sort_column(self.view.cursor_col, now),
            Action::NextFilter => self.cycle_filter(true, now),
            Action::PrevFilter => self.cycle_filter(false, now),
            Action::FocusSearch => {
                self.modals.hide_all();
                self.mode = Mode::Search;
            }
            Action::StartCommand => {
                self.command_input.clear();
                self.mode = Mode::Command;
            }
            Action::ShowDetails => {
                if let Some(row) = self.current_row() {
                    self.modals.show(Modal::RowDetails { row });
                }
            }
            Action::CopyRow => self.copy_current_row(now),
            Action::Export => self.export(None, now),
            Action::AddRecord => self.open_form(),
            Action::DismissNotification => {
                self.notifications.dismiss_latest();
            }
            Action::Help => self.modals.show(Modal::Help),
            Action::CloseModals => self.modals.hide_all(),
            Action::Quit => self.should_quit = true,
        }
    }

    fn handle_search_mode(&mut self, key: KeyEvent, now: Instant) {
        if global_action(key) == Some(Action::AddRecord) {
            self.open_form();
            return;
        }

        match self.search_input.handle_key(key) {
            KeyResult::Changed => {
                let term = self.search_input.buffer.clone();
                self.query.input_search(&term, now);
            }
            KeyResult::Submit => {
                if self.query.commit_search() {
                    self.refresh_visible(now);
                }
                self.mode = Mode::Normal;
            }
            // Pending input still lands once the debounce window passes
            KeyResult::Cancel => self.mode = Mode::Normal,
            KeyResult::Continue => {}
        }
    }

    fn handle_command_mode(&mut self, key: KeyEvent, now: Instant) {
        match self.command_input.handle_key(key) {
            KeyResult::Submit => {
                let input = std::mem::take(&mut self.command_input.buffer);
                self.mode = Mode::Normal;
                if let Some(cmd) = Command::parse(&input) {
                    self.execute_command(cmd, now);
                }
            }
            KeyResult::Cancel => {
                self.command_input.clear();
                self.mode = Mode::Normal;
            }
            KeyResult::Changed | KeyResult::Continue => {}
        }
    }

    fn handle_form_mode(&mut self, key: KeyEvent, now: Instant) {
        match global_action(key) {
            Some(Action::CloseModals) => {
                self.mode = Mode::Normal;
                return;
            }
            Some(Action::FocusSearch) => {
                self.mode = Mode::Search;
                return;
            }
            _ => {}
        }

        match key.code {
            KeyCode::Tab | KeyCode::Down => self.form.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.form.focus_prev(),
            KeyCode::Enter => self.submit_form(now),
            KeyCode::Backspace => self.form.backspace(),
            KeyCode::Char(c) if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
                self.form.input_char(c);
            }
            _ => {}
        }
    }

    pub fn execute_command(&mut self, cmd: Command, now: Instant) {
        match cmd {
            Command::Quit => self.should_quit = true,
            Command::Sort(column) => {
                let col = match column {
                    Some(name) => match self.table.resolve_column(&name) {
                        Some(col) => col,
                        None => {
                            self.notifications.warning(format!("Column not found: {}", name), now);
                            return;
                        }
                    },
                    None => self.view.cursor_col,
                };
                self.sort_column(col, now);
            }
            Command::Filter(value) => self.set_filter(CategoryFilter::from_value(&value), now),
            Command::Search(term) => {
                self.search_input = LineInput::with_text(&term);
                self.set_search(&term, now);
            }
            Command::Export(filename) => self.export(filename.as_deref(), now),
            Command::Add => self.open_form(),
            Command::Help => self.modals.show(Modal::Help),
            Command::NavigateRow(row) => self.view.goto_row(row, self.visible.len()),
            Command::Unknown(input) => {
                self.notifications.warning(format!("Unknown command: {}", input), now);
            }
        }
    }

    pub fn set_search(&mut self, term: &str, now: Instant) {
        self.query.set_search(term);
        self.refresh_visible(now);
    }

    pub fn set_filter(&mut self, filter: CategoryFilter, now: Instant) {
        info!(filter = %filter, "category filter changed");
        self.query.set_category(filter);
        self.refresh_visible(now);
    }

    fn cycle_filter(&mut self, forward: bool, now: Instant) {
        let next = self.query.category().cycle(&self.table.distinct_tags(), forward);
        self.set_filter(next, now);
    }

    /// Sort by `col`, toggling direction when it is already the sort column
    pub fn sort_column(&mut self, col: usize, now: Instant) {
        if col >= self.table.col_count() {
            return;
        }
        let anchor = self.current_row();
        let direction = self.table.next_direction(col);
        let permutation = self.table.sort_rows(col, direction);
        let anchor = anchor.and_then(|old| permutation.iter().position(|&p| p == old));
        self.reselect(anchor, now);
    }

    fn copy_current_row(&mut self, now: Instant) {
        let Some(row) = self.current_row().and_then(|r| self.table.get_row(r)) else {
            return;
        };
        match self.clipboard.copy_row(&row.cells) {
            Ok(()) => self.notifications.success("Row copied to clipboard!", now),
            Err(e) => {
                error!(error = %e, "clipboard copy failed");
                self.notifications.error(e.to_string(), now);
            }
        }
    }

    /// Write every row to `filename` (or the configured name) next to the loaded file
    pub fn export(&mut self, filename: Option<&str>, now: Instant) {
        let filename = filename.unwrap_or(self.config.export_filename.as_str());
        let result = export_table(&self.table, filename).write_to(&self.file_io.export_dir());
        match result {
            Ok(path) => self.notifications.success(
                format!("Exported {} rows to {}", self.table.row_count(), path.display()),
                now,
            ),
            Err(e) => {
                error!(error = %e, "export failed");
                self.notifications.error(format!("Export failed: {}", e), now);
            }
        }
    }

    fn open_form(&mut self) {
        self.modals.hide_all();
        self.mode = Mode::Form;
    }

    /// Validate the add-record form and append its values as a new row
    pub fn submit_form(&mut self, now: Instant) {
        if !self.form.validate() {
            warn!(errors = self.form.error_count(), "form rejected");
            self.notifications.error("Please fix the errors in the form", now);
            return;
        }

        let values = self.form.values();
        let cells: Vec<String> = self
            .table
            .headers()
            .iter()
            .map(|header| {
                values
                    .iter()
                    .find(|(name, _)| name.trim().eq_ignore_ascii_case(header.trim()))
                    .map(|(_, value)| value.clone())
                    .unwrap_or_default()
            })
            .collect();

        self.table.push_row(cells);
        info!(rows = self.table.row_count(), "record added");
        self.form.reset();
        self.mode = Mode::Normal;
        self.refresh_widths();
        self.refresh_visible(now);
        self.notifications.success("Record added successfully!", now);
    }
}

#[cfg(test)]
mod test;
