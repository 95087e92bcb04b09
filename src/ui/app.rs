use std::mem;
use std::path::PathBuf;

use crossterm::event::KeyCode;
use open::that as open_path;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

use crate::export::{today_utc, Delivery, ExportOutcome};
use crate::store::ContactStore;

use super::forms::{ConfirmContactDelete, ContactField, ContactForm};
use super::helpers::{centered_rect, contact_row_line, surface_error};

/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
/// Entry panel: three field rows plus the border.
const ENTRY_HEIGHT: u16 = 5;
/// Rows skipped by PageUp/PageDown in the list.
const PAGE_STEP: isize = 5;

/// Which half of the main screen receives keystrokes.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum Focus {
    Entry,
    List,
}

/// Modal layers drawn on top of the main screen.
enum Mode {
    Normal,
    Editing(ContactForm),
    ConfirmDelete(ConfirmContactDelete),
    ConfirmReset,
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state shared across the TUI. Every handler is a thin
/// caller into the [`ContactStore`].
pub struct App {
    store: ContactStore,
    sink: Box<dyn Delivery>,
    entry: ContactForm,
    focus: Focus,
    selected: usize,
    mode: Mode,
    status: Option<StatusMessage>,
    last_export: Option<PathBuf>,
}

impl App {
    pub fn new(store: ContactStore, sink: Box<dyn Delivery>) -> Self {
        Self {
            store,
            sink,
            entry: ContactForm::default(),
            focus: Focus::Entry,
            selected: 0,
            mode: Mode::Normal,
            status: None,
            last_export: None,
        }
    }

    pub fn store(&self) -> &ContactStore {
        &self.store
    }

    /// Dispatch a plain key press. Returns `true` when the app should exit.
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        let mut exit = false;
        let mode = mem::replace(&mut self.mode, Mode::Normal);

        self.mode = match mode {
            Mode::Normal => match self.focus {
                Focus::Entry => self.handle_entry_key(code),
                Focus::List => self.handle_list_key(code, &mut exit),
            },
            Mode::Editing(form) => self.handle_edit_contact(code, form),
            Mode::ConfirmDelete(confirm) => self.handle_confirm_delete(code, confirm),
            Mode::ConfirmReset => self.handle_confirm_reset(code),
        };

        exit
    }

    fn handle_entry_key(&mut self, code: KeyCode) -> Mode {
        match code {
            KeyCode::Enter => {
                if self.entry.advance() {
                    self.add_entry();
                }
            }
            KeyCode::Down => self.entry.next_field(),
            KeyCode::Up => self.entry.previous_field(),
            KeyCode::Tab | KeyCode::BackTab => {
                if self.store.is_empty() {
                    self.set_status("The list is empty.", StatusKind::Info);
                } else {
                    self.clear_status();
                    self.focus = Focus::List;
                }
            }
            KeyCode::Esc => {
                self.entry.clear();
                self.clear_status();
            }
            KeyCode::Backspace => self.entry.backspace(),
            KeyCode::Char(ch) => {
                if self.entry.push_char(ch) {
                    self.entry.error = None;
                }
            }
            _ => {}
        }
        Mode::Normal
    }

    fn handle_list_key(&mut self, code: KeyCode, exit: &mut bool) -> Mode {
        match code {
            KeyCode::Char('q') => *exit = true,
            KeyCode::Esc | KeyCode::Tab | KeyCode::BackTab => {
                self.clear_status();
                self.focus = Focus::Entry;
            }
            KeyCode::Up => self.move_selection(-1),
            KeyCode::Down => self.move_selection(1),
            KeyCode::PageUp => self.move_selection(-PAGE_STEP),
            KeyCode::PageDown => self.move_selection(PAGE_STEP),
            KeyCode::Home => self.selected = 0,
            KeyCode::End => self.selected = self.store.len().saturating_sub(1),
            KeyCode::Enter | KeyCode::Char('e') | KeyCode::Char('E') => {
                return self.open_editor();
            }
            KeyCode::Delete | KeyCode::Char('d') | KeyCode::Char('-') => {
                if let Some(contact) = self.store.get(self.selected) {
                    let confirm = ConfirmContactDelete::from(contact);
                    self.clear_status();
                    return Mode::ConfirmDelete(confirm);
                }
                self.set_status("No contact selected to remove.", StatusKind::Error);
            }
            _ => {}
        }
        Mode::Normal
    }

    fn handle_edit_contact(&mut self, code: KeyCode, mut form: ContactForm) -> Mode {
        match code {
            KeyCode::Esc => {
                self.store.cancel_edit();
                self.set_status("Edit cancelled.", StatusKind::Info);
                return Mode::Normal;
            }
            KeyCode::Tab | KeyCode::Down => form.next_field(),
            KeyCode::BackTab | KeyCode::Up => form.previous_field(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => return self.save_edit(&form),
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }
        Mode::Editing(form)
    }

    fn handle_confirm_delete(&mut self, code: KeyCode, confirm: ConfirmContactDelete) -> Mode {
        match code {
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
                self.set_status("Deletion cancelled.", StatusKind::Info);
                Mode::Normal
            }
            KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => {
                match self.store.delete_by_id(confirm.id) {
                    Ok(removed) => {
                        self.set_status(
                            format!("Deleted {}.", removed.display_name()),
                            StatusKind::Info,
                        );
                    }
                    Err(err) => self.set_status(err.to_string(), StatusKind::Error),
                }
                self.ensure_selection_in_bounds();
                Mode::Normal
            }
            _ => Mode::ConfirmDelete(confirm),
        }
    }

    fn handle_confirm_reset(&mut self, code: KeyCode) -> Mode {
        match code {
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
                self.set_status("Reset cancelled.", StatusKind::Info);
                Mode::Normal
            }
            KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => {
                let dropped = self.store.len();
                self.store.reset();
                self.ensure_selection_in_bounds();
                self.set_status(format!("Cleared {dropped} contact(s)."), StatusKind::Info);
                Mode::Normal
            }
            _ => Mode::ConfirmReset,
        }
    }

    /// Ctrl-X: export everything and clear the list on success.
    pub(crate) fn handle_ctrl_x(&mut self) {
        if !matches!(self.mode, Mode::Normal) {
            return;
        }
        match self.store.export_and_clear(self.sink.as_ref(), today_utc()) {
            Ok(ExportOutcome::NothingToExport) => {
                self.set_status("Nothing to export.", StatusKind::Error);
            }
            Ok(ExportOutcome::Delivered { location, count }) => {
                self.ensure_selection_in_bounds();
                self.set_status(
                    format!("Exported {count} contact(s) to {}.", location.display()),
                    StatusKind::Info,
                );
                self.last_export = Some(location);
            }
            Err(err) => {
                let err = anyhow::Error::from(err);
                tracing::error!(error = %err, "export failed");
                self.set_status(
                    format!("Export failed: {}", surface_error(&err)),
                    StatusKind::Error,
                );
            }
        }
    }

    /// Ctrl-R: ask before clearing the whole list.
    pub(crate) fn handle_ctrl_r(&mut self) {
        if matches!(self.mode, Mode::Normal) {
            self.clear_status();
            self.mode = Mode::ConfirmReset;
        }
    }

    /// Ctrl-D: delete the record open in the edit modal.
    pub(crate) fn handle_ctrl_d(&mut self) {
        if !matches!(self.mode, Mode::Editing(_)) {
            return;
        }
        self.mode = Mode::Normal;
        match self.store.delete_editing() {
            Ok(removed) => {
                self.set_status(
                    format!("Deleted {}.", removed.display_name()),
                    StatusKind::Info,
                );
            }
            Err(err) => self.set_status(err.to_string(), StatusKind::Error),
        }
        self.ensure_selection_in_bounds();
    }

    /// Ctrl-O: hand the most recent export to the system's default handler.
    pub(crate) fn handle_ctrl_o(&mut self) {
        if !matches!(self.mode, Mode::Normal) {
            return;
        }
        let Some(path) = self.last_export.clone() else {
            self.set_status("Nothing exported yet.", StatusKind::Error);
            return;
        };
        match open_path(&path) {
            Ok(()) => self.set_status(format!("Opened {}.", path.display()), StatusKind::Info),
            Err(err) => {
                self.set_status(format!("Failed to open export: {err}"), StatusKind::Error)
            }
        }
    }

    fn add_entry(&mut self) {
        let draft = self.entry.draft();
        let added = self.store.add(&draft).map(|contact| contact.display_name());
        match added {
            Some(label) => {
                self.selected = self.store.len() - 1;
                self.entry.clear();
                self.set_status(format!("Added {label}."), StatusKind::Info);
            }
            None => {
                self.entry.focus(ContactField::Prefix);
                self.entry.error = Some("Fill in at least one field.".to_string());
                self.set_status("Nothing to add: all fields are empty.", StatusKind::Error);
            }
        }
    }

    fn open_editor(&mut self) -> Mode {
        match self.store.begin_edit(self.selected) {
            Ok(draft) => {
                self.clear_status();
                Mode::Editing(ContactForm::from_draft(draft))
            }
            Err(err) => {
                self.set_status(err.to_string(), StatusKind::Error);
                Mode::Normal
            }
        }
    }

    fn save_edit(&mut self, form: &ContactForm) -> Mode {
        match self.store.save_edit(&form.draft()) {
            Ok(index) => {
                self.selected = index;
                let label = self
                    .store
                    .get(index)
                    .map(|contact| contact.display_name())
                    .unwrap_or_default();
                self.set_status(format!("Updated {label}."), StatusKind::Info);
            }
            Err(err) => self.set_status(err.to_string(), StatusKind::Error),
        }
        self.ensure_selection_in_bounds();
        Mode::Normal
    }

    fn move_selection(&mut self, offset: isize) {
        let len = self.store.len();
        if len == 0 {
            self.selected = 0;
            return;
        }
        let next = self.selected as isize + offset;
        self.selected = next.clamp(0, len as isize - 1) as usize;
    }

    fn ensure_selection_in_bounds(&mut self) {
        let len = self.store.len();
        if len == 0 {
            self.selected = 0;
            self.focus = Focus::Entry;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(ENTRY_HEIGHT),
                Constraint::Min(0),
                Constraint::Length(FOOTER_HEIGHT),
            ])
            .split(area);

        self.draw_entry(frame, chunks[0]);
        self.draw_list(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);

        match &self.mode {
            Mode::Editing(form) => self.draw_edit_form(frame, area, form),
            Mode::ConfirmDelete(confirm) => self.draw_confirm_delete(frame, area, confirm),
            Mode::ConfirmReset => self.draw_confirm_reset(frame, area),
            Mode::Normal => {}
        }
    }

    fn focus_style(&self, focus: Focus) -> Style {
        if matches!(self.mode, Mode::Normal) && self.focus == focus {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        }
    }

    fn draw_entry(&self, frame: &mut Frame, area: Rect) {
        let focused = matches!(self.mode, Mode::Normal) && self.focus == Focus::Entry;
        let block = Block::default()
            .title("New Contact")
            .borders(Borders::ALL)
            .border_style(self.focus_style(Focus::Entry));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let lines: Vec<Line> = ContactField::ALL
            .iter()
            .map(|field| self.entry.build_line(*field, focused))
            .collect();
        frame.render_widget(Paragraph::new(lines), inner);

        if focused && inner.height > ContactField::Number.row() {
            frame.set_cursor_position((
                inner.x + self.entry.cursor_column(),
                inner.y + self.entry.active.row(),
            ));
        }
    }

    fn draw_list(&self, frame: &mut Frame, area: Rect) {
        let mut title = format!("Contacts ({})", self.store.len());
        if self.store.is_persistent() {
            title.push_str(" - saved locally");
        }
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(self.focus_style(Focus::List));

        if self.store.is_empty() {
            let paragraph = Paragraph::new(Line::from(Span::styled(
                "No contacts yet. Fill in the form and press Enter on Number to add one.",
                Style::default().fg(Color::DarkGray),
            )))
            .block(block)
            .wrap(Wrap { trim: true });
            frame.render_widget(paragraph, area);
            return;
        }

        let items: Vec<ListItem> = self
            .store
            .iter()
            .enumerate()
            .map(|(position, contact)| ListItem::new(contact_row_line(position, contact)))
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");

        let mut state = ListState::default();
        if self.focus == Focus::List {
            state.select(Some(self.selected));
        }
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let paragraph =
            Paragraph::new(vec![status_line, self.footer_instructions()]).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let key = |text: &'static str| Span::styled(text, Style::default().fg(Color::Yellow));
        match (&self.mode, self.focus) {
            (Mode::Editing(_), _) => Line::from(vec![
                key("Enter"),
                Span::raw(" Save  "),
                key("Ctrl-D"),
                Span::raw(" Delete  "),
                key("Tab"),
                Span::raw(" Next field  "),
                key("Esc"),
                Span::raw(" Cancel"),
            ]),
            (Mode::ConfirmDelete(_), _) | (Mode::ConfirmReset, _) => Line::from(vec![
                key("Y"),
                Span::raw(" Confirm  "),
                key("N/Esc"),
                Span::raw(" Cancel"),
            ]),
            (Mode::Normal, Focus::Entry) => Line::from(vec![
                key("Enter"),
                Span::raw(" Next/Add  "),
                key("Tab"),
                Span::raw(" List  "),
                key("Ctrl-X"),
                Span::raw(" Export  "),
                key("Ctrl-R"),
                Span::raw(" Reset  "),
                key("Ctrl-O"),
                Span::raw(" Open export  "),
                key("Ctrl-Q"),
                Span::raw(" Quit"),
            ]),
            (Mode::Normal, Focus::List) => Line::from(vec![
                key("↑/↓"),
                Span::raw(" Move  "),
                key("Enter/E"),
                Span::raw(" Edit  "),
                key("D"),
                Span::raw(" Delete  "),
                key("Tab/Esc"),
                Span::raw(" Form  "),
                key("Ctrl-X"),
                Span::raw(" Export  "),
                key("Q"),
                Span::raw(" Quit"),
            ]),
        }
    }

    fn draw_edit_form(&self, frame: &mut Frame, area: Rect, form: &ContactForm) {
        let popup_area = centered_rect(60, 40, area);
        frame.render_widget(Clear, popup_area);

        let title = match self.store.editing_index() {
            Some(index) => format!("Edit Contact #{}", index + 1),
            None => "Edit Contact".to_string(),
        };
        let block = Block::default().title(title).borders(Borders::ALL);
        let inner = block.inner(popup_area);
        frame.render_widget(block, popup_area);

        let mut lines: Vec<Line> = ContactField::ALL
            .iter()
            .map(|field| form.build_line(*field, true))
            .collect();
        lines.push(Line::from(""));

        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "Enter to save • Ctrl-D to delete • Esc to cancel",
                Style::default().fg(Color::Gray),
            )));
        }

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);

        if inner.height > ContactField::Number.row() {
            frame.set_cursor_position((
                inner.x + form.cursor_column(),
                inner.y + form.active.row(),
            ));
        }
    }

    fn draw_confirm_delete(&self, frame: &mut Frame, area: Rect, confirm: &ConfirmContactDelete) {
        let popup_area = centered_rect(60, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title("Confirm Removal")
            .borders(Borders::ALL);
        let inner = block.inner(popup_area);
        frame.render_widget(block, popup_area);

        let number = if confirm.number.is_empty() {
            String::new()
        } else {
            format!(" ({})", confirm.number)
        };
        let lines = vec![
            Line::from(format!("Remove {}{number}?", confirm.label)),
            Line::from(""),
            Line::from(Span::styled(
                "Press Y to confirm or N / Esc to cancel.",
                Style::default().fg(Color::Gray),
            )),
        ];

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn draw_confirm_reset(&self, frame: &mut Frame, area: Rect) {
        let popup_area = centered_rect(60, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title("Reset List").borders(Borders::ALL);
        let inner = block.inner(popup_area);
        frame.render_widget(block, popup_area);

        let lines = vec![
            Line::from(format!(
                "Discard all {} contact(s) without exporting?",
                self.store.len()
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Press Y to confirm or N / Esc to cancel.",
                Style::default().fg(Color::Gray),
            )),
        ];

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::DirectoryDelivery;
    use crate::models::ContactDraft;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use std::fs;
    use tempfile::TempDir;

    fn app(dir: &TempDir) -> App {
        App::new(
            ContactStore::new(),
            Box::new(DirectoryDelivery::new(dir.path())),
        )
    }

    fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            app.handle_key(KeyCode::Char(ch));
        }
    }

    fn enter_contact(app: &mut App, prefix: &str, name: &str, number: &str) {
        type_text(app, prefix);
        app.handle_key(KeyCode::Enter);
        type_text(app, name);
        app.handle_key(KeyCode::Enter);
        type_text(app, number);
        app.handle_key(KeyCode::Enter);
    }

    fn status(app: &App) -> (String, StatusKind) {
        let status = app.status.as_ref().expect("status should be set");
        (status.text.clone(), status.kind)
    }

    #[test]
    fn enter_on_last_field_adds_and_resets_form() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);

        enter_contact(&mut app, "HHBU", "Peter", "22233322");

        assert_eq!(app.store.len(), 1);
        assert_eq!(app.store.get(0).unwrap().full_name(), "HHBUPeter");
        assert_eq!(app.entry.draft(), ContactDraft::default());
        assert_eq!(app.entry.active, ContactField::Prefix);
        assert_eq!(status(&app), ("Added HHBUPeter.".to_string(), StatusKind::Info));
    }

    #[test]
    fn blank_entry_is_not_added() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);

        enter_contact(&mut app, " ", "", " ");

        assert!(app.store.is_empty());
        assert_eq!(status(&app).1, StatusKind::Error);
        assert!(app.entry.error.is_some());
    }

    #[test]
    fn export_writes_file_and_clears_list() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        enter_contact(&mut app, "", "Ann", "555");
        enter_contact(&mut app, "", "", "777");

        app.handle_ctrl_x();

        assert!(app.store.is_empty());
        let path = app.last_export.clone().unwrap();
        let body = fs::read_to_string(&path).unwrap();
        assert_eq!(body.matches("BEGIN:VCARD").count(), 2);
        assert!(body.contains("FN:777\r\n"));

        app.handle_ctrl_x();
        assert_eq!(status(&app), ("Nothing to export.".to_string(), StatusKind::Error));
    }

    #[test]
    fn edit_modal_saves_changes() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        enter_contact(&mut app, "", "Ann", "1");
        enter_contact(&mut app, "", "Bob", "2");

        app.handle_key(KeyCode::Tab);
        app.handle_key(KeyCode::Up);
        app.handle_key(KeyCode::Enter);
        assert!(matches!(app.mode, Mode::Editing(_)));
        assert_eq!(app.store.editing_index(), Some(0));

        app.handle_key(KeyCode::Tab);
        type_text(&mut app, "e");
        app.handle_key(KeyCode::Enter);

        assert!(matches!(app.mode, Mode::Normal));
        assert_eq!(app.store.get(0).unwrap().name, "Anne");
        assert_eq!(app.store.get(1).unwrap().name, "Bob");
    }

    #[test]
    fn escape_in_modal_leaves_record_alone() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        enter_contact(&mut app, "", "Ann", "1");

        app.handle_key(KeyCode::Tab);
        app.handle_key(KeyCode::Enter);
        type_text(&mut app, "zzz");
        app.handle_key(KeyCode::Esc);

        assert!(matches!(app.mode, Mode::Normal));
        assert_eq!(app.store.editing(), None);
        assert_eq!(app.store.get(0).unwrap().prefix, "");
    }

    #[test]
    fn ctrl_d_deletes_from_modal() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        enter_contact(&mut app, "", "Ann", "1");
        enter_contact(&mut app, "", "Bob", "2");

        app.handle_key(KeyCode::Tab);
        app.handle_key(KeyCode::Enter);
        app.handle_ctrl_d();

        assert!(matches!(app.mode, Mode::Normal));
        assert_eq!(app.store.len(), 1);
        assert_eq!(app.store.get(0).unwrap().name, "Ann");
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn list_delete_asks_first() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        enter_contact(&mut app, "", "Ann", "1");

        app.handle_key(KeyCode::Tab);
        app.handle_key(KeyCode::Char('d'));
        assert!(matches!(app.mode, Mode::ConfirmDelete(_)));
        app.handle_key(KeyCode::Char('n'));
        assert_eq!(app.store.len(), 1);

        app.handle_key(KeyCode::Char('d'));
        app.handle_key(KeyCode::Char('y'));
        assert!(app.store.is_empty());
        assert_eq!(app.focus, Focus::Entry);
    }

    #[test]
    fn reset_requires_confirmation() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        enter_contact(&mut app, "", "Ann", "1");
        enter_contact(&mut app, "", "Bob", "2");

        app.handle_ctrl_r();
        app.handle_key(KeyCode::Esc);
        assert_eq!(app.store.len(), 2);

        app.handle_ctrl_r();
        app.handle_key(KeyCode::Char('y'));
        assert!(app.store.is_empty());
        assert_eq!(status(&app).0, "Cleared 2 contact(s).");
    }

    #[test]
    fn tab_on_empty_list_keeps_entry_focus() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        app.handle_key(KeyCode::Tab);
        assert_eq!(app.focus, Focus::Entry);
    }

    #[test]
    fn open_without_export_reports_error() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        app.handle_ctrl_o();
        assert_eq!(status(&app).1, StatusKind::Error);
    }

    #[test]
    fn open_is_ignored_while_a_modal_is_up() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        enter_contact(&mut app, "", "Ann", "1");
        app.handle_key(KeyCode::Tab);
        app.handle_key(KeyCode::Enter);
        assert!(matches!(app.mode, Mode::Editing(_)));
        assert!(app.status.is_none());

        app.handle_ctrl_o();
        assert!(matches!(app.mode, Mode::Editing(_)));
        assert!(app.status.is_none());
    }

    #[test]
    fn draws_form_list_and_modal() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        enter_contact(&mut app, "HHBU", "Peter", "22233322");
        app.handle_key(KeyCode::Tab);
        app.handle_key(KeyCode::Enter);

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| app.draw(frame)).unwrap();

        let buffer = terminal.backend().buffer();
        let screen: String = buffer.content().iter().map(|cell| cell.symbol()).collect();
        assert!(screen.contains("New Contact"));
        assert!(screen.contains("Contacts (1)"));
        assert!(screen.contains("HHBUPeter"));
        assert!(screen.contains("Edit Contact #1"));
    }
}
