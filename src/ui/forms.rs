use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::models::{Contact, ContactDraft, ContactId};

/// Editable buffers for the three contact fields. The same form backs the
/// entry panel and the edit modal.
#[derive(Default, Clone, Debug)]
pub(crate) struct ContactForm {
    pub(crate) prefix: String,
    pub(crate) name: String,
    pub(crate) number: String,
    pub(crate) active: ContactField,
    pub(crate) error: Option<String>,
}

/// Fields in entry order. Enter walks this order; Enter on the last field
/// submits.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub(crate) enum ContactField {
    #[default]
    Prefix,
    Name,
    Number,
}

impl ContactField {
    pub(crate) const ALL: [ContactField; 3] =
        [ContactField::Prefix, ContactField::Name, ContactField::Number];

    pub(crate) fn label(self) -> &'static str {
        match self {
            ContactField::Prefix => "Prefix",
            ContactField::Name => "Name",
            ContactField::Number => "Number",
        }
    }

    /// Row of the field inside a form block.
    pub(crate) fn row(self) -> u16 {
        match self {
            ContactField::Prefix => 0,
            ContactField::Name => 1,
            ContactField::Number => 2,
        }
    }

    fn next(self) -> Self {
        match self {
            ContactField::Prefix => ContactField::Name,
            ContactField::Name => ContactField::Number,
            ContactField::Number => ContactField::Prefix,
        }
    }

    fn previous(self) -> Self {
        match self {
            ContactField::Prefix => ContactField::Number,
            ContactField::Name => ContactField::Prefix,
            ContactField::Number => ContactField::Name,
        }
    }
}

impl ContactForm {
    /// Populate the form from stored values when entering edit mode.
    pub(crate) fn from_draft(draft: ContactDraft) -> Self {
        Self {
            prefix: draft.prefix,
            name: draft.name,
            number: draft.number,
            active: ContactField::Prefix,
            error: None,
        }
    }

    /// Snapshot of the buffers, untrimmed; the store trims on write.
    pub(crate) fn draft(&self) -> ContactDraft {
        ContactDraft::new(&self.prefix, &self.name, &self.number)
    }

    pub(crate) fn focus(&mut self, field: ContactField) {
        self.active = field;
    }

    pub(crate) fn next_field(&mut self) {
        self.active = self.active.next();
    }

    pub(crate) fn previous_field(&mut self) {
        self.active = self.active.previous();
    }

    /// Enter-key behavior: move to the next field, or report `true` when the
    /// cursor already sits in the last one and the form should be submitted.
    pub(crate) fn advance(&mut self) -> bool {
        if self.active == ContactField::Number {
            true
        } else {
            self.next_field();
            false
        }
    }

    /// Empty every buffer and return focus to the first field.
    pub(crate) fn clear(&mut self) {
        *self = Self::default();
    }

    fn value(&self, field: ContactField) -> &String {
        match field {
            ContactField::Prefix => &self.prefix,
            ContactField::Name => &self.name,
            ContactField::Number => &self.number,
        }
    }

    fn value_mut(&mut self, field: ContactField) -> &mut String {
        match field {
            ContactField::Prefix => &mut self.prefix,
            ContactField::Name => &mut self.name,
            ContactField::Number => &mut self.number,
        }
    }

    /// Insert a character into the active field. Control characters are
    /// refused.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        let field = self.active;
        self.value_mut(field).push(ch);
        true
    }

    /// Remove the last character from the active field.
    pub(crate) fn backspace(&mut self) {
        let field = self.active;
        self.value_mut(field).pop();
    }

    /// Render a styled line for one field, highlighting it when `focused`.
    pub(crate) fn build_line(&self, field: ContactField, focused: bool) -> Line<'static> {
        let value = self.value(field);
        let is_active = focused && self.active == field;

        let display = if value.is_empty() {
            "<optional>".to_string()
        } else {
            value.clone()
        };

        let style = if is_active {
            Style::default().fg(Color::Yellow)
        } else if value.is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };

        Line::from(vec![
            Span::raw(format!("{:<8}", format!("{}:", field.label()))),
            Span::styled(display, style),
        ])
    }

    /// Character length of the requested field.
    pub(crate) fn value_len(&self, field: ContactField) -> usize {
        self.value(field).chars().count()
    }

    /// Terminal column offset of the cursor inside the form block.
    pub(crate) fn cursor_column(&self) -> u16 {
        let label_width = 8;
        (label_width + self.value_len(self.active)) as u16
    }
}

/// State for confirming the removal of a single list entry.
#[derive(Clone, Debug)]
pub(crate) struct ConfirmContactDelete {
    pub(crate) id: ContactId,
    pub(crate) label: String,
    pub(crate) number: String,
}

impl From<&Contact> for ConfirmContactDelete {
    fn from(contact: &Contact) -> Self {
        Self {
            id: contact.id,
            label: contact.display_name(),
            number: contact.number.clone(),
        }
    }
}
