//! Domain models passed between the store, the vCard writer, persistence and
//! the TUI. These stay light-weight data holders so the other layers can focus
//! on presentation and storage.

use std::fmt;

use ulid::Ulid;

/// Opaque identifier assigned to a contact when it enters the list. Positions
/// shift on delete; the id does not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContactId(Ulid);

impl ContactId {
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for ContactId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Raw field values as typed by the user, before they become a list entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactDraft {
    pub prefix: String,
    pub name: String,
    pub number: String,
}

impl ContactDraft {
    pub fn new(
        prefix: impl Into<String>,
        name: impl Into<String>,
        number: impl Into<String>,
    ) -> Self {
        Self {
            prefix: prefix.into(),
            name: name.into(),
            number: number.into(),
        }
    }

    /// Copy of the draft with surrounding whitespace removed from every field.
    pub fn trimmed(&self) -> Self {
        Self {
            prefix: self.prefix.trim().to_string(),
            name: self.name.trim().to_string(),
            number: self.number.trim().to_string(),
        }
    }

    /// True when every field is empty after trimming.
    pub fn is_blank(&self) -> bool {
        self.prefix.trim().is_empty()
            && self.name.trim().is_empty()
            && self.number.trim().is_empty()
    }
}

/// A collected contact. Field values are stored already trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    /// Stable identity used by the edit session.
    pub id: ContactId,
    /// Free-form prefix glued in front of the name (for example a team tag).
    pub prefix: String,
    pub name: String,
    /// Phone number exactly as typed; no format validation.
    pub number: String,
}

impl Contact {
    /// Build a record from a draft, trimming every field.
    pub fn from_draft(draft: &ContactDraft) -> Self {
        Self::with_id(ContactId::new(), draft)
    }

    /// Build a record that keeps an existing id. Used when an edit replaces
    /// the values at a position.
    pub fn with_id(id: ContactId, draft: &ContactDraft) -> Self {
        let draft = draft.trimmed();
        Self {
            id,
            prefix: draft.prefix,
            name: draft.name,
            number: draft.number,
        }
    }

    /// Prefix and name concatenated without a separator, so `HHBU` + `Peter`
    /// becomes `HHBUPeter`.
    pub fn full_name(&self) -> String {
        format!("{}{}", self.prefix.trim(), self.name.trim())
    }

    /// Load the record back into editable buffers.
    pub fn to_draft(&self) -> ContactDraft {
        ContactDraft::new(&self.prefix, &self.name, &self.number)
    }

    /// Label for list rows: the full name, or a placeholder when there is none.
    pub fn display_name(&self) -> String {
        let full = self.full_name();
        if full.is_empty() {
            "(no name)".to_string()
        } else {
            full
        }
    }
}
