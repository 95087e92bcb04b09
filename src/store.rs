//! The owned contact list plus the edit session that the modal drives.
//!
//! Every UI handler is a thin caller into [`ContactStore`]. Positional methods
//! (`edit`, `delete`) take the index shown in the list; the edit session keeps
//! a [`ContactId`] instead, so a record that moved or vanished between "open"
//! and "save" is detected rather than silently overwritten.
//!
//! Persistence is optional. When an archive is attached the list is written
//! after every mutation; failures are logged and otherwise ignored, and the
//! in-memory list stays authoritative.

use chrono::NaiveDate;
use thiserror::Error;

use crate::db::ContactArchive;
use crate::export::{export_contacts, Delivery, ExportError, ExportOutcome};
use crate::models::{Contact, ContactDraft, ContactId};

/// Errors raised by list mutations. None of them change the list.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("no contact at position {index} (list has {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("contact {0} is no longer in the list")]
    UnknownContact(ContactId),

    #[error("no contact is being edited")]
    NotEditing,
}

#[derive(Default)]
pub struct ContactStore {
    contacts: Vec<Contact>,
    editing: Option<ContactId>,
    archive: Option<ContactArchive>,
}

impl ContactStore {
    /// Empty, memory-only store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store backed by `archive`, hydrated from whatever it holds. Unreadable
    /// data starts the session with an empty list.
    pub fn with_archive(archive: ContactArchive) -> Self {
        let contacts = match archive.load() {
            Ok(drafts) => drafts.iter().map(Contact::from_draft).collect(),
            Err(err) => {
                tracing::warn!(error = %err, "ignoring unreadable stored contacts");
                Vec::new()
            }
        };
        tracing::info!(count = contacts.len(), "restored contacts from archive");
        Self {
            contacts,
            editing: None,
            archive: Some(archive),
        }
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn iter(&self) -> impl Iterator<Item = &Contact> {
        self.contacts.iter()
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Contact> {
        self.contacts.get(index)
    }

    pub fn is_persistent(&self) -> bool {
        self.archive.is_some()
    }

    /// Current position of the contact with `id`.
    pub fn position(&self, id: ContactId) -> Option<usize> {
        self.contacts.iter().position(|contact| contact.id == id)
    }

    /// Append a trimmed copy of `draft`. Returns `None` without touching the
    /// list when every field is blank.
    pub fn add(&mut self, draft: &ContactDraft) -> Option<&Contact> {
        if draft.is_blank() {
            return None;
        }
        self.contacts.push(Contact::from_draft(draft));
        tracing::info!(count = self.contacts.len(), "contact added");
        self.persist();
        self.contacts.last()
    }

    /// Replace the record at `index` with the trimmed values of `draft`. The
    /// record keeps its id. No emptiness check happens on this path.
    pub fn edit(&mut self, index: usize, draft: &ContactDraft) -> Result<&Contact, StoreError> {
        let len = self.contacts.len();
        let slot = self
            .contacts
            .get_mut(index)
            .ok_or(StoreError::IndexOutOfRange { index, len })?;
        *slot = Contact::with_id(slot.id, draft);
        tracing::debug!(index, "contact edited");
        self.persist();
        Ok(&self.contacts[index])
    }

    /// Remove the record at `index`; later records shift down by one.
    pub fn delete(&mut self, index: usize) -> Result<Contact, StoreError> {
        if index >= self.contacts.len() {
            return Err(StoreError::IndexOutOfRange {
                index,
                len: self.contacts.len(),
            });
        }
        let removed = self.contacts.remove(index);
        if self.editing == Some(removed.id) {
            self.editing = None;
        }
        tracing::debug!(index, remaining = self.contacts.len(), "contact deleted");
        self.persist();
        Ok(removed)
    }

    pub fn edit_by_id(
        &mut self,
        id: ContactId,
        draft: &ContactDraft,
    ) -> Result<&Contact, StoreError> {
        let index = self.position(id).ok_or(StoreError::UnknownContact(id))?;
        self.edit(index, draft)
    }

    pub fn delete_by_id(&mut self, id: ContactId) -> Result<Contact, StoreError> {
        let index = self.position(id).ok_or(StoreError::UnknownContact(id))?;
        self.delete(index)
    }

    /// Drop every record and close any open edit session.
    pub fn reset(&mut self) {
        let dropped = self.contacts.len();
        self.contacts.clear();
        self.editing = None;
        tracing::info!(dropped, "contact list reset");
        self.persist();
    }

    /// Open (or retarget) the edit session on the record at `index` and return
    /// its values for the editing buffers.
    pub fn begin_edit(&mut self, index: usize) -> Result<ContactDraft, StoreError> {
        let contact = self.contacts.get(index).ok_or(StoreError::IndexOutOfRange {
            index,
            len: self.contacts.len(),
        })?;
        self.editing = Some(contact.id);
        Ok(contact.to_draft())
    }

    /// Id of the record under edit, if the session is open.
    pub fn editing(&self) -> Option<ContactId> {
        self.editing
    }

    /// Current position of the record under edit.
    pub fn editing_index(&self) -> Option<usize> {
        self.editing.and_then(|id| self.position(id))
    }

    /// Write `draft` into the record under edit and close the session.
    pub fn save_edit(&mut self, draft: &ContactDraft) -> Result<usize, StoreError> {
        let id = self.editing.take().ok_or(StoreError::NotEditing)?;
        let index = self.position(id).ok_or(StoreError::UnknownContact(id))?;
        self.edit(index, draft)?;
        Ok(index)
    }

    /// Remove the record under edit and close the session.
    pub fn delete_editing(&mut self) -> Result<Contact, StoreError> {
        let id = self.editing.take().ok_or(StoreError::NotEditing)?;
        self.delete_by_id(id)
    }

    /// Close the session without touching the list.
    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Serialize the list and hand it to `sink`. After a successful delivery
    /// the list is cleared. An empty list is reported as
    /// [`ExportOutcome::NothingToExport`] and nothing is delivered; a failed
    /// delivery leaves the list untouched.
    pub fn export_and_clear(
        &mut self,
        sink: &dyn Delivery,
        date: NaiveDate,
    ) -> Result<ExportOutcome, ExportError> {
        let outcome = export_contacts(&self.contacts, sink, date)?;
        if outcome.exported() && !self.contacts.is_empty() {
            tracing::info!(count = self.contacts.len(), "export delivered, clearing list");
            self.contacts.clear();
            self.editing = None;
            self.persist();
        }
        Ok(outcome)
    }

    fn persist(&self) {
        if let Some(archive) = &self.archive {
            if let Err(err) = archive.save(&self.contacts) {
                tracing::warn!(error = %err, "failed to persist contacts");
            }
        }
    }
}
