use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};

use crate::models::{Contact, ContactDraft};

use super::connection::{open_database, open_in_memory};

/// Key under which the serialized list is stored.
pub const STORAGE_KEY: &str = "contactCollectorList";

/// On-disk shape of one contact. Older documents have no `prefix` member, so
/// every field defaults to empty and `prefix` is only written when present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
struct StoredContact {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    prefix: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    number: String,
}

impl From<&Contact> for StoredContact {
    fn from(contact: &Contact) -> Self {
        Self {
            prefix: contact.prefix.clone(),
            name: contact.name.clone(),
            number: contact.number.clone(),
        }
    }
}

impl From<StoredContact> for ContactDraft {
    fn from(stored: StoredContact) -> Self {
        ContactDraft::new(stored.prefix, stored.name, stored.number)
    }
}

/// Read the raw JSON document stored under `key`, if any.
pub fn read_value(conn: &Connection, key: &str) -> Result<Option<String>> {
    conn.query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
        row.get(0)
    })
    .optional()
    .context("failed to read stored value")
}

/// Insert or replace the value stored under `key`.
pub fn write_value(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO kv (key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        params![key, value],
    )
    .context("failed to write stored value")?;
    Ok(())
}

/// Decode the persisted list. A missing row is an empty list; malformed JSON
/// is an error the caller decides how to treat.
pub fn read_contacts(conn: &Connection) -> Result<Vec<ContactDraft>> {
    let Some(raw) = read_value(conn, STORAGE_KEY)? else {
        return Ok(Vec::new());
    };
    let stored: Vec<StoredContact> =
        serde_json::from_str(&raw).context("stored contact list is not valid JSON")?;
    Ok(stored.into_iter().map(ContactDraft::from).collect())
}

/// Replace the persisted list with `contacts`.
pub fn write_contacts(conn: &Connection, contacts: &[Contact]) -> Result<()> {
    let stored: Vec<StoredContact> = contacts.iter().map(StoredContact::from).collect();
    let raw = serde_json::to_string(&stored).context("failed to encode contact list")?;
    write_value(conn, STORAGE_KEY, &raw)
}

/// Owns the connection backing the optional persistence of the list.
pub struct ContactArchive {
    conn: Connection,
}

impl ContactArchive {
    /// Open (or create) the archive inside `data_dir`.
    pub fn open(data_dir: &Path) -> Result<Self> {
        Ok(Self {
            conn: open_database(data_dir)?,
        })
    }

    /// Archive backed by a throwaway in-memory database.
    pub fn in_memory() -> Result<Self> {
        Ok(Self {
            conn: open_in_memory()?,
        })
    }

    pub fn load(&self) -> Result<Vec<ContactDraft>> {
        read_contacts(&self.conn)
    }

    pub fn save(&self, contacts: &[Contact]) -> Result<()> {
        write_contacts(&self.conn, contacts)
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}
