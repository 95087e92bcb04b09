//! Packaging the serialized vCard text as a named file and handing it to a
//! delivery sink. The default sink writes into a directory on disk.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, Utc};
use thiserror::Error;

use crate::models::Contact;
use crate::vcard::{build_vcard, VCARD_MIME};

/// Errors raised while delivering an export.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to create export directory {}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A file ready to be delivered: name, MIME type and body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VcfFile {
    pub filename: String,
    pub mime_type: &'static str,
    pub body: String,
}

impl VcfFile {
    /// Serialize `contacts` and name the file after `date`. Returns `None`
    /// for an empty list.
    pub fn build(contacts: &[Contact], date: NaiveDate) -> Option<Self> {
        if contacts.is_empty() {
            return None;
        }
        Some(Self {
            filename: export_filename(date),
            mime_type: VCARD_MIME,
            body: build_vcard(contacts),
        })
    }
}

/// Result of an export request that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// The list was empty. No file was produced.
    NothingToExport,
    /// The file was delivered and `count` contacts were written into it.
    Delivered { location: PathBuf, count: usize },
}

impl ExportOutcome {
    pub fn exported(&self) -> bool {
        matches!(self, ExportOutcome::Delivered { .. })
    }
}

/// Anything that can receive a finished export. Delivery is synchronous and
/// reports where the file ended up.
pub trait Delivery {
    fn deliver(&self, file: &VcfFile) -> Result<PathBuf, ExportError>;
}

/// `contacts-YYYY-MM-DD.vcf` for the given date.
pub fn export_filename(date: NaiveDate) -> String {
    format!("contacts-{}.vcf", date.format("%Y-%m-%d"))
}

/// The current UTC calendar date, used to name exports.
pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}

/// Writes exports into a directory, numbering the file when a same-day export
/// already exists there.
#[derive(Debug, Clone)]
pub struct DirectoryDelivery {
    dir: PathBuf,
}

impl DirectoryDelivery {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl DirectoryDelivery {
    /// Reserve the first free `contacts-<date>[ (n)].vcf` name. `create_new`
    /// refuses to clobber an earlier export from the same day.
    fn claim_path(&self, filename: &str) -> Result<PathBuf, ExportError> {
        let mut attempt = 0usize;
        loop {
            let path = self.dir.join(numbered_filename(filename, attempt));
            match fs::OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(_) => return Ok(path),
                Err(err) if err.kind() == ErrorKind::AlreadyExists => attempt += 1,
                Err(source) => return Err(ExportError::Write { path, source }),
            }
        }
    }
}

impl Delivery for DirectoryDelivery {
    fn deliver(&self, file: &VcfFile) -> Result<PathBuf, ExportError> {
        fs::create_dir_all(&self.dir).map_err(|source| ExportError::CreateDir {
            path: self.dir.clone(),
            source,
        })?;

        // The body is staged next to its destination; a failed write must not
        // leave a truncated .vcf where the user would import it.
        let staged = self.dir.join(format!("{}.tmp", file.filename));
        if let Err(source) = write_staged(&staged, file.body.as_bytes()) {
            discard(&staged);
            return Err(ExportError::Write {
                path: staged,
                source,
            });
        }

        let path = match self.claim_path(&file.filename) {
            Ok(path) => path,
            Err(err) => {
                discard(&staged);
                return Err(err);
            }
        };
        if let Err(source) = fs::rename(&staged, &path) {
            discard(&staged);
            discard(&path);
            return Err(ExportError::Write { path, source });
        }

        tracing::info!(
            path = %path.display(),
            bytes = file.body.len(),
            "export written"
        );
        Ok(path)
    }
}

fn write_staged(path: &Path, body: &[u8]) -> std::io::Result<()> {
    let mut handle = fs::File::create(path)?;
    handle.write_all(body)?;
    handle.sync_all()
}

/// Best-effort removal of a half-written export.
fn discard(path: &Path) {
    if let Err(err) = fs::remove_file(path) {
        if err.kind() != ErrorKind::NotFound {
            tracing::warn!(
                path = %path.display(),
                error = %err,
                "failed to remove partial export"
            );
        }
    }
}

/// `contacts-2024-01-02.vcf` -> `contacts-2024-01-02 (n).vcf` for `n > 0`.
fn numbered_filename(filename: &str, attempt: usize) -> String {
    if attempt == 0 {
        return filename.to_string();
    }
    match filename.rsplit_once('.') {
        Some((stem, ext)) => format!("{stem} ({attempt}).{ext}"),
        None => format!("{filename} ({attempt})"),
    }
}

/// Serialize `contacts` and deliver them. Nothing is delivered for an empty
/// list.
pub fn export_contacts(
    contacts: &[Contact],
    sink: &dyn Delivery,
    date: NaiveDate,
) -> Result<ExportOutcome, ExportError> {
    let Some(file) = VcfFile::build(contacts, date) else {
        return Ok(ExportOutcome::NothingToExport);
    };
    let location = sink.deliver(&file)?;
    Ok(ExportOutcome::Delivered {
        location,
        count: contacts.len(),
    })
}
