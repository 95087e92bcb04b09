//! Core library surface for the Contact Collector TUI application.
//!
//! The binary only wires configuration, logging, and the terminal loop
//! together; the store, the vCard writer, and export delivery live here so
//! they can be exercised without a terminal.
pub mod config;
pub mod db;
pub mod export;
pub mod logging;
pub mod models;
pub mod store;
pub mod ui;
pub mod vcard;

pub use config::Config;
pub use db::ContactArchive;
pub use export::{
    export_contacts, Delivery, DirectoryDelivery, ExportError, ExportOutcome, VcfFile,
};
pub use models::{Contact, ContactDraft, ContactId};
pub use store::{ContactStore, StoreError};
pub use ui::{run_app, App};
pub use vcard::build_vcard;
