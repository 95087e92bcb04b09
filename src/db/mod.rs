//! Persistence module split across logical submodules.

mod connection;
mod contacts;

pub use connection::{ensure_schema, open_database, open_in_memory, DB_FILE_NAME};
pub use contacts::{
    read_contacts, read_value, write_contacts, write_value, ContactArchive, STORAGE_KEY,
};
