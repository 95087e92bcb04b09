//! Ratatui front-end. The key handlers stay thin: each one turns a key press
//! into a single call on the contact store and reports the result in the
//! footer.

mod app;
mod forms;
mod helpers;
mod terminal;

pub use app::App;
pub use terminal::run_app;
