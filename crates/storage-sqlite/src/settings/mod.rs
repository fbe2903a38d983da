//! SQLite storage implementation for per-user settings.

mod model;
mod repository;

pub use model::SettingsDB;
pub use repository::SettingsRepository;
