pub mod connection;
pub mod migrations;
pub mod settings_store;

pub use connection::Database;
#[cfg(test)]
pub use settings_store::MemorySettingsStore;
pub use settings_store::SettingsStore;
