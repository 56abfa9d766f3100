// Storage module: local SQLite price log.

pub mod sqlite;

pub use sqlite::SqliteStorage;
