pub mod sqlite_autorole_store;

pub use sqlite_autorole_store::SqliteAutoroleStore;
