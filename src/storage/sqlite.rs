use crate::model::{PriceEntry, StorageError};
use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, Row, params};
use std::path::Path;
use tracing::{debug, info};

const SELECT_ENTRY: &str = "SELECT id, store, item, price, quantity, unit, date FROM entries";

/// Local price log. Row order (`rowid`) is the log order the analyzer sees.
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Opens (or creates) the database file and ensures the schema exists.
    pub fn new(db_path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = db_path.as_ref();
        let conn = Connection::open(path)?;
        info!("Opened price log at {}", path.display());
        Self::init(conn)
    }

    /// In-memory store, for tests and dry runs.
    pub fn in_memory() -> Result<Self, StorageError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, StorageError> {
        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS entries (
                id TEXT PRIMARY KEY,
                store TEXT NOT NULL,
                item TEXT NOT NULL,
                price REAL NOT NULL,
                quantity REAL NOT NULL,
                unit TEXT NOT NULL,
                date TEXT NOT NULL
            );
            ",
        )?;
        Ok(Self { conn })
    }

    /// Appends an entry to the log.
    pub fn add_entry(&self, entry: &PriceEntry) -> Result<(), StorageError> {
        if self.contains(&entry.id)? {
            return Err(StorageError::DuplicateId(entry.id.clone()));
        }
        self.insert(entry)?;
        debug!("Added entry {}", entry.id);
        Ok(())
    }

    /// Overwrites an entry in place, keeping its position in the log.
    pub fn update_entry(&self, entry: &PriceEntry) -> Result<(), StorageError> {
        let changed = self.conn.execute(
            "UPDATE entries SET store = ?2, item = ?3, price = ?4, quantity = ?5, unit = ?6, date = ?7
             WHERE id = ?1",
            params![
                &entry.id,
                &entry.store,
                &entry.item,
                &entry.price,
                &entry.quantity,
                &entry.unit,
                &entry.date.to_rfc3339(),
            ],
        )?;
        if changed == 0 {
            return Err(StorageError::NotFound(entry.id.clone()));
        }
        debug!("Updated entry {}", entry.id);
        Ok(())
    }

    pub fn delete_entry(&self, id: &str) -> Result<(), StorageError> {
        let changed = self.conn.execute("DELETE FROM entries WHERE id = ?1", params![id])?;
        if changed == 0 {
            return Err(StorageError::NotFound(id.to_string()));
        }
        debug!("Deleted entry {}", id);
        Ok(())
    }

    pub fn get_entry(&self, id: &str) -> Result<Option<PriceEntry>, StorageError> {
        let mut stmt = self.conn.prepare(&format!("{} WHERE id = ?1", SELECT_ENTRY))?;
        let entry = stmt.query_row(params![id], Self::map_entry).optional()?;
        Ok(entry)
    }

    /// All entries in log order.
    pub fn get_all_entries(&self) -> Result<Vec<PriceEntry>, StorageError> {
        let mut stmt = self.conn.prepare(&format!("{} ORDER BY rowid ASC", SELECT_ENTRY))?;
        let rows = stmt.query_map([], Self::map_entry)?;

        let mut entries = Vec::new();
        for entry in rows {
            entries.push(entry?);
        }
        Ok(entries)
    }

    /// Appends the entries whose id is not in the log yet; existing ids are left untouched.
    /// Returns how many were inserted.
    pub fn merge_entries(&self, entries: &[PriceEntry]) -> Result<usize, StorageError> {
        let mut inserted = 0;
        for entry in entries {
            if self.contains(&entry.id)? {
                continue;
            }
            self.insert(entry)?;
            inserted += 1;
        }
        if inserted > 0 {
            info!("Merged {} of {} entries", inserted, entries.len());
        }
        Ok(inserted)
    }

    fn contains(&self, id: &str) -> Result<bool, StorageError> {
        let mut stmt = self.conn.prepare("SELECT 1 FROM entries WHERE id = ?1")?;
        let mut rows = stmt.query(params![id])?;
        Ok(rows.next()?.is_some())
    }

    fn insert(&self, entry: &PriceEntry) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT INTO entries (id, store, item, price, quantity, unit, date)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                &entry.id,
                &entry.store,
                &entry.item,
                &entry.price,
                &entry.quantity,
                &entry.unit,
                &entry.date.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    fn map_entry(row: &Row) -> Result<PriceEntry, rusqlite::Error> {
        let date_str: String = row.get(6)?;
        let date = DateTime::parse_from_rfc3339(&date_str)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(6, rusqlite::types::Type::Text, Box::new(e))
            })?;

        Ok(PriceEntry {
            id: row.get(0)?,
            store: row.get(1)?,
            item: row.get(2)?,
            price: row.get(3)?,
            quantity: row.get(4)?,
            unit: row.get(5)?,
            date,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn entry(id: &str, price: f64) -> PriceEntry {
        PriceEntry {
            id: id.into(),
            store: "Publix".into(),
            item: "Milk".into(),
            price,
            quantity: 1.0,
            unit: "each".into(),
            date: Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn add_and_read_back_in_log_order() {
        let storage = SqliteStorage::in_memory().unwrap();
        storage.add_entry(&entry("b", 2.0)).unwrap();
        storage.add_entry(&entry("a", 1.0)).unwrap();

        let all = storage.get_all_entries().unwrap();
        let ids: Vec<&str> = all.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert_eq!(all[0], entry("b", 2.0));
    }

    #[test]
    fn duplicate_id_is_rejected() {
        let storage = SqliteStorage::in_memory().unwrap();
        storage.add_entry(&entry("a", 1.0)).unwrap();
        assert!(matches!(
            storage.add_entry(&entry("a", 3.0)),
            Err(StorageError::DuplicateId(id)) if id == "a"
        ));
    }

    #[test]
    fn update_keeps_position() {
        let storage = SqliteStorage::in_memory().unwrap();
        storage.add_entry(&entry("a", 1.0)).unwrap();
        storage.add_entry(&entry("b", 2.0)).unwrap();
        storage.update_entry(&entry("a", 5.0)).unwrap();

        let all = storage.get_all_entries().unwrap();
        assert_eq!(all[0].id, "a");
        assert_eq!(all[0].price, 5.0);
        assert!(matches!(
            storage.update_entry(&entry("zzz", 1.0)),
            Err(StorageError::NotFound(_))
        ));
    }

    #[test]
    fn delete_and_get() {
        let storage = SqliteStorage::in_memory().unwrap();
        storage.add_entry(&entry("a", 1.0)).unwrap();
        assert!(storage.get_entry("a").unwrap().is_some());
        storage.delete_entry("a").unwrap();
        assert!(storage.get_entry("a").unwrap().is_none());
        assert!(matches!(storage.delete_entry("a"), Err(StorageError::NotFound(_))));
    }

    #[test]
    fn merge_skips_known_ids() {
        let storage = SqliteStorage::in_memory().unwrap();
        storage.add_entry(&entry("a", 9.0)).unwrap();
        let inserted = storage
            .merge_entries(&[entry("a", 1.0), entry("b", 2.0)])
            .unwrap();
        assert_eq!(inserted, 1);
        assert_eq!(storage.get_entry("a").unwrap().unwrap().price, 9.0);
    }
}
