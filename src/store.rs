use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use rusqlite::{Connection, OpenFlags, OptionalExtension, params};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Key-value persistence for the state managers, one JSON document per key.
///
/// Every save is a full overwrite of the value under its key; load of a
/// missing or malformed value yields `None` so callers can fall back to
/// their empty default instead of failing.
pub struct Store {
    conn: Mutex<Connection>,
}

fn default_db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from("in", "Roomnest", "roomnest")
        .context("Cannot determine project dirs")?;
    Ok(proj.data_dir().join("roomnest.db"))
}

impl Store {
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_FULL_MUTEX,
        )?;
        conn.pragma_update(None, "journal_mode", &"WAL")?;
        conn.pragma_update(None, "synchronous", &"NORMAL")?;
        Self::from_connection(conn)
    }

    /// Store at the platform data directory, for hosts that do not manage
    /// their own paths.
    pub fn open_default() -> Result<Self> {
        Self::open(&default_db_path()?)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS settings (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
            "#,
        )?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let text = serde_json::to_string(value)
            .with_context(|| format!("failed to serialize value for key '{key}'"))?;
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO settings(key, value) VALUES (?1, ?2) ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, text],
        )?;
        Ok(())
    }

    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let conn = self.conn.lock().unwrap();
        let raw: Option<String> = conn
            .query_row("SELECT value FROM settings WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()?;

        let Some(text) = raw else {
            return Ok(None);
        };

        match serde_json::from_str(&text) {
            Ok(value) => Ok(Some(value)),
            Err(err) => {
                // Malformed data is recovered, not surfaced; the caller
                // substitutes its empty default.
                log::warn!("discarding malformed value under key '{key}': {err}");
                Ok(None)
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn save_raw(&self, key: &str, text: &str) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO settings(key, value) VALUES (?1, ?2) ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, text],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SavedRoom;

    fn sample_list() -> Vec<SavedRoom> {
        vec![
            SavedRoom {
                id: "r-1".into(),
                title: "Single room in Indiranagar".into(),
                price: 9_000,
                images: vec!["https://cdn.roomnest.in/r-1/1.jpg".into()],
                location: "Indiranagar, Bengaluru".into(),
                rating: 4.1,
                saved_at: 1_700_000_000_000,
            },
            SavedRoom {
                id: "r-2".into(),
                title: "PG bed near IT park".into(),
                price: 6_500,
                images: vec![],
                location: "Hinjewadi, Pune".into(),
                rating: 3.8,
                saved_at: 1_700_000_060_000,
            },
        ]
    }

    #[test]
    fn round_trips_a_saved_list() {
        let store = Store::open_in_memory().unwrap();
        let list = sample_list();
        store.save("saved_rooms", &list).unwrap();

        let loaded: Option<Vec<SavedRoom>> = store.load("saved_rooms").unwrap();
        assert_eq!(loaded, Some(list));
    }

    #[test]
    fn missing_key_loads_as_none() {
        let store = Store::open_in_memory().unwrap();
        let loaded: Option<Vec<SavedRoom>> = store.load("saved_rooms").unwrap();
        assert_eq!(loaded, None);
    }

    #[test]
    fn malformed_value_loads_as_none() {
        let store = Store::open_in_memory().unwrap();
        store.save_raw("saved_rooms", "{not json[").unwrap();
        let loaded: Option<Vec<SavedRoom>> = store.load("saved_rooms").unwrap();
        assert_eq!(loaded, None);
    }

    #[test]
    fn save_overwrites_the_whole_value() {
        let store = Store::open_in_memory().unwrap();
        let list = sample_list();
        store.save("saved_rooms", &list).unwrap();
        store.save("saved_rooms", &list[..1].to_vec()).unwrap();

        let loaded: Vec<SavedRoom> = store.load("saved_rooms").unwrap().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, "r-1");
    }

    #[test]
    fn survives_a_reopen_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roomnest.db");
        let list = sample_list();

        {
            let store = Store::open(&path).unwrap();
            store.save("saved_rooms", &list).unwrap();
        }

        let store = Store::open(&path).unwrap();
        let loaded: Vec<SavedRoom> = store.load("saved_rooms").unwrap().unwrap();
        assert_eq!(loaded, list);
    }
}
