use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::Connection;
use uuid::Uuid;

use riskform_core::CoreError;

use crate::error::StorageError;

/// Handle over the sqlite database. Cheap to clone; all clones share one
/// serialized connection.
#[derive(Clone)]
pub struct Store {
    conn: Arc<Mutex<Connection>>,
}

impl Store {
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        let conn = Connection::open(path)?;
        conn.execute("PRAGMA foreign_keys = ON", [])?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        conn.execute("PRAGMA foreign_keys = ON", [])?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn init_schema(&self) -> Result<(), StorageError> {
        let conn = self.lock();
        conn.execute_batch(crate::schema::DDL)?;
        Ok(())
    }

    pub(crate) fn lock(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().expect("store mutex poisoned")
    }
}

// Column codecs: uuids and timestamps are stored as text.

/// RFC 3339 with fixed fractional precision, so string comparison in SQL
/// agrees with temporal order.
pub(crate) fn fmt_timestamp(ts: jiff::Timestamp) -> String {
    format!("{ts:.6}")
}

pub(crate) fn parse_uuid(s: &str) -> Result<Uuid, StorageError> {
    Ok(s.parse::<Uuid>().map_err(CoreError::from)?)
}

pub(crate) fn parse_timestamp(s: &str) -> Result<jiff::Timestamp, StorageError> {
    s.parse::<jiff::Timestamp>()
        .map_err(|e| CoreError::InvalidTimestamp(e.to_string()).into())
}

pub(crate) fn parse_timestamp_opt(
    s: Option<String>,
) -> Result<Option<jiff::Timestamp>, StorageError> {
    s.as_deref().map(parse_timestamp).transpose()
}

pub(crate) fn uuid_list_json(ids: &[Uuid]) -> Result<String, StorageError> {
    Ok(serde_json::to_string(ids)?)
}

pub(crate) fn parse_uuid_list(s: &str) -> Result<Vec<Uuid>, StorageError> {
    Ok(serde_json::from_str(s)?)
}
