// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Key-scoped durable storage of JSON documents, with change propagation
//! to every consumer of the same key in this process. Reads recover to a
//! caller-supplied default; writes either reach the backend and fan out a
//! [`ChangeEvent`], or fail without notifying anyone.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::{Connection, OptionalExtension, params};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, error};

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Communefin", "communefin"));

pub fn data_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("communefin.sqlite"))
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage backend failure: {0}")]
    Backend(#[from] rusqlite::Error),
    #[error("could not serialize document '{key}': {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("write rejected by backend")]
    WriteRejected,
}

/// Raw document storage: one UTF-8 JSON string per key.
pub trait StoreBackend {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn put(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

impl<B: StoreBackend + ?Sized> StoreBackend for Rc<B> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn put(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).put(key, value)
    }
}

pub struct SqliteBackend {
    conn: Connection,
}

impl SqliteBackend {
    pub fn open_default() -> Result<Self> {
        Self::open(&data_path()?)
    }

    pub fn open(path: &Path) -> Result<Self> {
        let conn =
            Connection::open(path).with_context(|| format!("Open DB at {}", path.display()))?;
        init_schema(&conn)?;
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Open in-memory DB")?;
        init_schema(&conn)?;
        Ok(Self { conn })
    }
}

fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS documents(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL,
        updated_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    "#,
    )?;
    Ok(())
}

impl StoreBackend for SqliteBackend {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let v = self
            .conn
            .query_row("SELECT value FROM documents WHERE key=?1", params![key], |r| {
                r.get(0)
            })
            .optional()?;
        Ok(v)
    }

    fn put(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO documents(key, value, updated_at) VALUES(?1, ?2, datetime('now'))
             ON CONFLICT(key) DO UPDATE SET value=excluded.value, updated_at=excluded.updated_at",
            params![key, value],
        )?;
        Ok(())
    }
}

/// In-memory backend for tests and embedding. The write-failure switch
/// exercises the degraded-persistence path.
#[derive(Default)]
pub struct MemoryBackend {
    entries: RefCell<HashMap<String, String>>,
    fail_writes: Cell<bool>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }
}

impl StoreBackend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.fail_writes.get() {
            return Err(StoreError::WriteRejected);
        }
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Fired after a document reached the backend, and for change signals
/// ingested from other contexts. `value` is the serialized document, so
/// observers can adopt the new state without re-reading storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    pub key: String,
    pub value: String,
}

type Subscriber = Box<dyn Fn(&ChangeEvent)>;

pub struct Store {
    backend: Box<dyn StoreBackend>,
    subscribers: RefCell<Vec<Subscriber>>,
}

impl Store {
    pub fn new(backend: Box<dyn StoreBackend>) -> Self {
        Self {
            backend,
            subscribers: RefCell::new(Vec::new()),
        }
    }

    pub fn open_default() -> Result<Self> {
        Ok(Self::new(Box::new(SqliteBackend::open_default()?)))
    }

    /// Returns the stored collection for `key`, or `default` when the key
    /// is absent, the backend fails, or the document does not parse. Never
    /// an error: a corrupt document is logged and discarded.
    pub fn load_or<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        match self.backend.get(key) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(value) => value,
                Err(err) => {
                    error!(key, %err, "discarding unreadable document");
                    default
                }
            },
            Ok(None) => default,
            Err(err) => {
                error!(key, %err, "storage read failed");
                default
            }
        }
    }

    /// Serializes and persists `value`, then notifies every subscriber.
    /// On failure the error is logged and returned; no notification fires,
    /// so observers never see state that did not reach the backend.
    pub fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let raw = serde_json::to_string(value).map_err(|source| StoreError::Serialize {
            key: key.to_string(),
            source,
        })?;
        if let Err(err) = self.backend.put(key, &raw) {
            error!(key, %err, "storage write failed");
            return Err(err);
        }
        self.notify(&ChangeEvent {
            key: key.to_string(),
            value: raw,
        });
        Ok(())
    }

    pub fn subscribe(&self, callback: impl Fn(&ChangeEvent) + 'static) {
        self.subscribers.borrow_mut().push(Box::new(callback));
    }

    /// Entry point for a platform-level change signal from another context
    /// (another process on the same data file). Normalized to the same
    /// notification as a local save.
    pub fn ingest_external(&self, key: &str, raw: &str) {
        debug!(key, "external change signal");
        self.notify(&ChangeEvent {
            key: key.to_string(),
            value: raw.to_string(),
        });
    }

    fn notify(&self, event: &ChangeEvent) {
        for subscriber in self.subscribers.borrow().iter() {
            subscriber(event);
        }
    }
}
