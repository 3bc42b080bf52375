//! KeyDB/Redis access behind the small [`KeyValueStore`] seam.
//!
//! The pipeline only needs blocking `SET` and `GET` on string keys. The real
//! store is reached through [`KeyDb`]; tests use [`MemoryStore`].

use std::collections::HashMap;

use redis::Commands;

use crate::error::{LoaderError, Result, StoreKind};

/// Blocking string key-value operations over one open connection.
pub trait KeyValueStore {
    /// Unconditional write; an existing value under `key` is replaced.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    fn get(&mut self, key: &str) -> Result<Option<String>>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &mut T {
    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn get(&mut self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }
}

/// Client handle for a KeyDB (or Redis) server.
///
/// Opening the client does no I/O; [`KeyDb::connect`] opens one
/// connection per batch of operations.
pub struct KeyDb {
    client: redis::Client,
    url: String,
}

impl KeyDb {
    pub fn open(url: &str) -> Result<Self> {
        let client = redis::Client::open(url).map_err(|err| LoaderError::StoreUnavailable {
            store: StoreKind::Cache,
            reason: format!("invalid KeyDB URL {url}: {err}"),
        })?;
        Ok(Self {
            client,
            url: url.to_string(),
        })
    }

    /// Open a connection and check it with `PING`.
    pub fn connect(&self) -> Result<KeyDbConnection> {
        let mut con = self
            .client
            .get_connection()
            .map_err(|err| self.unavailable(err))?;

        redis::cmd("PING")
            .query::<String>(&mut con)
            .map_err(|err| self.unavailable(err))?;

        log::debug!("Connected to KeyDB at {}", self.url);
        Ok(KeyDbConnection { con })
    }

    fn unavailable(&self, err: redis::RedisError) -> LoaderError {
        LoaderError::StoreUnavailable {
            store: StoreKind::Cache,
            reason: format!("cannot connect to {}: {err}", self.url),
        }
    }
}

/// One open KeyDB connection. Closed when dropped.
pub struct KeyDbConnection {
    con: redis::Connection,
}

impl KeyValueStore for KeyDbConnection {
    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.con.set::<_, _, ()>(key, value)?;
        Ok(())
    }

    fn get(&mut self, key: &str) -> Result<Option<String>> {
        Ok(self.con.get(key)?)
    }
}

/// In-process stand-in for KeyDB.
///
/// Can be told to fail every write after a given number of successful ones,
/// to observe what a mid-run outage leaves behind.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    writes: usize,
    fail_after: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that accepts `writes` writes and then reports itself
    /// unavailable.
    pub fn failing_after(writes: usize) -> Self {
        Self {
            fail_after: Some(writes),
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of successful `set` calls, overwrites included.
    pub fn writes(&self) -> usize {
        self.writes
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}

impl KeyValueStore for MemoryStore {
    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if self.fail_after.is_some_and(|limit| self.writes >= limit) {
            return Err(LoaderError::StoreUnavailable {
                store: StoreKind::Cache,
                reason: format!("memory store closed after {} writes", self.writes),
            });
        }
        self.entries.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }

    fn get(&mut self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }
}
