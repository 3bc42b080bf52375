//! SQLite access: connection ownership, schema and the city DAO.

pub mod city_dao;
pub mod schema;

use std::path::Path;

use rusqlite::{Connection, OpenFlags, Transaction, TransactionBehavior};

use crate::error::{LoaderError, Result, StoreKind};

pub use city_dao::CityDao;

/// Owns the connection to the world database for the length of a run.
pub struct WorldDb {
    conn: Connection,
}

impl WorldDb {
    /// Open an existing, already seeded database file.
    ///
    /// Fails with [`LoaderError::StoreUnavailable`] when the file is missing
    /// or does not carry the world tables.
    pub fn open(path: &Path) -> Result<Self> {
        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let conn = Connection::open_with_flags(path, flags).map_err(|e| unavailable(path, e))?;
        configure_connection(&conn)?;

        if !schema::has_world_tables(&conn)? {
            return Err(LoaderError::StoreUnavailable {
                store: StoreKind::Relational,
                reason: format!(
                    "{} has no world tables (run seed-world first)",
                    path.display()
                ),
            });
        }

        log::info!("Opened world database {}", path.display());
        Ok(Self { conn })
    }

    /// Create (or reuse) a database file and make sure the tables exist.
    pub fn create(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|e| unavailable(path, e))?;
        configure_connection(&conn)?;
        schema::create_tables(&conn)?;
        Ok(Self { conn })
    }

    /// A private in-memory database with empty world tables.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|e| LoaderError::StoreUnavailable {
            store: StoreKind::Relational,
            reason: e.to_string(),
        })?;
        configure_connection(&conn)?;
        schema::create_tables(&conn)?;
        Ok(Self { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Begin a deferred transaction. Only reads are issued inside it, so it
    /// pins one snapshot of the database until commit.
    pub fn read_transaction(&mut self) -> Result<Transaction<'_>> {
        Ok(self
            .conn
            .transaction_with_behavior(TransactionBehavior::Deferred)?)
    }

    /// Begin an immediate transaction for seeding.
    pub fn write_transaction(&mut self) -> Result<Transaction<'_>> {
        Ok(self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?)
    }
}

fn unavailable(path: &Path, err: rusqlite::Error) -> LoaderError {
    LoaderError::StoreUnavailable {
        store: StoreKind::Relational,
        reason: format!("cannot open {}: {err}", path.display()),
    }
}

/// Connection settings for bulk reads.
///
/// Foreign keys stay unenforced: a city may carry a dangling `country_id`,
/// which the loader reports as an integrity error instead of the database
/// rejecting it on insert.
pub fn configure_connection(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "PRAGMA journal_mode = WAL;
         PRAGMA synchronous = NORMAL;
         PRAGMA foreign_keys = OFF;
         PRAGMA cache_size = -65536;
         PRAGMA temp_store = MEMORY;",
    )?;
    Ok(())
}
