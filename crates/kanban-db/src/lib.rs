pub mod assembler;
pub mod cards;
pub mod colors;
pub mod comments;
pub mod error;
pub mod filter;
pub mod ids;
pub mod lists;
pub mod migrations;
pub mod models;
pub mod ordering;

pub use colors::ColorSet;
pub use error::{DbError, Result};

use kanban_types::Palette;
use rusqlite::{Connection, Transaction, TransactionBehavior};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::info;

pub struct Database {
    conn: Mutex<Connection>,
    palette: Arc<Palette>,
}

impl Database {
    pub fn open(path: &Path, palette: Arc<Palette>) -> Result<Self> {
        let conn = Connection::open(path)?;

        // WAL mode for concurrent reads
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "foreign_keys", "ON")?;

        migrations::run(&conn)?;

        info!("Database opened at {}", path.display());
        Ok(Self {
            conn: Mutex::new(conn),
            palette,
        })
    }

    pub fn open_in_memory(palette: Arc<Palette>) -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.pragma_update(None, "foreign_keys", "ON")?;

        migrations::run(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
            palette,
        })
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DbError::LockPoisoned(e.to_string()))?;
        f(&conn)
    }

    /// Run `f` inside an IMMEDIATE transaction. Commits when `f` returns Ok;
    /// any error (or panic) drops the transaction, which rolls it back.
    pub fn with_tx<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Transaction<'_>) -> Result<T>,
    {
        let mut conn = self
            .conn
            .lock()
            .map_err(|e| DbError::LockPoisoned(e.to_string()))?;

        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(DbError::Transaction)?;

        let value = f(&tx).map_err(|e| match e {
            DbError::Sqlite(err) => DbError::Transaction(err),
            other => other,
        })?;

        tx.commit().map_err(DbError::Transaction)?;
        Ok(value)
    }
}
