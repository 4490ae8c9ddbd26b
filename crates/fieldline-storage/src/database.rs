// SPDX-FileCopyrightText: 2026 Fieldline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and lifecycle.
//!
//! All writes are serialized through tokio-rusqlite's single background
//! thread. The `Database` struct IS the single writer; query modules accept
//! `&Database` and go through `connection().call()`. Do NOT create
//! additional Connection instances for writes.

use fieldline_core::FieldlineError;
use tracing::debug;

/// Handle to the single SQLite connection.
pub struct Database {
    conn: tokio_rusqlite::Connection,
}

impl Database {
    /// Open (creating if necessary) the database at `path`, apply PRAGMA
    /// settings, and run any pending migrations.
    pub async fn open(path: &str) -> Result<Database, FieldlineError> {
        let conn = tokio_rusqlite::Connection::open(path)
            .await
            .map_err(tokio_rusqlite::Error::from)
            .map_err(map_tr_err)?;

        conn.call(|conn| {
            conn.pragma_update(None, "journal_mode", "WAL")?;
            conn.pragma_update(None, "synchronous", "NORMAL")?;
            conn.pragma_update(None, "foreign_keys", "ON")?;
            conn.pragma_update(None, "busy_timeout", 5000)?;
            crate::migrations::run_migrations(conn)
                .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;
            Ok(())
        })
        .await
        .map_err(map_tr_boxed_err)?;

        debug!(path = %path, "database opened");
        Ok(Database { conn })
    }

    /// The underlying tokio-rusqlite connection.
    pub fn connection(&self) -> &tokio_rusqlite::Connection {
        &self.conn
    }

    /// Checkpoint the WAL and close the connection.
    pub async fn close(self) -> Result<(), FieldlineError> {
        self.conn
            .call(|conn| {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;
        self.conn.close().await.map_err(map_tr_err)?;
        debug!("database closed");
        Ok(())
    }
}

/// Map a tokio-rusqlite error into the shared storage error variant.
pub(crate) fn map_tr_err(e: tokio_rusqlite::Error) -> FieldlineError {
    FieldlineError::Storage {
        source: Box::new(e),
    }
}

/// Map a tokio-rusqlite error whose application error is already boxed.
pub(crate) fn map_tr_boxed_err(
    e: tokio_rusqlite::Error<Box<dyn std::error::Error + Send + Sync>>,
) -> FieldlineError {
    match e {
        tokio_rusqlite::Error::Error(source) => FieldlineError::Storage { source },
        tokio_rusqlite::Error::ConnectionClosed => {
            map_tr_err(tokio_rusqlite::Error::ConnectionClosed)
        }
        tokio_rusqlite::Error::Close(c) => map_tr_err(tokio_rusqlite::Error::Close(c)),
        other => FieldlineError::Storage {
            source: other.to_string().into(),
        },
    }
}
