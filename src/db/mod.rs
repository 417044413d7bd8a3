// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Persistent preferences.
//!
//! Small values that must survive a restart, but only for a while, live in a
//! single SQLite table of expiring key/value rows. Expired rows are treated as
//! absent and removed on read.
//!
//! # Tables
//!
//! * `prefs` - Keyed text values with an absolute expiry (unix seconds).

use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use rusqlite::{Connection, OptionalExtension, params};
use tracing::debug;

use crate::model::volume::PreMuteMemory;

const PRE_MUTE_KEY: &str = "pre_mute_vol";

/// Opens the preferences database and configures it.
///
/// # Errors
///
/// Returns an error if the database file cannot be opened, WAL mode cannot be
/// enabled, or the schema cannot be created.
pub(crate) fn init_db(path: &str) -> Result<Connection> {
    let conn = Connection::open(path).with_context(|| format!("Failed to open {}", path))?;

    let journal_mode: String = conn.query_row("PRAGMA journal_mode = WAL", [], |r| r.get(0))?;
    if journal_mode != "wal" {
        anyhow::bail!(
            "Failed to switch to WAL mode. Current mode: {}",
            journal_mode
        );
    }

    conn.execute_batch("PRAGMA synchronous = NORMAL;")?;

    create_schema(&conn)?;

    Ok(conn)
}

pub(crate) fn create_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS prefs (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL,
            expires_at INTEGER NOT NULL
        );",
    )
    .context("Failed to create schema")?;

    Ok(())
}

pub(crate) fn get_pref(conn: &Connection, key: &str, now: i64) -> Result<Option<String>> {
    let row: Option<(String, i64)> = conn
        .prepare_cached("SELECT value, expires_at FROM prefs WHERE key = ?1")?
        .query_row(params![key], |r| Ok((r.get(0)?, r.get(1)?)))
        .optional()?;

    match row {
        Some((_, expires_at)) if expires_at <= now => {
            debug!("Preference {} expired", key);
            remove_pref(conn, key)?;
            Ok(None)
        }
        Some((value, _)) => Ok(Some(value)),
        None => Ok(None),
    }
}

pub(crate) fn set_pref(conn: &Connection, key: &str, value: &str, expires_at: i64) -> Result<()> {
    conn.prepare_cached(
        "INSERT INTO prefs (key, value, expires_at) VALUES (?1, ?2, ?3)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value, expires_at = excluded.expires_at",
    )?
    .execute(params![key, value, expires_at])?;

    Ok(())
}

pub(crate) fn remove_pref(conn: &Connection, key: &str) -> Result<()> {
    conn.prepare_cached("DELETE FROM prefs WHERE key = ?1")?
        .execute(params![key])?;

    Ok(())
}

/// Stores the pre-mute volume with a fixed retention window.
pub(crate) struct Prefs {
    conn: Connection,
    retention: Duration,
}

impl Prefs {
    pub(crate) fn new(conn: Connection, retention_days: i64) -> Self {
        Self {
            conn,
            retention: Duration::days(retention_days),
        }
    }
}

impl PreMuteMemory for Prefs {
    fn remember(&mut self, level: u8) -> Result<()> {
        let expires_at = (Utc::now() + self.retention).timestamp();
        set_pref(&self.conn, PRE_MUTE_KEY, &level.to_string(), expires_at)
    }

    fn recall(&mut self) -> Result<Option<u8>> {
        let value = get_pref(&self.conn, PRE_MUTE_KEY, Utc::now().timestamp())?;
        Ok(value.and_then(|v| v.parse().ok()))
    }

    fn forget(&mut self) -> Result<()> {
        remove_pref(&self.conn, PRE_MUTE_KEY)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn memory_db() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        create_schema(&conn).unwrap();
        conn
    }

    #[test]
    fn expired_rows_read_as_absent() {
        let conn = memory_db();
        set_pref(&conn, "k", "v", 100).unwrap();

        assert_eq!(get_pref(&conn, "k", 99).unwrap().as_deref(), Some("v"));
        assert_eq!(get_pref(&conn, "k", 100).unwrap(), None);
        // and the row is gone
        assert_eq!(get_pref(&conn, "k", 0).unwrap(), None);
    }

    #[test]
    fn set_overwrites() {
        let conn = memory_db();
        set_pref(&conn, "k", "1", i64::MAX).unwrap();
        set_pref(&conn, "k", "2", i64::MAX).unwrap();
        assert_eq!(get_pref(&conn, "k", 0).unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn pre_mute_memory_round_trip() {
        let mut prefs = Prefs::new(memory_db(), 31);

        assert_eq!(prefs.recall().unwrap(), None);
        prefs.remember(40).unwrap();
        assert_eq!(prefs.recall().unwrap(), Some(40));
        prefs.forget().unwrap();
        assert_eq!(prefs.recall().unwrap(), None);
    }

    #[test]
    fn zero_retention_expires_immediately() {
        let mut prefs = Prefs::new(memory_db(), 0);
        prefs.remember(40).unwrap();
        assert_eq!(prefs.recall().unwrap(), None);
    }
}
