// Copyright (c) 2025 Tallybook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Local snapshot cache: the whole `FinancialState` serialized under one
//! durable key, written after every mutation and read once at startup as
//! the fallback source when the remote sheet is unreachable.

use rusqlite::{params, Connection, OptionalExtension};
use tracing::warn;

use crate::error::CacheError;
use crate::models::FinancialState;

pub const SNAPSHOT_KEY: &str = "financial_state";

/// Overwrites any prior snapshot.
pub fn save_snapshot(conn: &Connection, state: &FinancialState) -> Result<(), CacheError> {
    let json = serde_json::to_string(state)?;
    conn.execute(
        "INSERT INTO cache(key, value, updated_at) VALUES(?1, ?2, datetime('now'))
         ON CONFLICT(key) DO UPDATE SET value=excluded.value, updated_at=excluded.updated_at",
        params![SNAPSHOT_KEY, json],
    )?;
    Ok(())
}

/// Drops the snapshot only; settings and the remote sheet are untouched.
pub fn clear_snapshot(conn: &Connection) -> Result<(), CacheError> {
    conn.execute("DELETE FROM cache WHERE key=?1", params![SNAPSHOT_KEY])?;
    Ok(())
}

/// The stored snapshot text, if any. `doctor` uses this to report
/// corruption instead of silently healing it.
pub fn raw_snapshot(conn: &Connection) -> Result<Option<String>, CacheError> {
    let v: Option<String> = conn
        .query_row(
            "SELECT value FROM cache WHERE key=?1",
            params![SNAPSHOT_KEY],
            |r| r.get(0),
        )
        .optional()?;
    Ok(v)
}

/// A missing or corrupt snapshot yields the default empty state; the bad
/// entry is simply overwritten by the next save. Only database errors
/// propagate.
pub fn load_snapshot(conn: &Connection) -> Result<FinancialState, CacheError> {
    match raw_snapshot(conn)? {
        None => Ok(FinancialState::default()),
        Some(raw) => match serde_json::from_str(&raw) {
            Ok(state) => Ok(state),
            Err(err) => {
                warn!(%err, "local snapshot is corrupt; starting from defaults");
                Ok(FinancialState::default())
            }
        },
    }
}
