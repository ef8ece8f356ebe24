// Copyright (c) 2025 Tallybook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Rejected user input. Surfaced synchronously to the caller; the
/// transaction log is never touched when one of these is returned.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("amount must be a positive number, got '{0}'")]
    InvalidAmount(String),
    #[error("description must not be empty")]
    EmptyDescription,
    #[error("income source must not be empty")]
    EmptySource,
    #[error("a category is required for payments")]
    MissingCategory,
}

/// Failures talking to the remote tabular store. At the ingestion and
/// load boundaries these are logged and swallowed; only `remote test`
/// and `doctor` show them to the user directly.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("remote store is not configured; run `tallybook remote set`")]
    NotConfigured,
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("remote API returned status {status} for table '{table}'")]
    Api { table: String, status: u16 },
    #[error("table '{table}' header does not match schema: {detail}")]
    Schema { table: String, detail: String },
}

/// Local snapshot failures. A corrupt snapshot on *read* is discarded
/// and replaced with defaults, so only infrastructure errors live here.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("snapshot serialization failed: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("snapshot store failed: {0}")]
    Db(#[from] rusqlite::Error),
}

#[derive(Debug, Error)]
pub enum IngestError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    // The snapshot is the session's only durability; write failures
    // surface while remote append failures do not.
    #[error("failed to write local snapshot: {0}")]
    Snapshot(#[from] CacheError),
}
