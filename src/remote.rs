// Copyright (c) 2025 Tallybook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Remote tabular store adapter.
//!
//! Each table carries an explicit schema shared by the read and write
//! paths; the sheet's header row is validated against it at the boundary
//! instead of driving field names dynamically.

use std::collections::BTreeMap;

use rusqlite::Connection;
use serde::Deserialize;

use crate::db;
use crate::error::RemoteError;
use crate::utils::http_client;

pub struct TableSchema {
    pub name: &'static str,
    pub fields: &'static [&'static str],
}

pub const TRANSACTIONS: TableSchema = TableSchema {
    name: "transactions",
    fields: &["id", "date", "amount", "description", "category", "type", "recorded_at"],
};

pub const BUDGET_CONFIG: TableSchema = TableSchema {
    name: "budget_config",
    fields: &["category", "amount", "type"],
};

pub const CATEGORIES: TableSchema = TableSchema {
    name: "categories",
    fields: &["name"],
};

pub const GOALS: TableSchema = TableSchema {
    name: "goals",
    fields: &["name", "category", "target"],
};

/// A data row keyed by schema field name.
pub type Row = BTreeMap<String, String>;

pub trait TabularStore {
    fn read_table(&self, schema: &TableSchema) -> Result<Vec<Row>, RemoteError>;
    fn append_row(&self, schema: &TableSchema, cells: &[String]) -> Result<(), RemoteError>;
}

/// Header cells are matched case-insensitively with whitespace collapsed
/// to underscores, so "Recorded At" satisfies the `recorded_at` field.
pub fn normalize_header(cell: &str) -> String {
    cell.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}

/// Zip data rows against the schema. The first grid row must be a header
/// matching the schema's field list; missing trailing cells default to "".
pub fn rows_from_grid(schema: &TableSchema, grid: Vec<Vec<String>>) -> Result<Vec<Row>, RemoteError> {
    let mut rows = grid.into_iter();
    let Some(header) = rows.next() else {
        return Ok(Vec::new());
    };
    let normalized: Vec<String> = header.iter().map(|h| normalize_header(h)).collect();
    let matches = normalized.len() == schema.fields.len()
        && normalized.iter().zip(schema.fields).all(|(got, want)| got == *want);
    if !matches {
        return Err(RemoteError::Schema {
            table: schema.name.to_string(),
            detail: format!("expected {:?}, got {:?}", schema.fields, normalized),
        });
    }
    Ok(rows
        .map(|cells| {
            schema
                .fields
                .iter()
                .enumerate()
                .map(|(i, field)| (field.to_string(), cells.get(i).cloned().unwrap_or_default()))
                .collect()
        })
        .collect())
}

/// Google Sheets v4 values API over blocking HTTP.
pub struct SheetsStore {
    spreadsheet_id: String,
    api_key: String,
    client: reqwest::blocking::Client,
}

#[derive(Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

impl SheetsStore {
    pub fn new(spreadsheet_id: String, api_key: String) -> Result<SheetsStore, RemoteError> {
        Ok(SheetsStore {
            spreadsheet_id,
            api_key,
            client: http_client()?,
        })
    }

    /// `None` when credentials were never configured; callers then skip
    /// remote I/O entirely and work against the local snapshot.
    pub fn from_settings(conn: &Connection) -> anyhow::Result<Option<SheetsStore>> {
        let id = db::get_setting(conn, db::SETTING_SPREADSHEET_ID)?;
        let key = db::get_setting(conn, db::SETTING_API_KEY)?;
        match (id, key) {
            (Some(id), Some(key)) => Ok(Some(SheetsStore::new(id, key)?)),
            _ => Ok(None),
        }
    }

    fn values_url(&self, table: &str, suffix: &str) -> String {
        format!(
            "https://sheets.googleapis.com/v4/spreadsheets/{}/values/{}!A:Z{}&key={}",
            self.spreadsheet_id, table, suffix, self.api_key
        )
    }
}

impl TabularStore for SheetsStore {
    fn read_table(&self, schema: &TableSchema) -> Result<Vec<Row>, RemoteError> {
        let url = self.values_url(schema.name, "?majorDimension=ROWS");
        let resp = self.client.get(&url).send()?;
        if !resp.status().is_success() {
            return Err(RemoteError::Api {
                table: schema.name.to_string(),
                status: resp.status().as_u16(),
            });
        }
        let range: ValueRange = resp.json()?;
        rows_from_grid(schema, range.values)
    }

    fn append_row(&self, schema: &TableSchema, cells: &[String]) -> Result<(), RemoteError> {
        let url = self.values_url(
            schema.name,
            ":append?valueInputOption=USER_ENTERED&insertDataOption=INSERT_ROWS",
        );
        let body = serde_json::json!({ "values": [cells] });
        let resp = self.client.post(&url).json(&body).send()?;
        if !resp.status().is_success() {
            return Err(RemoteError::Api {
                table: schema.name.to_string(),
                status: resp.status().as_u16(),
            });
        }
        Ok(())
    }
}

/// Borrow an optional concrete store as the trait object ingestion takes.
pub fn as_dyn(store: &Option<SheetsStore>) -> Option<&dyn TabularStore> {
    store.as_ref().map(|s| s as &dyn TabularStore)
}
