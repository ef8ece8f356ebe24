// Copyright (c) 2025 Tallybook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;
use serde::Serialize;

use crate::ingest;
use crate::models::FinancialState;
use crate::remote::{self, SheetsStore};
use crate::utils::{maybe_print_json, pretty_table};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(conn, sub),
        _ => Ok(()),
    }
}

const DEFAULT_LIMIT: usize = 10;

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: String,
    pub date: String,
    pub amount: String,
    pub description: String,
    pub category: String,
    pub kind: String,
}

/// Newest first (reverse insertion order, matching how the log grows).
pub fn query_rows(state: &FinancialState, sub: &clap::ArgMatches) -> Vec<TransactionRow> {
    let category = sub.get_one::<String>("category");
    let limit = sub.get_one::<usize>("limit").copied().unwrap_or(DEFAULT_LIMIT);
    state
        .transactions
        .iter()
        .rev()
        .filter(|tx| category.is_none_or(|c| &tx.category == c))
        .take(limit)
        .map(|tx| TransactionRow {
            id: tx.id.clone(),
            date: tx.date.map(|d| d.to_string()).unwrap_or_default(),
            amount: tx.amount.to_string(),
            description: tx.description.clone(),
            category: tx.category.clone(),
            kind: tx.kind.as_str().to_string(),
        })
        .collect()
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");

    let store = SheetsStore::from_settings(conn)?;
    let state = ingest::load_state(conn, remote::as_dyn(&store))?;
    let data = query_rows(&state, sub);

    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.date.clone(),
                    r.description.clone(),
                    r.amount.clone(),
                    r.category.clone(),
                    r.kind.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Date", "Description", "Amount", "Category", "Type"], rows)
        );
    }
    Ok(())
}
