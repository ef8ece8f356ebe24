// Copyright (c) 2025 Tallybook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;

use crate::cache;
use crate::metrics;
use crate::models::FinancialState;
use crate::remote::{self, TabularStore};
use crate::utils::pretty_table;

pub fn handle(conn: &Connection) -> Result<()> {
    let mut rows: Vec<Vec<String>> = Vec::new();

    // 1) Remote configuration and reachability
    match remote::SheetsStore::from_settings(conn)? {
        None => rows.push(vec![
            "remote_not_configured".into(),
            "run `tallybook remote set`".into(),
        ]),
        Some(store) => {
            if let Err(err) = store.read_table(&remote::TRANSACTIONS) {
                rows.push(vec!["remote_unreachable".into(), err.to_string()]);
            }
        }
    }

    // 2) Snapshot health: report corruption here instead of silently
    //    substituting defaults the way a normal load does
    let state = match cache::raw_snapshot(conn)? {
        None => {
            rows.push(vec!["no_snapshot".into(), "nothing saved locally yet".into()]);
            FinancialState::default()
        }
        Some(raw) => match serde_json::from_str::<FinancialState>(&raw) {
            Ok(state) => state,
            Err(err) => {
                rows.push(vec!["corrupt_snapshot".into(), err.to_string()]);
                FinancialState::default()
            }
        },
    };

    // 3) Data quality in the log
    for tx in &state.transactions {
        if tx.date.is_none() {
            rows.push(vec!["missing_date".into(), tx.id.clone()]);
        }
        if tx.amount.is_zero() {
            rows.push(vec!["zero_amount".into(), tx.id.clone()]);
        }
    }
    for category in state.budget_config.discretionary.keys() {
        if metrics::category_spend(&state.transactions, category).is_zero() {
            rows.push(vec!["unused_budget_category".into(), category.clone()]);
        }
    }

    if rows.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
