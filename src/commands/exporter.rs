// Copyright (c) 2025 Tallybook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::Local;
use rusqlite::Connection;

use crate::ingest;
use crate::remote::{self, SheetsStore};

pub fn handle(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();

    let store = SheetsStore::from_settings(conn)?;
    let state = ingest::load_state(conn, remote::as_dyn(&store))?;

    let out = sub.get_one::<String>("out").cloned().unwrap_or_else(|| {
        format!("financial-data-{}.{}", Local::now().date_naive(), fmt)
    });

    match fmt.as_str() {
        "json" => {
            std::fs::write(&out, serde_json::to_string_pretty(&state)?)?;
        }
        "csv" => {
            let mut wtr = csv::Writer::from_path(&out)?;
            wtr.write_record(remote::TRANSACTIONS.fields)?;
            for tx in &state.transactions {
                wtr.write_record(tx.to_cells())?;
            }
            wtr.flush()?;
        }
        _ => {
            eprintln!("Unknown format: {} (use json|csv)", fmt);
            return Ok(());
        }
    }
    println!("Exported state to {}", out);
    Ok(())
}
