// Copyright (c) 2025 Tallybook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;

use crate::ingest::{self, IncomeInput};
use crate::remote::{self, SheetsStore};
use crate::utils::{fmt_money, parse_date};

pub fn handle(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let date = sub
        .get_one::<String>("date")
        .map(|s| parse_date(s))
        .transpose()?;
    let input = IncomeInput {
        amount: sub.get_one::<String>("amount").unwrap().clone(),
        source: sub.get_one::<String>("source").unwrap().clone(),
        date,
    };

    let store = SheetsStore::from_settings(conn)?;
    let mut state = ingest::load_state(conn, remote::as_dyn(&store))?;
    let tx = ingest::submit_income(conn, remote::as_dyn(&store), &mut state, input)?;

    println!(
        "Recorded income {} from '{}' on {}",
        fmt_money(&tx.amount),
        tx.description,
        tx.date.map(|d| d.to_string()).unwrap_or_default(),
    );
    Ok(())
}
