// Copyright (c) 2025 Tallybook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;

use crate::db;
use crate::remote::{self, SheetsStore, TabularStore};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => {
            let sheet = sub.get_one::<String>("sheet").unwrap();
            let key = sub.get_one::<String>("key").unwrap();
            db::set_setting(conn, db::SETTING_SPREADSHEET_ID, sheet)?;
            db::set_setting(conn, db::SETTING_API_KEY, key)?;
            println!("Remote store configured for spreadsheet {}", sheet);
        }
        Some(("show", _)) => {
            match db::get_setting(conn, db::SETTING_SPREADSHEET_ID)? {
                Some(id) => {
                    let has_key = db::get_setting(conn, db::SETTING_API_KEY)?.is_some();
                    println!("Spreadsheet: {}", id);
                    println!("API key:     {}", if has_key { "set" } else { "missing" });
                }
                None => println!("Remote store is not configured."),
            }
        }
        Some(("test", _)) => match SheetsStore::from_settings(conn)? {
            None => println!("Remote store is not configured; run `tallybook remote set`."),
            Some(store) => match store.read_table(&remote::TRANSACTIONS) {
                Ok(rows) => println!("Connected; {} transaction rows visible.", rows.len()),
                Err(err) => println!("Connection failed: {}", err),
            },
        },
        _ => {}
    }
    Ok(())
}
