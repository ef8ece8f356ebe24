// Copyright (c) 2025 Tallybook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;
use tallybook::cache;
use tallybook::cli;
use tallybook::commands::exporter;
use tallybook::models::{FinancialState, Transaction, TxKind};

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        r#"
        CREATE TABLE settings(key TEXT PRIMARY KEY, value TEXT NOT NULL);
        CREATE TABLE cache(key TEXT PRIMARY KEY, value TEXT NOT NULL,
                           updated_at TEXT NOT NULL DEFAULT (datetime('now')));
        "#,
    )
    .unwrap();
    conn
}

fn sample_state() -> FinancialState {
    let mut state = FinancialState::default();
    state.transactions.push(Transaction {
        id: "tx_1".into(),
        date: NaiveDate::from_ymd_opt(2025, 8, 1),
        amount: "-9.50".parse().unwrap(),
        description: "coffee".into(),
        category: "flex".into(),
        kind: TxKind::Payment,
        recorded_at: None,
    });
    state.transactions.push(Transaction {
        id: "tx_2".into(),
        date: NaiveDate::from_ymd_opt(2025, 8, 2),
        amount: Decimal::from(1000),
        description: "salary".into(),
        category: "income".into(),
        kind: TxKind::Income,
        recorded_at: None,
    });
    state
}

fn export_matches(args: &[&str]) -> clap::ArgMatches {
    let mut argv = vec!["tallybook", "export"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    let Some(("export", sub)) = matches.subcommand() else {
        panic!("no export subcommand");
    };
    sub.clone()
}

#[test]
fn json_export_round_trips_the_state() {
    let conn = setup();
    let state = sample_state();
    cache::save_snapshot(&conn, &state).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("export.json");
    let out_s = out.to_str().unwrap().to_string();

    exporter::handle(&conn, &export_matches(&["--format", "json", "--out", &out_s])).unwrap();

    let raw = std::fs::read_to_string(&out).unwrap();
    let parsed: FinancialState = serde_json::from_str(&raw).unwrap();
    assert_eq!(parsed, state);
}

#[test]
fn csv_export_writes_schema_header_and_all_rows() {
    let conn = setup();
    cache::save_snapshot(&conn, &sample_state()).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("export.csv");
    let out_s = out.to_str().unwrap().to_string();

    exporter::handle(&conn, &export_matches(&["--format", "csv", "--out", &out_s])).unwrap();

    let raw = std::fs::read_to_string(&out).unwrap();
    let mut lines = raw.lines();
    assert_eq!(
        lines.next().unwrap(),
        "id,date,amount,description,category,type,recorded_at"
    );
    assert_eq!(lines.clone().count(), 2);
    assert!(lines.any(|l| l.starts_with("tx_2,2025-08-02,1000,salary,income,income")));
}
