// Copyright (c) 2025 Tallybook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rusqlite::{params, Connection};
use rust_decimal::Decimal;
use tallybook::cache;
use tallybook::models::{BudgetConfig, FinancialState, Goal, Transaction, TxKind};

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
    let mut config = BudgetConfig {
        monthly_income: Decimal::from(4380),
        ..Default::default()
    };
    config.fixed_costs.insert("rent".into(), Decimal::from(1270));
    config.discretionary.insert("groceries".into(), Decimal::from(300));

    FinancialState {
        transactions: vec![
            Transaction {
                id: "tx_1".into(),
                date: NaiveDate::from_ymd_opt(2025, 8, 1),
                amount: "-50.25".parse().unwrap(),
                description: "weekly shop".into(),
                category: "groceries".into(),
                kind: TxKind::Payment,
                recorded_at: Some("2025-08-01T12:00:00Z".parse().unwrap()),
            },
            Transaction {
                id: "tx_2".into(),
                date: None,
                amount: Decimal::from(1000),
                description: "salary".into(),
                category: "income".into(),
                kind: TxKind::Income,
                recorded_at: None,
            },
        ],
        budget_config: config,
        categories: vec!["groceries".into(), "transport".into()],
        goals: vec![Goal {
            name: "Card payoff".into(),
            category: "amex".into(),
            target: Decimal::from(2100),
        }],
    }
}

#[test]
fn snapshot_round_trips_exactly() {
    let conn = setup();
    let state = sample_state();
    cache::save_snapshot(&conn, &state).unwrap();
    assert_eq!(cache::load_snapshot(&conn).unwrap(), state);
}

#[test]
fn save_overwrites_previous_snapshot() {
    let conn = setup();
    cache::save_snapshot(&conn, &sample_state()).unwrap();
    cache::save_snapshot(&conn, &FinancialState::default()).unwrap();
    assert_eq!(cache::load_snapshot(&conn).unwrap(), FinancialState::default());

    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM cache", [], |r| r.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn clear_drops_the_snapshot_but_not_settings() {
    let conn = setup();
    conn.execute(
        "INSERT INTO settings(key, value) VALUES('spreadsheet_id', 'abc')",
        [],
    )
    .unwrap();
    cache::save_snapshot(&conn, &sample_state()).unwrap();

    cache::clear_snapshot(&conn).unwrap();
    assert!(cache::raw_snapshot(&conn).unwrap().is_none());
    assert_eq!(cache::load_snapshot(&conn).unwrap(), FinancialState::default());

    let kept: i64 = conn
        .query_row("SELECT COUNT(*) FROM settings", [], |r| r.get(0))
        .unwrap();
    assert_eq!(kept, 1);
}

#[test]
fn missing_snapshot_yields_default_state() {
    let conn = setup();
    assert_eq!(cache::load_snapshot(&conn).unwrap(), FinancialState::default());
}

#[test]
fn corrupt_snapshot_yields_default_state_not_error() {
    let conn = setup();
    conn.execute(
        "INSERT INTO cache(key, value) VALUES(?1, ?2)",
        params![cache::SNAPSHOT_KEY, "{not json"],
    )
    .unwrap();
    assert_eq!(cache::load_snapshot(&conn).unwrap(), FinancialState::default());

    // Corruption self-heals on the next save
    cache::save_snapshot(&conn, &sample_state()).unwrap();
    assert_eq!(cache::load_snapshot(&conn).unwrap(), sample_state());
}

#[test]
fn wrong_shape_json_is_treated_as_corrupt() {
    let conn = setup();
    conn.execute(
        "INSERT INTO cache(key, value) VALUES(?1, ?2)",
        params![cache::SNAPSHOT_KEY, r#"{"transactions": 42}"#],
    )
    .unwrap();
    assert_eq!(cache::load_snapshot(&conn).unwrap(), FinancialState::default());
}
