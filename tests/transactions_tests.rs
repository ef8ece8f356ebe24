// Copyright (c) 2025 Tallybook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use tallybook::cli;
use tallybook::commands::transactions;
use tallybook::models::{FinancialState, Transaction, TxKind};

fn state_with(n: u32) -> FinancialState {
    let mut state = FinancialState::default();
    for i in 1..=n {
        state.transactions.push(Transaction {
            id: format!("tx_{}", i),
            date: NaiveDate::from_ymd_opt(2025, 1, i),
            amount: "-10".parse().unwrap(),
            description: format!("item {}", i),
            category: if i % 2 == 0 { "flex".into() } else { "groceries".into() },
            kind: TxKind::Payment,
            recorded_at: None,
        });
    }
    state
}

fn list_matches(args: &[&str]) -> clap::ArgMatches {
    let mut argv = vec!["tallybook", "tx", "list"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    let Some(("tx", tx_m)) = matches.subcommand() else {
        panic!("no tx subcommand");
    };
    let Some(("list", list_m)) = tx_m.subcommand() else {
        panic!("no list subcommand");
    };
    list_m.clone()
}

#[test]
fn list_limit_respected_newest_first() {
    let state = state_with(3);
    let rows = transactions::query_rows(&state, &list_matches(&["--limit", "2"]));
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].date, "2025-01-03");
    assert_eq!(rows[1].date, "2025-01-02");
}

#[test]
fn list_defaults_to_ten_rows() {
    let state = state_with(15);
    let rows = transactions::query_rows(&state, &list_matches(&[]));
    assert_eq!(rows.len(), 10);
    assert_eq!(rows[0].id, "tx_15");
}

#[test]
fn list_filters_by_category() {
    let state = state_with(6);
    let rows = transactions::query_rows(&state, &list_matches(&["--category", "flex"]));
    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|r| r.category == "flex"));
}
