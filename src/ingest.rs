// Copyright (c) 2025 Tallybook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Transaction ingestion and state loading.
//!
//! The in-memory log is authoritative for the session; the remote sheet
//! is a best-effort sync target. A failed remote append is logged and the
//! record is kept locally, so remote and local state can diverge until a
//! future sync command reconciles them.

use chrono::{Local, NaiveDate, Utc};
use rusqlite::Connection;
use rust_decimal::Decimal;
use tracing::warn;
use uuid::Uuid;

use crate::cache;
use crate::error::{CacheError, IngestError, ValidationError};
use crate::models::{BudgetConfig, FinancialState, Goal, Transaction, TxKind};
use crate::remote::{self, TabularStore};

pub struct PaymentInput {
    pub amount: String,
    pub description: String,
    pub category: String,
    pub date: Option<NaiveDate>,
}

pub struct IncomeInput {
    pub amount: String,
    pub source: String,
    pub date: Option<NaiveDate>,
}

fn parse_amount(raw: &str) -> Result<Decimal, ValidationError> {
    let amount = raw
        .trim()
        .parse::<Decimal>()
        .map_err(|_| ValidationError::InvalidAmount(raw.to_string()))?;
    if amount <= Decimal::ZERO {
        return Err(ValidationError::InvalidAmount(raw.to_string()));
    }
    Ok(amount)
}

fn new_id() -> String {
    format!("tx_{}", Uuid::new_v4().simple())
}

/// Validates, normalizes the sign to negative, and runs the persistence
/// protocol. Validation failures leave the state untouched.
pub fn submit_payment(
    conn: &Connection,
    remote: Option<&dyn TabularStore>,
    state: &mut FinancialState,
    input: PaymentInput,
) -> Result<Transaction, IngestError> {
    let amount = parse_amount(&input.amount)?;
    let description = input.description.trim().to_string();
    if description.is_empty() {
        return Err(ValidationError::EmptyDescription.into());
    }
    let category = input.category.trim().to_string();
    if category.is_empty() {
        return Err(ValidationError::MissingCategory.into());
    }
    let tx = Transaction {
        id: new_id(),
        date: Some(input.date.unwrap_or_else(|| Local::now().date_naive())),
        amount: -amount,
        description,
        category,
        kind: TxKind::Payment,
        recorded_at: Some(Utc::now()),
    };
    push_and_snapshot(conn, remote, state, tx)
}

/// Income is auto-categorized as `income` with the source as description,
/// and the sign normalized to positive.
pub fn submit_income(
    conn: &Connection,
    remote: Option<&dyn TabularStore>,
    state: &mut FinancialState,
    input: IncomeInput,
) -> Result<Transaction, IngestError> {
    let amount = parse_amount(&input.amount)?;
    let source = input.source.trim().to_string();
    if source.is_empty() {
        return Err(ValidationError::EmptySource.into());
    }
    let tx = Transaction {
        id: new_id(),
        date: Some(input.date.unwrap_or_else(|| Local::now().date_naive())),
        amount,
        description: source,
        category: "income".to_string(),
        kind: TxKind::Income,
        recorded_at: Some(Utc::now()),
    };
    push_and_snapshot(conn, remote, state, tx)
}

/// The persistence protocol: best-effort remote append, then the local
/// log unconditionally, then the snapshot. Remote failure never blocks
/// the local append.
fn push_and_snapshot(
    conn: &Connection,
    remote: Option<&dyn TabularStore>,
    state: &mut FinancialState,
    tx: Transaction,
) -> Result<Transaction, IngestError> {
    if let Some(store) = remote {
        if let Err(err) = store.append_row(&remote::TRANSACTIONS, &tx.to_cells()) {
            warn!(%err, id = %tx.id, "remote append failed; record kept locally");
        }
    }
    state.transactions.push(tx.clone());
    cache::save_snapshot(conn, state)?;
    Ok(tx)
}

/// Remote-then-local load. A reachable remote rebuilds the state from its
/// four tables, each read best-effort; only a fully unreachable remote
/// falls back to the last local snapshot, and a missing or corrupt
/// snapshot yields the default empty state.
pub fn load_state(
    conn: &Connection,
    remote: Option<&dyn TabularStore>,
) -> Result<FinancialState, CacheError> {
    if let Some(store) = remote {
        match load_remote(store) {
            Ok(state) => return Ok(state),
            Err(err) => warn!(%err, "remote load failed; falling back to local snapshot"),
        }
    }
    cache::load_snapshot(conn)
}

/// Every table read is individually best-effort: a failed table degrades
/// to empty so a partially reachable sheet still contributes whatever it
/// has. Only when all four reads fail is the remote treated as
/// unreachable, which sends the caller to the snapshot instead.
fn load_remote(store: &dyn TabularStore) -> Result<FinancialState, crate::error::RemoteError> {
    let mut failures = 0usize;
    let mut first_err = None;
    let mut best_effort = |schema: &remote::TableSchema| -> Vec<crate::remote::Row> {
        match store.read_table(schema) {
            Ok(rows) => rows,
            Err(err) => {
                warn!(%err, table = schema.name, "table read failed; continuing without it");
                failures += 1;
                if first_err.is_none() {
                    first_err = Some(err);
                }
                Vec::new()
            }
        }
    };

    let tx_rows = best_effort(&remote::TRANSACTIONS);
    let budget_rows = best_effort(&remote::BUDGET_CONFIG);
    let category_rows = best_effort(&remote::CATEGORIES);
    let goal_rows = best_effort(&remote::GOALS);

    if failures == 4 {
        if let Some(err) = first_err {
            return Err(err);
        }
    }

    Ok(FinancialState {
        transactions: tx_rows.iter().map(Transaction::from_row).collect(),
        budget_config: BudgetConfig::from_rows(&budget_rows),
        categories: category_rows
            .iter()
            .filter_map(|r| r.get("name"))
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .collect(),
        goals: goal_rows.iter().filter_map(Goal::from_row).collect(),
    })
}
