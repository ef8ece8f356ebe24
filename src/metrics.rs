// Copyright (c) 2025 Tallybook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Derived financial figures. Every function here is a pure fold over the
//! transaction log; nothing is cached, nothing does I/O.

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Goal, Transaction, TxKind};

/// Signed running balance: income adds its magnitude, everything else
/// subtracts it. Order-independent, may go negative.
pub fn balance(transactions: &[Transaction]) -> Decimal {
    transactions.iter().fold(Decimal::ZERO, |acc, tx| match tx.kind {
        TxKind::Income => acc + tx.amount.abs(),
        TxKind::Payment => acc - tx.amount.abs(),
    })
}

/// Payments inside the 30-day window ending at `today` inclusive. Income
/// rows and rows without a parseable date are excluded.
pub fn monthly_spending(transactions: &[Transaction], today: NaiveDate) -> Decimal {
    let window_start = today - Duration::days(30);
    transactions
        .iter()
        .filter(|tx| tx.kind == TxKind::Payment)
        .filter(|tx| tx.date.is_some_and(|d| d >= window_start && d <= today))
        .fold(Decimal::ZERO, |acc, tx| acc + tx.amount.abs())
}

/// Cumulative payments against one category, since the start of the log.
pub fn category_spend(transactions: &[Transaction], category: &str) -> Decimal {
    transactions
        .iter()
        .filter(|tx| tx.kind == TxKind::Payment && tx.category == category)
        .fold(Decimal::ZERO, |acc, tx| acc + tx.amount.abs())
}

/// Uncapped progress toward a payoff/savings goal; the display layer
/// clamps against the target.
pub fn goal_progress(transactions: &[Transaction], goal: &Goal) -> Decimal {
    category_spend(transactions, &goal.category)
}

/// Fraction of the current month elapsed, day-of-month over days-in-month.
pub fn month_progress(today: NaiveDate) -> Decimal {
    Decimal::from(today.day()) / Decimal::from(days_in_month(today))
}

fn days_in_month(date: NaiveDate) -> u32 {
    let (y, m) = (date.year(), date.month());
    let first_of_next = if m == 12 {
        NaiveDate::from_ymd_opt(y + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(y, m + 1, 1)
    };
    first_of_next
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(30)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetLine {
    pub category: String,
    pub budget: Decimal,
    /// Spend since the first record in the log, not the current month.
    pub spent: Decimal,
    /// Budget prorated by how far through the month `today` is.
    pub projected: Decimal,
    pub remaining: Decimal,
    pub is_over: bool,
}

/// Over/under status for every discretionary category. A zero budget
/// flags any spend at all as over and reports `remaining = -spent`.
pub fn budget_status(
    transactions: &[Transaction],
    discretionary: &BTreeMap<String, Decimal>,
    today: NaiveDate,
) -> Vec<BudgetLine> {
    let progress = month_progress(today);
    discretionary
        .iter()
        .map(|(category, &budget)| {
            let spent = category_spend(transactions, category);
            let projected = budget * progress;
            BudgetLine {
                category: category.clone(),
                budget,
                spent,
                projected,
                remaining: budget - spent,
                is_over: spent > projected,
            }
        })
        .collect()
}
