// Copyright (c) 2025 Tallybook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::remote::Row;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxKind {
    Payment,
    Income,
}

impl TxKind {
    /// Anything that is not explicitly income is treated as an outflow.
    pub fn parse(s: &str) -> TxKind {
        if s.trim().eq_ignore_ascii_case("income") {
            TxKind::Income
        } else {
            TxKind::Payment
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TxKind::Payment => "payment",
            TxKind::Income => "income",
        }
    }
}

/// One money movement. Never mutated or deleted once appended to the log.
///
/// `date` is `None` only for remote rows whose date cell failed to parse;
/// such rows still count toward the balance but fall outside every
/// date-windowed metric. Ingestion always produces `Some(date)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub date: Option<NaiveDate>,
    /// Sign-normalized: payments negative, income positive.
    pub amount: Decimal,
    pub description: String,
    pub category: String,
    #[serde(rename = "type")]
    pub kind: TxKind,
    pub recorded_at: Option<DateTime<Utc>>,
}

impl Transaction {
    /// Tolerant decode of a remote row. Bad cells degrade (amount -> 0,
    /// date -> `None`, unknown type -> payment); this never errors.
    pub fn from_row(row: &Row) -> Transaction {
        let get = |field: &str| row.get(field).map(String::as_str).unwrap_or("");
        Transaction {
            id: get("id").trim().to_string(),
            date: NaiveDate::parse_from_str(get("date").trim(), "%Y-%m-%d").ok(),
            amount: get("amount").trim().parse::<Decimal>().unwrap_or(Decimal::ZERO),
            description: get("description").trim().to_string(),
            category: get("category").trim().to_string(),
            kind: TxKind::parse(get("type")),
            recorded_at: DateTime::parse_from_rfc3339(get("recorded_at").trim())
                .ok()
                .map(|t| t.with_timezone(&Utc)),
        }
    }

    /// Cells in `remote::TRANSACTIONS` field order, shared by the sheet
    /// append path and the CSV exporter.
    pub fn to_cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.date.map(|d| d.to_string()).unwrap_or_default(),
            self.amount.to_string(),
            self.description.clone(),
            self.category.clone(),
            self.kind.as_str().to_string(),
            self.recorded_at.map(|t| t.to_rfc3339()).unwrap_or_default(),
        ]
    }
}

/// Monthly budget configuration reconstructed from `budget_config` rows.
///
/// Only categories present in `discretionary` are tracked for
/// over/under-budget status; everything else is untracked.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BudgetConfig {
    pub monthly_income: Decimal,
    pub fixed_costs: BTreeMap<String, Decimal>,
    pub discretionary: BTreeMap<String, Decimal>,
}

impl BudgetConfig {
    /// Row types: `fixed` -> fixed_costs, `monthly` -> discretionary,
    /// `income` -> monthly_income. Unknown types are skipped.
    pub fn from_rows(rows: &[Row]) -> BudgetConfig {
        let mut cfg = BudgetConfig::default();
        for row in rows {
            let get = |field: &str| row.get(field).map(String::as_str).unwrap_or("");
            let category = get("category").trim().to_string();
            let amount = get("amount").trim().parse::<Decimal>().unwrap_or(Decimal::ZERO);
            match get("type").trim().to_lowercase().as_str() {
                "fixed" if !category.is_empty() => {
                    cfg.fixed_costs.insert(category, amount);
                }
                "monthly" if !category.is_empty() => {
                    cfg.discretionary.insert(category, amount);
                }
                "income" => cfg.monthly_income = amount,
                _ => {}
            }
        }
        cfg
    }
}

/// A payoff or savings target tracked by cumulative payments in one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub name: String,
    pub category: String,
    pub target: Decimal,
}

impl Goal {
    pub fn from_row(row: &Row) -> Option<Goal> {
        let get = |field: &str| row.get(field).map(String::as_str).unwrap_or("");
        let name = get("name").trim().to_string();
        let category = get("category").trim().to_string();
        if name.is_empty() && category.is_empty() {
            return None;
        }
        Some(Goal {
            name,
            category,
            target: get("target").trim().parse::<Decimal>().unwrap_or(Decimal::ZERO),
        })
    }
}

/// The whole session state. Owned by the running command, loaded once at
/// startup, snapshotted to the local cache after every mutation. Derived
/// figures (balance, spending, budget status) are never stored here; they
/// are pure functions in `metrics` recomputed on demand.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialState {
    pub transactions: Vec<Transaction>,
    pub budget_config: BudgetConfig,
    pub categories: Vec<String>,
    pub goals: Vec<Goal>,
}
