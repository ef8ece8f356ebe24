// Copyright (c) 2025 Tallybook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::{Local, NaiveDate};
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::ingest;
use crate::metrics::{self, BudgetLine};
use crate::models::FinancialState;
use crate::remote::{self, SheetsStore};
use crate::utils::{fmt_money, maybe_print_json, pretty_table};

#[derive(Debug, Serialize)]
pub struct GoalReport {
    pub name: String,
    pub category: String,
    pub paid: Decimal,
    pub target: Decimal,
    /// Clamped to 100 for display; the underlying progress is uncapped.
    pub percent: Decimal,
}

#[derive(Debug, Serialize)]
pub struct StatusReport {
    pub balance: Decimal,
    pub monthly_spending: Decimal,
    pub goals: Vec<GoalReport>,
    pub budget: Vec<BudgetLine>,
}

pub fn build_report(state: &FinancialState, today: NaiveDate) -> StatusReport {
    let goals = state
        .goals
        .iter()
        .map(|goal| {
            let paid = metrics::goal_progress(&state.transactions, goal);
            let percent = if goal.target.is_zero() {
                Decimal::ONE_HUNDRED
            } else {
                (paid / goal.target * Decimal::ONE_HUNDRED).min(Decimal::ONE_HUNDRED)
            };
            GoalReport {
                name: goal.name.clone(),
                category: goal.category.clone(),
                paid,
                target: goal.target,
                percent: percent.round_dp(1),
            }
        })
        .collect();

    StatusReport {
        balance: metrics::balance(&state.transactions),
        monthly_spending: metrics::monthly_spending(&state.transactions, today),
        goals,
        budget: metrics::budget_status(
            &state.transactions,
            &state.budget_config.discretionary,
            today,
        ),
    }
}

pub fn handle(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");

    let store = SheetsStore::from_settings(conn)?;
    let state = ingest::load_state(conn, remote::as_dyn(&store))?;
    let report = build_report(&state, Local::now().date_naive());

    if maybe_print_json(json_flag, jsonl_flag, &report)? {
        return Ok(());
    }

    println!("Balance:         {}", fmt_money(&report.balance));
    println!("Spending (30d):  {}", fmt_money(&report.monthly_spending));

    if !report.goals.is_empty() {
        let rows = report
            .goals
            .iter()
            .map(|g| {
                vec![
                    g.name.clone(),
                    fmt_money(&g.paid),
                    fmt_money(&g.target),
                    format!("{}%", g.percent),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Goal", "Paid", "Target", "Progress"], rows));
    }

    if report.budget.is_empty() {
        println!("No discretionary budget configured.");
    } else {
        let rows = report
            .budget
            .iter()
            .map(|line| {
                vec![
                    line.category.clone(),
                    fmt_money(&line.budget),
                    fmt_money(&line.spent),
                    fmt_money(&line.projected),
                    fmt_money(&line.remaining),
                    if line.is_over { "OVER BUDGET".into() } else { "On Track".into() },
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Category", "Budget", "Spent", "Projected", "Remaining", "Status"],
                rows,
            )
        );
    }
    Ok(())
}
