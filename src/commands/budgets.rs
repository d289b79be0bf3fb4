// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::{UsageStatus, budget_spent, budget_usage_percent, goal_progress};
use crate::fx::CurrencyConverter;
use crate::models::{CurrencyCode, Goal};
use crate::snapshot::Snapshot;
use crate::utils::{maybe_print_json, pct, pretty_table};
use anyhow::Result;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct BudgetRow {
    pub category: String,
    pub currency: CurrencyCode,
    pub limit: f64,
    pub spent: f64,
    pub raw_pct: f64,
    pub display_pct: f64,
    pub status: UsageStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct GoalRow {
    pub name: String,
    pub currency: CurrencyCode,
    pub target: f64,
    pub current: f64,
    pub raw_pct: f64,
    pub display_pct: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct BudgetReport {
    pub budgets: Vec<BudgetRow>,
    pub goals: Vec<GoalRow>,
}

/// Usage per budget. With `recompute`, `spent` is derived from matching
/// expense transactions instead of the stored figure.
pub fn budget_rows(
    data: &Snapshot,
    fx: &CurrencyConverter,
    recompute: bool,
) -> Result<Vec<BudgetRow>> {
    let mut rows = Vec::with_capacity(data.budgets.len());
    for b in &data.budgets {
        let spent = if recompute {
            budget_spent(b, &data.transactions, fx)?
        } else {
            b.spent
        };
        let usage = budget_usage_percent(spent, b.limit);
        rows.push(BudgetRow {
            category: b.category.clone(),
            currency: b.currency,
            limit: b.limit,
            spent,
            raw_pct: usage.raw,
            display_pct: usage.clamped,
            status: usage.status(),
        });
    }
    Ok(rows)
}

pub fn goal_rows(goals: &[Goal]) -> Vec<GoalRow> {
    goals
        .iter()
        .map(|g| {
            let progress = goal_progress(g);
            GoalRow {
                name: g.name.clone(),
                currency: g.currency,
                target: g.target_amount,
                current: g.current_amount,
                raw_pct: progress.raw,
                display_pct: progress.clamped,
            }
        })
        .collect()
}

fn status_label(status: UsageStatus) -> &'static str {
    match status {
        UsageStatus::OnTrack => "on track",
        UsageStatus::NearLimit => "near limit",
        UsageStatus::OverLimit => "over limit",
    }
}

/// Budget amounts are shown in the display currency; the ratio itself does
/// not depend on currency.
pub fn handle(data: &Snapshot, fx: &CurrencyConverter, m: &clap::ArgMatches) -> Result<()> {
    let json_flag = m.get_flag("json");
    let jsonl_flag = m.get_flag("jsonl");
    let report = BudgetReport {
        budgets: budget_rows(data, fx, m.get_flag("recompute"))?,
        goals: goal_rows(&data.goals),
    };
    if maybe_print_json(json_flag, jsonl_flag, &report)? {
        return Ok(());
    }

    let mut rows = Vec::new();
    for r in &report.budgets {
        rows.push(vec![
            r.category.clone(),
            fx.format(r.spent, r.currency)?,
            fx.format(r.limit, r.currency)?,
            pct(r.raw_pct),
            status_label(r.status).to_string(),
        ]);
    }
    println!(
        "{}",
        pretty_table(&["Category", "Spent", "Limit", "Used", "Status"], rows)
    );

    if !report.goals.is_empty() {
        let mut goal_table = Vec::new();
        for g in &report.goals {
            goal_table.push(vec![
                g.name.clone(),
                fx.format(g.current, g.currency)?,
                fx.format(g.target, g.currency)?,
                pct(g.display_pct),
            ]);
        }
        println!(
            "{}",
            pretty_table(&["Goal", "Saved", "Target", "Progress"], goal_table)
        );
    }
    Ok(())
}

