// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::{
    average_daily_spend, largest_expense, remaining_budget, spend_by_category, spend_by_day,
    total_budget, total_by_type,
};
use crate::fx::CurrencyConverter;
use crate::models::{Budget, CurrencyCode, Transaction, TransactionType};
use crate::snapshot::Snapshot;
use crate::utils::{maybe_print_json, money, pct, period_args, pretty_table, within_period};
use anyhow::Result;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct LargestExpense {
    pub id: String,
    pub description: String,
    pub category: String,
    pub amount: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SpendingSummary {
    pub currency: CurrencyCode,
    pub total_spent: f64,
    pub total_budget: f64,
    pub remaining_budget: f64,
    /// Share of the total budget still available; 0 when no budget is set.
    pub remaining_pct: f64,
    pub average_daily: f64,
    pub largest: Option<LargestExpense>,
    pub by_category: Vec<(String, f64)>,
    pub by_day: Vec<(u32, f64)>,
}

pub fn summarize(
    transactions: &[Transaction],
    budgets: &[Budget],
    fx: &CurrencyConverter,
) -> Result<SpendingSummary> {
    let total_spent = total_by_type(transactions, fx, TransactionType::Expense)?;
    let total_budget = total_budget(budgets, fx)?;
    let remaining = remaining_budget(total_budget, total_spent);
    let largest = largest_expense(transactions, fx)?.map(|(t, amount)| LargestExpense {
        id: t.id.clone(),
        description: t.description.clone(),
        category: t.category.clone(),
        amount,
    });
    Ok(SpendingSummary {
        currency: fx.display_currency(),
        total_spent,
        total_budget,
        remaining_budget: remaining,
        remaining_pct: if total_budget > 0.0 {
            remaining / total_budget * 100.0
        } else {
            0.0
        },
        average_daily: average_daily_spend(transactions, fx)?,
        largest,
        by_category: spend_by_category(transactions, fx)?.into_vec(),
        by_day: spend_by_day(transactions, fx)?.into_vec(),
    })
}

pub fn handle(data: &Snapshot, fx: &CurrencyConverter, m: &clap::ArgMatches) -> Result<()> {
    let json_flag = m.get_flag("json");
    let jsonl_flag = m.get_flag("jsonl");
    let (from, to) = period_args(m)?;
    let txs = within_period(&data.transactions, from, to);
    let s = summarize(&txs, &data.budgets, fx)?;
    if maybe_print_json(json_flag, jsonl_flag, &s)? {
        return Ok(());
    }

    let largest = match &s.largest {
        Some(l) => format!("{} ({})", money(fx, l.amount)?, l.description),
        None => "-".to_string(),
    };
    let rows = vec![
        vec!["Total spent".into(), money(fx, s.total_spent)?],
        vec![
            "Budget remaining".into(),
            format!("{} ({} left)", money(fx, s.remaining_budget)?, pct(s.remaining_pct)),
        ],
        vec!["Average daily spend".into(), money(fx, s.average_daily)?],
        vec!["Largest expense".into(), largest],
    ];
    println!("{}", pretty_table(&["Metric", "Value"], rows));

    let mut cats: Vec<&(String, f64)> = s.by_category.iter().collect();
    cats.sort_by(|a, b| b.1.total_cmp(&a.1));
    let mut cat_rows = Vec::new();
    for (cat, amt) in cats {
        cat_rows.push(vec![cat.clone(), money(fx, *amt)?]);
    }
    println!("{}", pretty_table(&["Category", "Spent"], cat_rows));

    let mut day_rows = Vec::new();
    for (day, amt) in &s.by_day {
        day_rows.push(vec![day.to_string(), money(fx, *amt)?]);
    }
    println!("{}", pretty_table(&["Day", "Spent"], day_rows));
    Ok(())
}
