// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::{
    AllocationSlice, allocation, invested, liquidity, net_worth, savings_rate, total_by_type,
};
use crate::fx::CurrencyConverter;
use crate::models::{CurrencyCode, TransactionType};
use crate::snapshot::Snapshot;
use crate::utils::{maybe_print_json, money, pct, pretty_table};
use anyhow::Result;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub currency: CurrencyCode,
    pub net_worth: f64,
    pub liquidity: f64,
    pub invested: f64,
    pub income: f64,
    pub expense: f64,
    pub net_flow: f64,
    pub savings_rate: f64,
    pub allocation: Vec<AllocationSlice>,
}

/// Headline figures in the display currency.
///
/// Income comes from income transactions; when there are none, the profile's
/// declared monthly income stands in.
pub fn summarize(data: &Snapshot, fx: &CurrencyConverter) -> Result<DashboardSummary> {
    let mut income = total_by_type(&data.transactions, fx, TransactionType::Income)?;
    if income == 0.0 {
        if let Some(profile) = &data.profile {
            income = fx.convert(profile.monthly_income, profile.main_currency)?;
        }
    }
    let expense = total_by_type(&data.transactions, fx, TransactionType::Expense)?;
    Ok(DashboardSummary {
        currency: fx.display_currency(),
        net_worth: net_worth(&data.assets, fx)?,
        liquidity: liquidity(&data.assets, fx)?,
        invested: invested(&data.assets, fx)?,
        income,
        expense,
        net_flow: income - expense,
        savings_rate: savings_rate(income, expense),
        allocation: allocation(&data.assets, fx)?,
    })
}

pub fn handle(data: &Snapshot, fx: &CurrencyConverter, m: &clap::ArgMatches) -> Result<()> {
    let json_flag = m.get_flag("json");
    let jsonl_flag = m.get_flag("jsonl");
    let s = summarize(data, fx)?;
    if maybe_print_json(json_flag, jsonl_flag, &s)? {
        return Ok(());
    }

    let rows = vec![
        vec!["Net worth".into(), money(fx, s.net_worth)?],
        vec!["Liquidity".into(), money(fx, s.liquidity)?],
        vec!["Invested".into(), money(fx, s.invested)?],
        vec!["Income".into(), money(fx, s.income)?],
        vec!["Expense".into(), money(fx, s.expense)?],
        vec!["Net flow".into(), money(fx, s.net_flow)?],
        vec!["Savings rate".into(), pct(s.savings_rate)],
    ];
    println!("{}", pretty_table(&["Metric", "Value"], rows));

    if !s.allocation.is_empty() {
        let mut alloc = Vec::new();
        for slice in &s.allocation {
            alloc.push(vec![
                slice.label.clone(),
                money(fx, slice.value)?,
                pct(slice.percent),
            ]);
        }
        println!("{}", pretty_table(&["Asset type", "Value", "Share"], alloc));
    }
    Ok(())
}
