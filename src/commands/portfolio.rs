// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::{
    AllocationSlice, CashFlow, account_balance, allocation, cash_flow, top_performer,
    total_account_balance,
};
use crate::fx::CurrencyConverter;
use crate::models::{Account, AccountType, Asset, CurrencyCode};
use crate::snapshot::Snapshot;
use crate::utils::{maybe_print_json, money, pct, pretty_table};
use anyhow::{Result, anyhow};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct AccountRow {
    pub id: String,
    pub name: String,
    pub r#type: AccountType,
    pub institution: String,
    pub balance: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PortfolioSummary {
    pub currency: CurrencyCode,
    pub total: f64,
    pub accounts: Vec<AccountRow>,
    pub allocation: Vec<AllocationSlice>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AccountDetail {
    pub account: AccountRow,
    /// Only for bank accounts.
    pub cash_flow: Option<CashFlow>,
    /// Only for investment accounts.
    pub allocation: Vec<AllocationSlice>,
    pub top_performer: Option<String>,
}

fn account_row(a: &Account, assets: &[Asset], fx: &CurrencyConverter) -> Result<AccountRow> {
    Ok(AccountRow {
        id: a.id.clone(),
        name: a.name.clone(),
        r#type: a.r#type,
        institution: a.institution.clone().unwrap_or_default(),
        balance: account_balance(a, assets, fx)?,
    })
}

pub fn summarize(data: &Snapshot, fx: &CurrencyConverter) -> Result<PortfolioSummary> {
    let mut accounts = Vec::with_capacity(data.accounts.len());
    for a in &data.accounts {
        accounts.push(account_row(a, &data.assets, fx)?);
    }
    Ok(PortfolioSummary {
        currency: fx.display_currency(),
        total: total_account_balance(&data.accounts, &data.assets, fx)?,
        accounts,
        allocation: allocation(&data.assets, fx)?,
    })
}

pub fn account_detail(
    data: &Snapshot,
    fx: &CurrencyConverter,
    account_id: &str,
) -> Result<AccountDetail> {
    let account = data
        .accounts
        .iter()
        .find(|a| a.id == account_id)
        .ok_or_else(|| anyhow!("Account '{}' not found", account_id))?;
    let held: Vec<Asset> = data
        .assets
        .iter()
        .filter(|a| a.account_id == account.id)
        .cloned()
        .collect();
    let (flow, alloc, top) = match account.r#type {
        AccountType::Bank => (
            Some(cash_flow(&account.id, &data.transactions, fx)?),
            Vec::new(),
            None,
        ),
        AccountType::Investment => (
            None,
            allocation(&held, fx)?,
            top_performer(&held).map(|a| a.name.clone()),
        ),
    };
    Ok(AccountDetail {
        account: account_row(account, &data.assets, fx)?,
        cash_flow: flow,
        allocation: alloc,
        top_performer: top,
    })
}

pub fn handle(data: &Snapshot, fx: &CurrencyConverter, m: &clap::ArgMatches) -> Result<()> {
    let json_flag = m.get_flag("json");
    let jsonl_flag = m.get_flag("jsonl");

    if let Some(id) = m.get_one::<String>("account") {
        let d = account_detail(data, fx, id)?;
        if maybe_print_json(json_flag, jsonl_flag, &d)? {
            return Ok(());
        }
        let mut rows = vec![vec!["Balance".to_string(), money(fx, d.account.balance)?]];
        if let Some(flow) = d.cash_flow {
            rows.push(vec!["Money in".into(), money(fx, flow.income)?]);
            rows.push(vec!["Money out".into(), money(fx, flow.expense)?]);
        }
        if let Some(top) = &d.top_performer {
            rows.push(vec!["Top performer".into(), top.clone()]);
        }
        println!("{}", pretty_table(&[d.account.name.as_str(), ""], rows));
        print_allocation(fx, &d.allocation)?;
        return Ok(());
    }

    let s = summarize(data, fx)?;
    if maybe_print_json(json_flag, jsonl_flag, &s)? {
        return Ok(());
    }
    let mut rows = Vec::new();
    for a in &s.accounts {
        rows.push(vec![
            a.name.clone(),
            format!("{:?}", a.r#type),
            a.institution.clone(),
            money(fx, a.balance)?,
        ]);
    }
    rows.push(vec![
        "Total".into(),
        String::new(),
        String::new(),
        money(fx, s.total)?,
    ]);
    println!(
        "{}",
        pretty_table(&["Account", "Type", "Institution", "Balance"], rows)
    );
    print_allocation(fx, &s.allocation)
}

fn print_allocation(fx: &CurrencyConverter, slices: &[AllocationSlice]) -> Result<()> {
    if slices.is_empty() {
        return Ok(());
    }
    let mut rows = Vec::new();
    for s in slices {
        rows.push(vec![s.label.clone(), money(fx, s.value)?, pct(s.percent)]);
    }
    println!("{}", pretty_table(&["Asset type", "Value", "Share"], rows));
    Ok(())
}
