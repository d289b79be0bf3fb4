// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Read-only dashboard figures computed over caller-owned records.
//!
//! Every monetary value is converted into the display currency before it is
//! added to anything. Empty or degenerate input yields zero, never an error;
//! the only failure is a currency missing from the rate table.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::hash::Hash;

use chrono::Datelike;
use serde::Serialize;

use crate::fx::{CurrencyConverter, FxError};
use crate::models::{
    Account, AccountType, Asset, AssetType, Budget, CurrencyCode, Goal, Monetary, Transaction,
    TransactionType,
};

pub const NEAR_LIMIT_PCT: f64 = 85.0;
pub const OVER_LIMIT_PCT: f64 = 100.0;

/// Converts each item into the display currency, then sums.
pub fn sum_converted<'a, T, I>(items: I, fx: &CurrencyConverter) -> Result<f64, FxError>
where
    T: Monetary + 'a,
    I: IntoIterator<Item = &'a T>,
{
    sum_converted_to(items, fx, fx.display_currency())
}

/// Converts each item into `target`, then sums.
pub fn sum_converted_to<'a, T, I>(
    items: I,
    fx: &CurrencyConverter,
    target: CurrencyCode,
) -> Result<f64, FxError>
where
    T: Monetary + 'a,
    I: IntoIterator<Item = &'a T>,
{
    items.into_iter().try_fold(0.0, |acc, item| {
        let m = item.money();
        Ok(acc + fx.convert_between(m.amount, m.currency, target)?)
    })
}

/// Sum of the values of assets matching `predicate`. Pass `|_| true` for all.
pub fn total_value<P>(
    assets: &[Asset],
    fx: &CurrencyConverter,
    predicate: P,
) -> Result<f64, FxError>
where
    P: Fn(&Asset) -> bool,
{
    sum_converted(assets.iter().filter(|&a| predicate(a)), fx)
}

pub fn net_worth(assets: &[Asset], fx: &CurrencyConverter) -> Result<f64, FxError> {
    total_value(assets, fx, |_| true)
}

pub fn liquidity(assets: &[Asset], fx: &CurrencyConverter) -> Result<f64, FxError> {
    total_value(assets, fx, |a| a.r#type == AssetType::Cash)
}

pub fn invested(assets: &[Asset], fx: &CurrencyConverter) -> Result<f64, FxError> {
    total_value(assets, fx, |a| a.r#type != AssetType::Cash)
}

pub fn total_by_type(
    transactions: &[Transaction],
    fx: &CurrencyConverter,
    kind: TransactionType,
) -> Result<f64, FxError> {
    sum_converted(transactions.iter().filter(|t| t.r#type == kind), fx)
}

/// Share of income kept, in percent.
///
/// Zero or negative income yields 0, not an error or infinity. This is a
/// policy for empty dashboards rather than a numeric fallback.
pub fn savings_rate(income: f64, expense: f64) -> f64 {
    if income > 0.0 {
        (income - expense) / income * 100.0
    } else {
        0.0
    }
}

/// Converted sums bucketed by key, in the order keys were first seen.
///
/// The order exists for stable chart rendering only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupedSums<K> {
    entries: Vec<(K, f64)>,
}

impl<K: PartialEq> GroupedSums<K> {
    pub fn get(&self, key: &K) -> Option<f64> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| *v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, f64)> {
        self.entries.iter().map(|(k, v)| (k, *v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.entries.iter().map(|(_, v)| v).sum()
    }

    pub fn into_vec(self) -> Vec<(K, f64)> {
        self.entries
    }
}

/// Groups any monetary records by `key_fn`, converting before adding.
pub fn group_converted<'a, T, K, I, F>(
    items: I,
    fx: &CurrencyConverter,
    key_fn: F,
) -> Result<GroupedSums<K>, FxError>
where
    T: Monetary + 'a,
    K: Eq + Hash + Clone,
    I: IntoIterator<Item = &'a T>,
    F: Fn(&T) -> K,
{
    let mut entries: Vec<(K, f64)> = Vec::new();
    let mut index_by_key: HashMap<K, usize> = HashMap::new();
    for item in items {
        let m = item.money();
        let converted = fx.convert(m.amount, m.currency)?;
        match index_by_key.entry(key_fn(item)) {
            Entry::Occupied(slot) => entries[*slot.get()].1 += converted,
            Entry::Vacant(slot) => {
                entries.push((slot.key().clone(), converted));
                slot.insert(entries.len() - 1);
            }
        }
    }
    Ok(GroupedSums { entries })
}

/// Buckets converted expense amounts by `key_fn`. Income is ignored.
pub fn group_sum<K, F>(
    transactions: &[Transaction],
    fx: &CurrencyConverter,
    key_fn: F,
) -> Result<GroupedSums<K>, FxError>
where
    K: Eq + Hash + Clone,
    F: Fn(&Transaction) -> K,
{
    group_converted(
        transactions
            .iter()
            .filter(|t| t.r#type == TransactionType::Expense),
        fx,
        key_fn,
    )
}

pub fn spend_by_category(
    transactions: &[Transaction],
    fx: &CurrencyConverter,
) -> Result<GroupedSums<String>, FxError> {
    group_sum(transactions, fx, |t| t.category.clone())
}

pub fn spend_by_day(
    transactions: &[Transaction],
    fx: &CurrencyConverter,
) -> Result<GroupedSums<u32>, FxError> {
    group_sum(transactions, fx, |t| t.date.day())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UsageStatus {
    OnTrack,
    NearLimit,
    OverLimit,
}

/// How much of a limit has been used, in percent.
///
/// `raw` may exceed 100 so callers can tell "at limit" from "over limit";
/// `clamped` is bounded to `[0, 100]` for progress bars.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Usage {
    pub raw: f64,
    pub clamped: f64,
}

impl Usage {
    pub fn status(&self) -> UsageStatus {
        if self.raw >= OVER_LIMIT_PCT {
            UsageStatus::OverLimit
        } else if self.raw > NEAR_LIMIT_PCT {
            UsageStatus::NearLimit
        } else {
            UsageStatus::OnTrack
        }
    }
}

/// A non-positive limit reports zero usage instead of dividing by it.
pub fn budget_usage_percent(spent: f64, limit: f64) -> Usage {
    if limit <= 0.0 {
        return Usage {
            raw: 0.0,
            clamped: 0.0,
        };
    }
    let raw = spent / limit * 100.0;
    Usage {
        raw,
        clamped: raw.clamp(0.0, 100.0),
    }
}

pub fn goal_progress(goal: &Goal) -> Usage {
    budget_usage_percent(goal.current_amount, goal.target_amount)
}

pub fn total_budget(budgets: &[Budget], fx: &CurrencyConverter) -> Result<f64, FxError> {
    sum_converted(budgets, fx)
}

pub fn remaining_budget(total_budget: f64, total_spent: f64) -> f64 {
    (total_budget - total_spent).max(0.0)
}

/// Total spend divided by the number of distinct days of the month that
/// carry an expense.
pub fn average_daily_spend(
    transactions: &[Transaction],
    fx: &CurrencyConverter,
) -> Result<f64, FxError> {
    let by_day = spend_by_day(transactions, fx)?;
    Ok(by_day.total() / by_day.len().max(1) as f64)
}

/// The expense with the largest converted amount, with that amount.
pub fn largest_expense<'a>(
    transactions: &'a [Transaction],
    fx: &CurrencyConverter,
) -> Result<Option<(&'a Transaction, f64)>, FxError> {
    let mut best: Option<(&Transaction, f64)> = None;
    for t in transactions
        .iter()
        .filter(|t| t.r#type == TransactionType::Expense)
    {
        let converted = fx.convert(t.amount, t.currency)?;
        if best.is_none_or(|(_, b)| converted > b) {
            best = Some((t, converted));
        }
    }
    Ok(best)
}

/// Expenses in the budget's category (case-insensitive), summed in the
/// budget's own currency.
pub fn budget_spent(
    budget: &Budget,
    transactions: &[Transaction],
    fx: &CurrencyConverter,
) -> Result<f64, FxError> {
    let wanted = budget.category.to_lowercase();
    sum_converted_to(
        transactions.iter().filter(|t| {
            t.r#type == TransactionType::Expense && t.category.to_lowercase() == wanted
        }),
        fx,
        budget.currency,
    )
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllocationSlice {
    pub label: String,
    pub value: f64,
    pub percent: f64,
}

/// Converted asset values per asset type, with each type's share of the total.
pub fn allocation(
    assets: &[Asset],
    fx: &CurrencyConverter,
) -> Result<Vec<AllocationSlice>, FxError> {
    let groups = group_converted(assets, fx, |a| a.r#type)?;
    let total = groups.total();
    Ok(groups
        .into_vec()
        .into_iter()
        .map(|(kind, value)| AllocationSlice {
            label: kind.label().to_string(),
            value,
            percent: if total > 0.0 { value / total * 100.0 } else { 0.0 },
        })
        .collect())
}

/// Bank accounts report their converted balance; investment accounts the
/// converted sum of the assets they hold.
pub fn account_balance(
    account: &Account,
    assets: &[Asset],
    fx: &CurrencyConverter,
) -> Result<f64, FxError> {
    match account.r#type {
        AccountType::Bank => fx.convert(account.balance, account.currency),
        AccountType::Investment => {
            sum_converted(assets.iter().filter(|a| a.account_id == account.id), fx)
        }
    }
}

pub fn total_account_balance(
    accounts: &[Account],
    assets: &[Asset],
    fx: &CurrencyConverter,
) -> Result<f64, FxError> {
    accounts
        .iter()
        .try_fold(0.0, |acc, a| Ok(acc + account_balance(a, assets, fx)?))
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct CashFlow {
    pub income: f64,
    pub expense: f64,
}

/// Converted inflow and outflow of transactions linked to `account_id`.
pub fn cash_flow(
    account_id: &str,
    transactions: &[Transaction],
    fx: &CurrencyConverter,
) -> Result<CashFlow, FxError> {
    let linked: Vec<&Transaction> = transactions
        .iter()
        .filter(|t| t.account_id.as_deref() == Some(account_id))
        .collect();
    let sum_of = |kind: TransactionType| {
        sum_converted(linked.iter().copied().filter(|t| t.r#type == kind), fx)
    };
    Ok(CashFlow {
        income: sum_of(TransactionType::Income)?,
        expense: sum_of(TransactionType::Expense)?,
    })
}

/// Asset with the highest daily change; a missing change counts as 0.
pub fn top_performer(assets: &[Asset]) -> Option<&Asset> {
    assets.iter().max_by(|a, b| {
        let pa = a.day_change_pct.unwrap_or(0.0);
        let pb = b.day_change_pct.unwrap_or(0.0);
        pa.total_cmp(&pb)
    })
}
