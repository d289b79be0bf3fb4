// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use comfy_table::{Cell, Table, presets::UTF8_FULL};

use crate::fx::CurrencyConverter;
use crate::models::{CurrencyCode, Transaction};

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

/// First and last day of a `YYYY-MM` month.
pub fn month_bounds(month: &str) -> Result<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::parse_from_str(&format!("{}-01", month.trim()), "%Y-%m-%d")
        .with_context(|| format!("Invalid month '{}', expected YYYY-MM", month))?;
    let (y, m) = if first.month() == 12 {
        (first.year() + 1, 1)
    } else {
        (first.year(), first.month() + 1)
    };
    let last = NaiveDate::from_ymd_opt(y, m, 1)
        .and_then(|d| d.pred_opt())
        .ok_or_else(|| anyhow::anyhow!("Invalid month '{}'", month))?;
    Ok((first, last))
}

pub fn parse_amount(s: &str) -> Result<f64> {
    let v = s
        .trim()
        .parse::<f64>()
        .with_context(|| format!("Invalid amount '{}'", s))?;
    if !v.is_finite() {
        anyhow::bail!("Invalid amount '{}'", s);
    }
    Ok(v)
}

pub fn parse_currency(s: &str) -> Result<CurrencyCode> {
    Ok(s.parse::<CurrencyCode>()?)
}

/// Transactions dated within `[from, to]`; open ends are unbounded.
pub fn within_period(
    transactions: &[Transaction],
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|t| from.is_none_or(|f| t.date >= f) && to.is_none_or(|e| t.date <= e))
        .cloned()
        .collect()
}

/// Period bounds from the `month`, `from` and `to` arguments. A month wins
/// over explicit dates.
pub fn period_args(m: &clap::ArgMatches) -> Result<(Option<NaiveDate>, Option<NaiveDate>)> {
    if let Some(month) = m.get_one::<String>("month") {
        let (first, last) = month_bounds(month)?;
        return Ok((Some(first), Some(last)));
    }
    let from = m.get_one::<String>("from").map(|s| parse_date(s)).transpose()?;
    let to = m.get_one::<String>("to").map(|s| parse_date(s)).transpose()?;
    Ok((from, to))
}

/// Formats a figure already expressed in the display currency.
pub fn money(fx: &CurrencyConverter, amount: f64) -> Result<String> {
    Ok(fx.format_display(amount)?)
}

pub fn pct(v: f64) -> String {
    format!("{:.1}%", v)
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}
