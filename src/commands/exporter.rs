// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::{spend_by_category, spend_by_day};
use crate::fx::{CurrencyConverter, fraction_digits};
use crate::snapshot::Snapshot;
use crate::utils::{period_args, within_period};
use anyhow::{Context, Result};
use serde_json::json;
use tracing::info;

pub fn handle(data: &Snapshot, fx: &CurrencyConverter, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("spending", sub)) => export_spending(data, fx, sub),
        _ => Ok(()),
    }
}

/// Writes converted spend per category and per day of month. Amounts are
/// in the display currency with its minor-unit digits.
fn export_spending(
    data: &Snapshot,
    fx: &CurrencyConverter,
    sub: &clap::ArgMatches,
) -> Result<()> {
    let fmt = sub
        .get_one::<String>("format")
        .map(|s| s.to_lowercase())
        .unwrap_or_else(|| "csv".to_string());
    let out = sub.get_one::<String>("out").context("--out missing")?;
    let (from, to) = period_args(sub)?;
    let txs = within_period(&data.transactions, from, to);

    let ccy = fx.display_currency().to_string();
    let dp = fraction_digits(fx.display_currency()) as usize;
    let by_category = spend_by_category(&txs, fx)?;
    let by_day = spend_by_day(&txs, fx)?;

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)
                .with_context(|| format!("Open {} for writing", out))?;
            wtr.write_record(["group", "key", "amount", "currency"])?;
            for (cat, amt) in by_category.iter() {
                let amount = format!("{:.*}", dp, amt);
                wtr.write_record(["category", cat.as_str(), amount.as_str(), ccy.as_str()])?;
            }
            for (day, amt) in by_day.iter() {
                let (key, amount) = (day.to_string(), format!("{:.*}", dp, amt));
                wtr.write_record(["day", key.as_str(), amount.as_str(), ccy.as_str()])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let categories: Vec<_> = by_category
                .iter()
                .map(|(cat, amt)| json!({ "category": cat, "amount": amt }))
                .collect();
            let days: Vec<_> = by_day
                .iter()
                .map(|(day, amt)| json!({ "day": day, "amount": amt }))
                .collect();
            let doc = json!({ "currency": ccy, "byCategory": categories, "byDay": days });
            std::fs::write(out, serde_json::to_string_pretty(&doc)?)
                .with_context(|| format!("Write {}", out))?;
        }
        _ => anyhow::bail!("Unknown format: {} (use csv|json)", fmt),
    }
    info!(out = %out, format = %fmt, "spending exported");
    println!("Exported spending to {}", out);
    Ok(())
}
