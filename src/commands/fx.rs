// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::fx::{CurrencyConverter, Locale, format_money, symbol};
use crate::utils::{parse_amount, parse_currency, pretty_table};
use anyhow::{Context, Result};

pub fn handle(fx: &CurrencyConverter, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", _)) => list_rates(fx),
        Some(("convert", sub)) => {
            let line = convert_amount(fx, sub)?;
            println!("{}", line);
            Ok(())
        }
        _ => Ok(()),
    }
}

fn list_rates(fx: &CurrencyConverter) -> Result<()> {
    let base = fx.base_currency();
    let display = fx.display_currency();
    let data = fx
        .rates()
        .iter()
        .map(|(ccy, rate)| {
            let mut marks = Vec::new();
            if ccy == base {
                marks.push("base");
            }
            if ccy == display {
                marks.push("display");
            }
            vec![
                ccy.to_string(),
                format!("{}", rate),
                Locale::for_currency(ccy).tag().to_string(),
                symbol(ccy).to_string(),
                marks.join(", "),
            ]
        })
        .collect();
    let first = format!("CCY (per 1 {})", base);
    println!(
        "{}",
        pretty_table(&[first.as_str(), "Rate", "Locale", "Symbol", ""], data)
    );
    Ok(())
}

/// Renders `"<amount> <FROM> -> <converted> <TO> (<formatted>)"`.
pub fn convert_amount(fx: &CurrencyConverter, sub: &clap::ArgMatches) -> Result<String> {
    let raw = sub.get_one::<String>("amount").context("amount missing")?;
    let amount = parse_amount(raw)?;
    let from = parse_currency(sub.get_one::<String>("from").context("--from missing")?)?;
    let to = match sub.get_one::<String>("to") {
        Some(s) => parse_currency(s)?,
        None => fx.display_currency(),
    };
    let res = fx.convert_between(amount, from, to)?;
    Ok(format!(
        "{} {} -> {:.4} {} ({})",
        amount,
        from,
        res,
        to,
        format_money(res, to)?
    ))
}
