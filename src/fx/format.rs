// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::{Decimal, RoundingStrategy};

use super::FxError;
use crate::models::CurrencyCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locale {
    EnUs,
    DeDe,
    EnGb,
    JaJp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SymbolPosition {
    Prefix,
    Suffix,
}

impl Locale {
    pub fn for_currency(currency: CurrencyCode) -> Locale {
        match currency {
            CurrencyCode::Usd => Locale::EnUs,
            CurrencyCode::Eur => Locale::DeDe,
            CurrencyCode::Gbp => Locale::EnGb,
            CurrencyCode::Jpy => Locale::JaJp,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Locale::EnUs => "en-US",
            Locale::DeDe => "de-DE",
            Locale::EnGb => "en-GB",
            Locale::JaJp => "ja-JP",
        }
    }

    fn group_separator(&self) -> char {
        match self {
            Locale::DeDe => '.',
            _ => ',',
        }
    }

    fn decimal_separator(&self) -> char {
        match self {
            Locale::DeDe => ',',
            _ => '.',
        }
    }

    fn symbol_position(&self) -> SymbolPosition {
        match self {
            Locale::DeDe => SymbolPosition::Suffix,
            _ => SymbolPosition::Prefix,
        }
    }
}

/// Minor-unit digits shown for a currency.
pub fn fraction_digits(currency: CurrencyCode) -> u32 {
    match currency {
        CurrencyCode::Jpy => 0,
        _ => 2,
    }
}

pub fn symbol(currency: CurrencyCode) -> &'static str {
    match currency {
        CurrencyCode::Usd => "$",
        CurrencyCode::Eur => "€",
        CurrencyCode::Gbp => "£",
        CurrencyCode::Jpy => "￥",
    }
}

/// Renders `amount` (already in `currency`) the way the currency's locale
/// writes money, e.g. `$1,234.56`, `1.234,56 €`, `￥15,050`.
///
/// This is the only place rounding happens. Halves round away from zero.
pub fn format_money(amount: f64, currency: CurrencyCode) -> Result<String, FxError> {
    let locale = Locale::for_currency(currency);
    let dp = fraction_digits(currency);
    let rounded = Decimal::try_from(amount)
        .map_err(|_| FxError::Unrepresentable(amount))?
        .round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);

    // "-$0.00" reads as a debt; a value that rounds to zero is shown unsigned.
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let digits = format!("{:.*}", dp as usize, rounded.abs());
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (digits.as_str(), None),
    };

    let mut body = group_thousands(int_part, locale.group_separator());
    if let Some(frac) = frac_part {
        body.push(locale.decimal_separator());
        body.push_str(frac);
    }

    let sign = if negative { "-" } else { "" };
    let sym = symbol(currency);
    Ok(match locale.symbol_position() {
        SymbolPosition::Prefix => format!("{sign}{sym}{body}"),
        SymbolPosition::Suffix => format!("{sign}{body}\u{a0}{sym}"),
    })
}

fn group_thousands(digits: &str, sep: char) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(sep);
        }
        out.push(ch);
    }
    out
}
