// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Currency conversion through a fixed base-currency rate table, and
//! locale-aware money formatting.

mod converter;
mod format;
mod rates;

pub use converter::CurrencyConverter;
pub use format::{Locale, fraction_digits, format_money, symbol};
pub use rates::{DEFAULT_RATES, ExchangeRateTable};

use thiserror::Error;

use crate::models::CurrencyCode;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FxError {
    #[error("No exchange rate configured for {0}")]
    UnknownCurrency(CurrencyCode),
    #[error("Unsupported currency code '{0}' (expected one of USD, EUR, GBP, JPY)")]
    UnsupportedCode(String),
    #[error("Invalid rate {rate} for {currency}: rates must be positive and finite")]
    InvalidRate { currency: CurrencyCode, rate: f64 },
    #[error("Base currency {currency} must have rate 1, found {rate}")]
    BaseRateNotOne { currency: CurrencyCode, rate: f64 },
    #[error("Amount {0} cannot be represented for display")]
    Unrepresentable(f64),
}
