// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeMap;

use super::FxError;
use crate::models::CurrencyCode;

/// Built-in rates, quoted as units per one USD.
pub const DEFAULT_RATES: [(CurrencyCode, f64); 4] = [
    (CurrencyCode::Usd, 1.0),
    (CurrencyCode::Eur, 0.92),
    (CurrencyCode::Gbp, 0.79),
    (CurrencyCode::Jpy, 150.5),
];

/// Units of each currency per one unit of the base currency.
///
/// Rates are validated once at construction and never change afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ExchangeRateTable {
    base: CurrencyCode,
    rates: BTreeMap<CurrencyCode, f64>,
}

impl ExchangeRateTable {
    pub fn new<I>(base: CurrencyCode, rates: I) -> Result<Self, FxError>
    where
        I: IntoIterator<Item = (CurrencyCode, f64)>,
    {
        let mut map = BTreeMap::new();
        for (currency, rate) in rates {
            if !rate.is_finite() || rate <= 0.0 {
                return Err(FxError::InvalidRate { currency, rate });
            }
            map.insert(currency, rate);
        }
        match map.get(&base) {
            Some(&rate) if rate == 1.0 => {}
            Some(&rate) => return Err(FxError::BaseRateNotOne { currency: base, rate }),
            None => return Err(FxError::UnknownCurrency(base)),
        }
        Ok(Self { base, rates: map })
    }

    pub fn base(&self) -> CurrencyCode {
        self.base
    }

    /// Checked lookup; a currency missing from the table is an error, never a guess.
    pub fn rate(&self, currency: CurrencyCode) -> Result<f64, FxError> {
        self.rates
            .get(&currency)
            .copied()
            .ok_or(FxError::UnknownCurrency(currency))
    }

    pub fn contains(&self, currency: CurrencyCode) -> bool {
        self.rates.contains_key(&currency)
    }

    pub fn iter(&self) -> impl Iterator<Item = (CurrencyCode, f64)> + '_ {
        self.rates.iter().map(|(c, r)| (*c, *r))
    }
}

impl Default for ExchangeRateTable {
    fn default() -> Self {
        Self {
            base: CurrencyCode::Usd,
            rates: DEFAULT_RATES.into_iter().collect(),
        }
    }
}
