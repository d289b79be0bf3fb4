// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use tracing::debug;

use super::{ExchangeRateTable, FxError, format_money};
use crate::models::{CurrencyCode, MonetaryValue};

/// Converts and formats amounts for one viewing session.
///
/// The display currency lives here rather than in global state; callers that
/// need two different display currencies hold two converters.
#[derive(Debug, Clone)]
pub struct CurrencyConverter {
    rates: ExchangeRateTable,
    display: CurrencyCode,
}

impl CurrencyConverter {
    /// Starts a session displaying the table's base currency.
    pub fn new(rates: ExchangeRateTable) -> Self {
        let display = rates.base();
        Self { rates, display }
    }

    pub fn with_display(rates: ExchangeRateTable, display: CurrencyCode) -> Self {
        Self { rates, display }
    }

    pub fn rates(&self) -> &ExchangeRateTable {
        &self.rates
    }

    pub fn base_currency(&self) -> CurrencyCode {
        self.rates.base()
    }

    pub fn display_currency(&self) -> CurrencyCode {
        self.display
    }

    /// Takes effect for every later call. Values already computed by callers
    /// are not touched.
    pub fn set_display_currency(&mut self, currency: CurrencyCode) {
        if currency != self.display {
            debug!(from = %self.display, to = %currency, "display currency changed");
        }
        self.display = currency;
    }

    /// Converts `amount` from `from` into the display currency.
    pub fn convert(&self, amount: f64, from: CurrencyCode) -> Result<f64, FxError> {
        self.convert_between(amount, from, self.display)
    }

    /// Pivots through the base currency: divide into base units, then
    /// multiply out into the target. Same-currency conversion is the identity.
    pub fn convert_between(
        &self,
        amount: f64,
        from: CurrencyCode,
        to: CurrencyCode,
    ) -> Result<f64, FxError> {
        if from == to {
            return Ok(amount);
        }
        let from_rate = self.rates.rate(from)?;
        let to_rate = self.rates.rate(to)?;
        Ok(amount / from_rate * to_rate)
    }

    pub fn convert_value(&self, value: MonetaryValue) -> Result<MonetaryValue, FxError> {
        let amount = self.convert(value.amount, value.currency)?;
        Ok(MonetaryValue::new(amount, self.display))
    }

    /// Converts, then renders with the display currency's locale.
    pub fn format(&self, amount: f64, from: CurrencyCode) -> Result<String, FxError> {
        let converted = self.convert(amount, from)?;
        format_money(converted, self.display)
    }

    /// `format` with the source currency defaulted to the base currency.
    pub fn format_base(&self, amount: f64) -> Result<String, FxError> {
        self.format(amount, self.rates.base())
    }

    /// Renders a figure that is already expressed in the display currency,
    /// such as an aggregation result.
    pub fn format_display(&self, amount: f64) -> Result<String, FxError> {
        self.format(amount, self.display)
    }
}

impl Default for CurrencyConverter {
    fn default() -> Self {
        Self::new(ExchangeRateTable::default())
    }
}
