// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::fx::FxError;

/// Supported currencies. Every amount in the dashboard is tagged with one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CurrencyCode {
    Usd,
    Eur,
    Gbp,
    Jpy,
}

impl CurrencyCode {
    pub const ALL: [CurrencyCode; 4] = [
        CurrencyCode::Usd,
        CurrencyCode::Eur,
        CurrencyCode::Gbp,
        CurrencyCode::Jpy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CurrencyCode::Usd => "USD",
            CurrencyCode::Eur => "EUR",
            CurrencyCode::Gbp => "GBP",
            CurrencyCode::Jpy => "JPY",
        }
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CurrencyCode {
    type Err = FxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        CurrencyCode::ALL
            .into_iter()
            .find(|c| c.as_str() == upper)
            .ok_or(FxError::UnsupportedCode(upper))
    }
}

/// An amount tagged with its currency. Conversions produce new values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonetaryValue {
    pub amount: f64,
    pub currency: CurrencyCode,
}

impl MonetaryValue {
    pub fn new(amount: f64, currency: CurrencyCode) -> Self {
        Self { amount, currency }
    }
}

/// Records that carry a single monetary field.
///
/// Aggregations only ever read amounts through this trait so that every sum
/// goes through the converter first.
pub trait Monetary {
    fn money(&self) -> MonetaryValue;
}

impl Monetary for MonetaryValue {
    fn money(&self) -> MonetaryValue {
        *self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub amount: f64,
    pub currency: CurrencyCode,
    pub category: String,
    #[serde(default)]
    pub description: String,
    pub date: NaiveDate,
    pub r#type: TransactionType,
    #[serde(default)]
    pub account_id: Option<String>,
}

impl Monetary for Transaction {
    fn money(&self) -> MonetaryValue {
        MonetaryValue::new(self.amount, self.currency)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetType {
    Stock,
    Crypto,
    #[serde(rename = "Real Estate")]
    RealEstate,
    Cash,
}

impl AssetType {
    pub fn label(&self) -> &'static str {
        match self {
            AssetType::Stock => "Stock",
            AssetType::Crypto => "Crypto",
            AssetType::RealEstate => "Real Estate",
            AssetType::Cash => "Cash",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: String,
    #[serde(default)]
    pub account_id: String,
    pub name: String,
    pub r#type: AssetType,
    pub value: f64,
    pub currency: CurrencyCode,
    #[serde(default)]
    pub day_change_pct: Option<f64>,
}

impl Monetary for Asset {
    fn money(&self) -> MonetaryValue {
        MonetaryValue::new(self.value, self.currency)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: String,
    pub category: String,
    pub limit: f64,
    #[serde(default)]
    pub spent: f64,
    pub currency: CurrencyCode,
}

/// A budget's monetary field is its limit.
impl Monetary for Budget {
    fn money(&self) -> MonetaryValue {
        MonetaryValue::new(self.limit, self.currency)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountType {
    Bank,
    Investment,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub name: String,
    pub r#type: AccountType,
    pub currency: CurrencyCode,
    #[serde(default)]
    pub balance: f64,
    #[serde(default)]
    pub institution: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    pub name: String,
    pub target_amount: f64,
    pub current_amount: f64,
    pub currency: CurrencyCode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RiskProfile {
    Low,
    #[default]
    Medium,
    High,
}

impl fmt::Display for RiskProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RiskProfile::Low => "Low",
            RiskProfile::Medium => "Medium",
            RiskProfile::High => "High",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    pub main_currency: CurrencyCode,
    #[serde(default)]
    pub monthly_income: f64,
    #[serde(default)]
    pub risk_profile: RiskProfile,
    #[serde(default)]
    pub financial_goals: Vec<String>,
}
