// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Boundary to the generative-AI advisor.
//!
//! The dashboard core never talks to the advisor. Callers build an
//! [`AdvisorRequest`], hand it to whatever [`Advisor`] they have wired up, and
//! decode the structured reply into one of the typed results below. A reply
//! either decodes or fails; there are no retries or partial results.

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

use crate::aggregate::{budget_spent, spend_by_category};
use crate::fx::{CurrencyConverter, FxError};
use crate::models::{
    Asset, AssetType, Budget, CurrencyCode, RiskProfile, Transaction, TransactionType,
};

/// Transactions sent for pattern analysis are capped to keep prompts small.
pub const MAX_ANALYZED_TRANSACTIONS: usize = 50;

#[derive(Error, Debug)]
pub enum AdvisorError {
    #[error("Advisor call failed: {0}")]
    Failed(String),
    #[error("Malformed advisor response: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("Advisor response is missing '{0}'")]
    Missing(&'static str),
    #[error(transparent)]
    Fx(#[from] FxError),
}

/// Anything that can answer an advisor request with a JSON object.
pub trait Advisor {
    fn call(&self, request: &AdvisorRequest) -> Result<Value, AdvisorError>;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySpend {
    pub category: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionSketch {
    pub amount: f64,
    pub category: String,
    pub date: NaiveDate,
    pub desc: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssetSketch {
    pub name: String,
    pub r#type: AssetType,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AdvisorRequest {
    ExtractTransaction {
        text: String,
        home_currency: CurrencyCode,
    },
    ParseReceipt {
        mime_type: String,
        image_base64: String,
    },
    BudgetPlan {
        spending: Vec<CategorySpend>,
        currency: CurrencyCode,
    },
    SpendingAnalysis {
        transactions: Vec<TransactionSketch>,
        currency: CurrencyCode,
    },
    PortfolioReview {
        assets: Vec<AssetSketch>,
        risk_profile: RiskProfile,
        currency: CurrencyCode,
    },
}

impl AdvisorRequest {
    pub fn extract_transaction(text: &str, home_currency: CurrencyCode) -> Self {
        AdvisorRequest::ExtractTransaction {
            text: text.to_string(),
            home_currency,
        }
    }

    pub fn parse_receipt(mime_type: &str, image_base64: &str) -> Self {
        AdvisorRequest::ParseReceipt {
            mime_type: mime_type.to_string(),
            image_base64: image_base64.to_string(),
        }
    }

    /// Expense totals per category, converted into the display currency.
    pub fn budget_plan(
        transactions: &[Transaction],
        fx: &CurrencyConverter,
    ) -> Result<Self, FxError> {
        let spending = spend_by_category(transactions, fx)?
            .into_vec()
            .into_iter()
            .map(|(category, amount)| CategorySpend { category, amount })
            .collect();
        Ok(AdvisorRequest::BudgetPlan {
            spending,
            currency: fx.display_currency(),
        })
    }

    /// The first [`MAX_ANALYZED_TRANSACTIONS`] transactions, amounts in the
    /// display currency.
    pub fn spending_analysis(
        transactions: &[Transaction],
        fx: &CurrencyConverter,
    ) -> Result<Self, FxError> {
        let transactions: Vec<TransactionSketch> = transactions
            .iter()
            .take(MAX_ANALYZED_TRANSACTIONS)
            .map(|t| {
                Ok(TransactionSketch {
                    amount: fx.convert(t.amount, t.currency)?,
                    category: t.category.clone(),
                    date: t.date,
                    desc: t.description.clone(),
                })
            })
            .collect::<Result<_, FxError>>()?;
        Ok(AdvisorRequest::SpendingAnalysis {
            transactions,
            currency: fx.display_currency(),
        })
    }

    /// Asset values in the display currency.
    pub fn portfolio_review(
        assets: &[Asset],
        risk_profile: RiskProfile,
        fx: &CurrencyConverter,
    ) -> Result<Self, FxError> {
        let assets: Vec<AssetSketch> = assets
            .iter()
            .map(|a| {
                Ok(AssetSketch {
                    name: a.name.clone(),
                    r#type: a.r#type,
                    value: fx.convert(a.value, a.currency)?,
                })
            })
            .collect::<Result<_, FxError>>()?;
        Ok(AdvisorRequest::PortfolioReview {
            assets,
            risk_profile,
            currency: fx.display_currency(),
        })
    }

    /// Instruction text for the advisor. Structured data travels alongside
    /// in the serialized request.
    pub fn prompt(&self) -> String {
        match self {
            AdvisorRequest::ExtractTransaction {
                text,
                home_currency,
            } => format!(
                "Extract transaction details from this text: \"{text}\". \
                 The user's home currency is {home_currency}. \
                 If no currency is specified in the text, assume {home_currency}. Return JSON."
            ),
            AdvisorRequest::ParseReceipt { .. } => "Analyze this receipt. Extract the total \
                 amount, merchant name (as description), category, and date. Return JSON."
                .to_string(),
            AdvisorRequest::BudgetPlan { currency, .. } => format!(
                "Analyze this monthly spending summary. Currency: {currency}. \
                 Suggest a realistic budget limit for 3 key categories. Return JSON."
            ),
            AdvisorRequest::SpendingAnalysis { currency, .. } => format!(
                "Analyze these recent transactions. Amounts are in {currency}. \
                 Identify 3 key insights. Give a health score (0-100) based on spending \
                 discipline. Write a 1 sentence summary. Return JSON."
            ),
            AdvisorRequest::PortfolioReview {
                risk_profile,
                currency,
                ..
            } => format!(
                "Analyze this investment portfolio. Values are in {currency}. \
                 The user's risk profile is {risk_profile}. \
                 Identify if the portfolio is consistent with the risk profile. \
                 Suggest 3 actions (buy/sell/hold) to rebalance or optimize. Return JSON."
            ),
        }
    }
}

/// Sends `request` and decodes the reply into `T`.
pub fn ask<T: DeserializeOwned>(
    advisor: &dyn Advisor,
    request: &AdvisorRequest,
) -> Result<T, AdvisorError> {
    let reply = advisor.call(request)?;
    serde_json::from_value(reply).map_err(|e| {
        warn!(error = %e, "advisor reply did not match the expected shape");
        AdvisorError::Malformed(e)
    })
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ParsedTransaction {
    pub amount: Option<f64>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub r#type: Option<TransactionType>,
    #[serde(default)]
    pub date: Option<String>,
}

impl ParsedTransaction {
    /// Fills gaps the advisor left: unknown or missing currency becomes
    /// `home_currency`, missing type becomes an expense, a missing or
    /// unreadable date becomes `today` (logged).
    pub fn into_transaction(
        self,
        id: &str,
        home_currency: CurrencyCode,
        today: NaiveDate,
    ) -> Result<Transaction, AdvisorError> {
        let amount = self.amount.ok_or(AdvisorError::Missing("amount"))?;
        let currency = self
            .currency
            .and_then(|c| c.parse::<CurrencyCode>().ok())
            .unwrap_or(home_currency);
        let date = match self.date.as_deref().map(str::trim) {
            Some(raw) => {
                // drop any time part, e.g. "2025-06-11T09:30:00Z"
                let day = raw.split(['T', ' ']).next().unwrap_or(raw);
                match NaiveDate::parse_from_str(day, "%Y-%m-%d") {
                    Ok(d) => d,
                    Err(e) => {
                        warn!(date = raw, error = %e, "unreadable advisor date, using today");
                        today
                    }
                }
            }
            None => {
                warn!("advisor reply has no date, using today");
                today
            }
        };
        Ok(Transaction {
            id: id.to_string(),
            amount: amount.abs(),
            currency,
            category: self.category.unwrap_or_else(|| "Uncategorized".to_string()),
            description: self.description.unwrap_or_default(),
            date,
            r#type: self.r#type.unwrap_or(TransactionType::Expense),
            account_id: None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BudgetSuggestion {
    pub category: String,
    pub limit: f64,
    #[serde(default)]
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BudgetPlan {
    #[serde(default)]
    pub budgets: Vec<BudgetSuggestion>,
}

impl BudgetPlan {
    /// Budgets in the display currency with `spent` taken from matching
    /// expenses.
    pub fn into_budgets(
        self,
        id_prefix: &str,
        transactions: &[Transaction],
        fx: &CurrencyConverter,
    ) -> Result<Vec<Budget>, FxError> {
        self.budgets
            .into_iter()
            .enumerate()
            .map(|(idx, s)| {
                let mut budget = Budget {
                    id: format!("{id_prefix}-{idx}"),
                    category: s.category,
                    limit: s.limit,
                    spent: 0.0,
                    currency: fx.display_currency(),
                };
                budget.spent = budget_spent(&budget, transactions, fx)?;
                Ok(budget)
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Warning,
    Success,
    Info,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SpendingInsight {
    pub title: String,
    pub description: String,
    pub r#type: InsightKind,
    #[serde(default)]
    pub amount: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SpendingAnalysis {
    #[serde(default)]
    pub insights: Vec<SpendingInsight>,
    pub score: f64,
    pub summary: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortfolioMove {
    Buy,
    Sell,
    Hold,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PortfolioAction {
    pub asset: String,
    pub action: PortfolioMove,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioAnalysis {
    pub current_risk: String,
    pub target_risk: String,
    #[serde(default)]
    pub suggestions: Vec<PortfolioAction>,
    pub summary: String,
}
