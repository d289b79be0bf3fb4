// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::cell::RefCell;

use chrono::NaiveDate;
use finboard::advisor::{
    Advisor, AdvisorError, AdvisorRequest, BudgetPlan, InsightKind, MAX_ANALYZED_TRANSACTIONS,
    ParsedTransaction, PortfolioAnalysis, PortfolioMove, SpendingAnalysis, ask,
};
use finboard::fx::{CurrencyConverter, ExchangeRateTable};
use finboard::models::{
    Asset, AssetType, CurrencyCode, RiskProfile, Transaction, TransactionType,
};
use serde_json::{Value, json};

/// Replies with a fixed value and remembers what it was asked.
struct Canned {
    reply: Value,
    seen: RefCell<Vec<AdvisorRequest>>,
}

impl Canned {
    fn new(reply: Value) -> Self {
        Self {
            reply,
            seen: RefCell::new(Vec::new()),
        }
    }
}

impl Advisor for Canned {
    fn call(&self, request: &AdvisorRequest) -> Result<Value, AdvisorError> {
        self.seen.borrow_mut().push(request.clone());
        Ok(self.reply.clone())
    }
}

struct Offline;

impl Advisor for Offline {
    fn call(&self, _request: &AdvisorRequest) -> Result<Value, AdvisorError> {
        Err(AdvisorError::Failed("no network".into()))
    }
}

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
}

fn expense(amount: f64, currency: CurrencyCode, category: &str) -> Transaction {
    Transaction {
        id: format!("{category}-{amount}"),
        amount,
        currency,
        category: category.into(),
        description: format!("{category} spend"),
        date: day(3),
        r#type: TransactionType::Expense,
        account_id: None,
    }
}

fn eur_display() -> CurrencyConverter {
    CurrencyConverter::with_display(ExchangeRateTable::default(), CurrencyCode::Eur)
}

#[test]
fn extracted_transaction_fills_gaps() {
    let advisor = Canned::new(json!({
        "amount": -42.5,
        "currency": "CHF",
        "date": "2025-06-11T09:30:00Z"
    }));
    let req = AdvisorRequest::extract_transaction("lunch 42.50", CurrencyCode::Gbp);
    let parsed: ParsedTransaction = ask(&advisor, &req).unwrap();
    let tx = parsed
        .into_transaction("t-1", CurrencyCode::Gbp, day(1))
        .unwrap();

    assert_eq!(tx.amount, 42.5);
    assert_eq!(tx.currency, CurrencyCode::Gbp);
    assert_eq!(tx.date, day(11));
    assert_eq!(tx.category, "Uncategorized");
    assert_eq!(tx.r#type, TransactionType::Expense);
    assert_eq!(advisor.seen.borrow().len(), 1);
    assert!(req.prompt().contains("home currency is GBP"));
}

#[test]
fn extracted_transaction_without_amount_is_rejected() {
    let advisor = Canned::new(json!({ "description": "coffee", "date": "garbage" }));
    let parsed: ParsedTransaction =
        ask(&advisor, &AdvisorRequest::parse_receipt("image/png", "AAAA")).unwrap();
    assert!(matches!(
        parsed.into_transaction("t-2", CurrencyCode::Usd, day(1)),
        Err(AdvisorError::Missing("amount"))
    ));
}

#[test]
fn income_type_and_known_currency_are_kept() {
    let parsed: ParsedTransaction = serde_json::from_value(json!({
        "amount": 1200,
        "currency": "jpy",
        "type": "income",
        "category": "Salary",
        "date": "not a date"
    }))
    .unwrap();
    let tx = parsed
        .into_transaction("t-3", CurrencyCode::Usd, day(30))
        .unwrap();
    assert_eq!(tx.currency, CurrencyCode::Jpy);
    assert_eq!(tx.r#type, TransactionType::Income);
    assert_eq!(tx.date, day(30));
}

#[test]
fn budget_plan_request_is_converted_and_budgets_track_spend() {
    let fx = eur_display();
    let txs = vec![
        expense(100.0, CurrencyCode::Usd, "Food"),
        expense(8.0, CurrencyCode::Eur, "food"),
        expense(50.0, CurrencyCode::Usd, "Travel"),
    ];
    let req = AdvisorRequest::budget_plan(&txs, &fx).unwrap();
    match &req {
        AdvisorRequest::BudgetPlan { spending, currency } => {
            assert_eq!(*currency, CurrencyCode::Eur);
            // "Food" and "food" are distinct keys here
            assert_eq!(spending.len(), 3);
            assert!((spending[0].amount - 92.0).abs() < 1e-9);
        }
        other => panic!("unexpected request {other:?}"),
    }

    let advisor = Canned::new(json!({
        "budgets": [
            { "category": "FOOD", "limit": 150, "reason": "Groceries add up" },
            { "category": "Travel", "limit": 60 }
        ]
    }));
    let plan: BudgetPlan = ask(&advisor, &req).unwrap();
    let budgets = plan.into_budgets("ai", &txs, &fx).unwrap();
    assert_eq!(budgets[0].id, "ai-0");
    assert_eq!(budgets[0].currency, CurrencyCode::Eur);
    assert!((budgets[0].spent - 100.0).abs() < 1e-9);
    assert!((budgets[1].spent - 46.0).abs() < 1e-9);
}

#[test]
fn spending_analysis_caps_transactions() {
    let txs: Vec<Transaction> = (0..80)
        .map(|i| expense(i as f64, CurrencyCode::Usd, "Misc"))
        .collect();
    let fx = CurrencyConverter::default();
    match AdvisorRequest::spending_analysis(&txs, &fx).unwrap() {
        AdvisorRequest::SpendingAnalysis { transactions, .. } => {
            assert_eq!(transactions.len(), MAX_ANALYZED_TRANSACTIONS);
            assert_eq!(transactions[0].desc, "Misc spend");
        }
        other => panic!("unexpected request {other:?}"),
    }

    let advisor = Canned::new(json!({
        "insights": [
            { "title": "Dining up", "description": "More takeout", "type": "warning", "amount": 120 }
        ],
        "score": 72,
        "summary": "Mostly disciplined."
    }));
    let analysis: SpendingAnalysis =
        ask(&advisor, &AdvisorRequest::spending_analysis(&txs, &fx).unwrap()).unwrap();
    assert_eq!(analysis.insights[0].r#type, InsightKind::Warning);
    assert_eq!(analysis.score, 72.0);
}

#[test]
fn portfolio_review_round() {
    let assets = vec![Asset {
        id: "a1".into(),
        account_id: "inv".into(),
        name: "BTC".into(),
        r#type: AssetType::Crypto,
        value: 5000.0,
        currency: CurrencyCode::Usd,
        day_change_pct: Some(2.0),
    }];
    let fx = CurrencyConverter::default();
    let req = AdvisorRequest::portfolio_review(&assets, RiskProfile::Low, &fx).unwrap();
    assert!(req.prompt().contains("risk profile is Low"));
    let wire = serde_json::to_value(&req).unwrap();
    assert_eq!(wire["kind"], "portfolio_review");
    assert_eq!(wire["assets"][0]["type"], "Crypto");

    let advisor = Canned::new(json!({
        "currentRisk": "High",
        "targetRisk": "Low",
        "suggestions": [ { "asset": "BTC", "action": "sell", "reason": "Too volatile" } ],
        "summary": "Reduce crypto exposure."
    }));
    let review: PortfolioAnalysis = ask(&advisor, &req).unwrap();
    assert_eq!(review.suggestions[0].action, PortfolioMove::Sell);
}

#[test]
fn malformed_and_failed_replies_surface_as_errors() {
    let fx = CurrencyConverter::default();
    let req = AdvisorRequest::spending_analysis(&[], &fx).unwrap();
    let advisor = Canned::new(json!({ "score": "high" }));
    let res: Result<SpendingAnalysis, _> = ask(&advisor, &req);
    assert!(matches!(res, Err(AdvisorError::Malformed(_))));

    let res: Result<SpendingAnalysis, _> = ask(&Offline, &req);
    assert!(matches!(res, Err(AdvisorError::Failed(_))));
}

#[test]
fn mixed_currency_amounts_are_sent_in_display_currency() {
    let fx = CurrencyConverter::default();
    let holding = |name: &str, value: f64, currency: CurrencyCode| Asset {
        id: name.to_lowercase(),
        account_id: "inv".into(),
        name: name.into(),
        r#type: AssetType::Stock,
        value,
        currency,
        day_change_pct: None,
    };
    let assets = vec![
        holding("S&P", 1000.0, CurrencyCode::Usd),
        holding("Nikkei", 15050.0, CurrencyCode::Jpy),
    ];
    let req = AdvisorRequest::portfolio_review(&assets, RiskProfile::Medium, &fx).unwrap();
    let wire = serde_json::to_value(&req).unwrap();
    assert_eq!(wire["currency"], "USD");
    assert_eq!(wire["assets"][0]["value"], 1000.0);
    assert!((wire["assets"][1]["value"].as_f64().unwrap() - 100.0).abs() < 1e-9);
    assert!(req.prompt().contains("Values are in USD"));

    let txs = vec![
        expense(20.0, CurrencyCode::Usd, "Dining"),
        expense(5000.0, CurrencyCode::Jpy, "Dining"),
    ];
    let jpy = CurrencyConverter::with_display(ExchangeRateTable::default(), CurrencyCode::Jpy);
    let req = AdvisorRequest::spending_analysis(&txs, &jpy).unwrap();
    match &req {
        AdvisorRequest::SpendingAnalysis {
            transactions,
            currency,
        } => {
            assert_eq!(*currency, CurrencyCode::Jpy);
            assert!((transactions[0].amount - 3010.0).abs() < 1e-9);
            assert_eq!(transactions[1].amount, 5000.0);
        }
        other => panic!("unexpected request {other:?}"),
    }

    let partial = ExchangeRateTable::new(CurrencyCode::Usd, [(CurrencyCode::Usd, 1.0)]).unwrap();
    let no_yen = CurrencyConverter::new(partial);
    assert!(AdvisorRequest::portfolio_review(&assets, RiskProfile::Low, &no_yen).is_err());
}

#[test]
fn reply_dates_accept_unpadded_and_timestamped_forms() {
    let parse = |date: Value| {
        let parsed: ParsedTransaction =
            serde_json::from_value(json!({ "amount": 5, "date": date })).unwrap();
        parsed
            .into_transaction("t-9", CurrencyCode::Usd, day(1))
            .unwrap()
            .date
    };
    assert_eq!(parse(json!("2025-6-7")), day(7));
    assert_eq!(parse(json!("2025-06-11 18:00")), day(11));
    assert_eq!(parse(json!("June 7th")), day(1));
    assert_eq!(parse(Value::Null), day(1));
}
