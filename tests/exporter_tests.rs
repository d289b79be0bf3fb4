// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use finboard::fx::{CurrencyConverter, ExchangeRateTable};
use finboard::models::{CurrencyCode, Transaction, TransactionType};
use finboard::snapshot::Snapshot;
use finboard::{cli, commands::exporter};
use serde_json::json;
use tempfile::tempdir;

fn tx(id: &str, date: &str, amount: f64, currency: CurrencyCode, category: &str) -> Transaction {
    Transaction {
        id: id.into(),
        amount,
        currency,
        category: category.into(),
        description: String::new(),
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        r#type: TransactionType::Expense,
        account_id: None,
    }
}

fn sample() -> Snapshot {
    Snapshot {
        transactions: vec![
            tx("t1", "2025-01-02", 12.34, CurrencyCode::Usd, "Groceries"),
            tx("t2", "2025-01-02", 9.2, CurrencyCode::Eur, "Dining"),
            tx("t3", "2025-01-15", 7.66, CurrencyCode::Usd, "Groceries"),
            tx("t4", "2025-02-01", 500.0, CurrencyCode::Usd, "Rent"),
        ],
        ..Default::default()
    }
}

fn run_export(data: &Snapshot, fx: &CurrencyConverter, args: &[&str]) -> anyhow::Result<()> {
    let mut argv = vec!["finboard", "export", "spending"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    match matches.subcommand() {
        Some(("export", export_m)) => exporter::handle(data, fx, export_m),
        _ => panic!("no export subcommand"),
    }
}

#[test]
fn export_spending_csv_for_one_month() {
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("spending.csv");
    let out_str = out_path.to_string_lossy().to_string();

    let fx = CurrencyConverter::default();
    run_export(&sample(), &fx, &["--month", "2025-01", "--out", &out_str]).unwrap();

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(
        lines,
        [
            "group,key,amount,currency",
            "category,Groceries,20.00,USD",
            "category,Dining,10.00,USD",
            "day,2,22.34,USD",
            "day,15,7.66,USD",
        ]
    );
}

#[test]
fn export_spending_json_in_display_currency() {
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("spending.json");
    let out_str = out_path.to_string_lossy().to_string();

    let table = ExchangeRateTable::new(
        CurrencyCode::Usd,
        [(CurrencyCode::Usd, 1.0), (CurrencyCode::Eur, 0.5)],
    )
    .unwrap();
    let fx = CurrencyConverter::with_display(table, CurrencyCode::Eur);
    let data = Snapshot {
        transactions: vec![tx("t1", "2025-03-09", 8.0, CurrencyCode::Usd, "Books")],
        ..Default::default()
    };
    run_export(&data, &fx, &["--format", "json", "--out", &out_str]).unwrap();

    let parsed: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out_path).unwrap()).unwrap();
    assert_eq!(
        parsed,
        json!({
            "currency": "EUR",
            "byCategory": [ { "category": "Books", "amount": 4.0 } ],
            "byDay": [ { "day": 9, "amount": 4.0 } ]
        })
    );
}

#[test]
fn export_rejects_unknown_format_before_writing() {
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("spending.xml");
    let out_str = out_path.to_string_lossy().to_string();

    let res = cli::build_cli().try_get_matches_from([
        "finboard", "export", "spending", "--format", "xml", "--out", &out_str,
    ]);
    assert!(res.is_err());
    assert!(!out_path.exists());
}

#[test]
fn export_csv_follows_display_currency_minor_units() {
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("spending.csv");
    let out_str = out_path.to_string_lossy().to_string();

    let mut fx = CurrencyConverter::default();
    fx.set_display_currency(CurrencyCode::Jpy);
    let data = Snapshot {
        transactions: vec![tx("t1", "2025-03-09", 100.0, CurrencyCode::Usd, "Rent")],
        ..Default::default()
    };
    run_export(&data, &fx, &["--out", &out_str]).unwrap();

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(
        lines,
        [
            "group,key,amount,currency",
            "category,Rent,15050,JPY",
            "day,9,15050,JPY",
        ]
    );
}
