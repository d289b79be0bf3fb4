// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use finboard::config::{AppConfig, load, save};
use finboard::fx::FxError;
use finboard::models::CurrencyCode;
use tempfile::tempdir;

#[test]
fn default_config_has_the_four_rates() {
    let cfg = AppConfig::default();
    assert_eq!(cfg.base_currency, CurrencyCode::Usd);
    assert_eq!(cfg.rates.len(), 4);
    assert_eq!(cfg.rates[&CurrencyCode::Jpy], 150.5);

    let fx = cfg.converter().unwrap();
    assert_eq!(fx.display_currency(), CurrencyCode::Usd);
}

#[test]
fn save_then_load_keeps_display_currency() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("config.json");

    let cfg = AppConfig {
        display_currency: Some(CurrencyCode::Gbp),
        ..Default::default()
    };
    save(&cfg, &path).unwrap();
    let loaded = load(Some(path.as_path())).unwrap();
    assert_eq!(loaded, cfg);

    let fx = loaded.converter().unwrap();
    assert_eq!(fx.display_currency(), CurrencyCode::Gbp);
    assert_eq!(fx.base_currency(), CurrencyCode::Usd);
}

#[test]
fn explicit_path_must_exist() {
    let dir = tempdir().unwrap();
    assert!(load(Some(dir.path().join("missing.json").as_path())).is_err());
}

#[test]
fn invalid_rate_table_is_rejected_on_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(
        &path,
        r#"{ "baseCurrency": "USD", "rates": { "USD": 1.0, "EUR": 0.0 } }"#,
    )
    .unwrap();
    let err = load(Some(path.as_path())).unwrap_err();
    assert!(format!("{:#}", err).contains("Invalid rate table"));

    std::fs::write(
        &path,
        r#"{ "baseCurrency": "EUR", "rates": { "USD": 1.0, "EUR": 0.92 } }"#,
    )
    .unwrap();
    assert!(load(Some(path.as_path())).is_err());
}

#[test]
fn unknown_currency_code_in_config_fails() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(
        &path,
        r#"{ "baseCurrency": "USD", "rates": { "USD": 1.0, "CHF": 0.9 } }"#,
    )
    .unwrap();
    assert!(load(Some(path.as_path())).is_err());
}

#[test]
fn display_currency_without_rate_loads_but_cannot_convert() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(
        &path,
        r#"{ "baseCurrency": "USD", "displayCurrency": "JPY", "rates": { "USD": 1.0, "EUR": 0.92 } }"#,
    )
    .unwrap();
    let cfg = load(Some(path.as_path())).unwrap();
    assert_eq!(cfg.display_currency, Some(CurrencyCode::Jpy));

    let fx = cfg.converter().unwrap();
    assert_eq!(
        fx.convert(10.0, CurrencyCode::Usd),
        Err(FxError::UnknownCurrency(CurrencyCode::Jpy))
    );
}
