// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::fx::{CurrencyConverter, DEFAULT_RATES, ExchangeRateTable, FxError};
use crate::models::CurrencyCode;

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Finboard", "finboard"));

pub(crate) fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific config dir")
}

/// Rate table and display preference, read once at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    pub base_currency: CurrencyCode,
    #[serde(default)]
    pub display_currency: Option<CurrencyCode>,
    pub rates: BTreeMap<CurrencyCode, f64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_currency: CurrencyCode::Usd,
            display_currency: None,
            rates: DEFAULT_RATES.into_iter().collect(),
        }
    }
}

impl AppConfig {
    pub fn rate_table(&self) -> Result<ExchangeRateTable, FxError> {
        ExchangeRateTable::new(self.base_currency, self.rates.iter().map(|(c, r)| (*c, *r)))
    }

    /// A converter showing the configured display currency, or the base
    /// currency when none is set.
    pub fn converter(&self) -> Result<CurrencyConverter, FxError> {
        let table = self.rate_table()?;
        let display = self.display_currency.unwrap_or(table.base());
        Ok(CurrencyConverter::with_display(table, display))
    }
}

pub fn config_path() -> Result<PathBuf> {
    let proj = project_dirs()?;
    Ok(proj.config_dir().join("config.json"))
}

/// Loads the config from `path`, or from the default location.
///
/// An explicit path must exist. The default location is optional and falls
/// back to the built-in rates.
pub fn load(path: Option<&Path>) -> Result<AppConfig> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => {
            let default = config_path()?;
            if !default.exists() {
                debug!(path = %default.display(), "no config file, using built-in rates");
                return Ok(AppConfig::default());
            }
            default
        }
    };
    let raw = fs::read_to_string(&path)
        .with_context(|| format!("Read config at {}", path.display()))?;
    let cfg: AppConfig = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid config at {}", path.display()))?;
    let table = cfg
        .rate_table()
        .with_context(|| format!("Invalid rate table in {}", path.display()))?;
    if let Some(ccy) = cfg.display_currency.filter(|c| !table.contains(*c)) {
        warn!(currency = %ccy, "display currency has no rate, conversions into it will fail");
    }
    info!(path = %path.display(), base = %cfg.base_currency, "config loaded");
    Ok(cfg)
}

pub fn save(cfg: &AppConfig, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).context("Failed to create config dir")?;
    }
    fs::write(path, serde_json::to_string_pretty(cfg)?)
        .with_context(|| format!("Write config at {}", path.display()))?;
    info!(path = %path.display(), "config written");
    Ok(())
}
