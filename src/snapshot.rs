// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::project_dirs;
use crate::models::{Account, Asset, Budget, Goal, Transaction, UserProfile};

/// The caller-owned collections a dashboard is computed from.
///
/// Read from disk once and never written back.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Snapshot {
    pub profile: Option<UserProfile>,
    pub accounts: Vec<Account>,
    pub transactions: Vec<Transaction>,
    pub assets: Vec<Asset>,
    pub budgets: Vec<Budget>,
    pub goals: Vec<Goal>,
}

pub fn snapshot_path() -> Result<PathBuf> {
    let proj = project_dirs()?;
    Ok(proj.data_dir().join("snapshot.json"))
}

pub fn load(path: &Path) -> Result<Snapshot> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Read snapshot at {}", path.display()))?;
    let snap: Snapshot = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid snapshot at {}", path.display()))?;
    info!(
        path = %path.display(),
        accounts = snap.accounts.len(),
        transactions = snap.transactions.len(),
        assets = snap.assets.len(),
        budgets = snap.budgets.len(),
        goals = snap.goals.len(),
        "snapshot loaded"
    );
    Ok(snap)
}

/// Loads `path` if given, else the default snapshot if present, else an
/// empty dashboard.
pub fn open(path: Option<&Path>) -> Result<Snapshot> {
    if let Some(p) = path {
        return load(p);
    }
    let default = snapshot_path()?;
    if default.exists() {
        load(&default)
    } else {
        debug!(path = %default.display(), "no snapshot, starting empty");
        Ok(Snapshot::default())
    }
}
