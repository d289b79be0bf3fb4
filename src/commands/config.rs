// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::{AppConfig, config_path, load, save};
use anyhow::Result;
use std::path::Path;

pub fn handle(path: Option<&Path>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", _)) => {
            let cfg = load(path)?;
            println!("{}", serde_json::to_string_pretty(&cfg)?);
        }
        Some(("init", sub)) => {
            let target = match path {
                Some(p) => p.to_path_buf(),
                None => config_path()?,
            };
            if target.exists() && !sub.get_flag("force") {
                anyhow::bail!(
                    "Config already exists at {} (use --force to overwrite)",
                    target.display()
                );
            }
            save(&AppConfig::default(), &target)?;
            println!("Config written to {}", target.display());
        }
        _ => {}
    }
    Ok(())
}
