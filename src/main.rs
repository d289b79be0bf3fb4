// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use std::path::Path;

use finboard::{cli, commands, config, log, snapshot, utils};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    log::init_logging(matches.get_flag("verbose"));

    let config_path = matches.get_one::<String>("config_path").map(Path::new);
    if let Some(("config", sub)) = matches.subcommand() {
        return commands::config::handle(config_path, sub);
    }

    let cfg = config::load(config_path)?;
    let mut fx = cfg.converter()?;
    if let Some(ccy) = matches.get_one::<String>("currency") {
        fx.set_display_currency(utils::parse_currency(ccy)?);
    }
    let data = snapshot::open(matches.get_one::<String>("data").map(Path::new))?;

    match matches.subcommand() {
        Some(("fx", sub)) => commands::fx::handle(&fx, sub)?,
        Some(("dashboard", sub)) => commands::dashboard::handle(&data, &fx, sub)?,
        Some(("spending", sub)) => commands::spending::handle(&data, &fx, sub)?,
        Some(("budgets", sub)) => commands::budgets::handle(&data, &fx, sub)?,
        Some(("portfolio", sub)) => commands::portfolio::handle(&data, &fx, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&data, &fx, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
