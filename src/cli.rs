// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, crate_version};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print as JSON lines"),
    )
}

fn period_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("month")
            .long("month")
            .value_name("YYYY-MM")
            .conflicts_with_all(["from", "to"]),
    )
    .arg(Arg::new("from").long("from").value_name("YYYY-MM-DD"))
    .arg(Arg::new("to").long("to").value_name("YYYY-MM-DD"))
}

pub fn build_cli() -> Command {
    Command::new("finboard")
        .about("Multi-currency personal finance dashboard")
        .version(crate_version!())
        .arg(
            Arg::new("config_path")
                .long("config")
                .global(true)
                .value_name("PATH")
                .help("Config file with the rate table (defaults to the platform config dir)"),
        )
        .arg(
            Arg::new("data")
                .long("data")
                .global(true)
                .value_name("PATH")
                .help("Snapshot JSON with accounts, transactions, assets, budgets and goals"),
        )
        .arg(
            Arg::new("currency")
                .long("currency")
                .short('c')
                .global(true)
                .value_name("CCY")
                .help("Display currency for this run"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .subcommand(
            Command::new("fx")
                .about("Exchange rates and conversion")
                .subcommand(Command::new("list").about("Show the rate table"))
                .subcommand(
                    Command::new("convert")
                        .about("Convert an amount")
                        .arg(
                            Arg::new("amount")
                                .required(true)
                                .allow_negative_numbers(true),
                        )
                        .arg(Arg::new("from").long("from").required(true))
                        .arg(
                            Arg::new("to")
                                .long("to")
                                .help("Target currency (defaults to the display currency)"),
                        ),
                ),
        )
        .subcommand(json_flags(
            Command::new("dashboard").about("Net worth, cash flow and allocation"),
        ))
        .subcommand(json_flags(period_args(
            Command::new("spending").about("Spending totals, by category and by day"),
        )))
        .subcommand(json_flags(
            Command::new("budgets")
                .about("Budget usage and goal progress")
                .arg(
                    Arg::new("recompute")
                        .long("recompute")
                        .action(ArgAction::SetTrue)
                        .help("Derive spent amounts from transactions"),
                ),
        ))
        .subcommand(json_flags(
            Command::new("portfolio")
                .about("Account balances and asset allocation")
                .arg(
                    Arg::new("account")
                        .long("account")
                        .help("Show detail for one account id"),
                ),
        ))
        .subcommand(
            Command::new("export")
                .about("Export reports")
                .subcommand(period_args(
                    Command::new("spending")
                        .about("Spending by category and by day")
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .default_value("csv")
                                .value_parser(["csv", "json"]),
                        )
                        .arg(Arg::new("out").long("out").required(true)),
                )),
        )
        .subcommand(
            Command::new("config")
                .about("Configuration")
                .subcommand(Command::new("show").about("Print the effective config"))
                .subcommand(
                    Command::new("init")
                        .about("Write the default config file")
                        .arg(
                            Arg::new("force")
                                .long("force")
                                .action(ArgAction::SetTrue),
                        ),
                ),
        )
}
