// Copyright (c) 2025 Tallybook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{value_parser, Arg, ArgAction, Command};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(Arg::new("json").long("json").action(ArgAction::SetTrue).help("Print JSON"))
        .arg(Arg::new("jsonl").long("jsonl").action(ArgAction::SetTrue).help("Print JSON lines"))
}

pub fn build_cli() -> Command {
    Command::new("tallybook")
        .about("Sheet-backed personal finance tracker with a local snapshot cache")
        .subcommand(Command::new("init").about("Create the local database"))
        .subcommand(
            Command::new("pay")
                .about("Record a payment")
                .arg(Arg::new("amount").long("amount").short('a').required(true).help("Positive amount"))
                .arg(Arg::new("description").long("description").short('d').required(true))
                .arg(Arg::new("category").long("category").short('c').required(true))
                .arg(Arg::new("date").long("date").value_name("YYYY-MM-DD").help("Defaults to today")),
        )
        .subcommand(
            Command::new("income")
                .about("Record income")
                .arg(Arg::new("amount").long("amount").short('a').required(true).help("Positive amount"))
                .arg(Arg::new("source").long("source").short('s').required(true))
                .arg(Arg::new("date").long("date").value_name("YYYY-MM-DD").help("Defaults to today")),
        )
        .subcommand(json_flags(
            Command::new("status").about("Balance, 30-day spending, goals, and budget status"),
        ))
        .subcommand(
            Command::new("tx").about("Inspect the transaction log").subcommand(json_flags(
                Command::new("list")
                    .about("Recent transactions, newest first")
                    .arg(
                        Arg::new("limit")
                            .long("limit")
                            .value_parser(value_parser!(usize))
                            .help("Max rows (default 10)"),
                    )
                    .arg(Arg::new("category").long("category").help("Only this category")),
            )),
        )
        .subcommand(
            Command::new("export")
                .about("Export the full state (json) or the transaction log (csv)")
                .arg(Arg::new("format").long("format").default_value("json").help("json|csv"))
                .arg(Arg::new("out").long("out").help("Defaults to financial-data-<today>.<ext>")),
        )
        .subcommand(
            Command::new("remote")
                .about("Configure or test the remote sheet")
                .subcommand(
                    Command::new("set")
                        .about("Store spreadsheet id and API key")
                        .arg(Arg::new("sheet").long("sheet").required(true).help("Spreadsheet id"))
                        .arg(Arg::new("key").long("key").required(true).help("API key")),
                )
                .subcommand(Command::new("show").about("Show the configured spreadsheet"))
                .subcommand(Command::new("test").about("Read the transactions table")),
        )
        .subcommand(
            Command::new("cache").about("Manage the local snapshot").subcommand(
                Command::new("clear").about("Drop the local snapshot; the remote sheet is untouched"),
            ),
        )
        .subcommand(Command::new("doctor").about("Check remote, snapshot, and data quality"))
}
