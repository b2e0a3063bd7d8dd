// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn with_json_flags(cmd: Command) -> Command {
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
            .help("Print as JSON lines"),
    )
}

fn with_view_filter(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("period")
            .long("period")
            .default_value("month")
            .help("Reporting window: day|week|month|year"),
    )
    .arg(
        Arg::new("category")
            .long("category")
            .default_value("all")
            .help("Exact category name, or 'all'"),
    )
}

pub fn build_cli() -> Command {
    Command::new("communefin")
        .about("Municipal revenue and expense ledger with budget tracking")
        .version(clap::crate_version!())
        .subcommand(Command::new("init").about("Initialize the ledger and print its location"))
        .subcommand(
            Command::new("tx")
                .about("Record and manage transactions")
                .subcommand(
                    Command::new("add")
                        .about("Record a transaction")
                        .arg(
                            Arg::new("kind")
                                .long("kind")
                                .required(true)
                                .help("revenue (recette) or expense (depense)"),
                        )
                        .arg(
                            Arg::new("amount")
                                .long("amount")
                                .required(true)
                                .help("Non-negative amount in FCFA"),
                        )
                        .arg(
                            Arg::new("date")
                                .long("date")
                                .required(true)
                                .help("YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS"),
                        )
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(
                            Arg::new("status")
                                .long("status")
                                .help("pending|completed|cancelled (default completed)"),
                        )
                        .arg(Arg::new("description").long("description"))
                        .arg(
                            Arg::new("counterparty")
                                .long("counterparty")
                                .help("Payer (revenue) or beneficiary (expense)"),
                        )
                        .arg(
                            Arg::new("reference")
                                .long("reference")
                                .help("Receipt or roll number"),
                        ),
                )
                .subcommand(with_json_flags(
                    Command::new("list")
                        .about("List transactions, newest first")
                        .arg(
                            Arg::new("period")
                                .long("period")
                                .help("day|week|month|year (default: full history)"),
                        )
                        .arg(
                            Arg::new("category")
                                .long("category")
                                .help("Exact category name, or 'all'"),
                        )
                        .arg(
                            Arg::new("status")
                                .long("status")
                                .help("pending|completed|cancelled, or 'all'"),
                        )
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                ))
                .subcommand(
                    Command::new("update")
                        .about("Merge new field values into a transaction")
                        .arg(Arg::new("id").required(true))
                        .arg(Arg::new("amount").long("amount"))
                        .arg(Arg::new("date").long("date"))
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("status").long("status"))
                        .arg(Arg::new("description").long("description"))
                        .arg(Arg::new("counterparty").long("counterparty"))
                        .arg(Arg::new("reference").long("reference")),
                )
                .subcommand(
                    Command::new("set-status")
                        .about("Change the status of a transaction")
                        .arg(Arg::new("id").required(true))
                        .arg(
                            Arg::new("status")
                                .required(true)
                                .help("pending|completed|cancelled"),
                        ),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete a transaction")
                        .arg(Arg::new("id").required(true)),
                ),
        )
        .subcommand(
            Command::new("report")
                .about("Derived views over the ledger")
                .subcommand(with_json_flags(with_view_filter(
                    Command::new("stats").about("Realized/pending totals and trends"),
                )))
                .subcommand(with_json_flags(with_view_filter(
                    Command::new("chart").about("Chart series per kind"),
                )))
                .subcommand(with_json_flags(with_view_filter(
                    Command::new("by-category").about("Realized totals per category"),
                )))
                .subcommand(with_json_flags(
                    Command::new("categories").about("Recorded and suggested categories"),
                )),
        )
        .subcommand(
            Command::new("budget")
                .about("Budget allocation tracking")
                .subcommand(with_json_flags(
                    Command::new("report")
                        .about("Allocation vs. realized expenses for a fiscal year")
                        .arg(
                            Arg::new("year")
                                .long("year")
                                .value_parser(value_parser!(i32))
                                .help("Fiscal year (default: current year)"),
                        )
                        .arg(
                            Arg::new("allocations")
                                .long("allocations")
                                .help("JSON allocation table overriding the built-in one"),
                        ),
                )),
        )
        .subcommand(
            Command::new("export")
                .about("Export ledger data")
                .subcommand(
                    Command::new("transactions")
                        .about("Write the full collection to a file")
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .required(true)
                                .help("csv or json"),
                        )
                        .arg(Arg::new("out").long("out").required(true)),
                ),
        )
}
