// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::Path;

use anyhow::Result;
use chrono::{Datelike, Local};

use crate::budget;
use crate::repo::TransactionRepository;
use crate::utils::{fmt_fcfa, maybe_print_json, pretty_table};

pub fn handle(repo: &TransactionRepository, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("report", sub)) => report(repo, sub)?,
        _ => {}
    }
    Ok(())
}

fn report(repo: &TransactionRepository, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let year = match sub.get_one::<i32>("year") {
        Some(y) => *y,
        None => Local::now().year(),
    };
    let allocations = match sub.get_one::<String>("allocations") {
        Some(path) => budget::load_allocations(Path::new(path))?,
        None => budget::default_allocations(),
    };

    let report = budget::budget_report(&allocations, repo.transactions(), year);

    if !maybe_print_json(json_flag, jsonl_flag, &report)? {
        let mut rows: Vec<Vec<String>> = report
            .categories
            .iter()
            .map(|line| {
                vec![
                    line.name.clone(),
                    fmt_fcfa(&line.allocated),
                    fmt_fcfa(&line.spent),
                    fmt_fcfa(&line.remaining),
                    format!("{:.1}%", line.utilization_percent),
                ]
            })
            .collect();
        rows.push(vec![
            "TOTAL".to_string(),
            fmt_fcfa(&report.total_allocated),
            fmt_fcfa(&report.total_spent),
            fmt_fcfa(&report.remaining),
            format!("{:.1}%", report.utilization_percent),
        ]);
        println!("Fiscal year {}", report.fiscal_year);
        println!(
            "{}",
            pretty_table(
                &["Category", "Allocated", "Spent", "Remaining", "Used"],
                rows
            )
        );
    }
    Ok(())
}
