// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::models::Transaction;
use crate::repo::TransactionRepository;

pub fn handle(repo: &TransactionRepository, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(repo, sub),
        _ => Ok(()),
    }
}

fn export_transactions(repo: &TransactionRepository, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();

    let mut list: Vec<&Transaction> = repo.transactions().iter().collect();
    list.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record([
                "id",
                "date",
                "kind",
                "category",
                "amount",
                "status",
                "counterparty",
                "reference",
                "description",
            ])?;
            for t in &list {
                wtr.write_record([
                    t.id.clone(),
                    t.date.format("%Y-%m-%dT%H:%M:%S").to_string(),
                    t.kind.as_str().to_string(),
                    t.category.clone(),
                    t.amount.to_string(),
                    t.status.as_str().to_string(),
                    t.counterparty.clone().unwrap_or_default(),
                    t.reference.clone().unwrap_or_default(),
                    t.description.clone().unwrap_or_default(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            std::fs::write(out, serde_json::to_string_pretty(&list)?)?;
        }
        _ => {
            anyhow::bail!("Unknown format: {} (use csv|json)", fmt);
        }
    }
    println!("Exported {} transactions to {}", list.len(), out);
    Ok(())
}
