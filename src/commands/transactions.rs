// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};
use chrono::Local;
use serde::Serialize;

use crate::models::{
    Transaction, TransactionInput, TransactionKind, TransactionPatch, TransactionStatus,
};
use crate::query::{self, CategoryFilter, Period, ViewFilter};
use crate::repo::TransactionRepository;
use crate::utils::{fmt_fcfa, maybe_print_json, parse_amount, parse_datetime, pretty_table};

pub fn handle(repo: &mut TransactionRepository, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(repo, sub)?,
        Some(("list", sub)) => list(repo, sub)?,
        Some(("update", sub)) => update(repo, sub)?,
        Some(("set-status", sub)) => set_status(repo, sub)?,
        Some(("rm", sub)) => rm(repo, sub)?,
        _ => {}
    }
    Ok(())
}

fn parse_kind(s: &str) -> Result<TransactionKind> {
    TransactionKind::parse(s)
        .ok_or_else(|| anyhow!("Unknown kind '{}', expected revenue|expense", s))
}

fn parse_status(s: &str) -> Result<TransactionStatus> {
    TransactionStatus::parse(s)
        .ok_or_else(|| anyhow!("Unknown status '{}', expected pending|completed|cancelled", s))
}

fn parse_period(s: &str) -> Result<Period> {
    Period::parse(s).ok_or_else(|| anyhow!("Unknown period '{}', expected day|week|month|year", s))
}

fn warn_on_persist_failure(repo: &mut TransactionRepository) {
    if let Some(err) = repo.take_error() {
        eprintln!("Warning: {}", err);
    }
}

fn add(repo: &mut TransactionRepository, sub: &clap::ArgMatches) -> Result<()> {
    let kind = parse_kind(sub.get_one::<String>("kind").unwrap())?;
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
    let date = parse_datetime(sub.get_one::<String>("date").unwrap())?;
    let category = sub.get_one::<String>("category").unwrap().to_string();
    let status = sub
        .get_one::<String>("status")
        .map(|s| parse_status(s))
        .transpose()?;

    let tx = repo.add(TransactionInput {
        kind,
        amount,
        date,
        category,
        status,
        description: sub.get_one::<String>("description").cloned(),
        counterparty: sub.get_one::<String>("counterparty").cloned(),
        reference: sub.get_one::<String>("reference").cloned(),
    });
    warn_on_persist_failure(repo);
    println!(
        "Recorded {} {} of {} on {} (id {})",
        tx.status.as_str(),
        tx.kind.as_str(),
        fmt_fcfa(&tx.amount),
        tx.date.format("%Y-%m-%d"),
        tx.id
    );
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: String,
    pub date: String,
    pub kind: String,
    pub category: String,
    pub amount: String,
    pub status: String,
    pub counterparty: String,
    pub description: String,
}

pub fn query_rows(
    repo: &TransactionRepository,
    sub: &clap::ArgMatches,
) -> Result<Vec<TransactionRow>> {
    let now = Local::now().naive_local();
    let category = sub
        .get_one::<String>("category")
        .map(|s| CategoryFilter::from_arg(s))
        .unwrap_or(CategoryFilter::All);

    let mut list: Vec<&Transaction> = match sub.get_one::<String>("period") {
        Some(p) => {
            let filter = ViewFilter {
                period: parse_period(p)?,
                category,
            };
            query::filter_transactions(repo.transactions(), &filter, now)
        }
        None => repo
            .transactions()
            .iter()
            .filter(|t| category.matches(&t.category))
            .collect(),
    };

    if let Some(status_arg) = sub.get_one::<String>("status") {
        if !status_arg.eq_ignore_ascii_case("all") {
            let status = parse_status(status_arg)?;
            list.retain(|t| t.status == status);
        }
    }

    list.sort_by(|a, b| b.date.cmp(&a.date));
    if let Some(limit) = sub.get_one::<usize>("limit") {
        list.truncate(*limit);
    }

    Ok(list
        .into_iter()
        .map(|t| TransactionRow {
            id: t.id.clone(),
            date: t.date.format("%Y-%m-%d %H:%M").to_string(),
            kind: t.kind.as_str().to_string(),
            category: t.category.clone(),
            amount: fmt_fcfa(&t.amount),
            status: t.status.as_str().to_string(),
            counterparty: t.counterparty.clone().unwrap_or_default(),
            description: t.description.clone().unwrap_or_default(),
        })
        .collect())
}

fn list(repo: &TransactionRepository, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(repo, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.clone(),
                    r.date.clone(),
                    r.kind.clone(),
                    r.category.clone(),
                    r.amount.clone(),
                    r.status.clone(),
                    r.counterparty.clone(),
                    r.description.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &[
                    "Id",
                    "Date",
                    "Kind",
                    "Category",
                    "Amount",
                    "Status",
                    "Counterparty",
                    "Description"
                ],
                rows,
            )
        );
    }
    Ok(())
}

fn update(repo: &mut TransactionRepository, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap();
    let mut patch = TransactionPatch::default();
    if let Some(v) = sub.get_one::<String>("amount") {
        patch.amount = Some(parse_amount(v)?);
    }
    if let Some(v) = sub.get_one::<String>("date") {
        patch.date = Some(parse_datetime(v)?);
    }
    if let Some(v) = sub.get_one::<String>("category") {
        patch.category = Some(v.clone());
    }
    if let Some(v) = sub.get_one::<String>("status") {
        patch.status = Some(parse_status(v)?);
    }
    if let Some(v) = sub.get_one::<String>("description") {
        patch.description = Some(v.clone());
    }
    if let Some(v) = sub.get_one::<String>("counterparty") {
        patch.counterparty = Some(v.clone());
    }
    if let Some(v) = sub.get_one::<String>("reference") {
        patch.reference = Some(v.clone());
    }

    if repo.update(id, patch) {
        warn_on_persist_failure(repo);
        println!("Updated transaction {}", id);
    } else {
        println!("No transaction with id {}", id);
    }
    Ok(())
}

fn set_status(repo: &mut TransactionRepository, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap();
    let status = parse_status(sub.get_one::<String>("status").unwrap())?;
    if repo.set_status(id, status) {
        warn_on_persist_failure(repo);
        println!("Marked {} as {}", id, status.as_str());
    } else {
        println!("No transaction with id {}", id);
    }
    Ok(())
}

fn rm(repo: &mut TransactionRepository, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap();
    if repo.delete(id) {
        warn_on_persist_failure(repo);
        println!("Deleted transaction {}", id);
    } else {
        println!("No transaction with id {}", id);
    }
    Ok(())
}
