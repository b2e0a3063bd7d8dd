// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};
use chrono::Local;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{EXPENSE_CATEGORIES, REVENUE_CATEGORIES};
use crate::query::{
    self, CategoryFilter, Period, TransactionStats, TransactionTrends, Trend, TrendDirection,
    ViewFilter,
};
use crate::repo::TransactionRepository;
use crate::utils::{fmt_fcfa, maybe_print_json, pretty_table};

pub fn handle(repo: &TransactionRepository, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("stats", sub)) => stats(repo, sub)?,
        Some(("chart", sub)) => chart(repo, sub)?,
        Some(("by-category", sub)) => by_category(repo, sub)?,
        Some(("categories", sub)) => categories(repo, sub)?,
        _ => {}
    }
    Ok(())
}

fn view_filter(sub: &clap::ArgMatches) -> Result<ViewFilter> {
    let period_arg = sub.get_one::<String>("period").unwrap();
    let period = Period::parse(period_arg)
        .ok_or_else(|| anyhow!("Unknown period '{}', expected day|week|month|year", period_arg))?;
    let category = CategoryFilter::from_arg(sub.get_one::<String>("category").unwrap());
    Ok(ViewFilter { period, category })
}

fn fmt_trend(t: &Trend) -> String {
    let arrow = match t.direction {
        TrendDirection::Up => "up",
        TrendDirection::Down => "down",
    };
    format!("{} {}%", arrow, t.value)
}

fn stats(repo: &TransactionRepository, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let filter = view_filter(sub)?;
    let now = Local::now().naive_local();

    let filtered = query::filter_transactions(repo.transactions(), &filter, now);
    let stats = query::compute_stats(&filtered);
    let trends = query::compute_trends(repo.transactions(), &filter, now);

    #[derive(Serialize)]
    struct StatsOut<'a> {
        stats: &'a TransactionStats,
        trends: &'a TransactionTrends,
    }

    if !maybe_print_json(json_flag, jsonl_flag, &StatsOut { stats: &stats, trends: &trends })? {
        let balance: Decimal = stats.realized_revenue - stats.realized_expense;
        let rows = vec![
            vec![
                "Realized revenue".to_string(),
                fmt_fcfa(&stats.realized_revenue),
                fmt_trend(&trends.revenue),
            ],
            vec![
                "Realized expense".to_string(),
                fmt_fcfa(&stats.realized_expense),
                fmt_trend(&trends.expense),
            ],
            vec![
                "Pending revenue".to_string(),
                fmt_fcfa(&stats.pending_revenue),
                String::new(),
            ],
            vec![
                "Pending expense".to_string(),
                fmt_fcfa(&stats.pending_expense),
                String::new(),
            ],
            vec!["Balance".to_string(), fmt_fcfa(&balance), String::new()],
        ];
        println!(
            "{}",
            pretty_table(&["Metric", "Amount", "Trend vs prior period"], rows)
        );
    }
    Ok(())
}

fn chart(repo: &TransactionRepository, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let filter = view_filter(sub)?;
    let now = Local::now().naive_local();

    let filtered = query::filter_transactions(repo.transactions(), &filter, now);
    let data = query::chart_data(&filtered);

    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let mut rows = Vec::new();
        for p in &data.revenue {
            rows.push(vec![p.x.clone(), "revenue".to_string(), p.label.clone()]);
        }
        for p in &data.expense {
            rows.push(vec![p.x.clone(), "expense".to_string(), p.label.clone()]);
        }
        println!("{}", pretty_table(&["When", "Kind", "Point"], rows));
    }
    Ok(())
}

fn by_category(repo: &TransactionRepository, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let filter = view_filter(sub)?;
    let now = Local::now().naive_local();

    let filtered = query::filter_transactions(repo.transactions(), &filter, now);
    let breakdown = query::category_breakdown(&filtered);

    if !maybe_print_json(json_flag, jsonl_flag, &breakdown)? {
        let rows: Vec<Vec<String>> = breakdown
            .iter()
            .map(|b| {
                vec![
                    b.category.clone(),
                    fmt_fcfa(&b.total),
                    b.count.to_string(),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Category", "Realized", "Count"], rows));
    }
    Ok(())
}

fn categories(repo: &TransactionRepository, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let known = query::known_categories(repo.transactions());

    if !maybe_print_json(json_flag, jsonl_flag, &known)? {
        let rows: Vec<Vec<String>> = known.iter().map(|c| vec![c.clone()]).collect();
        println!("{}", pretty_table(&["Recorded category"], rows));

        let mut suggested = Vec::new();
        for c in REVENUE_CATEGORIES {
            suggested.push(vec!["revenue".to_string(), c.to_string()]);
        }
        for c in EXPENSE_CATEGORIES {
            suggested.push(vec!["expense".to_string(), c.to_string()]);
        }
        println!("{}", pretty_table(&["Kind", "Suggested category"], suggested));
    }
    Ok(())
}
