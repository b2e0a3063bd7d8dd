// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Derived views over the transaction collection: period/category
//! filtering, realized/pending statistics, trends against the prior
//! period, chart series and per-category breakdowns. Everything here is a
//! pure function of `(collection, filter, now)`.

use std::collections::HashMap;

use chrono::{Duration, Months, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Transaction, TransactionKind, TransactionStatus};
use crate::utils::fmt_fcfa;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Day,
    Week,
    Month,
    Year,
}

impl Period {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "day" => Some(Self::Day),
            "week" => Some(Self::Week),
            "month" => Some(Self::Month),
            "year" => Some(Self::Year),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
        }
    }
}

/// Start of the reporting window ending at `now`. `Day` is aligned to the
/// calendar day; the other periods are rolling windows.
pub fn period_start(period: Period, now: NaiveDateTime) -> NaiveDateTime {
    match period {
        Period::Day => now.date().and_time(NaiveTime::MIN),
        Period::Week => now - Duration::days(7),
        Period::Month => now
            .checked_sub_months(Months::new(1))
            .unwrap_or(NaiveDateTime::MIN),
        Period::Year => now
            .checked_sub_months(Months::new(12))
            .unwrap_or(NaiveDateTime::MIN),
    }
}

/// The window of the same nominal span immediately before the current one,
/// as `[start, end)`. Baseline source for trend computation.
pub fn prior_window(period: Period, now: NaiveDateTime) -> (NaiveDateTime, NaiveDateTime) {
    let end = period_start(period, now);
    let start = match period {
        Period::Day => end - Duration::days(1),
        Period::Week => end - Duration::days(7),
        Period::Month => end
            .checked_sub_months(Months::new(1))
            .unwrap_or(NaiveDateTime::MIN),
        Period::Year => end
            .checked_sub_months(Months::new(12))
            .unwrap_or(NaiveDateTime::MIN),
    };
    (start, end)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryFilter {
    All,
    Only(String),
}

impl CategoryFilter {
    /// `"all"` is the pass-everything sentinel used by selection controls;
    /// anything else requires an exact match.
    pub fn from_arg(s: &str) -> Self {
        if s.eq_ignore_ascii_case("all") {
            Self::All
        } else {
            Self::Only(s.to_string())
        }
    }

    pub fn matches(&self, category: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(name) => name == category,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ViewFilter {
    pub period: Period,
    pub category: CategoryFilter,
}

/// Period + category filter only. All statuses pass; the aggregations
/// below apply their own status rules.
pub fn filter_transactions<'a>(
    transactions: &'a [Transaction],
    filter: &ViewFilter,
    now: NaiveDateTime,
) -> Vec<&'a Transaction> {
    let start = period_start(filter.period, now);
    transactions
        .iter()
        .filter(|t| start <= t.date && t.date <= now)
        .filter(|t| filter.category.matches(&t.category))
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TransactionStats {
    pub realized_revenue: Decimal,
    pub realized_expense: Decimal,
    pub pending_revenue: Decimal,
    pub pending_expense: Decimal,
}

/// Realized and pending sums per kind. Cancelled entries feed none of the
/// four sums but are not removed from the filtered list.
pub fn compute_stats(filtered: &[&Transaction]) -> TransactionStats {
    let mut stats = TransactionStats::default();
    for t in filtered {
        let slot = match (t.kind, t.status) {
            (TransactionKind::Revenue, TransactionStatus::Completed) => &mut stats.realized_revenue,
            (TransactionKind::Revenue, TransactionStatus::Pending) => &mut stats.pending_revenue,
            (TransactionKind::Expense, TransactionStatus::Completed) => &mut stats.realized_expense,
            (TransactionKind::Expense, TransactionStatus::Pending) => &mut stats.pending_expense,
            (_, TransactionStatus::Cancelled) => continue,
        };
        *slot += t.amount;
    }
    stats
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Trend {
    pub direction: TrendDirection,
    /// Absolute percent change, two decimals; the "%" suffix is the
    /// caller's rendering convention. `"0"` when there is no baseline.
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionTrends {
    pub revenue: Trend,
    pub expense: Trend,
}

/// Percent change of `current` against `baseline`. A zero baseline yields
/// a neutral upward trend rather than a division error.
pub fn trend_against(current: Decimal, baseline: Decimal) -> Trend {
    if baseline.is_zero() {
        return Trend {
            direction: TrendDirection::Up,
            value: "0".to_string(),
        };
    }
    let change = (current - baseline) / baseline * Decimal::from(100);
    Trend {
        direction: if change >= Decimal::ZERO {
            TrendDirection::Up
        } else {
            TrendDirection::Down
        },
        value: format!("{:.2}", change.abs()),
    }
}

/// Trends of the realized sums in the current window against the window
/// immediately before it (same category filter, completed entries only).
/// Callers with their own retained snapshot can use [`trend_against`]
/// directly instead.
pub fn compute_trends(
    transactions: &[Transaction],
    filter: &ViewFilter,
    now: NaiveDateTime,
) -> TransactionTrends {
    let current = compute_stats(&filter_transactions(transactions, filter, now));
    let (start, end) = prior_window(filter.period, now);
    let mut baseline_revenue = Decimal::ZERO;
    let mut baseline_expense = Decimal::ZERO;
    for t in transactions {
        if t.status != TransactionStatus::Completed {
            continue;
        }
        if t.date < start || t.date >= end {
            continue;
        }
        if !filter.category.matches(&t.category) {
            continue;
        }
        match t.kind {
            TransactionKind::Revenue => baseline_revenue += t.amount,
            TransactionKind::Expense => baseline_expense += t.amount,
        }
    }
    TransactionTrends {
        revenue: trend_against(current.realized_revenue, baseline_revenue),
        expense: trend_against(current.realized_expense, baseline_expense),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartPoint {
    pub x: String,
    pub y: Decimal,
    pub label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChartData {
    pub revenue: Vec<ChartPoint>,
    pub expense: Vec<ChartPoint>,
    /// Deduplicated union of both series' x labels, chronological.
    pub labels: Vec<String>,
}

pub fn chart_data(filtered: &[&Transaction]) -> ChartData {
    let mut completed: Vec<&Transaction> = filtered
        .iter()
        .copied()
        .filter(|t| t.status == TransactionStatus::Completed)
        .collect();
    completed.sort_by_key(|t| t.date);

    let mut data = ChartData::default();
    for t in completed {
        let x = t.date.format("%d %b %H:%M").to_string();
        let point = ChartPoint {
            x: x.clone(),
            y: t.amount,
            label: format!("{}: {}", t.category, fmt_fcfa(&t.amount)),
        };
        match t.kind {
            TransactionKind::Revenue => data.revenue.push(point),
            TransactionKind::Expense => data.expense.push(point),
        }
        if !data.labels.contains(&x) {
            data.labels.push(x);
        }
    }
    data
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryBreakdown {
    pub category: String,
    pub total: Decimal,
    pub count: usize,
}

/// Per-category realized sum and count over the filtered set, largest
/// total first.
pub fn category_breakdown(filtered: &[&Transaction]) -> Vec<CategoryBreakdown> {
    let mut agg: HashMap<&str, (Decimal, usize)> = HashMap::new();
    for t in filtered {
        if t.status != TransactionStatus::Completed {
            continue;
        }
        let entry = agg.entry(t.category.as_str()).or_insert((Decimal::ZERO, 0));
        entry.0 += t.amount;
        entry.1 += 1;
    }
    let mut items: Vec<CategoryBreakdown> = agg
        .into_iter()
        .map(|(category, (total, count))| CategoryBreakdown {
            category: category.to_string(),
            total,
            count,
        })
        .collect();
    items.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.category.cmp(&b.category)));
    items
}

/// Distinct categories across the whole collection, first-seen order.
/// Deliberately unfiltered: selection controls list everything ever used.
pub fn known_categories(transactions: &[Transaction]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for t in transactions {
        if !seen.iter().any(|c| c == &t.category) {
            seen.push(t.category.clone());
        }
    }
    seen
}
