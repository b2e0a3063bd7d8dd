// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use communefin::models::{Transaction, TransactionKind, TransactionStatus};
use communefin::query::{
    self, CategoryFilter, Period, TrendDirection, ViewFilter, trend_against,
};
use rust_decimal::Decimal;

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 8, 6)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, 0)
        .unwrap()
}

fn tx(
    id: &str,
    kind: TransactionKind,
    amount: i64,
    date: NaiveDateTime,
    category: &str,
    status: TransactionStatus,
) -> Transaction {
    Transaction {
        id: id.to_string(),
        kind,
        amount: Decimal::from(amount),
        date,
        category: category.to_string(),
        status,
        description: None,
        counterparty: None,
        reference: None,
    }
}

fn month_all() -> ViewFilter {
    ViewFilter {
        period: Period::Month,
        category: CategoryFilter::All,
    }
}

#[test]
fn realized_revenue_over_a_month_window() {
    let collection = vec![tx(
        "t1",
        TransactionKind::Revenue,
        500_000,
        now() - Duration::days(3),
        "TFPCA",
        TransactionStatus::Completed,
    )];

    let stats = query::compute_stats(&query::filter_transactions(
        &collection,
        &month_all(),
        now(),
    ));
    assert_eq!(stats.realized_revenue, Decimal::from(500_000));
    assert_eq!(stats.realized_expense, Decimal::ZERO);
}

#[test]
fn pending_revenue_is_tracked_separately() {
    let collection = vec![tx(
        "t1",
        TransactionKind::Revenue,
        2_000_000,
        now() - Duration::days(1),
        "Location des biens",
        TransactionStatus::Pending,
    )];

    let stats = query::compute_stats(&query::filter_transactions(
        &collection,
        &month_all(),
        now(),
    ));
    assert_eq!(stats.pending_revenue, Decimal::from(2_000_000));
    assert_eq!(stats.realized_revenue, Decimal::ZERO);
}

#[test]
fn empty_collection_yields_empty_views() {
    let collection: Vec<Transaction> = Vec::new();

    let filtered = query::filter_transactions(&collection, &month_all(), now());
    let stats = query::compute_stats(&filtered);
    assert_eq!(stats.realized_revenue, Decimal::ZERO);
    assert_eq!(stats.realized_expense, Decimal::ZERO);
    assert_eq!(stats.pending_revenue, Decimal::ZERO);
    assert_eq!(stats.pending_expense, Decimal::ZERO);

    let chart = query::chart_data(&filtered);
    assert!(chart.revenue.is_empty());
    assert!(chart.expense.is_empty());
    assert!(chart.labels.is_empty());

    assert!(query::known_categories(&collection).is_empty());
    assert!(query::category_breakdown(&filtered).is_empty());
}

#[test]
fn cancelled_entries_feed_no_sum_but_stay_listed() {
    let collection = vec![
        tx(
            "t1",
            TransactionKind::Expense,
            100_000,
            now() - Duration::days(2),
            "Dépenses courantes",
            TransactionStatus::Completed,
        ),
        tx(
            "t2",
            TransactionKind::Expense,
            40_000,
            now() - Duration::days(2),
            "Dépenses courantes",
            TransactionStatus::Cancelled,
        ),
    ];

    let filtered = query::filter_transactions(&collection, &month_all(), now());
    assert_eq!(filtered.len(), 2);

    let stats = query::compute_stats(&filtered);
    assert_eq!(stats.realized_expense, Decimal::from(100_000));
    assert_eq!(stats.pending_expense, Decimal::ZERO);
}

#[test]
fn day_window_is_calendar_aligned() {
    let filter = ViewFilter {
        period: Period::Day,
        category: CategoryFilter::All,
    };
    let collection = vec![
        tx("midnight", TransactionKind::Revenue, 1, at(2026, 8, 6, 0, 0), "TFPCA", TransactionStatus::Completed),
        tx("last-night", TransactionKind::Revenue, 2, at(2026, 8, 5, 23, 59), "TFPCA", TransactionStatus::Completed),
        tx("later-today", TransactionKind::Revenue, 3, at(2026, 8, 6, 13, 0), "TFPCA", TransactionStatus::Completed),
    ];

    let filtered = query::filter_transactions(&collection, &filter, now());
    let ids: Vec<&str> = filtered.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, ["midnight"]);
}

#[test]
fn week_window_is_rolling_seven_days() {
    let filter = ViewFilter {
        period: Period::Week,
        category: CategoryFilter::All,
    };
    let collection = vec![
        tx("edge", TransactionKind::Revenue, 1, now() - Duration::days(7), "TFPCA", TransactionStatus::Completed),
        tx("out", TransactionKind::Revenue, 2, now() - Duration::days(8), "TFPCA", TransactionStatus::Completed),
    ];

    let filtered = query::filter_transactions(&collection, &filter, now());
    let ids: Vec<&str> = filtered.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, ["edge"]);
}

#[test]
fn future_dated_entries_are_excluded() {
    let collection = vec![tx(
        "future",
        TransactionKind::Revenue,
        1,
        now() + Duration::hours(1),
        "TFPCA",
        TransactionStatus::Completed,
    )];
    assert!(query::filter_transactions(&collection, &month_all(), now()).is_empty());
}

#[test]
fn category_filter_requires_exact_match() {
    let collection = vec![
        tx("a", TransactionKind::Revenue, 1, now() - Duration::days(1), "TFPCA", TransactionStatus::Completed),
        tx("b", TransactionKind::Revenue, 2, now() - Duration::days(1), "Recettes marché", TransactionStatus::Completed),
    ];

    let only = ViewFilter {
        period: Period::Month,
        category: CategoryFilter::from_arg("TFPCA"),
    };
    let filtered = query::filter_transactions(&collection, &only, now());
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].id, "a");

    assert_eq!(CategoryFilter::from_arg("all"), CategoryFilter::All);
    assert_eq!(CategoryFilter::from_arg("ALL"), CategoryFilter::All);
    let everything = query::filter_transactions(&collection, &month_all(), now());
    assert_eq!(everything.len(), 2);
}

#[test]
fn derived_views_are_idempotent() {
    let collection = vec![
        tx("a", TransactionKind::Revenue, 10, now() - Duration::days(1), "TFPCA", TransactionStatus::Completed),
        tx("b", TransactionKind::Expense, 20, now() - Duration::days(2), "Dépenses courantes", TransactionStatus::Pending),
    ];

    let filtered = query::filter_transactions(&collection, &month_all(), now());
    assert_eq!(
        query::compute_stats(&filtered),
        query::compute_stats(&filtered)
    );
    assert_eq!(query::chart_data(&filtered), query::chart_data(&filtered));
    assert_eq!(
        query::compute_trends(&collection, &month_all(), now()),
        query::compute_trends(&collection, &month_all(), now())
    );
}

#[test]
fn chart_series_are_chronological_and_labels_deduped() {
    let collection = vec![
        tx("late", TransactionKind::Revenue, 300, at(2026, 8, 3, 9, 30), "TFPCA", TransactionStatus::Completed),
        tx("early", TransactionKind::Revenue, 100, at(2026, 8, 1, 8, 0), "TFPCA", TransactionStatus::Completed),
        tx("expense-same-slot", TransactionKind::Expense, 200, at(2026, 8, 3, 9, 30), "Dépenses courantes", TransactionStatus::Completed),
        tx("ignored-pending", TransactionKind::Revenue, 999, at(2026, 8, 2, 10, 0), "TFPCA", TransactionStatus::Pending),
    ];

    let filtered = query::filter_transactions(&collection, &month_all(), now());
    let chart = query::chart_data(&filtered);

    let revenue_x: Vec<&str> = chart.revenue.iter().map(|p| p.x.as_str()).collect();
    assert_eq!(revenue_x, ["01 Aug 08:00", "03 Aug 09:30"]);
    assert_eq!(chart.expense.len(), 1);
    // The 09:30 slot appears in both series but only once on the axis.
    assert_eq!(chart.labels, ["01 Aug 08:00", "03 Aug 09:30"]);

    assert_eq!(chart.revenue[0].y, Decimal::from(100));
    assert_eq!(chart.revenue[0].label, "TFPCA: 100 FCFA");
    assert_eq!(
        chart.expense[0].label,
        "Dépenses courantes: 200 FCFA"
    );
}

#[test]
fn known_categories_come_from_the_unfiltered_collection() {
    let collection = vec![
        tx("a", TransactionKind::Revenue, 1, at(2020, 1, 1, 0, 0), "TFPCA", TransactionStatus::Completed),
        tx("b", TransactionKind::Expense, 2, now() - Duration::days(1), "Dépenses courantes", TransactionStatus::Cancelled),
        tx("c", TransactionKind::Revenue, 3, now() - Duration::days(1), "TFPCA", TransactionStatus::Completed),
    ];

    // "a" is far outside every window and "b" is cancelled; both still
    // contribute their category to the catalog.
    assert_eq!(
        query::known_categories(&collection),
        ["TFPCA", "Dépenses courantes"]
    );
}

#[test]
fn trend_is_neutral_without_a_baseline() {
    let collection = vec![tx(
        "t1",
        TransactionKind::Revenue,
        500_000,
        now() - Duration::days(1),
        "TFPCA",
        TransactionStatus::Completed,
    )];

    let trends = query::compute_trends(&collection, &month_all(), now());
    assert_eq!(trends.revenue.direction, TrendDirection::Up);
    assert_eq!(trends.revenue.value, "0");
    assert_eq!(trends.expense.value, "0");
}

#[test]
fn trend_compares_against_the_prior_window() {
    let collection = vec![
        // Current month window.
        tx("r-now", TransactionKind::Revenue, 150_000, at(2026, 7, 20, 10, 0), "TFPCA", TransactionStatus::Completed),
        tx("e-now", TransactionKind::Expense, 100_000, at(2026, 7, 15, 10, 0), "Dépenses courantes", TransactionStatus::Completed),
        // Prior month window.
        tx("r-prior", TransactionKind::Revenue, 100_000, at(2026, 6, 20, 10, 0), "TFPCA", TransactionStatus::Completed),
        tx("e-prior", TransactionKind::Expense, 200_000, at(2026, 6, 15, 10, 0), "Dépenses courantes", TransactionStatus::Completed),
        // Pending entries never shape a baseline.
        tx("p-prior", TransactionKind::Revenue, 900_000, at(2026, 6, 21, 10, 0), "TFPCA", TransactionStatus::Pending),
    ];

    let trends = query::compute_trends(&collection, &month_all(), now());
    assert_eq!(trends.revenue.direction, TrendDirection::Up);
    assert_eq!(trends.revenue.value, "50.00");
    assert_eq!(trends.expense.direction, TrendDirection::Down);
    assert_eq!(trends.expense.value, "50.00");
}

#[test]
fn trend_against_formats_two_decimals() {
    let up = trend_against(Decimal::from(125), Decimal::from(100));
    assert_eq!(up.direction, TrendDirection::Up);
    assert_eq!(up.value, "25.00");

    let flat = trend_against(Decimal::from(100), Decimal::from(100));
    assert_eq!(flat.direction, TrendDirection::Up);
    assert_eq!(flat.value, "0.00");

    let down = trend_against(Decimal::from(75), Decimal::from(100));
    assert_eq!(down.direction, TrendDirection::Down);
    assert_eq!(down.value, "25.00");
}

#[test]
fn category_breakdown_counts_realized_entries_only() {
    let collection = vec![
        tx("a", TransactionKind::Expense, 100, now() - Duration::days(1), "Entretien et maintenance", TransactionStatus::Completed),
        tx("b", TransactionKind::Expense, 200, now() - Duration::days(2), "Entretien et maintenance", TransactionStatus::Completed),
        tx("c", TransactionKind::Expense, 250, now() - Duration::days(3), "Dépenses courantes", TransactionStatus::Completed),
        tx("d", TransactionKind::Expense, 999, now() - Duration::days(4), "Dépenses courantes", TransactionStatus::Pending),
    ];

    let filtered = query::filter_transactions(&collection, &month_all(), now());
    let breakdown = query::category_breakdown(&filtered);

    assert_eq!(breakdown.len(), 2);
    assert_eq!(breakdown[0].category, "Entretien et maintenance");
    assert_eq!(breakdown[0].total, Decimal::from(300));
    assert_eq!(breakdown[0].count, 2);
    assert_eq!(breakdown[1].category, "Dépenses courantes");
    assert_eq!(breakdown[1].total, Decimal::from(250));
    assert_eq!(breakdown[1].count, 1);
}
