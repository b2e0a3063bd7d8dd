// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Allocation-vs-actual tracking: a static per-category allocation table
//! joined against the ledger's completed expenses for one fiscal year.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Datelike;
use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{BudgetCategory, Transaction, TransactionKind, TransactionStatus};

static DEFAULT_ALLOCATIONS: Lazy<Vec<BudgetCategory>> = Lazy::new(|| {
    [
        ("Salaires et accessoires", 5_000_000),
        ("Équipements et matériel", 2_000_000),
        ("Projets de développement", 3_000_000),
        ("Entretien et maintenance", 1_000_000),
        ("Dépenses courantes", 800_000),
    ]
    .into_iter()
    .map(|(name, allocated)| BudgetCategory {
        name: name.to_string(),
        allocated: Decimal::from(allocated),
    })
    .collect()
});

/// The compiled-in municipal allocation table (FCFA).
pub fn default_allocations() -> Vec<BudgetCategory> {
    DEFAULT_ALLOCATIONS.clone()
}

/// Reads an allocation table from a JSON file:
/// `[{"name": "...", "allocated": 1000000}, ...]`.
pub fn load_allocations(path: &Path) -> Result<Vec<BudgetCategory>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Read allocations from {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Parse allocations in {}", path.display()))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryBudgetLine {
    pub name: String,
    pub allocated: Decimal,
    pub spent: Decimal,
    pub remaining: Decimal,
    pub utilization_percent: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetReport {
    pub fiscal_year: i32,
    pub total_allocated: Decimal,
    pub total_spent: Decimal,
    /// Negative when over budget.
    pub remaining: Decimal,
    pub utilization_percent: Decimal,
    pub categories: Vec<CategoryBudgetLine>,
}

fn utilization(spent: Decimal, allocated: Decimal) -> Decimal {
    if allocated > Decimal::ZERO {
        spent / allocated * Decimal::from(100)
    } else {
        Decimal::ZERO
    }
}

/// Compares `allocations` against the completed expenses of `fiscal_year`.
/// The aggregate spent total counts every completed expense of the year,
/// whether or not its category appears in the allocation table; the
/// per-category lines additionally require an exact category match.
pub fn budget_report(
    allocations: &[BudgetCategory],
    transactions: &[Transaction],
    fiscal_year: i32,
) -> BudgetReport {
    let realized: Vec<&Transaction> = transactions
        .iter()
        .filter(|t| {
            t.kind == TransactionKind::Expense
                && t.status == TransactionStatus::Completed
                && t.date.year() == fiscal_year
        })
        .collect();

    let total_allocated: Decimal = allocations.iter().map(|c| c.allocated).sum();
    let total_spent: Decimal = realized.iter().map(|t| t.amount).sum();

    let categories = allocations
        .iter()
        .map(|c| {
            let spent: Decimal = realized
                .iter()
                .filter(|t| t.category == c.name)
                .map(|t| t.amount)
                .sum();
            CategoryBudgetLine {
                name: c.name.clone(),
                allocated: c.allocated,
                spent,
                remaining: c.allocated - spent,
                utilization_percent: utilization(spent, c.allocated),
            }
        })
        .collect();

    BudgetReport {
        fiscal_year,
        total_allocated,
        total_spent,
        remaining: total_allocated - total_spent,
        utilization_percent: utilization(total_spent, total_allocated),
        categories,
    }
}
