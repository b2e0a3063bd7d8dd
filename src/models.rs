// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Revenue,
    Expense,
}

impl TransactionKind {
    /// Accepts both the English tags and the French spellings used on
    /// municipal paperwork ("recette" / "depense").
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "revenue" | "recette" => Some(Self::Revenue),
            "expense" | "depense" | "dépense" => Some(Self::Expense),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Revenue => "revenue",
            Self::Expense => "expense",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Pending,
    Completed,
    Cancelled,
}

impl TransactionStatus {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "completed" => Some(Self::Completed),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

/// A single ledger entry. `date` is the "occurred on" instant, not the
/// recording time; `counterparty` names the payer for revenues and the
/// beneficiary for expenses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub date: NaiveDateTime,
    pub category: String,
    pub status: TransactionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub counterparty: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

/// Caller-suppliable fields of a new transaction. `status` of `None`
/// records the entry as completed.
#[derive(Debug, Clone)]
pub struct TransactionInput {
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub date: NaiveDateTime,
    pub category: String,
    pub status: Option<TransactionStatus>,
    pub description: Option<String>,
    pub counterparty: Option<String>,
    pub reference: Option<String>,
}

/// Partial-field merge for updates. `kind` is deliberately absent: the
/// kind of an entry is fixed at creation.
#[derive(Debug, Clone, Default)]
pub struct TransactionPatch {
    pub amount: Option<Decimal>,
    pub date: Option<NaiveDateTime>,
    pub category: Option<String>,
    pub status: Option<TransactionStatus>,
    pub description: Option<String>,
    pub counterparty: Option<String>,
    pub reference: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetCategory {
    pub name: String,
    pub allocated: Decimal,
}

// Suggested catalogs for selection controls. Free-form categories are
// still accepted everywhere.
pub const REVENUE_CATEGORIES: &[&str] = &[
    "TFPCA",
    "Taxes établissements de nuit",
    "Recettes marché",
    "Taxes publicité",
    "Location des biens",
];

pub const EXPENSE_CATEGORIES: &[&str] = &[
    "Salaires et accessoires",
    "Équipements et matériel",
    "Projets de développement",
    "Entretien et maintenance",
    "Dépenses courantes",
];
