// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! System of record for the transaction collection. Every mutation goes
//! through here and writes the full collection back through the store
//! (read-modify-replace; concurrent unserialized writers are last-save-wins).

use std::rc::Rc;

use rust_decimal::Decimal;
use tracing::warn;
use uuid::Uuid;

use crate::models::{Transaction, TransactionInput, TransactionPatch, TransactionStatus};
use crate::store::{ChangeEvent, Store};

pub const TRANSACTIONS_KEY: &str = "transactions";

pub struct TransactionRepository {
    store: Rc<Store>,
    transactions: Vec<Transaction>,
    last_error: Option<String>,
}

impl TransactionRepository {
    /// Loads the persisted collection; an absent or unreadable document
    /// starts the ledger empty.
    pub fn open(store: Rc<Store>) -> Self {
        let transactions = store.load_or(TRANSACTIONS_KEY, Vec::new());
        Self {
            store,
            transactions,
            last_error: None,
        }
    }

    /// The unfiltered collection, in insertion order.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Records a new transaction and returns it. A persistence failure
    /// does not roll the entry back; it is kept in memory and the failure
    /// lands in [`last_error`](Self::last_error).
    pub fn add(&mut self, input: TransactionInput) -> Transaction {
        debug_assert!(input.amount >= Decimal::ZERO, "amounts are non-negative");
        let transaction = Transaction {
            id: Uuid::new_v4().to_string(),
            kind: input.kind,
            amount: input.amount,
            date: input.date,
            category: input.category,
            status: input.status.unwrap_or(TransactionStatus::Completed),
            description: input.description,
            counterparty: input.counterparty,
            reference: input.reference,
        };
        self.transactions.push(transaction.clone());
        self.persist("add");
        transaction
    }

    /// Merges `patch` into the matching entry. Returns whether an entry
    /// matched; a miss leaves the collection and storage untouched.
    pub fn update(&mut self, id: &str, patch: TransactionPatch) -> bool {
        let Some(transaction) = self.transactions.iter_mut().find(|t| t.id == id) else {
            return false;
        };
        if let Some(amount) = patch.amount {
            debug_assert!(amount >= Decimal::ZERO, "amounts are non-negative");
            transaction.amount = amount;
        }
        if let Some(date) = patch.date {
            transaction.date = date;
        }
        if let Some(category) = patch.category {
            transaction.category = category;
        }
        if let Some(status) = patch.status {
            transaction.status = status;
        }
        if let Some(description) = patch.description {
            transaction.description = Some(description);
        }
        if let Some(counterparty) = patch.counterparty {
            transaction.counterparty = Some(counterparty);
        }
        if let Some(reference) = patch.reference {
            transaction.reference = Some(reference);
        }
        self.persist("update");
        true
    }

    pub fn set_status(&mut self, id: &str, status: TransactionStatus) -> bool {
        self.update(
            id,
            TransactionPatch {
                status: Some(status),
                ..TransactionPatch::default()
            },
        )
    }

    /// Hard delete. Returns whether an entry matched.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.transactions.len();
        self.transactions.retain(|t| t.id != id);
        if self.transactions.len() == before {
            return false;
        }
        self.persist("delete");
        true
    }

    /// The most recent persistence failure, if the last mutation hit one.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn take_error(&mut self) -> Option<String> {
        self.last_error.take()
    }

    /// Adopts a change notification for the transactions key: the payload
    /// replaces the whole collection. Returns whether the event applied.
    pub fn apply_change(&mut self, event: &ChangeEvent) -> bool {
        if event.key != TRANSACTIONS_KEY {
            return false;
        }
        match serde_json::from_str(&event.value) {
            Ok(transactions) => {
                self.transactions = transactions;
                true
            }
            Err(err) => {
                warn!(%err, "ignoring unreadable change payload");
                false
            }
        }
    }

    /// Re-reads the collection from the store, with the same recovery
    /// semantics as [`open`](Self::open).
    pub fn reload(&mut self) {
        self.transactions = self.store.load_or(TRANSACTIONS_KEY, Vec::new());
    }

    fn persist(&mut self, operation: &str) {
        match self.store.save(TRANSACTIONS_KEY, &self.transactions) {
            Ok(()) => self.last_error = None,
            Err(err) => {
                self.last_error = Some(format!("could not persist {}: {}", operation, err));
            }
        }
    }
}
