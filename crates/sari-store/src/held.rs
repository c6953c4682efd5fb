//! # Held Transactions
//!
//! Parked carts waiting for the customer to come back. Retrieval is
//! destructive: removal and return of the items happen in one step, so
//! a held transaction can never be resumed twice.

use std::sync::Arc;

use chrono::Utc;
use sari_core::{CartItem, CoreError, HeldTransaction};
use tracing::info;
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use crate::kv::{keys, load_or, save, KvStore};

pub struct HeldQueue {
    kv: Arc<dyn KvStore>,
    held: Vec<HeldTransaction>,
}

impl HeldQueue {
    pub fn load(kv: Arc<dyn KvStore>) -> StoreResult<Self> {
        let held = load_or(kv.as_ref(), keys::HELD_TRANSACTIONS, Vec::new)?;
        Ok(HeldQueue { kv, held })
    }

    fn persist(&self) -> StoreResult<()> {
        save(self.kv.as_ref(), keys::HELD_TRANSACTIONS, &self.held)
    }

    pub fn held(&self) -> &[HeldTransaction] {
        &self.held
    }

    /// Parks a set of cart lines. Empty item lists are rejected, there
    /// is nothing to resume from an empty hold.
    pub fn hold(&mut self, items: Vec<CartItem>, note: Option<String>) -> StoreResult<HeldTransaction> {
        if items.is_empty() {
            return Err(CoreError::EmptyCart.into());
        }

        let transaction = HeldTransaction {
            id: Uuid::new_v4().to_string(),
            items,
            timestamp: Utc::now(),
            note,
        };
        self.held.push(transaction.clone());
        self.persist()?;
        info!(id = %transaction.id, lines = transaction.items.len(), "Cart held");
        Ok(transaction)
    }

    /// Removes and returns a held transaction. A second retrieve of
    /// the same id is `NotFound`.
    pub fn retrieve(&mut self, id: &str) -> StoreResult<HeldTransaction> {
        let pos = self
            .held
            .iter()
            .position(|h| h.id == id)
            .ok_or_else(|| StoreError::not_found("HeldTransaction", id))?;
        let transaction = self.held.remove(pos);
        self.persist()?;
        info!(id, "Held transaction retrieved");
        Ok(transaction)
    }

    /// Discards a held transaction without resuming it.
    pub fn discard(&mut self, id: &str) -> StoreResult<()> {
        let before = self.held.len();
        self.held.retain(|h| h.id != id);
        if self.held.len() == before {
            return Err(StoreError::not_found("HeldTransaction", id));
        }
        self.persist()?;
        info!(id, "Held transaction discarded");
        Ok(())
    }
}
