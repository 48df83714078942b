//! Cart State Store
//!
//! The store publishes immutable [`CartSnapshot`]s through a `watch` channel.
//! Every mutation builds a new entry list and swaps the snapshot in one step,
//! so readers never see a half-applied change and a snapshot they already
//! hold is never modified.

use super::models::{CartEntry, CartSnapshot, Product};
use std::sync::Arc;
use tokio::sync::watch;

/// Holds the cart entries and their derived totals.
pub struct CartStore {
    tx: watch::Sender<CartSnapshot>,
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CartStore {
    /// Creates an empty store
    pub fn new() -> Self {
        let (tx, _) = watch::channel(CartSnapshot::default());
        Self { tx }
    }

    // -------------------------------------------------------------------------
    // Derived views
    // -------------------------------------------------------------------------

    /// Current snapshot (entries plus aggregates, read together)
    pub fn snapshot(&self) -> CartSnapshot {
        self.tx.borrow().clone()
    }

    pub fn entries(&self) -> Arc<[CartEntry]> {
        Arc::clone(self.tx.borrow().entries())
    }

    pub fn total_price(&self) -> f64 {
        self.tx.borrow().total_price()
    }

    pub fn item_count(&self) -> u64 {
        self.tx.borrow().item_count()
    }

    /// Returns a receiver that observes every snapshot replacement.
    pub fn subscribe(&self) -> watch::Receiver<CartSnapshot> {
        self.tx.subscribe()
    }

    // -------------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------------

    /// Runs `change` under the channel lock and installs the snapshot it
    /// returns. `None` keeps the current snapshot and notifies nobody.
    ///
    /// Returns the snapshot in place when the lock is released.
    fn apply<F>(&self, change: F) -> CartSnapshot
    where
        F: FnOnce(&CartSnapshot) -> Option<CartSnapshot>,
    {
        let mut installed = None;
        self.tx.send_if_modified(|snapshot| {
            let modified = match change(snapshot) {
                Some(next) => {
                    *snapshot = next;
                    true
                }
                None => false,
            };
            installed = Some(snapshot.clone());
            modified
        });
        installed.unwrap_or_default()
    }

    /// Adds one unit of `product`, appending a new entry if it is not in the cart yet.
    pub fn add_item(&self, product: Product) -> CartSnapshot {
        self.apply(move |snapshot| {
            tracing::debug!(id = %product.id, "cart item added");

            let entries = snapshot.entries();
            let next: Vec<CartEntry> = match entries.iter().position(|e| e.id() == product.id) {
                Some(index) => entries
                    .iter()
                    .enumerate()
                    .map(|(i, e)| {
                        if i == index {
                            e.with_quantity(e.quantity.saturating_add(1))
                        } else {
                            e.clone()
                        }
                    })
                    .collect(),
                None => entries
                    .iter()
                    .cloned()
                    .chain(std::iter::once(CartEntry::from_product(product)))
                    .collect(),
            };

            Some(CartSnapshot::from_entries(next))
        })
    }

    /// Removes the entry with `id`. Unknown ids leave the cart untouched.
    pub fn remove_item(&self, id: &str) -> CartSnapshot {
        self.apply(|snapshot| {
            let entries = snapshot.entries();
            if !entries.iter().any(|e| e.id() == id) {
                return None;
            }

            let next = entries.iter().filter(|e| e.id() != id).cloned().collect();

            tracing::debug!(id, "cart item removed");
            Some(CartSnapshot::from_entries(next))
        })
    }

    /// Sets the quantity of the entry with `id`.
    ///
    /// A quantity below 1 removes the entry. Unknown ids are ignored.
    pub fn update_quantity(&self, id: &str, new_quantity: i64) -> CartSnapshot {
        if new_quantity < 1 {
            return self.remove_item(id);
        }
        let quantity = u32::try_from(new_quantity).unwrap_or(u32::MAX);

        self.apply(|snapshot| {
            let entries = snapshot.entries();
            if !entries.iter().any(|e| e.id() == id) {
                return None;
            }

            let next = entries
                .iter()
                .map(|e| {
                    if e.id() == id {
                        e.with_quantity(quantity)
                    } else {
                        e.clone()
                    }
                })
                .collect();

            tracing::debug!(id, quantity, "cart item quantity updated");
            Some(CartSnapshot::from_entries(next))
        })
    }

    /// Empties the cart.
    pub fn clear_cart(&self) -> CartSnapshot {
        self.apply(|_| {
            tracing::debug!("cart cleared");
            Some(CartSnapshot::default())
        })
    }
}
