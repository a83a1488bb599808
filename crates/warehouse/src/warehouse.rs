use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use depot_core::{DomainError, DomainResult, Quantity};

use crate::ledger::CapacityLedger;

/// How much of an item to take out.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "quantity", rename_all = "snake_case")]
pub enum Removal {
    /// Everything currently held under the item name.
    All,
    /// An explicit amount; must be positive and no more than what is held.
    Amount(f64),
}

/// A named storage container with capacity accounting and per-item quantities.
///
/// Invariants:
/// - `items` never holds a quantity `<= 0`; emptied entries are removed.
/// - `ledger.occupied()` equals the sum of `items`, clamped to capacity.
///   Every item mutation goes through the ledger first and then settles the
///   ledger on the recomputed item total, so float rounding in the two
///   running totals never accumulates.
#[derive(Debug, Clone, PartialEq)]
pub struct Warehouse {
    name: String,
    ledger: CapacityLedger,
    items: BTreeMap<String, f64>,
}

impl Warehouse {
    /// Create an empty warehouse.
    pub fn new(name: impl Into<String>, capacity: f64) -> DomainResult<Self> {
        let name = name.into();
        ensure_name(&name, "warehouse name")?;
        Ok(Self {
            name,
            ledger: CapacityLedger::new(capacity)?,
            items: BTreeMap::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ledger(&self) -> &CapacityLedger {
        &self.ledger
    }

    pub fn capacity(&self) -> f64 {
        self.ledger.capacity()
    }

    pub fn occupied(&self) -> f64 {
        self.ledger.occupied()
    }

    pub fn free_space(&self) -> f64 {
        self.ledger.free_space()
    }

    /// Items in name order.
    pub fn items(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.items.iter().map(|(name, qty)| (name.as_str(), *qty))
    }

    pub fn quantity_of(&self, item_name: &str) -> Option<f64> {
        self.items.get(item_name).copied()
    }

    /// Number of distinct item names currently stored.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Percentage of capacity that is still free.
    pub fn space_left_percent(&self) -> f64 {
        let capacity = self.ledger.capacity();
        if capacity == 0.0 {
            return 0.0;
        }
        self.ledger.free_space() / capacity * 100.0
    }

    /// Store `quantity` more of `item_name`.
    pub fn add_item(&mut self, item_name: &str, quantity: f64) -> DomainResult<()> {
        ensure_name(item_name, "item name")?;
        let quantity = Quantity::new(quantity)?.get();

        let free = self.ledger.free_space();
        if quantity > free {
            return Err(DomainError::capacity_exceeded(quantity, free));
        }

        self.ledger.reserve(quantity)?;
        *self.items.entry(item_name.to_owned()).or_insert(0.0) += quantity;
        self.ledger.settle(self.items_total());
        Ok(())
    }

    /// Take some or all of `item_name` out. Returns the quantity removed.
    pub fn remove_item(&mut self, item_name: &str, removal: Removal) -> DomainResult<f64> {
        let held = self
            .items
            .get(item_name)
            .copied()
            .ok_or_else(|| DomainError::not_found(item_name))?;

        let quantity = match removal {
            Removal::All => held,
            Removal::Amount(quantity) => quantity,
        };
        let quantity = Quantity::new(quantity)?.get();
        if quantity > held {
            return Err(DomainError::insufficient_stock(quantity, held));
        }

        // An item can round one ulp above the capped ledger total.
        self.ledger.release(quantity.min(self.ledger.occupied()))?;

        let remaining = held - quantity;
        if remaining == 0.0 {
            self.items.remove(item_name);
        } else {
            self.items.insert(item_name.to_owned(), remaining);
        }
        self.ledger.settle(self.items_total());
        Ok(quantity)
    }

    pub fn rename(&mut self, new_name: impl Into<String>) -> DomainResult<()> {
        let new_name = new_name.into();
        ensure_name(&new_name, "warehouse name")?;
        self.name = new_name;
        Ok(())
    }

    /// Change the capacity; the current stock is the lower bound.
    pub fn resize(&mut self, new_capacity: f64) -> DomainResult<()> {
        self.ledger.set_capacity(new_capacity)?;
        self.ledger.settle(self.items_total());
        Ok(())
    }

    /// Rename and resize together. Both are validated before either is applied.
    pub fn edit(&mut self, new_name: impl Into<String>, new_capacity: f64) -> DomainResult<()> {
        let new_name = new_name.into();
        ensure_name(&new_name, "warehouse name")?;
        self.ledger.check_capacity(new_capacity)?;

        self.ledger.set_capacity(new_capacity)?;
        self.ledger.settle(self.items_total());
        self.name = new_name;
        Ok(())
    }

    /// Point-in-time view for listings and detail pages.
    pub fn summary(&self) -> WarehouseSummary {
        WarehouseSummary {
            name: self.name.clone(),
            capacity: self.capacity(),
            occupied: self.occupied(),
            free_space: self.free_space(),
            item_count: self.item_count(),
            space_left_percent: self.space_left_percent(),
            items: self.items.clone(),
        }
    }

    fn items_total(&self) -> f64 {
        self.items.values().sum()
    }
}

/// Read-only snapshot of a warehouse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WarehouseSummary {
    pub name: String,
    pub capacity: f64,
    pub occupied: f64,
    pub free_space: f64,
    pub item_count: usize,
    pub space_left_percent: f64,
    pub items: BTreeMap<String, f64>,
}

fn ensure_name(name: &str, what: &str) -> DomainResult<()> {
    if name.trim().is_empty() {
        return Err(DomainError::invalid_argument(format!("{what} cannot be empty")));
    }
    Ok(())
}
