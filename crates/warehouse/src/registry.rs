//! Id-keyed warehouse store.
//!
//! The registry is an owned value handed to whoever needs it. Ids come from a
//! monotonically increasing counter and are never reused, even after deletion.

use std::collections::BTreeMap;

use thiserror::Error;
use tracing::{debug, info};

use depot_core::{DomainError, WarehouseId};

use crate::warehouse::{Removal, Warehouse, WarehouseSummary};

/// Registry-level failure.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RegistryError {
    /// No warehouse is stored under the given id.
    #[error("warehouse not found: {0}")]
    UnknownWarehouse(WarehouseId),

    /// Every id has been handed out.
    #[error("warehouse ids exhausted")]
    IdsExhausted,

    #[error(transparent)]
    Domain(#[from] DomainError),
}

#[derive(Debug, Clone)]
pub struct WarehouseRegistry {
    warehouses: BTreeMap<WarehouseId, Warehouse>,
    next_id: WarehouseId,
}

impl Default for WarehouseRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl WarehouseRegistry {
    pub fn new() -> Self {
        Self {
            warehouses: BTreeMap::new(),
            next_id: WarehouseId::from_raw(1),
        }
    }

    pub fn len(&self) -> usize {
        self.warehouses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.warehouses.is_empty()
    }

    /// Create a warehouse and return its id. A rejected create does not use up an id.
    pub fn create(
        &mut self,
        name: impl Into<String>,
        capacity: f64,
    ) -> Result<WarehouseId, RegistryError> {
        let warehouse = Warehouse::new(name, capacity).inspect_err(|e| {
            debug!(error = %e, "warehouse create rejected");
        })?;

        let id = self.next_id;
        let next_id = id.checked_next().ok_or(RegistryError::IdsExhausted)?;
        self.next_id = next_id;
        info!(warehouse_id = %id, name = warehouse.name(), capacity, "warehouse created");
        self.warehouses.insert(id, warehouse);
        Ok(id)
    }

    pub fn get(&self, id: WarehouseId) -> Option<&Warehouse> {
        self.warehouses.get(&id)
    }

    pub fn get_mut(&mut self, id: WarehouseId) -> Option<&mut Warehouse> {
        self.warehouses.get_mut(&id)
    }

    /// Remove a warehouse together with its ledger and items.
    pub fn delete(&mut self, id: WarehouseId) -> Result<Warehouse, RegistryError> {
        let warehouse = self
            .warehouses
            .remove(&id)
            .ok_or(RegistryError::UnknownWarehouse(id))?;
        info!(warehouse_id = %id, name = warehouse.name(), "warehouse deleted");
        Ok(warehouse)
    }

    /// Rename and resize in one step; see [`Warehouse::edit`].
    pub fn edit(
        &mut self,
        id: WarehouseId,
        name: impl Into<String>,
        capacity: f64,
    ) -> Result<(), RegistryError> {
        let warehouse = self.lookup_mut(id)?;
        warehouse.edit(name, capacity).inspect_err(|e| {
            debug!(warehouse_id = %id, error = %e, "warehouse edit rejected");
        })?;
        info!(warehouse_id = %id, name = warehouse.name(), capacity, "warehouse updated");
        Ok(())
    }

    pub fn add_item(
        &mut self,
        id: WarehouseId,
        item_name: &str,
        quantity: f64,
    ) -> Result<(), RegistryError> {
        let warehouse = self.lookup_mut(id)?;
        warehouse.add_item(item_name, quantity).inspect_err(|e| {
            debug!(warehouse_id = %id, item = item_name, error = %e, "add item rejected");
        })?;
        debug!(
            warehouse_id = %id,
            item = item_name,
            quantity,
            occupied = warehouse.occupied(),
            "item added"
        );
        Ok(())
    }

    /// Returns the quantity removed.
    pub fn remove_item(
        &mut self,
        id: WarehouseId,
        item_name: &str,
        removal: Removal,
    ) -> Result<f64, RegistryError> {
        let warehouse = self.lookup_mut(id)?;
        let removed = warehouse.remove_item(item_name, removal).inspect_err(|e| {
            debug!(warehouse_id = %id, item = item_name, error = %e, "remove item rejected");
        })?;
        debug!(
            warehouse_id = %id,
            item = item_name,
            quantity = removed,
            occupied = warehouse.occupied(),
            "item removed"
        );
        Ok(removed)
    }

    /// Warehouses in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (WarehouseId, &Warehouse)> + '_ {
        self.warehouses.iter().map(|(id, w)| (*id, w))
    }

    pub fn summaries(&self) -> Vec<(WarehouseId, WarehouseSummary)> {
        self.iter().map(|(id, w)| (id, w.summary())).collect()
    }

    fn lookup_mut(&mut self, id: WarehouseId) -> Result<&mut Warehouse, RegistryError> {
        self.warehouses
            .get_mut(&id)
            .ok_or(RegistryError::UnknownWarehouse(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_monotonic_and_never_reused() {
        let mut registry = WarehouseRegistry::new();
        let a = registry.create("A", 10.0).unwrap();
        let b = registry.create("B", 10.0).unwrap();
        assert_eq!(a.get(), 1);
        assert_eq!(b.get(), 2);

        registry.delete(b).unwrap();
        let c = registry.create("C", 10.0).unwrap();
        assert_eq!(c.get(), 3);
        assert!(registry.get(b).is_none());
    }

    #[test]
    fn failed_create_does_not_consume_an_id() {
        let mut registry = WarehouseRegistry::new();
        let err = registry.create("", 10.0).unwrap_err();
        assert!(matches!(err, RegistryError::Domain(DomainError::InvalidArgument(_))));
        assert!(registry.create("Depot", -1.0).is_err());

        let id = registry.create("Depot", 10.0).unwrap();
        assert_eq!(id.get(), 1);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn create_fails_cleanly_when_ids_run_out() {
        let mut registry = WarehouseRegistry::new();
        registry.next_id = WarehouseId::from_raw(u64::MAX);

        assert_eq!(
            registry.create("Last", 10.0).unwrap_err(),
            RegistryError::IdsExhausted
        );
        assert!(registry.is_empty());
        assert_eq!(registry.next_id, WarehouseId::from_raw(u64::MAX));
    }

    #[test]
    fn unknown_ids_are_reported() {
        let mut registry = WarehouseRegistry::new();
        let missing = WarehouseId::from_raw(99);

        assert_eq!(
            registry.delete(missing).unwrap_err(),
            RegistryError::UnknownWarehouse(missing)
        );
        assert_eq!(
            registry.add_item(missing, "bolt", 1.0).unwrap_err(),
            RegistryError::UnknownWarehouse(missing)
        );
        assert_eq!(
            registry.remove_item(missing, "bolt", Removal::All).unwrap_err(),
            RegistryError::UnknownWarehouse(missing)
        );
        assert_eq!(
            registry.edit(missing, "X", 1.0).unwrap_err(),
            RegistryError::UnknownWarehouse(missing)
        );
    }

    #[test]
    fn delete_returns_the_warehouse_with_its_items() {
        let mut registry = WarehouseRegistry::new();
        let id = registry.create("Depot", 50.0).unwrap();
        registry.add_item(id, "bolt", 20.0).unwrap();

        let removed = registry.delete(id).unwrap();
        assert_eq!(removed.quantity_of("bolt"), Some(20.0));
        assert!(registry.is_empty());
    }

    #[test]
    fn iteration_is_in_id_order() {
        let mut registry = WarehouseRegistry::new();
        registry.create("first", 1.0).unwrap();
        registry.create("second", 2.0).unwrap();
        registry.create("third", 3.0).unwrap();

        let names: Vec<String> = registry
            .summaries()
            .into_iter()
            .map(|(_, s)| s.name)
            .collect();
        assert_eq!(names, ["first", "second", "third"]);
    }

    #[test]
    fn edit_rejection_keeps_previous_values() {
        let mut registry = WarehouseRegistry::new();
        let id = registry.create("Depot", 100.0).unwrap();
        registry.add_item(id, "bolt", 30.0).unwrap();

        assert!(registry.edit(id, "Renamed", 20.0).is_err());
        let w = registry.get(id).unwrap();
        assert_eq!(w.name(), "Depot");
        assert_eq!(w.capacity(), 100.0);
    }
}
