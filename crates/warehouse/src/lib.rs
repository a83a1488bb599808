//! Warehouse domain module.
//!
//! Capacity accounting and per-item stock for named storage containers,
//! implemented purely as deterministic in-memory logic (no IO, no HTTP,
//! no storage).

pub mod ledger;
pub mod registry;
pub mod warehouse;

pub use ledger::CapacityLedger;
pub use registry::{RegistryError, WarehouseRegistry};
pub use warehouse::{Removal, Warehouse, WarehouseSummary};
