use serde::{Deserialize, Serialize};

use depot_core::{DomainError, DomainResult, Quantity};

/// Capacity bookkeeping for a single storage container.
///
/// Invariant: `0 <= occupied <= capacity` after every operation. Failed
/// operations leave the ledger untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "LedgerParts")]
pub struct CapacityLedger {
    capacity: f64,
    occupied: f64,
}

impl CapacityLedger {
    /// Create an empty ledger.
    pub fn new(capacity: f64) -> DomainResult<Self> {
        Self::with_occupied(capacity, 0.0)
    }

    /// Create a ledger that already holds `initial_occupied`.
    pub fn with_occupied(capacity: f64, initial_occupied: f64) -> DomainResult<Self> {
        let capacity = validate_capacity(capacity)?;
        if !initial_occupied.is_finite() || initial_occupied < 0.0 {
            return Err(DomainError::invalid_argument(
                "initial occupied amount must be a non-negative number",
            ));
        }
        if initial_occupied > capacity {
            return Err(DomainError::invalid_argument(
                "initial occupied amount cannot exceed capacity",
            ));
        }
        Ok(Self {
            capacity,
            occupied: initial_occupied,
        })
    }

    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    pub fn occupied(&self) -> f64 {
        self.occupied
    }

    pub fn free_space(&self) -> f64 {
        self.capacity - self.occupied
    }

    /// Take `amount` of free space.
    ///
    /// The stored total is capped at `capacity`: reserving exactly `free_space()`
    /// may round one ulp past it.
    pub fn reserve(&mut self, amount: f64) -> DomainResult<()> {
        let amount = Quantity::new(amount)?.get();
        let free = self.free_space();
        if amount > free {
            return Err(DomainError::capacity_exceeded(amount, free));
        }
        self.occupied = (self.occupied + amount).min(self.capacity);
        Ok(())
    }

    /// Give back `amount` of occupied space.
    pub fn release(&mut self, amount: f64) -> DomainResult<()> {
        let amount = Quantity::new(amount)?.get();
        if amount > self.occupied {
            return Err(DomainError::insufficient_stock(amount, self.occupied));
        }
        self.occupied -= amount;
        Ok(())
    }

    /// Replace the capacity. Never shrinks below what is currently stored.
    pub fn set_capacity(&mut self, new_capacity: f64) -> DomainResult<()> {
        self.check_capacity(new_capacity)?;
        self.capacity = new_capacity;
        Ok(())
    }

    /// Overwrite the occupied total with an externally computed one, clamped
    /// to `0..=capacity`.
    pub(crate) fn settle(&mut self, occupied: f64) {
        self.occupied = occupied.clamp(0.0, self.capacity);
    }

    /// Check that `new_capacity` would be accepted by [`Self::set_capacity`].
    pub(crate) fn check_capacity(&self, new_capacity: f64) -> DomainResult<()> {
        let new_capacity = validate_capacity(new_capacity)?;
        if new_capacity < self.occupied {
            return Err(DomainError::invalid_argument(
                "cannot reduce capacity below current stock",
            ));
        }
        Ok(())
    }
}

/// Unvalidated wire shape; deserialization goes through [`CapacityLedger::with_occupied`].
#[derive(Deserialize)]
struct LedgerParts {
    capacity: f64,
    occupied: f64,
}

impl TryFrom<LedgerParts> for CapacityLedger {
    type Error = DomainError;

    fn try_from(parts: LedgerParts) -> Result<Self, Self::Error> {
        CapacityLedger::with_occupied(parts.capacity, parts.occupied)
    }
}

fn validate_capacity(capacity: f64) -> DomainResult<f64> {
    Quantity::new(capacity)
        .map(Quantity::get)
        .map_err(|_| DomainError::invalid_argument("capacity must be positive"))
}
