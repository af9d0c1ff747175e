//! Per-key async mutual exclusion.
//!
//! Assignment rules read one entity and write another, so two requests for
//! the same car must not interleave between the availability check and the
//! save. [`KeyedLocks`] hands out one async mutex per key; holders of the
//! same key queue, different keys proceed in parallel.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use super::car::CarId;
use super::driver::DriverId;

/// Table of lazily created async mutexes keyed by `K`.
#[derive(Debug)]
pub struct KeyedLocks<K> {
    slots: Mutex<HashMap<K, Arc<AsyncMutex<()>>>>,
}

impl<K> Default for KeyedLocks<K> {
    fn default() -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
        }
    }
}

impl<K> KeyedLocks<K>
where
    K: Eq + Hash + Clone,
{
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `key`. Access ends when the guard drops.
    pub async fn lock(&self, key: &K) -> OwnedMutexGuard<()> {
        let slot = {
            let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
            // Slots only referenced by the table have no holder or waiter.
            slots.retain(|_, slot| Arc::strong_count(slot) > 1);
            Arc::clone(slots.entry(key.clone()).or_default())
        };
        slot.lock_owned().await
    }

    /// Number of keys currently held or awaited.
    pub fn active_keys(&self) -> usize {
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .filter(|slot| Arc::strong_count(slot) > 1)
            .count()
    }
}

/// Lock tables shared by the driver and car services.
///
/// Work that needs both a car and a driver takes the car lock first.
#[derive(Debug, Default)]
pub struct FleetLocks {
    /// Per-car locks. Always taken before driver locks.
    pub cars: KeyedLocks<CarId>,
    /// Per-driver locks.
    pub drivers: KeyedLocks<DriverId>,
}

impl FleetLocks {
    /// Create empty car and driver tables.
    pub fn new() -> Self {
        Self::default()
    }
}
