// crates/jsonmart-admission-core/src/runtime/store.rs
// ============================================================================
// Module: In-Memory Order Store
// Description: Simple in-memory order store for tests and demos.
// Purpose: Provide a deterministic store implementation without external
//          deps, including guarded compare-and-set updates.
// Dependencies: crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! This module provides a simple in-memory implementation of [`OrderStore`]
//! for tests and local demos. It honors the guarded-update contract so
//! concurrency tests exercise the same conflict paths a production backend
//! would produce. It is not intended for production use.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::Mutex;

use crate::core::DecisionTrace;
use crate::core::Order;
use crate::core::OrderId;
use crate::core::ProcurementStatus;
use crate::interfaces::OrderStore;
use crate::interfaces::StoreError;

// ============================================================================
// SECTION: In-Memory Store
// ============================================================================

/// One persisted order with its admission trace.
#[derive(Debug, Clone)]
struct StoredOrder {
    /// The order record.
    order: Order,
    /// The decision trace persisted at creation.
    trace: DecisionTrace,
}

/// In-memory order store for tests and demos.
#[derive(Debug, Default, Clone)]
pub struct InMemoryOrderStore {
    /// Order map protected by a mutex.
    orders: Arc<Mutex<BTreeMap<String, StoredOrder>>>,
}

impl InMemoryOrderStore {
    /// Creates a new in-memory order store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            orders: Arc::new(Mutex::new(BTreeMap::new())),
        }
    }
}

impl OrderStore for InMemoryOrderStore {
    fn create(&self, order: &Order, trace: &DecisionTrace) -> Result<(), StoreError> {
        let mut guard = self
            .orders
            .lock()
            .map_err(|_| StoreError::Store("order store mutex poisoned".to_string()))?;
        let key = order.order_id.as_str().to_string();
        if guard.contains_key(&key) {
            return Err(StoreError::AlreadyExists(key));
        }
        guard.insert(
            key,
            StoredOrder {
                order: order.clone(),
                trace: trace.clone(),
            },
        );
        Ok(())
    }

    fn load(&self, order_id: &OrderId) -> Result<Option<Order>, StoreError> {
        let guard = self
            .orders
            .lock()
            .map_err(|_| StoreError::Store("order store mutex poisoned".to_string()))?;
        Ok(guard.get(order_id.as_str()).map(|stored| stored.order.clone()))
    }

    fn load_trace(&self, order_id: &OrderId) -> Result<Option<DecisionTrace>, StoreError> {
        let guard = self
            .orders
            .lock()
            .map_err(|_| StoreError::Store("order store mutex poisoned".to_string()))?;
        Ok(guard.get(order_id.as_str()).map(|stored| stored.trace.clone()))
    }

    fn update_guarded(&self, order: &Order, expected_revision: u64) -> Result<(), StoreError> {
        let mut guard = self
            .orders
            .lock()
            .map_err(|_| StoreError::Store("order store mutex poisoned".to_string()))?;
        let key = order.order_id.as_str().to_string();
        let Some(stored) = guard.get_mut(&key) else {
            return Err(StoreError::Io(format!("order not found: {key}")));
        };
        if stored.order.revision != expected_revision {
            return Err(StoreError::Conflict(format!(
                "order {key}: expected revision {expected_revision}, found {}",
                stored.order.revision
            )));
        }
        stored.order = order.clone();
        Ok(())
    }

    fn list_pending(&self) -> Result<Vec<Order>, StoreError> {
        let guard = self
            .orders
            .lock()
            .map_err(|_| StoreError::Store("order store mutex poisoned".to_string()))?;
        Ok(guard
            .values()
            .filter(|stored| {
                stored.order.procurement_status == ProcurementStatus::ProcurementPending
            })
            .map(|stored| stored.order.clone())
            .collect())
    }
}

// ============================================================================
// SECTION: Shared Store Wrapper
// ============================================================================

/// Shared order store backed by an `Arc` trait object.
#[derive(Clone)]
pub struct SharedOrderStore {
    /// Inner store implementation.
    inner: Arc<dyn OrderStore + Send + Sync>,
}

impl SharedOrderStore {
    /// Wraps an order store in a shared, clonable wrapper.
    #[must_use]
    pub fn from_store(store: impl OrderStore + Send + Sync + 'static) -> Self {
        Self {
            inner: Arc::new(store),
        }
    }

    /// Wraps an existing shared store.
    #[must_use]
    pub const fn new(store: Arc<dyn OrderStore + Send + Sync>) -> Self {
        Self {
            inner: store,
        }
    }
}

impl OrderStore for SharedOrderStore {
    fn create(&self, order: &Order, trace: &DecisionTrace) -> Result<(), StoreError> {
        self.inner.create(order, trace)
    }

    fn load(&self, order_id: &OrderId) -> Result<Option<Order>, StoreError> {
        self.inner.load(order_id)
    }

    fn load_trace(&self, order_id: &OrderId) -> Result<Option<DecisionTrace>, StoreError> {
        self.inner.load_trace(order_id)
    }

    fn update_guarded(&self, order: &Order, expected_revision: u64) -> Result<(), StoreError> {
        self.inner.update_guarded(order, expected_revision)
    }

    fn list_pending(&self) -> Result<Vec<Order>, StoreError> {
        self.inner.list_pending()
    }
}
