// shipwright-core/src/state.rs
// ============================================================================
// Module: Configuration Store
// Description: Mutable wizard state behind a single mutual-exclusion lock.
// Purpose: Keep step writes and the pending-confirmation flag consistent.
// Dependencies: crate::step, thiserror
// ============================================================================

//! ## Overview
//! This module holds the single mutable configuration record and the
//! pending-confirmation flag. One mutex covers the whole record so that
//! completeness checks observe a consistent snapshot across all step keys.
//! Lock hold times are bounded: no operation performs I/O under the lock.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;

use thiserror::Error;

use crate::step::StepId;
use crate::step::StepValue;

// ============================================================================
// SECTION: Wizard State
// ============================================================================

/// Mutable wizard state: the configuration record plus the armed flag.
///
/// # Invariants
/// - A key is present in `record` only if its value passed validation at write time.
/// - Any write to any step clears `pending_confirmation`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct WizardState {
    /// Step values written so far, keyed by step identifier.
    pub record: BTreeMap<StepId, StepValue>,
    /// Whether a finalize is armed and awaiting confirmation.
    pub pending_confirmation: bool,
}

impl WizardState {
    /// Writes a validated step value, overwriting any prior value.
    ///
    /// Overwrites do not cascade-invalidate later steps, but any write
    /// disarms a previously armed finalize: the configuration may have
    /// changed and must be re-confirmed.
    pub fn write(&mut self, value: StepValue) {
        self.pending_confirmation = false;
        self.record.insert(value.step_id(), value);
    }

    /// Clears the record and the armed flag back to the empty state.
    pub fn clear(&mut self) {
        self.pending_confirmation = false;
        self.record.clear();
    }
}

// ============================================================================
// SECTION: In-Memory Store
// ============================================================================

/// In-memory configuration store shared across operation handlers.
#[derive(Debug, Default, Clone)]
pub struct ConfigStore {
    /// Wizard state protected by a mutex.
    state: Arc<Mutex<WizardState>>,
}

impl ConfigStore {
    /// Creates a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(WizardState::default())),
        }
    }

    /// Locks the wizard state for one read-modify-write operation.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the mutex is poisoned.
    pub fn lock(&self) -> Result<MutexGuard<'_, WizardState>, StoreError> {
        self.state.lock().map_err(|_| StoreError::Store("config store mutex poisoned".to_string()))
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Store access failed.
    #[error("store error: {0}")]
    Store(String),
}
