// shipwright-core/src/commit.rs
// ============================================================================
// Module: Commit Controller
// Description: Two-phase finalize/confirm commit over the wizard state.
// Purpose: Gate the irreversible submit behind explicit re-confirmation.
// Dependencies: serde, crate::{state, status, step, time}
// ============================================================================

//! ## Overview
//! Finalize arms a complete configuration for a final yes/no confirmation;
//! confirm either seals it with a caller-supplied timestamp or cancels and
//! returns to the idle state. Commit is a sealing action, not a data
//! transform: the record is unchanged on commit and untouched on cancel.
//! Any successful step write while armed silently disarms, forcing the
//! caller to re-confirm the possibly different configuration.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

use crate::state::WizardState;
use crate::status::WizardStatus;
use crate::status::derive_status;
use crate::step::StepId;
use crate::step::StepPlan;
use crate::step::StepValue;
use crate::time::Timestamp;

// ============================================================================
// SECTION: Commit Payloads
// ============================================================================

/// Result of a successful finalize: the snapshot armed for confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalizeReceipt {
    /// Full set of stored step values for caller review.
    pub snapshot: BTreeMap<StepId, StepValue>,
    /// Always true after a successful finalize.
    pub awaiting_confirmation: bool,
}

/// Result of a confirm call on an armed configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ConfirmOutcome {
    /// The configuration was sealed.
    Committed {
        /// Final snapshot at commit time.
        snapshot: BTreeMap<StepId, StepValue>,
        /// Caller-supplied commit timestamp.
        committed_at: Timestamp,
    },
    /// The armed finalize was cancelled; the record is untouched.
    Cancelled,
}

// ============================================================================
// SECTION: Transitions
// ============================================================================

/// Outcome of a finalize attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FinalizeAttempt {
    /// The configuration was complete; the armed flag is now set.
    Armed(FinalizeReceipt),
    /// The configuration is incomplete; status explains what remains.
    Incomplete(WizardStatus),
}

/// Arms a complete configuration for confirmation.
///
/// Legal only when every plan step is present; otherwise the current status
/// payload is returned so the caller can resume the write sequence.
#[must_use]
pub fn finalize(plan: &StepPlan, state: &mut WizardState) -> FinalizeAttempt {
    let status = derive_status(plan, &state.record);
    if !status.ready {
        return FinalizeAttempt::Incomplete(status);
    }
    state.pending_confirmation = true;
    FinalizeAttempt::Armed(FinalizeReceipt {
        snapshot: status.snapshot,
        awaiting_confirmation: true,
    })
}

/// Consumes an armed finalize, committing or cancelling.
///
/// Returns `None` when no finalize is armed; confirm is meaningless without
/// a prior successful finalize.
#[must_use]
pub fn confirm(
    plan: &StepPlan,
    state: &mut WizardState,
    accept: bool,
    confirmed_at: Timestamp,
) -> Option<ConfirmOutcome> {
    if !state.pending_confirmation {
        return None;
    }
    state.pending_confirmation = false;
    if accept {
        let status = derive_status(plan, &state.record);
        Some(ConfirmOutcome::Committed {
            snapshot: status.snapshot,
            committed_at: confirmed_at,
        })
    } else {
        Some(ConfirmOutcome::Cancelled)
    }
}
