// shipwright-core/src/status.rs
// ============================================================================
// Module: Status Engine
// Description: Read-only status derivation from the configuration record.
// Purpose: Summarize done steps, the next step, and completeness.
// Dependencies: serde, crate::step
// ============================================================================

//! ## Overview
//! Status is a pure function of the step plan and the configuration record:
//! no mutation, no failure. An empty record yields the first plan step as
//! `next_step` and `ready == false`; a full record yields `ready == true`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

use crate::step::StepId;
use crate::step::StepPlan;
use crate::step::StepValue;

// ============================================================================
// SECTION: Status Payload
// ============================================================================

/// Read-only summary of the wizard's progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardStatus {
    /// Completed step identifiers in plan order.
    pub completed: Vec<StepId>,
    /// First plan step absent from the record, when any remain.
    pub next_step: Option<StepId>,
    /// Whether every plan step is present.
    pub ready: bool,
    /// Stored values for all completed steps, keyed by step identifier.
    pub snapshot: BTreeMap<StepId, StepValue>,
}

/// Derives the current status from the plan and the record.
#[must_use]
pub fn derive_status(plan: &StepPlan, record: &BTreeMap<StepId, StepValue>) -> WizardStatus {
    let mut completed = Vec::new();
    let mut next_step = None;
    for step in plan.steps() {
        if record.contains_key(&step.id) {
            completed.push(step.id);
        } else if next_step.is_none() {
            next_step = Some(step.id);
        }
    }
    let snapshot: BTreeMap<StepId, StepValue> = plan
        .steps()
        .iter()
        .filter_map(|step| record.get(&step.id).map(|value| (step.id, value.clone())))
        .collect();
    WizardStatus {
        completed,
        next_step,
        ready: next_step.is_none(),
        snapshot,
    }
}
