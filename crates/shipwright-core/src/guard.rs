// shipwright-core/src/guard.rs
// ============================================================================
// Module: Guard Engine
// Description: Prerequisite checks for step-ordered writes.
// Purpose: Block out-of-order writes and report the missing steps in order.
// Dependencies: crate::step
// ============================================================================

//! ## Overview
//! The guard engine decides whether a target step may be written given the
//! current record: every step ordered before it in the plan must already be
//! present. Ordering violations take precedence over value validation, so a
//! blocked caller is told which steps to write next instead of receiving
//! value-level errors for an operation it should not have called yet.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use crate::step::StepId;
use crate::step::StepPlan;
use crate::step::StepValue;

// ============================================================================
// SECTION: Prerequisite Check
// ============================================================================

/// Outcome of a prerequisite check for a target step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrerequisiteCheck {
    /// Every step ordered before the target is present in the record.
    Satisfied,
    /// Earlier steps are absent; listed in plan order.
    Blocked(Vec<StepId>),
}

/// Checks whether every step before `target` is present in the record.
///
/// The target must be a member of the plan; callers resolve unknown or
/// disabled steps before invoking the guard.
#[must_use]
pub fn check_prerequisites(
    plan: &StepPlan,
    target: StepId,
    record: &BTreeMap<StepId, StepValue>,
) -> PrerequisiteCheck {
    let mut missing = Vec::new();
    for step in plan.steps() {
        if step.id == target {
            break;
        }
        if !record.contains_key(&step.id) {
            missing.push(step.id);
        }
    }
    if missing.is_empty() {
        PrerequisiteCheck::Satisfied
    } else {
        PrerequisiteCheck::Blocked(missing)
    }
}
