// shipwright-core/tests/status_engine.rs
// ============================================================================
// Module: Status Engine Tests
// Description: Tests for status derivation and purity.
// ============================================================================
//! ## Overview
//! Validates that status is a pure function of the record and reports the
//! next step, completed steps, and readiness correctly at every stage.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

mod common;

use common::complete_wizard;
use common::input_for;
use shipwright_core::StepId;
use shipwright_core::StepPlan;
use shipwright_core::ValidationCatalog;
use shipwright_core::WizardEngine;

#[test]
fn empty_record_points_at_first_step() {
    let engine = WizardEngine::default();
    let status = engine.status().expect("status");
    assert!(status.completed.is_empty());
    assert_eq!(status.next_step, Some(StepId::Carrier));
    assert!(!status.ready);
    assert!(status.snapshot.is_empty());
}

#[test]
fn status_is_pure_between_writes() {
    let engine = WizardEngine::default();
    engine.write_step(input_for(StepId::Carrier)).expect("carrier write");
    let first = engine.status().expect("status");
    let second = engine.status().expect("status");
    assert_eq!(first, second);
}

#[test]
fn next_step_advances_in_plan_order() {
    let engine = WizardEngine::default();
    engine.write_step(input_for(StepId::Carrier)).expect("carrier write");
    let status = engine.status().expect("status");
    assert_eq!(status.completed, vec![StepId::Carrier]);
    assert_eq!(status.next_step, Some(StepId::Options));
    assert!(!status.ready);
}

#[test]
fn two_step_plan_reports_label_after_carrier() {
    let plan = StepPlan::new(&[StepId::Carrier, StepId::Label]).expect("plan");
    let engine = WizardEngine::new(plan, ValidationCatalog::default());
    engine.write_step(input_for(StepId::Carrier)).expect("carrier write");
    let status = engine.status().expect("status");
    assert_eq!(status.next_step, Some(StepId::Label));
}

#[test]
fn full_record_is_ready_with_no_next_step() {
    let engine = WizardEngine::default();
    complete_wizard(&engine);
    let status = engine.status().expect("status");
    assert_eq!(status.completed, engine.plan().step_ids());
    assert_eq!(status.next_step, None);
    assert!(status.ready);
    assert_eq!(status.snapshot.len(), engine.plan().len());
}

#[test]
fn reset_returns_to_the_empty_baseline() {
    let engine = WizardEngine::default();
    complete_wizard(&engine);
    engine.reset().expect("reset");
    let status = engine.status().expect("status");
    assert!(status.completed.is_empty());
    assert_eq!(status.next_step, Some(StepId::Carrier));
    assert!(!status.ready);
}
