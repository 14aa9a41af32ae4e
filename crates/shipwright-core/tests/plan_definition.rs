// shipwright-core/tests/plan_definition.rs
// ============================================================================
// Module: Plan Definition Tests
// Description: Tests for step plan construction and enabled-step lookups.
// ============================================================================
//! ## Overview
//! Validates that plan definition errors fail at construction and that
//! disabled steps are rejected as unknown at call time.

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

use common::input_for;
use shipwright_core::PlanError;
use shipwright_core::StepId;
use shipwright_core::StepPlan;
use shipwright_core::ValidationCatalog;
use shipwright_core::WizardEngine;
use shipwright_core::WizardError;

#[test]
fn empty_plans_are_rejected_at_construction() {
    assert_eq!(StepPlan::new(&[]).unwrap_err(), PlanError::Empty);
}

#[test]
fn duplicate_steps_are_rejected_at_construction() {
    let err = StepPlan::new(&[StepId::Carrier, StepId::Label, StepId::Carrier]).unwrap_err();
    assert_eq!(err, PlanError::Duplicate(StepId::Carrier));
}

#[test]
fn the_default_plan_enables_every_step_in_canonical_order() {
    let plan = StepPlan::default();
    assert_eq!(plan.step_ids(), StepId::all().to_vec());
}

#[test]
fn plans_preserve_the_configured_order() {
    let plan = StepPlan::new(&[StepId::Carrier, StepId::Label, StepId::Notify]).expect("plan");
    assert_eq!(plan.step_ids(), vec![StepId::Carrier, StepId::Label, StepId::Notify]);
    assert_eq!(plan.position(StepId::Notify), Some(2));
    assert_eq!(plan.position(StepId::Printer), None);
}

#[test]
fn step_definitions_carry_tool_and_input_fields() {
    let plan = StepPlan::default();
    let carrier = &plan.steps()[0];
    assert_eq!(carrier.id, StepId::Carrier);
    assert_eq!(carrier.tool.as_str(), "carrier_set");
    assert_eq!(carrier.inputs, vec!["carrier".to_string(), "service".to_string()]);
}

#[test]
fn disabled_steps_are_unknown_at_call_time() {
    let plan = StepPlan::new(&[StepId::Carrier, StepId::Label]).expect("plan");
    let engine = WizardEngine::new(plan, ValidationCatalog::default());
    let err = engine.write_step(input_for(StepId::Printer)).unwrap_err();
    assert!(matches!(err, WizardError::UnknownStep(_)));
    let err = engine.step_options("printer").unwrap_err();
    assert!(matches!(err, WizardError::UnknownStep(_)));
}

#[test]
fn step_options_rejects_identifiers_outside_the_step_set() {
    let engine = WizardEngine::default();
    let err = engine.step_options("payment").unwrap_err();
    match err {
        WizardError::UnknownStep(name) => assert_eq!(name, "payment"),
        other => panic!("expected unknown step, got {other:?}"),
    }
}
