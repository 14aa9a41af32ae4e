// shipwright-core/tests/commit_flow.rs
// ============================================================================
// Module: Commit Flow Tests
// Description: Tests for the finalize/confirm two-phase commit.
// ============================================================================
//! ## Overview
//! Validates the commit state machine: arming requires completeness, writes
//! disarm, cancel preserves the record, and commit seals the snapshot.

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
use common::value_for;
use shipwright_core::ConfirmOutcome;
use shipwright_core::StepId;
use shipwright_core::StepInput;
use shipwright_core::Timestamp;
use shipwright_core::WizardEngine;
use shipwright_core::WizardError;

#[test]
fn finalize_before_completion_reports_missing_steps() {
    let engine = WizardEngine::default();
    engine.write_step(input_for(StepId::Carrier)).expect("carrier write");
    let err = engine.finalize().unwrap_err();
    match err {
        WizardError::IncompleteConfiguration {
            status,
        } => {
            assert_eq!(status.next_step, Some(StepId::Options));
            assert!(!status.ready);
        }
        other => panic!("expected incomplete error, got {other:?}"),
    }
}

#[test]
fn finalize_succeeds_only_when_ready() {
    let engine = WizardEngine::default();
    complete_wizard(&engine);
    let receipt = engine.finalize().expect("finalize");
    assert!(receipt.awaiting_confirmation);
    assert_eq!(receipt.snapshot.len(), engine.plan().len());
}

#[test]
fn commit_seals_the_written_snapshot() {
    let engine = WizardEngine::default();
    complete_wizard(&engine);
    engine.finalize().expect("finalize");
    let outcome = engine.confirm(true, Timestamp::UnixMillis(1_735_000_000_000)).expect("confirm");
    match outcome {
        ConfirmOutcome::Committed {
            snapshot,
            committed_at,
        } => {
            assert_eq!(committed_at, Timestamp::UnixMillis(1_735_000_000_000));
            for step in engine.plan().step_ids() {
                assert_eq!(snapshot.get(&step), Some(&value_for(step)));
            }
        }
        ConfirmOutcome::Cancelled => panic!("expected commit"),
    }
}

#[test]
fn two_step_round_trip_commits_the_union_of_written_values() {
    let plan = shipwright_core::StepPlan::new(&[StepId::Carrier, StepId::Label]).expect("plan");
    let engine = WizardEngine::new(plan, shipwright_core::ValidationCatalog::default());
    engine.write_step(input_for(StepId::Carrier)).expect("carrier write");
    engine.write_step(input_for(StepId::Label)).expect("label write");
    engine.finalize().expect("finalize");
    let outcome = engine.confirm(true, Timestamp::Logical(7)).expect("confirm");
    match outcome {
        ConfirmOutcome::Committed {
            snapshot,
            ..
        } => {
            assert_eq!(snapshot.len(), 2);
            assert_eq!(snapshot.get(&StepId::Carrier), Some(&value_for(StepId::Carrier)));
            assert_eq!(snapshot.get(&StepId::Label), Some(&value_for(StepId::Label)));
        }
        ConfirmOutcome::Cancelled => panic!("expected commit"),
    }
}

#[test]
fn confirm_without_finalize_fails() {
    let engine = WizardEngine::default();
    complete_wizard(&engine);
    let err = engine.confirm(true, Timestamp::Logical(1)).unwrap_err();
    assert!(matches!(err, WizardError::NoPendingConfirmation));
}

#[test]
fn cancel_preserves_the_record_and_allows_a_new_finalize() {
    let engine = WizardEngine::default();
    complete_wizard(&engine);
    engine.finalize().expect("finalize");
    let outcome = engine.confirm(false, Timestamp::Logical(1)).expect("confirm");
    assert_eq!(outcome, ConfirmOutcome::Cancelled);
    let status = engine.status().expect("status");
    assert!(status.ready);
    // The same complete record arms again.
    assert!(engine.finalize().is_ok());
}

#[test]
fn a_write_while_armed_disarms_the_confirmation() {
    let engine = WizardEngine::default();
    complete_wizard(&engine);
    engine.finalize().expect("finalize");
    engine
        .write_step(StepInput::Notify {
            target: "dock@example.com".to_string(),
        })
        .expect("notify rewrite");
    let err = engine.confirm(true, Timestamp::Logical(2)).unwrap_err();
    assert!(matches!(err, WizardError::NoPendingConfirmation));
}

#[test]
fn confirm_consumes_the_armed_flag() {
    let engine = WizardEngine::default();
    complete_wizard(&engine);
    engine.finalize().expect("finalize");
    engine.confirm(true, Timestamp::Logical(1)).expect("confirm");
    let err = engine.confirm(true, Timestamp::Logical(2)).unwrap_err();
    assert!(matches!(err, WizardError::NoPendingConfirmation));
}

#[test]
fn reset_disarms_a_pending_finalize() {
    let engine = WizardEngine::default();
    complete_wizard(&engine);
    engine.finalize().expect("finalize");
    engine.reset().expect("reset");
    let err = engine.confirm(true, Timestamp::Logical(1)).unwrap_err();
    assert!(matches!(err, WizardError::NoPendingConfirmation));
}
