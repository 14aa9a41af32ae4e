// shipwright-core/tests/catalog_validation.rs
// ============================================================================
// Module: Catalog Validation Tests
// Description: Tests for carrier/service/label-size validation rules.
// ============================================================================
//! ## Overview
//! Validates case-insensitive, trimmed catalog matching and the rejection
//! messages for unsupported values.

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
use shipwright_core::StepId;
use shipwright_core::StepInput;
use shipwright_core::StepValue;
use shipwright_core::ValidationCatalog;
use shipwright_core::WizardEngine;
use shipwright_core::WizardError;

#[test]
fn catalog_lookups_ignore_case_and_whitespace() {
    let catalog = ValidationCatalog::default();
    assert!(catalog.is_valid_carrier("  ups "));
    assert!(catalog.is_valid_service("fedex", " overnight"));
    assert!(catalog.is_valid_label_size(" 4X6 "));
    assert!(!catalog.is_valid_carrier("DHL"));
    assert!(!catalog.is_valid_service("UPS", "Overnight"));
    assert!(!catalog.is_valid_label_size("8x10"));
}

#[test]
fn carrier_write_accepts_mixed_case_and_trims() {
    let engine = WizardEngine::default();
    let result = engine
        .write_step(StepInput::Carrier {
            carrier: " ups ".to_string(),
            service: " GROUND ".to_string(),
        })
        .expect("carrier write");
    assert_eq!(
        result.saved,
        StepValue::Carrier {
            carrier: "ups".to_string(),
            service: "GROUND".to_string(),
        }
    );
}

#[test]
fn unknown_carrier_is_rejected_with_the_supported_list() {
    let engine = WizardEngine::default();
    let err = engine
        .write_step(StepInput::Carrier {
            carrier: "DHL".to_string(),
            service: "Ground".to_string(),
        })
        .unwrap_err();
    match err {
        WizardError::Validation(message) => {
            assert!(message.contains("unsupported carrier"));
            assert!(message.contains("UPS"));
            assert!(message.contains("FedEx"));
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn service_must_match_the_selected_carrier() {
    let engine = WizardEngine::default();
    let err = engine
        .write_step(StepInput::Carrier {
            carrier: "UPS".to_string(),
            service: "Overnight".to_string(),
        })
        .unwrap_err();
    match err {
        WizardError::Validation(message) => {
            assert!(message.contains("unsupported service"));
            assert!(message.contains("Ground"));
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn blank_carrier_fields_are_rejected() {
    let engine = WizardEngine::default();
    let err = engine
        .write_step(StepInput::Carrier {
            carrier: "   ".to_string(),
            service: "Ground".to_string(),
        })
        .unwrap_err();
    assert!(matches!(err, WizardError::Validation(_)));
}

#[test]
fn label_size_outside_the_catalog_is_rejected() {
    let engine = WizardEngine::default();
    engine.write_step(input_for(StepId::Carrier)).expect("carrier write");
    engine.write_step(input_for(StepId::Options)).expect("options write");
    let err = engine
        .write_step(StepInput::Label {
            size: "8x10".to_string(),
        })
        .unwrap_err();
    assert!(matches!(err, WizardError::Validation(_)));
    // The failed write stored nothing.
    let status = engine.status().expect("status");
    assert_eq!(status.next_step, Some(StepId::Label));
}

#[test]
fn label_sizes_are_stored_lowercased() {
    let engine = WizardEngine::default();
    engine.write_step(input_for(StepId::Carrier)).expect("carrier write");
    engine.write_step(input_for(StepId::Options)).expect("options write");
    let result = engine
        .write_step(StepInput::Label {
            size: " 4X6 ".to_string(),
        })
        .expect("label write");
    assert_eq!(
        result.saved,
        StepValue::Label {
            size: "4x6".to_string(),
        }
    );
}

#[test]
fn blank_printer_and_notify_targets_are_rejected() {
    let engine = WizardEngine::default();
    engine.write_step(input_for(StepId::Carrier)).expect("carrier write");
    engine.write_step(input_for(StepId::Options)).expect("options write");
    engine.write_step(input_for(StepId::Label)).expect("label write");
    let err = engine
        .write_step(StepInput::Printer {
            printer: "  ".to_string(),
        })
        .unwrap_err();
    assert!(matches!(err, WizardError::Validation(_)));
    engine.write_step(input_for(StepId::Printer)).expect("printer write");
    let err = engine
        .write_step(StepInput::Notify {
            target: String::new(),
        })
        .unwrap_err();
    assert!(matches!(err, WizardError::Validation(_)));
}
