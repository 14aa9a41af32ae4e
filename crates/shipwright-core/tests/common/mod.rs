// shipwright-core/tests/common/mod.rs
// ============================================================================
// Module: Core Test Helpers
// Description: Shared fixtures for wizard engine tests.
// ============================================================================
//! ## Overview
//! Helpers for driving the wizard engine through complete write sequences.

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
    dead_code,
    reason = "Test-only helpers shared across integration test binaries."
)]

use shipwright_core::StepId;
use shipwright_core::StepInput;
use shipwright_core::StepValue;
use shipwright_core::WizardEngine;

/// Returns a valid input for the given step.
pub fn input_for(step: StepId) -> StepInput {
    match step {
        StepId::Carrier => StepInput::Carrier {
            carrier: "UPS".to_string(),
            service: "Ground".to_string(),
        },
        StepId::Options => StepInput::Options {
            insurance: true,
        },
        StepId::Label => StepInput::Label {
            size: "4x6".to_string(),
        },
        StepId::Printer => StepInput::Printer {
            printer: "dock-zebra-1".to_string(),
        },
        StepId::Notify => StepInput::Notify {
            target: "ops@example.com".to_string(),
        },
    }
}

/// Returns the stored value the engine produces for `input_for(step)`.
pub fn value_for(step: StepId) -> StepValue {
    match step {
        StepId::Carrier => StepValue::Carrier {
            carrier: "UPS".to_string(),
            service: "Ground".to_string(),
        },
        StepId::Options => StepValue::Options {
            insurance: true,
        },
        StepId::Label => StepValue::Label {
            size: "4x6".to_string(),
        },
        StepId::Printer => StepValue::Printer {
            printer: "dock-zebra-1".to_string(),
        },
        StepId::Notify => StepValue::Notify {
            target: "ops@example.com".to_string(),
        },
    }
}

/// Writes every plan step of the engine in order with valid inputs.
pub fn complete_wizard(engine: &WizardEngine) {
    for step in engine.plan().step_ids() {
        engine.write_step(input_for(step)).expect("step write");
    }
}
