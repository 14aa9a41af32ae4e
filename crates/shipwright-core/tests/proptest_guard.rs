// shipwright-core/tests/proptest_guard.rs
// ============================================================================
// Module: Guard Property Tests
// Description: Property tests for prerequisite reporting.
// ============================================================================
//! ## Overview
//! For every subset of written steps and every target, a blocked response
//! lists exactly the absent predecessors, in plan order.

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

use std::collections::BTreeMap;

use common::value_for;
use proptest::prelude::proptest;
use proptest::prop_assert;
use proptest::prop_assert_eq;
use shipwright_core::PrerequisiteCheck;
use shipwright_core::StepId;
use shipwright_core::StepPlan;
use shipwright_core::check_prerequisites;

proptest! {
    #[test]
    fn blocked_lists_exactly_the_absent_predecessors(
        written in proptest::collection::vec(proptest::bool::ANY, 5),
        target_index in 0_usize..5,
    ) {
        let plan = StepPlan::default();
        let steps = plan.step_ids();
        let mut record = BTreeMap::new();
        for (index, write) in written.iter().enumerate() {
            if *write {
                record.insert(steps[index], value_for(steps[index]));
            }
        }
        let expected: Vec<StepId> = steps
            .iter()
            .take(target_index)
            .filter(|step| !record.contains_key(*step))
            .copied()
            .collect();
        match check_prerequisites(&plan, steps[target_index], &record) {
            PrerequisiteCheck::Satisfied => prop_assert!(expected.is_empty()),
            PrerequisiteCheck::Blocked(missing) => prop_assert_eq!(missing, expected),
        }
    }
}
