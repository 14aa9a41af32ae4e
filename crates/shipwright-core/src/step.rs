// shipwright-core/src/step.rs
// ============================================================================
// Module: Step Model
// Description: Step identifiers, step values, and the ordered step plan.
// Purpose: Define the checklist order that drives guarding and completeness.
// Dependencies: serde, crate::tooling
// ============================================================================

//! ## Overview
//! This module defines the closed set of wizard steps, the typed values a
//! completed step stores, and [`StepPlan`] — the ordered, immutable list of
//! enabled steps. Which steps are enabled and in what order is configuration
//! data; the plan is validated once at startup and never mutated afterwards.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::tooling::ToolName;

// ============================================================================
// SECTION: Step Identifiers
// ============================================================================

/// Canonical identifiers for the wizard steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepId {
    /// Carrier and service selection.
    Carrier,
    /// Shipment options (insurance).
    Options,
    /// Label size selection.
    Label,
    /// Printer selection.
    Printer,
    /// Notification target.
    Notify,
}

impl StepId {
    /// Returns the canonical string form of the step identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Carrier => "carrier",
            Self::Options => "options",
            Self::Label => "label",
            Self::Printer => "printer",
            Self::Notify => "notify",
        }
    }

    /// Returns every step identifier in canonical checklist order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Carrier, Self::Options, Self::Label, Self::Printer, Self::Notify]
    }

    /// Parses a step identifier from its string representation.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "carrier" => Some(Self::Carrier),
            "options" => Some(Self::Options),
            "label" => Some(Self::Label),
            "printer" => Some(Self::Printer),
            "notify" => Some(Self::Notify),
            _ => None,
        }
    }

    /// Returns the tool that writes this step.
    #[must_use]
    pub const fn tool(self) -> ToolName {
        match self {
            Self::Carrier => ToolName::CarrierSet,
            Self::Options => ToolName::OptionsSet,
            Self::Label => ToolName::LabelSet,
            Self::Printer => ToolName::PrinterSet,
            Self::Notify => ToolName::NotifySet,
        }
    }

    /// Returns the input field names the step's write tool accepts.
    #[must_use]
    pub const fn input_fields(self) -> &'static [&'static str] {
        match self {
            Self::Carrier => &["carrier", "service"],
            Self::Options => &["insurance"],
            Self::Label => &["size"],
            Self::Printer => &["printer"],
            Self::Notify => &["target"],
        }
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Step Values
// ============================================================================

/// Validated, normalized value stored for a completed step.
///
/// # Invariants
/// - A value is only ever constructed after its inputs passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum StepValue {
    /// Carrier and service selection.
    Carrier {
        /// Selected carrier name, trimmed, as given by the caller.
        carrier: String,
        /// Selected service name, trimmed, as given by the caller.
        service: String,
    },
    /// Shipment options.
    Options {
        /// Whether insurance is required.
        insurance: bool,
    },
    /// Label size selection.
    Label {
        /// Selected label size, trimmed and lowercased.
        size: String,
    },
    /// Printer selection.
    Printer {
        /// Selected printer name, trimmed.
        printer: String,
    },
    /// Notification target.
    Notify {
        /// Notification target, trimmed.
        target: String,
    },
}

impl StepValue {
    /// Returns the step this value belongs to.
    #[must_use]
    pub const fn step_id(&self) -> StepId {
        match self {
            Self::Carrier {
                ..
            } => StepId::Carrier,
            Self::Options {
                ..
            } => StepId::Options,
            Self::Label {
                ..
            } => StepId::Label,
            Self::Printer {
                ..
            } => StepId::Printer,
            Self::Notify {
                ..
            } => StepId::Notify,
        }
    }
}

// ============================================================================
// SECTION: Step Plan
// ============================================================================

/// Definition of one step in the plan: identifier, write tool, and inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepDefinition {
    /// Step identifier.
    pub id: StepId,
    /// Tool that writes the step.
    pub tool: ToolName,
    /// Input field names the write tool accepts.
    pub inputs: Vec<String>,
}

impl StepDefinition {
    /// Builds the definition for a step identifier.
    #[must_use]
    pub fn for_step(id: StepId) -> Self {
        Self {
            id,
            tool: id.tool(),
            inputs: id.input_fields().iter().map(|field| (*field).to_string()).collect(),
        }
    }
}

/// Ordered, immutable list of enabled steps.
///
/// # Invariants
/// - The plan is non-empty and contains no duplicate step identifiers.
/// - The order is fixed at construction and never changes at runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepPlan {
    /// Step definitions in checklist order.
    steps: Vec<StepDefinition>,
}

impl StepPlan {
    /// Builds a plan from an ordered list of step identifiers.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError`] when the list is empty or contains duplicates.
    /// Plan construction failures are definition bugs and should abort
    /// startup rather than surface at call time.
    pub fn new(order: &[StepId]) -> Result<Self, PlanError> {
        if order.is_empty() {
            return Err(PlanError::Empty);
        }
        let mut steps = Vec::with_capacity(order.len());
        for id in order {
            if steps.iter().any(|step: &StepDefinition| step.id == *id) {
                return Err(PlanError::Duplicate(*id));
            }
            steps.push(StepDefinition::for_step(*id));
        }
        Ok(Self {
            steps,
        })
    }

    /// Returns the step definitions in checklist order.
    #[must_use]
    pub fn steps(&self) -> &[StepDefinition] {
        &self.steps
    }

    /// Returns the step identifiers in checklist order.
    #[must_use]
    pub fn step_ids(&self) -> Vec<StepId> {
        self.steps.iter().map(|step| step.id).collect()
    }

    /// Returns the position of a step in the plan, when enabled.
    #[must_use]
    pub fn position(&self, id: StepId) -> Option<usize> {
        self.steps.iter().position(|step| step.id == id)
    }

    /// Returns whether the plan enables a step.
    #[must_use]
    pub fn contains(&self, id: StepId) -> bool {
        self.position(id).is_some()
    }

    /// Returns the number of enabled steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns whether the plan is empty. Always false for a valid plan.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl Default for StepPlan {
    fn default() -> Self {
        Self {
            steps: StepId::all().iter().map(|id| StepDefinition::for_step(*id)).collect(),
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Step plan definition errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlanError {
    /// The plan contains no steps.
    #[error("step plan contains no steps")]
    Empty,
    /// A step identifier appears more than once.
    #[error("duplicate step in plan: {0}")]
    Duplicate(StepId),
}
