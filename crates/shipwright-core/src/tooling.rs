// shipwright-core/src/tooling.rs
// ============================================================================
// Module: Tooling Identifiers
// Description: Canonical MCP tool identifiers for Shipwright.
// Purpose: Shared tool naming across the core engine, server, and config.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Canonical tool identifiers used by the Shipwright MCP surface.
//! These names are part of the external contract surface.

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

/// Canonical tool names for the Shipwright MCP surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolName {
    /// Fetch the ordered step plan.
    PlanGet,
    /// List supported carriers, services, and label sizes.
    CatalogList,
    /// Fetch the choices for a single step.
    StepOptions,
    /// Fetch the next unfinished step and its choices.
    NextOptions,
    /// Write the carrier step.
    CarrierSet,
    /// Write the shipment options step.
    OptionsSet,
    /// Write the label step.
    LabelSet,
    /// Write the printer step.
    PrinterSet,
    /// Write the notification step.
    NotifySet,
    /// Fetch a read-only status snapshot.
    StatusGet,
    /// Arm the configuration for final confirmation.
    Finalize,
    /// Confirm or cancel an armed configuration.
    Confirm,
    /// Clear the configuration back to its empty state.
    Reset,
}

impl ToolName {
    /// Returns the canonical string name for the tool.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PlanGet => "plan_get",
            Self::CatalogList => "catalog_list",
            Self::StepOptions => "step_options",
            Self::NextOptions => "next_options",
            Self::CarrierSet => "carrier_set",
            Self::OptionsSet => "options_set",
            Self::LabelSet => "label_set",
            Self::PrinterSet => "printer_set",
            Self::NotifySet => "notify_set",
            Self::StatusGet => "status_get",
            Self::Finalize => "finalize",
            Self::Confirm => "confirm",
            Self::Reset => "reset",
        }
    }

    /// Returns all Shipwright tool names in canonical order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::PlanGet,
            Self::CatalogList,
            Self::StepOptions,
            Self::NextOptions,
            Self::CarrierSet,
            Self::OptionsSet,
            Self::LabelSet,
            Self::PrinterSet,
            Self::NotifySet,
            Self::StatusGet,
            Self::Finalize,
            Self::Confirm,
            Self::Reset,
        ]
    }

    /// Parses a tool name from its string representation.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "plan_get" => Some(Self::PlanGet),
            "catalog_list" => Some(Self::CatalogList),
            "step_options" => Some(Self::StepOptions),
            "next_options" => Some(Self::NextOptions),
            "carrier_set" => Some(Self::CarrierSet),
            "options_set" => Some(Self::OptionsSet),
            "label_set" => Some(Self::LabelSet),
            "printer_set" => Some(Self::PrinterSet),
            "notify_set" => Some(Self::NotifySet),
            "status_get" => Some(Self::StatusGet),
            "finalize" => Some(Self::Finalize),
            "confirm" => Some(Self::Confirm),
            "reset" => Some(Self::Reset),
            _ => None,
        }
    }
}

impl fmt::Display for ToolName {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}
