// shipwright-mcp/src/contract.rs
// ============================================================================
// Module: MCP Tool Contracts
// Description: Canonical tool definitions and input schemas for Shipwright.
// Purpose: Drive the tools/list surface from one deterministic source.
// Dependencies: serde, serde_json, shipwright-core
// ============================================================================

//! ## Overview
//! This module defines the canonical MCP tool surface. Definitions for step
//! write tools are derived from the configured step plan, so a disabled step
//! never appears in the listing. Schemas are strict: unknown fields are
//! rejected and required fields are explicit.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;
use serde_json::Value;
use serde_json::json;
use shipwright_core::StepId;
use shipwright_core::StepPlan;
use shipwright_core::ToolName;

// ============================================================================
// SECTION: Tool Definitions
// ============================================================================

/// Tool definition shape used by MCP tool listings.
#[derive(Debug, Clone, Serialize)]
pub struct ToolDefinition {
    /// Canonical tool name.
    pub name: ToolName,
    /// Human-readable tool description.
    pub description: String,
    /// JSON schema for the tool input payload.
    pub input_schema: Value,
}

/// Returns the tool definitions for the configured plan.
///
/// The order is intentional: discovery tools first, then the enabled step
/// write tools in plan order, then status and commit tools.
#[must_use]
pub fn tool_definitions(plan: &StepPlan) -> Vec<ToolDefinition> {
    let mut definitions = vec![
        ToolDefinition {
            name: ToolName::PlanGet,
            description: "Return the ordered configuration steps and the tool that writes each."
                .to_string(),
            input_schema: empty_schema(),
        },
        ToolDefinition {
            name: ToolName::CatalogList,
            description: "List supported carriers, services, and label sizes.".to_string(),
            input_schema: empty_schema(),
        },
        ToolDefinition {
            name: ToolName::StepOptions,
            description: "Return the choices for a single configuration step.".to_string(),
            input_schema: object_schema(
                &json!({
                    "step_id": text_schema("Step identifier, e.g. carrier or label.")
                }),
                &["step_id"],
            ),
        },
        ToolDefinition {
            name: ToolName::NextOptions,
            description: "Return the next unfinished step with its choices, or completion."
                .to_string(),
            input_schema: empty_schema(),
        },
    ];
    for step in plan.step_ids() {
        definitions.push(step_tool_definition(step));
    }
    definitions.push(ToolDefinition {
        name: ToolName::StatusGet,
        description: "Return completed steps, the next step, and the full snapshot.".to_string(),
        input_schema: empty_schema(),
    });
    definitions.push(ToolDefinition {
        name: ToolName::Finalize,
        description: "Arm a complete configuration for final confirmation and return the \
                      snapshot for review."
            .to_string(),
        input_schema: empty_schema(),
    });
    definitions.push(ToolDefinition {
        name: ToolName::Confirm,
        description: "Confirm (commit) or cancel a configuration armed by finalize.".to_string(),
        input_schema: object_schema(
            &json!({
                "accept": {
                    "type": "boolean",
                    "description": "True commits the configuration; false cancels."
                },
                "confirmed_at": {
                    "type": ["object", "null"],
                    "description": "Optional caller-supplied commit timestamp; stamped by the \
                                    server when omitted."
                }
            }),
            &["accept"],
        ),
    });
    definitions.push(ToolDefinition {
        name: ToolName::Reset,
        description: "Clear the configuration and any pending confirmation.".to_string(),
        input_schema: empty_schema(),
    });
    definitions
}

/// Builds the write tool definition for one step.
fn step_tool_definition(step: StepId) -> ToolDefinition {
    let (description, schema) = match step {
        StepId::Carrier => (
            "Set the carrier and service for the shipment.",
            object_schema(
                &json!({
                    "carrier": text_schema("Carrier name from the catalog."),
                    "service": text_schema("Service name supported by the carrier.")
                }),
                &["carrier", "service"],
            ),
        ),
        StepId::Options => (
            "Set the shipment options.",
            object_schema(
                &json!({
                    "insurance": {
                        "type": "boolean",
                        "description": "Whether insurance is required."
                    }
                }),
                &["insurance"],
            ),
        ),
        StepId::Label => (
            "Set the label size.",
            object_schema(
                &json!({
                    "size": text_schema("Label size from the catalog, e.g. 4x6.")
                }),
                &["size"],
            ),
        ),
        StepId::Printer => (
            "Set the printer used for label output.",
            object_schema(
                &json!({
                    "printer": text_schema("Printer name; free-form, non-empty.")
                }),
                &["printer"],
            ),
        ),
        StepId::Notify => (
            "Set the notification target for shipment updates.",
            object_schema(
                &json!({
                    "target": text_schema("Notification target; free-form, non-empty.")
                }),
                &["target"],
            ),
        ),
    };
    ToolDefinition {
        name: step.tool(),
        description: description.to_string(),
        input_schema: schema,
    }
}

// ============================================================================
// SECTION: Schema Helpers
// ============================================================================

/// Builds a strict object schema with the given properties.
fn object_schema(properties: &Value, required: &[&str]) -> Value {
    json!({
        "type": "object",
        "properties": properties,
        "required": required,
        "additionalProperties": false
    })
}

/// Builds a schema for a tool that accepts no input fields.
fn empty_schema() -> Value {
    json!({
        "type": "object",
        "properties": {},
        "additionalProperties": false
    })
}

/// Builds a described string schema.
fn text_schema(description: &str) -> Value {
    json!({
        "type": "string",
        "description": description
    })
}
