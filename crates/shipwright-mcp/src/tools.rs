// shipwright-mcp/src/tools.rs
// ============================================================================
// Module: MCP Tool Router
// Description: Tool routing for the Shipwright MCP server.
// Purpose: Expose thin wrappers over the wizard engine.
// Dependencies: serde_json, shipwright-config, shipwright-core
// ============================================================================

//! ## Overview
//! The tool router dispatches MCP tool calls to the wizard engine. All tool
//! handlers are thin wrappers over [`shipwright_core::WizardEngine`]: they
//! decode typed requests, invoke the engine, and convert engine errors into
//! structured tool errors. Tool inputs are untrusted and validated before
//! any state is touched.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::net::IpAddr;
use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use shipwright_config::ServerTransport;
use shipwright_core::StepDefinition;
use shipwright_core::StepId;
use shipwright_core::StepInput;
use shipwright_core::Timestamp;
use shipwright_core::ToolName;
use shipwright_core::WizardEngine;
use shipwright_core::WizardError;
use shipwright_core::WizardStatus;
use thiserror::Error;

use crate::audit::AuditSink;
use crate::audit::ToolAuditEvent;
use crate::audit::ToolOutcome;
use crate::audit::now_unix_millis;
pub use crate::contract::ToolDefinition;
use crate::contract::tool_definitions;

// ============================================================================
// SECTION: Request Context
// ============================================================================

/// Per-request metadata used for audit events.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Transport that carried the request.
    pub transport: ServerTransport,
    /// Peer IP address when available.
    pub peer_ip: Option<IpAddr>,
    /// Request identifier when provided.
    pub request_id: Option<String>,
}

impl RequestContext {
    /// Builds a context for the stdio transport.
    #[must_use]
    pub const fn stdio() -> Self {
        Self {
            transport: ServerTransport::Stdio,
            peer_ip: None,
            request_id: None,
        }
    }

    /// Builds a context for the HTTP transport.
    #[must_use]
    pub const fn http(peer_ip: Option<IpAddr>) -> Self {
        Self {
            transport: ServerTransport::Http,
            peer_ip,
            request_id: None,
        }
    }

    /// Attaches the JSON-RPC request identifier.
    #[must_use]
    pub fn with_request_id(mut self, request_id: String) -> Self {
        self.request_id = Some(request_id);
        self
    }
}

// ============================================================================
// SECTION: Tool Requests
// ============================================================================

/// Request payload for `step_options`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct StepOptionsRequest {
    /// Step identifier to describe.
    step_id: String,
}

/// Request payload for `carrier_set`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CarrierSetRequest {
    /// Requested carrier name.
    carrier: String,
    /// Requested service name.
    service: String,
}

/// Request payload for `options_set`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct OptionsSetRequest {
    /// Whether insurance is required.
    insurance: bool,
}

/// Request payload for `label_set`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LabelSetRequest {
    /// Requested label size.
    size: String,
}

/// Request payload for `printer_set`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PrinterSetRequest {
    /// Requested printer name.
    printer: String,
}

/// Request payload for `notify_set`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct NotifySetRequest {
    /// Requested notification target.
    target: String,
}

/// Request payload for `confirm`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfirmRequest {
    /// True commits the configuration; false cancels.
    accept: bool,
    /// Optional caller-supplied commit timestamp.
    confirmed_at: Option<Timestamp>,
}

// ============================================================================
// SECTION: Tool Responses
// ============================================================================

/// Response payload for `plan_get`.
#[derive(Debug, Serialize)]
pub struct PlanGetResponse {
    /// Ordered step definitions.
    pub steps: Vec<StepDefinition>,
}

/// Response payload for `catalog_list`.
#[derive(Debug, Serialize)]
pub struct CatalogListResponse {
    /// Carrier names mapped to their supported services.
    pub carriers: BTreeMap<String, Vec<String>>,
    /// Allowed label sizes.
    pub label_sizes: Vec<String>,
}

/// Response payload for `reset`.
#[derive(Debug, Serialize)]
pub struct ResetResponse {
    /// Always true; reset has no failure modes.
    pub cleared: bool,
}

// ============================================================================
// SECTION: Tool Router
// ============================================================================

/// Tool router for MCP requests.
#[derive(Clone)]
pub struct ToolRouter {
    /// Wizard engine shared across requests.
    engine: WizardEngine,
    /// Audit sink for tool call events.
    audit: Arc<dyn AuditSink>,
}

impl ToolRouter {
    /// Creates a new tool router.
    #[must_use]
    pub fn new(engine: WizardEngine, audit: Arc<dyn AuditSink>) -> Self {
        Self {
            engine,
            audit,
        }
    }

    /// Lists the MCP tools supported by this server.
    #[must_use]
    pub fn list_tools(&self) -> Vec<ToolDefinition> {
        tool_definitions(self.engine.plan())
    }

    /// Handles a tool call by name with a JSON payload.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError`] when routing, decoding, or the operation fails.
    pub fn handle_tool_call(
        &self,
        context: &RequestContext,
        name: &str,
        payload: Value,
    ) -> Result<Value, ToolError> {
        let tool = ToolName::parse(name);
        let result = match tool {
            Some(tool) => self.dispatch(tool, payload),
            None => Err(ToolError::UnknownTool),
        };
        self.audit.record(ToolAuditEvent {
            event: "tool_call",
            timestamp_ms: now_unix_millis(),
            request_id: context.request_id.clone(),
            transport: context.transport,
            peer_ip: context.peer_ip.map(|ip| ip.to_string()),
            tool,
            outcome: if result.is_ok() { ToolOutcome::Ok } else { ToolOutcome::Error },
            error_kind: result.as_ref().err().map(ToolError::kind),
        });
        result
    }

    /// Dispatches a resolved tool to its handler.
    fn dispatch(&self, tool: ToolName, payload: Value) -> Result<Value, ToolError> {
        match tool {
            ToolName::PlanGet => {
                ensure_empty(&payload)?;
                encode(&PlanGetResponse {
                    steps: self.engine.plan().steps().to_vec(),
                })
            }
            ToolName::CatalogList => {
                ensure_empty(&payload)?;
                encode(&CatalogListResponse {
                    carriers: self.engine.catalog().carriers().clone(),
                    label_sizes: self.engine.catalog().label_sizes().to_vec(),
                })
            }
            ToolName::StepOptions => {
                let request = decode::<StepOptionsRequest>(payload)?;
                encode(&self.engine.step_options(&request.step_id)?)
            }
            ToolName::NextOptions => {
                ensure_empty(&payload)?;
                encode(&self.engine.next_options()?)
            }
            ToolName::CarrierSet => {
                let request = decode::<CarrierSetRequest>(payload)?;
                encode(&self.engine.write_step(StepInput::Carrier {
                    carrier: request.carrier,
                    service: request.service,
                })?)
            }
            ToolName::OptionsSet => {
                let request = decode::<OptionsSetRequest>(payload)?;
                encode(&self.engine.write_step(StepInput::Options {
                    insurance: request.insurance,
                })?)
            }
            ToolName::LabelSet => {
                let request = decode::<LabelSetRequest>(payload)?;
                encode(&self.engine.write_step(StepInput::Label {
                    size: request.size,
                })?)
            }
            ToolName::PrinterSet => {
                let request = decode::<PrinterSetRequest>(payload)?;
                encode(&self.engine.write_step(StepInput::Printer {
                    printer: request.printer,
                })?)
            }
            ToolName::NotifySet => {
                let request = decode::<NotifySetRequest>(payload)?;
                encode(&self.engine.write_step(StepInput::Notify {
                    target: request.target,
                })?)
            }
            ToolName::StatusGet => {
                ensure_empty(&payload)?;
                encode(&self.engine.status()?)
            }
            ToolName::Finalize => {
                ensure_empty(&payload)?;
                encode(&self.engine.finalize()?)
            }
            ToolName::Confirm => {
                let request = decode::<ConfirmRequest>(payload)?;
                let confirmed_at = request
                    .confirmed_at
                    .unwrap_or_else(|| Timestamp::UnixMillis(now_unix_millis()));
                encode(&self.engine.confirm(request.accept, confirmed_at)?)
            }
            ToolName::Reset => {
                ensure_empty(&payload)?;
                self.engine.reset()?;
                encode(&ResetResponse {
                    cleared: true,
                })
            }
        }
    }
}

// ============================================================================
// SECTION: Payload Helpers
// ============================================================================

/// Decodes a typed request from an untrusted JSON payload.
fn decode<T: serde::de::DeserializeOwned>(payload: Value) -> Result<T, ToolError> {
    serde_json::from_value(payload).map_err(|err| ToolError::InvalidParams(err.to_string()))
}

/// Rejects non-empty payloads for tools that accept no input fields.
fn ensure_empty(payload: &Value) -> Result<(), ToolError> {
    match payload {
        Value::Null => Ok(()),
        Value::Object(fields) if fields.is_empty() => Ok(()),
        _ => Err(ToolError::InvalidParams("tool accepts no input fields".to_string())),
    }
}

/// Encodes a response payload to JSON.
fn encode<T: Serialize>(response: &T) -> Result<Value, ToolError> {
    serde_json::to_value(response).map_err(|_| ToolError::Serialization)
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Tool routing and operation errors.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The tool name is not part of the surface.
    #[error("unknown tool")]
    UnknownTool,
    /// The payload failed to decode into the tool's request shape.
    #[error("invalid tool params: {0}")]
    InvalidParams(String),
    /// A value failed a catalog or required-field check.
    #[error("validation failed: {0}")]
    Validation(String),
    /// Earlier plan steps are absent.
    #[error("prerequisite steps missing: {missing:?}")]
    PrerequisiteBlocked {
        /// Missing step identifiers in plan order.
        missing: Vec<StepId>,
    },
    /// The caller referenced a step that is not in the plan.
    #[error("unknown step: {0}")]
    UnknownStep(String),
    /// Finalize was attempted before every plan step was present.
    #[error("configuration incomplete")]
    IncompleteConfiguration {
        /// Status payload describing what remains.
        status: WizardStatus,
    },
    /// Confirm was called without a prior armed finalize.
    #[error("no confirmation pending")]
    NoPendingConfirmation,
    /// Internal failure outside the caller's control.
    #[error("internal error: {0}")]
    Internal(String),
    /// Response serialization failed.
    #[error("serialization failed")]
    Serialization,
}

impl ToolError {
    /// Returns a stable label for the error kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::UnknownTool => "unknown_tool",
            Self::InvalidParams(_) => "invalid_params",
            Self::Validation(_) => "validation",
            Self::PrerequisiteBlocked {
                ..
            } => "prerequisite_blocked",
            Self::UnknownStep(_) => "unknown_step",
            Self::IncompleteConfiguration {
                ..
            } => "incomplete_configuration",
            Self::NoPendingConfirmation => "no_pending_confirmation",
            Self::Internal(_) => "internal",
            Self::Serialization => "serialization",
        }
    }

    /// Returns structured error data for the JSON-RPC error payload.
    #[must_use]
    pub fn data(&self) -> Option<Value> {
        match self {
            Self::PrerequisiteBlocked {
                missing,
            } => serde_json::to_value(missing).ok().map(|steps| {
                let mut data = serde_json::Map::new();
                data.insert("missing".to_string(), steps);
                Value::Object(data)
            }),
            Self::IncompleteConfiguration {
                status,
            } => serde_json::to_value(status).ok(),
            _ => None,
        }
    }
}

impl From<WizardError> for ToolError {
    fn from(err: WizardError) -> Self {
        match err {
            WizardError::Validation(message) => Self::Validation(message),
            WizardError::PrerequisiteBlocked {
                missing,
            } => Self::PrerequisiteBlocked {
                missing,
            },
            WizardError::UnknownStep(step) => Self::UnknownStep(step),
            WizardError::IncompleteConfiguration {
                status,
            } => Self::IncompleteConfiguration {
                status,
            },
            WizardError::NoPendingConfirmation => Self::NoPendingConfirmation,
            WizardError::Store(store) => Self::Internal(store.to_string()),
        }
    }
}
