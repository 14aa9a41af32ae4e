// shipwright-mcp/src/lib.rs
// ============================================================================
// Module: Shipwright MCP
// Description: MCP server and tool router for the Shipwright wizard.
// Purpose: Provide MCP tool adapters over the wizard engine.
// Dependencies: shipwright-core, shipwright-config, axum, tokio
// ============================================================================

//! ## Overview
//! Shipwright MCP exposes the wizard engine through MCP tools over stdio and
//! HTTP JSON-RPC. All tools are thin wrappers over
//! [`shipwright_core::WizardEngine`]; the server layer owns wire concerns
//! and structured audit logging only.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod audit;
pub mod contract;
pub mod server;
pub mod tools;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use audit::AuditSink;
pub use audit::NoopAuditSink;
pub use audit::StderrAuditSink;
pub use audit::ToolAuditEvent;
pub use audit::ToolOutcome;
pub use contract::ToolDefinition;
pub use contract::tool_definitions;
pub use server::McpServer;
pub use server::McpServerError;
pub use tools::RequestContext;
pub use tools::ToolError;
pub use tools::ToolRouter;
