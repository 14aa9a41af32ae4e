// shipwright-mcp/src/audit.rs
// ============================================================================
// Module: MCP Audit Logging
// Description: Structured audit events for tool call handling.
// Purpose: Emit redacted audit logs without hard dependencies.
// Dependencies: serde, shipwright-config, shipwright-core
// ============================================================================

//! ## Overview
//! This module defines audit event payloads and sinks for tool call logging.
//! Events carry call metadata only — configuration values are caller data
//! and are never logged. The sink trait is intentionally lightweight so
//! deployments can route events to their preferred logging pipeline.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;
use shipwright_config::ServerTransport;
use shipwright_core::ToolName;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Tool call outcome classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolOutcome {
    /// Successful call.
    Ok,
    /// Failed call.
    Error,
}

/// Tool call audit event payload.
#[derive(Debug, Clone, Serialize)]
pub struct ToolAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: i64,
    /// Request identifier when provided.
    pub request_id: Option<String>,
    /// Transport used for the request.
    pub transport: ServerTransport,
    /// Peer IP address when available.
    pub peer_ip: Option<String>,
    /// Tool name when resolved.
    pub tool: Option<ToolName>,
    /// Call outcome.
    pub outcome: ToolOutcome,
    /// Normalized error kind label.
    pub error_kind: Option<&'static str>,
}

// ============================================================================
// SECTION: Sinks
// ============================================================================

/// Audit sink for tool call events.
pub trait AuditSink: Send + Sync {
    /// Records one tool call event.
    fn record(&self, event: ToolAuditEvent);
}

/// Audit sink writing JSON event lines to stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrAuditSink;

impl AuditSink for StderrAuditSink {
    fn record(&self, event: ToolAuditEvent) {
        let Ok(mut line) = serde_json::to_vec(&event) else {
            return;
        };
        line.push(b'\n');
        // Audit logging is best-effort; a closed stderr must not fail calls.
        let _ = std::io::stderr().write_all(&line);
    }
}

/// Audit sink discarding all events.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopAuditSink;

impl AuditSink for NoopAuditSink {
    fn record(&self, _event: ToolAuditEvent) {}
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Returns the current wall-clock time in unix milliseconds.
///
/// The core engine never reads the clock; this helper exists so the server
/// layer can stamp audit events and confirm requests that omit a timestamp.
#[must_use]
pub fn now_unix_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .ok()
        .and_then(|elapsed| i64::try_from(elapsed.as_millis()).ok())
        .unwrap_or(0)
}
