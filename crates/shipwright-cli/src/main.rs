// shipwright-cli/src/main.rs
// ============================================================================
// Module: Shipwright CLI Entry Point
// Description: Command dispatcher for the Shipwright MCP server.
// Purpose: Serve the wizard and inspect configuration from the command line.
// Dependencies: clap, shipwright-config, shipwright-core, shipwright-mcp, tokio
// ============================================================================

//! ## Overview
//! The Shipwright CLI starts the MCP server and provides small offline
//! utilities for validating configuration and inspecting the step plan.
//! Inputs are untrusted; configuration errors abort before serving.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use shipwright_config::ShipwrightConfig;
use shipwright_mcp::McpServer;
use thiserror::Error;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "shipwright", version, disable_help_subcommand = true)]
struct Cli {
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Commands,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the Shipwright MCP server.
    Serve(ServeCommand),
    /// Configuration utilities.
    Config {
        /// Selected config subcommand.
        #[command(subcommand)]
        command: ConfigCommand,
    },
    /// Step plan utilities.
    Plan {
        /// Selected plan subcommand.
        #[command(subcommand)]
        command: PlanCommand,
    },
}

/// Arguments for the `serve` command.
#[derive(Args, Debug)]
struct ServeCommand {
    /// Optional config file path (defaults to shipwright.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Validate a Shipwright configuration file.
    Validate(ConfigValidateCommand),
}

/// Arguments for `config validate`.
#[derive(Args, Debug)]
struct ConfigValidateCommand {
    /// Optional config file path (defaults to shipwright.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Plan subcommands.
#[derive(Subcommand, Debug)]
enum PlanCommand {
    /// Print the configured step plan as JSON.
    Show(PlanShowCommand),
}

/// Arguments for `plan show`.
#[derive(Args, Debug)]
struct PlanShowCommand {
    /// Optional config file path (defaults to shipwright.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for user-facing messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a message.
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
#[tokio::main(flavor = "multi_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(err) => {
            let _ = write_stderr_line(&format!("shipwright: {err}"));
            ExitCode::FAILURE
        }
    }
}

/// Executes the CLI command dispatcher.
async fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Serve(command) => command_serve(command).await,
        Commands::Config {
            command,
        } => match command {
            ConfigCommand::Validate(command) => command_config_validate(&command),
        },
        Commands::Plan {
            command,
        } => match command {
            PlanCommand::Show(command) => command_plan_show(&command),
        },
    }
}

// ============================================================================
// SECTION: Commands
// ============================================================================

/// Executes the `serve` command.
async fn command_serve(command: ServeCommand) -> CliResult<ExitCode> {
    let config = load_config(command.config.as_deref())?;
    let server = McpServer::from_config(config)
        .map_err(|err| CliError::new(format!("server init failed: {err}")))?;
    server.serve().await.map_err(|err| CliError::new(format!("server failed: {err}")))?;
    Ok(ExitCode::SUCCESS)
}

/// Executes the `config validate` command.
fn command_config_validate(command: &ConfigValidateCommand) -> CliResult<ExitCode> {
    let _config = load_config(command.config.as_deref())?;
    write_stdout_line("config ok")?;
    Ok(ExitCode::SUCCESS)
}

/// Executes the `plan show` command.
fn command_plan_show(command: &PlanShowCommand) -> CliResult<ExitCode> {
    let config = load_config(command.config.as_deref())?;
    write_stdout_line(&render_plan(&config)?)?;
    Ok(ExitCode::SUCCESS)
}

/// Renders the configured step plan as pretty JSON.
fn render_plan(config: &ShipwrightConfig) -> CliResult<String> {
    let plan = config
        .step_plan()
        .map_err(|err| CliError::new(format!("config load failed: {err}")))?;
    serde_json::to_string_pretty(plan.steps())
        .map_err(|err| CliError::new(format!("plan render failed: {err}")))
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Loads configuration with CLI error wrapping.
fn load_config(path: Option<&std::path::Path>) -> CliResult<ShipwrightConfig> {
    ShipwrightConfig::load(path).map_err(|err| CliError::new(format!("config load failed: {err}")))
}

/// Writes one line to stdout.
fn write_stdout_line(line: &str) -> CliResult<()> {
    let mut stdout = std::io::stdout();
    stdout
        .write_all(line.as_bytes())
        .and_then(|()| stdout.write_all(b"\n"))
        .map_err(|err| CliError::new(format!("stdout write failed: {err}")))
}

/// Writes one line to stderr.
fn write_stderr_line(line: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    stderr.write_all(line.as_bytes()).and_then(|()| stderr.write_all(b"\n"))
}

// ============================================================================
// SECTION: Tests
// ============================================================================
