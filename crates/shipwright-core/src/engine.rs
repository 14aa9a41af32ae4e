// shipwright-core/src/engine.rs
// ============================================================================
// Module: Wizard Engine
// Description: Canonical execution path for all wizard operations.
// Purpose: Order guarding, validation, status, and two-phase commit.
// Dependencies: crate::{catalog, commit, guard, state, status, step, time}
// ============================================================================

//! ## Overview
//! The wizard engine is the single canonical execution path for the
//! configuration wizard. All operation surfaces call into these methods:
//! transports decode typed requests and hand them to the engine, which
//! guards step ordering, validates values against the catalog, mutates the
//! store, and returns structured results. Every read-modify-write locks the
//! store exactly once, so completeness checks observe a consistent snapshot.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::catalog::ValidationCatalog;
use crate::commit::ConfirmOutcome;
use crate::commit::FinalizeAttempt;
use crate::commit::FinalizeReceipt;
use crate::commit::confirm;
use crate::commit::finalize;
use crate::guard::PrerequisiteCheck;
use crate::guard::check_prerequisites;
use crate::state::ConfigStore;
use crate::state::StoreError;
use crate::status::WizardStatus;
use crate::status::derive_status;
use crate::step::StepId;
use crate::step::StepPlan;
use crate::step::StepValue;
use crate::time::Timestamp;
use crate::tooling::ToolName;

// ============================================================================
// SECTION: Operation Inputs
// ============================================================================

/// Raw, untrusted inputs for a step write, prior to validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum StepInput {
    /// Carrier and service selection.
    Carrier {
        /// Requested carrier name.
        carrier: String,
        /// Requested service name.
        service: String,
    },
    /// Shipment options.
    Options {
        /// Whether insurance is required.
        insurance: bool,
    },
    /// Label size selection.
    Label {
        /// Requested label size.
        size: String,
    },
    /// Printer selection.
    Printer {
        /// Requested printer name.
        printer: String,
    },
    /// Notification target.
    Notify {
        /// Requested notification target.
        target: String,
    },
}

impl StepInput {
    /// Returns the step this input writes.
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
// SECTION: Operation Results
// ============================================================================

/// Choices a caller may pick from for one step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StepChoices {
    /// Supported carriers mapped to their service lists.
    Carriers {
        /// Carrier table from the catalog.
        carriers: BTreeMap<String, Vec<String>>,
    },
    /// Boolean shipment option values.
    Flags {
        /// Allowed values for the insurance flag.
        insurance: Vec<bool>,
    },
    /// Supported label sizes.
    LabelSizes {
        /// Allowed sizes from the catalog.
        sizes: Vec<String>,
    },
    /// Free-form text input, trimmed and required non-empty.
    FreeText {
        /// Name of the free-form field.
        field: String,
    },
}

/// Choices for a single step, with the tool that writes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepOptionsResult {
    /// Step identifier.
    pub step: StepId,
    /// Tool that writes the step.
    pub tool: ToolName,
    /// Input field names the write tool accepts.
    pub inputs: Vec<String>,
    /// Choices for the step.
    pub choices: StepChoices,
}

/// Next unfinished step with its choices, or completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum NextOptionsResult {
    /// At least one step remains to be written.
    Pending {
        /// First plan step absent from the record.
        step: StepId,
        /// Tool that writes the step.
        tool: ToolName,
        /// Choices for the step.
        choices: StepChoices,
    },
    /// Every plan step is present; the wizard is ready to finalize.
    Complete {
        /// Full status payload at completion.
        status: WizardStatus,
    },
}

/// Result of a successful step write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteResult {
    /// Normalized value that was stored.
    pub saved: StepValue,
    /// Status derived immediately after the write.
    pub status: WizardStatus,
}

// ============================================================================
// SECTION: Wizard Engine
// ============================================================================

/// Canonical execution engine for the configuration wizard.
#[derive(Debug, Clone)]
pub struct WizardEngine {
    /// Ordered plan of enabled steps.
    plan: StepPlan,
    /// Static validation catalog.
    catalog: ValidationCatalog,
    /// Shared mutable wizard state.
    store: ConfigStore,
}

impl Default for WizardEngine {
    fn default() -> Self {
        Self::new(StepPlan::default(), ValidationCatalog::default())
    }
}

impl WizardEngine {
    /// Creates an engine with an empty store.
    #[must_use]
    pub fn new(plan: StepPlan, catalog: ValidationCatalog) -> Self {
        Self {
            plan,
            catalog,
            store: ConfigStore::new(),
        }
    }

    /// Returns the step plan.
    #[must_use]
    pub const fn plan(&self) -> &StepPlan {
        &self.plan
    }

    /// Returns the validation catalog.
    #[must_use]
    pub const fn catalog(&self) -> &ValidationCatalog {
        &self.catalog
    }

    /// Returns the choices for one step by its string identifier.
    ///
    /// # Errors
    ///
    /// Returns [`WizardError::UnknownStep`] when the identifier does not
    /// name an enabled step. This signals a caller/integration bug, not a
    /// value validation failure.
    pub fn step_options(&self, step_id: &str) -> Result<StepOptionsResult, WizardError> {
        let wanted = step_id.trim();
        let step = StepId::parse(wanted)
            .filter(|step| self.plan.contains(*step))
            .ok_or_else(|| WizardError::UnknownStep(wanted.to_string()))?;
        Ok(StepOptionsResult {
            step,
            tool: step.tool(),
            inputs: step.input_fields().iter().map(|field| (*field).to_string()).collect(),
            choices: self.choices_for(step),
        })
    }

    /// Returns the next unfinished step with its choices, or completion.
    ///
    /// # Errors
    ///
    /// Returns [`WizardError::Store`] when the store lock is poisoned.
    pub fn next_options(&self) -> Result<NextOptionsResult, WizardError> {
        let status = self.status()?;
        Ok(match status.next_step {
            Some(step) => NextOptionsResult::Pending {
                step,
                tool: step.tool(),
                choices: self.choices_for(step),
            },
            None => NextOptionsResult::Complete {
                status,
            },
        })
    }

    /// Validates and stores one step write.
    ///
    /// Prerequisite checks run before value validation: a caller writing out
    /// of order is told which steps to complete first rather than receiving
    /// value-level errors for a step it should not have reached yet. A
    /// successful write disarms any pending finalize.
    ///
    /// # Errors
    ///
    /// Returns [`WizardError::UnknownStep`] for disabled steps,
    /// [`WizardError::PrerequisiteBlocked`] for out-of-order writes, and
    /// [`WizardError::Validation`] for values the catalog rejects.
    pub fn write_step(&self, input: StepInput) -> Result<WriteResult, WizardError> {
        let step = input.step_id();
        if !self.plan.contains(step) {
            return Err(WizardError::UnknownStep(step.as_str().to_string()));
        }
        let mut state = self.store.lock()?;
        if let PrerequisiteCheck::Blocked(missing) =
            check_prerequisites(&self.plan, step, &state.record)
        {
            return Err(WizardError::PrerequisiteBlocked {
                missing,
            });
        }
        let saved = self.validate_input(input)?;
        state.write(saved.clone());
        let status = derive_status(&self.plan, &state.record);
        drop(state);
        Ok(WriteResult {
            saved,
            status,
        })
    }

    /// Returns the current status payload.
    ///
    /// # Errors
    ///
    /// Returns [`WizardError::Store`] when the store lock is poisoned.
    pub fn status(&self) -> Result<WizardStatus, WizardError> {
        let state = self.store.lock()?;
        Ok(derive_status(&self.plan, &state.record))
    }

    /// Arms a complete configuration for confirmation.
    ///
    /// # Errors
    ///
    /// Returns [`WizardError::IncompleteConfiguration`] carrying the current
    /// status payload when any plan step is still absent.
    pub fn finalize(&self) -> Result<FinalizeReceipt, WizardError> {
        let mut state = self.store.lock()?;
        match finalize(&self.plan, &mut state) {
            FinalizeAttempt::Armed(receipt) => Ok(receipt),
            FinalizeAttempt::Incomplete(status) => Err(WizardError::IncompleteConfiguration {
                status,
            }),
        }
    }

    /// Confirms or cancels an armed configuration.
    ///
    /// # Errors
    ///
    /// Returns [`WizardError::NoPendingConfirmation`] when no finalize is
    /// armed, including when a step write disarmed it.
    pub fn confirm(
        &self,
        accept: bool,
        confirmed_at: Timestamp,
    ) -> Result<ConfirmOutcome, WizardError> {
        let mut state = self.store.lock()?;
        confirm(&self.plan, &mut state, accept, confirmed_at)
            .ok_or(WizardError::NoPendingConfirmation)
    }

    /// Clears the configuration back to its empty state.
    ///
    /// # Errors
    ///
    /// Returns [`WizardError::Store`] when the store lock is poisoned.
    pub fn reset(&self) -> Result<(), WizardError> {
        let mut state = self.store.lock()?;
        state.clear();
        Ok(())
    }

    /// Builds the choices payload for one step.
    fn choices_for(&self, step: StepId) -> StepChoices {
        match step {
            StepId::Carrier => StepChoices::Carriers {
                carriers: self.catalog.carriers().clone(),
            },
            StepId::Options => StepChoices::Flags {
                insurance: vec![true, false],
            },
            StepId::Label => StepChoices::LabelSizes {
                sizes: self.catalog.label_sizes().to_vec(),
            },
            StepId::Printer => StepChoices::FreeText {
                field: "printer".to_string(),
            },
            StepId::Notify => StepChoices::FreeText {
                field: "target".to_string(),
            },
        }
    }

    /// Validates raw step inputs against the catalog and normalizes them.
    fn validate_input(&self, input: StepInput) -> Result<StepValue, WizardError> {
        match input {
            StepInput::Carrier {
                carrier,
                service,
            } => self.validate_carrier(&carrier, &service),
            StepInput::Options {
                insurance,
            } => Ok(StepValue::Options {
                insurance,
            }),
            StepInput::Label {
                size,
            } => self.validate_label(&size),
            StepInput::Printer {
                printer,
            } => {
                let printer = required_text("printer", &printer)?;
                Ok(StepValue::Printer {
                    printer,
                })
            }
            StepInput::Notify {
                target,
            } => {
                let target = required_text("notification target", &target)?;
                Ok(StepValue::Notify {
                    target,
                })
            }
        }
    }

    /// Validates the carrier step inputs.
    fn validate_carrier(&self, carrier: &str, service: &str) -> Result<StepValue, WizardError> {
        let carrier = carrier.trim();
        let service = service.trim();
        if carrier.is_empty() {
            return Err(WizardError::Validation("carrier is required".to_string()));
        }
        if service.is_empty() {
            return Err(WizardError::Validation("service is required".to_string()));
        }
        let Some(services) = self.catalog.services_for(carrier) else {
            return Err(WizardError::Validation(format!(
                "unsupported carrier '{carrier}' (supported: {})",
                self.catalog.carrier_names()
            )));
        };
        if !services.iter().any(|known| known.eq_ignore_ascii_case(service)) {
            return Err(WizardError::Validation(format!(
                "unsupported service '{service}' for {carrier} (supported: {})",
                services.join(", ")
            )));
        }
        Ok(StepValue::Carrier {
            carrier: carrier.to_string(),
            service: service.to_string(),
        })
    }

    /// Validates the label step input.
    fn validate_label(&self, size: &str) -> Result<StepValue, WizardError> {
        let size = size.trim();
        if size.is_empty() {
            return Err(WizardError::Validation("label size is required".to_string()));
        }
        if !self.catalog.is_valid_label_size(size) {
            return Err(WizardError::Validation(format!(
                "unsupported label size '{size}' (allowed: {})",
                self.catalog.label_sizes().join(", ")
            )));
        }
        Ok(StepValue::Label {
            size: size.to_ascii_lowercase(),
        })
    }
}

/// Trims a free-form field and rejects empty values.
fn required_text(field: &str, value: &str) -> Result<String, WizardError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(WizardError::Validation(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Wizard operation errors.
///
/// All variants are recoverable at the operation boundary; none should
/// terminate the process.
#[derive(Debug, Error)]
pub enum WizardError {
    /// A value failed a catalog or required-field check.
    #[error("validation failed: {0}")]
    Validation(String),
    /// Earlier plan steps are absent; listed in plan order.
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
    #[error("no confirmation pending; call finalize first")]
    NoPendingConfirmation,
    /// Store access failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}
