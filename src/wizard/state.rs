//! Wizard state machine — owns the draft record and the step cursor.
//!
//! The four data steps progress linearly: Identity → Metrics → Health →
//! Palate. Complete is terminal and is only reached through an acknowledged
//! submission; retreating never re-enters or leaves it.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::WizardError;
use crate::gateway::{SubmissionGateway, SubmissionReceipt};
use crate::wizard::draft::{DraftProfile, DraftUpdate};

/// Number of data-collection steps shown in the progress header.
pub const DATA_STEPS: u8 = 4;

/// The wizard's steps, including the terminal submitted state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    Identity,
    Metrics,
    Health,
    Palate,
    Complete,
}

impl WizardStep {
    /// The next step in the linear progression, if any.
    pub fn next(&self) -> Option<WizardStep> {
        use WizardStep::*;
        match self {
            Identity => Some(Metrics),
            Metrics => Some(Health),
            Health => Some(Palate),
            Palate => Some(Complete),
            Complete => None,
        }
    }

    /// The previous step. Complete has no predecessor — the terminal state
    /// is not re-enterable by going back.
    pub fn prev(&self) -> Option<WizardStep> {
        use WizardStep::*;
        match self {
            Identity => None,
            Metrics => Some(Identity),
            Health => Some(Metrics),
            Palate => Some(Health),
            Complete => None,
        }
    }

    /// Whether this step is terminal (the wizard is done).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete)
    }

    /// 1-based position among the data steps, for "Step n of 4" copy.
    /// Complete reports the last data step's position.
    pub fn position(&self) -> u8 {
        use WizardStep::*;
        match self {
            Identity => 1,
            Metrics => 2,
            Health => 3,
            Palate | Complete => 4,
        }
    }
}

impl Default for WizardStep {
    fn default() -> Self {
        Self::Identity
    }
}

impl std::fmt::Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Identity => "identity",
            Self::Metrics => "metrics",
            Self::Health => "health",
            Self::Palate => "palate",
            Self::Complete => "complete",
        };
        write!(f, "{s}")
    }
}

/// The form state store: draft record + step cursor.
///
/// All mutation of the draft and cursor goes through this type. It is owned
/// exclusively by one session and mutated synchronously; the only suspension
/// point is the gateway call inside [`submit`](WizardState::submit), and the
/// exclusive borrow it holds means a second submission cannot start while
/// one is in flight.
#[derive(Debug, Clone, Default)]
pub struct WizardState {
    step: WizardStep,
    draft: DraftProfile,
}

impl WizardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn draft(&self) -> &DraftProfile {
        &self.draft
    }

    /// Mutable access to the draft for the tag-list helpers; step renderers
    /// otherwise go through [`update`](WizardState::update).
    pub fn draft_mut(&mut self) -> &mut DraftProfile {
        &mut self.draft
    }

    /// Percentage shown by the progress bar (counts the terminal state).
    pub fn progress_percent(&self) -> f32 {
        let total = DATA_STEPS as f32 + 1.0;
        let current = if self.step.is_terminal() {
            total
        } else {
            self.step.position() as f32
        };
        current / total * 100.0
    }

    /// Shallow-merge a partial update into the draft. Always succeeds.
    pub fn update(&mut self, update: DraftUpdate) {
        self.draft.merge(update);
    }

    /// Per-step validity of the current draft.
    ///
    /// Health collects only optional data and is always valid. Complete is
    /// never valid — there is nothing left to advance to.
    pub fn is_current_step_valid(&self) -> bool {
        let d = &self.draft;
        let set = |s: &Option<String>| s.as_deref().is_some_and(|v| !v.trim().is_empty());
        match self.step {
            WizardStep::Identity => {
                set(&d.name)
                    && d.age.is_some()
                    && d.sex.is_some()
                    && set(&d.email)
                    && set(&d.phone)
                    && set(&d.address)
            }
            WizardStep::Metrics => {
                d.weight.is_some() && d.activity_level.is_some() && d.fitness_goal.is_some()
            }
            WizardStep::Health => true,
            WizardStep::Palate => {
                d.spice_level.is_some()
                    && set(&d.frequent_meal)
                    && set(&d.best_food)
                    && set(&d.worst_food)
            }
            WizardStep::Complete => false,
        }
    }

    /// Move to the next step if the current one is valid.
    ///
    /// The final data step is finished through [`submit`](WizardState::submit),
    /// not by advancing past it.
    pub fn advance(&mut self) -> Result<WizardStep, WizardError> {
        if self.step == WizardStep::Palate {
            return Err(WizardError::SubmitRequired);
        }
        if !self.is_current_step_valid() {
            debug!(step = %self.step, "Advance blocked by incomplete step");
            return Err(WizardError::StepIncomplete);
        }
        if let Some(next) = self.step.next() {
            self.step = next;
        }
        Ok(self.step)
    }

    /// Move to the previous step. Clamped at Identity; a no-op from the
    /// terminal state.
    pub fn retreat(&mut self) -> WizardStep {
        if let Some(prev) = self.step.prev() {
            self.step = prev;
        }
        self.step
    }

    /// Submit the finalized draft through the gateway.
    ///
    /// Requires the Palate step to be current and valid. Duplicate in-flight
    /// submissions are unrepresentable: the future borrows the wizard
    /// exclusively until the gateway answers, and dropping it mid-flight
    /// (abandoning the submission) leaves the wizard on Palate, retryable.
    /// On acknowledged success the wizard transitions to Complete; on
    /// failure it stays on Palate and the caller may simply re-invoke.
    pub async fn submit(
        &mut self,
        gateway: &dyn SubmissionGateway,
    ) -> Result<SubmissionReceipt, WizardError> {
        if self.step != WizardStep::Palate {
            return Err(WizardError::NotOnFinalStep);
        }
        if !self.is_current_step_valid() {
            return Err(WizardError::StepIncomplete);
        }

        let profile = self.draft.finalize()?;
        let outcome = gateway.submit(&profile).await;

        match outcome {
            Ok(receipt) => {
                self.step = WizardStep::Complete;
                debug!(id = %receipt.id, "Submission acknowledged");
                Ok(receipt)
            }
            Err(err) => {
                warn!("Submission failed; staying on final step");
                Err(WizardError::Submission(err))
            }
        }
    }
}
