//! The onboarding wizard — draft record, step cursor, and submission flow.

pub mod draft;
pub mod health;
pub mod state;

pub use draft::{DraftProfile, DraftUpdate};
pub use health::{COMMON_ALLERGIES, COMMON_CONDITIONS, HealthStepBuffers};
pub use state::{DATA_STEPS, WizardState, WizardStep};
