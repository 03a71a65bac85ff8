//! Error types for Wellness Intake.

/// Top-level error type for the service.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Notification error: {0}")]
    Notify(#[from] NotifyError),

    #[error("Wizard error: {0}")]
    Wizard(#[from] WizardError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Database-related errors.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("Connection error: {0}")]
    Pool(String),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Field-level validation failures, mirrored client- and server-side.
///
/// Messages are user-facing; keep them human-readable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    Required { field: &'static str },

    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },

    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        min: i64,
        max: i64,
    },

    #[error("{field} must be positive")]
    NotPositive { field: &'static str },

    #[error("Invalid email address")]
    InvalidEmail,
}

/// Outbound notification errors. Always logged, never surfaced to submitters.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("Failed to build notification email: {0}")]
    Build(String),

    #[error("SMTP send failed: {0}")]
    Transport(String),
}

/// Wizard state machine errors.
#[derive(Debug, thiserror::Error)]
pub enum WizardError {
    #[error("Please complete all required fields")]
    StepIncomplete,

    #[error("Use submit to finish the final step")]
    SubmitRequired,

    #[error("Submission is only available on the final step")]
    NotOnFinalStep,

    #[error("Draft is missing required field: {field}")]
    IncompleteDraft { field: &'static str },

    #[error(transparent)]
    Submission(#[from] SubmitError),
}

/// The single binary failure signal crossing the submission boundary.
///
/// Carries no internal detail; the underlying cause is logged at the gateway.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Something went wrong. Please try again.")]
pub struct SubmitError;

/// Result type alias for the service.
pub type Result<T> = std::result::Result<T, Error>;
