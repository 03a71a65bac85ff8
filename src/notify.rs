//! Outbound notification — SMTP email to a fixed internal recipient on each
//! new submission.
//!
//! Strictly best-effort: failures are logged at `warn` and swallowed, never
//! retried, and never change the submission verdict.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use secrecy::ExposeSecret;
use tracing::{info, warn};

use crate::config::SmtpConfig;
use crate::error::NotifyError;
use crate::profile::StoredProfile;

/// Receives new-submission events. Implementations must not let a delivery
/// failure escape to the caller's verdict; the server treats the returned
/// error as log-only.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn new_submission(&self, record: &StoredProfile) -> Result<(), NotifyError>;
}

/// SMTP notifier built on lettre.
pub struct EmailNotifier {
    config: SmtpConfig,
}

impl EmailNotifier {
    pub fn new(config: SmtpConfig) -> Self {
        Self { config }
    }

    fn build_email(&self, record: &StoredProfile) -> Result<Message, NotifyError> {
        Message::builder()
            .from(
                self.config
                    .from_address
                    .parse()
                    .map_err(|e| NotifyError::Build(format!("Invalid from address: {e}")))?,
            )
            .to(self
                .config
                .notify_to
                .parse()
                .map_err(|e| NotifyError::Build(format!("Invalid recipient address: {e}")))?)
            .subject("A new user has onboarded!")
            .header(ContentType::TEXT_HTML)
            .body(submission_summary_html(record))
            .map_err(|e| NotifyError::Build(format!("Failed to build email: {e}")))
    }

}

/// Deliver one email over SMTP. Blocking; run via `spawn_blocking`.
fn send_email(config: &SmtpConfig, email: &Message) -> Result<(), NotifyError> {
    let creds = Credentials::new(
        config.username.clone(),
        config.password.expose_secret().to_string(),
    );

    let transport = SmtpTransport::relay(&config.host)
        .map_err(|e| NotifyError::Transport(format!("SMTP relay error: {e}")))?
        .port(config.port)
        .credentials(creds)
        .build();

    transport
        .send(email)
        .map(|_| ())
        .map_err(|e| NotifyError::Transport(e.to_string()))
}

#[async_trait]
impl Notifier for EmailNotifier {
    async fn new_submission(&self, record: &StoredProfile) -> Result<(), NotifyError> {
        let email = self.build_email(record)?;
        let config = self.config.clone();

        // lettre's SmtpTransport is blocking; hand the send to the blocking
        // pool so this works on any runtime flavor.
        let result = tokio::task::spawn_blocking(move || send_email(&config, &email))
            .await
            .unwrap_or_else(|e| {
                Err(NotifyError::Transport(format!("Send task failed: {e}")))
            });
        match &result {
            Ok(()) => info!(id = %record.id, "Submission notification sent"),
            Err(e) => warn!(id = %record.id, error = %e, "Submission notification failed"),
        }
        result
    }
}

/// HTML summary of a new submission, one line per profile field.
fn submission_summary_html(record: &StoredProfile) -> String {
    let p = &record.profile;
    let or_not_provided = |v: &Option<String>| {
        v.clone().unwrap_or_else(|| "Not provided".to_string())
    };
    let or_none = |v: &[String]| {
        if v.is_empty() {
            "None".to_string()
        } else {
            v.join(", ")
        }
    };

    format!(
        "<p>A new user has just completed the onboarding process.</p>\n\
         <ul>\n\
           <li><strong>Name:</strong> {}</li>\n\
           <li><strong>Email:</strong> {}</li>\n\
           <li><strong>Phone:</strong> {}</li>\n\
           <li><strong>Address:</strong> {}</li>\n\
           <li><strong>Age:</strong> {}</li>\n\
           <li><strong>Sex:</strong> {}</li>\n\
           <li><strong>Weight:</strong> {} {}</li>\n\
           <li><strong>Activity Level:</strong> {}</li>\n\
           <li><strong>Fitness Goal:</strong> {}</li>\n\
           <li><strong>Allergies:</strong> {}</li>\n\
           <li><strong>Health Conditions:</strong> {}</li>\n\
           <li><strong>Spice Level:</strong> {}</li>\n\
           <li><strong>Frequent Meal:</strong> {}</li>\n\
           <li><strong>Best Food:</strong> {}</li>\n\
           <li><strong>Worst Food:</strong> {}</li>\n\
         </ul>",
        p.name,
        p.email,
        or_not_provided(&p.phone),
        or_not_provided(&p.address),
        p.age,
        p.sex,
        p.weight,
        p.weight_unit,
        p.activity_level,
        p.fitness_goal,
        or_none(&p.allergies),
        or_none(&p.health_conditions),
        p.spice_level,
        p.frequent_meal,
        p.best_food,
        p.worst_food,
    )
}
