//! Configuration types, built from environment variables.

use secrecy::SecretString;

use crate::error::ConfigError;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address the HTTP server binds to, `host:port`.
    pub bind_addr: String,
    /// Path of the local libSQL database file.
    pub db_path: String,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let port: u16 = std::env::var("INTAKE_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(8080);

        let bind_addr = format!("0.0.0.0:{port}");

        let db_path =
            std::env::var("INTAKE_DB_PATH").unwrap_or_else(|_| "./data/intake.db".to_string());

        Self { bind_addr, db_path }
    }
}

/// SMTP notification configuration.
///
/// The notification channel is optional: `from_env` returns `None` when
/// `SMTP_HOST` is not set, and the server runs without notifications.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: SecretString,
    pub from_address: String,
    /// Fixed internal recipient for new-submission alerts.
    pub notify_to: String,
}

impl SmtpConfig {
    /// Build config from environment variables.
    /// Returns `Ok(None)` if `SMTP_HOST` is not set (notifications disabled).
    pub fn from_env() -> Result<Option<Self>, ConfigError> {
        let Ok(host) = std::env::var("SMTP_HOST") else {
            return Ok(None);
        };

        let port: u16 = std::env::var("SMTP_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(587);

        let username = std::env::var("SMTP_USERNAME").unwrap_or_default();
        let password =
            SecretString::from(std::env::var("SMTP_PASSWORD").unwrap_or_default());
        let from_address =
            std::env::var("SMTP_FROM_ADDRESS").unwrap_or_else(|_| username.clone());

        let notify_to = std::env::var("INTAKE_NOTIFY_TO")
            .map_err(|_| ConfigError::MissingEnvVar("INTAKE_NOTIFY_TO".to_string()))?;

        Ok(Some(Self {
            host,
            port,
            username,
            password,
            from_address,
            notify_to,
        }))
    }
}
