//! Submission gateway — one-shot transmission of a finalized profile to the
//! persistence boundary.
//!
//! Every failure (transport, server validation, downstream persistence) is
//! collapsed into the single generic [`SubmitError`]; the underlying cause
//! is logged here and never crosses the boundary. The gateway performs no
//! retries — retrying means re-invoking `submit`.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::SubmitError;
use crate::profile::Profile;

/// Acknowledgement of a persisted submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReceipt {
    /// Opaque identifier of the created record.
    pub id: String,
}

/// The seam between the wizard and the persistence boundary.
#[async_trait]
pub trait SubmissionGateway: Send + Sync {
    /// Transmit the profile. Exactly one attempt per invocation.
    async fn submit(&self, profile: &Profile) -> Result<SubmissionReceipt, SubmitError>;
}

/// Success body of the onboarding endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OnboardAck {
    success: bool,
    user_id: Option<String>,
}

/// A 2xx acknowledgement must both claim success and carry the record id;
/// anything else is malformed and fails the submission.
fn receipt_from_ack(ack: OnboardAck) -> Result<SubmissionReceipt, SubmitError> {
    if !ack.success {
        warn!("Acknowledgement reports failure despite success status");
        return Err(SubmitError);
    }
    let id = ack.user_id.ok_or_else(|| {
        warn!("Acknowledgement missing record id");
        SubmitError
    })?;
    Ok(SubmissionReceipt { id })
}

/// HTTP gateway posting the profile as JSON to the onboarding endpoint.
pub struct HttpGateway {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpGateway {
    /// `endpoint` is the full URL of the onboarding route,
    /// e.g. `http://localhost:8080/api/onboard`.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl SubmissionGateway for HttpGateway {
    async fn submit(&self, profile: &Profile) -> Result<SubmissionReceipt, SubmitError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(profile)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Submission transport failed");
                SubmitError
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, body = %body, "Submission rejected");
            return Err(SubmitError);
        }

        let ack: OnboardAck = response.json().await.map_err(|e| {
            warn!(error = %e, "Malformed submission acknowledgement");
            SubmitError
        })?;

        let receipt = receipt_from_ack(ack)?;
        debug!(id = %receipt.id, "Profile submitted");
        Ok(receipt)
    }
}
