//! Backend-agnostic persistence trait for wellness profiles.

use async_trait::async_trait;

use crate::error::DatabaseError;
use crate::profile::{Profile, StoredProfile};

/// The persistence boundary for completed submissions.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Persist a validated profile. Returns the stored record with its
    /// generated id and creation timestamp.
    async fn insert_profile(&self, profile: &Profile) -> Result<StoredProfile, DatabaseError>;

    /// Fetch every persisted profile, in unspecified order.
    async fn list_profiles(&self) -> Result<Vec<StoredProfile>, DatabaseError>;
}
