//! Wellness profile domain — validated records and field rules.

pub mod model;
pub mod validate;

pub use model::{ActivityLevel, FitnessGoal, Profile, Sex, StoredProfile, WeightUnit};
