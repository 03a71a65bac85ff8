//! Profile data models — closed enums and the validated submission record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Self-reported sex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sex {
    Male,
    Female,
    Other,
}

impl Sex {
    pub const ALL: [Sex; 3] = [Sex::Male, Sex::Female, Sex::Other];

    /// Wire/database string, identical to the serde form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
            Self::Other => "Other",
        }
    }
}

impl std::str::FromStr for Sex {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Male" => Ok(Self::Male),
            "Female" => Ok(Self::Female),
            "Other" => Ok(Self::Other),
            other => Err(format!("Unknown sex: {other}")),
        }
    }
}

impl std::fmt::Display for Sex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Unit the weight was reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeightUnit {
    #[serde(rename = "kg")]
    Kg,
    #[serde(rename = "lbs")]
    Lbs,
}

impl WeightUnit {
    pub const ALL: [WeightUnit; 2] = [WeightUnit::Kg, WeightUnit::Lbs];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Kg => "kg",
            Self::Lbs => "lbs",
        }
    }
}

impl Default for WeightUnit {
    fn default() -> Self {
        Self::Kg
    }
}

impl std::str::FromStr for WeightUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "kg" => Ok(Self::Kg),
            "lbs" => Ok(Self::Lbs),
            other => Err(format!("Unknown weight unit: {other}")),
        }
    }
}

impl std::fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Day-to-day activity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
    #[serde(rename = "Very Active")]
    VeryActive,
}

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 4] = [
        ActivityLevel::Sedentary,
        ActivityLevel::Light,
        ActivityLevel::Moderate,
        ActivityLevel::VeryActive,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sedentary => "Sedentary",
            Self::Light => "Light",
            Self::Moderate => "Moderate",
            Self::VeryActive => "Very Active",
        }
    }
}

impl std::str::FromStr for ActivityLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Sedentary" => Ok(Self::Sedentary),
            "Light" => Ok(Self::Light),
            "Moderate" => Ok(Self::Moderate),
            "Very Active" => Ok(Self::VeryActive),
            other => Err(format!("Unknown activity level: {other}")),
        }
    }
}

impl std::fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What the user wants out of their nutrition plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FitnessGoal {
    #[serde(rename = "Lose Weight")]
    LoseWeight,
    #[serde(rename = "Maintain Weight")]
    MaintainWeight,
    #[serde(rename = "Gain Muscle")]
    GainMuscle,
}

impl FitnessGoal {
    pub const ALL: [FitnessGoal; 3] = [
        FitnessGoal::LoseWeight,
        FitnessGoal::MaintainWeight,
        FitnessGoal::GainMuscle,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LoseWeight => "Lose Weight",
            Self::MaintainWeight => "Maintain Weight",
            Self::GainMuscle => "Gain Muscle",
        }
    }
}

impl std::str::FromStr for FitnessGoal {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Lose Weight" => Ok(Self::LoseWeight),
            "Maintain Weight" => Ok(Self::MaintainWeight),
            "Gain Muscle" => Ok(Self::GainMuscle),
            other => Err(format!("Unknown fitness goal: {other}")),
        }
    }
}

impl std::fmt::Display for FitnessGoal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A complete, finalized wellness profile — the wire shape of the
/// submission endpoint's request body.
///
/// Phone and address are the only optional fields; everything else is
/// required and range-checked by [`validate`](crate::profile::validate).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    // Identity
    pub name: String,
    pub email: String,
    pub age: u32,
    pub sex: Sex,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    // Metrics
    pub weight: f64,
    pub weight_unit: WeightUnit,
    pub activity_level: ActivityLevel,
    pub fitness_goal: FitnessGoal,

    // Health
    #[serde(default)]
    pub allergies: Vec<String>,
    #[serde(default)]
    pub health_conditions: Vec<String>,

    // Palate
    pub spice_level: u8,
    pub frequent_meal: String,
    pub best_food: String,
    pub worst_food: String,
}

/// A persisted profile: the submitted record plus storage metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredProfile {
    pub id: Uuid,
    #[serde(flatten)]
    pub profile: Profile,
    pub created_at: DateTime<Utc>,
}

/// Canonical fully-populated profile used across unit tests.
#[cfg(test)]
pub(crate) fn sample_profile() -> Profile {
    Profile {
        name: "Jane Doe".into(),
        email: "jane@x.com".into(),
        age: 30,
        sex: Sex::Female,
        phone: Some("555-1234".into()),
        address: Some("1 Main St".into()),
        weight: 65.0,
        weight_unit: WeightUnit::Kg,
        activity_level: ActivityLevel::Moderate,
        fitness_goal: FitnessGoal::MaintainWeight,
        allergies: vec!["Peanuts".into()],
        health_conditions: vec![],
        spice_level: 3,
        frequent_meal: "Rice".into(),
        best_food: "Sushi".into(),
        worst_food: "Cilantro".into(),
    }
}
