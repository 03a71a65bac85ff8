//! The draft record the wizard builds up, one partial update at a time.
//!
//! Every scalar field is an explicit `Option` so "not yet answered" is
//! distinguishable from an answered falsy value (a weight of 0 is set but
//! invalid, not unset). The list fields keep insertion order and never hold
//! duplicates; both invariants are enforced at the merge boundary.

use serde::{Deserialize, Serialize};

use crate::error::WizardError;
use crate::profile::{ActivityLevel, FitnessGoal, Profile, Sex, WeightUnit};

/// In-progress wizard data. Mutated only through [`DraftProfile::merge`]
/// and the tag-list helpers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftProfile {
    // Identity
    pub name: Option<String>,
    pub email: Option<String>,
    pub age: Option<u32>,
    pub sex: Option<Sex>,
    pub phone: Option<String>,
    pub address: Option<String>,

    // Metrics
    pub weight: Option<f64>,
    #[serde(default)]
    pub weight_unit: WeightUnit,
    pub activity_level: Option<ActivityLevel>,
    pub fitness_goal: Option<FitnessGoal>,

    // Health
    #[serde(default)]
    pub allergies: Vec<String>,
    #[serde(default)]
    pub health_conditions: Vec<String>,

    // Palate
    pub spice_level: Option<u8>,
    pub frequent_meal: Option<String>,
    pub best_food: Option<String>,
    pub worst_food: Option<String>,
}

/// A partial update: only the `Some` fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub age: Option<u32>,
    pub sex: Option<Sex>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub weight: Option<f64>,
    pub weight_unit: Option<WeightUnit>,
    pub activity_level: Option<ActivityLevel>,
    pub fitness_goal: Option<FitnessGoal>,
    pub allergies: Option<Vec<String>>,
    pub health_conditions: Option<Vec<String>>,
    pub spice_level: Option<u8>,
    pub frequent_meal: Option<String>,
    pub best_food: Option<String>,
    pub worst_food: Option<String>,
}

/// Drop duplicate entries, keeping first occurrence order.
fn dedupe(entries: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(entries.len());
    for entry in entries {
        if !out.contains(&entry) {
            out.push(entry);
        }
    }
    out
}

impl DraftProfile {
    /// Shallow-merge a partial update. Always succeeds; idempotent.
    pub fn merge(&mut self, update: DraftUpdate) {
        macro_rules! apply {
            ($($field:ident),* $(,)?) => {
                $(if let Some(v) = update.$field {
                    self.$field = Some(v);
                })*
            };
        }
        apply!(
            name,
            email,
            age,
            sex,
            phone,
            address,
            weight,
            activity_level,
            fitness_goal,
            spice_level,
            frequent_meal,
            best_food,
            worst_food,
        );
        if let Some(unit) = update.weight_unit {
            self.weight_unit = unit;
        }
        if let Some(allergies) = update.allergies {
            self.allergies = dedupe(allergies);
        }
        if let Some(conditions) = update.health_conditions {
            self.health_conditions = dedupe(conditions);
        }
    }

    /// Append an allergy if the trimmed value is non-empty and not present.
    /// Returns whether the list changed.
    pub fn add_allergy(&mut self, allergy: &str) -> bool {
        push_unique(&mut self.allergies, allergy)
    }

    /// Remove an allergy. Removing an absent entry is a no-op.
    pub fn remove_allergy(&mut self, allergy: &str) {
        self.allergies.retain(|a| a != allergy);
    }

    /// Append a health condition if the trimmed value is non-empty and not
    /// present. Returns whether the list changed.
    pub fn add_condition(&mut self, condition: &str) -> bool {
        push_unique(&mut self.health_conditions, condition)
    }

    /// Remove a health condition. Removing an absent entry is a no-op.
    pub fn remove_condition(&mut self, condition: &str) {
        self.health_conditions.retain(|c| c != condition);
    }

    /// Convert the draft into a submission-ready [`Profile`].
    ///
    /// Fails on the first unset required field. Phone and address are
    /// required by the identity step, so a draft that passed step validation
    /// always carries them.
    pub fn finalize(&self) -> Result<Profile, WizardError> {
        fn need<T: Clone>(
            value: &Option<T>,
            field: &'static str,
        ) -> Result<T, WizardError> {
            value
                .clone()
                .ok_or(WizardError::IncompleteDraft { field })
        }

        Ok(Profile {
            name: need(&self.name, "name")?,
            email: need(&self.email, "email")?,
            age: need(&self.age, "age")?,
            sex: need(&self.sex, "sex")?,
            phone: self.phone.clone(),
            address: self.address.clone(),
            weight: need(&self.weight, "weight")?,
            weight_unit: self.weight_unit,
            activity_level: need(&self.activity_level, "activityLevel")?,
            fitness_goal: need(&self.fitness_goal, "fitnessGoal")?,
            allergies: self.allergies.clone(),
            health_conditions: self.health_conditions.clone(),
            spice_level: need(&self.spice_level, "spiceLevel")?,
            frequent_meal: need(&self.frequent_meal, "frequentMeal")?,
            best_food: need(&self.best_food, "bestFood")?,
            worst_food: need(&self.worst_food, "worstFood")?,
        })
    }
}

fn push_unique(list: &mut Vec<String>, entry: &str) -> bool {
    let entry = entry.trim();
    if entry.is_empty() || list.iter().any(|e| e == entry) {
        return false;
    }
    list.push(entry.to_string());
    true
}

/// A draft with every step completed, matching the canonical test record.
#[cfg(test)]
pub(crate) fn full_draft() -> DraftProfile {
    let mut draft = DraftProfile::default();
    draft.merge(DraftUpdate {
        name: Some("Jane Doe".into()),
        email: Some("jane@x.com".into()),
        age: Some(30),
        sex: Some(Sex::Female),
        phone: Some("555-1234".into()),
        address: Some("1 Main St".into()),
        weight: Some(65.0),
        weight_unit: Some(WeightUnit::Kg),
        activity_level: Some(ActivityLevel::Moderate),
        fitness_goal: Some(FitnessGoal::MaintainWeight),
        allergies: Some(vec!["Peanuts".into()]),
        spice_level: Some(3),
        frequent_meal: Some("Rice".into()),
        best_food: Some("Sushi".into()),
        worst_food: Some("Cilantro".into()),
        ..Default::default()
    });
    draft
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_draft_is_unset() {
        let draft = DraftProfile::default();
        assert!(draft.name.is_none());
        assert!(draft.weight.is_none());
        assert_eq!(draft.weight_unit, WeightUnit::Kg);
        assert!(draft.allergies.is_empty());
    }

    #[test]
    fn merge_applies_only_set_fields() {
        let mut draft = DraftProfile::default();
        draft.merge(DraftUpdate {
            name: Some("Jane".into()),
            age: Some(30),
            ..Default::default()
        });
        assert_eq!(draft.name.as_deref(), Some("Jane"));
        assert_eq!(draft.age, Some(30));
        assert!(draft.email.is_none());

        // A later update leaves untouched fields alone.
        draft.merge(DraftUpdate {
            email: Some("jane@x.com".into()),
            ..Default::default()
        });
        assert_eq!(draft.name.as_deref(), Some("Jane"));
        assert_eq!(draft.email.as_deref(), Some("jane@x.com"));
    }

    #[test]
    fn merge_is_idempotent() {
        let update = DraftUpdate {
            name: Some("Jane".into()),
            weight: Some(65.0),
            allergies: Some(vec!["Peanuts".into()]),
            ..Default::default()
        };

        let mut once = DraftProfile::default();
        once.merge(update.clone());

        let mut twice = DraftProfile::default();
        twice.merge(update.clone());
        twice.merge(update);

        assert_eq!(once, twice);
    }

    #[test]
    fn merge_dedupes_list_fields() {
        let mut draft = DraftProfile::default();
        draft.merge(DraftUpdate {
            allergies: Some(vec!["Milk".into(), "Eggs".into(), "Milk".into()]),
            ..Default::default()
        });
        assert_eq!(draft.allergies, vec!["Milk", "Eggs"]);
    }

    #[test]
    fn add_allergy_rejects_duplicates() {
        let mut draft = DraftProfile::default();
        assert!(draft.add_allergy("Peanuts"));
        assert!(!draft.add_allergy("Peanuts"));
        assert_eq!(draft.allergies, vec!["Peanuts"]);
    }

    #[test]
    fn add_allergy_trims_and_rejects_empty() {
        let mut draft = DraftProfile::default();
        assert!(!draft.add_allergy("   "));
        assert!(draft.add_allergy("  Shellfish "));
        assert_eq!(draft.allergies, vec!["Shellfish"]);
        assert!(!draft.add_allergy("Shellfish"));
    }

    #[test]
    fn remove_absent_allergy_is_noop() {
        let mut draft = DraftProfile::default();
        draft.add_allergy("Soy");
        draft.remove_allergy("Wheat");
        assert_eq!(draft.allergies, vec!["Soy"]);
        draft.remove_allergy("Soy");
        assert!(draft.allergies.is_empty());
    }

    #[test]
    fn conditions_preserve_insertion_order() {
        let mut draft = DraftProfile::default();
        draft.add_condition("Diabetes");
        draft.add_condition("IBS");
        draft.add_condition("Diabetes");
        assert_eq!(draft.health_conditions, vec!["Diabetes", "IBS"]);
    }

    #[test]
    fn finalize_requires_all_fields() {
        let draft = DraftProfile::default();
        match draft.finalize() {
            Err(WizardError::IncompleteDraft { field }) => assert_eq!(field, "name"),
            other => panic!("expected IncompleteDraft, got {other:?}"),
        }
    }

    #[test]
    fn finalize_full_draft() {
        let draft = full_draft();
        let profile = draft.finalize().unwrap();
        assert_eq!(profile.name, "Jane Doe");
        assert_eq!(profile.weight, 65.0);
        assert_eq!(profile.allergies, vec!["Peanuts"]);
        assert_eq!(profile.spice_level, 3);
    }
}
