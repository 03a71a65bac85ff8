//! Health step helpers — preset chips and the free-text entry buffers.
//!
//! The buffers are renderer-local: typed text is not part of the draft until
//! committed via the add action, which trims, skips empty or already-present
//! values, and clears the buffer.

use crate::wizard::draft::DraftProfile;

/// Preset allergy chips offered on the health step.
pub const COMMON_ALLERGIES: [&str; 10] = [
    "Peanuts",
    "Tree Nuts",
    "Milk",
    "Eggs",
    "Fish",
    "Shellfish",
    "Soy",
    "Wheat",
    "Sesame",
    "Mustard",
];

/// Preset health condition chips offered on the health step.
pub const COMMON_CONDITIONS: [&str; 8] = [
    "Diabetes",
    "Hypertension",
    "High Cholesterol",
    "IBS",
    "Celiac Disease",
    "Lactose Intolerance",
    "PCOS",
    "Thyroid Issues",
];

/// Transient text-entry buffers for the health step's custom inputs.
#[derive(Debug, Clone, Default)]
pub struct HealthStepBuffers {
    pub allergy_input: String,
    pub condition_input: String,
}

impl HealthStepBuffers {
    /// Commit the allergy buffer into the draft. Clears the buffer whether
    /// or not the value was added. Returns whether the list changed.
    pub fn commit_allergy(&mut self, draft: &mut DraftProfile) -> bool {
        let added = draft.add_allergy(&self.allergy_input);
        self.allergy_input.clear();
        added
    }

    /// Commit the condition buffer into the draft. Clears the buffer whether
    /// or not the value was added. Returns whether the list changed.
    pub fn commit_condition(&mut self, draft: &mut DraftProfile) -> bool {
        let added = draft.add_condition(&self.condition_input);
        self.condition_input.clear();
        added
    }
}
