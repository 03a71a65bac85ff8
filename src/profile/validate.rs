//! Server-side validation for submitted profiles.
//!
//! Enum membership is already enforced by the closed enums at
//! deserialization; this module covers the remaining string-length and
//! numeric-range rules. The persistence boundary runs these checks on every
//! submission regardless of what the client validated.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::ValidationError;
use crate::profile::Profile;

pub const NAME_MAX: usize = 100;
pub const TEXT_MAX: usize = 200;
pub const PHONE_MAX: usize = 20;
pub const ADDRESS_MAX: usize = 200;
pub const AGE_MIN: u32 = 1;
pub const AGE_MAX: u32 = 150;
pub const SPICE_MIN: u8 = 1;
pub const SPICE_MAX: u8 = 4;

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex is valid")
    })
}

fn require_text(
    field: &'static str,
    value: &str,
    max: usize,
) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required { field });
    }
    if value.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(())
}

/// Validate a finalized profile against the submission rules.
///
/// Returns the first violation found; the caller surfaces its message
/// verbatim in the 400 response.
pub fn validate(profile: &Profile) -> Result<(), ValidationError> {
    require_text("name", &profile.name, NAME_MAX)?;

    if !email_regex().is_match(&profile.email) {
        return Err(ValidationError::InvalidEmail);
    }

    if profile.age < AGE_MIN || profile.age > AGE_MAX {
        return Err(ValidationError::OutOfRange {
            field: "age",
            min: AGE_MIN as i64,
            max: AGE_MAX as i64,
        });
    }

    if profile.weight <= 0.0 {
        return Err(ValidationError::NotPositive { field: "weight" });
    }

    if profile.spice_level < SPICE_MIN || profile.spice_level > SPICE_MAX {
        return Err(ValidationError::OutOfRange {
            field: "spiceLevel",
            min: SPICE_MIN as i64,
            max: SPICE_MAX as i64,
        });
    }

    require_text("frequentMeal", &profile.frequent_meal, TEXT_MAX)?;
    require_text("bestFood", &profile.best_food, TEXT_MAX)?;
    require_text("worstFood", &profile.worst_food, TEXT_MAX)?;

    if let Some(phone) = &profile.phone {
        if phone.chars().count() > PHONE_MAX {
            return Err(ValidationError::TooLong {
                field: "phone",
                max: PHONE_MAX,
            });
        }
    }
    if let Some(address) = &profile.address {
        if address.chars().count() > ADDRESS_MAX {
            return Err(ValidationError::TooLong {
                field: "address",
                max: ADDRESS_MAX,
            });
        }
    }

    Ok(())
}
