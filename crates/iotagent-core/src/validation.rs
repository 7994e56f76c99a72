//! Mandatory-field checks run before any create or update call.

use crate::domain::{ConfigGroup, Device};
use crate::error::MissingFields;

/// Records that have fields the agent requires.
pub trait Validate {
    /// Collect every missing mandatory field.
    fn validate(&self) -> Result<(), MissingFields>;
}

impl Validate for ConfigGroup {
    fn validate(&self) -> Result<(), MissingFields> {
        let mut missing = MissingFields::new();
        if self.apikey.is_empty() {
            missing.push("apikey");
        }
        if self.resource.is_empty() {
            missing.push("resource");
        }
        missing.into_result()
    }
}

impl Validate for Device {
    fn validate(&self) -> Result<(), MissingFields> {
        let mut missing = MissingFields::new();
        if self.id.is_empty() {
            missing.push("device_id");
        }
        missing.into_result()
    }
}
