use serde::{Deserialize, Serialize};

use crate::models::WeightUnit;

/// Defaults a fresh or reset workout starts from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SessionSettings {
    /// Seconds.
    pub default_rest_time: u32,
    pub weight_unit: WeightUnit,
    pub workout_name: String,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            default_rest_time: 60,
            weight_unit: WeightUnit::Kg,
            workout_name: "New Workout".to_string(),
        }
    }
}
