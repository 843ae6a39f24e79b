use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::alerts::AlertId;

// Identifiers ----------------------------------------------------------------

pub type ExerciseId = String;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SetId(pub u64);

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TemplateId(pub u64);

/// Shared by every exercise that was added in the same superset.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SupersetGroup(pub u64);

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Hands out ids that are never reused within one store.
#[derive(Debug, Clone, Default)]
pub struct IdSequence {
    last: u64,
}

impl IdSequence {
    fn bump(&mut self) -> u64 {
        self.last += 1;
        self.last
    }

    pub fn set_id(&mut self) -> SetId {
        SetId(self.bump())
    }

    pub fn template_id(&mut self) -> TemplateId {
        TemplateId(self.bump())
    }

    pub fn superset_group(&mut self) -> SupersetGroup {
        SupersetGroup(self.bump())
    }

    pub fn alert_id(&mut self) -> AlertId {
        AlertId(self.bump())
    }
}

// Exercises ------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Exercise {
    pub id: ExerciseId,
    pub name: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equipment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
}

impl Exercise {
    pub fn new(id: impl Into<String>, name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            equipment: None,
            icon: None,
            count: None,
        }
    }

    pub fn with_equipment(mut self, equipment: impl Into<String>) -> Self {
        self.equipment = Some(equipment.into());
        self
    }
}

// Sets -----------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SetType {
    #[default]
    Regular,
    Warmup,
    Dropset,
    Failure,
}

impl SetType {
    pub const ALL: [SetType; 4] = [
        SetType::Regular,
        SetType::Warmup,
        SetType::Dropset,
        SetType::Failure,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Regular => "Regular",
            Self::Warmup => "Warm-up",
            Self::Dropset => "Drop set",
            Self::Failure => "Failure",
        }
    }

    /// One-letter tag; regular sets show their number instead.
    pub fn tag(self) -> Option<char> {
        match self {
            Self::Regular => None,
            Self::Warmup => Some('W'),
            Self::Dropset => Some('D'),
            Self::Failure => Some('F'),
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::Regular => Self::Warmup,
            Self::Warmup => Self::Dropset,
            Self::Dropset => Self::Failure,
            Self::Failure => Self::Regular,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum WeightUnit {
    #[default]
    Kg,
    Lbs,
}

impl WeightUnit {
    pub fn toggled(self) -> Self {
        match self {
            Self::Kg => Self::Lbs,
            Self::Lbs => Self::Kg,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Kg => "kg",
            Self::Lbs => "lbs",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExerciseSet {
    pub id: SetId,
    pub weight: f64,
    pub reps: u32,
    pub completed: bool,
    #[serde(rename = "type")]
    pub set_type: SetType,
    /// Seconds.
    pub rest_time: u32,
}

impl ExerciseSet {
    /// A blank regular set.
    pub fn fresh(id: SetId, rest_time: u32) -> Self {
        Self {
            id,
            weight: 0.0,
            reps: 0,
            completed: false,
            set_type: SetType::Regular,
            rest_time,
        }
    }
}

/// A single field edit on a set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SetUpdate {
    Weight(f64),
    Reps(u32),
}

// Workout --------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkoutExercise {
    pub exercise: Exercise,
    pub sets: Vec<ExerciseSet>,
    pub is_super_set: bool,
    pub super_set_group: Option<SupersetGroup>,
}

impl WorkoutExercise {
    pub fn completed_sets(&self) -> usize {
        self.sets.iter().filter(|s| s.completed).count()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActiveWorkout {
    pub name: String,
    pub exercises: Vec<WorkoutExercise>,
    pub start_time: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub weight_unit: WeightUnit,
    /// Seconds, applied to sets created from now on.
    pub default_rest_time: u32,
}

// Templates ------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkoutTemplate {
    pub id: TemplateId,
    pub name: String,
    pub description: Option<String>,
    pub exercises: Vec<Exercise>,
    pub last_used: DateTime<Utc>,
}
