//! Workout session manager: exercise catalog, templates and the single
//! active workout, independent of any UI.

pub mod alerts;
pub mod catalog;
pub mod error;
pub mod logic;
pub mod models;
mod session;
pub mod settings;
pub mod store;
pub mod templates;

pub use alerts::{Alert, AlertId, AlertKind, AlertQueue, PendingAction};
pub use catalog::{ExerciseCatalog, filter_exercises};
pub use error::{SessionError, SessionResult};
pub use logic::{ExerciseSummary, WorkoutSummary};
pub use models::{
    ActiveWorkout, Exercise, ExerciseId, ExerciseSet, SetId, SetType, SetUpdate, SupersetGroup,
    TemplateId, WeightUnit, WorkoutExercise, WorkoutTemplate,
};
pub use settings::SessionSettings;
pub use store::{Outcome, WorkoutStore};
