use thiserror::Error;

use crate::models::TemplateId;

pub type SessionResult<T> = Result<T, SessionError>;

/// Every variant means the request was rejected and nothing changed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Please enter a template name")]
    InvalidTemplateName,
    #[error("Please add at least one exercise to the template")]
    InvalidTemplateExercises,
    #[error("An exercise must have at least one set")]
    LastSetDeletionRejected,
    #[error("Please enter a workout name")]
    InvalidWorkoutName,
    #[error("no workout in progress")]
    NotInSession,
    #[error("a workout is already in progress")]
    AlreadyInSession,
    #[error("no exercise at position {0}")]
    ExerciseNotFound(usize),
    #[error("no set {set} on exercise {exercise}")]
    SetNotFound { exercise: usize, set: usize },
    #[error("unknown exercise id: {0}")]
    UnknownExercise(String),
    #[error("template not found: {0}")]
    TemplateNotFound(TemplateId),
    #[error("no exercises selected")]
    NoExercisesSelected,
    #[error("nothing is waiting for a response")]
    NoPendingAlert,
    #[error("invalid exercise catalog: {0}")]
    InvalidCatalog(String),
}

impl SessionError {
    /// Title for rejections the user should see as a blocking notice.
    pub fn notice_title(&self) -> Option<&'static str> {
        match self {
            Self::InvalidTemplateName | Self::InvalidTemplateExercises => {
                Some("Cannot save template")
            }
            Self::LastSetDeletionRejected => Some("Cannot delete set"),
            Self::InvalidWorkoutName => Some("Cannot rename workout"),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for SessionError {
    fn from(err: serde_json::Error) -> Self {
        SessionError::InvalidCatalog(err.to_string())
    }
}

impl From<std::io::Error> for SessionError {
    fn from(err: std::io::Error) -> Self {
        SessionError::InvalidCatalog(err.to_string())
    }
}
