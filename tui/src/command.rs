//! Application commands and their string representations.

use std::str::FromStr;

/// Everything a key can be bound to outside of text entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Quit,
    Up,
    Down,
    Left,
    Right,
    ToggleField,
    Select,
    StartEmpty,
    NewTemplate,
    Edit,
    Delete,
    DeleteExercise,
    AddExercises,
    AddSet,
    ToggleComplete,
    CycleSetType,
    RestUp,
    RestDown,
    DefaultRestUp,
    DefaultRestDown,
    ToggleUnit,
    Rename,
    SaveTemplate,
    Finish,
    CancelWorkout,
    Digit(char),
    Backspace,
}

impl FromStr for Command {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "quit" => Ok(Self::Quit),
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            "toggle-field" => Ok(Self::ToggleField),
            "select" => Ok(Self::Select),
            "start-empty" => Ok(Self::StartEmpty),
            "new-template" => Ok(Self::NewTemplate),
            "edit" => Ok(Self::Edit),
            "delete" => Ok(Self::Delete),
            "delete-exercise" => Ok(Self::DeleteExercise),
            "add-exercises" => Ok(Self::AddExercises),
            "add-set" => Ok(Self::AddSet),
            "toggle-complete" => Ok(Self::ToggleComplete),
            "cycle-set-type" => Ok(Self::CycleSetType),
            "rest-up" => Ok(Self::RestUp),
            "rest-down" => Ok(Self::RestDown),
            "default-rest-up" => Ok(Self::DefaultRestUp),
            "default-rest-down" => Ok(Self::DefaultRestDown),
            "toggle-unit" => Ok(Self::ToggleUnit),
            "rename" => Ok(Self::Rename),
            "save-template" => Ok(Self::SaveTemplate),
            "finish" => Ok(Self::Finish),
            "cancel-workout" => Ok(Self::CancelWorkout),
            "backspace" => Ok(Self::Backspace),
            _ => Err(()),
        }
    }
}

impl Command {
    /// Returns the canonical name for this command.
    pub fn name(self) -> &'static str {
        match self {
            Self::Quit => "quit",
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
            Self::ToggleField => "toggle-field",
            Self::Select => "select",
            Self::StartEmpty => "start-empty",
            Self::NewTemplate => "new-template",
            Self::Edit => "edit",
            Self::Delete => "delete",
            Self::DeleteExercise => "delete-exercise",
            Self::AddExercises => "add-exercises",
            Self::AddSet => "add-set",
            Self::ToggleComplete => "toggle-complete",
            Self::CycleSetType => "cycle-set-type",
            Self::RestUp => "rest-up",
            Self::RestDown => "rest-down",
            Self::DefaultRestUp => "default-rest-up",
            Self::DefaultRestDown => "default-rest-down",
            Self::ToggleUnit => "toggle-unit",
            Self::Rename => "rename",
            Self::SaveTemplate => "save-template",
            Self::Finish => "finish",
            Self::CancelWorkout => "cancel-workout",
            Self::Digit(_) => "digit",
            Self::Backspace => "backspace",
        }
    }
}
