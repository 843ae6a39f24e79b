//! Application state.
//!
//! [`App`] is the only owner of the [`WorkoutStore`]; every key press ends up
//! as one call into it. Rejections surface on the status line, and the ones
//! the store turns into notices also show up as a modal.

use spotter_core::{
    Alert, ExerciseId, Outcome, PendingAction, SessionResult, SetUpdate, WorkoutStore,
    WorkoutSummary, WorkoutTemplate,
};
use std::time::{Duration, Instant};
use tracing::debug;

use crate::command::Command;

const INPUT_TIMEOUT: Duration = Duration::from_secs(1);
const REST_STEP: u32 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Templates,
    Workout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Weight,
    Reps,
}

/// A modal input layer sitting on top of the current view.
#[derive(Debug, Clone, PartialEq)]
pub enum Overlay {
    Picker(PickerState),
    Prompt(PromptState),
}

#[derive(Debug, Clone, PartialEq)]
pub enum PickerPurpose {
    AddToWorkout,
    NewTemplate {
        name: String,
        description: Option<String>,
    },
}

/// Exercise search with a multi-selection, in the order things were marked.
#[derive(Debug, Clone, PartialEq)]
pub struct PickerState {
    pub purpose: PickerPurpose,
    pub query: String,
    pub cursor: usize,
    pub marked: Vec<ExerciseId>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PromptPurpose {
    TemplateName,
    TemplateDescription { name: String },
    SaveAsTemplate,
    RenameWorkout,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PromptState {
    pub purpose: PromptPurpose,
    pub input: String,
}

impl PromptState {
    pub fn title(&self) -> &'static str {
        match self.purpose {
            PromptPurpose::TemplateName => "New template name",
            PromptPurpose::TemplateDescription { .. } => "Description (optional)",
            PromptPurpose::SaveAsTemplate => "Save workout as template",
            PromptPurpose::RenameWorkout => "Rename workout",
        }
    }
}

/// Digits typed into the focused weight or reps cell.
struct EditBuffer {
    exercise: usize,
    set: usize,
    focus: Focus,
    text: String,
    last_input: Instant,
}

pub struct App {
    pub running: bool,
    pub overlay: Option<Overlay>,
    pub template_cursor: usize,
    pub exercise_cursor: usize,
    pub set_cursor: usize,
    pub focus: Focus,
    pub status: String,
    pub last_summary: Option<WorkoutSummary>,
    store: WorkoutStore,
    edit: Option<EditBuffer>,
}

impl App {
    pub fn new(store: WorkoutStore) -> Self {
        Self {
            running: true,
            overlay: None,
            template_cursor: 0,
            exercise_cursor: 0,
            set_cursor: 0,
            focus: Focus::Weight,
            status: String::new(),
            last_summary: None,
            store,
            edit: None,
        }
    }

    pub fn store(&self) -> &WorkoutStore {
        &self.store
    }

    pub fn view(&self) -> View {
        if self.store.is_active() {
            View::Workout
        } else {
            View::Templates
        }
    }

    pub fn alert(&self) -> Option<&Alert> {
        self.store.pending_alert()
    }

    pub fn selected_template(&self) -> Option<&WorkoutTemplate> {
        self.store.templates().get(self.template_cursor)
    }

    /// The typed text for a cell that is being edited, if any.
    pub fn edit_text(&self, exercise: usize, set: usize, focus: Focus) -> Option<&str> {
        self.edit
            .as_ref()
            .filter(|e| e.exercise == exercise && e.set == set && e.focus == focus)
            .map(|e| e.text.as_str())
    }

    pub fn dispatch(&mut self, cmd: Command) {
        debug!(command = cmd.name(), "dispatch");
        match cmd {
            Command::Quit => self.running = false,
            Command::Up => self.move_vertical(-1),
            Command::Down => self.move_vertical(1),
            Command::Left => self.move_set_cursor(-1),
            Command::Right => self.move_set_cursor(1),
            Command::ToggleField => self.toggle_focus(),
            _ => match self.view() {
                View::Templates => self.dispatch_templates(cmd),
                View::Workout => self.dispatch_workout(cmd),
            },
        }
    }

    fn dispatch_templates(&mut self, cmd: Command) {
        match cmd {
            Command::Select => {
                if let Some(id) = self.selected_template().map(|t| t.id) {
                    let result = self.store.start_from_template(id);
                    self.report(result);
                }
            }
            Command::StartEmpty => {
                let result = self.store.start_empty();
                if self.report(result).is_some() {
                    self.enter_workout();
                    self.status = "Workout started".into();
                }
            }
            Command::NewTemplate => self.open_prompt(PromptPurpose::TemplateName),
            Command::Edit => {
                if let Some(id) = self.selected_template().map(|t| t.id) {
                    let result = self.store.edit_template(id);
                    self.report(result);
                }
            }
            Command::Delete => {
                if let Some(id) = self.selected_template().map(|t| t.id) {
                    let result = self.store.delete_template(id);
                    self.report(result);
                }
            }
            _ => {}
        }
    }

    fn dispatch_workout(&mut self, cmd: Command) {
        let (exercise, set) = (self.exercise_cursor, self.set_cursor);
        match cmd {
            Command::AddExercises => self.open_picker(PickerPurpose::AddToWorkout),
            Command::AddSet => {
                let result = self.store.add_set(exercise);
                if self.report(result).is_some() {
                    self.set_cursor = self.set_count(exercise).saturating_sub(1);
                    self.edit = None;
                }
            }
            Command::Delete => {
                let result = self.store.delete_set(exercise, set);
                if self.report(result).is_some() {
                    self.clamp_cursors();
                }
            }
            Command::DeleteExercise => {
                let result = self.store.delete_exercise(exercise);
                if let Some(removed) = self.report(result) {
                    self.status = format!("Removed {}", removed.exercise.name);
                    self.set_cursor = 0;
                    self.clamp_cursors();
                }
            }
            Command::Select | Command::ToggleComplete => {
                self.commit_edit();
                let result = self.store.toggle_set_complete(exercise, set);
                self.report(result);
            }
            Command::CycleSetType => {
                let next = self.store.workout().set(exercise, set).map(|s| s.set_type.next());
                if let Some(set_type) = self.report(next) {
                    let result = self.store.set_type(exercise, set, set_type);
                    self.report(result);
                }
            }
            Command::RestUp => self.adjust_rest(|rest| rest.saturating_add(REST_STEP)),
            Command::RestDown => self.adjust_rest(|rest| rest.saturating_sub(REST_STEP)),
            Command::DefaultRestUp | Command::DefaultRestDown => {
                let current = self.store.workout().default_rest_time;
                let seconds = if cmd == Command::DefaultRestUp {
                    current.saturating_add(REST_STEP)
                } else {
                    current.saturating_sub(REST_STEP)
                };
                self.store.set_default_rest_time(seconds);
                self.status = format!("Default rest {seconds}s");
            }
            Command::ToggleUnit => {
                let unit = self.store.toggle_weight_unit();
                self.status = format!("Weights shown in {}", unit.label());
            }
            Command::Rename => self.open_prompt(PromptPurpose::RenameWorkout),
            Command::SaveTemplate => self.open_prompt(PromptPurpose::SaveAsTemplate),
            Command::Finish => {
                self.commit_edit();
                let result = self.store.finish();
                self.report(result);
            }
            Command::CancelWorkout => {
                let result = self.store.cancel();
                self.report(result);
            }
            Command::Digit(ch) => self.input_char(ch),
            Command::Backspace => self.backspace(),
            _ => {}
        }
    }

    // Alerts

    /// Answers the front alert and applies whatever it led to.
    pub fn respond(&mut self, accept: bool) {
        let result = self.store.respond(accept);
        let Some(outcome) = self.report(result) else {
            return;
        };
        match outcome {
            Outcome::Dismissed => {}
            Outcome::Declined(action) => {
                if action == PendingAction::CancelWorkout {
                    self.status = "Keep going".into();
                }
            }
            Outcome::Started => {
                self.enter_workout();
                self.status = format!("Started {}", self.store.workout().name);
            }
            Outcome::Finished(summary) => {
                self.status = format!(
                    "Finished {}: {}/{} sets, {:.1} {}",
                    summary.name,
                    summary.completed_sets,
                    summary.total_sets,
                    summary.total_volume,
                    summary.weight_unit.label()
                );
                self.last_summary = Some(summary);
                self.leave_workout();
            }
            Outcome::Cancelled => {
                self.status = "Workout discarded".into();
                self.leave_workout();
            }
            Outcome::TemplateDeleted(template) => {
                self.status = format!("Deleted {}", template.name);
                self.template_cursor = self
                    .template_cursor
                    .min(self.store.templates().len().saturating_sub(1));
            }
        }
    }

    // Cursor

    fn move_vertical(&mut self, delta: isize) {
        match self.view() {
            View::Templates => {
                self.template_cursor = step(self.template_cursor, delta, self.store.templates().len());
            }
            View::Workout => {
                self.commit_edit();
                let count = self.store.workout().exercises.len();
                let next = step(self.exercise_cursor, delta, count);
                if next != self.exercise_cursor {
                    self.exercise_cursor = next;
                    self.set_cursor = 0;
                }
            }
        }
    }

    fn move_set_cursor(&mut self, delta: isize) {
        if self.view() != View::Workout {
            return;
        }
        self.commit_edit();
        let count = self.set_count(self.exercise_cursor);
        self.set_cursor = step(self.set_cursor, delta, count);
    }

    fn toggle_focus(&mut self) {
        self.commit_edit();
        self.focus = match self.focus {
            Focus::Weight => Focus::Reps,
            Focus::Reps => Focus::Weight,
        };
    }

    fn set_count(&self, exercise: usize) -> usize {
        self.store
            .workout()
            .exercises
            .get(exercise)
            .map_or(0, |e| e.sets.len())
    }

    fn clamp_cursors(&mut self) {
        let count = self.store.workout().exercises.len();
        self.exercise_cursor = self.exercise_cursor.min(count.saturating_sub(1));
        self.set_cursor = self
            .set_cursor
            .min(self.set_count(self.exercise_cursor).saturating_sub(1));
        self.edit = None;
    }

    fn enter_workout(&mut self) {
        self.exercise_cursor = 0;
        self.set_cursor = 0;
        self.focus = Focus::Weight;
        self.edit = None;
    }

    fn leave_workout(&mut self) {
        self.enter_workout();
        self.overlay = None;
    }

    fn adjust_rest(&mut self, change: impl Fn(u32) -> u32) {
        let (exercise, set) = (self.exercise_cursor, self.set_cursor);
        let current = self.store.workout().set(exercise, set).map(|s| s.rest_time);
        if let Some(rest) = self.report(current) {
            let result = self.store.set_rest_time(exercise, set, change(rest));
            self.report(result);
        }
    }

    // Input

    fn input_char(&mut self, ch: char) {
        if self.focus == Focus::Reps && ch == '.' {
            return;
        }
        let (exercise, set, focus) = (self.exercise_cursor, self.set_cursor, self.focus);
        if self.store.workout().set(exercise, set).is_err() {
            return;
        }

        let stale = self.edit.as_ref().is_none_or(|e| {
            e.exercise != exercise
                || e.set != set
                || e.focus != focus
                || e.last_input.elapsed() > INPUT_TIMEOUT
        });
        if stale {
            self.edit = Some(EditBuffer {
                exercise,
                set,
                focus,
                text: String::new(),
                last_input: Instant::now(),
            });
        }
        if let Some(edit) = self.edit.as_mut() {
            edit.text.push(ch);
            edit.last_input = Instant::now();
        }
        self.apply_edit();
    }

    fn backspace(&mut self) {
        let (exercise, set, focus) = (self.exercise_cursor, self.set_cursor, self.focus);
        let Ok(current) = self.store.workout().set(exercise, set) else {
            return;
        };

        if self.edit_text(exercise, set, focus).is_none() {
            let text = match focus {
                Focus::Weight => format_weight(current.weight),
                Focus::Reps => current.reps.to_string(),
            };
            self.edit = Some(EditBuffer {
                exercise,
                set,
                focus,
                text,
                last_input: Instant::now(),
            });
        }
        if let Some(edit) = self.edit.as_mut() {
            edit.text.pop();
            edit.last_input = Instant::now();
        }
        self.apply_edit();
    }

    fn apply_edit(&mut self) {
        let Some(edit) = self.edit.as_ref() else {
            return;
        };
        let update = match edit.focus {
            Focus::Weight => SetUpdate::Weight(edit.text.parse().unwrap_or(0.0)),
            Focus::Reps => SetUpdate::Reps(edit.text.parse().unwrap_or(0)),
        };
        let result = self.store.update_set(edit.exercise, edit.set, update);
        self.report(result);
    }

    fn commit_edit(&mut self) {
        self.edit = None;
    }

    // Overlays

    fn open_prompt(&mut self, purpose: PromptPurpose) {
        self.commit_edit();
        let input = match purpose {
            PromptPurpose::RenameWorkout => self.store.workout().name.clone(),
            _ => String::new(),
        };
        self.overlay = Some(Overlay::Prompt(PromptState { purpose, input }));
    }

    fn open_picker(&mut self, purpose: PickerPurpose) {
        self.commit_edit();
        self.overlay = Some(Overlay::Picker(PickerState {
            purpose,
            query: String::new(),
            cursor: 0,
            marked: Vec::new(),
        }));
    }

    pub fn close_overlay(&mut self) {
        self.overlay = None;
    }

    pub fn overlay_input(&mut self, ch: char) {
        match self.overlay.as_mut() {
            Some(Overlay::Prompt(prompt)) => prompt.input.push(ch),
            Some(Overlay::Picker(picker)) => {
                picker.query.push(ch);
                picker.cursor = 0;
            }
            None => {}
        }
    }

    pub fn overlay_backspace(&mut self) {
        match self.overlay.as_mut() {
            Some(Overlay::Prompt(prompt)) => {
                prompt.input.pop();
            }
            Some(Overlay::Picker(picker)) => {
                picker.query.pop();
                picker.cursor = 0;
            }
            None => {}
        }
    }

    /// Exercises matching the picker query.
    pub fn picker_results(&self) -> Vec<&spotter_core::Exercise> {
        match &self.overlay {
            Some(Overlay::Picker(picker)) => self.store.search_exercises(&picker.query),
            _ => Vec::new(),
        }
    }

    pub fn picker_move(&mut self, delta: isize) {
        let count = self.picker_results().len();
        if let Some(Overlay::Picker(picker)) = self.overlay.as_mut() {
            picker.cursor = step(picker.cursor, delta, count);
        }
    }

    /// Marks or unmarks the exercise under the cursor.
    pub fn picker_toggle(&mut self) {
        let Some(id) = self.picker_highlighted() else {
            return;
        };
        if let Some(Overlay::Picker(picker)) = self.overlay.as_mut() {
            match picker.marked.iter().position(|m| *m == id) {
                Some(pos) => {
                    picker.marked.remove(pos);
                }
                None => picker.marked.push(id),
            }
        }
    }

    fn picker_highlighted(&self) -> Option<ExerciseId> {
        let Some(Overlay::Picker(picker)) = &self.overlay else {
            return None;
        };
        self.picker_results()
            .get(picker.cursor)
            .map(|e| e.id.clone())
    }

    /// Confirms the current overlay.
    pub fn overlay_submit(&mut self) {
        match self.overlay.take() {
            Some(Overlay::Prompt(prompt)) => self.submit_prompt(prompt),
            Some(Overlay::Picker(picker)) => self.submit_picker(picker),
            None => {}
        }
    }

    fn submit_prompt(&mut self, prompt: PromptState) {
        match prompt.purpose {
            PromptPurpose::TemplateName => {
                self.overlay = Some(Overlay::Prompt(PromptState {
                    purpose: PromptPurpose::TemplateDescription { name: prompt.input },
                    input: String::new(),
                }));
            }
            PromptPurpose::TemplateDescription { name } => {
                let description = Some(prompt.input).filter(|d| !d.trim().is_empty());
                self.open_picker(PickerPurpose::NewTemplate { name, description });
            }
            PromptPurpose::SaveAsTemplate => {
                let result = self.store.save_current_as_template(&prompt.input);
                if self.report(result).is_some() {
                    self.status = format!("Saved template {}", prompt.input.trim());
                }
            }
            PromptPurpose::RenameWorkout => {
                let result = self.store.rename_workout(&prompt.input);
                self.report(result);
            }
        }
    }

    fn submit_picker(&mut self, mut picker: PickerState) {
        if picker.marked.is_empty() {
            let highlighted = self
                .store
                .search_exercises(&picker.query)
                .get(picker.cursor)
                .map(|e| e.id.clone());
            picker.marked.extend(highlighted);
        }

        match picker.purpose {
            PickerPurpose::AddToWorkout => {
                let result = self.store.add_exercises(&picker.marked);
                if let Some(group) = self.report(result) {
                    self.exercise_cursor = self
                        .store
                        .workout()
                        .exercises
                        .len()
                        .saturating_sub(picker.marked.len());
                    self.set_cursor = 0;
                    self.status = match group {
                        Some(_) => format!("Added superset of {}", picker.marked.len()),
                        None => "Added exercise".into(),
                    };
                }
            }
            PickerPurpose::NewTemplate { name, description } => {
                let result =
                    self.store
                        .create_template(&name, description.as_deref(), &picker.marked);
                if self.report(result).is_some() {
                    self.template_cursor = 0;
                    self.status = format!("Created template {}", name.trim());
                }
            }
        }
    }

    /// Puts a rejection on the status line and keeps the success value.
    fn report<T>(&mut self, result: SessionResult<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.status = err.to_string();
                None
            }
        }
    }
}

fn step(current: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    current.saturating_add_signed(delta).min(len - 1)
}

pub fn format_weight(weight: f64) -> String {
    if weight == 0.0 {
        String::new()
    } else if weight.fract() == 0.0 {
        format!("{weight:.0}")
    } else {
        format!("{weight}")
    }
}
