//! Mutations on the active workout.
//!
//! Everything here is crate-private; callers go through [`crate::WorkoutStore`].

use chrono::{DateTime, Duration, Utc};

use crate::error::{SessionError, SessionResult};
use crate::models::{
    ActiveWorkout, Exercise, ExerciseSet, IdSequence, SetId, SetType, SetUpdate, SupersetGroup,
    WeightUnit, WorkoutExercise,
};
use crate::settings::SessionSettings;

impl ActiveWorkout {
    pub fn idle(settings: &SessionSettings) -> Self {
        Self {
            name: settings.workout_name.clone(),
            exercises: Vec::new(),
            start_time: None,
            is_active: false,
            weight_unit: settings.weight_unit,
            default_rest_time: settings.default_rest_time,
        }
    }

    pub fn exercise(&self, index: usize) -> SessionResult<&WorkoutExercise> {
        self.exercises
            .get(index)
            .ok_or(SessionError::ExerciseNotFound(index))
    }

    pub fn set(&self, exercise: usize, set: usize) -> SessionResult<&ExerciseSet> {
        self.exercise(exercise)?
            .sets
            .get(set)
            .ok_or(SessionError::SetNotFound { exercise, set })
    }

    pub fn elapsed(&self, now: DateTime<Utc>) -> Option<Duration> {
        self.start_time
            .map(|start| now.signed_duration_since(start).max(Duration::zero()))
    }

    /// Positions of every exercise in the given superset.
    pub fn superset_members(&self, group: SupersetGroup) -> Vec<usize> {
        self.exercises
            .iter()
            .enumerate()
            .filter(|(_, e)| e.super_set_group == Some(group))
            .map(|(i, _)| i)
            .collect()
    }

    pub(crate) fn ensure_active(&self) -> SessionResult<()> {
        if self.is_active {
            Ok(())
        } else {
            Err(SessionError::NotInSession)
        }
    }

    pub(crate) fn ensure_idle(&self) -> SessionResult<()> {
        if self.is_active {
            Err(SessionError::AlreadyInSession)
        } else {
            Ok(())
        }
    }

    pub(crate) fn begin(
        &mut self,
        name: String,
        exercises: Vec<WorkoutExercise>,
        now: DateTime<Utc>,
    ) {
        self.name = name;
        self.exercises = exercises;
        self.start_time = Some(now);
        self.is_active = true;
    }

    pub(crate) fn reset(&mut self, settings: &SessionSettings) {
        *self = Self::idle(settings);
    }

    pub(crate) fn rename(&mut self, name: &str) -> SessionResult<()> {
        self.ensure_active()?;
        let name = name.trim();
        if name.is_empty() {
            return Err(SessionError::InvalidWorkoutName);
        }
        self.name = name.to_string();
        Ok(())
    }

    /// Appends exercises; more than one at once forms a superset.
    pub(crate) fn push_exercises(
        &mut self,
        exercises: Vec<Exercise>,
        ids: &mut IdSequence,
    ) -> SessionResult<Option<SupersetGroup>> {
        self.ensure_active()?;
        if exercises.is_empty() {
            return Err(SessionError::NoExercisesSelected);
        }

        let group = (exercises.len() > 1).then(|| ids.superset_group());
        let rest = self.default_rest_time;
        self.exercises.extend(
            exercises
                .into_iter()
                .map(|exercise| workout_exercise(exercise, rest, group, ids)),
        );
        Ok(group)
    }

    pub(crate) fn add_set(&mut self, exercise: usize, ids: &mut IdSequence) -> SessionResult<SetId> {
        let rest = self.default_rest_time;
        let ex = self.exercise_mut(exercise)?;
        let id = ids.set_id();
        ex.sets.push(ExerciseSet::fresh(id, rest));
        Ok(id)
    }

    pub(crate) fn update_set(
        &mut self,
        exercise: usize,
        set: usize,
        update: SetUpdate,
    ) -> SessionResult<()> {
        let target = self.set_mut(exercise, set)?;
        match update {
            SetUpdate::Weight(weight) => target.weight = weight,
            SetUpdate::Reps(reps) => target.reps = reps,
        }
        Ok(())
    }

    /// Returns the new completion state.
    pub(crate) fn toggle_set_complete(&mut self, exercise: usize, set: usize) -> SessionResult<bool> {
        let target = self.set_mut(exercise, set)?;
        target.completed = !target.completed;
        Ok(target.completed)
    }

    pub(crate) fn delete_set(&mut self, exercise: usize, set: usize) -> SessionResult<ExerciseSet> {
        let ex = self.exercise_mut(exercise)?;
        if set >= ex.sets.len() {
            return Err(SessionError::SetNotFound { exercise, set });
        }
        if ex.sets.len() == 1 {
            return Err(SessionError::LastSetDeletionRejected);
        }
        Ok(ex.sets.remove(set))
    }

    pub(crate) fn delete_exercise(&mut self, exercise: usize) -> SessionResult<WorkoutExercise> {
        self.ensure_active()?;
        if exercise >= self.exercises.len() {
            return Err(SessionError::ExerciseNotFound(exercise));
        }
        Ok(self.exercises.remove(exercise))
    }

    pub(crate) fn set_type(
        &mut self,
        exercise: usize,
        set: usize,
        set_type: SetType,
    ) -> SessionResult<()> {
        self.set_mut(exercise, set)?.set_type = set_type;
        Ok(())
    }

    pub(crate) fn set_rest_time(
        &mut self,
        exercise: usize,
        set: usize,
        seconds: u32,
    ) -> SessionResult<()> {
        self.set_mut(exercise, set)?.rest_time = seconds;
        Ok(())
    }

    /// Relabels the unit; stored weights keep their numbers.
    pub(crate) fn toggle_weight_unit(&mut self) -> WeightUnit {
        self.weight_unit = self.weight_unit.toggled();
        self.weight_unit
    }

    pub(crate) fn set_default_rest_time(&mut self, seconds: u32) {
        self.default_rest_time = seconds;
    }

    fn exercise_mut(&mut self, index: usize) -> SessionResult<&mut WorkoutExercise> {
        self.ensure_active()?;
        self.exercises
            .get_mut(index)
            .ok_or(SessionError::ExerciseNotFound(index))
    }

    fn set_mut(&mut self, exercise: usize, set: usize) -> SessionResult<&mut ExerciseSet> {
        self.exercise_mut(exercise)?
            .sets
            .get_mut(set)
            .ok_or(SessionError::SetNotFound { exercise, set })
    }
}

/// A workout entry with one blank set.
pub(crate) fn workout_exercise(
    exercise: Exercise,
    rest_time: u32,
    group: Option<SupersetGroup>,
    ids: &mut IdSequence,
) -> WorkoutExercise {
    WorkoutExercise {
        exercise,
        sets: vec![ExerciseSet::fresh(ids.set_id(), rest_time)],
        is_super_set: group.is_some(),
        super_set_group: group,
    }
}
