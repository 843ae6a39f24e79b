//! The one workout store an app instance owns.
//!
//! All state lives behind `&mut self` methods; readers only get shared
//! references. Transitions that need the user's consent are queued as alerts
//! and run from [`WorkoutStore::respond`].

use chrono::{Duration, Utc};
use tracing::{debug, info, warn};

use crate::alerts::{Alert, AlertId, AlertQueue, PendingAction};
use crate::catalog::ExerciseCatalog;
use crate::error::{SessionError, SessionResult};
use crate::logic::{WorkoutSummary, summarize};
use crate::models::{
    ActiveWorkout, Exercise, IdSequence, SetId, SetType, SetUpdate, SupersetGroup, TemplateId,
    WeightUnit, WorkoutExercise, WorkoutTemplate,
};
use crate::session::workout_exercise;
use crate::settings::SessionSettings;
use crate::templates::TemplateLibrary;

/// What answering the front alert did.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Dismissed,
    Declined(PendingAction),
    Started,
    Finished(WorkoutSummary),
    Cancelled,
    TemplateDeleted(WorkoutTemplate),
}

#[derive(Debug, Clone)]
pub struct WorkoutStore {
    settings: SessionSettings,
    catalog: ExerciseCatalog,
    templates: TemplateLibrary,
    workout: ActiveWorkout,
    alerts: AlertQueue,
    ids: IdSequence,
}

impl Default for WorkoutStore {
    fn default() -> Self {
        Self::new(SessionSettings::default(), ExerciseCatalog::builtin())
    }
}

impl WorkoutStore {
    pub fn new(settings: SessionSettings, catalog: ExerciseCatalog) -> Self {
        Self {
            workout: ActiveWorkout::idle(&settings),
            settings,
            catalog,
            templates: TemplateLibrary::default(),
            alerts: AlertQueue::default(),
            ids: IdSequence::default(),
        }
    }

    // Reads ------------------------------------------------------------------

    pub fn workout(&self) -> &ActiveWorkout {
        &self.workout
    }

    pub fn is_active(&self) -> bool {
        self.workout.is_active
    }

    pub fn elapsed(&self) -> Option<Duration> {
        self.workout.elapsed(Utc::now())
    }

    pub fn templates(&self) -> &[WorkoutTemplate] {
        self.templates.templates()
    }

    pub fn template(&self, id: TemplateId) -> Option<&WorkoutTemplate> {
        self.templates.get(id)
    }

    pub fn catalog(&self) -> &ExerciseCatalog {
        &self.catalog
    }

    pub fn search_exercises(&self, query: &str) -> Vec<&Exercise> {
        self.catalog.search(query)
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    pub fn alerts(&self) -> &AlertQueue {
        &self.alerts
    }

    pub fn pending_alert(&self) -> Option<&Alert> {
        self.alerts.front()
    }

    // Session lifecycle ------------------------------------------------------

    pub fn start_empty(&mut self) -> SessionResult<()> {
        let checked = self.workout.ensure_idle();
        self.check(checked)?;
        let name = self.settings.workout_name.clone();
        self.workout.begin(name, Vec::new(), Utc::now());
        info!(name = %self.workout.name, "started empty workout");
        Ok(())
    }

    /// Asks the user to confirm starting from a template.
    pub fn start_from_template(&mut self, id: TemplateId) -> SessionResult<AlertId> {
        let checked = self.workout.ensure_idle().and_then(|()| {
            self.templates
                .get(id)
                .map(|t| (t.name.clone(), t.exercises.len()))
                .ok_or(SessionError::TemplateNotFound(id))
        });
        let (name, count) = self.check(checked)?;
        let message = format!("Start a workout from \"{name}\" ({count} exercises)?");
        Ok(self.alerts.confirm(
            &mut self.ids,
            PendingAction::StartFromTemplate(id),
            "Start Workout",
            message,
            false,
        ))
    }

    /// Asks the user to confirm finishing the session.
    pub fn finish(&mut self) -> SessionResult<AlertId> {
        let checked = self.workout.ensure_active();
        self.check(checked)?;
        Ok(self.alerts.confirm(
            &mut self.ids,
            PendingAction::FinishWorkout,
            "Finish Workout",
            "Are you sure you want to finish this workout?",
            false,
        ))
    }

    /// Asks the user to confirm throwing the session away.
    pub fn cancel(&mut self) -> SessionResult<AlertId> {
        let checked = self.workout.ensure_active();
        self.check(checked)?;
        Ok(self.alerts.confirm(
            &mut self.ids,
            PendingAction::CancelWorkout,
            "Cancel Workout",
            "Are you sure you want to cancel this workout? All progress will be lost.",
            true,
        ))
    }

    pub fn rename_workout(&mut self, name: &str) -> SessionResult<()> {
        let renamed = self.workout.rename(name);
        self.check(renamed)
    }

    // Exercises and sets -----------------------------------------------------

    /// Adds exercises by catalog id. Several at once form one superset.
    pub fn add_exercises<S: AsRef<str>>(
        &mut self,
        exercise_ids: &[S],
    ) -> SessionResult<Option<SupersetGroup>> {
        let resolved = self
            .workout
            .ensure_active()
            .and_then(|()| self.resolve(exercise_ids));
        let exercises = self.check(resolved)?;
        let names: Vec<String> = exercises.iter().map(|e| e.name.clone()).collect();

        let pushed = self.workout.push_exercises(exercises, &mut self.ids);
        let group = self.check(pushed)?;
        debug!(?names, ?group, "added exercises");
        Ok(group)
    }

    pub fn add_set(&mut self, exercise: usize) -> SessionResult<SetId> {
        let added = self.workout.add_set(exercise, &mut self.ids);
        self.check(added)
    }

    pub fn update_set(
        &mut self,
        exercise: usize,
        set: usize,
        update: SetUpdate,
    ) -> SessionResult<()> {
        let updated = self.workout.update_set(exercise, set, update);
        self.check(updated)
    }

    pub fn toggle_set_complete(&mut self, exercise: usize, set: usize) -> SessionResult<bool> {
        let toggled = self.workout.toggle_set_complete(exercise, set);
        self.check(toggled)
    }

    /// Refuses to remove an exercise's last set.
    pub fn delete_set(&mut self, exercise: usize, set: usize) -> SessionResult<()> {
        let deleted = self.workout.delete_set(exercise, set);
        let removed = self.check(deleted)?;
        debug!(exercise, set, id = removed.id.0, "deleted set");
        Ok(())
    }

    pub fn delete_exercise(&mut self, exercise: usize) -> SessionResult<WorkoutExercise> {
        let deleted = self.workout.delete_exercise(exercise);
        let removed = self.check(deleted)?;
        debug!(exercise, name = %removed.exercise.name, "deleted exercise");
        Ok(removed)
    }

    pub fn set_type(&mut self, exercise: usize, set: usize, set_type: SetType) -> SessionResult<()> {
        let changed = self.workout.set_type(exercise, set, set_type);
        self.check(changed)
    }

    pub fn set_rest_time(&mut self, exercise: usize, set: usize, seconds: u32) -> SessionResult<()> {
        let changed = self.workout.set_rest_time(exercise, set, seconds);
        self.check(changed)
    }

    pub fn toggle_weight_unit(&mut self) -> WeightUnit {
        let unit = self.workout.toggle_weight_unit();
        debug!(unit = unit.label(), "weight unit toggled");
        unit
    }

    pub fn set_default_rest_time(&mut self, seconds: u32) {
        self.workout.set_default_rest_time(seconds);
        debug!(seconds, "default rest time changed");
    }

    // Templates --------------------------------------------------------------

    pub fn create_template<S: AsRef<str>>(
        &mut self,
        name: &str,
        description: Option<&str>,
        exercise_ids: &[S],
    ) -> SessionResult<TemplateId> {
        let resolved = if name.trim().is_empty() {
            Err(SessionError::InvalidTemplateName)
        } else {
            self.resolve(exercise_ids)
        };
        let exercises = self.check(resolved)?;
        self.insert_template(name, description, exercises)
    }

    /// Saves the session's exercise selection (not its sets) as a template.
    pub fn save_current_as_template(&mut self, name: &str) -> SessionResult<TemplateId> {
        let checked = self.workout.ensure_active();
        self.check(checked)?;
        let exercises = self
            .workout
            .exercises
            .iter()
            .map(|e| e.exercise.clone())
            .collect();
        self.insert_template(name, None, exercises)
    }

    /// Asks the user to confirm deleting a template.
    pub fn delete_template(&mut self, id: TemplateId) -> SessionResult<AlertId> {
        let found = self
            .templates
            .get(id)
            .map(|t| t.name.clone())
            .ok_or(SessionError::TemplateNotFound(id));
        let name = self.check(found)?;
        let message = format!("Are you sure you want to delete \"{name}\"? This cannot be undone.");
        Ok(self.alerts.confirm(
            &mut self.ids,
            PendingAction::DeleteTemplate(id),
            "Delete Template",
            message,
            true,
        ))
    }

    /// Template editing is not built yet; tells the user so.
    pub fn edit_template(&mut self, id: TemplateId) -> SessionResult<AlertId> {
        let found = self
            .templates
            .get(id)
            .map(|_| ())
            .ok_or(SessionError::TemplateNotFound(id));
        self.check(found)?;
        Ok(self.alerts.notify(
            &mut self.ids,
            "Coming Soon",
            "Template editing is coming soon.",
        ))
    }

    fn insert_template(
        &mut self,
        name: &str,
        description: Option<&str>,
        exercises: Vec<Exercise>,
    ) -> SessionResult<TemplateId> {
        let id = self.ids.template_id();
        let created = self
            .templates
            .create(id, name, description, exercises, Utc::now())
            .map(|t| t.id);
        let id = self.check(created)?;
        info!(template = %id, "template created");
        Ok(id)
    }

    // Alerts -----------------------------------------------------------------

    /// Answers the front alert. Notices are dismissed either way.
    pub fn respond(&mut self, accept: bool) -> SessionResult<Outcome> {
        let alert = self.alerts.pop().ok_or(SessionError::NoPendingAlert)?;
        let Some(action) = alert.action() else {
            return Ok(Outcome::Dismissed);
        };
        if !accept {
            debug!(?action, "confirmation declined");
            return Ok(Outcome::Declined(action));
        }
        let outcome = self.run(action);
        self.check(outcome)
    }

    fn run(&mut self, action: PendingAction) -> SessionResult<Outcome> {
        match action {
            PendingAction::StartFromTemplate(id) => {
                self.workout.ensure_idle()?;
                let template = self
                    .templates
                    .get(id)
                    .ok_or(SessionError::TemplateNotFound(id))?;
                let name = template.name.clone();
                let picked = template.exercises.clone();

                let rest = self.workout.default_rest_time;
                let exercises = picked
                    .into_iter()
                    .map(|e| workout_exercise(e, rest, None, &mut self.ids))
                    .collect();
                let now = Utc::now();
                self.workout.begin(name, exercises, now);
                self.templates.touch(id, now);
                info!(template = %id, name = %self.workout.name, "started workout from template");
                Ok(Outcome::Started)
            }
            PendingAction::FinishWorkout => {
                self.workout.ensure_active()?;
                let summary = summarize(&self.workout, Utc::now());
                self.workout.reset(&self.settings);
                info!(
                    name = %summary.name,
                    duration_secs = summary.duration_secs,
                    completed_sets = summary.completed_sets,
                    "workout finished"
                );
                Ok(Outcome::Finished(summary))
            }
            PendingAction::CancelWorkout => {
                self.workout.ensure_active()?;
                self.workout.reset(&self.settings);
                info!("workout cancelled");
                Ok(Outcome::Cancelled)
            }
            PendingAction::DeleteTemplate(id) => {
                let removed = self
                    .templates
                    .remove(id)
                    .ok_or(SessionError::TemplateNotFound(id))?;
                info!(template = %id, "template deleted");
                Ok(Outcome::TemplateDeleted(removed))
            }
        }
    }

    // Helpers ----------------------------------------------------------------

    fn resolve<S: AsRef<str>>(&self, exercise_ids: &[S]) -> SessionResult<Vec<Exercise>> {
        exercise_ids
            .iter()
            .map(|id| {
                let id = id.as_ref();
                self.catalog
                    .get(id)
                    .cloned()
                    .ok_or_else(|| SessionError::UnknownExercise(id.to_string()))
            })
            .collect()
    }

    /// Logs a rejection and raises a notice when the user should see it.
    fn check<T>(&mut self, result: SessionResult<T>) -> SessionResult<T> {
        result.map_err(|err| {
            if let Some(title) = err.notice_title() {
                self.alerts.notify(&mut self.ids, title, err.to_string());
            }
            warn!(error = %err, "request rejected");
            err
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alerts::AlertKind;

    fn store_ab() -> WorkoutStore {
        let catalog = ExerciseCatalog::new(vec![
            Exercise::new("1", "A", "Chest"),
            Exercise::new("2", "B", "Back"),
            Exercise::new("3", "C", "Legs"),
        ])
        .unwrap();
        WorkoutStore::new(SessionSettings::default(), catalog)
    }

    fn started() -> WorkoutStore {
        let mut store = store_ab();
        store.start_empty().unwrap();
        store
    }

    fn drain(store: &mut WorkoutStore) {
        while store.respond(false).is_ok() {}
    }

    #[test]
    fn new_store_is_idle() {
        let store = WorkoutStore::default();
        let w = store.workout();
        assert!(!w.is_active);
        assert!(w.exercises.is_empty());
        assert!(w.start_time.is_none());
        assert!(store.elapsed().is_none());
    }

    #[test]
    fn start_empty_enters_session() {
        let mut store = store_ab();
        store.start_empty().unwrap();

        let w = store.workout();
        assert!(w.is_active);
        assert!(w.exercises.is_empty());
        assert!(w.start_time.is_some());
        assert_eq!(w.name, "New Workout");
        assert_eq!(store.start_empty(), Err(SessionError::AlreadyInSession));
    }

    #[test]
    fn start_from_template_needs_confirmation() {
        let mut store = store_ab();
        let id = store.create_template("Upper", None, &["1", "2"]).unwrap();

        store.start_from_template(id).unwrap();
        assert!(!store.is_active());
        assert_eq!(
            store.pending_alert().and_then(|a| a.action()),
            Some(PendingAction::StartFromTemplate(id))
        );

        assert_eq!(store.respond(true), Ok(Outcome::Started));
        let w = store.workout();
        assert!(w.is_active);
        assert_eq!(w.name, "Upper");

        let names: Vec<_> = w.exercises.iter().map(|e| e.exercise.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
        for ex in &w.exercises {
            assert_eq!(ex.sets.len(), 1);
            let set = &ex.sets[0];
            assert_eq!(set.weight, 0.0);
            assert_eq!(set.reps, 0);
            assert!(!set.completed);
            assert_eq!(set.set_type, SetType::Regular);
            assert_eq!(set.rest_time, 60);
            assert!(!ex.is_super_set);
            assert_eq!(ex.super_set_group, None);
        }
    }

    #[test]
    fn declining_template_start_keeps_idle() {
        let mut store = store_ab();
        let id = store.create_template("Upper", None, &["1"]).unwrap();
        store.start_from_template(id).unwrap();

        assert_eq!(
            store.respond(false),
            Ok(Outcome::Declined(PendingAction::StartFromTemplate(id)))
        );
        assert!(!store.is_active());
        assert!(store.alerts().is_empty());
    }

    #[test]
    fn starting_from_template_refreshes_last_used() {
        let mut store = store_ab();
        let id = store.create_template("Legs", None, &["3"]).unwrap();
        let before = store.template(id).unwrap().last_used;

        store.start_from_template(id).unwrap();
        store.respond(true).unwrap();
        assert!(store.template(id).unwrap().last_used >= before);
    }

    #[test]
    fn start_from_template_rejected_mid_session() {
        let mut store = store_ab();
        let id = store.create_template("Upper", None, &["1"]).unwrap();
        store.start_empty().unwrap();
        assert_eq!(
            store.start_from_template(id),
            Err(SessionError::AlreadyInSession)
        );
        assert_eq!(
            store.start_from_template(TemplateId(999)),
            Err(SessionError::AlreadyInSession)
        );
    }

    #[test]
    fn single_exercise_is_not_a_superset() {
        let mut store = started();
        assert_eq!(store.add_exercises(&["1"]), Ok(None));

        let ex = &store.workout().exercises[0];
        assert!(!ex.is_super_set);
        assert_eq!(ex.super_set_group, None);
        assert_eq!(ex.sets.len(), 1);
    }

    #[test]
    fn several_exercises_share_a_fresh_group() {
        let mut store = started();
        let first = store.add_exercises(&["1", "2"]).unwrap().unwrap();
        let second = store.add_exercises(&["2", "3"]).unwrap().unwrap();
        assert_ne!(first, second);

        let w = store.workout();
        assert_eq!(w.exercises.len(), 4);
        assert!(w.exercises.iter().all(|e| e.is_super_set));
        assert_eq!(w.exercises[0].super_set_group, Some(first));
        assert_eq!(w.exercises[1].super_set_group, Some(first));
        assert_eq!(w.exercises[2].super_set_group, Some(second));
        assert_eq!(w.exercises[3].super_set_group, Some(second));
    }

    #[test]
    fn add_exercises_validates_everything_first() {
        let mut store = store_ab();
        assert_eq!(store.add_exercises(&["1"]), Err(SessionError::NotInSession));

        store.start_empty().unwrap();
        assert_eq!(
            store.add_exercises(&["1", "nope"]),
            Err(SessionError::UnknownExercise("nope".into()))
        );
        assert_eq!(
            store.add_exercises::<&str>(&[]),
            Err(SessionError::NoExercisesSelected)
        );
        assert!(store.workout().exercises.is_empty());
        assert!(store.alerts().is_empty());
    }

    #[test]
    fn new_exercises_pick_up_default_rest() {
        let mut store = started();
        store.set_default_rest_time(90);
        store.add_exercises(&["1"]).unwrap();
        store.add_set(0).unwrap();

        let rests: Vec<_> = store.workout().exercises[0]
            .sets
            .iter()
            .map(|s| s.rest_time)
            .collect();
        assert_eq!(rests, vec![90, 90]);
    }

    #[test]
    fn default_rest_is_not_retroactive() {
        let mut store = started();
        store.add_exercises(&["1"]).unwrap();
        store.set_default_rest_time(180);
        assert_eq!(store.workout().exercises[0].sets[0].rest_time, 60);
        assert_eq!(store.workout().default_rest_time, 180);
    }

    #[test]
    fn delete_set_scenario() {
        let mut store = started();
        store.add_exercises(&["1"]).unwrap();
        store.add_set(0).unwrap();
        store.update_set(0, 1, SetUpdate::Reps(8)).unwrap();
        let second = store.workout().exercises[0].sets[1].id;

        store.delete_set(0, 0).unwrap();
        let sets = &store.workout().exercises[0].sets;
        assert_eq!(sets.len(), 1);
        assert_eq!(sets[0].id, second);
        assert_eq!(sets[0].reps, 8);

        let before = store.workout().clone();
        assert_eq!(
            store.delete_set(0, 0),
            Err(SessionError::LastSetDeletionRejected)
        );
        assert_eq!(store.workout(), &before);

        let notice = store.pending_alert().unwrap();
        assert_eq!(notice.kind, AlertKind::Notice);
        assert_eq!(notice.message, "An exercise must have at least one set");
        assert_eq!(store.respond(true), Ok(Outcome::Dismissed));
    }

    #[test]
    fn delete_set_removes_exactly_the_target() {
        let mut store = started();
        store.add_exercises(&["1"]).unwrap();
        store.add_set(0).unwrap();
        store.add_set(0).unwrap();
        let ids: Vec<_> = store.workout().exercises[0].sets.iter().map(|s| s.id).collect();

        store.delete_set(0, 1).unwrap();
        let left: Vec<_> = store.workout().exercises[0].sets.iter().map(|s| s.id).collect();
        assert_eq!(left, vec![ids[0], ids[2]]);
    }

    #[test]
    fn toggle_complete_is_an_involution() {
        let mut store = started();
        store.add_exercises(&["1", "2"]).unwrap();
        store.add_set(0).unwrap();
        let before = store.workout().clone();

        assert_eq!(store.toggle_set_complete(0, 1), Ok(true));
        let w = store.workout();
        assert!(w.exercises[0].sets[1].completed);
        assert!(!w.exercises[0].sets[0].completed);
        assert!(!w.exercises[1].sets[0].completed);

        assert_eq!(store.toggle_set_complete(0, 1), Ok(false));
        assert_eq!(store.workout(), &before);
    }

    #[test]
    fn set_type_and_rest_are_per_set() {
        let mut store = started();
        store.add_exercises(&["1"]).unwrap();
        store.add_set(0).unwrap();
        store.set_type(0, 0, SetType::Warmup).unwrap();
        store.set_rest_time(0, 0, 30).unwrap();

        let sets = &store.workout().exercises[0].sets;
        assert_eq!(sets[0].set_type, SetType::Warmup);
        assert_eq!(sets[0].rest_time, 30);
        assert_eq!(sets[1].set_type, SetType::Regular);
        assert_eq!(sets[1].rest_time, 60);
    }

    #[test]
    fn delete_exercise_allows_empty_workout() {
        let mut store = started();
        store.add_exercises(&["1"]).unwrap();
        let removed = store.delete_exercise(0).unwrap();
        assert_eq!(removed.exercise.name, "A");
        assert!(store.workout().exercises.is_empty());
        assert_eq!(store.delete_exercise(0), Err(SessionError::ExerciseNotFound(0)));
    }

    #[test]
    fn weight_unit_toggle_relabels_only() {
        let mut store = started();
        store.add_exercises(&["1"]).unwrap();
        store.update_set(0, 0, SetUpdate::Weight(60.0)).unwrap();

        assert_eq!(store.toggle_weight_unit(), WeightUnit::Lbs);
        assert_eq!(store.workout().exercises[0].sets[0].weight, 60.0);
    }

    #[test]
    fn finish_returns_summary_and_resets() {
        let mut store = started();
        store.add_exercises(&["1"]).unwrap();
        store.update_set(0, 0, SetUpdate::Weight(50.0)).unwrap();
        store.update_set(0, 0, SetUpdate::Reps(10)).unwrap();
        store.toggle_set_complete(0, 0).unwrap();
        store.toggle_weight_unit();

        store.finish().unwrap();
        assert!(store.is_active());

        let Ok(Outcome::Finished(summary)) = store.respond(true) else {
            panic!("expected a finished workout");
        };
        assert_eq!(summary.total_volume, 500.0);
        assert_eq!(summary.completed_sets, 1);
        assert_eq!(summary.weight_unit, WeightUnit::Lbs);

        let w = store.workout();
        assert!(!w.is_active);
        assert!(w.exercises.is_empty());
        assert!(w.start_time.is_none());
        assert_eq!(w.weight_unit, WeightUnit::Kg);
    }

    #[test]
    fn cancel_is_destructive_and_resets() {
        let mut store = started();
        store.add_exercises(&["1", "2"]).unwrap();

        store.cancel().unwrap();
        assert!(store.pending_alert().unwrap().is_destructive());
        assert_eq!(
            store.respond(false),
            Ok(Outcome::Declined(PendingAction::CancelWorkout))
        );
        assert_eq!(store.workout().exercises.len(), 2);

        store.cancel().unwrap();
        assert_eq!(store.respond(true), Ok(Outcome::Cancelled));
        assert!(!store.is_active());
        assert!(store.workout().exercises.is_empty());
    }

    #[test]
    fn finish_and_cancel_require_a_session() {
        let mut store = store_ab();
        assert_eq!(store.finish(), Err(SessionError::NotInSession));
        assert_eq!(store.cancel(), Err(SessionError::NotInSession));
        assert!(store.alerts().is_empty());
    }

    #[test]
    fn queued_confirmations_revalidate() {
        let mut store = started();
        store.finish().unwrap();
        store.cancel().unwrap();
        assert_eq!(store.finish().unwrap(), store.alerts().front().unwrap().id);
        assert_eq!(store.alerts().len(), 2);

        assert!(matches!(store.respond(true), Ok(Outcome::Finished(_))));
        assert_eq!(store.respond(true), Err(SessionError::NotInSession));
        assert!(store.alerts().is_empty());
    }

    #[test]
    fn respond_without_alerts_fails() {
        let mut store = store_ab();
        assert_eq!(store.respond(true), Err(SessionError::NoPendingAlert));
    }

    #[test]
    fn create_template_validation() {
        let mut store = store_ab();

        assert_eq!(
            store.create_template::<&str>("", None, &[]),
            Err(SessionError::InvalidTemplateName)
        );
        assert_eq!(
            store.create_template::<&str>("X", None, &[]),
            Err(SessionError::InvalidTemplateExercises)
        );
        assert!(store.templates().is_empty());
        assert_eq!(store.alerts().len(), 2);
        drain(&mut store);

        let before = Utc::now();
        let first = store.create_template("Old", None, &["2"]).unwrap();
        let id = store.create_template("X", Some("quick"), &["1"]).unwrap();
        let head = &store.templates()[0];
        assert_eq!(head.id, id);
        assert_ne!(head.id, first);
        assert_eq!(head.description.as_deref(), Some("quick"));
        assert_eq!(head.exercises[0].name, "A");
        assert!(head.last_used >= before);
        assert!(head.last_used - before < Duration::seconds(5));
    }

    #[test]
    fn save_current_keeps_exercises_not_sets() {
        let mut store = store_ab();
        assert_eq!(
            store.save_current_as_template("Mine"),
            Err(SessionError::NotInSession)
        );

        store.start_empty().unwrap();
        assert_eq!(
            store.save_current_as_template("Mine"),
            Err(SessionError::InvalidTemplateExercises)
        );

        store.add_exercises(&["3", "1"]).unwrap();
        store.add_set(0).unwrap();
        store.update_set(0, 0, SetUpdate::Weight(140.0)).unwrap();
        let id = store.save_current_as_template("Mine").unwrap();

        let template = store.template(id).unwrap();
        let names: Vec<_> = template.exercises.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["C", "A"]);
        assert!(store.is_active());
    }

    #[test]
    fn delete_template_needs_confirmation() {
        let mut store = store_ab();
        let keep = store.create_template("Keep", None, &["1"]).unwrap();
        let gone = store.create_template("Gone", None, &["2"]).unwrap();

        store.delete_template(gone).unwrap();
        assert_eq!(store.templates().len(), 2);
        store.respond(false).unwrap();
        assert_eq!(store.templates().len(), 2);

        store.delete_template(gone).unwrap();
        let Ok(Outcome::TemplateDeleted(removed)) = store.respond(true) else {
            panic!("expected deletion");
        };
        assert_eq!(removed.id, gone);
        assert_eq!(store.templates().len(), 1);
        assert_eq!(store.templates()[0].id, keep);
        assert_eq!(
            store.delete_template(gone),
            Err(SessionError::TemplateNotFound(gone))
        );
    }

    #[test]
    fn edit_template_is_a_placeholder() {
        let mut store = store_ab();
        let id = store.create_template("Push", None, &["1"]).unwrap();
        let before = store.templates().to_vec();

        store.edit_template(id).unwrap();
        assert_eq!(store.templates(), before.as_slice());
        assert_eq!(store.pending_alert().unwrap().title, "Coming Soon");
        assert_eq!(store.respond(true), Ok(Outcome::Dismissed));
        assert_eq!(
            store.edit_template(TemplateId(77)),
            Err(SessionError::TemplateNotFound(TemplateId(77)))
        );
    }

    #[test]
    fn rename_rejection_raises_notice() {
        let mut store = started();
        store.rename_workout("Evening Lift").unwrap();
        assert_eq!(store.workout().name, "Evening Lift");
        assert_eq!(
            store.rename_workout("   "),
            Err(SessionError::InvalidWorkoutName)
        );
        assert_eq!(store.alerts().len(), 1);
    }
}
