use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{ActiveWorkout, ExerciseSet, WeightUnit, WorkoutExercise};

/// Snapshot of a finished workout, handed to whoever records it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkoutSummary {
    pub name: String,
    pub started_at: Option<DateTime<Utc>>,
    pub ended_at: DateTime<Utc>,
    pub duration_secs: i64,
    pub weight_unit: WeightUnit,
    pub exercises: Vec<ExerciseSummary>,
    pub completed_sets: usize,
    pub total_sets: usize,
    pub total_volume: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExerciseSummary {
    pub name: String,
    pub completed_sets: usize,
    pub total_sets: usize,
    pub volume: f64,
    pub best_one_rm: Option<f64>,
}

/// Estimates 1RM using the Epley formula.
pub fn estimate_one_rm(weight: f64, reps: u32) -> f64 {
    if reps <= 1 {
        return weight;
    }
    weight * (1.0 + reps as f64 / 30.0)
}

pub fn set_volume(set: &ExerciseSet) -> f64 {
    set.weight * set.reps as f64
}

/// Volume over completed sets. Set type never changes the total.
pub fn exercise_volume(exercise: &WorkoutExercise) -> f64 {
    completed(exercise).map(set_volume).sum()
}

/// Best estimated 1RM among completed sets that moved any weight.
pub fn best_one_rm(exercise: &WorkoutExercise) -> Option<f64> {
    completed(exercise)
        .filter(|s| s.weight > 0.0 && s.reps > 0)
        .map(|s| estimate_one_rm(s.weight, s.reps))
        .max_by(|a, b| a.total_cmp(b))
}

fn completed(exercise: &WorkoutExercise) -> impl Iterator<Item = &ExerciseSet> {
    exercise.sets.iter().filter(|s| s.completed)
}

pub fn summarize(workout: &ActiveWorkout, ended_at: DateTime<Utc>) -> WorkoutSummary {
    let exercises: Vec<ExerciseSummary> = workout
        .exercises
        .iter()
        .map(|ex| ExerciseSummary {
            name: ex.exercise.name.clone(),
            completed_sets: ex.completed_sets(),
            total_sets: ex.sets.len(),
            volume: exercise_volume(ex),
            best_one_rm: best_one_rm(ex),
        })
        .collect();

    WorkoutSummary {
        name: workout.name.clone(),
        started_at: workout.start_time,
        ended_at,
        duration_secs: workout
            .elapsed(ended_at)
            .map(|d| d.num_seconds())
            .unwrap_or(0),
        weight_unit: workout.weight_unit,
        completed_sets: exercises.iter().map(|e| e.completed_sets).sum(),
        total_sets: exercises.iter().map(|e| e.total_sets).sum(),
        total_volume: exercises.iter().map(|e| e.volume).sum(),
        exercises,
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::models::{Exercise, SetId, SetType};

    fn set(weight: f64, reps: u32, completed: bool, set_type: SetType) -> ExerciseSet {
        ExerciseSet {
            id: SetId(0),
            weight,
            reps,
            completed,
            set_type,
            rest_time: 60,
        }
    }

    fn bench(sets: Vec<ExerciseSet>) -> WorkoutExercise {
        WorkoutExercise {
            exercise: Exercise::new("1", "Bench Press", "Chest"),
            sets,
            is_super_set: false,
            super_set_group: None,
        }
    }

    #[test]
    fn estimates_one_rm_with_epley_formula() {
        assert_eq!(estimate_one_rm(100.0, 1), 100.0);
        assert_eq!(estimate_one_rm(120.0, 0), 120.0);
        assert!((estimate_one_rm(100.0, 5) - 116.666).abs() < 0.01);
    }

    #[test]
    fn volume_counts_completed_sets_of_every_type() {
        let ex = bench(vec![
            set(60.0, 10, true, SetType::Warmup),
            set(100.0, 5, true, SetType::Regular),
            set(80.0, 8, true, SetType::Dropset),
            set(100.0, 5, false, SetType::Regular),
        ]);
        assert_eq!(exercise_volume(&ex), 600.0 + 500.0 + 640.0);
    }

    #[test]
    fn best_one_rm_ignores_open_and_empty_sets() {
        let ex = bench(vec![
            set(0.0, 0, true, SetType::Regular),
            set(100.0, 5, true, SetType::Regular),
            set(140.0, 3, false, SetType::Regular),
        ]);
        assert!((best_one_rm(&ex).unwrap() - 116.666).abs() < 0.01);
        assert_eq!(best_one_rm(&bench(vec![set(0.0, 0, false, SetType::Regular)])), None);
    }

    #[test]
    fn summarizes_workout_totals() {
        let start = Utc::now();
        let workout = ActiveWorkout {
            name: "Push".into(),
            exercises: vec![
                bench(vec![set(100.0, 5, true, SetType::Regular)]),
                bench(vec![
                    set(50.0, 10, true, SetType::Regular),
                    set(50.0, 10, false, SetType::Regular),
                ]),
            ],
            start_time: Some(start),
            is_active: true,
            weight_unit: WeightUnit::Kg,
            default_rest_time: 60,
        };

        let summary = summarize(&workout, start + Duration::minutes(45));
        assert_eq!(summary.duration_secs, 45 * 60);
        assert_eq!(summary.completed_sets, 2);
        assert_eq!(summary.total_sets, 3);
        assert_eq!(summary.total_volume, 1000.0);
        assert_eq!(summary.exercises.len(), 2);
        assert_eq!(summary.exercises[1].completed_sets, 1);
    }
}
