//! Exercise catalog and search.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::{SessionError, SessionResult};
use crate::models::Exercise;

#[derive(Debug, Clone)]
pub struct ExerciseCatalog {
    exercises: Vec<Exercise>,
}

impl ExerciseCatalog {
    /// Builds a catalog, rejecting duplicate ids.
    pub fn new(exercises: Vec<Exercise>) -> SessionResult<Self> {
        let mut seen = HashSet::new();
        for ex in &exercises {
            if !seen.insert(ex.id.as_str()) {
                return Err(SessionError::InvalidCatalog(format!(
                    "duplicate exercise id '{}'",
                    ex.id
                )));
            }
        }
        Ok(Self { exercises })
    }

    /// The exercises shipped with the app.
    pub fn builtin() -> Self {
        let exercises = vec![
            Exercise::new("1", "Bench Press", "Chest").with_equipment("Barbell"),
            Exercise::new("2", "Incline Dumbbell Press", "Chest").with_equipment("Dumbbell"),
            Exercise::new("3", "Push Up", "Chest"),
            Exercise::new("4", "Deadlift", "Back").with_equipment("Barbell"),
            Exercise::new("5", "Pull Up", "Back").with_equipment("Pull-up Bar"),
            Exercise::new("6", "Bent Over Row", "Back").with_equipment("Barbell"),
            Exercise::new("7", "Lat Pulldown", "Back").with_equipment("Cable"),
            Exercise::new("8", "Squat", "Legs").with_equipment("Barbell"),
            Exercise::new("9", "Leg Press", "Legs").with_equipment("Machine"),
            Exercise::new("10", "Romanian Deadlift", "Legs").with_equipment("Barbell"),
            Exercise::new("11", "Walking Lunge", "Legs").with_equipment("Dumbbell"),
            Exercise::new("12", "Overhead Press", "Shoulders").with_equipment("Barbell"),
            Exercise::new("13", "Lateral Raise", "Shoulders").with_equipment("Dumbbell"),
            Exercise::new("14", "Bicep Curl", "Arms").with_equipment("Dumbbell"),
            Exercise::new("15", "Tricep Pushdown", "Arms").with_equipment("Cable"),
            Exercise::new("16", "Plank", "Core"),
            Exercise::new("17", "Hanging Leg Raise", "Core").with_equipment("Pull-up Bar"),
            Exercise::new("18", "Rowing", "Cardio").with_equipment("Machine"),
        ];
        Self { exercises }
    }

    /// Parses a JSON array of exercises.
    pub fn from_json(json: &str) -> SessionResult<Self> {
        let exercises: Vec<Exercise> = serde_json::from_str(json)?;
        Self::new(exercises)
    }

    pub fn load(path: &Path) -> SessionResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn exercises(&self) -> &[Exercise] {
        &self.exercises
    }

    pub fn get(&self, id: &str) -> Option<&Exercise> {
        self.exercises.iter().find(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for ex in &self.exercises {
            if !out.contains(&ex.category.as_str()) {
                out.push(&ex.category);
            }
        }
        out
    }

    pub fn search(&self, query: &str) -> Vec<&Exercise> {
        filter_exercises(&self.exercises, query)
    }
}

impl Default for ExerciseCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Case-insensitive substring match on name or category.
///
/// A blank query returns every exercise in catalog order.
pub fn filter_exercises<'a>(exercises: &'a [Exercise], query: &str) -> Vec<&'a Exercise> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return exercises.iter().collect();
    }
    exercises
        .iter()
        .filter(|e| {
            e.name.to_lowercase().contains(&query) || e.category.to_lowercase().contains(&query)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names<'a>(found: &[&'a Exercise]) -> Vec<&'a str> {
        found.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn empty_query_returns_everything() {
        let catalog = ExerciseCatalog::builtin();
        assert_eq!(catalog.search("").len(), catalog.len());
        assert_eq!(catalog.search("   ").len(), catalog.len());
    }

    #[test]
    fn matches_name_case_insensitively() {
        let catalog = ExerciseCatalog::builtin();
        let found = catalog.search("PRESS");
        assert!(names(&found).contains(&"Bench Press"));
        assert!(names(&found).contains(&"Leg Press"));
        assert!(!names(&found).contains(&"Squat"));
    }

    #[test]
    fn matches_category() {
        let catalog = ExerciseCatalog::builtin();
        let found = catalog.search("core");
        assert_eq!(names(&found), vec!["Plank", "Hanging Leg Raise"]);
    }

    #[test]
    fn no_match_is_empty() {
        let catalog = ExerciseCatalog::builtin();
        assert!(catalog.search("zumba").is_empty());
    }

    #[test]
    fn categories_keep_first_seen_order() {
        let catalog = ExerciseCatalog::builtin();
        assert_eq!(
            catalog.categories(),
            vec!["Chest", "Back", "Legs", "Shoulders", "Arms", "Core", "Cardio"]
        );
    }

    #[test]
    fn loads_json_catalog() {
        let json = r#"[
            {"id": "a", "name": "Goblet Squat", "category": "Legs", "equipment": "Kettlebell"},
            {"id": "b", "name": "Dead Bug", "category": "Core"}
        ]"#;
        let catalog = ExerciseCatalog::from_json(json).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(
            catalog.get("a").and_then(|e| e.equipment.as_deref()),
            Some("Kettlebell")
        );
        assert!(catalog.get("b").unwrap().icon.is_none());
    }

    #[test]
    fn rejects_duplicate_ids() {
        let json = r#"[
            {"id": "1", "name": "A", "category": "X"},
            {"id": "1", "name": "B", "category": "Y"}
        ]"#;
        let err = ExerciseCatalog::from_json(json).unwrap_err();
        assert!(matches!(err, SessionError::InvalidCatalog(_)));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            ExerciseCatalog::from_json("{not json"),
            Err(SessionError::InvalidCatalog(_))
        ));
    }

    #[test]
    fn loads_exercises_from_a_file() {
        let path = std::env::temp_dir().join(format!("spotter-catalog-{}.json", std::process::id()));
        fs::write(
            &path,
            r#"[{"id": "10", "name": "Farmer Carry", "category": "Full Body"}]"#,
        )
        .unwrap();

        let loaded = ExerciseCatalog::load(&path);
        fs::remove_file(&path).unwrap();

        let catalog = loaded.unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("10").unwrap().name, "Farmer Carry");
    }

    #[test]
    fn missing_file_is_an_invalid_catalog() {
        assert!(matches!(
            ExerciseCatalog::load(Path::new("/nonexistent/spotter/exercises.json")),
            Err(SessionError::InvalidCatalog(_))
        ));
    }
}
