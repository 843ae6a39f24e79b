//! Saved workout templates, most recent first.

use chrono::{DateTime, Utc};

use crate::error::{SessionError, SessionResult};
use crate::models::{Exercise, TemplateId, WorkoutTemplate};

#[derive(Debug, Clone, Default)]
pub struct TemplateLibrary {
    templates: Vec<WorkoutTemplate>,
}

impl TemplateLibrary {
    pub fn templates(&self) -> &[WorkoutTemplate] {
        &self.templates
    }

    pub fn get(&self, id: TemplateId) -> Option<&WorkoutTemplate> {
        self.templates.iter().find(|t| t.id == id)
    }

    /// Validates and prepends a new template.
    pub fn create(
        &mut self,
        id: TemplateId,
        name: &str,
        description: Option<&str>,
        exercises: Vec<Exercise>,
        now: DateTime<Utc>,
    ) -> SessionResult<&WorkoutTemplate> {
        let name = validate(name, &exercises)?;
        let description = description
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string);

        self.templates.insert(
            0,
            WorkoutTemplate {
                id,
                name,
                description,
                exercises,
                last_used: now,
            },
        );
        Ok(&self.templates[0])
    }

    pub fn remove(&mut self, id: TemplateId) -> Option<WorkoutTemplate> {
        let pos = self.templates.iter().position(|t| t.id == id)?;
        Some(self.templates.remove(pos))
    }

    /// Marks a template as used; list order is left alone.
    pub fn touch(&mut self, id: TemplateId, now: DateTime<Utc>) -> bool {
        match self.templates.iter_mut().find(|t| t.id == id) {
            Some(t) => {
                t.last_used = now;
                true
            }
            None => false,
        }
    }
}

fn validate(name: &str, exercises: &[Exercise]) -> SessionResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(SessionError::InvalidTemplateName);
    }
    if exercises.is_empty() {
        return Err(SessionError::InvalidTemplateExercises);
    }
    Ok(name.to_string())
}
