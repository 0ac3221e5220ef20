//! Exercise catalog
//!
//! Exercises are listed by an external API authenticated by an API key.

use gloo_net::http::Request;
use serde::{Deserialize, Serialize};
use socialift_domain as domain;

use crate::rest::{FetchError, REST, SendRequest};

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Exercise {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub muscle: String,
    pub equipment: String,
    pub difficulty: String,
    pub instructions: String,
}

impl From<Exercise> for domain::CatalogExercise {
    fn from(value: Exercise) -> Self {
        Self {
            name: value.name,
            kind: value.kind,
            muscle: value.muscle,
            equipment: value.equipment,
            difficulty: value.difficulty,
            instructions: value.instructions,
        }
    }
}

impl<S: SendRequest> REST<S> {
    #[must_use]
    pub fn exercises_url(&self) -> String {
        format!(
            "{}/exercises",
            self.settings.exercise_api_url.trim_end_matches('/')
        )
    }
}

impl<S: SendRequest> domain::ExerciseCatalogRepository for REST<S> {
    async fn read_exercises_by_muscle(
        &self,
        muscle: domain::MuscleGroup,
    ) -> Result<Vec<domain::CatalogExercise>, domain::ReadError> {
        let request = Request::get(&self.exercises_url())
            .query([("muscle", muscle.as_ref())])
            .header("X-Api-Key", &self.settings.exercise_api_key)
            .build()
            .map_err(FetchError::from)?;
        let exercises: Vec<Exercise> = self.fetch(request).await?;
        Ok(exercises.into_iter().map(Into::into).collect())
    }
}
