use chrono::NaiveDate;
use log::{debug, warn};
use socialift_domain::{
    CreateError, ExerciseCatalogService, MuscleGroup, Stage, WizardError, Workout,
    WorkoutLogger, WorkoutService,
};

use crate::{Context, Navigator, Route};

/// State of the workout logger page. Leaving the page drops it together with the draft.
pub struct Page {
    logger: WorkoutLogger,
}

impl Page {
    #[must_use]
    pub fn new(today: NaiveDate) -> Self {
        Self {
            logger: WorkoutLogger::new(today),
        }
    }

    #[must_use]
    pub fn logger(&self) -> &WorkoutLogger {
        &self.logger
    }

    pub fn logger_mut(&mut self) -> &mut WorkoutLogger {
        &mut self.logger
    }

    /// Leaves the page on the review stage, otherwise goes back one stage.
    pub fn back<S, N: Navigator>(&mut self, context: &Context<S, N>) {
        if self.logger.stage() == Stage::Review {
            context.navigator.go_back();
        } else if let Err(err) = self.logger.back() {
            warn!("{err}");
        }
    }

    /// Selects the muscle group and loads the matching exercises. A failed request results in
    /// an empty exercise list.
    pub async fn select_muscle<S: ExerciseCatalogService, N>(
        &mut self,
        context: &Context<S, N>,
        muscle: MuscleGroup,
    ) -> Result<(), WizardError> {
        self.logger.select_muscle(muscle)?;
        let names = context
            .service
            .get_exercises_by_muscle(muscle)
            .await
            .map(|exercises| exercises.into_iter().map(|e| e.name).collect())
            .unwrap_or_default();
        if !self.logger.receive_candidate_exercises(muscle, names) {
            debug!("dropped outdated exercises of {}", muscle.as_ref());
        }
        Ok(())
    }

    /// Writes the draft and shows the workout log once the write has completed. The draft is
    /// kept if the write fails.
    pub async fn log<S: WorkoutService, N: Navigator>(
        &mut self,
        context: &Context<S, N>,
        today: NaiveDate,
    ) -> Result<Workout, LogError> {
        let document = self.logger.document()?;
        let workout = context
            .service
            .log_workout(&context.user.id, document)
            .await?;
        self.logger.reset(today);
        context.navigator.navigate(Route::WorkoutLog);
        Ok(workout)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum LogError {
    #[error(transparent)]
    Wizard(#[from] WizardError),
    #[error(transparent)]
    Create(#[from] CreateError),
}
