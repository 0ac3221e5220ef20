use socialift_domain::{ReadError, Workout, WorkoutService};

use crate::{Context, Navigator, Route};

#[derive(Default)]
pub struct Page {
    workouts: Vec<Workout>,
}

impl Page {
    /// Most recent first.
    #[must_use]
    pub fn workouts(&self) -> &[Workout] {
        &self.workouts
    }

    pub async fn load<S: WorkoutService, N>(
        &mut self,
        context: &Context<S, N>,
    ) -> Result<(), ReadError> {
        let mut workouts = context.service.get_workouts(&context.user.id).await?;
        workouts.sort_by(|a, b| b.document.date.cmp(&a.document.date));
        self.workouts = workouts;
        Ok(())
    }

    pub fn add_workout<S, N: Navigator>(&self, context: &Context<S, N>) {
        context.navigator.navigate(Route::WorkoutLogger);
    }
}
