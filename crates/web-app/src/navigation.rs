use socialift_domain::GroupID;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    Profile,
    Group { id: GroupID },
    WorkoutLog,
    WorkoutLogger,
}

impl Route {
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Route::Login => String::from("/login"),
            Route::Profile => String::from("/profile"),
            Route::Group { id } => format!("/group/{id}"),
            Route::WorkoutLog => String::from("/workouts"),
            Route::WorkoutLogger => String::from("/workouts/new"),
        }
    }
}

pub trait Navigator {
    fn navigate(&self, route: Route);
    fn go_back(&self);
}
