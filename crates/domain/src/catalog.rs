use crate::{MuscleGroup, ReadError};

#[allow(async_fn_in_trait)]
pub trait ExerciseCatalogService {
    async fn get_exercises_by_muscle(
        &self,
        muscle: MuscleGroup,
    ) -> Result<Vec<CatalogExercise>, ReadError>;
}

#[allow(async_fn_in_trait)]
pub trait ExerciseCatalogRepository {
    async fn read_exercises_by_muscle(
        &self,
        muscle: MuscleGroup,
    ) -> Result<Vec<CatalogExercise>, ReadError>;
}

/// An exercise as listed by the external exercise catalog.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CatalogExercise {
    pub name: String,
    pub kind: String,
    pub muscle: String,
    pub equipment: String,
    pub difficulty: String,
    pub instructions: String,
}
