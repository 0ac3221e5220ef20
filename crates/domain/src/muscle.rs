use std::slice::Iter;

use strum::{AsRefStr, EnumString};

/// Muscle groups recognized by the exercise catalog.
///
/// The string form (`biceps`, `lower_back`, ...) is the identifier used when querying the
/// catalog.
#[derive(AsRefStr, EnumString, Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
#[strum(serialize_all = "snake_case")]
pub enum MuscleGroup {
    Abdominals,
    Abductors,
    Adductors,
    Biceps,
    Calves,
    Chest,
    Forearms,
    Glutes,
    Hamstrings,
    Lats,
    LowerBack,
    MiddleBack,
    Neck,
    Quadriceps,
    Traps,
    Triceps,
}

impl MuscleGroup {
    pub fn iter() -> Iter<'static, MuscleGroup> {
        static MUSCLE_GROUPS: [MuscleGroup; 16] = [
            MuscleGroup::Abdominals,
            MuscleGroup::Abductors,
            MuscleGroup::Adductors,
            MuscleGroup::Biceps,
            MuscleGroup::Calves,
            MuscleGroup::Chest,
            MuscleGroup::Forearms,
            MuscleGroup::Glutes,
            MuscleGroup::Hamstrings,
            MuscleGroup::Lats,
            MuscleGroup::LowerBack,
            MuscleGroup::MiddleBack,
            MuscleGroup::Neck,
            MuscleGroup::Quadriceps,
            MuscleGroup::Traps,
            MuscleGroup::Triceps,
        ];
        MUSCLE_GROUPS.iter()
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            MuscleGroup::Abdominals => "Abdominals",
            MuscleGroup::Abductors => "Abductors",
            MuscleGroup::Adductors => "Adductors",
            MuscleGroup::Biceps => "Biceps",
            MuscleGroup::Calves => "Calves",
            MuscleGroup::Chest => "Chest",
            MuscleGroup::Forearms => "Forearms",
            MuscleGroup::Glutes => "Glutes",
            MuscleGroup::Hamstrings => "Hamstrings",
            MuscleGroup::Lats => "Lats",
            MuscleGroup::LowerBack => "Lower Back",
            MuscleGroup::MiddleBack => "Middle Back",
            MuscleGroup::Neck => "Neck",
            MuscleGroup::Quadriceps => "Quadriceps",
            MuscleGroup::Traps => "Traps",
            MuscleGroup::Triceps => "Triceps",
        }
    }
}
