//! Workout logger
//!
//! The wizard walks through four stages: reviewing the draft workout, selecting a muscle group,
//! selecting an exercise for that muscle group and entering the sets of the exercise. Adding an
//! exercise opens the set entry directly, going back from there leads to the muscle selection.
//! Finishing the set entry appends the exercise to the draft and returns to the review stage,
//! from which the whole draft is logged.

use chrono::NaiveDate;

use crate::{
    DraftExercise, DraftExerciseError, DraftSet, DraftWorkout, MuscleGroup, WorkoutDocument,
};

#[derive(strum::Display, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Review,
    MuscleSelect,
    ExerciseSelect,
    SetEntry,
}

impl Stage {
    #[must_use]
    pub fn number(self) -> u8 {
        match self {
            Stage::Review => 1,
            Stage::MuscleSelect => 2,
            Stage::ExerciseSelect => 3,
            Stage::SetEntry => 4,
        }
    }
}

/// Raw form input of the set currently being entered.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SetInput {
    pub weight: String,
    pub reps: String,
    pub note: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutLogger {
    stage: Stage,
    draft: DraftWorkout,
    muscle: Option<MuscleGroup>,
    candidate_exercises: Vec<String>,
    exercise: Option<String>,
    sets: Vec<DraftSet>,
    pub input: SetInput,
}

impl WorkoutLogger {
    #[must_use]
    pub fn new(date: NaiveDate) -> Self {
        Self {
            stage: Stage::Review,
            draft: DraftWorkout::new(date),
            muscle: None,
            candidate_exercises: vec![],
            exercise: None,
            sets: vec![],
            input: SetInput::default(),
        }
    }

    #[must_use]
    pub fn stage(&self) -> Stage {
        self.stage
    }

    #[must_use]
    pub fn draft(&self) -> &DraftWorkout {
        &self.draft
    }

    #[must_use]
    pub fn muscle(&self) -> Option<MuscleGroup> {
        self.muscle
    }

    #[must_use]
    pub fn candidate_exercises(&self) -> &[String] {
        &self.candidate_exercises
    }

    #[must_use]
    pub fn exercise(&self) -> Option<&str> {
        self.exercise.as_deref()
    }

    /// The sets entered for the current exercise.
    #[must_use]
    pub fn sets(&self) -> &[DraftSet] {
        &self.sets
    }

    pub fn set_date(&mut self, date: &str) -> Result<(), WizardError> {
        self.expect_stage(Stage::Review, "set date")?;
        self.draft.date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
            .map_err(|_| WizardError::InvalidDate(date.to_string()))?;
        Ok(())
    }

    pub fn set_notes(&mut self, notes: &str) -> Result<(), WizardError> {
        self.expect_stage(Stage::Review, "set notes")?;
        self.draft.notes = notes.to_string();
        Ok(())
    }

    /// Opens the set entry for a new exercise without a selected muscle group or exercise.
    pub fn add_exercise(&mut self) -> Result<(), WizardError> {
        self.expect_stage(Stage::Review, "add exercise")?;
        self.muscle = None;
        self.candidate_exercises.clear();
        self.clear_set_entry();
        self.stage = Stage::SetEntry;
        Ok(())
    }

    pub fn back(&mut self) -> Result<(), WizardError> {
        match self.stage {
            Stage::Review => {
                return Err(WizardError::NotAvailable {
                    action: "back",
                    stage: self.stage,
                });
            }
            Stage::MuscleSelect => self.stage = Stage::Review,
            Stage::ExerciseSelect => self.stage = Stage::MuscleSelect,
            Stage::SetEntry => {
                self.clear_set_entry();
                self.stage = Stage::MuscleSelect;
            }
        }
        Ok(())
    }

    /// Selects a muscle group. The candidate exercises have to be delivered afterwards by
    /// [`WorkoutLogger::receive_candidate_exercises`].
    pub fn select_muscle(&mut self, muscle: MuscleGroup) -> Result<(), WizardError> {
        self.expect_stage(Stage::MuscleSelect, "select muscle")?;
        self.muscle = Some(muscle);
        self.candidate_exercises.clear();
        self.stage = Stage::ExerciseSelect;
        Ok(())
    }

    /// Stores the exercises fetched for `muscle`. Returns false and drops the result if another
    /// muscle has been selected in the meantime.
    pub fn receive_candidate_exercises(
        &mut self,
        muscle: MuscleGroup,
        names: Vec<String>,
    ) -> bool {
        if self.muscle != Some(muscle) {
            return false;
        }
        self.candidate_exercises = names;
        true
    }

    pub fn select_exercise(&mut self, name: &str) -> Result<(), WizardError> {
        self.expect_stage(Stage::ExerciseSelect, "select exercise")?;
        self.clear_set_entry();
        self.exercise = Some(name.to_string());
        self.stage = Stage::SetEntry;
        Ok(())
    }

    /// Enters the set entry without selecting an exercise.
    pub fn forward(&mut self) -> Result<(), WizardError> {
        self.expect_stage(Stage::ExerciseSelect, "forward")?;
        self.clear_set_entry();
        self.stage = Stage::SetEntry;
        Ok(())
    }

    pub fn add_set(&mut self) -> Result<(), WizardError> {
        self.expect_stage(Stage::SetEntry, "add set")?;
        self.sets.push(DraftSet::parse(
            self.exercise.as_deref().unwrap_or_default(),
            &self.input.weight,
            &self.input.reps,
            &self.input.note,
        ));
        Ok(())
    }

    pub fn delete_set(&mut self, index: usize) -> Result<DraftSet, WizardError> {
        self.expect_stage(Stage::SetEntry, "delete set")?;
        if index >= self.sets.len() {
            return Err(WizardError::InvalidSetIndex(index));
        }
        Ok(self.sets.remove(index))
    }

    /// Appends the entered sets as one exercise to the draft and returns to the review.
    pub fn finish_exercise(&mut self) -> Result<(), WizardError> {
        self.expect_stage(Stage::SetEntry, "add")?;
        let exercise = DraftExercise::new(
            self.exercise.as_deref().unwrap_or_default(),
            self.sets.clone(),
        )?;
        self.draft.add_exercise(exercise);
        self.clear_set_entry();
        self.stage = Stage::Review;
        Ok(())
    }

    pub fn delete_exercise(&mut self, index: usize) -> Result<DraftExercise, WizardError> {
        self.expect_stage(Stage::Review, "delete exercise")?;
        self.draft
            .remove_exercise(index)
            .ok_or(WizardError::InvalidExerciseIndex(index))
    }

    /// The document to be written when the draft is logged.
    pub fn document(&self) -> Result<WorkoutDocument, WizardError> {
        self.expect_stage(Stage::Review, "log")?;
        Ok(self.draft.to_document())
    }

    /// Discards the draft and starts over.
    pub fn reset(&mut self, date: NaiveDate) {
        *self = Self::new(date);
    }

    fn expect_stage(&self, stage: Stage, action: &'static str) -> Result<(), WizardError> {
        if self.stage == stage {
            Ok(())
        } else {
            Err(WizardError::NotAvailable {
                action,
                stage: self.stage,
            })
        }
    }

    fn clear_set_entry(&mut self) {
        self.exercise = None;
        self.sets.clear();
        self.input = SetInput::default();
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum WizardError {
    #[error("Action \"{action}\" is not available in stage {stage}")]
    NotAvailable { action: &'static str, stage: Stage },
    #[error("Invalid date \"{0}\"")]
    InvalidDate(String),
    #[error("No set at index {0}")]
    InvalidSetIndex(usize),
    #[error("No exercise at index {0}")]
    InvalidExerciseIndex(usize),
    #[error(transparent)]
    Exercise(#[from] DraftExerciseError),
}
