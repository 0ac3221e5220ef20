use std::{collections::BTreeMap, fmt, str::FromStr};

use chrono::NaiveDate;
use derive_more::{Deref, Display};

use crate::{CreateError, ReadError, UserID};

#[allow(async_fn_in_trait)]
pub trait WorkoutService {
    async fn get_workouts(&self, user_id: &UserID) -> Result<Vec<Workout>, ReadError>;
    async fn log_workout(
        &self,
        user_id: &UserID,
        document: WorkoutDocument,
    ) -> Result<Workout, CreateError>;
}

#[allow(async_fn_in_trait)]
pub trait WorkoutRepository {
    async fn read_workouts(&self, user_id: &UserID) -> Result<Vec<Workout>, ReadError>;
    async fn create_workout(
        &self,
        user_id: &UserID,
        document: WorkoutDocument,
    ) -> Result<Workout, CreateError>;
}

/// A logged workout as stored in the user's workout collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Workout {
    pub id: WorkoutID,
    pub document: WorkoutDocument,
}

#[derive(Deref, Display, Debug, Default, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WorkoutID(String);

impl From<&str> for WorkoutID {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for WorkoutID {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DraftSet {
    pub exercise: String,
    pub weight: f64,
    pub reps: f64,
    pub note: String,
}

impl DraftSet {
    /// Builds a set from raw form input.
    ///
    /// Weight and reps are coerced with [`parse_number`], so invalid input is kept as NaN.
    #[must_use]
    pub fn parse(exercise: &str, weight: &str, reps: &str, note: &str) -> Self {
        Self {
            exercise: exercise.to_string(),
            weight: parse_number(weight),
            reps: parse_number(reps),
            note: note.to_string(),
        }
    }
}

/// Numeric coercion of form input: blank input is zero, anything unparsable is NaN.
///
/// Infinity is only accepted when spelled `Infinity`, other spellings such as `inf` or `nan`
/// are unparsable.
#[must_use]
pub fn parse_number(value: &str) -> f64 {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    let spelled_out = trimmed
        .chars()
        .any(|c| c.is_alphabetic() && !matches!(c, 'e' | 'E'));
    match trimmed {
        "Infinity" | "+Infinity" => f64::INFINITY,
        "-Infinity" => f64::NEG_INFINITY,
        _ if spelled_out => f64::NAN,
        _ => trimmed.parse::<f64>().unwrap_or(f64::NAN),
    }
}

/// The sets recorded for one exercise.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftExercise {
    exercise: String,
    sets: Vec<DraftSet>,
}

impl DraftExercise {
    pub fn new(exercise: &str, sets: Vec<DraftSet>) -> Result<Self, DraftExerciseError> {
        if sets.is_empty() {
            return Err(DraftExerciseError::NoSets);
        }

        if let Some(set) = sets.iter().find(|s| s.exercise != exercise) {
            return Err(DraftExerciseError::MixedExercises(
                exercise.to_string(),
                set.exercise.clone(),
            ));
        }

        Ok(Self {
            exercise: exercise.to_string(),
            sets,
        })
    }

    #[must_use]
    pub fn exercise(&self) -> &str {
        &self.exercise
    }

    #[must_use]
    pub fn sets(&self) -> &[DraftSet] {
        &self.sets
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum DraftExerciseError {
    #[error("Exercise must contain at least one set")]
    NoSets,
    #[error("Set of \"{1}\" does not belong to exercise \"{0}\"")]
    MixedExercises(String, String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DraftWorkout {
    pub date: NaiveDate,
    pub notes: String,
    exercises: Vec<DraftExercise>,
}

impl DraftWorkout {
    #[must_use]
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            notes: String::new(),
            exercises: vec![],
        }
    }

    #[must_use]
    pub fn exercises(&self) -> &[DraftExercise] {
        &self.exercises
    }

    pub fn add_exercise(&mut self, exercise: DraftExercise) {
        self.exercises.push(exercise);
    }

    /// Removes the exercise at `index`, keeping the order of the remaining exercises.
    pub fn remove_exercise(&mut self, index: usize) -> Option<DraftExercise> {
        if index < self.exercises.len() {
            Some(self.exercises.remove(index))
        } else {
            None
        }
    }

    /// Reshapes the draft into the form written to the store.
    #[must_use]
    pub fn to_document(&self) -> WorkoutDocument {
        WorkoutDocument {
            date: self.date,
            notes: self.notes.clone(),
            workout: self
                .exercises
                .iter()
                .map(|exercise| ExerciseRecord {
                    exercise: exercise.exercise.clone(),
                    sets: exercise
                        .sets
                        .iter()
                        .enumerate()
                        .map(|(i, set)| {
                            (
                                SetLabel(i + 1),
                                SetRecord {
                                    reps: set.reps,
                                    weight: set.weight,
                                    note: set.note.clone(),
                                },
                            )
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

/// A workout in its persisted shape.
///
/// The position of an exercise in `workout` is its slot.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutDocument {
    pub date: NaiveDate,
    pub notes: String,
    pub workout: Vec<ExerciseRecord>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseRecord {
    pub exercise: String,
    pub sets: BTreeMap<SetLabel, SetRecord>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SetRecord {
    pub reps: f64,
    pub weight: f64,
    pub note: String,
}

/// The key of a set inside an exercise record, rendered as `set1`, `set2`, ...
///
/// Ordering is numeric, so `set10` follows `set9`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SetLabel(usize);

impl SetLabel {
    pub fn new(index: usize) -> Result<Self, SetLabelError> {
        if index == 0 {
            return Err(SetLabelError::Invalid(String::from("set0")));
        }
        Ok(Self(index))
    }

    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for SetLabel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "set{}", self.0)
    }
}

impl FromStr for SetLabel {
    type Err = SetLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.strip_prefix("set")
            .and_then(|n| n.parse::<usize>().ok())
            .filter(|n| *n > 0)
            .map(SetLabel)
            .ok_or_else(|| SetLabelError::Invalid(s.to_string()))
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum SetLabelError {
    #[error("Invalid set label \"{0}\"")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 5, 17).unwrap()
    }

    fn set(exercise: &str, reps: f64, weight: f64, note: &str) -> DraftSet {
        DraftSet {
            exercise: exercise.to_string(),
            weight,
            reps,
            note: note.to_string(),
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn exercise(name: &str, sets: usize) -> DraftExercise {
        DraftExercise::new(
            name,
            (1..=sets)
                .map(|i| set(name, i as f64, 10.0 * i as f64, ""))
                .collect(),
        )
        .unwrap()
    }

    #[rstest]
    #[case("100", 100.0)]
    #[case(" 62.5 ", 62.5)]
    #[case("", 0.0)]
    #[case("   ", 0.0)]
    #[case("-5", -5.0)]
    #[case("1e3", 1000.0)]
    fn test_parse_number(#[case] value: &str, #[case] expected: f64) {
        assert_approx_eq!(parse_number(value), expected);
    }

    #[rstest]
    #[case("abc")]
    #[case("10kg")]
    #[case("inf")]
    #[case("-inf")]
    #[case("infinity")]
    #[case("INFINITY")]
    #[case("NaN")]
    #[case("nan")]
    #[case("e")]
    fn test_parse_number_invalid(#[case] value: &str) {
        assert!(parse_number(value).is_nan());
    }

    #[rstest]
    #[case("Infinity", f64::INFINITY)]
    #[case(" +Infinity ", f64::INFINITY)]
    #[case("-Infinity", f64::NEG_INFINITY)]
    fn test_parse_number_infinity(#[case] value: &str, #[case] expected: f64) {
        assert_eq!(parse_number(value), expected);
    }

    #[test]
    fn test_draft_set_parse() {
        let draft_set = DraftSet::parse("Squat", "120", "5", "deep");
        assert_eq!(draft_set.exercise, "Squat");
        assert_approx_eq!(draft_set.weight, 120.0);
        assert_approx_eq!(draft_set.reps, 5.0);
        assert_eq!(draft_set.note, "deep");
        assert!(DraftSet::parse("Squat", "heavy", "5", "").weight.is_nan());
    }

    #[test]
    fn test_draft_exercise_new() {
        assert_eq!(
            DraftExercise::new("Squat", vec![]),
            Err(DraftExerciseError::NoSets)
        );
        assert_eq!(
            DraftExercise::new(
                "Squat",
                vec![set("Squat", 5.0, 100.0, ""), set("Deadlift", 5.0, 140.0, "")]
            ),
            Err(DraftExerciseError::MixedExercises(
                "Squat".to_string(),
                "Deadlift".to_string()
            ))
        );
        let draft_exercise =
            DraftExercise::new("Squat", vec![set("Squat", 5.0, 100.0, "")]).unwrap();
        assert_eq!(draft_exercise.exercise(), "Squat");
        assert_eq!(draft_exercise.sets().len(), 1);
    }

    #[test]
    fn test_draft_workout_remove_exercise() {
        let mut workout = DraftWorkout::new(date());
        workout.add_exercise(exercise("A", 1));
        workout.add_exercise(exercise("B", 1));
        workout.add_exercise(exercise("C", 1));

        assert_eq!(workout.remove_exercise(1), Some(exercise("B", 1)));
        assert_eq!(
            workout
                .exercises()
                .iter()
                .map(DraftExercise::exercise)
                .collect::<Vec<_>>(),
            vec!["A", "C"]
        );
        assert_eq!(workout.remove_exercise(2), None);
        assert_eq!(workout.exercises().len(), 2);
    }

    #[test]
    fn test_to_document() {
        let mut workout = DraftWorkout::new(date());
        workout.notes = String::from("push day");
        workout.add_exercise(
            DraftExercise::new("Bench Press", vec![set("Bench Press", 10.0, 100.0, "ok")])
                .unwrap(),
        );

        assert_eq!(
            workout.to_document(),
            WorkoutDocument {
                date: date(),
                notes: String::from("push day"),
                workout: vec![ExerciseRecord {
                    exercise: String::from("Bench Press"),
                    sets: BTreeMap::from([(
                        SetLabel(1),
                        SetRecord {
                            reps: 10.0,
                            weight: 100.0,
                            note: String::from("ok"),
                        }
                    )]),
                }],
            }
        );
    }

    #[rstest]
    #[case(&[])]
    #[case(&[1])]
    #[case(&[3, 1, 12])]
    fn test_to_document_slots_and_labels(#[case] set_counts: &[usize]) {
        let mut workout = DraftWorkout::new(date());
        for (i, count) in set_counts.iter().enumerate() {
            workout.add_exercise(exercise(&format!("E{i}"), *count));
        }

        let document = workout.to_document();

        assert_eq!(document.workout.len(), set_counts.len());
        for (record, count) in document.workout.iter().zip(set_counts) {
            assert_eq!(
                record
                    .sets
                    .keys()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>(),
                (1..=*count).map(|i| format!("set{i}")).collect::<Vec<_>>()
            );
        }
        assert_eq!(workout.to_document(), document);
    }

    #[test]
    fn test_to_document_preserves_order() {
        let mut workout = DraftWorkout::new(date());
        workout.add_exercise(exercise("Row", 2));
        workout.add_exercise(exercise("Curl", 1));

        let document = workout.to_document();

        assert_eq!(document.workout[0].exercise, "Row");
        assert_eq!(document.workout[1].exercise, "Curl");
        assert_approx_eq!(document.workout[0].sets[&SetLabel(1)].weight, 10.0);
        assert_approx_eq!(document.workout[0].sets[&SetLabel(2)].weight, 20.0);
    }

    #[rstest]
    #[case("set1", Ok(SetLabel(1)))]
    #[case("set12", Ok(SetLabel(12)))]
    #[case("set0", Err(SetLabelError::Invalid("set0".to_string())))]
    #[case("set", Err(SetLabelError::Invalid("set".to_string())))]
    #[case("rep1", Err(SetLabelError::Invalid("rep1".to_string())))]
    fn test_set_label_from_str(
        #[case] value: &str,
        #[case] expected: Result<SetLabel, SetLabelError>,
    ) {
        assert_eq!(SetLabel::from_str(value), expected);
    }

    #[test]
    fn test_set_label_order() {
        assert!(SetLabel(9) < SetLabel(10));
        assert_eq!(SetLabel::new(10).unwrap().to_string(), "set10");
        assert_eq!(SetLabel::new(10).unwrap().index(), 10);
        assert!(SetLabel::new(0).is_err());
    }
}
