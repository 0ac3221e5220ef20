//! Firestore documents
//!
//! The Firestore REST API represents every field as a typed value, e.g. `{"stringValue": "x"}`
//! or `{"mapValue": {"fields": {...}}}`. This module converts between that representation and
//! the domain entities.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use socialift_domain as domain;

pub type Fields = BTreeMap<String, Value>;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum Value {
    #[serde(rename = "nullValue")]
    Null(()),
    #[serde(rename = "booleanValue")]
    Boolean(bool),
    #[serde(rename = "integerValue")]
    Integer(#[serde(with = "integer")] i64),
    #[serde(rename = "doubleValue")]
    Double(#[serde(with = "double")] f64),
    #[serde(rename = "timestampValue")]
    Timestamp(DateTime<Utc>),
    #[serde(rename = "stringValue")]
    String(String),
    #[serde(rename = "mapValue")]
    Map {
        #[serde(default)]
        fields: Fields,
    },
    #[serde(rename = "arrayValue")]
    Array {
        #[serde(default)]
        values: Vec<Value>,
    },
}

impl Value {
    /// Integral numbers are stored as integers, all other numbers as doubles.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn number(value: f64) -> Self {
        if value.is_finite() && value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
            Value::Integer(value as i64)
        } else {
            Value::Double(value)
        }
    }

    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        Value::String(value.into())
    }

    #[must_use]
    pub fn map(fields: impl IntoIterator<Item = (String, Value)>) -> Self {
        Value::Map {
            fields: fields.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(value) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(value) => Some(*value as f64),
            Value::Double(value) => Some(*value),
            _ => None,
        }
    }
}

/// 64-bit integers are transferred as strings.
mod integer {
    use serde::{Deserialize, Deserializer, Serializer, de};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Integer {
        Number(i64),
        String(String),
    }

    #[allow(clippy::trivially_copy_pass_by_ref)]
    pub fn serialize<S: Serializer>(value: &i64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        match Integer::deserialize(deserializer)? {
            Integer::Number(value) => Ok(value),
            Integer::String(value) => value.parse().map_err(de::Error::custom),
        }
    }
}

/// Non-finite doubles are transferred as `"NaN"`, `"Infinity"` and `"-Infinity"`.
mod double {
    use serde::{Deserialize, Deserializer, Serializer, de};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Double {
        Number(f64),
        String(String),
    }

    #[allow(clippy::trivially_copy_pass_by_ref)]
    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_nan() {
            serializer.serialize_str("NaN")
        } else if value.is_infinite() {
            serializer.serialize_str(if *value > 0.0 { "Infinity" } else { "-Infinity" })
        } else {
            serializer.serialize_f64(*value)
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        match Double::deserialize(deserializer)? {
            Double::Number(value) => Ok(value),
            Double::String(value) => match value.as_str() {
                "NaN" => Ok(f64::NAN),
                "Infinity" => Ok(f64::INFINITY),
                "-Infinity" => Ok(f64::NEG_INFINITY),
                _ => Err(de::Error::invalid_value(
                    de::Unexpected::Str(&value),
                    &"a number, \"NaN\", \"Infinity\" or \"-Infinity\"",
                )),
            },
        }
    }
}

/// A document as exchanged with the Firestore REST API.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct Document {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default)]
    pub fields: Fields,
}

impl Document {
    #[must_use]
    pub fn new(fields: Fields) -> Self {
        Self {
            name: String::new(),
            fields,
        }
    }

    /// The last segment of the resource name.
    #[must_use]
    pub fn id(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or_default()
    }
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListDocumentsResponse {
    #[serde(default)]
    pub documents: Vec<Document>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum DecodeError {
    #[error("missing field \"{0}\"")]
    MissingField(String),
    #[error("invalid field \"{0}\": {1}")]
    InvalidField(String, String),
}

impl From<DecodeError> for domain::ReadError {
    fn from(value: DecodeError) -> Self {
        domain::ReadError::Other(Box::new(value))
    }
}

impl From<DecodeError> for domain::CreateError {
    fn from(value: DecodeError) -> Self {
        domain::CreateError::Other(Box::new(value))
    }
}

impl From<DecodeError> for domain::UpdateError {
    fn from(value: DecodeError) -> Self {
        domain::UpdateError::Other(Box::new(value))
    }
}

fn invalid(key: &str, value: &Value) -> DecodeError {
    DecodeError::InvalidField(key.to_string(), format!("{value:?}"))
}

fn field<'a>(fields: &'a Fields, key: &str) -> Result<&'a Value, DecodeError> {
    fields
        .get(key)
        .ok_or_else(|| DecodeError::MissingField(key.to_string()))
}

fn string_field(fields: &Fields, key: &str) -> Result<String, DecodeError> {
    match fields.get(key) {
        None | Some(Value::Null(())) => Ok(String::new()),
        Some(value) => value
            .as_str()
            .map(ToString::to_string)
            .ok_or_else(|| invalid(key, value)),
    }
}

fn number_field(fields: &Fields, key: &str) -> Result<f64, DecodeError> {
    let value = field(fields, key)?;
    value.as_f64().ok_or_else(|| invalid(key, value))
}

#[must_use]
pub fn workout_fields(document: &domain::WorkoutDocument) -> Fields {
    let slots = document
        .workout
        .iter()
        .enumerate()
        .map(|(slot, record)| (slot.to_string(), exercise_record_value(record)));
    Fields::from([
        (
            String::from("date"),
            Value::string(document.date.format("%Y-%m-%d").to_string()),
        ),
        (String::from("notes"), Value::string(&document.notes)),
        (String::from("workout"), Value::map(slots)),
    ])
}

fn exercise_record_value(record: &domain::ExerciseRecord) -> Value {
    let sets = record.sets.iter().map(|(label, set)| {
        let set = Value::map([
            (String::from("reps"), Value::number(set.reps)),
            (String::from("weight"), Value::number(set.weight)),
            (String::from("note"), Value::string(&set.note)),
        ]);
        (label.to_string(), set)
    });
    Value::map([
        (String::from("exercise"), Value::string(&record.exercise)),
        (String::from("sets"), Value::map(sets)),
    ])
}

pub fn workout_from_document(document: &Document) -> Result<domain::Workout, DecodeError> {
    let fields = &document.fields;
    let date = string_field(fields, "date")?;
    let records = match field(fields, "workout")? {
        Value::Map { fields: slots } => {
            let mut slots = slots
                .iter()
                .map(|(slot, value)| match slot.parse::<usize>() {
                    Ok(index) => Ok((index, value)),
                    Err(_) => Err(DecodeError::InvalidField(
                        String::from("workout"),
                        slot.clone(),
                    )),
                })
                .collect::<Result<Vec<_>, _>>()?;
            slots.sort_by_key(|(slot, _)| *slot);
            slots
                .into_iter()
                .map(|(_, value)| exercise_record_from_value(value))
                .collect::<Result<Vec<_>, _>>()?
        }
        Value::Array { values } => values
            .iter()
            .map(exercise_record_from_value)
            .collect::<Result<Vec<_>, _>>()?,
        value => return Err(invalid("workout", value)),
    };

    Ok(domain::Workout {
        id: document.id().into(),
        document: domain::WorkoutDocument {
            date: NaiveDate::parse_from_str(&date, "%Y-%m-%d")
                .map_err(|_| DecodeError::InvalidField(String::from("date"), date.clone()))?,
            notes: string_field(fields, "notes")?,
            workout: records,
        },
    })
}

fn exercise_record_from_value(value: &Value) -> Result<domain::ExerciseRecord, DecodeError> {
    let Value::Map { fields } = value else {
        return Err(invalid("workout", value));
    };
    let sets = match fields.get("sets") {
        None => BTreeMap::new(),
        Some(Value::Map { fields: sets }) => sets
            .iter()
            .map(|(label, set)| Ok((set_label(label)?, set_record_from_value(set)?)))
            .collect::<Result<BTreeMap<_, _>, DecodeError>>()?,
        Some(value) => return Err(invalid("sets", value)),
    };
    Ok(domain::ExerciseRecord {
        exercise: string_field(fields, "exercise")?,
        sets,
    })
}

fn set_label(label: &str) -> Result<domain::SetLabel, DecodeError> {
    label
        .parse::<domain::SetLabel>()
        .map_err(|err| DecodeError::InvalidField(String::from("sets"), err.to_string()))
}

fn set_record_from_value(value: &Value) -> Result<domain::SetRecord, DecodeError> {
    let Value::Map { fields } = value else {
        return Err(invalid("sets", value));
    };
    // older documents store the note as "singleSetNotes"
    let note = if fields.contains_key("note") {
        string_field(fields, "note")?
    } else {
        string_field(fields, "singleSetNotes")?
    };
    Ok(domain::SetRecord {
        reps: number_field(fields, "reps")?,
        weight: number_field(fields, "weight")?,
        note,
    })
}

#[must_use]
pub fn group_fields(name: &domain::Name, image_url: &str, created_at: DateTime<Utc>) -> Fields {
    Fields::from([
        (String::from("group_name"), Value::string(name.as_str())),
        (String::from("group_img_url"), Value::string(image_url)),
        (String::from("created_at"), Value::Timestamp(created_at)),
    ])
}

pub fn group_from_document(document: &Document) -> Result<domain::Group, DecodeError> {
    let fields = &document.fields;
    let name = string_field(fields, "group_name")?;
    let created_at = match field(fields, "created_at")? {
        Value::Timestamp(timestamp) => *timestamp,
        value => return Err(invalid("created_at", value)),
    };
    Ok(domain::Group {
        id: document.id().into(),
        name: domain::Name::new(&name)
            .map_err(|err| DecodeError::InvalidField(String::from("group_name"), err.to_string()))?,
        image_url: string_field(fields, "group_img_url")?,
        created_at,
    })
}

#[must_use]
pub fn member_fields(member: &domain::Member) -> Fields {
    Fields::from([
        (String::from("id"), Value::string(member.id.to_string())),
        (String::from("name"), Value::string(&member.name)),
        (String::from("img_url"), Value::string(&member.image_url)),
    ])
}

/// Decodes a group member. Members get generated document ids, so the stored `id` field holds
/// the user id. The document id is used if the field is missing.
pub fn member_from_document(document: &Document) -> Result<domain::Member, DecodeError> {
    let id = string_field(&document.fields, "id")?;
    Ok(domain::Member {
        id: if id.is_empty() {
            document.id().into()
        } else {
            id.into()
        },
        name: string_field(&document.fields, "name")?,
        image_url: string_field(&document.fields, "img_url")?,
    })
}

/// Decodes a friend. Friends are keyed by their user id, a stored `id` field is ignored.
pub fn friend_from_document(document: &Document) -> Result<domain::Member, DecodeError> {
    Ok(domain::Member {
        id: document.id().into(),
        name: string_field(&document.fields, "name")?,
        image_url: string_field(&document.fields, "img_url")?,
    })
}
