#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub mod exercise_api;
pub mod firestore;
#[allow(clippy::module_name_repetitions)]
pub mod local_storage;
pub mod rest;
