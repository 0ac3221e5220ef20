#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

mod catalog;
mod error;
mod group;
mod muscle;
mod name;
mod service;
mod user;
mod workout;
mod workout_logger;

pub use catalog::*;
pub use error::*;
pub use group::*;
pub use muscle::*;
pub use name::*;
pub use service::*;
pub use user::*;
pub use workout::*;
pub use workout_logger::*;
