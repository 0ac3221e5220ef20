pub mod create_group;
pub mod group;
pub mod workout_log;
pub mod workout_logger;
