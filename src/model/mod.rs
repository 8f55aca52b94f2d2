// File: ./src/model/mod.rs
pub mod date;
pub mod item;

pub use date::{DATE_TIME_PATTERN, InvalidDateTime, Timestamp};
pub use item::{Task, TaskKind, TaskStatus};
