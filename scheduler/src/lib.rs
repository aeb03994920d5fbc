pub mod dayset;
pub mod engine;
pub mod error;
pub mod jitter;
pub mod occurrence;
pub mod optimal;

pub use dayset::DaySet;
pub use engine::{NextRun, PostCallback, PostScheduler};
pub use error::SchedulerError;
