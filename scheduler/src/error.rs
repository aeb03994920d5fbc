use thiserror::Error;

/// Registration-time configuration failures.
///
/// All of these fire before any timer is armed, so a bad configuration
/// never silently schedules at a garbage time.
#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("invalid time of day '{0}': expected HH:MM")]
    InvalidTime(String),

    #[error("time of day out of range: {hour:02}:{minute:02}")]
    TimeOutOfRange { hour: u32, minute: u32 },

    #[error("invalid day-of-week set '{0}'")]
    InvalidDaySet(String),

    #[error("unknown timezone '{0}'")]
    UnknownTimezone(String),
}
