use std::fmt;

use uuid::Uuid;

/// Correlation ID that follows a single posting run end-to-end
#[derive(Clone, Debug)]
pub struct RunId(Uuid);

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.as_hyphenated())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self(Uuid::new_v4())
    }
}
