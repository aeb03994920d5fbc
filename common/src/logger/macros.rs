use tracing::{Level, Span};

use super::RunId;

/// Create a root span for one posting run
pub fn root_span(name: &'static str, run_id: &RunId) -> Span {
    tracing::span!(
        Level::INFO,
        "run",
        op = name,
        run_id = %run_id
    )
}

/// Create a child span (inherits run_id automatically)
pub fn child_span(name: &'static str) -> Span {
    tracing::span!(Level::INFO, "step", op = name)
}
