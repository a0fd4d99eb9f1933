use crate::board::TestId;
use crate::record::TestRunId;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum BoardError {
    #[error("test {0:?} does not exist")]
    TestNotFound(TestId),

    #[error("test run {run:?} does not exist on test {test:?}")]
    TestRunNotFound { test: TestId, run: TestRunId },

    #[error("a test with reference \"{0}\" already exists")]
    DuplicateReference(String),

    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),
}

/// Form validation failures for tests and test runs.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("test reference must not be empty")]
    EmptyReference,

    #[error("end time must not be before start time")]
    EndBeforeStart,

    #[error("{field} is not an http(s) url: \"{value}\"")]
    InvalidUrl { field: &'static str, value: String },

    #[error("{field} must be within 0..=100, got {value}")]
    PercentageOutOfRange { field: &'static str, value: u8 },

    #[error("{field} must be a finite, non-negative number, got {value}")]
    InvalidTps { field: &'static str, value: f64 },
}
