//! Tracking of performance test readiness, with the arc geometry used to draw
//! its circular gauges.

mod board;
mod record;

pub mod error;
#[cfg(feature = "gauge")]
pub mod gauge;

pub use board::{TestBoard, TestId};
pub use error::{BoardError, ValidationError};
pub use record::{
    Execution, PerformanceTest, Preparation, Status, TestDetails, TestRun, TestRunDraft,
    TestRunId, ViewMode,
};

#[cfg(feature = "gauge")]
pub use gauge::{Gauge, GaugeStyle};

pub use perfboard_arc as arc;
pub use perfboard_core::*;
