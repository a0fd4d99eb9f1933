//! Performance tests and the test runs recorded against them.

use std::fmt;

use chrono::{DateTime, Utc};
use perfboard_core::color::{self, RGBA8};

use crate::error::ValidationError;

/// The RAG status of a test.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Status {
    #[default]
    Neutral,
    Red,
    Amber,
    Green,
}

impl Status {
    pub const ALL: [Status; 4] = [Self::Neutral, Self::Red, Self::Amber, Self::Green];

    pub fn color(&self) -> RGBA8 {
        match self {
            Self::Neutral => color::STATUS_NEUTRAL,
            Self::Red => color::STATUS_RED,
            Self::Amber => color::STATUS_AMBER,
            Self::Green => color::STATUS_GREEN,
        }
    }

    /// The CSS class a row in this status is rendered with.
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Neutral => "status-neutral",
            Self::Red => "status-red",
            Self::Amber => "status-amber",
            Self::Green => "status-green",
        }
    }
}

/// How densely rows are rendered.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ViewMode {
    Compact,
    #[default]
    Detailed,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Compact => Self::Detailed,
            Self::Detailed => Self::Compact,
        }
    }
}

/// Readiness of the test data, scripts and environment, each in percent.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Preparation {
    pub data: u8,
    pub script: u8,
    pub env: u8,
}

impl Preparation {
    pub fn new(data: u8, script: u8, env: u8) -> Result<Self, ValidationError> {
        let prep = Self { data, script, env };
        prep.validate()?;
        Ok(prep)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in [("data", self.data), ("script", self.script), ("env", self.env)] {
            if value > 100 {
                return Err(ValidationError::PercentageOutOfRange { field, value });
            }
        }
        Ok(())
    }

    /// The mean readiness of the three areas.
    pub fn overall(&self) -> f64 {
        (f64::from(self.data) + f64::from(self.script) + f64::from(self.env)) / 3.0
    }

    /// The three areas paired with the labels they are displayed under.
    pub fn labelled(&self) -> [(&'static str, u8); 3] {
        [("Data", self.data), ("Script", self.script), ("Env", self.env)]
    }
}

/// Achieved versus targeted throughput, in transactions per second.
#[derive(Default, Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Execution {
    pub achieved_tps: f64,
    pub target_tps: f64,
}

impl Execution {
    pub fn new(achieved_tps: f64, target_tps: f64) -> Result<Self, ValidationError> {
        let exec = Self {
            achieved_tps,
            target_tps,
        };
        exec.validate()?;
        Ok(exec)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in [
            ("achieved_tps", self.achieved_tps),
            ("target_tps", self.target_tps),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ValidationError::InvalidTps { field, value });
            }
        }
        Ok(())
    }

    /// Achieved throughput as a percentage of the target.
    ///
    /// Returns `None` when no target is set.
    pub fn achieved_percentage(&self) -> Option<f64> {
        if self.target_tps == 0.0 {
            None
        } else {
            Some(self.achieved_tps / self.target_tps * 100.0)
        }
    }
}

/// Identifies a [`TestRun`] within a [`TestBoard`](crate::TestBoard).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TestRunId(pub u64);

impl fmt::Display for TestRunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "run-{}", self.0)
    }
}

/// The fields of a test run as entered in the add/edit form.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TestRunDraft {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub notes: String,
    pub app_dynamics_url: String,
    pub load_runner_url: String,
}

impl TestRunDraft {
    /// A draft with no notes or dashboard links.
    pub fn new(start_time: DateTime<Utc>, end_time: DateTime<Utc>) -> Self {
        Self {
            start_time,
            end_time,
            notes: String::new(),
            app_dynamics_url: String::new(),
            load_runner_url: String::new(),
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn with_app_dynamics_url(mut self, url: impl Into<String>) -> Self {
        self.app_dynamics_url = url.into();
        self
    }

    pub fn with_load_runner_url(mut self, url: impl Into<String>) -> Self {
        self.load_runner_url = url.into();
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.end_time < self.start_time {
            return Err(ValidationError::EndBeforeStart);
        }
        validate_url("app_dynamics_url", &self.app_dynamics_url)?;
        validate_url("load_runner_url", &self.load_runner_url)?;
        Ok(())
    }
}

fn validate_url(field: &'static str, value: &str) -> Result<(), ValidationError> {
    // Links are optional.
    if value.is_empty() || value.starts_with("http://") || value.starts_with("https://") {
        Ok(())
    } else {
        Err(ValidationError::InvalidUrl {
            field,
            value: value.to_string(),
        })
    }
}

/// A recorded execution of a performance test.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TestRun {
    pub id: TestRunId,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub notes: String,
    pub app_dynamics_url: String,
    pub load_runner_url: String,
}

impl TestRun {
    pub(crate) fn from_draft(id: TestRunId, draft: TestRunDraft) -> Self {
        Self {
            id,
            start_time: draft.start_time,
            end_time: draft.end_time,
            notes: draft.notes,
            app_dynamics_url: draft.app_dynamics_url,
            load_runner_url: draft.load_runner_url,
        }
    }

    pub(crate) fn apply(&mut self, draft: TestRunDraft) {
        self.start_time = draft.start_time;
        self.end_time = draft.end_time;
        self.notes = draft.notes;
        self.app_dynamics_url = draft.app_dynamics_url;
        self.load_runner_url = draft.load_runner_url;
    }

    pub fn duration(&self) -> chrono::Duration {
        self.end_time - self.start_time
    }

    /// The editable fields of this run, e.g. to prefill the edit form.
    pub fn to_draft(&self) -> TestRunDraft {
        TestRunDraft {
            start_time: self.start_time,
            end_time: self.end_time,
            notes: self.notes.clone(),
            app_dynamics_url: self.app_dynamics_url.clone(),
            load_runner_url: self.load_runner_url.clone(),
        }
    }
}

/// The fields of a test as entered in the add/edit form.
#[derive(Default, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TestDetails {
    pub reference: String,
    pub name: String,
    pub status: Status,
    pub note: Option<String>,
    pub preparation: Preparation,
    pub execution: Execution,
}

impl TestDetails {
    pub fn new(reference: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn with_preparation(mut self, preparation: Preparation) -> Self {
        self.preparation = preparation;
        self
    }

    pub fn with_execution(mut self, execution: Execution) -> Self {
        self.execution = execution;
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.reference.trim().is_empty() {
            return Err(ValidationError::EmptyReference);
        }
        self.preparation.validate()?;
        self.execution.validate()
    }
}

/// A performance test and its recorded runs.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PerformanceTest {
    reference: String,
    pub name: String,
    pub status: Status,
    pub note: Option<String>,
    preparation: Preparation,
    execution: Execution,
    test_runs: Vec<TestRun>,
}

impl PerformanceTest {
    pub(crate) fn from_details(details: TestDetails) -> Self {
        Self {
            reference: details.reference.trim().to_string(),
            name: details.name,
            status: details.status,
            note: details.note,
            preparation: details.preparation,
            execution: details.execution,
            test_runs: Vec::new(),
        }
    }

    pub(crate) fn apply(&mut self, details: TestDetails) {
        self.reference = details.reference.trim().to_string();
        self.name = details.name;
        self.status = details.status;
        self.note = details.note;
        self.preparation = details.preparation;
        self.execution = details.execution;
    }

    /// The unique, user-facing reference of this test, e.g. `PT-001`.
    pub fn reference(&self) -> &str {
        &self.reference
    }

    /// Readiness of data, scripts and environment. Changed through
    /// [`TestBoard::update_test`](crate::TestBoard::update_test) so it stays in range.
    pub fn preparation(&self) -> Preparation {
        self.preparation
    }

    /// Achieved and target throughput. Changed through
    /// [`TestBoard::update_test`](crate::TestBoard::update_test) so it stays valid.
    pub fn execution(&self) -> Execution {
        self.execution
    }

    /// Recorded runs, oldest first.
    pub fn test_runs(&self) -> &[TestRun] {
        &self.test_runs
    }

    pub fn test_run(&self, id: TestRunId) -> Option<&TestRun> {
        self.test_runs.iter().find(|run| run.id == id)
    }

    pub(crate) fn test_runs_mut(&mut self) -> &mut Vec<TestRun> {
        &mut self.test_runs
    }

    pub fn has_note(&self) -> bool {
        self.note.as_deref().is_some_and(|note| !note.is_empty())
    }

    pub fn achieved_percentage(&self) -> Option<f64> {
        self.execution.achieved_percentage()
    }

    pub fn preparation_percentage(&self) -> f64 {
        self.preparation.overall()
    }

    pub fn to_details(&self) -> TestDetails {
        TestDetails {
            reference: self.reference.clone(),
            name: self.name.clone(),
            status: self.status,
            note: self.note.clone(),
            preparation: self.preparation,
            execution: self.execution,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, hour, 0, 0).unwrap()
    }

    #[test]
    fn achieved_percentage() {
        let exec = Execution::new(75.0, 150.0).unwrap();
        assert_eq!(exec.achieved_percentage(), Some(50.0));
        assert_eq!(Execution::new(10.0, 0.0).unwrap().achieved_percentage(), None);
    }

    #[test]
    fn execution_rejects_bad_tps() {
        assert!(matches!(
            Execution::new(-1.0, 10.0),
            Err(ValidationError::InvalidTps { field: "achieved_tps", .. })
        ));
        assert!(matches!(
            Execution::new(1.0, f64::NAN),
            Err(ValidationError::InvalidTps { field: "target_tps", .. })
        ));
    }

    #[test]
    fn preparation_range() {
        assert_eq!(
            Preparation::new(100, 101, 0),
            Err(ValidationError::PercentageOutOfRange {
                field: "script",
                value: 101
            })
        );
        let prep = Preparation::new(30, 60, 90).unwrap();
        assert!((prep.overall() - 60.0).abs() < 1e-12);
        assert_eq!(prep.labelled()[2], ("Env", 90));
    }

    #[test]
    fn draft_validation() {
        assert_eq!(
            TestRunDraft::new(at(10), at(9)).validate(),
            Err(ValidationError::EndBeforeStart)
        );
        assert!(TestRunDraft::new(at(9), at(9)).validate().is_ok());

        let draft = TestRunDraft::new(at(9), at(10)).with_load_runner_url("ftp://lr/run/1");
        assert!(matches!(
            draft.validate(),
            Err(ValidationError::InvalidUrl {
                field: "load_runner_url",
                ..
            })
        ));

        let draft = TestRunDraft::new(at(9), at(10))
            .with_app_dynamics_url("https://appd.example.com/dash")
            .with_load_runner_url("http://lr.example.com/run/1");
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn run_round_trips_through_draft() {
        let draft = TestRunDraft::new(at(9), at(11)).with_notes("peak hour\nno errors");
        let run = TestRun::from_draft(TestRunId(7), draft.clone());
        assert_eq!(run.to_draft(), draft);
        assert_eq!(run.duration(), chrono::Duration::hours(2));
        assert_eq!(run.id.to_string(), "run-7");
    }

    #[test]
    fn note_presence() {
        let mut test = PerformanceTest::from_details(TestDetails::new(" PT-1 ", "Login"));
        assert_eq!(test.reference(), "PT-1");
        assert!(!test.has_note());
        test.note = Some(String::new());
        assert!(!test.has_note());
        test.note = Some("waiting on env".into());
        assert!(test.has_note());
    }

    #[test]
    fn details_validation() {
        assert_eq!(
            TestDetails::new("  ", "Nameless").validate(),
            Err(ValidationError::EmptyReference)
        );
        assert!(TestDetails::new("PT-2", "Search").validate().is_ok());
    }

    #[test]
    fn view_mode_toggle() {
        assert_eq!(ViewMode::default(), ViewMode::Detailed);
        assert_eq!(ViewMode::Detailed.toggled(), ViewMode::Compact);
        assert_eq!(ViewMode::Compact.toggled(), ViewMode::Detailed);
    }

    #[test]
    fn status_palette() {
        assert_eq!(Status::default(), Status::Neutral);
        assert_eq!(Status::Amber.css_class(), "status-amber");
        assert_eq!(Status::Green.color(), color::STATUS_GREEN);
        assert_eq!(Status::ALL.len(), 4);
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_with_runs_round_trips_through_json() {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 3, 1, 10, 30, 0).unwrap();

        let mut test = PerformanceTest::from_details(
            TestDetails::new("PT-7", "Checkout")
                .with_status(Status::Amber)
                .with_note("stub pending")
                .with_preparation(Preparation::new(10, 20, 30).unwrap())
                .with_execution(Execution::new(12.5, 50.0).unwrap()),
        );
        test.test_runs_mut().push(TestRun::from_draft(
            TestRunId(3),
            TestRunDraft::new(start, end)
                .with_notes("first soak")
                .with_load_runner_url("https://lr.example.com/3"),
        ));

        let json = serde_json::to_value(&test).unwrap();
        assert_eq!(json["status"], "amber");
        assert_eq!(json["reference"], "PT-7");
        assert_eq!(json["preparation"]["env"], 30);
        assert_eq!(json["test_runs"][0]["id"], 3);
        assert_eq!(json["test_runs"][0]["start_time"], "2024-03-01T09:00:00Z");

        let back: PerformanceTest = serde_json::from_value(json).unwrap();
        assert_eq!(back, test);
    }

    #[test]
    fn enums_use_lowercase_names() {
        assert_eq!(serde_json::to_string(&Status::Neutral).unwrap(), "\"neutral\"");
        assert_eq!(serde_json::to_string(&ViewMode::Compact).unwrap(), "\"compact\"");
        let status: Status = serde_json::from_str("\"green\"").unwrap();
        assert_eq!(status, Status::Green);
    }

    #[test]
    fn draft_round_trips_through_json() {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        let draft = TestRunDraft::new(start, start).with_app_dynamics_url("https://appd/1");
        let json = serde_json::to_string(&draft).unwrap();
        let back: TestRunDraft = serde_json::from_str(&json).unwrap();
        assert_eq!(back, draft);
    }
}
