use rustc_hash::FxHashMap;
use thunderdome::Arena;

use crate::error::BoardError;
use crate::record::{PerformanceTest, TestDetails, TestRun, TestRunDraft, TestRunId, ViewMode};

const INIT_POOL_CAPACITY: usize = 32;

/// A handle to a [`PerformanceTest`] stored in a [`TestBoard`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TestId(thunderdome::Index);

/// An in-memory collection of performance tests.
///
/// Tests keep the order they were inserted in, and references are unique
/// across the board.
pub struct TestBoard {
    tests: Arena<PerformanceTest>,
    order: Vec<TestId>,
    reference_to_id: FxHashMap<String, TestId>,
    next_run_id: u64,
    view_mode: ViewMode,
}

impl TestBoard {
    pub fn new() -> Self {
        Self {
            tests: Arena::with_capacity(INIT_POOL_CAPACITY),
            order: Vec::with_capacity(INIT_POOL_CAPACITY),
            reference_to_id: FxHashMap::default(),
            next_run_id: 1,
            view_mode: ViewMode::default(),
        }
    }

    pub fn len(&self) -> usize {
        self.tests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn set_view_mode(&mut self, view_mode: ViewMode) {
        self.view_mode = view_mode;
    }

    /// Switches between compact and detailed rows, returning the new mode.
    pub fn toggle_view_mode(&mut self) -> ViewMode {
        self.view_mode = self.view_mode.toggled();
        self.view_mode
    }

    pub fn insert_test(&mut self, details: TestDetails) -> Result<TestId, BoardError> {
        details.validate()?;

        let test = PerformanceTest::from_details(details);
        if self.reference_to_id.contains_key(test.reference()) {
            return Err(BoardError::DuplicateReference(test.reference().to_string()));
        }

        let reference = test.reference().to_string();
        let id = TestId(self.tests.insert(test));
        self.order.push(id);
        self.reference_to_id.insert(reference.clone(), id);

        log::debug!("added test {reference} as {id:?}");

        Ok(id)
    }

    /// Replaces the editable fields of a test. Its runs are kept.
    pub fn update_test(&mut self, id: TestId, details: TestDetails) -> Result<(), BoardError> {
        details.validate()?;

        let new_reference = details.reference.trim();
        if let Some(existing) = self.reference_to_id.get(new_reference) {
            if *existing != id {
                return Err(BoardError::DuplicateReference(new_reference.to_string()));
            }
        }

        let test = self
            .tests
            .get_mut(id.0)
            .ok_or(BoardError::TestNotFound(id))?;

        let old_reference = test.reference().to_string();
        test.apply(details);

        if old_reference != test.reference() {
            self.reference_to_id.remove(&old_reference);
            self.reference_to_id.insert(test.reference().to_string(), id);
        }

        log::debug!("updated test {old_reference} ({id:?})");

        Ok(())
    }

    pub fn remove_test(&mut self, id: TestId) -> Option<PerformanceTest> {
        let test = self.tests.remove(id.0)?;
        self.order.retain(|other| *other != id);
        self.reference_to_id.remove(test.reference());

        log::debug!(
            "removed test {} with {} runs",
            test.reference(),
            test.test_runs().len()
        );

        Some(test)
    }

    pub fn get(&self, id: TestId) -> Option<&PerformanceTest> {
        self.tests.get(id.0)
    }

    /// Mutable access to a test's name, status and note. Its reference,
    /// preparation, execution and runs are validated and can only be changed
    /// through [`TestBoard::update_test`] and the test run methods.
    pub fn get_mut(&mut self, id: TestId) -> Option<&mut PerformanceTest> {
        self.tests.get_mut(id.0)
    }

    pub fn find_by_reference(&self, reference: &str) -> Option<TestId> {
        self.reference_to_id.get(reference.trim()).copied()
    }

    /// Iterates over the tests in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (TestId, &PerformanceTest)> + '_ {
        self.order
            .iter()
            .filter_map(|id| self.tests.get(id.0).map(|test| (*id, test)))
    }

    pub fn test_runs(&self, id: TestId) -> Result<&[TestRun], BoardError> {
        self.get(id)
            .map(PerformanceTest::test_runs)
            .ok_or(BoardError::TestNotFound(id))
    }

    pub fn add_test_run(
        &mut self,
        test_id: TestId,
        draft: TestRunDraft,
    ) -> Result<TestRunId, BoardError> {
        draft.validate()?;

        let test = self
            .tests
            .get_mut(test_id.0)
            .ok_or(BoardError::TestNotFound(test_id))?;

        let run_id = TestRunId(self.next_run_id);
        self.next_run_id += 1;

        let run = TestRun::from_draft(run_id, draft);
        test.test_runs_mut().push(run);

        log::debug!("recorded {run_id} on test {}", test.reference());

        Ok(run_id)
    }

    pub fn edit_test_run(
        &mut self,
        test_id: TestId,
        run_id: TestRunId,
        draft: TestRunDraft,
    ) -> Result<(), BoardError> {
        draft.validate()?;

        let test = self
            .tests
            .get_mut(test_id.0)
            .ok_or(BoardError::TestNotFound(test_id))?;

        let run = test
            .test_runs_mut()
            .iter_mut()
            .find(|run| run.id == run_id)
            .ok_or(BoardError::TestRunNotFound {
                test: test_id,
                run: run_id,
            })?;

        run.apply(draft);

        log::debug!("edited {run_id} on test {}", test.reference());

        Ok(())
    }
}

impl Default for TestBoard {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::record::{Execution, Preparation, Status};
    use chrono::{DateTime, TimeZone, Utc};

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, hour, 0, 0).unwrap()
    }

    #[test]
    fn insert_and_lookup() {
        let mut board = TestBoard::new();
        assert!(board.is_empty());

        let a = board
            .insert_test(TestDetails::new("PT-001", "Login"))
            .unwrap();
        let b = board
            .insert_test(TestDetails::new("PT-002", "Search"))
            .unwrap();

        assert_eq!(board.len(), 2);
        assert_eq!(board.find_by_reference("PT-002"), Some(b));
        assert_eq!(board.get(a).unwrap().name, "Login");

        let order: Vec<_> = board
            .iter()
            .map(|(_, t)| t.reference().to_string())
            .collect();
        assert_eq!(order, ["PT-001", "PT-002"]);
    }

    #[test]
    fn references_are_unique() {
        let mut board = TestBoard::new();
        board
            .insert_test(TestDetails::new("PT-001", "Login"))
            .unwrap();
        assert_eq!(
            board.insert_test(TestDetails::new(" PT-001", "Again")),
            Err(BoardError::DuplicateReference("PT-001".into()))
        );
        assert_eq!(
            board.insert_test(TestDetails::new("", "Blank")),
            Err(BoardError::Validation(ValidationError::EmptyReference))
        );
    }

    #[test]
    fn update_keeps_runs_and_reindexes() {
        let mut board = TestBoard::new();
        let a = board
            .insert_test(TestDetails::new("PT-001", "Login"))
            .unwrap();
        let b = board
            .insert_test(TestDetails::new("PT-002", "Search"))
            .unwrap();
        board
            .add_test_run(a, TestRunDraft::new(at(9), at(10)))
            .unwrap();

        let details = TestDetails::new("PT-010", "Login v2")
            .with_status(Status::Green)
            .with_execution(Execution::new(90.0, 100.0).unwrap());
        board.update_test(a, details).unwrap();

        let test = board.get(a).unwrap();
        assert_eq!(test.reference(), "PT-010");
        assert_eq!(test.status, Status::Green);
        assert_eq!(test.test_runs().len(), 1);
        assert_eq!(board.find_by_reference("PT-001"), None);
        assert_eq!(board.find_by_reference("PT-010"), Some(a));

        // Keeping its own reference is fine, taking another test's is not.
        board
            .update_test(b, TestDetails::new("PT-002", "Search v2"))
            .unwrap();
        assert_eq!(
            board.update_test(b, TestDetails::new("PT-010", "Clash")),
            Err(BoardError::DuplicateReference("PT-010".into()))
        );
    }

    #[test]
    fn add_and_edit_runs() {
        let mut board = TestBoard::new();
        let a = board
            .insert_test(TestDetails::new("PT-001", "Login"))
            .unwrap();
        let b = board
            .insert_test(TestDetails::new("PT-002", "Search"))
            .unwrap();

        let r1 = board
            .add_test_run(a, TestRunDraft::new(at(9), at(10)).with_notes("baseline"))
            .unwrap();
        let r2 = board
            .add_test_run(b, TestRunDraft::new(at(11), at(12)))
            .unwrap();
        assert_ne!(r1, r2);

        board
            .edit_test_run(a, r1, TestRunDraft::new(at(9), at(11)).with_notes("rerun"))
            .unwrap();
        let runs = board.test_runs(a).unwrap();
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].id, r1);
        assert_eq!(runs[0].notes, "rerun");
        assert_eq!(runs[0].end_time, at(11));

        assert_eq!(
            board.edit_test_run(a, r2, TestRunDraft::new(at(9), at(10))),
            Err(BoardError::TestRunNotFound { test: a, run: r2 })
        );
        assert_eq!(
            board.add_test_run(a, TestRunDraft::new(at(10), at(9))),
            Err(BoardError::Validation(ValidationError::EndBeforeStart))
        );
        assert_eq!(board.test_runs(a).unwrap().len(), 1);
    }

    #[test]
    fn removed_tests_are_gone() {
        let mut board = TestBoard::new();
        let a = board
            .insert_test(TestDetails::new("PT-001", "Login"))
            .unwrap();
        board
            .add_test_run(a, TestRunDraft::new(at(9), at(10)))
            .unwrap();

        let removed = board.remove_test(a).unwrap();
        assert_eq!(removed.test_runs().len(), 1);
        assert!(board.is_empty());
        assert!(board.get(a).is_none());
        assert!(board.remove_test(a).is_none());
        assert_eq!(board.test_runs(a), Err(BoardError::TestNotFound(a)));
        assert_eq!(
            board.add_test_run(a, TestRunDraft::new(at(9), at(10))),
            Err(BoardError::TestNotFound(a))
        );

        // The reference is free again.
        board
            .insert_test(TestDetails::new("PT-001", "Login"))
            .unwrap();
    }

    #[test]
    fn direct_edits_cannot_skip_validation() {
        let mut board = TestBoard::new();
        let a = board
            .insert_test(TestDetails::new("PT-001", "Login"))
            .unwrap();

        let test = board.get_mut(a).unwrap();
        test.name = "Login v2".into();
        test.status = Status::Amber;
        test.note = Some("waiting on data".into());

        let test = board.get(a).unwrap();
        assert_eq!(test.name, "Login v2");
        assert_eq!(test.status, Status::Amber);
        assert!(test.has_note());

        let mut details = test.to_details();
        details.preparation.data = 101;
        let err = ValidationError::PercentageOutOfRange {
            field: "data",
            value: 101,
        };
        assert_eq!(
            board.update_test(a, details.clone()),
            Err(BoardError::Validation(err))
        );
        assert_eq!(board.get(a).unwrap().preparation(), Preparation::default());

        details.preparation.data = 40;
        board.update_test(a, details).unwrap();
        assert_eq!(board.get(a).unwrap().preparation().data, 40);
        assert_eq!(board.get(a).unwrap().name, "Login v2");
    }

    #[test]
    fn view_mode() {
        let mut board = TestBoard::default();
        assert_eq!(board.view_mode(), ViewMode::Detailed);
        assert_eq!(board.toggle_view_mode(), ViewMode::Compact);
        board.set_view_mode(ViewMode::Detailed);
        assert_eq!(board.view_mode(), ViewMode::Detailed);
    }
}
