//! A restartable cursor over a computed safe sequence.

use banker_core::ProcessId;
use banker_engine::SafeReport;

/// One replayed grant: the k-th process in the sequence and the Work
/// vector immediately after it completed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayStep<'a> {
    /// Zero-based position within the safe sequence.
    pub index: usize,
    /// The process granted at this step.
    pub process: ProcessId,
    /// Work after this process completed and released its allocation.
    /// Borrows `trace[index + 1]` of the underlying report.
    pub work_after: &'a [u32],
}

/// Steps through a [`SafeReport`] one grant at a time.
///
/// The cursor only indexes into the already-computed trace; advancing it
/// triggers no recomputation and cannot fail. A fresh cursor sits before
/// the first grant, where [`work()`](TraceCursor::work) is the initial
/// Available vector. [`reset()`](TraceCursor::reset) returns there, and a
/// reset cursor yields the identical step stream again.
///
/// # Examples
///
/// ```
/// use banker_core::{Matrix, SystemState};
/// use banker_engine::evaluate;
/// use banker_replay::TraceCursor;
///
/// let allocation = Matrix::from_rows(&[vec![1], vec![1]]).unwrap();
/// let maximum = Matrix::from_rows(&[vec![2], vec![3]]).unwrap();
/// let state = SystemState::new(allocation, maximum, &[1]).unwrap();
/// let verdict = evaluate(&state);
/// let report = verdict.safe().unwrap();
///
/// let mut cursor = TraceCursor::new(report);
/// assert_eq!(cursor.work(), &[1]);
///
/// let first = cursor.advance().unwrap();
/// assert_eq!(first.process.index(), 0);
/// assert_eq!(first.work_after, &[2]);
///
/// assert!(cursor.advance().is_some());
/// assert!(cursor.is_complete());
/// assert!(cursor.advance().is_none());
/// ```
#[derive(Clone, Debug)]
pub struct TraceCursor<'a> {
    report: &'a SafeReport,
    /// Grants replayed so far; `work()` is `trace[pos]`.
    pos: usize,
}

impl<'a> TraceCursor<'a> {
    /// Position a new cursor before the first grant.
    pub fn new(report: &'a SafeReport) -> Self {
        Self { report, pos: 0 }
    }

    /// Replay the next grant, or `None` when every process has completed.
    pub fn advance(&mut self) -> Option<ReplayStep<'a>> {
        if self.pos == self.report.sequence.len() {
            return None;
        }
        let index = self.pos;
        self.pos += 1;
        Some(ReplayStep {
            index,
            process: self.report.sequence[index],
            work_after: &self.report.trace[index + 1],
        })
    }

    /// Return to the position before the first grant.
    pub fn reset(&mut self) {
        self.pos = 0;
    }

    /// Work at the current position: the initial Available before any
    /// grant, or the snapshot after the most recently replayed one.
    pub fn work(&self) -> &'a [u32] {
        &self.report.trace[self.pos]
    }

    /// Grants replayed so far.
    pub fn step_index(&self) -> usize {
        self.pos
    }

    /// Grants not yet replayed.
    pub fn remaining(&self) -> usize {
        self.report.sequence.len() - self.pos
    }

    /// `true` once every grant has been replayed ("all processes
    /// completed").
    pub fn is_complete(&self) -> bool {
        self.pos == self.report.sequence.len()
    }
}

impl<'a> Iterator for TraceCursor<'a> {
    type Item = ReplayStep<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.advance()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for TraceCursor<'_> {}
