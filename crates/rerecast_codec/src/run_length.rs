//! Run-length encoding of the per-span [`AreaType`]s.
//!
//! Neighboring spans usually share their classification, so the areas are stored as
//! `(length, area)` pairs instead of one value per span.

use crate::area::AreaType;

/// `length` consecutive spans classified as `area`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AreaRun {
    /// Number of repetitions. Never zero when produced by [`area_runs`].
    pub length: usize,
    /// The repeated area type
    pub area: AreaType,
}

/// Returns an iterator over the maximal runs of equal areas, left to right.
pub fn area_runs(areas: &[AreaType]) -> AreaRuns<'_> {
    AreaRuns { areas }
}

/// Iterator returned by [`area_runs`].
#[derive(Debug, Clone)]
pub struct AreaRuns<'a> {
    areas: &'a [AreaType],
}

impl Iterator for AreaRuns<'_> {
    type Item = AreaRun;

    fn next(&mut self) -> Option<Self::Item> {
        let (&area, rest) = self.areas.split_first()?;
        let length = 1 + rest.iter().take_while(|&&other| other == area).count();
        self.areas = &self.areas[length..];
        Some(AreaRun { length, area })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.areas.len();
        (len.min(1), Some(len))
    }
}

/// Writes runs into a fixed-size area buffer, front to back.
#[derive(Debug)]
pub struct RunLengthFill<'a> {
    areas: &'a mut [AreaType],
    filled: usize,
}

impl<'a> RunLengthFill<'a> {
    /// Starts filling `areas` from its first slot.
    pub fn new(areas: &'a mut [AreaType]) -> Self {
        Self { areas, filled: 0 }
    }

    /// Returns `true` once every slot has been written.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.filled == self.areas.len()
    }

    /// The number of slots written so far.
    #[inline]
    pub fn filled(&self) -> usize {
        self.filled
    }

    /// The number of slots still to be written.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.areas.len() - self.filled
    }

    /// Writes the run into the next free slots, stopping at the end of the buffer.
    /// Returns the number of repetitions that did not fit.
    pub fn push(&mut self, run: AreaRun) -> usize {
        let written = run.length.min(self.remaining());
        let end = self.filled + written;
        self.areas[self.filled..end].fill(run.area);
        self.filled = end;
        run.length - written
    }
}
