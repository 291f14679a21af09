//! Explicit depth-first search stack used by the backtracking backends.
//!
//! Recursion depth is bounded by `max_depth` frames instead of the native call
//! stack, and the number of visited states by `max_work`.

use crate::error::ParseError;

/// Frame stack plus search budget and counters.
#[derive(Debug)]
pub(crate) struct Search<F> {
    frames: Vec<F>,
    max_depth: usize,
    max_work: usize,
    work: usize,
    backtracks: usize,
    deepest: usize,
    pruned: bool,
}

impl<F> Search<F> {
    pub(crate) fn new(max_depth: usize, max_work: usize) -> Self {
        Self {
            frames: Vec::new(),
            max_depth,
            max_work,
            work: 0,
            backtracks: 0,
            deepest: 0,
            pruned: false,
        }
    }

    /// Count one visited state.
    pub(crate) fn tick(&mut self) -> Result<(), ParseError> {
        self.work += 1;
        if self.work > self.max_work {
            tracing::debug!(limit = self.max_work, "search work limit exceeded");
            return Err(ParseError::WorkLimitExceeded { limit: self.max_work });
        }
        Ok(())
    }

    /// The innermost choice point.
    pub(crate) fn current(&mut self) -> Option<&mut F> {
        self.frames.last_mut()
    }

    /// Enter a new choice point, or prune it when the depth limit is reached.
    pub(crate) fn descend(&mut self, frame: F) {
        if self.frames.len() >= self.max_depth {
            self.pruned = true;
            self.backtracks += 1;
            tracing::trace!(depth = self.frames.len(), "branch pruned at depth limit");
            return;
        }
        self.frames.push(frame);
        self.deepest = self.deepest.max(self.frames.len());
    }

    /// Abandon the innermost choice point.
    pub(crate) fn backtrack(&mut self) {
        if self.frames.pop().is_some() {
            self.backtracks += 1;
            tracing::trace!(depth = self.frames.len(), "backtrack");
        }
    }

    /// Count a candidate move that failed without creating a frame.
    pub(crate) fn dead_end(&mut self) {
        self.backtracks += 1;
    }

    /// Open choice points, outermost first.
    pub(crate) fn path(&self) -> &[F] {
        &self.frames
    }

    pub(crate) const fn work(&self) -> usize {
        self.work
    }

    pub(crate) const fn backtracks(&self) -> usize {
        self.backtracks
    }

    pub(crate) const fn deepest(&self) -> usize {
        self.deepest
    }

    /// Verdict once every frame is exhausted: a plain failure, unless some
    /// branch was cut off by the depth limit.
    pub(crate) fn exhausted(&self) -> Result<(), ParseError> {
        if self.pruned {
            return Err(ParseError::DepthLimitExceeded { limit: self.max_depth });
        }
        Ok(())
    }
}
