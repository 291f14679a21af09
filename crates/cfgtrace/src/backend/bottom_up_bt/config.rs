use crate::backend::common::{require_nonzero, DEFAULT_MAX_DEPTH, DEFAULT_MAX_WORK};
use crate::error::ParseError;

/// Configuration options for the backtracking bottom-up backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BottomUpBtConfig {
    /// Maximum number of frames on the search stack
    ///
    /// A failed search that hit this limit reports
    /// [`ParseError::DepthLimitExceeded`] rather than a rejection.
    pub max_depth: usize,

    /// Maximum number of visited search states before giving up
    pub max_work: usize,
}

impl Default for BottomUpBtConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_work: DEFAULT_MAX_WORK,
        }
    }
}

impl BottomUpBtConfig {
    /// # Errors
    ///
    /// Returns [`ParseError::InvalidConfig`] if either limit is zero.
    pub fn validate(&self) -> Result<(), ParseError> {
        require_nonzero("max_depth", self.max_depth)?;
        require_nonzero("max_work", self.max_work)
    }
}
