use crate::backend::common::{require_nonzero, DEFAULT_MAX_DEPTH, DEFAULT_MAX_WORK};
use crate::error::ParseError;

/// Configuration options for the backtracking top-down backend.
///
/// # Example
///
/// ```rust
/// use cfgtrace::backend::top_down_bt::TopDownBtConfig;
///
/// let config = TopDownBtConfig {
///     max_depth: 64,      // choice points on the search stack
///     max_work: 10_000,   // visited search states
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopDownBtConfig {
    /// Maximum number of frames on the search stack
    ///
    /// Deeper branches are pruned. A search that fails after pruning reports
    /// [`ParseError::DepthLimitExceeded`] since the verdict is inconclusive.
    pub max_depth: usize,

    /// Maximum number of visited search states before giving up
    pub max_work: usize,
}

impl Default for TopDownBtConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_work: DEFAULT_MAX_WORK,
        }
    }
}

impl TopDownBtConfig {
    /// # Errors
    ///
    /// Returns [`ParseError::InvalidConfig`] if either limit is zero.
    pub fn validate(&self) -> Result<(), ParseError> {
        require_nonzero("max_depth", self.max_depth)?;
        require_nonzero("max_work", self.max_work)
    }
}
