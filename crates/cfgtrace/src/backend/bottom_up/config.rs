use crate::backend::common::{require_nonzero, DEFAULT_MAX_STEPS};
use crate::error::ParseError;

/// Configuration options for the deterministic bottom-up backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BottomUpConfig {
    /// Maximum number of recorded steps before the parse is abandoned
    ///
    /// A unit cycle such as `a --> b` / `b --> a` reduces forever once one of
    /// its symbols is on the stack.
    pub max_steps: usize,
}

impl Default for BottomUpConfig {
    fn default() -> Self {
        Self {
            max_steps: DEFAULT_MAX_STEPS,
        }
    }
}

impl BottomUpConfig {
    /// # Errors
    ///
    /// Returns [`ParseError::InvalidConfig`] if `max_steps` is zero.
    pub fn validate(&self) -> Result<(), ParseError> {
        require_nonzero("max_steps", self.max_steps)
    }
}
