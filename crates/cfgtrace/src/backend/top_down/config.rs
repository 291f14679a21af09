use crate::backend::common::{require_nonzero, DEFAULT_MAX_STEPS};
use crate::error::ParseError;

/// Configuration options for the deterministic top-down backend.
///
/// # Example
///
/// ```rust
/// use cfgtrace::backend::top_down::TopDownConfig;
///
/// let config = TopDownConfig { max_steps: 500 };
/// assert_eq!(TopDownConfig::default().max_steps, 100_000);
/// # let _ = config;
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopDownConfig {
    /// Maximum number of recorded steps before the parse is abandoned
    ///
    /// Left-recursive grammars make the greedy expansion loop forever; this
    /// limit turns that into [`ParseError::StepLimitExceeded`].
    pub max_steps: usize,
}

impl Default for TopDownConfig {
    fn default() -> Self {
        Self {
            max_steps: DEFAULT_MAX_STEPS,
        }
    }
}

impl TopDownConfig {
    /// # Errors
    ///
    /// Returns [`ParseError::InvalidConfig`] if `max_steps` is zero.
    pub fn validate(&self) -> Result<(), ParseError> {
        require_nonzero("max_steps", self.max_steps)
    }
}
