//! Interpreter settings.

/// Default limit on nested user-function calls.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvalConfig {
    /// Deepest chain of active user-function calls before the run fails
    /// with a call-depth error.
    pub max_call_depth: usize,
    /// Seed for `randint` / `rand`. `None` seeds from system entropy.
    pub seed: Option<u64>,
}

impl EvalConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = depth;
        self
    }
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
            seed: None,
        }
    }
}
