//! Per-run limits.

use serde::{Deserialize, Serialize};

/// Limits applied to a single run.
///
/// ```rust
/// use statecraft::engine::RunConfig;
///
/// let config = RunConfig::new().step_limit(10_000).trail_limit(64);
/// assert_eq!(config.step_limit, Some(10_000));
///
/// let loaded = RunConfig::from_json(r#"{ "step_limit": 500 }"#).unwrap();
/// assert_eq!(loaded.step_limit, Some(500));
/// assert_eq!(loaded.trail_limit, None);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Maximum number of fired transitions before the run is rejected.
    pub step_limit: Option<usize>,

    /// Maximum number of checkpoints a backtracking run retains. The oldest
    /// are discarded first, which makes their alternatives unreachable.
    pub trail_limit: Option<usize>,
}

impl RunConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step_limit(mut self, steps: usize) -> Self {
        self.step_limit = Some(steps);
        self
    }

    pub fn trail_limit(mut self, checkpoints: usize) -> Self {
        self.trail_limit = Some(checkpoints);
        self
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_has_no_limits() {
        let config = RunConfig::default();
        assert_eq!(config.step_limit, None);
        assert_eq!(config.trail_limit, None);
    }

    #[test]
    fn empty_json_yields_defaults() {
        assert_eq!(RunConfig::from_json("{}").unwrap(), RunConfig::default());
    }

    #[test]
    fn unknown_shape_is_an_error() {
        assert!(RunConfig::from_json(r#"{ "step_limit": "many" }"#).is_err());
    }
}
