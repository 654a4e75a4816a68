use serde::{Deserialize, Serialize};

/// Operational dials for the dispatch engine. The factor weights themselves
/// are fixed in the scoring rules and are deliberately not configurable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Confidence above which a candidate short-circuits the decision policy.
    pub strong_match_threshold: f64,
    /// Factor value above which a reasoning clause is emitted.
    pub notable_factor_threshold: f64,
    /// Entries kept per pool in the response payload.
    pub max_recommendations: usize,
    /// Trailing window for the past-performance feedback average.
    pub feedback_window_days: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            strong_match_threshold: 0.7,
            notable_factor_threshold: 0.7,
            max_recommendations: 5,
            feedback_window_days: 90,
        }
    }
}
