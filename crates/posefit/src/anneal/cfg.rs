//! Annealer configuration and presets.
//!
//! Policy
//! - The tuned constants are empirical; they live here as named fields so a
//!   caller can override one without touching the loop.

/// Step size and budget plus the tuned force/escape constants.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnnealCfg {
    /// Multiplier applied to the net force when displacing a vertex.
    pub nudge_factor: f64,
    /// Relaxation iterations before the run counts as exhausted.
    pub budget: u64,
    /// The wind is redrawn whenever the remaining budget is a multiple of this;
    /// 0 keeps the initial wind for the whole run.
    pub wind_period: u64,
    /// Wind components are drawn from `wind_scale * {-5, ..., 4}`.
    pub wind_scale: f64,
    /// Per-connection jitter components from `jitter_scale * {-50, ..., 49}`.
    pub jitter_scale: f64,
    /// Extra wiggle for edges crossing the hole, `wiggle_scale * {-50, ..., 49}`.
    pub wiggle_scale: f64,
    /// Gain of the pull toward the hole center for vertices outside the hole.
    pub outside_pull: f64,
    /// A vertex is stuck when `total > stuck_ratio * |net|` ...
    pub stuck_ratio: f64,
    /// ... and `|net| < stuck_net`.
    pub stuck_net: f64,
}

impl AnnealCfg {
    /// Single long run with large steps.
    pub fn deep() -> Self {
        Self {
            nudge_factor: 0.80,
            budget: 10_000_000,
            ..Self::restart()
        }
    }

    /// Cheap run meant to be repeated many times by the search.
    pub fn restart() -> Self {
        Self {
            nudge_factor: 0.05,
            budget: 100_000,
            wind_period: 1000,
            wind_scale: 0.1,
            jitter_scale: 0.01,
            wiggle_scale: 0.1,
            outside_pull: 10.0,
            stuck_ratio: 10.0,
            stuck_net: 0.05,
        }
    }

    pub fn with_nudge_factor(mut self, f: f64) -> Self {
        self.nudge_factor = f;
        self
    }

    pub fn with_budget(mut self, b: u64) -> Self {
        self.budget = b;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if !(self.nudge_factor.is_finite() && self.nudge_factor > 0.0) {
            return Err(format!(
                "nudge_factor must be positive and finite, got {}",
                self.nudge_factor
            ));
        }
        if self.budget == 0 {
            return Err("budget must be at least 1".into());
        }
        Ok(())
    }
}

impl Default for AnnealCfg {
    fn default() -> Self {
        Self::restart()
    }
}
