//! Configuration for paragraph reconstruction.

use serde::{Deserialize, Serialize};

/// Tolerances and thresholds used by block classification.
///
/// Every classification function takes the configuration explicitly, so the
/// same block can be re-analysed with different settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReflowConfig {
    /// Tolerance for edge alignment and centring checks (points).
    pub dm: f32,

    /// Margin added around a line bbox when testing decoration intersection.
    pub line_margin: f32,

    /// Gap along the text flow between two same-row lines that counts them as
    /// discrete fragments.
    pub discrete_distance: f32,

    /// Number of discrete same-row gaps that makes a block discrete.
    pub discrete_threshold: usize,

    /// Minimum overlap across the text flow, relative to the smaller line,
    /// for two lines to be horizontally aligned.
    pub row_overlap_factor: f32,

    /// Decimal places kept in paragraph spacing values.
    pub precision: u32,
}

impl Default for ReflowConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ReflowConfig {
    /// Create new configuration with defaults.
    pub fn new() -> Self {
        Self {
            dm: 1.0,
            line_margin: 1.0,
            discrete_distance: 25.0,
            discrete_threshold: 2,
            row_overlap_factor: 0.0,
            precision: 1,
        }
    }

    /// Set the alignment tolerance.
    pub fn with_dm(mut self, dm: f32) -> Self {
        self.dm = dm;
        self
    }

    /// Set the line margin used for decoration intersection.
    pub fn with_line_margin(mut self, margin: f32) -> Self {
        self.line_margin = margin;
        self
    }

    /// Set the gap distance and count threshold for discrete lines.
    pub fn with_discrete(mut self, distance: f32, threshold: usize) -> Self {
        self.discrete_distance = distance;
        self.discrete_threshold = threshold;
        self
    }

    /// Set the row overlap factor.
    pub fn with_row_overlap_factor(mut self, factor: f32) -> Self {
        self.row_overlap_factor = factor;
        self
    }

    /// Set the decimal precision of paragraph spacing.
    pub fn with_precision(mut self, precision: u32) -> Self {
        self.precision = precision;
        self
    }

    /// Round a spacing value to the configured precision.
    pub fn round(&self, value: f32) -> f32 {
        let scale = 10f32.powi(self.precision as i32);
        (value * scale).round() / scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = ReflowConfig::default();
        assert_eq!(cfg.dm, 1.0);
        assert_eq!(cfg.line_margin, 1.0);
        assert_eq!(cfg.discrete_distance, 25.0);
        assert_eq!(cfg.discrete_threshold, 2);
        assert_eq!(cfg.precision, 1);
    }

    #[test]
    fn test_builder() {
        let cfg = ReflowConfig::new()
            .with_dm(2.0)
            .with_discrete(10.0, 3)
            .with_line_margin(0.5)
            .with_row_overlap_factor(0.25)
            .with_precision(2);
        assert_eq!(cfg.dm, 2.0);
        assert_eq!(cfg.line_margin, 0.5);
        assert_eq!(cfg.row_overlap_factor, 0.25);
        assert_eq!(cfg.discrete_distance, 10.0);
        assert_eq!(cfg.discrete_threshold, 3);
        assert_eq!(cfg.precision, 2);
    }

    #[test]
    fn test_round() {
        let cfg = ReflowConfig::default();
        assert_eq!(cfg.round(12.34), 12.3);
        assert_eq!(cfg.round(12.36), 12.4);
        assert_eq!(cfg.with_precision(0).round(12.6), 13.0);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let cfg: ReflowConfig = serde_json::from_str(r#"{"dm": 0.5}"#).unwrap();
        assert_eq!(cfg.dm, 0.5);
        assert_eq!(cfg.discrete_threshold, 2);
    }
}
