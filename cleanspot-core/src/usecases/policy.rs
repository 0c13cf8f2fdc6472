/// Point-award policy for verified cleanups.
///
/// The values are policy, not architecture: deployments override them
/// via configuration, the decision structure stays fixed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointPolicy {
    /// Flat award for every approved cleanup.
    pub base_points: i64,
    /// Extra award when the judge is confident enough.
    pub bonus_points: i64,
    /// Minimum confidence (inclusive) that earns the bonus.
    pub confidence_threshold: f64,
}

impl Default for PointPolicy {
    fn default() -> Self {
        Self {
            base_points: 100,
            bonus_points: 20,
            confidence_threshold: 0.8,
        }
    }
}

impl PointPolicy {
    pub fn award_for(&self, confidence: Option<f64>) -> i64 {
        let bonus = confidence
            .filter(|c| *c >= self.confidence_threshold)
            .map(|_| self.bonus_points)
            .unwrap_or(0);
        self.base_points + bonus
    }
}
