//! Output type for a MEWMA monitoring run.

/// Result of a MEWMA monitoring run.
///
/// Holds the smoothed quadratic-form statistic per monitoring observation,
/// the calibrated control limit, and the exceedance decision sequence. The
/// smoothing parameter and ARL target are carried along so downstream
/// consumers can label charts without re-reading the configuration.
#[derive(Debug, Clone)]
pub struct MewmaResult {
    /// Quadratic-form statistic per monitoring observation.
    monitoring_statistics: Vec<f64>,
    /// Calibrated control limit h.
    threshold: f64,
    /// `monitoring_statistics[t] > threshold`, index-aligned.
    exceedances: Vec<bool>,
    /// Smoothing parameter used for the recursion.
    lambda: f64,
    /// In-control ARL the limit was calibrated for.
    ic_arl: f64,
}

impl MewmaResult {
    /// Creates a new `MewmaResult` (crate-internal constructor).
    pub(crate) fn new(
        monitoring_statistics: Vec<f64>,
        threshold: f64,
        exceedances: Vec<bool>,
        lambda: f64,
        ic_arl: f64,
    ) -> Self {
        Self {
            monitoring_statistics,
            threshold,
            exceedances,
            lambda,
            ic_arl,
        }
    }

    /// Returns the monitoring statistic sequence.
    pub fn monitoring_statistics(&self) -> &[f64] {
        &self.monitoring_statistics
    }

    /// Returns the control limit.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Returns the exceedance flags, index-aligned with the monitoring
    /// statistics.
    pub fn exceedances(&self) -> &[bool] {
        &self.exceedances
    }

    /// Returns the smoothing parameter used for the recursion.
    pub fn lambda(&self) -> f64 {
        self.lambda
    }

    /// Returns the in-control ARL target the control limit was calibrated for.
    pub fn ic_arl(&self) -> f64 {
        self.ic_arl
    }

    /// Returns the number of monitoring observations.
    pub fn n_monitoring(&self) -> usize {
        self.monitoring_statistics.len()
    }

    /// Returns the indices of out-of-control monitoring observations.
    pub fn exceedance_indices(&self) -> Vec<usize> {
        self.exceedances
            .iter()
            .enumerate()
            .filter(|&(_, &e)| e)
            .map(|(i, _)| i)
            .collect()
    }
}
