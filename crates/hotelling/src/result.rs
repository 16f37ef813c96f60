//! Output type for a T-squared monitoring run.

/// Result of a Hotelling T-squared monitoring run.
///
/// Holds the per-observation squared Mahalanobis distances for both phases,
/// the control limit derived from the baseline, and the exceedance decision
/// for every monitoring observation. Baseline observations are assumed
/// in-control by construction and carry no flags.
#[derive(Debug, Clone)]
pub struct T2Result {
    /// T-squared values of the baseline rows.
    train_statistics: Vec<f64>,
    /// T-squared values of the monitoring rows.
    monitoring_statistics: Vec<f64>,
    /// Control limit h.
    threshold: f64,
    /// `monitoring_statistics[t] > threshold`, index-aligned.
    exceedances: Vec<bool>,
}

impl T2Result {
    /// Creates a new `T2Result` (crate-internal constructor).
    pub(crate) fn new(
        train_statistics: Vec<f64>,
        monitoring_statistics: Vec<f64>,
        threshold: f64,
        exceedances: Vec<bool>,
    ) -> Self {
        Self {
            train_statistics,
            monitoring_statistics,
            threshold,
            exceedances,
        }
    }

    /// Returns the baseline T-squared sequence.
    pub fn train_statistics(&self) -> &[f64] {
        &self.train_statistics
    }

    /// Returns the monitoring T-squared sequence.
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors() {
        let result = T2Result::new(
            vec![1.0, 2.0],
            vec![3.0, 8.0, 4.0],
            5.0,
            vec![false, true, false],
        );
        assert_eq!(result.train_statistics(), &[1.0, 2.0]);
        assert_eq!(result.monitoring_statistics(), &[3.0, 8.0, 4.0]);
        assert_eq!(result.threshold(), 5.0);
        assert_eq!(result.exceedances(), &[false, true, false]);
        assert_eq!(result.n_monitoring(), 3);
        assert_eq!(result.exceedance_indices(), vec![1]);
    }

    #[test]
    fn no_exceedances() {
        let result = T2Result::new(vec![], vec![1.0, 2.0], 10.0, vec![false, false]);
        assert!(result.exceedance_indices().is_empty());
    }

    #[test]
    fn result_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<T2Result>();
    }
}
