//! Configuration for the Hotelling T-squared chart.

use std::str::FromStr;

use argus_estimate::EstimatorConfig;

use crate::error::T2Error;

/// Rule used to derive the control limit from the baseline sample.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ThresholdRule {
    /// Scaled F-distribution quantile (exact under multivariate normality).
    #[default]
    Parametric,
    /// Quantile of a kernel density estimate fitted to the baseline
    /// T-squared values. Makes no distributional assumption.
    Nonparametric,
}

impl FromStr for ThresholdRule {
    type Err = T2Error;

    /// Parses a threshold-rule selector. Accepts `"parametric"` and
    /// `"nonparametric"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "parametric" => Ok(ThresholdRule::Parametric),
            "nonparametric" => Ok(ThresholdRule::Nonparametric),
            other => Err(T2Error::InvalidConfiguration {
                value: other.to_string(),
            }),
        }
    }
}

/// Target alarm behavior of the chart, given as exactly one of a false-alarm
/// rate or an in-control average run length.
///
/// Both express the same exceedance probability: `far = 1 / ic_arl`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AlarmTarget {
    /// Probability of a false alarm at each in-control observation.
    FalseAlarmRate(f64),
    /// Expected number of in-control observations between false alarms.
    InControlArl(f64),
}

impl AlarmTarget {
    /// Exceedance probability the threshold must attain:
    /// `1 - far`, or `1 - 1/ic_arl`.
    pub fn exceedance_probability(&self) -> f64 {
        match *self {
            AlarmTarget::FalseAlarmRate(far) => 1.0 - far,
            AlarmTarget::InControlArl(arl) => 1.0 - 1.0 / arl,
        }
    }

    /// Validates the target.
    pub fn validate(&self) -> Result<(), T2Error> {
        match *self {
            AlarmTarget::FalseAlarmRate(far) => {
                if !far.is_finite() || far <= 0.0 || far >= 1.0 {
                    return Err(T2Error::InvalidFalseAlarmRate { far });
                }
            }
            AlarmTarget::InControlArl(arl) => {
                if !arl.is_finite() || arl <= 1.0 {
                    return Err(T2Error::InvalidInControlArl { arl });
                }
            }
        }
        Ok(())
    }
}

/// Configuration for a T-squared monitoring run.
///
/// # Example
///
/// ```
/// use argus_estimate::Method;
/// use argus_hotelling::{AlarmTarget, T2Config, ThresholdRule};
///
/// let config = T2Config::new()
///     .with_method(Method::Robust)
///     .with_threshold_rule(ThresholdRule::Nonparametric)
///     .with_alarm(AlarmTarget::FalseAlarmRate(0.01));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct T2Config {
    /// Baseline estimation configuration.
    estimator: EstimatorConfig,
    /// Control-limit derivation rule.
    threshold_rule: ThresholdRule,
    /// Target alarm behavior.
    alarm: AlarmTarget,
}

impl T2Config {
    /// Creates a new `T2Config` with default parameters.
    ///
    /// Defaults: classical estimation, parametric threshold, in-control
    /// ARL of 200.
    pub fn new() -> Self {
        Self {
            estimator: EstimatorConfig::new(),
            threshold_rule: ThresholdRule::Parametric,
            alarm: AlarmTarget::InControlArl(200.0),
        }
    }

    /// Sets the estimation method, keeping the current MCD tuning.
    pub fn with_method(mut self, method: argus_estimate::Method) -> Self {
        self.estimator = self.estimator.with_method(method);
        self
    }

    /// Replaces the full estimator configuration.
    pub fn with_estimator(mut self, estimator: EstimatorConfig) -> Self {
        self.estimator = estimator;
        self
    }

    /// Sets the threshold rule.
    pub fn with_threshold_rule(mut self, rule: ThresholdRule) -> Self {
        self.threshold_rule = rule;
        self
    }

    /// Sets the alarm target.
    pub fn with_alarm(mut self, alarm: AlarmTarget) -> Self {
        self.alarm = alarm;
        self
    }

    /// Returns the estimator configuration.
    pub fn estimator(&self) -> &EstimatorConfig {
        &self.estimator
    }

    /// Returns the threshold rule.
    pub fn threshold_rule(&self) -> ThresholdRule {
        self.threshold_rule
    }

    /// Returns the alarm target.
    pub fn alarm(&self) -> AlarmTarget {
        self.alarm
    }

    /// Validates this configuration.
    pub fn validate(&self) -> Result<(), T2Error> {
        self.alarm.validate()?;
        self.estimator.validate()?;
        Ok(())
    }
}

impl Default for T2Config {
    fn default() -> Self {
        Self::new()
    }
}
