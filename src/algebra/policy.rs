//! Tuning policy for the adaptive engine.
//!
//! The two knobs decide when the probe paths are attempted. They change
//! performance only, never results.
//!
//! # Loading
//!
//! With the `config` feature (on by default) a policy can be layered from,
//! lowest to highest priority:
//!
//! 1. Default values
//! 2. A TOML file (`skewset.toml`)
//! 3. Environment variables (`SKEWSET_SMALL_SET_THRESHOLD`, `SKEWSET_BIG_SMALL_RATIO`)
//!
//! ```toml
//! small_set_threshold = 200
//! big_small_ratio = 20
//! ```

#[cfg(feature = "config")]
use std::path::Path;

#[cfg(feature = "config")]
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use thiserror::Error;

/// Default cardinality below which a flat operand counts as small.
pub const DEFAULT_SMALL_SET_THRESHOLD: usize = 200;

/// Default size ratio the big operand must exceed for the difference probe.
pub const DEFAULT_BIG_SMALL_RATIO: usize = 20;

/// Largest accepted small-set threshold.
pub const MAX_SMALL_SET_THRESHOLD: usize = 1 << 20;

/// Policy errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PolicyError {
    /// A value failed validation.
    #[error("Invalid policy value for '{key}': {message}")]
    InvalidValue {
        /// Policy key that failed validation.
        key: String,
        /// Validation error message.
        message: String,
    },

    /// The policy source could not be parsed.
    #[error("Failed to parse policy: {0}")]
    Parse(String),
}

/// Thresholds that steer strategy selection.
///
/// # Examples
///
/// ```rust
/// use skewset::algebra::AlgebraPolicy;
///
/// let policy = AlgebraPolicy::default()
///     .with_small_set_threshold(64)
///     .with_big_small_ratio(8);
/// assert!(policy.validate().is_ok());
/// assert_eq!(policy.small_set_threshold(), 64);
///
/// let broken = AlgebraPolicy::default().with_big_small_ratio(0);
/// assert!(broken.validate().is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AlgebraPolicy {
    small_set_threshold: usize,
    big_small_ratio: usize,
}

impl Default for AlgebraPolicy {
    fn default() -> Self {
        Self {
            small_set_threshold: DEFAULT_SMALL_SET_THRESHOLD,
            big_small_ratio: DEFAULT_BIG_SMALL_RATIO,
        }
    }
}

impl AlgebraPolicy {
    /// Creates a validated policy.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError::InvalidValue`] if either value is out of range.
    pub fn new(small_set_threshold: usize, big_small_ratio: usize) -> Result<Self, PolicyError> {
        let policy = Self {
            small_set_threshold,
            big_small_ratio,
        };
        policy.validate()?;
        Ok(policy)
    }

    /// Returns a copy with a different small-set threshold. Not validated.
    #[must_use]
    pub const fn with_small_set_threshold(mut self, small_set_threshold: usize) -> Self {
        self.small_set_threshold = small_set_threshold;
        self
    }

    /// Returns a copy with a different big/small ratio. Not validated.
    #[must_use]
    pub const fn with_big_small_ratio(mut self, big_small_ratio: usize) -> Self {
        self.big_small_ratio = big_small_ratio;
        self
    }

    /// Flat operands with strictly fewer keys than this are probe candidates.
    /// Zero disables the probe paths.
    #[inline]
    #[must_use]
    pub const fn small_set_threshold(&self) -> usize {
        self.small_set_threshold
    }

    /// The difference probe runs only when `big / small` (floor division)
    /// is strictly greater than this.
    #[inline]
    #[must_use]
    pub const fn big_small_ratio(&self) -> usize {
        self.big_small_ratio
    }

    /// Checks both values.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError::InvalidValue`] naming the first bad key.
    pub fn validate(&self) -> Result<(), PolicyError> {
        if self.small_set_threshold > MAX_SMALL_SET_THRESHOLD {
            return Err(PolicyError::InvalidValue {
                key: "small_set_threshold".to_string(),
                message: format!(
                    "value {} exceeds maximum {MAX_SMALL_SET_THRESHOLD}",
                    self.small_set_threshold
                ),
            });
        }

        if self.big_small_ratio == 0 {
            return Err(PolicyError::InvalidValue {
                key: "big_small_ratio".to_string(),
                message: "value must be at least 1".to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(feature = "config")]
impl AlgebraPolicy {
    /// Loads the policy from `skewset.toml` and the environment.
    ///
    /// Priority: defaults < file < environment variables. A missing file is
    /// not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing or validation fails.
    pub fn load() -> Result<Self, PolicyError> {
        Self::load_from_path("skewset.toml")
    }

    /// Loads the policy from a specific file path and the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing or validation fails.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, PolicyError> {
        let figment = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed("SKEWSET_"));

        let policy = Self::extract(&figment)?;
        tracing::debug!(
            path = %path.as_ref().display(),
            small_set_threshold = policy.small_set_threshold,
            big_small_ratio = policy.big_small_ratio,
            "loaded algebra policy"
        );
        Ok(policy)
    }

    /// Creates a policy from a TOML string. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing or validation fails.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use skewset::algebra::AlgebraPolicy;
    ///
    /// let policy = AlgebraPolicy::from_toml("big_small_ratio = 50").unwrap();
    /// assert_eq!(policy.big_small_ratio(), 50);
    /// assert_eq!(policy.small_set_threshold(), 200);
    ///
    /// assert!(AlgebraPolicy::from_toml("small_set_threshold = -1").is_err());
    /// ```
    pub fn from_toml(toml_str: &str) -> Result<Self, PolicyError> {
        let figment = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::string(toml_str));

        Self::extract(&figment)
    }

    fn extract(figment: &Figment) -> Result<Self, PolicyError> {
        let policy: Self = figment
            .extract()
            .map_err(|e| PolicyError::Parse(e.to_string()))?;
        policy.validate()?;
        Ok(policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn defaults_match_constants() {
        let policy = AlgebraPolicy::default();
        assert_eq!(policy.small_set_threshold(), DEFAULT_SMALL_SET_THRESHOLD);
        assert_eq!(policy.big_small_ratio(), DEFAULT_BIG_SMALL_RATIO);
        assert_eq!(policy.validate(), Ok(()));
    }

    #[rstest]
    #[case::zero_threshold(0, 20, true)]
    #[case::max_threshold(MAX_SMALL_SET_THRESHOLD, 20, true)]
    #[case::over_max_threshold(MAX_SMALL_SET_THRESHOLD + 1, 20, false)]
    #[case::ratio_one(200, 1, true)]
    #[case::ratio_zero(200, 0, false)]
    fn new_validates(#[case] threshold: usize, #[case] ratio: usize, #[case] valid: bool) {
        assert_eq!(AlgebraPolicy::new(threshold, ratio).is_ok(), valid);
    }

    #[rstest]
    fn invalid_value_names_the_key() {
        let error = AlgebraPolicy::new(200, 0).unwrap_err();
        assert_eq!(
            error.to_string(),
            "Invalid policy value for 'big_small_ratio': value must be at least 1"
        );
    }
}
