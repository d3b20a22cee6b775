//! Construction-time configuration errors.
//!
//! Per-tick conditions (a blocked ray, a burst still cooling down, a target
//! out of range) are not errors and never surface here; they simply suppress
//! output for that tick. Only misconfiguration detected while building an
//! agent is reported, and it disables the agent instead of aborting.

use thiserror::Error;

/// Misconfiguration detected while building an agent.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// The agent carries a weapon but no spawn point to fire it from.
    #[error("armed agent has no projectile spawn points")]
    EmptySpawnPoints,
    /// A timing interval that must be strictly positive was not.
    #[error("{field} must be greater than zero (got {value})")]
    NonPositiveInterval {
        /// Name of the offending setting.
        field: &'static str,
        /// The rejected value.
        value: f32,
    },
    /// A range or strength that must not be negative was.
    #[error("{field} must not be negative (got {value})")]
    NegativeRange {
        /// Name of the offending setting.
        field: &'static str,
        /// The rejected value.
        value: f32,
    },
    /// A burst must contain at least one shot.
    #[error("burst size must be at least one shot")]
    InvalidBurstSize,
    /// A setting was `NaN` or infinite.
    #[error("{field} must be a finite number")]
    NonFinite {
        /// Name of the offending setting.
        field: &'static str,
    },
}

/// Rejects `NaN` and infinities.
pub(crate) fn finite(field: &'static str, value: f32) -> Result<f32, ConfigError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigError::NonFinite { field })
    }
}

/// Requires `value > 0`.
pub(crate) fn positive(field: &'static str, value: f32) -> Result<f32, ConfigError> {
    if finite(field, value)? > 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::NonPositiveInterval { field, value })
    }
}

/// Requires `value >= 0`.
pub(crate) fn non_negative(field: &'static str, value: f32) -> Result<f32, ConfigError> {
    if finite(field, value)? >= 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::NegativeRange { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::zero(0.0)]
    #[case::negative(-1.0)]
    fn positive_rejects_non_positive(#[case] value: f32) {
        assert_eq!(
            positive("fire_rate", value),
            Err(ConfigError::NonPositiveInterval {
                field: "fire_rate",
                value
            })
        );
    }

    #[test]
    fn non_negative_accepts_zero() {
        assert_eq!(non_negative("tolerance", 0.0), Ok(0.0));
    }

    #[test]
    fn nan_is_reported_as_non_finite() {
        assert_eq!(
            non_negative("range", f32::NAN),
            Err(ConfigError::NonFinite { field: "range" })
        );
    }

    #[test]
    fn messages_name_the_field() {
        let err = ConfigError::NegativeRange {
            field: "follow_range",
            value: -2.0,
        };
        assert_eq!(err.to_string(), "follow_range must not be negative (got -2)");
    }
}
