//! Configuration validation
//!
//! This module provides validation logic to ensure configuration values are
//! consistent, within valid ranges, and don't conflict with each other.
//! Errors are collected rather than short-circuited, so one failed load
//! reports every offending field at once.

use crate::{ConfigError, ConfigResult, NeurofieldConfig};

/// Validation errors that can occur during config validation
#[derive(Debug, Clone)]
pub enum ConfigValidationError {
    NonPositive { field: String, value: f64 },
    GridTooSmall { field: String, needed: usize, actual: usize },
    UnstableCourant { courant: f64 },
    InvalidValue { field: String, reason: String },
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonPositive { field, value } => {
                write!(f, "{} = {} must be finite and positive", field, value)
            }
            Self::GridTooSmall {
                field,
                needed,
                actual,
            } => {
                write!(f, "{} = {} is below the minimum of {}", field, actual, needed)
            }
            Self::UnstableCourant { courant } => {
                write!(
                    f,
                    "wave discretization is unstable: Courant number {} exceeds 1.0",
                    courant
                )
            }
            Self::InvalidValue { field, reason } => {
                write!(f, "Invalid configuration value for {}: {}", field, reason)
            }
        }
    }
}

/// Validate the complete configuration
///
/// Checks for:
/// - Positive, finite grid and physical constants
/// - Minimum grid sizes for both kernels
/// - Wave stability (Courant number at most 1)
/// - Stimulus schedule consistency
///
/// # Errors
///
/// Returns `ConfigError::ValidationError` with details if validation fails
pub fn validate_config(config: &NeurofieldConfig) -> ConfigResult<()> {
    let mut errors = Vec::new();

    validate_lif(config, &mut errors);
    validate_wave(config, &mut errors);
    validate_logging(config, &mut errors);

    if !errors.is_empty() {
        let error_messages = errors
            .iter()
            .map(|e| format!("  - {}", e))
            .collect::<Vec<_>>()
            .join("\n");

        return Err(ConfigError::ValidationError(format!(
            "Configuration validation failed:\n{}",
            error_messages
        )));
    }

    Ok(())
}

fn check_positive(field: &str, value: f64, errors: &mut Vec<ConfigValidationError>) -> bool {
    if !value.is_finite() || value <= 0.0 {
        errors.push(ConfigValidationError::NonPositive {
            field: field.to_string(),
            value,
        });
        return false;
    }
    true
}

fn validate_lif(config: &NeurofieldConfig, errors: &mut Vec<ConfigValidationError>) {
    let lif = &config.lif;
    check_positive("lif.dt_ms", lif.dt_ms, errors);
    check_positive("lif.horizon_ms", lif.horizon_ms, errors);
    check_positive("lif.membrane.tau_m", lif.membrane.tau_m, errors);

    if !lif.membrane.refractory_period.is_finite() || lif.membrane.refractory_period < 0.0 {
        errors.push(ConfigValidationError::InvalidValue {
            field: "lif.membrane.refractory_period".to_string(),
            reason: "must be finite and >= 0".to_string(),
        });
    }

    // NaN-safe: also rejects a peak equal to or below threshold
    if !(lif.membrane.spike_peak > lif.membrane.v_th) {
        errors.push(ConfigValidationError::InvalidValue {
            field: "lif.membrane.spike_peak".to_string(),
            reason: format!("must exceed v_th ({})", lif.membrane.v_th),
        });
    }

    let stim = &lif.stimulus;
    if stim.pulses.is_empty() {
        if !stim.duration_ms.is_finite() || stim.duration_ms < 0.0 {
            errors.push(ConfigValidationError::InvalidValue {
                field: "lif.stimulus.duration_ms".to_string(),
                reason: "must be finite and >= 0".to_string(),
            });
        }
        if stim.count > 1 && (!stim.spacing_ms.is_finite() || stim.spacing_ms <= 0.0) {
            errors.push(ConfigValidationError::InvalidValue {
                field: "lif.stimulus.spacing_ms".to_string(),
                reason: "must be positive when count > 1".to_string(),
            });
        }
    } else {
        for (idx, pulse) in stim.pulses.iter().enumerate() {
            if !pulse.duration_ms.is_finite() || pulse.duration_ms < 0.0 {
                errors.push(ConfigValidationError::InvalidValue {
                    field: format!("lif.stimulus.pulses[{}].duration_ms", idx),
                    reason: "must be finite and >= 0".to_string(),
                });
            }
        }
    }
}

fn validate_wave(config: &NeurofieldConfig, errors: &mut Vec<ConfigValidationError>) {
    let wave = &config.wave;
    let mut sizes_ok = true;

    sizes_ok &= check_positive("wave.speed", wave.speed, errors);
    sizes_ok &= check_positive("wave.length", wave.length, errors);
    sizes_ok &= check_positive("wave.duration", wave.duration, errors);

    if wave.spatial_points < 3 {
        errors.push(ConfigValidationError::GridTooSmall {
            field: "wave.spatial_points".to_string(),
            needed: 3,
            actual: wave.spatial_points,
        });
        sizes_ok = false;
    }
    if wave.time_steps < 1 {
        errors.push(ConfigValidationError::GridTooSmall {
            field: "wave.time_steps".to_string(),
            needed: 1,
            actual: wave.time_steps,
        });
        sizes_ok = false;
    }

    // Stability only means anything once the sizes themselves are sane.
    // Same slack the wave kernel applies before stepping.
    if sizes_ok {
        let dx = wave.length / (wave.spatial_points - 1) as f64;
        let dt = wave.duration / wave.time_steps as f64;
        let courant = wave.speed * dt / dx;
        if courant > 1.0 + 1e-9 {
            errors.push(ConfigValidationError::UnstableCourant { courant });
        }
    }
}

fn validate_logging(config: &NeurofieldConfig, errors: &mut Vec<ConfigValidationError>) {
    if config.logging.level.trim().is_empty() {
        errors.push(ConfigValidationError::InvalidValue {
            field: "logging.level".to_string(),
            reason: "must not be empty".to_string(),
        });
    }
}
