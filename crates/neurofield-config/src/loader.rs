// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration file loading with override support
//!
//! This module implements the 3-tier configuration loading system:
//! 1. TOML file (base defaults)
//! 2. Environment variables (runtime overrides)
//! 3. CLI arguments (explicit user overrides)

use crate::{ConfigError, ConfigResult, NeurofieldConfig};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Find the NeuroField configuration file
///
/// Search order:
/// 1. `NEUROFIELD_CONFIG_PATH` environment variable
/// 2. Current working directory: `./neurofield.toml`
/// 3. Ancestor directories (searches up to 5 levels for a workspace root)
///
/// # Errors
///
/// Returns `ConfigError::FileNotFound` if no config file is found in any location
pub fn find_config_file() -> ConfigResult<PathBuf> {
    // 1. Check environment variable first
    if let Ok(env_path) = env::var("NEUROFIELD_CONFIG_PATH") {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return Ok(path);
        } else {
            return Err(ConfigError::FileNotFound(format!(
                "Config file specified by NEUROFIELD_CONFIG_PATH not found: {}",
                path.display()
            )));
        }
    }

    // 2. Search in common locations
    let mut search_paths = Vec::new();

    if let Ok(cwd) = env::current_dir() {
        search_paths.push(cwd.join("neurofield.toml"));

        // Search up to 5 levels for workspace root
        let mut current = cwd.clone();
        for _ in 0..5 {
            if let Some(parent) = current.parent() {
                search_paths.push(parent.join("neurofield.toml"));
                current = parent.to_path_buf();
            }
        }
    }

    for path in &search_paths {
        if path.exists() {
            return Ok(path.clone());
        }
    }

    let search_list = search_paths
        .iter()
        .map(|p| format!("  - {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n");

    Err(ConfigError::FileNotFound(format!(
        "NeuroField configuration file 'neurofield.toml' not found in any of these locations:\n{}\n\nSet NEUROFIELD_CONFIG_PATH environment variable to specify custom location.",
        search_list
    )))
}

/// Load configuration from TOML file
///
/// # Arguments
///
/// * `config_path` - Optional path to config file. If `None`, will search for config file.
/// * `cli_args` - Optional CLI argument overrides
///
/// # Returns
///
/// Complete `NeurofieldConfig` with all overrides applied
///
/// # Errors
///
/// Returns error if config file is not found or contains invalid TOML
pub fn load_config(
    config_path: Option<&Path>,
    cli_args: Option<&HashMap<String, String>>,
) -> ConfigResult<NeurofieldConfig> {
    let config_file = if let Some(path) = config_path {
        path.to_path_buf()
    } else {
        find_config_file()?
    };

    let content = fs::read_to_string(&config_file)?;

    let mut config: NeurofieldConfig = toml::from_str(&content)?;

    // Apply overrides in order
    apply_environment_overrides(&mut config);

    if let Some(cli) = cli_args {
        apply_cli_overrides(&mut config, cli);
    }

    Ok(config)
}

fn parse_bool_flag(value: &str) -> bool {
    value.eq_ignore_ascii_case("true") || value == "1" || value.eq_ignore_ascii_case("yes")
}

/// Apply environment variable overrides to configuration
///
/// Supported environment variables:
/// - `NEUROFIELD_LOG_LEVEL` -> `logging.level`
/// - `NEUROFIELD_RESULTS_DIR` -> `simulation.results_dir`
/// - `NEUROFIELD_RUN_LIF` -> `simulation.run_lif`
/// - `NEUROFIELD_RUN_WAVE` -> `simulation.run_wave`
/// - `NEUROFIELD_LIF_DT_MS` -> `lif.dt_ms`
/// - `NEUROFIELD_LIF_HORIZON_MS` -> `lif.horizon_ms`
/// - `NEUROFIELD_WAVE_SPEED` -> `wave.speed`
/// - `NEUROFIELD_WAVE_POINTS` -> `wave.spatial_points`
/// - `NEUROFIELD_WAVE_STEPS` -> `wave.time_steps`
pub fn apply_environment_overrides(config: &mut NeurofieldConfig) {
    if let Ok(value) = env::var("NEUROFIELD_LOG_LEVEL") {
        config.logging.level = value;
    }
    if let Ok(value) = env::var("NEUROFIELD_RESULTS_DIR") {
        config.simulation.results_dir = PathBuf::from(value);
    }
    if let Ok(value) = env::var("NEUROFIELD_RUN_LIF") {
        config.simulation.run_lif = parse_bool_flag(&value);
    }
    if let Ok(value) = env::var("NEUROFIELD_RUN_WAVE") {
        config.simulation.run_wave = parse_bool_flag(&value);
    }

    // LIF grid
    if let Ok(value) = env::var("NEUROFIELD_LIF_DT_MS") {
        if let Ok(dt) = value.parse::<f64>() {
            config.lif.dt_ms = dt;
        }
    }
    if let Ok(value) = env::var("NEUROFIELD_LIF_HORIZON_MS") {
        if let Ok(horizon) = value.parse::<f64>() {
            config.lif.horizon_ms = horizon;
        }
    }

    // Wave discretization
    if let Ok(value) = env::var("NEUROFIELD_WAVE_SPEED") {
        if let Ok(speed) = value.parse::<f64>() {
            config.wave.speed = speed;
        }
    }
    if let Ok(value) = env::var("NEUROFIELD_WAVE_POINTS") {
        if let Ok(points) = value.parse::<usize>() {
            config.wave.spatial_points = points;
        }
    }
    if let Ok(value) = env::var("NEUROFIELD_WAVE_STEPS") {
        if let Ok(steps) = value.parse::<usize>() {
            config.wave.time_steps = steps;
        }
    }
}

/// Apply CLI argument overrides to configuration
///
/// # Arguments
///
/// * `config` - Configuration to modify
/// * `cli_args` - HashMap of CLI arguments (e.g., `{"wave_speed": "1.5", "log_level": "debug"}`)
pub fn apply_cli_overrides(config: &mut NeurofieldConfig, cli_args: &HashMap<String, String>) {
    if let Some(value) = cli_args.get("log_level") {
        config.logging.level = value.clone();
    }
    if let Some(value) = cli_args.get("results_dir") {
        config.simulation.results_dir = PathBuf::from(value);
    }
    if let Some(value) = cli_args.get("run_lif") {
        config.simulation.run_lif = parse_bool_flag(value);
    }
    if let Some(value) = cli_args.get("run_wave") {
        config.simulation.run_wave = parse_bool_flag(value);
    }

    if let Some(value) = cli_args.get("lif_dt_ms") {
        if let Ok(dt) = value.parse::<f64>() {
            config.lif.dt_ms = dt;
        }
    }
    if let Some(value) = cli_args.get("lif_horizon_ms") {
        if let Ok(horizon) = value.parse::<f64>() {
            config.lif.horizon_ms = horizon;
        }
    }

    if let Some(value) = cli_args.get("wave_speed") {
        if let Ok(speed) = value.parse::<f64>() {
            config.wave.speed = speed;
        }
    }
    if let Some(value) = cli_args.get("wave_points") {
        if let Ok(points) = value.parse::<usize>() {
            config.wave.spatial_points = points;
        }
    }
    if let Some(value) = cli_args.get("wave_steps") {
        if let Ok(steps) = value.parse::<usize>() {
            config.wave.time_steps = steps;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use std::sync::Mutex;
    use tempfile::tempdir;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_find_config_file_env_var() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("custom_config.toml");
        File::create(&config_path).unwrap();

        env::set_var("NEUROFIELD_CONFIG_PATH", config_path.to_str().unwrap());
        let result = find_config_file();
        env::remove_var("NEUROFIELD_CONFIG_PATH");

        assert!(result.is_ok());
        assert_eq!(result.unwrap(), config_path);
    }

    #[test]
    fn test_missing_env_path_is_an_error() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        env::set_var("NEUROFIELD_CONFIG_PATH", "/nonexistent/neurofield.toml");
        let result = find_config_file();
        env::remove_var("NEUROFIELD_CONFIG_PATH");

        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_load_minimal_config() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let saved_dt = env::var("NEUROFIELD_LIF_DT_MS").ok();
        let saved_speed = env::var("NEUROFIELD_WAVE_SPEED").ok();
        env::remove_var("NEUROFIELD_LIF_DT_MS");
        env::remove_var("NEUROFIELD_WAVE_SPEED");
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("neurofield.toml");

        let mut file = File::create(&config_path).unwrap();
        writeln!(file, "[lif]").unwrap();
        writeln!(file, "dt_ms = 0.05").unwrap();
        writeln!(file, "[wave]").unwrap();
        writeln!(file, "speed = 1.5").unwrap();

        let config = load_config(Some(&config_path), None).unwrap();

        assert_eq!(config.lif.dt_ms, 0.05);
        assert_eq!(config.wave.speed, 1.5);
        // Untouched sections keep their defaults
        assert_eq!(config.lif.membrane.v_rest, -70.0);
        assert_eq!(config.wave.time_steps, 200);

        if let Some(value) = saved_dt {
            env::set_var("NEUROFIELD_LIF_DT_MS", value);
        }
        if let Some(value) = saved_speed {
            env::set_var("NEUROFIELD_WAVE_SPEED", value);
        }
    }

    #[test]
    fn test_environment_overrides() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let mut config = NeurofieldConfig::default();

        env::set_var("NEUROFIELD_LOG_LEVEL", "trace");
        env::set_var("NEUROFIELD_WAVE_POINTS", "50");
        env::set_var("NEUROFIELD_RUN_WAVE", "no");

        apply_environment_overrides(&mut config);

        env::remove_var("NEUROFIELD_LOG_LEVEL");
        env::remove_var("NEUROFIELD_WAVE_POINTS");
        env::remove_var("NEUROFIELD_RUN_WAVE");

        assert_eq!(config.logging.level, "trace");
        assert_eq!(config.wave.spatial_points, 50);
        assert!(!config.simulation.run_wave);
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = NeurofieldConfig::default();
        let mut cli_args = HashMap::new();
        cli_args.insert("lif_dt_ms".to_string(), "0.2".to_string());
        cli_args.insert("wave_steps".to_string(), "400".to_string());
        cli_args.insert("run_lif".to_string(), "false".to_string());

        apply_cli_overrides(&mut config, &cli_args);

        assert_eq!(config.lif.dt_ms, 0.2);
        assert_eq!(config.wave.time_steps, 400);
        assert!(!config.simulation.run_lif);
    }

    #[test]
    fn test_override_precedence() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        // CLI overrides take precedence over environment variables
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("neurofield.toml");

        let mut file = File::create(&config_path).unwrap();
        writeln!(file, "[wave]").unwrap();
        writeln!(file, "speed = 1.0").unwrap();
        writeln!(file, "spatial_points = 80").unwrap();

        env::set_var("NEUROFIELD_WAVE_SPEED", "3.0");
        env::set_var("NEUROFIELD_WAVE_POINTS", "90");

        let mut cli_args = HashMap::new();
        cli_args.insert("wave_speed".to_string(), "2.5".to_string());

        let config = load_config(Some(&config_path), Some(&cli_args)).unwrap();

        env::remove_var("NEUROFIELD_WAVE_SPEED");
        env::remove_var("NEUROFIELD_WAVE_POINTS");

        // CLI wins for speed, env wins for points (no CLI override)
        assert_eq!(config.wave.speed, 2.5);
        assert_eq!(config.wave.spatial_points, 90);
    }

    #[test]
    fn test_invalid_toml_is_a_parse_error() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("neurofield.toml");
        let mut file = File::create(&config_path).unwrap();
        writeln!(file, "[wave").unwrap();

        let result = load_config(Some(&config_path), None);
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }
}
