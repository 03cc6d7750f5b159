// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Simulation Runner

Runs the configured NeuroField kernels (LIF membrane, 1-D wave field) and
writes their full results as JSON into the results directory.

Usage:
  cargo run --bin run_simulation -- [options]

Options:
  --config <path>       Explicit config file (default: discover neurofield.toml)
  --output <dir>        Results directory (default: from config, "results")
  --lif-only            Run only the LIF kernel
  --wave-only           Run only the wave kernel
  --log-level <level>   Default log level when RUST_LOG is unset
  --log-files           Also write rolling JSON log files
  --debug-<crate>       Raise one crate to debug ("--debug-neurofield-lif"),
                        or --debug-all
  --help                Show this message

Copyright 2025 Neuraville Inc.
Licensed under the Apache License, Version 2.0
*/

use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::PathBuf;

use tracing::info;

use neurofield::config::{
    apply_cli_overrides, apply_environment_overrides, load_config, validate_config, ConfigError,
    NeurofieldConfig, StimulusConfig,
};
use neurofield::lif::{run_lif, LifParameters, Pulse, PulseTrain};
use neurofield::observability::{init_logging, parse_debug_flags, LogFileOptions};
use neurofield::structures::TimeGrid;
use neurofield::wave::{run_wave, WaveParameters};

const USAGE: &str = "\
Usage: run_simulation [options]

Options:
  --config <path>       Explicit config file (default: discover neurofield.toml)
  --output <dir>        Results directory (default: from config)
  --lif-only            Run only the LIF kernel
  --wave-only           Run only the wave kernel
  --log-level <level>   Default log level when RUST_LOG is unset
  --log-files           Also write rolling JSON log files
  --debug-<crate>       Raise one crate to debug, or --debug-all
  --help                Show this message";

fn usage_and_exit() -> ! {
    eprintln!("{}", USAGE);
    std::process::exit(2);
}

struct CliOptions {
    config_path: Option<PathBuf>,
    overrides: HashMap<String, String>,
    log_files: bool,
}

fn parse_cli() -> CliOptions {
    let mut options = CliOptions {
        config_path: None,
        overrides: HashMap::new(),
        log_files: false,
    };

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--help" | "-h" => {
                println!("{}", USAGE);
                std::process::exit(0);
            }
            "--config" => match args.next() {
                Some(path) => options.config_path = Some(PathBuf::from(path)),
                None => usage_and_exit(),
            },
            "--output" => match args.next() {
                Some(dir) => {
                    options.overrides.insert("results_dir".to_string(), dir);
                }
                None => usage_and_exit(),
            },
            "--lif-only" => {
                options.overrides.insert("run_lif".to_string(), "true".to_string());
                options.overrides.insert("run_wave".to_string(), "false".to_string());
            }
            "--wave-only" => {
                options.overrides.insert("run_wave".to_string(), "true".to_string());
                options.overrides.insert("run_lif".to_string(), "false".to_string());
            }
            "--log-level" => match args.next() {
                Some(level) => {
                    options.overrides.insert("log_level".to_string(), level);
                }
                None => usage_and_exit(),
            },
            "--log-files" => options.log_files = true,
            other => {
                // Debug flags are consumed by parse_debug_flags() directly
                if !other.starts_with("--debug-") {
                    eprintln!("Unknown option: {}\n", other);
                    usage_and_exit();
                }
            }
        }
    }

    options
}

/// Build the pulse schedule from config: an explicit pulse list wins over
/// the ramp fields.
fn build_pulse_train(stimulus: &StimulusConfig) -> PulseTrain {
    if stimulus.pulses.is_empty() {
        PulseTrain::ramp(
            stimulus.first_onset_ms,
            stimulus.spacing_ms,
            stimulus.count,
            stimulus.duration_ms,
            stimulus.amp_start,
            stimulus.amp_end,
        )
    } else {
        PulseTrain::new(
            stimulus
                .pulses
                .iter()
                .map(|p| Pulse::new(p.onset_ms, p.duration_ms, p.amplitude))
                .collect(),
        )
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let options = parse_cli();
    let debug_flags = parse_debug_flags();

    // Config file is optional unless explicitly requested
    let config = match load_config(options.config_path.as_deref(), Some(&options.overrides)) {
        Ok(config) => config,
        Err(ConfigError::FileNotFound(_)) if options.config_path.is_none() => {
            let mut config = NeurofieldConfig::default();
            apply_environment_overrides(&mut config);
            apply_cli_overrides(&mut config, &options.overrides);
            config
        }
        Err(e) => return Err(e.into()),
    };
    validate_config(&config)?;

    let file_options = options.log_files.then(|| LogFileOptions {
        log_dir: config.logging.log_dir.clone(),
        ..LogFileOptions::default()
    });
    let logging_guard = init_logging(&debug_flags, &config.logging.level, file_options)?;

    println!("🧮 NeuroField Simulation Runner v{}", neurofield::VERSION);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    if let Some(run_dir) = logging_guard.run_dir() {
        println!("📂 Log files: {}", run_dir.display());
    }

    let results_dir = &config.simulation.results_dir;
    fs::create_dir_all(results_dir)?;
    println!("📂 Results:   {}", results_dir.display());
    println!();

    if config.simulation.run_lif {
        println!("🧠 LIF membrane run");
        let grid = TimeGrid::from_horizon(config.lif.dt_ms, config.lif.horizon_ms)?;
        let train = build_pulse_train(&config.lif.stimulus);
        let params = LifParameters {
            tau_m: config.lif.membrane.tau_m,
            v_rest: config.lif.membrane.v_rest,
            v_th: config.lif.membrane.v_th,
            v_reset: config.lif.membrane.v_reset,
            r_m: config.lif.membrane.r_m,
            refractory_period: config.lif.membrane.refractory_period,
            spike_peak: config.lif.membrane.spike_peak,
        };
        info!(
            "starting LIF run: {} samples, {} pulse(s)",
            grid.len(),
            train.len()
        );

        let run = run_lif(&grid, &train, params)?;

        let spike_times = run.spikes.times(&grid);
        println!("   samples:  {}", run.trace.len());
        println!("   spikes:   {} at {:?} ms", run.spikes.len(), spike_times);
        println!("   locked:   {} sample(s)", run.refractory_samples);

        let lif_path = results_dir.join("lif_run.json");
        fs::write(&lif_path, serde_json::to_string_pretty(&run)?)?;
        println!("   💾 {}", lif_path.display());
        println!();
    }

    if config.simulation.run_wave {
        println!("🌊 Wave field run");
        let params = WaveParameters {
            speed: config.wave.speed,
            length: config.wave.length,
            duration: config.wave.duration,
            spatial_points: config.wave.spatial_points,
            time_steps: config.wave.time_steps,
        };
        info!(
            "starting wave run: {} point(s) x {} step(s), courant={:.4}",
            params.spatial_points,
            params.time_steps,
            params.courant()
        );

        let run = run_wave(&params)?;
        let velocity = run.velocity_field()?;
        let energies = run.energy_series();

        println!("   snapshots: {}", run.field.num_steps());
        println!("   courant:   {:.4}", params.courant());
        if let Some(&first) = energies.first() {
            let drift = energies
                .iter()
                .fold(0.0_f64, |m, e| m.max((e - first).abs()))
                / first;
            println!("   energy:    {:.6} (relative drift {:.2e})", first, drift);
        }

        let wave_path = results_dir.join("wave_run.json");
        fs::write(&wave_path, serde_json::to_string_pretty(&run)?)?;
        println!("   💾 {}", wave_path.display());

        let velocity_path = results_dir.join("wave_velocity.json");
        fs::write(&velocity_path, serde_json::to_string_pretty(&velocity)?)?;
        println!("   💾 {}", velocity_path.display());
        println!();
    }

    println!("✅ Done");
    Ok(())
}
