//! CLI argument parsing for per-crate debug flags
//!
//! Supports flags like `--debug-neurofield-lif`, `--debug-neurofield-wave`,
//! etc. to raise the log level per crate, plus `--debug-all`.

use std::collections::BTreeSet;
use std::env;

use crate::KNOWN_CRATES;

/// Parse debug flags from command-line arguments
///
/// # Example
/// ```rust
/// use neurofield_observability::CrateDebugFlags;
///
/// let flags = CrateDebugFlags::from_args(std::env::args());
/// if flags.is_enabled("neurofield-lif") {
///     // Raise log level for the LIF crate
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct CrateDebugFlags {
    enabled_crates: BTreeSet<String>,
}

impl CrateDebugFlags {
    /// Parse debug flags from command-line arguments
    ///
    /// Looks for arguments matching the `--debug-{crate-name}` pattern.
    /// Also supports `--debug-all` to enable all crates.
    pub fn from_args<I>(args: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut enabled_crates = BTreeSet::new();
        let mut debug_all = false;

        for arg in args {
            if arg == "--debug-all" {
                debug_all = true;
                continue;
            }

            if let Some(crate_name) = arg.strip_prefix("--debug-") {
                enabled_crates.insert(crate_name.to_string());
            }
        }

        if debug_all {
            for crate_name in KNOWN_CRATES {
                enabled_crates.insert(crate_name.to_string());
            }
        }

        CrateDebugFlags { enabled_crates }
    }

    pub fn enable(&mut self, crate_name: &str) {
        self.enabled_crates.insert(crate_name.to_string());
    }

    /// Check if debug is enabled for a specific crate
    pub fn is_enabled(&self, crate_name: &str) -> bool {
        self.enabled_crates.contains(crate_name)
    }

    /// Check if debug is enabled for any crate
    pub fn any_enabled(&self) -> bool {
        !self.enabled_crates.is_empty()
    }

    /// Create a tracing filter from the debug flags
    ///
    /// Returns a directive string usable with `EnvFilter`. Crate names are
    /// mapped to their module-path form (`neurofield-lif` logs under the
    /// `neurofield_lif` target). Format:
    /// `"neurofield_lif=debug,info"`, or just the default level if no flag
    /// is set.
    pub fn to_filter_string(&self, default_level: &str) -> String {
        if self.enabled_crates.is_empty() {
            return default_level.to_string();
        }

        let mut filters = Vec::new();
        for crate_name in &self.enabled_crates {
            filters.push(format!("{}=debug", crate_name.replace('-', "_")));
        }
        // Default level for everything else
        filters.push(default_level.to_string());
        filters.join(",")
    }
}

/// Parse debug flags from CLI arguments and environment
///
/// Checks both command-line arguments and the `NEUROFIELD_DEBUG`
/// environment variable. Environment variable format: comma-separated
/// crate names (`"neurofield-lif,neurofield-wave"`), or `"all"`.
pub fn parse_debug_flags() -> CrateDebugFlags {
    let mut flags = CrateDebugFlags::from_args(env::args());

    if let Ok(env_var) = env::var("NEUROFIELD_DEBUG") {
        if env_var == "all" {
            for crate_name in KNOWN_CRATES {
                flags.enable(crate_name);
            }
        } else {
            for crate_name in env_var.split(',') {
                let crate_name = crate_name.trim();
                if !crate_name.is_empty() {
                    flags.enable(crate_name);
                }
            }
        }
    }

    flags
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_single_crate_flag() {
        let flags = CrateDebugFlags::from_args(args(&["tool", "--debug-neurofield-lif"]));
        assert!(flags.is_enabled("neurofield-lif"));
        assert!(!flags.is_enabled("neurofield-wave"));
        assert!(flags.any_enabled());
    }

    #[test]
    fn test_debug_all_enables_every_known_crate() {
        let flags = CrateDebugFlags::from_args(args(&["tool", "--debug-all"]));
        for crate_name in KNOWN_CRATES {
            assert!(flags.is_enabled(crate_name), "{} should be on", crate_name);
        }
    }

    #[test]
    fn test_filter_string_uses_module_path_targets() {
        let flags = CrateDebugFlags::from_args(args(&["tool", "--debug-neurofield-wave"]));
        assert_eq!(flags.to_filter_string("info"), "neurofield_wave=debug,info");
    }

    #[test]
    fn test_no_flags_falls_back_to_default_level() {
        let flags = CrateDebugFlags::default();
        assert_eq!(flags.to_filter_string("warn"), "warn");
        assert!(!flags.any_enabled());
    }

    #[test]
    fn test_filter_string_order_is_deterministic() {
        let a = CrateDebugFlags::from_args(args(&[
            "tool",
            "--debug-neurofield-wave",
            "--debug-neurofield-lif",
        ]));
        let b = CrateDebugFlags::from_args(args(&[
            "tool",
            "--debug-neurofield-lif",
            "--debug-neurofield-wave",
        ]));
        assert_eq!(a.to_filter_string("info"), b.to_filter_string("info"));
        assert_eq!(
            a.to_filter_string("info"),
            "neurofield_lif=debug,neurofield_wave=debug,info"
        );
    }
}
