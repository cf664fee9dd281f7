use crate::cli::ScanArgs;
use anyhow::Context;
use dirscope_core::ScanOptions;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Contents of the optional TOML configuration file.
///
/// ```toml
/// [scan]
/// max_entries = 500000
/// max_depth = 32
/// skip_hidden = true
/// threads = 8
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub scan: ScanOptions,
}

impl AppConfig {
    /// Load `path`, or the defaults when no file was given.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("parsing config file {}", path.display()))
    }

    /// File settings with command-line flags applied on top.
    pub fn scan_options(&self, args: &ScanArgs) -> ScanOptions {
        let mut opts = self.scan.clone();
        if args.max_entries.is_some() {
            opts.max_entries = args.max_entries;
        }
        if args.max_depth.is_some() {
            opts.max_depth = args.max_depth;
        }
        if args.skip_hidden {
            opts.skip_hidden = true;
        }
        if let Some(threads) = args.threads {
            opts.threads = threads;
        }
        opts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Format;
    use std::path::PathBuf;

    fn args() -> ScanArgs {
        ScanArgs {
            root: PathBuf::from("."),
            max_entries: None,
            max_depth: Some(4),
            skip_hidden: false,
            threads: None,
            format: Format::Json,
        }
    }

    #[test]
    fn flags_override_file_values() {
        let config: AppConfig = toml::from_str(
            "[scan]\nmax_entries = 10\nmax_depth = 2\nskip_hidden = true\nthreads = 3\n",
        )
        .unwrap();
        let opts = config.scan_options(&args());
        assert_eq!(opts.max_entries, Some(10));
        assert_eq!(opts.max_depth, Some(4));
        assert!(opts.skip_hidden);
        assert_eq!(opts.threads, 3);
    }

    #[test]
    fn missing_file_means_defaults() {
        let config = AppConfig::load(None).unwrap();
        assert_eq!(config.scan, ScanOptions::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("dirscope.toml");
        fs::write(&path, "[scan]\nmax_files = 1\n").unwrap();
        assert!(AppConfig::load(Some(&path)).is_err());
    }
}
