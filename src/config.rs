use std::path::PathBuf;
use std::time::Duration;

use crate::remote::Source;

pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Overrides the bundled data directory.
pub const DATA_DIR_ENV: &str = "CODON_USAGE_DATA";

/// Where bundled tables and `organisms.csv` live, plus request defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Contains `organisms.csv` and `tables/<source>/`.
    pub data_dir: PathBuf,
    pub timeout: Duration,
    pub source: Source,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            source: Source::default(),
        }
    }
}

impl Config {
    pub fn tables_dir(&self) -> PathBuf {
        self.data_dir.join("tables")
    }

    pub fn organisms_file(&self) -> PathBuf {
        self.data_dir.join("organisms.csv")
    }
}

/// `$CODON_USAGE_DATA`, else the `codon_usage_data/` directory shipped with the crate.
pub fn default_data_dir() -> PathBuf {
    match std::env::var_os(DATA_DIR_ENV) {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("codon_usage_data"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_paths() {
        let cfg = Config { data_dir: PathBuf::from("/data"), ..Config::default() };
        assert_eq!(cfg.tables_dir(), PathBuf::from("/data/tables"));
        assert_eq!(cfg.organisms_file(), PathBuf::from("/data/organisms.csv"));
        assert_eq!(cfg.timeout, Duration::from_secs(5));
        assert_eq!(cfg.source, Source::Kazusa);
    }
}
