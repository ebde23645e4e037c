//! Runtime configuration read from the environment.
//!
//! Every setting has a default so the binary runs from a checkout with the
//! bundled `models/` directory and no environment at all.

use std::path::PathBuf;

pub const MODEL_PATH_ENV: &str = "FINCLUSION_MODEL_PATH";
pub const ENCODERS_PATH_ENV: &str = "FINCLUSION_ENCODERS_PATH";
pub const LOG_MODE_ENV: &str = "FINCLUSION_LOG_MODE";
pub const LOG_FILE_ENV: &str = "FINCLUSION_LOG_FILE";

pub const DEFAULT_MODEL_PATH: &str = "models/financial_inclusion_model.json";
pub const DEFAULT_ENCODERS_PATH: &str = "models/label_encoders.json";
pub const DEFAULT_LOG_FILE: &str = "finclusion.log";

/// Where log output goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogMode {
    /// File when stdout is a terminal, stdout otherwise
    Auto,
    File,
    Stdout,
}

impl LogMode {
    fn parse(value: &str) -> Self {
        match value {
            "file" => Self::File,
            "stdout" => Self::Stdout,
            _ => Self::Auto,
        }
    }

    /// Resolve `Auto` against whether the UI owns the terminal.
    #[must_use]
    pub fn use_file(self, interactive: bool) -> bool {
        match self {
            Self::File => true,
            Self::Stdout => false,
            Self::Auto => interactive,
        }
    }
}

/// Locations of the two trained artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub model: PathBuf,
    pub encoders: PathBuf,
}

impl Default for ArtifactPaths {
    fn default() -> Self {
        Self {
            model: PathBuf::from(DEFAULT_MODEL_PATH),
            encoders: PathBuf::from(DEFAULT_ENCODERS_PATH),
        }
    }
}

/// Application settings.
#[derive(Debug, Clone)]
pub struct Settings {
    pub artifacts: ArtifactPaths,
    pub log_mode: LogMode,
    pub log_file: PathBuf,
}

impl Settings {
    /// Read settings from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let path_or = |name: &str, default: &str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(default))
        };

        Self {
            artifacts: ArtifactPaths {
                model: path_or(MODEL_PATH_ENV, DEFAULT_MODEL_PATH),
                encoders: path_or(ENCODERS_PATH_ENV, DEFAULT_ENCODERS_PATH),
            },
            log_mode: lookup(LOG_MODE_ENV)
                .map(|v| LogMode::parse(v.trim()))
                .unwrap_or(LogMode::Auto),
            log_file: path_or(LOG_FILE_ENV, DEFAULT_LOG_FILE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_without_environment() {
        let settings = Settings::from_lookup(|_| None);
        assert_eq!(settings.artifacts, ArtifactPaths::default());
        assert_eq!(settings.log_mode, LogMode::Auto);
        assert_eq!(settings.log_file, PathBuf::from(DEFAULT_LOG_FILE));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            (MODEL_PATH_ENV, "/srv/model.json"),
            (ENCODERS_PATH_ENV, "/srv/encoders.json"),
            (LOG_MODE_ENV, "stdout"),
            (LOG_FILE_ENV, "  "),
        ]
        .into_iter()
        .collect();

        let settings = Settings::from_lookup(|name| env.get(name).map(|v| v.to_string()));
        assert_eq!(settings.artifacts.model, PathBuf::from("/srv/model.json"));
        assert_eq!(settings.artifacts.encoders, PathBuf::from("/srv/encoders.json"));
        assert_eq!(settings.log_mode, LogMode::Stdout);
        // Blank values fall back to the default.
        assert_eq!(settings.log_file, PathBuf::from(DEFAULT_LOG_FILE));
    }

    #[test]
    fn test_log_mode_resolution() {
        assert!(LogMode::Auto.use_file(true));
        assert!(!LogMode::Auto.use_file(false));
        assert!(LogMode::File.use_file(false));
        assert!(!LogMode::Stdout.use_file(true));
        assert_eq!(LogMode::parse("garbage"), LogMode::Auto);
    }
}
