use std::fs;
use std::path::Path;

use recovery_engine::RecoveryConfig;
use recovery_logging::{recovery_info, recovery_warn};

use super::cli::Args;

/// Reads search settings from a RON file. A missing or unreadable file
/// yields the defaults.
pub(crate) fn load_config(path: Option<&Path>) -> RecoveryConfig {
    let Some(path) = path else {
        return RecoveryConfig::default();
    };

    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            recovery_info!("Config file {:?} not found, using defaults", path);
            return RecoveryConfig::default();
        }
        Err(err) => {
            recovery_warn!("Failed to read config from {:?}: {}", path, err);
            return RecoveryConfig::default();
        }
    };

    match ron::from_str::<RecoveryConfig>(&content) {
        Ok(config) => {
            recovery_info!("Loaded config from {:?}: {:?}", path, config);
            config
        }
        Err(err) => {
            recovery_warn!("Failed to parse config from {:?}: {}", path, err);
            RecoveryConfig::default()
        }
    }
}

/// Command-line values win over the file.
pub(crate) fn apply_overrides(mut config: RecoveryConfig, args: &Args) -> RecoveryConfig {
    if let Some(word_count) = args.word_count {
        config.word_count = word_count;
    }
    if let Some(path) = &args.path {
        config.derivation_path = path.clone();
    }
    if let Some(passphrase) = &args.passphrase {
        config.passphrase = passphrase.clone();
    }
    config
}
