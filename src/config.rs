//! Service configuration loading.
//!
//! Settings come from a TOML file: the one passed with `--config`, or else
//! `config.toml` in the user's sheetcalc config directory when it exists.
//! Problems are reported as warnings and the defaults are used instead.

use directories::ProjectDirs;
use sheetcalc_core::ServiceConfig;
use std::path::PathBuf;

const MAX_CONFIG_FILE_BYTES: u64 = 64 * 1024;

/// Load the service configuration, returning any warnings encountered.
pub fn load_config(config_file: Option<&PathBuf>, use_default: bool) -> (ServiceConfig, Vec<String>) {
    let mut warnings = Vec::new();
    let config_path = config_file
        .cloned()
        .or_else(|| use_default.then(user_config_path).flatten());

    let Some(path) = config_path else {
        return (ServiceConfig::default(), warnings);
    };
    if !path.exists() {
        if config_file.is_some() {
            warnings.push(format!("Config file not found: {}", path.display()));
        }
        return (ServiceConfig::default(), warnings);
    }

    match std::fs::metadata(&path) {
        Ok(meta) if meta.len() > MAX_CONFIG_FILE_BYTES => {
            warnings.push(format!(
                "Refusing to read {}: file too large ({} bytes, max {})",
                path.display(),
                meta.len(),
                MAX_CONFIG_FILE_BYTES
            ));
        }
        Ok(_) => match std::fs::read_to_string(&path) {
            Ok(content) => match parse_config(&content) {
                Ok(config) => {
                    log::debug!("loaded config from {}", path.display());
                    return (config, warnings);
                }
                Err(err) => warnings.push(format!("Failed to parse {}: {}", path.display(), err)),
            },
            Err(err) => warnings.push(format!("Failed to read {}: {}", path.display(), err)),
        },
        Err(err) => warnings.push(format!(
            "Failed to read metadata for {}: {}",
            path.display(),
            err
        )),
    }

    (ServiceConfig::default(), warnings)
}

pub fn parse_config(content: &str) -> Result<ServiceConfig, toml::de::Error> {
    toml::from_str(content)
}

fn user_config_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("", "", "sheetcalc")?;
    let mut path = proj.config_dir().to_path_buf();
    path.push("config.toml");
    Some(path)
}
