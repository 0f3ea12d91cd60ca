//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::AutoplaceConfig;
use pcbplace_common::Length;
use std::path::Path;

/// File name looked up in a project directory.
pub const CONFIG_FILE_NAME: &str = "autoplace.toml";

/// Contents written by `pcbplace init`.
pub const DEFAULT_CONFIG_TOML: &str = r#"[grid]
cell_size = "1mm"        # floored at 0.25mm
layers = 2               # 1 or 2 board sides

[placement]
place_off_board = false  # also place footprints outside the board box
keepout_cost = 500       # peak keep-out cost around placed footprints
keepout_gain = 16        # margin = cell_size * pad_count / keepout_gain
polygon_check = false    # exact free-area test after the grid test
edge_clearance = "0mm"   # hard keep-out band along the board edge
"#;

/// Loads and validates `autoplace.toml` from a project directory.
pub fn load_config(project_dir: &Path) -> Result<AutoplaceConfig, ConfigError> {
    load_config_file(&project_dir.join(CONFIG_FILE_NAME))
}

/// Loads and validates a configuration file at an explicit path.
pub fn load_config_file(path: &Path) -> Result<AutoplaceConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    load_config_from_str(&content).map_err(|e| e.in_file(path))
}

/// Like [`load_config`], but falls back to defaults when the file does not exist.
pub fn load_config_or_default(project_dir: &Path) -> Result<AutoplaceConfig, ConfigError> {
    let path = project_dir.join(CONFIG_FILE_NAME);
    if path.exists() {
        load_config_file(&path)
    } else {
        Ok(AutoplaceConfig::default())
    }
}

/// Parses and validates a configuration from a string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_config_from_str(content: &str) -> Result<AutoplaceConfig, ConfigError> {
    let config: AutoplaceConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Validates value ranges.
fn validate_config(config: &AutoplaceConfig) -> Result<(), ConfigError> {
    if config.grid.cell_size.is_non_positive() {
        return Err(ConfigError::ValidationError(
            "grid.cell_size must be positive".to_string(),
        ));
    }
    if !(1..=2).contains(&config.grid.layers) {
        return Err(ConfigError::ValidationError(format!(
            "grid.layers must be 1 or 2, got {}",
            config.grid.layers
        )));
    }
    if config.placement.keepout_gain == 0 {
        return Err(ConfigError::ValidationError(
            "placement.keepout_gain must be at least 1".to_string(),
        ));
    }
    if config.placement.edge_clearance < Length::ZERO {
        return Err(ConfigError::ValidationError(
            "placement.edge_clearance must not be negative".to_string(),
        ));
    }
    Ok(())
}
