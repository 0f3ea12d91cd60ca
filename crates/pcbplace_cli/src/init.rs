//! `pcbplace init` — writes a default `autoplace.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use pcbplace_config::{CONFIG_FILE_NAME, DEFAULT_CONFIG_TOML};

/// Runs the `pcbplace init` command.
///
/// Writes into `dir`, or the current directory when `None`. Refuses to
/// overwrite an existing configuration file.
pub fn run(dir: Option<String>) -> Result<i32, Box<dyn std::error::Error>> {
    let dir = match dir {
        Some(d) => PathBuf::from(d),
        None => std::env::current_dir()?,
    };
    let path = write_default_config(&dir)?;
    eprintln!("     Created {}", path.display());
    Ok(0)
}

fn write_default_config(dir: &Path) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let path = dir.join(CONFIG_FILE_NAME);
    if path.exists() {
        return Err(format!("'{}' already exists", path.display()).into());
    }
    fs::create_dir_all(dir)?;
    fs::write(&path, DEFAULT_CONFIG_TOML)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pcbplace_config::{load_config, AutoplaceConfig};
    use tempfile::TempDir;

    #[test]
    fn writes_loadable_defaults() {
        let tmp = TempDir::new().unwrap();
        let code = run(Some(tmp.path().to_string_lossy().into_owned())).unwrap();
        assert_eq!(code, 0);
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config, AutoplaceConfig::default());
    }

    #[test]
    fn creates_missing_directory() {
        let tmp = TempDir::new().unwrap();
        let nested = tmp.path().join("boards").join("rev_b");
        let path = write_default_config(&nested).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn refuses_to_overwrite() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE_NAME), "[grid]\n").unwrap();
        let err = write_default_config(tmp.path()).unwrap_err();
        assert!(err.to_string().contains("already exists"));
        let kept = fs::read_to_string(tmp.path().join(CONFIG_FILE_NAME)).unwrap();
        assert_eq!(kept, "[grid]\n");
    }
}
