use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Set once at startup by main() from the --config-dir argument.
static CONFIG_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Call this from main() before any load operations.
pub fn set_config_dir(path: PathBuf) {
    let _ = CONFIG_DIR.set(path);
}

pub fn get_config_dir() -> Result<PathBuf> {
    if let Some(dir) = CONFIG_DIR.get() {
        return Ok(dir.clone());
    }
    // Fallback when running tests or if set_config_dir was not called
    let cwd = std::env::current_dir().context("failed to get current directory")?;
    Ok(cwd.join("config"))
}

/// YAML-backed configuration file. A missing file loads as `Default`.
pub trait Persistable: Sized + Default + Serialize + for<'de> Deserialize<'de> {
    fn filename() -> &'static str;

    /// Load `filename()` from `dir`.
    fn load_from(dir: &Path) -> Result<Self> {
        let path = dir.join(Self::filename());
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        serde_norway::from_str(&contents)
            .with_context(|| format!("failed to parse YAML from {}", path.display()))
    }

    /// Save to an explicit directory, bypassing the global `CONFIG_DIR`.
    fn save_to(&self, dir: &Path) -> Result<()> {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create dir {}", dir.display()))?;
        let path = dir.join(Self::filename());
        let contents = serde_norway::to_string(self).context("failed to serialize YAML")?;
        fs::write(&path, contents)
            .with_context(|| format!("failed to write {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use tempfile::TempDir;

    #[derive(Serialize, Deserialize, Default, Debug, PartialEq)]
    struct TestYamlData {
        count: u32,
    }

    impl Persistable for TestYamlData {
        fn filename() -> &'static str {
            "test_data.yaml"
        }
    }

    #[test]
    fn test_get_config_dir_returns_a_path() {
        assert!(get_config_dir().is_ok());
    }

    #[test]
    fn test_load_from_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let loaded = TestYamlData::load_from(tmp.path()).unwrap();
        assert_eq!(loaded, TestYamlData::default());
    }

    #[test]
    fn test_yaml_save_and_load_roundtrip() {
        let tmp = TempDir::new().unwrap();
        TestYamlData { count: 7 }.save_to(tmp.path()).unwrap();
        let loaded = TestYamlData::load_from(tmp.path()).unwrap();
        assert_eq!(loaded.count, 7);
    }

    #[test]
    fn test_load_from_invalid_yaml_errors() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("test_data.yaml"), "count: [not a number").unwrap();
        let err = TestYamlData::load_from(tmp.path()).unwrap_err();
        assert!(err.to_string().contains("failed to parse YAML"));
    }
}
