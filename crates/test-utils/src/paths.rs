//! Path utilities for locating sample configuration files.

use std::io::Write;
use std::path::PathBuf;

/// Returns the workspace root directory.
///
/// This is determined by walking up from the current crate's manifest directory
/// until we find the workspace Cargo.toml.
pub fn workspace_root() -> PathBuf {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    PathBuf::from(manifest_dir)
        .parent() // crates/
        .and_then(|p| p.parent()) // workspace root
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from(manifest_dir))
}

/// Returns the path to the sample tile source configurations (`config/tile-sources/`).
pub fn sample_config_dir() -> PathBuf {
    workspace_root().join("config").join("tile-sources")
}

/// Returns the path to a named sample configuration file.
pub fn sample_config(name: &str) -> PathBuf {
    sample_config_dir().join(name)
}

/// Writes `contents` to a temporary `.yaml` file.
///
/// The file is removed when the returned handle is dropped.
pub fn temp_config_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .prefix("osgrid_config_")
        .suffix(".yaml")
        .tempfile()
        .expect("Failed to create temporary config file");
    file.write_all(contents.as_bytes())
        .expect("Failed to write temporary config file");
    file
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workspace_root_is_valid() {
        let root = workspace_root();
        assert!(
            root.join("Cargo.toml").exists(),
            "Workspace root should contain Cargo.toml: {:?}",
            root
        );
    }

    #[test]
    fn test_sample_configs_exist() {
        assert!(sample_config("matrix.yaml").exists());
        assert!(sample_config("legacy.yaml").exists());
    }

    #[test]
    fn test_temp_config_file() {
        let file = temp_config_file("api_key: abc\n");
        let contents = std::fs::read_to_string(file.path()).unwrap();
        assert_eq!(contents, "api_key: abc\n");
        assert!(file.path().to_string_lossy().ends_with(".yaml"));
    }
}
