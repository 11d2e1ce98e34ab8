/// Configuration persistence for the VM Suspend Helper.
///
/// The configuration is a flat JSON object stored beside the executable:
///
/// ```json
/// {
///   "VMPaths": ["C:\\VMs\\dev\\dev.vmx"],
///   "StartupAppName": "VmwareHostSuspendHelper"
/// }
/// ```
///
/// It is loaded once at startup and overwritten wholesale whenever the user
/// re-selects VM files. A missing, unreadable, or malformed file silently
/// falls back to the defaults (no VMs, default registration name).
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::paths;

/// Registry value name used when the config does not carry one.
pub const DEFAULT_STARTUP_APP_NAME: &str = "VmwareHostSuspendHelper";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct AppConfig {
    /// Full paths to the `.vmx` descriptors to suspend, in selection order.
    #[serde(rename = "VMPaths", default)]
    pub vm_paths: Vec<String>,
    /// Name of the run-at-login registry value.
    #[serde(rename = "StartupAppName", default = "default_startup_app_name")]
    pub startup_app_name: String,
}

fn default_startup_app_name() -> String {
    DEFAULT_STARTUP_APP_NAME.to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            vm_paths: Vec::new(),
            startup_app_name: default_startup_app_name(),
        }
    }
}

impl AppConfig {
    /// Replace the managed VM list wholesale with the picked files.
    pub fn set_vm_files(&mut self, files: &[PathBuf]) {
        self.vm_paths = files
            .iter()
            .map(|p| p.to_string_lossy().into_owned())
            .collect();
    }
}

/// Load the configuration from `appsettings.json` beside the executable.
pub fn load() -> AppConfig {
    load_from(&paths::config_path())
}

/// Load a configuration from an explicit path.
/// Returns defaults if the file doesn't exist or can't be parsed.
pub fn load_from(path: &Path) -> AppConfig {
    if !path.exists() {
        return AppConfig::default();
    }

    let Ok(contents) = fs::read_to_string(path) else {
        return AppConfig::default();
    };

    serde_json::from_str(&contents).unwrap_or_default()
}

/// Save the configuration to `appsettings.json` beside the executable.
pub fn save(config: &AppConfig) -> Result<()> {
    save_to(config, &paths::config_path())
}

/// Save a configuration to an explicit path as pretty-printed JSON.
pub fn save_to(config: &AppConfig, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(config)
        .map_err(|e| anyhow!("Failed to serialize config: {}", e))?;

    fs::write(path, json).map_err(|e| anyhow!("Failed to write {}: {}", path.display(), e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_no_vms() {
        let config = AppConfig::default();
        assert!(config.vm_paths.is_empty());
        assert_eq!(config.startup_app_name, DEFAULT_STARTUP_APP_NAME);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_from(&dir.path().join("appsettings.json"));
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn malformed_json_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("appsettings.json");
        fs::write(&path, "{not json").unwrap();
        assert_eq!(load_from(&path), AppConfig::default());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("appsettings.json");

        let config = AppConfig {
            vm_paths: vec![
                r"C:\VMs\dev\dev.vmx".to_string(),
                r"C:\VMs\build\build.vmx".to_string(),
            ],
            startup_app_name: "MyHelper".to_string(),
        };

        save_to(&config, &path).unwrap();
        assert_eq!(load_from(&path), config);
    }

    #[test]
    fn wire_format_uses_the_documented_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("appsettings.json");

        let mut config = AppConfig::default();
        config.vm_paths.push("a.vmx".to_string());
        save_to(&config, &path).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"VMPaths\""));
        assert!(raw.contains("\"StartupAppName\""));
    }

    #[test]
    fn selecting_n_files_keeps_exactly_n_entries() {
        let mut config = AppConfig {
            vm_paths: vec!["old.vmx".to_string()],
            ..AppConfig::default()
        };

        let picked = vec![
            PathBuf::from("one.vmx"),
            PathBuf::from("two.vmx"),
            PathBuf::from("three.vmx"),
        ];
        config.set_vm_files(&picked);

        assert_eq!(config.vm_paths.len(), 3);
        assert_eq!(config.vm_paths[0], "one.vmx");
        assert_eq!(config.vm_paths[2], "three.vmx");
    }
}
