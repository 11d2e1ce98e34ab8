/// Fixed file locations for the helper.
///
/// Everything the app persists lives beside the executable: the VM list in
/// `appsettings.json`, the activity journal in `log.txt`, and an optional
/// custom tray icon.
use once_cell::sync::Lazy;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "appsettings.json";
pub const LOG_FILE: &str = "log.txt";
pub const ICON_FILE: &str = "icon.ico";

static EXE_DIR: Lazy<PathBuf> = Lazy::new(|| {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
});

/// Directory containing the running executable.
pub fn exe_dir() -> &'static Path {
    &EXE_DIR
}

pub fn config_path() -> PathBuf {
    EXE_DIR.join(CONFIG_FILE)
}

pub fn log_path() -> PathBuf {
    EXE_DIR.join(LOG_FILE)
}

pub fn icon_path() -> PathBuf {
    EXE_DIR.join(ICON_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_files_live_beside_the_executable() {
        assert_eq!(config_path().parent().unwrap(), exe_dir());
        assert_eq!(log_path().parent().unwrap(), exe_dir());
        assert_eq!(config_path().file_name().unwrap(), CONFIG_FILE);
        assert_eq!(log_path().file_name().unwrap(), LOG_FILE);
    }
}
