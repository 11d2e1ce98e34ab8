/// Run-at-login registration.
///
/// One named value under the current user's run key, holding the path of
/// this executable. The value name comes from the config
/// (`StartupAppName`), so renaming it in the config creates a fresh entry
/// on the next start.
use anyhow::{Context, Result};
use auto_launch::{AutoLaunch, AutoLaunchBuilder};

fn launcher(app_name: &str) -> Result<AutoLaunch> {
    let exe = std::env::current_exe().context("Failed to resolve own executable path")?;

    AutoLaunchBuilder::new()
        .set_app_name(app_name)
        .set_app_path(&exe.to_string_lossy())
        .build()
        .context("Failed to build run-at-login entry")
}

/// Ensure the run-at-login entry exists and points at this executable.
///
/// Idempotent: registering twice has the same effect as once. Returns
/// `true` when the entry was newly written.
pub fn register(app_name: &str) -> Result<bool> {
    let auto = launcher(app_name)?;

    if auto.is_enabled().unwrap_or(false) {
        return Ok(false);
    }

    auto.enable().context("Failed to write run-at-login entry")?;
    tracing::info!(name = %app_name, "Registered for automatic start");
    Ok(true)
}

/// Remove the run-at-login entry. Removing an absent entry is a no-op.
pub fn deregister(app_name: &str) -> Result<()> {
    let auto = launcher(app_name)?;

    if !auto.is_enabled().unwrap_or(false) {
        return Ok(());
    }

    auto.disable().context("Failed to remove run-at-login entry")?;
    tracing::info!(name = %app_name, "Removed automatic start registration");
    Ok(())
}

/// Whether the entry currently exists for this executable.
pub fn is_registered(app_name: &str) -> Result<bool> {
    Ok(launcher(app_name)?.is_enabled().unwrap_or(false))
}
