//! VM Suspend Helper - resident tray utility
//!
//! Soft-suspends the configured VMware machines when the host goes to
//! sleep. Owns the tray icon, the hidden power listener window, and the
//! Win32 message loop.

#![windows_subsystem = "windows"]

#[cfg(windows)]
mod app;

#[cfg(windows)]
fn main() -> anyhow::Result<()> {
    app::run()
}

#[cfg(not(windows))]
fn main() {
    eprintln!("vm_suspend_helper only runs on Windows hosts");
    std::process::exit(1);
}
