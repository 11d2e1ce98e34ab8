//! Windows event loop: tray menu, power notifications, suspend dispatch.

use anyhow::{Context, Result};
use std::path::Path;
use std::sync::mpsc;
use std::time::Duration;
use tray_icon::menu::MenuEvent;
use windows::Win32::UI::WindowsAndMessaging::*;

use vm_suspend_helper::power::{PowerEvent, PowerListener};
use vm_suspend_helper::tray::TrayManager;
use vm_suspend_helper::{autostart, config, journal, picker, suspend};

pub fn run() -> Result<()> {
    tracing_subscriber::fmt::init();

    tracing::info!("VM Suspend Helper starting...");

    let mut app_config = config::load();
    journal::append("Application started.");

    match autostart::register(&app_config.startup_app_name) {
        Ok(true) => journal::append("Registered for automatic start at login."),
        Ok(false) => {}
        Err(e) => {
            tracing::warn!("Auto-start registration failed: {:#}", e);
            journal::append(&format!("Could not register for automatic start: {e}"));
        }
    }

    let (power_tx, power_rx) = mpsc::channel::<PowerEvent>();
    let _power = PowerListener::new(power_tx).context("Failed to create power listener")?;

    let mut tray =
        TrayManager::new(app_config.vm_paths.len()).context("Failed to create tray icon")?;

    let (menu_tx, menu_rx) = mpsc::channel::<MenuEvent>();
    MenuEvent::set_event_handler(Some(move |event| {
        let _ = menu_tx.send(event);
    }));

    tracing::info!("Entering message loop");

    // Win32 message loop - required for tray icon and power broadcast events
    unsafe {
        let mut msg = MSG::default();
        loop {
            while PeekMessageW(&mut msg, None, 0, 0, PM_REMOVE).as_bool() {
                if msg.message == WM_QUIT {
                    tracing::info!("WM_QUIT received, exiting");
                    journal::append("Application exiting.");
                    return Ok(());
                }
                TranslateMessage(&msg);
                DispatchMessageW(&msg);
            }

            // Power notifications forwarded by the hidden listener window
            if let Ok(event) = power_rx.try_recv() {
                match event {
                    PowerEvent::Suspend => {
                        journal::append("Host suspend detected.");
                        run_suspend(&app_config);
                    }
                    PowerEvent::Resume => {
                        journal::append("Host resume detected.");
                    }
                }
            }

            // Context menu actions
            if let Ok(event) = menu_rx.try_recv() {
                if event.id == tray.menu_item_suspend {
                    journal::append("Manual suspend requested.");
                    run_suspend(&app_config);
                } else if event.id == tray.menu_item_open_log {
                    journal::open_viewer();
                } else if event.id == tray.menu_item_select_vms {
                    reselect_vms(&mut app_config, &mut tray);
                } else if event.id == tray.menu_item_exit {
                    tracing::info!("Exit requested");
                    journal::append("Application exiting.");
                    return Ok(());
                } else if event.id == tray.menu_item_exit_deregister {
                    tracing::info!("Exit and deregister requested");
                    match autostart::deregister(&app_config.startup_app_name) {
                        Ok(()) => journal::append("Removed automatic start registration."),
                        Err(e) => {
                            tracing::warn!("Deregistration failed: {:#}", e);
                            journal::append(&format!("Could not remove automatic start: {e}"));
                        }
                    }
                    journal::append("Application exiting.");
                    return Ok(());
                }
            }

            // Small sleep to avoid busy-waiting
            std::thread::sleep(Duration::from_millis(10));
        }
    }
}

/// One suspend pass over the configured machines, journaled per machine.
fn run_suspend(app_config: &config::AppConfig) {
    if app_config.vm_paths.is_empty() {
        journal::append("No virtual machines configured, nothing to suspend.");
        return;
    }

    let report = suspend::suspend_all(Path::new(suspend::VMRUN_PATH), &app_config.vm_paths);

    for vm in &report.launched {
        journal::append(&format!("Issued soft suspend for {vm}."));
    }
    for err in &report.failed {
        journal::append(&format!("Suspend failed: {err}"));
    }
}

/// Let the user re-pick the managed machines, then persist the new list.
fn reselect_vms(app_config: &mut config::AppConfig, tray: &mut TrayManager) {
    let Some(files) = picker::pick_vm_files() else {
        tracing::debug!("VM selection cancelled");
        return;
    };

    app_config.set_vm_files(&files);

    if let Err(e) = config::save(app_config) {
        tracing::error!("Failed to save config: {:#}", e);
        journal::append(&format!("Could not save configuration: {e}"));
    }

    journal::append(&format!(
        "Selected virtual machines: {}",
        app_config.vm_paths.join(", ")
    ));
    tray.set_vm_count(app_config.vm_paths.len());
}
