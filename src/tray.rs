/// System tray icon and context menu.
///
/// The tray is the whole UI surface of the helper: a tooltip showing how
/// many machines are managed, and a context menu with the five actions.
use anyhow::{anyhow, Result};
use tray_icon::menu::{Menu, MenuId, MenuItem, PredefinedMenuItem};
use tray_icon::{Icon, TrayIcon, TrayIconBuilder};

use crate::paths;

const TOOLTIP_BASE: &str = "VMware Host Suspend Helper";

/// Load the tray icon from `icon.ico` beside the executable.
fn load_app_icon() -> Result<Icon> {
    let icon_path = paths::icon_path();

    if icon_path.exists() {
        let icon_data =
            std::fs::read(&icon_path).map_err(|e| anyhow!("Failed to read icon.ico: {}", e))?;

        let img = image::load_from_memory(&icon_data)
            .map_err(|e| anyhow!("Failed to decode icon: {}", e))?;

        let img = img.resize_exact(16, 16, image::imageops::FilterType::Lanczos3);
        let rgba = img.to_rgba8();

        return Icon::from_rgba(rgba.into_raw(), 16, 16)
            .map_err(|e| anyhow!("Failed to create icon from image: {:?}", e));
    }

    // Fallback: blue square
    let icon_rgba: Vec<u8> = (0..16 * 16)
        .flat_map(|_| vec![0x20, 0x6E, 0xC8, 0xFF])
        .collect();
    Icon::from_rgba(icon_rgba, 16, 16)
        .map_err(|e| anyhow!("Failed to create fallback icon: {:?}", e))
}

fn tooltip_for(vm_count: usize) -> String {
    if vm_count == 0 {
        format!("{TOOLTIP_BASE} - no VMs configured")
    } else {
        format!("{TOOLTIP_BASE} - {vm_count} VM(s)")
    }
}

/// Tray icon manager holding the menu item ids for event dispatch.
pub struct TrayManager {
    #[allow(dead_code)]
    tray_icon: TrayIcon,
    pub menu_item_suspend: MenuId,
    pub menu_item_open_log: MenuId,
    pub menu_item_select_vms: MenuId,
    pub menu_item_exit: MenuId,
    pub menu_item_exit_deregister: MenuId,
}

impl TrayManager {
    pub fn new(vm_count: usize) -> Result<Self> {
        tracing::info!("Creating tray icon");

        let icon = load_app_icon()?;

        let menu = Menu::new();
        let suspend_item = MenuItem::new("Suspend VMs Now", true, None);
        let log_item = MenuItem::new("Open Log", true, None);
        let select_item = MenuItem::new("Select Virtual Machines...", true, None);
        let separator = PredefinedMenuItem::separator();
        let exit_item = MenuItem::new("Exit", true, None);
        let exit_deregister_item = MenuItem::new("Exit and Disable Auto-start", true, None);

        menu.append(&suspend_item)
            .map_err(|e| anyhow!("Failed to add suspend item: {}", e))?;
        menu.append(&log_item)
            .map_err(|e| anyhow!("Failed to add log item: {}", e))?;
        menu.append(&select_item)
            .map_err(|e| anyhow!("Failed to add select item: {}", e))?;
        menu.append(&separator)
            .map_err(|e| anyhow!("Failed to add separator: {}", e))?;
        menu.append(&exit_item)
            .map_err(|e| anyhow!("Failed to add exit item: {}", e))?;
        menu.append(&exit_deregister_item)
            .map_err(|e| anyhow!("Failed to add exit-and-deregister item: {}", e))?;

        let menu_item_suspend = suspend_item.id().clone();
        let menu_item_open_log = log_item.id().clone();
        let menu_item_select_vms = select_item.id().clone();
        let menu_item_exit = exit_item.id().clone();
        let menu_item_exit_deregister = exit_deregister_item.id().clone();

        let tray_icon = TrayIconBuilder::new()
            .with_tooltip(&tooltip_for(vm_count))
            .with_icon(icon)
            .with_menu(Box::new(menu))
            .build()
            .map_err(|e| anyhow!("Failed to create tray icon: {}", e))?;

        tracing::info!("Tray icon created with context menu");

        Ok(Self {
            tray_icon,
            menu_item_suspend,
            menu_item_open_log,
            menu_item_select_vms,
            menu_item_exit,
            menu_item_exit_deregister,
        })
    }

    /// Update the tooltip after the managed VM list changed.
    pub fn set_vm_count(&mut self, vm_count: usize) {
        let _ = self.tray_icon.set_tooltip(Some(&tooltip_for(vm_count)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tooltip_reflects_vm_count() {
        assert!(tooltip_for(0).contains("no VMs"));
        assert!(tooltip_for(3).contains("3 VM"));
    }
}
