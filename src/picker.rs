/// Native file dialog for choosing the machines to manage.
use std::path::PathBuf;

/// Multi-select dialog filtered to VMware `.vmx` descriptors.
///
/// Returns `None` when the user cancels, leaving the current selection
/// untouched.
pub fn pick_vm_files() -> Option<Vec<PathBuf>> {
    use rfd::FileDialog;

    FileDialog::new()
        .add_filter("VMware virtual machine", &["vmx"])
        .add_filter("All Files", &["*"])
        .set_title("Select one or more virtual machines")
        .pick_files()
}
