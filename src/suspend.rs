/// Soft-suspends the configured VMware machines through `vmrun`.
///
/// Each configured `.vmx` path gets one `vmrun suspend "<path>" soft`
/// invocation. Launches are fire-and-forget: the children are not awaited,
/// and a failed launch never stops the remaining machines from being
/// attempted.
use std::path::Path;
use std::process::Command;
use thiserror::Error;

/// Standard VMware Workstation install location of the control tool.
pub const VMRUN_PATH: &str = r"C:\Program Files (x86)\VMware\VMware Workstation\vmrun.exe";

#[derive(Debug, Error)]
#[error("failed to launch {vmrun} for {vm}: {source}")]
pub struct LaunchError {
    pub vm: String,
    pub vmrun: String,
    #[source]
    pub source: std::io::Error,
}

/// Outcome of one suspend pass over the configured machines.
#[derive(Debug, Default)]
pub struct SuspendReport {
    /// Machines the suspend command was issued for.
    pub launched: Vec<String>,
    /// Machines whose launch failed, with the reason.
    pub failed: Vec<LaunchError>,
}

impl SuspendReport {
    pub fn attempted(&self) -> usize {
        self.launched.len() + self.failed.len()
    }
}

/// Issue a soft suspend for every machine in `vm_paths`.
///
/// The `.vmx` path is passed verbatim as a single argument; no shell is
/// involved, so no quoting is needed.
pub fn suspend_all(vmrun: &Path, vm_paths: &[String]) -> SuspendReport {
    let mut report = SuspendReport::default();

    for vm in vm_paths {
        match Command::new(vmrun).args(["suspend", vm, "soft"]).spawn() {
            Ok(_) => {
                tracing::info!(vm = %vm, "Suspend command issued");
                report.launched.push(vm.clone());
            }
            Err(e) => {
                tracing::error!(vm = %vm, error = %e, "Failed to launch vmrun");
                report.failed.push(LaunchError {
                    vm: vm.clone(),
                    vmrun: vmrun.display().to_string(),
                    source: e,
                });
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn vm_list(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn empty_list_is_a_no_op() {
        let report = suspend_all(Path::new("does-not-matter"), &[]);
        assert_eq!(report.attempted(), 0);
    }

    #[test]
    fn failed_launch_does_not_stop_later_machines() {
        // A vmrun binary that cannot exist makes every spawn fail, and the
        // report must still show one attempt per configured machine.
        let missing = PathBuf::from("/nonexistent/vmrun-for-tests");
        let vms = vm_list(&["a.vmx", "b.vmx", "c.vmx"]);

        let report = suspend_all(&missing, &vms);

        assert!(report.launched.is_empty());
        assert_eq!(report.failed.len(), 3);
        assert_eq!(report.failed[0].vm, "a.vmx");
        assert_eq!(report.failed[2].vm, "c.vmx");
    }

    #[cfg(unix)]
    #[test]
    fn successful_launches_are_reported_per_machine() {
        // Stand in for vmrun with a binary that exists everywhere; the
        // arguments are nonsense to it, but spawning succeeds and that is
        // all fire-and-forget observes.
        let vms = vm_list(&["a.vmx", "b.vmx"]);

        let report = suspend_all(Path::new("/bin/sh"), &vms);

        assert_eq!(report.launched, vms);
        assert!(report.failed.is_empty());
    }

    #[test]
    fn launch_error_names_the_machine_and_tool() {
        let report = suspend_all(Path::new("/nonexistent/vmrun-for-tests"), &vm_list(&["x.vmx"]));
        let message = report.failed[0].to_string();
        assert!(message.contains("x.vmx"));
        assert!(message.contains("vmrun-for-tests"));
    }
}
