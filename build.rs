//! Build script to embed Windows resource metadata into the executable
//! This sets the application name shown in Task Manager

fn main() {
    #[cfg(windows)]
    {
        let mut res = winresource::WindowsResource::new();
        res.set("FileDescription", "VM Suspend Helper");
        res.set("ProductName", "VM Suspend Helper");
        res.set("InternalName", "VmSuspendHelper");
        res.set("OriginalFilename", "vm_suspend_helper.exe");
        res.set("ProductVersion", env!("CARGO_PKG_VERSION"));
        res.set("FileVersion", env!("CARGO_PKG_VERSION"));

        if let Err(e) = res.compile() {
            println!("cargo:warning=Failed to compile Windows resources: {}", e);
        }
    }
}
