/// Host power-state listener.
///
/// Creates a hidden top-level window whose procedure receives
/// `WM_POWERBROADCAST` and forwards suspend/resume notifications over a
/// channel to the main loop. Broadcast messages are not delivered to
/// message-only windows, so this must be a real (never shown) window.
use std::mem;
use std::sync::mpsc::Sender;
use windows::core::PCWSTR;
use windows::Win32::{
    Foundation::*, System::LibraryLoader::GetModuleHandleW, UI::WindowsAndMessaging::*,
};

const WINDOW_CLASS: &str = "VmSuspendHelperPowerWindow";

/// Power notification relevant to the helper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerEvent {
    /// The host is about to sleep.
    Suspend,
    /// The host woke back up.
    Resume,
}

/// Owns the hidden listener window; dropping it destroys the window.
pub struct PowerListener {
    hwnd: HWND,
}

/// Internal state stored in GWLP_USERDATA, reclaimed in WM_DESTROY.
struct ListenerState {
    tx: Sender<PowerEvent>,
}

impl PowerListener {
    pub fn new(tx: Sender<PowerEvent>) -> anyhow::Result<Self> {
        unsafe {
            let hinstance = GetModuleHandleW(None)?;
            let class_name = WINDOW_CLASS
                .encode_utf16()
                .chain(Some(0))
                .collect::<Vec<u16>>();

            let wc = WNDCLASSEXW {
                cbSize: mem::size_of::<WNDCLASSEXW>() as u32,
                style: WNDCLASS_STYLES::default(),
                lpfnWndProc: Some(Self::wndproc),
                cbClsExtra: 0,
                cbWndExtra: 0,
                hInstance: hinstance.into(),
                hIcon: HICON::default(),
                hCursor: HCURSOR::default(),
                hbrBackground: HBRUSH::default(),
                lpszMenuName: PCWSTR::null(),
                lpszClassName: PCWSTR(class_name.as_ptr()),
                hIconSm: HICON::default(),
            };

            RegisterClassExW(&wc);

            let hwnd = CreateWindowExW(
                WS_EX_TOOLWINDOW,
                PCWSTR(class_name.as_ptr()),
                PCWSTR::null(),
                WS_POPUP,
                0,
                0,
                0,
                0,
                HWND::default(),
                HMENU::default(),
                hinstance,
                None,
            );

            if hwnd == HWND::default() {
                anyhow::bail!("Failed to create power listener window");
            }

            let state_ptr = Box::into_raw(Box::new(ListenerState { tx }));
            SetWindowLongPtrW(hwnd, GWLP_USERDATA, state_ptr as isize);

            tracing::info!("Power listener window created");

            Ok(Self { hwnd })
        }
    }

    unsafe fn get_state(hwnd: HWND) -> Option<&'static mut ListenerState> {
        let ptr = GetWindowLongPtrW(hwnd, GWLP_USERDATA);
        if ptr != 0 {
            Some(&mut *(ptr as *mut ListenerState))
        } else {
            None
        }
    }

    unsafe extern "system" fn wndproc(
        hwnd: HWND,
        msg: u32,
        wparam: WPARAM,
        lparam: LPARAM,
    ) -> LRESULT {
        match msg {
            WM_POWERBROADCAST => {
                if let Some(state) = Self::get_state(hwnd) {
                    match wparam.0 as u32 {
                        PBT_APMSUSPEND => {
                            tracing::debug!("PBT_APMSUSPEND received");
                            let _ = state.tx.send(PowerEvent::Suspend);
                        }
                        PBT_APMRESUMEAUTOMATIC | PBT_APMRESUMESUSPEND => {
                            tracing::debug!("Resume notification received");
                            let _ = state.tx.send(PowerEvent::Resume);
                        }
                        _ => {}
                    }
                }
                // TRUE: the broadcast is granted
                LRESULT(1)
            }
            WM_DESTROY => {
                let ptr = GetWindowLongPtrW(hwnd, GWLP_USERDATA);
                if ptr != 0 {
                    SetWindowLongPtrW(hwnd, GWLP_USERDATA, 0);
                    drop(Box::from_raw(ptr as *mut ListenerState));
                }
                LRESULT(0)
            }
            _ => DefWindowProcW(hwnd, msg, wparam, lparam),
        }
    }
}

impl Drop for PowerListener {
    fn drop(&mut self) {
        unsafe {
            let _ = DestroyWindow(self.hwnd);
        }
    }
}
