//! User-facing notices.
//!
//! On Windows this is a blocking message box; elsewhere a desktop
//! notification through `notify-send`.

use tracing::warn;

/// Title shown on every notice.
pub const NOTICE_TITLE: &str = "Conf Launcher";

/// Something that can put a message in front of the user.
pub trait Notifier: Send + Sync {
    fn notify(&self, title: &str, body: &str);
}

/// Text shown when the configured target program does not exist.
pub fn missing_target_message(target: &str) -> String {
    format!("Target program \"{}\" does not exist.", target)
}

/// Text shown when a launch fails: the error followed by its causes.
pub fn failure_message(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut cause = error.source();
    while let Some(e) = cause {
        message.push_str(": ");
        message.push_str(&e.to_string());
        cause = e.source();
    }
    message
}

/// Shows notices with the platform's native mechanism.
#[derive(Debug, Default, Clone, Copy)]
pub struct DesktopNotifier;

#[cfg(windows)]
impl Notifier for DesktopNotifier {
    fn notify(&self, title: &str, body: &str) {
        use std::iter::once;
        use windows::core::PCWSTR;
        use windows::Win32::Foundation::HWND;
        use windows::Win32::UI::WindowsAndMessaging::{MessageBoxW, MB_ICONWARNING, MB_OK};

        let text: Vec<u16> = body.encode_utf16().chain(once(0)).collect();
        let caption: Vec<u16> = title.encode_utf16().chain(once(0)).collect();

        // Both buffers are NUL terminated and outlive the call.
        let result = unsafe {
            MessageBoxW(
                HWND::default(),
                PCWSTR(text.as_ptr()),
                PCWSTR(caption.as_ptr()),
                MB_OK | MB_ICONWARNING,
            )
        };
        if result.0 == 0 {
            warn!(title, body, "Failed to show message box");
        }
    }
}

#[cfg(not(windows))]
impl Notifier for DesktopNotifier {
    fn notify(&self, title: &str, body: &str) {
        let status = std::process::Command::new("notify-send")
            .args(["-a", NOTICE_TITLE, "-u", "critical", title, body])
            .status();

        match status {
            Ok(s) if s.success() => {}
            Ok(s) => warn!(title, body, status = %s, "notify-send failed"),
            Err(e) => warn!(title, body, error = %e, "Failed to run notify-send"),
        }
    }
}
