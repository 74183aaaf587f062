use super::SinkError;

/// Window class of the unity editor's main window
pub const UNITY_WINDOW_CLASS: &str = "UnityContainerWndClass";

/// Bring the first top level window of class `class` to the front, so the
/// keystrokes that follow reach it.
#[cfg(windows)]
pub fn focus_window(class: &str) -> Result<(), SinkError> {
    use log::debug;
    use std::io;
    use std::iter;
    use std::ptr;
    use windows_sys::Win32::UI::WindowsAndMessaging::{FindWindowW, SetForegroundWindow};

    let wide_class: Vec<u16> = class.encode_utf16().chain(iter::once(0)).collect();
    let not_found = |source: io::Error| SinkError::WindowNotFound {
        class: class.to_string(),
        source,
    };

    // SAFETY: `wide_class` is nul terminated and outlives the call
    let window = unsafe { FindWindowW(wide_class.as_ptr(), ptr::null()) };
    if window == 0 {
        return Err(not_found(io::Error::from(io::ErrorKind::NotFound)));
    }

    // SAFETY: `window` is a handle FindWindowW just returned
    if unsafe { SetForegroundWindow(window) } == 0 {
        return Err(not_found(io::Error::last_os_error()));
    }
    debug!("focused window of class {}", class);
    Ok(())
}

#[cfg(not(windows))]
pub fn focus_window(class: &str) -> Result<(), SinkError> {
    log::warn!(
        "can't focus windows of class {} on this platform, bring it to the front yourself",
        class
    );
    Ok(())
}
