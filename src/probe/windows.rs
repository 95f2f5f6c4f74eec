//! Windows backend: the low-level mouse hook and the two OS resolvers.
//!
//! The hook callback runs on the thread that installed the hook, one event
//! at a time, from inside that thread's message loop. The OS enforces a
//! timeout on low-level hooks, so everything on this path is a short,
//! bounded query that either succeeds or immediately degrades to a
//! placeholder value. The event is always forwarded to the next hook in
//! the chain, whether or not a record was produced.

use std::io::Write;

use tracing::{debug, info};
use windows::core::{PWSTR, VARIANT};
use windows::Win32::Foundation::{CloseHandle, HANDLE, HWND, LPARAM, LRESULT, POINT, WPARAM};
use windows::Win32::System::Com::{CoInitializeEx, CoUninitialize, COINIT_APARTMENTTHREADED};
use windows::Win32::System::Threading::{
    GetCurrentThreadId, OpenProcess, QueryFullProcessImageNameW, PROCESS_NAME_FORMAT,
    PROCESS_QUERY_LIMITED_INFORMATION,
};
use windows::Win32::UI::Accessibility::{AccessibleObjectFromPoint, IAccessible};
use windows::Win32::UI::WindowsAndMessaging::{
    CallNextHookEx, DispatchMessageW, GetMessageW, GetWindowThreadProcessId, PostThreadMessageW,
    SetWindowsHookExW, TranslateMessage, UnhookWindowsHookEx, WindowFromPoint, HC_ACTION, HHOOK,
    MSG, MSLLHOOKSTRUCT, WH_MOUSE_LL, WM_LBUTTONDOWN, WM_LBUTTONUP, WM_MBUTTONDOWN, WM_MBUTTONUP,
    WM_MOUSEMOVE, WM_QUIT, WM_RBUTTONDOWN, WM_RBUTTONUP,
};

use crate::error::{ProbeError, Result};
use crate::events::{
    ElementRoleInfo, MouseButton, PointerEvent, PointerPhase, Position, ProcessInfo,
};
use crate::probe::classify_pointer_event;

/// Owns the system-wide low-level mouse hook.
///
/// One value is created at startup and consumed at shutdown; the handle is
/// released exactly once, on [`MouseHook::uninstall`] or on drop, whichever
/// comes first.
pub struct MouseHook {
    handle: HHOOK,
}

impl MouseHook {
    /// Register the hook callback with the OS input pipeline.
    pub fn install() -> Result<Self> {
        let handle = unsafe { SetWindowsHookExW(WH_MOUSE_LL, Some(mouse_hook_proc), None, 0) }
            .map_err(|e| ProbeError::HookInstall(e.to_string()))?;
        info!("low-level mouse hook installed");
        Ok(Self { handle })
    }

    /// Deregister the hook. Dropping the value has the same effect.
    pub fn uninstall(self) {}
}

impl Drop for MouseHook {
    fn drop(&mut self) {
        unsafe {
            if UnhookWindowsHookEx(self.handle).is_ok() {
                info!("low-level mouse hook removed");
            } else {
                debug!("mouse hook was already gone at teardown");
            }
        }
    }
}

/// Scoped COM initialization for the thread that runs the hook.
///
/// The accessibility queries issued from the hook callback require an
/// initialized apartment on the calling thread.
pub struct ComGuard;

impl ComGuard {
    pub fn init() -> Result<Self> {
        unsafe { CoInitializeEx(None, COINIT_APARTMENTTHREADED) }
            .ok()
            .map_err(|e| ProbeError::ComInit(e.to_string()))?;
        Ok(Self)
    }
}

impl Drop for ComGuard {
    fn drop(&mut self) {
        unsafe { CoUninitialize() };
    }
}

/// Hook callback invoked by the OS for every pointer event system-wide.
///
/// Must return promptly and must always hand the event to the next hook in
/// the chain; nothing on this path may panic or block.
unsafe extern "system" fn mouse_hook_proc(code: i32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    let payload = lparam.0 as *const MSLLHOOKSTRUCT;
    if code == HC_ACTION as i32 && !payload.is_null() {
        let event = pointer_event_from_raw(wparam.0 as u32, &*payload);
        if let Some(record) = classify_pointer_event(&event, process_info_at, element_role_at) {
            // A closed stdout must not take down the input pipeline.
            let _ = writeln!(std::io::stdout(), "{record}");
        }
    }
    CallNextHookEx(None, code, wparam, lparam)
}

/// Decode the raw hook payload into a pointer event.
fn pointer_event_from_raw(message: u32, payload: &MSLLHOOKSTRUCT) -> PointerEvent {
    let (button, phase) = match message {
        WM_LBUTTONDOWN => (MouseButton::Left, PointerPhase::Down),
        WM_LBUTTONUP => (MouseButton::Left, PointerPhase::Up),
        WM_RBUTTONDOWN => (MouseButton::Right, PointerPhase::Down),
        WM_RBUTTONUP => (MouseButton::Right, PointerPhase::Up),
        WM_MBUTTONDOWN => (MouseButton::Other, PointerPhase::Down),
        WM_MBUTTONUP => (MouseButton::Other, PointerPhase::Up),
        WM_MOUSEMOVE => (MouseButton::Other, PointerPhase::Move),
        _ => (MouseButton::Other, PointerPhase::Other),
    };

    PointerEvent {
        position: Position {
            x: payload.pt.x,
            y: payload.pt.y,
        },
        button,
        phase,
    }
}

/// Resolve the executable name of the process owning the window under a point.
fn process_info_at(point: Position) -> ProcessInfo {
    let window = unsafe { WindowFromPoint(POINT { x: point.x, y: point.y }) };
    process_info_for_window(window)
}

pub(crate) fn process_info_for_window(window: HWND) -> ProcessInfo {
    match query_executable_name(window) {
        Some(name) => ProcessInfo {
            executable_name: name,
        },
        None => {
            debug!("process resolution failed, using placeholder");
            ProcessInfo::default()
        }
    }
}

/// Closes the process handle when dropped, on every exit path.
struct OwnedHandle(HANDLE);

impl Drop for OwnedHandle {
    fn drop(&mut self) {
        unsafe {
            let _ = CloseHandle(self.0);
        }
    }
}

fn query_executable_name(window: HWND) -> Option<String> {
    unsafe {
        let mut pid = 0u32;
        GetWindowThreadProcessId(window, Some(&mut pid));
        if pid == 0 {
            return None;
        }

        // The process may exit between the pid lookup and the open; that
        // and access-denied both land on the placeholder path.
        let process = OwnedHandle(OpenProcess(PROCESS_QUERY_LIMITED_INFORMATION, false, pid).ok()?);

        let mut buffer = vec![0u16; 1024];
        let mut len = buffer.len() as u32;
        QueryFullProcessImageNameW(
            process.0,
            PROCESS_NAME_FORMAT(0),
            PWSTR(buffer.as_mut_ptr()),
            &mut len,
        )
        .ok()?;

        let path = String::from_utf16_lossy(&buffer[..len as usize]);
        let name = path.rsplit(['\\', '/']).next().unwrap_or(&path);
        if name.is_empty() {
            None
        } else {
            Some(name.to_string())
        }
    }
}

/// Resolve the MSAA role of the most specific accessible element at a point.
fn element_role_at(point: Position) -> ElementRoleInfo {
    match query_role_code(point) {
        Some(code) => ElementRoleInfo::from_code(code),
        None => {
            debug!("no accessible element at {point:?}");
            ElementRoleInfo::default()
        }
    }
}

fn query_role_code(point: Position) -> Option<i32> {
    unsafe {
        let mut element: Option<IAccessible> = None;
        let mut child = VARIANT::default();
        AccessibleObjectFromPoint(
            POINT {
                x: point.x,
                y: point.y,
            },
            &mut element,
            &mut child,
        )
        .ok()?;

        // The interface pointer releases itself when it drops, role query
        // failure included. The child id goes to the role query as-is.
        let element = element?;
        let role = element.get_accRole(&child).ok()?;
        i32::try_from(&role).ok()
    }
}

/// Pump messages until `WM_QUIT`; the hook callback fires from inside this
/// loop, so it must keep running for as long as events should be observed.
pub fn run_message_loop() {
    unsafe {
        let mut msg = MSG::default();
        while GetMessageW(&mut msg, None, 0, 0).into() {
            let _ = TranslateMessage(&msg);
            DispatchMessageW(&msg);
        }
    }
}

/// Ask the message loop running on `thread_id` to exit.
pub fn request_quit(thread_id: u32) {
    unsafe {
        let _ = PostThreadMessageW(thread_id, WM_QUIT, WPARAM(0), LPARAM(0));
    }
}

pub fn current_thread_id() -> u32 {
    unsafe { GetCurrentThreadId() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use windows::Win32::UI::WindowsAndMessaging::WM_MOUSEWHEEL;

    fn raw_at(x: i32, y: i32) -> MSLLHOOKSTRUCT {
        MSLLHOOKSTRUCT {
            pt: POINT { x, y },
            ..Default::default()
        }
    }

    #[test]
    fn raw_messages_map_to_pointer_events() {
        let payload = raw_at(150, 220);

        let event = pointer_event_from_raw(WM_LBUTTONDOWN, &payload);
        assert_eq!(event.button, MouseButton::Left);
        assert_eq!(event.phase, PointerPhase::Down);
        assert_eq!(event.position, Position { x: 150, y: 220 });

        let event = pointer_event_from_raw(WM_RBUTTONDOWN, &payload);
        assert_eq!(event.button, MouseButton::Right);
        assert_eq!(event.phase, PointerPhase::Down);

        let event = pointer_event_from_raw(WM_MOUSEMOVE, &payload);
        assert_eq!(event.phase, PointerPhase::Move);

        let event = pointer_event_from_raw(WM_MBUTTONDOWN, &payload);
        assert_eq!(event.button, MouseButton::Other);
        assert_eq!(event.phase, PointerPhase::Down);

        let event = pointer_event_from_raw(WM_MOUSEWHEEL, &payload);
        assert_eq!(event.button, MouseButton::Other);
        assert_eq!(event.phase, PointerPhase::Other);
    }

    #[test]
    fn process_resolution_survives_a_null_window() {
        let info = process_info_for_window(HWND::default());
        assert_eq!(info.executable_name, "unknown.exe");
    }
}
