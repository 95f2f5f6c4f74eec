//! Turning raw pointer events into click records.
//!
//! The decision logic lives in [`classify_pointer_event`] and is platform
//! neutral: the two resolvers are handed in by the caller, so the Windows
//! hook supplies the real ones and tests supply synthetic ones. The hook
//! itself, and everything else that talks to the OS, is in the
//! platform-specific submodule.

use crate::events::{
    ClickRecord, ElementRoleInfo, MouseButton, PointerEvent, PointerPhase, Position, ProcessInfo,
};

#[cfg(target_os = "windows")]
mod windows;

#[cfg(target_os = "windows")]
pub use self::windows::*;

/// Decide whether a pointer event produces a click record.
///
/// Only left and right button presses qualify; every other event returns
/// `None` without either resolver being invoked. Resolution failures never
/// surface here: both resolvers degrade to placeholder values internally,
/// so this function has no error path.
pub fn classify_pointer_event<P, E>(
    event: &PointerEvent,
    process_at: P,
    element_at: E,
) -> Option<ClickRecord>
where
    P: FnOnce(Position) -> ProcessInfo,
    E: FnOnce(Position) -> ElementRoleInfo,
{
    if event.phase != PointerPhase::Down {
        return None;
    }
    if !matches!(event.button, MouseButton::Left | MouseButton::Right) {
        return None;
    }

    let process = process_at(event.position);
    let element = element_at(event.position);

    Some(ClickRecord::new(process, event.position, element))
}
