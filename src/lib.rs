//! Click probe for Windows
//!
//! This crate observes system-wide mouse button presses through a low-level
//! pointer hook, resolves the process and the accessible UI element under
//! the cursor at the moment of the press, and writes one line per click to
//! standard output:
//!
//! ```text
//! notepad.exe: {X=412, Y=310}: text box
//! ```
//!
//! Resolution is best-effort: a process that exited between the click and
//! the lookup, a point with no accessible element, or an element with an
//! unrecognized role each degrade to a placeholder value and the line is
//! written anyway. The hook callback never consumes an event and never
//! fails; every event is forwarded to the rest of the input pipeline
//! untouched.

#![cfg_attr(not(target_os = "windows"), allow(unused))]

pub mod error;
pub mod events;
pub mod probe;
pub mod roles;

pub use error::*;
pub use events::*;
pub use probe::*;

#[cfg(test)]
mod tests {
    use super::*;

    fn down(button: MouseButton, x: i32, y: i32) -> PointerEvent {
        PointerEvent {
            position: Position { x, y },
            button,
            phase: PointerPhase::Down,
        }
    }

    fn editor_process(_: Position) -> ProcessInfo {
        ProcessInfo {
            executable_name: "editor.exe".to_string(),
        }
    }

    #[test]
    fn role_labels_match_the_table() {
        let expected = [
            (1, "title bar"),
            (8, "alert"),
            (10, "client"),
            (15, "document"),
            (21, "separator"),
            (30, "hyperlink"),
            (34, "list"),
            (35, "list item"),
            (37, "tab"),
            (38, "table"),
            (41, "static text"),
            (42, "text box"),
            (43, "button"),
            (44, "check box"),
            (45, "menu item"),
            (46, "combo box"),
            (48, "progress bar"),
            (50, "radio button"),
            (52, "slider"),
            (53, "scroll bar"),
            (54, "spin box"),
        ];

        for (code, label) in expected {
            assert_eq!(roles::role_label(code), label, "code {code}");
        }
    }

    #[test]
    fn unmapped_role_codes_fall_back_to_unknown() {
        for code in [0, 2, 7, 9, 55, 99, -1, i32::MIN, i32::MAX] {
            assert_eq!(roles::role_label(code), "unknown role", "code {code}");
        }
    }

    #[test]
    fn left_click_produces_the_documented_line() {
        let event = down(MouseButton::Left, 150, 220);
        let record = classify_pointer_event(&event, editor_process, |_| {
            ElementRoleInfo::from_code(43)
        })
        .expect("left button press should produce a record");

        assert_eq!(record.to_string(), "editor.exe: {X=150, Y=220}: button");
    }

    #[test]
    fn right_click_also_qualifies() {
        let event = down(MouseButton::Right, 30, 40);
        let record = classify_pointer_event(&event, editor_process, |_| {
            ElementRoleInfo::from_code(45)
        })
        .expect("right button press should produce a record");

        assert_eq!(record.to_string(), "editor.exe: {X=30, Y=40}: menu item");
    }

    #[test]
    fn non_qualifying_events_never_reach_the_resolvers() {
        let skipped = [
            (MouseButton::Left, PointerPhase::Up),
            (MouseButton::Left, PointerPhase::Move),
            (MouseButton::Right, PointerPhase::Up),
            (MouseButton::Other, PointerPhase::Down),
            (MouseButton::Other, PointerPhase::Move),
            (MouseButton::Other, PointerPhase::Other),
        ];

        for (button, phase) in skipped {
            let event = PointerEvent {
                position: Position { x: 1, y: 2 },
                button,
                phase,
            };
            let record = classify_pointer_event(
                &event,
                |_| unreachable!("process resolver must not run for {button:?} {phase:?}"),
                |_| unreachable!("element resolver must not run for {button:?} {phase:?}"),
            );
            assert!(record.is_none(), "{button:?} {phase:?} should be skipped");
        }
    }

    #[test]
    fn failed_resolution_degrades_to_placeholders() {
        let event = down(MouseButton::Left, 5, 9);
        let record = classify_pointer_event(
            &event,
            |_| ProcessInfo::default(),
            |_| ElementRoleInfo::default(),
        )
        .expect("a qualifying press is recorded even when resolution fails");

        assert_eq!(record.to_string(), "unknown.exe: {X=5, Y=9}: unknown role");
    }

    #[test]
    fn unmapped_element_role_keeps_the_code_but_not_the_label() {
        let info = ElementRoleInfo::from_code(99);
        assert_eq!(info.role_code, Some(99));
        assert_eq!(info.role_label, "unknown role");

        let event = down(MouseButton::Left, 7, 7);
        let record = classify_pointer_event(&event, editor_process, move |_| info)
            .expect("unmapped role still produces a record");
        assert!(record.to_string().ends_with(": unknown role"));
    }

    #[test]
    fn negative_coordinates_format_as_plain_decimals() {
        // Secondary monitors left of or above the primary yield negative
        // screen coordinates.
        let event = down(MouseButton::Left, -1920, -8);
        let record = classify_pointer_event(&event, editor_process, |_| {
            ElementRoleInfo::from_code(10)
        })
        .expect("presses on secondary monitors are recorded");

        assert_eq!(record.to_string(), "editor.exe: {X=-1920, Y=-8}: client");
    }

    #[test]
    fn process_info_defaults_to_the_placeholder_executable() {
        assert_eq!(ProcessInfo::default().executable_name, "unknown.exe");
    }

    #[test]
    fn pointer_events_serialize_round_trip() {
        let event = down(MouseButton::Right, 100, 200);

        let json = serde_json::to_string(&event).expect("pointer events serialize");
        assert!(json.contains("Right"));
        assert!(json.contains("Down"));

        let back: PointerEvent = serde_json::from_str(&json).expect("and deserialize");
        assert_eq!(back, event);
    }

    #[test]
    fn error_messages_name_the_failure() {
        let install = ProbeError::HookInstall("Access is denied.".to_string());
        assert!(install.to_string().contains("Access is denied."));

        let com = ProbeError::ComInit("CO_E_NOTINITIALIZED".to_string());
        assert!(com.to_string().contains("CO_E_NOTINITIALIZED"));

        assert!(ProbeError::Unsupported.to_string().contains("Windows"));
    }
}
