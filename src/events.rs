use serde::{Deserialize, Serialize};
use std::fmt;

use crate::roles::{self, UNKNOWN_ROLE};

/// Default executable name used when process resolution fails.
pub const UNKNOWN_PROCESS: &str = "unknown.exe";

/// Represents a position on the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

/// Represents a mouse button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    /// Middle and extended buttons; never produces a record.
    Other,
}

/// Represents the phase of a pointer event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerPhase {
    Down,
    Up,
    Move,
    /// Wheel and other non-button messages.
    Other,
}

/// A single pointer event as delivered by the OS input pipeline.
///
/// Built fresh for each callback invocation and discarded as soon as the
/// callback returns; nothing here is retained across events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerEvent {
    /// Screen coordinates of the pointer
    pub position: Position,

    /// The button involved, if any
    pub button: MouseButton,

    /// What the button (or pointer) was doing
    pub phase: PointerPhase,
}

/// The process that owns the window under a click.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessInfo {
    /// Final path component of the executable image
    pub executable_name: String,
}

impl Default for ProcessInfo {
    fn default() -> Self {
        Self {
            executable_name: UNKNOWN_PROCESS.to_string(),
        }
    }
}

/// The accessible role of the UI element under a click.
///
/// `role_code` is absent when no element was found or the query failed;
/// `role_label` always carries a printable value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ElementRoleInfo {
    pub role_code: Option<i32>,
    pub role_label: &'static str,
}

impl ElementRoleInfo {
    /// Classify a raw role code; unmapped codes keep the code but
    /// fall back to the unknown label.
    pub fn from_code(code: i32) -> Self {
        Self {
            role_code: Some(code),
            role_label: roles::role_label(code),
        }
    }
}

impl Default for ElementRoleInfo {
    fn default() -> Self {
        Self {
            role_code: None,
            role_label: UNKNOWN_ROLE,
        }
    }
}

/// One observed click, ready to be written out.
///
/// The `Display` form is the externally observable contract:
/// `<executable>: {X=<x>, Y=<y>}: <role label>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClickRecord {
    pub executable_name: String,
    pub position: Position,
    pub role_label: &'static str,
}

impl ClickRecord {
    pub fn new(process: ProcessInfo, position: Position, element: ElementRoleInfo) -> Self {
        Self {
            executable_name: process.executable_name,
            position,
            role_label: element.role_label,
        }
    }
}

impl fmt::Display for ClickRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {{X={}, Y={}}}: {}",
            self.executable_name, self.position.x, self.position.y, self.role_label
        )
    }
}
