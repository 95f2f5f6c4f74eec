//! Static mapping from MSAA role codes to human-readable labels.
//!
//! The codes are the `ROLE_SYSTEM_*` values the accessibility subsystem
//! reports for an element; the table is fixed at compile time.

/// Label used for any role code outside the table, and for elements whose
/// role could not be determined at all.
pub const UNKNOWN_ROLE: &str = "unknown role";

/// Look up the label for a role code.
///
/// Total over `i32`: codes outside the table map to [`UNKNOWN_ROLE`].
pub fn role_label(code: i32) -> &'static str {
    match code {
        1 => "title bar",
        8 => "alert",
        10 => "client",
        15 => "document",
        21 => "separator",
        30 => "hyperlink",
        34 => "list",
        35 => "list item",
        37 => "tab",
        38 => "table",
        41 => "static text",
        42 => "text box",
        43 => "button",
        44 => "check box",
        45 => "menu item",
        46 => "combo box",
        48 => "progress bar",
        50 => "radio button",
        52 => "slider",
        53 => "scroll bar",
        54 => "spin box",
        _ => UNKNOWN_ROLE,
    }
}
