// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Clearance status derivation.
//!
//! Pure functions turning a student's raw status and ledger row statuses
//! into a single user-facing display. No side effects; callers supply all
//! inputs.

use crate::types::{AccountRole, RegistrationStatus};

/// Display colors for status chips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusColor {
    Green,
    Red,
    Blue,
    Orange,
    Grey,
}

impl StatusColor {
    /// Converts this color to its display name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Green => "green",
            Self::Red => "red",
            Self::Blue => "blue",
            Self::Orange => "orange",
            Self::Grey => "grey",
        }
    }
}

impl std::fmt::Display for StatusColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Maps a raw status string to its display color.
///
/// Unknown and absent statuses map to red: an unclassifiable student is
/// presented as blocked until the record says otherwise.
#[must_use]
pub fn status_color(status: Option<&str>) -> StatusColor {
    status.map_or(StatusColor::Red, |s| {
        match s.to_ascii_lowercase().as_str() {
            "cleared" => StatusColor::Green,
            "active" => StatusColor::Blue,
            "inactive" => StatusColor::Orange,
            _ => StatusColor::Red,
        }
    })
}

/// Maps a raw status string to its display text.
///
/// Recognized statuses are canonicalized; unrecognized non-empty values pass
/// through verbatim; an absent status displays as `"Unknown"`.
#[must_use]
pub fn status_text(status: Option<&str>) -> String {
    status.map_or_else(
        || String::from("Unknown"),
        |s| match s.to_ascii_lowercase().as_str() {
            "cleared" => String::from("Cleared"),
            "blocked" => String::from("Blocked"),
            "active" => String::from("Active"),
            "inactive" => String::from("Inactive"),
            "suspended" => String::from("Suspended"),
            _ => {
                if s.is_empty() {
                    String::from("Unknown")
                } else {
                    s.to_string()
                }
            }
        },
    )
}

/// The derived user-facing status for one person.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusDisplay {
    /// The text shown on the status chip.
    pub text: String,
    /// The chip color.
    pub color: StatusColor,
    /// Whether the blocked-event count is part of the display.
    pub show_count: bool,
    /// The number of ledger rows with a blocked status.
    pub blocked_count: usize,
}

/// Derives the user-facing status display for one person.
///
/// Rules, in priority order:
///
/// - Admins are never shown as blocked. A blocked underlying status renders
///   as "Active" with the active color; anything else renders as the raw
///   status.
/// - Non-student roles render the raw status through the status table.
/// - Students with at least one blocked ledger row render
///   "Blocked (N event[s])" in red with the count exposed; otherwise at
///   least one cleared row renders "Cleared" in green; otherwise the raw
///   status is used.
///
/// # Arguments
///
/// * `role` - The person's account role, if known
/// * `student_status` - The raw lifecycle status from the student record
/// * `registration_statuses` - Raw status strings of the person's ledger rows
#[must_use]
pub fn status_display<'a, I>(
    role: Option<AccountRole>,
    student_status: Option<&str>,
    registration_statuses: I,
) -> StatusDisplay
where
    I: IntoIterator<Item = &'a str>,
{
    if role == Some(AccountRole::Admin) {
        let is_blocked: bool = student_status.is_some_and(RegistrationStatus::is_blocked);
        return if is_blocked {
            StatusDisplay {
                text: String::from("Active"),
                color: status_color(Some("active")),
                show_count: false,
                blocked_count: 0,
            }
        } else {
            StatusDisplay {
                text: status_text(student_status),
                color: status_color(student_status),
                show_count: false,
                blocked_count: 0,
            }
        };
    }

    if role != Some(AccountRole::Student) {
        return StatusDisplay {
            text: status_text(student_status),
            color: status_color(student_status),
            show_count: false,
            blocked_count: 0,
        };
    }

    let mut blocked: usize = 0;
    let mut cleared: usize = 0;
    for raw in registration_statuses {
        match RegistrationStatus::classify(raw) {
            RegistrationStatus::Blocked => blocked += 1,
            RegistrationStatus::Cleared => cleared += 1,
            RegistrationStatus::Other(_) => {}
        }
    }

    if blocked > 0 {
        let text: String = if blocked == 1 {
            String::from("Blocked (1 event)")
        } else {
            format!("Blocked ({blocked} events)")
        };
        StatusDisplay {
            text,
            color: StatusColor::Red,
            show_count: true,
            blocked_count: blocked,
        }
    } else if cleared > 0 {
        StatusDisplay {
            text: String::from("Cleared"),
            color: StatusColor::Green,
            show_count: false,
            blocked_count: 0,
        }
    } else {
        StatusDisplay {
            text: status_text(student_status),
            color: status_color(student_status),
            show_count: false,
            blocked_count: 0,
        }
    }
}
