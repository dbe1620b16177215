// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for clearance status derivation.

use crate::status::{StatusColor, status_color, status_display, status_text};
use crate::types::AccountRole;

#[test]
fn test_blocked_rows_produce_count() {
    let display = status_display(
        Some(AccountRole::Student),
        Some("active"),
        ["blocked", "cleared", "Blocked", "attended"],
    );

    assert_eq!(display.text, "Blocked (2 events)");
    assert_eq!(display.color, StatusColor::Red);
    assert!(display.show_count, "Blocked display must expose the count");
    assert_eq!(display.blocked_count, 2, "Count must match blocked rows");
}

#[test]
fn test_single_blocked_row_uses_singular_text() {
    let display = status_display(Some(AccountRole::Student), Some("active"), ["blocked"]);

    assert_eq!(display.text, "Blocked (1 event)");
    assert_eq!(display.blocked_count, 1);
}

#[test]
fn test_blocked_detection_is_case_insensitive() {
    let display = status_display(Some(AccountRole::Student), None, ["BLOCKED", "BlOcKeD"]);

    assert_eq!(display.blocked_count, 2);
    assert_eq!(display.color, StatusColor::Red);
}

#[test]
fn test_cleared_rows_without_blocked_show_cleared() {
    let display = status_display(
        Some(AccountRole::Student),
        Some("inactive"),
        ["cleared", "Cleared"],
    );

    assert_eq!(display.text, "Cleared");
    assert_eq!(display.color, StatusColor::Green);
    assert!(!display.show_count);
    assert_eq!(display.blocked_count, 0);
}

#[test]
fn test_no_recognized_rows_fall_back_to_student_status() {
    let display = status_display(Some(AccountRole::Student), Some("active"), ["attended"]);

    assert_eq!(display.text, "Active");
    assert_eq!(display.color, StatusColor::Blue);
    assert!(!display.show_count);
}

#[test]
fn test_admin_with_blocked_status_reports_active() {
    let display = status_display(
        Some(AccountRole::Admin),
        Some("blocked"),
        ["blocked", "blocked", "blocked"],
    );

    assert_eq!(display.text, "Active", "Admins never display as blocked");
    assert_eq!(display.color, StatusColor::Blue);
    assert!(!display.show_count);
    assert_eq!(display.blocked_count, 0);
}

#[test]
fn test_admin_with_normal_status_keeps_status() {
    let display = status_display(Some(AccountRole::Admin), Some("active"), ["blocked"]);

    assert_eq!(display.text, "Active");
    assert_eq!(display.color, StatusColor::Blue);
}

#[test]
fn test_leader_role_ignores_ledger_rows() {
    let display = status_display(
        Some(AccountRole::OrganizationLeader),
        Some("suspended"),
        ["blocked"],
    );

    assert_eq!(display.text, "Suspended");
    assert_eq!(display.color, StatusColor::Red);
    assert!(!display.show_count);
}

#[test]
fn test_unknown_role_uses_raw_status() {
    let display = status_display(None, Some("cleared"), ["blocked"]);

    assert_eq!(display.text, "Cleared");
    assert_eq!(display.color, StatusColor::Green);
}

#[test]
fn test_empty_ledger_and_no_status_displays_unknown_in_red() {
    let display = status_display(Some(AccountRole::Student), None, []);

    assert_eq!(display.text, "Unknown");
    assert_eq!(display.color, StatusColor::Red);
    assert!(!display.show_count);
    assert_eq!(display.blocked_count, 0);
}

#[test]
fn test_status_color_table() {
    assert_eq!(status_color(Some("cleared")), StatusColor::Green);
    assert_eq!(status_color(Some("blocked")), StatusColor::Red);
    assert_eq!(status_color(Some("active")), StatusColor::Blue);
    assert_eq!(status_color(Some("inactive")), StatusColor::Orange);
    assert_eq!(status_color(Some("suspended")), StatusColor::Red);
    assert_eq!(status_color(Some("weird")), StatusColor::Red);
    assert_eq!(status_color(None), StatusColor::Red);
}

#[test]
fn test_status_color_is_case_insensitive() {
    assert_eq!(status_color(Some("Cleared")), StatusColor::Green);
    assert_eq!(status_color(Some("ACTIVE")), StatusColor::Blue);
}

#[test]
fn test_status_text_canonicalizes_known_values() {
    assert_eq!(status_text(Some("cleared")), "Cleared");
    assert_eq!(status_text(Some("BLOCKED")), "Blocked");
    assert_eq!(status_text(Some("active")), "Active");
    assert_eq!(status_text(Some("inactive")), "Inactive");
    assert_eq!(status_text(Some("suspended")), "Suspended");
}

#[test]
fn test_status_text_passes_unknown_values_through() {
    assert_eq!(status_text(Some("on leave")), "on leave");
}

#[test]
fn test_status_text_absent_is_unknown() {
    assert_eq!(status_text(None), "Unknown");
    assert_eq!(status_text(Some("")), "Unknown");
}
