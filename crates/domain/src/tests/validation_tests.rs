// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for form validation rules.

use crate::error::DomainError;
use crate::validation::{validate_event_date, validate_event_title, validate_member_links};
use time::Date;
use time::macros::date;

fn test_today() -> Date {
    date!(2026 - 03 - 15)
}

#[test]
fn test_event_title_accepts_reasonable_titles() {
    assert!(validate_event_title("Orientation").is_ok());
    assert!(validate_event_title("Gen").is_ok());
}

#[test]
fn test_event_title_rejects_empty() {
    let err = validate_event_title("   ").unwrap_err();
    assert_eq!(
        err,
        DomainError::InvalidEventTitle(String::from("Event title is required"))
    );
}

#[test]
fn test_event_title_rejects_too_short() {
    assert!(validate_event_title("GA").is_err());
}

#[test]
fn test_event_title_rejects_too_long() {
    let long: String = "x".repeat(101);
    assert!(validate_event_title(&long).is_err());

    let max: String = "x".repeat(100);
    assert!(validate_event_title(&max).is_ok());
}

#[test]
fn test_event_date_accepts_today_and_future() {
    assert!(validate_event_date("2026-03-15", test_today()).is_ok());
    assert!(validate_event_date("2026-12-01", test_today()).is_ok());
}

#[test]
fn test_event_date_rejects_past() {
    let err = validate_event_date("2026-03-14", test_today()).unwrap_err();
    assert_eq!(
        err,
        DomainError::EventDateInPast {
            date: String::from("2026-03-14"),
        }
    );
}

#[test]
fn test_event_date_rejects_garbage() {
    assert!(matches!(
        validate_event_date("not-a-date", test_today()),
        Err(DomainError::DateParseError { .. })
    ));
}

#[test]
fn test_member_links_require_both_ids() {
    assert!(validate_member_links(Some(1), Some(2)).is_ok());
    assert_eq!(
        validate_member_links(None, Some(2)).unwrap_err(),
        DomainError::MissingStudentLink
    );
    assert_eq!(
        validate_member_links(Some(1), None).unwrap_err(),
        DomainError::MissingOrganizationLink
    );
}
