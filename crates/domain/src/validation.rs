// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Form validation rules.
//!
//! These checks run before any remote call is issued; a failure
//! short-circuits the operation with a user-visible message.

use crate::error::DomainError;
use time::Date;
use time::macros::format_description;

/// Minimum allowed event title length.
pub const EVENT_TITLE_MIN_LEN: usize = 3;

/// Maximum allowed event title length.
pub const EVENT_TITLE_MAX_LEN: usize = 100;

/// Validates an event title.
///
/// # Errors
///
/// Returns an error if the title is empty, shorter than
/// [`EVENT_TITLE_MIN_LEN`], or longer than [`EVENT_TITLE_MAX_LEN`].
pub fn validate_event_title(title: &str) -> Result<(), DomainError> {
    let trimmed: &str = title.trim();
    if trimmed.is_empty() {
        return Err(DomainError::InvalidEventTitle(String::from(
            "Event title is required",
        )));
    }
    if trimmed.chars().count() < EVENT_TITLE_MIN_LEN {
        return Err(DomainError::InvalidEventTitle(format!(
            "Title must be at least {EVENT_TITLE_MIN_LEN} characters"
        )));
    }
    if trimmed.chars().count() > EVENT_TITLE_MAX_LEN {
        return Err(DomainError::InvalidEventTitle(format!(
            "Title must be less than {EVENT_TITLE_MAX_LEN} characters"
        )));
    }
    Ok(())
}

/// Validates an event date against the current day.
///
/// The date is an ISO 8601 calendar date (`YYYY-MM-DD`). Today's date is
/// supplied by the caller so the rule stays a pure function.
///
/// # Errors
///
/// Returns an error if the string does not parse as a calendar date or the
/// date lies before `today`.
pub fn validate_event_date(date: &str, today: Date) -> Result<(), DomainError> {
    let format = format_description!("[year]-[month]-[day]");
    let parsed: Date = Date::parse(date, &format).map_err(|e| DomainError::DateParseError {
        date_string: date.to_string(),
        error: e.to_string(),
    })?;
    if parsed < today {
        return Err(DomainError::EventDateInPast {
            date: date.to_string(),
        });
    }
    Ok(())
}

/// Validates the linking identifiers of a membership form.
///
/// # Errors
///
/// Returns an error if either the student or the organization reference is
/// missing.
pub fn validate_member_links(
    student_id: Option<i64>,
    organization_id: Option<i64>,
) -> Result<(), DomainError> {
    if student_id.is_none() {
        return Err(DomainError::MissingStudentLink);
    }
    if organization_id.is_none() {
        return Err(DomainError::MissingOrganizationLink);
    }
    Ok(())
}
