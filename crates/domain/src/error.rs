// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Membership status string is not part of the fixed vocabulary.
    InvalidMembershipStatus(String),
    /// Member role string is not part of the fixed vocabulary.
    InvalidMemberRole(String),
    /// Account role identifier is not recognized.
    InvalidAccountRole(i64),
    /// Event title is missing or outside the allowed length range.
    InvalidEventTitle(String),
    /// Event date lies in the past.
    EventDateInPast {
        /// The rejected date.
        date: String,
    },
    /// Failed to parse a date from a string.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
    /// A membership operation is missing its student reference.
    MissingStudentLink,
    /// A membership operation is missing its organization reference.
    MissingOrganizationLink,
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidMembershipStatus(value) => {
                write!(f, "Invalid membership status: '{value}'")
            }
            Self::InvalidMemberRole(value) => write!(f, "Invalid member role: '{value}'"),
            Self::InvalidAccountRole(id) => write!(f, "Invalid account role id: {id}"),
            Self::InvalidEventTitle(reason) => write!(f, "Invalid event title: {reason}"),
            Self::EventDateInPast { date } => {
                write!(f, "Event date cannot be in the past: {date}")
            }
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
            Self::MissingStudentLink => write!(f, "Student and organization are required"),
            Self::MissingOrganizationLink => write!(f, "Student and organization are required"),
        }
    }
}

impl std::error::Error for DomainError {}
