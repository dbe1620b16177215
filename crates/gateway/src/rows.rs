// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row models for the gateway's tables.
//!
//! Field sets mirror the columns the console actually reads and writes.
//! Timestamps travel as RFC 3339 strings; the gateway owns their format.
//! Status and role fields stay raw strings at this layer — the domain crate
//! owns the vocabularies, and an unknown value from a drifted deployment
//! must survive a round trip untouched.

use serde::{Deserialize, Serialize};

/// A row of the `students` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRow {
    pub id: i64,
    /// Link to the account identity, when the student has an account.
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub role_id: Option<i64>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub student_number: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub organization_id: Option<i64>,
}

/// Values for inserting a new `students` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewStudent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<i64>,
}

/// Partial update of a `students` row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// A student row with its organization title resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentDirectoryRow {
    pub id: i64,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub student_number: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub organization_id: Option<i64>,
    /// Title of the affiliated organization, when one is set.
    #[serde(default)]
    pub organization_title: Option<String>,
}

/// A row of the `organizations` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationRow {
    pub id: i64,
    pub title: String,
    pub created_at: String,
    #[serde(default)]
    pub leader_id: Option<String>,
}

/// Values for inserting or replacing an `organizations` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOrganization {
    pub title: String,
    pub leader_id: Option<String>,
}

/// A compact student reference nested inside joined reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentSummary {
    pub id: i64,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub student_number: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// A compact organization reference nested inside joined reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationSummary {
    pub id: i64,
    pub title: String,
}

/// A row of the `organization_members` join table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationMemberRow {
    pub id: i64,
    pub student_id: i64,
    pub organization_id: i64,
    pub status: String,
    pub member_role: String,
    pub joined_at: String,
    #[serde(default)]
    pub left_at: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    /// Present when the read joined the student reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student: Option<StudentSummary>,
    /// Present when the read joined the organization reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<OrganizationSummary>,
}

impl OrganizationMemberRow {
    /// Returns the target student identifier for this membership.
    ///
    /// Prefers the joined student reference id, falling back to the raw
    /// `student_id` column when the read did not join.
    #[must_use]
    pub fn target_student_id(&self) -> i64 {
        self.student.as_ref().map_or(self.student_id, |s| s.id)
    }
}

/// Values for inserting a new `organization_members` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOrganizationMember {
    pub student_id: i64,
    pub organization_id: i64,
    pub status: String,
    pub member_role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Partial update of an `organization_members` row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member_role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A row of the `events` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRow {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub date: Option<String>,
    pub created_at: String,
    /// Only populated in deployments whose schema carries the column.
    #[serde(default)]
    pub organization_id: Option<i64>,
}

/// A compact event reference nested inside joined reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSummary {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub date: Option<String>,
}

/// Values for inserting a new `events` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEvent {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

/// Partial update of an `events` row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

/// A row of the `student_events` ledger table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentEventRow {
    pub id: i64,
    pub student_id: i64,
    pub event_id: i64,
    pub status: String,
    #[serde(default)]
    pub present: Option<bool>,
    pub created_at: String,
}

/// Values for inserting a new ledger row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewStudentEvent {
    pub student_id: i64,
    pub event_id: i64,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub present: Option<bool>,
}

/// A ledger row joined with its student reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRegistrationRow {
    pub id: i64,
    pub student_id: i64,
    pub event_id: i64,
    pub status: String,
    #[serde(default)]
    pub present: Option<bool>,
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student: Option<StudentSummary>,
}

/// A ledger row joined with its event reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRegistrationRow {
    pub id: i64,
    pub student_id: i64,
    pub event_id: i64,
    pub status: String,
    #[serde(default)]
    pub present: Option<bool>,
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event: Option<EventSummary>,
}

/// Per-event registration status summary used by event statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventStatusSummary {
    pub event_id: i64,
    #[serde(default)]
    pub date: Option<String>,
    /// Raw status strings of every registration on this event.
    pub statuses: Vec<String>,
}

/// An account from the authentication subsystem, with the metadata the
/// console uses already projected out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRow {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    pub created_at: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub role_id: Option<i64>,
}

/// Values for creating a new account in the authentication subsystem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAccount {
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    pub role_id: i64,
}
