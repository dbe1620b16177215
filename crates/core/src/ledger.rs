// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Ledger read paths and single-row registration operations.
//!
//! The joined reads tolerate schema drift: the optional `present` column may
//! not exist in all deployments, so each read first issues the full query
//! and, on any error, retries the identical query without the column. The
//! degraded shape (rows with `present = None`) is returned rather than
//! failing the caller — a missing optional column must never surface as an
//! error.

use crate::error::CoreError;
use clearance_domain::RegistrationStatus;
use clearance_gateway::{
    EventRegistrationRow, EventRow, Gateway, NewStudentEvent, StudentEventRow,
    StudentRegistrationRow,
};

/// Fetches an event's ledger rows joined with student detail.
///
/// # Errors
///
/// Returns an error only if both the full and the degraded query fail.
pub async fn registrations_for_event(
    gateway: &Gateway,
    event_id: i64,
) -> Result<Vec<EventRegistrationRow>, CoreError> {
    match gateway.event_registrations(event_id, true).await {
        Ok(rows) => Ok(rows),
        Err(first) => {
            tracing::warn!(
                event_id,
                "event registrations query with presence failed, retrying without: {first}"
            );
            gateway
                .event_registrations(event_id, false)
                .await
                .map_err(CoreError::from)
        }
    }
}

/// Fetches a student's ledger rows joined with event detail.
///
/// # Errors
///
/// Returns an error only if both the full and the degraded query fail.
pub async fn registrations_for_student(
    gateway: &Gateway,
    student_id: i64,
) -> Result<Vec<StudentRegistrationRow>, CoreError> {
    match gateway.student_registrations(student_id, true).await {
        Ok(rows) => Ok(rows),
        Err(first) => {
            tracing::warn!(
                student_id,
                "student registrations query with presence failed, retrying without: {first}"
            );
            gateway
                .student_registrations(student_id, false)
                .await
                .map_err(CoreError::from)
        }
    }
}

/// Fetches the ledger rows for the student linked to an account identity.
///
/// An account without a linked student row has no registrations; the read
/// returns an empty list rather than an error.
///
/// # Errors
///
/// Returns an error if the student lookup or both registration queries fail.
pub async fn registrations_for_account(
    gateway: &Gateway,
    user_id: &str,
) -> Result<Vec<StudentRegistrationRow>, CoreError> {
    let Some(student) = gateway.find_student_by_account(user_id).await? else {
        return Ok(Vec::new());
    };
    registrations_for_student(gateway, student.id).await
}

/// Fetches the events associated with an organization.
///
/// Tries the junction table first; where the deployment lacks it, falls
/// back to the `organization_id` column on the events table; where that
/// column is also absent, the association simply does not exist and the
/// read returns an empty list.
///
/// # Errors
///
/// Returns an error if a query fails for a reason other than an absent
/// optional table/column.
pub async fn events_for_organization(
    gateway: &Gateway,
    organization_id: i64,
) -> Result<Vec<EventRow>, CoreError> {
    match gateway.junction_event_ids(organization_id).await {
        Ok(event_ids) => {
            let events: Vec<EventRow> = gateway.list_events().await?;
            Ok(events
                .into_iter()
                .filter(|e| event_ids.contains(&e.id))
                .collect())
        }
        Err(err) if err.is_missing_table() => {
            tracing::debug!(
                organization_id,
                "event_organizations table absent, falling back to events column"
            );
            match gateway.events_by_organization_column(organization_id).await {
                Ok(events) => Ok(events),
                Err(err) if err.is_missing_column() => Ok(Vec::new()),
                Err(err) => Err(err.into()),
            }
        }
        Err(err) => Err(err.into()),
    }
}

/// Registers one student for one event with a fresh `blocked` ledger row.
///
/// # Errors
///
/// Returns an error if the gateway call fails.
pub async fn register_student(
    gateway: &Gateway,
    student_id: i64,
    event_id: i64,
) -> Result<StudentEventRow, CoreError> {
    gateway
        .insert_registration(NewStudentEvent {
            student_id,
            event_id,
            status: String::from(RegistrationStatus::BLOCKED),
            present: None,
        })
        .await
        .map_err(CoreError::from)
}

/// Registers many students for one event in a single batch.
///
/// # Errors
///
/// Returns an error if the gateway call fails.
pub async fn bulk_register_students(
    gateway: &Gateway,
    student_ids: &[i64],
    event_id: i64,
) -> Result<u64, CoreError> {
    if student_ids.is_empty() {
        return Ok(0);
    }
    let rows: Vec<NewStudentEvent> = student_ids
        .iter()
        .map(|&student_id| NewStudentEvent {
            student_id,
            event_id,
            status: String::from(RegistrationStatus::BLOCKED),
            present: None,
        })
        .collect();
    gateway
        .insert_registrations(&rows)
        .await
        .map_err(CoreError::from)
}

/// Removes one student's registration from one event.
///
/// # Errors
///
/// Returns an error if the gateway call fails.
pub async fn unregister_student(
    gateway: &Gateway,
    student_id: i64,
    event_id: i64,
) -> Result<(), CoreError> {
    gateway
        .delete_registration(student_id, event_id)
        .await
        .map_err(CoreError::from)
}

/// Sets the status of one (student, event) ledger row.
///
/// # Errors
///
/// Returns an error if no such row exists or the gateway call fails.
pub async fn set_registration_status(
    gateway: &Gateway,
    student_id: i64,
    event_id: i64,
    status: &str,
) -> Result<(), CoreError> {
    gateway
        .update_registration_status(student_id, event_id, status)
        .await
        .map_err(CoreError::from)
}

/// Checks whether a student is registered for an event.
///
/// # Errors
///
/// Returns an error if the gateway call fails.
pub async fn is_student_registered(
    gateway: &Gateway,
    student_id: i64,
    event_id: i64,
) -> Result<bool, CoreError> {
    Ok(gateway
        .find_registration(student_id, event_id)
        .await?
        .is_some())
}
