// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Remote data gateway client for the clearance tracking console.
//!
//! The console's data lives in a hosted relational backend reached over
//! request/response calls. This crate wraps that surface behind one typed
//! adapter:
//!
//! - **REST** — the production backend: a PostgREST-style endpoint plus its
//!   authentication admin API.
//! - **Memory** — an in-memory backend for unit and integration tests, with
//!   switches that reproduce schema drift (optional columns/tables) and
//!   injected write failures.
//!
//! Backend selection happens once at construction time and is transparent to
//! callers. Every operation is an independent round trip: the gateway offers
//! no cross-table transaction, so multi-step workflows built on it must be
//! designed to converge under partial failure.
//!
//! ## Testing Philosophy
//!
//! - Standard tests run against the memory backend only
//! - Every test constructs its own isolated gateway
//! - The REST backend is validated against a live deployment, never from
//!   `cargo test`

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod error;
mod memory;
mod rest;
mod rows;

#[cfg(test)]
mod tests;

pub use error::GatewayError;
pub use memory::MemoryOptions;
pub use rest::GatewayConfig;
pub use rows::{
    AccountRow, EventPatch, EventRegistrationRow, EventRow, EventStatusSummary, EventSummary,
    MemberPatch, NewAccount, NewEvent, NewOrganization, NewOrganizationMember, NewStudent,
    NewStudentEvent, OrganizationMemberRow, OrganizationRow, OrganizationSummary,
    StudentDirectoryRow, StudentEventRow, StudentPatch, StudentRegistrationRow, StudentRow,
    StudentSummary,
};

use memory::MemoryBackend;
use rest::RestBackend;

/// Internal enum for backend-specific gateway connections.
enum GatewayBackend {
    Rest(RestBackend),
    Memory(MemoryBackend),
}

/// Typed adapter over the remote data gateway.
///
/// Construct once per session with [`Gateway::connect`] (production) or
/// [`Gateway::new_in_memory`] (tests) and share by reference.
pub struct Gateway {
    backend: GatewayBackend,
}

impl Gateway {
    /// Connects to a hosted deployment over REST.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is incomplete or the HTTP
    /// client cannot be constructed.
    pub fn connect(config: GatewayConfig) -> Result<Self, GatewayError> {
        Ok(Self {
            backend: GatewayBackend::Rest(RestBackend::connect(config)?),
        })
    }

    /// Creates an empty in-memory gateway with the default schema.
    #[must_use]
    pub fn new_in_memory() -> Self {
        Self::new_in_memory_with(MemoryOptions::default())
    }

    /// Creates an empty in-memory gateway with explicit schema and failure
    /// switches.
    #[must_use]
    pub fn new_in_memory_with(options: MemoryOptions) -> Self {
        Self {
            backend: GatewayBackend::Memory(MemoryBackend::new(options)),
        }
    }

    // ---- students ----

    /// Fetches all students ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the gateway call fails.
    pub async fn list_students(&self) -> Result<Vec<StudentRow>, GatewayError> {
        match &self.backend {
            GatewayBackend::Rest(rest) => rest.list_students().await,
            GatewayBackend::Memory(memory) => memory.list_students(),
        }
    }

    /// Fetches all students with their organization title resolved.
    ///
    /// # Errors
    ///
    /// Returns an error if the gateway call fails.
    pub async fn list_students_with_organization(
        &self,
    ) -> Result<Vec<StudentDirectoryRow>, GatewayError> {
        match &self.backend {
            GatewayBackend::Rest(rest) => rest.list_students_with_organization().await,
            GatewayBackend::Memory(memory) => memory.list_students_with_organization(),
        }
    }

    /// Inserts a new student row.
    ///
    /// # Errors
    ///
    /// Returns an error if the gateway call fails.
    pub async fn insert_student(&self, new: NewStudent) -> Result<StudentRow, GatewayError> {
        match &self.backend {
            GatewayBackend::Rest(rest) => rest.insert_student(new).await,
            GatewayBackend::Memory(memory) => memory.insert_student(new),
        }
    }

    /// Updates one student's lifecycle status.
    ///
    /// # Errors
    ///
    /// Returns an error if the gateway call fails.
    pub async fn update_student_status(
        &self,
        student_id: i64,
        status: &str,
    ) -> Result<(), GatewayError> {
        match &self.backend {
            GatewayBackend::Rest(rest) => rest.update_student_status(student_id, status).await,
            GatewayBackend::Memory(memory) => memory.update_student_status(student_id, status),
        }
    }

    /// Finds the student row linked to an account identity.
    ///
    /// # Errors
    ///
    /// Returns an error if the gateway call fails.
    pub async fn find_student_by_account(
        &self,
        user_id: &str,
    ) -> Result<Option<StudentRow>, GatewayError> {
        match &self.backend {
            GatewayBackend::Rest(rest) => rest.find_student_by_account(user_id).await,
            GatewayBackend::Memory(memory) => memory.find_student_by_account(user_id),
        }
    }

    /// Patches the student row linked to an account identity.
    ///
    /// # Errors
    ///
    /// Returns an error if the gateway call fails.
    pub async fn update_student_by_account(
        &self,
        user_id: &str,
        patch: &StudentPatch,
    ) -> Result<(), GatewayError> {
        match &self.backend {
            GatewayBackend::Rest(rest) => rest.update_student_by_account(user_id, patch).await,
            GatewayBackend::Memory(memory) => memory.update_student_by_account(user_id, patch),
        }
    }

    /// Deletes the student row linked to an account identity.
    ///
    /// # Errors
    ///
    /// Returns an error if the gateway call fails.
    pub async fn delete_student_by_account(&self, user_id: &str) -> Result<(), GatewayError> {
        match &self.backend {
            GatewayBackend::Rest(rest) => rest.delete_student_by_account(user_id).await,
            GatewayBackend::Memory(memory) => memory.delete_student_by_account(user_id),
        }
    }

    // ---- organizations ----

    /// Fetches all organizations, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the gateway call fails.
    pub async fn list_organizations(&self) -> Result<Vec<OrganizationRow>, GatewayError> {
        match &self.backend {
            GatewayBackend::Rest(rest) => rest.list_organizations().await,
            GatewayBackend::Memory(memory) => memory.list_organizations(),
        }
    }

    /// Inserts a new organization.
    ///
    /// # Errors
    ///
    /// Returns an error if the gateway call fails.
    pub async fn insert_organization(
        &self,
        new: NewOrganization,
    ) -> Result<OrganizationRow, GatewayError> {
        match &self.backend {
            GatewayBackend::Rest(rest) => rest.insert_organization(new).await,
            GatewayBackend::Memory(memory) => memory.insert_organization(new),
        }
    }

    /// Replaces an organization's title and leader.
    ///
    /// # Errors
    ///
    /// Returns an error if the gateway call fails.
    pub async fn update_organization(
        &self,
        organization_id: i64,
        patch: &NewOrganization,
    ) -> Result<(), GatewayError> {
        match &self.backend {
            GatewayBackend::Rest(rest) => rest.update_organization(organization_id, patch).await,
            GatewayBackend::Memory(memory) => memory.update_organization(organization_id, patch),
        }
    }

    /// Deletes an organization.
    ///
    /// # Errors
    ///
    /// Returns an error if the gateway call fails.
    pub async fn delete_organization(&self, organization_id: i64) -> Result<(), GatewayError> {
        match &self.backend {
            GatewayBackend::Rest(rest) => rest.delete_organization(organization_id).await,
            GatewayBackend::Memory(memory) => memory.delete_organization(organization_id),
        }
    }

    /// Counts organizations without fetching rows.
    ///
    /// # Errors
    ///
    /// Returns an error if the gateway call fails.
    pub async fn count_organizations(&self) -> Result<u64, GatewayError> {
        match &self.backend {
            GatewayBackend::Rest(rest) => rest.count_organizations().await,
            GatewayBackend::Memory(memory) => memory.count_organizations(),
        }
    }

    /// Fetches the account ids of every assigned organization leader.
    ///
    /// # Errors
    ///
    /// Returns an error if the gateway call fails.
    pub async fn assigned_leader_ids(&self) -> Result<Vec<String>, GatewayError> {
        match &self.backend {
            GatewayBackend::Rest(rest) => rest.assigned_leader_ids().await,
            GatewayBackend::Memory(memory) => memory.assigned_leader_ids(),
        }
    }

    // ---- organization members ----

    /// Fetches an organization's memberships with the student reference
    /// joined, most recently joined first.
    ///
    /// # Errors
    ///
    /// Returns an error if the gateway call fails.
    pub async fn members_of_organization(
        &self,
        organization_id: i64,
    ) -> Result<Vec<OrganizationMemberRow>, GatewayError> {
        match &self.backend {
            GatewayBackend::Rest(rest) => rest.members_of_organization(organization_id).await,
            GatewayBackend::Memory(memory) => memory.members_of_organization(organization_id),
        }
    }

    /// Fetches a student's memberships with the organization reference
    /// joined.
    ///
    /// # Errors
    ///
    /// Returns an error if the gateway call fails.
    pub async fn memberships_of_student(
        &self,
        student_id: i64,
    ) -> Result<Vec<OrganizationMemberRow>, GatewayError> {
        match &self.backend {
            GatewayBackend::Rest(rest) => rest.memberships_of_student(student_id).await,
            GatewayBackend::Memory(memory) => memory.memberships_of_student(student_id),
        }
    }

    /// Fetches the raw student ids of an organization's memberships.
    ///
    /// # Errors
    ///
    /// Returns an error if the gateway call fails.
    pub async fn member_student_ids(
        &self,
        organization_id: i64,
    ) -> Result<Vec<i64>, GatewayError> {
        match &self.backend {
            GatewayBackend::Rest(rest) => rest.member_student_ids(organization_id).await,
            GatewayBackend::Memory(memory) => memory.member_student_ids(organization_id),
        }
    }

    /// Inserts a new membership row.
    ///
    /// # Errors
    ///
    /// Returns an error if the gateway call fails.
    pub async fn insert_member(&self, new: NewOrganizationMember) -> Result<(), GatewayError> {
        match &self.backend {
            GatewayBackend::Rest(rest) => rest.insert_member(new).await,
            GatewayBackend::Memory(memory) => memory.insert_member(new),
        }
    }

    /// Patches a membership row.
    ///
    /// # Errors
    ///
    /// Returns an error if the gateway call fails.
    pub async fn update_member(
        &self,
        member_id: i64,
        patch: &MemberPatch,
    ) -> Result<(), GatewayError> {
        match &self.backend {
            GatewayBackend::Rest(rest) => rest.update_member(member_id, patch).await,
            GatewayBackend::Memory(memory) => memory.update_member(member_id, patch),
        }
    }

    /// Deletes a membership row.
    ///
    /// # Errors
    ///
    /// Returns an error if the gateway call fails.
    pub async fn delete_member(&self, member_id: i64) -> Result<(), GatewayError> {
        match &self.backend {
            GatewayBackend::Rest(rest) => rest.delete_member(member_id).await,
            GatewayBackend::Memory(memory) => memory.delete_member(member_id),
        }
    }

    // ---- events ----

    /// Fetches all events, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the gateway call fails.
    pub async fn list_events(&self) -> Result<Vec<EventRow>, GatewayError> {
        match &self.backend {
            GatewayBackend::Rest(rest) => rest.list_events().await,
            GatewayBackend::Memory(memory) => memory.list_events(),
        }
    }

    /// Fetches one event, if it exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the gateway call fails.
    pub async fn fetch_event(&self, event_id: i64) -> Result<Option<EventRow>, GatewayError> {
        match &self.backend {
            GatewayBackend::Rest(rest) => rest.fetch_event(event_id).await,
            GatewayBackend::Memory(memory) => memory.fetch_event(event_id),
        }
    }

    /// Inserts a new event and returns the created row.
    ///
    /// # Errors
    ///
    /// Returns an error if the gateway call fails.
    pub async fn insert_event(&self, new: NewEvent) -> Result<EventRow, GatewayError> {
        match &self.backend {
            GatewayBackend::Rest(rest) => rest.insert_event(new).await,
            GatewayBackend::Memory(memory) => memory.insert_event(new),
        }
    }

    /// Patches an event and returns the updated row.
    ///
    /// # Errors
    ///
    /// Returns an error if the gateway call fails or no row matches.
    pub async fn update_event(
        &self,
        event_id: i64,
        patch: &EventPatch,
    ) -> Result<EventRow, GatewayError> {
        match &self.backend {
            GatewayBackend::Rest(rest) => rest.update_event(event_id, patch).await,
            GatewayBackend::Memory(memory) => memory.update_event(event_id, patch),
        }
    }

    /// Deletes an event.
    ///
    /// # Errors
    ///
    /// Returns an error if the gateway call fails.
    pub async fn delete_event(&self, event_id: i64) -> Result<(), GatewayError> {
        match &self.backend {
            GatewayBackend::Rest(rest) => rest.delete_event(event_id).await,
            GatewayBackend::Memory(memory) => memory.delete_event(event_id),
        }
    }

    /// Sets the `organization_id` column on an event.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::MissingColumn`] in deployments whose events
    /// table has no such column, or another error if the call fails.
    pub async fn set_event_organization(
        &self,
        event_id: i64,
        organization_id: i64,
    ) -> Result<(), GatewayError> {
        match &self.backend {
            GatewayBackend::Rest(rest) => {
                rest.set_event_organization(event_id, organization_id).await
            }
            GatewayBackend::Memory(memory) => {
                memory.set_event_organization(event_id, organization_id)
            }
        }
    }

    /// Inserts an (event, organization) pair into the junction table.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::MissingTable`] in deployments without the
    /// junction table, or another error if the call fails.
    pub async fn insert_event_organization(
        &self,
        event_id: i64,
        organization_id: i64,
    ) -> Result<(), GatewayError> {
        match &self.backend {
            GatewayBackend::Rest(rest) => {
                rest.insert_event_organization(event_id, organization_id)
                    .await
            }
            GatewayBackend::Memory(memory) => {
                memory.insert_event_organization(event_id, organization_id)
            }
        }
    }

    /// Fetches event ids linked to an organization via the junction table.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::MissingTable`] in deployments without the
    /// junction table, or another error if the call fails.
    pub async fn junction_event_ids(
        &self,
        organization_id: i64,
    ) -> Result<Vec<i64>, GatewayError> {
        match &self.backend {
            GatewayBackend::Rest(rest) => rest.junction_event_ids(organization_id).await,
            GatewayBackend::Memory(memory) => memory.junction_event_ids(organization_id),
        }
    }

    /// Fetches events linked to an organization via the events table column.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::MissingColumn`] in deployments whose events
    /// table has no such column, or another error if the call fails.
    pub async fn events_by_organization_column(
        &self,
        organization_id: i64,
    ) -> Result<Vec<EventRow>, GatewayError> {
        match &self.backend {
            GatewayBackend::Rest(rest) => rest.events_by_organization_column(organization_id).await,
            GatewayBackend::Memory(memory) => memory.events_by_organization_column(organization_id),
        }
    }

    /// Fetches every event's registration status strings for statistics.
    ///
    /// # Errors
    ///
    /// Returns an error if the gateway call fails.
    pub async fn events_with_registration_statuses(
        &self,
    ) -> Result<Vec<EventStatusSummary>, GatewayError> {
        match &self.backend {
            GatewayBackend::Rest(rest) => rest.events_with_registration_statuses().await,
            GatewayBackend::Memory(memory) => memory.events_with_registration_statuses(),
        }
    }

    // ---- ledger ----

    /// Fetches all ledger rows for one event, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the gateway call fails.
    pub async fn registrations_for_event(
        &self,
        event_id: i64,
    ) -> Result<Vec<StudentEventRow>, GatewayError> {
        match &self.backend {
            GatewayBackend::Rest(rest) => rest.registrations_for_event(event_id).await,
            GatewayBackend::Memory(memory) => memory.registrations_for_event(event_id),
        }
    }

    /// Fetches ledger rows for one event joined with student detail.
    ///
    /// With `include_presence`, the query names the optional `present`
    /// column and fails with [`GatewayError::MissingColumn`] where the
    /// deployment lacks it; without it, rows come back with
    /// `present = None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the gateway call fails.
    pub async fn event_registrations(
        &self,
        event_id: i64,
        include_presence: bool,
    ) -> Result<Vec<EventRegistrationRow>, GatewayError> {
        match &self.backend {
            GatewayBackend::Rest(rest) => {
                rest.event_registrations(event_id, include_presence).await
            }
            GatewayBackend::Memory(memory) => {
                memory.event_registrations(event_id, include_presence)
            }
        }
    }

    /// Fetches ledger rows for one student joined with event detail.
    ///
    /// Presence handling matches [`Gateway::event_registrations`].
    ///
    /// # Errors
    ///
    /// Returns an error if the gateway call fails.
    pub async fn student_registrations(
        &self,
        student_id: i64,
        include_presence: bool,
    ) -> Result<Vec<StudentRegistrationRow>, GatewayError> {
        match &self.backend {
            GatewayBackend::Rest(rest) => {
                rest.student_registrations(student_id, include_presence)
                    .await
            }
            GatewayBackend::Memory(memory) => {
                memory.student_registrations(student_id, include_presence)
            }
        }
    }

    /// Fetches the ledger rows of one event restricted to a student set.
    ///
    /// # Errors
    ///
    /// Returns an error if the gateway call fails.
    pub async fn ledger_rows_for_students(
        &self,
        event_id: i64,
        student_ids: &[i64],
    ) -> Result<Vec<StudentEventRow>, GatewayError> {
        match &self.backend {
            GatewayBackend::Rest(rest) => {
                rest.ledger_rows_for_students(event_id, student_ids).await
            }
            GatewayBackend::Memory(memory) => {
                memory.ledger_rows_for_students(event_id, student_ids)
            }
        }
    }

    /// Batch-inserts ledger rows and returns how many were created.
    ///
    /// # Errors
    ///
    /// Returns an error if the gateway call fails.
    pub async fn insert_registrations(
        &self,
        rows: &[NewStudentEvent],
    ) -> Result<u64, GatewayError> {
        match &self.backend {
            GatewayBackend::Rest(rest) => rest.insert_registrations(rows).await,
            GatewayBackend::Memory(memory) => memory.insert_registrations(rows),
        }
    }

    /// Batch-updates the status of one event's ledger rows for a student
    /// set and returns how many rows changed.
    ///
    /// # Errors
    ///
    /// Returns an error if the gateway call fails.
    pub async fn set_status_for_students(
        &self,
        event_id: i64,
        student_ids: &[i64],
        status: &str,
    ) -> Result<u64, GatewayError> {
        match &self.backend {
            GatewayBackend::Rest(rest) => {
                rest.set_status_for_students(event_id, student_ids, status)
                    .await
            }
            GatewayBackend::Memory(memory) => {
                memory.set_status_for_students(event_id, student_ids, status)
            }
        }
    }

    /// Fetches the ledger row for one (student, event) pair, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the gateway call fails.
    pub async fn find_registration(
        &self,
        student_id: i64,
        event_id: i64,
    ) -> Result<Option<StudentEventRow>, GatewayError> {
        match &self.backend {
            GatewayBackend::Rest(rest) => rest.find_registration(student_id, event_id).await,
            GatewayBackend::Memory(memory) => memory.find_registration(student_id, event_id),
        }
    }

    /// Inserts one ledger row and returns it.
    ///
    /// # Errors
    ///
    /// Returns an error if the gateway call fails.
    pub async fn insert_registration(
        &self,
        row: NewStudentEvent,
    ) -> Result<StudentEventRow, GatewayError> {
        match &self.backend {
            GatewayBackend::Rest(rest) => rest.insert_registration(row).await,
            GatewayBackend::Memory(memory) => memory.insert_registration(row),
        }
    }

    /// Deletes the ledger row for one (student, event) pair.
    ///
    /// # Errors
    ///
    /// Returns an error if the gateway call fails.
    pub async fn delete_registration(
        &self,
        student_id: i64,
        event_id: i64,
    ) -> Result<(), GatewayError> {
        match &self.backend {
            GatewayBackend::Rest(rest) => rest.delete_registration(student_id, event_id).await,
            GatewayBackend::Memory(memory) => memory.delete_registration(student_id, event_id),
        }
    }

    /// Deletes every ledger row belonging to one student.
    ///
    /// # Errors
    ///
    /// Returns an error if the gateway call fails.
    pub async fn delete_registrations_for_student(
        &self,
        student_id: i64,
    ) -> Result<(), GatewayError> {
        match &self.backend {
            GatewayBackend::Rest(rest) => rest.delete_registrations_for_student(student_id).await,
            GatewayBackend::Memory(memory) => memory.delete_registrations_for_student(student_id),
        }
    }

    /// Updates the status of the ledger row for one (student, event) pair.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::RowNotFound`] when no such row exists, or
    /// another error if the call fails.
    pub async fn update_registration_status(
        &self,
        student_id: i64,
        event_id: i64,
        status: &str,
    ) -> Result<(), GatewayError> {
        match &self.backend {
            GatewayBackend::Rest(rest) => {
                rest.update_registration_status(student_id, event_id, status)
                    .await
            }
            GatewayBackend::Memory(memory) => {
                memory.update_registration_status(student_id, event_id, status)
            }
        }
    }

    /// Upserts the presence flag for one (student, event) pair.
    ///
    /// An existing row keeps its status; only `present` changes. A missing
    /// row is created with status `blocked` through the conflict target, so
    /// two racing first-time writes converge to a single row.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::MissingColumn`] in deployments without the
    /// `present` column, or another error if the call fails.
    pub async fn upsert_registration_presence(
        &self,
        student_id: i64,
        event_id: i64,
        present: bool,
    ) -> Result<(), GatewayError> {
        match &self.backend {
            GatewayBackend::Rest(rest) => {
                rest.upsert_registration_presence(student_id, event_id, present)
                    .await
            }
            GatewayBackend::Memory(memory) => {
                memory.upsert_registration_presence(student_id, event_id, present)
            }
        }
    }

    // ---- accounts ----

    /// Lists every account in the authentication subsystem.
    ///
    /// # Errors
    ///
    /// Returns an error if the gateway call fails or the backend lacks a
    /// privileged key.
    pub async fn list_accounts(&self) -> Result<Vec<AccountRow>, GatewayError> {
        match &self.backend {
            GatewayBackend::Rest(rest) => rest.list_accounts().await,
            GatewayBackend::Memory(memory) => memory.list_accounts(),
        }
    }

    /// Creates a new account.
    ///
    /// # Errors
    ///
    /// Returns an error if the gateway call fails.
    pub async fn create_account(&self, new: NewAccount) -> Result<AccountRow, GatewayError> {
        match &self.backend {
            GatewayBackend::Rest(rest) => rest.create_account(new).await,
            GatewayBackend::Memory(memory) => memory.create_account(new),
        }
    }

    /// Updates the role carried in an account's metadata.
    ///
    /// # Errors
    ///
    /// Returns an error if the gateway call fails or the account does not
    /// exist.
    pub async fn update_account_role(
        &self,
        account_id: &str,
        role_id: i64,
    ) -> Result<(), GatewayError> {
        match &self.backend {
            GatewayBackend::Rest(rest) => rest.update_account_role(account_id, role_id).await,
            GatewayBackend::Memory(memory) => memory.update_account_role(account_id, role_id),
        }
    }

    /// Deletes an account.
    ///
    /// # Errors
    ///
    /// Returns an error if the gateway call fails or the account does not
    /// exist.
    pub async fn delete_account(&self, account_id: &str) -> Result<(), GatewayError> {
        match &self.backend {
            GatewayBackend::Rest(rest) => rest.delete_account(account_id).await,
            GatewayBackend::Memory(memory) => memory.delete_account(account_id),
        }
    }
}
