// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! In-memory gateway backend.
//!
//! Backs unit and integration tests with a deterministic, isolated store.
//! Schema-drift switches reproduce deployments that lack the optional
//! `present` column, the `events.organization_id` column, or the
//! `event_organizations` junction table. Failure counters let tests exercise
//! the partial-failure paths of multi-step workflows.

use crate::error::GatewayError;
use crate::rows::{
    AccountRow, EventPatch, EventRow, EventStatusSummary, MemberPatch, NewAccount, NewEvent,
    NewOrganization, NewOrganizationMember, NewStudent, NewStudentEvent, OrganizationMemberRow,
    OrganizationRow, OrganizationSummary, StudentDirectoryRow, StudentEventRow, StudentPatch,
    StudentRow, StudentSummary,
};
use std::sync::{Mutex, MutexGuard};

/// Timestamp stamped onto every row the memory backend creates.
///
/// Ordering relies on monotonic row ids, never on this value.
const CREATED_AT: &str = "2026-01-01T00:00:00Z";

/// Construction-time switches for the memory backend.
#[derive(Debug, Clone)]
pub struct MemoryOptions {
    /// Whether the `student_events.present` column exists.
    pub present_column: bool,
    /// Whether the `events.organization_id` column exists.
    pub event_organization_column: bool,
    /// Whether the `event_organizations` junction table exists.
    pub event_organizations_table: bool,
    /// Number of upcoming ledger batch inserts that fail.
    pub failing_registration_inserts: u32,
    /// Number of upcoming ledger batch status updates that fail.
    pub failing_registration_updates: u32,
    /// Number of upcoming membership reads that fail.
    pub failing_membership_reads: u32,
}

impl Default for MemoryOptions {
    fn default() -> Self {
        Self {
            present_column: true,
            event_organization_column: true,
            event_organizations_table: true,
            failing_registration_inserts: 0,
            failing_registration_updates: 0,
            failing_membership_reads: 0,
        }
    }
}

#[derive(Debug, Default)]
struct MemoryState {
    students: Vec<StudentRow>,
    organizations: Vec<OrganizationRow>,
    members: Vec<OrganizationMemberRow>,
    events: Vec<EventRow>,
    registrations: Vec<StudentEventRow>,
    event_organizations: Vec<(i64, i64)>,
    accounts: Vec<AccountRow>,
    next_id: i64,
    failing_registration_inserts: u32,
    failing_registration_updates: u32,
    failing_membership_reads: u32,
}

/// The in-memory backend.
#[derive(Debug)]
pub struct MemoryBackend {
    options: MemoryOptions,
    state: Mutex<MemoryState>,
}

impl MemoryBackend {
    /// Creates a new empty backend with the given switches.
    #[must_use]
    pub fn new(options: MemoryOptions) -> Self {
        let state: MemoryState = MemoryState {
            failing_registration_inserts: options.failing_registration_inserts,
            failing_registration_updates: options.failing_registration_updates,
            failing_membership_reads: options.failing_membership_reads,
            ..MemoryState::default()
        };
        Self {
            options,
            state: Mutex::new(state),
        }
    }

    fn state(&self) -> MutexGuard<'_, MemoryState> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn require_present_column(&self) -> Result<(), GatewayError> {
        if self.options.present_column {
            Ok(())
        } else {
            Err(GatewayError::MissingColumn(String::from("present")))
        }
    }

    // ---- students ----

    pub fn list_students(&self) -> Result<Vec<StudentRow>, GatewayError> {
        let state = self.state();
        let mut rows: Vec<StudentRow> = state.students.clone();
        rows.sort_by(|a, b| a.full_name.cmp(&b.full_name));
        Ok(rows)
    }

    pub fn list_students_with_organization(
        &self,
    ) -> Result<Vec<StudentDirectoryRow>, GatewayError> {
        let state = self.state();
        let mut rows: Vec<StudentDirectoryRow> = state
            .students
            .iter()
            .map(|s| {
                let organization_title: Option<String> = s.organization_id.and_then(|org_id| {
                    state
                        .organizations
                        .iter()
                        .find(|o| o.id == org_id)
                        .map(|o| o.title.clone())
                });
                StudentDirectoryRow {
                    id: s.id,
                    full_name: s.full_name.clone(),
                    student_number: s.student_number.clone(),
                    email: s.email.clone(),
                    status: s.status.clone(),
                    organization_id: s.organization_id,
                    organization_title,
                }
            })
            .collect();
        rows.sort_by(|a, b| a.full_name.cmp(&b.full_name));
        Ok(rows)
    }

    pub fn insert_student(&self, new: NewStudent) -> Result<StudentRow, GatewayError> {
        let mut state = self.state();
        state.next_id += 1;
        let row: StudentRow = StudentRow {
            id: state.next_id,
            user_id: new.user_id,
            role_id: new.role_id,
            full_name: new.full_name,
            student_number: new.student_number,
            email: new.email,
            status: Some(new.status),
            organization_id: new.organization_id,
        };
        state.students.push(row.clone());
        Ok(row)
    }

    pub fn update_student_status(
        &self,
        student_id: i64,
        status: &str,
    ) -> Result<(), GatewayError> {
        let mut state = self.state();
        for student in state
            .students
            .iter_mut()
            .filter(|s| s.id == student_id)
        {
            student.status = Some(status.to_string());
        }
        Ok(())
    }

    pub fn find_student_by_account(
        &self,
        user_id: &str,
    ) -> Result<Option<StudentRow>, GatewayError> {
        let state = self.state();
        Ok(state
            .students
            .iter()
            .find(|s| s.user_id.as_deref() == Some(user_id))
            .cloned())
    }

    pub fn update_student_by_account(
        &self,
        user_id: &str,
        patch: &StudentPatch,
    ) -> Result<(), GatewayError> {
        let mut state = self.state();
        for student in state
            .students
            .iter_mut()
            .filter(|s| s.user_id.as_deref() == Some(user_id))
        {
            if let Some(role_id) = patch.role_id {
                student.role_id = Some(role_id);
            }
            if let Some(status) = &patch.status {
                student.status = Some(status.clone());
            }
        }
        Ok(())
    }

    pub fn delete_student_by_account(&self, user_id: &str) -> Result<(), GatewayError> {
        let mut state = self.state();
        state
            .students
            .retain(|s| s.user_id.as_deref() != Some(user_id));
        Ok(())
    }

    // ---- organizations ----

    pub fn list_organizations(&self) -> Result<Vec<OrganizationRow>, GatewayError> {
        let state = self.state();
        let mut rows: Vec<OrganizationRow> = state.organizations.clone();
        rows.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(rows)
    }

    pub fn insert_organization(
        &self,
        new: NewOrganization,
    ) -> Result<OrganizationRow, GatewayError> {
        let mut state = self.state();
        state.next_id += 1;
        let row: OrganizationRow = OrganizationRow {
            id: state.next_id,
            title: new.title,
            created_at: String::from(CREATED_AT),
            leader_id: new.leader_id,
        };
        state.organizations.push(row.clone());
        Ok(row)
    }

    pub fn update_organization(
        &self,
        organization_id: i64,
        patch: &NewOrganization,
    ) -> Result<(), GatewayError> {
        let mut state = self.state();
        for organization in state
            .organizations
            .iter_mut()
            .filter(|o| o.id == organization_id)
        {
            organization.title.clone_from(&patch.title);
            organization.leader_id.clone_from(&patch.leader_id);
        }
        Ok(())
    }

    pub fn delete_organization(&self, organization_id: i64) -> Result<(), GatewayError> {
        let mut state = self.state();
        state.organizations.retain(|o| o.id != organization_id);
        Ok(())
    }

    pub fn count_organizations(&self) -> Result<u64, GatewayError> {
        let state = self.state();
        Ok(state.organizations.len() as u64)
    }

    pub fn assigned_leader_ids(&self) -> Result<Vec<String>, GatewayError> {
        let state = self.state();
        Ok(state
            .organizations
            .iter()
            .filter_map(|o| o.leader_id.clone())
            .collect())
    }

    // ---- organization members ----

    pub fn members_of_organization(
        &self,
        organization_id: i64,
    ) -> Result<Vec<OrganizationMemberRow>, GatewayError> {
        let mut state = self.state();
        if state.failing_membership_reads > 0 {
            state.failing_membership_reads -= 1;
            return Err(GatewayError::RequestFailed(String::from(
                "injected failure: organization_members read",
            )));
        }
        let mut rows: Vec<OrganizationMemberRow> = state
            .members
            .iter()
            .filter(|m| m.organization_id == organization_id)
            .cloned()
            .map(|mut m| {
                m.student = state
                    .students
                    .iter()
                    .find(|s| s.id == m.student_id)
                    .map(student_summary);
                m
            })
            .collect();
        rows.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(rows)
    }

    pub fn memberships_of_student(
        &self,
        student_id: i64,
    ) -> Result<Vec<OrganizationMemberRow>, GatewayError> {
        let state = self.state();
        let mut rows: Vec<OrganizationMemberRow> = state
            .members
            .iter()
            .filter(|m| m.student_id == student_id)
            .cloned()
            .map(|mut m| {
                m.organization = state
                    .organizations
                    .iter()
                    .find(|o| o.id == m.organization_id)
                    .map(|o| OrganizationSummary {
                        id: o.id,
                        title: o.title.clone(),
                    });
                m
            })
            .collect();
        rows.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(rows)
    }

    pub fn member_student_ids(&self, organization_id: i64) -> Result<Vec<i64>, GatewayError> {
        let state = self.state();
        Ok(state
            .members
            .iter()
            .filter(|m| m.organization_id == organization_id)
            .map(|m| m.student_id)
            .collect())
    }

    pub fn insert_member(&self, new: NewOrganizationMember) -> Result<(), GatewayError> {
        let mut state = self.state();
        state.next_id += 1;
        let id: i64 = state.next_id;
        state.members.push(OrganizationMemberRow {
            id,
            student_id: new.student_id,
            organization_id: new.organization_id,
            status: new.status,
            member_role: new.member_role,
            joined_at: String::from(CREATED_AT),
            left_at: None,
            notes: new.notes,
            student: None,
            organization: None,
        });
        Ok(())
    }

    pub fn update_member(&self, member_id: i64, patch: &MemberPatch) -> Result<(), GatewayError> {
        let mut state = self.state();
        for member in state.members.iter_mut().filter(|m| m.id == member_id) {
            if let Some(status) = &patch.status {
                member.status.clone_from(status);
            }
            if let Some(role) = &patch.member_role {
                member.member_role.clone_from(role);
            }
            if let Some(notes) = &patch.notes {
                member.notes = Some(notes.clone());
            }
        }
        Ok(())
    }

    pub fn delete_member(&self, member_id: i64) -> Result<(), GatewayError> {
        let mut state = self.state();
        state.members.retain(|m| m.id != member_id);
        Ok(())
    }

    // ---- events ----

    pub fn list_events(&self) -> Result<Vec<EventRow>, GatewayError> {
        let state = self.state();
        let mut rows: Vec<EventRow> = state.events.clone();
        rows.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(rows)
    }

    pub fn fetch_event(&self, event_id: i64) -> Result<Option<EventRow>, GatewayError> {
        let state = self.state();
        Ok(state.events.iter().find(|e| e.id == event_id).cloned())
    }

    pub fn insert_event(&self, new: NewEvent) -> Result<EventRow, GatewayError> {
        let mut state = self.state();
        state.next_id += 1;
        let row: EventRow = EventRow {
            id: state.next_id,
            title: new.title,
            date: new.date,
            created_at: String::from(CREATED_AT),
            organization_id: None,
        };
        state.events.push(row.clone());
        Ok(row)
    }

    pub fn update_event(
        &self,
        event_id: i64,
        patch: &EventPatch,
    ) -> Result<EventRow, GatewayError> {
        let mut state = self.state();
        let event: &mut EventRow = state
            .events
            .iter_mut()
            .find(|e| e.id == event_id)
            .ok_or(GatewayError::RowNotFound)?;
        if let Some(title) = &patch.title {
            event.title.clone_from(title);
        }
        if let Some(date) = &patch.date {
            event.date = Some(date.clone());
        }
        Ok(event.clone())
    }

    pub fn delete_event(&self, event_id: i64) -> Result<(), GatewayError> {
        let mut state = self.state();
        state.events.retain(|e| e.id != event_id);
        Ok(())
    }

    pub fn set_event_organization(
        &self,
        event_id: i64,
        organization_id: i64,
    ) -> Result<(), GatewayError> {
        if !self.options.event_organization_column {
            return Err(GatewayError::MissingColumn(String::from("organization_id")));
        }
        let mut state = self.state();
        for event in state.events.iter_mut().filter(|e| e.id == event_id) {
            event.organization_id = Some(organization_id);
        }
        Ok(())
    }

    pub fn insert_event_organization(
        &self,
        event_id: i64,
        organization_id: i64,
    ) -> Result<(), GatewayError> {
        if !self.options.event_organizations_table {
            return Err(GatewayError::MissingTable(String::from(
                "event_organizations",
            )));
        }
        let mut state = self.state();
        state.event_organizations.push((event_id, organization_id));
        Ok(())
    }

    pub fn junction_event_ids(&self, organization_id: i64) -> Result<Vec<i64>, GatewayError> {
        if !self.options.event_organizations_table {
            return Err(GatewayError::MissingTable(String::from(
                "event_organizations",
            )));
        }
        let state = self.state();
        Ok(state
            .event_organizations
            .iter()
            .filter(|(_, org)| *org == organization_id)
            .map(|(event, _)| *event)
            .collect())
    }

    pub fn events_by_organization_column(
        &self,
        organization_id: i64,
    ) -> Result<Vec<EventRow>, GatewayError> {
        if !self.options.event_organization_column {
            return Err(GatewayError::MissingColumn(String::from("organization_id")));
        }
        let state = self.state();
        let mut rows: Vec<EventRow> = state
            .events
            .iter()
            .filter(|e| e.organization_id == Some(organization_id))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(rows)
    }

    pub fn events_with_registration_statuses(
        &self,
    ) -> Result<Vec<EventStatusSummary>, GatewayError> {
        let state = self.state();
        Ok(state
            .events
            .iter()
            .map(|e| EventStatusSummary {
                event_id: e.id,
                date: e.date.clone(),
                statuses: state
                    .registrations
                    .iter()
                    .filter(|r| r.event_id == e.id)
                    .map(|r| r.status.clone())
                    .collect(),
            })
            .collect())
    }

    // ---- ledger ----

    fn scrub_presence(&self, mut row: StudentEventRow) -> StudentEventRow {
        if !self.options.present_column {
            row.present = None;
        }
        row
    }

    pub fn registrations_for_event(
        &self,
        event_id: i64,
    ) -> Result<Vec<StudentEventRow>, GatewayError> {
        let state = self.state();
        let mut rows: Vec<StudentEventRow> = state
            .registrations
            .iter()
            .filter(|r| r.event_id == event_id)
            .cloned()
            .map(|r| self.scrub_presence(r))
            .collect();
        rows.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(rows)
    }

    pub fn event_registrations(
        &self,
        event_id: i64,
        include_presence: bool,
    ) -> Result<Vec<crate::rows::EventRegistrationRow>, GatewayError> {
        if include_presence {
            self.require_present_column()?;
        }
        let state = self.state();
        let mut rows: Vec<crate::rows::EventRegistrationRow> = state
            .registrations
            .iter()
            .filter(|r| r.event_id == event_id)
            .map(|r| crate::rows::EventRegistrationRow {
                id: r.id,
                student_id: r.student_id,
                event_id: r.event_id,
                status: r.status.clone(),
                present: if include_presence { r.present } else { None },
                created_at: r.created_at.clone(),
                student: state
                    .students
                    .iter()
                    .find(|s| s.id == r.student_id)
                    .map(student_summary),
            })
            .collect();
        rows.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(rows)
    }

    pub fn student_registrations(
        &self,
        student_id: i64,
        include_presence: bool,
    ) -> Result<Vec<crate::rows::StudentRegistrationRow>, GatewayError> {
        if include_presence {
            self.require_present_column()?;
        }
        let state = self.state();
        let mut rows: Vec<crate::rows::StudentRegistrationRow> = state
            .registrations
            .iter()
            .filter(|r| r.student_id == student_id)
            .map(|r| crate::rows::StudentRegistrationRow {
                id: r.id,
                student_id: r.student_id,
                event_id: r.event_id,
                status: r.status.clone(),
                present: if include_presence { r.present } else { None },
                created_at: r.created_at.clone(),
                event: state.events.iter().find(|e| e.id == r.event_id).map(|e| {
                    crate::rows::EventSummary {
                        id: e.id,
                        title: e.title.clone(),
                        date: e.date.clone(),
                    }
                }),
            })
            .collect();
        rows.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(rows)
    }

    pub fn ledger_rows_for_students(
        &self,
        event_id: i64,
        student_ids: &[i64],
    ) -> Result<Vec<StudentEventRow>, GatewayError> {
        let state = self.state();
        Ok(state
            .registrations
            .iter()
            .filter(|r| r.event_id == event_id && student_ids.contains(&r.student_id))
            .cloned()
            .map(|r| self.scrub_presence(r))
            .collect())
    }

    pub fn insert_registrations(&self, rows: &[NewStudentEvent]) -> Result<u64, GatewayError> {
        if rows.iter().any(|r| r.present.is_some()) {
            self.require_present_column()?;
        }
        let mut state = self.state();
        if state.failing_registration_inserts > 0 {
            state.failing_registration_inserts -= 1;
            return Err(GatewayError::RequestFailed(String::from(
                "injected failure: student_events insert",
            )));
        }
        for row in rows {
            state.next_id += 1;
            let id: i64 = state.next_id;
            state.registrations.push(StudentEventRow {
                id,
                student_id: row.student_id,
                event_id: row.event_id,
                status: row.status.clone(),
                present: row.present,
                created_at: String::from(CREATED_AT),
            });
        }
        Ok(rows.len() as u64)
    }

    pub fn set_status_for_students(
        &self,
        event_id: i64,
        student_ids: &[i64],
        status: &str,
    ) -> Result<u64, GatewayError> {
        let mut state = self.state();
        if state.failing_registration_updates > 0 {
            state.failing_registration_updates -= 1;
            return Err(GatewayError::RequestFailed(String::from(
                "injected failure: student_events update",
            )));
        }
        let mut updated: u64 = 0;
        for registration in state
            .registrations
            .iter_mut()
            .filter(|r| r.event_id == event_id && student_ids.contains(&r.student_id))
        {
            registration.status = status.to_string();
            updated += 1;
        }
        Ok(updated)
    }

    pub fn find_registration(
        &self,
        student_id: i64,
        event_id: i64,
    ) -> Result<Option<StudentEventRow>, GatewayError> {
        let state = self.state();
        Ok(state
            .registrations
            .iter()
            .find(|r| r.student_id == student_id && r.event_id == event_id)
            .cloned()
            .map(|r| self.scrub_presence(r)))
    }

    pub fn insert_registration(
        &self,
        row: NewStudentEvent,
    ) -> Result<StudentEventRow, GatewayError> {
        if row.present.is_some() {
            self.require_present_column()?;
        }
        let mut state = self.state();
        state.next_id += 1;
        let inserted: StudentEventRow = StudentEventRow {
            id: state.next_id,
            student_id: row.student_id,
            event_id: row.event_id,
            status: row.status,
            present: row.present,
            created_at: String::from(CREATED_AT),
        };
        state.registrations.push(inserted.clone());
        Ok(inserted)
    }

    pub fn delete_registration(
        &self,
        student_id: i64,
        event_id: i64,
    ) -> Result<(), GatewayError> {
        let mut state = self.state();
        state
            .registrations
            .retain(|r| !(r.student_id == student_id && r.event_id == event_id));
        Ok(())
    }

    pub fn delete_registrations_for_student(&self, student_id: i64) -> Result<(), GatewayError> {
        let mut state = self.state();
        state.registrations.retain(|r| r.student_id != student_id);
        Ok(())
    }

    pub fn update_registration_status(
        &self,
        student_id: i64,
        event_id: i64,
        status: &str,
    ) -> Result<(), GatewayError> {
        let mut state = self.state();
        let mut touched: bool = false;
        for registration in state
            .registrations
            .iter_mut()
            .filter(|r| r.student_id == student_id && r.event_id == event_id)
        {
            registration.status = status.to_string();
            touched = true;
        }
        if touched {
            Ok(())
        } else {
            Err(GatewayError::RowNotFound)
        }
    }

    pub fn upsert_registration_presence(
        &self,
        student_id: i64,
        event_id: i64,
        present: bool,
    ) -> Result<(), GatewayError> {
        self.require_present_column()?;
        let mut state = self.state();
        if let Some(registration) = state
            .registrations
            .iter_mut()
            .find(|r| r.student_id == student_id && r.event_id == event_id)
        {
            registration.present = Some(present);
            return Ok(());
        }
        state.next_id += 1;
        let id: i64 = state.next_id;
        state.registrations.push(StudentEventRow {
            id,
            student_id,
            event_id,
            status: String::from("blocked"),
            present: Some(present),
            created_at: String::from(CREATED_AT),
        });
        Ok(())
    }

    // ---- accounts ----

    pub fn list_accounts(&self) -> Result<Vec<AccountRow>, GatewayError> {
        let state = self.state();
        Ok(state.accounts.clone())
    }

    pub fn create_account(&self, new: NewAccount) -> Result<AccountRow, GatewayError> {
        let mut state = self.state();
        state.next_id += 1;
        let row: AccountRow = AccountRow {
            id: format!("acct-{:04}", state.next_id),
            email: Some(new.email),
            created_at: String::from(CREATED_AT),
            full_name: new.full_name,
            role_id: Some(new.role_id),
        };
        state.accounts.push(row.clone());
        Ok(row)
    }

    pub fn update_account_role(
        &self,
        account_id: &str,
        role_id: i64,
    ) -> Result<(), GatewayError> {
        let mut state = self.state();
        let account: &mut AccountRow = state
            .accounts
            .iter_mut()
            .find(|a| a.id == account_id)
            .ok_or(GatewayError::RowNotFound)?;
        account.role_id = Some(role_id);
        Ok(())
    }

    pub fn delete_account(&self, account_id: &str) -> Result<(), GatewayError> {
        let mut state = self.state();
        let before: usize = state.accounts.len();
        state.accounts.retain(|a| a.id != account_id);
        if state.accounts.len() == before {
            return Err(GatewayError::RowNotFound);
        }
        Ok(())
    }
}

fn student_summary(student: &StudentRow) -> StudentSummary {
    StudentSummary {
        id: student.id,
        user_id: student.user_id.clone(),
        full_name: student.full_name.clone(),
        student_number: student.student_number.clone(),
        email: student.email.clone(),
    }
}
