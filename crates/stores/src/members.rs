// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Organization members store.

use clearance_core::BulkBlockReport;
use clearance_domain::{MemberRole, MembershipStatus, validate_member_links};
use clearance_gateway::{
    EventRow, Gateway, GatewayError, MemberPatch, NewOrganizationMember, OrganizationMemberRow,
    StudentRegistrationRow,
};
use clearance_notify::Notifier;
use std::str::FromStr;
use std::sync::Arc;

/// Form state for adding a member to an organization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberForm {
    pub student_id: Option<i64>,
    pub organization_id: Option<i64>,
    pub status: MembershipStatus,
    pub member_role: MemberRole,
    pub notes: Option<String>,
}

impl Default for MemberForm {
    fn default() -> Self {
        Self {
            student_id: None,
            organization_id: None,
            status: MembershipStatus::Active,
            member_role: MemberRole::Member,
            notes: None,
        }
    }
}

/// A student eligible to join the currently open organization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailableStudent {
    pub id: i64,
    pub user_id: Option<String>,
    pub full_name: Option<String>,
    pub student_number: Option<String>,
    pub email: Option<String>,
    /// Name shown in the selection control.
    pub display_name: String,
}

/// Role tallies for one organization's membership.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoleTally {
    pub member: usize,
    pub officer: usize,
    pub secretary: usize,
    pub treasurer: usize,
    pub vice_president: usize,
}

/// Status and role statistics for one organization's membership.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemberStats {
    pub total: usize,
    pub active: usize,
    pub pending: usize,
    pub inactive: usize,
    pub suspended: usize,
    pub roles: RoleTally,
}

/// State container for organization membership management.
pub struct MembersStore {
    gateway: Arc<Gateway>,
    notifier: Notifier,
    pub loading: bool,
    pub saving: bool,
    pub deleting: bool,
    pub members: Vec<OrganizationMemberRow>,
    pub available_students: Vec<AvailableStudent>,
    pub current_organization: Option<i64>,
    pub form: MemberForm,
}

impl MembersStore {
    /// Creates a new store bound to a gateway and notifier.
    #[must_use]
    pub fn new(gateway: Arc<Gateway>, notifier: Notifier) -> Self {
        Self {
            gateway,
            notifier,
            loading: false,
            saving: false,
            deleting: false,
            members: Vec::new(),
            available_students: Vec::new(),
            current_organization: None,
            form: MemberForm::default(),
        }
    }

    /// Fetches all members of an organization.
    ///
    /// Always records the organization and clears the stale cache before
    /// the read so the UI shows a loading state instead of old data.
    pub async fn fetch_members(&mut self, organization_id: i64) -> Vec<OrganizationMemberRow> {
        self.loading = true;
        self.current_organization = Some(organization_id);
        self.members.clear();

        let result = self.gateway.members_of_organization(organization_id).await;
        self.loading = false;
        match result {
            Ok(members) => {
                tracing::debug!(
                    organization_id,
                    count = members.len(),
                    "fetched organization members"
                );
                self.members = members.clone();
                members
            }
            Err(err) => {
                self.notifier
                    .error(format!("Failed to fetch organization members: {err}"));
                Vec::new()
            }
        }
    }

    /// Fetches all of a student's memberships with organization detail.
    pub async fn fetch_student_memberships(
        &mut self,
        student_id: i64,
    ) -> Vec<OrganizationMemberRow> {
        self.loading = true;
        let result = self.gateway.memberships_of_student(student_id).await;
        self.loading = false;
        match result {
            Ok(memberships) => memberships,
            Err(err) => {
                self.notifier
                    .error(format!("Failed to fetch student organizations: {err}"));
                Vec::new()
            }
        }
    }

    /// Fetches the students who are not yet members of an organization.
    pub async fn fetch_available_students(&mut self, organization_id: i64) {
        self.loading = true;
        let result = Self::load_available(&self.gateway, organization_id).await;
        self.loading = false;
        match result {
            Ok(students) => self.available_students = students,
            Err(err) => {
                self.notifier
                    .error(format!("Failed to fetch available students: {err}"));
            }
        }
    }

    /// Opens the membership dialog state for one organization.
    ///
    /// The member list and the available-student list are independent
    /// reads, so both are issued concurrently.
    pub async fn open_for_organization(&mut self, organization_id: i64) {
        self.loading = true;
        self.current_organization = Some(organization_id);
        self.members.clear();

        let (members, available) = tokio::join!(
            self.gateway.members_of_organization(organization_id),
            Self::load_available(&self.gateway, organization_id),
        );
        self.loading = false;

        match members {
            Ok(members) => self.members = members,
            Err(err) => {
                self.notifier
                    .error(format!("Failed to fetch organization members: {err}"));
            }
        }
        match available {
            Ok(students) => self.available_students = students,
            Err(err) => {
                self.notifier
                    .error(format!("Failed to fetch available students: {err}"));
            }
        }
    }

    /// Adds the form's student to the form's organization.
    ///
    /// Linking ids are validated before any remote call.
    pub async fn add_member(&mut self) -> bool {
        if let Err(err) = validate_member_links(self.form.student_id, self.form.organization_id) {
            self.notifier.error(err.to_string());
            return false;
        }
        let (Some(student_id), Some(organization_id)) =
            (self.form.student_id, self.form.organization_id)
        else {
            return false;
        };

        self.saving = true;
        let result = self
            .gateway
            .insert_member(NewOrganizationMember {
                student_id,
                organization_id,
                status: self.form.status.as_str().to_string(),
                member_role: self.form.member_role.as_str().to_string(),
                notes: self.form.notes.clone(),
            })
            .await;
        self.saving = false;

        match result {
            Ok(()) => {
                self.notifier.success("Member added successfully!");
                true
            }
            Err(err) => {
                self.notifier
                    .error(format!("Failed to add member to organization: {err}"));
                false
            }
        }
    }

    /// Patches one membership's status, role, or notes.
    pub async fn update_member(&mut self, member_id: i64, patch: MemberPatch) -> bool {
        self.saving = true;
        let result = self.gateway.update_member(member_id, &patch).await;
        self.saving = false;
        match result {
            Ok(()) => {
                self.notifier.success("Member updated successfully!");
                true
            }
            Err(err) => {
                self.notifier
                    .error(format!("Failed to update organization member: {err}"));
                false
            }
        }
    }

    /// Permanently deletes one membership record.
    pub async fn remove_member(&mut self, member_id: i64) -> bool {
        self.deleting = true;
        let result = self.gateway.delete_member(member_id).await;
        self.deleting = false;
        match result {
            Ok(()) => {
                self.notifier.success("Member removed successfully!");
                true
            }
            Err(err) => {
                self.notifier
                    .error(format!("Failed to remove member from organization: {err}"));
                false
            }
        }
    }

    /// Tallies membership status and role counts for an organization.
    ///
    /// Returns `None` if the read fails; statistics are decorative, so the
    /// failure is logged without a user-facing notice.
    pub async fn member_stats(&self, organization_id: i64) -> Option<MemberStats> {
        let members: Vec<OrganizationMemberRow> =
            match self.gateway.members_of_organization(organization_id).await {
                Ok(members) => members,
                Err(err) => {
                    tracing::error!("Failed to fetch organization member stats: {err}");
                    return None;
                }
            };

        let mut stats: MemberStats = MemberStats {
            total: members.len(),
            ..MemberStats::default()
        };
        for member in &members {
            match MembershipStatus::from_str(&member.status) {
                Ok(MembershipStatus::Active) => stats.active += 1,
                Ok(MembershipStatus::Pending) => stats.pending += 1,
                Ok(MembershipStatus::Inactive) => stats.inactive += 1,
                Ok(MembershipStatus::Suspended) => stats.suspended += 1,
                Err(_) => {}
            }
            match MemberRole::from_str(&member.member_role) {
                Ok(MemberRole::Member) => stats.roles.member += 1,
                Ok(MemberRole::Officer) => stats.roles.officer += 1,
                Ok(MemberRole::Secretary) => stats.roles.secretary += 1,
                Ok(MemberRole::Treasurer) => stats.roles.treasurer += 1,
                Ok(MemberRole::VicePresident) => stats.roles.vice_president += 1,
                Err(_) => {}
            }
        }
        Some(stats)
    }

    /// Fetches the ledger rows of the student linked to an account.
    pub async fn member_registrations(&self, user_id: &str) -> Vec<StudentRegistrationRow> {
        match clearance_core::registrations_for_account(&self.gateway, user_id).await {
            Ok(rows) => rows,
            Err(err) => {
                self.notifier
                    .error(format!("Failed to fetch member events: {err}"));
                Vec::new()
            }
        }
    }

    /// Sets the block/clear status of one member's ledger row.
    pub async fn set_member_event_status(
        &mut self,
        student_id: i64,
        event_id: i64,
        status: &str,
    ) -> bool {
        self.saving = true;
        let result =
            clearance_core::set_registration_status(&self.gateway, student_id, event_id, status)
                .await;
        self.saving = false;
        match result {
            Ok(()) => {
                self.notifier.success("Member status updated successfully!");
                true
            }
            Err(err) => {
                self.notifier
                    .error(format!("Failed to update member event status: {err}"));
                false
            }
        }
    }

    /// Records a member's presence at an event.
    pub async fn set_member_presence(
        &mut self,
        student_id: i64,
        event_id: i64,
        present: bool,
    ) -> bool {
        self.saving = true;
        let ok: bool = clearance_core::set_presence(
            &self.gateway,
            &self.notifier,
            student_id,
            event_id,
            present,
        )
        .await;
        self.saving = false;
        ok
    }

    /// Blocks every current member of an organization for an event.
    pub async fn block_all_members_for_event(
        &mut self,
        organization_id: i64,
        event_id: i64,
    ) -> BulkBlockReport {
        self.saving = true;
        let report: BulkBlockReport = clearance_core::block_all_members_for_event(
            &self.gateway,
            &self.notifier,
            organization_id,
            event_id,
        )
        .await;
        self.saving = false;
        report
    }

    /// Fetches the events associated with an organization.
    pub async fn organization_events(&self, organization_id: i64) -> Vec<EventRow> {
        match clearance_core::events_for_organization(&self.gateway, organization_id).await {
            Ok(events) => events,
            Err(err) => {
                self.notifier
                    .error(format!("Failed to fetch organization events: {err}"));
                Vec::new()
            }
        }
    }

    /// Resets the member form to its defaults.
    pub fn reset_form(&mut self) {
        self.form = MemberForm::default();
    }

    /// Clears all cached member data, for dialog close.
    pub fn clear(&mut self) {
        self.members.clear();
        self.available_students.clear();
        self.current_organization = None;
        self.reset_form();
    }

    async fn load_available(
        gateway: &Gateway,
        organization_id: i64,
    ) -> Result<Vec<AvailableStudent>, GatewayError> {
        let existing: Vec<i64> = gateway.member_student_ids(organization_id).await?;
        let students = gateway.list_students().await?;
        Ok(students
            .into_iter()
            .filter(|s| !existing.contains(&s.id))
            .map(|s| {
                let display_name: String = s
                    .full_name
                    .clone()
                    .or_else(|| s.email.clone())
                    .unwrap_or_else(|| String::from("Unknown Student"));
                AvailableStudent {
                    id: s.id,
                    user_id: s.user_id,
                    full_name: s.full_name,
                    student_number: s.student_number,
                    email: s.email,
                    display_name,
                }
            })
            .collect())
    }
}
