// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Accounts store.
//!
//! The admin surface over the authentication subsystem: listing every
//! account merged with its student record, adjusting roles and statuses,
//! registering student accounts, and cascading deletes. Token and session
//! handling belong to the hosted auth service and are not reimplemented
//! here.

use clearance_domain::{AccountRole, RegistrationStatus, StatusDisplay, status_display};
use clearance_gateway::{
    AccountRow, Gateway, NewAccount, NewStudent, StudentPatch, StudentRow,
};
use clearance_notify::Notifier;
use std::sync::Arc;

/// One merged account + student row of the user directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub id: String,
    pub email: Option<String>,
    pub created_at: String,
    pub full_name: Option<String>,
    pub student_number: Option<String>,
    pub status: Option<String>,
    pub organization_id: Option<i64>,
    pub role_id: Option<i64>,
    /// The linked `students` row id, for accounts that have one.
    pub student_id: Option<i64>,
}

/// Request to register a new student account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterStudentRequest {
    pub email: String,
    pub password: String,
    pub username: String,
    pub full_name: Option<String>,
    pub student_number: Option<String>,
    pub role: AccountRole,
    pub organization_id: Option<i64>,
}

/// State container for account administration.
pub struct AccountsStore {
    gateway: Arc<Gateway>,
    notifier: Notifier,
    pub loading: bool,
    pub saving: bool,
    pub users: Vec<DirectoryEntry>,
}

impl AccountsStore {
    /// Creates a new store bound to a gateway and notifier.
    #[must_use]
    pub fn new(gateway: Arc<Gateway>, notifier: Notifier) -> Self {
        Self {
            gateway,
            notifier,
            loading: false,
            saving: false,
            users: Vec::new(),
        }
    }

    /// Fetches every account merged with its student record.
    ///
    /// A failed student read degrades the listing (accounts only) instead
    /// of failing it; accounts without a student row default to `blocked`,
    /// matching how unlinked people are presented elsewhere.
    pub async fn fetch_all_users(&mut self) -> Vec<DirectoryEntry> {
        self.loading = true;
        let accounts = match self.gateway.list_accounts().await {
            Ok(accounts) => accounts,
            Err(err) => {
                self.loading = false;
                self.notifier
                    .error(format!("Failed to fetch users: {err}"));
                return Vec::new();
            }
        };
        let students: Vec<StudentRow> = match self.gateway.list_students().await {
            Ok(students) => students,
            Err(err) => {
                tracing::warn!("Could not fetch students data: {err}");
                Vec::new()
            }
        };
        self.loading = false;

        let entries: Vec<DirectoryEntry> = accounts
            .into_iter()
            .map(|account| merge_entry(account, &students))
            .collect();
        self.users = entries.clone();
        entries
    }

    /// Registers a new account, inserting the linked student row for
    /// student-role registrations.
    ///
    /// Returns the new account id on success.
    pub async fn register_user(&mut self, request: RegisterStudentRequest) -> Option<String> {
        self.saving = true;
        let account = match self
            .gateway
            .create_account(NewAccount {
                email: request.email.clone(),
                password: request.password.clone(),
                full_name: Some(request.username.clone()),
                role_id: request.role.id(),
            })
            .await
        {
            Ok(account) => account,
            Err(err) => {
                self.saving = false;
                self.notifier
                    .error(format!("Failed to register user: {err}"));
                return None;
            }
        };

        if request.role == AccountRole::Student {
            let insert = self
                .gateway
                .insert_student(NewStudent {
                    user_id: Some(account.id.clone()),
                    role_id: Some(request.role.id()),
                    full_name: request.full_name.clone().or(Some(request.username.clone())),
                    student_number: request.student_number.clone(),
                    email: Some(request.email.clone()),
                    status: String::from(RegistrationStatus::BLOCKED),
                    organization_id: request.organization_id,
                })
                .await;
            if let Err(err) = insert {
                self.saving = false;
                self.notifier
                    .error(format!("Failed to create student record: {err}"));
                return None;
            }
        }

        self.saving = false;
        self.notifier.success("User registered successfully!");
        Some(account.id)
    }

    /// Updates an account's role and/or its student row's status.
    ///
    /// The role lives in account metadata and must succeed; the student row
    /// update is best effort — an account without a student row is normal.
    pub async fn update_user(
        &mut self,
        user_id: &str,
        role: Option<AccountRole>,
        status: Option<&str>,
    ) -> bool {
        self.saving = true;
        if let Some(role) = role {
            if let Err(err) = self.gateway.update_account_role(user_id, role.id()).await {
                self.saving = false;
                self.notifier
                    .error(format!("Failed to update user: {err}"));
                return false;
            }
        }

        let patch: StudentPatch = StudentPatch {
            role_id: role.map(|r| r.id()),
            status: status.map(ToString::to_string),
        };
        if patch.role_id.is_some() || patch.status.is_some() {
            if let Err(err) = self.gateway.update_student_by_account(user_id, &patch).await {
                tracing::warn!("Could not update student record: {err}");
            }
        }
        self.saving = false;
        self.notifier.success("User updated successfully!");
        true
    }

    /// Deletes an account and everything hanging off it.
    ///
    /// Cascade order: the student's ledger rows, the student row, then the
    /// account itself. The first two are best effort (the account may have
    /// no student row); the account delete decides success.
    pub async fn delete_user(&mut self, user_id: &str) -> bool {
        self.saving = true;
        let student: Option<StudentRow> =
            match self.gateway.find_student_by_account(user_id).await {
                Ok(student) => student,
                Err(err) => {
                    tracing::warn!("Could not look up student before delete: {err}");
                    None
                }
            };

        if let Some(student) = &student {
            if let Err(err) = self
                .gateway
                .delete_registrations_for_student(student.id)
                .await
            {
                tracing::warn!("Could not delete student events: {err}");
            }
            if let Err(err) = self.gateway.delete_student_by_account(user_id).await {
                tracing::warn!("Could not delete student record: {err}");
            }
        }

        let result = self.gateway.delete_account(user_id).await;
        self.saving = false;
        match result {
            Ok(()) => {
                self.users.retain(|u| u.id != user_id);
                self.notifier.success("User deleted successfully!");
                true
            }
            Err(err) => {
                self.notifier
                    .error(format!("Failed to delete user: {err}"));
                false
            }
        }
    }

    /// Clears cached directory data.
    pub fn clear(&mut self) {
        self.users.clear();
    }
}

/// Derives the status chip for one directory entry from its ledger rows.
///
/// Thin glue over the domain derivation: the entry's numeric role is
/// resolved to an account role (unknown ids count as no role) and the raw
/// registration statuses are passed through.
#[must_use]
pub fn directory_status(
    entry: &DirectoryEntry,
    registration_statuses: &[String],
) -> StatusDisplay {
    let role: Option<AccountRole> = entry
        .role_id
        .and_then(|id| AccountRole::from_id(id).ok());
    status_display(
        role,
        entry.status.as_deref(),
        registration_statuses.iter().map(String::as_str),
    )
}

fn merge_entry(account: AccountRow, students: &[StudentRow]) -> DirectoryEntry {
    let student: Option<&StudentRow> = students
        .iter()
        .find(|s| s.user_id.as_deref() == Some(account.id.as_str()));
    DirectoryEntry {
        full_name: student
            .and_then(|s| s.full_name.clone())
            .or_else(|| account.full_name.clone())
            .or_else(|| account.email.clone()),
        student_number: student.and_then(|s| s.student_number.clone()),
        status: student
            .and_then(|s| s.status.clone())
            .or_else(|| Some(String::from(RegistrationStatus::BLOCKED))),
        organization_id: student.and_then(|s| s.organization_id),
        role_id: account.role_id.or_else(|| student.and_then(|s| s.role_id)),
        student_id: student.map(|s| s.id),
        id: account.id,
        email: account.email,
        created_at: account.created_at,
    }
}
