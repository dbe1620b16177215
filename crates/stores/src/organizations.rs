// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Organizations store.

use clearance_domain::AccountRole;
use clearance_gateway::{AccountRow, Gateway, NewOrganization};
use clearance_notify::Notifier;
use std::sync::Arc;

/// A leader candidate shown in the organization form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderListing {
    pub id: String,
    pub email: String,
    pub full_name: Option<String>,
    /// Name shown in the selection control.
    pub display_name: String,
}

/// An organization with its leader resolved for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrganizationListing {
    pub id: i64,
    pub title: String,
    pub created_at: String,
    pub leader_id: Option<String>,
    pub leader: Option<LeaderListing>,
}

/// Form state for creating or editing an organization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrganizationForm {
    pub title: String,
    pub leader_id: Option<String>,
}

/// State container for organization management.
pub struct OrganizationsStore {
    gateway: Arc<Gateway>,
    notifier: Notifier,
    pub loading: bool,
    pub saving: bool,
    pub deleting: bool,
    pub loading_leaders: bool,
    pub organizations: Vec<OrganizationListing>,
    pub leaders: Vec<LeaderListing>,
    pub form: OrganizationForm,
    /// The organization currently being edited, if any.
    pub editing: Option<OrganizationListing>,
}

impl OrganizationsStore {
    /// Creates a new store bound to a gateway and notifier.
    #[must_use]
    pub fn new(gateway: Arc<Gateway>, notifier: Notifier) -> Self {
        Self {
            gateway,
            notifier,
            loading: false,
            saving: false,
            deleting: false,
            loading_leaders: false,
            organizations: Vec::new(),
            leaders: Vec::new(),
            form: OrganizationForm::default(),
            editing: None,
        }
    }

    /// Fetches all organizations with their leader resolved.
    ///
    /// Leader resolution needs the account listing; if that read fails the
    /// organizations still load, just without leader detail.
    pub async fn fetch_organizations(&mut self) -> Vec<OrganizationListing> {
        self.loading = true;
        let organizations = self.gateway.list_organizations().await;
        let organizations = match organizations {
            Ok(organizations) => organizations,
            Err(err) => {
                self.loading = false;
                self.notifier
                    .error(format!("Failed to fetch organizations: {err}"));
                return Vec::new();
            }
        };

        let accounts: Vec<AccountRow> = match self.gateway.list_accounts().await {
            Ok(accounts) => accounts,
            Err(err) => {
                tracing::warn!("Could not fetch accounts for leader resolution: {err}");
                Vec::new()
            }
        };
        self.loading = false;

        let listings: Vec<OrganizationListing> = organizations
            .into_iter()
            .map(|org| {
                let leader: Option<LeaderListing> = org.leader_id.as_ref().and_then(|leader_id| {
                    accounts
                        .iter()
                        .find(|a| &a.id == leader_id)
                        .map(leader_listing)
                });
                OrganizationListing {
                    id: org.id,
                    title: org.title,
                    created_at: org.created_at,
                    leader_id: org.leader_id,
                    leader,
                }
            })
            .collect();
        self.organizations = listings.clone();
        listings
    }

    /// Fetches the accounts eligible to lead an organization.
    ///
    /// Candidates hold the organization-leader role and are not already
    /// assigned to another organization. The leader of the organization
    /// being edited stays selectable.
    pub async fn fetch_leaders(&mut self) {
        self.loading_leaders = true;
        let exclude: Option<String> = self
            .editing
            .as_ref()
            .and_then(|org| org.leader_id.clone());

        let accounts = match self.gateway.list_accounts().await {
            Ok(accounts) => accounts,
            Err(err) => {
                self.loading_leaders = false;
                self.notifier
                    .error(format!("Failed to fetch organization leaders: {err}"));
                return;
            }
        };
        let assigned: Vec<String> = match self.gateway.assigned_leader_ids().await {
            Ok(assigned) => assigned
                .into_iter()
                .filter(|id| exclude.as_deref() != Some(id))
                .collect(),
            Err(err) => {
                tracing::warn!(
                    "Could not fetch existing organizations for leader filtering: {err}"
                );
                Vec::new()
            }
        };
        self.loading_leaders = false;

        self.leaders = accounts
            .iter()
            .filter(|a| a.role_id == Some(AccountRole::OrganizationLeader.id()))
            .filter(|a| !assigned.contains(&a.id))
            .map(leader_listing)
            .collect();
    }

    /// Creates an organization from the form.
    pub async fn create_organization(&mut self) -> bool {
        if self.form.title.trim().is_empty() {
            self.notifier.error("Organization name is required");
            return false;
        }
        self.saving = true;
        let result = self
            .gateway
            .insert_organization(NewOrganization {
                title: self.form.title.trim().to_string(),
                leader_id: self.form.leader_id.clone(),
            })
            .await;
        self.saving = false;
        match result {
            Ok(_) => {
                self.notifier.success("Organization created successfully!");
                self.fetch_organizations().await;
                true
            }
            Err(err) => {
                self.notifier
                    .error(format!("Failed to create organization: {err}"));
                false
            }
        }
    }

    /// Saves the form over the organization being edited.
    pub async fn update_organization(&mut self, organization_id: i64) -> bool {
        if self.form.title.trim().is_empty() {
            self.notifier.error("Organization name is required");
            return false;
        }
        self.saving = true;
        let result = self
            .gateway
            .update_organization(
                organization_id,
                &NewOrganization {
                    title: self.form.title.trim().to_string(),
                    leader_id: self.form.leader_id.clone(),
                },
            )
            .await;
        self.saving = false;
        match result {
            Ok(()) => {
                self.notifier.success("Organization updated successfully!");
                self.fetch_organizations().await;
                true
            }
            Err(err) => {
                self.notifier
                    .error(format!("Failed to update organization: {err}"));
                false
            }
        }
    }

    /// Saves the form: update when editing, create otherwise.
    pub async fn save_organization(&mut self) -> bool {
        match self.editing.as_ref().map(|org| org.id) {
            Some(organization_id) => self.update_organization(organization_id).await,
            None => self.create_organization().await,
        }
    }

    /// Deletes an organization.
    pub async fn delete_organization(&mut self, organization_id: i64) -> bool {
        self.deleting = true;
        let result = self.gateway.delete_organization(organization_id).await;
        self.deleting = false;
        match result {
            Ok(()) => {
                self.notifier.success("Organization deleted successfully!");
                self.fetch_organizations().await;
                true
            }
            Err(err) => {
                self.notifier
                    .error(format!("Failed to delete organization: {err}"));
                false
            }
        }
    }

    /// Counts organizations; a failed read counts as zero.
    pub async fn organization_count(&self) -> u64 {
        match self.gateway.count_organizations().await {
            Ok(count) => count,
            Err(err) => {
                tracing::error!("Failed to fetch organization stats: {err}");
                0
            }
        }
    }

    /// Finds a cached organization by id.
    #[must_use]
    pub fn find_organization(&self, organization_id: i64) -> Option<&OrganizationListing> {
        self.organizations
            .iter()
            .find(|org| org.id == organization_id)
    }

    /// Prepares the form for creating a new organization.
    pub fn prepare_create(&mut self) {
        self.editing = None;
        self.form = OrganizationForm::default();
    }

    /// Prepares the form for editing an existing organization.
    pub fn prepare_edit(&mut self, organization: OrganizationListing) {
        self.form = OrganizationForm {
            title: organization.title.clone(),
            leader_id: organization.leader_id.clone(),
        };
        self.editing = Some(organization);
    }

    /// Resets the form and editing state.
    pub fn reset_form(&mut self) {
        self.editing = None;
        self.form = OrganizationForm::default();
    }

    /// Clears cached organization data.
    pub fn clear(&mut self) {
        self.organizations.clear();
        self.leaders.clear();
        self.reset_form();
    }
}

fn leader_listing(account: &AccountRow) -> LeaderListing {
    let email: String = account.email.clone().unwrap_or_default();
    let display_name: String = account
        .full_name
        .clone()
        .filter(|name| !name.is_empty())
        .or_else(|| account.email.clone())
        .unwrap_or_else(|| String::from("Unknown User"));
    LeaderListing {
        id: account.id.clone(),
        email,
        full_name: account.full_name.clone(),
        display_name,
    }
}
