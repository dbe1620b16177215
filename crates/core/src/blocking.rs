// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Bulk blocking workflow.
//!
//! When an event is created for an organization, every current member must
//! end up with a `blocked` ledger row for it. The gateway cannot do this in
//! one transaction, so the workflow splits its targets into two disjoint
//! sets — students needing a new row and students whose existing row is
//! rewritten — and runs each mutation as its own idempotent step. A re-run
//! after any partial failure converges to the same end state.

use clearance_domain::RegistrationStatus;
use clearance_gateway::{Gateway, NewStudentEvent, OrganizationMemberRow, StudentEventRow};
use clearance_notify::Notifier;
use std::collections::HashSet;

/// Outcome of one bulk blocking run.
///
/// Counts are reported unconditionally: an empty membership or a failed
/// step yields zeros, never an error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BulkBlockReport {
    /// Ledger rows newly created with status `blocked`.
    pub created: u64,
    /// Pre-existing ledger rows rewritten to `blocked`.
    pub updated: u64,
}

/// Ensures every current member of an organization has a `blocked` ledger
/// row for an event.
///
/// Steps, each an independent remote call:
///
/// 1. Fetch the membership list fresh — no cached list is trusted.
/// 2. Derive the deduplicated target student set (joined student reference
///    id when present, raw membership id otherwise). Empty set is a no-op.
/// 3. Fetch existing ledger rows for (event, target set) and partition
///    targets into "needs new row" and "has existing row".
/// 4. Batch-insert `blocked` rows for the first set.
/// 5. Batch-rewrite the second set's rows to `blocked` — harmlessly
///    idempotent for rows already blocked.
///
/// The two mutating steps operate on disjoint key sets: an insert failure
/// does not stop the update step, and each failure is reported to the user
/// independently. There is no rollback; retrying the whole workflow reaches
/// the same fixed point.
pub async fn block_all_members_for_event(
    gateway: &Gateway,
    notifier: &Notifier,
    organization_id: i64,
    event_id: i64,
) -> BulkBlockReport {
    let members: Vec<OrganizationMemberRow> =
        match gateway.members_of_organization(organization_id).await {
            Ok(members) => members,
            Err(err) => {
                notifier.error(format!("Failed to fetch organization members: {err}"));
                return BulkBlockReport::default();
            }
        };

    let targets: Vec<i64> = dedup_target_ids(&members);
    if targets.is_empty() {
        tracing::debug!(organization_id, event_id, "no members to block");
        return BulkBlockReport::default();
    }

    let existing: Vec<StudentEventRow> =
        match gateway.ledger_rows_for_students(event_id, &targets).await {
            Ok(rows) => rows,
            Err(err) => {
                notifier.error(format!("Failed to fetch existing registrations: {err}"));
                return BulkBlockReport::default();
            }
        };

    let already_registered: HashSet<i64> = existing.iter().map(|r| r.student_id).collect();
    let needs_insert: Vec<i64> = targets
        .iter()
        .copied()
        .filter(|id| !already_registered.contains(id))
        .collect();
    let needs_update: Vec<i64> = targets
        .iter()
        .copied()
        .filter(|id| already_registered.contains(id))
        .collect();

    let mut report: BulkBlockReport = BulkBlockReport::default();

    if !needs_insert.is_empty() {
        let rows: Vec<NewStudentEvent> = needs_insert
            .iter()
            .map(|&student_id| NewStudentEvent {
                student_id,
                event_id,
                status: String::from(RegistrationStatus::BLOCKED),
                present: None,
            })
            .collect();
        match gateway.insert_registrations(&rows).await {
            Ok(created) => report.created = created,
            Err(err) => {
                // The update below touches a disjoint row set; keep going.
                notifier.error(format!("Failed to create blocked registrations: {err}"));
            }
        }
    }

    if !needs_update.is_empty() {
        match gateway
            .set_status_for_students(event_id, &needs_update, RegistrationStatus::BLOCKED)
            .await
        {
            Ok(updated) => report.updated = updated,
            Err(err) => {
                notifier.error(format!("Failed to update existing registrations: {err}"));
            }
        }
    }

    tracing::info!(
        organization_id,
        event_id,
        created = report.created,
        updated = report.updated,
        "bulk blocking complete"
    );
    report
}

/// Records the event ↔ organization association, best effort.
///
/// Two independent writes: setting the `organization_id` column on the
/// event, and inserting into the `event_organizations` junction. Either may
/// fail where the deployment's schema lacks the column or table; both
/// failures are logged and swallowed. The blocking workflow has already run
/// with the organization id supplied directly, so nothing depends on these
/// writes succeeding.
pub async fn attach_event_to_organization(
    gateway: &Gateway,
    event_id: i64,
    organization_id: i64,
) {
    if let Err(err) = gateway
        .set_event_organization(event_id, organization_id)
        .await
    {
        tracing::warn!("Optional event organization update failed (non-fatal): {err}");
    }

    if let Err(err) = gateway
        .insert_event_organization(event_id, organization_id)
        .await
    {
        tracing::warn!("Optional event_organizations insert failed (non-fatal): {err}");
    }
}

/// Derives the deduplicated target student ids from a membership list.
///
/// Duplicate (student, organization) pairs are possible upstream; without
/// dedup a duplicated membership would insert two ledger rows in one run.
fn dedup_target_ids(members: &[OrganizationMemberRow]) -> Vec<i64> {
    let mut seen: HashSet<i64> = HashSet::new();
    members
        .iter()
        .map(OrganizationMemberRow::target_student_id)
        .filter(|id| seen.insert(*id))
        .collect()
}
