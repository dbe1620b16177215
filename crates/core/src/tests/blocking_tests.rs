// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for the bulk blocking workflow.

use crate::blocking::{
    BulkBlockReport, attach_event_to_organization, block_all_members_for_event,
};
use crate::tests::{
    create_test_event, create_test_membership, create_test_notifier, create_test_organization,
    create_test_student,
};
use clearance_gateway::{Gateway, MemoryOptions, NewStudentEvent};
use clearance_notify::NoticeLevel;

#[tokio::test]
async fn test_blocks_every_member_of_a_fresh_organization() {
    let gateway = Gateway::new_in_memory();
    let notifier = create_test_notifier();
    let org = create_test_organization(&gateway, "Chess Club").await;
    let s1 = create_test_student(&gateway, "alice").await;
    let s2 = create_test_student(&gateway, "bob").await;
    create_test_membership(&gateway, s1.id, org.id).await;
    create_test_membership(&gateway, s2.id, org.id).await;
    let event = create_test_event(&gateway, "General Assembly").await;

    let report = block_all_members_for_event(&gateway, &notifier, org.id, event.id).await;

    assert_eq!(report, BulkBlockReport { created: 2, updated: 0 });
    let rows = gateway.registrations_for_event(event.id).await.unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r.status == "blocked"));
    let mut students: Vec<i64> = rows.iter().map(|r| r.student_id).collect();
    students.sort_unstable();
    assert_eq!(students, vec![s1.id, s2.id]);
    assert!(rows.iter().all(|r| r.present.is_none()));
    assert_eq!(notifier.pending(), 0, "A clean run produces no notices");
}

#[tokio::test]
async fn test_rerun_converges_to_the_same_state() {
    let gateway = Gateway::new_in_memory();
    let notifier = create_test_notifier();
    let org = create_test_organization(&gateway, "Chess Club").await;
    let s1 = create_test_student(&gateway, "alice").await;
    let s2 = create_test_student(&gateway, "bob").await;
    create_test_membership(&gateway, s1.id, org.id).await;
    create_test_membership(&gateway, s2.id, org.id).await;
    let event = create_test_event(&gateway, "General Assembly").await;

    let first = block_all_members_for_event(&gateway, &notifier, org.id, event.id).await;
    assert_eq!(first, BulkBlockReport { created: 2, updated: 0 });

    let second = block_all_members_for_event(&gateway, &notifier, org.id, event.id).await;
    assert_eq!(
        second,
        BulkBlockReport { created: 0, updated: 2 },
        "Second run must rewrite instead of duplicating"
    );

    let rows = gateway.registrations_for_event(event.id).await.unwrap();
    assert_eq!(rows.len(), 2, "No duplicate rows after a re-run");
    assert!(rows.iter().all(|r| r.status == "blocked"));
}

#[tokio::test]
async fn test_empty_membership_is_a_no_op() {
    let gateway = Gateway::new_in_memory();
    let notifier = create_test_notifier();
    let org = create_test_organization(&gateway, "Chess Club").await;
    let event = create_test_event(&gateway, "General Assembly").await;

    let report = block_all_members_for_event(&gateway, &notifier, org.id, event.id).await;

    assert_eq!(report, BulkBlockReport::default());
    assert!(
        gateway
            .registrations_for_event(event.id)
            .await
            .unwrap()
            .is_empty()
    );
    assert_eq!(notifier.pending(), 0);
}

#[tokio::test]
async fn test_mixed_membership_partitions_into_disjoint_sets() {
    let gateway = Gateway::new_in_memory();
    let notifier = create_test_notifier();
    let org = create_test_organization(&gateway, "Chess Club").await;
    let s1 = create_test_student(&gateway, "alice").await;
    let s2 = create_test_student(&gateway, "bob").await;
    create_test_membership(&gateway, s1.id, org.id).await;
    create_test_membership(&gateway, s2.id, org.id).await;
    let event = create_test_event(&gateway, "General Assembly").await;

    // One member already holds a cleared row; it must be rewritten, not
    // duplicated.
    gateway
        .insert_registration(NewStudentEvent {
            student_id: s1.id,
            event_id: event.id,
            status: String::from("cleared"),
            present: None,
        })
        .await
        .unwrap();

    let report = block_all_members_for_event(&gateway, &notifier, org.id, event.id).await;

    assert_eq!(report, BulkBlockReport { created: 1, updated: 1 });
    let rows = gateway.registrations_for_event(event.id).await.unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r.status == "blocked"));
}

#[tokio::test]
async fn test_duplicate_memberships_produce_one_row() {
    let gateway = Gateway::new_in_memory();
    let notifier = create_test_notifier();
    let org = create_test_organization(&gateway, "Chess Club").await;
    let s1 = create_test_student(&gateway, "alice").await;
    create_test_membership(&gateway, s1.id, org.id).await;
    create_test_membership(&gateway, s1.id, org.id).await;
    let event = create_test_event(&gateway, "General Assembly").await;

    let report = block_all_members_for_event(&gateway, &notifier, org.id, event.id).await;

    assert_eq!(report, BulkBlockReport { created: 1, updated: 0 });
    let rows = gateway.registrations_for_event(event.id).await.unwrap();
    assert_eq!(rows.len(), 1, "Duplicate memberships must be reconciled");
}

#[tokio::test]
async fn test_membership_fetch_failure_reports_zero_counts() {
    let gateway = Gateway::new_in_memory_with(MemoryOptions {
        failing_membership_reads: 1,
        ..MemoryOptions::default()
    });
    let notifier = create_test_notifier();
    let org = create_test_organization(&gateway, "Chess Club").await;
    let s1 = create_test_student(&gateway, "alice").await;
    create_test_membership(&gateway, s1.id, org.id).await;
    let event = create_test_event(&gateway, "General Assembly").await;

    let report = block_all_members_for_event(&gateway, &notifier, org.id, event.id).await;

    assert_eq!(report, BulkBlockReport::default());
    let notices = notifier.drain();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Error);
    assert!(
        gateway
            .registrations_for_event(event.id)
            .await
            .unwrap()
            .is_empty(),
        "No mutation may run when the membership read fails"
    );
}

#[tokio::test]
async fn test_insert_failure_does_not_stop_the_update_step() {
    let gateway = Gateway::new_in_memory_with(MemoryOptions {
        failing_registration_inserts: 1,
        ..MemoryOptions::default()
    });
    let notifier = create_test_notifier();
    let org = create_test_organization(&gateway, "Chess Club").await;
    let s1 = create_test_student(&gateway, "alice").await;
    let s2 = create_test_student(&gateway, "bob").await;
    create_test_membership(&gateway, s1.id, org.id).await;
    create_test_membership(&gateway, s2.id, org.id).await;
    let event = create_test_event(&gateway, "General Assembly").await;

    // s1 already has a row, so the run partitions into insert {s2} and
    // update {s1}; the injected failure hits only the insert.
    gateway
        .insert_registration(NewStudentEvent {
            student_id: s1.id,
            event_id: event.id,
            status: String::from("cleared"),
            present: None,
        })
        .await
        .unwrap();

    let report = block_all_members_for_event(&gateway, &notifier, org.id, event.id).await;

    assert_eq!(
        report,
        BulkBlockReport { created: 0, updated: 1 },
        "Update must still run after the insert fails"
    );
    let notices = notifier.drain();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Error);

    // Retrying converges: the missed insert happens, the update rewrites.
    let retry = block_all_members_for_event(&gateway, &notifier, org.id, event.id).await;
    assert_eq!(retry, BulkBlockReport { created: 1, updated: 1 });
    let rows = gateway.registrations_for_event(event.id).await.unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r.status == "blocked"));
}

#[tokio::test]
async fn test_attach_records_both_associations_when_schema_allows() {
    let gateway = Gateway::new_in_memory();
    let org = create_test_organization(&gateway, "Chess Club").await;
    let event = create_test_event(&gateway, "General Assembly").await;

    attach_event_to_organization(&gateway, event.id, org.id).await;

    let fetched = gateway.fetch_event(event.id).await.unwrap().unwrap();
    assert_eq!(fetched.organization_id, Some(org.id));
    assert_eq!(
        gateway.junction_event_ids(org.id).await.unwrap(),
        vec![event.id]
    );
}

#[tokio::test]
async fn test_attach_swallows_missing_schema_failures() {
    let gateway = Gateway::new_in_memory_with(MemoryOptions {
        event_organization_column: false,
        event_organizations_table: false,
        ..MemoryOptions::default()
    });
    let notifier = create_test_notifier();
    let org = create_test_organization(&gateway, "Chess Club").await;
    let s1 = create_test_student(&gateway, "alice").await;
    create_test_membership(&gateway, s1.id, org.id).await;
    let event = create_test_event(&gateway, "General Assembly").await;

    let report = block_all_members_for_event(&gateway, &notifier, org.id, event.id).await;
    attach_event_to_organization(&gateway, event.id, org.id).await;

    // The blocking outcome is untouched by the failed association writes
    // and no user-visible notice is produced for them.
    assert_eq!(report, BulkBlockReport { created: 1, updated: 0 });
    assert_eq!(notifier.pending(), 0);
}
