// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for the in-memory gateway backend.

use crate::rows::{MemberPatch, NewAccount, NewOrganizationMember, NewStudentEvent};
use crate::tests::{blocked_registration, seed_event, seed_organization, seed_student};
use crate::{Gateway, GatewayError, MemoryOptions};

fn membership(student_id: i64, organization_id: i64) -> NewOrganizationMember {
    NewOrganizationMember {
        student_id,
        organization_id,
        status: String::from("active"),
        member_role: String::from("member"),
        notes: None,
    }
}

#[tokio::test]
async fn test_member_read_joins_student_reference() {
    let gateway = Gateway::new_in_memory();
    let org = seed_organization(&gateway, "Chess Club").await;
    let student = seed_student(&gateway, "alice").await;
    gateway
        .insert_member(membership(student.id, org.id))
        .await
        .unwrap();

    let members = gateway.members_of_organization(org.id).await.unwrap();
    assert_eq!(members.len(), 1);
    let joined = members[0].student.as_ref().expect("student joined");
    assert_eq!(joined.id, student.id);
    assert_eq!(joined.full_name.as_deref(), Some("alice"));
    assert_eq!(members[0].target_student_id(), student.id);
}

#[tokio::test]
async fn test_member_read_without_student_row_falls_back_to_raw_id() {
    let gateway = Gateway::new_in_memory();
    let org = seed_organization(&gateway, "Chess Club").await;
    gateway.insert_member(membership(777, org.id)).await.unwrap();

    let members = gateway.members_of_organization(org.id).await.unwrap();
    assert_eq!(members.len(), 1);
    assert!(members[0].student.is_none());
    assert_eq!(members[0].target_student_id(), 777);
}

#[tokio::test]
async fn test_member_update_patches_only_given_fields() {
    let gateway = Gateway::new_in_memory();
    let org = seed_organization(&gateway, "Chess Club").await;
    let student = seed_student(&gateway, "alice").await;
    gateway
        .insert_member(membership(student.id, org.id))
        .await
        .unwrap();
    let member_id = gateway.members_of_organization(org.id).await.unwrap()[0].id;

    gateway
        .update_member(
            member_id,
            &MemberPatch {
                status: Some(String::from("suspended")),
                member_role: None,
                notes: None,
            },
        )
        .await
        .unwrap();

    let members = gateway.members_of_organization(org.id).await.unwrap();
    assert_eq!(members[0].status, "suspended");
    assert_eq!(members[0].member_role, "member", "Role must be untouched");
}

#[tokio::test]
async fn test_student_directory_resolves_organization_title() {
    let gateway = Gateway::new_in_memory();
    let org = seed_organization(&gateway, "Debate Society").await;
    gateway
        .insert_student(crate::NewStudent {
            user_id: None,
            role_id: Some(2),
            full_name: Some(String::from("bob")),
            student_number: None,
            email: None,
            status: String::from("active"),
            organization_id: Some(org.id),
        })
        .await
        .unwrap();

    let directory = gateway.list_students_with_organization().await.unwrap();
    assert_eq!(directory.len(), 1);
    assert_eq!(
        directory[0].organization_title.as_deref(),
        Some("Debate Society")
    );
}

#[tokio::test]
async fn test_upsert_presence_updates_existing_row_without_touching_status() {
    let gateway = Gateway::new_in_memory();
    let student = seed_student(&gateway, "alice").await;
    let event = seed_event(&gateway, "Orientation").await;
    gateway
        .insert_registration(NewStudentEvent {
            student_id: student.id,
            event_id: event.id,
            status: String::from("cleared"),
            present: None,
        })
        .await
        .unwrap();

    gateway
        .upsert_registration_presence(student.id, event.id, true)
        .await
        .unwrap();

    let row = gateway
        .find_registration(student.id, event.id)
        .await
        .unwrap()
        .expect("row exists");
    assert_eq!(row.status, "cleared", "Status must survive a presence write");
    assert_eq!(row.present, Some(true));

    let all = gateway.registrations_for_event(event.id).await.unwrap();
    assert_eq!(all.len(), 1, "Upsert must not create a duplicate row");
}

#[tokio::test]
async fn test_upsert_presence_creates_blocked_row_when_absent() {
    let gateway = Gateway::new_in_memory();
    let student = seed_student(&gateway, "alice").await;
    let event = seed_event(&gateway, "Orientation").await;

    gateway
        .upsert_registration_presence(student.id, event.id, false)
        .await
        .unwrap();

    let row = gateway
        .find_registration(student.id, event.id)
        .await
        .unwrap()
        .expect("row created");
    assert_eq!(row.status, "blocked");
    assert_eq!(row.present, Some(false));
}

#[tokio::test]
async fn test_presence_reads_fail_without_present_column() {
    let gateway = Gateway::new_in_memory_with(MemoryOptions {
        present_column: false,
        ..MemoryOptions::default()
    });
    let event = seed_event(&gateway, "Orientation").await;

    let err = gateway
        .event_registrations(event.id, true)
        .await
        .unwrap_err();
    assert_eq!(err, GatewayError::MissingColumn(String::from("present")));
    assert!(err.is_missing_column());

    let degraded = gateway.event_registrations(event.id, false).await.unwrap();
    assert!(degraded.is_empty());
}

#[tokio::test]
async fn test_degraded_reads_hide_presence_values() {
    let gateway = Gateway::new_in_memory();
    let student = seed_student(&gateway, "alice").await;
    let event = seed_event(&gateway, "Orientation").await;
    gateway
        .insert_registration(NewStudentEvent {
            student_id: student.id,
            event_id: event.id,
            status: String::from("blocked"),
            present: Some(true),
        })
        .await
        .unwrap();

    let full = gateway.event_registrations(event.id, true).await.unwrap();
    assert_eq!(full[0].present, Some(true));

    let degraded = gateway.event_registrations(event.id, false).await.unwrap();
    assert_eq!(degraded[0].present, None);
    assert_eq!(degraded[0].status, "blocked");
}

#[tokio::test]
async fn test_junction_table_switch() {
    let gateway = Gateway::new_in_memory_with(MemoryOptions {
        event_organizations_table: false,
        ..MemoryOptions::default()
    });
    let err = gateway.insert_event_organization(1, 2).await.unwrap_err();
    assert_eq!(
        err,
        GatewayError::MissingTable(String::from("event_organizations"))
    );
    assert!(err.is_missing_table());
}

#[tokio::test]
async fn test_event_organization_column_switch() {
    let gateway = Gateway::new_in_memory_with(MemoryOptions {
        event_organization_column: false,
        ..MemoryOptions::default()
    });
    let event = seed_event(&gateway, "Orientation").await;
    let err = gateway
        .set_event_organization(event.id, 9)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        GatewayError::MissingColumn(String::from("organization_id"))
    );
}

#[tokio::test]
async fn test_injected_insert_failures_are_consumed_in_order() {
    let gateway = Gateway::new_in_memory_with(MemoryOptions {
        failing_registration_inserts: 1,
        ..MemoryOptions::default()
    });
    let student = seed_student(&gateway, "alice").await;
    let event = seed_event(&gateway, "Orientation").await;
    let rows = [blocked_registration(student.id, event.id)];

    let first = gateway.insert_registrations(&rows).await;
    assert!(first.is_err(), "First batch insert must fail");

    let second = gateway.insert_registrations(&rows).await.unwrap();
    assert_eq!(second, 1, "Second batch insert must succeed");
}

#[tokio::test]
async fn test_batch_status_update_counts_matched_rows() {
    let gateway = Gateway::new_in_memory();
    let a = seed_student(&gateway, "alice").await;
    let b = seed_student(&gateway, "bob").await;
    let event = seed_event(&gateway, "Orientation").await;
    gateway
        .insert_registrations(&[
            blocked_registration(a.id, event.id),
            blocked_registration(b.id, event.id),
        ])
        .await
        .unwrap();

    let updated = gateway
        .set_status_for_students(event.id, &[a.id], "cleared")
        .await
        .unwrap();
    assert_eq!(updated, 1);

    let rows = gateway
        .ledger_rows_for_students(event.id, &[a.id, b.id])
        .await
        .unwrap();
    let cleared: usize = rows.iter().filter(|r| r.status == "cleared").count();
    assert_eq!(cleared, 1);
}

#[tokio::test]
async fn test_accounts_round_trip() {
    let gateway = Gateway::new_in_memory();
    let account = gateway
        .create_account(NewAccount {
            email: String::from("leader@campus.test"),
            password: String::from("initial-secret"),
            full_name: Some(String::from("Lee Der")),
            role_id: 3,
        })
        .await
        .unwrap();

    gateway.update_account_role(&account.id, 1).await.unwrap();
    let accounts = gateway.list_accounts().await.unwrap();
    assert_eq!(accounts.len(), 1);
    assert_eq!(accounts[0].role_id, Some(1));

    gateway.delete_account(&account.id).await.unwrap();
    assert!(gateway.list_accounts().await.unwrap().is_empty());
    assert_eq!(
        gateway.delete_account(&account.id).await.unwrap_err(),
        GatewayError::RowNotFound
    );
}

#[tokio::test]
async fn test_organization_count_and_leader_ids() {
    let gateway = Gateway::new_in_memory();
    seed_organization(&gateway, "Chess Club").await;
    gateway
        .insert_organization(crate::NewOrganization {
            title: String::from("Debate Society"),
            leader_id: Some(String::from("acct-1")),
        })
        .await
        .unwrap();

    assert_eq!(gateway.count_organizations().await.unwrap(), 2);
    assert_eq!(
        gateway.assigned_leader_ids().await.unwrap(),
        vec![String::from("acct-1")]
    );
}
