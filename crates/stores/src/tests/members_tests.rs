// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for the organization members store.

use crate::tests::{
    create_test_session, create_test_session_with, seed_event, seed_membership,
    seed_organization, seed_student,
};
use clearance_gateway::MemberPatch;
use clearance_gateway::MemoryOptions;
use clearance_notify::NoticeLevel;

#[tokio::test]
async fn test_fetch_members_replaces_stale_cache() {
    let mut session = create_test_session();
    let org_a = seed_organization(&session, "Chess Club").await;
    let org_b = seed_organization(&session, "Debate Society").await;
    let student = seed_student(&session, "alice").await;
    seed_membership(&session, student.id, org_a.id).await;

    let members = session.members.fetch_members(org_a.id).await;
    assert_eq!(members.len(), 1);
    assert_eq!(session.members.current_organization, Some(org_a.id));

    let members = session.members.fetch_members(org_b.id).await;
    assert!(members.is_empty());
    assert!(
        session.members.members.is_empty(),
        "Switching organizations must not leave stale rows"
    );
    assert_eq!(session.members.current_organization, Some(org_b.id));
    assert!(!session.members.loading);
}

#[tokio::test]
async fn test_open_for_organization_fills_both_lists() {
    let mut session = create_test_session();
    let org = seed_organization(&session, "Chess Club").await;
    let member = seed_student(&session, "alice").await;
    seed_student(&session, "bob").await;
    seed_membership(&session, member.id, org.id).await;

    session.members.open_for_organization(org.id).await;

    assert_eq!(session.members.members.len(), 1);
    assert_eq!(session.members.available_students.len(), 1);
    assert_eq!(
        session.members.available_students[0].display_name, "bob",
        "Members must be excluded from the available list"
    );
}

#[tokio::test]
async fn test_available_students_display_name_falls_back_to_email() {
    let mut session = create_test_session();
    let org = seed_organization(&session, "Chess Club").await;
    session
        .gateway()
        .insert_student(clearance_gateway::NewStudent {
            user_id: None,
            role_id: Some(2),
            full_name: None,
            student_number: None,
            email: Some(String::from("noname@campus.test")),
            status: String::from("blocked"),
            organization_id: None,
        })
        .await
        .unwrap();

    session.members.fetch_available_students(org.id).await;

    assert_eq!(
        session.members.available_students[0].display_name,
        "noname@campus.test"
    );
}

#[tokio::test]
async fn test_add_member_requires_linking_ids() {
    let mut session = create_test_session();

    let added = session.members.add_member().await;

    assert!(!added);
    assert!(!session.members.saving, "Busy flag must reset on failure");
    let notices = session.notifier().drain();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Error);
    assert_eq!(notices[0].message, "Student and organization are required");
}

#[tokio::test]
async fn test_add_member_inserts_with_form_values() {
    let mut session = create_test_session();
    let org = seed_organization(&session, "Chess Club").await;
    let student = seed_student(&session, "alice").await;
    session.members.form.student_id = Some(student.id);
    session.members.form.organization_id = Some(org.id);
    session.members.form.status = clearance_domain::MembershipStatus::Pending;
    session.members.form.member_role = clearance_domain::MemberRole::Treasurer;
    session.members.form.notes = Some(String::from("joined at the fair"));

    let added = session.members.add_member().await;

    assert!(added);
    let members = session.members.fetch_members(org.id).await;
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].status, "pending");
    assert_eq!(members[0].member_role, "treasurer");
    assert_eq!(members[0].notes.as_deref(), Some("joined at the fair"));
}

#[tokio::test]
async fn test_update_and_remove_member() {
    let mut session = create_test_session();
    let org = seed_organization(&session, "Chess Club").await;
    let student = seed_student(&session, "alice").await;
    seed_membership(&session, student.id, org.id).await;
    let member_id = session.members.fetch_members(org.id).await[0].id;

    let updated = session
        .members
        .update_member(
            member_id,
            MemberPatch {
                status: Some(String::from("suspended")),
                member_role: None,
                notes: None,
            },
        )
        .await;
    assert!(updated);
    assert_eq!(
        session.members.fetch_members(org.id).await[0].status,
        "suspended"
    );

    let removed = session.members.remove_member(member_id).await;
    assert!(removed);
    assert!(session.members.fetch_members(org.id).await.is_empty());
}

#[tokio::test]
async fn test_member_stats_tally_statuses_and_roles() {
    let mut session = create_test_session();
    let org = seed_organization(&session, "Chess Club").await;
    for (name, status, role) in [
        ("alice", "active", "member"),
        ("bob", "active", "officer"),
        ("carol", "pending", "treasurer"),
        ("dave", "suspended", "vice_president"),
    ] {
        let student = seed_student(&session, name).await;
        session
            .gateway()
            .insert_member(clearance_gateway::NewOrganizationMember {
                student_id: student.id,
                organization_id: org.id,
                status: String::from(status),
                member_role: String::from(role),
                notes: None,
            })
            .await
            .unwrap();
    }

    let stats = session.members.member_stats(org.id).await.unwrap();

    assert_eq!(stats.total, 4);
    assert_eq!(stats.active, 2);
    assert_eq!(stats.pending, 1);
    assert_eq!(stats.inactive, 0);
    assert_eq!(stats.suspended, 1);
    assert_eq!(stats.roles.member, 1);
    assert_eq!(stats.roles.officer, 1);
    assert_eq!(stats.roles.treasurer, 1);
    assert_eq!(stats.roles.vice_president, 1);
}

#[tokio::test]
async fn test_block_all_members_delegation() {
    let mut session = create_test_session();
    let org = seed_organization(&session, "Chess Club").await;
    let s1 = seed_student(&session, "alice").await;
    let s2 = seed_student(&session, "bob").await;
    seed_membership(&session, s1.id, org.id).await;
    seed_membership(&session, s2.id, org.id).await;
    let event = seed_event(&session, "General Assembly", "2026-06-01").await;

    let report = session
        .members
        .block_all_members_for_event(org.id, event.id)
        .await;

    assert_eq!(report.created, 2);
    assert_eq!(report.updated, 0);
    assert!(!session.members.saving);
}

#[tokio::test]
async fn test_member_registrations_resolve_account_link() {
    let mut session = create_test_session();
    let student = seed_student(&session, "alice").await;
    let event = seed_event(&session, "Orientation", "2026-06-01").await;
    session
        .events
        .register_student(student.id, event.id)
        .await
        .unwrap();

    let rows = session.members.member_registrations("user-alice").await;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].event.as_ref().unwrap().title, "Orientation");

    let none = session.members.member_registrations("user-nobody").await;
    assert!(none.is_empty());
}

#[tokio::test]
async fn test_set_member_presence_failure_resets_flag() {
    let mut session = create_test_session_with(MemoryOptions {
        present_column: false,
        ..MemoryOptions::default()
    });
    let student = seed_student(&session, "alice").await;
    let event = seed_event(&session, "Orientation", "2026-06-01").await;

    let ok = session
        .members
        .set_member_presence(student.id, event.id, true)
        .await;

    assert!(!ok);
    assert!(!session.members.saving);
    assert_eq!(session.notifier().pending(), 1);
}

#[tokio::test]
async fn test_clear_resets_everything() {
    let mut session = create_test_session();
    let org = seed_organization(&session, "Chess Club").await;
    let student = seed_student(&session, "alice").await;
    seed_membership(&session, student.id, org.id).await;
    session.members.open_for_organization(org.id).await;
    session.members.form.student_id = Some(student.id);

    session.members.clear();

    assert!(session.members.members.is_empty());
    assert!(session.members.available_students.is_empty());
    assert_eq!(session.members.current_organization, None);
    assert_eq!(session.members.form.student_id, None);
}
