// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for the students store.

use crate::tests::{create_test_session, seed_organization, seed_student};
use clearance_gateway::NewStudent;

#[tokio::test]
async fn test_fetch_students_resolves_organization_title() {
    let mut session = create_test_session();
    let org = seed_organization(&session, "Chess Club").await;
    session
        .gateway()
        .insert_student(NewStudent {
            user_id: None,
            role_id: Some(2),
            full_name: Some(String::from("alice")),
            student_number: None,
            email: None,
            status: String::from("active"),
            organization_id: Some(org.id),
        })
        .await
        .unwrap();
    seed_student(&session, "bob").await;

    let listings = session.students.fetch_students().await;

    assert_eq!(listings.len(), 2);
    let alice = listings.iter().find(|s| s.full_name.as_deref() == Some("alice")).unwrap();
    assert_eq!(alice.organization, "Chess Club");
    let bob = listings.iter().find(|s| s.full_name.as_deref() == Some("bob")).unwrap();
    assert_eq!(bob.organization, "N/A", "No affiliation displays as N/A");
}

#[tokio::test]
async fn test_student_stats_count_by_status() {
    let session = create_test_session();
    for (name, status) in [
        ("alice", "Active"),
        ("bob", "blocked"),
        ("carol", "blocked"),
        ("dave", "suspended"),
    ] {
        session
            .gateway()
            .insert_student(NewStudent {
                user_id: None,
                role_id: Some(2),
                full_name: Some(String::from(name)),
                student_number: None,
                email: None,
                status: String::from(status),
                organization_id: None,
            })
            .await
            .unwrap();
    }

    let stats = session.students.student_stats().await.unwrap();

    assert_eq!(stats.total, 4);
    assert_eq!(stats.active, 1);
    assert_eq!(stats.blocked, 2);
}

#[tokio::test]
async fn test_update_student_status_refreshes_the_cache() {
    let mut session = create_test_session();
    let student = seed_student(&session, "alice").await;
    session.students.fetch_students().await;

    let updated = session
        .students
        .update_student_status(student.id, "cleared")
        .await;

    assert!(updated);
    assert!(!session.students.saving);
    assert_eq!(
        session.students.students[0].status.as_deref(),
        Some("cleared")
    );
    let row = session
        .gateway()
        .list_students()
        .await
        .unwrap()
        .into_iter()
        .find(|s| s.id == student.id)
        .unwrap();
    assert_eq!(row.status.as_deref(), Some("cleared"));
}
