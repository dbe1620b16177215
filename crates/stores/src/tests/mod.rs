// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod members_tests;
mod students_tests;

use crate::session::AdminSession;
use clearance_gateway::{
    EventRow, Gateway, MemoryOptions, NewAccount, NewEvent, NewOrganization,
    NewOrganizationMember, NewStudent, OrganizationRow, StudentRow,
};

pub fn create_test_session() -> AdminSession {
    AdminSession::new(Gateway::new_in_memory())
}

pub fn create_test_session_with(options: MemoryOptions) -> AdminSession {
    AdminSession::new(Gateway::new_in_memory_with(options))
}

pub async fn seed_student(session: &AdminSession, name: &str) -> StudentRow {
    session
        .gateway()
        .insert_student(NewStudent {
            user_id: Some(format!("user-{name}")),
            role_id: Some(2),
            full_name: Some(name.to_string()),
            student_number: Some(format!("S-{name}")),
            email: Some(format!("{name}@campus.test")),
            status: String::from("blocked"),
            organization_id: None,
        })
        .await
        .expect("student insert should succeed")
}

pub async fn seed_organization(session: &AdminSession, title: &str) -> OrganizationRow {
    session
        .gateway()
        .insert_organization(NewOrganization {
            title: title.to_string(),
            leader_id: None,
        })
        .await
        .expect("organization insert should succeed")
}

pub async fn seed_membership(session: &AdminSession, student_id: i64, organization_id: i64) {
    session
        .gateway()
        .insert_member(NewOrganizationMember {
            student_id,
            organization_id,
            status: String::from("active"),
            member_role: String::from("member"),
            notes: None,
        })
        .await
        .expect("membership insert should succeed");
}

pub async fn seed_event(session: &AdminSession, title: &str, date: &str) -> EventRow {
    session
        .gateway()
        .insert_event(NewEvent {
            title: title.to_string(),
            date: Some(date.to_string()),
        })
        .await
        .expect("event insert should succeed")
}

pub async fn seed_account(session: &AdminSession, email: &str, role_id: i64) -> String {
    session
        .gateway()
        .create_account(NewAccount {
            email: email.to_string(),
            password: String::from("initial-secret"),
            full_name: Some(email.split('@').next().unwrap_or(email).to_string()),
            role_id,
        })
        .await
        .expect("account creation should succeed")
        .id
}
