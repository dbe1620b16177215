// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod blocking_tests;

use clearance_gateway::{
    EventRow, Gateway, NewEvent, NewOrganization, NewOrganizationMember, NewStudent,
    OrganizationRow, StudentRow,
};
use clearance_notify::Notifier;

pub fn create_test_notifier() -> Notifier {
    Notifier::new()
}

pub async fn create_test_student(gateway: &Gateway, name: &str) -> StudentRow {
    gateway
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

pub async fn create_test_organization(gateway: &Gateway, title: &str) -> OrganizationRow {
    gateway
        .insert_organization(NewOrganization {
            title: title.to_string(),
            leader_id: None,
        })
        .await
        .expect("organization insert should succeed")
}

pub async fn create_test_event(gateway: &Gateway, title: &str) -> EventRow {
    gateway
        .insert_event(NewEvent {
            title: title.to_string(),
            date: Some(String::from("2026-06-01")),
        })
        .await
        .expect("event insert should succeed")
}

pub async fn create_test_membership(gateway: &Gateway, student_id: i64, organization_id: i64) {
    gateway
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
