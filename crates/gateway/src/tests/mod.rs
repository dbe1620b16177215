// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod memory_tests;

use crate::rows::{NewEvent, NewOrganization, NewStudent, NewStudentEvent};
use crate::{EventRow, Gateway, OrganizationRow, StudentRow};

pub async fn seed_student(gateway: &Gateway, name: &str) -> StudentRow {
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

pub async fn seed_organization(gateway: &Gateway, title: &str) -> OrganizationRow {
    gateway
        .insert_organization(NewOrganization {
            title: title.to_string(),
            leader_id: None,
        })
        .await
        .expect("organization insert should succeed")
}

pub async fn seed_event(gateway: &Gateway, title: &str) -> EventRow {
    gateway
        .insert_event(NewEvent {
            title: title.to_string(),
            date: Some(String::from("2026-06-01")),
        })
        .await
        .expect("event insert should succeed")
}

pub fn blocked_registration(student_id: i64, event_id: i64) -> NewStudentEvent {
    NewStudentEvent {
        student_id,
        event_id,
        status: String::from("blocked"),
        present: None,
    }
}
