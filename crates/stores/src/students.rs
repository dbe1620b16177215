// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Students store.

use clearance_gateway::Gateway;
use clearance_notify::Notifier;
use std::sync::Arc;

/// One row of the student directory, with the organization title resolved
/// for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentListing {
    pub id: i64,
    pub full_name: Option<String>,
    pub student_number: Option<String>,
    pub email: Option<String>,
    pub status: Option<String>,
    pub organization_id: Option<i64>,
    /// Organization title, or `"N/A"` when the student has none.
    pub organization: String,
}

/// Aggregate student statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StudentStats {
    pub total: usize,
    pub active: usize,
    pub blocked: usize,
}

/// State container for the student directory.
pub struct StudentsStore {
    gateway: Arc<Gateway>,
    notifier: Notifier,
    pub loading: bool,
    pub saving: bool,
    pub students: Vec<StudentListing>,
}

impl StudentsStore {
    /// Creates a new store bound to a gateway and notifier.
    #[must_use]
    pub fn new(gateway: Arc<Gateway>, notifier: Notifier) -> Self {
        Self {
            gateway,
            notifier,
            loading: false,
            saving: false,
            students: Vec::new(),
        }
    }

    /// Fetches the student directory with organization titles resolved.
    pub async fn fetch_students(&mut self) -> Vec<StudentListing> {
        self.loading = true;
        let result = self.gateway.list_students_with_organization().await;
        self.loading = false;
        match result {
            Ok(rows) => {
                let listings: Vec<StudentListing> = rows
                    .into_iter()
                    .map(|row| StudentListing {
                        id: row.id,
                        full_name: row.full_name,
                        student_number: row.student_number,
                        email: row.email,
                        status: row.status,
                        organization_id: row.organization_id,
                        organization: row
                            .organization_title
                            .unwrap_or_else(|| String::from("N/A")),
                    })
                    .collect();
                self.students = listings.clone();
                listings
            }
            Err(err) => {
                self.notifier
                    .error(format!("Failed to fetch students: {err}"));
                Vec::new()
            }
        }
    }

    /// Computes aggregate student statistics.
    pub async fn student_stats(&self) -> Option<StudentStats> {
        let students = match self.gateway.list_students().await {
            Ok(students) => students,
            Err(err) => {
                tracing::error!("Failed to fetch student stats: {err}");
                return None;
            }
        };

        let mut stats: StudentStats = StudentStats {
            total: students.len(),
            ..StudentStats::default()
        };
        for student in &students {
            match student.status.as_deref() {
                Some(status) if status.eq_ignore_ascii_case("active") => stats.active += 1,
                Some(status) if status.eq_ignore_ascii_case("blocked") => stats.blocked += 1,
                _ => {}
            }
        }
        Some(stats)
    }

    /// Updates one student's lifecycle status.
    pub async fn update_student_status(&mut self, student_id: i64, status: &str) -> bool {
        self.saving = true;
        let result = self.gateway.update_student_status(student_id, status).await;
        self.saving = false;
        match result {
            Ok(()) => {
                if let Some(cached) = self.students.iter_mut().find(|s| s.id == student_id) {
                    cached.status = Some(status.to_string());
                }
                self.notifier.success("Student status updated successfully!");
                true
            }
            Err(err) => {
                self.notifier
                    .error(format!("Failed to update student status: {err}"));
                false
            }
        }
    }

    /// Clears cached student data.
    pub fn clear(&mut self) {
        self.students.clear();
    }
}
