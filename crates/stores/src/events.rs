// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Events store.
//!
//! Besides plain event CRUD, `create_event` is the entry point of the
//! consistency workflow: creating an event for an organization runs the
//! bulk blocking workflow against the organization id supplied by the
//! caller, then records the event ↔ organization association best effort.

use clearance_core::{attach_event_to_organization, block_all_members_for_event};
use clearance_domain::{validate_event_date, validate_event_title};
use clearance_gateway::{
    EventPatch, EventRow, Gateway, NewEvent, StudentEventRow,
};
use clearance_notify::Notifier;
use std::sync::Arc;
use time::{Date, OffsetDateTime};

/// Form state for creating an event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventForm {
    pub title: String,
    /// ISO 8601 calendar date (`YYYY-MM-DD`).
    pub date: Option<String>,
    /// Organization whose members are blocked for the new event.
    pub organization_id: Option<i64>,
}

/// Aggregate event statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventStats {
    pub total: usize,
    pub upcoming: usize,
    pub completed: usize,
    pub cancelled: usize,
}

/// State container for event management.
pub struct EventsStore {
    gateway: Arc<Gateway>,
    notifier: Notifier,
    pub loading: bool,
    pub saving: bool,
    pub deleting: bool,
    pub events: Vec<EventRow>,
    pub form: EventForm,
}

impl EventsStore {
    /// Creates a new store bound to a gateway and notifier.
    #[must_use]
    pub fn new(gateway: Arc<Gateway>, notifier: Notifier) -> Self {
        Self {
            gateway,
            notifier,
            loading: false,
            saving: false,
            deleting: false,
            events: Vec::new(),
            form: EventForm::default(),
        }
    }

    /// Fetches all events, newest first.
    pub async fn fetch_events(&mut self) -> Vec<EventRow> {
        self.loading = true;
        let result = self.gateway.list_events().await;
        self.loading = false;
        match result {
            Ok(events) => {
                self.events = events.clone();
                events
            }
            Err(err) => {
                self.notifier
                    .error(format!("Failed to fetch events: {err}"));
                Vec::new()
            }
        }
    }

    /// Fetches one event; an unknown id is `None`, not an error.
    pub async fn fetch_event(&self, event_id: i64) -> Option<EventRow> {
        match self.gateway.fetch_event(event_id).await {
            Ok(event) => event,
            Err(err) => {
                self.notifier
                    .error(format!("Failed to fetch event: {err}"));
                None
            }
        }
    }

    /// Creates an event from the form.
    ///
    /// When the form names an organization, every current member of that
    /// organization gets a `blocked` ledger row for the new event, and the
    /// association is then recorded best effort (absent schema is logged
    /// and swallowed). The blocking workflow uses the organization id from
    /// the form directly, so it succeeds whether or not the association
    /// writes do.
    pub async fn create_event(&mut self) -> Option<EventRow> {
        if let Err(err) = validate_event_title(&self.form.title) {
            self.notifier.error(err.to_string());
            return None;
        }
        if let Some(date) = &self.form.date
            && let Err(err) = validate_event_date(date, today())
        {
            self.notifier.error(err.to_string());
            return None;
        }

        self.saving = true;
        let created: EventRow = match self
            .gateway
            .insert_event(NewEvent {
                title: self.form.title.trim().to_string(),
                date: self.form.date.clone(),
            })
            .await
        {
            Ok(event) => event,
            Err(err) => {
                self.saving = false;
                self.notifier
                    .error(format!("Failed to create event: {err}"));
                return None;
            }
        };

        if let Some(organization_id) = self.form.organization_id {
            let report = block_all_members_for_event(
                &self.gateway,
                &self.notifier,
                organization_id,
                created.id,
            )
            .await;
            tracing::info!(
                event_id = created.id,
                organization_id,
                created = report.created,
                updated = report.updated,
                "blocked organization members for new event"
            );
            attach_event_to_organization(&self.gateway, created.id, organization_id).await;
        }

        self.saving = false;
        self.notifier.success("Event created successfully!");
        self.events.insert(0, created.clone());
        Some(created)
    }

    /// Updates an event's title and date.
    pub async fn update_event(&mut self, event_id: i64, patch: EventPatch) -> Option<EventRow> {
        if let Some(title) = &patch.title
            && let Err(err) = validate_event_title(title)
        {
            self.notifier.error(err.to_string());
            return None;
        }

        self.saving = true;
        let result = self.gateway.update_event(event_id, &patch).await;
        self.saving = false;
        match result {
            Ok(updated) => {
                if let Some(cached) = self.events.iter_mut().find(|e| e.id == event_id) {
                    *cached = updated.clone();
                }
                self.notifier.success("Event updated successfully!");
                Some(updated)
            }
            Err(err) => {
                self.notifier
                    .error(format!("Failed to update event: {err}"));
                None
            }
        }
    }

    /// Deletes an event.
    pub async fn delete_event(&mut self, event_id: i64) -> bool {
        self.deleting = true;
        let result = self.gateway.delete_event(event_id).await;
        self.deleting = false;
        match result {
            Ok(()) => {
                self.events.retain(|e| e.id != event_id);
                self.notifier.success("Event deleted successfully!");
                true
            }
            Err(err) => {
                self.notifier
                    .error(format!("Failed to delete event: {err}"));
                false
            }
        }
    }

    /// Computes aggregate event statistics.
    ///
    /// An event whose registrations are all `cancelled` counts as
    /// cancelled; otherwise its date decides completed versus upcoming,
    /// and an event without a date lands in neither bucket.
    pub async fn event_stats(&self) -> Option<EventStats> {
        let summaries = match self.gateway.events_with_registration_statuses().await {
            Ok(summaries) => summaries,
            Err(err) => {
                tracing::error!("Failed to fetch event stats: {err}");
                return None;
            }
        };

        let today: String = today_iso();
        let mut stats: EventStats = EventStats {
            total: summaries.len(),
            ..EventStats::default()
        };
        for summary in &summaries {
            let all_cancelled: bool = !summary.statuses.is_empty()
                && summary.statuses.iter().all(|s| s == "cancelled");
            if all_cancelled {
                stats.cancelled += 1;
            } else if let Some(date) = &summary.date {
                if *date < today {
                    stats.completed += 1;
                } else {
                    stats.upcoming += 1;
                }
            }
        }
        Some(stats)
    }

    /// Fetches one event's raw ledger rows, newest first.
    pub async fn registrations(&self, event_id: i64) -> Vec<StudentEventRow> {
        match self.gateway.registrations_for_event(event_id).await {
            Ok(rows) => rows,
            Err(err) => {
                self.notifier
                    .error(format!("Failed to fetch event registrations: {err}"));
                Vec::new()
            }
        }
    }

    /// Registers one student for one event.
    pub async fn register_student(
        &mut self,
        student_id: i64,
        event_id: i64,
    ) -> Option<StudentEventRow> {
        self.saving = true;
        let result = clearance_core::register_student(&self.gateway, student_id, event_id).await;
        self.saving = false;
        match result {
            Ok(row) => Some(row),
            Err(err) => {
                self.notifier
                    .error(format!("Failed to register student for event: {err}"));
                None
            }
        }
    }

    /// Removes one student's registration from one event.
    pub async fn unregister_student(&mut self, student_id: i64, event_id: i64) -> bool {
        self.deleting = true;
        let result = clearance_core::unregister_student(&self.gateway, student_id, event_id).await;
        self.deleting = false;
        match result {
            Ok(()) => true,
            Err(err) => {
                self.notifier
                    .error(format!("Failed to unregister student from event: {err}"));
                false
            }
        }
    }

    /// Sets the status of one registration.
    pub async fn update_registration_status(
        &mut self,
        student_id: i64,
        event_id: i64,
        status: &str,
    ) -> bool {
        self.saving = true;
        let result =
            clearance_core::set_registration_status(&self.gateway, student_id, event_id, status)
                .await;
        self.saving = false;
        match result {
            Ok(()) => true,
            Err(err) => {
                self.notifier
                    .error(format!("Failed to update student event status: {err}"));
                false
            }
        }
    }

    /// Checks whether a student is registered for an event.
    pub async fn is_student_registered(&self, student_id: i64, event_id: i64) -> bool {
        match clearance_core::is_student_registered(&self.gateway, student_id, event_id).await {
            Ok(registered) => registered,
            Err(err) => {
                self.notifier
                    .error(format!("Failed to check student registration: {err}"));
                false
            }
        }
    }

    /// Registers many students for one event in a single batch.
    pub async fn bulk_register(&mut self, student_ids: &[i64], event_id: i64) -> u64 {
        self.saving = true;
        let result =
            clearance_core::bulk_register_students(&self.gateway, student_ids, event_id).await;
        self.saving = false;
        match result {
            Ok(created) => created,
            Err(err) => {
                self.notifier
                    .error(format!("Failed to bulk register students: {err}"));
                0
            }
        }
    }

    /// Resets the event form.
    pub fn reset_form(&mut self) {
        self.form = EventForm::default();
    }

    /// Clears cached event data.
    pub fn clear(&mut self) {
        self.events.clear();
        self.reset_form();
    }
}

fn today() -> Date {
    OffsetDateTime::now_utc().date()
}

fn today_iso() -> String {
    let date: Date = today();
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}
