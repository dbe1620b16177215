// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Presence recording.

use clearance_gateway::Gateway;
use clearance_notify::Notifier;

/// Records whether a student was physically present at an event,
/// independent of their block/clear status.
///
/// The write is an upsert keyed on the (student, event) pair: an existing
/// ledger row has only its presence flag changed, and a missing row is
/// created with status `blocked` and the requested flag. Two concurrent
/// first-time toggles for the same pair converge to a single row.
///
/// Returns `true` on success. Failures are logged and reported to the user,
/// never thrown; the UI may retry safely.
pub async fn set_presence(
    gateway: &Gateway,
    notifier: &Notifier,
    student_id: i64,
    event_id: i64,
    present: bool,
) -> bool {
    match gateway
        .upsert_registration_presence(student_id, event_id, present)
        .await
    {
        Ok(()) => {
            tracing::debug!(student_id, event_id, present, "presence recorded");
            true
        }
        Err(err) => {
            notifier.error(format!("Failed to record presence: {err}"));
            false
        }
    }
}
