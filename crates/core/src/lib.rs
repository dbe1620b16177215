// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Event and membership consistency workflow.
//!
//! The remote gateway offers no cross-table transaction: each call is one
//! independent round trip. The procedures in this crate keep organization
//! membership, event registration, and block/clear status mutually
//! consistent anyway, by being designed to converge under partial failure:
//!
//! - the bulk blocking workflow partitions its targets into disjoint
//!   insert/update sets, each naturally idempotent, so re-running after a
//!   partial failure reaches the same fixed point;
//! - presence recording goes through an upsert keyed on the
//!   (student, event) pair, so racing first-time writes converge to one row;
//! - reads that name optional columns retry without them, so schema drift
//!   degrades quietly instead of failing callers.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod blocking;
mod error;
mod ledger;
mod presence;

#[cfg(test)]
mod tests;

pub use blocking::{BulkBlockReport, attach_event_to_organization, block_all_members_for_event};
pub use error::CoreError;
pub use ledger::{
    bulk_register_students, events_for_organization, is_student_registered, register_student,
    registrations_for_account, registrations_for_event, registrations_for_student,
    set_registration_status, unregister_student,
};
pub use presence::set_presence;
