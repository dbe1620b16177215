// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! UI state containers for the clearance tracking console.
//!
//! Each store owns the reactive state behind one slice of the console:
//! cached row sets, busy flags, and form fields, plus the actions that
//! mutate them through gateway calls. Stores are explicitly constructed
//! context objects wired together by [`AdminSession`] — there are no
//! process-wide singletons.
//!
//! Store actions never propagate errors: they check every gateway result,
//! log and push a user-facing notice on failure, and return a sentinel
//! (`false`, `None`, an empty list, zero counts). Busy flags are advisory —
//! the UI disables duplicate-trigger controls while one is set, but nothing
//! here prevents a re-entrant call, and an issued remote call cannot be
//! cancelled.

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

mod accounts;
mod events;
mod members;
mod organizations;
mod session;
mod students;

#[cfg(test)]
mod tests;

pub use accounts::{AccountsStore, DirectoryEntry, RegisterStudentRequest, directory_status};
pub use events::{EventForm, EventStats, EventsStore};
pub use members::{AvailableStudent, MemberForm, MemberStats, MembersStore, RoleTally};
pub use organizations::{
    LeaderListing, OrganizationForm, OrganizationListing, OrganizationsStore,
};
pub use session::{AdminSession, init_tracing};
pub use students::{StudentListing, StudentStats, StudentsStore};
