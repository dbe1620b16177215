// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Session context.
//!
//! One [`AdminSession`] per UI session owns the gateway connection, the
//! notifier, and every store. The embedding UI constructs it at sign-in and
//! tears it down at sign-out; nothing in this workspace is a process-wide
//! singleton.

use crate::accounts::AccountsStore;
use crate::events::EventsStore;
use crate::members::MembersStore;
use crate::organizations::OrganizationsStore;
use crate::students::StudentsStore;
use clearance_gateway::Gateway;
use clearance_notify::Notifier;
use std::sync::Arc;

/// Dependency-injected context for one console session.
pub struct AdminSession {
    gateway: Arc<Gateway>,
    notifier: Notifier,
    pub members: MembersStore,
    pub events: EventsStore,
    pub students: StudentsStore,
    pub organizations: OrganizationsStore,
    pub accounts: AccountsStore,
}

impl AdminSession {
    /// Wires a session around one gateway connection.
    #[must_use]
    pub fn new(gateway: Gateway) -> Self {
        let gateway: Arc<Gateway> = Arc::new(gateway);
        let notifier: Notifier = Notifier::new();
        Self {
            members: MembersStore::new(Arc::clone(&gateway), notifier.clone()),
            events: EventsStore::new(Arc::clone(&gateway), notifier.clone()),
            students: StudentsStore::new(Arc::clone(&gateway), notifier.clone()),
            organizations: OrganizationsStore::new(Arc::clone(&gateway), notifier.clone()),
            accounts: AccountsStore::new(Arc::clone(&gateway), notifier.clone()),
            gateway,
            notifier,
        }
    }

    /// Returns the session's gateway.
    #[must_use]
    pub fn gateway(&self) -> &Gateway {
        &self.gateway
    }

    /// Returns the session's notifier, for draining pending notices.
    #[must_use]
    pub const fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    /// Clears every store and drops pending notices, for sign-out.
    pub fn teardown(&mut self) {
        self.members.clear();
        self.events.clear();
        self.students.clear();
        self.organizations.clear();
        self.accounts.clear();
        let _ = self.notifier.drain();
        tracing::info!("admin session torn down");
    }
}

/// Initializes the global tracing subscriber for the embedding application.
///
/// Filter from `RUST_LOG`, defaulting to `info`.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}
