// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Represents the status of an organization membership.
///
/// Membership status is a fixed vocabulary stored as lowercase strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MembershipStatus {
    /// Member in good standing.
    #[default]
    Active,
    /// Member who has left or lapsed.
    Inactive,
    /// Membership awaiting approval.
    Pending,
    /// Membership suspended by the organization.
    Suspended,
}

impl FromStr for MembershipStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            "pending" => Ok(Self::Pending),
            "suspended" => Ok(Self::Suspended),
            _ => Err(DomainError::InvalidMembershipStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for MembershipStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl MembershipStatus {
    /// All membership statuses in display order.
    pub const ALL: [Self; 4] = [Self::Active, Self::Pending, Self::Inactive, Self::Suspended];

    /// Converts this status to its stored string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Pending => "pending",
            Self::Suspended => "suspended",
        }
    }

    /// Returns the human-readable title for this status.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
            Self::Pending => "Pending",
            Self::Suspended => "Suspended",
        }
    }

    /// Returns the display color name used by selection controls.
    ///
    /// Unknown raw values fall back to `"grey"` at the call site.
    #[must_use]
    pub const fn color_name(&self) -> &'static str {
        match self {
            Self::Active => "success",
            Self::Inactive => "grey",
            Self::Pending => "warning",
            Self::Suspended => "error",
        }
    }

    /// Returns the icon label used by selection controls.
    #[must_use]
    pub const fn icon(&self) -> &'static str {
        match self {
            Self::Active => "mdi-check-circle",
            Self::Inactive => "mdi-minus-circle",
            Self::Pending => "mdi-clock",
            Self::Suspended => "mdi-alert-circle",
        }
    }

    /// Checks whether a raw string is part of the fixed vocabulary.
    #[must_use]
    pub fn is_valid(value: &str) -> bool {
        value.parse::<Self>().is_ok()
    }
}

/// Represents a member's role within an organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MemberRole {
    /// Regular organization member.
    #[default]
    Member,
    /// Organization officer with special responsibilities.
    Officer,
    /// Handles documentation and communications.
    Secretary,
    /// Manages organization finances.
    Treasurer,
    /// Second-in-command of the organization.
    VicePresident,
}

impl FromStr for MemberRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "member" => Ok(Self::Member),
            "officer" => Ok(Self::Officer),
            "secretary" => Ok(Self::Secretary),
            "treasurer" => Ok(Self::Treasurer),
            "vice_president" => Ok(Self::VicePresident),
            _ => Err(DomainError::InvalidMemberRole(s.to_string())),
        }
    }
}

impl std::fmt::Display for MemberRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl MemberRole {
    /// All member roles in display order.
    pub const ALL: [Self; 5] = [
        Self::Member,
        Self::Officer,
        Self::Secretary,
        Self::Treasurer,
        Self::VicePresident,
    ];

    /// Converts this role to its stored string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Member => "member",
            Self::Officer => "officer",
            Self::Secretary => "secretary",
            Self::Treasurer => "treasurer",
            Self::VicePresident => "vice_president",
        }
    }

    /// Returns the human-readable title for this role.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Member => "Member",
            Self::Officer => "Officer",
            Self::Secretary => "Secretary",
            Self::Treasurer => "Treasurer",
            Self::VicePresident => "Vice President",
        }
    }

    /// Returns the descriptive text for this role.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Member => "Regular organization member",
            Self::Officer => "Organization officer with special responsibilities",
            Self::Secretary => "Handles documentation and communications",
            Self::Treasurer => "Manages organization finances",
            Self::VicePresident => "Second-in-command of the organization",
        }
    }

    /// Checks whether a raw string is part of the fixed vocabulary.
    #[must_use]
    pub fn is_valid(value: &str) -> bool {
        value.parse::<Self>().is_ok()
    }
}

/// Classification of a ledger row status string.
///
/// Ledger statuses are free-form on the wire. `blocked` and `cleared` are
/// recognized case-insensitively; everything else passes through untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationStatus {
    /// The student is barred from clearance until resolved.
    Blocked,
    /// The student has satisfied the event's requirement.
    Cleared,
    /// Any other status value, preserved verbatim.
    Other(String),
}

impl RegistrationStatus {
    /// The canonical stored form of the blocked status.
    pub const BLOCKED: &'static str = "blocked";
    /// The canonical stored form of the cleared status.
    pub const CLEARED: &'static str = "cleared";

    /// Classifies a raw status string.
    #[must_use]
    pub fn classify(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case(Self::BLOCKED) {
            Self::Blocked
        } else if raw.eq_ignore_ascii_case(Self::CLEARED) {
            Self::Cleared
        } else {
            Self::Other(raw.to_string())
        }
    }

    /// Returns whether a raw status string means blocked.
    #[must_use]
    pub fn is_blocked(raw: &str) -> bool {
        raw.eq_ignore_ascii_case(Self::BLOCKED)
    }

    /// Returns whether a raw status string means cleared.
    #[must_use]
    pub fn is_cleared(raw: &str) -> bool {
        raw.eq_ignore_ascii_case(Self::CLEARED)
    }
}

/// Account roles carried in the authentication subsystem's user metadata.
///
/// Role identifiers are stable small integers assigned by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountRole {
    /// System administrator.
    Admin,
    /// Student account, linked to a `students` row.
    Student,
    /// Leader of one organization.
    OrganizationLeader,
}

impl AccountRole {
    /// Resolves an account role from its numeric identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the identifier is not a known role.
    pub const fn from_id(id: i64) -> Result<Self, DomainError> {
        match id {
            1 => Ok(Self::Admin),
            2 => Ok(Self::Student),
            3 => Ok(Self::OrganizationLeader),
            _ => Err(DomainError::InvalidAccountRole(id)),
        }
    }

    /// Returns the numeric identifier for this role.
    #[must_use]
    pub const fn id(&self) -> i64 {
        match self {
            Self::Admin => 1,
            Self::Student => 2,
            Self::OrganizationLeader => 3,
        }
    }

    /// Returns the human-readable label for this role.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Student => "Student",
            Self::OrganizationLeader => "Organization Leader",
        }
    }

    /// Returns the display color name for this role.
    #[must_use]
    pub const fn color_name(&self) -> &'static str {
        match self {
            Self::Admin => "red",
            Self::Student => "blue",
            Self::OrganizationLeader => "green",
        }
    }
}

impl std::fmt::Display for AccountRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
