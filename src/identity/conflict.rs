//! # Conflict Signals
//!
//! ZITADEL is not consistent in how it reports that a resource already exists:
//! projects and applications answer `AlreadyExists`, while creating a user
//! whose username is taken answers `FailedPrecondition`. The quirks are kept
//! in one table instead of being spread across the ensurers.

use super::{ErrorCode, IdentityError};
use std::collections::HashMap;
use std::fmt;

/// Kinds of resources the bootstrap run creates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Project,
    Application,
    User,
    IdentityProvider,
    LoginPolicyProvider,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Project => "project",
            Self::Application => "application",
            Self::User => "user",
            Self::IdentityProvider => "identity provider",
            Self::LoginPolicyProvider => "login policy provider",
        })
    }
}

/// Error codes that mean "already exists", per resource kind
#[derive(Debug, Clone)]
pub struct ConflictSignals {
    table: HashMap<ResourceKind, Vec<ErrorCode>>,
}

impl Default for ConflictSignals {
    fn default() -> Self {
        Self::zitadel()
    }
}

impl ConflictSignals {
    /// Signals observed on ZITADEL v2
    #[must_use]
    pub fn zitadel() -> Self {
        Self::empty()
            .with(ResourceKind::Project, &[ErrorCode::AlreadyExists])
            .with(ResourceKind::Application, &[ErrorCode::AlreadyExists])
            .with(
                ResourceKind::User,
                &[ErrorCode::AlreadyExists, ErrorCode::FailedPrecondition],
            )
            .with(ResourceKind::IdentityProvider, &[ErrorCode::AlreadyExists])
            .with(ResourceKind::LoginPolicyProvider, &[ErrorCode::AlreadyExists])
    }

    /// A table without any signals; every error is a failure
    #[must_use]
    pub fn empty() -> Self {
        Self {
            table: HashMap::new(),
        }
    }

    /// Replace the signals of one resource kind
    #[must_use]
    pub fn with(mut self, kind: ResourceKind, codes: &[ErrorCode]) -> Self {
        self.table.insert(kind, codes.to_vec());
        self
    }

    /// Whether `error` means the resource of `kind` already exists
    #[must_use]
    pub fn is_conflict(&self, kind: ResourceKind, error: &IdentityError) -> bool {
        let Some(code) = error.code() else {
            return false;
        };
        self.table
            .get(&kind)
            .is_some_and(|codes| codes.contains(&code))
    }
}

/// Whether an update was rejected only because it would not change anything
#[must_use]
pub fn is_no_op_update(error: &IdentityError) -> bool {
    if error.code() != Some(ErrorCode::FailedPrecondition) {
        return false;
    }
    let message = error.message().to_lowercase();
    message.contains("no changes") || message.contains("nochanges")
}
