//! # Prelude
//!
//! Re-exports commonly used types and traits for convenience.
//!
//! ## Usage
//!
//! ```rust
//! use zitadel_init::prelude::*;
//! ```
//!
//! This brings into scope:
//! - The collaborator traits (`IdentityService`, `SecretStore`)
//! - The orchestrator and its report and error types
//! - Descriptor and runtime configuration types

// Collaborator traits - needed for implementing backends and test doubles
pub use crate::identity::{IdentityError, IdentityService};
pub use crate::store::{Mutation, SecretData, SecretStore, SecretStoreError, WriteOutcome};

// Orchestration - core bootstrap functionality
pub use crate::bootstrap::{
    BootstrapError, BootstrapReport, Bootstrapper, CredentialsTarget, SecretAction,
};
pub use crate::bootstrap::waiter::{wait_for_token, WaitError};

// Config types - descriptor and runtime settings
pub use crate::config::{BootstrapDescriptor, ConfigError, Settings};
