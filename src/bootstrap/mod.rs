//! # Bootstrap
//!
//! The idempotent provisioning run. Every ensurer takes an immutable input,
//! talks to the identity service through [`IdentityService`](crate::identity::IdentityService)
//! and returns what it ensured. [`Bootstrapper`] sequences them.
//!
//! - [`waiter`]: waits for the bootstrap token
//! - [`project`], [`application`], [`users`], [`providers`]: resource ensurers
//! - [`secret`]: persists the client credentials

pub mod application;
mod error;
mod orchestrator;
pub mod project;
pub mod providers;
pub mod secret;
pub mod users;
pub mod waiter;

pub use error::BootstrapError;
pub use orchestrator::{BootstrapReport, Bootstrapper};
pub use secret::{CredentialsTarget, SecretAction};
