//! ZITADEL Init Library
//!
//! This library provides the bootstrap reconciler that provisions a project,
//! an OIDC application, static users and external identity providers in
//! ZITADEL and stores the resulting client credentials in a Kubernetes secret.
//!
//! ## Quick Start
//!
//! ```rust
//! use zitadel_init::prelude::*;
//! ```
//!
//! The run is safe to repeat: every step either creates a resource or detects
//! that it already exists and switches to a lookup or update.

pub mod bootstrap;
pub mod config;
pub mod constants;
pub mod identity;
pub mod observability;
pub mod prelude;
pub mod runtime;
pub mod store;
