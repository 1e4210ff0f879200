//! # Configuration
//!
//! Two layers of configuration feed a bootstrap run:
//!
//! - [`Settings`]: runtime parameters (endpoint, TLS flags, secret names) taken
//!   from command-line flags with environment variable fallbacks
//! - [`BootstrapDescriptor`]: the desired project, application, static users and
//!   external identity providers, loaded from a YAML (or JSON) file

mod descriptor;
mod settings;

pub use descriptor::{
    ApplicationSpec, BootstrapDescriptor, ConfigError, IdentityProviderSpec, ProjectSpec,
    StaticUserSpec,
};
pub use settings::{LogFormat, Settings};
