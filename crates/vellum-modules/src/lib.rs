//! Module registry for static content bundles.
//!
//! Modules are registered under a key with a factory. A module is built the
//! first time something resolves it and cached from then on; factories
//! resolve their own dependencies through the [`Resolver`] they are handed.

pub mod key;
pub mod registry;

pub use key::ModuleKey;
pub use registry::{Export, Factory, ModuleRegistry, ModuleState, RegistryError, Resolver};
