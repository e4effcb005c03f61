//! Provider manifest and connection contracts.
//!
//! A generator never holds a connection. It asks a [`ConnectionFactory`] for
//! an ephemeral [`ProviderConnection`], resolves the [`ProviderManifest`] for
//! the requested token, and drops the connection before generating any SQL.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::column::TypeUsage;
use crate::error::{MigrationSqlError, Result};

/// Maps abstract type usages to provider store types.
pub trait ProviderManifest: Send + Sync {
    /// Returns the manifest token this manifest was resolved for.
    fn token(&self) -> &str;

    /// Returns the store type name for an abstract type usage.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider has no store type for the usage.
    fn store_type(&self, usage: &TypeUsage) -> Result<String>;
}

/// A short-lived connection used only to reach provider services.
///
/// Dropping the connection releases it.
pub trait ProviderConnection {
    /// Resolves the provider manifest for a token.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is not supported.
    fn provider_manifest(&self, token: &str) -> Result<Box<dyn ProviderManifest>>;
}

/// Creates connections for one provider.
pub trait ConnectionFactory: Send + Sync {
    /// Returns the provider invariant name, e.g. `System.Data.SqlClient`.
    fn invariant_name(&self) -> &str;

    /// Opens an empty connection.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be created.
    fn create_connection(&self) -> Result<Box<dyn ProviderConnection>>;
}

/// Resolves a manifest through an ephemeral connection.
///
/// The connection is dropped before this function returns, on success and
/// on failure.
///
/// # Errors
///
/// Propagates connection and manifest errors unchanged.
pub fn resolve_manifest(
    factory: &dyn ConnectionFactory,
    token: &str,
) -> Result<Box<dyn ProviderManifest>> {
    debug!(
        provider = factory.invariant_name(),
        token, "Resolving provider manifest"
    );
    let connection = factory.create_connection()?;
    connection.provider_manifest(token)
}

/// Connection factories keyed by provider invariant name.
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    factories: HashMap<String, Arc<dyn ConnectionFactory>>,
}

impl ProviderRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a factory under its invariant name, replacing any previous one.
    #[must_use]
    pub fn register(mut self, factory: Arc<dyn ConnectionFactory>) -> Self {
        self.insert(factory);
        self
    }

    /// Registers a factory in place.
    pub fn insert(&mut self, factory: Arc<dyn ConnectionFactory>) {
        debug!(provider = factory.invariant_name(), "Registering connection factory");
        self.factories
            .insert(factory.invariant_name().to_string(), factory);
    }

    /// Looks up the factory for an invariant name.
    ///
    /// # Errors
    ///
    /// Returns [`MigrationSqlError::ProviderNotRegistered`] if none is registered.
    pub fn get(&self, invariant_name: &str) -> Result<Arc<dyn ConnectionFactory>> {
        self.factories
            .get(invariant_name)
            .cloned()
            .ok_or_else(|| MigrationSqlError::ProviderNotRegistered(invariant_name.to_string()))
    }

    /// Returns true if a factory is registered for the invariant name.
    #[must_use]
    pub fn contains(&self, invariant_name: &str) -> bool {
        self.factories.contains_key(invariant_name)
    }

    /// Resolves a manifest for a provider and token.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider is not registered or the manifest
    /// cannot be resolved.
    pub fn resolve_manifest(
        &self,
        invariant_name: &str,
        token: &str,
    ) -> Result<Box<dyn ProviderManifest>> {
        let factory = self.get(invariant_name)?;
        resolve_manifest(factory.as_ref(), token)
    }

    /// Returns the registered invariant names, sorted.
    #[must_use]
    pub fn invariant_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("providers", &self.invariant_names())
            .finish()
    }
}
