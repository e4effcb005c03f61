//! Generators that drive a [`MigrationDialect`] over an operation list.

use std::fmt;
use std::sync::Arc;

use oxide_migrate_core::error::{ensure_not_blank, Result};
use oxide_migrate_core::provider::resolve_manifest;
use oxide_migrate_core::{
    ConnectionFactory, MigrationOperation, MigrationSqlGenerator, MigrationStatement,
    ProviderRegistry,
};
use tracing::info;

use crate::dialect::{MigrationDialect, SqlCeDialect, SqlServerDialect};
use crate::provider::{SqlCeConnectionFactory, SqlServerConnectionFactory};
use crate::session::GenerationSession;

/// Migration SQL generator for a dialect.
///
/// The generator holds only immutable configuration and can be shared
/// across threads; each [`MigrationSqlGenerator::generate`] call works on
/// its own [`GenerationSession`].
#[derive(Clone)]
pub struct DialectSqlGenerator<D> {
    dialect: D,
    connection_factory: Arc<dyn ConnectionFactory>,
}

/// Generator for SQL Server.
pub type SqlServerMigrationSqlGenerator = DialectSqlGenerator<SqlServerDialect>;

/// Generator for SQL Server Compact.
pub type SqlCeMigrationSqlGenerator = DialectSqlGenerator<SqlCeDialect>;

impl<D: MigrationDialect> DialectSqlGenerator<D> {
    /// Creates a generator that resolves manifests through `factory`.
    #[must_use]
    pub fn with_connection_factory(dialect: D, factory: Arc<dyn ConnectionFactory>) -> Self {
        Self {
            dialect,
            connection_factory: factory,
        }
    }

    /// Creates a generator using the factory registered for the dialect's
    /// provider.
    ///
    /// # Errors
    ///
    /// Returns an error if no factory is registered for the provider.
    pub fn from_registry(dialect: D, registry: &ProviderRegistry) -> Result<Self> {
        let factory = registry.get(dialect.provider_invariant_name())?;
        Ok(Self::with_connection_factory(dialect, factory))
    }

    /// Returns the dialect.
    #[must_use]
    pub const fn dialect(&self) -> &D {
        &self.dialect
    }
}

impl SqlServerMigrationSqlGenerator {
    /// Creates a SQL Server generator with the built-in provider.
    #[must_use]
    pub fn new() -> Self {
        Self::with_connection_factory(
            SqlServerDialect::new(),
            Arc::new(SqlServerConnectionFactory::new()),
        )
    }
}

impl Default for SqlServerMigrationSqlGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl SqlCeMigrationSqlGenerator {
    /// Creates a SQL Server Compact generator with the built-in provider.
    #[must_use]
    pub fn new() -> Self {
        Self::with_connection_factory(SqlCeDialect::new(), Arc::new(SqlCeConnectionFactory::new()))
    }
}

impl Default for SqlCeMigrationSqlGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: MigrationDialect> MigrationSqlGenerator for DialectSqlGenerator<D> {
    fn name(&self) -> &'static str {
        self.dialect.generator_name()
    }

    fn generate(
        &self,
        operations: &[MigrationOperation],
        provider_manifest_token: &str,
    ) -> Result<Vec<MigrationStatement>> {
        ensure_not_blank("provider_manifest_token", provider_manifest_token)?;

        let manifest = resolve_manifest(self.connection_factory.as_ref(), provider_manifest_token)?;
        let mut session = GenerationSession::new(manifest, self.dialect.batch_terminator());

        for operation in operations {
            self.dialect.generate_operation(&mut session, operation)?;
        }

        let statements = session.into_statements();
        info!(
            generator = self.dialect.generator_name(),
            token = provider_manifest_token,
            operations = operations.len(),
            statements = statements.len(),
            "Generated migration SQL"
        );
        Ok(statements)
    }
}

impl<D: fmt::Debug> fmt::Debug for DialectSqlGenerator<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DialectSqlGenerator")
            .field("dialect", &self.dialect)
            .field("provider", &self.connection_factory.invariant_name())
            .finish()
    }
}
