//! SQL Server Compact provider.

use oxide_migrate_core::error::{MigrationSqlError, Result};
use oxide_migrate_core::{
    ConnectionFactory, PrimitiveTypeKind, ProviderConnection, ProviderManifest, TypeUsage,
};

use super::{scalar_store_type, SQL_CE_INVARIANT_NAME};

/// Type mapping for SQL Server Compact.
///
/// The mapping does not depend on the token, so any non-blank token is
/// accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlCeProviderManifest {
    token: String,
}

impl SqlCeProviderManifest {
    /// Creates the manifest for a token.
    ///
    /// # Errors
    ///
    /// Returns [`MigrationSqlError::UnsupportedManifestToken`] if the token
    /// is blank.
    pub fn new(token: &str) -> Result<Self> {
        if token.trim().is_empty() {
            return Err(MigrationSqlError::UnsupportedManifestToken {
                provider: SQL_CE_INVARIANT_NAME.to_string(),
                token: token.to_string(),
            });
        }
        Ok(Self {
            token: token.to_string(),
        })
    }
}

impl ProviderManifest for SqlCeProviderManifest {
    fn token(&self) -> &str {
        &self.token
    }

    fn store_type(&self, usage: &TypeUsage) -> Result<String> {
        if let Some(store_type) = scalar_store_type(usage.kind) {
            return Ok(store_type.to_string());
        }

        let store_type = match usage.kind {
            PrimitiveTypeKind::String if usage.is_fixed_length => "nchar",
            PrimitiveTypeKind::String if usage.is_unbounded() => "ntext",
            PrimitiveTypeKind::String => "nvarchar",
            PrimitiveTypeKind::Binary if usage.is_fixed_length => "binary",
            PrimitiveTypeKind::Binary if usage.is_unbounded() => "image",
            PrimitiveTypeKind::Binary => "varbinary",
            PrimitiveTypeKind::Decimal => "numeric",
            kind => {
                return Err(MigrationSqlError::UnsupportedType {
                    provider: SQL_CE_INVARIANT_NAME.to_string(),
                    kind: kind.to_string(),
                })
            }
        };
        Ok(store_type.to_string())
    }
}

/// Connection that only resolves Compact manifests.
#[derive(Debug, Default)]
pub struct SqlCeConnection;

impl ProviderConnection for SqlCeConnection {
    fn provider_manifest(&self, token: &str) -> Result<Box<dyn ProviderManifest>> {
        Ok(Box::new(SqlCeProviderManifest::new(token)?))
    }
}

/// Opens [`SqlCeConnection`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqlCeConnectionFactory;

impl SqlCeConnectionFactory {
    /// Creates the factory.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ConnectionFactory for SqlCeConnectionFactory {
    fn invariant_name(&self) -> &str {
        SQL_CE_INVARIANT_NAME
    }

    fn create_connection(&self) -> Result<Box<dyn ProviderConnection>> {
        Ok(Box::new(SqlCeConnection))
    }
}
