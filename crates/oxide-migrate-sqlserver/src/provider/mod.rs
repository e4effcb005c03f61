//! Built-in providers for SQL Server and SQL Server Compact.
//!
//! Each provider exposes a manifest that maps abstract column types to
//! store types, a connection that resolves the manifest for a token, and a
//! factory that opens such connections.

mod sqlce;
mod sqlserver;

pub use sqlce::{SqlCeConnection, SqlCeConnectionFactory, SqlCeProviderManifest};
pub use sqlserver::{
    SqlServerConnection, SqlServerConnectionFactory, SqlServerProviderManifest, SqlServerVersion,
};

use std::sync::Arc;

use oxide_migrate_core::{PrimitiveTypeKind, ProviderRegistry};

/// Invariant name of the SQL Server provider.
pub const SQL_SERVER_INVARIANT_NAME: &str = "System.Data.SqlClient";

/// Invariant name of the SQL Server Compact 4.0 provider.
pub const SQL_CE_INVARIANT_NAME: &str = "System.Data.SqlServerCe.4.0";

/// Returns a registry with both built-in connection factories.
#[must_use]
pub fn default_registry() -> ProviderRegistry {
    ProviderRegistry::new()
        .register(Arc::new(SqlServerConnectionFactory::new()))
        .register(Arc::new(SqlCeConnectionFactory::new()))
}

/// Store types shared by both engines for fixed-size scalar kinds.
const fn scalar_store_type(kind: PrimitiveTypeKind) -> Option<&'static str> {
    match kind {
        PrimitiveTypeKind::Boolean => Some("bit"),
        PrimitiveTypeKind::Byte => Some("tinyint"),
        PrimitiveTypeKind::Int16 => Some("smallint"),
        PrimitiveTypeKind::Int32 => Some("int"),
        PrimitiveTypeKind::Int64 => Some("bigint"),
        PrimitiveTypeKind::Guid => Some("uniqueidentifier"),
        PrimitiveTypeKind::Double => Some("float"),
        PrimitiveTypeKind::Single => Some("real"),
        PrimitiveTypeKind::DateTime => Some("datetime"),
        _ => None,
    }
}
