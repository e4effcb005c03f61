//! SQL Server provider.

use oxide_migrate_core::error::{MigrationSqlError, Result};
use oxide_migrate_core::{
    ConnectionFactory, PrimitiveTypeKind, ProviderConnection, ProviderManifest, TypeUsage,
};

use super::{scalar_store_type, SQL_SERVER_INVARIANT_NAME};

/// SQL Server versions with a distinct manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SqlServerVersion {
    /// SQL Server 2000.
    Sql2000,
    /// SQL Server 2005.
    Sql2005,
    /// SQL Server 2008.
    Sql2008,
    /// SQL Server 2012.
    Sql2012,
    /// Azure SQL Database.
    Sql2012Azure,
}

impl SqlServerVersion {
    /// Parses a manifest token.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "2000" => Some(Self::Sql2000),
            "2005" => Some(Self::Sql2005),
            "2008" => Some(Self::Sql2008),
            "2012" => Some(Self::Sql2012),
            "2012.Azure" => Some(Self::Sql2012Azure),
            _ => None,
        }
    }

    /// Returns the manifest token for this version.
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::Sql2000 => "2000",
            Self::Sql2005 => "2005",
            Self::Sql2008 => "2008",
            Self::Sql2012 => "2012",
            Self::Sql2012Azure => "2012.Azure",
        }
    }

    /// Returns true if `(max)` types exist.
    #[must_use]
    pub fn supports_max_types(self) -> bool {
        self >= Self::Sql2005
    }

    /// Returns true if the date, time and spatial types added in 2008 exist.
    #[must_use]
    pub fn supports_2008_types(self) -> bool {
        self >= Self::Sql2008
    }
}

/// Type mapping for one SQL Server version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SqlServerProviderManifest {
    version: SqlServerVersion,
}

impl SqlServerProviderManifest {
    /// Creates the manifest for a token.
    ///
    /// # Errors
    ///
    /// Returns [`MigrationSqlError::UnsupportedManifestToken`] for unknown
    /// tokens.
    pub fn new(token: &str) -> Result<Self> {
        SqlServerVersion::from_token(token)
            .map(|version| Self { version })
            .ok_or_else(|| MigrationSqlError::UnsupportedManifestToken {
                provider: SQL_SERVER_INVARIANT_NAME.to_string(),
                token: token.to_string(),
            })
    }

    /// Returns the server version.
    #[must_use]
    pub const fn version(&self) -> SqlServerVersion {
        self.version
    }

    fn unsupported(&self, kind: PrimitiveTypeKind) -> MigrationSqlError {
        MigrationSqlError::UnsupportedType {
            provider: format!("{SQL_SERVER_INVARIANT_NAME} {}", self.version.token()),
            kind: kind.to_string(),
        }
    }

    fn sized(&self, fixed: &str, unbounded: (&str, &str), bounded: &str, usage: &TypeUsage) -> String {
        if usage.is_fixed_length {
            fixed.to_string()
        } else if usage.is_unbounded() {
            let (max, legacy) = unbounded;
            let name = if self.version.supports_max_types() { max } else { legacy };
            name.to_string()
        } else {
            bounded.to_string()
        }
    }
}

impl ProviderManifest for SqlServerProviderManifest {
    fn token(&self) -> &str {
        self.version.token()
    }

    fn store_type(&self, usage: &TypeUsage) -> Result<String> {
        if let Some(store_type) = scalar_store_type(usage.kind) {
            return Ok(store_type.to_string());
        }

        let store_type = match usage.kind {
            PrimitiveTypeKind::String if usage.is_unicode => {
                self.sized("nchar", ("nvarchar(max)", "ntext"), "nvarchar", usage)
            }
            PrimitiveTypeKind::String => {
                self.sized("char", ("varchar(max)", "text"), "varchar", usage)
            }
            PrimitiveTypeKind::Binary => {
                self.sized("binary", ("varbinary(max)", "image"), "varbinary", usage)
            }
            PrimitiveTypeKind::Decimal => "decimal".to_string(),
            PrimitiveTypeKind::Time if self.version.supports_2008_types() => "time".to_string(),
            PrimitiveTypeKind::DateTimeOffset if self.version.supports_2008_types() => {
                "datetimeoffset".to_string()
            }
            PrimitiveTypeKind::Geography if self.version.supports_2008_types() => {
                "geography".to_string()
            }
            PrimitiveTypeKind::Geometry if self.version.supports_2008_types() => {
                "geometry".to_string()
            }
            kind => return Err(self.unsupported(kind)),
        };
        Ok(store_type)
    }
}

/// Connection that only resolves SQL Server manifests.
#[derive(Debug, Default)]
pub struct SqlServerConnection;

impl ProviderConnection for SqlServerConnection {
    fn provider_manifest(&self, token: &str) -> Result<Box<dyn ProviderManifest>> {
        Ok(Box::new(SqlServerProviderManifest::new(token)?))
    }
}

/// Opens [`SqlServerConnection`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqlServerConnectionFactory;

impl SqlServerConnectionFactory {
    /// Creates the factory.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ConnectionFactory for SqlServerConnectionFactory {
    fn invariant_name(&self) -> &str {
        SQL_SERVER_INVARIANT_NAME
    }

    fn create_connection(&self) -> Result<Box<dyn ProviderConnection>> {
        Ok(Box::new(SqlServerConnection))
    }
}
