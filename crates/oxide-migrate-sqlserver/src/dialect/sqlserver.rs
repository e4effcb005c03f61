//! SQL Server dialect.

use super::MigrationDialect;
use crate::provider::SQL_SERVER_INVARIANT_NAME;

/// SQL Server dialect for migrations.
///
/// Uses every default of [`MigrationDialect`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SqlServerDialect;

impl SqlServerDialect {
    /// Creates a new SQL Server dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl MigrationDialect for SqlServerDialect {
    fn generator_name(&self) -> &'static str {
        "SqlServerMigrationSqlGenerator"
    }

    fn provider_invariant_name(&self) -> &'static str {
        SQL_SERVER_INVARIANT_NAME
    }
}
