//! # oxide-migrate-sqlserver
//!
//! Migration SQL generators for SQL Server and SQL Server Compact.
//!
//! A generator turns a list of [`MigrationOperation`]s into T-SQL
//! [`MigrationStatement`]s for one provider manifest token:
//!
//! - [`SqlServerMigrationSqlGenerator`] targets SQL Server 2000 to 2012 and
//!   Azure SQL Database (tokens `2000`, `2005`, `2008`, `2012`, `2012.Azure`)
//! - [`SqlCeMigrationSqlGenerator`] targets SQL Server Compact 4.0, which has
//!   no schemas, cannot rename columns and separates batches with `GO`
//!
//! SQL syntax lives in the [`MigrationDialect`] trait. Its default methods
//! produce SQL Server syntax and [`SqlCeDialect`] overrides the operations
//! Compact spells differently.
//!
//! ## Example
//!
//! ```rust
//! use oxide_migrate_core::prelude::*;
//! use oxide_migrate_sqlserver::SqlServerMigrationSqlGenerator;
//!
//! let operations: Vec<MigrationOperation> = vec![
//!     CreateTableOperation::new("dbo.Customers")
//!         .column(ColumnModel::new(PrimitiveTypeKind::Int32, "Id").not_null().identity())
//!         .primary_key(["Id"])
//!         .into(),
//!     CreateIndexOperation::new("dbo.Customers", ["Id"]).unique().into(),
//! ];
//!
//! let generator = SqlServerMigrationSqlGenerator::new();
//! let statements = generator.generate(&operations, "2008").unwrap();
//!
//! assert_eq!(
//!     statements[1].sql,
//!     "CREATE UNIQUE INDEX [IX_Id] ON [dbo].[Customers]([Id])"
//! );
//! ```
//!
//! ## Providers
//!
//! Generators resolve a provider manifest once per call through a
//! [`ConnectionFactory`](oxide_migrate_core::ConnectionFactory). The
//! built-in factories are available individually or through
//! [`default_registry`]; custom factories can be plugged in with
//! [`DialectSqlGenerator::with_connection_factory`].

pub mod dialect;
pub mod generator;
pub mod provider;
pub mod session;
pub mod writer;

pub use dialect::{MigrationDialect, SqlCeDialect, SqlServerDialect};
pub use generator::{DialectSqlGenerator, SqlCeMigrationSqlGenerator, SqlServerMigrationSqlGenerator};
pub use oxide_migrate_core::{MigrationOperation, MigrationSqlGenerator, MigrationStatement};
pub use provider::{
    default_registry, SqlCeConnectionFactory, SqlCeProviderManifest, SqlServerConnectionFactory,
    SqlServerProviderManifest, SQL_CE_INVARIANT_NAME, SQL_SERVER_INVARIANT_NAME,
};
pub use session::GenerationSession;
pub use writer::IndentedWriter;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use oxide_migrate_core::prelude::*;

    pub use crate::dialect::{MigrationDialect, SqlCeDialect, SqlServerDialect};
    pub use crate::generator::{SqlCeMigrationSqlGenerator, SqlServerMigrationSqlGenerator};
    pub use crate::provider::default_registry;
}
