//! # oxide-migrate-core
//!
//! Provider-agnostic building blocks for migration SQL generation.
//!
//! This crate provides:
//! - [`MigrationOperation`], the closed set of schema changes a migration
//!   can express, with [`ColumnModel`] describing column shapes
//! - [`Literal`], the constant values used for defaults and parameters
//! - [`MigrationStatement`], the unit of generated SQL
//! - The [`MigrationSqlGenerator`] contract implemented by dialect crates
//! - Provider manifest and connection contracts, and a [`ProviderRegistry`]
//!   that maps provider invariant names to connection factories
//!
//! ## Describing a migration
//!
//! ```rust
//! use oxide_migrate_core::prelude::*;
//!
//! let operations = vec![
//!     CreateTableOperation::new("dbo.Customers")
//!         .column(ColumnModel::new(PrimitiveTypeKind::Int32, "Id").not_null().identity())
//!         .column(ColumnModel::new(PrimitiveTypeKind::String, "Name").max_length(100))
//!         .primary_key(["Id"])
//!         .into(),
//!     MigrationOperation::add_column(
//!         "dbo.Customers",
//!         ColumnModel::new(PrimitiveTypeKind::Boolean, "Active").not_null().default_value(true),
//!     ),
//! ];
//!
//! assert_eq!(operations.len(), 2);
//! ```

pub mod column;
pub mod error;
pub mod generator;
pub mod literal;
pub mod name;
pub mod operations;
pub mod provider;
pub mod statement;

pub use column::{ColumnModel, ParameterModel, PrimitiveTypeKind, TypeUsage};
pub use error::{MigrationSqlError, Result};
pub use generator::MigrationSqlGenerator;
pub use literal::{Literal, SpatialValue};
pub use name::DatabaseName;
pub use operations::{
    AddColumnOperation, AddForeignKeyOperation, AddPrimaryKeyOperation, AlterColumnOperation,
    CommandParameter, CreateIndexOperation, CreateTableOperation, CustomOperation,
    DropColumnOperation, DropForeignKeyOperation, DropIndexOperation, DropPrimaryKeyOperation,
    DropProcedureOperation, DropTableOperation, HistoryCommand, HistoryOperation,
    MigrationOperation, MoveProcedureOperation, MoveTableOperation, ProcedureOperation,
    RenameColumnOperation, RenameProcedureOperation, RenameTableOperation, SqlOperation,
};
pub use provider::{ConnectionFactory, ProviderConnection, ProviderManifest, ProviderRegistry};
pub use statement::MigrationStatement;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::column::{ColumnModel, ParameterModel, PrimitiveTypeKind};
    pub use crate::error::{MigrationSqlError, Result};
    pub use crate::generator::MigrationSqlGenerator;
    pub use crate::literal::{Literal, SpatialValue};
    pub use crate::operations::*;
    pub use crate::statement::MigrationStatement;
}
