#![allow(dead_code)]

use oxide_migrate_core::prelude::*;
use oxide_migrate_sqlserver::{SqlCeMigrationSqlGenerator, SqlServerMigrationSqlGenerator};

pub fn sqlserver(operations: Vec<MigrationOperation>, token: &str) -> Vec<MigrationStatement> {
    SqlServerMigrationSqlGenerator::new()
        .generate(&operations, token)
        .unwrap_or_else(|e| panic!("SQL Server generation failed: {e}"))
}

pub fn sqlce(operations: Vec<MigrationOperation>) -> Vec<MigrationStatement> {
    SqlCeMigrationSqlGenerator::new()
        .generate(&operations, "4.0")
        .unwrap_or_else(|e| panic!("SQL Server Compact generation failed: {e}"))
}

/// Joins statement SQL with line breaks, the way a script shows them.
pub fn join(statements: &[MigrationStatement]) -> String {
    statements
        .iter()
        .map(|s| s.sql.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn sqlserver_sql(operation: impl Into<MigrationOperation>) -> String {
    join(&sqlserver(vec![operation.into()], "2008"))
}

pub fn sqlce_sql(operation: impl Into<MigrationOperation>) -> String {
    join(&sqlce(vec![operation.into()]))
}

/// `Customers` with an identity key and a required name.
pub fn customers_table(name: &str) -> CreateTableOperation {
    CreateTableOperation::new(name)
        .column(
            ColumnModel::new(PrimitiveTypeKind::Int32, "Id")
                .nullable(true)
                .identity(),
        )
        .column(ColumnModel::new(PrimitiveTypeKind::String, "Name").not_null())
        .primary_key(["Id"])
}

pub fn customer_fk(cascade: bool) -> AddForeignKeyOperation {
    AddForeignKeyOperation {
        name: None,
        dependent_table: "Orders".to_string(),
        dependent_columns: vec!["CustomerId".to_string()],
        principal_table: "Customers".to_string(),
        principal_columns: vec!["CustomerId".to_string()],
        cascade_delete: cascade,
    }
}
