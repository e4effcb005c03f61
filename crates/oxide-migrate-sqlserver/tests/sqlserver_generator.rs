//! Integration tests for the SQL Server migration SQL generator.
//!
//! Each test feeds operations through `SqlServerMigrationSqlGenerator` and
//! compares the generated T-SQL verbatim.

mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::NaiveDate;
use common::{customer_fk, customers_table, join, sqlserver, sqlserver_sql};
use oxide_migrate_core::prelude::*;
use oxide_migrate_core::{ConnectionFactory, ProviderConnection, ProviderManifest};
use oxide_migrate_sqlserver::provider::SqlServerConnection;
use oxide_migrate_sqlserver::{SqlServerDialect, SqlServerMigrationSqlGenerator, SQL_SERVER_INVARIANT_NAME};

// =============================================================================
// Tables and schemas
// =============================================================================

#[test]
fn test_create_table_with_schema_guard() {
    let statements = sqlserver(vec![customers_table("foo.Customers").into()], "2008");

    assert_eq!(statements.len(), 2);
    assert_eq!(
        statements[0].sql,
        "IF schema_id('foo') IS NULL\n    EXECUTE('CREATE SCHEMA [foo]')"
    );
    assert_eq!(
        statements[1].sql,
        "CREATE TABLE [foo].[Customers] (\n    \
         [Id] [int] IDENTITY,\n    \
         [Name] [nvarchar](max) NOT NULL,\n    \
         CONSTRAINT [PK_foo.Customers] PRIMARY KEY ([Id])\n\
         )"
    );
}

#[test]
fn test_schema_guard_emitted_once_per_call() {
    let operations: Vec<MigrationOperation> = vec![
        customers_table("foo.Customers").into(),
        customers_table("foo.Orders").into(),
        customers_table("bar.Orders").into(),
    ];
    let sql = join(&sqlserver(operations, "2008"));

    assert_eq!(sql.matches("CREATE SCHEMA [foo]").count(), 1);
    assert_eq!(sql.matches("CREATE SCHEMA [bar]").count(), 1);
    assert!(sql.find("CREATE SCHEMA [bar]").unwrap() > sql.find("[foo].[Orders]").unwrap());
}

#[test]
fn test_default_schema_has_no_guard() {
    let statements = sqlserver(
        vec![
            customers_table("dbo.Customers").into(),
            customers_table("DBO.Orders").into(),
            customers_table("Products").into(),
        ],
        "2008",
    );
    assert_eq!(statements.len(), 3);
    assert!(statements.iter().all(|s| s.sql.starts_with("CREATE TABLE")));
}

#[test]
fn test_create_table_nonclustered_pk() {
    let op = CreateTableOperation::new("Customers")
        .column(ColumnModel::new(PrimitiveTypeKind::Int32, "Id").not_null())
        .with_primary_key(AddPrimaryKeyOperation::new("", ["Id"]).nonclustered());

    assert_eq!(
        sqlserver_sql(op),
        "CREATE TABLE [Customers] (\n    \
         [Id] [int] NOT NULL,\n    \
         CONSTRAINT [PK_Customers] PRIMARY KEY NONCLUSTERED ([Id])\n\
         )"
    );
}

#[test]
fn test_create_system_table() {
    let op = CreateTableOperation::new("Customers")
        .column(ColumnModel::new(PrimitiveTypeKind::Int32, "Id").not_null())
        .system();

    assert_eq!(
        sqlserver_sql(op),
        "CREATE TABLE [Customers] (\n    \
         [Id] [int] NOT NULL\n\
         )\n\
         BEGIN TRY\n    \
         EXEC sp_MS_marksystemobject 'Customers'\n\
         END TRY\n\
         BEGIN CATCH\n\
         END CATCH"
    );
}

#[test]
fn test_drop_table() {
    assert_eq!(
        sqlserver_sql(MigrationOperation::drop_table("Customers")),
        "DROP TABLE [Customers]"
    );
}

#[test]
fn test_rename_table_keeps_schema() {
    assert_eq!(
        sqlserver_sql(MigrationOperation::rename_table("dbo.Old", "New")),
        "EXECUTE sp_rename @objname = N'dbo.Old', @newname = N'New', @objtype = N'OBJECT'"
    );
}

#[test]
fn test_move_table() {
    let op = MoveTableOperation::new("dbo.Customers", Some("crm".to_string()));
    assert_eq!(
        sqlserver_sql(op),
        "IF schema_id('crm') IS NULL\n    EXECUTE('CREATE SCHEMA [crm]')\n\
         ALTER SCHEMA [crm] TRANSFER [dbo].[Customers]"
    );

    let op = MoveTableOperation::new("crm.Customers", None);
    assert_eq!(sqlserver_sql(op), "ALTER SCHEMA [dbo] TRANSFER [crm].[Customers]");
}

#[test]
fn test_move_system_table() {
    let history = CreateTableOperation::new("dbo.History")
        .column(ColumnModel::new(PrimitiveTypeKind::Int32, "Id").not_null())
        .column(ColumnModel::new(PrimitiveTypeKind::String, "Name").not_null());
    let op = MoveTableOperation::new("dbo.History", Some("foo".to_string())).system("MyKey", history);

    assert_eq!(
        sqlserver_sql(op),
        "IF schema_id('foo') IS NULL\n    \
         EXECUTE('CREATE SCHEMA [foo]')\n\
         IF object_id('dbo.History') IS NULL BEGIN\n    \
         CREATE TABLE [dbo].[History] (\n        \
         [Id] [int] NOT NULL,\n        \
         [Name] [nvarchar](max) NOT NULL\n    \
         )\n\
         END\n\
         INSERT INTO [dbo].[History]\n\
         SELECT * FROM [dbo].[History]\n\
         WHERE [ContextKey] = 'MyKey'\n\
         DELETE [dbo].[History]\n\
         WHERE [ContextKey] = 'MyKey'\n\
         IF NOT EXISTS(SELECT * FROM [dbo].[History])\n    \
         DROP TABLE [dbo].[History]"
    );
}

#[test]
fn test_move_system_table_requires_context_key() {
    let mut op = MoveTableOperation::new("dbo.History", Some("foo".to_string()))
        .system("MyKey", CreateTableOperation::new("foo.History"));
    op.context_key = None;

    let err = SqlServerMigrationSqlGenerator::new()
        .generate(&[MigrationOperation::from(op)], "2008")
        .unwrap_err();
    assert!(matches!(
        err,
        MigrationSqlError::InvalidArgument {
            argument: "context_key",
            ..
        }
    ));
}

#[test]
fn test_create_table_without_columns_is_rejected() {
    let op = CreateTableOperation::new("T").primary_key(["Id"]);
    let err = SqlServerMigrationSqlGenerator::new()
        .generate(&[MigrationOperation::from(op)], "2008")
        .unwrap_err();
    assert!(matches!(
        err,
        MigrationSqlError::InvalidArgument {
            argument: "columns",
            ..
        }
    ));
}

// =============================================================================
// Columns
// =============================================================================

#[test]
fn test_add_column_with_store_type_and_length() {
    let column = ColumnModel::new(PrimitiveTypeKind::String, "Bar")
        .store_type("varchar")
        .max_length(15);
    assert_eq!(
        sqlserver_sql(MigrationOperation::add_column("Foo", column)),
        "ALTER TABLE [Foo] ADD [Bar] [varchar](15)"
    );
}

#[test]
fn test_add_column_store_type_default_length() {
    let column = ColumnModel::new(PrimitiveTypeKind::String, "Bar").store_type("nvarchar");
    assert_eq!(
        sqlserver_sql(MigrationOperation::add_column("Foo", column)),
        "ALTER TABLE [Foo] ADD [Bar] [nvarchar](128)"
    );
}

#[test]
fn test_add_column_decimal_default_is_invariant() {
    let column = ColumnModel::new(PrimitiveTypeKind::Binary, "C")
        .default_value(Literal::Decimal("123.45".to_string()));
    assert_eq!(
        sqlserver_sql(MigrationOperation::add_column("T", column)),
        "ALTER TABLE [T] ADD [C] [varbinary](max) DEFAULT 123.45"
    );
}

#[test]
fn test_add_timestamp_column() {
    let column = ColumnModel::new(PrimitiveTypeKind::Binary, "C")
        .not_null()
        .timestamp();
    assert_eq!(
        sqlserver_sql(MigrationOperation::add_column("T", column)),
        "ALTER TABLE [T] ADD [C] rowversion NOT NULL"
    );
}

#[test]
fn test_add_rowversion_store_type_columns_get_no_default() {
    let column = ColumnModel::new(PrimitiveTypeKind::Binary, "C")
        .not_null()
        .store_type("RowVersion");
    assert_eq!(
        sqlserver_sql(MigrationOperation::add_column("T", column)),
        "ALTER TABLE [T] ADD [C] [RowVersion] NOT NULL"
    );

    let column = ColumnModel::new(PrimitiveTypeKind::Binary, "C")
        .not_null()
        .store_type("timestamp");
    assert_eq!(
        sqlserver_sql(MigrationOperation::add_column("T", column)),
        "ALTER TABLE [T] ADD [C] [timestamp] NOT NULL"
    );
}

#[test]
fn test_add_column_explicit_defaults() {
    let column = ColumnModel::new(PrimitiveTypeKind::Guid, "Bar")
        .not_null()
        .default_value(42);
    assert_eq!(
        sqlserver_sql(MigrationOperation::add_column("Foo", column)),
        "ALTER TABLE [Foo] ADD [Bar] [uniqueidentifier] NOT NULL DEFAULT 42"
    );

    let column = ColumnModel::new(PrimitiveTypeKind::Guid, "Bar")
        .not_null()
        .default_value_sql("42");
    assert_eq!(
        sqlserver_sql(MigrationOperation::add_column("Foo", column)),
        "ALTER TABLE [Foo] ADD [Bar] [uniqueidentifier] NOT NULL DEFAULT 42"
    );
}

#[test]
fn test_add_column_float_defaults() {
    let column = ColumnModel::new(PrimitiveTypeKind::Double, "D").default_value(1e21);
    assert_eq!(
        sqlserver_sql(MigrationOperation::add_column("T", column)),
        "ALTER TABLE [T] ADD [D] [float] DEFAULT 1E21"
    );

    for value in [f64::NAN, f64::INFINITY] {
        let column = ColumnModel::new(PrimitiveTypeKind::Double, "N").default_value(value);
        let err = SqlServerMigrationSqlGenerator::new()
            .generate(&[MigrationOperation::add_column("T", column)], "2008")
            .unwrap_err();
        assert!(matches!(
            err,
            MigrationSqlError::InvalidArgument {
                argument: "value",
                ..
            }
        ));
    }
}

#[test]
fn test_add_column_synthesizes_default() {
    let column = ColumnModel::new(PrimitiveTypeKind::Int32, "Bar").not_null();
    assert_eq!(
        sqlserver_sql(MigrationOperation::add_column("Foo", column)),
        "ALTER TABLE [Foo] ADD [Bar] [int] NOT NULL DEFAULT 0"
    );

    let column = ColumnModel::new(PrimitiveTypeKind::DateTime, "Created").not_null();
    assert_eq!(
        sqlserver_sql(MigrationOperation::add_column("Foo", column)),
        "ALTER TABLE [Foo] ADD [Created] [datetime] NOT NULL DEFAULT '1900-01-01T00:00:00.000'"
    );

    let column = ColumnModel::new(PrimitiveTypeKind::String, "Name").not_null();
    assert_eq!(
        sqlserver_sql(MigrationOperation::add_column("Foo", column)),
        "ALTER TABLE [Foo] ADD [Name] [nvarchar](max) NOT NULL DEFAULT ''"
    );
}

#[test]
fn test_add_nullable_column_has_no_default() {
    let column = ColumnModel::new(PrimitiveTypeKind::Int32, "Bar").nullable(true);
    assert_eq!(
        sqlserver_sql(MigrationOperation::add_column("Foo", column)),
        "ALTER TABLE [Foo] ADD [Bar] [int]"
    );
}

#[test]
fn test_add_guid_identity_column_uses_newid() {
    let column = ColumnModel::new(PrimitiveTypeKind::Guid, "Bar").identity();
    assert_eq!(
        sqlserver_sql(MigrationOperation::add_column("Foo", column)),
        "ALTER TABLE [Foo] ADD [Bar] [uniqueidentifier] DEFAULT newid()"
    );
}

#[test]
fn test_add_spatial_columns() {
    let column = ColumnModel::new(PrimitiveTypeKind::Geography, "C")
        .not_null()
        .default_value(Literal::Geography(SpatialValue::geography("POINT (6 7)")));
    assert_eq!(
        sqlserver_sql(MigrationOperation::add_column("T", column)),
        "ALTER TABLE [T] ADD [C] [geography] NOT NULL DEFAULT 'SRID=4326;POINT (6 7)'"
    );

    let column = ColumnModel::new(PrimitiveTypeKind::Geography, "C").not_null();
    assert_eq!(
        sqlserver_sql(MigrationOperation::add_column("T", column)),
        "ALTER TABLE [T] ADD [C] [geography] NOT NULL DEFAULT 'SRID=4326;POINT (0 0)'"
    );

    let column = ColumnModel::new(PrimitiveTypeKind::Geometry, "C").not_null();
    assert_eq!(
        sqlserver_sql(MigrationOperation::add_column("T", column)),
        "ALTER TABLE [T] ADD [C] [geometry] NOT NULL DEFAULT 'SRID=0;POINT (0 0)'"
    );

    let column = ColumnModel::new(PrimitiveTypeKind::Geometry, "C")
        .not_null()
        .default_value_sql("'POINT (6 7)'");
    assert_eq!(
        sqlserver_sql(MigrationOperation::add_column("T", column)),
        "ALTER TABLE [T] ADD [C] [geometry] NOT NULL DEFAULT 'POINT (6 7)'"
    );
}

#[test]
fn test_alter_column_with_default_emits_two_statements() {
    let column = ColumnModel::new(PrimitiveTypeKind::Geography, "C")
        .not_null()
        .default_value(Literal::Geography(SpatialValue::geography("POINT (6 7)")));
    let statements = sqlserver(vec![MigrationOperation::alter_column("T", column)], "2008");

    assert_eq!(statements.len(), 2);
    assert_eq!(
        statements[0].sql,
        "ALTER TABLE [T] ADD CONSTRAINT DF_C DEFAULT 'SRID=4326;POINT (6 7)' FOR [C]"
    );
    assert_eq!(statements[1].sql, "ALTER TABLE [T] ALTER COLUMN [C] [geography] NOT NULL");
}

#[test]
fn test_alter_column_without_default() {
    let column = ColumnModel::new(PrimitiveTypeKind::String, "Name").max_length(64);
    assert_eq!(
        sqlserver_sql(MigrationOperation::alter_column("dbo.T", column)),
        "ALTER TABLE [dbo].[T] ALTER COLUMN [Name] [nvarchar](64)"
    );
}

#[test]
fn test_drop_column_variables_are_call_scoped() {
    let operations = vec![
        MigrationOperation::drop_column("Customers", "A"),
        MigrationOperation::drop_column("Customers", "B"),
    ];
    let sql = join(&sqlserver(operations.clone(), "2008"));
    assert!(sql.contains("DECLARE @var0 nvarchar(128)"));
    assert!(sql.contains("DECLARE @var1 nvarchar(128)"));

    let again = join(&sqlserver(operations, "2008"));
    assert_eq!(again, sql);
    assert!(!again.contains("@var2"));
}

#[test]
fn test_rename_column() {
    assert_eq!(
        sqlserver_sql(MigrationOperation::rename_column("dbo.T", "c", "d")),
        "EXECUTE sp_rename @objname = N'dbo.T.c', @newname = N'd', @objtype = N'COLUMN'"
    );
}

#[test]
fn test_rename_escapes_quotes() {
    assert_eq!(
        sqlserver_sql(MigrationOperation::rename_column("T", "c", "c'")),
        "EXECUTE sp_rename @objname = N'T.c', @newname = N'c''', @objtype = N'COLUMN'"
    );
}

// =============================================================================
// Constraints and indexes
// =============================================================================

#[test]
fn test_add_foreign_key_cascade() {
    assert_eq!(
        sqlserver_sql(customer_fk(true)),
        "ALTER TABLE [Orders] ADD CONSTRAINT [FK_Orders_Customers_CustomerId] FOREIGN KEY ([CustomerId]) REFERENCES [Customers] ([CustomerId]) ON DELETE CASCADE"
    );
    assert_eq!(
        sqlserver_sql(customer_fk(false)),
        "ALTER TABLE [Orders] ADD CONSTRAINT [FK_Orders_Customers_CustomerId] FOREIGN KEY ([CustomerId]) REFERENCES [Customers] ([CustomerId])"
    );
}

#[test]
fn test_drop_foreign_key() {
    let op = DropForeignKeyOperation {
        name: None,
        dependent_table: "Orders".to_string(),
        dependent_columns: vec!["CustomerId".to_string()],
        principal_table: "Customers".to_string(),
    };
    assert_eq!(
        sqlserver_sql(op),
        "ALTER TABLE [Orders] DROP CONSTRAINT [FK_Orders_Customers_CustomerId]"
    );
}

#[test]
fn test_primary_keys() {
    let add = AddPrimaryKeyOperation::new("T", ["c1", "c2"]);
    assert_eq!(
        sqlserver_sql(add.clone()),
        "ALTER TABLE [T] ADD CONSTRAINT [PK_T] PRIMARY KEY ([c1], [c2])"
    );
    assert_eq!(
        sqlserver_sql(add.nonclustered()),
        "ALTER TABLE [T] ADD CONSTRAINT [PK_T] PRIMARY KEY NONCLUSTERED ([c1], [c2])"
    );

    let drop = DropPrimaryKeyOperation {
        name: None,
        table: "T".to_string(),
    };
    assert_eq!(sqlserver_sql(drop), "ALTER TABLE [T] DROP CONSTRAINT [PK_T]");
}

#[test]
fn test_create_index() {
    let operations: Vec<MigrationOperation> = vec![
        customers_table("Customers").into(),
        CreateIndexOperation::new("Customers", ["Id"])
            .unique()
            .clustered()
            .into(),
    ];
    let statements = sqlserver(operations, "2008");
    assert_eq!(
        statements[1].sql,
        "CREATE UNIQUE CLUSTERED INDEX [IX_Id] ON [Customers]([Id])"
    );

    let op = CreateIndexOperation::new("dbo.Widgets", ["Name"])
        .named("IX_Foo")
        .unique();
    assert_eq!(
        sqlserver_sql(op),
        "CREATE UNIQUE INDEX [IX_Foo] ON [dbo].[Widgets]([Name])"
    );
}

#[test]
fn test_drop_index() {
    let op = DropIndexOperation {
        name: None,
        table: "dbo.Customers".to_string(),
        columns: vec!["Name".to_string()],
    };
    assert_eq!(sqlserver_sql(op), "DROP INDEX [IX_Name] ON [dbo].[Customers]");
}

// =============================================================================
// Stored procedures
// =============================================================================

#[test]
fn test_create_procedure() {
    let op = ProcedureOperation::new("dbo.Foo")
        .parameter(ParameterModel::new(PrimitiveTypeKind::Int32, "p1"))
        .parameter(ParameterModel::new(PrimitiveTypeKind::String, "p2").out())
        .parameter(
            ParameterModel::new(PrimitiveTypeKind::String, "p3")
                .max_length(50)
                .default_value("x"),
        )
        .body("SELECT 1\r\n  SELECT 2");
    let statements = sqlserver(vec![MigrationOperation::create_procedure(op)], "2008");

    assert_eq!(statements.len(), 1);
    assert_eq!(
        statements[0].sql,
        "CREATE PROCEDURE [dbo].[Foo]\n    \
         @p1 [int],\n    \
         @p2 [nvarchar](max) OUT,\n    \
         @p3 [nvarchar](50) = 'x'\n\
         AS\n\
         BEGIN\n    \
         SELECT 1\n    \
         SELECT 2\n\
         END"
    );
    assert_eq!(statements[0].batch_terminator.as_deref(), Some("GO"));
}

#[test]
fn test_alter_procedure_with_empty_body_returns() {
    let op = ProcedureOperation::new("Foo")
        .parameter(
            ParameterModel::new(PrimitiveTypeKind::Decimal, "amount")
                .precision(10)
                .scale(2)
                .default_value_sql("0"),
        )
        .body("  ");
    assert_eq!(
        sqlserver_sql(MigrationOperation::alter_procedure(op)),
        "ALTER PROCEDURE [Foo]\n    \
         @amount [decimal](10, 2) = 0\n\
         AS\n\
         BEGIN\n    \
         RETURN\n\
         END"
    );
}

#[test]
fn test_procedure_rejects_non_finite_parameter_default() {
    let op = ProcedureOperation::new("Foo")
        .parameter(ParameterModel::new(PrimitiveTypeKind::Double, "p").default_value(f64::NAN));
    assert!(matches!(
        SqlServerMigrationSqlGenerator::new()
            .generate(&[MigrationOperation::create_procedure(op)], "2008"),
        Err(MigrationSqlError::InvalidArgument { argument: "value", .. })
    ));
}

#[test]
fn test_drop_procedure() {
    let statements = sqlserver(vec![MigrationOperation::drop_procedure("dbo.Foo")], "2008");
    assert_eq!(statements[0].sql, "DROP PROCEDURE [dbo].[Foo]");
    assert_eq!(statements[0].batch_terminator, None);
}

#[test]
fn test_rename_procedure() {
    assert_eq!(
        sqlserver_sql(MigrationOperation::rename_procedure("dbo.Foo", "Bar")),
        "EXECUTE sp_rename @objname = N'dbo.Foo', @newname = N'Bar', @objtype = N'OBJECT'"
    );
}

#[test]
fn test_move_procedure() {
    let statements = sqlserver(
        vec![
            MigrationOperation::move_procedure("dbo.Foo", Some("crm".to_string())),
            MigrationOperation::move_procedure("dbo.Bar", Some("crm".to_string())),
        ],
        "2008",
    );
    assert_eq!(
        join(&statements),
        "IF schema_id('crm') IS NULL\n    EXECUTE('CREATE SCHEMA [crm]')\n\
         ALTER SCHEMA [crm] TRANSFER [dbo].[Foo]\n\
         ALTER SCHEMA [crm] TRANSFER [dbo].[Bar]"
    );

    assert_eq!(
        sqlserver_sql(MigrationOperation::move_procedure("crm.Foo", None)),
        "ALTER SCHEMA [dbo] TRANSFER [crm].[Foo]"
    );
}

// =============================================================================
// Raw SQL and history
// =============================================================================

#[test]
fn test_sql_passes_through() {
    let statements = sqlserver(
        vec![
            MigrationOperation::sql("insert into foo"),
            SqlOperation::new("CREATE DATABASE Foo").suppress_transaction().into(),
        ],
        "2008",
    );
    assert_eq!(statements[0].sql, "insert into foo");
    assert!(!statements[0].suppress_transaction);
    assert_eq!(statements[1].sql, "CREATE DATABASE Foo");
    assert!(statements[1].suppress_transaction);
    assert!(statements.iter().all(|s| s.batch_terminator.is_none()));
}

#[test]
fn test_history_commands_inline_parameters() {
    let insert = HistoryCommand::new("insert Foo (Bar) values (@p0)").parameter("@p0", "Baz");
    let delete = HistoryCommand::new("delete Foo where Bar = @p0").parameter("@p0", "Baz");

    assert_eq!(
        sqlserver_sql(HistoryOperation::new(vec![insert.clone()])),
        "INSERT Foo (Bar) VALUES ('Baz')"
    );
    assert_eq!(
        sqlserver_sql(HistoryOperation::new(vec![delete.clone()])),
        "DELETE Foo WHERE Bar = 'Baz'"
    );

    let statements = sqlserver(vec![HistoryOperation::new(vec![insert, delete]).into()], "2008");
    assert_eq!(statements.len(), 1);
    assert_eq!(
        statements[0].sql,
        "INSERT Foo (Bar) VALUES ('Baz')DELETE Foo WHERE Bar = 'Baz'"
    );
}

#[test]
fn test_history_parameter_literals() {
    let created = NaiveDate::from_ymd_opt(2013, 2, 1)
        .unwrap()
        .and_hms_opt(12, 30, 0)
        .unwrap();
    let command = HistoryCommand::new("insert H (Model, At, Ok) values (@p0, @p1, @p2)")
        .parameter("@p0", vec![0xDEu8, 0xAD])
        .parameter("@p1", created)
        .parameter("@p2", true);

    assert_eq!(
        sqlserver_sql(HistoryOperation::new(vec![command])),
        "INSERT H (Model, At, Ok) VALUES (0xDEAD, '2013-02-01T12:30:00.000', 1)"
    );
}

// =============================================================================
// Generator contract
// =============================================================================

#[test]
fn test_generation_is_idempotent() {
    let operations: Vec<MigrationOperation> = vec![
        customers_table("foo.Customers").into(),
        MigrationOperation::drop_column("foo.Customers", "Name"),
        customer_fk(true).into(),
    ];
    let generator = SqlServerMigrationSqlGenerator::new();
    let first = generator.generate(&operations, "2012").unwrap();
    let second = generator.generate(&operations, "2012").unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_unknown_operation() {
    let op = CustomOperation::new("my_app::migrations::MergeTables");
    let err = SqlServerMigrationSqlGenerator::new()
        .generate(&[MigrationOperation::from(op)], "2008")
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "The current migration SQL generator (SqlServerMigrationSqlGenerator) is unable to generate SQL for operations of type 'my_app::migrations::MergeTables'."
    );
}

#[test]
fn test_manifest_tokens() {
    let generator = SqlServerMigrationSqlGenerator::new();
    let op = vec![MigrationOperation::drop_table("T")];

    for token in ["2000", "2005", "2008", "2012", "2012.Azure"] {
        assert_eq!(generator.generate(&op, token).unwrap().len(), 1);
    }
    assert!(matches!(
        generator.generate(&op, "2014"),
        Err(MigrationSqlError::UnsupportedManifestToken { token, .. }) if token == "2014"
    ));
}

#[test]
fn test_unsupported_type_for_token() {
    let column = ColumnModel::new(PrimitiveTypeKind::DateTimeOffset, "At");
    let err = SqlServerMigrationSqlGenerator::new()
        .generate(&[MigrationOperation::add_column("T", column)], "2005")
        .unwrap_err();
    assert!(matches!(err, MigrationSqlError::UnsupportedType { .. }));
}

#[test]
fn test_failure_discards_partial_output() {
    let operations = vec![
        MigrationOperation::drop_table("A"),
        CustomOperation::new("Unknown").into(),
    ];
    assert!(SqlServerMigrationSqlGenerator::new()
        .generate(&operations, "2008")
        .is_err());
}

struct CountingFactory {
    opened: AtomicUsize,
    live: Arc<AtomicUsize>,
}

struct TrackedConnection {
    inner: SqlServerConnection,
    live: Arc<AtomicUsize>,
}

impl ProviderConnection for TrackedConnection {
    fn provider_manifest(&self, token: &str) -> Result<Box<dyn ProviderManifest>> {
        self.inner.provider_manifest(token)
    }
}

impl Drop for TrackedConnection {
    fn drop(&mut self) {
        self.live.fetch_sub(1, Ordering::SeqCst);
    }
}

impl ConnectionFactory for CountingFactory {
    fn invariant_name(&self) -> &str {
        SQL_SERVER_INVARIANT_NAME
    }

    fn create_connection(&self) -> Result<Box<dyn ProviderConnection>> {
        self.opened.fetch_add(1, Ordering::SeqCst);
        self.live.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(TrackedConnection {
            inner: SqlServerConnection,
            live: Arc::clone(&self.live),
        }))
    }
}

#[test]
fn test_manifest_resolved_once_per_call() {
    let live = Arc::new(AtomicUsize::new(0));
    let factory = Arc::new(CountingFactory {
        opened: AtomicUsize::new(0),
        live: Arc::clone(&live),
    });
    let generator = SqlServerMigrationSqlGenerator::with_connection_factory(
        SqlServerDialect::new(),
        Arc::clone(&factory) as Arc<dyn ConnectionFactory>,
    );

    let operations = vec![
        MigrationOperation::drop_table("A"),
        MigrationOperation::drop_table("B"),
    ];
    generator.generate(&operations, "2008").unwrap();
    assert_eq!(factory.opened.load(Ordering::SeqCst), 1);
    assert_eq!(live.load(Ordering::SeqCst), 0);

    assert!(generator.generate(&operations, "bogus").is_err());
    assert_eq!(factory.opened.load(Ordering::SeqCst), 2);
    assert_eq!(live.load(Ordering::SeqCst), 0);
}

// =============================================================================
// Operations loaded from JSON
// =============================================================================

#[test]
fn test_operations_from_json() {
    let json = r#"[
        {"CreateTable": {
            "name": "dbo.Products",
            "columns": [
                {"name": "Id", "kind": "Int32", "is_nullable": false, "is_identity": true},
                {"name": "Price", "kind": "Decimal", "precision": 10, "scale": 2,
                 "default_value": {"type": "decimal", "value": "0.00"}}
            ],
            "primary_key": {"columns": ["Id"]}
        }},
        {"AddColumn": {
            "table": "dbo.Products",
            "column": {"name": "Active", "kind": "Boolean", "is_nullable": false}
        }},
        {"Sql": {"sql": "UPDATE dbo.Products SET Active = 1"}}
    ]"#;
    let operations: Vec<MigrationOperation> = serde_json::from_str(json).unwrap();
    let statements = sqlserver(operations, "2008");

    assert_eq!(statements.len(), 3);
    assert_eq!(
        statements[0].sql,
        "CREATE TABLE [dbo].[Products] (\n    \
         [Id] [int] NOT NULL IDENTITY,\n    \
         [Price] [decimal](10, 2) DEFAULT 0.00,\n    \
         CONSTRAINT [PK_dbo.Products] PRIMARY KEY ([Id])\n\
         )"
    );
    assert_eq!(
        statements[1].sql,
        "ALTER TABLE [dbo].[Products] ADD [Active] [bit] NOT NULL DEFAULT 0"
    );
    assert_eq!(statements[2].sql, "UPDATE dbo.Products SET Active = 1");
}
