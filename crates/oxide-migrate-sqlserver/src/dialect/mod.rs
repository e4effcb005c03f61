//! Dialect-specific SQL generation for migrations.
//!
//! [`MigrationDialect`] translates each [`MigrationOperation`] into T-SQL.
//! Its default methods produce SQL Server syntax; dialects for engines in
//! the same family override only the operations they spell differently.

mod sqlce;
mod sqlserver;

pub use sqlce::SqlCeDialect;
pub use sqlserver::SqlServerDialect;

use std::fmt::Write as _;
use std::sync::LazyLock;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Utc};
use oxide_migrate_core::error::{ensure_not_blank, MigrationSqlError, Result};
use oxide_migrate_core::literal::format_timespan;
use oxide_migrate_core::name::{is_default_schema, DEFAULT_SCHEMA};
use oxide_migrate_core::operations::{
    AddColumnOperation, AddForeignKeyOperation, AddPrimaryKeyOperation, AlterColumnOperation,
    CreateIndexOperation, CreateTableOperation, CustomOperation, DropColumnOperation,
    DropForeignKeyOperation, DropIndexOperation, DropPrimaryKeyOperation,
    DropProcedureOperation, DropTableOperation, HistoryOperation, MoveProcedureOperation,
    MoveTableOperation, ProcedureOperation, RenameColumnOperation, RenameProcedureOperation,
    RenameTableOperation, SqlOperation,
};
use oxide_migrate_core::{
    ColumnModel, DatabaseName, Literal, MigrationOperation, ParameterModel, PrimitiveTypeKind,
    SpatialValue, TypeUsage,
};
use regex::{NoExpand, Regex};
use tracing::debug;
use uuid::Uuid;

use crate::session::GenerationSession;
use crate::writer::{IndentedWriter, INDENT};

/// Batch separator understood by SQL Server tooling.
pub const BATCH_TERMINATOR: &str = "GO";

/// Length applied to sized string and binary types without a max length.
pub const DEFAULT_MAX_LENGTH: u32 = 128;

/// Precision applied to `decimal` and `numeric` without a precision.
pub const DEFAULT_NUMERIC_PRECISION: u8 = 18;

/// Scale applied to `decimal` and `numeric` without a scale.
pub const DEFAULT_SCALE: u8 = 0;

/// Fractional-second precision applied to `datetime2`, `datetimeoffset`
/// and `time` without a precision.
pub const DEFAULT_TIME_PRECISION: u8 = 7;

/// Doubles single quotes so `value` can sit inside a T-SQL string literal.
#[must_use]
pub fn escape(value: &str) -> String {
    value.replace('\'', "''")
}

fn implicit_datetime_default() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(1900, 1, 1)
        .unwrap_or_default()
        .and_time(NaiveTime::default())
}

fn is_rowversion_type(store_type: &str) -> bool {
    store_type.eq_ignore_ascii_case("rowversion") || store_type.eq_ignore_ascii_case("timestamp")
}

/// Returns the schema an object is transferred to; blank means the default.
fn transfer_schema(new_schema: Option<&str>) -> &str {
    new_schema
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(DEFAULT_SCHEMA)
}

static BODY_LINE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\r?\n *").expect("Invalid line break regex"));

/// Trait for dialect-specific SQL generation for migrations.
///
/// Every handler appends its statements to the [`GenerationSession`]; none
/// of them keeps state between calls.
pub trait MigrationDialect: Send + Sync {
    /// Returns the generator name reported in errors.
    fn generator_name(&self) -> &'static str;

    /// Returns the invariant name of the provider this dialect targets.
    fn provider_invariant_name(&self) -> &'static str;

    /// Returns the batch separator attached to every statement.
    fn batch_terminator(&self) -> Option<&'static str> {
        None
    }

    /// Generates SQL for one operation.
    ///
    /// # Errors
    ///
    /// Returns an error if the operation is invalid or unsupported.
    fn generate_operation(
        &self,
        session: &mut GenerationSession,
        operation: &MigrationOperation,
    ) -> Result<()> {
        debug!(
            generator = self.generator_name(),
            operation = operation.type_name(),
            "Generating SQL for operation"
        );
        match operation {
            MigrationOperation::CreateTable(op) => self.create_table(session, op),
            MigrationOperation::DropTable(op) => self.drop_table(session, op),
            MigrationOperation::AddColumn(op) => self.add_column(session, op),
            MigrationOperation::DropColumn(op) => self.drop_column(session, op),
            MigrationOperation::AlterColumn(op) => self.alter_column(session, op),
            MigrationOperation::RenameColumn(op) => self.rename_column(session, op),
            MigrationOperation::RenameTable(op) => self.rename_table(session, op),
            MigrationOperation::MoveTable(op) => self.move_table(session, op),
            MigrationOperation::AddForeignKey(op) => self.add_foreign_key(session, op),
            MigrationOperation::DropForeignKey(op) => self.drop_foreign_key(session, op),
            MigrationOperation::AddPrimaryKey(op) => self.add_primary_key(session, op),
            MigrationOperation::DropPrimaryKey(op) => self.drop_primary_key(session, op),
            MigrationOperation::CreateIndex(op) => self.create_index(session, op),
            MigrationOperation::DropIndex(op) => self.drop_index(session, op),
            MigrationOperation::Sql(op) => self.sql(session, op),
            MigrationOperation::History(op) => self.history(session, op),
            MigrationOperation::CreateProcedure(op) => self.create_procedure(session, op),
            MigrationOperation::AlterProcedure(op) => self.alter_procedure(session, op),
            MigrationOperation::DropProcedure(op) => self.drop_procedure(session, op),
            MigrationOperation::RenameProcedure(op) => self.rename_procedure(session, op),
            MigrationOperation::MoveProcedure(op) => self.move_procedure(session, op),
            MigrationOperation::Custom(op) => self.custom(session, op),
        }
    }

    /// Generates SQL for an operation kind this crate does not define.
    ///
    /// # Errors
    ///
    /// Fails with [`MigrationSqlError::UnknownOperation`] unless overridden.
    fn custom(&self, _session: &mut GenerationSession, op: &CustomOperation) -> Result<()> {
        Err(MigrationSqlError::UnknownOperation {
            generator: self.generator_name().to_string(),
            operation_type: op.type_name.clone(),
        })
    }

    // ========================================================================
    // Tables and schemas
    // ========================================================================

    /// Generates SQL for CREATE TABLE, preceded by a schema guard on first
    /// use of a non-default schema.
    ///
    /// # Errors
    ///
    /// Returns an error if a name is blank or a column type cannot be mapped.
    fn create_table(&self, session: &mut GenerationSession, op: &CreateTableOperation) -> Result<()> {
        ensure_not_blank("name", &op.name)?;
        if let Some(schema) = DatabaseName::parse(&op.name).schema {
            self.ensure_schema(session, &schema)?;
        }

        let mut writer = IndentedWriter::new();
        self.write_create_table(session, op, &mut writer)?;
        session.statement(writer.into_string())
    }

    /// Writes the CREATE TABLE text at the writer's current indent level.
    ///
    /// # Errors
    ///
    /// Returns an error if the table has no columns, a name is blank or a
    /// column type cannot be mapped.
    fn write_create_table(
        &self,
        session: &GenerationSession,
        op: &CreateTableOperation,
        writer: &mut IndentedWriter,
    ) -> Result<()> {
        if op.columns.is_empty() {
            return Err(MigrationSqlError::InvalidArgument {
                argument: "columns",
                reason: format!("table '{}' has no columns", op.name),
            });
        }

        writer.write("CREATE TABLE ");
        writer.write(&self.name(&op.name));
        writer.write_line(" (");
        writer.indent();

        let count = op.columns.len();
        for (i, column) in op.columns.iter().enumerate() {
            self.column_definition(session, column, writer)?;
            if i + 1 < count {
                writer.write_line(",");
            }
        }

        if let (Some(key), Some(key_name)) = (&op.primary_key, op.primary_key_name()) {
            writer.write_line(",");
            writer.write("CONSTRAINT ");
            writer.write(&self.quote(&key_name));
            writer.write(" PRIMARY KEY ");
            if !key.is_clustered {
                writer.write("NONCLUSTERED ");
            }
            writer.write("(");
            writer.write(&self.quote_list(&key.columns));
            writer.write_line(")");
        } else {
            writer.new_line();
        }

        writer.outdent();
        writer.write(")");

        if op.is_system {
            self.make_system_table(op, writer);
        }
        Ok(())
    }

    /// Writes the block that marks a table as a system object.
    fn make_system_table(&self, op: &CreateTableOperation, writer: &mut IndentedWriter) {
        writer.new_line();
        writer.write_line("BEGIN TRY");
        writer.indent();
        writer.write("EXEC sp_MS_marksystemobject ");
        writer.write_line(&self.string_literal(&op.name));
        writer.outdent();
        writer.write_line("END TRY");
        writer.write_line("BEGIN CATCH");
        writer.write("END CATCH");
    }

    /// Emits a schema guard unless the schema is the default one or was
    /// already handled in this call.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`MigrationDialect::create_schema`].
    fn ensure_schema(&self, session: &mut GenerationSession, schema: &str) -> Result<()> {
        if is_default_schema(schema) || session.is_schema_generated(schema) {
            return Ok(());
        }
        self.create_schema(session, schema)?;
        session.mark_schema_generated(schema);
        Ok(())
    }

    /// Generates the statement that creates a schema if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the schema name is blank.
    fn create_schema(&self, session: &mut GenerationSession, schema: &str) -> Result<()> {
        ensure_not_blank("schema", schema)?;
        debug!(schema, "Emitting schema guard");

        let mut writer = IndentedWriter::new();
        writer.write("IF schema_id(");
        writer.write(&self.string_literal(schema));
        writer.write_line(") IS NULL");
        writer.indent();
        writer.write("EXECUTE('CREATE SCHEMA ");
        writer.write(&self.quote(schema));
        writer.write("')");
        session.statement(writer.into_string())
    }

    /// Generates SQL for DROP TABLE.
    ///
    /// # Errors
    ///
    /// Returns an error if the table name is blank.
    fn drop_table(&self, session: &mut GenerationSession, op: &DropTableOperation) -> Result<()> {
        ensure_not_blank("name", &op.name)?;
        session.statement(format!("DROP TABLE {}", self.name(&op.name)))
    }

    /// Generates SQL for a table rename.
    ///
    /// # Errors
    ///
    /// Returns an error if a name is blank.
    fn rename_table(&self, session: &mut GenerationSession, op: &RenameTableOperation) -> Result<()> {
        ensure_not_blank("name", &op.name)?;
        ensure_not_blank("new_name", &op.new_name)?;
        session.statement(format!(
            "EXECUTE sp_rename @objname = N{}, @newname = N{}, @objtype = N'OBJECT'",
            self.string_literal(&op.name),
            self.string_literal(&op.new_name)
        ))
    }

    /// Generates SQL that moves a table into another schema.
    ///
    /// A system move copies the rows of one context out of a shared history
    /// table into its own table and drops the source once it is empty.
    ///
    /// # Errors
    ///
    /// Returns an error if a name is blank, or if a system move lacks its
    /// destination table or context key.
    fn move_table(&self, session: &mut GenerationSession, op: &MoveTableOperation) -> Result<()> {
        ensure_not_blank("name", &op.name)?;
        let new_schema = transfer_schema(op.new_schema.as_deref());
        self.ensure_schema(session, new_schema)?;

        if !op.is_system {
            return session.statement(format!(
                "ALTER SCHEMA {} TRANSFER {}",
                self.quote(new_schema),
                self.name(&op.name)
            ));
        }

        let create = op
            .create_table
            .as_deref()
            .ok_or_else(|| MigrationSqlError::InvalidArgument {
                argument: "create_table",
                reason: "a system table move requires the destination table".to_string(),
            })?;
        let context_key = op
            .context_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| MigrationSqlError::blank("context_key"))?;
        ensure_not_blank("create_table.name", &create.name)?;

        let source = self.name(&op.name);
        let key = self.string_literal(context_key);

        let mut writer = IndentedWriter::new();
        writer.write("IF object_id(");
        writer.write(&self.string_literal(&create.name));
        writer.write_line(") IS NULL BEGIN");
        writer.indent();
        self.write_create_table(session, create, &mut writer)?;
        writer.new_line();
        writer.outdent();
        writer.write_line("END");

        writer.write("INSERT INTO ");
        writer.write_line(&self.name(&create.name));
        writer.write("SELECT * FROM ");
        writer.write_line(&source);
        writer.write("WHERE [ContextKey] = ");
        writer.write_line(&key);

        writer.write("DELETE ");
        writer.write_line(&source);
        writer.write("WHERE [ContextKey] = ");
        writer.write_line(&key);

        writer.write("IF NOT EXISTS(SELECT * FROM ");
        writer.write(&source);
        writer.write_line(")");
        writer.indent();
        writer.write("DROP TABLE ");
        writer.write(&source);
        writer.outdent();

        session.statement(writer.into_string())
    }

    // ========================================================================
    // Columns
    // ========================================================================

    /// Generates SQL for ADD COLUMN.
    ///
    /// A NOT NULL column without any default gets the zero value of its type
    /// so existing rows stay valid.
    ///
    /// # Errors
    ///
    /// Returns an error if a name is blank or the column type cannot be mapped.
    fn add_column(&self, session: &mut GenerationSession, op: &AddColumnOperation) -> Result<()> {
        ensure_not_blank("table", &op.table)?;
        let column = &op.column;

        let mut writer = IndentedWriter::new();
        writer.write("ALTER TABLE ");
        writer.write(&self.name(&op.table));
        writer.write(" ADD ");
        self.column_definition(session, column, &mut writer)?;

        let needs_default = column.is_not_null()
            && !column.has_default()
            && !column.is_identity
            && !column.is_timestamp
            && !column.explicit_store_type().is_some_and(is_rowversion_type);

        if needs_default {
            let value = if column.kind == PrimitiveTypeKind::DateTime {
                Literal::DateTime(implicit_datetime_default())
            } else {
                column.clr_default_value()
            };
            writer.write(" DEFAULT ");
            writer.write(&self.literal(&value)?);
        }

        session.statement(writer.into_string())
    }

    /// Generates SQL for DROP COLUMN, dropping any default constraint on the
    /// column first.
    ///
    /// # Errors
    ///
    /// Returns an error if a name is blank.
    fn drop_column(&self, session: &mut GenerationSession, op: &DropColumnOperation) -> Result<()> {
        ensure_not_blank("table", &op.table)?;
        ensure_not_blank("name", &op.name)?;
        let variable = session.next_variable();
        let table = self.name(&op.table);

        let mut writer = IndentedWriter::new();
        writer.write("DECLARE ");
        writer.write(&variable);
        writer.write_line(" nvarchar(128)");
        writer.write("SELECT ");
        writer.write(&variable);
        writer.write_line(" = name");
        writer.write_line("FROM sys.default_constraints");
        writer.write("WHERE parent_object_id = object_id(N");
        writer.write(&self.string_literal(&op.table));
        writer.write_line(")");
        writer.write("AND col_name(parent_object_id, parent_column_id) = ");
        writer.write(&self.string_literal(&op.name));
        writer.write_line(";");
        writer.write("IF ");
        writer.write(&variable);
        writer.write_line(" IS NOT NULL");
        writer.indent();
        writer.write("EXECUTE('ALTER TABLE ");
        writer.write(&table);
        writer.write(" DROP CONSTRAINT ' + ");
        writer.write(&variable);
        writer.write_line(")");
        writer.outdent();
        writer.write("ALTER TABLE ");
        writer.write(&table);
        writer.write(" DROP COLUMN ");
        writer.write(&self.quote(&op.name));

        session.statement(writer.into_string())
    }

    /// Generates SQL for ALTER COLUMN: a named default constraint when the
    /// column has a default, then the column alteration.
    ///
    /// # Errors
    ///
    /// Returns an error if a name is blank or the column type cannot be mapped.
    fn alter_column(&self, session: &mut GenerationSession, op: &AlterColumnOperation) -> Result<()> {
        ensure_not_blank("table", &op.table)?;
        ensure_not_blank("column", &op.column.name)?;
        let column = &op.column;
        let table = self.name(&op.table);

        if let Some(default) =
            self.default_expression(column.default_value.as_ref(), column.default_sql())?
        {
            session.statement(format!(
                "ALTER TABLE {table} ADD CONSTRAINT DF_{} DEFAULT {default} FOR {}",
                column.name,
                self.quote(&column.name)
            ))?;
        }

        session.statement(format!(
            "ALTER TABLE {table} ALTER COLUMN {}",
            self.column_shape(session, column)?
        ))
    }

    /// Generates SQL for a column rename.
    ///
    /// # Errors
    ///
    /// Returns an error if a name is blank.
    fn rename_column(&self, session: &mut GenerationSession, op: &RenameColumnOperation) -> Result<()> {
        ensure_not_blank("table", &op.table)?;
        ensure_not_blank("name", &op.name)?;
        ensure_not_blank("new_name", &op.new_name)?;
        session.statement(format!(
            "EXECUTE sp_rename @objname = N{}, @newname = N{}, @objtype = N'COLUMN'",
            self.string_literal(&format!("{}.{}", op.table, op.name)),
            self.string_literal(&op.new_name)
        ))
    }

    /// Writes `<name> <type>[ NOT NULL]` followed by the column's default
    /// or identity clause.
    ///
    /// # Errors
    ///
    /// Returns an error if the column name is blank or its type cannot be
    /// mapped.
    fn column_definition(
        &self,
        session: &GenerationSession,
        column: &ColumnModel,
        writer: &mut IndentedWriter,
    ) -> Result<()> {
        writer.write(&self.column_shape(session, column)?);

        if let Some(default) =
            self.default_expression(column.default_value.as_ref(), column.default_sql())?
        {
            writer.write(" DEFAULT ");
            writer.write(&default);
        } else if column.is_identity {
            if column.kind == PrimitiveTypeKind::Guid {
                writer.write(" DEFAULT newid()");
            } else {
                writer.write(" IDENTITY");
            }
        }
        Ok(())
    }

    /// Returns `<name> <type>[ NOT NULL]`.
    ///
    /// # Errors
    ///
    /// Returns an error if the column name is blank or its type cannot be
    /// mapped.
    fn column_shape(&self, session: &GenerationSession, column: &ColumnModel) -> Result<String> {
        ensure_not_blank("column", &column.name)?;
        let column_type = if column.is_timestamp {
            "rowversion".to_string()
        } else {
            self.store_type(session, column.explicit_store_type(), &column.type_usage())?
        };
        let mut shape = format!("{} {column_type}", self.quote(&column.name));
        if column.is_not_null() {
            shape.push_str(" NOT NULL");
        }
        Ok(shape)
    }

    /// Returns the default expression of a column or parameter. A constant
    /// default wins over a SQL default.
    ///
    /// # Errors
    ///
    /// Returns an error if the constant cannot be written as a literal.
    fn default_expression(&self, value: Option<&Literal>, sql: Option<&str>) -> Result<Option<String>> {
        match value {
            Some(value) => self.literal(value).map(Some),
            None => Ok(sql.map(str::to_string)),
        }
    }

    /// Returns a quoted store type with its facets. An explicit store type
    /// bypasses the manifest.
    ///
    /// # Errors
    ///
    /// Returns an error if the manifest has no store type for the usage.
    fn store_type(
        &self,
        session: &GenerationSession,
        explicit: Option<&str>,
        usage: &TypeUsage,
    ) -> Result<String> {
        let original = match explicit {
            Some(store_type) => store_type.to_string(),
            None => session.store_type(usage)?,
        };

        let mut store_type = original.strip_suffix("(max)").map_or_else(
            || self.quote(&original),
            |base| format!("{}(max)", self.quote(base)),
        );

        match original.as_str() {
            "decimal" | "numeric" => {
                let _ = write!(
                    store_type,
                    "({}, {})",
                    usage.precision.unwrap_or(DEFAULT_NUMERIC_PRECISION),
                    usage.scale.unwrap_or(DEFAULT_SCALE)
                );
            }
            "datetime2" | "datetimeoffset" | "time" => {
                let _ = write!(
                    store_type,
                    "({})",
                    usage.precision.unwrap_or(DEFAULT_TIME_PRECISION)
                );
            }
            "binary" | "varbinary" | "nvarchar" | "varchar" | "char" | "nchar" => {
                let _ = write!(
                    store_type,
                    "({})",
                    usage.max_length.unwrap_or(DEFAULT_MAX_LENGTH)
                );
            }
            _ => {}
        }

        Ok(store_type)
    }

    // ========================================================================
    // Constraints and indexes
    // ========================================================================

    /// Generates SQL for ADD FOREIGN KEY.
    ///
    /// # Errors
    ///
    /// Returns an error if a table name is blank.
    fn add_foreign_key(&self, session: &mut GenerationSession, op: &AddForeignKeyOperation) -> Result<()> {
        ensure_not_blank("dependent_table", &op.dependent_table)?;
        ensure_not_blank("principal_table", &op.principal_table)?;

        let mut sql = format!(
            "ALTER TABLE {} ADD CONSTRAINT {} FOREIGN KEY ({}) REFERENCES {} ({})",
            self.name(&op.dependent_table),
            self.quote(&op.effective_name()),
            self.quote_list(&op.dependent_columns),
            self.name(&op.principal_table),
            self.quote_list(&op.principal_columns)
        );
        if op.cascade_delete {
            sql.push_str(" ON DELETE CASCADE");
        }
        session.statement(sql)
    }

    /// Generates SQL for DROP FOREIGN KEY.
    ///
    /// # Errors
    ///
    /// Returns an error if the dependent table name is blank.
    fn drop_foreign_key(&self, session: &mut GenerationSession, op: &DropForeignKeyOperation) -> Result<()> {
        ensure_not_blank("dependent_table", &op.dependent_table)?;
        session.statement(format!(
            "ALTER TABLE {} DROP CONSTRAINT {}",
            self.name(&op.dependent_table),
            self.quote(&op.effective_name())
        ))
    }

    /// Generates SQL for ADD PRIMARY KEY.
    ///
    /// # Errors
    ///
    /// Returns an error if the table name is blank.
    fn add_primary_key(&self, session: &mut GenerationSession, op: &AddPrimaryKeyOperation) -> Result<()> {
        ensure_not_blank("table", &op.table)?;
        let mut sql = format!(
            "ALTER TABLE {} ADD CONSTRAINT {} PRIMARY KEY ",
            self.name(&op.table),
            self.quote(&op.effective_name())
        );
        if !op.is_clustered {
            sql.push_str("NONCLUSTERED ");
        }
        let _ = write!(sql, "({})", self.quote_list(&op.columns));
        session.statement(sql)
    }

    /// Generates SQL for DROP PRIMARY KEY.
    ///
    /// # Errors
    ///
    /// Returns an error if the table name is blank.
    fn drop_primary_key(&self, session: &mut GenerationSession, op: &DropPrimaryKeyOperation) -> Result<()> {
        ensure_not_blank("table", &op.table)?;
        session.statement(format!(
            "ALTER TABLE {} DROP CONSTRAINT {}",
            self.name(&op.table),
            self.quote(&op.effective_name())
        ))
    }

    /// Generates SQL for CREATE INDEX.
    ///
    /// # Errors
    ///
    /// Returns an error if the table name is blank.
    fn create_index(&self, session: &mut GenerationSession, op: &CreateIndexOperation) -> Result<()> {
        ensure_not_blank("table", &op.table)?;
        let mut sql = String::from("CREATE ");
        if op.is_unique {
            sql.push_str("UNIQUE ");
        }
        if op.is_clustered {
            sql.push_str("CLUSTERED ");
        }
        let _ = write!(
            sql,
            "INDEX {} ON {}({})",
            self.quote(&op.effective_name()),
            self.name(&op.table),
            self.quote_list(&op.columns)
        );
        session.statement(sql)
    }

    /// Generates SQL for DROP INDEX.
    ///
    /// # Errors
    ///
    /// Returns an error if the table name is blank.
    fn drop_index(&self, session: &mut GenerationSession, op: &DropIndexOperation) -> Result<()> {
        ensure_not_blank("table", &op.table)?;
        session.statement(format!(
            "DROP INDEX {} ON {}",
            self.quote(&op.effective_name()),
            self.name(&op.table)
        ))
    }

    // ========================================================================
    // Stored procedures
    // ========================================================================

    /// Generates SQL for CREATE PROCEDURE in its own batch.
    ///
    /// # Errors
    ///
    /// Returns an error if a name is blank, a parameter type cannot be mapped
    /// or a parameter default cannot be written as a literal.
    fn create_procedure(&self, session: &mut GenerationSession, op: &ProcedureOperation) -> Result<()> {
        self.write_procedure(session, op, "CREATE")
    }

    /// Generates SQL for ALTER PROCEDURE in its own batch.
    ///
    /// # Errors
    ///
    /// Returns an error if a name is blank, a parameter type cannot be mapped
    /// or a parameter default cannot be written as a literal.
    fn alter_procedure(&self, session: &mut GenerationSession, op: &ProcedureOperation) -> Result<()> {
        self.write_procedure(session, op, "ALTER")
    }

    /// Writes `<modifier> PROCEDURE`, the parameter list and the body. Body
    /// lines are re-indented one level inside `BEGIN`/`END`; an empty body
    /// becomes `RETURN`.
    ///
    /// # Errors
    ///
    /// Returns an error if a name is blank, a parameter type cannot be mapped
    /// or a parameter default cannot be written as a literal.
    fn write_procedure(
        &self,
        session: &mut GenerationSession,
        op: &ProcedureOperation,
        modifier: &str,
    ) -> Result<()> {
        ensure_not_blank("name", &op.name)?;

        let mut writer = IndentedWriter::new();
        writer.write(modifier);
        writer.write(" PROCEDURE ");
        writer.write_line(&self.name(&op.name));
        writer.indent();

        let count = op.parameters.len();
        for (i, parameter) in op.parameters.iter().enumerate() {
            self.parameter_definition(session, parameter, &mut writer)?;
            writer.write_line(if i + 1 < count { "," } else { "" });
        }

        writer.outdent();
        writer.write_line("AS");
        writer.write_line("BEGIN");
        writer.indent();

        match op.body_sql.as_deref().filter(|body| !body.trim().is_empty()) {
            Some(body) => {
                let line_break = format!("\n{}", INDENT.repeat(writer.level()));
                writer.write_line(&BODY_LINE_BREAK.replace_all(body, NoExpand(&line_break)));
            }
            None => writer.write_line("RETURN"),
        }

        writer.outdent();
        writer.write("END");

        session.batch_statement(writer.into_string(), BATCH_TERMINATOR)
    }

    /// Writes `@<name> <type>[ OUT][ = <default>]`.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameter name is blank, its type cannot be
    /// mapped or its default cannot be written as a literal.
    fn parameter_definition(
        &self,
        session: &GenerationSession,
        parameter: &ParameterModel,
        writer: &mut IndentedWriter,
    ) -> Result<()> {
        ensure_not_blank("parameter", &parameter.name)?;
        writer.write("@");
        writer.write(&parameter.name);
        writer.write(" ");
        writer.write(&self.store_type(
            session,
            parameter.explicit_store_type(),
            &parameter.type_usage(),
        )?);

        if parameter.is_out_parameter {
            writer.write(" OUT");
        }

        if let Some(default) =
            self.default_expression(parameter.default_value.as_ref(), parameter.default_sql())?
        {
            writer.write(" = ");
            writer.write(&default);
        }
        Ok(())
    }

    /// Generates SQL for DROP PROCEDURE.
    ///
    /// # Errors
    ///
    /// Returns an error if the procedure name is blank.
    fn drop_procedure(&self, session: &mut GenerationSession, op: &DropProcedureOperation) -> Result<()> {
        ensure_not_blank("name", &op.name)?;
        session.statement(format!("DROP PROCEDURE {}", self.name(&op.name)))
    }

    /// Generates SQL for a procedure rename.
    ///
    /// # Errors
    ///
    /// Returns an error if a name is blank.
    fn rename_procedure(
        &self,
        session: &mut GenerationSession,
        op: &RenameProcedureOperation,
    ) -> Result<()> {
        ensure_not_blank("name", &op.name)?;
        ensure_not_blank("new_name", &op.new_name)?;
        session.statement(format!(
            "EXECUTE sp_rename @objname = N{}, @newname = N{}, @objtype = N'OBJECT'",
            self.string_literal(&op.name),
            self.string_literal(&op.new_name)
        ))
    }

    /// Generates SQL that moves a procedure into another schema, preceded by
    /// a schema guard when needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the procedure name is blank.
    fn move_procedure(&self, session: &mut GenerationSession, op: &MoveProcedureOperation) -> Result<()> {
        ensure_not_blank("name", &op.name)?;
        let new_schema = transfer_schema(op.new_schema.as_deref());
        self.ensure_schema(session, new_schema)?;
        session.statement(format!(
            "ALTER SCHEMA {} TRANSFER {}",
            self.quote(new_schema),
            self.name(&op.name)
        ))
    }

    // ========================================================================
    // Raw SQL and history
    // ========================================================================

    /// Passes user SQL through unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if the SQL is blank.
    fn sql(&self, session: &mut GenerationSession, op: &SqlOperation) -> Result<()> {
        session.statement_with(op.sql.clone(), op.suppress_transaction)
    }

    /// Inlines history command parameters and emits all commands as one
    /// statement.
    ///
    /// # Errors
    ///
    /// Returns an error if the operation has no command text or a parameter
    /// value cannot be written as a literal.
    fn history(&self, session: &mut GenerationSession, op: &HistoryOperation) -> Result<()> {
        let mut writer = IndentedWriter::new();
        for command in &op.commands {
            let mut sql = command
                .command_text
                .replace("insert ", "INSERT ")
                .replace("values ", "VALUES ")
                .replace("delete ", "DELETE ")
                .replace("where ", "WHERE ");
            for parameter in &command.parameters {
                sql = sql.replace(&parameter.name, &self.literal(&parameter.value)?);
            }
            writer.write(&sql);
        }
        session.statement(writer.into_string())
    }

    // ========================================================================
    // Identifiers
    // ========================================================================

    /// Quotes a possibly schema-qualified name, e.g. `[dbo].[Customers]`.
    fn name(&self, name: &str) -> String {
        let parsed = DatabaseName::parse(name);
        match parsed.schema {
            Some(schema) => format!("{}.{}", self.quote(&schema), self.quote(&parsed.name)),
            None => self.quote(&parsed.name),
        }
    }

    /// Quotes an identifier.
    fn quote(&self, identifier: &str) -> String {
        format!("[{identifier}]")
    }

    /// Quotes identifiers and joins them with `", "`.
    fn quote_list(&self, identifiers: &[String]) -> String {
        identifiers
            .iter()
            .map(|c| self.quote(c))
            .collect::<Vec<_>>()
            .join(", ")
    }

    // ========================================================================
    // Literals
    // ========================================================================

    /// Renders a constant as a SQL literal.
    ///
    /// # Errors
    ///
    /// Returns an error for values SQL cannot express, such as `NaN`.
    fn literal(&self, value: &Literal) -> Result<String> {
        Ok(match value {
            Literal::Bool(v) => self.bool_literal(*v),
            Literal::Bytes(v) => self.bytes_literal(v),
            Literal::DateTime(v) => self.datetime_literal(v),
            Literal::UtcDateTime(v) => self.utc_datetime_literal(v),
            Literal::DateTimeOffset(v) => self.datetime_offset_literal(v),
            Literal::Guid(v) => self.guid_literal(v),
            Literal::String(v) => self.string_literal(v),
            Literal::TimeSpan(v) => self.timespan_literal(*v),
            Literal::Geography(v) => self.geography_literal(v),
            Literal::Geometry(v) => self.geometry_literal(v),
            Literal::Integer(v) => v.to_string(),
            Literal::Float(v) => self.float_literal(*v)?,
            Literal::Decimal(v) => v.clone(),
        })
    }

    /// Plain notation, or `E` notation for magnitudes too large or too small
    /// for a `numeric` constant.
    ///
    /// # Errors
    ///
    /// Returns an error for `NaN` and infinities.
    fn float_literal(&self, value: f64) -> Result<String> {
        if !value.is_finite() {
            return Err(MigrationSqlError::InvalidArgument {
                argument: "value",
                reason: format!("{value} cannot be written as a SQL literal"),
            });
        }
        let magnitude = value.abs();
        if magnitude > 0.0 && !(1e-5..1e15).contains(&magnitude) {
            return Ok(format!("{value:E}"));
        }
        Ok(value.to_string())
    }

    /// `1` or `0`.
    fn bool_literal(&self, value: bool) -> String {
        String::from(if value { "1" } else { "0" })
    }

    /// `0x` followed by upper-case hex digits.
    fn bytes_literal(&self, value: &[u8]) -> String {
        let mut out = String::with_capacity(2 + value.len() * 2);
        out.push_str("0x");
        for byte in value {
            let _ = write!(out, "{byte:02X}");
        }
        out
    }

    fn datetime_literal(&self, value: &NaiveDateTime) -> String {
        format!("'{}'", value.format("%Y-%m-%dT%H:%M:%S%.3f"))
    }

    fn utc_datetime_literal(&self, value: &DateTime<Utc>) -> String {
        format!("'{}'", value.format("%Y-%m-%dT%H:%M:%S%.3fZ"))
    }

    fn datetime_offset_literal(&self, value: &DateTime<FixedOffset>) -> String {
        format!("'{}'", value.format("%Y-%m-%dT%H:%M:%S%.3f%:z"))
    }

    fn guid_literal(&self, value: &Uuid) -> String {
        format!("'{}'", value.hyphenated())
    }

    /// Wraps text in single quotes, doubling embedded quotes.
    fn string_literal(&self, value: &str) -> String {
        format!("'{}'", escape(value))
    }

    fn timespan_literal(&self, value: TimeDelta) -> String {
        format!("'{}'", format_timespan(value))
    }

    fn geography_literal(&self, value: &SpatialValue) -> String {
        self.string_literal(&value.to_string())
    }

    fn geometry_literal(&self, value: &SpatialValue) -> String {
        self.string_literal(&value.to_string())
    }
}
