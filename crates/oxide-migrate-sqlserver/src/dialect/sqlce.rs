//! SQL Server Compact dialect.
//!
//! Compact has no schemas, no `sp_rename` for columns, no clustered
//! indexes and no system object marking. Names are reduced to their object
//! part and every statement is terminated with `GO`.

use std::fmt::Write as _;
use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use oxide_migrate_core::error::{ensure_not_blank, MigrationSqlError, Result};
use oxide_migrate_core::operations::{
    AlterColumnOperation, CreateIndexOperation, CreateTableOperation, DropColumnOperation,
    DropIndexOperation, DropProcedureOperation, MoveProcedureOperation, MoveTableOperation,
    ProcedureOperation, RenameColumnOperation, RenameProcedureOperation, RenameTableOperation,
    SqlOperation,
};
use oxide_migrate_core::DatabaseName;
use regex::Regex;
use tracing::warn;

use super::{MigrationDialect, BATCH_TERMINATOR};
use crate::provider::SQL_CE_INVARIANT_NAME;
use crate::session::GenerationSession;
use crate::writer::IndentedWriter;

static LINE_CONTINUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\(\r\n|\r|\n)").expect("Invalid line continuation regex"));

static BATCH_SEPARATOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^\s*(GO[ \t]+[0-9]+|GO)(?:\s+|$)").expect("Invalid batch separator regex")
});

/// Splits a script into batches on `GO` lines.
///
/// A trailing `\` joins a line with the next one. `GO n` repeats the
/// preceding batch `n` times. Blank batches are dropped.
#[must_use]
pub fn split_batches(script: &str) -> Vec<String> {
    let script = LINE_CONTINUATION.replace_all(script, "");
    let mut batches = Vec::new();
    let mut start = 0;

    for captures in BATCH_SEPARATOR.captures_iter(&script) {
        let (Some(separator), Some(command)) = (captures.get(0), captures.get(1)) else {
            continue;
        };
        let batch = &script[start..separator.start()];
        start = separator.end();

        if batch.trim().is_empty() {
            continue;
        }
        let repeat = command.as_str()[BATCH_TERMINATOR.len()..]
            .trim()
            .parse::<usize>()
            .unwrap_or(1);
        for _ in 0..repeat {
            batches.push(batch.to_string());
        }
    }

    let rest = &script[start..];
    if !rest.trim().is_empty() {
        batches.push(rest.to_string());
    }
    batches
}

/// SQL Server Compact dialect for migrations.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqlCeDialect;

impl SqlCeDialect {
    /// Creates a new SQL Server Compact dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl MigrationDialect for SqlCeDialect {
    fn generator_name(&self) -> &'static str {
        "SqlCeMigrationSqlGenerator"
    }

    fn provider_invariant_name(&self) -> &'static str {
        SQL_CE_INVARIANT_NAME
    }

    fn batch_terminator(&self) -> Option<&'static str> {
        Some(BATCH_TERMINATOR)
    }

    fn create_schema(&self, _session: &mut GenerationSession, _schema: &str) -> Result<()> {
        Ok(())
    }

    fn make_system_table(&self, op: &CreateTableOperation, _writer: &mut IndentedWriter) {
        warn!(table = %op.name, "SQL Server Compact cannot mark system tables; skipping");
    }

    fn move_table(&self, _session: &mut GenerationSession, op: &MoveTableOperation) -> Result<()> {
        warn!(table = %op.name, "SQL Server Compact has no schemas; skipping table move");
        Ok(())
    }

    fn rename_table(&self, session: &mut GenerationSession, op: &RenameTableOperation) -> Result<()> {
        ensure_not_blank("name", &op.name)?;
        ensure_not_blank("new_name", &op.new_name)?;
        session.statement(format!(
            "EXECUTE sp_rename @objname = N{}, @newname = N{}, @objtype = N'OBJECT'",
            self.string_literal(&DatabaseName::parse(&op.name).name),
            self.string_literal(&op.new_name)
        ))
    }

    fn rename_column(&self, _session: &mut GenerationSession, _op: &RenameColumnOperation) -> Result<()> {
        Err(MigrationSqlError::ColumnRenameNotSupported)
    }

    fn drop_column(&self, session: &mut GenerationSession, op: &DropColumnOperation) -> Result<()> {
        ensure_not_blank("table", &op.table)?;
        ensure_not_blank("name", &op.name)?;
        session.statement(format!(
            "ALTER TABLE {} DROP COLUMN {}",
            self.name(&op.table),
            self.quote(&op.name)
        ))
    }

    fn alter_column(&self, session: &mut GenerationSession, op: &AlterColumnOperation) -> Result<()> {
        ensure_not_blank("table", &op.table)?;
        ensure_not_blank("column", &op.column.name)?;
        let column = &op.column;
        let table = self.name(&op.table);

        let shape = self.column_shape(session, column)?;
        session.statement(format!("ALTER TABLE {table} ALTER COLUMN {shape}"))?;

        if let Some(default) =
            self.default_expression(column.default_value.as_ref(), column.default_sql())?
        {
            session.statement(format!(
                "ALTER TABLE {table} ALTER COLUMN {} SET DEFAULT {default}",
                self.quote(&column.name)
            ))?;
        }
        Ok(())
    }

    fn create_index(&self, session: &mut GenerationSession, op: &CreateIndexOperation) -> Result<()> {
        ensure_not_blank("table", &op.table)?;
        let name = op.effective_name();
        if op.is_clustered {
            warn!(index = %name, "SQL Server Compact only supports nonclustered indexes");
        }

        let mut sql = String::from("CREATE ");
        if op.is_unique {
            sql.push_str("UNIQUE ");
        }
        let _ = write!(
            sql,
            "INDEX {} ON {}({})",
            self.quote(&name),
            self.name(&op.table),
            self.quote_list(&op.columns)
        );
        session.statement(sql)
    }

    fn drop_index(&self, session: &mut GenerationSession, op: &DropIndexOperation) -> Result<()> {
        ensure_not_blank("table", &op.table)?;
        session.statement(format!(
            "DROP INDEX {}.{}",
            self.name(&op.table),
            self.quote(&op.effective_name())
        ))
    }

    fn create_procedure(&self, _session: &mut GenerationSession, op: &ProcedureOperation) -> Result<()> {
        warn!(procedure = %op.name, "SQL Server Compact has no stored procedures; skipping create");
        Ok(())
    }

    fn alter_procedure(&self, _session: &mut GenerationSession, op: &ProcedureOperation) -> Result<()> {
        warn!(procedure = %op.name, "SQL Server Compact has no stored procedures; skipping alter");
        Ok(())
    }

    fn drop_procedure(&self, _session: &mut GenerationSession, op: &DropProcedureOperation) -> Result<()> {
        warn!(procedure = %op.name, "SQL Server Compact has no stored procedures; skipping drop");
        Ok(())
    }

    fn rename_procedure(
        &self,
        _session: &mut GenerationSession,
        op: &RenameProcedureOperation,
    ) -> Result<()> {
        warn!(procedure = %op.name, "SQL Server Compact has no stored procedures; skipping rename");
        Ok(())
    }

    fn move_procedure(&self, _session: &mut GenerationSession, op: &MoveProcedureOperation) -> Result<()> {
        warn!(procedure = %op.name, "SQL Server Compact has no stored procedures; skipping move");
        Ok(())
    }

    fn sql(&self, session: &mut GenerationSession, op: &SqlOperation) -> Result<()> {
        for batch in split_batches(&op.sql) {
            session.statement_with(batch, op.suppress_transaction)?;
        }
        Ok(())
    }

    fn name(&self, name: &str) -> String {
        self.quote(&DatabaseName::parse(name).name)
    }

    fn utc_datetime_literal(&self, value: &DateTime<Utc>) -> String {
        self.datetime_literal(&value.naive_utc())
    }
}
