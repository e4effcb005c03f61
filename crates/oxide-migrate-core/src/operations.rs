//! Migration operations.
//!
//! Each operation describes one provider-agnostic schema change. Operations
//! are produced upstream and treated as read-only input by SQL generators.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::column::{ColumnModel, ParameterModel};
use crate::literal::Literal;

/// Longest constraint or index name a default name is truncated to.
pub const MAX_DEFAULT_NAME_LENGTH: usize = 128;

fn restrict_name(name: String) -> String {
    match name.char_indices().nth(MAX_DEFAULT_NAME_LENGTH) {
        Some((idx, _)) => name[..idx].to_string(),
        None => name,
    }
}

const fn clustered_default() -> bool {
    true
}

/// A single migration operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MigrationOperation {
    /// Create a table.
    CreateTable(CreateTableOperation),
    /// Drop a table.
    DropTable(DropTableOperation),
    /// Add a column to a table.
    AddColumn(AddColumnOperation),
    /// Drop a column from a table.
    DropColumn(DropColumnOperation),
    /// Change a column's type, nullability or default.
    AlterColumn(AlterColumnOperation),
    /// Rename a column.
    RenameColumn(RenameColumnOperation),
    /// Rename a table.
    RenameTable(RenameTableOperation),
    /// Move a table into another schema.
    MoveTable(MoveTableOperation),
    /// Add a foreign key constraint.
    AddForeignKey(AddForeignKeyOperation),
    /// Drop a foreign key constraint.
    DropForeignKey(DropForeignKeyOperation),
    /// Add a primary key constraint.
    AddPrimaryKey(AddPrimaryKeyOperation),
    /// Drop a primary key constraint.
    DropPrimaryKey(DropPrimaryKeyOperation),
    /// Create an index.
    CreateIndex(CreateIndexOperation),
    /// Drop an index.
    DropIndex(DropIndexOperation),
    /// Run caller-supplied SQL.
    Sql(SqlOperation),
    /// Write rows to the migrations history table.
    History(HistoryOperation),
    /// Create a stored procedure.
    CreateProcedure(ProcedureOperation),
    /// Replace the definition of a stored procedure.
    AlterProcedure(ProcedureOperation),
    /// Drop a stored procedure.
    DropProcedure(DropProcedureOperation),
    /// Rename a stored procedure.
    RenameProcedure(RenameProcedureOperation),
    /// Move a stored procedure into another schema.
    MoveProcedure(MoveProcedureOperation),
    /// An operation kind defined outside this crate.
    Custom(CustomOperation),
}

impl MigrationOperation {
    /// Returns the full type name of the operation.
    #[must_use]
    pub fn type_name(&self) -> &str {
        use std::any::type_name;

        match self {
            Self::CreateTable(_) => type_name::<CreateTableOperation>(),
            Self::DropTable(_) => type_name::<DropTableOperation>(),
            Self::AddColumn(_) => type_name::<AddColumnOperation>(),
            Self::DropColumn(_) => type_name::<DropColumnOperation>(),
            Self::AlterColumn(_) => type_name::<AlterColumnOperation>(),
            Self::RenameColumn(_) => type_name::<RenameColumnOperation>(),
            Self::RenameTable(_) => type_name::<RenameTableOperation>(),
            Self::MoveTable(_) => type_name::<MoveTableOperation>(),
            Self::AddForeignKey(_) => type_name::<AddForeignKeyOperation>(),
            Self::DropForeignKey(_) => type_name::<DropForeignKeyOperation>(),
            Self::AddPrimaryKey(_) => type_name::<AddPrimaryKeyOperation>(),
            Self::DropPrimaryKey(_) => type_name::<DropPrimaryKeyOperation>(),
            Self::CreateIndex(_) => type_name::<CreateIndexOperation>(),
            Self::DropIndex(_) => type_name::<DropIndexOperation>(),
            Self::Sql(_) => type_name::<SqlOperation>(),
            Self::History(_) => type_name::<HistoryOperation>(),
            Self::CreateProcedure(_) | Self::AlterProcedure(_) => type_name::<ProcedureOperation>(),
            Self::DropProcedure(_) => type_name::<DropProcedureOperation>(),
            Self::RenameProcedure(_) => type_name::<RenameProcedureOperation>(),
            Self::MoveProcedure(_) => type_name::<MoveProcedureOperation>(),
            Self::Custom(op) => &op.type_name,
        }
    }

    /// Creates a drop table operation.
    #[must_use]
    pub fn drop_table(name: impl Into<String>) -> Self {
        Self::DropTable(DropTableOperation { name: name.into() })
    }

    /// Creates an add column operation.
    #[must_use]
    pub fn add_column(table: impl Into<String>, column: ColumnModel) -> Self {
        Self::AddColumn(AddColumnOperation {
            table: table.into(),
            column,
        })
    }

    /// Creates a drop column operation.
    #[must_use]
    pub fn drop_column(table: impl Into<String>, name: impl Into<String>) -> Self {
        Self::DropColumn(DropColumnOperation {
            table: table.into(),
            name: name.into(),
        })
    }

    /// Creates a non-destructive alter column operation.
    #[must_use]
    pub fn alter_column(table: impl Into<String>, column: ColumnModel) -> Self {
        Self::AlterColumn(AlterColumnOperation {
            table: table.into(),
            column,
            is_destructive_change: false,
        })
    }

    /// Creates a rename column operation.
    #[must_use]
    pub fn rename_column(
        table: impl Into<String>,
        name: impl Into<String>,
        new_name: impl Into<String>,
    ) -> Self {
        Self::RenameColumn(RenameColumnOperation {
            table: table.into(),
            name: name.into(),
            new_name: new_name.into(),
        })
    }

    /// Creates a rename table operation.
    #[must_use]
    pub fn rename_table(name: impl Into<String>, new_name: impl Into<String>) -> Self {
        Self::RenameTable(RenameTableOperation {
            name: name.into(),
            new_name: new_name.into(),
        })
    }

    /// Creates a SQL operation that runs inside the migration transaction.
    #[must_use]
    pub fn sql(sql: impl Into<String>) -> Self {
        Self::Sql(SqlOperation::new(sql))
    }

    /// Creates a create procedure operation.
    #[must_use]
    pub const fn create_procedure(procedure: ProcedureOperation) -> Self {
        Self::CreateProcedure(procedure)
    }

    /// Creates an alter procedure operation.
    #[must_use]
    pub const fn alter_procedure(procedure: ProcedureOperation) -> Self {
        Self::AlterProcedure(procedure)
    }

    /// Creates a drop procedure operation.
    #[must_use]
    pub fn drop_procedure(name: impl Into<String>) -> Self {
        Self::DropProcedure(DropProcedureOperation { name: name.into() })
    }

    /// Creates a rename procedure operation.
    #[must_use]
    pub fn rename_procedure(name: impl Into<String>, new_name: impl Into<String>) -> Self {
        Self::RenameProcedure(RenameProcedureOperation {
            name: name.into(),
            new_name: new_name.into(),
        })
    }

    /// Creates a move procedure operation. `None` moves it to the default
    /// schema.
    #[must_use]
    pub fn move_procedure(name: impl Into<String>, new_schema: Option<String>) -> Self {
        Self::MoveProcedure(MoveProcedureOperation {
            name: name.into(),
            new_schema,
        })
    }
}

macro_rules! impl_from_operation {
    ($($op:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<$op> for MigrationOperation {
                fn from(op: $op) -> Self {
                    Self::$variant(op)
                }
            }
        )*
    };
}

impl_from_operation! {
    CreateTableOperation => CreateTable,
    DropTableOperation => DropTable,
    AddColumnOperation => AddColumn,
    DropColumnOperation => DropColumn,
    AlterColumnOperation => AlterColumn,
    RenameColumnOperation => RenameColumn,
    RenameTableOperation => RenameTable,
    MoveTableOperation => MoveTable,
    AddForeignKeyOperation => AddForeignKey,
    DropForeignKeyOperation => DropForeignKey,
    AddPrimaryKeyOperation => AddPrimaryKey,
    DropPrimaryKeyOperation => DropPrimaryKey,
    CreateIndexOperation => CreateIndex,
    DropIndexOperation => DropIndex,
    SqlOperation => Sql,
    HistoryOperation => History,
    DropProcedureOperation => DropProcedure,
    RenameProcedureOperation => RenameProcedure,
    MoveProcedureOperation => MoveProcedure,
    CustomOperation => Custom,
}

/// Creates a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTableOperation {
    /// Table name, optionally schema qualified.
    pub name: String,
    /// Column definitions in declaration order.
    #[serde(default)]
    pub columns: Vec<ColumnModel>,
    /// Primary key declared inline.
    #[serde(default)]
    pub primary_key: Option<AddPrimaryKeyOperation>,
    /// Whether this is an internal bookkeeping table.
    #[serde(default)]
    pub is_system: bool,
}

impl CreateTableOperation {
    /// Creates a table operation with no columns.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            primary_key: None,
            is_system: false,
        }
    }

    /// Adds a column.
    #[must_use]
    pub fn column(mut self, column: ColumnModel) -> Self {
        self.columns.push(column);
        self
    }

    /// Declares a clustered primary key with the default name.
    #[must_use]
    pub fn primary_key<I, S>(self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let key = AddPrimaryKeyOperation::new(String::new(), columns);
        self.with_primary_key(key)
    }

    /// Declares a primary key. Its table is set to this table.
    #[must_use]
    pub fn with_primary_key(mut self, mut key: AddPrimaryKeyOperation) -> Self {
        key.table.clone_from(&self.name);
        self.primary_key = Some(key);
        self
    }

    /// Marks the table as a system table.
    #[must_use]
    pub const fn system(mut self) -> Self {
        self.is_system = true;
        self
    }

    /// Returns the inline primary key's name, defaulting to `PK_<table>`.
    #[must_use]
    pub fn primary_key_name(&self) -> Option<String> {
        self.primary_key.as_ref().map(|key| {
            key.name
                .clone()
                .unwrap_or_else(|| restrict_name(format!("PK_{}", self.name)))
        })
    }
}

/// Drops a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropTableOperation {
    /// Table name.
    pub name: String,
}

/// Adds a column to a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddColumnOperation {
    /// Table name.
    pub table: String,
    /// Column definition.
    pub column: ColumnModel,
}

/// Drops a column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropColumnOperation {
    /// Table name.
    pub table: String,
    /// Column name.
    pub name: String,
}

/// Alters a column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlterColumnOperation {
    /// Table name.
    pub table: String,
    /// New column definition.
    pub column: ColumnModel,
    /// Whether the change may lose data.
    #[serde(default)]
    pub is_destructive_change: bool,
}

/// Renames a column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameColumnOperation {
    /// Table name.
    pub table: String,
    /// Current column name.
    pub name: String,
    /// New column name.
    pub new_name: String,
}

/// Renames a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameTableOperation {
    /// Current table name, optionally schema qualified.
    pub name: String,
    /// New table name, never schema qualified.
    pub new_name: String,
}

/// Moves a table into another schema.
///
/// System moves relocate the rows of one context from a shared history
/// table, so they also carry the destination table shape and the context key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveTableOperation {
    /// Table name.
    pub name: String,
    /// Destination schema; `dbo` when absent.
    #[serde(default)]
    pub new_schema: Option<String>,
    /// Whether this moves rows of the migrations history table.
    #[serde(default)]
    pub is_system: bool,
    /// Context whose rows are moved.
    #[serde(default)]
    pub context_key: Option<String>,
    /// Destination table, created if missing.
    #[serde(default)]
    pub create_table: Option<Box<CreateTableOperation>>,
}

impl MoveTableOperation {
    /// Creates a plain schema transfer.
    #[must_use]
    pub fn new(name: impl Into<String>, new_schema: Option<String>) -> Self {
        Self {
            name: name.into(),
            new_schema,
            is_system: false,
            context_key: None,
            create_table: None,
        }
    }

    /// Turns this into a history table relocation for one context.
    #[must_use]
    pub fn system(mut self, context_key: impl Into<String>, create_table: CreateTableOperation) -> Self {
        self.is_system = true;
        self.context_key = Some(context_key.into());
        self.create_table = Some(Box::new(create_table));
        self
    }
}

/// Adds a foreign key constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddForeignKeyOperation {
    /// Constraint name; a default is derived when absent.
    #[serde(default)]
    pub name: Option<String>,
    /// Table holding the foreign key.
    pub dependent_table: String,
    /// Columns holding the foreign key.
    pub dependent_columns: Vec<String>,
    /// Referenced table.
    pub principal_table: String,
    /// Referenced columns.
    pub principal_columns: Vec<String>,
    /// Whether deleting a principal row deletes dependents.
    #[serde(default)]
    pub cascade_delete: bool,
}

impl AddForeignKeyOperation {
    /// Returns `FK_<dependent>_<principal>_<columns>`.
    #[must_use]
    pub fn default_name(&self) -> String {
        foreign_key_name(
            &self.dependent_table,
            &self.principal_table,
            &self.dependent_columns,
        )
    }

    /// Returns the explicit name or the default one.
    #[must_use]
    pub fn effective_name(&self) -> String {
        self.name.clone().unwrap_or_else(|| self.default_name())
    }
}

/// Drops a foreign key constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropForeignKeyOperation {
    /// Constraint name; a default is derived when absent.
    #[serde(default)]
    pub name: Option<String>,
    /// Table holding the foreign key.
    pub dependent_table: String,
    /// Columns holding the foreign key.
    #[serde(default)]
    pub dependent_columns: Vec<String>,
    /// Referenced table.
    #[serde(default)]
    pub principal_table: String,
}

impl DropForeignKeyOperation {
    /// Returns `FK_<dependent>_<principal>_<columns>`.
    #[must_use]
    pub fn default_name(&self) -> String {
        foreign_key_name(
            &self.dependent_table,
            &self.principal_table,
            &self.dependent_columns,
        )
    }

    /// Returns the explicit name or the default one.
    #[must_use]
    pub fn effective_name(&self) -> String {
        self.name.clone().unwrap_or_else(|| self.default_name())
    }
}

fn foreign_key_name(dependent: &str, principal: &str, columns: &[String]) -> String {
    restrict_name(format!("FK_{dependent}_{principal}_{}", columns.join("_")))
}

/// Adds a primary key constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddPrimaryKeyOperation {
    /// Constraint name; a default is derived when absent.
    #[serde(default)]
    pub name: Option<String>,
    /// Table name.
    #[serde(default)]
    pub table: String,
    /// Key columns in order.
    pub columns: Vec<String>,
    /// Whether the key is clustered.
    #[serde(default = "clustered_default")]
    pub is_clustered: bool,
}

impl AddPrimaryKeyOperation {
    /// Creates a clustered primary key with the default name.
    #[must_use]
    pub fn new<I, S>(table: impl Into<String>, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: None,
            table: table.into(),
            columns: columns.into_iter().map(Into::into).collect(),
            is_clustered: true,
        }
    }

    /// Sets an explicit constraint name.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Makes the key nonclustered.
    #[must_use]
    pub const fn nonclustered(mut self) -> Self {
        self.is_clustered = false;
        self
    }

    /// Returns `PK_<table>`.
    #[must_use]
    pub fn default_name(&self) -> String {
        restrict_name(format!("PK_{}", self.table))
    }

    /// Returns the explicit name or the default one.
    #[must_use]
    pub fn effective_name(&self) -> String {
        self.name.clone().unwrap_or_else(|| self.default_name())
    }
}

/// Drops a primary key constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropPrimaryKeyOperation {
    /// Constraint name; a default is derived when absent.
    #[serde(default)]
    pub name: Option<String>,
    /// Table name.
    pub table: String,
}

impl DropPrimaryKeyOperation {
    /// Returns `PK_<table>`.
    #[must_use]
    pub fn default_name(&self) -> String {
        restrict_name(format!("PK_{}", self.table))
    }

    /// Returns the explicit name or the default one.
    #[must_use]
    pub fn effective_name(&self) -> String {
        self.name.clone().unwrap_or_else(|| self.default_name())
    }
}

/// Creates an index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateIndexOperation {
    /// Index name; a default is derived when absent.
    #[serde(default)]
    pub name: Option<String>,
    /// Table name.
    pub table: String,
    /// Indexed columns in order.
    pub columns: Vec<String>,
    /// Whether the index is unique.
    #[serde(default)]
    pub is_unique: bool,
    /// Whether the index is clustered.
    #[serde(default)]
    pub is_clustered: bool,
}

impl CreateIndexOperation {
    /// Creates a nonunique, nonclustered index with the default name.
    #[must_use]
    pub fn new<I, S>(table: impl Into<String>, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: None,
            table: table.into(),
            columns: columns.into_iter().map(Into::into).collect(),
            is_unique: false,
            is_clustered: false,
        }
    }

    /// Sets an explicit index name.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Makes the index unique.
    #[must_use]
    pub const fn unique(mut self) -> Self {
        self.is_unique = true;
        self
    }

    /// Makes the index clustered.
    #[must_use]
    pub const fn clustered(mut self) -> Self {
        self.is_clustered = true;
        self
    }

    /// Returns `IX_<columns>`.
    #[must_use]
    pub fn default_name(&self) -> String {
        index_name(&self.columns)
    }

    /// Returns the explicit name or the default one.
    #[must_use]
    pub fn effective_name(&self) -> String {
        self.name.clone().unwrap_or_else(|| self.default_name())
    }
}

/// Drops an index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropIndexOperation {
    /// Index name; a default is derived when absent.
    #[serde(default)]
    pub name: Option<String>,
    /// Table name.
    pub table: String,
    /// Indexed columns, used for the default name.
    #[serde(default)]
    pub columns: Vec<String>,
}

impl DropIndexOperation {
    /// Returns `IX_<columns>`.
    #[must_use]
    pub fn default_name(&self) -> String {
        index_name(&self.columns)
    }

    /// Returns the explicit name or the default one.
    #[must_use]
    pub fn effective_name(&self) -> String {
        self.name.clone().unwrap_or_else(|| self.default_name())
    }
}

fn index_name(columns: &[String]) -> String {
    restrict_name(format!("IX_{}", columns.join("_")))
}

/// Runs SQL verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SqlOperation {
    /// SQL text.
    pub sql: String,
    /// Whether the SQL must run outside the migration transaction.
    #[serde(default)]
    pub suppress_transaction: bool,
}

impl SqlOperation {
    /// Creates a SQL operation.
    #[must_use]
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            suppress_transaction: false,
        }
    }

    /// Runs the SQL outside the migration transaction.
    #[must_use]
    pub const fn suppress_transaction(mut self) -> Self {
        self.suppress_transaction = true;
        self
    }
}

/// Replays parameterized commands against the migrations history table.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HistoryOperation {
    /// Commands in execution order.
    pub commands: Vec<HistoryCommand>,
}

impl HistoryOperation {
    /// Creates a history operation from commands.
    #[must_use]
    pub const fn new(commands: Vec<HistoryCommand>) -> Self {
        Self { commands }
    }
}

/// One parameterized command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryCommand {
    /// Command text with parameter placeholders.
    pub command_text: String,
    /// Parameters bound to the placeholders.
    #[serde(default)]
    pub parameters: Vec<CommandParameter>,
}

impl HistoryCommand {
    /// Creates a command with no parameters.
    #[must_use]
    pub fn new(command_text: impl Into<String>) -> Self {
        Self {
            command_text: command_text.into(),
            parameters: Vec::new(),
        }
    }

    /// Binds a parameter.
    #[must_use]
    pub fn parameter(mut self, name: impl Into<String>, value: impl Into<Literal>) -> Self {
        self.parameters.push(CommandParameter {
            name: name.into(),
            value: value.into(),
        });
        self
    }
}

/// A named command parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandParameter {
    /// Placeholder name, e.g. `@p0`.
    pub name: String,
    /// Bound value.
    pub value: Literal,
}

/// Body and signature of a stored procedure, used to create or alter it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcedureOperation {
    /// Procedure name, optionally schema qualified.
    pub name: String,
    /// Parameters in declaration order.
    #[serde(default)]
    pub parameters: Vec<ParameterModel>,
    /// Statements between `BEGIN` and `END`.
    #[serde(default)]
    pub body_sql: Option<String>,
}

impl ProcedureOperation {
    /// Creates a procedure with no parameters and an empty body.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: Vec::new(),
            body_sql: None,
        }
    }

    /// Adds a parameter.
    #[must_use]
    pub fn parameter(mut self, parameter: ParameterModel) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Sets the body.
    #[must_use]
    pub fn body(mut self, body_sql: impl Into<String>) -> Self {
        self.body_sql = Some(body_sql.into());
        self
    }
}

/// Drops a stored procedure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropProcedureOperation {
    /// Procedure name.
    pub name: String,
}

/// Renames a stored procedure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameProcedureOperation {
    /// Current name, optionally schema qualified.
    pub name: String,
    /// New unqualified name.
    pub new_name: String,
}

/// Moves a stored procedure into another schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveProcedureOperation {
    /// Procedure name.
    pub name: String,
    /// Target schema; `None` means the default schema.
    #[serde(default)]
    pub new_schema: Option<String>,
}

/// An operation kind defined outside this crate.
///
/// Generators fail on these unless a dialect handles them explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomOperation {
    /// Full type name of the operation.
    pub type_name: String,
    /// Operation arguments.
    #[serde(default)]
    pub arguments: BTreeMap<String, String>,
}

impl CustomOperation {
    /// Creates a custom operation with no arguments.
    #[must_use]
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            arguments: BTreeMap::new(),
        }
    }

    /// Adds an argument.
    #[must_use]
    pub fn argument(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.arguments.insert(key.into(), value.into());
        self
    }
}
