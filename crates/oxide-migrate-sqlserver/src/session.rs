//! State scoped to a single `generate` call.

use std::collections::HashSet;
use std::fmt;

use oxide_migrate_core::error::{ensure_not_blank, Result};
use oxide_migrate_core::{MigrationStatement, ProviderManifest, TypeUsage};

/// Accumulates statements and bookkeeping while one operation list is
/// translated.
///
/// A session is created per call, so nothing leaks between calls: the
/// variable counter restarts at 0 and every schema guard is emitted again.
pub struct GenerationSession {
    statements: Vec<MigrationStatement>,
    generated_schemas: HashSet<String>,
    variable_counter: usize,
    manifest: Box<dyn ProviderManifest>,
    batch_terminator: Option<&'static str>,
}

impl GenerationSession {
    /// Creates a session over a resolved manifest.
    #[must_use]
    pub fn new(manifest: Box<dyn ProviderManifest>, batch_terminator: Option<&'static str>) -> Self {
        Self {
            statements: Vec::new(),
            generated_schemas: HashSet::new(),
            variable_counter: 0,
            manifest,
            batch_terminator,
        }
    }

    /// Appends a statement that runs inside the migration transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if `sql` is blank.
    pub fn statement(&mut self, sql: impl Into<String>) -> Result<()> {
        self.statement_with(sql, false)
    }

    /// Appends a statement with an explicit transaction flag.
    ///
    /// # Errors
    ///
    /// Returns an error if `sql` is blank.
    pub fn statement_with(&mut self, sql: impl Into<String>, suppress_transaction: bool) -> Result<()> {
        self.push(sql.into(), suppress_transaction, self.batch_terminator)
    }

    /// Appends a statement that must end its own batch, whatever the
    /// dialect's terminator is.
    ///
    /// # Errors
    ///
    /// Returns an error if `sql` is blank.
    pub fn batch_statement(&mut self, sql: impl Into<String>, terminator: &'static str) -> Result<()> {
        self.push(sql.into(), false, Some(terminator))
    }

    fn push(
        &mut self,
        sql: String,
        suppress_transaction: bool,
        terminator: Option<&'static str>,
    ) -> Result<()> {
        ensure_not_blank("sql", &sql)?;
        self.statements.push(
            MigrationStatement::new(sql)
                .with_suppress_transaction(suppress_transaction)
                .with_batch_terminator(terminator),
        );
        Ok(())
    }

    /// Returns a fresh T-SQL variable name: `@var0`, `@var1`, ...
    pub fn next_variable(&mut self) -> String {
        let name = format!("@var{}", self.variable_counter);
        self.variable_counter += 1;
        name
    }

    /// Returns true if a guard for `schema` was already emitted in this call.
    #[must_use]
    pub fn is_schema_generated(&self, schema: &str) -> bool {
        self.generated_schemas.contains(schema)
    }

    /// Records that a guard for `schema` was emitted. Returns false if it
    /// was already recorded.
    pub fn mark_schema_generated(&mut self, schema: &str) -> bool {
        self.generated_schemas.insert(schema.to_string())
    }

    /// Maps an abstract type usage through the manifest.
    ///
    /// # Errors
    ///
    /// Propagates the manifest's error for unsupported types.
    pub fn store_type(&self, usage: &TypeUsage) -> Result<String> {
        self.manifest.store_type(usage)
    }

    /// Consumes the session and returns its statements in emission order.
    #[must_use]
    pub fn into_statements(self) -> Vec<MigrationStatement> {
        self.statements
    }
}

impl fmt::Debug for GenerationSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerationSession")
            .field("statements", &self.statements.len())
            .field("generated_schemas", &self.generated_schemas)
            .field("variable_counter", &self.variable_counter)
            .field("manifest_token", &self.manifest.token())
            .field("batch_terminator", &self.batch_terminator)
            .finish()
    }
}
