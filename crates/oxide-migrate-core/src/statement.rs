//! Generated SQL statements.

use serde::{Deserialize, Serialize};

/// One SQL statement produced by a generator, plus execution metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationStatement {
    /// SQL text.
    pub sql: String,
    /// Whether the statement must run outside the migration transaction.
    ///
    /// Such statements are not rolled back if a later statement fails.
    pub suppress_transaction: bool,
    /// Batch separator the target engine expects after this statement.
    pub batch_terminator: Option<String>,
}

impl MigrationStatement {
    /// Creates a transactional statement with no batch terminator.
    #[must_use]
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            suppress_transaction: false,
            batch_terminator: None,
        }
    }

    /// Sets whether the statement runs outside the migration transaction.
    #[must_use]
    pub const fn with_suppress_transaction(mut self, suppress: bool) -> Self {
        self.suppress_transaction = suppress;
        self
    }

    /// Sets the batch terminator.
    #[must_use]
    pub fn with_batch_terminator(mut self, terminator: Option<&str>) -> Self {
        self.batch_terminator = terminator.map(str::to_string);
        self
    }
}

/// Joins statements into a script.
///
/// Statements with a batch terminator are followed by it on its own line.
#[must_use]
pub fn render_script(statements: &[MigrationStatement]) -> String {
    let mut script = String::new();
    for statement in statements {
        script.push_str(&statement.sql);
        script.push('\n');
        if let Some(terminator) = &statement.batch_terminator {
            script.push_str(terminator);
            script.push('\n');
        }
    }
    script
}
