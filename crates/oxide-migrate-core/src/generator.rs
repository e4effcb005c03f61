//! The migration SQL generator contract.

use crate::error::Result;
use crate::operations::MigrationOperation;
use crate::statement::MigrationStatement;

/// Converts migration operations into provider-specific SQL statements.
///
/// Implementations must not mutate the operations and must return either
/// the complete statement list or an error, never a partial result.
pub trait MigrationSqlGenerator: Send + Sync {
    /// Returns the generator name used in diagnostics.
    fn name(&self) -> &'static str;

    /// Generates statements for `operations` in order.
    ///
    /// `provider_manifest_token` selects the provider version whose type
    /// mapping rules apply, e.g. `"2008"`.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is blank, the provider manifest cannot
    /// be resolved, or an operation cannot be translated.
    fn generate(
        &self,
        operations: &[MigrationOperation],
        provider_manifest_token: &str,
    ) -> Result<Vec<MigrationStatement>>;
}
