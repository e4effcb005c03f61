//! Error types for migration SQL generation.

/// Errors that can occur while generating migration SQL.
#[derive(Debug, thiserror::Error)]
pub enum MigrationSqlError {
    /// The generator has no handler for an operation kind.
    #[error(
        "The current migration SQL generator ({generator}) is unable to generate SQL for operations of type '{operation_type}'."
    )]
    UnknownOperation {
        /// Name of the generator that received the operation.
        generator: String,
        /// Full type name of the operation.
        operation_type: String,
    },

    /// SQL Server Compact cannot rename columns.
    #[error(
        "Renaming columns is not supported by SQL Server Compact. Drop the column and add it back with the new name instead."
    )]
    ColumnRenameNotSupported,

    /// A required argument was missing or blank.
    #[error("Invalid argument '{argument}': {reason}")]
    InvalidArgument {
        /// Name of the offending argument.
        argument: &'static str,
        /// What was wrong with it.
        reason: String,
    },

    /// The provider does not recognise the manifest token.
    #[error("The provider manifest token '{token}' is not supported by provider '{provider}'")]
    UnsupportedManifestToken {
        /// Provider invariant name.
        provider: String,
        /// The rejected token.
        token: String,
    },

    /// The provider has no store type for a primitive type.
    #[error("Provider '{provider}' has no store type for primitive type '{kind}'")]
    UnsupportedType {
        /// Provider invariant name.
        provider: String,
        /// The primitive type kind.
        kind: String,
    },

    /// No connection factory is registered under the invariant name.
    #[error("No connection factory registered for provider '{0}'")]
    ProviderNotRegistered(String),
}

impl MigrationSqlError {
    /// Builds an [`MigrationSqlError::InvalidArgument`] for a blank value.
    #[must_use]
    pub fn blank(argument: &'static str) -> Self {
        Self::InvalidArgument {
            argument,
            reason: "the value cannot be empty or contain only white space".to_string(),
        }
    }
}

/// Result type for migration SQL generation.
pub type Result<T> = std::result::Result<T, MigrationSqlError>;

/// Fails with [`MigrationSqlError::InvalidArgument`] when `value` is blank.
///
/// # Errors
///
/// Returns an error if `value` is empty or white space only.
pub fn ensure_not_blank(argument: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(MigrationSqlError::blank(argument));
    }
    Ok(())
}
