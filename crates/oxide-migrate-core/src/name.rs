//! Schema-qualified database object names.

use std::fmt;

/// Schema that SQL Server assigns to unqualified objects.
pub const DEFAULT_SCHEMA: &str = "dbo";

/// Returns true if `schema` is blank or `dbo`, compared case-insensitively.
#[must_use]
pub fn is_default_schema(schema: &str) -> bool {
    let schema = schema.trim();
    schema.is_empty() || schema.eq_ignore_ascii_case(DEFAULT_SCHEMA)
}

/// A database object name, optionally qualified by a schema.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DatabaseName {
    /// Schema part, if the name was qualified.
    pub schema: Option<String>,
    /// Object name.
    pub name: String,
}

impl DatabaseName {
    /// Parses `schema.name` by splitting on the first `.`.
    ///
    /// Names without a `.` have no schema.
    #[must_use]
    pub fn parse(qualified: &str) -> Self {
        match qualified.split_once('.') {
            Some((schema, name)) => Self {
                schema: Some(schema.to_string()),
                name: name.to_string(),
            },
            None => Self {
                schema: None,
                name: qualified.to_string(),
            },
        }
    }
}

impl fmt::Display for DatabaseName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.schema {
            Some(schema) => write!(f, "{schema}.{}", self.name),
            None => f.write_str(&self.name),
        }
    }
}
