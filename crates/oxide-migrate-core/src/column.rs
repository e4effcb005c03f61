//! Column shape carried by table and column operations.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::literal::{Literal, SpatialValue};

/// Abstract primitive type of a column, independent of any provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrimitiveTypeKind {
    /// Variable or fixed length binary data.
    Binary,
    /// Boolean.
    Boolean,
    /// Unsigned 8-bit integer.
    Byte,
    /// Date and time.
    DateTime,
    /// Exact decimal number.
    Decimal,
    /// 64-bit floating point.
    Double,
    /// GUID.
    Guid,
    /// 32-bit floating point.
    Single,
    /// Signed 8-bit integer.
    SByte,
    /// Signed 16-bit integer.
    Int16,
    /// Signed 32-bit integer.
    Int32,
    /// Signed 64-bit integer.
    Int64,
    /// Text.
    String,
    /// Time of day or interval.
    Time,
    /// Date and time with offset.
    DateTimeOffset,
    /// Geodetic spatial data.
    Geography,
    /// Planar spatial data.
    Geometry,
}

impl fmt::Display for PrimitiveTypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

fn min_datetime() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(1, 1, 1)
        .unwrap_or_default()
        .and_time(NaiveTime::default())
}

/// Abstract type of a column plus the facets a provider needs to pick a
/// store type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeUsage {
    /// Primitive type.
    pub kind: PrimitiveTypeKind,
    /// Maximum length; `None` means unbounded.
    pub max_length: Option<u32>,
    /// Whether the value has a fixed length.
    pub is_fixed_length: bool,
    /// Whether text is stored as Unicode.
    pub is_unicode: bool,
    /// Numeric or fractional-second precision.
    pub precision: Option<u8>,
    /// Numeric scale.
    pub scale: Option<u8>,
}

impl TypeUsage {
    /// Returns true if no maximum length was given.
    #[must_use]
    pub const fn is_unbounded(&self) -> bool {
        self.max_length.is_none()
    }
}

/// Definition of a column within a migration operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnModel {
    /// Column name.
    pub name: String,
    /// Abstract type.
    pub kind: PrimitiveTypeKind,
    /// Nullability; `None` leaves it unspecified.
    #[serde(default)]
    pub is_nullable: Option<bool>,
    /// Provider store type that bypasses manifest type mapping.
    #[serde(default)]
    pub store_type: Option<String>,
    /// Numeric or fractional-second precision.
    #[serde(default)]
    pub precision: Option<u8>,
    /// Numeric scale.
    #[serde(default)]
    pub scale: Option<u8>,
    /// Maximum length.
    #[serde(default)]
    pub max_length: Option<u32>,
    /// Whether the column has a fixed length.
    #[serde(default)]
    pub is_fixed_length: Option<bool>,
    /// Whether text is stored as Unicode.
    #[serde(default)]
    pub is_unicode: Option<bool>,
    /// Whether the database generates the value.
    #[serde(default)]
    pub is_identity: bool,
    /// Whether this is a row version column.
    #[serde(default)]
    pub is_timestamp: bool,
    /// Constant default value.
    #[serde(default)]
    pub default_value: Option<Literal>,
    /// SQL expression used as the default value.
    #[serde(default)]
    pub default_value_sql: Option<String>,
}

impl ColumnModel {
    /// Creates a column with only a name and a type.
    #[must_use]
    pub fn new(kind: PrimitiveTypeKind, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            is_nullable: None,
            store_type: None,
            precision: None,
            scale: None,
            max_length: None,
            is_fixed_length: None,
            is_unicode: None,
            is_identity: false,
            is_timestamp: false,
            default_value: None,
            default_value_sql: None,
        }
    }

    /// Sets nullability.
    #[must_use]
    pub const fn nullable(mut self, nullable: bool) -> Self {
        self.is_nullable = Some(nullable);
        self
    }

    /// Marks the column NOT NULL.
    #[must_use]
    pub const fn not_null(self) -> Self {
        self.nullable(false)
    }

    /// Sets an explicit store type.
    #[must_use]
    pub fn store_type(mut self, store_type: impl Into<String>) -> Self {
        self.store_type = Some(store_type.into());
        self
    }

    /// Sets the precision.
    #[must_use]
    pub const fn precision(mut self, precision: u8) -> Self {
        self.precision = Some(precision);
        self
    }

    /// Sets the scale.
    #[must_use]
    pub const fn scale(mut self, scale: u8) -> Self {
        self.scale = Some(scale);
        self
    }

    /// Sets the maximum length.
    #[must_use]
    pub const fn max_length(mut self, max_length: u32) -> Self {
        self.max_length = Some(max_length);
        self
    }

    /// Sets whether the column has a fixed length.
    #[must_use]
    pub const fn fixed_length(mut self, fixed: bool) -> Self {
        self.is_fixed_length = Some(fixed);
        self
    }

    /// Sets whether text is stored as Unicode.
    #[must_use]
    pub const fn unicode(mut self, unicode: bool) -> Self {
        self.is_unicode = Some(unicode);
        self
    }

    /// Marks the column as database generated.
    #[must_use]
    pub const fn identity(mut self) -> Self {
        self.is_identity = true;
        self
    }

    /// Marks the column as a row version.
    #[must_use]
    pub const fn timestamp(mut self) -> Self {
        self.is_timestamp = true;
        self
    }

    /// Sets a constant default value.
    #[must_use]
    pub fn default_value(mut self, value: impl Into<Literal>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Sets a SQL default expression.
    #[must_use]
    pub fn default_value_sql(mut self, sql: impl Into<String>) -> Self {
        self.default_value_sql = Some(sql.into());
        self
    }

    /// Returns true if `is_nullable` is explicitly false.
    #[must_use]
    pub const fn is_not_null(&self) -> bool {
        matches!(self.is_nullable, Some(false))
    }

    /// Returns the default SQL expression if it is not blank.
    #[must_use]
    pub fn default_sql(&self) -> Option<&str> {
        self.default_value_sql
            .as_deref()
            .filter(|sql| !sql.trim().is_empty())
    }

    /// Returns the explicit store type if it is not blank.
    #[must_use]
    pub fn explicit_store_type(&self) -> Option<&str> {
        self.store_type.as_deref().filter(|t| !t.trim().is_empty())
    }

    /// Returns true if the column has a constant or SQL default.
    #[must_use]
    pub fn has_default(&self) -> bool {
        self.default_value.is_some() || self.default_sql().is_some()
    }

    /// Returns the abstract type usage sent to the provider manifest.
    #[must_use]
    pub fn type_usage(&self) -> TypeUsage {
        TypeUsage {
            kind: self.kind,
            max_length: self.max_length,
            is_fixed_length: self.is_fixed_length.unwrap_or(false),
            is_unicode: self.is_unicode.unwrap_or(true),
            precision: self.precision,
            scale: self.scale,
        }
    }

    /// Returns the zero value of the column's type.
    #[must_use]
    pub fn clr_default_value(&self) -> Literal {
        match self.kind {
            PrimitiveTypeKind::Binary => Literal::Bytes(Vec::new()),
            PrimitiveTypeKind::Boolean => Literal::Bool(false),
            PrimitiveTypeKind::Byte
            | PrimitiveTypeKind::SByte
            | PrimitiveTypeKind::Int16
            | PrimitiveTypeKind::Int32
            | PrimitiveTypeKind::Int64 => Literal::Integer(0),
            PrimitiveTypeKind::Decimal => Literal::Decimal("0".to_string()),
            PrimitiveTypeKind::Double | PrimitiveTypeKind::Single => Literal::Float(0.0),
            PrimitiveTypeKind::DateTime => Literal::DateTime(min_datetime()),
            PrimitiveTypeKind::DateTimeOffset => {
                Literal::DateTimeOffset(min_datetime().and_utc().fixed_offset())
            }
            PrimitiveTypeKind::Guid => Literal::Guid(Uuid::nil()),
            PrimitiveTypeKind::String => Literal::String(String::new()),
            PrimitiveTypeKind::Time => Literal::TimeSpan(TimeDelta::zero()),
            PrimitiveTypeKind::Geography => Literal::Geography(SpatialValue::geography("POINT (0 0)")),
            PrimitiveTypeKind::Geometry => Literal::Geometry(SpatialValue::geometry("POINT (0 0)")),
        }
    }
}

/// Definition of a stored procedure parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterModel {
    /// Parameter name without the leading `@`.
    pub name: String,
    /// Abstract type.
    pub kind: PrimitiveTypeKind,
    /// Provider store type that bypasses manifest type mapping.
    #[serde(default)]
    pub store_type: Option<String>,
    /// Numeric or fractional-second precision.
    #[serde(default)]
    pub precision: Option<u8>,
    /// Numeric scale.
    #[serde(default)]
    pub scale: Option<u8>,
    /// Maximum length.
    #[serde(default)]
    pub max_length: Option<u32>,
    /// Whether the value has a fixed length.
    #[serde(default)]
    pub is_fixed_length: Option<bool>,
    /// Whether text is stored as Unicode.
    #[serde(default)]
    pub is_unicode: Option<bool>,
    /// Whether the procedure writes the parameter back to the caller.
    #[serde(default)]
    pub is_out_parameter: bool,
    /// Constant default value.
    #[serde(default)]
    pub default_value: Option<Literal>,
    /// SQL expression used as the default value.
    #[serde(default)]
    pub default_value_sql: Option<String>,
}

impl ParameterModel {
    /// Creates an input parameter with only a name and a type.
    #[must_use]
    pub fn new(kind: PrimitiveTypeKind, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            store_type: None,
            precision: None,
            scale: None,
            max_length: None,
            is_fixed_length: None,
            is_unicode: None,
            is_out_parameter: false,
            default_value: None,
            default_value_sql: None,
        }
    }

    /// Sets an explicit store type.
    #[must_use]
    pub fn store_type(mut self, store_type: impl Into<String>) -> Self {
        self.store_type = Some(store_type.into());
        self
    }

    /// Sets the precision.
    #[must_use]
    pub const fn precision(mut self, precision: u8) -> Self {
        self.precision = Some(precision);
        self
    }

    /// Sets the scale.
    #[must_use]
    pub const fn scale(mut self, scale: u8) -> Self {
        self.scale = Some(scale);
        self
    }

    /// Sets the maximum length.
    #[must_use]
    pub const fn max_length(mut self, max_length: u32) -> Self {
        self.max_length = Some(max_length);
        self
    }

    /// Sets whether text is stored as Unicode.
    #[must_use]
    pub const fn unicode(mut self, unicode: bool) -> Self {
        self.is_unicode = Some(unicode);
        self
    }

    /// Marks the parameter as OUT.
    #[must_use]
    pub const fn out(mut self) -> Self {
        self.is_out_parameter = true;
        self
    }

    /// Sets a constant default value.
    #[must_use]
    pub fn default_value(mut self, value: impl Into<Literal>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Sets a SQL default expression.
    #[must_use]
    pub fn default_value_sql(mut self, sql: impl Into<String>) -> Self {
        self.default_value_sql = Some(sql.into());
        self
    }

    /// Returns the default SQL expression if it is not blank.
    #[must_use]
    pub fn default_sql(&self) -> Option<&str> {
        self.default_value_sql
            .as_deref()
            .filter(|sql| !sql.trim().is_empty())
    }

    /// Returns the explicit store type if it is not blank.
    #[must_use]
    pub fn explicit_store_type(&self) -> Option<&str> {
        self.store_type.as_deref().filter(|t| !t.trim().is_empty())
    }

    /// Returns the abstract type usage sent to the provider manifest.
    #[must_use]
    pub fn type_usage(&self) -> TypeUsage {
        TypeUsage {
            kind: self.kind,
            max_length: self.max_length,
            is_fixed_length: self.is_fixed_length.unwrap_or(false),
            is_unicode: self.is_unicode.unwrap_or(true),
            precision: self.precision,
            scale: self.scale,
        }
    }
}
