//! Typed record schema: field names, value kinds and accessors.
//!
//! A record type lists its exportable fields once, in declaration order. The
//! same order drives both default titles and body cells, so the two stay
//! positionally aligned.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::spec::SheetBuildError;

////////////////////////////////////////////////////////////////////////////////
// #region FieldValues

/// Declared kind of a record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnumFieldKind {
    /// Free text (strings, booleans).
    Text,
    /// Numeric value written as its text representation.
    Number,
    /// Calendar date or timestamp written as an Excel date.
    Date,
}

/// One field value produced by an accessor.
#[derive(Debug, Clone, PartialEq)]
pub enum EnumFieldValue {
    /// Text value.
    Text(String),
    /// Integer value.
    Integer(i64),
    /// Floating point value.
    Decimal(f64),
    /// Boolean value.
    Boolean(bool),
    /// Date/timestamp value.
    Date(NaiveDateTime),
}

impl EnumFieldValue {
    /// Kind this value belongs to.
    pub fn kind(&self) -> EnumFieldKind {
        match self {
            Self::Text(_) | Self::Boolean(_) => EnumFieldKind::Text,
            Self::Integer(_) | Self::Decimal(_) => EnumFieldKind::Number,
            Self::Date(_) => EnumFieldKind::Date,
        }
    }

    /// Text representation written into body cells.
    pub fn to_text(&self) -> String {
        match self {
            Self::Text(val) => val.clone(),
            Self::Integer(val) => val.to_string(),
            Self::Decimal(val) => val.to_string(),
            Self::Boolean(val) => val.to_string(),
            Self::Date(val) => val.to_string(),
        }
    }
}

impl From<String> for EnumFieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for EnumFieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<i64> for EnumFieldValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for EnumFieldValue {
    fn from(value: f64) -> Self {
        Self::Decimal(value)
    }
}

impl From<bool> for EnumFieldValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<NaiveDateTime> for EnumFieldValue {
    fn from(value: NaiveDateTime) -> Self {
        Self::Date(value)
    }
}

impl From<NaiveDate> for EnumFieldValue {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value.and_time(NaiveTime::MIN))
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region RecordSchema

/// Schema entry for one exportable field of `R`.
pub struct SpecRecordField<R> {
    /// Field name, used as default column title.
    pub name: &'static str,
    /// Declared value kind.
    pub kind: EnumFieldKind,
    /// Value accessor; `None` means the value is absent.
    pub accessor: fn(&R) -> Option<EnumFieldValue>,
}

impl<R> SpecRecordField<R> {
    /// Create schema entry.
    pub fn new(
        name: &'static str,
        kind: EnumFieldKind,
        accessor: fn(&R) -> Option<EnumFieldValue>,
    ) -> Self {
        Self {
            name,
            kind,
            accessor,
        }
    }

    /// Read the field value from `record`, checking it against the declared kind.
    pub fn read(&self, record: &R) -> Result<Option<EnumFieldValue>, SheetBuildError> {
        let Some(value) = (self.accessor)(record) else {
            return Ok(None);
        };
        let found = value.kind();
        if found != self.kind {
            return Err(SheetBuildError::FieldKindMismatch {
                field: self.name,
                expected: self.kind,
                found,
            });
        }
        Ok(Some(value))
    }
}

impl<R> Clone for SpecRecordField<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for SpecRecordField<R> {}

impl<R> std::fmt::Debug for SpecRecordField<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpecRecordField")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .finish()
    }
}

/// Record type exportable as one worksheet row.
pub trait SheetRecord: Sized {
    /// Exportable fields in declaration order.
    fn fields() -> Vec<SpecRecordField<Self>>;

    /// Label used in error messages.
    fn type_label() -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Derive default column titles from the field names of `R`.
///
/// Fails when `R` declares no fields.
pub fn derive_default_titles<R: SheetRecord>() -> Result<Vec<String>, SheetBuildError> {
    let l_fields = R::fields();
    if l_fields.is_empty() {
        return Err(SheetBuildError::EmptySchema {
            record_type: R::type_label(),
        });
    }
    Ok(l_fields
        .iter()
        .map(|field| field.name.to_string())
        .collect())
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
