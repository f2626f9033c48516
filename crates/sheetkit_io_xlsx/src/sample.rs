//! Built-in sample dataset written when `build` receives no records.

use chrono::{Local, NaiveDateTime};

use crate::record::{EnumFieldKind, SheetRecord, SpecRecordField};

/// Employee-like sample record with a text, a date and a numeric field.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleEmployee {
    /// Display name.
    pub name: String,
    /// Birth timestamp, written as a date cell.
    pub birth_date: NaiveDateTime,
    /// Payment amount.
    pub payment: i64,
}

impl SampleEmployee {
    /// New sample employee born "now" with the default payment.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            birth_date: Local::now().naive_local(),
            payment: 123,
        }
    }
}

impl SheetRecord for SampleEmployee {
    fn fields() -> Vec<SpecRecordField<Self>> {
        vec![
            SpecRecordField::new("name", EnumFieldKind::Text, |r: &Self| {
                Some(r.name.as_str().into())
            }),
            SpecRecordField::new("birthDate", EnumFieldKind::Date, |r: &Self| {
                Some(r.birth_date.into())
            }),
            SpecRecordField::new("payment", EnumFieldKind::Number, |r: &Self| {
                Some(r.payment.into())
            }),
        ]
    }

    fn type_label() -> &'static str {
        "SampleEmployee"
    }
}

/// Three sample records.
pub fn derive_sample_employees() -> Vec<SampleEmployee> {
    ["张三", "李四", "就酱"]
        .into_iter()
        .map(SampleEmployee::new)
        .collect()
}
