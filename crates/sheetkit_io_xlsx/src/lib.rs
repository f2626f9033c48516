//! `sheetkit_io_xlsx` v1:
//! Records-to-workbook adapter over `rust_xlsxwriter`.
//!
//! Module layout:
//! - `conf`   : constants and default presets
//! - `spec`   : specs/options/reports/errors
//! - `record` : typed record schema
//! - `sample` : built-in sample dataset
//! - `util`   : pure helper functions
//! - `writer` : workbook builder kernel
//!
//! ```no_run
//! use sheetkit_io_xlsx::{
//!     EnumFieldKind, SheetRecord, SpecRecordField, XlsxWorkbookBuilder,
//! };
//!
//! struct Row {
//!     name: String,
//!     qty: i64,
//! }
//!
//! impl SheetRecord for Row {
//!     fn fields() -> Vec<SpecRecordField<Self>> {
//!         vec![
//!             SpecRecordField::new("name", EnumFieldKind::Text, |r: &Self| {
//!                 Some(r.name.as_str().into())
//!             }),
//!             SpecRecordField::new("qty", EnumFieldKind::Number, |r: &Self| {
//!                 Some(r.qty.into())
//!             }),
//!         ]
//!     }
//! }
//!
//! let rows = vec![Row { name: "a".into(), qty: 1 }];
//! let mut builder = XlsxWorkbookBuilder::default();
//! builder.build(Some(rows.as_slice()), None, Some("rows")).unwrap();
//! let mut out = std::fs::File::create("rows.xlsx").unwrap();
//! builder.flush(Some(&mut out)).unwrap();
//! ```
pub mod conf;
pub mod record;
pub mod sample;
pub mod spec;
pub mod util;
pub mod writer;

pub use conf::{
    C_FILE_OUT_DEFAULT, EnumFmtKey, N_LEN_EXCEL_SHEET_NAME_MAX, N_NCOLS_EXCEL_MAX,
    N_NROWS_EXCEL_MAX, N_WIDTH_COLUMN_DEFAULT, TUP_EXCEL_ILLEGAL,
};
pub use record::{
    EnumFieldKind, EnumFieldValue, SheetRecord, SpecRecordField, derive_default_titles,
};
pub use sample::{SampleEmployee, derive_sample_employees};
pub use spec::{SheetBuildError, SpecCellFormat, SpecSheetReport, SpecWorkbookBuilderOptions};
pub use util::{derive_unique_sheet_name, resolve_sheet_name, sanitize_sheet_name};
pub use writer::{SpecSheetStyles, XlsxWorkbookBuilder, write_title_content};
