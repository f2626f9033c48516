//! Workbook constants and default preset factories.

use std::collections::BTreeMap;

use crate::spec::{SpecCellFormat, SpecWorkbookBuilderOptions};

/// Excel worksheet maximum row count.
pub const N_NROWS_EXCEL_MAX: usize = 1_048_576;
/// Excel worksheet maximum column count.
pub const N_NCOLS_EXCEL_MAX: usize = 16_384;
/// Excel sheet name maximum length.
pub const N_LEN_EXCEL_SHEET_NAME_MAX: usize = 31;
/// Characters not allowed in sheet names.
pub const TUP_EXCEL_ILLEGAL: [&str; 7] = ["*", ":", "?", "/", "\\", "[", "]"];

/// Column width applied to every data column of a new sheet.
pub const N_WIDTH_COLUMN_DEFAULT: f64 = 24.0;
/// Row index of the title row.
pub const N_ROW_TITLE: usize = 0;
/// Row index of the first body row.
pub const N_ROW_BODY_START: usize = 1;
/// Output file used by `flush` when no sink is supplied.
pub const C_FILE_OUT_DEFAULT: &str = "temp.xlsx";

/// Date display format for date-body cells.
pub const C_NUM_FORMAT_DATE: &str = "yyyy-mm-dd";
/// Fill color of title cells (sky blue).
pub const C_BG_COLOR_TITLE: &str = "#00CCFF";

/// Canonical style preset keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EnumFmtKey {
    /// Title row cell style.
    Title,
    /// Generic body cell style.
    Body,
    /// Date body cell style.
    Date,
}

/// Build default named style presets used by [`crate::writer::XlsxWorkbookBuilder`].
pub fn derive_default_sheet_formats() -> BTreeMap<EnumFmtKey, SpecCellFormat> {
    let cfg_base_fmt_spec = SpecCellFormat {
        font_name: Some("Arial".to_string()),
        font_size: Some(8),
        align: Some("center".to_string()),
        ..Default::default()
    };

    let mut dict_fmt = BTreeMap::new();
    dict_fmt.insert(
        EnumFmtKey::Title,
        cfg_base_fmt_spec.with_(SpecCellFormat {
            bold: Some(true),
            bg_color: Some(C_BG_COLOR_TITLE.to_string()),
            ..Default::default()
        }),
    );
    dict_fmt.insert(EnumFmtKey::Body, cfg_base_fmt_spec.clone());
    dict_fmt.insert(
        EnumFmtKey::Date,
        cfg_base_fmt_spec.with_(SpecCellFormat {
            num_format: Some(C_NUM_FORMAT_DATE.to_string()),
            ..Default::default()
        }),
    );

    dict_fmt
}

/// Build default builder options.
pub fn derive_default_builder_options() -> SpecWorkbookBuilderOptions {
    SpecWorkbookBuilderOptions::default()
}
