//! Shared workbook specification models, options, reports and errors.

use std::path::PathBuf;

use rust_xlsxwriter::XlsxError;
use thiserror::Error;

use crate::conf::{C_FILE_OUT_DEFAULT, EnumFmtKey, N_WIDTH_COLUMN_DEFAULT};
use crate::record::EnumFieldKind;

////////////////////////////////////////////////////////////////////////////////
// #region CellFormatSpecification

/// Cell style specification, converted into a `rust_xlsxwriter::Format` per workbook.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SpecCellFormat {
    /// Font family name.
    pub font_name: Option<String>,
    /// Font size in points.
    pub font_size: Option<i64>,
    /// Bold style.
    pub bold: Option<bool>,
    /// Italic style.
    pub italic: Option<bool>,

    /// Horizontal alignment.
    pub align: Option<String>,
    /// Vertical alignment.
    pub valign: Option<String>,
    /// Border style for all sides.
    pub border: Option<i64>,

    /// Number format code.
    pub num_format: Option<String>,
    /// Background fill color (solid pattern).
    pub bg_color: Option<String>,
    /// Font color.
    pub font_color: Option<String>,
}

impl SpecCellFormat {
    /// Return a new format by overlaying `patch` onto `self`.
    pub fn with_(&self, patch: SpecCellFormat) -> SpecCellFormat {
        self.merge(&patch)
    }

    /// Merge two formats with right-side non-`None` overwrite semantics.
    pub fn merge(&self, other: &SpecCellFormat) -> SpecCellFormat {
        SpecCellFormat {
            font_name: other.font_name.clone().or_else(|| self.font_name.clone()),
            font_size: other.font_size.or(self.font_size),
            bold: other.bold.or(self.bold),
            italic: other.italic.or(self.italic),
            align: other.align.clone().or_else(|| self.align.clone()),
            valign: other.valign.clone().or_else(|| self.valign.clone()),
            border: other.border.or(self.border),
            num_format: other.num_format.clone().or_else(|| self.num_format.clone()),
            bg_color: other.bg_color.clone().or_else(|| self.bg_color.clone()),
            font_color: other.font_color.clone().or_else(|| self.font_color.clone()),
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region BuilderOptions

/// Builder-wide options controlling layout, styles and error policy.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecWorkbookBuilderOptions {
    /// Width applied to every data column of each new sheet.
    pub width_column_default: f64,
    /// Log and swallow failures inside `build`/`flush` instead of returning them.
    ///
    /// `flush` without an active workbook still returns
    /// [`SheetBuildError::InvalidState`].
    pub if_best_effort: bool,
    /// Output file used by `flush(None)`.
    pub path_file_out_default: PathBuf,
    /// Title row style.
    pub fmt_title: SpecCellFormat,
    /// Generic body cell style.
    pub fmt_body: SpecCellFormat,
    /// Date body cell style.
    pub fmt_date: SpecCellFormat,
}

impl Default for SpecWorkbookBuilderOptions {
    fn default() -> Self {
        let mut dict_fmt = crate::conf::derive_default_sheet_formats();
        Self {
            width_column_default: N_WIDTH_COLUMN_DEFAULT,
            if_best_effort: false,
            path_file_out_default: PathBuf::from(C_FILE_OUT_DEFAULT),
            fmt_title: dict_fmt.remove(&EnumFmtKey::Title).unwrap_or_default(),
            fmt_body: dict_fmt.remove(&EnumFmtKey::Body).unwrap_or_default(),
            fmt_date: dict_fmt.remove(&EnumFmtKey::Date).unwrap_or_default(),
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ReportSpecification

/// Per-`build` call report.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecSheetReport {
    /// Actual unique sheet name in workbook, empty when the sheet was never created.
    pub sheet_name: String,
    /// Number of body rows written (title row excluded).
    pub n_rows_body: usize,
    /// Number of columns in the title row.
    pub n_cols: usize,
    /// Non-fatal warnings, including failures swallowed in best-effort mode.
    pub warnings: Vec<String>,
}

impl SpecSheetReport {
    /// Add a warning message.
    pub fn warn(&mut self, msg: impl AsRef<str>) {
        self.warnings.push(msg.as_ref().to_string());
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Errors

/// Errors raised while building or flushing a workbook.
#[derive(Debug, Error)]
pub enum SheetBuildError {
    /// `flush` was called with no active workbook.
    #[error("Workbook is not built: call `build` before `flush`.")]
    InvalidState,
    /// Missing sheet or titles passed to the title-row writer.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    /// Record type declares zero fields.
    #[error("Record type `{record_type}` declares no fields.")]
    EmptySchema {
        /// Record type label.
        record_type: &'static str,
    },
    /// Accessor produced a value of another kind than declared.
    #[error("Field `{field}` is declared as {expected:?} but produced {found:?}.")]
    FieldKindMismatch {
        /// Field name.
        field: &'static str,
        /// Declared kind.
        expected: EnumFieldKind,
        /// Kind of the produced value.
        found: EnumFieldKind,
    },
    /// Sheet would exceed Excel row/column limits.
    #[error("Excel limit exceeded: {0}")]
    ExcelLimitExceeded(String),
    /// Error from the spreadsheet writer.
    #[error("xlsx write error: {0}")]
    Xlsx(#[from] XlsxError),
    /// Error from the output sink.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
