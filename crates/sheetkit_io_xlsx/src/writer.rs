//! Workbook builder kernel that turns typed records into styled worksheets.
//!
//! One [`XlsxWorkbookBuilder`] is one session: `build` appends sheets to the
//! session workbook (created lazily), `flush` serializes it and releases it.
//! Starting a second `build` sequence before `flush` appends to the same
//! unfinished workbook.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use log::{debug, error, warn};
use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook, Worksheet};

use crate::conf::{N_ROW_BODY_START, N_ROW_TITLE, derive_default_builder_options};
use crate::record::{EnumFieldValue, SheetRecord, SpecRecordField, derive_default_titles};
use crate::sample::{SampleEmployee, derive_sample_employees};
use crate::spec::{SheetBuildError, SpecCellFormat, SpecSheetReport, SpecWorkbookBuilderOptions};
use crate::util::{
    cast_col_num, cast_row_num, derive_unique_sheet_name, resolve_sheet_name,
    sanitize_sheet_name, validate_sheet_shape,
};

/// Title/body/date formats built once per workbook.
#[derive(Debug, Clone)]
pub struct SpecSheetStyles {
    /// Title row cells.
    pub fmt_title: Format,
    /// Non-date body cells.
    pub fmt_body: Format,
    /// Date body cells.
    pub fmt_date: Format,
}

impl SpecSheetStyles {
    fn new(options: &SpecWorkbookBuilderOptions) -> Self {
        Self {
            fmt_title: derive_rust_xlsx_format(&options.fmt_title),
            fmt_body: derive_rust_xlsx_format(&options.fmt_body),
            fmt_date: derive_rust_xlsx_format(&options.fmt_date),
        }
    }
}

/// In-progress workbook owned by one session.
struct SessionWorkbook {
    workbook: Workbook,
    styles: SpecSheetStyles,
    set_sheet_names_existing: BTreeSet<String>,
    l_sheet_names: Vec<String>,
}

impl SessionWorkbook {
    fn new(options: &SpecWorkbookBuilderOptions) -> Self {
        Self {
            workbook: Workbook::new(),
            styles: SpecSheetStyles::new(options),
            set_sheet_names_existing: BTreeSet::new(),
            l_sheet_names: Vec::new(),
        }
    }
}

/// Stateful records-to-workbook builder.
pub struct XlsxWorkbookBuilder {
    options: SpecWorkbookBuilderOptions,
    session: Option<SessionWorkbook>,
    l_reports: Vec<SpecSheetReport>,
}

impl Default for XlsxWorkbookBuilder {
    fn default() -> Self {
        Self::new(derive_default_builder_options())
    }
}

impl XlsxWorkbookBuilder {
    /// Create builder with the given options. No workbook exists until the first `build`.
    pub fn new(options: SpecWorkbookBuilderOptions) -> Self {
        Self {
            options,
            session: None,
            l_reports: Vec::new(),
        }
    }

    /// Options this builder was created with.
    pub fn options(&self) -> &SpecWorkbookBuilderOptions {
        &self.options
    }

    /// Whether a workbook is currently in progress.
    pub fn has_workbook(&self) -> bool {
        self.session.is_some()
    }

    /// Sheet names created in the active workbook, in creation order.
    pub fn sheet_names(&self) -> Vec<String> {
        self.session
            .as_ref()
            .map(|session| session.l_sheet_names.clone())
            .unwrap_or_default()
    }

    /// Return immutable snapshot of per-`build` reports.
    pub fn report(&self) -> Vec<SpecSheetReport> {
        self.l_reports.clone()
    }

    ////////////////////////////////////////////////////////////////////////////
    // #region Build

    /// Append one sheet built from `records` to the session workbook.
    ///
    /// - `records`: `None` or empty writes the built-in sample dataset instead.
    /// - `titles`: `None` uses the field names of `R` in declaration order.
    /// - `sheet_name`: `None` or empty uses the current timestamp in milliseconds.
    ///
    /// Absent field values leave their cell untouched. In best-effort mode
    /// failures are logged and `Ok(())` is returned; a partially written sheet
    /// may remain in the workbook either way.
    pub fn build<R: SheetRecord>(
        &mut self,
        records: Option<&[R]>,
        titles: Option<&[String]>,
        sheet_name: Option<&str>,
    ) -> Result<(), SheetBuildError> {
        match records {
            Some(l_records) if !l_records.is_empty() => {
                self.build_records(l_records, titles, sheet_name)
            }
            _ => self.build_sample(titles, sheet_name),
        }
    }

    /// Append one sheet of the built-in sample dataset.
    pub fn build_sample(
        &mut self,
        titles: Option<&[String]>,
        sheet_name: Option<&str>,
    ) -> Result<(), SheetBuildError> {
        let l_records = derive_sample_employees();
        self.build_records::<SampleEmployee>(&l_records, titles, sheet_name)
    }

    fn build_records<R: SheetRecord>(
        &mut self,
        records: &[R],
        titles: Option<&[String]>,
        sheet_name: Option<&str>,
    ) -> Result<(), SheetBuildError> {
        let mut report = SpecSheetReport::default();
        let result = self.write_sheet(records, titles, sheet_name, &mut report);
        if let Err(err) = &result
            && self.options.if_best_effort
        {
            report.warn(format!("build failed: {err}"));
        }
        self.l_reports.push(report);
        self.settle("build", result)
    }

    fn write_sheet<R: SheetRecord>(
        &mut self,
        records: &[R],
        titles: Option<&[String]>,
        sheet_name: Option<&str>,
        report: &mut SpecSheetReport,
    ) -> Result<(), SheetBuildError> {
        let n_width_column = self.options.width_column_default;
        let session = self.ensure_session();

        let c_name_requested = resolve_sheet_name(sheet_name);
        let c_name_sanitized = sanitize_sheet_name(&c_name_requested, "_");
        let c_name_unique =
            derive_unique_sheet_name(&c_name_sanitized, &mut session.set_sheet_names_existing);
        if c_name_unique != c_name_requested {
            let c_msg = format!("Sheet name {c_name_requested:?} written as {c_name_unique:?}.");
            warn!("{c_msg}");
            report.warn(c_msg);
        }

        let SessionWorkbook {
            workbook,
            styles,
            l_sheet_names,
            ..
        } = session;

        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&c_name_unique)?;
        l_sheet_names.push(c_name_unique.clone());
        report.sheet_name = c_name_unique;
        debug!("Added sheet {:?}.", report.sheet_name);

        // Workbook and sheet exist from here on, even if the schema is unusable.
        let l_fields = R::fields();
        let l_titles = match titles {
            Some(val) => val.to_vec(),
            None => derive_default_titles::<R>()?,
        };
        if l_titles.len() != l_fields.len() {
            let c_msg = format!(
                "{} titles for {} fields of `{}`: columns will be misaligned.",
                l_titles.len(),
                l_fields.len(),
                R::type_label()
            );
            warn!("{c_msg}");
            report.warn(c_msg);
        }

        let n_cols = usize::max(l_titles.len(), l_fields.len());
        validate_sheet_shape(records.len(), n_cols)?;

        for n_idx_col in 0..n_cols {
            worksheet.set_column_width(cast_col_num(n_idx_col)?, n_width_column)?;
        }

        write_title_content(worksheet, &styles.fmt_title, &l_titles)?;
        report.n_cols = l_titles.len();

        let mut n_row_cursor = N_ROW_BODY_START;
        for record in records {
            write_record_row(worksheet, n_row_cursor, record, &l_fields, styles)?;
            n_row_cursor += 1;
            report.n_rows_body += 1;
        }

        Ok(())
    }

    fn ensure_session(&mut self) -> &mut SessionWorkbook {
        let options = &self.options;
        self.session.get_or_insert_with(|| {
            debug!("Creating session workbook.");
            SessionWorkbook::new(options)
        })
    }

    // #endregion
    ////////////////////////////////////////////////////////////////////////////
    // #region TitleRow

    /// Write `titles` into row 0 of the named sheet of the active workbook.
    ///
    /// Fails with [`SheetBuildError::InvalidArgument`] when the sheet is absent
    /// or `titles` is `None`. `format` defaults to the workbook title style.
    pub fn write_title_row(
        &mut self,
        sheet_name: Option<&str>,
        format: Option<&Format>,
        titles: Option<&[String]>,
    ) -> Result<(), SheetBuildError> {
        let Some(c_sheet_name) = sheet_name else {
            return Err(SheetBuildError::InvalidArgument(
                "sheet must not be absent".to_string(),
            ));
        };
        let Some(session) = self.session.as_mut() else {
            return Err(SheetBuildError::InvalidArgument(format!(
                "sheet {c_sheet_name:?} is absent: no active workbook"
            )));
        };
        let worksheet = session
            .workbook
            .worksheet_from_name(c_sheet_name)
            .map_err(|_| {
                SheetBuildError::InvalidArgument(format!(
                    "sheet {c_sheet_name:?} is absent from the workbook"
                ))
            })?;
        let Some(l_titles) = titles else {
            return Err(SheetBuildError::InvalidArgument(
                "titles must not be absent".to_string(),
            ));
        };

        write_title_content(
            worksheet,
            format.unwrap_or(&session.styles.fmt_title),
            l_titles,
        )
    }

    // #endregion
    ////////////////////////////////////////////////////////////////////////////
    // #region Flush

    /// Serialize the session workbook to `output` (or the default file), then release it.
    ///
    /// The sink is flushed but not closed. The session is cleared whether or
    /// not writing succeeds. Without a prior `build` this fails with
    /// [`SheetBuildError::InvalidState`] and nothing is written, regardless of
    /// best-effort mode.
    pub fn flush(&mut self, output: Option<&mut dyn Write>) -> Result<(), SheetBuildError> {
        let session = self.take_session()?;
        let result = match output {
            Some(sink) => write_session(session, sink),
            None => write_session_to_path(session, &self.options.path_file_out_default),
        };
        self.settle("flush", result)
    }

    /// Serialize the session workbook into a new file at `path`, then release it.
    pub fn flush_to_path(&mut self, path: impl AsRef<Path>) -> Result<(), SheetBuildError> {
        let session = self.take_session()?;
        let result = write_session_to_path(session, path.as_ref());
        self.settle("flush", result)
    }

    /// Serialize the session workbook into memory, then release it.
    ///
    /// In best-effort mode a failure yields an empty buffer.
    pub fn flush_to_buffer(&mut self) -> Result<Vec<u8>, SheetBuildError> {
        let session = self.take_session()?;
        let mut v_bytes = Vec::new();
        let result = write_session(session, &mut v_bytes).map(|_| v_bytes);
        self.settle("flush", result)
    }

    fn take_session(&mut self) -> Result<SessionWorkbook, SheetBuildError> {
        self.session.take().ok_or(SheetBuildError::InvalidState)
    }

    // #endregion
    ////////////////////////////////////////////////////////////////////////////

    fn settle<T: Default>(
        &self,
        step: &str,
        result: Result<T, SheetBuildError>,
    ) -> Result<T, SheetBuildError> {
        match result {
            Ok(val) => Ok(val),
            Err(err) if self.options.if_best_effort => {
                error!("{step} failed, continuing in best-effort mode: {err}");
                Ok(T::default())
            }
            Err(err) => {
                debug!("{step} failed: {err}");
                Err(err)
            }
        }
    }
}

/// Write one title row at row 0, one styled cell per title, left to right.
pub fn write_title_content(
    worksheet: &mut Worksheet,
    format: &Format,
    titles: &[String],
) -> Result<(), SheetBuildError> {
    let n_row = cast_row_num(N_ROW_TITLE)?;
    for (n_idx_col, c_title) in titles.iter().enumerate() {
        worksheet.write_string_with_format(n_row, cast_col_num(n_idx_col)?, c_title, format)?;
    }
    Ok(())
}

fn write_record_row<R: SheetRecord>(
    worksheet: &mut Worksheet,
    row_idx: usize,
    record: &R,
    fields: &[SpecRecordField<R>],
    styles: &SpecSheetStyles,
) -> Result<(), SheetBuildError> {
    let n_row = cast_row_num(row_idx)?;
    for (n_idx_col, field) in fields.iter().enumerate() {
        // Absent values keep neither style nor value.
        let Some(value) = field.read(record)? else {
            continue;
        };
        let n_col = cast_col_num(n_idx_col)?;
        match value {
            EnumFieldValue::Date(val) => {
                worksheet.write_datetime_with_format(n_row, n_col, &val, &styles.fmt_date)?;
            }
            other => {
                worksheet.write_string_with_format(
                    n_row,
                    n_col,
                    &other.to_text(),
                    &styles.fmt_body,
                )?;
            }
        }
    }
    Ok(())
}

fn write_session(
    mut session: SessionWorkbook,
    sink: &mut dyn Write,
) -> Result<(), SheetBuildError> {
    let v_bytes = session.workbook.save_to_buffer()?;
    sink.write_all(&v_bytes)?;
    sink.flush()?;
    debug!(
        "Flushed workbook with {} sheets ({} bytes).",
        session.l_sheet_names.len(),
        v_bytes.len()
    );
    Ok(())
}

fn write_session_to_path(session: SessionWorkbook, path: &Path) -> Result<(), SheetBuildError> {
    let mut file = File::create(path)?;
    write_session(session, &mut file)
}

fn derive_rust_xlsx_format(spec: &SpecCellFormat) -> Format {
    let mut format = Format::new();

    if let Some(val) = &spec.font_name {
        format = format.set_font_name(val.clone());
    }
    if let Some(val) = spec.font_size {
        format = format.set_font_size(val as f64);
    }
    if spec.bold.unwrap_or(false) {
        format = format.set_bold();
    }
    if spec.italic.unwrap_or(false) {
        format = format.set_italic();
    }

    if let Some(val) = &spec.align
        && let Some(align) = derive_format_align(val)
    {
        format = format.set_align(align);
    }
    if let Some(val) = &spec.valign
        && let Some(align) = derive_format_align(val)
    {
        format = format.set_align(align);
    }

    if let Some(val) = &spec.num_format {
        format = format.set_num_format(val.clone());
    }
    if let Some(val) = &spec.bg_color {
        format = format.set_background_color(val.as_str());
    }
    if let Some(val) = &spec.font_color {
        format = format.set_font_color(val.as_str());
    }
    if let Some(val) = spec.border {
        format = format.set_border(derive_format_border(val));
    }

    format
}

fn derive_format_border(border: i64) -> FormatBorder {
    match border {
        1 => FormatBorder::Thin,
        2 => FormatBorder::Medium,
        3 => FormatBorder::Dashed,
        4 => FormatBorder::Dotted,
        5 => FormatBorder::Thick,
        6 => FormatBorder::Double,
        7 => FormatBorder::Hair,
        _ => FormatBorder::None,
    }
}

fn derive_format_align(align: &str) -> Option<FormatAlign> {
    let value = align.trim().to_ascii_lowercase();
    match value.as_str() {
        "general" => Some(FormatAlign::General),
        "left" => Some(FormatAlign::Left),
        "center" => Some(FormatAlign::Center),
        "right" => Some(FormatAlign::Right),
        "fill" => Some(FormatAlign::Fill),
        "justify" => Some(FormatAlign::Justify),
        "top" => Some(FormatAlign::Top),
        "bottom" => Some(FormatAlign::Bottom),
        "vcenter" | "vertical_center" => Some(FormatAlign::VerticalCenter),
        _ => None,
    }
}
