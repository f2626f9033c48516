//! Stateless helper utilities used by the workbook builder.

use std::collections::BTreeSet;

use chrono::Utc;

use crate::conf::{
    N_LEN_EXCEL_SHEET_NAME_MAX, N_NCOLS_EXCEL_MAX, N_NROWS_EXCEL_MAX, N_ROW_BODY_START,
    TUP_EXCEL_ILLEGAL,
};
use crate::spec::SheetBuildError;

////////////////////////////////////////////////////////////////////////////////
// #region SheetNaming

/// Current timestamp in milliseconds, used as default sheet name.
pub fn derive_timestamp_sheet_name() -> String {
    Utc::now().timestamp_millis().to_string()
}

/// Resolve caller sheet name, falling back to the timestamp name when absent/empty.
pub fn resolve_sheet_name(sheet_name: Option<&str>) -> String {
    match sheet_name {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => derive_timestamp_sheet_name(),
    }
}

/// Replace invalid chars and trim to valid Excel sheet name.
pub fn sanitize_sheet_name(name: &str, replace_to: &str) -> String {
    let mut c_name = name.to_string();
    for c_illegal in TUP_EXCEL_ILLEGAL {
        c_name = c_name.replace(c_illegal, replace_to);
    }
    c_name = c_name.trim().trim_matches('\'').to_string();
    if c_name.is_empty() {
        c_name = "Sheet".to_string();
    }

    c_name.chars().take(N_LEN_EXCEL_SHEET_NAME_MAX).collect()
}

/// Return `name` or a `name__N` variant absent from `names_existing`, and register it.
///
/// Excel compares sheet names case-insensitively, so does this.
pub fn derive_unique_sheet_name(name: &str, names_existing: &mut BTreeSet<String>) -> String {
    if !names_existing.contains(&name.to_lowercase()) {
        names_existing.insert(name.to_lowercase());
        return name.to_string();
    }

    let base_name: String = name
        .chars()
        .take(usize::max(1, N_LEN_EXCEL_SHEET_NAME_MAX - 3))
        .collect();

    let mut n_idx = 2usize;
    loop {
        let candidate: String = format!("{base_name}__{n_idx}")
            .chars()
            .take(N_LEN_EXCEL_SHEET_NAME_MAX)
            .collect();
        if !names_existing.contains(&candidate.to_lowercase()) {
            names_existing.insert(candidate.to_lowercase());
            return candidate;
        }
        n_idx += 1;
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ShapeValidation

/// Check that `n_rows_body` records of `n_cols` columns fit into one sheet.
pub fn validate_sheet_shape(n_rows_body: usize, n_cols: usize) -> Result<(), SheetBuildError> {
    if n_cols > N_NCOLS_EXCEL_MAX {
        return Err(SheetBuildError::ExcelLimitExceeded(format!(
            "{n_cols} columns > {N_NCOLS_EXCEL_MAX}"
        )));
    }
    let n_rows_total = n_rows_body.saturating_add(N_ROW_BODY_START);
    if n_rows_total > N_NROWS_EXCEL_MAX {
        return Err(SheetBuildError::ExcelLimitExceeded(format!(
            "{n_rows_total} rows > {N_NROWS_EXCEL_MAX}"
        )));
    }
    Ok(())
}

pub fn cast_row_num(value: usize) -> Result<u32, SheetBuildError> {
    u32::try_from(value)
        .map_err(|_| SheetBuildError::ExcelLimitExceeded(format!("row index overflow: {value}")))
}

pub fn cast_col_num(value: usize) -> Result<u16, SheetBuildError> {
    u16::try_from(value).map_err(|_| {
        SheetBuildError::ExcelLimitExceeded(format!("column index overflow: {value}"))
    })
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
