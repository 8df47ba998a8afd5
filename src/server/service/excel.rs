//! Excel masterfile status for works.
//!
//! Each work keeps its masterfile under `<output_dir>/<work_id>/excel/`. The `default/`
//! folder holds the workbook as first uploaded and `updated/` the workbook once extracted
//! data has been written back. An equipment counts as worked once any of its component rows
//! has at least [`MIN_CRITICAL_FIELDS`] of the critical columns filled.

use std::{
    collections::BTreeSet,
    fs,
    path::{Path, PathBuf},
};

use calamine::{open_workbook_auto, Data, Range, Reader};
use chrono::{DateTime, NaiveDateTime, Utc};

use crate::{
    model::work::{CanUploadDto, ExcelFileInfoDto, ExcelFileType},
    server::error::Error,
};

/// Header of the column holding equipment numbers
pub const EQUIPMENT_NO_HEADER: &str = "equipment no.";

/// Headers of the columns that show work was done on a component row
pub const CRITICAL_FIELDS: [&str; 4] = ["fluid", "type", "spec", "grade"];

/// Filled critical columns needed for a component row to count as worked
pub const MIN_CRITICAL_FIELDS: usize = 2;

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.trim().to_string(),
        Data::Float(f) if f.fract() == 0.0 => format!("{f:.0}"),
        other => other.to_string(),
    }
}

fn normalized_header(cell: &Data) -> String {
    cell_text(cell).to_lowercase()
}

/// Returns the equipment numbers of a masterfile sheet that already have work done
///
/// The header row is the first row containing an `Equipment No.` cell. Rows below it with a
/// blank equipment number are further components of the equipment above.
pub fn equipment_with_work(sheet: &Range<Data>) -> BTreeSet<String> {
    let mut worked = BTreeSet::new();
    let mut rows = sheet.rows();

    let Some((equipment_col, critical_cols)) = rows.by_ref().find_map(|row| {
        let equipment_col = row
            .iter()
            .position(|cell| normalized_header(cell) == EQUIPMENT_NO_HEADER)?;
        let critical_cols: Vec<usize> = row
            .iter()
            .enumerate()
            .filter(|(_, cell)| CRITICAL_FIELDS.contains(&normalized_header(cell).as_str()))
            .map(|(col, _)| col)
            .collect();

        Some((equipment_col, critical_cols))
    }) else {
        return worked;
    };

    let mut current: Option<String> = None;
    for row in rows {
        let equipment_no = row.get(equipment_col).map(cell_text).unwrap_or_default();
        if !equipment_no.is_empty() {
            current = Some(equipment_no);
        }
        let Some(equipment_no) = &current else {
            continue;
        };

        let filled = critical_cols
            .iter()
            .filter(|col| row.get(**col).is_some_and(|cell| !cell_text(cell).is_empty()))
            .count();
        if filled >= MIN_CRITICAL_FIELDS {
            worked.insert(equipment_no.clone());
        }
    }

    worked
}

/// Returns the first `.xlsx` or `.xls` file in `dir` by name, `None` if `dir` is missing
pub fn find_excel_file(dir: &Path) -> Result<Option<PathBuf>, Error> {
    if !dir.is_dir() {
        return Ok(None);
    }

    let mut candidates = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_excel = path
            .file_name()
            .and_then(|name| name.to_str())
            .map(str::to_lowercase)
            .is_some_and(|name| name.ends_with(".xlsx") || name.ends_with(".xls"));

        if is_excel && path.is_file() {
            candidates.push(path);
        }
    }
    candidates.sort();

    Ok(candidates.into_iter().next())
}

fn read_equipment_with_work(path: &Path) -> Result<BTreeSet<String>, Error> {
    let mut workbook = open_workbook_auto(path)?;

    match workbook.worksheet_range_at(0) {
        Some(sheet) => Ok(equipment_with_work(&sheet?)),
        None => Ok(BTreeSet::new()),
    }
}

fn last_modified(path: &Path) -> Result<NaiveDateTime, Error> {
    let modified = fs::metadata(path)?.modified()?;

    Ok(DateTime::<Utc>::from(modified).naive_utc())
}

/// Decides whether drawings for an equipment may be uploaded against a masterfile
pub fn can_upload_equipment(info: &ExcelFileInfoDto, equipment_no: &str) -> CanUploadDto {
    if info.file_type == ExcelFileType::NotFound {
        return CanUploadDto {
            can_upload: false,
            reason: "No Excel file found. Please upload default file first.".to_string(),
        };
    }

    if info.equipment_with_work.iter().any(|no| no == equipment_no) {
        return CanUploadDto {
            can_upload: false,
            reason: format!(
                "Equipment {} already has work done. Cannot re-upload.",
                equipment_no
            ),
        };
    }

    CanUploadDto {
        can_upload: true,
        reason: "OK".to_string(),
    }
}

/// Inspects the masterfiles stored for each work
pub struct ExcelValidator<'a> {
    output_dir: &'a Path,
}

impl<'a> ExcelValidator<'a> {
    /// Creates a new instance of ExcelValidator rooted at the output directory
    pub fn new(output_dir: &'a Path) -> Self {
        Self { output_dir }
    }

    fn excel_dir(&self, work_id: i32) -> PathBuf {
        self.output_dir.join(work_id.to_string()).join("excel")
    }

    /// Reports which masterfile a work has and which equipment already has work done
    ///
    /// An unreadable updated workbook is logged and reported without worked equipment.
    ///
    /// # Returns
    /// - `Ok(ExcelFileInfoDto)` - `Updated`, `Default` or `NotFound` with file details
    /// - `Err(Error::IoError)` - The folders or file metadata could not be read
    pub fn get_excel_file_info(&self, work_id: i32) -> Result<ExcelFileInfoDto, Error> {
        let excel_dir = self.excel_dir(work_id);

        if let Some(path) = find_excel_file(&excel_dir.join("updated"))? {
            let equipment = match read_equipment_with_work(&path) {
                Ok(equipment) => equipment,
                Err(e) => {
                    tracing::warn!(
                        work_id = %work_id,
                        path = %path.display(),
                        "Failed to read Excel masterfile: {}",
                        e
                    );
                    BTreeSet::new()
                }
            };

            return Ok(ExcelFileInfoDto {
                file_type: ExcelFileType::Updated,
                has_work_done: !equipment.is_empty(),
                equipment_with_work: equipment.into_iter().collect(),
                last_modified: Some(last_modified(&path)?),
                file_path: Some(path.display().to_string()),
            });
        }

        if let Some(path) = find_excel_file(&excel_dir.join("default"))? {
            return Ok(ExcelFileInfoDto {
                file_type: ExcelFileType::Default,
                has_work_done: false,
                equipment_with_work: Vec::new(),
                last_modified: Some(last_modified(&path)?),
                file_path: Some(path.display().to_string()),
            });
        }

        Ok(ExcelFileInfoDto {
            file_type: ExcelFileType::NotFound,
            file_path: None,
            has_work_done: false,
            equipment_with_work: Vec::new(),
            last_modified: None,
        })
    }

    /// Path of the work's masterfile, preferring the updated workbook
    pub fn get_work_excel_path(&self, work_id: i32) -> Result<Option<PathBuf>, Error> {
        let excel_dir = self.excel_dir(work_id);

        match find_excel_file(&excel_dir.join("updated"))? {
            Some(path) => Ok(Some(path)),
            None => find_excel_file(&excel_dir.join("default")),
        }
    }
}
