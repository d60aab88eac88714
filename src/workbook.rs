//
// PracticeViewer 1.0
// License: MIT
//

//! 手元に保存したCSV・エクセルファイルからの読み込み

use std::fs;
use std::path::Path;

use calamine::{Data, DataType, Reader, open_workbook_auto};
use chrono::Datelike;

use crate::csv::parse_csv;
use crate::error::{Error, Result};
use crate::schedule::{ScheduleItem, interpret_rows};
use crate::sheet::candidate_sheet_names;

/// ファイルを読み込んで `year` 年 `month` 月の予定として解釈する
pub fn load_file(path: &Path, year: i32, month: u32) -> Result<Vec<ScheduleItem>> {
    let rows = read_rows(path, year, month)?;
    let items = interpret_rows(&rows, year, month);
    tracing::info!(path = %path.display(), rows = rows.len(), items = items.len(), "file loaded");
    Ok(items)
}

pub fn read_rows(path: &Path, year: i32, month: u32) -> Result<Vec<Vec<String>>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "csv" | "txt" => {
            let text = fs::read_to_string(path)?;
            Ok(parse_csv(text.trim_start_matches('\u{feff}')))
        }
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => read_workbook_rows(path, year, month),
        _ => Err(Error::UnsupportedFile(path.display().to_string())),
    }
}

fn read_workbook_rows(path: &Path, year: i32, month: u32) -> Result<Vec<Vec<String>>> {
    let mut workbook = open_workbook_auto(path)?;
    let sheet_names = workbook.sheet_names();
    let candidates = candidate_sheet_names(month);

    // 月のシートが無ければ最初のシートを使用
    let sheet_name = candidates
        .iter()
        .find(|c| sheet_names.contains(c))
        .or_else(|| sheet_names.first())
        .cloned()
        .ok_or_else(|| Error::SheetNotFound {
            month,
            tried: candidates.join(", "),
        })?;
    tracing::debug!(sheet = %sheet_name, "reading worksheet");

    let range = workbook.worksheet_range(&sheet_name)?;
    let rows = range
        .rows()
        .map(|row| row.iter().map(|cell| cell_text(cell, year)).collect::<Vec<_>>())
        .filter(|row| row.iter().any(|c| !c.is_empty()))
        .collect();
    Ok(rows)
}

/// 日付型のセルは `year` 年なら `M/D`、別の年なら `Y/M/D` (日付列では不採用)。
/// それ以外は表示文字列にする。
fn cell_text(cell: &Data, year: i32) -> String {
    if let Data::DateTime(_) | Data::DateTimeIso(_) = cell {
        if let Some(date) = cell.as_date() {
            return if date.year() == year {
                format!("{}/{}", date.month(), date.day())
            } else {
                format!("{}/{}/{}", date.year(), date.month(), date.day())
            };
        }
    }
    format!("{}", cell).trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::{ExcelDateTime, ExcelDateTimeType};
    use std::path::PathBuf;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("practice_viewer_{}_{}", std::process::id(), name));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_cell_text() {
        assert_eq!(cell_text(&Data::Float(12.0), 2025), "12");
        assert_eq!(cell_text(&Data::Int(3), 2025), "3");
        assert_eq!(cell_text(&Data::String(" 駒場 ".to_string()), 2025), "駒場");
        assert_eq!(cell_text(&Data::Empty, 2025), "");
    }

    #[test]
    fn test_date_cells_render_month_day() {
        // 45780 = 2025-05-03
        let serial = Data::DateTime(ExcelDateTime::new(45780.0, ExcelDateTimeType::DateTime, false));
        assert_eq!(cell_text(&serial, 2025), "5/3");
        assert_eq!(cell_text(&serial, 2024), "2025/5/3");

        let iso = Data::DateTimeIso("2025-05-04T00:00:00".to_string());
        assert_eq!(cell_text(&iso, 2025), "5/4");
    }

    #[test]
    fn test_date_cell_from_other_year_dropped() {
        let serial = Data::DateTime(ExcelDateTime::new(45780.0, ExcelDateTimeType::DateTime, false));
        let row = |cell: &Data, year| {
            vec![
                cell_text(cell, year),
                "土".to_string(),
                "9:00".to_string(),
                "駒場".to_string(),
                "ジョグ".to_string(),
            ]
        };
        let header = vec!["日付".to_string()];

        let items = interpret_rows(&[header.clone(), row(&serial, 2025)], 2025, 5);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].date_str, "5/3");

        assert!(interpret_rows(&[header, row(&serial, 2024)], 2024, 5).is_empty());
    }

    #[test]
    fn test_load_csv_file_with_bom() {
        let path = temp_file("bom.csv", "\u{feff}日付,曜日,時間,場所,メニュー\n5/1,木,16:30,駒場,ジョグ\n");
        let items = load_file(&path, 2025, 5).unwrap();
        fs::remove_file(&path).ok();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].location, "駒場");
    }

    #[test]
    fn test_unsupported_extension() {
        let err = read_rows(Path::new("schedule.pdf"), 2025, 5).unwrap_err();
        assert!(matches!(err, Error::UnsupportedFile(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = read_rows(Path::new("/nonexistent/practice_viewer.csv"), 2025, 5).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
