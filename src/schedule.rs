//
// PracticeViewer 1.0
// License: MIT
//

//! シートの行を練習予定に変換する

use crate::csv::parse_csv;
use crate::date::{self, DateKey};

/// 空欄の代わりに表示する文字列
pub const NO_INFO: &str = "情報なし";

/// 練習予定1件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleItem {
    pub id: String,
    pub month: u32,
    pub day: u32,
    /// 表示用の `M/D`
    pub date_str: String,
    pub day_of_week: String,
    pub time: String,
    pub location: String,
    pub menu: String,
    pub pace: String,
    pub strengthening: String,
    pub notes: String,
    pub date_key: DateKey,
}

impl ScheduleItem {
    /// シートの曜日欄。空なら日付から求める。
    pub fn weekday(&self) -> &str {
        if !self.day_of_week.is_empty() {
            return &self.day_of_week;
        }
        self.date_key.to_date().map(date::weekday_label).unwrap_or("")
    }
}

/// CSVテキストを `year` 年 `month` 月の練習予定として解釈する
pub fn parse_schedule(csv_text: &str, year: i32, month: u32) -> Vec<ScheduleItem> {
    interpret_rows(&parse_csv(csv_text), year, month)
}

/// 分解済みの行を解釈する。先頭行は見出しとして扱う。
pub fn interpret_rows(rows: &[Vec<String>], year: i32, month: u32) -> Vec<ScheduleItem> {
    let data_start = match rows.first() {
        Some(header) if header.iter().any(|c| !c.trim().is_empty()) => 1,
        _ => 0,
    };

    rows.iter()
        .enumerate()
        .skip(data_start)
        .filter_map(|(index, columns)| interpret_row(index, columns, year, month))
        .collect()
}

fn interpret_row(index: usize, columns: &[String], year: i32, month: u32) -> Option<ScheduleItem> {
    let column = |i: usize| columns.get(i).map(|c| c.trim()).unwrap_or("");

    let parsed = date::parse_date_cell(column(0))?;
    if parsed.month.is_some_and(|m| m != month) {
        return None;
    }
    let day = parsed.day;

    let time = column(2);
    let location = column(3);
    let menu = column(4);
    // 時間・場所・メニューすべて空の行はプレースホルダー
    if time.is_empty() && location.is_empty() && menu.is_empty() {
        return None;
    }

    let date_key = DateKey::new(year, month, day);
    Some(ScheduleItem {
        id: format!("{date_key}-{index}"),
        month,
        day,
        date_str: format!("{month}/{day}"),
        day_of_week: column(1).to_string(),
        time: time.to_string(),
        location: or_no_info(location),
        menu: or_no_info(menu),
        pace: or_no_info(column(5)),
        strengthening: or_no_info(column(6)),
        notes: or_no_info(column(7)),
        date_key,
    })
}

fn or_no_info(value: &str) -> String {
    if value.is_empty() {
        NO_INFO.to_string()
    } else {
        value.to_string()
    }
}
