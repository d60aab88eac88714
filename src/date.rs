//
// PracticeViewer 1.0
// License: MIT
//

//! 日付セルの解釈と暦まわりの補助関数

use std::fmt;
use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;

pub const WEEKDAYS: [&str; 7] = ["日", "月", "火", "水", "木", "金", "土"];

static KANJI_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]+)月\s*([0-9]+)日").expect("valid date pattern"));

/// (年, 月, 日) から作る並べ替え用のキー。日が月の長さを超えていても保持する。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateKey {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl DateKey {
    pub fn new(year: i32, month: u32, day: u32) -> Self {
        Self { year, month, day }
    }

    pub fn to_date(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }
}

impl From<NaiveDate> for DateKey {
    fn from(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month(), date.day())
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}{:02}{:02}", self.year, self.month, self.day)
    }
}

/// 日付セルから読み取れた値。月はセルに書かれていた場合のみ入る。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetDate {
    pub month: Option<u32>,
    pub day: u32,
}

/// 日付セルを解釈する。`M/D`、`M月D日`、日のみ、の順に判定する。
pub fn parse_date_cell(cell: &str) -> Option<SheetDate> {
    let cell = to_hankaku(cell);
    let cell = cell.trim();
    if cell.is_empty() {
        return None;
    }

    let parsed = if cell.contains('/') {
        parse_slash_date(cell)
    } else if cell.contains('月') {
        KANJI_DATE.captures(cell).and_then(|caps| {
            Some(SheetDate {
                month: Some(caps[1].parse().ok()?),
                day: caps[2].parse().ok()?,
            })
        })
    } else {
        leading_int(cell).map(|day| SheetDate {
            month: None,
            day,
        })
    };

    parsed.filter(|d| (1..=31).contains(&d.day))
}

/// `M/D` のみ。区切りが2つ以上ある (`Y/M/D` など) セルは日付として扱わない。
fn parse_slash_date(cell: &str) -> Option<SheetDate> {
    let (m, d) = cell.split_once('/')?;
    if d.contains('/') {
        return None;
    }
    Some(SheetDate {
        month: Some(leading_int(m)?),
        day: leading_int(d)?,
    })
}

/// 先頭の数字だけを読む (`"12(土)"` -> 12)
fn leading_int(s: &str) -> Option<u32> {
    let s = s.trim_start();
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s[..end].parse().ok()
}

/// 全角英数字・スペースを半角に変換するヘルパー関数
pub fn to_hankaku(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '０'..='９' => shift_char(c, '０', '0'),
            'Ａ'..='Ｚ' => shift_char(c, 'Ａ', 'A'),
            'ａ'..='ｚ' => shift_char(c, 'ａ', 'a'),
            '／' => '/',
            '　' => ' ',
            _ => c,
        })
        .collect()
}

fn shift_char(c: char, from: char, to: char) -> char {
    char::from_u32(c as u32 - from as u32 + to as u32).unwrap_or(c)
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(31)
}

/// 月初の曜日 (日曜 = 0)
pub fn first_weekday_of_month(year: i32, month: u32) -> u32 {
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|d| d.weekday().num_days_from_sunday())
        .unwrap_or(0)
}

pub fn weekday_label(date: NaiveDate) -> &'static str {
    WEEKDAYS[date.weekday().num_days_from_sunday() as usize]
}

pub fn format_full_date(date: NaiveDate) -> String {
    format!("{}年{}月{}日", date.year(), date.month(), date.day())
}

/// 月を前後に動かす。12月の次は1月、1月の前は12月。
pub fn shift_month(month: u32, offset: i32) -> u32 {
    ((month as i32 - 1 + offset).rem_euclid(12) + 1) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(month: Option<u32>, day: u32) -> Option<SheetDate> {
        Some(SheetDate { month, day })
    }

    #[test]
    fn test_to_hankaku_conv() {
        assert_eq!(to_hankaku("１２３"), "123");
        assert_eq!(to_hankaku("　"), " ");
        assert_eq!(to_hankaku("ＡＢＣ"), "ABC");
        assert_eq!(to_hankaku("ａｂｃ"), "abc");
        assert_eq!(to_hankaku("２月１４日"), "2月14日");
        assert_eq!(to_hankaku("５／３"), "5/3");
    }

    #[test]
    fn test_slash_dates() {
        assert_eq!(parse_date_cell("5/1"), date(Some(5), 1));
        assert_eq!(parse_date_cell(" 5/12(月) "), date(Some(5), 12));
        assert_eq!(parse_date_cell("2025/5/3"), None);
        assert_eq!(parse_date_cell("２０２５／５／３"), None);
        assert_eq!(parse_date_cell("5/"), None);
        assert_eq!(parse_date_cell("1/2/3/4"), None);
    }

    #[test]
    fn test_kanji_dates() {
        assert_eq!(parse_date_cell("5月1日"), date(Some(5), 1));
        assert_eq!(parse_date_cell("１２月 ２５日(木)"), date(Some(12), 25));
        assert_eq!(parse_date_cell("5月"), None);
    }

    #[test]
    fn test_bare_day() {
        assert_eq!(parse_date_cell("7"), date(None, 7));
        assert_eq!(parse_date_cell("7日"), date(None, 7));
        assert_eq!(parse_date_cell("日付"), None);
        assert_eq!(parse_date_cell(""), None);
    }

    #[test]
    fn test_day_bounds() {
        assert_eq!(parse_date_cell("0"), None);
        assert_eq!(parse_date_cell("32"), None);
        assert_eq!(parse_date_cell("6/32"), None);
        assert_eq!(parse_date_cell("6/0"), None);
        assert_eq!(parse_date_cell("31"), date(None, 31));
        // 6月31日は月の長さを見ないので通る
        assert_eq!(parse_date_cell("6/31"), date(Some(6), 31));
    }

    #[test]
    fn test_date_key_order() {
        let a = DateKey::new(2025, 5, 31);
        let b = DateKey::new(2025, 6, 1);
        let c = DateKey::new(2025, 6, 31);
        assert!(a < b && b < c);
        assert_eq!(c.to_date(), None);
        assert_eq!(b.to_string(), "20250601");
    }

    #[test]
    fn test_month_helpers() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2025, 2), 28);
        assert_eq!(days_in_month(2025, 12), 31);
        assert_eq!(days_in_month(2025, 6), 30);
        // 2025-06-01 は日曜
        assert_eq!(first_weekday_of_month(2025, 6), 0);
        assert_eq!(first_weekday_of_month(2025, 5), 4);
        assert_eq!(shift_month(12, 1), 1);
        assert_eq!(shift_month(1, -1), 12);
        assert_eq!(shift_month(6, 0), 6);
    }

    #[test]
    fn test_labels() {
        let d = NaiveDate::from_ymd_opt(2025, 5, 3).unwrap();
        assert_eq!(weekday_label(d), "土");
        assert_eq!(format_full_date(d), "2025年5月3日");
    }
}
