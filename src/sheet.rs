//
// PracticeViewer 1.0
// License: MIT
//

//! 公開スプレッドシートからの月別データ取得

use std::time::Duration;

use reqwest::blocking::Client;

use crate::error::{Error, Result};
use crate::retry::{RetryOptions, with_retry};
use crate::schedule::{ScheduleItem, parse_schedule};

/// シートのCSVを返すもの。シートが存在しない・公開されていないときは `Ok(None)`。
pub trait SheetSource: Send + Sync {
    fn fetch_csv(&self, sheet_name: &str) -> Result<Option<String>>;
}

/// Google スプレッドシートの gviz エンドポイントからCSVを取得する
pub struct GoogleSheetsClient {
    client: Client,
    spreadsheet_id: String,
    retry: RetryOptions,
}

impl GoogleSheetsClient {
    pub fn new(spreadsheet_id: impl Into<String>, timeout: Duration, retry: RetryOptions) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            spreadsheet_id: spreadsheet_id.into(),
            retry,
        })
    }

    pub fn sheet_url(&self, sheet_name: &str) -> String {
        format!(
            "https://docs.google.com/spreadsheets/d/{}/gviz/tq?tqx=out:csv&sheet={}",
            self.spreadsheet_id,
            urlencoding::encode(sheet_name)
        )
    }
}

impl SheetSource for GoogleSheetsClient {
    fn fetch_csv(&self, sheet_name: &str) -> Result<Option<String>> {
        let url = self.sheet_url(sheet_name);
        tracing::debug!(%url, "fetching sheet");

        let fetched = with_retry(&self.retry, |_| -> reqwest::Result<Option<String>> {
            let response = self.client.get(&url).send()?;
            if !response.status().is_success() {
                tracing::info!(sheet = sheet_name, status = %response.status(), "sheet not available");
                return Ok(None);
            }
            response.text().map(Some)
        })?;

        Ok(fetched.filter(|body| {
            let usable = is_csv_body(body);
            if !usable {
                tracing::info!(sheet = sheet_name, "response is not sheet CSV");
            }
            usable
        }))
    }
}

/// シートが無いときに返ってくるHTMLやエラー応答を弾く
fn is_csv_body(body: &str) -> bool {
    let lower = body.to_lowercase();
    !(body.contains("<!DOCTYPE html>")
        || body.contains("google.visualization.Query.setResponse")
        || (lower.contains("error") && lower.contains("not found")))
}

/// 月のシート名の候補。1桁の月はゼロ埋めした名前も試す。
pub fn candidate_sheet_names(month: u32) -> Vec<String> {
    let mut names = vec![format!("{month}月メニュー")];
    if month < 10 {
        names.push(format!("0{month}月メニュー"));
    }
    names
}

/// `year` 年 `month` 月の練習予定を取得して解釈する
pub fn load_month<S: SheetSource + ?Sized>(source: &S, month: u32, year: i32) -> Result<Vec<ScheduleItem>> {
    let names = candidate_sheet_names(month);

    for name in &names {
        if let Some(csv_text) = source.fetch_csv(name)? {
            let items = parse_schedule(&csv_text, year, month);
            tracing::info!(sheet = %name, year, month, items = items.len(), "sheet loaded");
            return Ok(items);
        }
    }

    Err(Error::SheetNotFound {
        month,
        tried: names.join(", "),
    })
}
