//
// PracticeViewer 1.0
// License: MIT
//

//! 設定の読み込み
//!
//! 環境変数 (起動時に `.env` も読み込む) から設定する。未指定の項目は既定値。

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use chrono::{Datelike, Local};

use crate::error::{Error, Result};
use crate::retry::RetryOptions;

pub const DEFAULT_SPREADSHEET_ID: &str = "1utxuwDZsrLZ5cTq8uIPRdOmMvlE9O1IbE1ymsIey3Uo";

#[derive(Debug, Clone)]
pub struct Config {
    /// 公開スプレッドシートのID
    pub spreadsheet_id: String,
    /// シートが表す年
    pub data_year: i32,
    pub fetch_timeout: Duration,
    pub retry_attempts: u32,
    pub retry_delay: Duration,
    /// 日本語フォント。未指定ならよくある場所を探す。
    pub font_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            spreadsheet_id: DEFAULT_SPREADSHEET_ID.to_string(),
            data_year: Local::now().year(),
            fetch_timeout: Duration::from_secs(10),
            retry_attempts: 3,
            retry_delay: Duration::from_millis(1000),
            font_path: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// `lookup` で値を引いて設定を組み立てる
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut config = Self::default();

        if let Some(id) = get("SPREADSHEET_ID") {
            config.spreadsheet_id = id;
        }
        if let Some(year) = parse_var::<i32>("DATA_YEAR", get("DATA_YEAR"))? {
            if !(2000..=2100).contains(&year) {
                return Err(Error::Config(format!("DATA_YEAR out of range: {year}")));
            }
            config.data_year = year;
        }
        if let Some(secs) = parse_var::<u64>("FETCH_TIMEOUT_SECS", get("FETCH_TIMEOUT_SECS"))? {
            config.fetch_timeout = Duration::from_secs(secs);
        }
        if let Some(attempts) = parse_var::<u32>("RETRY_ATTEMPTS", get("RETRY_ATTEMPTS"))? {
            if attempts == 0 {
                return Err(Error::Config("RETRY_ATTEMPTS must be at least 1".to_string()));
            }
            config.retry_attempts = attempts;
        }
        if let Some(ms) = parse_var::<u64>("RETRY_DELAY_MS", get("RETRY_DELAY_MS"))? {
            config.retry_delay = Duration::from_millis(ms);
        }
        config.font_path = get("FONT_PATH").map(PathBuf::from);

        Ok(config)
    }

    pub fn retry_options(&self) -> RetryOptions {
        RetryOptions::new(self.retry_attempts, self.retry_delay)
    }
}

fn parse_var<T: FromStr>(key: &str, value: Option<String>) -> Result<Option<T>> {
    value
        .map(|v| {
            v.parse::<T>()
                .map_err(|_| Error::Config(format!("invalid value for {key}: {v}")))
        })
        .transpose()
}
