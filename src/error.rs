//
// PracticeViewer 1.0
// License: MIT
//

//! エラー型

use thiserror::Error;

use crate::retry::RetryError;

/// ビューア全体で使うエラー
#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("通信に失敗しました: {0}")]
    Retry(#[from] RetryError<reqwest::Error>),

    #[error("{month}月の練習データが見つかりませんでした。シート名を確認してください。 (試行: {tried})")]
    SheetNotFound { month: u32, tried: String },

    #[error("ワークブックを開けません: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("対応していないファイル形式です: {0}")]
    UnsupportedFile(String),

    #[error("画像の保存に失敗しました: {0}")]
    Image(#[from] image::ImageError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
