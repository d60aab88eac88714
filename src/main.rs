//
// PracticeViewer 1.0
// License: MIT
//

#![windows_subsystem = "windows"]

mod app;
mod calendar;
mod config;
mod csv;
mod date;
mod error;
mod keyboard;
mod loader;
mod location;
mod retry;
mod schedule;
mod sections;
mod sheet;
mod weather;
mod workbook;

use std::fs;
use std::path::{Path, PathBuf};

use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::app::ScheduleApp;
use crate::config::Config;

/// 設定が無いときに探す日本語フォント
const FONT_CANDIDATES: &[&str] = &[
    "C:\\Windows\\Fonts\\meiryo.ttc",
    "C:\\Windows\\Fonts\\YuGothM.ttc",
    "C:\\Windows\\Fonts\\msgothic.ttc",
    "/System/Library/Fonts/ヒラギノ角ゴシック W3.ttc",
    "/System/Library/Fonts/Hiragino Sans GB.ttc",
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/google-noto-cjk/NotoSansCJK-Regular.ttc",
];

fn main() -> eframe::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env().unwrap_or_else(|e| {
        tracing::error!(error = %e, "invalid configuration, using defaults");
        Config::default()
    });
    tracing::info!(spreadsheet = %config.spreadsheet_id, year = config.data_year, "starting practice viewer");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([760.0, 820.0])
            .with_min_inner_size([480.0, 500.0]),
        ..Default::default()
    };
    eframe::run_native(
        "練習予定ビューア",
        options,
        Box::new(move |cc| {
            install_fonts(&cc.egui_ctx, config.font_path.as_deref());
            Box::new(ScheduleApp::new(cc.egui_ctx.clone(), config))
        }),
    )
}

fn install_fonts(ctx: &egui::Context, configured: Option<&Path>) {
    let Some((path, bytes)) = configured
        .map(Path::to_path_buf)
        .into_iter()
        .chain(FONT_CANDIDATES.iter().map(PathBuf::from))
        .find_map(|path| fs::read(&path).ok().map(|bytes| (path, bytes)))
    else {
        tracing::warn!("no Japanese font found; set FONT_PATH");
        return;
    };
    tracing::info!(font = %path.display(), "using font");

    let mut fonts = egui::FontDefinitions::default();
    fonts
        .font_data
        .insert("jp_font".to_owned(), egui::FontData::from_owned(bytes));
    for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
        if let Some(list) = fonts.families.get_mut(&family) {
            list.insert(0, "jp_font".to_owned());
        }
    }
    ctx.set_fonts(fonts);
}
