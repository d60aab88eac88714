//
// PracticeViewer 1.0
// License: MIT
//

//! 練習予定ビューアの画面

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{Datelike, Local, NaiveDate};
use eframe::egui::{self, Color32, RichText, Stroke};

use crate::calendar::{self, CalendarState};
use crate::config::Config;
use crate::date::{self, DateKey, WEEKDAYS};
use crate::keyboard::{self, Shortcut, SwipeDirection, SwipeTracker};
use crate::loader::{LoadState, Loader};
use crate::location::{self, LEGEND_GROUPS};
use crate::schedule::ScheduleItem;
use crate::sections::{self, Categorized, MonthRelation, ScheduleViewType, SectionPlan};
use crate::sheet::{self, GoogleSheetsClient, SheetSource};
use crate::weather::{self, WeatherInfo};
use crate::workbook;

const SKELETON_COUNT: usize = 3;
const WEATHER_LOCATION: &str = "Tokyo";

const BLUE: Color32 = Color32::from_rgb(0x3b, 0x82, 0xf6);
const BLUE_LIGHT: Color32 = Color32::from_rgb(0xdb, 0xea, 0xfe);
const GREEN: Color32 = Color32::from_rgb(0x22, 0xc5, 0x5e);
const GRAY: Color32 = Color32::from_rgb(0x6b, 0x72, 0x80);
const GRAY_LIGHT: Color32 = Color32::from_rgb(0xf3, 0xf4, 0xf6);
const RED: Color32 = Color32::from_rgb(0xef, 0x44, 0x44);
const RED_LIGHT: Color32 = Color32::from_rgb(0xfe, 0xe2, 0xe2);

#[derive(Clone, Copy)]
enum MessageKind {
    Info,
    Error,
}

pub struct ScheduleApp {
    ctx: egui::Context,
    config: Config,
    source: Option<Arc<dyn SheetSource>>,
    today: NaiveDate,
    selected_month: u32,
    schedule: Loader,
    categorized: Categorized,
    /// ローカルファイルから読み込んだときのパス
    file_source: Option<PathBuf>,
    calendar: CalendarState,
    calendar_data: Loader,
    show_legend: bool,
    show_help: bool,
    swipe: SwipeTracker,
    scroll_tabs: bool,
    /// 月タブ (スクロールバー込み) の位置。ここで始まったドラッグはスワイプにしない。
    tabs_rect: egui::Rect,
    weather: Option<WeatherInfo>,
    status_message: String,
}

impl ScheduleApp {
    pub fn new(ctx: egui::Context, config: Config) -> Self {
        let today = Local::now().date_naive();
        let source = match GoogleSheetsClient::new(
            config.spreadsheet_id.clone(),
            config.fetch_timeout,
            config.retry_options(),
        ) {
            Ok(client) => Some(Arc::new(client) as Arc<dyn SheetSource>),
            Err(e) => {
                tracing::error!(error = %e, "failed to build HTTP client");
                None
            }
        };
        // 天気は今年のデータを見ているときだけ
        let weather = (config.data_year == today.year())
            .then(|| weather::mock_weather(today, WEATHER_LOCATION));

        let mut app = Self {
            ctx,
            selected_month: today.month(),
            calendar: CalendarState::new(today.month()),
            config,
            source,
            today,
            schedule: Loader::default(),
            categorized: Categorized::default(),
            file_source: None,
            calendar_data: Loader::default(),
            show_legend: false,
            show_help: false,
            swipe: SwipeTracker::default(),
            scroll_tabs: true,
            tabs_rect: egui::Rect::NOTHING,
            weather,
            status_message: String::new(),
        };
        app.load_selected_month();
        app
    }

    fn today_key(&self) -> DateKey {
        DateKey::from(self.today)
    }

    fn relation(&self) -> MonthRelation {
        MonthRelation::of(self.config.data_year, self.selected_month, self.today_key())
    }

    // === 読み込み ===

    fn select_month(&mut self, month: u32) {
        // 失敗していた月はもう一度押せば取り直す
        let failed = matches!(self.schedule.state(), LoadState::Failed(_));
        if month == self.selected_month && self.file_source.is_none() && !failed {
            return;
        }
        tracing::info!(month, "month selected");
        self.selected_month = month;
        self.scroll_tabs = true;
        self.load_selected_month();
    }

    fn load_selected_month(&mut self) {
        self.file_source = None;
        self.categorized = Categorized::default();
        let (year, month) = (self.config.data_year, self.selected_month);

        let Some(source) = self.source.clone() else {
            self.schedule.set(Err("通信の準備に失敗しました".to_string()));
            return;
        };
        self.schedule.start(Some(self.ctx.clone()), move || {
            sheet::load_month(&*source, month, year).map_err(|e| {
                tracing::error!(year, month, error = %e, "failed to load schedule");
                e.to_string()
            })
        });
    }

    fn load_calendar_month(&mut self, month: u32) {
        let year = self.config.data_year;
        let Some(source) = self.source.clone() else {
            self.calendar_data.set(Err(calendar_error(year, month)));
            return;
        };
        self.calendar_data.start(Some(self.ctx.clone()), move || {
            sheet::load_month(&*source, month, year).map_err(|e| {
                tracing::error!(year, month, error = %e, "failed to load calendar data");
                calendar_error(year, month)
            })
        });
    }

    fn open_calendar(&mut self) {
        self.calendar.open(self.selected_month);
        self.load_calendar_month(self.selected_month);
    }

    fn change_calendar_month(&mut self, offset: i32) {
        let month = self.calendar.change_month(offset);
        self.load_calendar_month(month);
    }

    /// 手元のCSV・エクセルを選択中の月として読み込む
    fn open_local_file(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("スケジュール", &["csv", "xlsx", "xlsm", "xlsb", "xls", "ods"])
            .pick_file()
        else {
            return;
        };

        let result = workbook::load_file(&path, self.config.data_year, self.selected_month);
        self.status_message = match &result {
            Ok(items) => format!("✅ ファイルを読み込みました ({}件)", items.len()),
            Err(e) => format!("❌ {}", e),
        };
        self.schedule.set(result.map_err(|e| e.to_string()));
        self.file_source = Some(path);
        self.on_schedule_changed();
    }

    fn on_schedule_changed(&mut self) {
        let include_today = self.relation() == MonthRelation::Current;
        self.categorized = match self.schedule.state() {
            LoadState::Loaded(items) => sections::categorize(items, self.today_key(), include_today),
            _ => Categorized::default(),
        };
    }

    // === 入力 ===

    fn handle_input(&mut self, ctx: &egui::Context) {
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.calendar.close();
            self.show_legend = false;
            self.show_help = false;
        }

        if !ctx.wants_keyboard_input() {
            let shortcuts = ctx.input(|i| keyboard::shortcuts_from_events(&i.events));
            for shortcut in shortcuts {
                self.apply_shortcut(shortcut);
            }
        }

        // スワイプはモーダルが開いていないときだけ
        if self.calendar.visible || self.show_legend || self.show_help {
            return;
        }
        let (pressed, released, down, pos) = ctx.input(|i| {
            (
                i.pointer.any_pressed(),
                i.pointer.any_released(),
                i.pointer.any_down(),
                i.pointer.interact_pos(),
            )
        });
        if let Some(pos) = pos {
            if pressed {
                // 月タブの横スクロールなど、ウィジェットが掴んでいるドラッグは除く
                if ctx.is_using_pointer() || self.tabs_rect.contains(pos) {
                    self.swipe.cancel();
                } else {
                    self.swipe.begin(pos);
                }
            } else if down || released {
                self.swipe.track(pos);
            }
        }
        if released {
            match self.swipe.finish() {
                Some(SwipeDirection::Left) => self.apply_shortcut(Shortcut::NextMonth),
                Some(SwipeDirection::Right) => self.apply_shortcut(Shortcut::PreviousMonth),
                None => {}
            }
        }
    }

    fn apply_shortcut(&mut self, shortcut: Shortcut) {
        match shortcut {
            Shortcut::PreviousMonth => self.select_month(date::shift_month(self.selected_month, -1)),
            Shortcut::NextMonth => self.select_month(date::shift_month(self.selected_month, 1)),
            Shortcut::OpenCalendar => self.open_calendar(),
            Shortcut::ToggleHelp => self.show_help = !self.show_help,
            Shortcut::SelectMonth(month) => self.select_month(month),
        }
    }

    // === 描画 ===

    fn month_tabs(&mut self, ui: &mut egui::Ui) {
        let current_month = (self.config.data_year == self.today.year()).then(|| self.today.month());
        let mut clicked = None;

        let tabs = ui.scope(|ui| {
            egui::ScrollArea::horizontal().id_source("month_tabs").show(ui, |ui| {
                ui.horizontal(|ui| {
                    for month in 1..=12u32 {
                        let selected = month == self.selected_month;
                        let (fill, text) = if selected {
                            (BLUE, Color32::WHITE)
                        } else if Some(month) == current_month {
                            (BLUE_LIGHT, BLUE)
                        } else {
                            (GRAY_LIGHT, GRAY)
                        };
                        let response = ui.add(
                            egui::Button::new(RichText::new(format!("{month}月")).color(text).size(14.0))
                                .fill(fill)
                                .rounding(12.0),
                        );
                        if selected && self.scroll_tabs {
                            response.scroll_to_me(Some(egui::Align::Center));
                        }
                        if response.clicked() {
                            clicked = Some(month);
                        }
                    }
                });
            });
        });
        self.tabs_rect = tabs.response.rect;
        self.scroll_tabs = false;

        if let Some(month) = clicked {
            self.select_month(month);
        }
    }

    fn main_content(&self, ui: &mut egui::Ui) {
        let relation = self.relation();
        let month = self.selected_month;

        let items = match self.schedule.state() {
            LoadState::Idle | LoadState::Loading => {
                loading_skeletons(ui);
                return;
            }
            LoadState::Failed(message) => {
                message_display(ui, MessageKind::Error, message);
                return;
            }
            LoadState::Loaded(items) => items,
        };

        if let Some(path) = &self.file_source {
            let name = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
            ui.label(RichText::new(format!("📄 {name} から読み込み")).small().color(GRAY));
        }

        if items.is_empty() {
            message_display(ui, MessageKind::Info, &sections::no_data_message(relation, month));
            return;
        }

        let plan = SectionPlan::new(relation, month, &self.categorized);

        // === 今日の練習 ===
        if plan.show_today {
            section_heading(ui, sections::TODAY_TITLE);
            if let Some(weather) = &self.weather {
                weather_line(ui, weather);
            }
            if self.categorized.today.is_empty() {
                message_display(ui, MessageKind::Info, sections::TODAY_EMPTY);
            }
            for item in &self.categorized.today {
                schedule_card(ui, "today", item, ScheduleViewType::Today, true);
            }
            ui.add_space(12.0);
        }

        // === 今後の練習 ===
        if plan.show_future {
            section_heading(ui, &plan.future_title);
            if let Some(message) = &plan.future_empty_message {
                message_display(ui, MessageKind::Info, message);
            }
            for item in &self.categorized.future {
                schedule_card(ui, "future", item, ScheduleViewType::Future, false);
            }
            ui.add_space(12.0);
        }

        // === 過去の練習 ===
        if plan.show_past {
            section_heading(ui, &plan.past_title);
            for item in &self.categorized.past {
                schedule_card(ui, "past", item, ScheduleViewType::Past, false);
            }
        }
    }

    fn calendar_window(&mut self, ctx: &egui::Context) {
        if !self.calendar.visible {
            return;
        }
        let year = self.config.data_year;
        let month = self.calendar.focused_month;
        let mut open = true;
        let mut offset = 0;
        let mut clicked_day = None;

        egui::Window::new("練習カレンダー")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    if ui.button("◀").on_hover_text("前の月へ").clicked() {
                        offset = -1;
                    }
                    ui.label(RichText::new(format!("{year}年 {month}月")).size(18.0).strong());
                    if ui.button("▶").on_hover_text("次の月へ").clicked() {
                        offset = 1;
                    }
                });
                ui.add_space(6.0);

                let items = self.calendar_data.items();
                let practice_days = calendar::practice_days(items);
                let today = self.today_key();

                egui::Grid::new("calendar_grid").spacing([4.0, 4.0]).show(ui, |ui| {
                    for weekday in WEEKDAYS {
                        ui.vertical_centered(|ui| ui.label(RichText::new(weekday).small().color(GRAY)));
                    }
                    ui.end_row();

                    for (i, cell) in calendar::month_grid(year, month).into_iter().enumerate() {
                        match cell {
                            None => {
                                ui.label("");
                            }
                            Some(day) => {
                                let selected = self.calendar.selected_day == Some(day);
                                let is_today = DateKey::new(year, month, day) == today;
                                let (fill, text) = if selected {
                                    (BLUE, Color32::WHITE)
                                } else if practice_days.contains(&day) {
                                    (BLUE_LIGHT, BLUE)
                                } else {
                                    (GRAY_LIGHT, Color32::DARK_GRAY)
                                };
                                let stroke = if is_today {
                                    Stroke::new(2.0, RED)
                                } else {
                                    Stroke::new(1.0, Color32::LIGHT_GRAY)
                                };
                                let button = egui::Button::new(RichText::new(day.to_string()).color(text))
                                    .fill(fill)
                                    .stroke(stroke)
                                    .min_size(egui::vec2(44.0, 36.0));
                                if ui.add(button).on_hover_text(format!("{month}月{day}日")).clicked() {
                                    clicked_day = Some(day);
                                }
                            }
                        }
                        if (i + 1) % 7 == 0 {
                            ui.end_row();
                        }
                    }
                });

                ui.separator();
                egui::ScrollArea::vertical().max_height(320.0).show(ui, |ui| {
                    ui.set_min_height(120.0);
                    match (self.calendar_data.state(), self.calendar.selected_day) {
                        (LoadState::Loading, _) => {
                            ui.add(egui::Spinner::new());
                        }
                        (LoadState::Failed(message), _) => message_display(ui, MessageKind::Error, message),
                        (_, Some(day)) => {
                            let day_items = calendar::items_on_day(items, day);
                            if day_items.is_empty() {
                                message_display(
                                    ui,
                                    MessageKind::Info,
                                    &format!("{month}月{day}日に予定されている練習はありません。"),
                                );
                            } else {
                                ui.label(RichText::new(format!("{month}月{day}日の練習予定")).strong());
                                for item in day_items {
                                    schedule_card(ui, "calendar", item, ScheduleViewType::Future, true);
                                }
                            }
                        }
                        (_, None) => {
                            ui.label(
                                RichText::new("カレンダーの日付を選択すると、その日の練習予定が表示されます。")
                                    .color(GRAY),
                            );
                        }
                    }
                });
            });

        if offset != 0 {
            self.change_calendar_month(offset);
        }
        if let Some(day) = clicked_day {
            self.calendar.select_day(day);
        }
        if !open {
            self.calendar.close();
        }
    }

    fn legend_window(&mut self, ctx: &egui::Context) {
        egui::Window::new("練習場所の色分け凡例")
            .open(&mut self.show_legend)
            .collapsible(false)
            .default_width(360.0)
            .show(ctx, |ui| {
                ui.label(RichText::new("○の色とアイコンで練習場所を区別しています。").color(GRAY));
                ui.add_space(6.0);
                for (title, keys) in LEGEND_GROUPS {
                    ui.label(RichText::new(*title).strong());
                    ui.horizontal_wrapped(|ui| {
                        for key in *keys {
                            if let Some(style) = location::legend_style(key) {
                                location_chip(ui, key, style);
                                ui.add_space(8.0);
                            }
                        }
                    });
                    ui.add_space(6.0);
                }
            });
    }

    fn help_window(&mut self, ctx: &egui::Context) {
        egui::Window::new("キーボードショートカット")
            .open(&mut self.show_help)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                egui::Grid::new("shortcut_help").striped(true).show(ui, |ui| {
                    for (keys, action) in keyboard::SHORTCUT_HELP {
                        ui.label(RichText::new(*keys).monospace());
                        ui.label(*action);
                        ui.end_row();
                    }
                });
            });
    }

    /// スクショを PNG として保存する
    fn handle_screenshot(&mut self, ctx: &egui::Context) {
        let shot = ctx.input(|i| {
            i.raw.events.iter().find_map(|e| match e {
                egui::Event::Screenshot { image, .. } => Some(image.clone()),
                _ => None,
            })
        });
        let Some(shot) = shot else {
            return;
        };
        let Some(path) = rfd::FileDialog::new()
            .add_filter("PNG", &["png"])
            .set_file_name(format!("練習予定_{}月.png", self.selected_month))
            .save_file()
        else {
            return;
        };

        self.status_message = match save_png(&path, &shot) {
            Ok(()) => format!("✅ 保存しました: {}", path.display()),
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "failed to save screenshot");
                format!("❌ {}", e)
            }
        };
    }
}

impl eframe::App for ScheduleApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.schedule.poll() {
            self.on_schedule_changed();
        }
        self.calendar_data.poll();
        self.handle_input(ctx);

        egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.label(
                    RichText::new(format!("© {} TUATTF Schedule Viewer", self.today.year()))
                        .small()
                        .color(GRAY),
                );
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            // === 上部バー: 日付 + ボタン ===
            ui.horizontal(|ui| {
                ui.heading(format!("📅 {}", date::format_full_date(self.today)));
                if self.schedule.is_loading() {
                    ui.add(egui::Spinner::new());
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("スクショ").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Screenshot);
                    }
                    if ui.button("ファイル読込み").clicked() {
                        self.open_local_file();
                    }
                    if ui.button("？").on_hover_text("ショートカット").clicked() {
                        self.show_help = !self.show_help;
                    }
                    if ui.button("場所の色分け").clicked() {
                        self.show_legend = true;
                    }
                    if ui.button("📆 カレンダー").clicked() {
                        self.open_calendar();
                    }
                });
            });
            ui.add_space(5.0);

            // === 月タブ ===
            self.month_tabs(ui);

            if !self.status_message.is_empty() {
                ui.label(RichText::new(&self.status_message).size(12.0).italics());
            }
            ui.separator();

            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| self.main_content(ui));
        });

        self.calendar_window(ctx);
        self.legend_window(ctx);
        self.help_window(ctx);
        self.handle_screenshot(ctx);
    }
}

fn calendar_error(year: i32, month: u32) -> String {
    format!("{year}年{month}月のカレンダーデータの取得に失敗しました")
}

fn save_png(path: &Path, shot: &egui::ColorImage) -> crate::error::Result<()> {
    let pixels: Vec<u8> = shot.pixels.iter().flat_map(|p| [p.r(), p.g(), p.b(), p.a()]).collect();
    image::save_buffer(
        path,
        &pixels,
        shot.width() as u32,
        shot.height() as u32,
        image::ColorType::Rgba8,
    )?;
    Ok(())
}

fn section_heading(ui: &mut egui::Ui, title: &str) {
    ui.label(RichText::new(title).size(18.0).strong());
    ui.separator();
}

fn message_display(ui: &mut egui::Ui, kind: MessageKind, text: &str) {
    let (fill, color, icon) = match kind {
        MessageKind::Info => (BLUE_LIGHT, BLUE, "ℹ"),
        MessageKind::Error => (RED_LIGHT, RED, "❌"),
    };
    egui::Frame::none()
        .fill(fill)
        .rounding(6.0)
        .inner_margin(10.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new(format!("{icon} {text}")).color(color));
        });
    ui.add_space(6.0);
}

fn loading_skeletons(ui: &mut egui::Ui) {
    ui.horizontal(|ui| {
        ui.add(egui::Spinner::new());
        ui.label(RichText::new("読み込み中…").color(GRAY));
    });
    for _ in 0..SKELETON_COUNT {
        egui::Frame::none()
            .fill(GRAY_LIGHT)
            .rounding(8.0)
            .inner_margin(10.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.add_space(48.0);
            });
        ui.add_space(6.0);
    }
}

fn weather_line(ui: &mut egui::Ui, weather: &WeatherInfo) {
    ui.label(
        RichText::new(format!(
            "{} {}  {:.0}℃  湿度 {}%  風速 {:.0}m/s",
            weather.icon(),
            weather.condition,
            weather.temperature,
            weather.humidity,
            weather.wind_speed
        ))
        .color(GRAY),
    );
}

fn location_chip(ui: &mut egui::Ui, label: &str, style: location::LocationStyle) {
    ui.label(style.icon);
    let (rect, _) = ui.allocate_exact_size(egui::vec2(12.0, 12.0), egui::Sense::hover());
    ui.painter().circle_filled(rect.center(), 6.0, style.circle);
    ui.label(RichText::new(label).color(style.text).strong());
}

fn schedule_card(ui: &mut egui::Ui, scope: &str, item: &ScheduleItem, kind: ScheduleViewType, default_open: bool) {
    let accent = match kind {
        ScheduleViewType::Today => BLUE,
        ScheduleViewType::Future => GREEN,
        ScheduleViewType::Past => GRAY,
    };

    egui::Frame::none()
        .stroke(Stroke::new(1.0, Color32::LIGHT_GRAY))
        .rounding(8.0)
        .inner_margin(10.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                egui::Frame::none()
                    .fill(accent)
                    .rounding(6.0)
                    .inner_margin(egui::Margin::symmetric(8.0, 4.0))
                    .show(ui, |ui| {
                        let weekday = item.weekday();
                        let badge = if weekday.is_empty() {
                            item.date_str.clone()
                        } else {
                            format!("{} ({})", item.date_str, weekday)
                        };
                        ui.label(RichText::new(badge).color(Color32::WHITE).strong());
                    });
                if !item.time.is_empty() {
                    ui.label(RichText::new(format!("🕒 {}", item.time)).strong());
                }
                location_chip(ui, &item.location, location::location_style(&item.location));
            });

            egui::CollapsingHeader::new(RichText::new(&item.menu).strong())
                .id_source((scope, &item.id))
                .default_open(default_open)
                .show(ui, |ui| {
                    egui::Grid::new((scope, "detail", &item.id))
                        .num_columns(2)
                        .spacing([12.0, 4.0])
                        .show(ui, |ui| {
                            for (label, value) in [
                                ("メニュー", &item.menu),
                                ("ペース", &item.pace),
                                ("補強", &item.strengthening),
                                ("備考", &item.notes),
                            ] {
                                ui.label(RichText::new(label).color(GRAY));
                                ui.label(value.as_str());
                                ui.end_row();
                            }
                        });
                });
        });
    ui.add_space(6.0);
}
