//
// PracticeViewer 1.0
// License: MIT
//

//! キーボードショートカットとスワイプ操作

use eframe::egui::{self, Pos2};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    PreviousMonth,
    NextMonth,
    OpenCalendar,
    ToggleHelp,
    SelectMonth(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    Left,
    Right,
    Char(char),
}

/// ヘルプに出す一覧
pub const SHORTCUT_HELP: &[(&str, &str)] = &[
    ("Ctrl/Cmd + ←", "前の月"),
    ("Ctrl/Cmd + →", "次の月"),
    ("Ctrl/Cmd + K", "カレンダーを開く"),
    ("Ctrl/Cmd + C", "カレンダーを開く"),
    ("?", "ヘルプを表示"),
    ("1-9", "月を直接選択"),
    ("← / → スワイプ", "次の月 / 前の月"),
];

/// `command` は Ctrl (macOS では Cmd) が押されているか
pub fn shortcut_for(key: KeyInput, command: bool) -> Option<Shortcut> {
    match (key, command) {
        (KeyInput::Left, true) => Some(Shortcut::PreviousMonth),
        (KeyInput::Right, true) => Some(Shortcut::NextMonth),
        (KeyInput::Char('k' | 'c'), true) => Some(Shortcut::OpenCalendar),
        (KeyInput::Char('/'), true) | (KeyInput::Char('?'), _) => Some(Shortcut::ToggleHelp),
        (KeyInput::Char(c @ '1'..='9'), false) => c.to_digit(10).map(Shortcut::SelectMonth),
        _ => None,
    }
}

/// egui の入力イベントからショートカットを拾う
pub fn shortcuts_from_events(events: &[egui::Event]) -> Vec<Shortcut> {
    events
        .iter()
        .filter_map(|event| {
            let (key, command) = match event {
                egui::Event::Key {
                    key,
                    pressed: true,
                    modifiers,
                    ..
                } => (key_input(*key)?, modifiers.command),
                egui::Event::Text(text) if text == "?" => (KeyInput::Char('?'), false),
                // Ctrl/Cmd + C はコピーとして届くことがある
                egui::Event::Copy => (KeyInput::Char('c'), true),
                _ => return None,
            };
            shortcut_for(key, command)
        })
        .collect()
}

fn key_input(key: egui::Key) -> Option<KeyInput> {
    use egui::Key;
    let c = match key {
        Key::ArrowLeft => return Some(KeyInput::Left),
        Key::ArrowRight => return Some(KeyInput::Right),
        Key::K => 'k',
        Key::C => 'c',
        Key::Slash => '/',
        Key::Num1 => '1',
        Key::Num2 => '2',
        Key::Num3 => '3',
        Key::Num4 => '4',
        Key::Num5 => '5',
        Key::Num6 => '6',
        Key::Num7 => '7',
        Key::Num8 => '8',
        Key::Num9 => '9',
        _ => return None,
    };
    Some(KeyInput::Char(c))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    Left,
    Right,
}

/// 押してから離すまでの移動量で横スワイプを判定する
#[derive(Debug, Clone)]
pub struct SwipeTracker {
    threshold: f32,
    start: Option<Pos2>,
    last: Option<Pos2>,
}

impl Default for SwipeTracker {
    fn default() -> Self {
        Self::new(50.0)
    }
}

impl SwipeTracker {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            start: None,
            last: None,
        }
    }

    pub fn begin(&mut self, pos: Pos2) {
        self.start = Some(pos);
        self.last = Some(pos);
    }

    pub fn track(&mut self, pos: Pos2) {
        if self.start.is_some() {
            self.last = Some(pos);
        }
    }

    /// 進行中のジェスチャーを捨てる
    pub fn cancel(&mut self) {
        self.start = None;
        self.last = None;
    }

    pub fn finish(&mut self) -> Option<SwipeDirection> {
        let (start, end) = (self.start.take()?, self.last.take()?);
        let diff_x = start.x - end.x;
        let diff_y = start.y - end.y;

        // 縦方向が勝っていればスクロールとみなす
        if diff_x.abs() <= self.threshold || diff_y.abs() > diff_x.abs() {
            return None;
        }
        Some(if diff_x > 0.0 {
            SwipeDirection::Left
        } else {
            SwipeDirection::Right
        })
    }
}
