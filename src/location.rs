//
// PracticeViewer 1.0
// License: MIT
//

//! 練習場所ごとの色とアイコン

use eframe::egui::Color32;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocationStyle {
    pub circle: Color32,
    pub text: Color32,
    pub icon: &'static str,
}

const fn style(circle: (u8, u8, u8), text: (u8, u8, u8), icon: &'static str) -> LocationStyle {
    LocationStyle {
        circle: Color32::from_rgb(circle.0, circle.1, circle.2),
        text: Color32::from_rgb(text.0, text.1, text.2),
        icon,
    }
}

const RED: (u8, u8, u8) = (0xef, 0x44, 0x44);
const RED_DARK: (u8, u8, u8) = (0xdc, 0x26, 0x26);
const RED_TEXT: (u8, u8, u8) = (0xb9, 0x1c, 0x1c);
const PURPLE: LocationStyle = style((0xa8, 0x55, 0xf7), (0x7e, 0x22, 0xce), "🏃");
const EMERALD: LocationStyle = style((0x10, 0xb9, 0x81), (0x04, 0x78, 0x57), "🏟");
const MEET: LocationStyle = style(RED_DARK, RED_TEXT, "🏅");
const REST: LocationStyle = style((0x9c, 0xa3, 0xaf), (0x37, 0x41, 0x51), "😴");

pub const DEFAULT_STYLE: LocationStyle = style((0x9c, 0xa3, 0xaf), (0x37, 0x41, 0x51), "📍");

/// 部分一致で最初に当たったものを使う。長いキーを先に置くこと。
pub const LOCATION_STYLES: &[(&str, LocationStyle)] = &[
    // 大学キャンパス
    ("東大", style(RED, RED_TEXT, "🏛")),
    ("駒場", style((0x3b, 0x82, 0xf6), (0x1d, 0x4e, 0xd8), "🏫")),
    ("本郷", style((0x22, 0xc5, 0x5e), (0x15, 0x80, 0x3d), "🏢")),
    ("農学部", style((0xea, 0xb3, 0x08), (0xa1, 0x62, 0x07), "🌾")),
    // 専用競技場・フィールド
    ("織田フィールド", PURPLE),
    ("織田", PURPLE),
    ("補助競技場", EMERALD),
    ("補助", EMERALD),
    // 外部施設・他大学
    ("府中", style((0x63, 0x66, 0xf1), (0x43, 0x38, 0xca), "🏃")),
    ("武蔵野", style((0x14, 0xb8, 0xa6), (0x0f, 0x76, 0x6e), "🌲")),
    ("済美山", style((0xf9, 0x73, 0x16), (0xc2, 0x41, 0x0c), "⛰")),
    ("AGF", style((0xf5, 0x9e, 0x0b), (0xb4, 0x53, 0x09), "🏟")),
    // 練習タイプ別
    ("トラック", style((0xf4, 0x3f, 0x5e), (0xbe, 0x12, 0x3c), "🏁")),
    ("ロード", style((0x8b, 0x5c, 0xf6), (0x6d, 0x28, 0xd9), "🛣")),
    ("競歩", style((0x06, 0xb6, 0xd4), (0x0e, 0x74, 0x90), "🚶")),
    // 試合・イベント
    ("東工戦", style((0xec, 0x48, 0x99), (0xbe, 0x18, 0x5d), "🏆")),
    ("外大", style((0x84, 0xcc, 0x16), (0x4d, 0x7c, 0x0f), "🎯")),
    ("試合", MEET),
    ("大会", MEET),
    // その他・調整
    ("調整", style((0x94, 0xa3, 0xb8), (0x33, 0x41, 0x55), "⚖")),
    ("休み", REST),
    ("オフ", REST),
];

/// 凡例の並び
pub const LEGEND_GROUPS: &[(&str, &[&str])] = &[
    ("🏫 大学キャンパス", &["東大", "駒場", "本郷", "農学部"]),
    ("🏃 専用競技場・フィールド", &["織田フィールド", "織田", "補助競技場", "補助"]),
    ("🌍 外部施設・他大学", &["府中", "武蔵野", "済美山", "AGF"]),
    ("🏁 練習タイプ別", &["トラック", "ロード", "競歩"]),
    ("🏆 試合・イベント", &["東工戦", "外大", "試合", "大会"]),
    ("⚖ その他・調整", &["調整", "休み", "オフ"]),
];

pub fn location_style(location: &str) -> LocationStyle {
    let location = location.trim();
    LOCATION_STYLES
        .iter()
        .find(|(key, _)| location.contains(key))
        .map(|(_, style)| *style)
        .unwrap_or(DEFAULT_STYLE)
}

/// 凡例用: キーそのものの色
pub fn legend_style(key: &str) -> Option<LocationStyle> {
    LOCATION_STYLES
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, style)| *style)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substring_match() {
        assert_eq!(location_style("駒場第二グラウンド").icon, "🏫");
        assert_eq!(location_style(" 本郷 ").icon, "🏢");
        assert_eq!(location_style("東工戦@大岡山").icon, "🏆");
    }

    #[test]
    fn test_longer_keys_win() {
        assert_eq!(location_style("織田フィールド"), PURPLE);
        assert_eq!(location_style("補助競技場"), EMERALD);
    }

    #[test]
    fn test_default_style() {
        assert_eq!(location_style("情報なし"), DEFAULT_STYLE);
        assert_eq!(location_style(""), DEFAULT_STYLE);
    }

    #[test]
    fn test_legend_keys_all_styled() {
        for (_, keys) in LEGEND_GROUPS {
            for key in *keys {
                assert!(legend_style(key).is_some(), "{key}");
            }
        }
        assert_eq!(legend_style("試合"), Some(MEET));
    }
}
