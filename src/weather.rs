//
// PracticeViewer 1.0
// License: MIT
//

//! 日付と場所から決まる天気の見本データ (実際の天気APIは使わない)

use chrono::{Datelike, NaiveDate};

const CONDITIONS: [&str; 6] = ["晴れ", "曇り", "時々晴れ", "雨", "晴れのち曇り", "曇りのち雨"];

#[derive(Debug, Clone, PartialEq)]
pub struct WeatherInfo {
    pub condition: &'static str,
    /// 摂氏
    pub temperature: f32,
    /// %
    pub humidity: u32,
    /// m/s
    pub wind_speed: f32,
}

impl WeatherInfo {
    pub fn icon(&self) -> &'static str {
        if self.condition.contains('雨') {
            "🌧"
        } else if self.condition.starts_with('曇') {
            "☁"
        } else {
            "☀"
        }
    }
}

/// 32bit の文字列ハッシュ (h = h * 31 + c)
fn simple_hash(s: &str) -> u64 {
    let hash = s
        .encode_utf16()
        .fold(0i32, |h, c| (h << 5).wrapping_sub(h).wrapping_add(c as i32));
    (hash as i64).unsigned_abs()
}

pub fn mock_weather(date: NaiveDate, location: &str) -> WeatherInfo {
    let seed = simple_hash(&format!(
        "{}-{}-{}-{}",
        date.year(),
        date.month(),
        date.day(),
        location
    ));
    let condition = CONDITIONS[(seed % CONDITIONS.len() as u64) as usize];

    let (mut temperature, mut humidity) = match date.month() {
        6..=9 => (25 + seed % 10, 60 + seed % 30),
        3..=5 => (15 + seed % 10, 50 + seed % 25),
        10..=11 => (18 + seed % 10, 55 + seed % 25),
        _ => (5 + seed % 8, 40 + seed % 20),
    };
    let wind_speed = 2 + seed % 4;

    if condition.contains('雨') {
        humidity = (humidity + 15).min(95);
        temperature = temperature.saturating_sub(2).max(5);
    }

    WeatherInfo {
        condition,
        temperature: temperature as f32,
        humidity: humidity as u32,
        wind_speed: wind_speed as f32,
    }
}
