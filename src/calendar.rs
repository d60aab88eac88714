//
// PracticeViewer 1.0
// License: MIT
//

//! カレンダーモーダルの状態とマス目の計算

use std::collections::BTreeSet;

use crate::date::{days_in_month, first_weekday_of_month, shift_month};
use crate::schedule::ScheduleItem;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarState {
    pub visible: bool,
    pub focused_month: u32,
    pub selected_day: Option<u32>,
}

impl CalendarState {
    pub fn new(initial_month: u32) -> Self {
        Self {
            visible: false,
            focused_month: initial_month,
            selected_day: None,
        }
    }

    pub fn open(&mut self, month: u32) {
        self.visible = true;
        self.focused_month = month;
        self.selected_day = None;
    }

    pub fn close(&mut self) {
        self.visible = false;
    }

    /// 前後の月へ移動する。選択中の日は解除。
    pub fn change_month(&mut self, offset: i32) -> u32 {
        self.focused_month = shift_month(self.focused_month, offset);
        self.selected_day = None;
        self.focused_month
    }

    pub fn select_day(&mut self, day: u32) {
        self.selected_day = Some(day);
    }
}

/// 日曜始まりのマス目。月初の曜日までは `None` で埋める。
pub fn month_grid(year: i32, month: u32) -> Vec<Option<u32>> {
    let leading = first_weekday_of_month(year, month) as usize;
    std::iter::repeat_n(None, leading)
        .chain((1..=days_in_month(year, month)).map(Some))
        .collect()
}

pub fn practice_days(items: &[ScheduleItem]) -> BTreeSet<u32> {
    items.iter().map(|i| i.day).collect()
}

pub fn items_on_day(items: &[ScheduleItem], day: u32) -> Vec<&ScheduleItem> {
    items.iter().filter(|i| i.day == day).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::parse_schedule;

    #[test]
    fn test_state_transitions() {
        let mut state = CalendarState::new(5);
        assert!(!state.visible);

        state.open(7);
        assert!(state.visible);
        assert_eq!(state.focused_month, 7);

        state.select_day(12);
        assert_eq!(state.change_month(-1), 6);
        assert_eq!(state.selected_day, None);

        state.close();
        assert!(!state.visible);
        assert_eq!(state.focused_month, 6);
    }

    #[test]
    fn test_change_month_wraps() {
        let mut state = CalendarState::new(12);
        assert_eq!(state.change_month(1), 1);
        assert_eq!(state.change_month(-1), 12);
    }

    #[test]
    fn test_month_grid() {
        // 2025年5月1日は木曜
        let grid = month_grid(2025, 5);
        assert_eq!(grid.len(), 4 + 31);
        assert!(grid[..4].iter().all(Option::is_none));
        assert_eq!(grid[4], Some(1));
        assert_eq!(grid.last(), Some(&Some(31)));

        // 2025年6月1日は日曜
        let grid = month_grid(2025, 6);
        assert_eq!(grid[0], Some(1));
        assert_eq!(grid.len(), 30);
    }

    #[test]
    fn test_practice_days() {
        let items = parse_schedule("h\n5/3,,9:00,駒場,A\n5/3,,16:00,本郷,B\n5/9,,9:00,駒場,C\n", 2025, 5);
        let days: Vec<u32> = practice_days(&items).into_iter().collect();
        assert_eq!(days, vec![3, 9]);
        assert_eq!(items_on_day(&items, 3).len(), 2);
        assert!(items_on_day(&items, 4).is_empty());
    }
}
