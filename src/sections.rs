//
// PracticeViewer 1.0
// License: MIT
//

//! 今日を基準にした「今日 / 今後 / 過去」への振り分けと、各セクションの表示内容

use crate::date::DateKey;
use crate::schedule::ScheduleItem;

/// カードの種類。色分けと初期の開閉に使う。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleViewType {
    Today,
    Future,
    Past,
}

/// 表示中の月が今日から見てどこにあるか
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthRelation {
    Past,
    Current,
    Future,
}

impl MonthRelation {
    pub fn of(year: i32, month: u32, today: DateKey) -> Self {
        match (year, month).cmp(&(today.year, today.month)) {
            std::cmp::Ordering::Less => Self::Past,
            std::cmp::Ordering::Equal => Self::Current,
            std::cmp::Ordering::Greater => Self::Future,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Categorized {
    pub today: Vec<ScheduleItem>,
    /// 日付の昇順
    pub future: Vec<ScheduleItem>,
    /// 日付の降順
    pub past: Vec<ScheduleItem>,
}

/// `include_today` が偽のとき、今日の予定は過去側に入る
pub fn categorize(items: &[ScheduleItem], today: DateKey, include_today: bool) -> Categorized {
    let mut out = Categorized::default();
    for item in items {
        if include_today && item.date_key == today {
            out.today.push(item.clone());
        } else if item.date_key > today {
            out.future.push(item.clone());
        } else {
            out.past.push(item.clone());
        }
    }
    out.future.sort_by_key(|i| i.date_key);
    out.past.sort_by(|a, b| b.date_key.cmp(&a.date_key));
    out
}

/// 各セクションを出すかどうかと、その見出し・空表示
#[derive(Debug, Clone, PartialEq)]
pub struct SectionPlan {
    pub show_today: bool,
    pub show_future: bool,
    pub future_title: String,
    pub future_empty_message: Option<String>,
    pub show_past: bool,
    pub past_title: String,
}

pub const TODAY_TITLE: &str = "今日の練習";
pub const TODAY_EMPTY: &str = "今日の練習予定はありません";

impl SectionPlan {
    pub fn new(relation: MonthRelation, month: u32, items: &Categorized) -> Self {
        let current = relation == MonthRelation::Current;
        let has_today = !items.today.is_empty();
        let has_future = !items.future.is_empty();

        // 今月で今日も今後も空なら、今日セクションの案内だけで足りる
        let future_expected = relation == MonthRelation::Future || (current && has_today);
        let show_future = has_future || future_expected;

        let future_label = if current {
            "これからの練習予定".to_string()
        } else {
            format!("{month}月の練習予定")
        };

        Self {
            show_today: current,
            show_future,
            future_title: if current {
                "今後の練習予定".to_string()
            } else {
                format!("{month}月の練習予定")
            },
            future_empty_message: (!has_future && future_expected)
                .then(|| format!("{future_label}はありません。")),
            show_past: !items.past.is_empty(),
            past_title: format!("過去の練習 ({month}月)"),
        }
    }
}

/// 予定が1件もない月の案内
pub fn no_data_message(relation: MonthRelation, month: u32) -> String {
    match relation {
        MonthRelation::Future => format!("{month}月の練習予定はまだ公開されていません。"),
        MonthRelation::Current => "今月の練習予定はまだ登録されていません。".to_string(),
        MonthRelation::Past => format!("{month}月の練習データはありませんでした。"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::parse_schedule;

    fn items() -> Vec<ScheduleItem> {
        let csv = "h\n\
            5/3,,9:00,駒場,A\n\
            5/10,,9:00,駒場,B\n\
            5/1,,9:00,駒場,C\n\
            5/10,,16:00,本郷,D\n\
            5/20,,9:00,駒場,E\n";
        parse_schedule(csv, 2025, 5)
    }

    fn menus(items: &[ScheduleItem]) -> Vec<&str> {
        items.iter().map(|i| i.menu.as_str()).collect()
    }

    #[test]
    fn test_categorize_around_today() {
        let c = categorize(&items(), DateKey::new(2025, 5, 10), true);
        assert_eq!(menus(&c.today), vec!["B", "D"]);
        assert_eq!(menus(&c.future), vec!["E"]);
        assert_eq!(menus(&c.past), vec!["A", "C"]);
    }

    #[test]
    fn test_categorize_without_today_section() {
        let c = categorize(&items(), DateKey::new(2025, 5, 10), false);
        assert!(c.today.is_empty());
        assert_eq!(menus(&c.past), vec!["B", "D", "A", "C"]);
    }

    #[test]
    fn test_future_sorted_ascending_and_stable() {
        let c = categorize(&items(), DateKey::new(2025, 4, 30), true);
        assert_eq!(menus(&c.future), vec!["C", "A", "B", "D", "E"]);
        assert!(c.past.is_empty());
    }

    #[test]
    fn test_month_relation() {
        let today = DateKey::new(2025, 5, 10);
        assert_eq!(MonthRelation::of(2025, 4, today), MonthRelation::Past);
        assert_eq!(MonthRelation::of(2025, 5, today), MonthRelation::Current);
        assert_eq!(MonthRelation::of(2025, 6, today), MonthRelation::Future);
        assert_eq!(MonthRelation::of(2024, 12, today), MonthRelation::Past);
    }

    #[test]
    fn test_plan_current_month() {
        let c = categorize(&items(), DateKey::new(2025, 5, 25), true);
        let plan = SectionPlan::new(MonthRelation::Current, 5, &c);
        assert!(plan.show_today);
        // 今日も今後も空: 今後セクションは出さない
        assert!(!plan.show_future);
        assert!(plan.show_past);
        assert_eq!(plan.past_title, "過去の練習 (5月)");

        let c = categorize(&items(), DateKey::new(2025, 5, 20), true);
        let plan = SectionPlan::new(MonthRelation::Current, 5, &c);
        assert!(plan.show_future);
        assert_eq!(plan.future_title, "今後の練習予定");
        assert_eq!(
            plan.future_empty_message.as_deref(),
            Some("これからの練習予定はありません。")
        );
    }

    #[test]
    fn test_plan_other_months() {
        let c = categorize(&items(), DateKey::new(2025, 4, 1), true);
        let plan = SectionPlan::new(MonthRelation::Future, 5, &c);
        assert!(!plan.show_today);
        assert!(plan.show_future);
        assert_eq!(plan.future_title, "5月の練習予定");
        assert_eq!(plan.future_empty_message, None);

        let c = categorize(&items(), DateKey::new(2025, 7, 1), true);
        let plan = SectionPlan::new(MonthRelation::Past, 5, &c);
        assert!(!plan.show_future);
        assert!(plan.show_past);
    }

    #[test]
    fn test_no_data_messages() {
        assert_eq!(
            no_data_message(MonthRelation::Future, 8),
            "8月の練習予定はまだ公開されていません。"
        );
        assert_eq!(
            no_data_message(MonthRelation::Current, 5),
            "今月の練習予定はまだ登録されていません。"
        );
        assert_eq!(
            no_data_message(MonthRelation::Past, 3),
            "3月の練習データはありませんでした。"
        );
    }
}
