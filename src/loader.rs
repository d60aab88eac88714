//
// PracticeViewer 1.0
// License: MIT
//

//! 取得処理を別スレッドで走らせ、結果を画面スレッドへ渡す

use std::sync::mpsc::{Receiver, Sender, channel};
use std::thread;

use eframe::egui;

use crate::schedule::ScheduleItem;

#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    Idle,
    Loading,
    Loaded(Vec<ScheduleItem>),
    Failed(String),
}

struct LoadResult {
    generation: u64,
    result: Result<Vec<ScheduleItem>, String>,
}

/// 最後に開始した読み込みの結果だけを反映する
pub struct Loader {
    generation: u64,
    tx: Sender<LoadResult>,
    rx: Receiver<LoadResult>,
    state: LoadState,
}

impl Default for Loader {
    fn default() -> Self {
        let (tx, rx) = channel();
        Self {
            generation: 0,
            tx,
            rx,
            state: LoadState::Idle,
        }
    }
}

impl Loader {
    /// 前の結果は直ちに消える
    pub fn start<F>(&mut self, ctx: Option<egui::Context>, task: F)
    where
        F: FnOnce() -> Result<Vec<ScheduleItem>, String> + Send + 'static,
    {
        self.generation += 1;
        self.state = LoadState::Loading;

        let generation = self.generation;
        let tx = self.tx.clone();
        thread::spawn(move || {
            let result = task();
            // 画面側が閉じていれば送信先は無い
            let _ = tx.send(LoadResult { generation, result });
            if let Some(ctx) = ctx {
                ctx.request_repaint();
            }
        });
    }

    /// 届いた結果を反映する。状態が変わったら `true`。
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        while let Ok(done) = self.rx.try_recv() {
            if done.generation != self.generation {
                tracing::debug!(generation = done.generation, latest = self.generation, "dropping stale result");
                continue;
            }
            self.state = match done.result {
                Ok(items) => LoadState::Loaded(items),
                Err(message) => LoadState::Failed(message),
            };
            changed = true;
        }
        changed
    }

    /// スレッドを使わずに結果を置く (ローカルファイル読み込み用)
    pub fn set(&mut self, result: Result<Vec<ScheduleItem>, String>) {
        self.generation += 1;
        self.state = match result {
            Ok(items) => LoadState::Loaded(items),
            Err(message) => LoadState::Failed(message),
        };
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == LoadState::Loading
    }

    pub fn items(&self) -> &[ScheduleItem] {
        match &self.state {
            LoadState::Loaded(items) => items,
            _ => &[],
        }
    }
}
