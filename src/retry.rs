//
// PracticeViewer 1.0
// License: MIT
//

//! 指数バックオフ付きのリトライ

use std::fmt;
use std::thread;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Clone)]
pub struct RetryOptions {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
    pub backoff_factor: u32,
}

impl Default for RetryOptions {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(1000),
            max_delay: Duration::from_secs(10),
            backoff_factor: 2,
        }
    }
}

impl RetryOptions {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts,
            base_delay,
            ..Default::default()
        }
    }

    /// `attempt` 回目の失敗のあとに待つ時間
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1);
        let factor = self.backoff_factor.saturating_pow(exponent);
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }
}

/// 全試行が失敗したときのエラー。最後のエラーとそれ以前のエラーを保持する。
#[derive(Error, Debug)]
#[error("{attempts}回試行しましたが失敗しました。最後のエラー: {last}")]
pub struct RetryError<E> {
    pub attempts: u32,
    pub last: E,
    pub earlier: Vec<E>,
}

/// `op` が成功するまで最大 `max_attempts` 回呼び出す。`op` には試行番号 (1始まり) が渡される。
pub fn with_retry<T, E, F>(options: &RetryOptions, mut op: F) -> Result<T, RetryError<E>>
where
    F: FnMut(u32) -> Result<T, E>,
    E: fmt::Display,
{
    let max_attempts = options.max_attempts.max(1);
    let mut earlier = Vec::new();
    let mut attempt = 1;

    loop {
        match op(attempt) {
            Ok(value) => return Ok(value),
            Err(err) if attempt >= max_attempts => {
                tracing::warn!(attempt, max_attempts, error = %err, "giving up");
                return Err(RetryError {
                    attempts: attempt,
                    last: err,
                    earlier,
                });
            }
            Err(err) => {
                let delay = options.delay_for(attempt);
                tracing::warn!(attempt, max_attempts, ?delay, error = %err, "attempt failed, retrying");
                earlier.push(err);
                if !delay.is_zero() {
                    thread::sleep(delay);
                }
                attempt += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instant(max_attempts: u32) -> RetryOptions {
        RetryOptions::new(max_attempts, Duration::ZERO)
    }

    #[test]
    fn test_delay_grows_and_caps() {
        let opts = RetryOptions::default();
        assert_eq!(opts.delay_for(1), Duration::from_millis(1000));
        assert_eq!(opts.delay_for(2), Duration::from_millis(2000));
        assert_eq!(opts.delay_for(3), Duration::from_millis(4000));
        assert_eq!(opts.delay_for(5), Duration::from_secs(10));
        assert_eq!(opts.delay_for(40), Duration::from_secs(10));
    }

    #[test]
    fn test_first_success_stops() {
        let mut calls = 0;
        let result: Result<u32, RetryError<String>> = with_retry(&instant(3), |attempt| {
            calls += 1;
            Ok(attempt)
        });
        assert_eq!(result.unwrap(), 1);
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_success_after_failures() {
        let result = with_retry(&instant(3), |attempt| {
            if attempt < 3 {
                Err(format!("fail {attempt}"))
            } else {
                Ok("ok")
            }
        });
        assert_eq!(result.unwrap(), "ok");
    }

    #[test]
    fn test_exhausted_keeps_all_errors() {
        let err = with_retry::<(), _, _>(&instant(3), |attempt| Err(format!("fail {attempt}")))
            .unwrap_err();
        assert_eq!(err.attempts, 3);
        assert_eq!(err.last, "fail 3");
        assert_eq!(err.earlier, vec!["fail 1".to_string(), "fail 2".to_string()]);
        assert!(err.to_string().contains("fail 3"));
    }

    #[test]
    fn test_zero_attempts_still_runs_once() {
        let mut calls = 0;
        let _ = with_retry::<(), _, _>(&instant(0), |_| {
            calls += 1;
            Err("nope")
        });
        assert_eq!(calls, 1);
    }
}
