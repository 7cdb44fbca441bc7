//! Timestamps and timestamp-derived ids.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{Datelike, Local, Utc};
use ranting_model::Month;

static LAST_MILLIS: AtomicI64 = AtomicI64::new(0);

/// Current time in epoch milliseconds, strictly increasing within the process.
///
/// Two calls in the same millisecond return consecutive values, so ids built
/// from it never collide.
pub fn now_millis() -> i64 {
    let now = Utc::now().timestamp_millis();
    let mut last = LAST_MILLIS.load(Ordering::Relaxed);
    loop {
        let next = now.max(last + 1);
        match LAST_MILLIS.compare_exchange_weak(last, next, Ordering::Relaxed, Ordering::Relaxed) {
            Ok(_) => return next,
            Err(actual) => last = actual,
        }
    }
}

/// `"{prefix}-{epoch_ms}"`.
pub fn timestamp_id(prefix: &str) -> String {
    format!("{prefix}-{}", now_millis())
}

/// Month and year of the local calendar today.
pub fn current_month_year() -> (Month, i32) {
    let today = Local::now().date_naive();
    let month = Month::from_index(today.month0() as usize).unwrap_or(Month::January);
    (month, today.year())
}

pub fn current_year() -> i32 {
    Local::now().year()
}
