//! Time-related utilities with clock abstraction for testability.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, SecondsFormat, Utc};

/// Clock trait for dependency injection and testing
pub trait Clock: Send + Sync {
    /// Get the current UTC instant
    fn now(&self) -> DateTime<Utc>;
}

/// System clock implementation (uses actual system time)
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Fixed clock implementation for testing (returns a fixed time)
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    fixed_time: DateTime<Utc>,
}

impl FixedClock {
    /// Create a new fixed clock with the given instant
    pub fn new(fixed_time: DateTime<Utc>) -> Self {
        Self { fixed_time }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.fixed_time
    }
}

/// Clock wrapper that never goes backwards within the process.
///
/// If the inner clock steps back (NTP adjustment, fixed test clock), the last
/// issued instant is returned again.
#[derive(Debug)]
pub struct MonotonicClock<C> {
    inner: C,
    last_micros: AtomicI64,
}

impl<C: Clock> MonotonicClock<C> {
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            last_micros: AtomicI64::new(i64::MIN),
        }
    }
}

impl<C: Clock> Clock for MonotonicClock<C> {
    fn now(&self) -> DateTime<Utc> {
        let now = self.inner.now();
        let candidate = now.timestamp_micros();
        let previous = self.last_micros.fetch_max(candidate, Ordering::SeqCst);
        if previous <= candidate {
            return now;
        }
        DateTime::from_timestamp_micros(previous).unwrap_or(now)
    }
}

/// Format an instant as an ISO-8601 (RFC 3339) string in UTC with microseconds
pub fn to_iso8601(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Micros, false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    /// Clock that returns a scripted sequence of instants
    struct ScriptedClock {
        instants: std::sync::Mutex<Vec<DateTime<Utc>>>,
    }

    impl Clock for ScriptedClock {
        fn now(&self) -> DateTime<Utc> {
            self.instants.lock().unwrap().remove(0)
        }
    }

    #[test]
    fn test_system_clock_returns_increasing_instants() {
        // テスト項目: SystemClock が呼び出すたびに減少しない時刻を返す
        // given (前提条件):
        let clock = SystemClock;

        // when (操作):
        let first = clock.now();
        std::thread::sleep(std::time::Duration::from_millis(10));
        let second = clock.now();

        // then (期待する結果):
        assert!(second >= first);
    }

    #[test]
    fn test_fixed_clock_returns_fixed_instant() {
        // テスト項目: FixedClock が固定された時刻を返し続ける
        // given (前提条件):
        let fixed = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let clock = FixedClock::new(fixed);

        // when (操作):
        let first = clock.now();
        let second = clock.now();

        // then (期待する結果):
        assert_eq!(first, fixed);
        assert_eq!(second, fixed);
    }

    #[test]
    fn test_monotonic_clock_never_goes_backwards() {
        // テスト項目: 内部の時計が巻き戻っても MonotonicClock は過去の時刻を返さない
        // given (前提条件):
        let later = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 10).unwrap();
        let earlier = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let clock = MonotonicClock::new(ScriptedClock {
            instants: std::sync::Mutex::new(vec![later, earlier]),
        });

        // when (操作):
        let first = clock.now();
        let second = clock.now();

        // then (期待する結果):
        assert_eq!(first, later);
        assert_eq!(second, later);
    }

    #[test]
    fn test_to_iso8601_format() {
        // テスト項目: UTC の ISO-8601 文字列に変換される
        // given (前提条件):
        let instant = Utc
            .with_ymd_and_hms(2023, 1, 1, 0, 0, 0)
            .unwrap()
            .with_nanosecond(123_456_000)
            .unwrap();

        // when (操作):
        let result = to_iso8601(&instant);

        // then (期待する結果):
        assert_eq!(result, "2023-01-01T00:00:00.123456+00:00");
    }
}
