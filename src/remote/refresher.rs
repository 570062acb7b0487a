//! Bounded-retry wrapper around a remote source.
//!
//! A fetch that errors is propagated immediately; only an empty successful
//! result is retried. Sleep intervals double from one second up to a
//! five-second cap, and every sleep is clamped so the loop never waits
//! past the end of the retry window.

use std::thread;
use std::time::{Duration, Instant};

use crate::error::{Result, SystagsError};
use crate::store::Tags;

use super::{FetchOutcome, RemoteSource};

/// First sleep interval of the backoff schedule.
const BASE_INTERVAL: Duration = Duration::from_secs(1);

/// Ceiling the doubling schedule saturates at.
const MAX_INTERVAL: Duration = Duration::from_secs(5);

/// Drives a [`RemoteSource`] to a final tag mapping or error.
pub struct Refresher {
    source: Box<dyn RemoteSource>,
    base_interval: Duration,
    max_interval: Duration,
}

impl Refresher {
    /// Wrap a source with the standard 1s..5s backoff schedule.
    pub fn new(source: Box<dyn RemoteSource>) -> Self {
        Self::with_intervals(source, BASE_INTERVAL, MAX_INTERVAL)
    }

    /// Wrap a source with a custom backoff schedule. Tests use this to
    /// keep the sleeps in the millisecond range.
    pub fn with_intervals(
        source: Box<dyn RemoteSource>,
        base_interval: Duration,
        max_interval: Duration,
    ) -> Self {
        Self {
            source,
            base_interval,
            max_interval,
        }
    }

    /// Fetch tags, retrying empty results until `retry_window` elapses.
    ///
    /// Each attempt is bounded by `timeout`. A zero `retry_window` performs
    /// exactly one attempt with no sleep. The returned mapping may be empty
    /// if the window ran out; the caller replaces its remote tier with it
    /// wholesale either way.
    pub fn update(&self, timeout: Duration, retry_window: Duration) -> Result<Tags> {
        let start = Instant::now();
        let mut interval = self.base_interval;

        loop {
            let tags = match self.source.fetch(timeout)? {
                FetchOutcome::Tags(tags) => tags,
                FetchOutcome::Unsupported => {
                    return Err(SystagsError::RemoteFetch {
                        message: format!(
                            "{} cannot serve tags for this host",
                            self.source.name()
                        ),
                    })
                }
            };

            if !tags.is_empty() || start.elapsed() >= retry_window {
                return Ok(tags);
            }

            // Never sleep past the end of the window.
            let remaining = retry_window.saturating_sub(start.elapsed());
            let sleep = interval.min(remaining);
            tracing::debug!("remote tags empty, retrying in {sleep:?}");
            thread::sleep(sleep);

            interval = (interval * 2).min(self.max_interval);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    const TIMEOUT: Duration = Duration::from_secs(1);

    /// Scripted source returning a fixed sequence of outcomes.
    struct ScriptedSource {
        script: RefCell<Vec<Result<FetchOutcome>>>,
        calls: Rc<RefCell<usize>>,
        fetch_times: Rc<RefCell<Vec<Instant>>>,
    }

    impl ScriptedSource {
        fn build(script: Vec<Result<FetchOutcome>>) -> Box<Self> {
            Box::new(Self {
                script: RefCell::new(script),
                calls: Rc::new(RefCell::new(0)),
                fetch_times: Rc::new(RefCell::new(Vec::new())),
            })
        }

        fn new(script: Vec<Result<FetchOutcome>>) -> (Box<Self>, Rc<RefCell<usize>>) {
            let source = Self::build(script);
            let calls = source.calls.clone();
            (source, calls)
        }

        /// Like [`new`](Self::new) but hands back the fetch timestamps,
        /// for asserting the sleep schedule.
        fn with_recorder(
            script: Vec<Result<FetchOutcome>>,
        ) -> (Box<Self>, Rc<RefCell<Vec<Instant>>>) {
            let source = Self::build(script);
            let times = source.fetch_times.clone();
            (source, times)
        }
    }

    impl RemoteSource for ScriptedSource {
        fn name(&self) -> &str {
            "scripted"
        }

        fn fetch(&self, _timeout: Duration) -> Result<FetchOutcome> {
            *self.calls.borrow_mut() += 1;
            self.fetch_times.borrow_mut().push(Instant::now());
            let mut script = self.script.borrow_mut();
            if script.len() > 1 {
                script.remove(0)
            } else {
                // Keep replaying the final step
                match &script[0] {
                    Ok(outcome) => Ok(outcome.clone()),
                    Err(_) => Err(SystagsError::RemoteFetch {
                        message: "scripted failure".into(),
                    }),
                }
            }
        }
    }

    fn empty() -> Result<FetchOutcome> {
        Ok(FetchOutcome::Tags(Tags::new()))
    }

    fn some_tags() -> Result<FetchOutcome> {
        Ok(FetchOutcome::Tags(
            [("region".to_string(), "us-east-1".to_string())]
                .into_iter()
                .collect(),
        ))
    }

    #[test]
    fn zero_window_fetches_exactly_once() {
        let (source, calls) = ScriptedSource::new(vec![empty()]);
        let refresher = Refresher::new(source);

        let tags = refresher.update(TIMEOUT, Duration::ZERO).unwrap();
        assert!(tags.is_empty());
        assert_eq!(*calls.borrow(), 1);
    }

    #[test]
    fn non_empty_result_returns_without_retry() {
        let (source, calls) = ScriptedSource::new(vec![some_tags()]);
        let refresher = Refresher::new(source);

        let tags = refresher.update(TIMEOUT, Duration::from_secs(60)).unwrap();
        assert_eq!(tags.get("region").unwrap(), "us-east-1");
        assert_eq!(*calls.borrow(), 1);
    }

    #[test]
    fn empty_results_retry_until_tags_appear() {
        let (source, calls) = ScriptedSource::new(vec![empty(), empty(), some_tags()]);
        let refresher = Refresher::with_intervals(
            source,
            Duration::from_millis(1),
            Duration::from_millis(5),
        );

        let tags = refresher.update(TIMEOUT, Duration::from_secs(10)).unwrap();
        assert_eq!(tags.len(), 1);
        assert_eq!(*calls.borrow(), 3);
    }

    #[test]
    fn retry_stops_when_window_elapses() {
        let (source, calls) = ScriptedSource::new(vec![empty()]);
        let refresher = Refresher::with_intervals(
            source,
            Duration::from_millis(5),
            Duration::from_millis(20),
        );

        let start = Instant::now();
        let tags = refresher.update(TIMEOUT, Duration::from_millis(50)).unwrap();

        // Final result is whatever the last attempt produced.
        assert!(tags.is_empty());
        assert!(*calls.borrow() > 1);
        // Total sleeping is bounded by the window plus scheduling slack.
        assert!(start.elapsed() < Duration::from_secs(2));
    }

    #[test]
    fn sleep_intervals_double_to_cap_and_stay_inside_window() {
        let (source, times) = ScriptedSource::with_recorder(vec![empty()]);
        let base = Duration::from_millis(20);
        let cap = Duration::from_millis(50);
        let window = Duration::from_millis(400);
        let refresher = Refresher::with_intervals(source, base, cap);

        let start = Instant::now();
        refresher.update(TIMEOUT, window).unwrap();

        let times = times.borrow();
        let gaps: Vec<Duration> = times.windows(2).map(|pair| pair[1] - pair[0]).collect();

        // Schedule is base, 2*base, then the cap repeating, with the final
        // sleep clamped to whatever remained of the window.
        assert!(gaps.len() >= 3);
        assert!(gaps[0] >= base);
        assert!(gaps[1] >= base * 2);
        assert!(gaps[2] >= cap);

        // No sleep runs past the window end; the last attempt lands at the
        // window boundary, give or take scheduling slack.
        let last = *times.last().unwrap();
        assert!(last - start <= window + cap + Duration::from_millis(100));
    }

    #[test]
    fn maximal_window_does_not_overflow() {
        let (source, calls) = ScriptedSource::new(vec![empty(), some_tags()]);
        let refresher = Refresher::with_intervals(
            source,
            Duration::from_millis(1),
            Duration::from_millis(2),
        );

        let tags = refresher.update(TIMEOUT, Duration::MAX).unwrap();
        assert_eq!(tags.len(), 1);
        assert_eq!(*calls.borrow(), 2);
    }

    #[test]
    fn hard_error_propagates_without_retry() {
        let (source, calls) = ScriptedSource::new(vec![Err(SystagsError::RemoteFetch {
            message: "boom".into(),
        })]);
        let refresher = Refresher::new(source);

        let err = refresher.update(TIMEOUT, Duration::from_secs(60)).unwrap_err();
        assert!(matches!(err, SystagsError::RemoteFetch { .. }));
        assert_eq!(*calls.borrow(), 1);
    }

    #[test]
    fn unsupported_source_is_a_fetch_error() {
        let (source, _) = ScriptedSource::new(vec![Ok(FetchOutcome::Unsupported)]);
        let refresher = Refresher::new(source);

        let err = refresher.update(TIMEOUT, Duration::ZERO).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("scripted"));
    }
}
