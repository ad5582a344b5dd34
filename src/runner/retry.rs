//! Bounded re-probing after an install.
//!
//! A freshly installed interpreter may not be visible immediately (package
//! post-install hooks, PATH caches), so the prober is re-run with a linear
//! backoff until it reports a version or the attempts run out.

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::detection::VersionProbe;
use crate::error::{Result, SetupError};
use crate::version::VersionString;

/// Default number of probe attempts.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Default base delay between attempts.
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_secs(5);

/// How many times to probe and how long to pause in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_delay: DEFAULT_BASE_DELAY,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts,
            base_delay,
        }
    }

    /// Pause after failed attempt `attempt` (1-indexed). Saturates at
    /// `Duration::MAX`.
    pub fn delay_after(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(attempt)
    }
}

/// Probe until a version is reported.
///
/// The first attempt runs immediately. After failed attempt `i`, if another
/// attempt remains, `sleep` is called with `i * base_delay`.
pub fn resolve_version(
    probe: &dyn VersionProbe,
    policy: &RetryPolicy,
    sleep: &dyn Fn(Duration),
) -> Result<VersionString> {
    for attempt in 1..=policy.max_attempts {
        debug!(attempt, max = policy.max_attempts, "Probing Tcl version");
        if let Some(version) = probe.probe() {
            info!(attempt, version = %version, "Tcl version resolved");
            return Ok(version);
        }

        if attempt < policy.max_attempts {
            let delay = policy.delay_after(attempt);
            warn!(
                attempt,
                delay_secs = delay.as_secs_f64(),
                "Tcl not detected yet, retrying"
            );
            sleep(delay);
        }
    }

    Err(SetupError::RetryExhausted {
        attempts: policy.max_attempts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    fn version(s: &str) -> VersionString {
        VersionString::parse(s).unwrap()
    }

    #[test]
    fn default_policy_is_three_attempts_five_seconds() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.base_delay, Duration::from_secs(5));
    }

    #[test]
    fn delay_grows_linearly() {
        let policy = RetryPolicy::new(4, Duration::from_secs(2));
        assert_eq!(policy.delay_after(1), Duration::from_secs(2));
        assert_eq!(policy.delay_after(3), Duration::from_secs(6));
    }

    #[test]
    fn huge_base_delay_saturates_instead_of_overflowing() {
        let policy = RetryPolicy::new(3, Duration::from_secs(u64::MAX));
        assert_eq!(policy.delay_after(1), Duration::from_secs(u64::MAX));
        assert_eq!(policy.delay_after(2), Duration::MAX);

        let sleeps = RefCell::new(Vec::new());
        let probe = || None::<VersionString>;
        let sleep = |d: Duration| sleeps.borrow_mut().push(d);

        let err = resolve_version(&probe, &policy, &sleep).unwrap_err();

        assert!(matches!(err, SetupError::RetryExhausted { attempts: 3 }));
        assert_eq!(*sleeps.borrow(), vec![Duration::from_secs(u64::MAX), Duration::MAX]);
    }

    #[test]
    fn first_success_does_not_sleep() {
        let sleeps = RefCell::new(Vec::new());
        let probe = || Some(version("8.6.13"));

        let got = resolve_version(&probe, &RetryPolicy::default(), &|d| {
            sleeps.borrow_mut().push(d)
        })
        .unwrap();

        assert_eq!(got.as_str(), "8.6.13");
        assert!(sleeps.borrow().is_empty());
    }

    #[test]
    fn succeeds_on_third_attempt_after_linear_pauses() {
        let calls = Cell::new(0);
        let sleeps = RefCell::new(Vec::new());
        let probe = || {
            calls.set(calls.get() + 1);
            if calls.get() == 3 {
                Some(version("8.6.14"))
            } else {
                None
            }
        };

        let got = resolve_version(&probe, &RetryPolicy::default(), &|d| {
            sleeps.borrow_mut().push(d)
        })
        .unwrap();

        assert_eq!(got.as_str(), "8.6.14");
        assert_eq!(calls.get(), 3);
        assert_eq!(
            *sleeps.borrow(),
            vec![Duration::from_secs(5), Duration::from_secs(10)]
        );
    }

    #[test]
    fn exhaustion_reports_attempts_and_skips_final_pause() {
        let calls = Cell::new(0);
        let sleeps = RefCell::new(Vec::new());
        let probe = || {
            calls.set(calls.get() + 1);
            None::<VersionString>
        };

        let err = resolve_version(&probe, &RetryPolicy::default(), &|d| {
            sleeps.borrow_mut().push(d)
        })
        .unwrap_err();

        assert!(matches!(err, SetupError::RetryExhausted { attempts: 3 }));
        assert_eq!(calls.get(), 3);
        assert_eq!(sleeps.borrow().len(), 2);
    }

    #[test]
    fn single_attempt_never_sleeps() {
        let sleeps = RefCell::new(Vec::new());
        let probe = || None::<VersionString>;

        let err = resolve_version(&probe, &RetryPolicy::new(1, Duration::from_secs(5)), &|d| {
            sleeps.borrow_mut().push(d)
        })
        .unwrap_err();

        assert!(matches!(err, SetupError::RetryExhausted { attempts: 1 }));
        assert!(sleeps.borrow().is_empty());
    }
}
