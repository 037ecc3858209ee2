//! Run configuration for the feed client.
//!
//! The original feed tooling kept its transport target and timing knobs as
//! module-level constants; here they are an explicit immutable value handed
//! to the client at construction, with builder-style setters.

use std::{net::SocketAddr, time::Duration};

const DEFAULT_RECOVERY_TIMEOUT: Duration = Duration::from_secs(5);
const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Bounded-retry policy for single-packet recovery fetches.
///
/// Attempts are sequential, each on a fresh connection. The default matches
/// the protocol's historical behaviour: three attempts with no delay between
/// them.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use tapefeed::config::RetryPolicy;
///
/// let policy = RetryPolicy::default()
///     .max_attempts(5)
///     .delay(Duration::from_millis(100));
/// assert_eq!(policy.max_attempts_value(), 5);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            delay: Duration::ZERO,
        }
    }
}

impl RetryPolicy {
    /// Set the attempt bound. Clamped to at least one attempt.
    #[must_use]
    pub fn max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Set the pause between consecutive attempts.
    #[must_use]
    pub const fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Number of attempts allowed per sequence.
    #[must_use]
    pub const fn max_attempts_value(&self) -> u32 { self.max_attempts }

    /// Pause between consecutive attempts.
    #[must_use]
    pub const fn delay_value(&self) -> Duration { self.delay }
}

/// Immutable configuration for one feed client.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use tapefeed::config::FeedConfig;
///
/// let addr = "127.0.0.1:3000".parse().expect("valid socket address");
/// let config = FeedConfig::new(addr).recovery_timeout(Duration::from_secs(2));
/// assert_eq!(config.addr(), addr);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct FeedConfig {
    addr: SocketAddr,
    recovery_timeout: Duration,
    retry: RetryPolicy,
}

impl FeedConfig {
    /// Configuration targeting `addr` with default timing knobs.
    #[must_use]
    pub fn new(addr: SocketAddr) -> Self {
        Self {
            addr,
            recovery_timeout: DEFAULT_RECOVERY_TIMEOUT,
            retry: RetryPolicy::default(),
        }
    }

    /// Set the deadline for a single resend fetch.
    #[must_use]
    pub const fn recovery_timeout(mut self, timeout: Duration) -> Self {
        self.recovery_timeout = timeout;
        self
    }

    /// Replace the retry policy used for recovery fetches.
    #[must_use]
    pub const fn retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Server address the client connects to.
    #[must_use]
    pub const fn addr(&self) -> SocketAddr { self.addr }

    /// Deadline for a single resend fetch.
    #[must_use]
    pub const fn recovery_timeout_value(&self) -> Duration { self.recovery_timeout }

    /// Retry policy for recovery fetches.
    #[must_use]
    pub const fn retry_value(&self) -> RetryPolicy { self.retry }
}
