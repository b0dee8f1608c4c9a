//! Capped exponential backoff for feed reconnects.
//!
//! A plain state machine: feeds ask for the next delay after each failure
//! and reset once a fresh connection delivers a message.

use std::time::Duration;

use super::config::reconnection::ReconnectionConfig;

#[derive(Debug, Clone)]
pub struct Backoff {
    attempt: u32,
    initial: Duration,
    current_delay: Duration,
    ceiling: Duration,
    multiplier: f64,
}

impl Backoff {
    /// Multipliers below 1 are treated as 1; a ceiling below the initial
    /// delay is raised to it.
    #[must_use]
    pub fn new(initial: Duration, ceiling: Duration, multiplier: f64) -> Self {
        Self {
            attempt: 0,
            initial,
            current_delay: initial,
            ceiling: ceiling.max(initial),
            multiplier: multiplier.max(1.0),
        }
    }

    /// Number of delays handed out since the last reset.
    #[must_use]
    pub const fn attempt(&self) -> u32 {
        self.attempt
    }

    /// Delay the next call to [`Backoff::next_delay`] will return.
    #[must_use]
    pub const fn current_delay(&self) -> Duration {
        self.current_delay
    }

    #[must_use]
    pub const fn ceiling(&self) -> Duration {
        self.ceiling
    }

    /// Return the delay to wait now and grow the following one.
    pub fn next_delay(&mut self) -> Duration {
        let delay = self.current_delay;
        self.attempt = self.attempt.saturating_add(1);
        let grown = self.current_delay.as_secs_f64() * self.multiplier;
        self.current_delay = if grown >= self.ceiling.as_secs_f64() {
            self.ceiling
        } else {
            Duration::from_secs_f64(grown)
        };
        delay
    }

    pub fn reset(&mut self) {
        self.attempt = 0;
        self.current_delay = self.initial;
    }
}

impl From<&ReconnectionConfig> for Backoff {
    fn from(config: &ReconnectionConfig) -> Self {
        Self::new(
            Duration::from_millis(config.initial_delay_ms),
            Duration::from_millis(config.max_delay_ms),
            config.backoff_multiplier,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delays_double_until_ceiling() {
        let mut backoff = Backoff::new(Duration::from_secs(1), Duration::from_secs(5), 2.0);

        assert_eq!(backoff.next_delay(), Duration::from_secs(1));
        assert_eq!(backoff.next_delay(), Duration::from_secs(2));
        assert_eq!(backoff.next_delay(), Duration::from_secs(4));
        assert_eq!(backoff.next_delay(), Duration::from_secs(5));
        assert_eq!(backoff.next_delay(), Duration::from_secs(5));
        assert_eq!(backoff.attempt(), 5);
    }

    #[test]
    fn reset_restores_initial_delay() {
        let mut backoff = Backoff::new(Duration::from_millis(100), Duration::from_secs(1), 3.0);
        backoff.next_delay();
        backoff.next_delay();
        backoff.reset();

        assert_eq!(backoff.attempt(), 0);
        assert_eq!(backoff.next_delay(), Duration::from_millis(100));
    }

    #[test]
    fn degenerate_inputs_are_clamped() {
        let mut backoff = Backoff::new(Duration::from_secs(2), Duration::from_secs(1), 0.5);
        assert_eq!(backoff.ceiling(), Duration::from_secs(2));
        assert_eq!(backoff.next_delay(), Duration::from_secs(2));
        assert_eq!(backoff.next_delay(), Duration::from_secs(2));
    }

    #[test]
    fn built_from_reconnection_config() {
        let backoff = Backoff::from(&ReconnectionConfig::default());
        assert_eq!(backoff.current_delay(), Duration::from_secs(1));
        assert_eq!(backoff.ceiling(), Duration::from_secs(30));
    }
}
