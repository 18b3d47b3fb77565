//! Timer-gated commit of rapidly changing input
//!
//! The raw value follows every keystroke so it can be displayed; the
//! committed value, which drives filtering and address rewriting, only moves
//! once the input has been quiet for the configured period.
//!
//! Time is passed in explicitly, which keeps the state machine free of any
//! runtime and trivially testable.

use std::time::{Duration, Instant};

/// Default quiet period before a search term is committed
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(500);

/// Debounced value
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    raw: T,
    committed: T,
    last_input: Option<Instant>,
    quiet: Duration,
}

impl<T: Clone + PartialEq> Debouncer<T> {
    /// Start with `initial` as both the raw and the committed value
    #[must_use]
    pub fn new(initial: T, quiet: Duration) -> Self {
        Self {
            raw: initial.clone(),
            committed: initial,
            last_input: None,
            quiet,
        }
    }

    /// Latest input, for display
    #[must_use]
    pub const fn raw(&self) -> &T {
        &self.raw
    }

    /// Value downstream consumers should use
    #[must_use]
    pub const fn committed(&self) -> &T {
        &self.committed
    }

    /// True while an input is waiting for its quiet period
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.last_input.is_some()
    }

    /// Record new input and restart the quiet period
    pub fn input(&mut self, value: T, now: Instant) {
        self.raw = value;
        self.last_input = Some(now);
    }

    /// Commit the raw value if it has been quiet long enough
    ///
    /// Returns the committed value when it changed in this call. Typing a
    /// value and then restoring the old one before the period elapses
    /// commits nothing.
    pub fn poll(&mut self, now: Instant) -> Option<&T> {
        let since = self.last_input?;
        if now.saturating_duration_since(since) < self.quiet {
            return None;
        }
        self.commit()
    }

    /// Commit the raw value immediately
    pub fn flush(&mut self) -> Option<&T> {
        self.commit()
    }

    fn commit(&mut self) -> Option<&T> {
        self.last_input = None;
        if self.raw == self.committed {
            return None;
        }
        self.committed = self.raw.clone();
        Some(&self.committed)
    }
}
