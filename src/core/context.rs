//! Explicit call context
//!
//! A [`Context`] travels down a call chain by reference. It carries an
//! optional deadline, a cancellation token that is a child of its
//! ancestors' tokens, and optionally a bound [`Logger`]. Logging through a
//! context that is done produces nothing.

use super::logger::Logger;
use super::value::Attr;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Default)]
pub struct Context {
    deadline: Option<Instant>,
    cancel: Option<CancellationToken>,
    logger: Option<Logger>,
}

/// Cancels the [`Context`] it was created with, and every context derived
/// from that one afterwards
#[derive(Debug, Clone)]
pub struct CancelHandle {
    token: CancellationToken,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

impl Context {
    /// The empty context: no deadline, never cancelled, no logger
    pub fn background() -> Self {
        Self::default()
    }

    /// Derive a context that is done at `deadline`. An earlier deadline
    /// inherited from `self` still applies.
    #[must_use]
    pub fn with_deadline(&self, deadline: Instant) -> Self {
        let mut derived = self.clone();
        derived.deadline = Some(match self.deadline {
            Some(current) => current.min(deadline),
            None => deadline,
        });
        derived
    }

    /// Derive a context that is done after `timeout`. A timeout too large to
    /// represent adds no deadline.
    #[must_use]
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        match Instant::now().checked_add(timeout) {
            Some(deadline) => self.with_deadline(deadline),
            None => self.clone(),
        }
    }

    #[must_use]
    pub fn with_cancel(&self) -> (Self, CancelHandle) {
        let token = match self.cancel {
            Some(ref parent) => parent.child_token(),
            None => CancellationToken::new(),
        };
        let mut derived = self.clone();
        derived.cancel = Some(token.clone());
        (derived, CancelHandle { token })
    }

    /// Whether the deadline has passed or any cancellation fired
    pub fn is_done(&self) -> bool {
        if self.deadline.is_some_and(|d| Instant::now() >= d) {
            return true;
        }
        self.cancel
            .as_ref()
            .is_some_and(CancellationToken::is_cancelled)
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Derive a context with `logger` bound, replacing any bound logger
    #[must_use]
    pub fn with_logger(&self, logger: Logger) -> Self {
        let mut derived = self.clone();
        derived.logger = Some(logger);
        derived
    }

    /// The bound logger, or a logger that discards everything
    pub fn logger(&self) -> Logger {
        self.logger.clone().unwrap_or_default()
    }

    /// Derive the bound logger with `attrs` and bind the result in a new
    /// context
    pub fn with_attrs(&self, attrs: &[Attr]) -> (Logger, Self) {
        let logger = self.logger().with(attrs);
        let derived = self.with_logger(logger.clone());
        (logger, derived)
    }
}
