// std
use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe counters for API call outcomes.
#[derive(Debug, Default)]
pub struct CallMetrics {
	attempts: AtomicU64,
	success: AtomicU64,
	empty: AtomicU64,
	failure: AtomicU64,
}
impl CallMetrics {
	/// Returns the total number of dispatched calls.
	pub fn attempts(&self) -> u64 {
		self.attempts.load(Ordering::Relaxed)
	}

	/// Returns the number of calls that produced a decodable body.
	pub fn successes(&self) -> u64 {
		self.success.load(Ordering::Relaxed)
	}

	/// Returns the number of calls that failed softly or returned nothing.
	pub fn empties(&self) -> u64 {
		self.empty.load(Ordering::Relaxed)
	}

	/// Returns the number of hard failures.
	pub fn failures(&self) -> u64 {
		self.failure.load(Ordering::Relaxed)
	}

	pub(crate) fn record_attempt(&self) {
		self.attempts.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_success(&self) {
		self.success.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_empty(&self) {
		self.empty.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_failure(&self) {
		self.failure.fetch_add(1, Ordering::Relaxed);
	}
}
