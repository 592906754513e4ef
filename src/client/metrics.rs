// std
use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe counters for client activity.
#[derive(Debug, Default)]
pub struct ClientMetrics {
	logins: AtomicU64,
	requests: AtomicU64,
	unauthorized_retries: AtomicU64,
	failures: AtomicU64,
}
impl ClientMetrics {
	/// Returns the number of login round trips started.
	pub fn logins(&self) -> u64 {
		self.logins.load(Ordering::Relaxed)
	}

	/// Returns the number of authenticated requests sent, retries included.
	pub fn requests(&self) -> u64 {
		self.requests.load(Ordering::Relaxed)
	}

	/// Returns how many requests were replayed after a 401.
	pub fn unauthorized_retries(&self) -> u64 {
		self.unauthorized_retries.load(Ordering::Relaxed)
	}

	/// Returns the number of API calls that failed.
	pub fn failures(&self) -> u64 {
		self.failures.load(Ordering::Relaxed)
	}

	pub(crate) fn record_login(&self) {
		self.logins.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_request(&self) {
		self.requests.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_unauthorized_retry(&self) {
		self.unauthorized_retries.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_failure(&self) {
		self.failures.fetch_add(1, Ordering::Relaxed);
	}
}
