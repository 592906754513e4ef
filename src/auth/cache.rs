//! Process-wide bearer-token cache with single-flight logins.
//!
//! The API client asks [`TokenCache::token_with`] for a token before every request. The fast
//! path reads the cached value under a read lock; on a miss, callers queue on an async guard
//! so only the first one performs a login and everyone behind it reuses the result. A 401
//! calls [`TokenCache::invalidate`] with the rejected token, which only clears the slot if no
//! concurrent request has already replaced it.

// self
use crate::{_prelude::*, auth::BearerToken};

/// Token currently shared by every request of a client.
#[derive(Clone, Debug)]
pub struct CachedToken {
	/// Bearer token returned by the login endpoint.
	pub token: BearerToken,
	/// Instant the login completed.
	pub acquired_at: OffsetDateTime,
}

/// Shared token slot plus the singleflight guard that serializes logins.
#[derive(Debug, Default)]
pub struct TokenCache {
	slot: RwLock<Option<CachedToken>>,
	login_guard: AsyncMutex<()>,
}
impl TokenCache {
	/// Returns the cached entry, if any.
	pub fn current(&self) -> Option<CachedToken> {
		self.slot.read().clone()
	}

	/// Returns the cached token or runs `login` under the singleflight guard to obtain one.
	///
	/// A failed login leaves the cache empty so the next caller retries.
	pub async fn token_with<F, Fut>(&self, login: F) -> Result<BearerToken>
	where
		F: FnOnce() -> Fut,
		Fut: Future<Output = Result<BearerToken>>,
	{
		if let Some(cached) = self.current() {
			return Ok(cached.token);
		}

		let _singleflight = self.login_guard.lock().await;

		if let Some(cached) = self.current() {
			return Ok(cached.token);
		}

		let token = login().await?;

		*self.slot.write() =
			Some(CachedToken { token: token.clone(), acquired_at: OffsetDateTime::now_utc() });

		Ok(token)
	}

	/// Drops the cached token if it is still the `rejected` one; returns whether it did.
	pub fn invalidate(&self, rejected: &BearerToken) -> bool {
		let mut slot = self.slot.write();

		if slot.as_ref().is_some_and(|cached| &cached.token == rejected) {
			*slot = None;

			true
		} else {
			false
		}
	}

	/// Drops the cached token unconditionally.
	pub fn clear(&self) {
		*self.slot.write() = None;
	}
}

#[cfg(test)]
mod tests {
	// std
	use std::sync::atomic::{AtomicUsize, Ordering};
	// self
	use super::*;
	use crate::error::AuthError;

	fn token(raw: &str) -> BearerToken {
		BearerToken::parse(raw).expect("Fixture token should be valid.")
	}

	#[tokio::test]
	async fn caches_token_after_first_login() {
		let cache = TokenCache::default();
		let counter = AtomicUsize::new(0);
		let logins = &counter;
		let login = move || async move {
			logins.fetch_add(1, Ordering::SeqCst);

			Ok::<_, Error>(token("abc"))
		};
		let first = cache.token_with(login).await.expect("First login should succeed.");
		let second = cache.token_with(login).await.expect("Cached token should be returned.");

		assert_eq!(first, second);
		assert_eq!(counter.load(Ordering::SeqCst), 1);
		assert!(cache.current().is_some());
	}

	#[tokio::test]
	async fn concurrent_misses_share_one_login() {
		let cache = TokenCache::default();
		let counter = AtomicUsize::new(0);
		let logins = &counter;
		let login = move || async move {
			logins.fetch_add(1, Ordering::SeqCst);
			tokio::time::sleep(Duration::from_millis(20)).await;

			Ok::<_, Error>(token("shared"))
		};
		let (a, b, c) = tokio::join!(
			cache.token_with(login),
			cache.token_with(login),
			cache.token_with(login),
		);

		assert_eq!(a.expect("First caller should succeed.").expose(), "shared");
		assert_eq!(b.expect("Second caller should succeed.").expose(), "shared");
		assert_eq!(c.expect("Third caller should succeed.").expose(), "shared");
		assert_eq!(counter.load(Ordering::SeqCst), 1);
	}

	#[tokio::test]
	async fn failed_login_leaves_cache_empty() {
		let cache = TokenCache::default();
		let rejected =
			|| async { Err::<BearerToken, Error>(AuthError::Rejected { status: 403 }.into()) };
		let err = cache
			.token_with(rejected)
			.await
			.expect_err("Rejected login should surface.");

		assert_eq!(err.status(), Some(403));
		assert!(cache.current().is_none());

		let recovered = cache
			.token_with(|| async { Ok::<_, Error>(token("later")) })
			.await
			.expect("Retry should log in.");

		assert_eq!(recovered.expose(), "later");
	}

	#[tokio::test]
	async fn invalidate_ignores_stale_rejections() {
		let cache = TokenCache::default();
		let old = token("old");
		let seeded = old.clone();

		cache
			.token_with(move || async move { Ok::<_, Error>(seeded) })
			.await
			.expect("Seed login should succeed.");

		assert!(cache.invalidate(&old));
		assert!(!cache.invalidate(&old));

		cache
			.token_with(|| async { Ok::<_, Error>(token("new")) })
			.await
			.expect("Relogin should succeed.");

		assert!(!cache.invalidate(&old), "A stale 401 must not evict the refreshed token.");
		assert_eq!(cache.current().expect("Refreshed token should remain.").token.expose(), "new");

		cache.clear();

		assert!(cache.current().is_none());
	}
}
