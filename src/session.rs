//! Mutable session credentials—bearer token and callback secret—behind one lock.

// self
use crate::_prelude::*;

/// Redacted secret wrapper keeping credentials out of logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Secret(String);
impl Secret {
	/// Wraps a new secret string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the inner value. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}
}
impl AsRef<str> for Secret {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl Debug for Secret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("Secret").field(&"<redacted>").finish()
	}
}
impl Display for Secret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

/// Point-in-time snapshot of the session credentials.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
	/// Bearer token granting authenticated API access; `None` means unauthenticated.
	pub bearer_token: Option<Secret>,
	/// Per-user secret verifying inbound callback signatures.
	pub callback_secret: Option<Secret>,
}

/// Shared, externally synchronizable session holder.
///
/// Operations mutate credentials through these methods only, so the thread-safety obligations
/// live in one place: reads take a snapshot, writes are last-writer-wins.
#[derive(Debug, Default)]
pub struct SessionState {
	inner: RwLock<Session>,
}
impl SessionState {
	/// Creates a session seeded with previously issued credentials.
	pub fn with_credentials(
		bearer_token: Option<Secret>,
		callback_secret: Option<Secret>,
	) -> Self {
		Self { inner: RwLock::new(Session { bearer_token, callback_secret }) }
	}

	/// Returns a snapshot of the current credentials.
	pub fn snapshot(&self) -> Session {
		self.inner.read().clone()
	}

	/// Returns the current bearer token, if one is held.
	pub fn bearer_token(&self) -> Option<Secret> {
		self.inner.read().bearer_token.clone()
	}

	/// Returns the current callback secret, if one is held.
	pub fn callback_secret(&self) -> Option<Secret> {
		self.inner.read().callback_secret.clone()
	}

	/// Stores a freshly issued bearer token.
	pub fn set_bearer_token(&self, token: Secret) {
		self.inner.write().bearer_token = Some(token);
	}

	/// Drops the bearer token, returning the session to the unauthenticated state.
	pub fn clear_bearer_token(&self) {
		self.inner.write().bearer_token = None;
	}

	/// Overwrites the callback secret; `None` clears it.
	pub fn set_callback_secret(&self, secret: Option<Secret>) {
		self.inner.write().callback_secret = secret;
	}

	/// Replaces the whole session with `session`.
	pub fn restore(&self, session: Session) {
		*self.inner.write() = session;
	}
}
