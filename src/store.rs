//! Credential persistence contracts and built-in settings stores.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

// self
use crate::{_prelude::*, endpoint::EndpointTable};

/// Boxed future returned by [`CredentialStore`] implementations.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + 'a + Send>>;

/// Persistence contract for the SDK's settings snapshot.
///
/// Implementations replace the whole snapshot on every save—partial updates are never written,
/// so readers observe either the previous or the new settings object.
pub trait CredentialStore
where
	Self: Send + Sync,
{
	/// Loads the stored snapshot, when one exists.
	fn load(&self) -> StoreFuture<'_, Option<StoredCredentials>>;

	/// Persists (replaces) the snapshot.
	fn save(&self, credentials: StoredCredentials) -> StoreFuture<'_, ()>;
}

/// Flat settings snapshot persisted between runs.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredCredentials {
	/// Bearer token, when the session was authenticated at save time.
	pub bearer_token: Option<String>,
	/// Callback secret, when one was held.
	pub user_secret: Option<String>,
	/// Endpoint table in effect when the snapshot was taken.
	#[serde(default)]
	pub endpoints: EndpointTable,
}

/// Error type produced by [`CredentialStore`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum StoreError {
	/// Serialization failures surfaced by the backend.
	#[error("Serialization error: {message}.")]
	Serialization {
		/// Human-readable error payload.
		message: String,
	},
	/// Backend-level failure for the storage engine.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}

#[cfg(test)]
mod tests {
	// std
	use std::error::Error as StdError;
	// self
	use super::*;
	use crate::error::Error;

	#[test]
	fn store_error_converts_into_sdk_error_with_source() {
		let store_error = StoreError::Backend { message: "settings file unreachable".into() };
		let sdk_error: Error = store_error.clone().into();

		assert!(matches!(sdk_error, Error::Store(_)));
		assert!(sdk_error.to_string().contains("settings file unreachable"));

		let source = StdError::source(&sdk_error)
			.expect("SDK error should expose the underlying store error as its source.");

		assert_eq!(source.to_string(), store_error.to_string());
	}

	#[test]
	fn snapshot_serializes_with_the_settings_file_keys() {
		let snapshot = StoredCredentials {
			bearer_token: Some("tok-1".into()),
			user_secret: Some("sec-1".into()),
			endpoints: EndpointTable::default(),
		};
		let payload =
			serde_json::to_string(&snapshot).expect("Snapshot should serialize to JSON.");

		assert!(payload.contains("\"bearerToken\":\"tok-1\""));
		assert!(payload.contains("\"userSecret\":\"sec-1\""));
		assert!(payload.contains("\"endpoints\":{"));

		let round_trip: StoredCredentials =
			serde_json::from_str(&payload).expect("Serialized snapshot should deserialize.");

		assert_eq!(round_trip, snapshot);
	}
}
