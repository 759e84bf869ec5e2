//! Thread-safe in-memory [`CredentialStore`] for local development and tests.

// self
use crate::{
	_prelude::*,
	store::{CredentialStore, StoreError, StoreFuture, StoredCredentials},
};

type Slot = Arc<RwLock<Option<StoredCredentials>>>;

/// Thread-safe store that keeps the snapshot in-process for tests and demos.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore(Slot);
impl MemoryStore {
	fn load_now(slot: Slot) -> Result<Option<StoredCredentials>, StoreError> {
		Ok(slot.read().clone())
	}

	fn save_now(slot: Slot, credentials: StoredCredentials) -> Result<(), StoreError> {
		*slot.write() = Some(credentials);

		Ok(())
	}
}
impl CredentialStore for MemoryStore {
	fn load(&self) -> StoreFuture<'_, Option<StoredCredentials>> {
		let slot = self.0.clone();

		Box::pin(async move { Self::load_now(slot) })
	}

	fn save(&self, credentials: StoredCredentials) -> StoreFuture<'_, ()> {
		let slot = self.0.clone();

		Box::pin(async move { Self::save_now(slot, credentials) })
	}
}
