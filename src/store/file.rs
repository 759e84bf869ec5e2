//! Simple file-backed [`CredentialStore`] for CLI tools and bots.

// std
use std::{
	fs::{self, File},
	io::Write,
	path::{Path, PathBuf},
};
// self
use crate::{
	_prelude::*,
	store::{CredentialStore, StoreError, StoreFuture, StoredCredentials},
};

/// Persists the settings snapshot to a JSON file after each save.
///
/// Writes go to a sibling temp file first and are renamed into place, so a crash mid-save never
/// leaves a torn snapshot behind.
#[derive(Clone, Debug)]
pub struct FileStore {
	path: PathBuf,
}
impl FileStore {
	/// Creates a store at the provided path, creating parent directories eagerly.
	pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
		let path = path.into();

		Self::ensure_parent_exists(&path)?;

		Ok(Self { path })
	}

	/// Path the snapshot is written to.
	pub fn path(&self) -> &Path {
		&self.path
	}

	fn ensure_parent_exists(path: &Path) -> Result<(), StoreError> {
		if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
			fs::create_dir_all(parent).map_err(|e| StoreError::Backend {
				message: format!("Failed to create store directory {}: {e}", parent.display()),
			})?;
		}

		Ok(())
	}

	fn load_snapshot(path: &Path) -> Result<Option<StoredCredentials>, StoreError> {
		if !path.exists() {
			return Ok(None);
		}

		let metadata = path.metadata().map_err(|e| StoreError::Backend {
			message: format!("Failed to inspect {}: {e}", path.display()),
		})?;

		if metadata.len() == 0 {
			return Ok(None);
		}

		let bytes = fs::read(path).map_err(|e| StoreError::Backend {
			message: format!("Failed to read {}: {e}", path.display()),
		})?;
		let credentials =
			serde_json::from_slice(&bytes).map_err(|e| StoreError::Serialization {
				message: format!("Failed to parse {}: {e}", path.display()),
			})?;

		Ok(Some(credentials))
	}

	fn persist(&self, credentials: &StoredCredentials) -> Result<(), StoreError> {
		Self::ensure_parent_exists(&self.path)?;

		let serialized =
			serde_json::to_vec_pretty(credentials).map_err(|e| StoreError::Serialization {
				message: format!("Failed to serialize settings snapshot: {e}"),
			})?;
		let mut tmp_path = self.path.clone();

		tmp_path.set_extension("tmp");

		{
			let mut file = File::create(&tmp_path).map_err(|e| StoreError::Backend {
				message: format!("Failed to create {}: {e}", tmp_path.display()),
			})?;

			file.write_all(&serialized).map_err(|e| StoreError::Backend {
				message: format!("Failed to write {}: {e}", tmp_path.display()),
			})?;
			file.sync_all().map_err(|e| StoreError::Backend {
				message: format!("Failed to sync {}: {e}", tmp_path.display()),
			})?;
		}

		fs::rename(&tmp_path, &self.path).map_err(|e| StoreError::Backend {
			message: format!("Failed to replace {}: {e}", self.path.display()),
		})
	}
}
impl CredentialStore for FileStore {
	fn load(&self) -> StoreFuture<'_, Option<StoredCredentials>> {
		Box::pin(async move { Self::load_snapshot(&self.path) })
	}

	fn save(&self, credentials: StoredCredentials) -> StoreFuture<'_, ()> {
		Box::pin(async move { self.persist(&credentials) })
	}
}

#[cfg(test)]
mod tests {
	// std
	use std::{
		env, process,
		time::{SystemTime, UNIX_EPOCH},
	};
	// crates.io
	use tokio::runtime::Runtime;
	// self
	use super::*;

	fn temp_path() -> PathBuf {
		let nanos = SystemTime::now()
			.duration_since(UNIX_EPOCH)
			.expect("System clock should be past the epoch.")
			.as_nanos();
		let unique = format!("reseller_sdk_file_store_{}_{nanos}.json", process::id());

		env::temp_dir().join(unique)
	}

	#[test]
	fn save_and_reload_round_trip() {
		let path = temp_path();
		let store = FileStore::open(&path).expect("Failed to open file store snapshot.");
		let snapshot = StoredCredentials {
			bearer_token: Some("bearer-token".into()),
			user_secret: Some("user-secret".into()),
			..Default::default()
		};
		let rt = Runtime::new().expect("Failed to build Tokio runtime for file store test.");

		rt.block_on(store.save(snapshot.clone()))
			.expect("Failed to save fixture snapshot to file store.");
		drop(store);

		let reopened = FileStore::open(&path).expect("Failed to reopen file store snapshot.");
		let fetched = rt
			.block_on(reopened.load())
			.expect("Failed to load fixture snapshot from file store.")
			.expect("File store lost snapshot after reopen.");

		assert_eq!(fetched, snapshot);

		fs::remove_file(&path).unwrap_or_else(|e| {
			panic!("Failed to remove temporary settings snapshot {}: {e}", path.display())
		});
	}

	#[test]
	fn missing_and_empty_files_load_as_none() {
		let path = temp_path();
		let store = FileStore::open(&path).expect("Failed to open file store snapshot.");
		let rt = Runtime::new().expect("Failed to build Tokio runtime for file store test.");

		assert_eq!(rt.block_on(store.load()).expect("Missing file should load cleanly."), None);

		fs::write(&path, b"").expect("Failed to create empty settings file.");

		assert_eq!(rt.block_on(store.load()).expect("Empty file should load cleanly."), None);

		fs::remove_file(&path).unwrap_or_else(|e| {
			panic!("Failed to remove temporary settings snapshot {}: {e}", path.display())
		});
	}
}
