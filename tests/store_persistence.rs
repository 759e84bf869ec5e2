#![cfg(feature = "reqwest")]

// std
use std::{
	env, fs, process,
	time::{SystemTime, UNIX_EPOCH},
};
// self
use reseller_sdk::{
	api::ResellerClient,
	endpoint::ApiDescriptor,
	http::ReqwestTransport,
	session::{Secret, SessionState},
	store::{CredentialStore, FileStore, MemoryStore, StoredCredentials},
	url::Url,
};

fn build_client() -> ResellerClient<ReqwestTransport> {
	let descriptor = ApiDescriptor::builder(
		Url::parse("https://vendor.example.com/api/v1/").expect("Fixture base URL should parse."),
	)
	.build()
	.expect("Fixture descriptor should build.");

	ResellerClient::new(descriptor).expect("Fixture client should build.")
}

fn temp_path() -> std::path::PathBuf {
	let nanos = SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.expect("System clock should be past the epoch.")
		.as_nanos();

	env::temp_dir().join(format!("reseller_sdk_settings_{}_{nanos}.json", process::id()))
}

#[tokio::test]
async fn sessions_round_trip_through_a_settings_file() {
	let path = temp_path();
	let store = FileStore::open(&path).expect("Settings store should open.");
	let saver = build_client().with_session(SessionState::with_credentials(
		Some(Secret::new("tok-1")),
		Some(Secret::new("sec-1")),
	));

	saver.persist_session(&store).await.expect("Persisting the session should succeed.");

	let raw = fs::read_to_string(&path).expect("Settings file should exist after persist.");

	assert!(raw.contains("\"bearerToken\""));
	assert!(raw.contains("\"userSecret\""));
	assert!(raw.contains("\"endpoints\""));

	let restorer = build_client();

	assert!(
		restorer.restore_session(&store).await.expect("Restoring the session should succeed."),
	);
	assert_eq!(restorer.session.bearer_token().as_ref().map(Secret::expose), Some("tok-1"));
	assert_eq!(restorer.session.callback_secret().as_ref().map(Secret::expose), Some("sec-1"));

	fs::remove_file(&path).expect("Failed to remove the temporary settings file.");
}

#[tokio::test]
async fn a_second_save_replaces_the_whole_snapshot() {
	let store = MemoryStore::default();
	let client = build_client().with_session(SessionState::with_credentials(
		Some(Secret::new("tok-1")),
		Some(Secret::new("sec-1")),
	));

	client.persist_session(&store).await.expect("First persist should succeed.");
	client.session.clear_bearer_token();
	client.persist_session(&store).await.expect("Second persist should succeed.");

	let stored = store
		.load()
		.await
		.expect("Loading the snapshot should succeed.")
		.expect("A snapshot should be present after persisting.");

	assert_eq!(
		stored,
		StoredCredentials {
			bearer_token: None,
			user_secret: Some("sec-1".into()),
			..Default::default()
		},
	);
}

#[tokio::test]
async fn restoring_from_an_empty_store_is_a_no_op() {
	let store = MemoryStore::default();
	let client = build_client().with_session(SessionState::with_credentials(
		Some(Secret::new("keep-me")),
		None,
	));

	assert!(
		!client.restore_session(&store).await.expect("Empty restore should not error."),
	);
	assert_eq!(client.session.bearer_token().as_ref().map(Secret::expose), Some("keep-me"));
}
