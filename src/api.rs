//! The vendor API client: operation dispatch, session side effects, and outcome types.

mod auth;
mod catalog;
mod metrics;
mod orders;

pub use auth::AuthSession;
pub use metrics::CallMetrics;
pub use orders::{BuyOutcome, OrderKind, UnknownOrderKind};

// self
use crate::{
	_prelude::*,
	endpoint::{ApiDescriptor, Operation},
	http::{ApiRequest, ApiTransport, HttpMethod, MultipartBody, RawResponse, RequestBody},
	obs::{self, CallKind, CallOutcome, CallSpan},
	params::Params,
	session::{Secret, Session, SessionState},
	store::{CredentialStore, StoredCredentials},
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestTransport;

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport.
pub type ReqwestResellerClient = ResellerClient<ReqwestTransport>;

/// Coordinates every operation against a single vendor deployment.
///
/// The client owns the transport, the descriptor, and the shared session state so operation
/// implementations can focus on their endpoint's semantics (validation, body shape, session
/// side effects). Cloning the client shares the session, the transport, and the call counters.
#[derive(Clone)]
pub struct ResellerClient<T>
where
	T: ?Sized + ApiTransport,
{
	/// Transport executing each round-trip.
	pub transport: Arc<T>,
	/// Descriptor pinning the base URL and endpoint table.
	pub descriptor: ApiDescriptor,
	/// Shared session credentials mutated by the auth operations.
	pub session: Arc<SessionState>,
	/// Always-on per-client call counters.
	pub call_metrics: Arc<CallMetrics>,
}
impl<T> ResellerClient<T>
where
	T: ?Sized + ApiTransport,
{
	/// Creates a client that reuses the caller-provided transport.
	pub fn with_transport(descriptor: ApiDescriptor, transport: impl Into<Arc<T>>) -> Self {
		Self {
			transport: transport.into(),
			descriptor,
			session: Arc::new(SessionState::default()),
			call_metrics: Arc::new(CallMetrics::default()),
		}
	}

	/// Replaces the session with one seeded from previously issued credentials.
	pub fn with_session(mut self, session: SessionState) -> Self {
		self.session = Arc::new(session);

		self
	}

	/// Snapshots the live session plus the endpoint table for persistence.
	pub fn export_credentials(&self) -> StoredCredentials {
		let session = self.session.snapshot();

		StoredCredentials {
			bearer_token: session.bearer_token.map(|token| token.expose().to_owned()),
			user_secret: session.callback_secret.map(|secret| secret.expose().to_owned()),
			endpoints: self.descriptor.endpoints.clone(),
		}
	}

	/// Saves the current session to `store` (whole object, atomically).
	pub async fn persist_session(&self, store: &dyn CredentialStore) -> Result<()> {
		store.save(self.export_credentials()).await?;

		Ok(())
	}

	/// Restores a previously saved session from `store`, when one exists.
	///
	/// Only credentials are applied; the stored endpoint table belongs to descriptor
	/// construction (see [`crate::endpoint::ApiDescriptorBuilder::endpoints`]).
	pub async fn restore_session(&self, store: &dyn CredentialStore) -> Result<bool> {
		match store.load().await? {
			Some(stored) => {
				self.session.restore(Session {
					bearer_token: stored.bearer_token.map(Secret::new),
					callback_secret: stored.user_secret.map(Secret::new),
				});

				Ok(true)
			},
			None => Ok(false),
		}
	}

	/// Builds the request for `operation` and executes one round-trip, decoding the response.
	///
	/// `Ok(None)` covers the soft-failure paths (network error, empty body); a body that is not
	/// valid JSON is the one hard error, since it indicates protocol drift rather than absence
	/// of content.
	pub(crate) async fn dispatch(
		&self,
		kind: CallKind,
		operation: Operation,
		method: HttpMethod,
		params: Params,
		attach_bearer: bool,
	) -> Result<Option<Value>> {
		let span = CallSpan::new(kind, "dispatch");

		obs::record_call_outcome(kind, CallOutcome::Attempt);
		self.call_metrics.record_attempt();

		let result = span
			.instrument(async move {
				let mut url = self.descriptor.url_for(operation)?;
				let body = match method {
					HttpMethod::Get => {
						let pairs = params.to_query_pairs();

						if !pairs.is_empty() {
							let mut query = url.query_pairs_mut();

							for (field, text) in pairs {
								query.append_pair(field, &text);
							}
						}

						RequestBody::Empty
					},
					HttpMethod::Post => post_body(params),
				};
				let bearer = if attach_bearer { self.session.bearer_token() } else { None };
				let raw = self
					.transport
					.execute(ApiRequest { method, url, body, bearer })
					.await?;

				decode_json(raw)
			})
			.await;

		match &result {
			Ok(Some(_)) => {
				obs::record_call_outcome(kind, CallOutcome::Success);
				self.call_metrics.record_success();
			},
			Ok(None) => {
				obs::record_call_outcome(kind, CallOutcome::Empty);
				self.call_metrics.record_empty();
			},
			Err(_) => {
				obs::record_call_outcome(kind, CallOutcome::Failure);
				self.call_metrics.record_failure();
			},
		}

		result
	}
}
#[cfg(feature = "reqwest")]
impl ResellerClient<ReqwestTransport> {
	/// Creates a client backed by the crate's default reqwest transport.
	pub fn new(descriptor: ApiDescriptor) -> Result<Self> {
		Ok(Self::with_transport(descriptor, ReqwestTransport::new()?))
	}
}
impl<T> Debug for ResellerClient<T>
where
	T: ?Sized + ApiTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ResellerClient")
			.field("descriptor", &self.descriptor)
			.field("authenticated", &self.session.bearer_token().is_some())
			.finish()
	}
}

/// Selects the POST body: a non-blank string `file` entry switches to multipart, with the path
/// pulled out of the sibling fields.
fn post_body(mut params: Params) -> RequestBody {
	match params.remove("file") {
		Some(Value::String(path)) if !path.is_empty() =>
			RequestBody::Multipart(MultipartBody { file: path.into(), fields: params }),
		Some(other) => {
			// A non-string `file` value cannot name a path; keep it in the JSON body.
			params.insert("file", other);

			RequestBody::Json(params.into_value())
		},
		None => RequestBody::Json(params.into_value()),
	}
}

fn decode_json(raw: Option<RawResponse>) -> Result<Option<Value>> {
	let Some(raw) = raw else { return Ok(None) };
	let mut deserializer = serde_json::Deserializer::from_slice(&raw.bytes);
	let value = serde_path_to_error::deserialize(&mut deserializer)
		.map_err(|e| Error::ResponseParse { source: e, status: raw.status })?;

	Ok(Some(value))
}

/// Non-empty string field accessor used by the response-shape checks.
pub(crate) fn str_field<'v>(value: &'v Value, field: &str) -> Option<&'v str> {
	value.get(field).and_then(Value::as_str).filter(|text| !text.is_empty())
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::json;
	// self
	use super::*;

	#[test]
	fn post_body_switches_to_multipart_on_a_string_file_path() {
		let params = Params::new().set("file", "/tmp/reviews.txt").set("quantity", 5);

		match post_body(params) {
			RequestBody::Multipart(multipart) => {
				assert_eq!(multipart.file.to_str(), Some("/tmp/reviews.txt"));
				assert_eq!(multipart.fields.into_value(), json!({ "quantity": 5 }));
			},
			other => panic!("expected a multipart body, got {other:?}"),
		}
	}

	#[test]
	fn post_body_keeps_non_string_file_values_in_json() {
		let params = Params::new().set("file", 7).set("quantity", 5);

		match post_body(params) {
			RequestBody::Json(value) => assert_eq!(value, json!({ "file": 7, "quantity": 5 })),
			other => panic!("expected a JSON body, got {other:?}"),
		}
	}

	#[test]
	fn decode_json_maps_absent_to_none_and_garbage_to_an_error() {
		assert!(matches!(decode_json(None), Ok(None)));

		let ok = decode_json(Some(RawResponse { status: 200, bytes: b"{\"a\":1}".to_vec() }));

		assert_eq!(ok.expect("Valid JSON should decode."), Some(json!({ "a": 1 })));

		let err = decode_json(Some(RawResponse { status: 200, bytes: b"{oops".to_vec() }))
			.expect_err("Malformed JSON should be a hard error.");

		assert!(matches!(err, Error::ResponseParse { status: 200, .. }));
	}
}
