//! Transport primitives executing one HTTP round-trip per operation.
//!
//! [`ApiTransport`] is the crate's only dependency on an HTTP stack. The bundled
//! [`ReqwestTransport`] pins the connection discipline the vendor expects: no redirect
//! following, a fresh connection per call, and a fixed timeout. Transport-level failures are
//! soft—they surface as an absent response, never as an error—so callers treat a dropped
//! connection exactly like an operation that returned nothing.

// std
use std::{path::PathBuf, time::Duration};
// crates.io
#[cfg(feature = "reqwest")]
use reqwest::{
	Body,
	header::{CONTENT_TYPE, HeaderValue},
	multipart::{Form, Part},
	redirect::Policy,
};
// self
#[cfg(feature = "reqwest")]
use crate::{error::ConfigError, params::scalar_text};
use crate::{_prelude::*, params::Params, session::Secret};

/// Timeout applied to every call.
pub const CALL_TIMEOUT: Duration = Duration::from_secs(60);

/// HTTP verbs used by the dispatch table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
	/// Query-string request without a body.
	Get,
	/// JSON or multipart body request.
	Post,
}

/// One fully prepared outbound request.
#[derive(Debug)]
pub struct ApiRequest {
	/// HTTP verb.
	pub method: HttpMethod,
	/// Absolute URL with any query string already applied.
	pub url: Url,
	/// Body payload for POST requests.
	pub body: RequestBody,
	/// Bearer token to attach, when the operation requires one and a token is held.
	pub bearer: Option<Secret>,
}

/// Body variants understood by the transport.
#[derive(Debug)]
pub enum RequestBody {
	/// No body (GET requests).
	Empty,
	/// JSON-encoded body.
	Json(Value),
	/// Multipart form streaming one file plus accompanying fields.
	Multipart(MultipartBody),
}

/// Multipart body: one on-disk file plus its sibling fields.
#[derive(Debug)]
pub struct MultipartBody {
	/// Path to the file streamed under the `file` part.
	pub file: PathBuf,
	/// Remaining fields sent as text parts.
	pub fields: Params,
}

/// Raw response handed back to the dispatch layer.
#[derive(Clone, Debug)]
pub struct RawResponse {
	/// HTTP status code.
	pub status: u16,
	/// Unparsed response body; never empty.
	pub bytes: Vec<u8>,
}

/// Boxed future returned by [`ApiTransport`] implementations.
pub type TransportFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + 'a + Send>>;

/// Abstraction over HTTP stacks capable of executing one vendor API round-trip.
///
/// `Ok(None)` means the call failed softly (network error or empty body). Implementations must
/// not retry and must not follow redirects; the vendor's endpoints answer directly, and a
/// redirect indicates a misconfigured base URL.
pub trait ApiTransport
where
	Self: 'static + Send + Sync,
{
	/// Executes `request`, returning the raw body when a non-empty one arrived.
	fn execute(&self, request: ApiRequest) -> TransportFuture<'_, Option<RawResponse>>;
}

#[cfg(feature = "reqwest")]
/// Reqwest-backed [`ApiTransport`] with the vendor's fixed connection discipline.
#[derive(Clone, Debug)]
pub struct ReqwestTransport(ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestTransport {
	/// Builds the default transport: redirects disabled, connection pooling disabled, and the
	/// fixed [`CALL_TIMEOUT`].
	pub fn new() -> Result<Self> {
		let client = ReqwestClient::builder()
			.redirect(Policy::none())
			.pool_max_idle_per_host(0)
			.timeout(CALL_TIMEOUT)
			.build()
			.map_err(ConfigError::from)?;

		Ok(Self(client))
	}

	/// Wraps an existing [`ReqwestClient`].
	///
	/// Configure the client to disable redirect following before passing it in.
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	async fn run(client: ReqwestClient, request: ApiRequest) -> Result<Option<RawResponse>> {
		let mut builder = match request.method {
			HttpMethod::Get => client
				.get(request.url)
				.header(CONTENT_TYPE, HeaderValue::from_static("application/json")),
			HttpMethod::Post => client.post(request.url),
		};

		builder = match request.body {
			RequestBody::Empty => builder,
			RequestBody::Json(value) => builder.json(&value),
			RequestBody::Multipart(multipart) => builder.multipart(build_form(multipart).await?),
		};

		if let Some(bearer) = request.bearer {
			builder = builder.bearer_auth(bearer.expose());
		}

		let response = match builder.send().await {
			Ok(response) => response,
			Err(e) => {
				crate::obs::note_soft_failure("send", &e);

				return Ok(None);
			},
		};
		let status = response.status().as_u16();
		let bytes = match response.bytes().await {
			Ok(bytes) => bytes,
			Err(e) => {
				crate::obs::note_soft_failure("read_body", &e);

				return Ok(None);
			},
		};

		if bytes.is_empty() {
			return Ok(None);
		}

		Ok(Some(RawResponse { status, bytes: bytes.to_vec() }))
	}
}
#[cfg(feature = "reqwest")]
impl ApiTransport for ReqwestTransport {
	fn execute(&self, request: ApiRequest) -> TransportFuture<'_, Option<RawResponse>> {
		let client = self.0.clone();

		Box::pin(Self::run(client, request))
	}
}

/// Assembles the multipart form: the `file` part streams from disk under its guessed MIME type,
/// and the remaining fields ride alongside as text parts (non-scalars are JSON-encoded).
#[cfg(feature = "reqwest")]
async fn build_form(multipart: MultipartBody) -> Result<Form> {
	let MultipartBody { file, fields } = multipart;
	let handle = tokio::fs::File::open(&file)
		.await
		.map_err(|e| Error::FileUnreadable { path: file.clone(), source: e })?;
	let mime = mime_guess::from_path(&file).first_or_octet_stream();
	let part = Part::stream(Body::from(handle))
		.file_name("file")
		.mime_str(mime.essence_str())
		.map_err(ConfigError::from)?;
	let mut form = Form::new().part("file", part);

	for (field, value) in fields {
		let text = scalar_text(&value).unwrap_or_else(|| value.to_string());

		form = form.text(field, text);
	}

	Ok(form)
}
