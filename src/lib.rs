//! Typed client SDK for the reseller marketplace REST API—authentication, catalog browsing,
//! order placement, and HMAC callback verification in one crate.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod api;
pub mod callback;
pub mod endpoint;
pub mod error;
pub mod http;
pub mod obs;
pub mod params;
pub mod session;
pub mod store;
pub mod validate;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{api::ResellerClient, endpoint::ApiDescriptor, http::ReqwestTransport};

	/// Client type alias used by reqwest-backed integration tests.
	pub type ReqwestTestClient = ResellerClient<ReqwestTransport>;

	/// Builds a descriptor rooted at a mock server's base URL.
	pub fn mock_descriptor(base_url: &str) -> ApiDescriptor {
		ApiDescriptor::builder(Url::parse(base_url).expect("Failed to parse mock base URL."))
			.build()
			.expect("Failed to build mock descriptor.")
	}

	/// Constructs a [`ResellerClient`] pointed at a mock server.
	pub fn build_mock_client(base_url: &str) -> ReqwestTestClient {
		ResellerClient::new(mock_descriptor(base_url)).expect("Failed to build mock-backed client.")
	}
}

mod _prelude {
	pub use std::{
		collections::BTreeMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	pub use parking_lot::RwLock;
	#[cfg(feature = "reqwest")]
	pub use reqwest::Client as ReqwestClient;
	pub use serde::{Deserialize, Serialize};
	pub use serde_json::{Map as JsonMap, Value};
	pub use thiserror::Error as ThisError;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(all(test, feature = "reqwest"))] use {color_eyre as _, httpmock as _};
