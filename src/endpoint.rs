//! Operation table and descriptor mapping logical operations onto the vendor's URL space.

// self
use crate::{_prelude::*, error::ConfigError};

/// Logical API operations exposed by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
	/// Exchange email + password for a bearer token.
	Auth,
	/// Fetch the authenticated user's profile.
	User,
	/// Invalidate the current bearer token.
	Invalidate,
	/// Exchange the current bearer token for a fresh one.
	Refresh,
	/// List offers, optionally filtered.
	Offers,
	/// Fetch one offer by id.
	Offer,
	/// List purchasable categories.
	Categories,
	/// List the user's orders.
	Orders,
	/// Fetch one order by number.
	Order,
	/// Place an order.
	Buy,
}
impl Operation {
	/// Every operation, in settings-file order.
	pub const ALL: [Self; 10] = [
		Self::Auth,
		Self::User,
		Self::Invalidate,
		Self::Refresh,
		Self::Offers,
		Self::Offer,
		Self::Categories,
		Self::Orders,
		Self::Order,
		Self::Buy,
	];

	/// Returns the stable settings-file key for this operation.
	pub const fn key(self) -> &'static str {
		match self {
			Self::Auth => "auth",
			Self::User => "user",
			Self::Invalidate => "invalidate",
			Self::Refresh => "refresh",
			Self::Offers => "offers",
			Self::Offer => "offer",
			Self::Categories => "categories",
			Self::Orders => "orders",
			Self::Order => "order",
			Self::Buy => "buy",
		}
	}

	const fn default_path(self) -> &'static str {
		match self {
			Self::Auth => "user/login",
			Self::User => "user",
			Self::Invalidate => "user/invalidate",
			Self::Refresh => "user/refresh",
			Self::Offers => "offers",
			Self::Offer => "offer",
			Self::Categories => "categories",
			Self::Orders => "orders",
			Self::Order => "order",
			Self::Buy => "buy",
		}
	}
}
impl Display for Operation {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.key())
	}
}

/// Operation → path-segment table, immutable once the descriptor is built.
///
/// The table round-trips through the settings file, so a deployment can pin endpoint renames
/// without a new SDK release. Operations absent from a deserialized table fall back to their
/// canonical path.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EndpointTable(BTreeMap<Operation, String>);
impl EndpointTable {
	/// Returns the path segment for `operation`.
	pub fn path_of(&self, operation: Operation) -> &str {
		self.0.get(&operation).map(String::as_str).unwrap_or(operation.default_path())
	}

	pub(crate) fn set_path(&mut self, operation: Operation, path: impl Into<String>) {
		self.0.insert(operation, path.into());
	}
}
impl Default for EndpointTable {
	fn default() -> Self {
		Self(
			Operation::ALL
				.iter()
				.map(|operation| (*operation, operation.default_path().to_owned()))
				.collect(),
		)
	}
}

/// Immutable descriptor pinning the client to one vendor deployment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiDescriptor {
	/// Base URL every operation path is joined onto; always ends with `/`.
	pub base_url: Url,
	/// Operation → path-segment table.
	pub endpoints: EndpointTable,
}
impl ApiDescriptor {
	/// Creates a new builder rooted at `base_url`.
	pub fn builder(base_url: Url) -> ApiDescriptorBuilder {
		ApiDescriptorBuilder::new(base_url)
	}

	/// Resolves the absolute URL for `operation`.
	pub fn url_for(&self, operation: Operation) -> Result<Url, ConfigError> {
		let path = self.endpoints.path_of(operation);

		self.base_url
			.join(path)
			.map_err(|e| ConfigError::InvalidEndpointPath { path: path.to_owned(), source: e })
	}
}

/// Builder for [`ApiDescriptor`] values.
#[derive(Debug)]
pub struct ApiDescriptorBuilder {
	/// Base URL for the deployment being described.
	pub base_url: Url,
	/// Endpoint overrides applied on top of the canonical table.
	pub endpoints: EndpointTable,
}
impl ApiDescriptorBuilder {
	/// Creates a builder seeded with the canonical endpoint table.
	pub fn new(base_url: Url) -> Self {
		Self { base_url, endpoints: EndpointTable::default() }
	}

	/// Overrides the path segment for one operation.
	pub fn endpoint(mut self, operation: Operation, path: impl Into<String>) -> Self {
		self.endpoints.set_path(operation, path);

		self
	}

	/// Replaces the whole endpoint table.
	pub fn endpoints(mut self, endpoints: EndpointTable) -> Self {
		self.endpoints = endpoints;

		self
	}

	/// Consumes the builder and validates the resulting descriptor.
	///
	/// The base path is normalized to end with `/` so operation joins preserve any API prefix
	/// (`/api/v1/` + `user/login` → `/api/v1/user/login`).
	pub fn build(self) -> Result<ApiDescriptor, ConfigError> {
		let mut base_url = self.base_url;

		if !matches!(base_url.scheme(), "http" | "https") {
			return Err(ConfigError::UnsupportedScheme { url: base_url.to_string() });
		}
		if !base_url.path().ends_with('/') {
			let path = format!("{}/", base_url.path());

			base_url.set_path(&path);
		}

		Ok(ApiDescriptor { base_url, endpoints: self.endpoints })
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn url(value: &str) -> Url {
		Url::parse(value).expect("Failed to parse fixture URL.")
	}

	#[test]
	fn joins_preserve_the_api_prefix() {
		let descriptor = ApiDescriptor::builder(url("https://vendor.example.com/api/v1"))
			.build()
			.expect("Descriptor fixture should build.");

		assert_eq!(
			descriptor.url_for(Operation::Auth).expect("Auth URL should resolve.").as_str(),
			"https://vendor.example.com/api/v1/user/login",
		);
		assert_eq!(
			descriptor.url_for(Operation::Buy).expect("Buy URL should resolve.").as_str(),
			"https://vendor.example.com/api/v1/buy",
		);
	}

	#[test]
	fn builder_rejects_unsupported_schemes() {
		let err = ApiDescriptor::builder(url("ftp://vendor.example.com/"))
			.build()
			.expect_err("Non-http schemes should be rejected.");

		assert!(matches!(err, ConfigError::UnsupportedScheme { .. }));
	}

	#[test]
	fn endpoint_overrides_apply() {
		let descriptor = ApiDescriptor::builder(url("https://vendor.example.com/"))
			.endpoint(Operation::Offers, "v2/offers")
			.build()
			.expect("Descriptor fixture should build.");

		assert_eq!(
			descriptor.url_for(Operation::Offers).expect("Offers URL should resolve.").as_str(),
			"https://vendor.example.com/v2/offers",
		);
		assert_eq!(descriptor.endpoints.path_of(Operation::Order), "order");
	}

	#[test]
	fn endpoint_table_serde_round_trip() {
		let table = EndpointTable::default();
		let payload =
			serde_json::to_string(&table).expect("Endpoint table should serialize to JSON.");

		assert!(payload.contains("\"auth\":\"user/login\""));

		let round_trip: EndpointTable =
			serde_json::from_str(&payload).expect("Serialized table should deserialize.");

		assert_eq!(round_trip, table);
	}
}
