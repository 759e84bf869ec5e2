//! Catalog reads: offer listings, single offers, and categories.

// self
use crate::{
	_prelude::*,
	api::ResellerClient,
	endpoint::Operation,
	http::{ApiTransport, HttpMethod},
	obs::CallKind,
	params::Params,
	validate::{Rule, RuleSet, Validation, validate},
};

impl<T> ResellerClient<T>
where
	T: ?Sized + ApiTransport,
{
	/// Lists offers, optionally filtered by `category_id`, `product_id`, and `discount`.
	///
	/// Blank filter values are dropped before encoding, so `discount: false` means "no filter"
	/// rather than "only undiscounted offers". Undeclared fields never reach the wire.
	pub async fn offers(&self, filter: Params) -> Result<Option<Value>> {
		let rules = RuleSet::new()
			.field("category_id", [Rule::Optional])
			.field("product_id", [Rule::Optional])
			.field("discount", [Rule::Optional]);
		let filter = match validate(&filter, &rules) {
			Validation::Clean(clean) => clean,
			// Optional-only rule sets cannot reject.
			Validation::Rejected(_) => Params::new(),
		};

		self.dispatch(CallKind::Offers, Operation::Offers, HttpMethod::Get, filter, true).await
	}

	/// Fetches one offer by id. The endpoint is public, so no bearer header is attached.
	pub async fn offer(&self, id: u64) -> Result<Option<Value>> {
		let params = Params::new().set("id", id);

		self.dispatch(CallKind::Offer, Operation::Offer, HttpMethod::Get, params, false).await
	}

	/// Lists every category available to the user.
	pub async fn categories(&self) -> Result<Option<Value>> {
		self.dispatch(CallKind::Categories, Operation::Categories, HttpMethod::Get, Params::new(), true)
			.await
	}
}
