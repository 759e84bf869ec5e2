//! Order reads and placement, including the per-kind validation tables.

// self
use crate::{
	_prelude::*,
	api::ResellerClient,
	endpoint::Operation,
	http::{ApiTransport, HttpMethod},
	obs::CallKind,
	params::Params,
	validate::{FieldErrors, Rule, RuleSet, Validation, validate},
};

/// Order kinds accepted by [`ResellerClient::buy`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OrderKind {
	/// Plain offer purchase.
	Offer,
	/// Review campaign, optionally with caller-written reviews.
	Review,
	/// App-install campaign spread over a number of days.
	Install,
}
impl OrderKind {
	/// Looks up a kind by its wire tag.
	pub fn from_tag(tag: &str) -> Option<Self> {
		match tag {
			"offer" => Some(Self::Offer),
			"review" => Some(Self::Review),
			"install" => Some(Self::Install),
			_ => None,
		}
	}

	/// Returns the wire tag for this kind.
	pub const fn as_tag(self) -> &'static str {
		match self {
			Self::Offer => "offer",
			Self::Review => "review",
			Self::Install => "install",
		}
	}

	/// Validation rules applied to this kind's order parameters.
	pub fn rules(self) -> RuleSet {
		match self {
			Self::Offer => RuleSet::new()
				.field("quantity", [Rule::Required])
				.field("offer_id", [Rule::Required])
				.field("callback_url", [Rule::Optional])
				.field("sandbox", [Rule::Optional]),
			Self::Review => RuleSet::new()
				.field("quantity", [Rule::Required])
				.field("offer_id", [Rule::Required])
				.field("url", [Rule::Required])
				.field("reviews_array", [Rule::Optional])
				.field("reviews", [Rule::Optional])
				.field("file", [Rule::Optional])
				.field("callback_url", [Rule::Optional])
				.field("sandbox", [Rule::Optional]),
			Self::Install => RuleSet::new()
				.field("quantity", [Rule::Required])
				.field("offer_id", [Rule::Required])
				.field("app_link", [Rule::Required])
				.field("app_id", [Rule::Required])
				.field("days", [Rule::Required])
				.field("country", [Rule::Required])
				.field("reviews", [Rule::Optional])
				.field("file", [Rule::Optional])
				.field("callback_url", [Rule::Optional])
				.field("sandbox", [Rule::Optional]),
		}
	}
}
impl Display for OrderKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_tag())
	}
}
impl FromStr for OrderKind {
	type Err = UnknownOrderKind;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::from_tag(s).ok_or_else(|| UnknownOrderKind { tag: s.to_owned() })
	}
}

/// Tag that matches none of the known order kinds.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("Unknown order kind tag `{tag}`.")]
pub struct UnknownOrderKind {
	/// The unrecognized tag.
	pub tag: String,
}

/// Outcome of a [`ResellerClient::buy`] call.
#[derive(Clone, Debug, PartialEq)]
pub enum BuyOutcome {
	/// The order was accepted; carries the server's response.
	Placed(Value),
	/// Validation rejected the parameters; no request was issued.
	Rejected(FieldErrors),
	/// The request was issued but failed softly or returned nothing.
	NoData,
	/// The supplied kind tag matches no known order kind; no request was issued.
	UnknownKind,
}

impl<T> ResellerClient<T>
where
	T: ?Sized + ApiTransport,
{
	/// Lists every order placed by the user.
	pub async fn orders(&self) -> Result<Option<Value>> {
		self.dispatch(CallKind::Orders, Operation::Orders, HttpMethod::Get, Params::new(), true)
			.await
	}

	/// Fetches one order by its order number.
	pub async fn order(&self, order_number: &str) -> Result<Option<Value>> {
		let params = Params::new().set("order_number", order_number);

		self.dispatch(CallKind::Order, Operation::Order, HttpMethod::Get, params, true).await
	}

	/// Places an order of the given kind.
	///
	/// `kind` is the wire tag (`offer`, `review`, or `install`). An unrecognized tag yields
	/// [`BuyOutcome::UnknownKind`] and a validation failure yields the full error map—neither
	/// touches the network.
	pub async fn buy(&self, kind: &str, data: Params) -> Result<BuyOutcome> {
		let Some(kind) = OrderKind::from_tag(kind) else { return Ok(BuyOutcome::UnknownKind) };

		self.place_order(kind, data).await
	}

	/// Places an order for an already resolved [`OrderKind`].
	///
	/// The posted body contains exactly the validated field set. A validated order whose `file`
	/// field names an on-disk path is posted as multipart; everything else goes out as JSON.
	pub async fn place_order(&self, kind: OrderKind, data: Params) -> Result<BuyOutcome> {
		let cleaned = match validate(&data, &kind.rules()) {
			Validation::Clean(cleaned) => cleaned,
			Validation::Rejected(errors) => return Ok(BuyOutcome::Rejected(errors)),
		};
		let response =
			self.dispatch(CallKind::Buy, Operation::Buy, HttpMethod::Post, cleaned, true).await?;

		Ok(match response {
			Some(value) => BuyOutcome::Placed(value),
			None => BuyOutcome::NoData,
		})
	}
}
