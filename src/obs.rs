//! Optional observability helpers for API calls.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `reseller_sdk.call` with the `op`
//!   (operation) and `stage` (call site) fields.
//! - Enable `metrics` to increment the `reseller_sdk_call_total` counter for every
//!   attempt/success/empty/failure, labeled by `op` + `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// API operations observed by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallKind {
	/// Email + password login.
	Auth,
	/// Bearer token refresh.
	Refresh,
	/// Bearer token invalidation.
	Invalidate,
	/// Profile fetch.
	User,
	/// Offer listing.
	Offers,
	/// Single offer fetch.
	Offer,
	/// Category listing.
	Categories,
	/// Order listing.
	Orders,
	/// Single order fetch.
	Order,
	/// Order placement.
	Buy,
}
impl CallKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CallKind::Auth => "auth",
			CallKind::Refresh => "refresh",
			CallKind::Invalidate => "invalidate",
			CallKind::User => "user",
			CallKind::Offers => "offers",
			CallKind::Offer => "offer",
			CallKind::Categories => "categories",
			CallKind::Orders => "orders",
			CallKind::Order => "order",
			CallKind::Buy => "buy",
		}
	}
}
impl Display for CallKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallOutcome {
	/// Entry to a dispatching operation.
	Attempt,
	/// The server returned a decodable body.
	Success,
	/// The call failed softly or the body was empty.
	Empty,
	/// A hard failure propagated back to the caller.
	Failure,
}
impl CallOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CallOutcome::Attempt => "attempt",
			CallOutcome::Success => "success",
			CallOutcome::Empty => "empty",
			CallOutcome::Failure => "failure",
		}
	}
}
impl Display for CallOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Emits a debug event for a soft transport failure (when tracing is enabled).
#[cfg(feature = "reqwest")]
pub(crate) fn note_soft_failure(stage: &'static str, error: &(dyn StdError + 'static)) {
	#[cfg(feature = "tracing")]
	::tracing::debug!(stage, error = %error, "reseller_sdk.call soft failure");

	#[cfg(not(feature = "tracing"))]
	let _ = (stage, error);
}
