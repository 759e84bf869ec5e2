//! Inbound callback signing and constant-time signature verification.
//!
//! The vendor signs each callback body with the user's shared secret and delivers the digest in
//! a `Signature` header. Integrators recompute the signature over the delivered payload and
//! compare the two before trusting any field; on mismatch the payload must be discarded without
//! processing.

// crates.io
use hmac::{Hmac, Mac};
use sha2::Sha512;
use subtle::ConstantTimeEq;
// self
use crate::{_prelude::*, session::Secret};

type HmacSha512 = Hmac<Sha512>;

/// Canonical signing string for a callback payload.
///
/// Fields are visited in ascending key order. Arrays, objects, and nulls never contribute;
/// `true` contributes the character `1` and `false` contributes nothing; the remaining scalars
/// use their display form. The concatenation is ASCII-lowercased as the final step (the issuing
/// server lowercases byte-wise, so non-ASCII characters pass through untouched).
pub fn canonical_payload(data: &JsonMap<String, Value>) -> String {
	let mut keys = data.keys().collect::<Vec<_>>();

	keys.sort_unstable();

	let mut joined = String::new();

	for key in keys {
		match data.get(key) {
			None | Some(Value::Null | Value::Array(_) | Value::Object(_)) => {},
			Some(Value::Bool(true)) => joined.push('1'),
			Some(Value::Bool(false)) => {},
			Some(Value::Number(number)) => joined.push_str(&number.to_string()),
			Some(Value::String(text)) => joined.push_str(text),
		}
	}

	joined.make_ascii_lowercase();

	joined
}

/// Computes the hex HMAC-SHA512 signature for `data` under `secret`.
///
/// Deterministic: the same payload always yields the same 128-character lowercase hex digest,
/// regardless of the order fields were inserted in.
pub fn sign(secret: &str, data: &JsonMap<String, Value>) -> String {
	let mut mac = <HmacSha512 as Mac>::new_from_slice(secret.as_bytes())
		.expect("HMAC can take key of any size");

	mac.update(canonical_payload(data).as_bytes());

	hex::encode(mac.finalize().into_bytes())
}

/// Constant-time comparison of a delivered signature against a computed one.
///
/// Length is compared first (signature length is public: always 128 hex characters), then the
/// bytes through [`subtle`] so the comparison cost never depends on where the strings diverge.
/// Only byte-exact matches pass; a digest differing in case alone is rejected.
pub fn verify(delivered: &str, computed: &str) -> bool {
	let delivered = delivered.as_bytes();
	let computed = computed.as_bytes();

	if delivered.len() != computed.len() {
		return false;
	}

	delivered.ct_eq(computed).into()
}

/// Secret-owning verifier for integrating applications.
#[derive(Clone, Debug)]
pub struct CallbackVerifier {
	secret: Secret,
}
impl CallbackVerifier {
	/// Creates a verifier from the user's shared secret.
	pub fn new(secret: Secret) -> Self {
		Self { secret }
	}

	/// Signs `data` with the held secret.
	pub fn sign(&self, data: &JsonMap<String, Value>) -> String {
		sign(self.secret.expose(), data)
	}

	/// Recomputes the signature for `data` and compares it against the delivered header value.
	///
	/// Returns `false` when the callback must not be processed.
	pub fn verify_payload(&self, data: &JsonMap<String, Value>, delivered: &str) -> bool {
		verify(delivered, &self.sign(data))
	}
}
