//! Loosely-typed parameter maps shared by catalog filters and order payloads.

// self
use crate::_prelude::*;

/// Ordered field → value mapping accepted by every parameterized operation.
///
/// Values use the generic JSON tree so callers can mix strings, numbers, and booleans the way
/// the upstream API does. Keys iterate in sorted order, which keeps encoded bodies and query
/// strings deterministic regardless of insertion order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Params(JsonMap<String, Value>);
impl Params {
	/// Creates an empty parameter map.
	pub fn new() -> Self {
		Self::default()
	}

	/// Inserts a field, replacing any previous value, and returns the map for chaining.
	pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
		self.0.insert(field.into(), value.into());

		self
	}

	/// Inserts a field in place.
	pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
		self.0.insert(field.into(), value.into());
	}

	/// Returns the value stored under `field`, if any.
	pub fn get(&self, field: &str) -> Option<&Value> {
		self.0.get(field)
	}

	/// Removes and returns the value stored under `field`.
	pub fn remove(&mut self, field: &str) -> Option<Value> {
		self.0.remove(field)
	}

	/// Returns `true` when no fields are present.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Number of fields present.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Iterates fields in key order.
	pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
		self.0.iter()
	}

	/// Borrowed view of the underlying JSON object.
	pub fn as_object(&self) -> &JsonMap<String, Value> {
		&self.0
	}

	/// Consumes the map into its JSON representation.
	pub fn into_value(self) -> Value {
		Value::Object(self.0)
	}

	/// Encodes scalar fields as query pairs; arrays, objects, and nulls are skipped.
	pub fn to_query_pairs(&self) -> Vec<(&str, String)> {
		self.0
			.iter()
			.filter_map(|(field, value)| scalar_text(value).map(|text| (field.as_str(), text)))
			.collect()
	}
}
impl From<JsonMap<String, Value>> for Params {
	fn from(map: JsonMap<String, Value>) -> Self {
		Self(map)
	}
}
impl FromIterator<(String, Value)> for Params {
	fn from_iter<I>(iter: I) -> Self
	where
		I: IntoIterator<Item = (String, Value)>,
	{
		Self(iter.into_iter().collect())
	}
}
impl IntoIterator for Params {
	type IntoIter = <JsonMap<String, Value> as IntoIterator>::IntoIter;
	type Item = (String, Value);

	fn into_iter(self) -> Self::IntoIter {
		self.0.into_iter()
	}
}

/// Form-encoding text for a scalar value; `None` for arrays, objects, and null.
///
/// Booleans encode as `1`/`0`, matching the upstream form conventions.
pub fn scalar_text(value: &Value) -> Option<String> {
	match value {
		Value::Bool(true) => Some("1".into()),
		Value::Bool(false) => Some("0".into()),
		Value::Number(number) => Some(number.to_string()),
		Value::String(text) => Some(text.clone()),
		Value::Null | Value::Array(_) | Value::Object(_) => None,
	}
}

/// Loose emptiness test applied by the field validator.
///
/// Mirrors the upstream API's notion of "empty": null, `false`, numeric zero, the empty string,
/// the literal string `"0"`, and empty collections are all blank. Numeric zero being blank means
/// a `discount: 0` filter is dropped rather than sent; callers who mean "no filter" omit the
/// field instead.
pub fn is_blank(value: &Value) -> bool {
	match value {
		Value::Null => true,
		Value::Bool(flag) => !flag,
		Value::Number(number) => number.as_f64().is_some_and(|float| float == 0.0),
		Value::String(text) => text.is_empty() || text == "0",
		Value::Array(items) => items.is_empty(),
		Value::Object(map) => map.is_empty(),
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::json;
	// self
	use super::*;

	#[test]
	fn blankness_follows_loose_emptiness() {
		for blank in
			[json!(null), json!(false), json!(0), json!(0.0), json!(""), json!("0"), json!([]), json!({})]
		{
			assert!(is_blank(&blank), "{blank} should be blank");
		}

		for present in [json!(true), json!(1), json!(-1), json!("x"), json!("00"), json!([0])] {
			assert!(!is_blank(&present), "{present} should not be blank");
		}
	}

	#[test]
	fn query_pairs_encode_scalars_and_skip_collections() {
		let params = Params::new()
			.set("category_id", 3)
			.set("discount", true)
			.set("tags", json!(["a", "b"]))
			.set("note", Value::Null);

		assert_eq!(
			params.to_query_pairs(),
			vec![("category_id", "3".to_owned()), ("discount", "1".to_owned())],
		);
	}

	#[test]
	fn set_replaces_previous_values() {
		let params = Params::new().set("quantity", 1).set("quantity", 2);

		assert_eq!(params.get("quantity"), Some(&json!(2)));
		assert_eq!(params.len(), 1);
	}
}
