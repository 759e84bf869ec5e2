//! Declarative per-field validation shared by every parameterized operation.
//!
//! Rule sets declare, per field, an ordered list of rule tags. Validation walks every declared
//! field and accumulates all failures instead of stopping at the first one; a single failure
//! discards the cleaned values entirely, so partial success is never observable.

// self
use crate::{
	_prelude::*,
	params::{self, Params},
};

/// Field → message mapping returned when validation rejects a parameter set.
pub type FieldErrors = BTreeMap<String, String>;

/// Finite set of validation rule tags.
///
/// The upstream SDK resolved rule handlers by name at runtime; here the tags are a closed enum
/// with [`Rule::from_tag`] as the registration table, so adding a rule means adding a variant
/// and a match arm.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rule {
	/// The field must be present and non-blank.
	Required,
	/// The field is copied through when non-blank and silently dropped otherwise.
	Optional,
}
impl Rule {
	/// Looks up a rule by its tag.
	pub fn from_tag(tag: &str) -> Option<Self> {
		match tag {
			"required" => Some(Self::Required),
			"optional" => Some(Self::Optional),
			_ => None,
		}
	}

	/// Returns the stable tag for this rule.
	pub const fn as_tag(self) -> &'static str {
		match self {
			Self::Required => "required",
			Self::Optional => "optional",
		}
	}

	fn apply(self, field: &str, data: &Params) -> RuleOutcome {
		let value = data.get(field).filter(|value| !params::is_blank(value));

		match (self, value) {
			(_, Some(value)) => RuleOutcome::Keep(value.clone()),
			(Self::Required, None) => RuleOutcome::Error(format!("{field} field is required!")),
			(Self::Optional, None) => RuleOutcome::Skip,
		}
	}
}
impl Display for Rule {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_tag())
	}
}

enum RuleOutcome {
	Keep(Value),
	Skip,
	Error(String),
}

/// Unknown rule tag encountered while parsing a rule listing.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("Unknown validation rule tag `{tag}`.")]
pub struct UnknownRule {
	/// The unrecognized tag.
	pub tag: String,
}

/// Ordered collection of per-field rule lists.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RuleSet {
	entries: Vec<(String, Vec<Rule>)>,
}
impl RuleSet {
	/// Creates an empty rule set.
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends a field with its rules and returns the set for chaining.
	pub fn field<I>(mut self, field: impl Into<String>, rules: I) -> Self
	where
		I: IntoIterator<Item = Rule>,
	{
		self.entries.push((field.into(), rules.into_iter().collect()));

		self
	}

	/// Parses `(field, "tag|tag")` pairs, resolving each tag through [`Rule::from_tag`].
	pub fn parse<'a, I>(listing: I) -> Result<Self, UnknownRule>
	where
		I: IntoIterator<Item = (&'a str, &'a str)>,
	{
		let mut set = Self::new();

		for (field, tags) in listing {
			let rules = tags
				.split('|')
				.map(|tag| Rule::from_tag(tag).ok_or_else(|| UnknownRule { tag: tag.to_owned() }))
				.collect::<Result<Vec<_>, _>>()?;

			set.entries.push((field.to_owned(), rules));
		}

		Ok(set)
	}

	/// Iterates declared fields in declaration order.
	pub fn fields(&self) -> impl Iterator<Item = &str> {
		self.entries.iter().map(|(field, _)| field.as_str())
	}
}

/// Result of validating a parameter set against a [`RuleSet`].
#[derive(Clone, Debug, PartialEq)]
pub enum Validation {
	/// Every rule passed; the cleaned set contains exactly the declared fields that carried
	/// non-blank values.
	Clean(Params),
	/// At least one field failed; maps each offending field to its message. The cleaned values
	/// are discarded.
	Rejected(FieldErrors),
}
impl Validation {
	/// Returns the cleaned parameters, if validation passed.
	pub fn clean(self) -> Option<Params> {
		match self {
			Self::Clean(params) => Some(params),
			Self::Rejected(_) => None,
		}
	}

	/// Returns the field errors, if validation failed.
	pub fn errors(self) -> Option<FieldErrors> {
		match self {
			Self::Clean(_) => None,
			Self::Rejected(errors) => Some(errors),
		}
	}
}

/// Applies `rules` to `data`, accumulating every field error rather than short-circuiting.
///
/// Undeclared fields in `data` never pass through; the first error recorded for a field wins.
pub fn validate(data: &Params, rules: &RuleSet) -> Validation {
	let mut cleaned = Params::new();
	let mut errors = FieldErrors::new();

	for (field, field_rules) in &rules.entries {
		for rule in field_rules {
			match rule.apply(field, data) {
				RuleOutcome::Keep(value) => cleaned.insert(field.clone(), value),
				RuleOutcome::Skip => {},
				RuleOutcome::Error(message) => {
					errors.entry(field.clone()).or_insert(message);
				},
			}
		}
	}

	if errors.is_empty() { Validation::Clean(cleaned) } else { Validation::Rejected(errors) }
}
