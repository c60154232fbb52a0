//! Secret to placeholder mapping.

use std::{borrow::Cow, collections::BTreeMap};

use crate::models::SecretString;

struct Entry {
	secret: SecretString,
	placeholder: String,
}

/// Immutable set of literal secrets and the placeholders that replace them.
///
/// Empty secrets are dropped on construction since they would match
/// everywhere. A secret given twice keeps the last placeholder. When one
/// secret is a prefix of another, the longer one wins at a given position.
pub struct SecretMapping {
	// longest secret first
	entries: Vec<Entry>,
}

impl SecretMapping {
	pub fn new<I, K, V>(pairs: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		// a repeated secret keeps its last placeholder
		let mut unique: BTreeMap<String, String> = BTreeMap::new();
		for (secret, placeholder) in pairs {
			let secret: String = secret.into();
			if !secret.is_empty() {
				unique.insert(secret, placeholder.into());
			}
		}

		let mut entries: Vec<Entry> = unique
			.into_iter()
			.map(|(secret, placeholder)| Entry {
				secret: SecretString::new(secret),
				placeholder,
			})
			.collect();
		entries.sort_by(|a, b| b.secret.as_str().len().cmp(&a.secret.as_str().len()));

		Self { entries }
	}

	/// A mapping that redacts nothing
	pub fn empty() -> Self {
		Self {
			entries: Vec::new(),
		}
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Replaces every non-overlapping occurrence of a secret in `chunk`.
	///
	/// Returns the input unchanged (borrowed) when nothing matched.
	pub fn apply<'a>(&self, chunk: &'a [u8]) -> Cow<'a, [u8]> {
		if self.entries.is_empty() {
			return Cow::Borrowed(chunk);
		}

		let mut output: Option<Vec<u8>> = None;
		let mut copied = 0;
		let mut position = 0;

		while position < chunk.len() {
			match self.match_at(&chunk[position..]) {
				Some(entry) => {
					let out = output.get_or_insert_with(|| Vec::with_capacity(chunk.len()));
					out.extend_from_slice(&chunk[copied..position]);
					out.extend_from_slice(entry.placeholder.as_bytes());
					position += entry.secret.as_str().len();
					copied = position;
				}
				None => position += 1,
			}
		}

		match output {
			Some(mut out) => {
				out.extend_from_slice(&chunk[copied..]);
				Cow::Owned(out)
			}
			None => Cow::Borrowed(chunk),
		}
	}

	fn match_at(&self, rest: &[u8]) -> Option<&Entry> {
		self.entries
			.iter()
			.find(|entry| rest.starts_with(entry.secret.as_str().as_bytes()))
	}
}

impl Default for SecretMapping {
	fn default() -> Self {
		Self::empty()
	}
}

impl std::fmt::Debug for SecretMapping {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_list()
			.entries(self.entries.iter().map(|entry| &entry.placeholder))
			.finish()
	}
}

impl<K, V> FromIterator<(K, V)> for SecretMapping
where
	K: Into<String>,
	V: Into<String>,
{
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self::new(iter)
	}
}
