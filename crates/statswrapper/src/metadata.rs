//! Per-wrapper metadata store.

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::value::Value;

/// Open key/value bag attached to a wrapper. Dispatch never reads it.
#[derive(Debug, Default)]
pub struct Metadata {
	entries: RwLock<FxHashMap<String, Value>>,
}

impl Metadata {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn get(&self, key: &str) -> Option<Value> {
		self.entries.read().get(key).cloned()
	}

	/// Returns the entry when it holds a string.
	pub fn get_str(&self, key: &str) -> Option<String> {
		match self.entries.read().get(key)? {
			Value::Str(s) => Some(s.to_string()),
			_ => None,
		}
	}

	/// Sets `key`, returning the previous value.
	pub fn insert(&self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
		self.entries.write().insert(key.into(), value.into())
	}

	pub fn remove(&self, key: &str) -> Option<Value> {
		self.entries.write().remove(key)
	}

	pub fn contains_key(&self, key: &str) -> bool {
		self.entries.read().contains_key(key)
	}

	/// Keys in sorted order.
	pub fn keys(&self) -> Vec<String> {
		let mut keys: Vec<_> = self.entries.read().keys().cloned().collect();
		keys.sort();
		keys
	}

	pub fn len(&self) -> usize {
		self.entries.read().len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.read().is_empty()
	}
}
