//! Dynamic argument values and interned keyword names.
//!
//! Classification compares values in two passes: a cheap identity check
//! ([`Value::is_same`]) and a fallible equality check ([`Value::try_eq`]).
//! Values are never assumed to be hashable or ordered.

use std::fmt;
use std::sync::{Arc, LazyLock};

use parking_lot::Mutex;
use rustc_hash::FxHashSet;

use crate::error::CompareError;

/// Maximum list nesting walked by [`Value::try_eq`].
pub const MAX_COMPARE_DEPTH: usize = 256;

/// User-defined value participating in classification.
pub trait CustomValue: fmt::Debug + Send + Sync + 'static {
	/// Type name used in diagnostics.
	fn type_name(&self) -> &'static str;

	/// Compares against an arbitrary value. Errors are classified by
	/// [`CompareError::severity`].
	fn eq_value(&self, other: &Value) -> Result<bool, CompareError>;
}

/// A dynamically typed argument value.
///
/// Clones share their payload, so a clone is identical to its source.
#[derive(Debug, Clone)]
pub enum Value {
	None,
	Bool(bool),
	Int(i64),
	Float(f64),
	Str(Arc<str>),
	List(Arc<[Value]>),
	Custom(Arc<dyn CustomValue>),
}

impl Value {
	/// Builds a list value.
	pub fn list(items: impl IntoIterator<Item = impl Into<Value>>) -> Self {
		Self::List(items.into_iter().map(Into::into).collect())
	}

	/// Wraps a custom value.
	pub fn custom(value: impl CustomValue) -> Self {
		Self::Custom(Arc::new(value))
	}

	pub const fn is_none(&self) -> bool {
		matches!(self, Self::None)
	}

	pub fn type_name(&self) -> &'static str {
		match self {
			Self::None => "none",
			Self::Bool(_) => "bool",
			Self::Int(_) => "int",
			Self::Float(_) => "float",
			Self::Str(_) => "str",
			Self::List(_) => "list",
			Self::Custom(c) => c.type_name(),
		}
	}

	/// Identity comparison.
	///
	/// Shared payloads compare by address, inline scalars by bit pattern.
	pub fn is_same(&self, other: &Value) -> bool {
		match (self, other) {
			(Self::None, Self::None) => true,
			(Self::Bool(a), Self::Bool(b)) => a == b,
			(Self::Int(a), Self::Int(b)) => a == b,
			(Self::Float(a), Self::Float(b)) => a.to_bits() == b.to_bits(),
			(Self::Str(a), Self::Str(b)) => Arc::ptr_eq(a, b),
			(Self::List(a), Self::List(b)) => std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b)),
			(Self::Custom(a), Self::Custom(b)) => std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b)),
			_ => false,
		}
	}

	/// Value-equality comparison.
	pub fn try_eq(&self, other: &Value) -> Result<bool, CompareError> {
		self.eq_at_depth(other, 0)
	}

	fn eq_at_depth(&self, other: &Value, depth: usize) -> Result<bool, CompareError> {
		if depth > MAX_COMPARE_DEPTH {
			return Err(CompareError::DepthExceeded);
		}
		match (self, other) {
			(Self::None, Self::None) => Ok(true),
			(Self::Bool(a), Self::Bool(b)) => Ok(a == b),
			(Self::Int(a), Self::Int(b)) => Ok(a == b),
			(Self::Float(a), Self::Float(b)) => Ok(a == b),
			(Self::Int(i), Self::Float(f)) | (Self::Float(f), Self::Int(i)) => Ok(float_eq_int(*f, *i)),
			(Self::Str(a), Self::Str(b)) => Ok(a == b),
			(Self::List(a), Self::List(b)) => {
				if a.len() != b.len() {
					return Ok(false);
				}
				for (x, y) in a.iter().zip(b.iter()) {
					if !x.is_same(y) && !x.eq_at_depth(y, depth + 1)? {
						return Ok(false);
					}
				}
				Ok(true)
			}
			(Self::Custom(c), _) => c.eq_value(other),
			(_, Self::Custom(c)) => c.eq_value(self),
			_ => Ok(false),
		}
	}
}

fn float_eq_int(f: f64, i: i64) -> bool {
	// `i64::MAX as f64` rounds up to 2^63, which is out of range.
	f == i as f64 && f < 9_223_372_036_854_775_808.0 && f as i64 == i
}

/// Identity or successful equality. Failed comparisons are unequal.
impl PartialEq for Value {
	fn eq(&self, other: &Self) -> bool {
		self.is_same(other) || self.try_eq(other).unwrap_or(false)
	}
}

impl From<bool> for Value {
	fn from(v: bool) -> Self {
		Self::Bool(v)
	}
}

impl From<i64> for Value {
	fn from(v: i64) -> Self {
		Self::Int(v)
	}
}

impl From<i32> for Value {
	fn from(v: i32) -> Self {
		Self::Int(i64::from(v))
	}
}

impl From<f64> for Value {
	fn from(v: f64) -> Self {
		Self::Float(v)
	}
}

impl From<&str> for Value {
	fn from(v: &str) -> Self {
		Self::Str(Arc::from(v))
	}
}

impl From<String> for Value {
	fn from(v: String) -> Self {
		Self::Str(Arc::from(v))
	}
}

impl From<Name> for Value {
	fn from(v: Name) -> Self {
		Self::Str(v.0)
	}
}

impl From<Vec<Value>> for Value {
	fn from(v: Vec<Value>) -> Self {
		Self::List(Arc::from(v))
	}
}

impl<T: Into<Value>> From<Option<T>> for Value {
	fn from(v: Option<T>) -> Self {
		v.map_or(Self::None, Into::into)
	}
}

#[cfg(feature = "serde")]
impl serde::Serialize for Value {
	fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		use serde::ser::SerializeSeq;

		match self {
			Self::None => serializer.serialize_unit(),
			Self::Bool(v) => serializer.serialize_bool(*v),
			Self::Int(v) => serializer.serialize_i64(*v),
			Self::Float(v) => serializer.serialize_f64(*v),
			Self::Str(v) => serializer.serialize_str(v),
			Self::List(items) => {
				let mut seq = serializer.serialize_seq(Some(items.len()))?;
				for item in items.iter() {
					seq.serialize_element(item)?;
				}
				seq.end()
			}
			Self::Custom(c) => serializer.serialize_str(&format!("{c:?}")),
		}
	}
}

static INTERNER: LazyLock<Mutex<FxHashSet<Arc<str>>>> = LazyLock::new(Default::default);

/// Keyword parameter name.
///
/// Names built with [`Name::intern`] share one allocation per spelling, so
/// keyword lookup can usually resolve by address. Only slot names are
/// interned; conversions from strings reuse an existing entry but never add
/// one.
#[derive(Clone)]
pub struct Name(Arc<str>);

impl Name {
	/// Returns the canonical instance for `name`.
	pub fn intern(name: &str) -> Self {
		let mut set = INTERNER.lock();
		if let Some(existing) = set.get(name) {
			return Self(Arc::clone(existing));
		}
		let fresh: Arc<str> = Arc::from(name);
		set.insert(Arc::clone(&fresh));
		Self(fresh)
	}

	/// Creates a name outside the interner. It only matches slots by equality.
	pub fn uninterned(name: &str) -> Self {
		Self(Arc::from(name))
	}

	/// Returns the canonical instance if `name` is already interned, otherwise
	/// an uninterned name. Never grows the interner.
	pub fn lookup(name: &str) -> Self {
		match INTERNER.lock().get(name) {
			Some(existing) => Self(Arc::clone(existing)),
			None => Self::uninterned(name),
		}
	}

	/// Returns the canonical instance for this spelling.
	pub fn interned(&self) -> Self {
		Self::intern(&self.0)
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// Identity comparison.
	pub fn is_same(&self, other: &Name) -> bool {
		Arc::ptr_eq(&self.0, &other.0)
	}
}

impl PartialEq for Name {
	fn eq(&self, other: &Self) -> bool {
		self.is_same(other) || self.0 == other.0
	}
}

impl Eq for Name {}

impl PartialEq<str> for Name {
	fn eq(&self, other: &str) -> bool {
		&*self.0 == other
	}
}

impl PartialEq<&str> for Name {
	fn eq(&self, other: &&str) -> bool {
		&*self.0 == *other
	}
}

impl From<&str> for Name {
	fn from(name: &str) -> Self {
		Self::lookup(name)
	}
}

impl From<String> for Name {
	fn from(name: String) -> Self {
		Self::lookup(&name)
	}
}

#[cfg(test)]
pub(crate) fn is_interned(name: &str) -> bool {
	INTERNER.lock().contains(name)
}

impl fmt::Debug for Name {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Debug::fmt(&*self.0, f)
	}
}

impl fmt::Display for Name {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

#[cfg(feature = "serde")]
impl serde::Serialize for Name {
	fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_str(&self.0)
	}
}

#[cfg(test)]
mod tests;
