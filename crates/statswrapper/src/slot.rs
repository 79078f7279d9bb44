//! Parameter slot registry.
//!
//! The registry is allocated once per wrapper: positional slots first, then
//! keyword slots in declaration order. Known-value sequences are shared, not
//! copied, and never change after construction.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::{ConfigError, FatalComparison, Severity, SlotRef};
use crate::value::{Name, Value};

/// Immutable ordered sequence of values to histogram.
pub type KnownValues = Arc<[Value]>;

/// Declares how one parameter is tracked.
#[derive(Debug, Clone, Default)]
pub enum ParamSpec {
	/// Only count how often the parameter is passed.
	#[default]
	Untracked,
	/// Also count how often each known value is passed.
	Known(KnownValues),
}

impl ParamSpec {
	pub fn known(values: impl IntoIterator<Item = impl Into<Value>>) -> Self {
		Self::Known(values.into_iter().map(Into::into).collect())
	}

	/// Interprets a dynamic spec: `None` is untracked, a list is the known values.
	pub fn from_value(value: &Value, slot: SlotRef) -> Result<Self, ConfigError> {
		match value {
			Value::None => Ok(Self::Untracked),
			Value::List(items) => Ok(Self::Known(Arc::clone(items))),
			other => Err(ConfigError::InvalidSpec {
				slot,
				found: other.type_name(),
			}),
		}
	}
}

impl From<KnownValues> for ParamSpec {
	fn from(values: KnownValues) -> Self {
		Self::Known(values)
	}
}

/// Per-parameter bookkeeping.
#[derive(Debug)]
pub struct ParameterSlot {
	name: Option<Name>,
	count: AtomicU64,
	known: Option<KnownValues>,
	value_counts: Box<[AtomicU64]>,
}

impl ParameterSlot {
	pub(crate) fn new(name: Option<Name>, spec: ParamSpec) -> Result<Self, ConfigError> {
		let (known, value_counts) = match spec {
			ParamSpec::Untracked => (None, Box::default()),
			ParamSpec::Known(values) => {
				let mut counts = Vec::new();
				counts.try_reserve_exact(values.len())?;
				counts.extend(values.iter().map(|_| AtomicU64::new(0)));
				(Some(values), counts.into_boxed_slice())
			}
		};
		Ok(Self {
			name,
			count: AtomicU64::new(0),
			known,
			value_counts,
		})
	}

	pub fn name(&self) -> Option<&Name> {
		self.name.as_ref()
	}

	pub fn count(&self) -> u64 {
		self.count.load(Ordering::Relaxed)
	}

	pub fn known_values(&self) -> Option<&KnownValues> {
		self.known.as_ref()
	}

	/// Per-value counts, index-aligned with [`Self::known_values`].
	pub fn value_counts(&self) -> Option<Vec<u64>> {
		self.known.as_ref()?;
		Some(self.value_counts.iter().map(|c| c.load(Ordering::Relaxed)).collect())
	}

	/// Finds the known value matching `arg`.
	///
	/// Identity is tried across the whole sequence before any equality
	/// comparison. Recoverable comparison failures count as "no match".
	pub(crate) fn match_value(&self, arg: &Value) -> Result<Option<usize>, FatalComparison> {
		let Some(known) = &self.known else {
			return Ok(None);
		};
		if let Some(idx) = known.iter().position(|k| k.is_same(arg)) {
			return Ok(Some(idx));
		}
		for (idx, k) in known.iter().enumerate() {
			match k.try_eq(arg) {
				Ok(true) => return Ok(Some(idx)),
				Ok(false) => {}
				Err(err) => match err.severity() {
					Severity::Fatal => return Err(FatalComparison(err)),
					Severity::Recoverable => {
						tracing::trace!(error = %err, index = idx, "ignoring known-value comparison failure");
					}
				},
			}
		}
		Ok(None)
	}

	/// Records one classified argument.
	pub(crate) fn record(&self, matched: Option<usize>) {
		self.count.fetch_add(1, Ordering::Relaxed);
		if let Some(idx) = matched {
			self.value_counts[idx].fetch_add(1, Ordering::Relaxed);
		}
	}
}

/// Fixed-size slot array built at construction.
#[derive(Debug)]
pub struct SlotRegistry {
	slots: Box<[ParameterSlot]>,
	positional_only: usize,
}

impl SlotRegistry {
	/// Builds slots for `positional` specs followed by named `keyword` specs.
	pub fn build(positional: Vec<ParamSpec>, keyword: Vec<(Name, ParamSpec)>) -> Result<Self, ConfigError> {
		let positional_only = positional.len();
		let mut slots = Vec::new();
		slots.try_reserve_exact(positional_only + keyword.len())?;
		for spec in positional {
			slots.push(ParameterSlot::new(None, spec)?);
		}
		for (name, spec) in keyword {
			slots.push(ParameterSlot::new(Some(name.interned()), spec)?);
		}
		Ok(Self {
			slots: slots.into_boxed_slice(),
			positional_only,
		})
	}

	pub fn len(&self) -> usize {
		self.slots.len()
	}

	pub fn is_empty(&self) -> bool {
		self.slots.is_empty()
	}

	pub const fn positional_only(&self) -> usize {
		self.positional_only
	}

	pub fn slots(&self) -> &[ParameterSlot] {
		&self.slots
	}

	pub fn get(&self, idx: usize) -> Option<&ParameterSlot> {
		self.slots.get(idx)
	}

	/// Resolves a keyword among slots past the positional-only prefix.
	///
	/// Tries identity against every slot name before falling back to string
	/// equality.
	pub fn find_keyword(&self, name: &Name) -> Option<&ParameterSlot> {
		let named = &self.slots[self.positional_only..];
		named
			.iter()
			.find(|s| s.name.as_ref().is_some_and(|n| n.is_same(name)))
			.or_else(|| named.iter().find(|s| s.name.as_ref().is_some_and(|n| n == name)))
	}
}
