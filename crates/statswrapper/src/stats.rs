//! Read-only usage snapshots.

use crate::slot::{KnownValues, ParameterSlot};
use crate::value::Name;

/// Wrapper-level call counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Counts {
	/// Calls that reached delegation.
	pub total_calls: u64,
	/// Calls where the wrapped callable failed.
	pub errors: u64,
	/// Calls with excess positionals or unknown keywords.
	pub invalid_args: u64,
}

impl Counts {
	/// `(total_calls, errors, invalid_args)`.
	pub const fn as_tuple(self) -> (u64, u64, u64) {
		(self.total_calls, self.errors, self.invalid_args)
	}
}

impl From<Counts> for (u64, u64, u64) {
	fn from(counts: Counts) -> Self {
		counts.as_tuple()
	}
}

/// Snapshot of one parameter slot.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ParameterStats {
	/// Keyword name, absent for positional-only slots.
	pub name: Option<Name>,
	/// Times an argument was classified against this slot.
	pub count: u64,
	#[cfg_attr(feature = "serde", serde(serialize_with = "serialize_known"))]
	pub known_values: Option<KnownValues>,
	/// Index-aligned with `known_values`.
	pub value_counts: Option<Vec<u64>>,
}

impl ParameterStats {
	pub(crate) fn capture(slot: &ParameterSlot) -> Self {
		Self {
			name: slot.name().cloned(),
			count: slot.count(),
			known_values: slot.known_values().cloned(),
			value_counts: slot.value_counts(),
		}
	}
}

#[cfg(feature = "serde")]
fn serialize_known<S: serde::Serializer>(known: &Option<KnownValues>, serializer: S) -> Result<S::Ok, S::Error> {
	match known {
		Some(values) => serializer.collect_seq(values.iter()),
		None => serializer.serialize_none(),
	}
}
