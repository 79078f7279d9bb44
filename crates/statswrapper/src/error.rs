//! Error types for wrapper construction, reconfiguration, and classification.

use std::collections::TryReserveError;

use thiserror::Error;

/// Identifies a declared slot in configuration errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotRef {
	/// A positional spec, by zero-based position.
	Positional(usize),
	/// A keyword spec, by name.
	Keyword(String),
}

impl std::fmt::Display for SlotRef {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Positional(idx) => write!(f, "positional spec #{idx}"),
			Self::Keyword(name) => write!(f, "keyword spec `{name}`"),
		}
	}
}

/// Errors raised by the factory while building a wrapper.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// No wrapped callable was supplied.
	#[error("must pass at least one callable")]
	MissingCallable,

	/// A spec was neither the untracked marker nor a sequence of known values.
	#[error("{slot}: expected none or a list of known values, got {found}")]
	InvalidSpec {
		/// The offending slot.
		slot: SlotRef,
		/// Type name of the value that was supplied.
		found: &'static str,
	},

	/// Counter storage for a tracked slot could not be allocated.
	#[error("failed to allocate counter storage: {0}")]
	Allocation(#[from] TryReserveError),
}

/// Rejected positional boundary update. The wrapper is left unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid positional boundary {requested} (expected {min}..={max})")]
pub struct BoundaryError {
	pub requested: usize,
	pub min: usize,
	pub max: usize,
}

/// Whether a comparison failure may be swallowed during classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
	/// Treated as "no match" for the pair being compared.
	Recoverable,
	/// Aborts the in-flight call before delegation.
	Fatal,
}

/// Failure of a value-equality comparison.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompareError {
	/// The operands cannot be compared with each other.
	#[error("comparison not supported between {left} and {right}")]
	Unsupported { left: &'static str, right: &'static str },

	/// A custom comparison reported an ordinary failure.
	#[error("comparison failed: {0}")]
	Failed(String),

	/// Memory was exhausted while comparing.
	#[error("out of memory during comparison")]
	OutOfMemory,

	/// Comparison recursed deeper than the supported nesting.
	#[error("maximum comparison depth exceeded")]
	DepthExceeded,

	/// The comparison was interrupted from outside.
	#[error("comparison interrupted")]
	Interrupted,
}

impl CompareError {
	/// Classifies the failure. Every comparison site consults this.
	pub const fn severity(&self) -> Severity {
		match self {
			Self::Unsupported { .. } | Self::Failed(_) => Severity::Recoverable,
			Self::OutOfMemory | Self::DepthExceeded | Self::Interrupted => Severity::Fatal,
		}
	}

	pub const fn is_fatal(&self) -> bool {
		matches!(self.severity(), Severity::Fatal)
	}
}

/// A fatal comparison aborted a call during classification.
///
/// Nothing was counted and the wrapped callable was not invoked.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("fatal comparison during argument classification: {0}")]
pub struct FatalComparison(#[source] pub CompareError);

/// Result type for wrapper construction.
pub type Result<T> = std::result::Result<T, ConfigError>;
