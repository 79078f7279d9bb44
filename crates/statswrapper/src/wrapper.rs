//! Call dispatch and argument classification.
//!
//! Every call is classified against the slot registry and then forwarded
//! unchanged. Classification runs in two phases: matches are resolved first
//! and only committed to counters once every argument has been classified, so
//! a fatal comparison leaves all counters untouched.

use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use smallvec::SmallVec;

use crate::builder::Builder;
use crate::call::{Arguments, Callable};
use crate::error::{BoundaryError, FatalComparison};
use crate::metadata::Metadata;
use crate::slot::{ParameterSlot, SlotRegistry};
use crate::stats::{Counts, ParameterStats};

/// What the wrapped callable returned for one call.
pub type Outcome<C> = Result<<C as Callable>::Output, <C as Callable>::Error>;

type Pending<'a> = SmallVec<[(&'a ParameterSlot, Option<usize>); 8]>;

/// Intercepting wrapper recording argument usage of a callable.
pub struct StatsWrapper<C> {
	wrapped: C,
	registry: SlotRegistry,
	/// Max leading arguments classified positionally.
	boundary: RwLock<usize>,
	total_calls: AtomicU64,
	errors: AtomicU64,
	invalid_args: AtomicU64,
	metadata: Metadata,
}

impl<C> std::fmt::Debug for StatsWrapper<C> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("StatsWrapper")
			.field("registry", &self.registry)
			.field("boundary", &self.positional_boundary())
			.field("counts", &self.get_counts())
			.finish_non_exhaustive()
	}
}

impl<C> StatsWrapper<C> {
	pub fn builder() -> Builder<C> {
		Builder::new()
	}

	pub(crate) fn from_parts(wrapped: C, registry: SlotRegistry, boundary: RwLock<usize>, metadata: Metadata) -> Self {
		Self {
			wrapped,
			registry,
			boundary,
			total_calls: AtomicU64::new(0),
			errors: AtomicU64::new(0),
			invalid_args: AtomicU64::new(0),
			metadata,
		}
	}

	pub fn wrapped(&self) -> &C {
		&self.wrapped
	}

	pub fn registry(&self) -> &SlotRegistry {
		&self.registry
	}

	pub fn metadata(&self) -> &Metadata {
		&self.metadata
	}

	pub fn positional_only_count(&self) -> usize {
		self.registry.positional_only()
	}

	pub fn positional_boundary(&self) -> usize {
		*self.boundary.read()
	}

	pub fn slot_count(&self) -> usize {
		self.registry.len()
	}

	pub fn get_counts(&self) -> Counts {
		Counts {
			total_calls: self.total_calls.load(Ordering::Relaxed),
			errors: self.errors.load(Ordering::Relaxed),
			invalid_args: self.invalid_args.load(Ordering::Relaxed),
		}
	}

	/// One entry per declared slot, in declaration order.
	pub fn get_parameter_stats(&self) -> Vec<ParameterStats> {
		self.registry.slots().iter().map(ParameterStats::capture).collect()
	}

	/// Changes how many leading arguments are classified positionally.
	///
	/// Waits for in-flight classification to finish. On error the boundary
	/// is unchanged.
	pub fn set_positional_boundary(&self, boundary: usize) -> Result<(), BoundaryError> {
		let min = self.registry.positional_only();
		let max = self.registry.len();
		if !(min..=max).contains(&boundary) {
			return Err(BoundaryError {
				requested: boundary,
				min,
				max,
			});
		}
		let mut guard = self.boundary.write();
		tracing::debug!(from = *guard, to = boundary, "positional boundary changed");
		*guard = boundary;
		Ok(())
	}

	/// Resolves every argument to a slot and known-value index.
	///
	/// Returns whether any argument was left untracked.
	fn classify<'a>(&'a self, args: &Arguments, boundary: usize, pending: &mut Pending<'a>) -> Result<bool, FatalComparison> {
		let positional = args.positional();
		let mut invalid = false;
		if positional.len() > boundary {
			tracing::trace!(supplied = positional.len(), boundary, "excess positional arguments");
			invalid = true;
		}
		let slots = self.registry.slots();

		for (slot, arg) in slots.iter().zip(positional).take(boundary) {
			pending.push((slot, slot.match_value(arg)?));
		}

		for (name, arg) in args.keyword() {
			match self.registry.find_keyword(name) {
				Some(slot) => pending.push((slot, slot.match_value(arg)?)),
				None => {
					tracing::trace!(keyword = %name, "untracked keyword argument");
					invalid = true;
				}
			}
		}

		Ok(invalid)
	}
}

impl<C: Callable> StatsWrapper<C> {
	/// Records usage of `args` and forwards them to the wrapped callable.
	///
	/// The inner result is exactly what the callable returned. The outer
	/// error only occurs when classification hits a fatal comparison, in which
	/// case nothing was counted and the callable was not invoked.
	pub fn invoke(&self, args: &Arguments) -> Result<Outcome<C>, FatalComparison> {
		{
			let boundary = self.boundary.read();
			let mut pending = Pending::new();
			let invalid = self.classify(args, *boundary, &mut pending).inspect_err(|err| {
				tracing::warn!(error = %err, "call aborted during argument classification");
			})?;
			for (slot, matched) in pending {
				slot.record(matched);
			}
			self.total_calls.fetch_add(1, Ordering::Relaxed);
			if invalid {
				self.invalid_args.fetch_add(1, Ordering::Relaxed);
			}
		}

		let result = self.wrapped.call(args);
		if result.is_err() {
			self.errors.fetch_add(1, Ordering::Relaxed);
		}
		Ok(result)
	}
}
