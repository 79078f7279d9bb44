//! Collection of tracked wrappers and the plain-text usage summary.

use std::fmt::Write;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::Serialize;
use telemetric_statswrapper::{Builder, Counts, Metadata, ParameterStats, StatsWrapper};

use crate::signature::{Signature, wrap_auto};
use crate::{TrackError, TrackerConfig};

/// Metadata key holding the wrapped function's module path.
pub const MODULE_KEY: &str = "module";
/// Metadata key holding the wrapped function's name.
pub const NAME_KEY: &str = "name";

const UNKNOWN: &str = "<unknown>";

/// Type-erased view of a wrapper's statistics.
pub trait Tracked: Send + Sync {
	fn counts(&self) -> Counts;
	fn parameter_stats(&self) -> Vec<ParameterStats>;
	fn metadata(&self) -> &Metadata;
}

impl<C: Send + Sync> Tracked for StatsWrapper<C> {
	fn counts(&self) -> Counts {
		self.get_counts()
	}

	fn parameter_stats(&self) -> Vec<ParameterStats> {
		self.get_parameter_stats()
	}

	fn metadata(&self) -> &Metadata {
		StatsWrapper::metadata(self)
	}
}

/// Identity of a wrapped function, copied onto its wrapper's metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionId {
	pub module: String,
	pub name: String,
}

impl FunctionId {
	pub fn new(module: impl Into<String>, name: impl Into<String>) -> Self {
		Self {
			module: module.into(),
			name: name.into(),
		}
	}

	fn stamp(&self, metadata: &Metadata) {
		metadata.insert(MODULE_KEY, self.module.as_str());
		metadata.insert(NAME_KEY, self.name.as_str());
	}

	fn read(metadata: &Metadata) -> Self {
		Self {
			module: metadata.get_str(MODULE_KEY).unwrap_or_else(|| UNKNOWN.to_string()),
			name: metadata.get_str(NAME_KEY).unwrap_or_else(|| UNKNOWN.to_string()),
		}
	}
}

/// Point-in-time statistics for one tracked wrapper.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UsageRecord {
	pub function: FunctionId,
	pub counts: Counts,
	pub parameters: Vec<ParameterStats>,
}

impl UsageRecord {
	/// `module.name[total,errors,invalid](args)`.
	pub fn summary_line(&self) -> String {
		let args = self
			.parameters
			.iter()
			.map(|p| match &p.name {
				Some(name) => format!("{name}={}", p.count),
				None => p.count.to_string(),
			})
			.collect::<Vec<_>>()
			.join(", ");
		let Counts {
			total_calls,
			errors,
			invalid_args,
		} = self.counts;
		format!(
			"{}.{}[{total_calls},{errors},{invalid_args}]({args})",
			self.function.module, self.function.name
		)
	}
}

/// Registry of every wrapper created through it.
///
/// Cloning yields another handle to the same collection.
#[derive(Clone, Default)]
pub struct Tracker {
	config: TrackerConfig,
	tracked: Arc<RwLock<Vec<Arc<dyn Tracked>>>>,
}

impl std::fmt::Debug for Tracker {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Tracker")
			.field("config", &self.config)
			.field("tracked", &self.len())
			.finish()
	}
}

impl Tracker {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_config(config: TrackerConfig) -> Self {
		Self {
			config,
			tracked: Arc::default(),
		}
	}

	pub fn config(&self) -> &TrackerConfig {
		&self.config
	}

	/// Adds an existing wrapper.
	pub fn register(&self, tracked: Arc<dyn Tracked>) {
		let id = FunctionId::read(tracked.metadata());
		tracing::debug!(module = %id.module, name = %id.name, "tracking wrapper");
		self.tracked.write().push(tracked);
	}

	/// Stamps `id` on the wrapper, then tracks it.
	pub fn track<C>(&self, id: &FunctionId, wrapper: StatsWrapper<C>) -> Arc<StatsWrapper<C>>
	where
		C: Send + Sync + 'static,
	{
		id.stamp(wrapper.metadata());
		let wrapper = Arc::new(wrapper);
		self.register(Arc::clone(&wrapper) as Arc<dyn Tracked>);
		wrapper
	}

	/// Builds a wrapper from explicit specs and tracks it.
	pub fn wrap<C>(&self, id: &FunctionId, builder: Builder<C>) -> Result<Arc<StatsWrapper<C>>, TrackError>
	where
		C: Send + Sync + 'static,
	{
		Ok(self.track(id, builder.build()?))
	}

	/// Builds a wrapper from `signature` using this tracker's options and
	/// tracks it.
	pub fn wrap_auto<C>(&self, id: &FunctionId, wrapped: C, signature: &Signature) -> Result<Arc<StatsWrapper<C>>, TrackError>
	where
		C: Send + Sync + 'static,
	{
		let wrapper = wrap_auto(wrapped, signature, self.config.auto_options())?;
		Ok(self.track(id, wrapper))
	}

	/// Auto-wraps every public routine of `module`.
	///
	/// Entries whose name starts with `_` are skipped. Returns the tracked
	/// wrappers with their names, in input order. On error, entries before the
	/// failing one stay tracked.
	pub fn install<C, N>(
		&self,
		module: &str,
		entries: impl IntoIterator<Item = (N, C, Signature)>,
	) -> Result<Vec<(String, Arc<StatsWrapper<C>>)>, TrackError>
	where
		C: Send + Sync + 'static,
		N: Into<String>,
	{
		let mut installed = Vec::new();
		for (name, wrapped, signature) in entries {
			let name = name.into();
			if name.starts_with('_') {
				tracing::trace!(module, name = %name, "skipping private routine");
				continue;
			}
			let wrapper = self.wrap_auto(&FunctionId::new(module, name.as_str()), wrapped, &signature)?;
			installed.push((name, wrapper));
		}
		tracing::debug!(module, installed = installed.len(), "installed tracked wrappers");
		Ok(installed)
	}

	pub fn len(&self) -> usize {
		self.tracked.read().len()
	}

	pub fn is_empty(&self) -> bool {
		self.tracked.read().is_empty()
	}

	/// Snapshots in registration order.
	pub fn snapshots(&self) -> Vec<UsageRecord> {
		self.tracked
			.read()
			.iter()
			.map(|t| UsageRecord {
				function: FunctionId::read(t.metadata()),
				counts: t.counts(),
				parameters: t.parameter_stats(),
			})
			.collect()
	}

	/// Usage table honoring the configured `skip_uncalled`.
	pub fn summary(&self) -> String {
		self.summary_with(self.config.skip_uncalled)
	}

	/// Usage table, most-called first. Ties keep registration order.
	pub fn summary_with(&self, skip_uncalled: bool) -> String {
		let mut records = self.snapshots();
		records.sort_by(|a, b| b.counts.total_calls.cmp(&a.counts.total_calls));

		let mut out = String::new();
		let _ = writeln!(out, "Statistics for argument usage of wrapped functions");
		let _ = writeln!(out, "--------------------------------------------------");
		for record in records {
			if skip_uncalled && record.counts.total_calls == 0 {
				continue;
			}
			let _ = writeln!(out, "{}", record.summary_line());
		}
		out
	}
}
