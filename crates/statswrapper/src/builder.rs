//! Wrapper construction.

use parking_lot::RwLock;

use crate::error::{ConfigError, Result, SlotRef};
use crate::metadata::Metadata;
use crate::slot::{ParamSpec, SlotRegistry};
use crate::value::{Name, Value};
use crate::wrapper::StatsWrapper;

/// Collects the wrapped callable and parameter specs for a [`StatsWrapper`].
///
/// Positional specs always precede keyword specs in the resulting slot
/// layout, regardless of call order on the builder.
#[derive(Debug)]
pub struct Builder<C> {
	wrapped: Option<C>,
	positional: Vec<ParamSpec>,
	keyword: Vec<(Name, ParamSpec)>,
}

impl<C> Default for Builder<C> {
	fn default() -> Self {
		Self {
			wrapped: None,
			positional: Vec::new(),
			keyword: Vec::new(),
		}
	}
}

impl<C> Builder<C> {
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the callable every invocation is forwarded to.
	pub fn wrap(mut self, wrapped: C) -> Self {
		self.wrapped = Some(wrapped);
		self
	}

	/// Declares the next positional-only parameter.
	pub fn positional(mut self, spec: impl Into<ParamSpec>) -> Self {
		self.positional.push(spec.into());
		self
	}

	/// Declares a keyword-reachable parameter. Redeclaring a name replaces its
	/// spec in place.
	pub fn keyword(mut self, name: impl Into<Name>, spec: impl Into<ParamSpec>) -> Self {
		let name = name.into();
		let spec = spec.into();
		match self.keyword.iter_mut().find(|(n, _)| *n == name) {
			Some(entry) => entry.1 = spec,
			None => self.keyword.push((name, spec)),
		}
		self
	}

	/// Declares a positional parameter from a dynamic spec value.
	pub fn positional_value(self, spec: &Value) -> Result<Self> {
		let spec = ParamSpec::from_value(spec, SlotRef::Positional(self.positional.len()))?;
		Ok(self.positional(spec))
	}

	/// Declares a keyword parameter from a dynamic spec value.
	pub fn keyword_value(self, name: impl Into<Name>, spec: &Value) -> Result<Self> {
		let name = name.into();
		let spec = ParamSpec::from_value(spec, SlotRef::Keyword(name.to_string()))?;
		Ok(self.keyword(name, spec))
	}

	pub fn build(self) -> Result<StatsWrapper<C>> {
		let wrapped = self.wrapped.ok_or(ConfigError::MissingCallable)?;
		let registry = SlotRegistry::build(self.positional, self.keyword)?;
		let boundary = registry.len();
		tracing::debug!(
			slots = registry.len(),
			positional_only = registry.positional_only(),
			boundary,
			"stats wrapper constructed"
		);
		Ok(StatsWrapper::from_parts(wrapped, registry, RwLock::new(boundary), Metadata::new()))
	}
}

/// Builds a wrapper from dynamic specs: each spec is [`Value::None`]
/// (untracked) or a [`Value::List`] of known values.
pub fn wrap<C, N>(
	wrapped: C,
	positional: impl IntoIterator<Item = Value>,
	keyword: impl IntoIterator<Item = (N, Value)>,
) -> Result<StatsWrapper<C>>
where
	N: Into<Name>,
{
	try_wrap(Some(wrapped), positional, keyword)
}

/// Like [`wrap`], but fails with [`ConfigError::MissingCallable`] when no
/// callable is supplied.
pub fn try_wrap<C, N>(
	wrapped: Option<C>,
	positional: impl IntoIterator<Item = Value>,
	keyword: impl IntoIterator<Item = (N, Value)>,
) -> Result<StatsWrapper<C>>
where
	N: Into<Name>,
{
	let wrapped = wrapped.ok_or(ConfigError::MissingCallable)?;
	let mut builder = Builder::new().wrap(wrapped);
	for spec in positional {
		builder = builder.positional_value(&spec)?;
	}
	for (name, spec) in keyword {
		builder = builder.keyword_value(name, &spec)?;
	}
	builder.build()
}
