//! Declared parameter lists and automatic wrapper construction.

use telemetric_statswrapper::{Builder, Name, ParamSpec, StatsWrapper};

use crate::TrackError;

/// How a declared parameter may be supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamKind {
	PositionalOnly,
	PositionalOrKeyword,
	KeywordOnly,
	/// Collects extra positionals. Never registered.
	VarPositional,
	/// Collects extra keywords. Never registered.
	VarKeyword,
}

/// One declared parameter.
#[derive(Debug, Clone)]
pub struct Param {
	pub name: Name,
	pub kind: ParamKind,
	pub spec: ParamSpec,
}

impl Param {
	pub fn new(name: impl Into<Name>, kind: ParamKind) -> Self {
		Self {
			name: name.into(),
			kind,
			spec: ParamSpec::Untracked,
		}
	}

	/// Tracks the given spec instead of only counting uses.
	pub fn with_spec(mut self, spec: impl Into<ParamSpec>) -> Self {
		self.spec = spec.into();
		self
	}
}

/// Ordered parameter list of a callable.
#[derive(Debug, Clone, Default)]
pub struct Signature {
	params: Vec<Param>,
}

impl Signature {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn param(mut self, param: Param) -> Self {
		self.params.push(param);
		self
	}

	pub fn positional_only(self, name: &str) -> Self {
		self.param(Param::new(name, ParamKind::PositionalOnly))
	}

	pub fn positional_or_keyword(self, name: &str) -> Self {
		self.param(Param::new(name, ParamKind::PositionalOrKeyword))
	}

	pub fn keyword_only(self, name: &str) -> Self {
		self.param(Param::new(name, ParamKind::KeywordOnly))
	}

	pub fn var_positional(self, name: &str) -> Self {
		self.param(Param::new(name, ParamKind::VarPositional))
	}

	pub fn var_keyword(self, name: &str) -> Self {
		self.param(Param::new(name, ParamKind::VarKeyword))
	}

	pub fn params(&self) -> &[Param] {
		&self.params
	}
}

/// Options for [`wrap_auto`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AutoOptions {
	/// Also register positional-or-keyword parameters as positional slots,
	/// separating positional use from keyword use in the statistics.
	pub track_positional_use: bool,
}

/// Slot layout derived from a [`Signature`].
#[derive(Debug, Clone)]
pub struct AutoPlan {
	pub positional: Vec<ParamSpec>,
	pub keyword: Vec<(Name, ParamSpec)>,
	pub boundary: usize,
}

impl AutoPlan {
	pub fn new(signature: &Signature, options: AutoOptions) -> Self {
		let mut positional = Vec::new();
		let mut keyword = Vec::new();
		let mut positional_keywords = 0;

		for param in signature.params() {
			match param.kind {
				ParamKind::PositionalOnly => positional.push(param.spec.clone()),
				ParamKind::PositionalOrKeyword => {
					if options.track_positional_use {
						positional.push(param.spec.clone());
					} else {
						positional_keywords += 1;
					}
					keyword.push((param.name.clone(), param.spec.clone()));
				}
				ParamKind::KeywordOnly => keyword.push((param.name.clone(), param.spec.clone())),
				ParamKind::VarPositional | ParamKind::VarKeyword => {}
			}
		}

		let boundary = positional.len() + positional_keywords;
		Self {
			positional,
			keyword,
			boundary,
		}
	}

	pub fn build<C>(self, wrapped: C) -> Result<StatsWrapper<C>, TrackError> {
		let builder = self.positional.into_iter().fold(Builder::new().wrap(wrapped), |b, spec| b.positional(spec));
		let wrapper = self.keyword.into_iter().fold(builder, |b, (name, spec)| b.keyword(name, spec)).build()?;
		wrapper.set_positional_boundary(self.boundary)?;
		Ok(wrapper)
	}
}

/// Wraps `wrapped` with one slot per named parameter of `signature`.
///
/// Keyword-only parameters end up past the positional boundary, so passing
/// them positionally is counted as invalid. Variadic parameters are not
/// registered and show up as invalid uses.
pub fn wrap_auto<C>(wrapped: C, signature: &Signature, options: AutoOptions) -> Result<StatsWrapper<C>, TrackError> {
	AutoPlan::new(signature, options).build(wrapped)
}

#[cfg(test)]
mod tests;
