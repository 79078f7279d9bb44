//! Call surface: argument bundles and the callable abstraction.

use smallvec::SmallVec;

use crate::value::{Name, Value};

/// Positional and keyword arguments for one call.
#[derive(Debug, Clone, Default)]
pub struct Arguments {
	positional: SmallVec<[Value; 4]>,
	keyword: Vec<(Name, Value)>,
}

impl Arguments {
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends a positional argument.
	pub fn arg(mut self, value: impl Into<Value>) -> Self {
		self.positional.push(value.into());
		self
	}

	/// Sets a keyword argument, replacing an earlier one with the same name.
	pub fn kwarg(mut self, name: impl Into<Name>, value: impl Into<Value>) -> Self {
		self.set_kwarg(name.into(), value.into());
		self
	}

	pub fn push_arg(&mut self, value: Value) {
		self.positional.push(value);
	}

	pub fn set_kwarg(&mut self, name: Name, value: Value) {
		match self.keyword.iter_mut().find(|(n, _)| *n == name) {
			Some(slot) => slot.1 = value,
			None => self.keyword.push((name, value)),
		}
	}

	/// Returns a copy with `value` inserted before the existing positionals.
	pub fn prepend(&self, value: Value) -> Self {
		let mut positional = SmallVec::with_capacity(self.positional.len() + 1);
		positional.push(value);
		positional.extend(self.positional.iter().cloned());
		Self {
			positional,
			keyword: self.keyword.clone(),
		}
	}

	pub fn positional(&self) -> &[Value] {
		&self.positional
	}

	pub fn keyword(&self) -> &[(Name, Value)] {
		&self.keyword
	}

	/// Looks up a keyword argument by name.
	pub fn get(&self, name: &str) -> Option<&Value> {
		self.keyword.iter().find(|(n, _)| *n == name).map(|(_, v)| v)
	}
}

/// An invocable entity wrapped by a [`StatsWrapper`](crate::StatsWrapper).
pub trait Callable {
	type Output;
	type Error;

	fn call(&self, args: &Arguments) -> Result<Self::Output, Self::Error>;
}

impl<F, O, E> Callable for F
where
	F: Fn(&Arguments) -> Result<O, E>,
{
	type Output = O;
	type Error = E;

	fn call(&self, args: &Arguments) -> Result<O, E> {
		self(args)
	}
}
