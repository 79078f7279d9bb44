use telemetric_statswrapper::{Arguments, Callable, FatalComparison, Outcome, StatsWrapper, Value};

/// A wrapper paired with a receiver that is passed as the first positional
/// argument of every call.
#[derive(Debug)]
pub struct Bound<'a, C> {
	wrapper: &'a StatsWrapper<C>,
	receiver: Value,
}

impl<'a, C> Bound<'a, C> {
	pub fn new(wrapper: &'a StatsWrapper<C>, receiver: impl Into<Value>) -> Self {
		Self {
			wrapper,
			receiver: receiver.into(),
		}
	}

	pub fn receiver(&self) -> &Value {
		&self.receiver
	}

	pub fn wrapper(&self) -> &'a StatsWrapper<C> {
		self.wrapper
	}
}

impl<C: Callable> Bound<'_, C> {
	pub fn invoke(&self, args: &Arguments) -> Result<Outcome<C>, FatalComparison> {
		self.wrapper.invoke(&args.prepend(self.receiver.clone()))
	}
}

/// Method-style binding of a wrapper to a receiver.
pub trait Bind<C> {
	fn bind(&self, receiver: impl Into<Value>) -> Bound<'_, C>;
}

impl<C> Bind<C> for StatsWrapper<C> {
	fn bind(&self, receiver: impl Into<Value>) -> Bound<'_, C> {
		Bound::new(self, receiver)
	}
}
