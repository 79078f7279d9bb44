//! Call-interception wrapper recording argument usage statistics.
//!
//! A [`StatsWrapper`] forwards every call to the callable it wraps and counts
//! how each declared parameter is used: how often it is passed, and how often
//! each of a fixed set of known values is passed for it. Arguments are never
//! validated or altered; mismatches only show up in the counters.

/// Wrapper construction.
pub mod builder;
/// Argument bundles and the callable abstraction.
pub mod call;
/// Error taxonomy.
pub mod error;
/// Open per-wrapper metadata.
pub mod metadata;
/// Parameter slot registry.
pub mod slot;
/// Usage snapshots.
pub mod stats;
/// Dynamic values and interned names.
pub mod value;
/// Dispatch and classification.
pub mod wrapper;

pub use builder::{Builder, try_wrap, wrap};
pub use call::{Arguments, Callable};
pub use error::{BoundaryError, CompareError, ConfigError, FatalComparison, Severity, SlotRef};
pub use metadata::Metadata;
pub use slot::{KnownValues, ParamSpec, ParameterSlot, SlotRegistry};
pub use stats::{Counts, ParameterStats};
pub use value::{CustomValue, MAX_COMPARE_DEPTH, Name, Value};
pub use wrapper::{Outcome, StatsWrapper};
