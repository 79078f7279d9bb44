//! Helpers around [`StatsWrapper`](telemetric_statswrapper::StatsWrapper).
//!
//! * [`wrap_auto`] derives slots from a declared [`Signature`].
//! * [`Tracker`] keeps every wrapper it creates and renders a usage summary.
//! * [`Bound`] invokes a wrapper with a receiver prepended, for method-style
//!   call sites.

pub mod bound;
pub mod config;
pub mod signature;
pub mod tracker;

pub use bound::{Bind, Bound};
pub use config::TrackerConfig;
pub use signature::{AutoOptions, AutoPlan, Param, ParamKind, Signature, wrap_auto};
pub use tracker::{FunctionId, Tracked, Tracker, UsageRecord};

use telemetric_statswrapper::{BoundaryError, ConfigError};

/// Errors from building tracked wrappers.
#[derive(Debug, thiserror::Error)]
pub enum TrackError {
	#[error(transparent)]
	Config(#[from] ConfigError),

	#[error(transparent)]
	Boundary(#[from] BoundaryError),
}
