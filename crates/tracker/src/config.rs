use serde::Deserialize;

use crate::AutoOptions;

/// Tracker settings, loadable from any serde format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrackerConfig {
	/// See [`AutoOptions::track_positional_use`].
	pub track_positional_use: bool,
	/// Omit never-called wrappers from [`Tracker::summary`](crate::Tracker::summary).
	pub skip_uncalled: bool,
}

impl Default for TrackerConfig {
	fn default() -> Self {
		Self {
			track_positional_use: false,
			skip_uncalled: true,
		}
	}
}

impl TrackerConfig {
	pub const fn auto_options(&self) -> AutoOptions {
		AutoOptions {
			track_positional_use: self.track_positional_use,
		}
	}
}
