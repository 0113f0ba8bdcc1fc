//! Tunable parameters for the starfield.
//!
//! Every field has a default, so a page only needs to supply the values it
//! wants to change. The JSON shape mirrors the struct layout:
//!
//! ```json
//! { "ambient": { "count": 120 }, "streaks": { "count": 5 }, "seed": 7 }
//! ```

use serde::Deserialize;

use super::error::StarfieldError;
use super::theme::Palette;

/// Drifting, twinkling background stars.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct AmbientConfig {
	/// Number of stars, fixed for the lifetime of the renderer.
	pub count: usize,
	/// Radius is drawn from `[0, max_radius)`.
	pub max_radius: f64,
	/// Each velocity axis is drawn from `[-max_speed, max_speed)` px/tick.
	pub max_speed: f64,
	/// Opacity step per tick is drawn from `[twinkle_min, twinkle_max)`.
	pub twinkle_min: f64,
	pub twinkle_max: f64,
	/// Twinkle direction flips once opacity reaches either bound.
	pub opacity_floor: f64,
	pub opacity_ceiling: f64,
}

impl Default for AmbientConfig {
	fn default() -> Self {
		Self {
			count: 200,
			max_radius: 2.0,
			max_speed: 0.15,
			twinkle_min: 0.01,
			twinkle_max: 0.03,
			opacity_floor: 0.1,
			opacity_ceiling: 1.0,
		}
	}
}

/// Shooting stars.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct StreakConfig {
	pub count: usize,
	/// Trail length range in px.
	pub length_min: f64,
	pub length_max: f64,
	/// Speed range in px/tick.
	pub speed_min: f64,
	pub speed_max: f64,
	/// Line width range in px.
	pub radius_min: f64,
	pub radius_max: f64,
	/// Opacity lost per tick; a streak resets once it reaches zero.
	pub fade_per_tick: f64,
	/// Streaks spawn within the top `spawn_band` fraction of the surface.
	pub spawn_band: f64,
}

impl Default for StreakConfig {
	fn default() -> Self {
		Self {
			count: 3,
			length_min: 40.0,
			length_max: 120.0,
			speed_min: 6.0,
			speed_max: 14.0,
			radius_min: 0.5,
			radius_max: 2.0,
			fade_per_tick: 0.015,
			spawn_band: 0.5,
		}
	}
}

/// Complete renderer configuration.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct StarfieldConfig {
	pub ambient: AmbientConfig,
	pub streaks: StreakConfig,
	pub palette: Palette,
	/// Fixed seed for the particle generator. Without one the browser's
	/// entropy is used and every page load looks different.
	pub seed: Option<u64>,
}

impl StarfieldConfig {
	/// Parse and validate a JSON document.
	pub fn from_json(text: &str) -> Result<Self, StarfieldError> {
		let config: Self = serde_json::from_str(text)?;
		config.validate()?;
		Ok(config)
	}

	pub fn validate(&self) -> Result<(), StarfieldError> {
		let a = &self.ambient;
		let s = &self.streaks;
		check_range("ambient.twinkle", a.twinkle_min, a.twinkle_max)?;
		check_range("ambient.opacity", a.opacity_floor, a.opacity_ceiling)?;
		check_range("streaks.length", s.length_min, s.length_max)?;
		check_range("streaks.speed", s.speed_min, s.speed_max)?;
		check_range("streaks.radius", s.radius_min, s.radius_max)?;

		if a.twinkle_min < 0.0 {
			return Err(StarfieldError::Config(
				"ambient.twinkle_min must not be negative".into(),
			));
		}
		if a.opacity_floor < 0.0 || a.opacity_ceiling > 1.0 {
			return Err(StarfieldError::Config(
				"ambient.opacity range must lie within [0, 1]".into(),
			));
		}
		if a.max_radius < 0.0 || a.max_speed < 0.0 {
			return Err(StarfieldError::Config(
				"ambient.max_radius and ambient.max_speed must not be negative".into(),
			));
		}
		if s.radius_min < 0.0 {
			return Err(StarfieldError::Config(
				"streaks.radius_min must not be negative".into(),
			));
		}
		if !(s.fade_per_tick > 0.0) {
			return Err(StarfieldError::Config(
				"streaks.fade_per_tick must be positive".into(),
			));
		}
		if !(s.spawn_band > 0.0 && s.spawn_band <= 1.0) {
			return Err(StarfieldError::Config(
				"streaks.spawn_band must be in (0, 1]".into(),
			));
		}
		Ok(())
	}
}

fn check_range(name: &str, min: f64, max: f64) -> Result<(), StarfieldError> {
	if min.is_finite() && max.is_finite() && min <= max {
		Ok(())
	} else {
		Err(StarfieldError::Config(format!(
			"{name} range is inverted or not finite ({min}..{max})"
		)))
	}
}
