//! Star particles: slow twinkling background dots and fast diagonal streaks.
//!
//! Particles are plain data advanced in place. Nothing here allocates after
//! construction, and a spent streak re-rolls its own parameters instead of
//! being replaced.

use std::f64::consts::FRAC_PI_4;

use rand::Rng;

use super::config::{AmbientConfig, StreakConfig};

/// Travel direction shared by every streak.
pub const STREAK_ANGLE: f64 = FRAC_PI_4;

/// Uniform sample over `[lo, hi)`, collapsing to `lo` for an empty range
/// (a zero-sized surface during page setup, or a fixed-value config).
fn uniform<R: Rng + ?Sized>(rng: &mut R, lo: f64, hi: f64) -> f64 {
	if hi > lo { rng.gen_range(lo..hi) } else { lo }
}

/// Toroidal wrap into `[0, extent)`.
fn wrap(value: f64, extent: f64) -> f64 {
	if !(extent > 0.0) {
		return 0.0;
	}
	if (0.0..extent).contains(&value) {
		return value;
	}
	let wrapped = value.rem_euclid(extent);
	// rem_euclid rounds tiny negatives up to `extent` itself
	if wrapped >= extent { 0.0 } else { wrapped }
}

/// A persistent background star.
#[derive(Clone, Debug, PartialEq)]
pub struct AmbientParticle {
	pub x: f64,
	pub y: f64,
	pub dx: f64,
	pub dy: f64,
	pub radius: f64,
	pub opacity: f64,
	pub twinkle_rate: f64,
	/// `1.0` while brightening, `-1.0` while dimming.
	pub twinkle_direction: f64,
}

impl AmbientParticle {
	pub fn spawn<R: Rng + ?Sized>(
		rng: &mut R,
		config: &AmbientConfig,
		width: f64,
		height: f64,
	) -> Self {
		Self {
			x: uniform(rng, 0.0, width),
			y: uniform(rng, 0.0, height),
			radius: uniform(rng, 0.0, config.max_radius),
			dx: uniform(rng, -config.max_speed, config.max_speed),
			dy: uniform(rng, -config.max_speed, config.max_speed),
			opacity: uniform(rng, config.opacity_floor, config.opacity_ceiling),
			twinkle_rate: uniform(rng, config.twinkle_min, config.twinkle_max),
			twinkle_direction: if rng.gen_bool(0.5) { 1.0 } else { -1.0 },
		}
	}

	/// Drift, wrap and twinkle by one tick.
	///
	/// Opacity is never clamped: a step may overshoot a bound by at most one
	/// `twinkle_rate`, after which the direction points back into the band.
	pub fn update(&mut self, config: &AmbientConfig, width: f64, height: f64) {
		self.x = wrap(self.x + self.dx, width);
		self.y = wrap(self.y + self.dy, height);

		self.opacity += self.twinkle_rate * self.twinkle_direction;
		let dimming_past_floor = self.opacity <= config.opacity_floor && self.twinkle_direction < 0.0;
		let brightening_past_ceiling =
			self.opacity >= config.opacity_ceiling && self.twinkle_direction > 0.0;
		if dimming_past_floor || brightening_past_ceiling {
			self.twinkle_direction = -self.twinkle_direction;
		}
	}
}

/// A shooting star. Resets itself whenever it fades out or leaves the
/// surface past the right or bottom edge.
#[derive(Clone, Debug, PartialEq)]
pub struct StreakParticle {
	pub x: f64,
	pub y: f64,
	pub angle: f64,
	pub speed: f64,
	pub length: f64,
	/// Stroke width of the trail.
	pub radius: f64,
	pub opacity: f64,
}

impl StreakParticle {
	pub fn spawn<R: Rng + ?Sized>(
		rng: &mut R,
		config: &StreakConfig,
		width: f64,
		height: f64,
	) -> Self {
		let mut streak = Self {
			x: 0.0,
			y: 0.0,
			angle: STREAK_ANGLE,
			speed: 0.0,
			length: 0.0,
			radius: 0.0,
			opacity: 0.0,
		};
		streak.reset(rng, config, width, height);
		streak
	}

	/// Re-roll position, speed, length and width; restore full opacity.
	pub fn reset<R: Rng + ?Sized>(
		&mut self,
		rng: &mut R,
		config: &StreakConfig,
		width: f64,
		height: f64,
	) {
		self.x = uniform(rng, 0.0, width);
		self.y = uniform(rng, 0.0, height * config.spawn_band);
		self.length = uniform(rng, config.length_min, config.length_max);
		self.speed = uniform(rng, config.speed_min, config.speed_max);
		self.radius = uniform(rng, config.radius_min, config.radius_max);
		self.opacity = 1.0;
		self.angle = STREAK_ANGLE;
	}

	/// Unit vector of travel.
	pub fn heading(&self) -> (f64, f64) {
		(self.angle.cos(), self.angle.sin())
	}

	/// End of the trail, behind the head.
	pub fn tail(&self) -> (f64, f64) {
		let (ux, uy) = self.heading();
		(self.x - ux * self.length, self.y - uy * self.length)
	}

	/// Advance one tick. Returns `true` when the streak was reset.
	pub fn update<R: Rng + ?Sized>(
		&mut self,
		rng: &mut R,
		config: &StreakConfig,
		width: f64,
		height: f64,
	) -> bool {
		let (ux, uy) = self.heading();
		self.x += ux * self.speed;
		self.y += uy * self.speed;
		self.opacity -= config.fade_per_tick;

		if self.opacity <= 0.0 || self.x > width || self.y > height {
			self.reset(rng, config, width, height);
			true
		} else {
			false
		}
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand_pcg::Pcg64;

	use super::*;

	fn rng() -> Pcg64 {
		Pcg64::seed_from_u64(0x5eed)
	}

	#[test]
	fn wrap_is_toroidal() {
		assert_eq!(wrap(-0.5, 100.0), 99.5);
		assert_eq!(wrap(100.25, 100.0), 0.25);
		assert_eq!(wrap(350.0, 100.0), 50.0);
		assert_eq!(wrap(42.0, 100.0), 42.0);
		assert_eq!(wrap(-1e-18, 100.0), 0.0);
		assert_eq!(wrap(5.0, 0.0), 0.0);
	}

	#[test]
	fn ambient_spawn_is_in_declared_ranges() {
		let config = AmbientConfig::default();
		let mut rng = rng();
		for _ in 0..500 {
			let p = AmbientParticle::spawn(&mut rng, &config, 640.0, 480.0);
			assert!((0.0..640.0).contains(&p.x));
			assert!((0.0..480.0).contains(&p.y));
			assert!((0.0..2.0).contains(&p.radius));
			assert!((-0.15..0.15).contains(&p.dx));
			assert!((-0.15..0.15).contains(&p.dy));
			assert!((0.1..1.0).contains(&p.opacity));
			assert!((0.01..0.03).contains(&p.twinkle_rate));
			assert!(p.twinkle_direction == 1.0 || p.twinkle_direction == -1.0);
		}
	}

	#[test]
	fn ambient_stays_on_surface() {
		let config = AmbientConfig::default();
		let mut rng = rng();
		let (w, h) = (300.0, 200.0);
		let mut stars: Vec<_> = (0..100)
			.map(|_| AmbientParticle::spawn(&mut rng, &config, w, h))
			.collect();
		for _ in 0..5_000 {
			for star in &mut stars {
				star.update(&config, w, h);
				assert!(star.x >= 0.0 && star.x < w, "x out of range: {}", star.x);
				assert!(star.y >= 0.0 && star.y < h, "y out of range: {}", star.y);
			}
		}
	}

	#[test]
	fn ambient_wraps_to_opposite_edge() {
		let config = AmbientConfig::default();
		let mut star = AmbientParticle {
			x: 0.05,
			y: 99.95,
			dx: -0.1,
			dy: 0.1,
			radius: 1.0,
			opacity: 0.5,
			twinkle_rate: 0.01,
			twinkle_direction: 1.0,
		};
		star.update(&config, 200.0, 100.0);
		assert!(star.x > 199.9 && star.x < 200.0);
		assert!(star.y >= 0.0 && star.y < 0.1);
	}

	#[test]
	fn twinkle_reflects_within_one_step() {
		let config = AmbientConfig::default();
		let mut rng = rng();
		let mut stars: Vec<_> = (0..50)
			.map(|_| AmbientParticle::spawn(&mut rng, &config, 100.0, 100.0))
			.collect();
		for _ in 0..2_000 {
			for star in &mut stars {
				star.update(&config, 100.0, 100.0);
				let step = star.twinkle_rate;
				assert!(star.opacity > config.opacity_floor - step - 1e-12);
				assert!(star.opacity < config.opacity_ceiling + step + 1e-12);
			}
		}
	}

	#[test]
	fn twinkle_flips_without_clamping() {
		let config = AmbientConfig::default();
		let mut star = AmbientParticle {
			x: 1.0,
			y: 1.0,
			dx: 0.0,
			dy: 0.0,
			radius: 1.0,
			opacity: 0.99,
			twinkle_rate: 0.02,
			twinkle_direction: 1.0,
		};
		star.update(&config, 10.0, 10.0);
		assert!(star.opacity > 1.0);
		assert_eq!(star.twinkle_direction, -1.0);
		star.update(&config, 10.0, 10.0);
		assert!(star.opacity < 1.0);
	}

	#[test]
	fn twinkle_recovers_from_below_floor() {
		let config = AmbientConfig::default();
		let mut star = AmbientParticle {
			x: 1.0,
			y: 1.0,
			dx: 0.0,
			dy: 0.0,
			radius: 1.0,
			opacity: 0.05,
			twinkle_rate: 0.02,
			twinkle_direction: 1.0,
		};
		for _ in 0..5 {
			star.update(&config, 10.0, 10.0);
		}
		assert_eq!(star.twinkle_direction, 1.0);
		assert!(star.opacity > 0.1);
	}

	#[test]
	fn streak_fades_by_fixed_step() {
		let config = StreakConfig::default();
		let mut rng = rng();
		let mut streak = StreakParticle::spawn(&mut rng, &config, 1_000_000.0, 1_000_000.0);
		for _ in 0..60 {
			let before = streak.opacity;
			let reset = streak.update(&mut rng, &config, 1_000_000.0, 1_000_000.0);
			if reset {
				assert_eq!(streak.opacity, 1.0);
			} else {
				assert_eq!(streak.opacity, before - 0.015);
				assert!(streak.opacity < before);
			}
		}
	}

	#[test]
	fn streak_reset_lands_in_spawn_domain() {
		let config = StreakConfig::default();
		let mut rng = rng();
		let (w, h) = (800.0, 600.0);
		let mut streak = StreakParticle::spawn(&mut rng, &config, w, h);
		let mut resets = 0;
		for _ in 0..10_000 {
			if streak.update(&mut rng, &config, w, h) {
				resets += 1;
				assert_eq!(streak.opacity, 1.0);
				assert!((0.0..w).contains(&streak.x));
				assert!((0.0..h * 0.5).contains(&streak.y));
				assert!((40.0..120.0).contains(&streak.length));
				assert!((6.0..14.0).contains(&streak.speed));
				assert!((0.5..2.0).contains(&streak.radius));
				assert_eq!(streak.angle, STREAK_ANGLE);
			}
		}
		assert!(resets > 0);
	}

	#[test]
	fn streak_resets_when_leaving_surface() {
		let config = StreakConfig::default();
		let mut rng = rng();
		let mut streak = StreakParticle::spawn(&mut rng, &config, 100.0, 100.0);
		streak.x = 99.0;
		streak.y = 10.0;
		streak.speed = 10.0;
		streak.opacity = 0.9;
		assert!(streak.update(&mut rng, &config, 100.0, 100.0));
		assert_eq!(streak.opacity, 1.0);
		assert!(streak.y < 50.0);
	}

	#[test]
	fn streak_tail_trails_behind_head() {
		let config = StreakConfig::default();
		let mut streak = StreakParticle::spawn(&mut rng(), &config, 500.0, 500.0);
		streak.x = 200.0;
		streak.y = 100.0;
		streak.length = 100.0;
		let (tx, ty) = streak.tail();
		let half_sqrt2 = std::f64::consts::FRAC_1_SQRT_2 * 100.0;
		assert!((tx - (200.0 - half_sqrt2)).abs() < 1e-9);
		assert!((ty - (100.0 - half_sqrt2)).abs() < 1e-9);
	}
}
