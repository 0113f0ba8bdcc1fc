//! Renderer state: the particle collections, surface size and random source.
//!
//! Everything a frame touches lives here and is passed explicitly into update
//! and draw, so several independent starfields can coexist and the simulation
//! runs without a document.

use rand::SeedableRng;
use rand_pcg::Pcg64;

use super::config::StarfieldConfig;
use super::particles::{AmbientParticle, StreakParticle};

/// A particle handed to a visitor after it has been advanced.
#[derive(Clone, Copy, Debug)]
pub enum ParticleRef<'a> {
	Ambient(&'a AmbientParticle),
	Streak(&'a StreakParticle),
}

/// Core starfield state.
///
/// Created once when the canvas mounts. Collections are sized from the
/// config at construction and never grow or shrink afterwards.
pub struct StarfieldState {
	pub config: StarfieldConfig,
	pub ambient: Vec<AmbientParticle>,
	pub streaks: Vec<StreakParticle>,
	pub width: f64,
	pub height: f64,
	rng: Pcg64,
}

impl StarfieldState {
	pub fn new(config: StarfieldConfig, width: f64, height: f64, seed: u64) -> Self {
		let mut rng = Pcg64::seed_from_u64(seed);

		let ambient = (0..config.ambient.count)
			.map(|_| AmbientParticle::spawn(&mut rng, &config.ambient, width, height))
			.collect();
		let streaks = (0..config.streaks.count)
			.map(|_| StreakParticle::spawn(&mut rng, &config.streaks, width, height))
			.collect();

		Self {
			config,
			ambient,
			streaks,
			width,
			height,
			rng,
		}
	}

	/// Advance every particle by one tick, ambient stars first, each
	/// collection in order. `visit` sees each particle right after its own
	/// update, which lets the renderer interleave update and draw.
	pub fn advance(&mut self, mut visit: impl FnMut(ParticleRef<'_>)) {
		let (width, height) = (self.width, self.height);

		for star in &mut self.ambient {
			star.update(&self.config.ambient, width, height);
			visit(ParticleRef::Ambient(star));
		}
		for streak in &mut self.streaks {
			streak.update(&mut self.rng, &self.config.streaks, width, height);
			visit(ParticleRef::Streak(streak));
		}
	}

	/// Advance one tick without drawing.
	pub fn tick(&mut self) {
		self.advance(|_| {});
	}

	/// Record new surface dimensions. Particles keep their coordinates and
	/// are brought back in range by their own next update.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}
