//! Canvas rendering for the starfield.
//!
//! Each frame clears the whole surface to transparent, then updates and draws
//! ambient stars followed by streaks. Drawing goes through [`Surface`] so
//! frame composition can be checked without a browser.

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::particles::{AmbientParticle, StreakParticle};
use super::state::{ParticleRef, StarfieldState};
use super::theme::{Color, Palette};

/// The drawing operations a frame needs.
pub trait Surface {
	/// Clear `[0, width) x [0, height)` to fully transparent.
	fn clear(&mut self, width: f64, height: f64);

	/// Fill a circle. `color.a` is the fill alpha.
	fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color);

	/// Stroke a straight line whose colour fades linearly from `color` at
	/// `head` to fully transparent at `tail`.
	fn stroke_fading_line(&mut self, head: (f64, f64), tail: (f64, f64), width: f64, color: Color);
}

impl Surface for CanvasRenderingContext2d {
	fn clear(&mut self, width: f64, height: f64) {
		self.clear_rect(0.0, 0.0, width, height);
	}

	fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color) {
		self.set_fill_style_str(&color.to_css());
		self.begin_path();
		let _ = self.arc(x, y, radius, 0.0, PI * 2.0);
		self.fill();
	}

	fn stroke_fading_line(&mut self, head: (f64, f64), tail: (f64, f64), width: f64, color: Color) {
		let gradient = self.create_linear_gradient(head.0, head.1, tail.0, tail.1);
		let _ = gradient.add_color_stop(0.0, &color.to_css());
		let _ = gradient.add_color_stop(1.0, &color.with_alpha(0.0).to_css());

		#[allow(deprecated)]
		self.set_stroke_style(&gradient);
		self.set_line_width(width);
		self.begin_path();
		self.move_to(head.0, head.1);
		self.line_to(tail.0, tail.1);
		self.stroke();
	}
}

/// Advance the field by one tick and paint it.
///
/// `is_dark` is asked once per particle, so a mode switch shows up on the
/// very next frame.
pub fn render_frame<S: Surface + ?Sized>(
	state: &mut StarfieldState,
	surface: &mut S,
	is_dark: &dyn Fn() -> bool,
) {
	surface.clear(state.width, state.height);

	let palette = state.config.palette.clone();
	state.advance(|particle| match particle {
		ParticleRef::Ambient(star) => draw_ambient(surface, star, &palette, is_dark),
		ParticleRef::Streak(streak) => draw_streak(surface, streak, &palette, is_dark),
	});
}

fn draw_ambient<S: Surface + ?Sized>(
	surface: &mut S,
	star: &AmbientParticle,
	palette: &Palette,
	is_dark: &dyn Fn() -> bool,
) {
	let color = palette.pick(is_dark()).with_alpha(star.opacity);
	surface.fill_circle(star.x, star.y, star.radius, color);
}

fn draw_streak<S: Surface + ?Sized>(
	surface: &mut S,
	streak: &StreakParticle,
	palette: &Palette,
	is_dark: &dyn Fn() -> bool,
) {
	let color = palette.pick(is_dark()).with_alpha(streak.opacity);
	surface.stroke_fading_line((streak.x, streak.y), streak.tail(), streak.radius, color);
}
