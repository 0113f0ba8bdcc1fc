//! Particle colours for the light and dark page modes.

use serde::Deserialize;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(from = "[u8; 3]")]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// CSS `rgba()` notation. Alpha is always written out since particles
	/// are translucent nearly all the time.
	pub fn to_css(self) -> String {
		format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
	}
}

impl From<[u8; 3]> for Color {
	fn from([r, g, b]: [u8; 3]) -> Self {
		Self::rgb(r, g, b)
	}
}

/// The two particle tones. Which one is used is decided per draw call by the
/// dark mode predicate.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Palette {
	/// Tone used while the page is in dark mode.
	pub dark: Color,
	/// Tone used while the page is in light mode.
	pub light: Color,
}

impl Palette {
	pub fn pick(&self, dark_mode: bool) -> Color {
		if dark_mode { self.dark } else { self.light }
	}
}

impl Default for Palette {
	fn default() -> Self {
		Self {
			dark: Color::rgb(255, 255, 255),
			light: Color::rgb(50, 50, 80),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn picks_tone_by_mode() {
		let palette = Palette::default();
		assert_eq!(palette.pick(true), Color::rgb(255, 255, 255));
		assert_eq!(palette.pick(false), Color::rgb(50, 50, 80));
	}

	#[test]
	fn css_keeps_alpha() {
		let c = Color::rgb(50, 50, 80).with_alpha(0.25);
		assert_eq!(c.to_css(), "rgba(50, 50, 80, 0.25)");
	}

	#[test]
	fn palette_deserializes_from_triples() {
		let palette: Palette =
			serde_json::from_str(r#"{ "dark": [200, 210, 255] }"#).unwrap();
		assert_eq!(palette.dark, Color::rgb(200, 210, 255));
		assert_eq!(palette.light, Palette::default().light);
	}
}
