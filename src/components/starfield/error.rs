//! Errors raised while wiring the starfield to the page.

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failures on the DOM boundary and in configuration loading.
///
/// None of these are fatal to the page: the entry points log them and leave
/// the background blank.
#[derive(Debug, Error)]
pub enum StarfieldError {
	#[error("no global window")]
	MissingWindow,
	#[error("2d drawing context unavailable")]
	NoContext,
	#[error("javascript error: {0}")]
	Js(String),
	#[error("failed to parse starfield config: {0}")]
	Parse(#[from] serde_json::Error),
	#[error("invalid starfield config: {0}")]
	Config(String),
}

impl From<JsValue> for StarfieldError {
	fn from(value: JsValue) -> Self {
		StarfieldError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
	}
}
