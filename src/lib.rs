//! starfield: animated star background for a portfolio page.
//!
//! This crate provides a WASM canvas component that draws twinkling, drifting
//! stars and occasional shooting stars behind the page content, tinted to
//! match the page's light or dark mode.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::starfield::{
	FrameLoop, StarfieldCanvas, StarfieldConfig, StarfieldError, StopHandle,
	document_dark_mode,
};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("starfield: logging initialized");
}

/// Load configuration from a script element with id="starfield-config".
/// Expected format: JSON matching [`StarfieldConfig`]; missing fields take
/// their defaults. Any failure falls back to the default configuration.
pub fn load_config() -> StarfieldConfig {
	let Some(json_text) = config_text() else {
		return StarfieldConfig::default();
	};

	match StarfieldConfig::from_json(&json_text) {
		Ok(config) => {
			info!(
				"starfield: loaded config ({} stars, {} streaks)",
				config.ambient.count, config.streaks.count
			);
			config
		}
		Err(e) => {
			warn!("starfield: {}, using defaults", e);
			StarfieldConfig::default()
		}
	}
}

fn config_text() -> Option<String> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("starfield-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}

/// Main application component.
/// Loads configuration from the DOM and mounts the starfield behind the page.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_config();

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text="Starfield" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<StarfieldCanvas config=config />
	}
}
