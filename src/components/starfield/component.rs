//! Leptos component wrapping the starfield canvas.
//!
//! The component renders a fixed, full-viewport canvas behind the page
//! content and hands it to a [`FrameLoop`] once mounted. Unmounting stops the
//! loop.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::warn;
use web_sys::HtmlCanvasElement;

use super::config::StarfieldConfig;
use super::frame_loop::{DarkModeCheck, FrameLoop, StopHandle, document_dark_mode};

/// Renders an animated starfield filling the viewport.
///
/// Particle colours follow the `dark` class on `<html>`, re-read every
/// frame. Pass `config` to override counts, ranges, palette or seed.
#[component]
pub fn StarfieldCanvas(#[prop(optional)] config: Option<StarfieldConfig>) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let frame_loop: Rc<RefCell<Option<FrameLoop>>> = Rc::new(RefCell::new(None));
	let stop = StopHandle::default();
	let stop_init = stop.clone();

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if stop_init.is_stopped() || frame_loop.borrow().as_ref().is_some_and(FrameLoop::is_running) {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		let is_dark: DarkModeCheck = Rc::new(document_dark_mode);
		let config = config.clone().unwrap_or_default();

		match FrameLoop::start(canvas, config, is_dark, stop_init.clone()) {
			Ok(running) => *frame_loop.borrow_mut() = Some(running),
			Err(e) => warn!("starfield: animation disabled: {}", e),
		}
	});

	// The loop itself is not `Send`, so cleanup only raises the shared flag;
	// the next frame then stops rescheduling and detaches the resize listener.
	on_cleanup(move || stop.stop());

	view! {
		<canvas
			node_ref=canvas_ref
			class="starfield-canvas"
			aria-hidden="true"
			style="position: fixed; inset: 0; display: block; pointer-events: none; z-index: -1;"
		/>
	}
}
