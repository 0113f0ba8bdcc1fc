//! The `requestAnimationFrame` loop driving a starfield canvas.
//!
//! A [`FrameLoop`] owns the frame and resize closures together with a
//! cancellation flag. Stopping it (explicitly, through a [`StopHandle`], or by
//! dropping it) ends the self-rescheduling chain and detaches the resize
//! listener.
//!
//! The scheduling decisions live in [`LoopDriver`], which talks to the
//! browser only through [`FrameHost`].

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

use super::config::StarfieldConfig;
use super::error::StarfieldError;
use super::render::render_frame;
use super::state::StarfieldState;

/// "Is dark mode active", asked on every particle draw.
pub type DarkModeCheck = Rc<dyn Fn() -> bool>;

/// Reads the `dark` class on `<html>`, which the page's theme toggle owns.
pub fn document_dark_mode() -> bool {
	web_sys::window()
		.and_then(|w| w.document())
		.and_then(|d| d.document_element())
		.is_some_and(|root| root.class_list().contains("dark"))
}

/// Cloneable, thread-safe request to stop a running [`FrameLoop`].
///
/// The loop notices on its next frame and stops rescheduling itself.
#[derive(Clone, Debug, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
	pub fn stop(&self) {
		self.0.store(true, Ordering::Relaxed);
	}

	pub fn is_stopped(&self) -> bool {
		self.0.load(Ordering::Relaxed)
	}
}

/// The environment side of a frame loop.
pub(crate) trait FrameHost {
	/// Ask for the frame callback to run once more; returns the request id.
	fn request_frame(&self) -> Result<i32, StarfieldError>;
	fn cancel_frame(&self, id: i32);
	/// Remove the resize listener. Called at most once per driver.
	fn detach_resize(&self);
	/// Drop the frame callback itself.
	fn release(&self);
}

/// Tracks the pending frame and decides whether a frame draws and
/// reschedules. Dropping the driver stops it.
pub(crate) struct LoopDriver<H: FrameHost> {
	host: H,
	stop: StopHandle,
	pending: Cell<Option<i32>>,
	detached: Cell<bool>,
	released: Cell<bool>,
}

impl<H: FrameHost> LoopDriver<H> {
	pub(crate) fn new(host: H, stop: StopHandle) -> Self {
		Self {
			host,
			stop,
			pending: Cell::new(None),
			detached: Cell::new(false),
			released: Cell::new(false),
		}
	}

	pub(crate) fn host(&self) -> &H {
		&self.host
	}

	pub(crate) fn schedule(&self) -> Result<(), StarfieldError> {
		if self.released.get() || self.stop.is_stopped() {
			return Ok(());
		}
		let id = self.host.request_frame()?;
		self.pending.set(Some(id));
		Ok(())
	}

	/// Body of one frame callback. `draw` runs only while the loop has not
	/// been asked to stop, and only then is the next frame requested.
	pub(crate) fn frame(&self, draw: impl FnOnce()) {
		self.pending.set(None);
		if self.released.get() {
			return;
		}
		if self.stop.is_stopped() {
			self.detach();
			return;
		}
		draw();
		if let Err(e) = self.schedule() {
			warn!("starfield: could not schedule frame: {}", e);
		}
	}

	pub(crate) fn is_running(&self) -> bool {
		!self.released.get() && !self.stop.is_stopped()
	}

	/// Cancel the pending frame, remove the resize listener and release the
	/// frame callback. Later calls do nothing.
	pub(crate) fn stop(&self) {
		if self.released.replace(true) {
			return;
		}
		self.stop.stop();
		if let Some(id) = self.pending.take() {
			self.host.cancel_frame(id);
		}
		self.detach();
		self.host.release();
		info!("starfield: animation stopped");
	}

	fn detach(&self) {
		if !self.detached.replace(true) {
			self.host.detach_resize();
		}
	}
}

impl<H: FrameHost> Drop for LoopDriver<H> {
	fn drop(&mut self) {
		self.stop();
	}
}

type Callback = RefCell<Option<Closure<dyn FnMut()>>>;

/// [`FrameHost`] backed by the browser window.
pub(crate) struct BrowserHost {
	window: Window,
	animate: Callback,
	resize: Callback,
}

impl FrameHost for BrowserHost {
	fn request_frame(&self) -> Result<i32, StarfieldError> {
		match *self.animate.borrow() {
			Some(ref cb) => Ok(self.window.request_animation_frame(cb.as_ref().unchecked_ref())?),
			None => Err(StarfieldError::Js("frame callback already released".into())),
		}
	}

	fn cancel_frame(&self, id: i32) {
		let _ = self.window.cancel_animation_frame(id);
	}

	fn detach_resize(&self) {
		if let Some(cb) = self.resize.borrow_mut().take() {
			let _ = self
				.window
				.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}
	}

	fn release(&self) {
		// Runs outside the frame callback: `stop` is never reached from it.
		self.animate.borrow_mut().take();
	}
}

/// A running starfield animation bound to one canvas.
pub struct FrameLoop {
	driver: Rc<LoopDriver<BrowserHost>>,
}

impl FrameLoop {
	/// Size `canvas` to the viewport, seed the field and start animating.
	///
	/// `stop` may be shared with whoever should be able to end the loop,
	/// such as a cleanup hook that cannot hold the loop itself.
	pub fn start(
		canvas: HtmlCanvasElement,
		config: StarfieldConfig,
		is_dark: DarkModeCheck,
		stop: StopHandle,
	) -> Result<Self, StarfieldError> {
		let window = web_sys::window().ok_or(StarfieldError::MissingWindow)?;
		let ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")?
			.ok_or(StarfieldError::NoContext)?
			.dyn_into()
			.map_err(|_| StarfieldError::NoContext)?;

		let (w, h) = viewport_size(&window)?;
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let seed = config.seed.unwrap_or_else(entropy_seed);
		info!(
			"starfield: {} stars, {} streaks on {}x{}",
			config.ambient.count, config.streaks.count, w, h
		);
		let state = Rc::new(RefCell::new(StarfieldState::new(config, w, h, seed)));

		let driver = Rc::new(LoopDriver::new(
			BrowserHost {
				window,
				animate: RefCell::new(None),
				resize: RefCell::new(None),
			},
			stop,
		));
		let host = driver.host();

		let (state_resize, canvas_resize) = (state.clone(), canvas);
		*host.resize.borrow_mut() = Some(Closure::new(move || {
			let Some(win) = web_sys::window() else {
				return;
			};
			match viewport_size(&win) {
				Ok((nw, nh)) => {
					canvas_resize.set_width(nw as u32);
					canvas_resize.set_height(nh as u32);
					state_resize.borrow_mut().resize(nw, nh);
					debug!("starfield: resized to {}x{}", nw, nh);
				}
				Err(e) => warn!("starfield: ignoring resize: {}", e),
			}
		}));
		if let Some(ref cb) = *host.resize.borrow() {
			host.window
				.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref())?;
		}

		// Weak, so dropping the `FrameLoop` drops the driver and stops it.
		let driver_anim: Weak<LoopDriver<BrowserHost>> = Rc::downgrade(&driver);
		let mut ctx = ctx;
		*host.animate.borrow_mut() = Some(Closure::new(move || {
			let Some(driver) = driver_anim.upgrade() else {
				return;
			};
			driver.frame(|| render_frame(&mut state.borrow_mut(), &mut ctx, &*is_dark));
		}));
		driver.schedule()?;

		Ok(Self { driver })
	}

	pub fn is_running(&self) -> bool {
		self.driver.is_running()
	}

	/// Stop animating: cancel the pending frame, remove the resize listener
	/// and release both closures.
	pub fn stop(&self) {
		self.driver.stop();
	}
}

fn viewport_size(window: &Window) -> Result<(f64, f64), StarfieldError> {
	let w = window.inner_width()?.as_f64().unwrap_or(0.0);
	let h = window.inner_height()?.as_f64().unwrap_or(0.0);
	Ok((w, h))
}

/// Seed from the browser's `Math.random` mixed with the clock.
fn entropy_seed() -> u64 {
	let random = js_sys::Math::random().to_bits();
	let now = js_sys::Date::now().to_bits();
	random ^ now.rotate_left(32)
}
