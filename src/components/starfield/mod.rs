//! Animated starfield background.
//!
//! Renders a full-viewport canvas with:
//! - Slowly drifting, twinkling ambient stars that wrap at the edges
//! - A few diagonal shooting-star streaks that fade and respawn
//! - Particle tones that follow the page's dark mode, checked every frame
//!
//! The simulation ([`StarfieldState`]) and frame composition
//! ([`render_frame`]) are independent of the browser; [`FrameLoop`] and
//! [`StarfieldCanvas`] bind them to a real canvas.
//!
//! # Example
//!
//! ```ignore
//! use starfield::StarfieldCanvas;
//!
//! view! { <StarfieldCanvas /> }
//! ```

mod component;
pub mod config;
mod error;
mod frame_loop;
pub mod particles;
mod render;
mod state;
pub mod theme;

pub use component::StarfieldCanvas;
pub use config::StarfieldConfig;
pub use error::StarfieldError;
pub use frame_loop::{DarkModeCheck, FrameLoop, StopHandle, document_dark_mode};
pub use render::{Surface, render_frame};
pub use state::{ParticleRef, StarfieldState};
pub use theme::{Color, Palette};
