//! Court Viewer.
//!
//! Host for the procedural court: configuration, keyboard-driven camera
//! presets with free orbiting, and a fixed-cadence frame loop.

pub mod app;
pub mod config;
pub mod frame_loop;
pub mod input;
pub mod state;

pub use app::{AppContext, ViewerError};
pub use config::{AppConfig, ConfigError, ConfigManager, FrameConfig, KeyBindings};
pub use frame_loop::FrameLoop;
pub use input::{Action, InputQueue, KeyEvent};
pub use state::ViewState;
