//! The overlay: which coordinates get shown, and the lifecycle of the surface showing them.

pub mod bridge;
pub mod consts;
pub mod controller;
pub mod handlers;
pub mod message_types;
pub mod navigation;
pub mod render;
pub mod state;
pub mod surface;
pub mod task;

pub use controller::OverlayController;
pub use task::{spawn, OverlayHandle};
