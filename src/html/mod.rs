//! Static HTML and scripts bundled into the binary.

pub mod overlay;
pub mod watcher;
