//! A spinning, mouse-steerable triangle scene rendered into a browser canvas with WebGL.
//!
//! The crate compiles to WebAssembly. The host page calls one of the exported entry
//! functions with a parent element; a canvas is created under it and the same triangle is
//! drawn three times per animation frame, a third of a turn apart, in red, green and blue.
//! Moving the mouse anywhere on the page rotates the whole scene.
//!
//! Everything that does not touch the DOM ([`scene`], [`input`], [`config`], and the matrix
//! composition in [`render`]) builds and is tested on the host as well.

pub mod abs;
#[cfg(target_arch = "wasm32")]
pub mod app;
pub mod config;
pub mod error;
pub mod input;
pub mod logging;
pub mod render;
pub mod scene;

pub use config::Config;
pub use error::{Error, Result};
