//! This module contains the thin wrappers over the browser and WebGL,
//! including canvas setup, shader management, and mesh handling.

#[cfg(target_arch = "wasm32")]
pub mod app;
pub mod mesh;
pub mod shader;

#[cfg(target_arch = "wasm32")]
pub use app::*;
pub use mesh::*;
pub use shader::*;
