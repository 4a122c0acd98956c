//! Platform bindings
//!
//! The browser build exposes a `WebRunner` to JavaScript: the page owns
//! the canvas, input listeners and `requestAnimationFrame`, and hands
//! each frame's delta and normalized signals to Rust. Native builds have
//! nothing here; the headless binary drives a `Session` directly.

#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(target_arch = "wasm32")]
pub use web::WebRunner;
