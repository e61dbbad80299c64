//! Simulation core for a small tower-defence arcade game.
//!
//! The library never touches the terminal; the binary in `main.rs` owns
//! input, drawing and frame timing.

pub mod compute;
pub mod constants;
pub mod entities;
pub mod error;
pub mod geometry;

pub use error::SimError;
