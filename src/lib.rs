//! A small, optionally multithreaded **geometric regularization** library for
//! noisy 2D line art: classifies polylines against a fixed shape taxonomy
//! (*circle*, *rectangle*, *regular N-gon*, *ten-vertex star*), regenerates
//! the canonical form of whatever matches, and completes fragmented curves by
//! stitching nearby endpoints into longer chains and rings.
//!
//! # Features
//! #### Default
//! - **f64**: use f64 as Real
//!
//! #### Optional
//! - **f32**: use f32 as Real, this conflicts with f64
//! - **parallel**: use rayon for multithreading

#![forbid(unsafe_code)]
#![deny(unused)]
#![warn(clippy::missing_const_for_fn, clippy::approx_constant, clippy::all)]

pub mod errors;
pub mod float_types;
pub mod geometry;
pub mod classify;
pub mod regularize;
pub mod symmetry;
pub mod sample;
pub mod stitch;
pub mod pipeline;
pub mod io;

#[cfg(any(all(feature = "f64", feature = "f32"), not(any(feature = "f64", feature = "f32"))))]
compile_error!("Either 'f64' or 'f32' feature must be specified, but not both");

pub use classify::ShapeKind;
pub use errors::ValidationError;
pub use pipeline::Figure;
