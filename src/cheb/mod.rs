//! # Chebyshev pseudospectral module
//!
//! Derivatives and low-pass filtering of functions sampled at Chebyshev
//! collocation points over an arbitrary interval [lower, upper].
//!
//! - `grid`: grid configuration, collocation points, low-pass mask
//! - `dct`: type-I DCT plans (FFT backed and direct reference)
//! - `core`: the [`Chebyshev`] engine
//! - `session`: init/teardown lifecycle around one engine
//! - `ffi`: Python bindings (feature `python`)

pub mod core;
pub mod dct;
pub mod error;
pub mod grid;
pub mod session;

#[cfg(feature = "python")]
pub mod ffi;

pub use self::core::Chebyshev;
pub use dct::{DctPlan, FftDct1, NaiveDct1};
pub use error::ChebError;
pub use grid::GridConfig;
pub use session::ChebSession;
