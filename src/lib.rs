//! # cheb_spectral - Chebyshev pseudospectral derivatives
//!
//! Spectral (Chebyshev coefficient) transforms, exact spectral derivatives
//! and low-pass filtering for 1-D functions sampled at Chebyshev points.
//! The Python extension module is built with the `python` feature.

pub mod cheb;

pub use cheb::{ChebError, ChebSession, Chebyshev, DctPlan, FftDct1, GridConfig, NaiveDct1};

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// Python module definition
#[cfg(feature = "python")]
#[pymodule]
fn _cheb_spectral(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // lifecycle and accessors
    m.add_function(wrap_pyfunction!(cheb::ffi::init, m)?)?;
    m.add_function(wrap_pyfunction!(cheb::ffi::cleanup, m)?)?;
    m.add_function(wrap_pyfunction!(cheb::ffi::n, m)?)?;
    m.add_function(wrap_pyfunction!(cheb::ffi::lower, m)?)?;
    m.add_function(wrap_pyfunction!(cheb::ffi::upper, m)?)?;
    m.add_function(wrap_pyfunction!(cheb::ffi::pt, m)?)?;

    // transforms
    m.add_function(wrap_pyfunction!(cheb::ffi::to_ch, m)?)?;
    m.add_function(wrap_pyfunction!(cheb::ffi::to_po, m)?)?;
    m.add_function(wrap_pyfunction!(cheb::ffi::der, m)?)?;
    m.add_function(wrap_pyfunction!(cheb::ffi::filter, m)?)?;
    m.add_function(wrap_pyfunction!(cheb::ffi::der_batch, m)?)?;
    m.add_function(wrap_pyfunction!(cheb::ffi::filter_batch, m)?)?;

    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    Ok(())
}
