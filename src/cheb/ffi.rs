//! Python FFI bindings
//!
//! Procedural API over one process-wide session. The mutex serializes every
//! call, so the module is safe to use from several Python threads.

use numpy::{IntoPyArray, PyArray2, PyReadonlyArray1, PyReadonlyArray2, PyReadwriteArray1};
use parking_lot::{const_mutex, Mutex};
use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use pyo3::Bound;

use super::error::ChebError;
use super::session::ChebSession;

static SESSION: Mutex<ChebSession> = const_mutex(ChebSession::new());

// numpy must hand out views of the same ndarray the engine takes;
// a version split between the two stops this line from compiling
const _: fn(numpy::ndarray::ArrayView1<'static, f64>) -> ndarray::ArrayView1<'static, f64> = |v| v;

fn to_py_err(e: ChebError) -> PyErr {
    if e.is_state_error() {
        PyRuntimeError::new_err(format!("Chebyshev error: {}", e))
    } else {
        PyValueError::new_err(format!("Chebyshev error: {}", e))
    }
}

/// Initialize the grid of `n` Chebyshev points over [lower, upper]
///
/// # Arguments
/// * `n` - Number of collocation points (n >= 3)
/// * `lower` - Lower boundary of the domain
/// * `upper` - Upper boundary of the domain (upper > lower)
///
/// Raises `RuntimeError` if already initialized, `ValueError` on a bad grid.
#[pyfunction]
pub fn init(n: usize, lower: f64, upper: f64) -> PyResult<()> {
    SESSION.lock().initialize(n, lower, upper).map_err(to_py_err)
}

/// Free the grid and the transform plan
///
/// Raises `RuntimeError` if `init` has not been called.
#[pyfunction]
pub fn cleanup() -> PyResult<()> {
    SESSION.lock().teardown().map_err(to_py_err)
}

/// Number of Chebyshev collocation points
#[pyfunction]
pub fn n() -> PyResult<usize> {
    let session = SESSION.lock();
    Ok(session.engine().map_err(to_py_err)?.n())
}

/// Lower boundary of the domain
#[pyfunction]
pub fn lower() -> PyResult<f64> {
    let session = SESSION.lock();
    Ok(session.engine().map_err(to_py_err)?.lower())
}

/// Upper boundary of the domain
#[pyfunction]
pub fn upper() -> PyResult<f64> {
    let session = SESSION.lock();
    Ok(session.engine().map_err(to_py_err)?.upper())
}

/// Location of the i-th Chebyshev point
///
/// # Arguments
/// * `i` - Point index, 0 <= i < n (point 0 is `upper`)
///
/// # Returns
/// The physical coordinate of the point
#[pyfunction]
pub fn pt(i: usize) -> PyResult<f64> {
    let session = SESSION.lock();
    session.engine().and_then(|e| e.pt(i)).map_err(to_py_err)
}

/// Position space to Chebyshev space
///
/// # Arguments
/// * `po` - Samples at the collocation points, length n (read only)
/// * `ch` - Output buffer, length n, fully overwritten with the
///   Chebyshev coefficients (`ch[k]` multiplies T_k)
///
/// # Returns
/// None; the result is written into `ch`
#[pyfunction]
pub fn to_ch(po: PyReadonlyArray1<f64>, mut ch: PyReadwriteArray1<f64>) -> PyResult<()> {
    let session = SESSION.lock();
    let engine = session.engine().map_err(to_py_err)?;
    engine
        .to_ch(&po.as_array(), &mut ch.as_array_mut())
        .map_err(to_py_err)
}

/// Chebyshev space to position space
///
/// # Arguments
/// * `ch` - Chebyshev coefficients, length n; left unmodified
/// * `po` - Output buffer, length n, fully overwritten with the values
///   at the collocation points
///
/// # Returns
/// None; the result is written into `po`
#[pyfunction]
pub fn to_po(ch: PyReadonlyArray1<f64>, mut po: PyReadwriteArray1<f64>) -> PyResult<()> {
    let session = SESSION.lock();
    let engine = session.engine().map_err(to_py_err)?;
    engine
        .to_po(&ch.as_array(), &mut po.as_array_mut())
        .map_err(to_py_err)
}

/// Derivative over [lower, upper]
///
/// The two highest Chebyshev modes are dropped, so the result is exact
/// only for polynomials of degree <= n-3.
///
/// # Arguments
/// * `v` - Samples at the collocation points, length n (read only)
/// * `dv` - Output buffer, length n, fully overwritten with the derivative;
///   must not be the same array as `v`
///
/// # Returns
/// None; the result is written into `dv`
#[pyfunction]
pub fn der(v: PyReadonlyArray1<f64>, mut dv: PyReadwriteArray1<f64>) -> PyResult<()> {
    let session = SESSION.lock();
    let engine = session.engine().map_err(to_py_err)?;
    engine
        .der(&v.as_array(), &mut dv.as_array_mut())
        .map_err(to_py_err)
}

/// Low-pass filter in Chebyshev space
///
/// # Arguments
/// * `v` - Samples at the collocation points, length n; overwritten in
///   place with the filtered samples
///
/// # Returns
/// None; `v` holds the result
#[pyfunction]
pub fn filter(mut v: PyReadwriteArray1<f64>) -> PyResult<()> {
    let session = SESSION.lock();
    let engine = session.engine().map_err(to_py_err)?;
    engine.filter(&mut v.as_array_mut()).map_err(to_py_err)
}

/// Derivative of many sampled functions (Rayon parallel)
///
/// # Arguments
/// * `rows` - (m, n) array, each row sampled at the collocation points
///
/// # Returns
/// New (m, n) array of derivatives; `rows` is not modified
#[pyfunction]
pub fn der_batch<'py>(
    py: Python<'py>,
    rows: PyReadonlyArray2<f64>,
) -> PyResult<Bound<'py, PyArray2<f64>>> {
    let rows_owned = rows.as_array().to_owned();

    // release the GIL while rayon works
    let result = py.detach(|| {
        let session = SESSION.lock();
        session
            .engine()
            .and_then(|e| e.der_batch(&rows_owned.view()))
    });

    Ok(result.map_err(to_py_err)?.into_pyarray(py))
}

/// Low-pass filter of many sampled functions (Rayon parallel)
///
/// # Arguments
/// * `rows` - (m, n) array, each row sampled at the collocation points
///
/// # Returns
/// New (m, n) array of filtered rows; `rows` is not modified
#[pyfunction]
pub fn filter_batch<'py>(
    py: Python<'py>,
    rows: PyReadonlyArray2<f64>,
) -> PyResult<Bound<'py, PyArray2<f64>>> {
    let rows_owned = rows.as_array().to_owned();

    let result = py.detach(|| {
        let session = SESSION.lock();
        session
            .engine()
            .and_then(|e| e.filter_batch(&rows_owned.view()))
    });

    Ok(result.map_err(to_py_err)?.into_pyarray(py))
}
