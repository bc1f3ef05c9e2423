//! Chebyshev pseudospectral engine
//!
//! Forward/inverse transforms between collocation-point samples and
//! Chebyshev coefficients, the spectral derivative, and the low-pass filter.

use ndarray::{Array1, Array2, ArrayView1, ArrayView2, ArrayViewMut1, Axis, Zip};
use rayon::prelude::*;
use std::sync::Arc;
use tracing::{debug, warn};

use super::dct::{DctPlan, FftDct1};
use super::error::{check_len, ChebError};
use super::grid::{collocation_points, low_pass_mask, GridConfig, MIN_ACCURATE_POINTS};

/// Chebyshev differentiation engine for one grid
///
/// Immutable after construction; share it freely across threads.
#[derive(Debug, Clone)]
pub struct Chebyshev {
    config: GridConfig,
    jacobian: f64,
    pts: Array1<f64>,
    low_pass: Array1<f64>,
    plan: Arc<dyn DctPlan>,
}

impl Chebyshev {
    /// Build an engine with the FFT-backed DCT plan
    pub fn new(n: usize, lower: f64, upper: f64) -> Result<Self, ChebError> {
        let config = GridConfig::new(n, lower, upper)?;
        Self::with_plan(config, Arc::new(FftDct1::new(n)))
    }

    /// Build an engine around an externally supplied DCT plan
    pub fn with_plan(config: GridConfig, plan: Arc<dyn DctPlan>) -> Result<Self, ChebError> {
        config.validate()?;
        if plan.len() != config.n {
            return Err(ChebError::PlanSizeMismatch {
                expected: config.n,
                actual: plan.len(),
            });
        }
        if config.n < MIN_ACCURATE_POINTS {
            warn!(n = config.n, "grid is too small for an accurate derivative");
        }

        let jacobian = config.jacobian();
        debug!(
            n = config.n,
            lower = config.lower,
            upper = config.upper,
            jacobian,
            plan = ?plan,
            "built Chebyshev engine"
        );

        Ok(Self {
            pts: collocation_points(&config),
            low_pass: low_pass_mask(config.n),
            config,
            jacobian,
            plan,
        })
    }

    /// Number of collocation points
    pub fn n(&self) -> usize {
        self.config.n
    }

    /// Lower boundary of the interval
    pub fn lower(&self) -> f64 {
        self.config.lower
    }

    /// Upper boundary of the interval
    pub fn upper(&self) -> f64 {
        self.config.upper
    }

    pub fn jacobian(&self) -> f64 {
        self.jacobian
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Location of the i-th collocation point
    pub fn pt(&self, i: usize) -> Result<f64, ChebError> {
        self.pts
            .get(i)
            .copied()
            .ok_or(ChebError::IndexOutOfRange { index: i, n: self.n() })
    }

    /// All collocation points, upper to lower
    pub fn points(&self) -> ArrayView1<'_, f64> {
        self.pts.view()
    }

    /// Low-pass weights applied by [`Chebyshev::filter`]
    pub fn low_pass(&self) -> ArrayView1<'_, f64> {
        self.low_pass.view()
    }

    /// Run the plan on ndarray views, going through a contiguous copy only
    /// when a view is strided
    fn run_plan(&self, input: &ArrayView1<f64>, output: &mut ArrayViewMut1<f64>) {
        let owned_input;
        let input = match input.as_slice() {
            Some(s) => s,
            None => {
                owned_input = input.to_vec();
                &owned_input
            }
        };
        match output.as_slice_mut() {
            Some(out) => self.plan.process(input, out),
            None => {
                let mut tmp = vec![0.0; self.n()];
                self.plan.process(input, &mut tmp);
                output.assign(&ArrayView1::from(tmp.as_slice()));
            }
        }
    }

    /// Position space to Chebyshev space
    ///
    /// `ch[k]` is the coefficient of T_k in the series through the samples.
    pub fn to_ch(&self, po: &ArrayView1<f64>, ch: &mut ArrayViewMut1<f64>) -> Result<(), ChebError> {
        let n = self.n();
        check_len("po", po.len(), n)?;
        check_len("ch", ch.len(), n)?;

        self.run_plan(po, ch);

        let edge = 2.0 * (n - 1) as f64;
        let interior = (n - 1) as f64;
        ch[0] /= edge;
        ch[n - 1] /= edge;
        ch.slice_mut(ndarray::s![1..n - 1]).mapv_inplace(|c| c / interior);
        Ok(())
    }

    /// Chebyshev space to position space
    ///
    /// The caller's coefficients are left untouched; see
    /// [`Chebyshev::to_po_consume`] for the variant that reuses the buffer.
    pub fn to_po(&self, ch: &ArrayView1<f64>, po: &mut ArrayViewMut1<f64>) -> Result<(), ChebError> {
        check_len("ch", ch.len(), self.n())?;
        check_len("po", po.len(), self.n())?;

        let mut scratch = ch.to_owned();
        self.to_po_scratch(&mut scratch.view_mut(), po);
        Ok(())
    }

    /// Chebyshev space to position space, reusing the coefficient buffer
    pub fn to_po_consume(&self, mut ch: Array1<f64>) -> Result<Array1<f64>, ChebError> {
        check_len("ch", ch.len(), self.n())?;

        let mut po = Array1::zeros(self.n());
        self.to_po_scratch(&mut ch.view_mut(), &mut po.view_mut());
        Ok(po)
    }

    /// Halve the interior coefficients in place, then transform
    fn to_po_scratch(&self, ch: &mut ArrayViewMut1<f64>, po: &mut ArrayViewMut1<f64>) {
        let n = self.n();
        ch.slice_mut(ndarray::s![1..n - 1]).mapv_inplace(|c| c / 2.0);
        self.run_plan(&ch.view(), po);
    }

    /// Derivative over [lower, upper]
    ///
    /// The two highest Chebyshev modes are dropped before the recurrence, so
    /// the result is exact for polynomials of degree <= n-3 and loses accuracy
    /// for functions with significant energy in the top two modes.
    pub fn der(&self, v: &ArrayView1<f64>, dv: &mut ArrayViewMut1<f64>) -> Result<(), ChebError> {
        let n = self.n();
        check_len("v", v.len(), n)?;
        check_len("dv", dv.len(), n)?;

        let mut ch = Array1::zeros(n);
        self.to_ch(v, &mut ch.view_mut())?;

        // start of the derivative recurrence
        ch[n - 1] = 0.0;
        ch[n - 2] = 0.0;

        // dv holds the original coefficients while ch is overwritten top down
        dv.assign(&ch);
        for i in (1..=n - 2).rev() {
            ch[i - 1] = 2.0 * i as f64 * dv[i] + ch[i + 1];
        }
        ch[0] /= 2.0;

        self.to_po_scratch(&mut ch.view_mut(), dv);
        let inv_jacobian = 1.0 / self.jacobian;
        dv.mapv_inplace(|d| d * inv_jacobian);
        Ok(())
    }

    /// Low-pass filter in Chebyshev space, in place
    pub fn filter(&self, v: &mut ArrayViewMut1<f64>) -> Result<(), ChebError> {
        let n = self.n();
        check_len("v", v.len(), n)?;

        let mut ch = Array1::zeros(n);
        self.to_ch(&v.view(), &mut ch.view_mut())?;
        ch.zip_mut_with(&self.low_pass, |c, &m| *c *= m);
        self.to_po_scratch(&mut ch.view_mut(), v);
        Ok(())
    }

    /// Allocating form of [`Chebyshev::to_ch`]
    pub fn forward(&self, po: &ArrayView1<f64>) -> Result<Array1<f64>, ChebError> {
        let mut ch = Array1::zeros(self.n());
        self.to_ch(po, &mut ch.view_mut())?;
        Ok(ch)
    }

    /// Allocating form of [`Chebyshev::to_po`]
    pub fn inverse(&self, ch: &ArrayView1<f64>) -> Result<Array1<f64>, ChebError> {
        self.to_po_consume(ch.to_owned())
    }

    /// Allocating form of [`Chebyshev::der`]
    pub fn derivative(&self, v: &ArrayView1<f64>) -> Result<Array1<f64>, ChebError> {
        let mut dv = Array1::zeros(self.n());
        self.der(v, &mut dv.view_mut())?;
        Ok(dv)
    }

    /// Allocating form of [`Chebyshev::filter`]
    pub fn filtered(&self, v: &ArrayView1<f64>) -> Result<Array1<f64>, ChebError> {
        let mut out = v.to_owned();
        self.filter(&mut out.view_mut())?;
        Ok(out)
    }

    /// Differentiate every row of `rows` (shape (m, n)) in parallel
    pub fn der_batch(&self, rows: &ArrayView2<f64>) -> Result<Array2<f64>, ChebError> {
        check_len("rows", rows.ncols(), self.n())?;

        let mut out = Array2::zeros(rows.raw_dim());
        Zip::from(out.axis_iter_mut(Axis(0)))
            .and(rows.axis_iter(Axis(0)))
            .into_par_iter()
            .try_for_each(|(mut dv, v)| self.der(&v, &mut dv))?;
        Ok(out)
    }

    /// Filter every row of `rows` (shape (m, n)) in parallel
    pub fn filter_batch(&self, rows: &ArrayView2<f64>) -> Result<Array2<f64>, ChebError> {
        check_len("rows", rows.ncols(), self.n())?;

        let mut out = rows.to_owned();
        out.axis_iter_mut(Axis(0))
            .into_par_iter()
            .try_for_each(|mut v| self.filter(&mut v))?;
        Ok(out)
    }

    /// Evaluate the series with coefficients `ch` at a physical point `x`
    ///
    /// Uses Clenshaw's recurrence, so `x` need not be a collocation point.
    pub fn evaluate(&self, ch: &ArrayView1<f64>, x: f64) -> Result<f64, ChebError> {
        check_len("ch", ch.len(), self.n())?;
        if !(x >= self.lower() && x <= self.upper()) {
            return Err(ChebError::OutOfDomain {
                x,
                lower: self.lower(),
                upper: self.upper(),
            });
        }

        let t = self.config.to_canonical(x).clamp(-1.0, 1.0);
        let two_t = 2.0 * t;
        let mut b1 = 0.0;
        let mut b2 = 0.0;
        for &c in ch.iter().skip(1).rev() {
            let tmp = two_t * b1 - b2 + c;
            b2 = b1;
            b1 = tmp;
        }
        Ok(t * b1 - b2 + ch[0])
    }
}
