//! Type-I discrete cosine transform backends
//!
//! The engine only sees the [`DctPlan`] trait. Two backends are provided:
//! an FFT-based plan for production use and a direct O(n^2) sum used as a
//! reference in tests.

use num_complex::Complex64;
use rustfft::{Fft, FftPlanner};
use std::f64::consts::PI;
use std::fmt;
use std::sync::Arc;

/// A reusable size-n type-I DCT (REDFT00 convention, unnormalized)
///
/// `process` must compute, for k in 0..n,
///
/// ```text
/// y[k] = x[0] + (-1)^k x[n-1] + 2 * sum_{j=1}^{n-2} x[j] cos(pi j k / (n-1))
/// ```
///
/// Applying it twice multiplies the input by `2(n-1)`.
pub trait DctPlan: Send + Sync + fmt::Debug {
    /// Transform size
    fn len(&self) -> usize;

    /// Write the raw DCT-I of `input` into `output`; both have length `len()`
    fn process(&self, input: &[f64], output: &mut [f64]);
}

/// DCT-I through a complex FFT of the even extension (length 2(n-1))
pub struct FftDct1 {
    n: usize,
    fft: Arc<dyn Fft<f64>>,
}

impl FftDct1 {
    /// Plan a transform of size `n`
    ///
    /// # Panics
    /// If `n < 2`; the even extension needs both endpoints.
    pub fn new(n: usize) -> Self {
        assert!(n >= 2, "DCT-I needs at least 2 points, got {}", n);
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(2 * (n - 1));
        Self { n, fft }
    }
}

impl fmt::Debug for FftDct1 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FftDct1").field("n", &self.n).finish()
    }
}

impl DctPlan for FftDct1 {
    fn len(&self) -> usize {
        self.n
    }

    fn process(&self, input: &[f64], output: &mut [f64]) {
        let n = self.n;
        debug_assert_eq!(input.len(), n);
        debug_assert_eq!(output.len(), n);

        // Even extension: [x0, x1, ..., x_{n-1}, x_{n-2}, ..., x1]
        let m = 2 * (n - 1);
        let mut buffer: Vec<Complex64> = Vec::with_capacity(m);
        buffer.extend(input.iter().map(|&x| Complex64::new(x, 0.0)));
        buffer.extend(input[1..n - 1].iter().rev().map(|&x| Complex64::new(x, 0.0)));

        self.fft.process(&mut buffer);

        // The extension is real and even, so the spectrum is real
        for (out, c) in output.iter_mut().zip(buffer.iter()) {
            *out = c.re;
        }
    }
}

/// Direct evaluation of the DCT-I sum
#[derive(Debug, Clone)]
pub struct NaiveDct1 {
    n: usize,
}

impl NaiveDct1 {
    /// # Panics
    /// If `n < 2`.
    pub fn new(n: usize) -> Self {
        assert!(n >= 2, "DCT-I needs at least 2 points, got {}", n);
        Self { n }
    }
}

impl DctPlan for NaiveDct1 {
    fn len(&self) -> usize {
        self.n
    }

    fn process(&self, input: &[f64], output: &mut [f64]) {
        let n = self.n;
        let step = PI / (n - 1) as f64;

        for (k, out) in output.iter_mut().enumerate() {
            let sign = if k % 2 == 0 { 1.0 } else { -1.0 };
            let mut sum = input[0] + sign * input[n - 1];
            for j in 1..(n - 1) {
                sum += 2.0 * input[j] * (step * (j * k) as f64).cos();
            }
            *out = sum;
        }
    }
}
