//! End-to-end checks of the public Chebyshev API

use approx::assert_relative_eq;
use cheb_spectral::{ChebError, ChebSession, Chebyshev, GridConfig, NaiveDct1};
use ndarray::{Array1, Array2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

fn max_abs(v: &Array1<f64>) -> f64 {
    v.iter().fold(0.0f64, |m, x| m.max(x.abs()))
}

#[test]
fn round_trip_random_samples() {
    let mut rng = StdRng::seed_from_u64(42);

    for &n in &[3usize, 4, 7, 16, 33, 100] {
        let cheb = Chebyshev::new(n, -1.5, 2.5).unwrap();
        let v: Array1<f64> = (0..n).map(|_| rng.gen_range(-10.0..10.0)).collect();

        let ch = cheb.forward(&v.view()).unwrap();
        let back = cheb.inverse(&ch.view()).unwrap();

        for i in 0..n {
            assert_relative_eq!(back[i], v[i], epsilon = 1e-10, max_relative = 1e-10);
        }
    }
}

#[test]
fn points_run_from_upper_to_lower() {
    let cheb = Chebyshev::new(21, 0.5, 7.0).unwrap();

    assert_eq!(cheb.pt(0).unwrap(), 7.0);
    assert_eq!(cheb.pt(20).unwrap(), 0.5);
    for i in 1..21 {
        assert!(cheb.pt(i).unwrap() < cheb.pt(i - 1).unwrap());
    }
    assert!(matches!(cheb.pt(21), Err(ChebError::IndexOutOfRange { index: 21, n: 21 })));
}

#[test]
fn derivative_of_square_is_exact() {
    let cheb = Chebyshev::new(17, -1.0, 1.0).unwrap();
    let v = cheb.points().mapv(|x| x * x);
    let mut dv = Array1::zeros(17);
    cheb.der(&v.view(), &mut dv.view_mut()).unwrap();

    for i in 0..17 {
        assert!((dv[i] - 2.0 * cheb.pt(i).unwrap()).abs() < 1e-8);
    }
}

#[test]
fn derivative_scales_with_interval() {
    // identical samples, interval twice as wide: derivative halves
    let unit = Chebyshev::new(17, -1.0, 1.0).unwrap();
    let wide = Chebyshev::new(17, 0.0, 4.0).unwrap();
    let v = unit.points().mapv(|t| t.powi(3) + 0.5 * t);

    let d_unit = unit.derivative(&v.view()).unwrap();
    let d_wide = wide.derivative(&v.view()).unwrap();

    let ratio = wide.jacobian() / unit.jacobian();
    assert_relative_eq!(ratio, 2.0);
    for i in 0..17 {
        assert_relative_eq!(d_wide[i] * ratio, d_unit[i], epsilon = 1e-10);
    }
}

#[test]
fn filter_keeps_constants_and_kills_top_modes() {
    let n = 33;
    let cheb = Chebyshev::new(n, -1.0, 1.0).unwrap();

    let mut constant = Array1::from_elem(n, -3.0);
    cheb.filter(&mut constant.view_mut()).unwrap();
    for &x in constant.iter() {
        assert_relative_eq!(x, -3.0, epsilon = 1e-12);
    }

    for mode in [n - 1, n - 2] {
        // T_mode at the collocation points is cos(pi * j * mode / (n-1))
        let v: Array1<f64> = (0..n)
            .map(|j| (std::f64::consts::PI * (j * mode) as f64 / (n - 1) as f64).cos())
            .collect();
        let out = cheb.filtered(&v.view()).unwrap();
        assert!(max_abs(&out) * 10.0 <= max_abs(&v), "mode {} not attenuated", mode);
    }
}

#[test]
fn repeated_filtering_keeps_attenuating() {
    let n = 33;
    let cheb = Chebyshev::new(n, -1.0, 1.0).unwrap();
    // energy in a mid-high mode where the mask is between 0 and 1
    let mode = 28;
    let v: Array1<f64> = (0..n)
        .map(|j| (std::f64::consts::PI * (j * mode) as f64 / (n - 1) as f64).cos())
        .collect();

    let once = cheb.filtered(&v.view()).unwrap();
    let twice = cheb.filtered(&once.view()).unwrap();
    assert!(max_abs(&twice) < max_abs(&once));
}

#[test]
fn boundary_rejection() {
    assert_eq!(Chebyshev::new(2, 0.0, 1.0).unwrap_err(), ChebError::InvalidGridSize { n: 2 });
    assert!(matches!(
        Chebyshev::new(9, 1.0, 0.0),
        Err(ChebError::InvalidInterval { .. })
    ));
}

#[test]
fn reference_backend_reproduces_results() {
    let config = GridConfig::new(25, -2.0, 2.0).unwrap();
    let fast = Chebyshev::new(25, -2.0, 2.0).unwrap();
    let slow = Chebyshev::with_plan(config, Arc::new(NaiveDct1::new(25))).unwrap();
    let v = fast.points().mapv(|x| (x * x).cos());

    let a = fast.filtered(&v.view()).unwrap();
    let b = slow.filtered(&v.view()).unwrap();
    for i in 0..25 {
        assert_relative_eq!(a[i], b[i], epsilon = 1e-10);
    }
}

#[test]
fn session_drives_the_engine() {
    let mut session = ChebSession::new();
    assert!(matches!(session.engine(), Err(ChebError::NotInitialized)));

    session.initialize(17, -1.0, 1.0).unwrap();
    let engine = session.engine().unwrap();
    let rows = Array2::from_shape_fn((3, 17), |(r, i)| engine.points()[i].powi(r as i32 + 2));
    let d = engine.der_batch(&rows.view()).unwrap();
    for i in 0..17 {
        let x = engine.points()[i];
        assert!((d[[0, i]] - 2.0 * x).abs() < 1e-8);
        assert!((d[[2, i]] - 4.0 * x.powi(3)).abs() < 1e-8);
    }

    session.teardown().unwrap();
    assert_eq!(session.teardown(), Err(ChebError::NotInitialized));
}
