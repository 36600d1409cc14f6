//! Synthesized element networks
//!
//! Ideal series/shunt elements, transmission lines and stubs are built from
//! their ABCD matrix at each frequency of an existing grid and converted to S.
//! Lines and stubs have a fixed electrical length (no dispersion).

use ndarray::{Array1, Array2, Array3, Axis};
use num_complex::Complex64;

use super::core::Network;
use crate::frequency::Frequency;
use crate::math::matrix_ops::two_port;
use crate::math::transforms::abcd2s;
use crate::value::ElementValue;

impl Network {
    /// Build a 2-port on `frequency` from its ABCD matrix at each frequency (Hz)
    pub fn from_abcd_fn<F>(frequency: &Frequency, z0: f64, mut abcd: F) -> Network
    where
        F: FnMut(f64) -> Array2<Complex64>,
    {
        let mut s = Array3::<Complex64>::zeros((frequency.npoints(), 2, 2));
        for (mut s_f, &f) in s.axis_iter_mut(Axis(0)).zip(frequency.f()) {
            s_f.assign(&abcd2s(&abcd(f), z0));
        }
        Network::new(frequency.clone(), s, Array1::from_elem(2, Complex64::new(z0, 0.0)))
    }

    /// Build a 2-port whose S-matrix is `s` at every frequency
    pub fn constant(frequency: &Frequency, z0: f64, s: &Array2<Complex64>) -> Network {
        let data = Array3::from_shape_fn((frequency.npoints(), 2, 2), |(_, i, j)| s[[i, j]]);
        Network::new(frequency.clone(), data, Array1::from_elem(2, Complex64::new(z0, 0.0)))
    }

    /// Series element: ABCD [[1, Z], [0, 1]]
    pub fn series_element(frequency: &Frequency, z0: f64, element: &ElementValue) -> Network {
        let (one, zero) = (Complex64::new(1.0, 0.0), Complex64::new(0.0, 0.0));
        Self::from_abcd_fn(frequency, z0, |f| two_port(one, element.impedance_at(f), zero, one))
    }

    /// Shunt element: ABCD [[1, 0], [1/Z, 1]]
    pub fn shunt_element(frequency: &Frequency, z0: f64, element: &ElementValue) -> Network {
        let (one, zero) = (Complex64::new(1.0, 0.0), Complex64::new(0.0, 0.0));
        Self::from_abcd_fn(frequency, z0, |f| {
            two_port(one, zero, one / element.impedance_at(f), one)
        })
    }

    /// Lossless line of impedance `zc` and electrical length `theta_deg`
    pub fn transmission_line(frequency: &Frequency, z0: f64, zc: f64, theta_deg: f64) -> Network {
        let theta = theta_deg.to_radians();
        let (cos, sin) = (Complex64::new(theta.cos(), 0.0), theta.sin());
        let abcd = two_port(
            cos,
            Complex64::new(0.0, zc * sin),
            Complex64::new(0.0, sin / zc),
            cos,
        );
        Self::from_abcd_fn(frequency, z0, |_| abcd.clone())
    }

    /// Open-circuited shunt stub: Y = j tan(theta) / Zc
    pub fn open_stub(frequency: &Frequency, z0: f64, zc: f64, theta_deg: f64) -> Network {
        let y = Complex64::new(0.0, theta_deg.to_radians().tan() / zc);
        Self::shunt_admittance(frequency, z0, y)
    }

    /// Short-circuited shunt stub: Y = -j / (Zc tan(theta))
    pub fn short_stub(frequency: &Frequency, z0: f64, zc: f64, theta_deg: f64) -> Network {
        let y = Complex64::new(0.0, -1.0 / (zc * theta_deg.to_radians().tan()));
        Self::shunt_admittance(frequency, z0, y)
    }

    fn shunt_admittance(frequency: &Frequency, z0: f64, y: Complex64) -> Network {
        let (one, zero) = (Complex64::new(1.0, 0.0), Complex64::new(0.0, 0.0));
        let abcd = two_port(one, zero, y, one);
        Self::from_abcd_fn(frequency, z0, |_| abcd.clone())
    }

    /// Matched pass-through: S = [[0, 1], [1, 0]]
    pub fn thru(frequency: &Frequency, z0: f64) -> Network {
        let (one, zero) = (Complex64::new(1.0, 0.0), Complex64::new(0.0, 0.0));
        Self::constant(frequency, z0, &two_port(zero, one, one, zero))
    }

    /// Matched isolation: S = 0
    pub fn isolator(frequency: &Frequency, z0: f64) -> Network {
        Self::constant(frequency, z0, &Array2::zeros((2, 2)))
    }
}
