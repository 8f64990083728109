//! Membership function shapes.
//!
//! Every shape is defined over the whole real line, not only a universe's
//! sample points, and always yields a degree in `[0, 1]`. NaN belongs to no
//! shape and has degree 0.

use crate::error::ConfigError;
use crate::math::interp_at;
use crate::universe::Universe;

/// Maps a crisp value to a degree of truth.
pub trait Membership {
    fn degree(&self, x: f64) -> f64;

    /// Pairs each universe point with its degree, for aggregation and plotting.
    fn sample(&self, universe: &Universe) -> Vec<(f64, f64)> {
        universe.iter().map(|x| (x, self.degree(x))).collect()
    }
}

fn check_finite(name: &str, params: &[f64]) -> Result<(), ConfigError> {
    if params.iter().all(|p| p.is_finite()) {
        Ok(())
    } else {
        Err(ConfigError::InvalidMembership(format!("{name} parameters must be finite, got {params:?}")))
    }
}

fn check_ordered(name: &str, params: &[f64]) -> Result<(), ConfigError> {
    check_finite(name, params)?;

    if params.windows(2).all(|w| w[0] <= w[1]) {
        Ok(())
    } else {
        Err(ConfigError::InvalidMembership(format!("{name} breakpoints must be non-decreasing, got {params:?}")))
    }
}

/// Triangle rising from `a` to a peak of 1 at `b`, falling back to 0 at `c`.
///
/// `a == b` or `b == c` gives a vertical edge on that side.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangular {
    a: f64,
    b: f64,
    c: f64,
}

impl Triangular {
    pub fn new(a: f64, b: f64, c: f64) -> Result<Self, ConfigError> {
        check_ordered("triangular", &[a, b, c])?;

        Ok(Self { a, b, c })
    }

    pub fn breakpoints(&self) -> (f64, f64, f64) {
        (self.a, self.b, self.c)
    }
}

impl Membership for Triangular {
    fn degree(&self, x: f64) -> f64 {
        let Self { a, b, c } = *self;

        let y = if x.is_nan() || x < a || x > c {
            0.
        } else if x == b {
            1.
        } else if x < b {
            (x - a) / (b - a)
        } else {
            (c - x) / (c - b)
        };

        y.clamp(0., 1.)
    }
}

/// Trapezoid rising over `a..b`, flat at 1 over `b..c`, falling over `c..d`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Trapezoidal {
    a: f64,
    b: f64,
    c: f64,
    d: f64,
}

impl Trapezoidal {
    pub fn new(a: f64, b: f64, c: f64, d: f64) -> Result<Self, ConfigError> {
        check_ordered("trapezoidal", &[a, b, c, d])?;

        Ok(Self { a, b, c, d })
    }
}

impl Membership for Trapezoidal {
    fn degree(&self, x: f64) -> f64 {
        let Self { a, b, c, d } = *self;

        let y = if x.is_nan() || x < a || x > d {
            0.
        } else if b <= x && x <= c {
            1.
        } else if x < b {
            (x - a) / (b - a)
        } else {
            (d - x) / (d - c)
        };

        y.clamp(0., 1.)
    }
}

/// Bell curve centred on `mean` with standard deviation `sigma`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Gaussian {
    mean: f64,
    sigma: f64,
}

impl Gaussian {
    pub fn new(mean: f64, sigma: f64) -> Result<Self, ConfigError> {
        check_finite("gaussian", &[mean, sigma])?;

        if sigma <= 0. {
            return Err(ConfigError::InvalidMembership(format!("gaussian sigma must be positive, got {sigma}")));
        }

        Ok(Self { mean, sigma })
    }
}

impl Membership for Gaussian {
    fn degree(&self, x: f64) -> f64 {
        if x.is_nan() {
            return 0.;
        }

        let z = (x - self.mean) / self.sigma;

        (-0.5 * z * z).exp().clamp(0., 1.)
    }
}

/// Linear interpolation through explicit `(x, degree)` points.
///
/// Outside the first and last points the shape holds the end degree, the same
/// way term coordinates are interpolated over a universe.
#[derive(Clone, Debug, PartialEq)]
pub struct Piecewise {
    points: Vec<(f64, f64)>,
}

impl Piecewise {
    pub fn new(points: impl Into<Vec<(f64, f64)>>) -> Result<Self, ConfigError> {
        let points = points.into();

        if points.is_empty() {
            return Err(ConfigError::InvalidMembership("piecewise shape needs at least one point".into()));
        }

        let xs: Vec<f64> = points.iter().map(|(x, _)| *x).collect();

        check_ordered("piecewise", &xs)?;

        if let Some((_, y)) = points.iter().find(|(_, y)| !(0. ..=1.).contains(y)) {
            return Err(ConfigError::InvalidMembership(format!("piecewise degree {y} is outside [0, 1]")));
        }

        Ok(Self { points })
    }
}

impl Membership for Piecewise {
    fn degree(&self, x: f64) -> f64 {
        if x.is_nan() {
            return 0.;
        }

        interp_at(x, &self.points).clamp(0., 1.)
    }
}

/// The closed set of shapes a term can take.
#[derive(Clone, Debug, PartialEq)]
pub enum MembershipFunction {
    Triangular(Triangular),
    Trapezoidal(Trapezoidal),
    Gaussian(Gaussian),
    Piecewise(Piecewise),
}

impl MembershipFunction {
    pub fn triangular(a: f64, b: f64, c: f64) -> Result<Self, ConfigError> {
        Triangular::new(a, b, c).map(Self::Triangular)
    }

    pub fn trapezoidal(a: f64, b: f64, c: f64, d: f64) -> Result<Self, ConfigError> {
        Trapezoidal::new(a, b, c, d).map(Self::Trapezoidal)
    }

    pub fn gaussian(mean: f64, sigma: f64) -> Result<Self, ConfigError> {
        Gaussian::new(mean, sigma).map(Self::Gaussian)
    }

    pub fn piecewise(points: impl Into<Vec<(f64, f64)>>) -> Result<Self, ConfigError> {
        Piecewise::new(points).map(Self::Piecewise)
    }
}

impl Membership for MembershipFunction {
    fn degree(&self, x: f64) -> f64 {
        match self {
            Self::Triangular(mf) => mf.degree(x),
            Self::Trapezoidal(mf) => mf.degree(x),
            Self::Gaussian(mf) => mf.degree(x),
            Self::Piecewise(mf) => mf.degree(x),
        }
    }
}

impl From<Triangular> for MembershipFunction {
    fn from(mf: Triangular) -> Self {
        Self::Triangular(mf)
    }
}

impl From<Trapezoidal> for MembershipFunction {
    fn from(mf: Trapezoidal) -> Self {
        Self::Trapezoidal(mf)
    }
}

impl From<Gaussian> for MembershipFunction {
    fn from(mf: Gaussian) -> Self {
        Self::Gaussian(mf)
    }
}

impl From<Piecewise> for MembershipFunction {
    fn from(mf: Piecewise) -> Self {
        Self::Piecewise(mf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_triangular_breakpoints() {
        let shapes = [(0., 5., 10.), (30., 50., 70.), (0.5, 1., 1.5), (-4., -1., 0.)];

        for (a, b, c) in shapes {
            let mf = Triangular::new(a, b, c).unwrap();

            assert_eq!(mf.degree(a), 0.);
            assert_eq!(mf.degree(b), 1.);
            assert_eq!(mf.degree(c), 0.);
            assert_eq!(mf.degree(a - 1.), 0.);
            assert_eq!(mf.degree(c + 1.), 0.);
        }
    }

    #[test]
    fn test_triangular_vertical_edges() {
        let left = Triangular::new(0., 0., 50.).unwrap();
        let right = Triangular::new(50., 100., 100.).unwrap();

        assert_eq!(left.degree(0.), 1.);
        assert_eq!(left.degree(10.), 0.8);
        assert_eq!(left.degree(-0.1), 0.);
        assert_eq!(right.degree(100.), 1.);
        assert_eq!(right.degree(80.), 0.6);
        assert_eq!(right.degree(100.1), 0.);

        let spike = Triangular::new(3., 3., 3.).unwrap();

        assert_eq!(spike.degree(3.), 1.);
        assert_eq!(spike.degree(3.001), 0.);
    }

    #[test]
    fn test_triangular_monotonic_sides() {
        let mf = Triangular::new(15., 25., 35.).unwrap();
        let rising: Vec<f64> = (0..=100).map(|i| mf.degree(15. + i as f64 * 0.1)).collect();
        let falling: Vec<f64> = (0..=100).map(|i| mf.degree(25. + i as f64 * 0.1)).collect();

        assert!(rising.windows(2).all(|w| w[0] <= w[1]));
        assert!(falling.windows(2).all(|w| w[0] >= w[1]));
        assert!(rising.iter().chain(&falling).all(|y| (0. ..=1.).contains(y)));
    }

    #[test]
    fn test_triangular_between_samples() {
        let mf = Triangular::new(0., 0., 1.).unwrap();

        assert_eq!(mf.degree(0.25), 0.75);
        assert_eq!(mf.degree(0.7), 1. - 0.7);
    }

    #[test]
    fn test_malformed_triangular() {
        assert!(matches!(Triangular::new(5., 1., 10.), Err(ConfigError::InvalidMembership(_))));
        assert!(matches!(Triangular::new(0., 10., 5.), Err(ConfigError::InvalidMembership(_))));
        assert!(matches!(Triangular::new(0., f64::NAN, 5.), Err(ConfigError::InvalidMembership(_))));
    }

    #[test]
    fn test_trapezoidal() {
        let mf = Trapezoidal::new(0., 10., 20., 40.).unwrap();

        assert_eq!(mf.degree(0.), 0.);
        assert_eq!(mf.degree(5.), 0.5);
        assert_eq!(mf.degree(15.), 1.);
        assert_eq!(mf.degree(30.), 0.5);
        assert_eq!(mf.degree(41.), 0.);
        assert!(Trapezoidal::new(0., 10., 5., 40.).is_err());
    }

    #[test]
    fn test_gaussian() {
        let mf = Gaussian::new(20., 5.).unwrap();

        assert_eq!(mf.degree(20.), 1.);
        assert!((mf.degree(25.) - (-0.5f64).exp()).abs() < 1e-12);
        assert_eq!(mf.degree(15.), mf.degree(25.));
        assert!(Gaussian::new(0., 0.).is_err());
    }

    #[test]
    fn test_piecewise() {
        let mf = Piecewise::new([(175., 0.), (180., 0.2), (185., 0.7), (190., 1.)]).unwrap();

        assert_eq!(mf.degree(150.), 0.);
        assert!((mf.degree(182.5) - 0.45).abs() < 1e-12);
        assert_eq!(mf.degree(200.), 1.);
        assert!(Piecewise::new([(1., 0.), (0., 1.)]).is_err());
        assert!(Piecewise::new([(0., 1.5)]).is_err());
        assert!(Piecewise::new(Vec::<(f64, f64)>::new()).is_err());
    }

    #[test]
    fn test_non_finite_input() {
        let shapes = [
            MembershipFunction::triangular(0., 0., 50.).unwrap(),
            MembershipFunction::trapezoidal(0., 10., 20., 40.).unwrap(),
            MembershipFunction::gaussian(20., 5.).unwrap(),
            MembershipFunction::piecewise([(0., 1.), (10., 0.)]).unwrap(),
        ];

        for mf in &shapes {
            assert_eq!(mf.degree(f64::NAN), 0.);
            assert!((0. ..=1.).contains(&mf.degree(f64::INFINITY)));
            assert!((0. ..=1.).contains(&mf.degree(f64::NEG_INFINITY)));
        }

        assert_eq!(shapes[0].degree(f64::INFINITY), 0.);
        assert_eq!(shapes[2].degree(f64::NEG_INFINITY), 0.);
    }

    #[test]
    fn test_sample_over_universe() {
        let universe = Universe::new(0., 4., 1.).unwrap();
        let mf = MembershipFunction::triangular(0., 2., 4.).unwrap();

        assert_eq!(
            mf.sample(&universe),
            vec![(0., 0.), (1., 0.5), (2., 1.), (3., 0.5), (4., 0.)]
        );
    }
}
