use std::ops::Index;

use num::Float;

use crate::error::ConfigError;

/// Evenly spaced values between `min` and `max` inclusive, computed the way
/// `numpy.linspace` does.
pub(crate) struct Linspace<F> {
    start: F,
    step: F,
    index: usize,
    len: usize,
}

impl<F: Float> Linspace<F> {
    pub(crate) fn new(min: F, max: F, n: usize) -> Self {
        let step = if n > 1 {
            let num_steps = F::from(n - 1).unwrap_or_else(F::one);
            (max - min) / num_steps
        } else {
            F::zero()
        };
        Linspace {
            start: min,
            step,
            index: 0,
            len: n,
        }
    }
}

impl<F: Float> Iterator for Linspace<F> {
    type Item = F;

    #[inline]
    fn next(&mut self) -> Option<F> {
        if self.index >= self.len {
            None
        } else {
            let i = F::from(self.index)?;
            self.index += 1;
            Some(self.start + self.step * i)
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.len - self.index;
        (n, Some(n))
    }
}

impl<F: Float> ExactSizeIterator for Linspace<F> {}

/// The discretized domain of a linguistic variable.
///
/// Sample points start at `min` and advance by a fixed `step` up to and
/// including the last point not beyond `max`, like `numpy.arange(min, max + step, step)`.
/// Points are strictly increasing and there are at most [`MAX_POINTS`] of them.
#[derive(Clone, Debug, PartialEq)]
pub struct Universe {
    points: Vec<f64>,
    step: f64,
}

// Slack for ranges such as 0.0..=0.3 step 0.1 whose quotient lands just below an integer.
const STEP_EPSILON: f64 = 1e-9;

/// Largest number of sample points a universe may hold.
pub const MAX_POINTS: usize = 1 << 24;

impl Universe {
    pub fn new(min: f64, max: f64, step: f64) -> Result<Self, ConfigError> {
        if !(min.is_finite() && max.is_finite() && step.is_finite()) {
            return Err(ConfigError::InvalidUniverse(format!(
                "bounds and step must be finite, got min={min} max={max} step={step}"
            )));
        }
        if step <= 0. {
            return Err(ConfigError::InvalidUniverse(format!("step must be positive, got {step}")));
        }
        if min > max {
            return Err(ConfigError::InvalidUniverse(format!("min {min} exceeds max {max}")));
        }

        let intervals = ((max - min) / step + STEP_EPSILON).floor();

        if !intervals.is_finite() || intervals >= MAX_POINTS as f64 {
            return Err(ConfigError::InvalidUniverse(format!(
                "min={min} max={max} step={step} needs more than {MAX_POINTS} points"
            )));
        }

        let intervals = intervals as usize;
        let len = intervals
            .checked_add(1)
            .ok_or_else(|| ConfigError::InvalidUniverse(format!("too many points for step {step}")))?;
        let last = min + step * intervals as f64;
        let points: Vec<f64> = Linspace::new(min, last, len).collect();

        if points.windows(2).any(|w| w[0] >= w[1]) {
            return Err(ConfigError::InvalidUniverse(format!(
                "step {step} is too small to separate points between {min} and {max}"
            )));
        }

        Ok(Universe { points, step })
    }

    pub fn points(&self) -> &[f64] {
        &self.points
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn min(&self) -> f64 {
        self.points[0]
    }

    pub fn max(&self) -> f64 {
        self.points[self.points.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false: construction rejects empty universes.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn contains(&self, x: f64) -> bool {
        self.min() <= x && x <= self.max()
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = f64> + '_ {
        self.points.iter().copied()
    }
}

impl Index<usize> for Universe {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.points[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linspace() {
        let values: Vec<f64> = Linspace::new(0., 1., 5).collect();

        assert_eq!(values, vec![0., 0.25, 0.5, 0.75, 1.]);
        assert_eq!(Linspace::new(3f32, 3., 1).collect::<Vec<_>>(), vec![3.]);
        assert_eq!(Linspace::<f64>::new(0., 1., 0).count(), 0);
    }

    #[test]
    fn test_integer_universe() {
        let universe = Universe::new(0., 100., 1.).unwrap();

        assert_eq!(universe.len(), 101);
        assert_eq!(universe.min(), 0.);
        assert_eq!(universe.max(), 100.);
        assert_eq!(universe[42], 42.);
        assert!(universe.points().windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_fractional_step_reaches_end() {
        let universe = Universe::new(0., 0.3, 0.1).unwrap();

        assert_eq!(universe.len(), 4);
        assert!((universe.max() - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_step_not_dividing_range() {
        let universe = Universe::new(0., 10., 3.).unwrap();

        assert_eq!(universe.points(), &[0., 3., 6., 9.]);
        assert!(!universe.contains(10.));
    }

    #[test]
    fn test_single_point_universe() {
        let universe = Universe::new(5., 5., 1.).unwrap();

        assert_eq!(universe.points(), &[5.]);
        assert!(!universe.is_empty());
    }

    #[test]
    fn test_invalid_universe() {
        assert!(matches!(Universe::new(0., 10., 0.), Err(ConfigError::InvalidUniverse(_))));
        assert!(matches!(Universe::new(0., 10., -1.), Err(ConfigError::InvalidUniverse(_))));
        assert!(matches!(Universe::new(10., 0., 1.), Err(ConfigError::InvalidUniverse(_))));
        assert!(matches!(Universe::new(0., f64::NAN, 1.), Err(ConfigError::InvalidUniverse(_))));
    }

    #[test]
    fn test_oversized_universe() {
        assert!(matches!(Universe::new(0., f64::MAX, 1e-300), Err(ConfigError::InvalidUniverse(_))));
        assert!(matches!(Universe::new(0., 1e12, 1.), Err(ConfigError::InvalidUniverse(_))));
        assert!(matches!(Universe::new(-f64::MAX, f64::MAX, 1.), Err(ConfigError::InvalidUniverse(_))));
        assert!(Universe::new(0., MAX_POINTS as f64, 1.).is_err());
        assert_eq!(Universe::new(0., 1e6, 1.).map(|u| u.len()), Ok(1_000_001));
    }

    #[test]
    fn test_step_below_precision() {
        assert!(matches!(Universe::new(1e16, 1e16 + 8., 1.), Err(ConfigError::InvalidUniverse(_))));
        assert!(Universe::new(1e16, 1e16 + 8., 2.).is_ok());
    }
}
