//! Reduction of an aggregated fuzzy set to one crisp value.

use std::fmt;

use crate::error::DefuzzError;
use crate::math::interp_at;
use crate::universe::Universe;

/// A defuzzification strategy, selected per consequent variable.
///
/// `aggregated[i]` is the degree at `universe[i]`. Implementations must fail
/// with [`DefuzzError`] rather than divide by zero when the set is empty, and
/// rather than truncate when the lengths disagree.
pub trait Defuzzify: fmt::Debug + Send + Sync {
    fn reduce(&self, aggregated: &[f64], universe: &Universe) -> Result<f64, DefuzzError>;
}

/// Method for defuzzifcating the resulting membership function.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Defuzzifier {
    /// Center of gravity over the sample points: `Σ x·μ(x) / Σ μ(x)`
    #[default]
    Centroid,
    /// Center of gravity of the piecewise-linear area under the set
    AreaCentroid,
    /// Bisector of area
    Bisector,
    /// Mean of the values for which the membership function is maximum
    MeanOfMaximum,
    /// Smallest value for which the membership function is maximum
    SmallestOfMaximum,
    /// Largest value for which the membership function is maximum
    LargestOfMaximum,
}

/// Centroid defuzzification.
pub fn defuzzify(aggregated: &[f64], universe: &Universe) -> Result<f64, DefuzzError> {
    Defuzzifier::Centroid.reduce(aggregated, universe)
}

impl Defuzzify for Defuzzifier {
    fn reduce(&self, aggregated: &[f64], universe: &Universe) -> Result<f64, DefuzzError> {
        let points = universe.points();

        if aggregated.len() != points.len() {
            return Err(DefuzzError::LengthMismatch {
                degrees: aggregated.len(),
                points: points.len(),
            });
        }

        let maximum = aggregated.iter().copied().fold(0., f64::max);

        if maximum <= 0. {
            return Err(DefuzzError::EmptySet);
        }

        if points.len() < 2 {
            return Ok(points[0]);
        }

        match self {
            Self::Centroid => Ok(centroid(points, aggregated)),
            Self::AreaCentroid => Ok(area_centroid(points, aggregated).unwrap_or_else(|| centroid(points, aggregated))),
            Self::Bisector => Ok(bisector(points, aggregated).unwrap_or_else(|| centroid(points, aggregated))),
            Self::MeanOfMaximum => {
                let (len, sum) = maxima(points, aggregated, maximum).fold((0usize, 0.), |(len, sum), x| (len + 1, sum + x));

                Ok(sum / len as f64)
            },
            Self::SmallestOfMaximum => Ok(maxima(points, aggregated, maximum).fold(f64::INFINITY, f64::min)),
            Self::LargestOfMaximum => Ok(maxima(points, aggregated, maximum).fold(f64::NEG_INFINITY, f64::max)),
        }
    }
}

fn maxima<'a>(points: &'a [f64], aggregated: &'a [f64], maximum: f64) -> impl Iterator<Item = f64> + 'a {
    points
        .iter()
        .copied()
        .zip(aggregated.iter().copied())
        .filter_map(move |(x, m)| if m == maximum { Some(x) } else { None })
}

fn centroid(points: &[f64], aggregated: &[f64]) -> f64 {
    let (num, den) = points
        .iter()
        .zip(aggregated)
        .fold((0., 0.), |(num, den), (x, m)| (num + x * m, den + m));

    num / den
}

// Splits each interval into a rectangle and a triangle and weights their
// centroids by area. `None` when the area is zero.
fn area_centroid(points: &[f64], aggregated: &[f64]) -> Option<f64> {
    let mut num = 0.;
    let mut den = 0.;

    for i in 0..points.len() - 1 {
        let (lo, hi) = (aggregated[i], aggregated[i + 1]);
        let base = points[i + 1] - points[i];
        let area_rect = lo.min(hi) * base;
        let center_rect = points[i] + base / 2.;
        let area_tria = base * (hi - lo).abs() / 2.;
        let center_tria = if hi > lo {
            points[i] + 2. / 3. * base
        } else {
            points[i] + 1. / 3. * base
        };

        num += area_rect * center_rect + area_tria * center_tria;
        den += area_rect + area_tria;
    }

    (den > 0.).then(|| num / den)
}

// The point splitting the trapezoidal area in half, interpolated inside the
// interval where the running area crosses the midpoint.
fn bisector(points: &[f64], aggregated: &[f64]) -> Option<f64> {
    let areas: Vec<f64> = points
        .windows(2)
        .zip(aggregated.windows(2))
        .map(|(x, m)| (m[0] + m[1]) * (x[1] - x[0]) / 2.)
        .collect();
    let total_area: f64 = areas.iter().sum();

    if total_area <= 0. {
        return None;
    }

    let target = total_area / 2.;
    let mut cum_area = 0.;

    for (i, area) in areas.iter().enumerate() {
        cum_area += area;

        if cum_area >= target {
            let coords = [(cum_area - area, points[i]), (cum_area, points[i + 1])];

            return Some(interp_at(target, &coords));
        }
    }

    points.last().copied()
}
