use num::Float;

/// Linear interpolation of `x` over sorted `(xp, fp)` coordinates, like
/// `numpy.interp`: values left of the first point take its `fp`, values right
/// of the last point take the last `fp`.
pub(crate) fn interp_at<F: Float>(x: F, coords: &[(F, F)]) -> F {
    let Some(&(first_x, first_y)) = coords.first() else {
        return F::zero();
    };

    if x <= first_x {
        return first_y;
    }

    for window in coords.windows(2) {
        let (x1, y1) = window[0];
        let (x2, y2) = window[1];

        if x1 <= x && x <= x2 {
            if x2 == x1 {
                return y2;
            }
            return y1 + (x - x1) * (y2 - y1) / (x2 - x1);
        }
    }

    coords[coords.len() - 1].1
}

#[cfg(test)]
fn interp<F: Float>(x_input: impl IntoIterator<Item = F>, coords: &[(F, F)]) -> Vec<F> {
    x_input.into_iter().map(|x| interp_at(x, coords)).collect()
}

#[test]
fn test_interp() {
    let x = [0., 1., 1.5, 2.72, 3.24];
    let coords = [(1., 3.), (2., 2.), (3., 0.)];

    assert_eq!(interp(x, &coords), vec![3., 3., 2.5, 0.5599999999999996, 0.]);

    let x = [2.5, -1., 7.5];
    let coords = [(0., 0.), (1., 2.), (2., 5.), (3., 3.), (4.5, 2.)];

    assert_eq!(interp(x, &coords), vec![4., 0., 2.]);
}

#[test]
fn test_interp_degenerate() {
    assert_eq!(interp_at::<f64>(1., &[]), 0.);
    assert_eq!(interp_at(7., &[(2., 0.25)]), 0.25);
    // the first segment containing x wins at a vertical edge
    assert_eq!(interp_at(1., &[(0., 0.), (1., 0.), (1., 1.), (2., 1.)]), 0.);
}
