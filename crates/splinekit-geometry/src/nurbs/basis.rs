//! Non-vanishing B-spline basis functions (Cox–de Boor).

/// Values of the `degree + 1` basis functions that can be non-zero on knot
/// span `span`, i.e. `N[span - degree]` up to `N[span]`, at parameter `t`.
///
/// `span` must come from [`find_span`](super::knot::find_span) for the same
/// `degree`, `knots` and `t`. Each degree raises the triangle of the previous
/// one in place, so only the local knots `knots[span + 1 - degree..=span + degree]`
/// are read. On a clamped vector the result is non-negative and sums to one.
pub fn basis_functions(degree: usize, knots: &[f64], span: usize, t: f64) -> Vec<f64> {
    let mut values = vec![0.0; degree + 1];
    // distances from t back to and ahead to the surrounding knots
    let mut left = vec![0.0; degree + 1];
    let mut right = vec![0.0; degree + 1];
    values[0] = 1.0;

    for j in 1..=degree {
        left[j] = t - knots[span + 1 - j];
        right[j] = knots[span + j] - t;

        let mut carry = 0.0;
        for r in 0..j {
            let scaled = values[r] / (right[r + 1] + left[j - r]);
            values[r] = carry + right[r + 1] * scaled;
            carry = left[j - r] * scaled;
        }
        values[j] = carry;
    }

    values
}
