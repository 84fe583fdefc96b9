//! Least squares via the normal equations.

use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

/// Pivots smaller than this fraction of the largest Gram entry are treated
/// as zero.
const RELATIVE_PIVOT_TOLERANCE: f64 = 1e-10;

/// Solves `min ||x b - y||` for `b`.
///
/// Rank-deficient systems resolve each free coefficient to zero, so an
/// all-zero design yields the zero vector instead of an error.
pub(crate) fn least_squares(x: ArrayView2<'_, f64>, y: ArrayView1<'_, f64>) -> Array1<f64> {
    let gram = x.t().dot(&x);
    let moment = x.t().dot(&y);
    solve_reduced(gram, moment)
}

/// Gauss-Jordan elimination with partial pivoting.
fn solve_reduced(mut a: Array2<f64>, mut b: Array1<f64>) -> Array1<f64> {
    let n = b.len();
    let scale = a.iter().fold(0.0_f64, |m, v| m.max(v.abs())).max(1.0);
    let tolerance = scale * RELATIVE_PIVOT_TOLERANCE;

    let mut pivots = Vec::with_capacity(n);
    let mut row = 0;
    for col in 0..n {
        if row == n {
            break;
        }
        let (best, magnitude) = (row..n)
            .map(|r| (r, a[[r, col]].abs()))
            .fold((row, -1.0), |acc, cand| if cand.1 > acc.1 { cand } else { acc });
        if magnitude < tolerance {
            continue;
        }
        if best != row {
            for k in 0..n {
                a.swap([row, k], [best, k]);
            }
            b.swap(row, best);
        }

        let pivot = a[[row, col]];
        for k in 0..n {
            a[[row, k]] /= pivot;
        }
        b[row] /= pivot;

        for r in 0..n {
            if r == row {
                continue;
            }
            let factor = a[[r, col]];
            if factor == 0.0 {
                continue;
            }
            for k in 0..n {
                a[[r, k]] -= factor * a[[row, k]];
            }
            b[r] -= factor * b[row];
        }

        pivots.push((row, col));
        row += 1;
    }

    let mut solution = Array1::zeros(n);
    for (r, c) in pivots {
        solution[c] = b[r];
    }
    solution
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_exact_system() {
        // y = 2a - b
        let x = array![[1.0, 0.0], [0.0, 1.0], [1.0, 1.0], [2.0, 1.0]];
        let y = array![2.0, -1.0, 1.0, 3.0];
        let b = least_squares(x.view(), y.view());
        assert_relative_eq!(b[0], 2.0, epsilon = 1e-9);
        assert_relative_eq!(b[1], -1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_collinear_column_resolves_to_zero() {
        // second column duplicates the first
        let x = array![[1.0, 1.0], [2.0, 2.0], [3.0, 3.0]];
        let y = array![2.0, 4.0, 6.0];
        let b = least_squares(x.view(), y.view());
        assert_relative_eq!(b[0], 2.0, epsilon = 1e-9);
        assert_relative_eq!(b[1], 0.0);
        let fitted = x.dot(&b);
        for (f, t) in fitted.iter().zip(y.iter()) {
            assert_relative_eq!(*f, *t, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_zero_design() {
        let x = Array2::<f64>::zeros((1, 3));
        let y = array![5.0];
        assert_eq!(least_squares(x.view(), y.view()).to_vec(), vec![0.0; 3]);
    }
}
