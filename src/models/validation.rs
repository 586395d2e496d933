//! Input well-formedness checks for shape parameters.
//!
//! These predicates are the only gate between raw request input and the
//! formula evaluators. The strict triangle inequality rejects degenerate
//! (collinear) triangles, which would otherwise drive Heron's radicand
//! negative.

/// True iff `x` is strictly positive. NaN is not positive.
pub fn is_positive(x: f64) -> bool {
    x > 0.0
}

/// Strict triangle inequality over three side lengths.
pub fn satisfies_triangle_inequality(a: f64, b: f64, c: f64) -> bool {
    a + b > c && b + c > a && a + c > b
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_accepts_positive_reals() {
        assert!(is_positive(0.001));
        assert!(is_positive(1e9));
    }

    #[test]
    fn positive_rejects_zero_negative_and_nan() {
        assert!(!is_positive(0.0));
        assert!(!is_positive(-1.0));
        assert!(!is_positive(f64::NAN));
    }

    #[test]
    fn inequality_accepts_valid_triangle() {
        assert!(satisfies_triangle_inequality(3.0, 4.0, 5.0));
    }

    #[test]
    fn inequality_rejects_degenerate_triangle() {
        // 1 + 1 == 2: collinear vertices, strictness matters.
        assert!(!satisfies_triangle_inequality(1.0, 1.0, 2.0));
    }

    #[test]
    fn inequality_rejects_impossible_triangle() {
        assert!(!satisfies_triangle_inequality(1.0, 2.0, 10.0));
    }

    #[test]
    fn inequality_is_symmetric_in_all_sides() {
        assert!(!satisfies_triangle_inequality(2.0, 1.0, 1.0));
        assert!(!satisfies_triangle_inequality(1.0, 2.0, 1.0));
    }
}
