//! Geometric shapes and their formulas.
//!
//! `Circle` and `Triangle` are pure formula evaluators. They assume their
//! inputs have already passed [`crate::models::validation`]; in particular,
//! `Triangle::surface` on a degenerate triple produces NaN because Heron's
//! radicand goes negative. The service layer never constructs a shape from
//! unvalidated input.

use std::collections::BTreeMap;
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The shape taxonomy supported by the calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Circle,
    Triangle,
}

impl ShapeKind {
    /// Wire name of the kind, as stored and serialized ("circle"/"triangle").
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::Circle => "circle",
            ShapeKind::Triangle => "triangle",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShapeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "circle" => Ok(ShapeKind::Circle),
            "triangle" => Ok(ShapeKind::Triangle),
            other => Err(format!("Unknown shape type: {}", other)),
        }
    }
}

/// Capability set shared by all shapes: area, perimeter, and the metadata
/// the history store needs to persist a computation.
pub trait Shape: Send + Sync {
    /// Area of the shape.
    fn surface(&self) -> f64;

    /// Perimeter of the shape.
    fn circumference(&self) -> f64;

    /// Which kind of shape this is.
    fn kind(&self) -> ShapeKind;

    /// The defining parameters as a flat name-to-value map, exactly as
    /// submitted (`{radius}` or `{a, b, c}`).
    fn parameters(&self) -> BTreeMap<String, f64>;
}

/// A circle defined by its radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    radius: f64,
}

impl Circle {
    pub fn new(radius: f64) -> Self {
        Self { radius }
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl Shape for Circle {
    fn surface(&self) -> f64 {
        PI * self.radius * self.radius
    }

    fn circumference(&self) -> f64 {
        2.0 * PI * self.radius
    }

    fn kind(&self) -> ShapeKind {
        ShapeKind::Circle
    }

    fn parameters(&self) -> BTreeMap<String, f64> {
        BTreeMap::from([("radius".to_string(), self.radius)])
    }
}

/// A triangle defined by its three side lengths.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    a: f64,
    b: f64,
    c: f64,
}

impl Triangle {
    pub fn new(a: f64, b: f64, c: f64) -> Self {
        Self { a, b, c }
    }

    pub fn sides(&self) -> (f64, f64, f64) {
        (self.a, self.b, self.c)
    }
}

impl Shape for Triangle {
    /// Heron's formula. NaN for a degenerate triple; validation runs first
    /// on every service path.
    fn surface(&self) -> f64 {
        let s = (self.a + self.b + self.c) / 2.0;
        (s * (s - self.a) * (s - self.b) * (s - self.c)).sqrt()
    }

    fn circumference(&self) -> f64 {
        self.a + self.b + self.c
    }

    fn kind(&self) -> ShapeKind {
        ShapeKind::Triangle
    }

    fn parameters(&self) -> BTreeMap<String, f64> {
        BTreeMap::from([
            ("a".to_string(), self.a),
            ("b".to_string(), self.b),
            ("c".to_string(), self.c),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) {
        let scale = a.abs().max(b.abs()).max(1.0);
        assert!(
            (a - b).abs() / scale < 1e-9,
            "expected {} ~ {}",
            a,
            b
        );
    }

    #[test]
    fn circle_formulas() {
        let c = Circle::new(3.0);
        approx_eq(c.surface(), PI * 9.0);
        approx_eq(c.circumference(), 6.0 * PI);
    }

    #[test]
    fn circle_radius_two_surface_equals_circumference() {
        // pi*r^2 == 2*pi*r exactly when r == 2
        let c = Circle::new(2.0);
        approx_eq(c.surface(), 12.566370614359172);
        approx_eq(c.circumference(), 12.566370614359172);
    }

    #[test]
    fn triangle_circumference_is_exact_sum() {
        let t = Triangle::new(3.0, 4.0, 5.0);
        assert_eq!(t.circumference(), 12.0);
    }

    #[test]
    fn right_triangle_surface_matches_half_base_times_height() {
        let t = Triangle::new(3.0, 4.0, 5.0);
        approx_eq(t.surface(), 6.0);
    }

    #[test]
    fn heron_matches_coordinate_geometry() {
        // Triangle with vertices (0,0), (a,0), (px,py): side lengths come
        // from the coordinates, area from the shoelace formula.
        let (ax, ay) = (0.0_f64, 0.0_f64);
        let (bx, by) = (7.0_f64, 0.0_f64);
        let (cx, cy) = (2.5_f64, 4.2_f64);
        let a = ((bx - cx).powi(2) + (by - cy).powi(2)).sqrt();
        let b = ((ax - cx).powi(2) + (ay - cy).powi(2)).sqrt();
        let c = ((ax - bx).powi(2) + (ay - by).powi(2)).sqrt();
        let shoelace = 0.5 * ((bx - ax) * (cy - ay) - (cx - ax) * (by - ay)).abs();

        let t = Triangle::new(a, b, c);
        approx_eq(t.surface(), shoelace);
    }

    #[test]
    fn degenerate_triangle_surface_is_nan() {
        // Formula evaluator performs no defensive check by itself.
        let t = Triangle::new(1.0, 1.0, 3.0);
        assert!(t.surface().is_nan());
    }

    #[test]
    fn shape_kind_round_trip() {
        assert_eq!("circle".parse::<ShapeKind>().unwrap(), ShapeKind::Circle);
        assert_eq!("Triangle".parse::<ShapeKind>().unwrap(), ShapeKind::Triangle);
        assert!("square".parse::<ShapeKind>().is_err());
        assert_eq!(ShapeKind::Circle.to_string(), "circle");
    }

    #[test]
    fn parameters_are_flat_numeric_maps() {
        let c = Circle::new(1.5);
        assert_eq!(c.parameters().get("radius"), Some(&1.5));

        let t = Triangle::new(3.0, 4.0, 5.0);
        let params = t.parameters();
        assert_eq!(params.get("a"), Some(&3.0));
        assert_eq!(params.get("b"), Some(&4.0));
        assert_eq!(params.get("c"), Some(&5.0));
    }
}
