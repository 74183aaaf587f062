use glam::DVec2;
use std::fmt;
use thiserror::Error;

use crate::model::IpePolygon;

/// Width of the playing field a level is scaled into
pub const LEVEL_WIDTH: f64 = 10.0;
/// Height of the playing field a level is scaled into
pub const LEVEL_HEIGHT: f64 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
        }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum NormalizeError {
    #[error("The polygon has no vertices")]
    Empty,
    #[error("All vertices share the same {axis} coordinate, the polygon can't be scaled")]
    DegenerateBounds { axis: Axis },
}

/// Axis aligned bounding box of a set of points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: DVec2,
    pub max: DVec2,
}

impl Bounds {
    /// Bounds of `points` in a single pass, `None` if there are no points.
    pub fn of<'a>(points: impl IntoIterator<Item = &'a DVec2>) -> Option<Self> {
        let mut points = points.into_iter().peekable();
        points.peek()?;

        let (mut min, mut max) = (DVec2::splat(f64::INFINITY), DVec2::splat(f64::NEG_INFINITY));
        for point in points {
            min = min.min(*point);
            max = max.max(*point);
        }
        Some(Self { min, max })
    }

    pub fn size(&self) -> DVec2 {
        self.max - self.min
    }
}

/// A level ready to be entered: the vertex count and the vertices scaled into
/// the playing field, in counter-clockwise order.
#[derive(Debug, Clone, PartialEq)]
pub struct Level {
    pub count: usize,
    pub vertices: Vec<DVec2>,
}

/*
Assumptions:
- the polygon was drawn clockwise, the game wants it counter-clockwise
- the polygon is stretched to fill the whole field on both axes
*/
pub fn normalize(polygon: &IpePolygon) -> Result<Level, NormalizeError> {
    let bounds = Bounds::of(polygon.vertices()).ok_or(NormalizeError::Empty)?;
    let size = bounds.size();
    // also rejects NaN sizes
    if !(size.x > 0.0) {
        return Err(NormalizeError::DegenerateBounds { axis: Axis::X });
    }
    if !(size.y > 0.0) {
        return Err(NormalizeError::DegenerateBounds { axis: Axis::Y });
    }

    let vertices = polygon
        .vertices()
        .iter()
        .rev()
        .map(|v| {
            DVec2::new(
                (v.x - bounds.min.x) * LEVEL_WIDTH / size.x - LEVEL_WIDTH / 2.0,
                (v.y - bounds.min.y) * LEVEL_HEIGHT / size.y - LEVEL_HEIGHT / 2.0,
            )
        })
        .collect();

    Ok(Level {
        count: polygon.len(),
        vertices,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn polygon(points: &[(f64, f64)]) -> IpePolygon {
        IpePolygon::new(points.iter().map(|&(x, y)| DVec2::new(x, y)).collect())
    }

    #[test]
    fn test_bounds() {
        let points = [
            DVec2::new(3., -1.),
            DVec2::new(-2., 4.),
            DVec2::new(7., 0.5),
        ];
        assert_eq!(
            Bounds::of(&points),
            Some(Bounds {
                min: DVec2::new(-2., -1.),
                max: DVec2::new(7., 4.)
            })
        );
        let no_points: [DVec2; 0] = [];
        assert_eq!(Bounds::of(&no_points), None);
    }

    #[test]
    fn test_normalize_rectangle() {
        let level = normalize(&polygon(&[(0., 0.), (10., 0.), (10., 8.), (0., 8.)])).unwrap();
        assert_eq!(level.count, 4);
        assert_eq!(
            level.vertices,
            vec![
                DVec2::new(-5., 4.),
                DVec2::new(5., 4.),
                DVec2::new(5., -4.),
                DVec2::new(-5., -4.)
            ]
        );
    }

    #[test]
    fn test_normalize_reverses_order() {
        let source = polygon(&[(100., 20.), (350., 80.), (120., 260.), (60., 90.)]);
        let level = normalize(&source).unwrap();

        // normalizing each vertex on its own, in input order
        let bounds = Bounds::of(source.vertices()).unwrap();
        let forward: Vec<DVec2> = source
            .vertices()
            .iter()
            .map(|v| {
                (*v - bounds.min) * DVec2::new(LEVEL_WIDTH, LEVEL_HEIGHT) / bounds.size()
                    - DVec2::new(LEVEL_WIDTH, LEVEL_HEIGHT) / 2.0
            })
            .collect();

        assert_eq!(level.count, 4);
        for (reversed, expected) in level.vertices.iter().zip(forward.iter().rev()) {
            assert!(is_close!(reversed.x, expected.x, abs_tol = 1e-12));
            assert!(is_close!(reversed.y, expected.y, abs_tol = 1e-12));
        }
    }

    #[test]
    fn test_normalized_range() {
        let source = polygon(&[
            (-3.5, 12.),
            (40., 7.25),
            (22., -18.),
            (0.125, -2.),
            (-10., 3.),
        ]);
        let level = normalize(&source).unwrap();
        assert_eq!(level.count, 5);

        for v in &level.vertices {
            assert!((-5.0..=5.0).contains(&v.x), "{} out of range", v.x);
            assert!((-4.0..=4.0).contains(&v.y), "{} out of range", v.y);
        }

        // extremal source vertices land exactly on the field border
        // (input order reversed: index 0 is (-10, 3), index 3 is (40, 7.25))
        assert_eq!(level.vertices[0].x, -5.0);
        assert_eq!(level.vertices[3].x, 5.0);
        assert_eq!(level.vertices[2].y, -4.0);
        assert_eq!(level.vertices[4].y, 4.0);
    }

    #[test]
    fn test_degenerate_bounds() {
        assert_eq!(
            normalize(&polygon(&[(2., 0.), (2., 5.), (2., 9.)])),
            Err(NormalizeError::DegenerateBounds { axis: Axis::X })
        );
        assert_eq!(
            normalize(&polygon(&[(0., 1.), (4., 1.)])),
            Err(NormalizeError::DegenerateBounds { axis: Axis::Y })
        );
        // a single vertex is degenerate on both axes
        assert_eq!(
            normalize(&polygon(&[(1., 1.)])),
            Err(NormalizeError::DegenerateBounds { axis: Axis::X })
        );
        assert_eq!(normalize(&polygon(&[])), Err(NormalizeError::Empty));
    }
}
