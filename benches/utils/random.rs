#![allow(dead_code)]

use geo::{Coordinate, Line, Rect};

use rand::Rng;
use rand_distr::{Standard, UnitCircle};

#[inline]
pub fn uniform_point<R: Rng>(rng: &mut R, bounds: Rect<f64>) -> Coordinate<f64> {
    let coords: [f64; 2] = rng.sample(Standard);
    let dims = bounds.max() - bounds.min();
    Coordinate {
        x: bounds.min().x + dims.x * coords[0],
        y: bounds.min().y + dims.y * coords[1],
    }
}

#[inline]
pub fn uniform_line<R: Rng>(rng: &mut R, bounds: Rect<f64>) -> Line<f64> {
    Line::new(uniform_point(rng, bounds), uniform_point(rng, bounds))
}

/// A line of the given length, starting at a uniform point in `bounds`,
/// in a uniformly random direction. The end may fall outside `bounds`.
#[inline]
pub fn uniform_line_with_length<R: Rng>(rng: &mut R, bounds: Rect<f64>, length: f64) -> Line<f64> {
    let start = uniform_point(rng, bounds);
    let [dx, dy]: [f64; 2] = rng.sample(UnitCircle);
    Line::new(
        start,
        Coordinate {
            x: start.x + length * dx,
            y: start.y + length * dy,
        },
    )
}

pub fn uniform_lines<R: Rng>(rng: &mut R, num_lines: usize, bounds: Rect<f64>) -> Vec<Line<f64>> {
    (0..num_lines).map(|_| uniform_line(rng, bounds)).collect()
}

pub fn short_lines<R: Rng>(
    rng: &mut R,
    num_lines: usize,
    bounds: Rect<f64>,
    length: f64,
) -> Vec<Line<f64>> {
    (0..num_lines)
        .map(|_| uniform_line_with_length(rng, bounds, length))
        .collect()
}

/// Horizontal lines stacked one unit apart, each a little longer than
/// the one below it.
pub fn stacked_lines(num_lines: usize) -> Vec<Line<f64>> {
    (0..num_lines)
        .map(|i| {
            let y = i as f64;
            Line::from([(-y, y), (10. + y, y)])
        })
        .collect()
}
