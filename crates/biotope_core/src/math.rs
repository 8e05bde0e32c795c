//! Pure geometry helpers.

pub const EPSILON: f64 = 1e-10;

#[inline]
pub fn distance_sq(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    let dx = x2 - x1;
    let dy = y2 - y1;
    dx * dx + dy * dy
}

#[inline]
pub fn distance(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    distance_sq(x1, y1, x2, y2).sqrt()
}

/// Unit vector in the direction of `(x, y)`, or `(0, 0)` for a near-zero input.
#[inline]
pub fn normalize(x: f64, y: f64) -> (f64, f64) {
    let len = (x * x + y * y).sqrt();
    if len < EPSILON {
        (0.0, 0.0)
    } else {
        (x / len, y / len)
    }
}

/// Unit vector pointing from `(x1, y1)` to `(x2, y2)`.
#[inline]
pub fn direction_to(x1: f64, y1: f64, x2: f64, y2: f64) -> (f64, f64) {
    normalize(x2 - x1, y2 - y1)
}

#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

#[inline]
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}

/// Angle in degrees of the vector from the first point to the second.
#[inline]
pub fn angle_between(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    (y2 - y1).atan2(x2 - x1).to_degrees()
}

#[inline]
pub fn dot(ax: f64, ay: f64, bx: f64, by: f64) -> f64 {
    ax * bx + ay * by
}

/// Axis-aligned rectangle overlap test. Rectangles are `(x, y, w, h)` with
/// `(x, y)` the top-left corner.
#[inline]
pub fn rects_overlap(a: (f64, f64, f64, f64), b: (f64, f64, f64, f64)) -> bool {
    a.0 < b.0 + b.2 && a.0 + a.2 > b.0 && a.1 < b.1 + b.3 && a.1 + a.3 > b.1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_matches_squared_form() {
        assert!((distance(0.0, 0.0, 3.0, 4.0) - 5.0).abs() < 1e-12);
        assert!((distance_sq(0.0, 0.0, 3.0, 4.0) - 25.0).abs() < 1e-12);
    }

    #[test]
    fn test_normalize_zero_vector() {
        assert_eq!(normalize(0.0, 0.0), (0.0, 0.0));
        assert_eq!(normalize(1e-12, -1e-12), (0.0, 0.0));
        let (x, y) = normalize(3.0, 4.0);
        assert!((x - 0.6).abs() < 1e-12 && (y - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_lerp_clamp_angle_dot() {
        assert_eq!(lerp(0.0, 10.0, 0.25), 2.5);
        assert_eq!(clamp(15.0, 1.0, 10.0), 10.0);
        assert_eq!(clamp(-1.0, 1.0, 10.0), 1.0);
        assert!((angle_between(0.0, 0.0, 0.0, 1.0) - 90.0).abs() < 1e-9);
        assert_eq!(dot(1.0, 2.0, 3.0, 4.0), 11.0);
    }

    #[test]
    fn test_rect_overlap() {
        assert!(rects_overlap((0.0, 0.0, 10.0, 10.0), (5.0, 5.0, 10.0, 10.0)));
        assert!(!rects_overlap((0.0, 0.0, 10.0, 10.0), (10.0, 0.0, 5.0, 5.0)));
    }
}
