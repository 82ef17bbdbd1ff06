use std::f64::consts::PI;

use crate::constants::{MAX_SWEEP_DEG, START_ANGLE_DEG};
use crate::svg::fmt_num;

/// A point in SVG user space (y grows downwards).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A helper struct to turn percentages into arc geometry.
pub struct ArcGeometry {}

impl ArcGeometry {
    /// Sweep angle in degrees for a percentage value.
    ///
    /// A value producing exactly a full circle is nudged to [`MAX_SWEEP_DEG`].
    pub fn sweep_angle(value: f64) -> f64 {
        let sweep = value / 100.0 * 360.0;
        if sweep == 360.0 {
            MAX_SWEEP_DEG
        } else {
            sweep
        }
    }

    /// Angles are measured from the vertical axis, offset by -180°.
    pub fn polar_to_cartesian(center: Point, radius: f64, angle_deg: f64) -> Point {
        let angle_rad = (angle_deg - 180.0) * PI / 180.0;
        Point {
            x: center.x + radius * angle_rad.cos(),
            y: center.y + radius * angle_rad.sin(),
        }
    }

    pub fn large_arc_flag(start_deg: f64, end_deg: f64) -> u8 {
        if end_deg - start_deg <= 180.0 {
            0
        } else {
            1
        }
    }

    /// Path description of an arc between two angles.
    ///
    /// The path is drawn from the end angle back to the start angle with a
    /// fixed sweep flag of `0`.
    pub fn describe_arc(center: Point, radius: f64, start_deg: f64, end_deg: f64) -> String {
        let start = Self::polar_to_cartesian(center, radius, end_deg);
        let end = Self::polar_to_cartesian(center, radius, start_deg);
        [
            "M".to_string(),
            fmt_num(start.x),
            fmt_num(start.y),
            "A".to_string(),
            fmt_num(radius),
            fmt_num(radius),
            "0".to_string(),
            Self::large_arc_flag(start_deg, end_deg).to_string(),
            "0".to_string(),
            fmt_num(end.x),
            fmt_num(end.y),
        ]
        .join(" ")
    }

    /// Path description of the slice for `value`, on a circle of radius `xy`
    /// centered at `(xy, xy)`.
    pub fn slice_path(value: f64, xy: f64) -> String {
        let sweep = Self::sweep_angle(value);
        Self::describe_arc(
            Point::new(xy, xy),
            xy,
            START_ANGLE_DEG,
            START_ANGLE_DEG + sweep,
        )
    }

    /// Points along the visible arc for `value`, `samples + 1` of them.
    pub fn arc_points(value: f64, center: Point, radius: f64, samples: usize) -> Vec<Point> {
        let sweep = Self::sweep_angle(value);
        if sweep <= 0.0 || samples == 0 {
            return Vec::new();
        }
        (0..=samples)
            .map(|i| {
                let angle = START_ANGLE_DEG + sweep * i as f64 / samples as f64;
                Self::polar_to_cartesian(center, radius, angle)
            })
            .collect()
    }
}
