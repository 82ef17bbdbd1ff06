use std::time::Duration;

use lazy_static::lazy_static;

/// Interval between two animation steps.
pub const TICK_INTERVAL: Duration = Duration::from_millis(10);

/// A full sweep would start and end on the same point, which draws nothing.
pub const MAX_SWEEP_DEG: f64 = 359.99;
pub const START_ANGLE_DEG: f64 = 180.0;

pub const STROKE_DIVISOR: f64 = 8.0;
pub const FONT_DIVISOR: f64 = 3.5;
pub const ARROW_DIVISOR: f64 = 10.0;

/// Easing ratio above which the dial creeps with a flat step.
pub const CREEP_THRESHOLD: f64 = 0.95;
pub const CREEP_STEP: f64 = 0.05;

pub const DEFAULT_FONT_FAMILY: &str = "Roboto";
pub const DEFAULT_LABEL_COLOR: &str = "#ffffff";
pub const DEFAULT_ARROW_FILL: &str = "none";
pub const LABEL_FONT_WEIGHT: u16 = 600;
pub const ARROW_OPACITY: f64 = 0.6;
pub const DRAW_CLASS: &str = "animate-draw";

lazy_static! {
    pub static ref DEFAULT_GRADIENT_COLORS: Vec<String> = vec![
        "#fc0303".to_string(),
        "#03fc07".to_string(),
        "#031cfc".to_string(),
    ];
    pub static ref DEFAULT_BACKGROUND_COLORS: Vec<String> = vec![
        "rgba(255,255,255,0.8)".to_string(),
        "rgba(0,0,0,0)".to_string(),
        "rgba(0,10,10,0.8)".to_string(),
    ];
}
