use std::str::FromStr;

use tracing::debug;

use crate::constants::{
    DEFAULT_ARROW_FILL, DEFAULT_BACKGROUND_COLORS, DEFAULT_FONT_FAMILY, DEFAULT_GRADIENT_COLORS,
    DEFAULT_LABEL_COLOR,
};
use crate::error::DialError;

/// Orientation of the arrow drawn below the label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    None,
    Up,
    Down,
}

impl Direction {
    /// Vertical position offset and tip multiplier for an arrow of `arrow_size`.
    pub(crate) fn arrow_offsets(self, arrow_size: f64) -> (f64, f64) {
        match self {
            Direction::Up => (arrow_size / 2.0, -1.0),
            Direction::Down => (-arrow_size / 2.0, 1.0),
            Direction::None => (0.0, 0.0),
        }
    }
}

impl FromStr for Direction {
    type Err = DialError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "none" => Ok(Direction::None),
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            other => Err(DialError::UnknownDirection(other.to_string())),
        }
    }
}

/// Configuration of a [`Dial`](crate::Dial).
///
/// Defaults to a 200px dial with a target of 0, no arrow and the stock
/// red/green/blue stroke palette.
#[derive(Debug, Clone, PartialEq)]
pub struct DialConfig {
    pub(crate) size: f64,
    pub(crate) target_value: f64,
    pub(crate) direction: Direction,
    pub(crate) gradient_colors: Vec<String>,
    pub(crate) background_colors: Vec<String>,
    pub(crate) font_family: String,
    pub(crate) label_color: String,
    pub(crate) arrow_fill: String,
}

impl Default for DialConfig {
    fn default() -> Self {
        Self {
            size: 200.0,
            target_value: 0.0,
            direction: Direction::None,
            gradient_colors: DEFAULT_GRADIENT_COLORS.clone(),
            background_colors: DEFAULT_BACKGROUND_COLORS.clone(),
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            label_color: DEFAULT_LABEL_COLOR.to_string(),
            arrow_fill: DEFAULT_ARROW_FILL.to_string(),
        }
    }
}

impl DialConfig {
    /// Create a config for a square dial `size` pixels wide.
    ///
    /// # Panics
    ///
    /// This method will panic if `size` is not a positive finite number.
    pub fn new(size: f64) -> Self {
        Self::default().size(size)
    }

    /// Set the side of the square canvas in pixels.
    ///
    /// # Panics
    ///
    /// This method will panic if `size` is not a positive finite number.
    #[must_use = "method moves the value of self and returns the modified value"]
    pub fn size(mut self, size: f64) -> Self {
        assert!(
            size.is_finite() && size > 0.0,
            "Size should be a positive number."
        );
        self.size = size;
        self
    }

    /// Set the value the dial animates to.
    ///
    /// # Panics
    ///
    /// This method will panic if `value` is not between 0 and 100 inclusively.
    #[must_use = "method moves the value of self and returns the modified value"]
    pub fn target_value(mut self, value: f64) -> Self {
        assert!(
            (0.0..=100.0).contains(&value),
            "Target value should be between 0 and 100 inclusively."
        );
        self.target_value = value;
        self
    }

    #[must_use = "method moves the value of self and returns the modified value"]
    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Set the colors of the arc stroke gradient, from left to right.
    ///
    /// # Panics
    ///
    /// This method will panic if fewer than two colors are given.
    #[must_use = "method moves the value of self and returns the modified value"]
    pub fn gradient_colors<I, S>(mut self, colors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.gradient_colors = collect_colors(colors);
        self
    }

    /// Set the colors of the overlay fill gradient, from left to right.
    ///
    /// # Panics
    ///
    /// This method will panic if fewer than two colors are given.
    #[must_use = "method moves the value of self and returns the modified value"]
    pub fn background_colors<I, S>(mut self, colors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.background_colors = collect_colors(colors);
        self
    }

    #[must_use = "method moves the value of self and returns the modified value"]
    pub fn font_family(mut self, font_family: impl Into<String>) -> Self {
        self.font_family = font_family.into();
        self
    }

    #[must_use = "method moves the value of self and returns the modified value"]
    pub fn label_color(mut self, color: impl Into<String>) -> Self {
        self.label_color = color.into();
        self
    }

    /// The arrow is unfilled by default so the page stylesheet can color it.
    #[must_use = "method moves the value of self and returns the modified value"]
    pub fn arrow_fill(mut self, color: impl Into<String>) -> Self {
        self.arrow_fill = color.into();
        self
    }

    /// Read a config from host element attributes.
    ///
    /// Recognized names, with or without a `data-` prefix: `size` and `value`
    /// (required), `arrow` (`up` or `down`; anything else draws no arrow), `gradient` and
    /// `background` (comma separated color lists; commas inside parentheses,
    /// as in `rgba(...)`, do not split). Unknown attributes are ignored.
    pub fn from_attributes<'a, I>(attributes: I) -> Result<Self, DialError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut size = None;
        let mut value = None;
        let mut config = Self::default();

        for (name, raw) in attributes {
            match name.strip_prefix("data-").unwrap_or(name) {
                "size" => size = Some(parse_number("size", raw)?),
                "value" => value = Some(parse_number("value", raw)?),
                "arrow" => {
                    config.direction = raw.parse().unwrap_or_else(|err| {
                        debug!(%err, "drawing no arrow");
                        Direction::None
                    })
                }
                "gradient" => config.gradient_colors = parse_colors("gradient", raw)?,
                "background" => config.background_colors = parse_colors("background", raw)?,
                _ => {}
            }
        }

        let size = size.ok_or(DialError::MissingAttribute("size"))?;
        if size <= 0.0 {
            return Err(DialError::OutOfRange {
                name: "size",
                value: size,
            });
        }
        let value = value.ok_or(DialError::MissingAttribute("value"))?;
        if !(0.0..=100.0).contains(&value) {
            return Err(DialError::OutOfRange {
                name: "value",
                value,
            });
        }

        config.size = size;
        config.target_value = value;
        Ok(config)
    }
}

fn collect_colors<I, S>(colors: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let colors: Vec<String> = colors.into_iter().map(Into::into).collect();
    assert!(colors.len() >= 2, "A gradient needs at least two colors.");
    colors
}

fn parse_number(name: &'static str, raw: &str) -> Result<f64, DialError> {
    raw.trim()
        .trim_end_matches("px")
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| DialError::InvalidNumber {
            name,
            value: raw.to_string(),
        })
}

fn parse_colors(name: &'static str, raw: &str) -> Result<Vec<String>, DialError> {
    let mut colors = Vec::new();
    let mut depth = 0usize;
    let mut current = String::new();
    for c in raw.chars() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                colors.push(std::mem::take(&mut current));
                continue;
            }
            _ => {}
        }
        current.push(c);
    }
    colors.push(current);

    let colors: Vec<String> = colors
        .into_iter()
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .collect();
    if colors.len() < 2 {
        return Err(DialError::TooFewColors {
            name,
            count: colors.len(),
        });
    }
    Ok(colors)
}
