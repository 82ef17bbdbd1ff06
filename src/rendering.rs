use std::str::FromStr;

use ratatui::{
    prelude::{BlockExt, Buffer, Color, Rect, Widget},
    style::Style,
    symbols::Marker,
    text::Line,
    widgets::{
        canvas::{Canvas, Circle, Line as CanvasLine, Points},
        Block,
    },
};

use crate::config::Direction;
use crate::dial::Dial;
use crate::geometry::{ArcGeometry, Point};

/// Arc samples per degree of sweep.
const SAMPLES_PER_DEGREE: f64 = 2.0;

/// Draws a [`Dial`] into a terminal buffer.
///
/// The SVG coordinate space of the dial is mapped onto a canvas, so the arc,
/// overlay outline, arrow and label keep their relative positions at any
/// area size. The arc is colored by the stroke gradient from left to right.
#[derive(Debug, Clone)]
pub struct DialWidget<'a> {
    dial: &'a Dial,
    block: Option<Block<'a>>,
    marker: Marker,
}

impl<'a> DialWidget<'a> {
    pub fn new(dial: &'a Dial) -> Self {
        Self {
            dial,
            block: None,
            marker: Marker::Braille,
        }
    }

    /// Surround the dial with a [`Block`].
    #[must_use = "method moves the value of self and returns the modified value"]
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    #[must_use = "method moves the value of self and returns the modified value"]
    pub fn marker(mut self, marker: Marker) -> Self {
        self.marker = marker;
        self
    }
}

impl Widget for &Dial {
    fn render(self, area: Rect, buf: &mut Buffer) {
        DialWidget::new(self).render(area, buf);
    }
}

impl Widget for DialWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &DialWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if let Some(block) = self.block.as_ref() {
            block.render(area, buf);
        }

        let dial_area = self.block.inner_if_some(area);
        if dial_area.is_empty() {
            return;
        }

        let dial = self.dial;
        let size = dial.size();
        let center = Point::new(size / 2.0, size / 2.0);

        // --- ARC ---
        let sweep = ArcGeometry::sweep_angle(dial.value());
        let samples = (sweep * SAMPLES_PER_DEGREE).ceil() as usize;
        let stroke = dial.stroke_width() / 3.0;
        let gradient = parse_colors(dial.gradient_colors());
        let mut arc: Vec<((f64, f64), Color)> = Vec::new();
        for offset in [-stroke, 0.0, stroke] {
            for p in ArcGeometry::arc_points(dial.value(), center, dial.radius() + offset, samples)
            {
                arc.push((to_canvas(p, size), gradient_color(&gradient, p.x / size)));
            }
        }

        // --- OVERLAY ---
        let overlay_color = parse_colors(dial.background_colors())
            .into_iter()
            .flatten()
            .next()
            .unwrap_or(Color::Reset);

        // --- ARROW ---
        let label_color = parse_color(dial.label_color()).unwrap_or(Color::Reset);
        let arrow_color = parse_color(dial.arrow_fill()).unwrap_or(label_color);
        let arrow = arrow_lines(dial, size, arrow_color);

        // --- LABEL ---
        let label = dial.label().to_string();
        let cell_width = size / f64::from(dial_area.width);
        let label_x = (size / 2.0 - label.chars().count() as f64 / 2.0 * cell_width).max(0.0);
        let label_style = Style::default().fg(label_color);

        Canvas::default()
            .marker(self.marker)
            .x_bounds([0.0, size])
            .y_bounds([0.0, size])
            .paint(|ctx| {
                ctx.draw(&Circle {
                    x: center.x,
                    y: center.y,
                    radius: dial.radius() - dial.stroke_width() / 2.0,
                    color: overlay_color,
                });
                for (coords, color) in &arc {
                    ctx.draw(&Points {
                        coords: std::slice::from_ref(coords),
                        color: *color,
                    });
                }
                for line in &arrow {
                    ctx.draw(line);
                }
                ctx.print(label_x, center.y, Line::styled(label.clone(), label_style));
            })
            .render(dial_area, buf);
    }
}

/// SVG space grows downwards, the canvas grows upwards.
fn to_canvas(p: Point, size: f64) -> (f64, f64) {
    (p.x, size - p.y)
}

fn arrow_lines(dial: &Dial, size: f64, color: Color) -> Vec<CanvasLine> {
    if dial.direction() == Direction::None {
        return Vec::new();
    }
    let arrow_size = dial.arrow_size();
    let (y_offset, m) = dial.direction().arrow_offsets(arrow_size);
    let origin = Point::new(
        size / 2.0 - arrow_size / 2.0,
        size - size / 3.0 + y_offset,
    );
    let corners = [
        Point::new(origin.x, origin.y),
        Point::new(origin.x + arrow_size, origin.y),
        Point::new(origin.x + arrow_size / 2.0, origin.y + m * (arrow_size / 1.5)),
    ];
    (0..corners.len())
        .map(|i| {
            let (x1, y1) = to_canvas(corners[i], size);
            let (x2, y2) = to_canvas(corners[(i + 1) % corners.len()], size);
            CanvasLine::new(x1, y1, x2, y2, color)
        })
        .collect()
}

fn parse_color(color: &str) -> Option<Color> {
    Color::from_str(color.trim()).ok()
}

fn parse_colors(colors: &[String]) -> Vec<Option<Color>> {
    colors.iter().map(|c| parse_color(c)).collect()
}

/// Color of a horizontal gradient at `t` in `0.0..=1.0`.
///
/// RGB neighbours are interpolated; anything else takes the nearest stop.
fn gradient_color(stops: &[Option<Color>], t: f64) -> Color {
    if stops.is_empty() {
        return Color::Reset;
    }
    let position = t.clamp(0.0, 1.0) * (stops.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;

    match (stops[lower], stops[upper]) {
        (Some(Color::Rgb(r1, g1, b1)), Some(Color::Rgb(r2, g2, b2))) => Color::Rgb(
            lerp(r1, r2, fraction),
            lerp(g1, g2, fraction),
            lerp(b1, b2, fraction),
        ),
        (a, b) => {
            let nearest = if fraction < 0.5 { a } else { b };
            nearest.unwrap_or(Color::Reset)
        }
    }
}

fn lerp(a: u8, b: u8, t: f64) -> u8 {
    (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DialConfig;

    fn rows(buf: &Buffer) -> Vec<String> {
        let area = buf.area;
        (area.top()..area.bottom())
            .map(|y| {
                (area.left()..area.right())
                    .map(|x| buf[(x, y)].symbol().to_string())
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_gradient_color_interpolates_rgb() {
        let stops = parse_colors(&["#000000".to_string(), "#ff0000".to_string()]);
        assert_eq!(gradient_color(&stops, 0.0), Color::Rgb(0, 0, 0));
        assert_eq!(gradient_color(&stops, 1.0), Color::Rgb(255, 0, 0));
        assert_eq!(gradient_color(&stops, 0.5), Color::Rgb(128, 0, 0));
    }

    #[test]
    fn test_gradient_color_unparsable_falls_back() {
        let stops = parse_colors(&["rgba(0,0,0,0)".to_string(), "rgba(1,1,1,1)".to_string()]);
        assert_eq!(gradient_color(&stops, 0.3), Color::Reset);
    }

    #[test]
    fn test_gradient_color_nearest_named_stop() {
        let stops = parse_colors(&["red".to_string(), "blue".to_string()]);
        assert_eq!(gradient_color(&stops, 0.2), Color::Red);
        assert_eq!(gradient_color(&stops, 0.8), Color::Blue);
    }

    #[test]
    fn test_render_prints_label() {
        let mut dial = Dial::new(DialConfig::new(200.0).target_value(42.0));
        dial.animate_start();
        dial.run_to_completion();

        let area = Rect::new(0, 0, 30, 15);
        let mut buf = Buffer::empty(area);
        (&dial).render(area, &mut buf);

        assert!(rows(&buf).iter().any(|row| row.contains("42%")));
    }

    #[test]
    fn test_render_draws_arc() {
        let mut dial = Dial::new(DialConfig::new(200.0));
        dial.set_value(75.0);

        let area = Rect::new(0, 0, 30, 15);
        let mut buf = Buffer::empty(area);
        (&dial).render(area, &mut buf);

        let gradient_cells = buf
            .content()
            .iter()
            .filter(|cell| matches!(cell.fg, Color::Rgb(..)))
            .count();
        assert!(gradient_cells > 0);
    }

    #[test]
    fn test_render_with_block() {
        let dial = Dial::new(DialConfig::new(100.0));
        let area = Rect::new(0, 0, 20, 10);
        let mut buf = Buffer::empty(area);
        DialWidget::new(&dial)
            .block(Block::bordered())
            .render(area, &mut buf);

        assert_eq!(buf[(0, 0)].symbol(), "┌");
        assert!(rows(&buf).iter().any(|row| row.contains("0%")));
    }

    #[test]
    fn test_render_empty_area() {
        let dial = Dial::new(DialConfig::new(100.0));
        let area = Rect::new(0, 0, 0, 0);
        let mut buf = Buffer::empty(area);
        (&dial).render(area, &mut buf);
        assert_eq!(buf, Buffer::empty(area));
    }

    #[test]
    fn test_arrow_lines() {
        let up = Dial::new(DialConfig::new(300.0).direction(Direction::Up));
        let none = Dial::new(DialConfig::new(300.0));
        assert_eq!(arrow_lines(&up, 300.0, Color::White).len(), 3);
        assert!(arrow_lines(&none, 300.0, Color::White).is_empty());
    }
}
