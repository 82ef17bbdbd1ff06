//! The [`Dial`] widget is an animated circular percentage gauge.
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use tracing::debug;

use crate::config::{DialConfig, Direction};
use crate::constants::{
    ARROW_DIVISOR, ARROW_OPACITY, DRAW_CLASS, FONT_DIVISOR, LABEL_FONT_WEIGHT, STROKE_DIVISOR,
};
use crate::geometry::ArcGeometry;
use crate::state::{AnimationState, AnimationStatus};
use crate::svg::{fmt_num, Element, SVG_NS};

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

/// A circular gauge drawn as a gradient arc with a centered percentage label.
///
/// A `Dial` owns an SVG element tree: gradient definitions, the arc ("slice"),
/// a background overlay circle, the label and an optional arrow. The displayed
/// value only changes through [`Dial::set_value`], which updates the arc and the
/// label together.
///
/// Animations are driven by the caller: [`Dial::animate_start`] arms the driver
/// and [`Dial::poll`] (or [`Dial::tick`]) advances it.
///
/// ```
/// use ratadial::{Dial, DialConfig, Direction};
///
/// let mut dial = Dial::new(
///     DialConfig::new(200.0)
///         .target_value(64.0)
///         .direction(Direction::Up),
/// );
/// dial.animate_start();
/// dial.run_to_completion();
/// assert_eq!(dial.label(), "64%");
/// let svg = dial.to_string();
/// assert!(svg.starts_with("<svg"));
/// ```
#[derive(Debug)]
pub struct Dial {
    id: u64,
    config: DialConfig,
    stroke_width: f64,
    radius: f64,
    value: f64,
    svg: Element,
    defs: Element,
    slice: Element,
    overlay: Element,
    text: Element,
    arrow: Element,
    animation: Option<AnimationState>,
}

impl Dial {
    pub fn new(config: DialConfig) -> Self {
        let stroke_width = config.size / STROKE_DIVISOR;
        let mut dial = Self {
            id: NEXT_ID.fetch_add(1, Ordering::Relaxed),
            radius: config.size / 2.0 - stroke_width / 2.0,
            stroke_width,
            config,
            value: 0.0,
            svg: Element::default(),
            defs: Element::default(),
            slice: Element::default(),
            overlay: Element::default(),
            text: Element::default(),
            arrow: Element::default(),
            animation: None,
        };
        dial.create();
        dial
    }

    fn create(&mut self) {
        self.create_svg();
        self.create_defs();
        self.create_slice();
        self.create_overlay();
        self.create_text();
        self.create_arrow();
        self.set_value(0.0);
    }

    fn create_svg(&mut self) {
        let size = fmt_num(self.config.size);
        self.svg = Element::new("svg")
            .attr("xmlns", SVG_NS)
            .attr("width", format!("{}px", size))
            .attr("height", format!("{}px", size));
    }

    fn create_defs(&mut self) {
        self.defs = Element::new("defs")
            .child(linear_gradient(
                self.stroke_gradient_id(),
                &self.config.gradient_colors,
            ))
            .child(linear_gradient(
                self.background_gradient_id(),
                &self.config.background_colors,
            ));
    }

    fn create_slice(&mut self) {
        let half = fmt_num(self.stroke_width / 2.0);
        self.slice = Element::new("path")
            .attr("fill", "none")
            .attr("stroke", format!("url(#{})", self.stroke_gradient_id()))
            .attr("stroke-width", fmt_num(self.stroke_width))
            .attr("transform", format!("translate({}, {})", half, half))
            .attr("class", DRAW_CLASS);
    }

    fn create_overlay(&mut self) {
        let center = fmt_num(self.config.size / 2.0);
        self.overlay = Element::new("circle")
            .attr("cx", center.clone())
            .attr("cy", center)
            .attr("r", fmt_num(self.radius))
            .attr("fill", format!("url(#{})", self.background_gradient_id()))
            .attr("class", DRAW_CLASS);
    }

    fn create_text(&mut self) {
        let size = self.config.size;
        let font_size = self.font_size();
        self.text = Element::new("text")
            .attr("x", fmt_num(size / 2.0))
            .attr("y", fmt_num(size / 2.0 + font_size / 4.0))
            .attr("font-family", self.config.font_family.clone())
            .attr("font-size", fmt_num(font_size))
            .attr("font-weight", LABEL_FONT_WEIGHT.to_string())
            .attr("fill", self.config.label_color.clone())
            .attr("text-anchor", "middle")
            .text("0%");
    }

    fn create_arrow(&mut self) {
        let size = self.config.size;
        let arrow_size = self.arrow_size();
        let (y_offset, m) = self.config.direction.arrow_offsets(arrow_size);
        let pos_x = size / 2.0 - arrow_size / 2.0;
        let pos_y = size - size / 3.0 + y_offset;
        let tip = m * (arrow_size / 1.5);
        self.arrow = Element::new("path")
            .attr(
                "d",
                format!(
                    "M 0 0 {} 0 {} {} 0 0 Z",
                    fmt_num(arrow_size),
                    fmt_num(arrow_size / 2.0),
                    fmt_num(tip)
                ),
            )
            .attr("fill", self.config.arrow_fill.clone())
            .attr("opacity", fmt_num(ARROW_OPACITY))
            .attr(
                "transform",
                format!("translate({},{})", fmt_num(pos_x), fmt_num(pos_y)),
            );
    }

    /// Show `value` (saturated into `0..=100`) on the arc and the label.
    pub fn set_value(&mut self, value: f64) {
        let value = value.clamp(0.0, 100.0);
        let d = ArcGeometry::slice_path(value, self.radius);
        self.slice.set_attr("d", d);
        self.text.set_text(format!("{}%", fmt_num(value.floor())));
        self.value = value;
    }

    /// Arm the animation from the value on the label to the target value.
    ///
    /// Any animation already in flight is replaced.
    pub fn animate_start(&mut self) {
        let start = self.value.floor();
        let target = self.config.target_value;
        if self.animation.is_some() {
            debug!(dial = self.id, "replacing in-flight animation");
        }
        debug!(dial = self.id, start, target, "animation started");
        self.animation = Some(AnimationState::new(start, target));
    }

    /// Show 0 immediately and drop any animation in flight.
    pub fn animate_reset(&mut self) {
        if self.animation.take().is_some() {
            debug!(dial = self.id, "animation cancelled by reset");
        }
        self.set_value(0.0);
    }

    /// Take one animation step.
    pub fn tick(&mut self) -> AnimationStatus {
        let Some(animation) = self.animation.as_mut() else {
            return AnimationStatus::Finished;
        };
        let status = animation.step();
        let current = animation.current;
        self.set_value(current);
        if status == AnimationStatus::Finished {
            self.animation = None;
            debug!(dial = self.id, value = current, "animation finished");
        }
        status
    }

    /// Take every step that is due at `now`.
    pub fn poll(&mut self, now: Instant) -> AnimationStatus {
        let Some(animation) = self.animation.as_mut() else {
            return AnimationStatus::Finished;
        };
        let due = animation.due_steps(now);
        animation.last_tick += animation.interval * due;

        let mut status = AnimationStatus::Running;
        for _ in 0..due {
            status = self.tick();
            if status == AnimationStatus::Finished {
                break;
            }
        }
        status
    }

    /// Step until the animation finishes, returning the number of steps taken.
    pub fn run_to_completion(&mut self) -> usize {
        let mut steps = 0;
        while self.animation.is_some() {
            self.tick();
            steps += 1;
        }
        steps
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// The full SVG tree in drawing order.
    pub fn svg(&self) -> Element {
        self.svg
            .clone()
            .child(self.defs.clone())
            .child(self.slice.clone())
            .child(self.overlay.clone())
            .child(self.text.clone())
            .child(self.arrow.clone())
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn label(&self) -> &str {
        self.text.text_content().unwrap_or_default()
    }

    pub fn slice_path(&self) -> &str {
        self.slice.get_attr("d").unwrap_or_default()
    }

    pub fn size(&self) -> f64 {
        self.config.size
    }

    pub fn target_value(&self) -> f64 {
        self.config.target_value
    }

    pub fn direction(&self) -> Direction {
        self.config.direction
    }

    pub fn stroke_width(&self) -> f64 {
        self.stroke_width
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn font_size(&self) -> f64 {
        self.config.size / FONT_DIVISOR
    }

    pub fn arrow_size(&self) -> f64 {
        self.config.size / ARROW_DIVISOR
    }

    pub fn gradient_colors(&self) -> &[String] {
        &self.config.gradient_colors
    }

    pub fn background_colors(&self) -> &[String] {
        &self.config.background_colors
    }

    pub fn label_color(&self) -> &str {
        &self.config.label_color
    }

    pub fn arrow_fill(&self) -> &str {
        &self.config.arrow_fill
    }

    pub fn stroke_gradient_id(&self) -> String {
        format!("ratadial-{}-stroke", self.id)
    }

    pub fn background_gradient_id(&self) -> String {
        format!("ratadial-{}-background", self.id)
    }
}

impl fmt::Display for Dial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.svg())
    }
}

/// Stops are spread evenly from 0% to 100%.
fn linear_gradient(id: String, colors: &[String]) -> Element {
    let last = colors.len().saturating_sub(1).max(1) as f64;
    colors
        .iter()
        .enumerate()
        .fold(
            Element::new("linearGradient").attr("id", id),
            |gradient, (i, color)| {
                gradient.child(
                    Element::new("stop")
                        .attr("stop-color", color.clone())
                        .attr("offset", format!("{}%", fmt_num(i as f64 / last * 100.0))),
                )
            },
        )
}
