//! # Turtle Module
//!
//! Logo-style turtle that walks an expanded L-system string once, left to
//! right, and draws it onto a [`Canvas`].
//!
//! | Symbol            | Effect                                                      |
//! |-------------------|-------------------------------------------------------------|
//! | forward (`F`)     | draw `length` along the heading, move to the end point       |
//! | `+` / `-`         | heading +/- one angle unit                                   |
//! | `[`               | save the cursor, then divide `length` by the reduction       |
//! | `]`               | restore the last saved cursor                                |
//! | digit             | switch to that color from the grammar's color table          |
//! | anything else     | nothing                                                      |

use csscolorparser::Color as CssColor;
use geo_types::Point;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::canvas::Canvas;
use crate::errors::{ConfigurationError, StructuralError};
use crate::l_system::LSystem;
use crate::symbol::{Symbol, TurnDirection};

pub mod visualized;

pub use visualized::VisualizedSystem;

/// Helper function to convert degrees to radians
pub fn degrees(deg: f64) -> f64 {
    std::f64::consts::PI * (deg / 180.0)
}

/// The turtle's state during one render pass.
#[derive(Clone, Debug, PartialEq)]
pub struct Cursor {
    pub position: Point<f64>,
    /// Degrees, counter-clockwise from +x.
    pub heading: f64,
    pub length: f64,
    /// Last color digit selected, `None` until the string picks one.
    pub color: Option<char>,
}

impl Cursor {
    pub fn new(position: Point<f64>, heading: f64, length: f64) -> Cursor {
        Cursor {
            position,
            heading,
            length,
            color: None,
        }
    }

    /// Moves `length` along the heading and returns the new position.
    pub fn fwd(&mut self) -> Point<f64> {
        let heading = degrees(self.heading);
        self.position = self.position
            + Point::new(self.length * heading.cos(), self.length * heading.sin());
        self.position
    }

    pub fn turn(&mut self, direction: TurnDirection, angle: f64) {
        self.heading += direction.sign() * angle;
    }
}

/// Starting pose and taper for a render pass.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct RenderParams {
    pub position: Point<f64>,
    /// Degrees.
    pub heading: f64,
    pub length: f64,
    /// Each `[` divides the segment length by this. Above 1 branches taper,
    /// below 1 they grow.
    pub reduction: f64,
    /// Pushes deeper than this are ignored (and so are their pops).
    pub max_depth: Option<usize>,
    /// Stroke used while no color digit is active.
    pub base_color: CssColor,
}

impl Default for RenderParams {
    fn default() -> Self {
        Self {
            position: Point::new(0.0, 0.0),
            heading: 90.0,
            length: 10.0,
            reduction: 1.0,
            max_depth: None,
            base_color: CssColor::from_rgba8(0, 0, 0, 255),
        }
    }
}

impl RenderParams {
    pub fn new(position: Point<f64>, heading: f64, length: f64, reduction: f64) -> RenderParams {
        RenderParams {
            position,
            heading,
            length,
            reduction,
            ..Default::default()
        }
    }

    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    pub fn base_color(mut self, color: CssColor) -> Self {
        self.base_color = color;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if !self.reduction.is_finite() || self.reduction <= 0.0 {
            return Err(ConfigurationError::InvalidReduction(self.reduction));
        }
        if !self.length.is_finite() {
            return Err(ConfigurationError::InvalidLength(self.length));
        }
        let (x, y) = self.position.x_y();
        if !(x.is_finite() && y.is_finite() && self.heading.is_finite()) {
            return Err(ConfigurationError::InvalidPose {
                x,
                y,
                heading: self.heading,
            });
        }
        Ok(())
    }
}

/// What happened during a render pass, besides the drawing itself.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RenderReport {
    /// Number of lines drawn.
    pub segments: usize,
    /// Structural problems, in string order. Each was treated as a no-op.
    pub diagnostics: Vec<StructuralError>,
    /// Color digits with no entry in the color table, each listed once.
    pub unresolved_colors: Vec<char>,
    /// Branches still open when the string ended.
    pub open_branches: usize,
}

impl RenderReport {
    /// True when nothing was unbalanced or unresolved.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty() && self.unresolved_colors.is_empty() && self.open_branches == 0
    }

    fn structural(&mut self, error: StructuralError) {
        warn!(%error, "structural error while rendering");
        self.diagnostics.push(error);
    }

    fn unresolved(&mut self, symbol: char) {
        if !self.unresolved_colors.contains(&symbol) {
            warn!(symbol = %symbol, "color symbol missing from color table");
            self.unresolved_colors.push(symbol);
        }
    }
}

/// Interprets expanded strings of one [`LSystem`], using its angle, color
/// table and alphabet. Holds no per-render state, so one turtle can draw any
/// number of instances.
#[derive(Clone, Copy, Debug)]
pub struct Turtle<'a> {
    system: &'a LSystem,
}

impl<'a> Turtle<'a> {
    pub fn new(system: &'a LSystem) -> Turtle<'a> {
        Turtle { system }
    }

    pub fn system(&self) -> &'a LSystem {
        self.system
    }

    /// Walks `lpath` once and draws it onto `canvas`.
    ///
    /// Only bad `params` fail the call. Unbalanced closes, pushes past
    /// `max_depth` and unknown color digits are reported in the returned
    /// [`RenderReport`] and otherwise ignored. The whole string is always
    /// consumed.
    pub fn render<C: Canvas + ?Sized>(
        &self,
        lpath: &str,
        params: &RenderParams,
        canvas: &mut C,
    ) -> Result<RenderReport, ConfigurationError> {
        params.validate()?;

        let angle = self.system.angle();
        let mut cursor = Cursor::new(params.position, params.heading, params.length);
        let mut stack: Vec<Cursor> = vec![];
        // pushes dropped at max_depth, their pops are dropped too
        let mut skipped = 0usize;
        let mut stroke: Option<CssColor> = None;
        let mut report = RenderReport::default();

        for (index, symbol) in self.system.alphabet().tokenize(lpath).enumerate() {
            match symbol {
                Symbol::Forward => {
                    let color = cursor
                        .color
                        .and_then(|c| self.system.color(c))
                        .unwrap_or(&params.base_color);
                    if stroke.as_ref() != Some(color) {
                        canvas.set_stroke_color(color);
                        stroke = Some(color.clone());
                    }
                    let from = cursor.position;
                    let to = cursor.fwd();
                    canvas.draw_line(from, to);
                    report.segments += 1;
                }
                Symbol::Turn(direction) => cursor.turn(direction, angle),
                Symbol::Push => match params.max_depth {
                    Some(limit) if stack.len() >= limit => {
                        skipped += 1;
                        report.structural(StructuralError::DepthLimit { index, limit });
                    }
                    _ => {
                        stack.push(cursor.clone());
                        cursor.length /= params.reduction;
                    }
                },
                Symbol::Pop => {
                    if skipped > 0 {
                        skipped -= 1;
                    } else {
                        match stack.pop() {
                            Some(saved) => cursor = saved,
                            None => report.structural(StructuralError::UnbalancedClose { index }),
                        }
                    }
                }
                Symbol::ColorSelect(c) => {
                    if self.system.color(c).is_some() {
                        cursor.color = Some(c);
                    } else {
                        report.unresolved(c);
                    }
                }
                Symbol::Inert => {}
            }
        }

        report.open_branches = stack.len() + skipped;
        debug!(
            segments = report.segments,
            diagnostics = report.diagnostics.len(),
            open_branches = report.open_branches,
            "rendered l-system"
        );
        Ok(report)
    }
}
