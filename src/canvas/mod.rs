//! The drawing surface the turtle writes to. The renderer only ever sets a
//! stroke color and draws straight lines, it never reads anything back.
//!
//! Two surfaces ship with the crate: [`LineRecorder`], which keeps the draw
//! calls in order (handy for tests and post-processing), and [`SvgCanvas`],
//! which turns them into an SVG document.

use std::path::Path;

use anyhow::Result;
use csscolorparser::Color as CssColor;
use geo_types::{LineString, MultiLineString, Point};
use svg::node::element::Line;
use svg::Document;

use crate::color::{hex_rgb, opacity};

pub trait Canvas {
    /// Color for every line drawn after this call.
    fn set_stroke_color(&mut self, color: &CssColor);
    fn draw_line(&mut self, from: Point<f64>, to: Point<f64>);
    fn width(&self) -> f64;
    fn height(&self) -> f64;
}

impl<C: Canvas + ?Sized> Canvas for &mut C {
    fn set_stroke_color(&mut self, color: &CssColor) {
        (**self).set_stroke_color(color)
    }

    fn draw_line(&mut self, from: Point<f64>, to: Point<f64>) {
        (**self).draw_line(from, to)
    }

    fn width(&self) -> f64 {
        (**self).width()
    }

    fn height(&self) -> f64 {
        (**self).height()
    }
}

/// One call made against a canvas.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    StrokeColor(CssColor),
    Line { from: Point<f64>, to: Point<f64> },
}

/// A line together with the stroke color that was active when it was drawn.
#[derive(Clone, Debug, PartialEq)]
pub struct Segment {
    pub from: Point<f64>,
    pub to: Point<f64>,
    pub color: Option<CssColor>,
}

impl Segment {
    pub fn length(&self) -> f64 {
        let delta = self.to - self.from;
        delta.x().hypot(delta.y())
    }
}

/// A canvas that just remembers what it was asked to do.
#[derive(Clone, Debug, Default)]
pub struct LineRecorder {
    width: f64,
    height: f64,
    commands: Vec<DrawCommand>,
}

impl LineRecorder {
    pub fn new(width: f64, height: f64) -> LineRecorder {
        LineRecorder {
            width,
            height,
            commands: vec![],
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Every line, in draw order, with the color in effect at the time.
    pub fn segments(&self) -> Vec<Segment> {
        let mut color: Option<CssColor> = None;
        let mut segments = vec![];
        for command in &self.commands {
            match command {
                DrawCommand::StrokeColor(c) => color = Some(c.clone()),
                DrawCommand::Line { from, to } => segments.push(Segment {
                    from: *from,
                    to: *to,
                    color: color.clone(),
                }),
            }
        }
        segments
    }

    /// The lines as plain geometry, one two-point `LineString` each.
    pub fn to_multiline(&self) -> MultiLineString<f64> {
        self.segments()
            .iter()
            .map(|segment| LineString::from(vec![segment.from, segment.to]))
            .collect()
    }
}

impl Canvas for LineRecorder {
    fn set_stroke_color(&mut self, color: &CssColor) {
        self.commands.push(DrawCommand::StrokeColor(color.clone()));
    }

    fn draw_line(&mut self, from: Point<f64>, to: Point<f64>) {
        self.commands.push(DrawCommand::Line { from, to });
    }

    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }
}

/// Collects lines as SVG `<line>` elements. Later lines paint over earlier
/// ones, same as on a real canvas.
///
/// By default coordinates go straight into the SVG (y grows downwards). Call
/// [`SvgCanvas::y_up`] to flip them so y grows upwards from the bottom edge.
#[derive(Clone, Debug)]
pub struct SvgCanvas {
    width: f64,
    height: f64,
    y_up: bool,
    stroke: CssColor,
    stroke_width: f64,
    lines: Vec<Line>,
}

impl SvgCanvas {
    pub fn new(width: f64, height: f64) -> SvgCanvas {
        SvgCanvas {
            width,
            height,
            y_up: false,
            stroke: CssColor::from_rgba8(0, 0, 0, 255),
            stroke_width: 1.0,
            lines: vec![],
        }
    }

    pub fn y_up(mut self, y_up: bool) -> Self {
        self.y_up = y_up;
        self
    }

    pub fn stroke_width(mut self, stroke_width: f64) -> Self {
        self.stroke_width = stroke_width;
        self
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    fn y(&self, y: f64) -> f64 {
        if self.y_up {
            self.height - y
        } else {
            y
        }
    }

    pub fn to_document(&self) -> Document {
        self.lines.iter().cloned().fold(
            Document::new()
                .set("viewBox", (0.0, 0.0, self.width, self.height))
                .set("width", self.width)
                .set("height", self.height),
            |document, line| document.add(line),
        )
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        svg::save(path, &self.to_document())?;
        Ok(())
    }
}

impl Canvas for SvgCanvas {
    fn set_stroke_color(&mut self, color: &CssColor) {
        self.stroke = color.clone();
    }

    fn draw_line(&mut self, from: Point<f64>, to: Point<f64>) {
        let line = Line::new()
            .set("x1", from.x())
            .set("y1", self.y(from.y()))
            .set("x2", to.x())
            .set("y2", self.y(to.y()))
            .set("stroke", hex_rgb(&self.stroke))
            .set("stroke-opacity", opacity(&self.stroke))
            .set("stroke-width", self.stroke_width)
            .set("stroke-linecap", "round");
        self.lines.push(line);
    }

    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_recorder_segments_carry_color() {
        let red = CssColor::from_rgba8(255, 0, 0, 255);
        let mut canvas = LineRecorder::new(100.0, 50.0);
        canvas.draw_line(Point::new(0.0, 0.0), Point::new(3.0, 4.0));
        canvas.set_stroke_color(&red);
        canvas.draw_line(Point::new(3.0, 4.0), Point::new(3.0, 5.0));

        let segments = canvas.segments();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].color, None);
        assert!((segments[0].length() - 5.0).abs() < 1e-9);
        assert_eq!(segments[1].color, Some(red));
        assert_eq!(canvas.commands().len(), 3);
        assert_eq!(canvas.to_multiline().0.len(), 2);
        assert_eq!(canvas.width(), 100.0);
        assert_eq!(canvas.height(), 50.0);

        canvas.clear();
        assert!(canvas.commands().is_empty());
        assert!(canvas.segments().is_empty());
    }

    #[test]
    fn test_svg_output() {
        let mut canvas = SvgCanvas::new(200.0, 100.0).y_up(true).stroke_width(2.0);
        canvas.set_stroke_color(&CssColor::from_rgba8(0x12, 0x34, 0x56, 255));
        canvas.draw_line(Point::new(10.0, 10.0), Point::new(20.0, 30.0));
        assert_eq!(canvas.line_count(), 1);

        let text = canvas.to_document().to_string();
        assert!(text.contains("#123456"));
        assert!(text.contains("y1=\"90\""));
        assert!(text.contains("y2=\"70\""));
        assert!(text.contains("stroke-width=\"2\""));
    }

    #[test]
    fn test_canvas_through_mut_ref() {
        fn draw_twice<C: Canvas>(mut canvas: C) {
            canvas.draw_line(Point::new(0.0, 0.0), Point::new(1.0, 0.0));
            canvas.draw_line(Point::new(1.0, 0.0), Point::new(2.0, 0.0));
        }
        let mut canvas = LineRecorder::new(10.0, 10.0);
        draw_twice(&mut canvas);
        assert_eq!(canvas.segments().len(), 2);
    }
}
