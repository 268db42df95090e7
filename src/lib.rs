//! Stochastic L-system line art
//!
//! Grammar-driven string rewriting ([`l_system`]) feeding a turtle
//! ([`turtle`]) that turns the result into colored line segments on whatever
//! [`canvas::Canvas`] you hand it. Grammars are plain data
//! ([`l_system::GrammarDefinition`]) and can live in RON files.
//!
//! ```rust
//! use lindenmayer_plotter::prelude::*;
//! use geo_types::Point;
//!
//! let tree = LSystem::try_from(presets::coniferous_tree()).unwrap();
//! let mut canvas = SvgCanvas::new(500.0, 500.0).y_up(true);
//! let params = RenderParams::new(Point::new(250.0, 450.0), 270.0, 12.0, 1.25);
//! let report = VisualizedSystem::new(&tree, params)
//!     .render_full_system(&mut canvas, &mut rand::thread_rng())
//!     .unwrap();
//! assert!(report.is_clean());
//! ```

/// Canvas trait plus recording and SVG implementations.
pub mod canvas;

/// HSB color helpers on top of `csscolorparser`.
pub mod color;

pub mod errors;

/// L-system implementation, with weighted stochastic expansion
pub mod l_system;

/// Character to turtle instruction classification
pub mod symbol;

/// Turtle graphics implementation, interpreting expanded L-systems
pub mod turtle;

/// One stop shopping for the common types.
pub mod prelude {
    pub use crate::canvas::{Canvas, LineRecorder, SvgCanvas};
    pub use crate::color::{hsba, CssColor};
    pub use crate::errors::{ConfigurationError, LSystemError, ResourceLimitError, StructuralError};
    pub use crate::l_system::{presets, Chooser, GrammarDefinition, LSystem, RuleSet};
    pub use crate::turtle::{RenderParams, RenderReport, Turtle, VisualizedSystem};
}
