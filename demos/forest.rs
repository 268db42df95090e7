//! Renders a forest scene to `forest.svg`: a gradient sky and ground, nine
//! conifers along a parabola, a row of flowers and scattered dandelions.
//!
//! `RUST_LOG=debug cargo run --example forest` to watch the expansion.

use std::path::Path;

use anyhow::Result;
use geo_types::Point;
use lindenmayer_plotter::prelude::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut canvas = SvgCanvas::new(500.0, 500.0).y_up(true);
    let mut rng = SmallRng::seed_from_u64(2024);

    // Sky, fading to white towards the top
    for y in 300..=500 {
        let saturation = 100.0 - (y - 300) as f32 / 2.0;
        canvas.set_stroke_color(&hsba(270.0, saturation, 70.0, 100.0));
        canvas.draw_line(Point::new(0.0, y as f64), Point::new(canvas.width(), y as f64));
    }
    // Ground, darker towards the bottom
    for y in 0..=300 {
        let brightness = 50.0 - y as f32 / 30.0 * 3.0;
        canvas.set_stroke_color(&hsba(25.0, 68.0, brightness, 100.0));
        canvas.draw_line(Point::new(0.0, y as f64), Point::new(canvas.width(), y as f64));
    }

    let tree = LSystem::try_from(presets::coniferous_tree())?;
    let flower = LSystem::try_from(presets::purple_flower())?;
    let dandelion = LSystem::try_from(presets::dandelion())?;

    for x in 1..=25 {
        let params = RenderParams::new(Point::new(20.0 * x as f64, 100.0), 0.0, 3.0, 1.5);
        VisualizedSystem::new(&flower, params).render_full_system(&mut canvas, &mut rng)?;
    }

    for _ in 0..10 {
        let at = Point::new(rng.gen_range(0.0..500.0), rng.gen_range(0.0..300.0));
        let params = RenderParams::new(at, 90.0, 4.0, 0.6);
        VisualizedSystem::new(&dandelion, params).render_full_system(&mut canvas, &mut rng)?;
    }

    // Trees hang from their tops along y = a(x - h)^2 + k, smaller further back
    let vertex: Point<f64> = Point::new(450.0, 350.0);
    let other: Point<f64> = Point::new(100.0, 225.0);
    let a = (other.y() - vertex.y()) / (other.x() - vertex.x()).powi(2);
    for i in 0..9 {
        let x = i as f64 * 90.0 + 75.0;
        let y = a * (x - vertex.x()).powi(2) + vertex.y();
        let length = 27.0 - y / 16.0;
        let params = RenderParams::new(Point::new(x, y), 270.0, length, 1.25);
        let report = VisualizedSystem::new(&tree, params)
            .render_full_system(&mut canvas, &mut rng)?;
        tracing::info!(x, y, segments = report.segments, "tree drawn");
    }

    canvas.save(Path::new("forest.svg"))?;
    println!("Wrote forest.svg ({} lines)", canvas.line_count());
    Ok(())
}
