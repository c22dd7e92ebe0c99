//! Strokes a circle and an open arc and prints the resulting contours.
//!
//! Usage:
//! ```text
//! cargo run --example stroke                     # thickness 20, outer
//! cargo run --example stroke -- 100 inner        # thickness, direction
//! RUST_LOG=fixstroke=debug cargo run --example stroke
//! ```

use fixstroke::geometry::Group;
use fixstroke::math::Point2;
use fixstroke::{Direction, FixedWidthStroke, Item, Path, StrokeOptions};

fn main() -> fixstroke::Result<()> {
    // Default: WARN for everything, INFO for fixstroke.
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("fixstroke=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let mut args = std::env::args().skip(1);
    let thickness = match args.next() {
        Some(arg) => arg.parse().unwrap_or(20.0),
        None => 20.0,
    };
    let direction = match args.next() {
        Some(arg) => arg.parse::<Direction>()?,
        None => Direction::Outer,
    };

    let options = StrokeOptions::new(thickness)?.with_direction(direction);
    let input = Group::new(vec![
        Path::circle(Point2::new(500.0, 500.0), 100.0).into(),
        Path::arc_through(
            Point2::new(200.0, 200.0),
            Point2::new(600.0, 600.0),
            Point2::new(1000.0, 200.0),
        )
        .into(),
    ]);

    let output = FixedWidthStroke::new(options).execute(&input.into())?;
    for (i, shape) in output.children.iter().enumerate() {
        print_shape(i, shape);
    }
    Ok(())
}

fn print_shape(index: usize, shape: &Item) {
    for (j, path) in shape.paths().into_iter().enumerate() {
        let points = path.ring_points();
        println!(
            "shape {index} contour {j}: {} vertices, length {:.3}",
            path.segments.len(),
            path.length()
        );
        for p in points.iter().take(4) {
            println!("  ({:.3}, {:.3})", p.x, p.y);
        }
        if points.len() > 4 {
            println!("  ...");
        }
    }
}
