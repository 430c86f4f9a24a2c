//! Render a 12x8 serpentine panel to a PNG: a dim hue sweep with a soft white
//! dot stamped over it.
//!
//! Run with `--features host`; the output path defaults to
//! `target/stamp_preview.png`.

use std::error::Error;

use pixel_matrix::{Color, MatrixOptions, PixelMatrix, Point, StampOptions, to_png};

const WIDTH: usize = 12;
const HEIGHT: usize = 8;

// A 4x4 dot with soft edges.
const DOT: [[f32; 4]; 4] = [
    [0.0, 0.4, 0.4, 0.0],
    [0.4, 1.0, 1.0, 0.4],
    [0.4, 1.0, 1.0, 0.4],
    [0.0, 0.4, 0.4, 0.0],
];

fn main() {
    if let Err(err) = inner_main() {
        eprintln!("stamp_preview: {err}");
        std::process::exit(1);
    }
}

fn inner_main() -> Result<(), Box<dyn Error>> {
    let output_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| String::from("target/stamp_preview.png"));

    let mut matrix = PixelMatrix::new(WIDTH, HEIGHT, MatrixOptions::zigzag());

    // Hue changes along x; dimmed so the dot stands out.
    for x_index in 0..WIDTH {
        let hue = x_index as f64 / WIDTH as f64;
        let column_color = Color::from_hsv(hue, 1.0, 1.0).with_ratio(0.3);
        for y_index in 0..HEIGHT {
            matrix.set_color(Point::from((x_index, y_index)), column_color);
        }
    }

    // Hangs off the right edge on purpose: the overhang is clipped.
    matrix.set_matrix(&DOT, Color::WHITE, StampOptions::at(9, 2));

    to_png::write_matrix_png(&matrix, &output_path, 480)?;
    println!("wrote {output_path}");
    Ok(())
}
