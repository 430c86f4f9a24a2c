#![allow(missing_docs)]
//! Host-level tests for the coordinate ↔ buffer-index transform.

use pixel_matrix::{MatrixLayout, MatrixOptions, Point};

fn all_options() -> Vec<MatrixOptions> {
    let mut options = Vec::new();
    for x_mirrored in [false, true] {
        for y_mirrored in [false, true] {
            for zigzag in [false, true] {
                options.push(MatrixOptions {
                    x_mirrored,
                    y_mirrored,
                    zigzag,
                });
            }
        }
    }
    options
}

/// Buffer index for every `(x, y)`, row by row, as a grid.
fn index_grid(layout: &MatrixLayout) -> Vec<Vec<usize>> {
    (0..layout.height())
        .map(|y_index| {
            (0..layout.width())
                .map(|x_index| {
                    layout
                        .index_of(Point::from((x_index, y_index)))
                        .expect("in-bounds point must have an index")
                })
                .collect()
        })
        .collect()
}

#[test]
fn plain_layout_is_column_major() {
    let layout = MatrixLayout::new(3, 2, MatrixOptions::default());
    assert_eq!(index_grid(&layout), vec![vec![0, 2, 4], vec![1, 3, 5]]);
}

#[test]
fn zigzag_reverses_even_columns() {
    let layout = MatrixLayout::new(4, 4, MatrixOptions::zigzag());
    assert_eq!(layout.index_of(Point::new(0.0, 0.0)), Some(3));
    assert_eq!(layout.index_of(Point::new(1.0, 0.0)), Some(4));
    assert_eq!(
        index_grid(&layout),
        vec![
            vec![3, 4, 11, 12],
            vec![2, 5, 10, 13],
            vec![1, 6, 9, 14],
            vec![0, 7, 8, 15],
        ]
    );
}

#[test]
fn x_mirror_reflects_columns() {
    let options = MatrixOptions {
        x_mirrored: true,
        ..MatrixOptions::default()
    };
    let layout = MatrixLayout::new(3, 2, options);
    assert_eq!(index_grid(&layout), vec![vec![4, 2, 0], vec![5, 3, 1]]);
}

#[test]
fn y_mirror_reflects_rows() {
    let options = MatrixOptions {
        y_mirrored: true,
        ..MatrixOptions::default()
    };
    let layout = MatrixLayout::new(3, 2, options);
    assert_eq!(index_grid(&layout), vec![vec![1, 3, 5], vec![0, 2, 4]]);
}

#[test]
fn zigzag_parity_is_taken_after_x_mirror() {
    // Logical column 0 lands on physical column 2 (even), so it is reversed.
    let options = MatrixOptions {
        x_mirrored: true,
        y_mirrored: false,
        zigzag: true,
    };
    let layout = MatrixLayout::new(3, 2, options);
    assert_eq!(index_grid(&layout), vec![vec![5, 2, 1], vec![4, 3, 0]]);
}

#[test]
fn zigzag_with_y_mirror_cancels_on_even_columns() {
    let options = MatrixOptions {
        x_mirrored: false,
        y_mirrored: true,
        zigzag: true,
    };
    let layout = MatrixLayout::new(3, 2, options);
    assert_eq!(index_grid(&layout), vec![vec![0, 3, 4], vec![1, 2, 5]]);
}

#[test]
fn fractional_points_are_floored() {
    let layout = MatrixLayout::new(4, 4, MatrixOptions::default());
    assert_eq!(layout.index_of(Point::new(1.9, 2.5)), Some(6));
    assert_eq!(layout.index_of(Point::new(3.99, 0.0)), Some(12));
}

#[test]
fn bounds_are_checked_on_the_raw_point() {
    let options = MatrixOptions {
        x_mirrored: true,
        y_mirrored: true,
        zigzag: true,
    };
    let layout = MatrixLayout::new(4, 3, options);
    for point in [
        Point::new(-0.5, 0.0),
        Point::new(0.0, -0.01),
        Point::new(4.0, 0.0),
        Point::new(0.0, 3.0),
        Point::new(f32::NAN, 1.0),
    ] {
        assert!(layout.is_out_of_bounds(point), "{point:?} must be out of bounds");
        assert_eq!(layout.index_of(point), None);
    }
    assert!(!layout.is_out_of_bounds(Point::new(3.5, 2.5)));
}

#[test]
fn identity_layout_round_trips() {
    let layout = MatrixLayout::new(5, 3, MatrixOptions::default());
    for y_index in 0..3_usize {
        for x_index in 0..5_usize {
            let point = Point::from((x_index, y_index));
            let index = layout.index_of(point).expect("in bounds");
            assert_eq!(layout.coord_of(index), Some(point));
        }
    }
}

#[test]
fn every_option_combination_round_trips_integer_points() {
    // The two directions apply their corrections independently; this pins
    // that they still agree on integer points for every wiring.
    for options in all_options() {
        for (width, height) in [(4, 4), (3, 2), (5, 3), (1, 4), (4, 1)] {
            let layout = MatrixLayout::new(width, height, options);
            let mut seen = vec![false; layout.len()];
            for y_index in 0..height {
                for x_index in 0..width {
                    let point = Point::from((x_index, y_index));
                    let index = layout.index_of(point).expect("in bounds");
                    assert!(!seen[index], "{options:?} {width}x{height}: index {index} reused");
                    seen[index] = true;
                    assert_eq!(layout.coord_of(index), Some(point), "{options:?} {width}x{height}");
                }
            }
            assert!(seen.iter().all(|&hit| hit));
        }
    }
}

#[test]
fn fractional_points_do_not_round_trip() {
    let layout = MatrixLayout::new(4, 4, MatrixOptions::zigzag());
    let point = Point::new(1.5, 2.75);
    let index = layout.index_of(point).expect("in bounds");
    assert_eq!(layout.coord_of(index), Some(Point::new(1.0, 2.0)));
    assert_ne!(layout.coord_of(index), Some(point));
}

#[test]
fn coord_of_past_the_end_is_none() {
    let layout = MatrixLayout::new(3, 2, MatrixOptions::zigzag());
    assert_eq!(layout.coord_of(5), Some(Point::new(2.0, 0.0)));
    assert_eq!(layout.coord_of(6), None);
}

#[test]
fn options_persist_through_postcard() {
    let options = MatrixOptions {
        x_mirrored: true,
        y_mirrored: false,
        zigzag: true,
    };
    let mut buffer = [0u8; MatrixOptions::MAX_ENCODED_LEN];
    let encoded = options.to_slice(&mut buffer).expect("buffer is large enough");
    assert_eq!(encoded.to_vec(), vec![1, 0, 1]);
    assert_eq!(MatrixOptions::from_bytes(&buffer), Ok(options));
}

#[test]
fn options_reject_bad_storage() {
    let mut too_small = [0u8; 1];
    assert_eq!(
        MatrixOptions::default().to_slice(&mut too_small),
        Err(pixel_matrix::Error::FormatError)
    );
    assert_eq!(
        MatrixOptions::from_bytes(&[2, 0, 0]),
        Err(pixel_matrix::Error::StorageCorrupted)
    );
    assert_eq!(
        MatrixOptions::from_bytes(&[1]),
        Err(pixel_matrix::Error::StorageCorrupted)
    );
}
