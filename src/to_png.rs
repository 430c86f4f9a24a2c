#![cfg(feature = "host")]
//! Host-side PNG previews of a [`PixelMatrix`], drawn as round LED dots in
//! logical `(x, y)` order regardless of wiring.

use core::error::Error;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use png::{BitDepth, ColorType, Encoder, ScaledFloat};

use crate::{PixelMatrix, Point};

/// Inverse gamma applied to LED values so the preview looks like a lit panel.
pub const PREVIEW_INVERSE_GAMMA: f32 = 2.2;

/// Render `matrix` into a PNG no larger than `target_max_dimension` on either side.
///
/// # Errors
///
/// Returns any I/O or PNG encoding error.
pub fn write_matrix_png(
    matrix: &PixelMatrix<'_>,
    output_path: impl AsRef<Path>,
    target_max_dimension: u32,
) -> Result<(), Box<dyn Error>> {
    write_matrix_png_with_gamma(matrix, output_path, target_max_dimension, PREVIEW_INVERSE_GAMMA)
}

/// Like [`write_matrix_png`] with a custom preview inverse gamma (1.0 is linear).
///
/// # Errors
///
/// Returns any I/O or PNG encoding error.
///
/// # Panics
///
/// Panics if `preview_inverse_gamma` or `target_max_dimension` is not positive.
pub fn write_matrix_png_with_gamma(
    matrix: &PixelMatrix<'_>,
    output_path: impl AsRef<Path>,
    target_max_dimension: u32,
    preview_inverse_gamma: f32,
) -> Result<(), Box<dyn Error>> {
    assert!(preview_inverse_gamma > 0.0, "preview_inverse_gamma must be positive");
    let output_path = output_path.as_ref();
    let geometry = DotGeometry::fit(matrix.width(), matrix.height(), target_max_dimension);
    let (width, height, pixels) = render_dots(matrix, geometry, preview_inverse_gamma);

    let mut writer = png_encoder(output_path, width, height)?.write_header()?;
    writer.write_image_data(&pixels)?;
    writer.finish()?;
    info!("to_png: wrote {}x{} preview", width, height);
    Ok(())
}

/// Render a sequence of matrices into a looping APNG.
///
/// # Errors
///
/// Returns any I/O or PNG encoding error, or an error if `frame_delay_ms`
/// does not fit in 16 bits.
///
/// # Panics
///
/// Panics if `frames` is empty, if frames differ in size, or if
/// `frame_delay_ms` or `target_max_dimension` is zero.
pub fn write_matrices_apng(
    frames: &[PixelMatrix<'_>],
    output_path: impl AsRef<Path>,
    target_max_dimension: u32,
    frame_delay_ms: u32,
) -> Result<(), Box<dyn Error>> {
    let Some(first) = frames.first() else {
        panic!("frames must not be empty");
    };
    assert!(frame_delay_ms > 0, "frame_delay_ms must be positive");
    assert!(
        frames
            .iter()
            .all(|frame| frame.width() == first.width() && frame.height() == first.height()),
        "frames must share dimensions"
    );
    let delay_num = u16::try_from(frame_delay_ms)?;
    let frame_count = u32::try_from(frames.len())?;
    let geometry = DotGeometry::fit(first.width(), first.height(), target_max_dimension);

    let rendered: Vec<(u32, u32, Vec<u8>)> = frames
        .iter()
        .map(|frame| render_dots(frame, geometry, PREVIEW_INVERSE_GAMMA))
        .collect();
    let (width, height, _) = rendered[0];

    let mut encoder = png_encoder(output_path.as_ref(), width, height)?;
    encoder.set_animated(frame_count, 0)?;
    let mut writer = encoder.write_header()?;
    for (_, _, pixels) in &rendered {
        writer.set_frame_delay(delay_num, 1000)?;
        writer.write_image_data(pixels)?;
    }
    writer.finish()?;
    info!("to_png: wrote {} frame animation", frame_count);
    Ok(())
}

fn png_encoder(
    output_path: &Path,
    width: u32,
    height: u32,
) -> Result<Encoder<'static, BufWriter<File>>, Box<dyn Error>> {
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(output_path)?;
    let mut encoder = Encoder::new(BufWriter::new(file), width, height);
    encoder.set_color(ColorType::Rgb);
    encoder.set_depth(BitDepth::Sixteen);
    encoder.set_source_gamma(ScaledFloat::new(1.0));
    Ok(encoder)
}

/// Pixel sizes of one LED cell in the preview.
#[derive(Clone, Copy, Debug)]
struct DotGeometry {
    cell_size: u32,
    radius: u32,
}

impl DotGeometry {
    /// Largest cell size whose image (cells plus a one-radius border) fits
    /// within `target_max_dimension`. Cells never shrink below 4 pixels.
    fn fit(panel_width: usize, panel_height: usize, target_max_dimension: u32) -> Self {
        assert!(target_max_dimension > 0, "target_max_dimension must be positive");
        let longest_side = panel_width.max(panel_height).max(1) as u32;
        let mut cell_size = target_max_dimension.max(4);
        while cell_size > 4 {
            let geometry = Self::with_cell_size(cell_size);
            if longest_side * cell_size + geometry.radius * 2 <= target_max_dimension {
                return geometry;
            }
            cell_size -= 1;
        }
        Self::with_cell_size(cell_size)
    }

    fn with_cell_size(cell_size: u32) -> Self {
        let margin = (cell_size / 8).max(1);
        Self {
            cell_size,
            radius: (cell_size - margin * 2) / 2,
        }
    }
}

/// 16-bit big-endian RGB bytes for the whole preview image.
fn render_dots(
    matrix: &PixelMatrix<'_>,
    geometry: DotGeometry,
    preview_inverse_gamma: f32,
) -> (u32, u32, Vec<u8>) {
    let DotGeometry { cell_size, radius } = geometry;
    let border = radius;
    let width = matrix.width() as u32 * cell_size + border * 2;
    let height = matrix.height() as u32 * cell_size + border * 2;
    let mut bytes = vec![0u8; (width * height * 6) as usize];

    let center = (cell_size as f32 - 1.0) / 2.0;
    let outer_radius = radius as f32;
    let inner_radius = (radius - radius / 3) as f32;

    for y_index in 0..matrix.height() {
        for x_index in 0..matrix.width() {
            let color = matrix.color_at(Point::from((x_index, y_index)));
            let linear = color
                .rgb()
                .map(|channel| (f32::from(channel) / 255.0).powf(preview_inverse_gamma));
            let origin_x = border + x_index as u32 * cell_size;
            let origin_y = border + y_index as u32 * cell_size;

            for local_y in 0..cell_size {
                for local_x in 0..cell_size {
                    let distance =
                        (local_x as f32 - center).hypot(local_y as f32 - center);
                    if distance > outer_radius {
                        continue;
                    }
                    let intensity = if distance <= inner_radius {
                        1.0
                    } else {
                        (1.0 - (distance - inner_radius) / (outer_radius - inner_radius)).max(0.0)
                    };
                    let offset =
                        (((origin_y + local_y) * width + origin_x + local_x) * 6) as usize;
                    for (channel_index, level) in linear.iter().enumerate() {
                        let value = ((level * intensity).clamp(0.0, 1.0) * 65535.0).round() as u16;
                        let start = offset + channel_index * 2;
                        bytes[start..start + 2].copy_from_slice(&value.to_be_bytes());
                    }
                }
            }
        }
    }

    (width, height, bytes)
}
