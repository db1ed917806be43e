// src/draw.rs
use image::{Rgb, RgbImage};
use ndarray::Array1;
use thiserror::Error;
use tiny_skia::{Paint, PathBuilder, Pixmap, Stroke, Transform};

#[derive(Debug, Error)]
pub enum DrawError {
    #[error("zero-area canvas: {width}x{height}")]
    InvalidCanvas { width: u32, height: u32 },
    #[error("degenerate path: fewer than two points")]
    DegeneratePath,
}

/// Per-channel gradient ramps for a canvas of the given height.
///
/// Scanline `i` interpolates at ratio `i / height`, so row 0 carries the
/// top color exactly and the last row stops one step short of the bottom
/// color. Channels are truncated, not rounded.
pub fn channel_ramps(height: u32, top: Rgb<u8>, bottom: Rgb<u8>) -> [Array1<u8>; 3] {
    let h = height as f64;
    let ratios = Array1::from_shape_fn(height as usize, |i| i as f64 / h);
    [0usize, 1, 2].map(|c| {
        let (start, end) = (top.0[c] as f64, bottom.0[c] as f64);
        ratios.mapv(|r| (start + r * (end - start)) as u8)
    })
}

/// Overwrite the whole canvas with the vertical gradient.
pub fn fill_gradient(canvas: &mut RgbImage, top: Rgb<u8>, bottom: Rgb<u8>) {
    let ramps = channel_ramps(canvas.height(), top, bottom);
    for (_, y, pixel) in canvas.enumerate_pixels_mut() {
        *pixel = Rgb([
            ramps[0][y as usize],
            ramps[1][y as usize],
            ramps[2][y as usize],
        ]);
    }
}

/// Transparent RGBA layer that vector strokes accumulate into before a
/// single composite onto the RGB canvas.
pub struct VectorLayer {
    pixmap: Pixmap,
}

impl VectorLayer {
    pub fn new(width: u32, height: u32) -> Result<Self, DrawError> {
        let pixmap = Pixmap::new(width, height)
            .ok_or(DrawError::InvalidCanvas { width, height })?;
        Ok(Self { pixmap })
    }

    /// Stroke an open polyline (or a closed ring) through `points`.
    pub fn stroke_polyline(
        &mut self,
        points: &[(f64, f64)],
        color: Rgb<u8>,
        width: f32,
        close: bool,
    ) -> Result<(), DrawError> {
        if points.len() < 2 {
            return Err(DrawError::DegeneratePath);
        }

        let mut pb = PathBuilder::new();
        pb.move_to(points[0].0 as f32, points[0].1 as f32);
        for p in &points[1..] {
            pb.line_to(p.0 as f32, p.1 as f32);
        }
        if close {
            pb.close();
        }
        let path = pb.finish().ok_or(DrawError::DegeneratePath)?;

        let mut paint = Paint::default();
        paint.set_color_rgba8(color.0[0], color.0[1], color.0[2], 255);
        paint.anti_alias = true;

        let stroke = Stroke {
            width,
            ..Stroke::default()
        };
        self.pixmap
            .stroke_path(&path, &paint, &stroke, Transform::identity(), None);
        Ok(())
    }

    /// Stroke the outline of an axis-aligned rectangle.
    pub fn stroke_rect(
        &mut self,
        (x0, y0, x1, y1): (f64, f64, f64, f64),
        color: Rgb<u8>,
        width: f32,
    ) -> Result<(), DrawError> {
        self.stroke_polyline(&[(x0, y0), (x1, y0), (x1, y1), (x0, y1)], color, width, true)
    }

    /// Source-over composite of the accumulated strokes onto `canvas`.
    /// Layer pixels are premultiplied RGBA.
    pub fn composite_onto(&self, canvas: &mut RgbImage) {
        let width = canvas.width() as usize;
        let pixels = self.pixmap.pixels();
        for (x, y, pixel) in canvas.enumerate_pixels_mut() {
            let src = pixels[y as usize * width + x as usize];
            let a = src.alpha() as u32;
            if a == 0 {
                continue;
            }
            let over = |s: u8, d: u8| -> u8 {
                (s as u32 + (d as u32 * (255 - a) + 127) / 255) as u8
            };
            *pixel = Rgb([
                over(src.red(), pixel.0[0]),
                over(src.green(), pixel.0[1]),
                over(src.blue(), pixel.0[2]),
            ]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOP: Rgb<u8> = Rgb([14, 27, 56]);
    const BOTTOM: Rgb<u8> = Rgb([190, 132, 190]);

    #[test]
    fn ramp_starts_at_top_color() {
        for height in [320u32, 630] {
            let ramps = channel_ramps(height, TOP, BOTTOM);
            assert_eq!(ramps[0][0], 14);
            assert_eq!(ramps[1][0], 27);
            assert_eq!(ramps[2][0], 56);
        }
    }

    #[test]
    fn ramp_ends_near_bottom_color() {
        for height in [320u32, 630] {
            let ramps = channel_ramps(height, TOP, BOTTOM);
            let last = height as usize - 1;
            for (c, end) in [190u8, 132, 190].iter().enumerate() {
                let diff = (*end as i32 - ramps[c][last] as i32).abs();
                assert!(diff <= 1, "channel {} off by {}", c, diff);
            }
        }
    }

    #[test]
    fn ramps_are_monotonic() {
        let ramps = channel_ramps(630, TOP, BOTTOM);
        for ramp in &ramps {
            for pair in ramp.as_slice().unwrap().windows(2) {
                assert!(pair[1] >= pair[0]);
            }
        }
    }

    #[test]
    fn gradient_fills_every_row() {
        let mut canvas = RgbImage::from_pixel(4, 8, Rgb([0, 0, 0]));
        fill_gradient(&mut canvas, TOP, BOTTOM);
        assert_eq!(*canvas.get_pixel(0, 0), TOP);
        assert_eq!(canvas.get_pixel(0, 7), canvas.get_pixel(3, 7));
        assert_ne!(*canvas.get_pixel(0, 7), TOP);
    }

    #[test]
    fn zero_area_layer_is_rejected() {
        assert!(matches!(
            VectorLayer::new(0, 32),
            Err(DrawError::InvalidCanvas { .. })
        ));
    }

    #[test]
    fn single_point_polyline_is_rejected() {
        let mut layer = VectorLayer::new(16, 16).unwrap();
        let result = layer.stroke_polyline(&[(4.0, 4.0)], Rgb([255, 0, 0]), 2.0, false);
        assert!(matches!(result, Err(DrawError::DegeneratePath)));
    }

    #[test]
    fn composite_blends_stroke_and_leaves_background() {
        let mut layer = VectorLayer::new(32, 32).unwrap();
        layer
            .stroke_polyline(&[(0.0, 16.0), (32.0, 16.0)], Rgb([255, 0, 0]), 4.0, false)
            .unwrap();

        let mut canvas = RgbImage::from_pixel(32, 32, Rgb([0, 0, 0]));
        layer.composite_onto(&mut canvas);

        assert!(canvas.get_pixel(16, 16).0[0] > 200, "stroke core missing");
        assert_eq!(*canvas.get_pixel(16, 2), Rgb([0, 0, 0]), "background touched");
    }
}
