//! Font resolution and text drawing.
//!
//! A handle is resolved per render step: the candidate TrueType files are
//! tried in order and the first one that parses wins; when none do, the
//! embedded 5x7 face takes over. Resolution is total and never panics.

use std::path::Path;

use image::{Rgb, RgbImage};
use swash::scale::{Render, ScaleContext, Source, StrikeWith};
use swash::zeno::{Format, Placement};
use thiserror::Error;
use tracing::debug;

use crate::assets;
use crate::minifont;

#[derive(Debug, Error)]
pub enum FontError {
    #[error("failed to read font file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse font: {0}")]
    Parse(String),
}

/// A usable font at a fixed pixel size.
pub enum FontHandle {
    TrueType(TrueTypeFont),
    Builtin(BuiltinFont),
}

impl FontHandle {
    /// Height in pixels of the rendered bounding box of `text`.
    pub fn ink_height(&self, text: &str) -> f64 {
        match self {
            FontHandle::TrueType(font) => font.ink_height(text),
            FontHandle::Builtin(font) => font.ink_height(),
        }
    }

    /// Draw `text` with its ascent box anchored at `(x, y_top)`.
    pub fn draw(&self, canvas: &mut RgbImage, x: f64, y_top: f64, text: &str, color: Rgb<u8>) {
        match self {
            FontHandle::TrueType(font) => font.draw(canvas, x, y_top, text, color),
            FontHandle::Builtin(font) => font.draw(canvas, x, y_top, text, color),
        }
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self, FontHandle::Builtin(_))
    }
}

/// Resolve a font at `size` pixels from the standard candidate chain.
pub fn resolve(size: f32) -> FontHandle {
    resolve_from(&assets::FONT_CANDIDATES, size)
}

/// First candidate that loads wins; the built-in face is the last resort.
pub fn resolve_from(candidates: &[&str], size: f32) -> FontHandle {
    for &path in candidates {
        match TrueTypeFont::from_file(Path::new(path), size) {
            Ok(font) => {
                debug!(path, "loaded font candidate");
                return FontHandle::TrueType(font);
            }
            Err(err) => debug!(path, %err, "font candidate rejected"),
        }
    }
    debug!("no font candidate loaded, using built-in face");
    FontHandle::Builtin(BuiltinFont::new(size))
}

/// A parsed TrueType face at a fixed pixel size.
///
/// The raw bytes are kept and the face re-parsed per operation; parsing was
/// validated at load time and ttf-parser makes it cheap.
pub struct TrueTypeFont {
    data: Vec<u8>,
    size: f32,
    units_per_em: u16,
    ascender: i16,
    descender: i16,
}

impl TrueTypeFont {
    pub fn from_file(path: &Path, size: f32) -> Result<Self, FontError> {
        let data = std::fs::read(path)?;
        let face = ttf_parser::Face::parse(&data, 0)
            .map_err(|e| FontError::Parse(format!("{e:?}")))?;
        let units_per_em = face.units_per_em();
        let ascender = face.ascender();
        let descender = face.descender();
        Ok(Self {
            data,
            size,
            units_per_em,
            ascender,
            descender,
        })
    }

    fn face(&self) -> Option<ttf_parser::Face<'_>> {
        ttf_parser::Face::parse(&self.data, 0).ok()
    }

    /// Font units to pixels at this handle's size.
    fn px(&self, units: i32) -> f64 {
        units as f64 * self.size as f64 / self.units_per_em as f64
    }

    fn ascent_px(&self) -> f64 {
        self.px(self.ascender as i32)
    }

    fn line_height_px(&self) -> f64 {
        self.px(self.ascender as i32 - self.descender as i32)
    }

    fn ink_height(&self, text: &str) -> f64 {
        let Some(face) = self.face() else {
            return self.line_height_px();
        };
        let mut y_min = i16::MAX;
        let mut y_max = i16::MIN;
        for ch in text.chars() {
            let Some(gid) = face.glyph_index(ch) else {
                continue;
            };
            if let Some(bbox) = face.glyph_bounding_box(gid) {
                y_min = y_min.min(bbox.y_min);
                y_max = y_max.max(bbox.y_max);
            }
        }
        if y_min > y_max {
            return self.line_height_px();
        }
        self.px(y_max as i32 - y_min as i32)
    }

    fn draw(&self, canvas: &mut RgbImage, x: f64, y_top: f64, text: &str, color: Rgb<u8>) {
        let Some(face) = self.face() else { return };
        let Some(font_ref) = swash::FontRef::from_index(&self.data, 0) else {
            return;
        };

        let mut context = ScaleContext::new();
        let mut scaler = context.builder(font_ref).size(self.size).build();
        let mut render = Render::new(&[
            Source::ColorOutline(0),
            Source::ColorBitmap(StrikeWith::BestFit),
            Source::Outline,
        ]);
        render.format(Format::Alpha);

        let baseline = y_top + self.ascent_px();
        let mut pen_x = x;
        for ch in text.chars() {
            let gid = face.glyph_index(ch).unwrap_or(ttf_parser::GlyphId(0));
            if let Some(image) = render.render(&mut scaler, gid.0) {
                blit_coverage(canvas, &image.data, &image.placement, pen_x, baseline, color);
            }
            let advance = face.glyph_hor_advance(gid).unwrap_or(0);
            pen_x += self.px(advance as i32);
        }
    }
}

/// Blend an alpha coverage mask over the canvas at the pen position.
fn blit_coverage(
    canvas: &mut RgbImage,
    mask: &[u8],
    placement: &Placement,
    pen_x: f64,
    baseline: f64,
    color: Rgb<u8>,
) {
    let origin_x = pen_x.round() as i64 + placement.left as i64;
    let origin_y = baseline.round() as i64 - placement.top as i64;
    for row in 0..placement.height {
        let py = origin_y + row as i64;
        if py < 0 || py >= canvas.height() as i64 {
            continue;
        }
        for col in 0..placement.width {
            let px = origin_x + col as i64;
            if px < 0 || px >= canvas.width() as i64 {
                continue;
            }
            let coverage = mask[(row * placement.width + col) as usize] as u32;
            if coverage == 0 {
                continue;
            }
            let pixel = canvas.get_pixel_mut(px as u32, py as u32);
            for c in 0..3 {
                let fg = color.0[c] as u32;
                let bg = pixel.0[c] as u32;
                pixel.0[c] = ((fg * coverage + bg * (255 - coverage) + 127) / 255) as u8;
            }
        }
    }
}

/// The embedded 5x7 face, integer-scaled to approximate the requested size.
pub struct BuiltinFont {
    scale: u32,
}

impl BuiltinFont {
    pub fn new(size: f32) -> Self {
        let scale = (size / minifont::CELL_HEIGHT as f32).round().max(1.0) as u32;
        Self { scale }
    }

    fn ink_height(&self) -> f64 {
        (minifont::CELL_HEIGHT * self.scale) as f64
    }

    /// Cell plus one column of spacing.
    fn advance(&self) -> i64 {
        ((minifont::CELL_WIDTH + 1) * self.scale) as i64
    }

    fn draw(&self, canvas: &mut RgbImage, x: f64, y_top: f64, text: &str, color: Rgb<u8>) {
        let top = y_top.round() as i64;
        let mut pen_x = x.round() as i64;
        for ch in text.chars() {
            let rows = minifont::glyph(ch);
            for (r, bits) in rows.into_iter().enumerate() {
                for c in 0..minifont::CELL_WIDTH {
                    if bits & (1 << (minifont::CELL_WIDTH - 1 - c)) == 0 {
                        continue;
                    }
                    self.fill_cell(
                        canvas,
                        pen_x + (c * self.scale) as i64,
                        top + (r as u32 * self.scale) as i64,
                        color,
                    );
                }
            }
            pen_x += self.advance();
        }
    }

    fn fill_cell(&self, canvas: &mut RgbImage, x: i64, y: i64, color: Rgb<u8>) {
        for dy in 0..self.scale as i64 {
            for dx in 0..self.scale as i64 {
                let (px, py) = (x + dx, y + dy);
                if px < 0 || py < 0 || px >= canvas.width() as i64 || py >= canvas.height() as i64 {
                    continue;
                }
                canvas.put_pixel(px as u32, py as u32, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MISSING: [&str; 3] = [
        "/nonexistent/fonts/alpha.ttf",
        "/nonexistent/fonts/bravo.ttf",
        "/nonexistent/fonts/charlie.ttf",
    ];

    #[test]
    fn resolution_falls_back_when_all_candidates_are_absent() {
        let font = resolve_from(&MISSING, 32.0);
        assert!(font.is_builtin());
        assert!(font.ink_height("CoralLedger Blue") > 0.0);
    }

    #[test]
    fn resolution_always_yields_a_usable_handle() {
        // Whatever the host filesystem looks like, the chain terminates in
        // a handle that can measure and draw.
        let font = resolve(48.0);
        assert!(font.ink_height("CoralLedger Blue") > 0.0);
    }

    #[test]
    fn junk_font_file_is_a_parse_error() {
        let path = std::env::temp_dir().join("brand_assets_junk_font.ttf");
        std::fs::write(&path, b"this is not a font").unwrap();
        let result = TrueTypeFont::from_file(&path, 24.0);
        assert!(matches!(result, Err(FontError::Parse(_))));
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn missing_font_file_is_an_io_error() {
        let result = TrueTypeFont::from_file(Path::new(MISSING[0]), 24.0);
        assert!(matches!(result, Err(FontError::Io(_))));
    }

    #[test]
    fn builtin_face_scales_with_requested_size() {
        assert_eq!(BuiltinFont::new(7.0).ink_height(), 7.0);
        assert_eq!(BuiltinFont::new(76.0).ink_height(), 77.0);
        // Tiny sizes clamp to a single pixel per cell.
        assert_eq!(BuiltinFont::new(1.0).ink_height(), 7.0);
    }

    #[test]
    fn builtin_draw_marks_pixels() {
        let background = Rgb([3, 18, 38]);
        let mut canvas = RgbImage::from_pixel(120, 40, background);
        let font = FontHandle::Builtin(BuiltinFont::new(14.0));
        font.draw(&mut canvas, 4.0, 4.0, "Blue", Rgb([255, 255, 255]));

        let touched = canvas.pixels().filter(|p| **p != background).count();
        assert!(touched > 0, "no pixels were drawn");
    }

    #[test]
    fn builtin_draw_clips_at_canvas_edges() {
        let mut canvas = RgbImage::from_pixel(20, 10, Rgb([0, 0, 0]));
        let font = FontHandle::Builtin(BuiltinFont::new(14.0));
        // Partially off the top-left corner and running off the right edge.
        font.draw(&mut canvas, -6.0, -6.0, "Economy", Rgb([255, 255, 255]));
    }
}
