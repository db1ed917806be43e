// src/banner.rs
use image::RgbImage;
use tracing::debug;

use crate::assets;
use crate::draw::{self, DrawError, VectorLayer};
use crate::font::{self, FontHandle};

const LEFT_MARGIN: f64 = 30.0;
const TAGLINE_GAP: f64 = 12.0;

/// Render one finished banner. Pure function of the dimensions: base fill,
/// gradient, wave band, title and tagline, accent shapes.
pub fn render(width: u32, height: u32) -> Result<RgbImage, DrawError> {
    let h = height as f64;

    let mut canvas = RgbImage::from_pixel(width, height, assets::BASE_FILL);
    draw::fill_gradient(&mut canvas, assets::GRADIENT_TOP, assets::GRADIENT_BOTTOM);

    let mut waves = VectorLayer::new(width, height)?;
    let stroke_width = (height / 24) as f32;
    waves.stroke_polyline(
        &wave_points(width, height, 16.0),
        assets::WAVE_PRIMARY,
        stroke_width,
        false,
    )?;
    waves.stroke_polyline(
        &wave_points(width, height, -10.0),
        assets::WAVE_SECONDARY,
        stroke_width,
        false,
    )?;
    waves.composite_onto(&mut canvas);

    // Each canvas resolves its own fonts; sizes truncate like the geometry.
    let title_font = font::resolve((h * 0.24) as u32 as f32);
    let tagline_font = font::resolve((h * 0.10) as u32 as f32);
    let layout = text_layout(height, &title_font);
    debug!(width, height, title_ink = layout.title_ink, "text block laid out");
    title_font.draw(
        &mut canvas,
        layout.title.0,
        layout.title.1,
        assets::TITLE,
        assets::TITLE_COLOR,
    );
    tagline_font.draw(
        &mut canvas,
        layout.tagline.0,
        layout.tagline.1,
        assets::TAGLINE,
        assets::TAGLINE_COLOR,
    );

    let mut accents = VectorLayer::new(width, height)?;
    let rect = accent_box(width, height);
    accents.stroke_rect(rect, assets::ACCENT_OUTLINE, 5.0)?;
    accents.stroke_polyline(&info_path(rect), assets::ACCENT_PATH, 3.0, true)?;
    accents.composite_onto(&mut canvas);

    Ok(canvas)
}

struct TextLayout {
    title: (f64, f64),
    tagline: (f64, f64),
    title_ink: f64,
}

/// The tagline hangs off the measured title height, so layout survives a
/// fallback to the built-in face.
fn text_layout(height: u32, title_font: &FontHandle) -> TextLayout {
    let title_y = height as f64 * 0.35;
    let title_ink = title_font.ink_height(assets::TITLE);
    TextLayout {
        title: (LEFT_MARGIN, title_y),
        tagline: (LEFT_MARGIN, title_y + title_ink + TAGLINE_GAP),
        title_ink,
    }
}

/// Five control points sketching the wave band across the full width.
fn wave_points(width: u32, height: u32, offset: f64) -> [(f64, f64); 5] {
    let (w, h) = (width as f64, height as f64);
    [
        (0.0, h * 0.55 + offset),
        (w * 0.15, h * 0.45 + offset),
        (w * 0.35, h * 0.60 + offset),
        (w * 0.55, h * 0.50 + offset),
        (w, h * 0.56 + offset),
    ]
}

/// Accent rectangle over the right side of the canvas, corners truncated
/// to whole pixels.
fn accent_box(width: u32, height: u32) -> (f64, f64, f64, f64) {
    let (w, h) = (width as f64, height as f64);
    let x0 = (width - (w * 0.35) as u32) as f64;
    let y0 = (h * 0.15) as u32 as f64;
    let x1 = (width - (w * 0.06) as u32) as f64;
    let y1 = (h * 0.75) as u32 as f64;
    (x0, y0, x1, y1)
}

/// Four-point flourish derived from the accent rectangle's corners.
fn info_path((x0, y0, x1, y1): (f64, f64, f64, f64)) -> [(f64, f64); 4] {
    [
        (x0 + 10.0, y0 + 10.0),
        (x0 + 80.0, y0 + 80.0),
        (x1 - 10.0, y0 + 30.0),
        (x1 - 60.0, y1 - 20.0),
    ]
}
