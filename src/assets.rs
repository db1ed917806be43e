//! Fixed configuration for the asset run: target canvases, palette,
//! branding copy and the font fallback chain. Static data only.

use image::Rgb;

/// One target canvas: dimensions plus where the finished PNG lands.
pub struct AssetSpec {
    pub width: u32,
    pub height: u32,
    pub path: &'static str,
}

/// The two images the run produces, processed in order.
pub const ASSETS: [AssetSpec; 2] = [
    AssetSpec {
        width: 1280,
        height: 320,
        path: "github-header.png",
    },
    AssetSpec {
        width: 1200,
        height: 630,
        path: "og-image.png",
    },
];

pub const TITLE: &str = "CoralLedger Blue";
pub const TAGLINE: &str = "Marine Intelligence for the Bahamas Blue Economy";

/// Candidate font files, tried in order; heaviest preferred face first.
pub const FONT_CANDIDATES: [&str; 3] = [
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSansBold.ttf",
];

/// Base fill behind the gradient (#031226).
pub const BASE_FILL: Rgb<u8> = Rgb([3, 18, 38]);

pub const GRADIENT_TOP: Rgb<u8> = Rgb([14, 27, 56]);
pub const GRADIENT_BOTTOM: Rgb<u8> = Rgb([190, 132, 190]);

pub const WAVE_PRIMARY: Rgb<u8> = Rgb([24, 150, 210]);
pub const WAVE_SECONDARY: Rgb<u8> = Rgb([40, 221, 255]);

/// Title text (#F4FBFF) and tagline text (#D7EBFF).
pub const TITLE_COLOR: Rgb<u8> = Rgb([244, 251, 255]);
pub const TAGLINE_COLOR: Rgb<u8> = Rgb([215, 235, 255]);

/// Accent rectangle outline (#00C5A1) and inset polygon (#2EE3FF).
pub const ACCENT_OUTLINE: Rgb<u8> = Rgb([0, 197, 161]);
pub const ACCENT_PATH: Rgb<u8> = Rgb([46, 227, 255]);
