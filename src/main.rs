mod assets;
mod banner;
mod draw;
mod font;
mod minifont;

use anyhow::Context as _;
use tracing::info;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    for spec in &assets::ASSETS {
        let img = banner::render(spec.width, spec.height)
            .with_context(|| format!("render {}x{} banner", spec.width, spec.height))?;
        img.save(spec.path)
            .with_context(|| format!("write '{}'", spec.path))?;
        info!(
            path = spec.path,
            width = spec.width,
            height = spec.height,
            "banner written"
        );
    }
    Ok(())
}
