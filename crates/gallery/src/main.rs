use gallery::{AppError, Gallery, surface::ConsoleSurface};
use gallery_config::GalleryConfig;
use std::path::PathBuf;
use tokio::io::BufReader;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // photo-gallery [CONFIG.toml] [#photo/<url>]
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let initial_hash = std::env::args().nth(2).unwrap_or_default();

    let config = GalleryConfig::load_or_default(config_path.as_deref())?;

    let mut gallery = Gallery::new(config, ConsoleSurface::with_hash(initial_hash));
    gallery.load().await;

    let result = gallery.run(BufReader::new(tokio::io::stdin())).await;
    gallery.shutdown();

    result
}
