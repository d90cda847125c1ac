use gallery::{Gallery, surface::ConsoleSurface};
use gallery_config::{FilterKind, GalleryConfig};
use gallery_nav::{Listener, OverlaySurface};
use std::path::Path;
use tempfile::TempDir;

const FEED: &str = r#"[
    {"url": "photos/a.png", "date": "2016-03-14", "likes": 10, "comments": 1},
    {"url": "photos/b.png", "date": "2016-03-10", "likes": 20, "comments": 9},
    {"url": "photos/c.png", "date": "2016-02-01", "likes": 30, "comments": 4}
]"#;

fn fixture() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("pictures.json"), FEED).unwrap();
    dir
}

fn config(dir: &Path) -> GalleryConfig {
    GalleryConfig {
        feed: dir.join("pictures.json").display().to_string(),
        image_base_dir: Some(dir.display().to_string()),
        page_size: 2,
        ..GalleryConfig::default()
    }
}

async fn loaded_gallery(dir: &Path, hash: &str) -> Gallery {
    let mut gallery = Gallery::new(config(dir), ConsoleSurface::with_hash(hash));
    gallery.load().await;
    gallery
}

#[tokio::test]
async fn test_load_renders_first_page() {
    let dir = fixture();
    let gallery = loaded_gallery(dir.path(), "").await;

    assert!(gallery.catalog().state().is_ready());
    assert_eq!(gallery.catalog().len(), 3);
    assert_eq!(gallery.tiles().len(), 2);
    assert!(!gallery.overlay().is_visible());
}

#[tokio::test]
async fn test_scripted_session() {
    let dir = fixture();
    let mut gallery = loaded_gallery(dir.path(), "").await;

    let script = b"more\nopen 2\nright\nstatus\n" as &[u8];
    gallery.run(script).await.unwrap();

    assert_eq!(gallery.tiles().len(), 3);
    assert!(gallery.overlay().is_visible());
    assert_eq!(gallery.overlay().index(), Some(0));
    assert_eq!(gallery.overlay().surface().hash(), "#photo/photos/a.png");
    assert_eq!(gallery.overlay().surface().state().likes(), Some(10));

    gallery.run(b"esc\n" as &[u8]).await.unwrap();

    assert!(!gallery.overlay().is_visible());
    assert_eq!(gallery.overlay().surface().hash(), "");
}

#[tokio::test]
async fn test_quit_stops_reading() {
    let dir = fixture();
    let mut gallery = loaded_gallery(dir.path(), "").await;

    gallery.run(b"quit\ngoto 1\n" as &[u8]).await.unwrap();

    assert!(!gallery.overlay().is_visible());
}

#[tokio::test]
async fn test_deep_link_opens_after_load() {
    let dir = fixture();
    let gallery = loaded_gallery(dir.path(), "#photo/photos/b.png").await;

    assert!(gallery.overlay().is_visible());
    assert_eq!(gallery.overlay().index(), Some(1));
    assert_eq!(
        gallery.overlay().surface().state().image_source(),
        Some("photos/b.png")
    );
}

#[tokio::test]
async fn test_external_hash_navigation() {
    let dir = fixture();
    let mut gallery = loaded_gallery(dir.path(), "").await;

    gallery.run(b"hash #photo/photos/c.png\n" as &[u8]).await.unwrap();
    assert!(gallery.overlay().is_visible());
    assert_eq!(gallery.overlay().index(), Some(2));

    gallery.run(b"hash\n" as &[u8]).await.unwrap();
    assert!(!gallery.overlay().is_visible());
    assert!(!gallery.overlay().surface().state().has_listener(Listener::KeyDown));
}

#[tokio::test]
async fn test_filter_change_keeps_open_photo() {
    let dir = fixture();
    let mut gallery = loaded_gallery(dir.path(), "").await;

    gallery
        .run(b"goto 2\nfilter discussed\n" as &[u8])
        .await
        .unwrap();

    assert_eq!(gallery.catalog().active_filter(), FilterKind::Discussed);
    assert_eq!(gallery.catalog().filtered()[0].url, "photos/b.png");
    assert!(gallery.overlay().is_visible());
    assert_eq!(gallery.overlay().current().unwrap().url, "photos/c.png");
    assert_eq!(gallery.overlay().index(), Some(1));
    assert_eq!(gallery.tiles().len(), 2);
}

#[tokio::test]
async fn test_missing_feed_degrades_to_error_state() {
    let dir = tempfile::tempdir().unwrap();
    let mut gallery = loaded_gallery(dir.path(), "#photo/photos/a.png").await;

    assert!(gallery.catalog().state().is_error());
    assert!(!gallery.overlay().is_visible());

    gallery.run(b"status\nopen 0\nright\n" as &[u8]).await.unwrap();
    assert!(!gallery.overlay().is_visible());

    std::fs::write(dir.path().join("pictures.json"), FEED).unwrap();
    gallery.run(b"reload\n" as &[u8]).await.unwrap();

    assert!(gallery.catalog().state().is_ready());
    assert!(gallery.overlay().is_visible());
    assert_eq!(gallery.overlay().index(), Some(0));
}

#[tokio::test]
async fn test_shutdown_releases_listeners() {
    let dir = fixture();
    let mut gallery = loaded_gallery(dir.path(), "#photo/photos/a.png").await;

    gallery.shutdown();

    assert!(!gallery.overlay().is_visible());
    assert!(gallery.overlay().surface().state().listeners().is_empty());
    assert!(gallery.tiles().is_empty());
    assert!(gallery.renderer().is_empty());
}
