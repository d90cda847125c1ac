use gallery_nav::{GalleryOverlay, Key, Listener, MemorySurface, OverlayEvent, OverlaySurface};
use proptest::prelude::*;
use shared::{PictureRecord, PictureSequence};

fn sequence(urls: &[&str]) -> PictureSequence {
    urls.iter()
        .map(|url| PictureRecord::new(*url, 3, 1, "2016-02-01"))
        .collect::<Vec<_>>()
        .into()
}

fn numbered(len: usize) -> PictureSequence {
    (0..len)
        .map(|idx| PictureRecord::new(format!("photos/{idx}.jpg"), idx as u32, 0, "2016-02-01"))
        .collect::<Vec<_>>()
        .into()
}

/// Distinct urls that all share `name`, which may contain spaces.
fn named(name: &str, len: usize) -> PictureSequence {
    (0..len)
        .map(|idx| PictureRecord::new(format!("photos/{name} {idx}.jpg"), 1, 0, "2016-02-01"))
        .collect::<Vec<_>>()
        .into()
}

fn ready_overlay(pictures: PictureSequence) -> GalleryOverlay<MemorySurface> {
    let mut overlay = GalleryOverlay::new(MemorySurface::new());
    overlay.initialize();
    overlay.set_pictures(pictures);
    overlay
}

/// Feeds queued location changes back to the overlay the way a browser would.
fn pump_hash_changes(overlay: &mut GalleryOverlay<MemorySurface>) {
    while let Some(hash) = overlay.surface_mut().take_hash_change() {
        overlay.handle_event(OverlayEvent::HashChanged(hash));
    }
}

proptest! {
    #[test]
    fn go_to_index_wraps_around(len in 1usize..24, index in -500i64..500) {
        let mut overlay = ready_overlay(numbered(len));
        let expected = ((index % len as i64) + len as i64) % len as i64;

        prop_assert_eq!(overlay.go_to_index(index), Some(expected as usize));
        prop_assert_eq!(overlay.index(), Some(expected as usize));
    }

    #[test]
    fn hash_round_trip_restores_position(
        len in 1usize..16,
        k in 0usize..16,
        detour in 1i64..8,
        name in "[a-zA-Z0-9 %#\t]{0,8}",
    ) {
        let k = k % len;
        let mut overlay = ready_overlay(named(&name, len));

        overlay.go_to_index(k as i64);
        let hash = overlay.surface().hash().to_string();

        overlay.go_to_index(k as i64 + detour);
        overlay.handle_event(OverlayEvent::HashChanged(hash));

        prop_assert_eq!(overlay.index(), Some(k));
        prop_assert!(overlay.is_visible());
    }
}

#[test]
fn wraparound_examples() {
    let mut overlay = ready_overlay(numbered(5));
    assert_eq!(overlay.go_to_index(-1), Some(4));
    assert_eq!(overlay.go_to_index(5), Some(0));
}

#[test]
fn hide_twice_matches_hide_once() {
    let mut overlay = ready_overlay(numbered(3));
    overlay.show();
    overlay.hide();

    let listeners = overlay.surface().listeners().clone();
    let removals = overlay.surface().listener_removals();
    let bound: Vec<Listener> = overlay.bound_listeners().collect();

    overlay.hide();

    assert_eq!(overlay.surface().listeners(), &listeners);
    assert_eq!(overlay.surface().listener_removals(), removals);
    assert_eq!(overlay.bound_listeners().collect::<Vec<_>>(), bound);
}

#[test]
fn empty_sequence_navigation_is_silent() {
    let mut overlay = ready_overlay(numbered(0));

    assert_eq!(overlay.go_to_index(3), None);
    assert_eq!(overlay.go_to_identifier("photos/0.jpg"), None);
    assert!(!overlay.is_visible());
    assert_eq!(overlay.surface().image_source(), None);

    let mut visible = ready_overlay(numbered(2));
    visible.show();
    visible.set_pictures(numbered(0));
    let was_visible = visible.is_visible();
    assert_eq!(visible.go_to_index(1), None);
    assert_eq!(visible.is_visible(), was_visible);
}

#[test]
fn arrow_left_from_first_wraps_to_last() {
    let mut overlay = ready_overlay(sequence(&["a", "b", "c"]));
    overlay.go_to_index(0);
    overlay.show();

    overlay.handle_event(OverlayEvent::KeyDown(Key::ArrowLeft));

    assert_eq!(overlay.index(), Some(2));
    assert_eq!(overlay.surface().hash(), "#photo/c");
}

#[test]
fn external_hash_opens_matching_photo() {
    let mut overlay = ready_overlay(sequence(&["a", "b", "c"]));

    overlay.surface_mut().navigate_to("#photo/b");
    pump_hash_changes(&mut overlay);

    assert_eq!(overlay.index(), Some(1));
    assert!(overlay.is_visible());
    assert_eq!(overlay.surface().image_source(), Some("b"));
}

#[test]
fn saved_hash_reopens_url_with_spaces() {
    let mut overlay = ready_overlay(sequence(&["photos/my pic.jpg", "photos/b.jpg"]));
    overlay.go_to_index(0);
    let saved = overlay.surface().hash().to_string();
    assert_eq!(saved, "#photo/photos/my%20pic.jpg");

    overlay.go_to_index(1);
    overlay.surface_mut().navigate_to(&saved);
    pump_hash_changes(&mut overlay);

    assert_eq!(overlay.index(), Some(0));
    assert!(overlay.is_visible());
    assert_eq!(overlay.surface().image_source(), Some("photos/my pic.jpg"));
}

#[test]
fn unknown_photo_hash_while_open_keeps_hash_in_sync() {
    let mut overlay = ready_overlay(sequence(&["a", "b", "c"]));
    overlay.go_to_index(1);
    overlay.show();
    pump_hash_changes(&mut overlay);

    overlay.surface_mut().navigate_to("#photo/missing");
    pump_hash_changes(&mut overlay);

    assert!(overlay.is_visible());
    assert_eq!(overlay.index(), Some(1));
    assert_eq!(overlay.surface().hash(), "#photo/b");
}

#[test]
fn image_click_on_last_wraps_to_first() {
    let mut overlay = ready_overlay(sequence(&["a", "b", "c"]));
    overlay.go_to_index(2);
    overlay.show();

    assert!(overlay.handle_event(OverlayEvent::ImageClicked));
    assert_eq!(overlay.index(), Some(0));
    assert!(overlay.is_visible());
}

#[test]
fn deep_link_before_pictures_arrive() {
    let mut overlay = GalleryOverlay::new(MemorySurface::with_hash("#photo/b"));
    overlay.initialize();
    assert!(!overlay.is_visible());

    overlay.set_pictures(sequence(&["a", "b", "c"]));

    assert!(overlay.is_visible());
    assert_eq!(overlay.index(), Some(1));
    assert_eq!(overlay.surface().hash(), "#photo/b");
}

#[test]
fn cleared_hash_closes_overlay() {
    let mut overlay = ready_overlay(sequence(&["a", "b"]));
    overlay.show();
    pump_hash_changes(&mut overlay);

    overlay.surface_mut().navigate_to("");
    pump_hash_changes(&mut overlay);

    assert!(!overlay.is_visible());
    assert!(!overlay.surface().has_listener(Listener::KeyDown));
    assert!(overlay.surface().has_listener(Listener::HashChange));
}

#[test]
fn echoed_hash_changes_are_stable() {
    let mut overlay = ready_overlay(sequence(&["a", "b", "c"]));
    overlay.show();
    overlay.handle_event(OverlayEvent::KeyDown(Key::ArrowRight));
    overlay.handle_event(OverlayEvent::KeyDown(Key::ArrowRight));
    pump_hash_changes(&mut overlay);

    assert_eq!(overlay.index(), Some(2));
    assert!(overlay.is_visible());

    overlay.handle_event(OverlayEvent::KeyDown(Key::Escape));
    pump_hash_changes(&mut overlay);

    assert!(!overlay.is_visible());
    assert_eq!(overlay.surface().hash(), "");
    assert_eq!(overlay.index(), Some(2));
}

#[test]
fn show_hide_cycles_do_not_leak_listeners() {
    let mut overlay = ready_overlay(numbered(4));
    for _ in 0..5 {
        overlay.show();
        overlay.hide();
    }

    let surface = overlay.surface();
    assert_eq!(
        surface.listener_adds() - surface.listener_removals(),
        surface.listeners().len()
    );
    assert_eq!(surface.listeners().len(), 1);
}
