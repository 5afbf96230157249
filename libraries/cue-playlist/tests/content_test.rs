//! Integration tests for direct content operations
//!
//! Index-based insert, move, remove and clear, checked against the
//! resulting order and cursor.

use cue_playlist::{
    Media, NullPlayer, PlaybackOrder, Playlist, PlaylistConfig, PlaylistError, PlaylistItem,
};
use std::sync::Arc;

// ===== Test Helpers =====

fn create_test_media(count: usize) -> Vec<Arc<Media>> {
    (0..count)
        .map(|i| Arc::new(Media::new(format!("media{}", i))))
        .collect()
}

fn create_test_playlist(count: usize) -> (Playlist, Vec<Arc<Media>>) {
    let mut playlist = Playlist::default();
    let medias = create_test_media(count);
    playlist.append(&medias).unwrap();
    (playlist, medias)
}

fn order(playlist: &Playlist, medias: &[Arc<Media>]) -> Vec<usize> {
    playlist
        .items()
        .iter()
        .map(|item| {
            medias
                .iter()
                .position(|m| Arc::ptr_eq(m, item.media()))
                .expect("unknown media")
        })
        .collect()
}

// ===== Insert =====

#[test]
fn test_append_then_insert_in_the_middle() {
    let (mut playlist, medias) = create_test_playlist(5);
    let extra = create_test_media(2);

    playlist.insert(2, &extra).unwrap();

    assert_eq!(playlist.count(), 7);
    assert!(Arc::ptr_eq(playlist.get(1).unwrap().media(), &medias[1]));
    assert!(Arc::ptr_eq(playlist.get(2).unwrap().media(), &extra[0]));
    assert!(Arc::ptr_eq(playlist.get(3).unwrap().media(), &extra[1]));
    assert!(Arc::ptr_eq(playlist.get(4).unwrap().media(), &medias[2]));
}

#[test]
fn test_insert_before_current_shifts_it() {
    let (mut playlist, _) = create_test_playlist(5);
    playlist.goto(Some(3)).unwrap();

    playlist.insert(1, &create_test_media(2)).unwrap();
    assert_eq!(playlist.current_index(), Some(5));

    // inserting right after current does not move it
    playlist.insert(6, &create_test_media(1)).unwrap();
    assert_eq!(playlist.current_index(), Some(5));
}

#[test]
fn test_same_media_twice_gives_distinct_items() {
    let mut playlist = Playlist::default();
    let media = Arc::new(Media::new("twice"));

    playlist.append(&[Arc::clone(&media), Arc::clone(&media)]).unwrap();

    let first = playlist.get(0).unwrap();
    let second = playlist.get(1).unwrap();
    assert!(Arc::ptr_eq(first.media(), second.media()));
    assert!(!PlaylistItem::same(first, second));
}

#[test]
fn test_insert_out_of_range_is_rejected() {
    let (mut playlist, _) = create_test_playlist(3);

    let result = playlist.insert(4, &create_test_media(1));
    assert_eq!(result, Err(PlaylistError::OutOfRange { index: 4, len: 3 }));
    assert_eq!(playlist.count(), 3);
}

// ===== Move =====

#[test]
fn test_move_forward_then_back() {
    let (mut playlist, medias) = create_test_playlist(10);

    playlist.move_items(3, 4, 5).unwrap();
    assert_eq!(order(&playlist, &medias), vec![0, 1, 2, 7, 8, 3, 4, 5, 6, 9]);

    playlist.move_items(5, 4, 3).unwrap();
    assert_eq!(order(&playlist, &medias), (0..10).collect::<Vec<_>>());
}

#[test]
fn test_move_to_the_end() {
    let (mut playlist, medias) = create_test_playlist(5);

    playlist.move_items(0, 2, 3).unwrap();
    assert_eq!(order(&playlist, &medias), vec![2, 3, 4, 0, 1]);
}

#[test]
fn test_move_current_follows_the_item() {
    let (mut playlist, medias) = create_test_playlist(10);
    playlist.goto(Some(4)).unwrap();

    playlist.move_items(3, 4, 5).unwrap();
    assert_eq!(playlist.current_index(), Some(6));
    assert!(Arc::ptr_eq(
        playlist.current_item().unwrap().media(),
        &medias[4]
    ));

    // an item outside the moved slice
    playlist.goto(Some(3)).unwrap();
    playlist.move_items(5, 4, 0).unwrap();
    assert!(Arc::ptr_eq(
        playlist.current_item().unwrap().media(),
        &medias[7]
    ));
}

#[test]
fn test_move_invalid_slice_is_rejected() {
    let (mut playlist, medias) = create_test_playlist(5);

    assert!(playlist.move_items(4, 2, 0).is_err());
    assert!(playlist.move_items(0, 3, 3).is_err());
    assert_eq!(order(&playlist, &medias), vec![0, 1, 2, 3, 4]);
}

// ===== Remove =====

#[test]
fn test_remove_slice() {
    let (mut playlist, medias) = create_test_playlist(10);

    playlist.remove(3, 2).unwrap();
    assert_eq!(order(&playlist, &medias), vec![0, 1, 2, 5, 6, 7, 8, 9]);
}

#[test]
fn test_remove_before_current_shifts_it_back() {
    let (mut playlist, _) = create_test_playlist(10);
    playlist.goto(Some(8)).unwrap();

    playlist.remove(0, 3).unwrap();
    assert_eq!(playlist.current_index(), Some(5));
}

#[test]
fn test_remove_current_clears_cursor() {
    let (mut playlist, _) = create_test_playlist(10);
    playlist.goto(Some(4)).unwrap();
    playlist.start().unwrap();

    playlist.remove(3, 3).unwrap();
    assert_eq!(playlist.current_index(), None);
    assert!(playlist.player().current_media().is_none());
    // next starts over from the first item
    assert!(playlist.has_next());
    assert!(!playlist.has_prev());
}

#[test]
fn test_remove_out_of_range_is_rejected() {
    let (mut playlist, _) = create_test_playlist(3);

    assert_eq!(
        playlist.remove(2, 2),
        Err(PlaylistError::OutOfRange { index: 2, len: 3 })
    );
    assert!(playlist.remove(usize::MAX, 2).is_err());
    assert_eq!(playlist.count(), 3);
}

#[test]
fn test_removed_item_outlives_the_playlist_entry() {
    let (mut playlist, medias) = create_test_playlist(3);
    let held = Arc::clone(playlist.get(0).unwrap());

    playlist.clear();

    assert!(Arc::ptr_eq(held.media(), &medias[0]));
    assert_eq!(playlist.index_of(&held), None);
}

// ===== Clear =====

#[test]
fn test_clear_resets_everything() {
    let (mut playlist, _) = create_test_playlist(10);
    playlist.goto(Some(9)).unwrap();

    playlist.clear();

    assert_eq!(playlist.count(), 0);
    assert_eq!(playlist.current_index(), None);
    assert!(!playlist.has_prev());
    assert!(!playlist.has_next());
}

#[test]
fn test_clear_in_random_order_then_refill() {
    let config = PlaylistConfig {
        order: PlaybackOrder::Random,
        random_seed: Some(7),
        ..PlaylistConfig::default()
    };
    let mut playlist = Playlist::new(Box::new(NullPlayer::new()), &config);
    playlist.append(&create_test_media(5)).unwrap();
    playlist.next().unwrap();

    playlist.clear();
    assert!(!playlist.has_next());

    playlist.append(&create_test_media(3)).unwrap();
    for _ in 0..3 {
        playlist.next().unwrap();
    }
    assert!(!playlist.has_next());
}

// ===== Metadata Updates =====

#[test]
fn test_notify_media_updated_counts_wrappers() {
    let mut playlist = Playlist::default();
    let media = Arc::new(Media::new("shared"));
    playlist
        .append(&[Arc::clone(&media), Arc::new(Media::new("other")), Arc::clone(&media)])
        .unwrap();

    media.update_meta(|meta| meta.title = Some("Renamed".to_string()));

    assert_eq!(playlist.notify_media_updated(&media), 2);
    assert_eq!(playlist.get(2).unwrap().media().name(), "Renamed");
}
