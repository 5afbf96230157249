//! Integration tests for identity-based requests
//!
//! Requests are built from a snapshot of the playlist, then the playlist
//! changes before they run, as happens with a UI or a remote client.

use cue_playlist::{
    ChannelListener, ItemRef, Media, Playlist, PlaylistError, PlaylistEvent, SharedPlaylist,
};
use std::sync::Arc;
use std::thread;

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

fn snapshot(playlist: &Playlist, indices: &[usize]) -> Vec<ItemRef> {
    indices
        .iter()
        .map(|&i| Arc::clone(playlist.get(i).unwrap()))
        .collect()
}

fn order(playlist: &Playlist, medias: &[Arc<Media>]) -> Vec<usize> {
    playlist
        .items()
        .iter()
        .map(|item| {
            medias
                .iter()
                .position(|m| Arc::ptr_eq(m, item.media()))
                .unwrap()
        })
        .collect()
}

fn removals(events: &[PlaylistEvent]) -> Vec<(usize, usize)> {
    events
        .iter()
        .filter_map(|event| match event {
            PlaylistEvent::ItemsRemoved { index, count } => Some((*index, *count)),
            _ => None,
        })
        .collect()
}

// ===== Remove =====

#[test]
fn test_remove_scrambled_request_with_stale_item() {
    let (mut playlist, medias) = create_test_playlist(11);
    let request = snapshot(&playlist, &[9, 2, 5, 3, 10, 1, 7]);

    // item 5 goes away before the request runs
    playlist.remove(5, 1).unwrap();

    let (listener, rx) = ChannelListener::new();
    playlist.add_listener(Box::new(listener), false);
    playlist.request_remove(&request, Some(9)).unwrap();

    let events: Vec<PlaylistEvent> = rx.try_iter().collect();
    assert_eq!(removals(&events), vec![(8, 2), (6, 1), (1, 3)]);
    assert_eq!(events.len(), 3);
    assert_eq!(order(&playlist, &medias), vec![0, 4, 6, 8]);
}

#[test]
fn test_remove_contiguous_request_uses_one_notification() {
    let (mut playlist, medias) = create_test_playlist(8);
    let request = snapshot(&playlist, &[2, 3, 4]);

    let (listener, rx) = ChannelListener::new();
    playlist.add_listener(Box::new(listener), false);
    playlist.request_remove(&request, Some(2)).unwrap();

    let events: Vec<PlaylistEvent> = rx.try_iter().collect();
    assert_eq!(removals(&events), vec![(2, 3)]);
    assert_eq!(order(&playlist, &medias), vec![0, 1, 5, 6, 7]);
}

#[test]
fn test_remove_with_shifted_hint() {
    let (mut playlist, medias) = create_test_playlist(8);
    let request = snapshot(&playlist, &[4, 5]);
    playlist.remove(0, 2).unwrap();

    // the hint still says 4, the items are now at 2 and 3
    playlist.request_remove(&request, Some(4)).unwrap();
    assert_eq!(order(&playlist, &medias), vec![2, 3, 6, 7]);
}

#[test]
fn test_remove_all_stale_is_a_silent_no_op() {
    let (mut playlist, _) = create_test_playlist(5);
    let request = snapshot(&playlist, &[1, 2]);
    playlist.remove(1, 2).unwrap();

    let (listener, rx) = ChannelListener::new();
    playlist.add_listener(Box::new(listener), false);

    assert_eq!(playlist.request_remove(&request, Some(1)), Ok(()));
    assert_eq!(playlist.count(), 3);
    assert!(rx.try_recv().is_err());
}

#[test]
fn test_remove_duplicates_in_request() {
    let (mut playlist, medias) = create_test_playlist(4);
    let mut request = snapshot(&playlist, &[1, 2]);
    request.extend(snapshot(&playlist, &[1]));

    playlist.request_remove(&request, None).unwrap();
    assert_eq!(order(&playlist, &medias), vec![0, 3]);
}

// ===== Move =====

#[test]
fn test_move_preserves_request_order() {
    let (mut playlist, medias) = create_test_playlist(10);
    let request = snapshot(&playlist, &[7, 1, 8, 2]);

    playlist.request_move(&request, 2, Some(7)).unwrap();

    assert_eq!(order(&playlist, &medias), vec![0, 3, 7, 1, 8, 2, 4, 5, 6, 9]);
}

#[test]
fn test_move_with_target_past_shrunk_end_appends() {
    let (mut playlist, medias) = create_test_playlist(10);
    let request = snapshot(&playlist, &[0, 1]);
    playlist.remove(5, 5).unwrap();

    playlist.request_move(&request, 9, Some(0)).unwrap();

    assert_eq!(order(&playlist, &medias), vec![2, 3, 4, 0, 1]);
}

#[test]
fn test_move_already_in_place_notifies_nothing() {
    let (mut playlist, _) = create_test_playlist(6);
    let request = snapshot(&playlist, &[2, 3]);

    let (listener, rx) = ChannelListener::new();
    playlist.add_listener(Box::new(listener), false);
    playlist.request_move(&request, 2, Some(2)).unwrap();

    assert!(rx.try_recv().is_err());
}

#[test]
fn test_move_keeps_current_item() {
    let (mut playlist, medias) = create_test_playlist(6);
    playlist.goto(Some(1)).unwrap();
    let request = snapshot(&playlist, &[5, 1]);

    playlist.request_move(&request, 0, None).unwrap();

    assert_eq!(order(&playlist, &medias), vec![5, 1, 0, 2, 3, 4]);
    assert_eq!(playlist.current_index(), Some(1));
}

// ===== Insert / GoTo =====

#[test]
fn test_insert_clamps_stale_index() {
    let (mut playlist, medias) = create_test_playlist(3);
    let extra = create_test_media(1);

    playlist.request_insert(42, &extra).unwrap();

    assert_eq!(playlist.count(), 4);
    assert!(Arc::ptr_eq(playlist.get(3).unwrap().media(), &extra[0]));
    assert!(Arc::ptr_eq(playlist.get(0).unwrap().media(), &medias[0]));
}

#[test]
fn test_goto_uses_identity_over_hint() {
    let (mut playlist, medias) = create_test_playlist(5);
    let item = Arc::clone(playlist.get(3).unwrap());
    playlist.remove(0, 1).unwrap();

    playlist.request_goto(&item, Some(3)).unwrap();

    assert_eq!(playlist.current_index(), Some(2));
    let playing = playlist.player().current_media().unwrap();
    assert!(Arc::ptr_eq(&playing, &medias[3]));
}

#[test]
fn test_goto_removed_item_fails() {
    let (mut playlist, _) = create_test_playlist(3);
    let item = Arc::clone(playlist.get(0).unwrap());
    playlist.clear();

    assert_eq!(
        playlist.request_goto(&item, Some(0)),
        Err(PlaylistError::NotFound)
    );
}

// ===== Concurrency =====

#[test]
fn test_requests_race_with_direct_edits() {
    let shared = SharedPlaylist::default();
    shared.lock().append(&create_test_media(200)).unwrap();
    let request: Vec<ItemRef> = {
        let playlist = shared.lock();
        (0..200)
            .step_by(3)
            .map(|i| Arc::clone(playlist.get(i).unwrap()))
            .collect()
    };

    let editor = {
        let shared = shared.clone();
        thread::spawn(move || {
            for _ in 0..50 {
                let mut playlist = shared.lock();
                if playlist.count() > 0 {
                    playlist.remove(0, 1).unwrap();
                }
            }
        })
    };
    let requester = {
        let shared = shared.clone();
        let request = request.clone();
        thread::spawn(move || {
            shared.lock().request_remove(&request, Some(0)).unwrap();
        })
    };
    editor.join().unwrap();
    requester.join().unwrap();

    let playlist = shared.lock();
    for item in &request {
        assert_eq!(playlist.index_of(item), None);
    }
    assert!(playlist.count() <= 200 - request.len());
}
