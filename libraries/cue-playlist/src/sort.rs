//! Multi-key sort and shuffle of the stored order

use crate::item::ItemRef;
use crate::media::MediaMeta;
use crate::types::{SortCriterion, SortKey, SortOrder};
use rand::seq::SliceRandom;
use rand::Rng;
use std::cmp::Ordering;

/// Value extracted from a media for one sort key
///
/// Text is compared case-insensitively. A missing value always sorts after
/// a present one, whatever the direction.
#[derive(Debug, Clone, PartialEq, Eq)]
enum SortValue {
    Text(Option<String>),
    Number(Option<u64>),
}

impl SortValue {
    fn extract(meta: &MediaMeta, uri: &str, key: SortKey) -> Self {
        let text = |s: &Option<String>| SortValue::Text(s.as_ref().map(|s| s.to_lowercase()));
        match key {
            SortKey::Title => text(&meta.title),
            SortKey::Artist => text(&meta.artist),
            SortKey::Album => text(&meta.album),
            SortKey::AlbumArtist => text(&meta.album_artist),
            SortKey::Genre => text(&meta.genre),
            SortKey::Date => text(&meta.date),
            SortKey::Url => SortValue::Text(Some(uri.to_lowercase())),
            SortKey::Duration => SortValue::Number(meta.duration.map(|d| d.as_millis() as u64)),
            SortKey::TrackNumber => SortValue::Number(meta.track_number.map(u64::from)),
            SortKey::DiscNumber => SortValue::Number(meta.disc_number.map(u64::from)),
            SortKey::Rating => SortValue::Number(meta.rating.map(u64::from)),
        }
    }

    fn compare(&self, other: &Self, order: SortOrder) -> Ordering {
        fn directed<T: Ord>(a: &Option<T>, b: &Option<T>, order: SortOrder) -> Ordering {
            match (a, b) {
                (Some(a), Some(b)) => match order {
                    SortOrder::Ascending => a.cmp(b),
                    SortOrder::Descending => b.cmp(a),
                },
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            }
        }

        match (self, other) {
            (SortValue::Text(a), SortValue::Text(b)) => directed(a, b, order),
            (SortValue::Number(a), SortValue::Number(b)) => directed(a, b, order),
            // same key always yields the same variant
            _ => Ordering::Equal,
        }
    }
}

/// Reorder `items` by the lexicographic composition of `criteria`
///
/// Keys are read once per item before sorting, so a concurrent metadata
/// refresh cannot make the comparator inconsistent. The sort is stable:
/// ties keep their current relative order.
pub(crate) fn sort_items(items: &mut Vec<ItemRef>, criteria: &[SortCriterion]) {
    if criteria.is_empty() || items.len() < 2 {
        return;
    }

    let mut keyed: Vec<(Vec<SortValue>, ItemRef)> = items
        .drain(..)
        .map(|item| {
            let meta = item.media().meta();
            let values = criteria
                .iter()
                .map(|c| SortValue::extract(&meta, item.media().uri(), c.key))
                .collect();
            (values, item)
        })
        .collect();

    keyed.sort_by(|(a, _), (b, _)| {
        criteria
            .iter()
            .zip(a.iter().zip(b.iter()))
            .map(|(criterion, (va, vb))| va.compare(vb, criterion.order))
            .find(|ordering| *ordering != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    });

    items.extend(keyed.into_iter().map(|(_, item)| item));
}

/// Uniformly random permutation of the stored order (Fisher-Yates)
pub(crate) fn shuffle_items<R: Rng + ?Sized>(items: &mut [ItemRef], rng: &mut R) {
    items.shuffle(rng);
}
