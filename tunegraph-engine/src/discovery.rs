//! Discovery playlist scoring
//!
//! Ranks candidate songs for a "weekly discovery" playlist from a user's
//! favorites: each favorite contributes its top similar songs, weighted by
//! rank (the best-ranked contribution of a favorite is worth
//! `per_favorite` points, the next one point less, and so on), and scores
//! sum across favorites. Songs the user already has in favorites are never
//! candidates.
//!
//! Users without usable favorites still get a playlist: the id-sorted head
//! of the catalog, minus favorites when any resolved.

use crate::similarity::SimilarityGraph;
use std::collections::{HashMap, HashSet};
use tracing::debug;
use tunegraph_common::Song;

/// Build a discovery playlist of at most `size` songs.
///
/// `favorite_ids` that do not resolve against the store are ignored. The
/// rank counter advances only over scored (non-favorite) contributions, so
/// a favorite whose top similar songs are themselves favorites passes its
/// full weight on to the first non-favorite candidate.
pub(crate) fn discovery_playlist(
    songs_by_id: &HashMap<String, Song>,
    similarity: &SimilarityGraph,
    favorite_ids: &[String],
    size: usize,
    per_favorite: usize,
) -> Vec<Song> {
    let favorites: HashSet<&str> = favorite_ids.iter().map(String::as_str).collect();
    let resolved: Vec<&Song> = favorite_ids
        .iter()
        .filter_map(|id| songs_by_id.get(id))
        .collect();

    if resolved.is_empty() {
        debug!(size, "No resolvable favorites, falling back to catalog head");
        return catalog_head(songs_by_id, size, None);
    }

    let mut scores: HashMap<String, f64> = HashMap::new();
    for favorite in &resolved {
        let similar = similarity.most_similar(&favorite.id, per_favorite);
        let mut rank = 1usize;
        for candidate in similar {
            if favorites.contains(candidate.id.as_str()) {
                continue;
            }
            let score = (per_favorite - rank + 1) as f64;
            *scores.entry(candidate.id).or_insert(0.0) += score;
            rank += 1;
        }
    }

    if scores.is_empty() {
        debug!(size, "Favorites produced no candidates, falling back to non-favorite head");
        return catalog_head(songs_by_id, size, Some(&favorites));
    }

    let mut ranked: Vec<(String, f64)> = scores.into_iter().collect();
    ranked.sort_by(|(id_a, score_a), (id_b, score_b)| {
        score_b
            .partial_cmp(score_a)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| id_a.cmp(id_b))
    });

    let playlist: Vec<Song> = ranked
        .into_iter()
        .take(size)
        .filter_map(|(id, _)| songs_by_id.get(&id).cloned())
        .collect();

    debug!(
        favorites = resolved.len(),
        playlist = playlist.len(),
        "Built discovery playlist"
    );
    playlist
}

/// The first `size` songs of the id-sorted catalog, optionally excluding a
/// favorite set
fn catalog_head(
    songs_by_id: &HashMap<String, Song>,
    size: usize,
    exclude: Option<&HashSet<&str>>,
) -> Vec<Song> {
    let mut songs: Vec<Song> = songs_by_id
        .values()
        .filter(|song| exclude.map_or(true, |set| !set.contains(song.id.as_str())))
        .cloned()
        .collect();
    songs.sort_by(|a, b| a.id.cmp(&b.id));
    songs.truncate(size);
    songs
}
