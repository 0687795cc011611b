//! Weighted song-similarity graph
//!
//! Undirected graph over the catalog where edge weights approximate
//! recommendation relevance. The graph is a derived structure: it holds no
//! authoritative state and is discarded and rebuilt from the song snapshot
//! on every catalog mutation.
//!
//! Scoring is a simple additive heuristic over metadata, not a normalized
//! distance metric:
//! - same genre (case-insensitive): +0.6
//! - same artist (case-insensitive): +0.3
//! - release years within 2 of each other: +0.1

use std::collections::HashMap;
use tracing::debug;
use tunegraph_common::Song;

/// Similarity weight between two songs, in [0.0, 1.0].
///
/// Pure function of (genre, artist, year); independent of insertion order.
pub fn similarity_score(a: &Song, b: &Song) -> f64 {
    let mut score = 0.0;

    if a.genre.eq_ignore_ascii_case(&b.genre) {
        score += 0.6;
    }
    if a.artist.eq_ignore_ascii_case(&b.artist) {
        score += 0.3;
    }
    if (a.year - b.year).abs() <= 2 {
        score += 0.1;
    }

    score
}

/// Weighted undirected similarity graph keyed by song id
#[derive(Debug, Default)]
pub struct SimilarityGraph {
    /// `adjacency[id] = {neighbor_id -> weight, ...}`; symmetric by
    /// construction, entries only where weight > 0
    adjacency: HashMap<String, HashMap<String, f64>>,
    /// Snapshot of the songs the graph was built from, for neighbor
    /// resolution
    songs: HashMap<String, Song>,
}

impl SimilarityGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the graph from a song snapshot.
    ///
    /// Clears all prior state, then scores every unordered pair of distinct
    /// songs and inserts a symmetric edge wherever the score is positive.
    /// Every song in the snapshot gets a node entry, including isolated
    /// ones. O(n²) in the snapshot size.
    pub fn rebuild(&mut self, songs: &[Song]) {
        self.adjacency.clear();
        self.songs.clear();

        for (i, a) in songs.iter().enumerate() {
            self.adjacency.entry(a.id.clone()).or_default();
            self.songs.insert(a.id.clone(), a.clone());

            for b in &songs[i + 1..] {
                let weight = similarity_score(a, b);
                if weight > 0.0 {
                    self.adjacency
                        .entry(a.id.clone())
                        .or_default()
                        .insert(b.id.clone(), weight);
                    self.adjacency
                        .entry(b.id.clone())
                        .or_default()
                        .insert(a.id.clone(), weight);
                }
            }
        }

        let edge_count: usize = self.adjacency.values().map(|n| n.len()).sum();
        debug!(
            songs = songs.len(),
            edges = edge_count / 2,
            "Rebuilt similarity graph"
        );
    }

    /// Number of song nodes in the graph
    pub fn len(&self) -> usize {
        self.adjacency.len()
    }

    /// Whether the graph holds no songs
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Edge weight between two songs, if an edge exists
    pub fn weight(&self, a: &str, b: &str) -> Option<f64> {
        self.adjacency.get(a).and_then(|n| n.get(b)).copied()
    }

    /// The `limit` most similar songs to `origin_id`, best first.
    ///
    /// Unknown ids yield an empty vec - a normal outcome for recommendation
    /// queries, not an error. Neighbors are ordered by weight descending
    /// with ties broken by song id ascending, so radio playback order is
    /// reproducible.
    pub fn most_similar(&self, origin_id: &str, limit: usize) -> Vec<Song> {
        let neighbors = match self.adjacency.get(origin_id) {
            Some(neighbors) => neighbors,
            None => return Vec::new(),
        };

        let mut ranked: Vec<(&String, f64)> =
            neighbors.iter().map(|(id, w)| (id, *w)).collect();
        ranked.sort_by(|(id_a, w_a), (id_b, w_b)| {
            w_b.partial_cmp(w_a)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| id_a.cmp(id_b))
        });

        ranked
            .into_iter()
            .take(limit)
            .filter_map(|(id, _)| self.songs.get(id).cloned())
            .collect()
    }
}
