//! In-memory song catalog with rebuild-on-write derived structures
//!
//! The catalog owns the authoritative song store (id -> Song) plus the two
//! derived structures built from it: the title trie for autocompletion and
//! the similarity graph for recommendations. Every mutation rebuilds both
//! from scratch before the write lock is released, so readers always see
//! either the old snapshot or the fully rebuilt one - never a half-rebuilt
//! trie or graph. Rebuild-the-world on every mutation is a deliberate
//! simplicity-over-performance tradeoff; it puts a scalability ceiling on
//! catalog size rather than correctness at risk.

use crate::discovery;
use crate::search::{CombineOp, SearchCoordinator, SearchCriteria};
use crate::similarity::SimilarityGraph;
use crate::trie::PrefixTrie;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::{debug, info, warn};
use tunegraph_common::{EngineConfig, Error, InsertOutcome, Result, Song};

/// Everything guarded by the catalog lock: the store and its derived
/// structures, which are only ever replaced together.
#[derive(Debug, Default)]
struct CatalogState {
    songs: HashMap<String, Song>,
    trie: PrefixTrie,
    similarity: SimilarityGraph,
}

impl CatalogState {
    /// Discard and rebuild the trie and similarity graph from the current
    /// store. Called with the write lock held.
    fn rebuild_derived(&mut self) {
        let snapshot: Vec<Song> = self.songs.values().cloned().collect();

        let mut trie = PrefixTrie::new();
        for song in &snapshot {
            trie.insert(&song.title);
        }
        self.trie = trie;
        self.similarity.rebuild(&snapshot);

        debug!(songs = snapshot.len(), "Rebuilt derived structures");
    }

    /// Next free numeric id: one past the highest numeric id in the store,
    /// or "1" when there is none. Non-numeric ids are ignored.
    fn next_free_id(&self) -> String {
        let max = self
            .songs
            .keys()
            .filter_map(|id| id.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        (max + 1).to_string()
    }

    /// Store a song without rebuilding, renumbering on id collision
    fn insert_song(&mut self, mut song: Song) -> InsertOutcome {
        if self.songs.contains_key(&song.id) {
            let old_id = song.id.clone();
            let new_id = self.next_free_id();
            warn!(%old_id, %new_id, "Duplicate song id, assigned next free id");
            song.id = new_id.clone();
            self.songs.insert(new_id.clone(), song);
            return InsertOutcome::Renumbered { old_id, new_id };
        }

        let id = song.id.clone();
        self.songs.insert(id.clone(), song);
        InsertOutcome::Inserted(id)
    }
}

/// Song catalog plus derived recommendation structures
#[derive(Debug)]
pub struct Catalog {
    state: RwLock<CatalogState>,
    search: SearchCoordinator,
    per_favorite: usize,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

impl Catalog {
    /// Create an empty catalog
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            state: RwLock::new(CatalogState::default()),
            search: SearchCoordinator::new(&config.search),
            per_favorite: config.discovery.per_favorite,
        }
    }

    // -------- mutations (each rebuilds the derived structures) --------

    /// Insert a song.
    ///
    /// An id collision never overwrites: the new record is stored under the
    /// next free numeric id and the reassignment is reported in the
    /// returned outcome.
    pub fn insert(&self, song: Song) -> InsertOutcome {
        let mut state = self.state.write().unwrap();
        let outcome = state.insert_song(song);
        state.rebuild_derived();
        outcome
    }

    /// Replace an existing song wholesale.
    ///
    /// Unlike recommendation queries, CRUD on a missing entity is an error.
    pub fn update(&self, song: Song) -> Result<()> {
        let mut state = self.state.write().unwrap();
        if !state.songs.contains_key(&song.id) {
            return Err(Error::NotFound(format!("song {}", song.id)));
        }
        state.songs.insert(song.id.clone(), song);
        state.rebuild_derived();
        Ok(())
    }

    /// Remove a song by id
    pub fn remove(&self, id: &str) -> Result<()> {
        let mut state = self.state.write().unwrap();
        if state.songs.remove(id).is_none() {
            return Err(Error::NotFound(format!("song {}", id)));
        }
        state.rebuild_derived();
        Ok(())
    }

    /// Load a batch of songs with per-song insert semantics and a single
    /// rebuild at the end (the bulk-import path).
    pub fn bulk_load(&self, songs: Vec<Song>) -> Vec<InsertOutcome> {
        let mut state = self.state.write().unwrap();
        let outcomes: Vec<InsertOutcome> =
            songs.into_iter().map(|song| state.insert_song(song)).collect();
        state.rebuild_derived();
        info!(loaded = outcomes.len(), "Bulk-loaded songs");
        outcomes
    }

    // -------- store queries --------

    /// Look up a song by id
    pub fn get(&self, id: &str) -> Option<Song> {
        self.state.read().unwrap().songs.get(id).cloned()
    }

    /// All songs, id-sorted for reproducible listings
    pub fn list(&self) -> Vec<Song> {
        let state = self.state.read().unwrap();
        let mut songs: Vec<Song> = state.songs.values().cloned().collect();
        songs.sort_by(|a, b| a.id.cmp(&b.id));
        songs
    }

    /// Number of songs in the catalog
    pub fn len(&self) -> usize {
        self.state.read().unwrap().songs.len()
    }

    /// Whether the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.state.read().unwrap().songs.is_empty()
    }

    /// Conjunctive title+genre substring filter (both optional,
    /// case-insensitive); id-sorted
    pub fn filter(&self, title: Option<&str>, genre: Option<&str>) -> Vec<Song> {
        let title = title.map(str::to_lowercase);
        let genre = genre.map(str::to_lowercase);

        let state = self.state.read().unwrap();
        let mut songs: Vec<Song> = state
            .songs
            .values()
            .filter(|song| {
                title
                    .as_deref()
                    .map_or(true, |t| song.title.to_lowercase().contains(t))
                    && genre
                        .as_deref()
                        .map_or(true, |g| song.genre.to_lowercase().contains(g))
            })
            .cloned()
            .collect();
        songs.sort_by(|a, b| a.id.cmp(&b.id));
        songs
    }

    // -------- derived-structure queries --------

    /// Title suggestions for a prefix (lower-cased trie entries)
    pub fn autocomplete(&self, prefix: &str) -> Vec<String> {
        self.state.read().unwrap().trie.search_by_prefix(prefix)
    }

    /// The `limit` songs most similar to `id`; empty for unknown ids
    pub fn similar(&self, id: &str, limit: usize) -> Vec<Song> {
        self.state.read().unwrap().similarity.most_similar(id, limit)
    }

    /// Radio queue seeded by a song: the seed itself first, then its most
    /// similar neighbors in order. Empty for unknown ids.
    pub fn radio(&self, id: &str, limit: usize) -> Vec<Song> {
        let state = self.state.read().unwrap();
        let origin = match state.songs.get(id) {
            Some(origin) => origin.clone(),
            None => return Vec::new(),
        };

        let mut queue = Vec::with_capacity(limit + 1);
        queue.push(origin);
        queue.extend(state.similarity.most_similar(id, limit));
        queue
    }

    /// Discovery playlist scored from a user's favorite song ids
    pub fn discovery_playlist(&self, favorite_ids: &[String], size: usize) -> Vec<Song> {
        let state = self.state.read().unwrap();
        discovery::discovery_playlist(
            &state.songs,
            &state.similarity,
            favorite_ids,
            size,
            self.per_favorite,
        )
    }

    // -------- concurrent search --------

    /// Concurrent multi-criteria search.
    ///
    /// Snapshots the song list under the read lock, releases it, and fans
    /// the criteria out over the snapshot - a rebuild started mid-search
    /// cannot affect a search already in flight.
    pub async fn search(&self, criteria: &SearchCriteria, op: CombineOp) -> Result<Vec<Song>> {
        let snapshot: Arc<Vec<Song>> = {
            let state = self.state.read().unwrap();
            Arc::new(state.songs.values().cloned().collect())
        };
        self.search.search(snapshot, criteria, op).await
    }
}
