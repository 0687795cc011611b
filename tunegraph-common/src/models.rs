//! Domain models shared between the engine and its hosting services

use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// A song in the catalog.
///
/// Identity is defined solely by `id`: two `Song` values with the same id are
/// the same entity regardless of the other fields, so `PartialEq`/`Eq`/`Hash`
/// are implemented over `id` only. Updating a song is a full replacement at
/// the catalog boundary (remove-and-reinsert semantics).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Song {
    /// Unique, stable identifier (caller-supplied opaque string)
    pub id: String,
    /// Song title
    pub title: String,
    /// Performing artist
    pub artist: String,
    /// Musical genre
    pub genre: String,
    /// Release year
    pub year: i32,
    /// Duration in minutes
    pub duration: f64,
}

impl Song {
    /// Convenience constructor used throughout the engine and its tests
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        artist: impl Into<String>,
        genre: impl Into<String>,
        year: i32,
        duration: f64,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            artist: artist.into(),
            genre: genre.into(),
            year,
            duration,
        }
    }
}

impl PartialEq for Song {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Song {}

impl Hash for Song {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Outcome of inserting a song into the catalog.
///
/// An id collision does not overwrite the existing record and does not
/// silently mutate the caller's input; the new record is stored under the
/// next free numeric id and the reassignment is reported explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InsertOutcome {
    /// Stored under the id the caller supplied
    Inserted(String),
    /// The supplied id was already taken; stored under a fresh id
    Renumbered { old_id: String, new_id: String },
}

impl InsertOutcome {
    /// The id the song ended up stored under
    pub fn stored_id(&self) -> &str {
        match self {
            InsertOutcome::Inserted(id) => id,
            InsertOutcome::Renumbered { new_id, .. } => new_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_song_equality_is_id_only() {
        let a = Song::new("1", "Love Story", "Taylor Swift", "Pop", 2008, 3.9);
        let b = Song::new("1", "Imagine", "John Lennon", "Rock", 1971, 3.1);
        let c = Song::new("2", "Love Story", "Taylor Swift", "Pop", 2008, 3.9);

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_song_hash_follows_id() {
        let mut set = HashSet::new();
        set.insert(Song::new("1", "Love Story", "Taylor Swift", "Pop", 2008, 3.9));

        // Same id, different metadata: already present
        assert!(!set.insert(Song::new("1", "Imagine", "John Lennon", "Rock", 1971, 3.1)));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_insert_outcome_stored_id() {
        assert_eq!(InsertOutcome::Inserted("7".to_string()).stored_id(), "7");
        let renum = InsertOutcome::Renumbered {
            old_id: "7".to_string(),
            new_id: "8".to_string(),
        };
        assert_eq!(renum.stored_id(), "8");
    }

    #[test]
    fn test_song_serde_round_trip() {
        let song = Song::new("12", "Bohemian Rhapsody", "Queen", "Rock", 1975, 5.9);
        let json = serde_json::to_string(&song).unwrap();
        let back: Song = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, "12");
        assert_eq!(back.title, "Bohemian Rhapsody");
        assert_eq!(back.year, 1975);
    }
}
