//! # Tunegraph Engine
//!
//! In-memory recommendation and discovery engine for a catalog/social music
//! service:
//! - Song catalog with a title trie (autocompletion) and a weighted
//!   similarity graph (similar songs, radio queues, discovery playlists),
//!   rebuilt wholesale on every catalog mutation
//! - Directed social graph with follow/unfollow and BFS follow suggestions
//! - Concurrent multi-criteria search with AND/OR set combination
//!
//! The engine performs no I/O: the hosting services feed it song and follow
//! snapshots and serialize its outputs. Unknown ids in recommendation and
//! social queries yield empty results or `false`; errors are reserved for
//! CRUD on missing entities and failed search tasks.

pub mod catalog;
mod discovery;
pub mod search;
pub mod similarity;
pub mod social;
pub mod trie;

pub use catalog::Catalog;
pub use search::{CombineOp, SearchCoordinator, SearchCriteria};
pub use similarity::{similarity_score, SimilarityGraph};
pub use social::SocialGraph;
pub use trie::PrefixTrie;
