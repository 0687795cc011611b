//! Concurrent multi-criteria song search
//!
//! Fans a query out across independent predicate tasks (title, artist and
//! genre substring matches plus an inclusive year range), runs them
//! concurrently over one immutable snapshot, then reduces the partial
//! id-sets with a set operator (AND = intersection, OR = union).
//!
//! Failure policy: fail-fast. A panicked or timed-out criterion task aborts
//! the remaining tasks and fails the whole search - under AND semantics,
//! dropping a failed task's contribution would silently remove a constraint
//! and widen the results.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use serde::{Deserialize, Serialize};
use tokio::task::JoinSet;
use tracing::{debug, warn};
use tunegraph_common::config::SearchConfig;
use tunegraph_common::{Error, Result, Song};

/// Set operator applied when combining per-criterion result sets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CombineOp {
    /// Intersection: a song must satisfy every supplied criterion
    And,
    /// Union: a song must satisfy at least one supplied criterion
    #[default]
    Or,
}

impl CombineOp {
    /// Parse an operator string: `"AND"` (any case) selects intersection,
    /// anything else falls back to union, the historical default.
    pub fn parse(op: &str) -> Self {
        if op.trim().eq_ignore_ascii_case("and") {
            CombineOp::And
        } else {
            CombineOp::Or
        }
    }
}

/// Optional search criteria; unset fields contribute no constraint at all.
///
/// Text criteria are case-insensitive substring matches; blank strings are
/// treated as absent rather than rejected. The year bounds are inclusive
/// and independently optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchCriteria {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub year_from: Option<i32>,
    #[serde(default)]
    pub year_to: Option<i32>,
}

impl SearchCriteria {
    /// The independent predicate tasks this query fans out to (at most 4)
    fn predicates(&self) -> Vec<Predicate> {
        let mut predicates = Vec::new();

        if let Some(needle) = normalize(&self.title) {
            predicates.push(Predicate::Title(needle));
        }
        if let Some(needle) = normalize(&self.artist) {
            predicates.push(Predicate::Artist(needle));
        }
        if let Some(needle) = normalize(&self.genre) {
            predicates.push(Predicate::Genre(needle));
        }
        if self.year_from.is_some() || self.year_to.is_some() {
            predicates.push(Predicate::YearRange {
                from: self.year_from,
                to: self.year_to,
            });
        }

        predicates
    }
}

/// Trim a text criterion; blank input means "no constraint"
fn normalize(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase)
}

/// One schedulable filter predicate
#[derive(Debug, Clone)]
enum Predicate {
    Title(String),
    Artist(String),
    Genre(String),
    YearRange { from: Option<i32>, to: Option<i32> },
}

impl Predicate {
    fn label(&self) -> &'static str {
        match self {
            Predicate::Title(_) => "title",
            Predicate::Artist(_) => "artist",
            Predicate::Genre(_) => "genre",
            Predicate::YearRange { .. } => "year",
        }
    }

    fn matches(&self, song: &Song) -> bool {
        match self {
            Predicate::Title(needle) => song.title.to_lowercase().contains(needle),
            Predicate::Artist(needle) => song.artist.to_lowercase().contains(needle),
            Predicate::Genre(needle) => song.genre.to_lowercase().contains(needle),
            Predicate::YearRange { from, to } => {
                from.map_or(true, |from| song.year >= from)
                    && to.map_or(true, |to| song.year <= to)
            }
        }
    }
}

/// Fan-out/fan-in search coordinator
#[derive(Debug, Clone)]
pub struct SearchCoordinator {
    task_timeout: Duration,
}

impl SearchCoordinator {
    /// Create a coordinator with the configured per-task deadline
    pub fn new(config: &SearchConfig) -> Self {
        Self {
            task_timeout: Duration::from_millis(config.task_timeout_ms),
        }
    }

    /// Run a multi-criteria search over an immutable song snapshot.
    ///
    /// One task is spawned per supplied criterion; all tasks read the same
    /// shared snapshot and produce independent id-sets, which are then
    /// combined with `op`. The call awaits every scheduled task before
    /// returning (no streaming, no partial delivery).
    ///
    /// With no criteria supplied the result is empty - a blank query never
    /// falls back to "return everything". Results are sorted by song id so
    /// repeated queries are reproducible.
    pub async fn search(
        &self,
        songs: Arc<Vec<Song>>,
        criteria: &SearchCriteria,
        op: CombineOp,
    ) -> Result<Vec<Song>> {
        let predicates = criteria.predicates();
        if predicates.is_empty() {
            debug!("Search with no criteria, returning empty result");
            return Ok(Vec::new());
        }

        debug!(
            tasks = predicates.len(),
            snapshot = songs.len(),
            ?op,
            "Fanning out search tasks"
        );

        let mut join_set = JoinSet::new();
        for predicate in predicates {
            let snapshot = Arc::clone(&songs);
            join_set.spawn(async move {
                let ids: HashSet<String> = snapshot
                    .iter()
                    .filter(|song| predicate.matches(song))
                    .map(|song| song.id.clone())
                    .collect();
                (predicate.label(), ids)
            });
        }

        let mut id_sets: Vec<HashSet<String>> = Vec::new();
        while !join_set.is_empty() {
            match tokio::time::timeout(self.task_timeout, join_set.join_next()).await {
                Ok(Some(Ok((label, ids)))) => {
                    debug!(criterion = label, matched = ids.len(), "Search task finished");
                    id_sets.push(ids);
                }
                Ok(Some(Err(e))) => {
                    warn!(error = %e, "Search task failed, aborting search");
                    join_set.abort_all();
                    return Err(Error::Search(format!("criterion task failed: {}", e)));
                }
                Ok(None) => break,
                Err(_) => {
                    warn!(timeout_ms = self.task_timeout.as_millis() as u64,
                          "Search task deadline exceeded, aborting search");
                    join_set.abort_all();
                    return Err(Error::Search("criterion task timed out".to_string()));
                }
            }
        }

        let mut sets = id_sets.into_iter();
        let mut combined = sets.next().unwrap_or_default();
        for ids in sets {
            match op {
                CombineOp::And => combined.retain(|id| ids.contains(id)),
                CombineOp::Or => combined.extend(ids),
            }
        }

        let mut results: Vec<Song> = songs
            .iter()
            .filter(|song| combined.contains(&song.id))
            .cloned()
            .collect();
        results.sort_by(|a, b| a.id.cmp(&b.id));

        debug!(matched = results.len(), "Search complete");
        Ok(results)
    }
}
