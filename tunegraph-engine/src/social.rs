//! Directed social graph over usernames
//!
//! Follow relationships are strictly directional: `follow(a, b)` adds the
//! single arc a -> b, and `unfollow(a, b)` removes exactly that arc. Callers
//! wanting mutual following issue two calls. The graph is authoritative for
//! follow state within the engine's lifetime; the hosting service persists
//! it as an edge list via [`SocialGraph::edges`] and restores it at startup
//! via [`SocialGraph::load_edges`].
//!
//! All operations report outcomes as booleans or empty collections - an
//! absent user is a routine query result, never an error. Mutations and
//! queries are serialized through an internal `RwLock`, so concurrent use
//! from multiple request handlers is safe.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::RwLock;
use tracing::debug;

/// Adjacency structure over usernames representing follow relationships
#[derive(Debug, Default)]
pub struct SocialGraph {
    /// `following[user]` = the set of users that user follows
    following: RwLock<HashMap<String, HashSet<String>>>,
}

impl SocialGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a user with no follow edges. No-op when already present.
    pub fn add_user(&self, name: &str) {
        let mut following = self.following.write().unwrap();
        following.entry(name.to_string()).or_default();
    }

    /// Whether a user node exists
    pub fn contains_user(&self, name: &str) -> bool {
        self.following.read().unwrap().contains_key(name)
    }

    /// Number of user nodes
    pub fn len(&self) -> usize {
        self.following.read().unwrap().len()
    }

    /// Whether the graph holds no users
    pub fn is_empty(&self) -> bool {
        self.following.read().unwrap().is_empty()
    }

    /// Make `origin` follow `dest`.
    ///
    /// Fails when `origin == dest` or either user is absent. Re-following
    /// an existing edge is an idempotent success: `true` with no state
    /// change.
    pub fn follow(&self, origin: &str, dest: &str) -> bool {
        if origin == dest {
            return false;
        }

        let mut following = self.following.write().unwrap();
        if !following.contains_key(dest) {
            return false;
        }

        match following.get_mut(origin) {
            Some(dests) => {
                if dests.insert(dest.to_string()) {
                    debug!(origin, dest, "Added follow edge");
                }
                true
            }
            None => false,
        }
    }

    /// Make `origin` stop following `dest`.
    ///
    /// Fails when `origin == dest`, either user is absent, or no
    /// origin -> dest edge exists. Removes only that directed edge.
    pub fn unfollow(&self, origin: &str, dest: &str) -> bool {
        if origin == dest {
            return false;
        }

        let mut following = self.following.write().unwrap();
        if !following.contains_key(dest) {
            return false;
        }

        match following.get_mut(origin) {
            Some(dests) => {
                let removed = dests.remove(dest);
                if removed {
                    debug!(origin, dest, "Removed follow edge");
                }
                removed
            }
            None => false,
        }
    }

    /// The set of users `name` follows; empty when `name` is absent.
    pub fn neighbors(&self, name: &str) -> HashSet<String> {
        self.following
            .read()
            .unwrap()
            .get(name)
            .cloned()
            .unwrap_or_default()
    }

    /// Follow suggestions for `name` via breadth-first traversal.
    ///
    /// Walks outgoing edges starting at `name`, visiting each user once. A
    /// visited user is suggested when it is neither `name` itself nor one
    /// of `name`'s direct neighbors. BFS order puts the nearest candidates
    /// first, and traversal stops as soon as `limit` suggestions are
    /// collected. Absent `name` yields an empty vec.
    pub fn suggest(&self, name: &str, limit: usize) -> Vec<String> {
        let following = self.following.read().unwrap();

        let direct = match following.get(name) {
            Some(direct) => direct,
            None => return Vec::new(),
        };

        let mut visited: HashSet<&str> = HashSet::new();
        let mut queue: VecDeque<&str> = VecDeque::new();
        let mut suggestions = Vec::new();

        visited.insert(name);
        queue.push_back(name);

        while let Some(current) = queue.pop_front() {
            if suggestions.len() >= limit {
                break;
            }

            let neighbors = match following.get(current) {
                Some(neighbors) => neighbors,
                None => continue,
            };

            for neighbor in neighbors {
                if visited.insert(neighbor.as_str()) {
                    queue.push_back(neighbor.as_str());

                    if neighbor != name && !direct.contains(neighbor) {
                        suggestions.push(neighbor.clone());
                        if suggestions.len() >= limit {
                            break;
                        }
                    }
                }
            }
        }

        suggestions
    }

    /// Remove a user and every follow edge pointing at it.
    ///
    /// Returns `false` when the user is absent. Stripping the user from
    /// every other neighbor set is an O(V) scan, acceptable at the intended
    /// single-deployment scale.
    pub fn remove_user(&self, name: &str) -> bool {
        let mut following = self.following.write().unwrap();
        if following.remove(name).is_none() {
            return false;
        }

        for neighbors in following.values_mut() {
            neighbors.remove(name);
        }

        debug!(user = name, "Removed user from social graph");
        true
    }

    /// Snapshot of every directed follow edge, sorted for deterministic
    /// serialization by the hosting service.
    pub fn edges(&self) -> Vec<(String, String)> {
        let following = self.following.read().unwrap();
        let mut edges: Vec<(String, String)> = following
            .iter()
            .flat_map(|(origin, dests)| {
                dests
                    .iter()
                    .map(move |dest| (origin.clone(), dest.clone()))
            })
            .collect();
        edges.sort();
        edges
    }

    /// Replay a persisted edge list, creating users as needed.
    ///
    /// The startup load step: each pair re-applies `follow(origin, dest)`
    /// after ensuring both nodes exist. Self-edges in a corrupt snapshot
    /// are skipped by the follow rules.
    pub fn load_edges<'a, I>(&self, pairs: I)
    where
        I: IntoIterator<Item = &'a (String, String)>,
    {
        let mut count = 0usize;
        for (origin, dest) in pairs {
            self.add_user(origin);
            self.add_user(dest);
            if self.follow(origin, dest) {
                count += 1;
            }
        }
        debug!(edges = count, "Replayed social graph edge list");
    }
}
