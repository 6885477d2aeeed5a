//! Batched loading of child rows onto their parents
//!
//! A batched query returns `(parent_key, child)` pairs for a whole set of
//! parents in one round trip. These helpers split that result back per
//! parent without disturbing the order the query produced.

use std::collections::HashMap;
use std::hash::Hash;

/// Partition `(parent_key, child)` pairs by parent key.
///
/// Children keep their relative order within each group.
pub fn group_by_parent<K, T, I>(rows: I) -> HashMap<K, Vec<T>>
where
    K: Eq + Hash,
    I: IntoIterator<Item = (K, T)>,
{
    let mut groups: HashMap<K, Vec<T>> = HashMap::new();
    for (key, child) in rows {
        groups.entry(key).or_default().push(child);
    }
    groups
}

/// Pair each parent with its children, in parent order.
///
/// Parents with no rows get an empty list. Rows whose key matches no
/// parent are dropped.
pub fn attach<P, K, T, F>(parents: Vec<P>, rows: Vec<(K, T)>, key_of: F) -> Vec<(P, Vec<T>)>
where
    K: Eq + Hash,
    F: Fn(&P) -> K,
{
    let mut groups = group_by_parent(rows);
    parents
        .into_iter()
        .map(|parent| {
            let children = groups.remove(&key_of(&parent)).unwrap_or_default();
            (parent, children)
        })
        .collect()
}
