// Grouping-by-key: partition items into ordered buckets by a derived key
use fxhash::FxHashMap;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::hash::Hash;
use std::str::FromStr;
use tracing::debug;

use crate::error::GroupError;

/// All items sharing one key, in the order they were encountered
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bucket<K, V> {
    pub key: K,
    pub items: Vec<V>,
}

/// How buckets are laid out relative to each other
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BucketOrder {
    /// Ascending by key
    #[default]
    Key,
    /// In the order each key first appeared in the input
    FirstSeen,
}

impl BucketOrder {
    pub fn name(&self) -> &str {
        match self {
            BucketOrder::Key => "key",
            BucketOrder::FirstSeen => "first-seen",
        }
    }
}

impl FromStr for BucketOrder {
    type Err = GroupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "key" | "sorted" | "asc" => Ok(BucketOrder::Key),
            "first-seen" | "first_seen" | "firstseen" | "input" => Ok(BucketOrder::FirstSeen),
            _ => Err(GroupError::UnknownOrder(s.to_string())),
        }
    }
}

/// Ordered collection of non-empty buckets
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Groups<K, V> {
    buckets: Vec<Bucket<K, V>>,
}

impl<K, V> Groups<K, V> {
    fn empty() -> Self {
        Self {
            buckets: Vec::new(),
        }
    }

    /// Number of buckets
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Total number of items across all buckets
    pub fn item_count(&self) -> usize {
        self.buckets.iter().map(|b| b.items.len()).sum()
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.buckets.iter().map(|b| &b.key)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Bucket<K, V>> {
        self.buckets.iter()
    }

    pub fn into_buckets(self) -> Vec<Bucket<K, V>> {
        self.buckets
    }

    /// Bucket holding the most items. Ties go to the earliest bucket.
    pub fn largest(&self) -> Option<&Bucket<K, V>> {
        self.buckets.iter().reduce(|best, bucket| {
            if bucket.items.len() > best.items.len() {
                bucket
            } else {
                best
            }
        })
    }

    pub fn get(&self, key: &K) -> Option<&[V]>
    where
        K: PartialEq,
    {
        self.buckets
            .iter()
            .find(|b| &b.key == key)
            .map(|b| b.items.as_slice())
    }
}

impl<K, V> From<BTreeMap<K, Vec<V>>> for Groups<K, V> {
    fn from(map: BTreeMap<K, Vec<V>>) -> Self {
        Self {
            buckets: map
                .into_iter()
                .map(|(key, items)| Bucket { key, items })
                .collect(),
        }
    }
}

impl<'a, K, V> IntoIterator for &'a Groups<K, V> {
    type Item = &'a Bucket<K, V>;
    type IntoIter = std::slice::Iter<'a, Bucket<K, V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.buckets.iter()
    }
}

/// Group items by key, creating each bucket on first use through the map's
/// entry API. Buckets come out in ascending key order.
pub fn group_by_key<I, K, V, F>(items: I, mut key_fn: F) -> Groups<K, V>
where
    I: IntoIterator<Item = V>,
    K: Ord,
    F: FnMut(&V) -> K,
{
    let mut lookup: BTreeMap<K, Vec<V>> = BTreeMap::new();

    for item in items {
        lookup.entry(key_fn(&item)).or_default().push(item);
    }

    Groups::from(lookup)
}

/// Same grouping as [`group_by_key`], spelled as an explicit membership
/// check followed by inserting an empty bucket.
pub fn group_by_key_checked<I, K, V, F>(items: I, mut key_fn: F) -> Groups<K, V>
where
    I: IntoIterator<Item = V>,
    K: Ord + Clone,
    F: FnMut(&V) -> K,
{
    let mut lookup: BTreeMap<K, Vec<V>> = BTreeMap::new();

    for item in items {
        let key = key_fn(&item);
        if !lookup.contains_key(&key) {
            lookup.insert(key.clone(), Vec::new());
        }
        if let Some(bucket) = lookup.get_mut(&key) {
            bucket.push(item);
        }
    }

    Groups::from(lookup)
}

/// Group items by key with buckets laid out in `order`
pub fn group_by_key_ordered<I, K, V, F>(
    items: I,
    mut key_fn: F,
    order: BucketOrder,
) -> Groups<K, V>
where
    I: IntoIterator<Item = V>,
    K: Ord + Hash + Clone,
    F: FnMut(&V) -> K,
{
    match order {
        BucketOrder::Key => group_by_key(items, key_fn),
        BucketOrder::FirstSeen => {
            assemble_first_seen(items.into_iter().map(|item| (key_fn(&item), item)))
        }
    }
}

/// Derive keys on the rayon pool, then assign items to buckets in input
/// order so each bucket keeps encounter order.
pub fn par_group_by_key<K, V, F>(items: Vec<V>, key_fn: F, order: BucketOrder) -> Groups<K, V>
where
    K: Ord + Hash + Clone + Send,
    V: Sync,
    F: Fn(&V) -> K + Sync,
{
    let keys: Vec<K> = items.par_iter().map(&key_fn).collect();
    debug!("Derived {} keys in parallel", keys.len());

    let pairs = keys.into_iter().zip(items);
    match order {
        BucketOrder::Key => {
            let mut lookup: BTreeMap<K, Vec<V>> = BTreeMap::new();
            for (key, item) in pairs {
                lookup.entry(key).or_default().push(item);
            }
            Groups::from(lookup)
        }
        BucketOrder::FirstSeen => assemble_first_seen(pairs),
    }
}

fn assemble_first_seen<K, V>(pairs: impl Iterator<Item = (K, V)>) -> Groups<K, V>
where
    K: Hash + Eq + Clone,
{
    let mut groups = Groups::empty();
    let mut index: FxHashMap<K, usize> = FxHashMap::default();

    for (key, item) in pairs {
        let slot = *index.entry(key.clone()).or_insert_with(|| {
            groups.buckets.push(Bucket {
                key,
                items: Vec::new(),
            });
            groups.buckets.len() - 1
        });
        groups.buckets[slot].items.push(item);
    }

    groups
}

/// Bucket sizes only, ascending by key
pub fn group_counts<I, K, V, F>(items: I, mut key_fn: F) -> Vec<(K, usize)>
where
    I: IntoIterator<Item = V>,
    K: Ord,
    F: FnMut(&V) -> K,
{
    let mut counts: BTreeMap<K, usize> = BTreeMap::new();
    for item in items {
        *counts.entry(key_fn(&item)).or_insert(0) += 1;
    }
    counts.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const NAMES: [&str; 8] = [
        "raymond", "rachel", "matthew", "roger", "betty", "melissa", "judith", "charlie",
    ];

    #[test]
    fn test_group_by_length() {
        let groups = group_by_key(NAMES, |name| name.len());

        assert_eq!(groups.keys().copied().collect::<Vec<_>>(), vec![5, 6, 7]);
        assert_eq!(groups.get(&5), Some(&["roger", "betty"][..]));
        assert_eq!(groups.get(&6), Some(&["rachel", "judith"][..]));
        assert_eq!(
            groups.get(&7),
            Some(&["raymond", "matthew", "melissa", "charlie"][..])
        );
        assert_eq!(groups.get(&8), None);
    }

    #[test]
    fn test_both_styles_agree() {
        let by_entry = group_by_key(NAMES, |name| name.len());
        let by_check = group_by_key_checked(NAMES, |name| name.len());
        assert_eq!(by_entry, by_check);

        let words = ["a", "bb", "c", "", "dd", "a"];
        assert_eq!(
            group_by_key(words, |w| w.len()),
            group_by_key_checked(words, |w| w.len())
        );
    }

    #[test]
    fn test_empty_input() {
        let groups = group_by_key(Vec::<String>::new(), |s| s.len());
        assert!(groups.is_empty());
        assert_eq!(groups.item_count(), 0);
        assert!(groups.largest().is_none());
    }

    #[test]
    fn test_duplicates_are_kept() {
        let groups = group_by_key(["ab", "ab", "cd"], |s| s.len());
        assert_eq!(groups.len(), 1);
        assert_eq!(groups.get(&2), Some(&["ab", "ab", "cd"][..]));
    }

    #[test]
    fn test_first_seen_order() {
        let groups = group_by_key_ordered(NAMES, |name| name.len(), BucketOrder::FirstSeen);
        assert_eq!(groups.keys().copied().collect::<Vec<_>>(), vec![7, 6, 5]);
        assert_eq!(groups.item_count(), NAMES.len());
        assert_eq!(groups.get(&5), Some(&["roger", "betty"][..]));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let words: Vec<String> = (0..500).map(|i| "x".repeat(i % 13 + 1)).collect();

        for order in [BucketOrder::Key, BucketOrder::FirstSeen] {
            let seq = group_by_key_ordered(words.clone(), |w| w.len(), order);
            let par = par_group_by_key(words.clone(), |w| w.len(), order);
            assert_eq!(seq, par);
        }
    }

    #[test]
    fn test_largest_prefers_earliest_on_tie() {
        let groups = group_by_key(["aa", "bb", "c", "d", "eee"], |s| s.len());
        let largest = groups.largest().unwrap();
        assert_eq!(largest.key, 1);
        assert_eq!(largest.items, vec!["c", "d"]);
    }

    #[test]
    fn test_group_counts() {
        let counts = group_counts(NAMES, |name| name.len());
        assert_eq!(counts, vec![(5, 2), (6, 2), (7, 4)]);
    }

    #[test]
    fn test_order_from_str() {
        assert_eq!("key".parse::<BucketOrder>().unwrap(), BucketOrder::Key);
        assert_eq!("First-Seen".parse::<BucketOrder>().unwrap(), BucketOrder::FirstSeen);
        assert!("random".parse::<BucketOrder>().is_err());
    }

    #[test]
    fn test_serialize_buckets() {
        let groups = group_by_key(["ab", "c"], |s| s.len());
        let json = serde_json::to_string(&groups).unwrap();
        assert_eq!(json, r#"[{"key":1,"items":["c"]},{"key":2,"items":["ab"]}]"#);
    }
}
